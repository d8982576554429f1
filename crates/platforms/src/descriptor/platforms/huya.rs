use std::sync::LazyLock;

use regex::Regex;

use crate::descriptor::plugin::PluginDescriptor;
use crate::descriptor::error::DescriptorError;
use crate::descriptor::field::FieldSpec;

pub static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://(?:(?:www|m)\.)?huya\.com").unwrap());

pub const NAME: &str = "huya";

pub fn descriptor() -> Result<PluginDescriptor, DescriptorError> {
    PluginDescriptor::builder(NAME, "虎牙")
        .field(FieldSpec::number("huya_max_ratio").label("Max bitrate (huya_max_ratio)"))
        .field(FieldSpec::switch("huya_danmaku").label("Record danmaku (huya_danmaku)"))
        .field(FieldSpec::text("huyacdn").label("CDN line (huyacdn)"))
        .build()
}
