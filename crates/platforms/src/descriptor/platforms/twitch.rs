use std::sync::LazyLock;

use regex::Regex;

use crate::descriptor::plugin::PluginDescriptor;
use crate::descriptor::error::DescriptorError;
use crate::descriptor::field::FieldSpec;

pub static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://(?:(?:www|go|m)\.)?twitch\.tv").unwrap());

pub const NAME: &str = "twitch";

pub fn descriptor() -> Result<PluginDescriptor, DescriptorError> {
    PluginDescriptor::builder(NAME, "Twitch")
        .field(FieldSpec::switch("twitch_danmaku").label("Record danmaku (twitch_danmaku)"))
        .field(
            FieldSpec::switch("twitch_disable_ads")
                .label("Skip ads (twitch_disable_ads)")
                .default_value(true),
        )
        .build()
}
