use std::sync::LazyLock;

use regex::Regex;

use crate::descriptor::plugin::PluginDescriptor;
use crate::descriptor::error::DescriptorError;
use crate::descriptor::field::FieldSpec;

pub static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://twitcasting\.tv").unwrap());

pub const NAME: &str = "twitcasting";

pub fn descriptor() -> Result<PluginDescriptor, DescriptorError> {
    PluginDescriptor::builder(NAME, "Twitcasting")
        .field(
            FieldSpec::switch("twitcasting_danmaku").label("Record danmaku (twitcasting_danmaku)"),
        )
        .field(
            FieldSpec::text("twitcasting_password")
                .label("Room password (twitcasting_password)"),
        )
        .build()
}
