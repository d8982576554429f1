use std::sync::LazyLock;

use regex::Regex;

use crate::descriptor::plugin::PluginDescriptor;
use crate::descriptor::error::DescriptorError;
use crate::descriptor::field::FieldSpec;

pub static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://(?:(?:www|m|live|v)\.)?douyin\.com").unwrap());

pub const NAME: &str = "douyin";

pub fn descriptor() -> Result<PluginDescriptor, DescriptorError> {
    PluginDescriptor::builder(NAME, "抖音")
        .field(
            FieldSpec::select("douyin_quality")
                .label("Quality (douyin_quality)")
                .option("origin", "origin")
                .option("uhd", "uhd")
                .option("hd", "hd")
                .option("sd", "sd")
                .option("ld", "ld")
                .option("md", "md"),
        )
        .field(FieldSpec::switch("douyin_danmaku").label("Record danmaku (douyin_danmaku)"))
        .field(
            FieldSpec::text("user.douyin_cookie")
                .label("Cookie (user.douyin_cookie)")
                .help("Required for some restricted rooms."),
        )
        .field(
            FieldSpec::select("douyin_protocol")
                .label("Stream protocol (douyin_protocol)")
                .option("flv", "flv")
                .option("hls", "hls"),
        )
        .build()
}
