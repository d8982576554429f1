use std::sync::LazyLock;

use regex::Regex;

use crate::descriptor::plugin::PluginDescriptor;
use crate::descriptor::error::DescriptorError;
use crate::descriptor::field::FieldSpec;

pub static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://(cc\.163\.com)").unwrap());

pub const NAME: &str = "cc";

pub fn descriptor() -> Result<PluginDescriptor, DescriptorError> {
    PluginDescriptor::builder(NAME, "网易CC")
        .field(
            FieldSpec::select("cc_protocol")
                .label("Stream protocol (cc_protocol)")
                .option("flv", "flv")
                .option("hls", "hls"),
        )
        .build()
}
