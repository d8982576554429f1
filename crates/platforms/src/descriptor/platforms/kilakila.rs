use std::sync::LazyLock;

use regex::Regex;

use crate::descriptor::plugin::PluginDescriptor;
use crate::descriptor::error::DescriptorError;
use crate::descriptor::field::FieldSpec;

pub static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://(live\.kilakila\.cn|www\.hongdoufm\.com)").unwrap());

pub const NAME: &str = "kilakila";

pub fn descriptor() -> Result<PluginDescriptor, DescriptorError> {
    PluginDescriptor::builder(NAME, "Kilakila")
        .field(
            FieldSpec::select("kila_protocol")
                .label("Stream protocol (kila_protocol)")
                .option("hls", "hls")
                .option("flv", "flv"),
        )
        .build()
}
