use std::sync::LazyLock;

use regex::Regex;

use crate::descriptor::plugin::PluginDescriptor;
use crate::descriptor::error::DescriptorError;
use crate::descriptor::field::FieldSpec;

pub static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://(?:(?:www|m)\.)?douyu\.com").unwrap());

pub const NAME: &str = "douyu";

pub fn descriptor() -> Result<PluginDescriptor, DescriptorError> {
    PluginDescriptor::builder(NAME, "斗鱼")
        .field(
            FieldSpec::number("douyu_rate")
                .label("Quality rate (douyu_rate)")
                .help("0 original, 4 blu-ray 4m, 3 ultra, 2 high"),
        )
        .field(FieldSpec::switch("douyu_danmaku").label("Record danmaku (douyu_danmaku)"))
        .field(
            FieldSpec::select("douyucdn")
                .label("CDN line (douyucdn)")
                .option("tctc-h5", "tctc-h5")
                .option("tct-h5", "tct-h5")
                .option("ali-h5", "ali-h5")
                .option("hw-h5", "hw-h5")
                .option("hs-h5", "hs-h5")
                .allow_custom(),
        )
        .build()
}
