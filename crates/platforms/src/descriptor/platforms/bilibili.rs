use std::sync::LazyLock;

use regex::Regex;

use crate::descriptor::plugin::PluginDescriptor;
use crate::descriptor::error::DescriptorError;
use crate::descriptor::field::{FieldSpec, Rule};

pub static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://(b23\.tv|live\.bilibili\.com)").unwrap());

pub const NAME: &str = "bilibili";

const CN01_SID_PATTERN: &str = r"^cn-[a-z]{2,6}-[a-z]{2}(-[0-9]{2}){2}$";

pub fn descriptor() -> Result<PluginDescriptor, DescriptorError> {
    PluginDescriptor::builder(NAME, "哔哩哔哩")
        .field(
            FieldSpec::select("bili_qn")
                .label("Quality (bili_qn)")
                .help("Falls back to the next lower quality when the selected one is unavailable.")
                // 杜比视界
                .option(30000, "30000 (Dolby)")
                .option(20000, "20000 (4K)")
                // 原画
                .option(10000, "10000 (original)")
                .option(401, "401 (Blu-ray Dolby)")
                .option(400, "400 (Blu-ray)")
                .option(250, "250 (ultra)")
                .option(150, "150 (high)")
                .option(80, "80 (smooth)")
                .option(0, "0 (lowest)"),
        )
        .field(FieldSpec::switch("bilibili_danmaku").label("Record danmaku (bilibili_danmaku)"))
        .field(
            FieldSpec::select("bili_protocol")
                .label("Stream protocol (bili_protocol)")
                .option("stream", "stream (flv, default)")
                .option("hls_ts", "hls_ts")
                .option("hls_fmp4", "hls_fmp4"),
        )
        .field(FieldSpec::text("bili_perfCDN").label("Preferred CDN (bili_perfCDN)"))
        .field(FieldSpec::switch("bili_cdn_fallback").label("CDN fallback (bili_cdn_fallback)"))
        .field(FieldSpec::text("bili_liveapi").label("Live API (bili_liveapi)"))
        .field(FieldSpec::text("bili_fallback_api").label("Fallback API (bili_fallback_api)"))
        .field(FieldSpec::switch("bili_force_source").label("Force source (bili_force_source)"))
        .field(
            FieldSpec::switch("bili_normalize_cn204")
                .label("Normalize cn204 (bili_normalize_cn204)"),
        )
        .field(
            FieldSpec::tag_list("bili_replace_cn01")
                .label("Replace CN01 sid (bili_replace_cn01)")
                .help("Applied after bili_force_source.")
                .rule(Rule::each_pattern(
                    CN01_SID_PATTERN,
                    "e.g. cn-hjlheb-cu-01-01,cn-tj-ct-01-01",
                )?),
        )
        .build()
}
