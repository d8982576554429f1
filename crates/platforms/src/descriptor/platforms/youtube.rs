use std::sync::LazyLock;

use regex::Regex;

use crate::descriptor::plugin::PluginDescriptor;
use crate::descriptor::error::DescriptorError;
use crate::descriptor::field::{FieldSpec, Rule};

pub static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://(?:(?:www|m)\.)?youtube\.com").unwrap());

pub const NAME: &str = "youtube";

/// yt-dlp style `YYYYMMDD` dates.
const DATE_PATTERN: &str = r"^\d{8}$";

pub fn descriptor() -> Result<PluginDescriptor, DescriptorError> {
    PluginDescriptor::builder(NAME, "YouTube")
        .field(
            FieldSpec::switch("youtube_enable_download_live")
                .label("Download live (youtube_enable_download_live)")
                .default_value(true),
        )
        .field(
            FieldSpec::switch("youtube_enable_download_playback")
                .label("Download playback (youtube_enable_download_playback)")
                .default_value(true),
        )
        .field(
            FieldSpec::text("youtube_after_date")
                .label("Only after date (youtube_after_date)")
                .rule(Rule::pattern(DATE_PATTERN, "expected a date like 20240101")?),
        )
        .field(
            FieldSpec::text("youtube_before_date")
                .label("Only before date (youtube_before_date)")
                .rule(Rule::pattern(DATE_PATTERN, "expected a date like 20240101")?),
        )
        .field(FieldSpec::text("youtube_max_videosize").label("Max video size (youtube_max_videosize)"))
        .field(
            FieldSpec::number("youtube_max_resolution")
                .label("Max vertical resolution (youtube_max_resolution)")
                .rule(Rule::range(Some(1.0), None, "resolution must be positive")),
        )
        .field(FieldSpec::text("youtube_prefer_vcodec").label("Preferred video codec (youtube_prefer_vcodec)"))
        .field(FieldSpec::text("youtube_prefer_acodec").label("Preferred audio codec (youtube_prefer_acodec)"))
        .build()
}
