//! Generic settings sections that are not tied to a platform.
//!
//! The override form always renders [`download_settings`]; the global
//! configuration form renders the remaining sections next to every platform
//! plugin. Keys of the developer section are nested dot paths into the
//! configuration document.

use super::plugin::PluginDescriptor;
use super::error::DescriptorError;
use super::field::{FieldSpec, Rule};

pub const DOWNLOAD: &str = "download";
pub const GLOBAL: &str = "global";
pub const DEVELOPER: &str = "developer";
pub const USER_COOKIES: &str = "user";

fn downloader() -> FieldSpec {
    FieldSpec::select("downloader")
        .label("Downloader (downloader)")
        .option("streamlink", "streamlink (multi-threaded hls)")
        .option("ffmpeg", "ffmpeg")
        .option("stream-gears", "stream-gears (default)")
        .option("sync-downloader", "sync-downloader (upload while recording)")
}

fn segment_time() -> Result<FieldSpec, DescriptorError> {
    Ok(FieldSpec::text("segment_time")
        .label("Segment duration (segment_time)")
        .rule(Rule::pattern("^[^：]*$", "use an ASCII colon")?)
        .rule(Rule::pattern("^[0-9:]*$", "only digits and ASCII colons are allowed")?)
        .rule(Rule::pattern(
            "^[0-9]{2,4}:[0-5][0-9]:[0-5][0-9]$",
            "minutes or seconds out of range",
        )?))
}

fn file_size() -> FieldSpec {
    FieldSpec::number("file_size")
        .label("Segment size in bytes (file_size)")
        .rule(Rule::range(Some(0.0), None, "size cannot be negative"))
}

fn filename_prefix() -> FieldSpec {
    FieldSpec::text("filename_prefix")
        .label("Filename template (filename_prefix)")
        .help("{streamer}%Y-%m-%dT%H_%M_%S")
}

fn filtering_threshold() -> FieldSpec {
    FieldSpec::number("filtering_threshold")
        .label("Fragment filter in MB (filtering_threshold)")
        .rule(Rule::range(Some(0.0), None, "threshold cannot be negative"))
}

/// Download settings every streamer can override.
pub fn download_settings() -> Result<PluginDescriptor, DescriptorError> {
    PluginDescriptor::builder(DOWNLOAD, "下载设置")
        .field(downloader())
        .field(file_size())
        .field(segment_time()?)
        .field(filename_prefix())
        .field(filtering_threshold())
        .build()
}

/// Space-wide recorder and uploader settings.
pub fn global_settings() -> Result<PluginDescriptor, DescriptorError> {
    PluginDescriptor::builder(GLOBAL, "全局设置")
        .field(downloader().default_value("stream-gears"))
        .field(file_size())
        .field(segment_time()?)
        .field(filename_prefix())
        .field(FieldSpec::switch("segment_processor_parallel").label("Parallel segment processors"))
        .field(filtering_threshold())
        .field(FieldSpec::number("delay").label("Delay after stream end in seconds (delay)"))
        .field(
            FieldSpec::number("event_loop_interval")
                .label("Check interval in seconds (event_loop_interval)")
                .rule(Rule::range(Some(1.0), None, "interval must be at least 1 second")),
        )
        .field(FieldSpec::number("pool1_size").label("Download pool size (pool1_size)"))
        .field(
            FieldSpec::select("submit_api")
                .label("Submit API (submit_api)")
                .option("web", "web")
                .option("client", "client"),
        )
        .field(
            FieldSpec::select("uploader")
                .label("Uploader (uploader)")
                .option("bili_web", "bili_web")
                .option("biliup-rs", "biliup-rs")
                .option("Noop", "Noop")
                .default_value("Noop"),
        )
        .field(
            FieldSpec::select("lines")
                .label("Upload line (lines)")
                .option("AUTO", "AUTO")
                .option("bda2", "bda2")
                .option("kodo", "kodo")
                .option("ws", "ws")
                .option("qn", "qn")
                .option("bldsa", "bldsa"),
        )
        .field(
            FieldSpec::number("threads")
                .label("Upload threads (threads)")
                .rule(Rule::range(Some(1.0), None, "at least one thread is required")),
        )
        .field(FieldSpec::number("pool2_size").label("Upload pool size (pool2_size)"))
        .field(FieldSpec::switch("use_live_cover").label("Use live cover (use_live_cover)"))
        .build()
}

fn log_level(key: &str, label: &str) -> FieldSpec {
    FieldSpec::select(key)
        .label(label)
        .option("DEBUG", "DEBUG")
        .option("INFO", "INFO")
        .option("WARNING", "WARNING")
        .option("ERROR", "ERROR")
        .option("CRITICAL", "CRITICAL")
}

pub fn developer_settings() -> Result<PluginDescriptor, DescriptorError> {
    PluginDescriptor::builder(DEVELOPER, "开发者选项")
        .field(log_level("LOGGING.root.level", "Root log level"))
        .field(log_level("LOGGING.loggers.biliup.level", "Recorder log level"))
        .build()
}

/// Platform account credentials stored under `user`.
pub fn user_cookies() -> Result<PluginDescriptor, DescriptorError> {
    PluginDescriptor::builder(USER_COOKIES, "用户 Cookie")
        .field(FieldSpec::text("user.bili_cookie").label("Bilibili cookie"))
        .field(
            FieldSpec::select("user.bili_cookie_file")
                .label("Bilibili cookie file")
                .allow_custom(),
        )
        .field(FieldSpec::text("user.douyin_cookie").label("Douyin cookie"))
        .field(FieldSpec::text("user.twitch_cookie").label("Twitch cookie"))
        .field(FieldSpec::text("user.youtube_cookie").label("YouTube cookie"))
        .field(FieldSpec::text("user.niconico-email").label("Niconico email"))
        .field(FieldSpec::text("user.niconico-password").label("Niconico password"))
        .field(FieldSpec::text("user.niconico-user-session").label("Niconico user session"))
        .field(
            FieldSpec::text("user.niconico-purge-credentials")
                .label("Niconico purge credentials"),
        )
        .field(FieldSpec::text("user.afreecatv_username").label("AfreecaTV username"))
        .field(FieldSpec::text("user.afreecatv_password").label("AfreecaTV password"))
        .build()
}
