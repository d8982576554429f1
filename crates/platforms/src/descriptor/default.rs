use super::plugin::PluginDescriptor;
use super::error::DescriptorError;
use super::platforms::{
    bilibili, cc, douyin, douyu, huya, kilakila, twitcasting, twitch, youtube,
};
use super::registry::PluginRegistry;

macro_rules! platform_registry {
    ( $( $regex:path => $descriptor:path ),+ $(,)? ) => {{
        let builder = PluginRegistry::builder();
        $(
            let descriptor: PluginDescriptor = $descriptor()?;
            let builder = builder.register(std::sync::LazyLock::force(&$regex).clone(), descriptor);
        )+
        builder.build()
    }};
}

/// Build the registry of built-in platform plugins.
pub fn default_registry() -> Result<PluginRegistry, DescriptorError> {
    Ok(platform_registry![
        bilibili::URL_REGEX => bilibili::descriptor,
        cc::URL_REGEX => cc::descriptor,
        douyin::URL_REGEX => douyin::descriptor,
        douyu::URL_REGEX => douyu::descriptor,
        huya::URL_REGEX => huya::descriptor,
        kilakila::URL_REGEX => kilakila::descriptor,
        twitcasting::URL_REGEX => twitcasting::descriptor,
        twitch::URL_REGEX => twitch::descriptor,
        youtube::URL_REGEX => youtube::descriptor,
    ])
}
