use std::sync::Arc;

use platforms_settings::{PluginDispatcher, default_registry};
use recorder_console::api::ConsoleClient;
use recorder_console::config::ConsoleSettings;
use recorder_console::logging;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = ConsoleSettings::from_env()?;
    let log_config = logging::init_logging(&settings.log_filter)?;

    let registry = Arc::new(default_registry()?);
    let dispatcher = PluginDispatcher::new(registry.clone());
    let client = ConsoleClient::new(&settings);

    info!(
        server = client.base_url(),
        plugins = registry.len(),
        filter = %log_config.get_filter(),
        "Connecting to recorder backend"
    );

    let configuration = client.get_configuration().await?;
    info!(keys = configuration.as_map().len(), "Configuration loaded");

    let templates = client.list_templates().await?;
    info!(count = templates.len(), "Upload templates loaded");

    for streamer in client.list_streamers().await? {
        let plugin = dispatcher.resolve(&streamer.url).map(|p| p.name());
        let overrides = streamer.override_config.as_ref().map_or(0, |o| o.len());
        match plugin {
            Some(plugin) => info!(
                id = streamer.id,
                remark = %streamer.remark,
                status = streamer.status.as_ref().map(|s| s.as_str()),
                plugin,
                overrides,
                "Streamer"
            ),
            None => warn!(
                id = streamer.id,
                remark = %streamer.remark,
                url = %streamer.url,
                "No platform plugin matches streamer url"
            ),
        }
    }

    Ok(())
}
