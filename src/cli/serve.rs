// src/cli/serve.rs — `lucence serve`

use crate::api::{self, ApiState};
use crate::assets::AssetService;
use crate::head::HeadInjector;
use crate::infra::config::Config;

/// Apply CLI overrides, activate the asset service once, and serve until Ctrl-C.
pub async fn run_serve(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
    root: Option<String>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if root.is_some() {
        config.store.root = root;
    }

    let assets = AssetService::init(config.store.resolve_root())?;
    let head = HeadInjector::from_config(&config.head);
    tracing::info!(
        "Head injection: {:?} policy, contexts [{}]",
        head.policy(),
        config.head.contexts.join(", ")
    );
    if config.server.token.is_none() {
        tracing::warn!("No server.token configured; upload and delete are unauthenticated");
    }

    let state = ApiState::new(assets, head, config.server.token.clone());
    api::start_server(&config.server, state).await
}
