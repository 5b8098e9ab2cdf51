use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use friends_application::{AppState, Metrics};
use friends_infrastructure::{build_transport, AppConfig, UntappdClient};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config()?;
        info!(
            "untappd api: base={}, max_count={}",
            runtime_config.api_base_url, runtime_config.max_count
        );

        let untappd = Arc::new(UntappdClient::new(&runtime_config)?);
        let transport = build_transport(&runtime_config)?;

        let state = AppState {
            config: runtime_config,
            untappd,
            transport,
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
