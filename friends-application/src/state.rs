use std::sync::Arc;

use friends_domain::ports::{ChatTransport, UntappdApi};
use friends_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub untappd: Arc<dyn UntappdApi>,
    pub transport: Arc<dyn ChatTransport>,
    pub metrics: Arc<Metrics>,
}
