use std::sync::Arc;

use super::cors::CorsOptions;
use crate::config::Config;
use crate::gateway::PredictionSource;
use crate::observability::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub cors: Arc<CorsOptions>,
    pub gateway: Arc<dyn PredictionSource>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: &Config, gateway: Arc<dyn PredictionSource>) -> Self {
        Self {
            cors: Arc::new(CorsOptions::from(&config.cors)),
            gateway,
            metrics: Arc::new(Metrics::new()),
        }
    }
}
