use std::path::PathBuf;

use saferun_core::{LoopSearchConfig, RouteModel};

use crate::config::ServerConfig;

/// Read-only state shared by all requests
#[derive(Debug)]
pub struct AppState {
    pub model: RouteModel,
    pub search: LoopSearchConfig,
    pub geojson_output: Option<PathBuf>,
}

impl AppState {
    pub fn new(model: RouteModel, config: &ServerConfig) -> Self {
        Self {
            model,
            search: config.search_config(),
            geojson_output: config.geojson_output.clone(),
        }
    }
}
