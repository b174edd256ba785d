use reqwest::Client;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub http: Client,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}
