use crate::api::gamebanana::GameBananaClient;
use crate::config::AppConfig;

/// Read-only state shared by all requests
pub struct AppState {
    pub config: AppConfig,
    pub client: GameBananaClient,
}
