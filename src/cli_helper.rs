use anyhow::Result;
use crate::utils::app_config::AppConfig;
use crate::action_router::{ActionRouterInput, ActionRouterOutput};

/// Load the same configuration the server uses
pub fn initialize_app_config() -> Result<AppConfig> {
    AppConfig::from_env()
}

pub async fn call_action_router(input: ActionRouterInput, app_config: AppConfig) -> Result<ActionRouterOutput> {
    tracing::debug!("Dispatching {:?}", input);
    input.process(app_config).await
}
