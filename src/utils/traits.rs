use anyhow::Result;
use crate::utils::app_config::AppConfig;

pub trait ActionProcessor<Config, Output> {
    async fn process(&self, app_config: &AppConfig, local_config: &Config) -> Result<Output>;
}
