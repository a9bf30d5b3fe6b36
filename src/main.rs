use axum::Router;
use clap::Parser;
use dotenvy::dotenv;
use std::env;
use tower_http::trace::TraceLayer;

use expense_ledger::{
    api, ledger_ui,
    utils::app_config::{AppConfig, AppSettings},
};

#[derive(Parser, Debug)]
#[command(name = "expense-ledger", about = "Expense and budget ledger web server")]
struct ServerArgs {
    #[clap(long, env, default_value = "0.0.0.0")]
    bind_address: String,
    #[clap(long, env, default_value_t = 3000)]
    port: u16,
    #[clap(flatten)]
    settings: AppSettings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv();
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            env::var("RUST_LOG")
                .unwrap_or_else(|_| "info".to_string())
                .as_str(),
        )
        .init();

    let args = ServerArgs::parse();

    let app_config = AppConfig::from_settings(&args.settings)?;
    tracing::info!(
        "Application configuration loaded, store backend: {}",
        app_config.store.backend_name()
    );

    let router = Router::new()
        .merge(ledger_ui::router())
        .merge(api::router())
        .layer(TraceLayer::new_for_http())
        .with_state(app_config);

    let addr = format!("{}:{}", args.bind_address, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Starting expense ledger on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
