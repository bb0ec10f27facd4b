use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use portfolio_service::{
    config::Config,
    constants::IDENTITY_TIMEOUT_SECS,
    db::Database,
    identity::client::UserServiceClient,
    portfolio::controller::PortfolioController,
    server::Server,
};
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("{}=debug", env!("CARGO_CRATE_NAME")).into()
        }))
        .with(fmt::layer())
        .init();

    info!("Starting with {:?}", config);
    if config.uses_default_secret() {
        warn!("SECRET_KEY is not set, using the development default");
    }

    let database = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to the database")?;
    database.migrate().await.context("Failed to migrate")?;

    let identity = UserServiceClient::new(
        config.user_service_url.as_str(),
        Duration::from_secs(IDENTITY_TIMEOUT_SECS),
    )
    .context("Failed to build identity client")?;

    let controller = PortfolioController::from_pool(database.pool.clone(), Arc::new(identity));
    let server = Server::new(Arc::new(controller));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
        let _ = shutdown_tx.send(());
    });

    server.start(&config.bind_address, shutdown_rx).await?;
    database.pool.close().await;
    Ok(())
}
