use anyhow::Context;
use storefront_api::app;
use storefront_api::config::Config;
use storefront_api::store::Store;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("storefront-api starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = Store::new();
    if config.seed_demo_data {
        store
            .write(|catalog| catalog.seed_demo())?
            .map_err(|err| anyhow::anyhow!("failed to seed demo data: {:?}", err))?;
        tracing::info!("Seeded demo catalog");
    }

    let app = app::build_app(&config, store);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
