mod model;
mod server;

use std::net::SocketAddr;

use crate::server::{
    bot, config::Config, error::AppError, router, service::voice::TempChannelRegistry, startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    let registry = TempChannelRegistry::new();

    let bot_client = bot::start::init_bot(&config, db.clone(), registry.clone()).await?;
    let cache = bot_client.cache.clone();
    let shard_manager = bot_client.shard_manager.clone();

    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let app = router::router().with_state(AppState::new(db, cache));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Dashboard listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    let cancelled = registry.shutdown();
    tracing::info!("Cancelled {} pending room deletion(s)", cancelled);

    shard_manager.shutdown_all().await;

    Ok(())
}
