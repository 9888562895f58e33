use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};

use crate::server::{
    bot::handler::Handler, config::Config, error::AppError,
    service::voice::TempChannelRegistry,
};

/// Builds the Discord bot client without connecting it.
///
/// The returned client exposes its cache and shard manager, which the caller
/// hands to the dashboard and the shutdown path before starting the client.
///
/// # Arguments
/// - `config` - Application configuration (token and J2C settings)
/// - `db` - Database connection for member registration
/// - `registry` - Room registry shared with the shutdown path
///
/// # Returns
/// - `Ok(Client)` - Configured client ready to start
/// - `Err(AppError)` - Client construction failed (e.g. malformed token)
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    registry: TempChannelRegistry,
) -> Result<Client, AppError> {
    // MESSAGE_CONTENT and GUILD_MEMBERS are privileged intents - must be enabled in the
    // Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    let handler = Handler::new(db, registry, config.j2c_settings());

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Connects the bot and processes events until the shard manager shuts down.
///
/// Should be called from within a `tokio::spawn` task.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
