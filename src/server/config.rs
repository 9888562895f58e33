use std::str::FromStr;

use serenity::all::ChannelId;

use crate::server::{
    error::{config::ConfigError, AppError},
    model::voice::J2cSettings,
};

const DEFAULT_PORT: u16 = 10082;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    /// Voice channel whose entry spawns a temporary room.
    pub j2c_channel_id: ChannelId,
    /// Category temporary rooms are created under.
    pub j2c_category_id: ChannelId,

    /// Dashboard listen port.
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            j2c_channel_id: ChannelId::new(parse("J2C_CHANNEL_ID", &required("J2C_CHANNEL_ID")?)?),
            j2c_category_id: ChannelId::new(parse(
                "J2C_CATEGORY_ID",
                &required("J2C_CATEGORY_ID")?,
            )?),
            port: match std::env::var("PORT") {
                Ok(value) => parse("PORT", &value)?,
                Err(_) => DEFAULT_PORT,
            },
        })
    }

    /// Settings handed to the temporary voice channel core.
    pub fn j2c_settings(&self) -> J2cSettings {
        J2cSettings::new(self.j2c_channel_id, self.j2c_category_id)
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Parses a configuration value, rejecting zero for snowflake-sized integers.
fn parse<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed != T::default() => Ok(parsed),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
