use serenity::model::id::{ChannelId, GuildId};
use std::env;
use thiserror::Error;

/// Configuration errors raised before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Bot token cannot be empty")]
    MissingToken,
    #[error("{name} must be a non-zero Discord snowflake, got {value:?}")]
    InvalidId { name: &'static str, value: String },
}

/// Bot parameters, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    /// Restricts command registration to one guild; `None` registers globally.
    pub guild_id: Option<GuildId>,
    /// Channel for the startup announcement; `None` sends nothing.
    pub channel_id: Option<ChannelId>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_parts(
            env::var("DC_TOKEN").ok(),
            env::var("DC_GUILD_ID").ok(),
            env::var("DC_CHANNEL_ID").ok(),
        )
    }

    /// An empty string counts as unset, matching plain `getenv` semantics.
    pub fn from_parts(
        token: Option<String>,
        guild_id: Option<String>,
        channel_id: Option<String>,
    ) -> Result<Self, ConfigError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        let guild_id = parse_id("DC_GUILD_ID", guild_id)?.map(GuildId::new);
        let channel_id = parse_id("DC_CHANNEL_ID", channel_id)?.map(ChannelId::new);

        Ok(Self {
            token,
            guild_id,
            channel_id,
        })
    }
}

fn parse_id(name: &'static str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    match value.parse::<u64>() {
        Ok(id) if id != 0 => Ok(Some(id)),
        _ => Err(ConfigError::InvalidId { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_rejected() {
        assert!(matches!(
            Config::from_parts(None, None, None),
            Err(ConfigError::MissingToken)
        ));
        assert!(matches!(
            Config::from_parts(Some(String::new()), None, None),
            Err(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn test_token_only() {
        let config = Config::from_parts(Some("abc123".to_string()), None, None).unwrap();
        assert_eq!(config.token, "abc123");
        assert_eq!(config.guild_id, None);
        assert_eq!(config.channel_id, None);
    }

    #[test]
    fn test_empty_ids_mean_unset() {
        let config = Config::from_parts(
            Some("abc123".to_string()),
            Some(String::new()),
            Some(String::new()),
        )
        .unwrap();
        assert_eq!(config.guild_id, None);
        assert_eq!(config.channel_id, None);
    }

    #[test]
    fn test_ids_parsed() {
        let config = Config::from_parts(
            Some("abc123".to_string()),
            Some("123456789012345678".to_string()),
            Some("876543210987654321".to_string()),
        )
        .unwrap();
        assert_eq!(config.guild_id, Some(GuildId::new(123456789012345678)));
        assert_eq!(config.channel_id, Some(ChannelId::new(876543210987654321)));
    }

    #[test]
    fn test_malformed_ids_rejected() {
        let err = Config::from_parts(
            Some("abc123".to_string()),
            Some("not-a-snowflake".to_string()),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidId {
                name: "DC_GUILD_ID",
                ..
            }
        ));

        let err = Config::from_parts(
            Some("abc123".to_string()),
            None,
            Some("0".to_string()),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidId {
                name: "DC_CHANNEL_ID",
                ..
            }
        ));
    }
}
