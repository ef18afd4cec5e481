//! Session configuration.
//!
//! Defaults match the live site; every field can be overridden from the
//! environment:
//!
//! | variable | meaning |
//! |---|---|
//! | `TRAILHEAD_HAPPY_HOUR_START` | first discounted hour (default 9) |
//! | `TRAILHEAD_HAPPY_HOUR_END` | first hour after the discount (default 12) |
//! | `TRAILHEAD_PHONE` | business phone, international format |
//! | `TRAILHEAD_ROTATE_SECS` | auto-toggle tours/rentals every N seconds (off when unset or 0) |
//! | `TRAILHEAD_WATCH_SECS` | re-check the happy-hour window every N seconds (default 60, 0 disables) |

use std::time::Duration;

use thiserror::Error;

use trailhead_catalog::{ContactChannels, HappyHour};

use crate::mode::DisplayMode;

pub const ENV_HAPPY_HOUR_START: &str = "TRAILHEAD_HAPPY_HOUR_START";
pub const ENV_HAPPY_HOUR_END: &str = "TRAILHEAD_HAPPY_HOUR_END";
pub const ENV_PHONE: &str = "TRAILHEAD_PHONE";
pub const ENV_ROTATE_SECS: &str = "TRAILHEAD_ROTATE_SECS";
pub const ENV_WATCH_SECS: &str = "TRAILHEAD_WATCH_SECS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: expected {expected}, got {value:?}")]
    Malformed {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Storefront session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Daily discount window.
    pub happy_hour: HappyHour,
    /// Phone number used for chat and dialer links.
    pub contact: ContactChannels,
    /// Mode shown when the session starts.
    pub initial_mode: DisplayMode,
    /// Auto-toggle the display mode this often (off when `None`).
    pub rotate_every: Option<Duration>,
    /// Re-check the happy-hour window this often (off when `None`).
    pub watch_every: Option<Duration>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            happy_hour: HappyHour::DEFAULT,
            contact: ContactChannels::default(),
            initial_mode: DisplayMode::Tour,
            rotate_every: None,
            watch_every: Some(Duration::from_secs(60)),
        }
    }
}

impl StorefrontConfig {
    pub fn with_happy_hour(mut self, happy_hour: HappyHour) -> Self {
        self.happy_hour = happy_hour;
        self
    }

    pub fn with_contact(mut self, contact: ContactChannels) -> Self {
        self.contact = contact;
        self
    }

    pub fn with_initial_mode(mut self, mode: DisplayMode) -> Self {
        self.initial_mode = mode;
        self
    }

    pub fn with_rotation(mut self, every: Duration) -> Self {
        self.rotate_every = Some(every);
        self
    }

    pub fn with_watch(mut self, every: Option<Duration>) -> Self {
        self.watch_every = every;
        self
    }

    /// Defaults overridden by `TRAILHEAD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let start = parse_u32(&lookup, ENV_HAPPY_HOUR_START)?;
        let end = parse_u32(&lookup, ENV_HAPPY_HOUR_END)?;
        if start.is_some() || end.is_some() {
            let start = start.unwrap_or(config.happy_hour.start_hour());
            let end = end.unwrap_or(config.happy_hour.end_hour());
            config.happy_hour = HappyHour::new(start, end)
                .map_err(|e| ConfigError::invalid(ENV_HAPPY_HOUR_START, e.to_string()))?;
        }

        if let Some(phone) = lookup(ENV_PHONE) {
            config.contact = ContactChannels::new(&phone)
                .map_err(|e| ConfigError::invalid(ENV_PHONE, e.to_string()))?;
        }

        if let Some(secs) = parse_u64(&lookup, ENV_ROTATE_SECS)? {
            config.rotate_every = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(secs) = parse_u64(&lookup, ENV_WATCH_SECS)? {
            config.watch_every = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_u32<F>(lookup: &F, key: &'static str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value.trim().parse::<u32>().map_err(|_| ConfigError::Malformed {
                key,
                value,
                expected: "an hour of the day",
            })
        })
        .transpose()
}

fn parse_u64<F>(lookup: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value.trim().parse::<u64>().map_err(|_| ConfigError::Malformed {
                key,
                value,
                expected: "a number of seconds",
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.happy_hour, HappyHour::DEFAULT);
        assert_eq!(config.rotate_every, None);
        assert_eq!(config.watch_every, Some(Duration::from_secs(60)));
    }

    #[test]
    fn overrides_are_applied() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            (ENV_HAPPY_HOUR_START, "16"),
            (ENV_HAPPY_HOUR_END, "18"),
            (ENV_PHONE, "+44 20 7946 0000"),
            (ENV_ROTATE_SECS, "8"),
            (ENV_WATCH_SECS, "0"),
        ]))
        .unwrap();

        assert_eq!(config.happy_hour, HappyHour::new(16, 18).unwrap());
        assert_eq!(config.contact.phone(), "442079460000");
        assert_eq!(config.rotate_every, Some(Duration::from_secs(8)));
        assert_eq!(config.watch_every, None);
    }

    #[test]
    fn partial_window_override_keeps_other_bound() {
        let config = StorefrontConfig::from_lookup(lookup(&[(ENV_HAPPY_HOUR_END, "11")])).unwrap();
        assert_eq!(config.happy_hour, HappyHour::new(9, 11).unwrap());
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = StorefrontConfig::from_lookup(lookup(&[(ENV_ROTATE_SECS, "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Malformed {
                key: ENV_ROTATE_SECS,
                value: "soon".to_string(),
                expected: "a number of seconds",
            }
        );

        let err = StorefrontConfig::from_lookup(lookup(&[(ENV_HAPPY_HOUR_START, "13")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_HAPPY_HOUR_START, .. }));

        let err = StorefrontConfig::from_lookup(lookup(&[(ENV_PHONE, "call us")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_PHONE, .. }));
    }

    #[test]
    fn builder_methods() {
        let config = StorefrontConfig::default()
            .with_initial_mode(DisplayMode::Rent)
            .with_rotation(Duration::from_secs(5))
            .with_watch(None);
        assert_eq!(config.initial_mode, DisplayMode::Rent);
        assert_eq!(config.rotate_every, Some(Duration::from_secs(5)));
        assert_eq!(config.watch_every, None);
    }
}
