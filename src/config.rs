//! Runtime configuration.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. Environment variables (`CANTEEN_*`)
//!
//! | variable | example | field |
//! |---|---|---|
//! | `CANTEEN_WEEKLY_CUTOFF` | `Friday 17:00` | [`CanteenConfig::weekly_cutoff`] |
//! | `CANTEEN_DAILY_CUTOFF` | `10:00` | [`CanteenConfig::daily_cutoff`] |
//! | `CANTEEN_UTC_OFFSET` | `+02:00` | [`CanteenConfig::utc_offset`] |
//! | `CANTEEN_STORE_BUFFER` | `64` | [`CanteenConfig::store_buffer`] |

use chrono::{FixedOffset, NaiveTime, Offset, Utc, Weekday};
use std::fmt::Display;
use thiserror::Error;
use tracing::debug;

/// Errors raised while building a [`CanteenConfig`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable '{name}': {message}")]
    InvalidEnvVar { name: String, message: String },

    /// A value that can never work, wherever it came from.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// The last moment of the week at which next week's orders are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyCutoff {
    pub weekday: Weekday,
    pub time: NaiveTime,
}

impl Display for WeeklyCutoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {}", self.weekday, self.time.format("%H:%M"))
    }
}

impl WeeklyCutoff {
    /// Parses `"<weekday> HH:MM"`, e.g. `"Friday 17:00"` or `"fri 17:30"`.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut parts = raw.split_whitespace();
        let (Some(day), Some(time), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("expected '<weekday> HH:MM', got '{raw}'"));
        };
        let weekday = day
            .parse::<Weekday>()
            .map_err(|_| format!("unknown weekday '{day}'"))?;
        Ok(Self {
            weekday,
            time: parse_time(time)?,
        })
    }
}

/// Settings shared by the services and the store actors.
#[derive(Debug, Clone, PartialEq)]
pub struct CanteenConfig {
    /// Deadline for weekly orders.
    pub weekly_cutoff: WeeklyCutoff,
    /// Deadline for same-day orders.
    pub daily_cutoff: NaiveTime,
    /// Offset the cutoffs are evaluated in.
    pub utc_offset: FixedOffset,
    /// Request channel capacity of each store actor.
    pub store_buffer: usize,
}

impl Default for CanteenConfig {
    fn default() -> Self {
        Self {
            weekly_cutoff: WeeklyCutoff {
                weekday: Weekday::Fri,
                time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            },
            daily_cutoff: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
            utc_offset: Utc.fix(),
            store_buffer: 32,
        }
    }
}

/// Configuration loader with builder pattern.
///
/// ```
/// use canteen::config::ConfigLoader;
///
/// let config = ConfigLoader::new().skip_env_vars().load().unwrap();
/// assert_eq!(config.store_buffer, 32);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    base: Option<CanteenConfig>,
    skip_env: bool,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from `config` instead of the compiled defaults.
    #[must_use]
    pub fn with_base(mut self, config: CanteenConfig) -> Self {
        self.base = Some(config);
        self
    }

    /// Skips environment variable loading.
    ///
    /// Useful for testing with deterministic config.
    #[must_use]
    pub fn skip_env_vars(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an override cannot be parsed or the result
    /// is unusable.
    pub fn load(&self) -> Result<CanteenConfig, ConfigError> {
        let mut config = self.base.clone().unwrap_or_default();

        if !self.skip_env {
            apply_env_vars(&mut config)?;
        }

        if config.store_buffer == 0 {
            return Err(ConfigError::Invalid(
                "store buffer must be at least 1".into(),
            ));
        }

        debug!(
            weekly_cutoff = %config.weekly_cutoff,
            daily_cutoff = %config.daily_cutoff,
            utc_offset = %config.utc_offset,
            store_buffer = config.store_buffer,
            "Loaded config"
        );
        Ok(config)
    }
}

fn apply_env_vars(config: &mut CanteenConfig) -> Result<(), ConfigError> {
    if let Ok(val) = std::env::var("CANTEEN_WEEKLY_CUTOFF") {
        config.weekly_cutoff = WeeklyCutoff::parse(&val)
            .map_err(|e| ConfigError::invalid_env_var("CANTEEN_WEEKLY_CUTOFF", e))?;
    }
    if let Ok(val) = std::env::var("CANTEEN_DAILY_CUTOFF") {
        config.daily_cutoff =
            parse_time(&val).map_err(|e| ConfigError::invalid_env_var("CANTEEN_DAILY_CUTOFF", e))?;
    }
    if let Ok(val) = std::env::var("CANTEEN_UTC_OFFSET") {
        config.utc_offset = parse_utc_offset(&val)
            .map_err(|e| ConfigError::invalid_env_var("CANTEEN_UTC_OFFSET", e))?;
    }
    if let Ok(val) = std::env::var("CANTEEN_STORE_BUFFER") {
        config.store_buffer = val.trim().parse().map_err(|_| {
            ConfigError::invalid_env_var("CANTEEN_STORE_BUFFER", "expected a positive integer")
        })?;
    }
    Ok(())
}

/// Parses `HH:MM` or `HH:MM:SS`.
fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| format!("expected HH:MM, got '{raw}'"))
}

/// Parses `Z`, `UTC` or `±HH:MM`.
fn parse_utc_offset(raw: &str) -> Result<FixedOffset, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }
    let invalid = || format!("expected ±HH:MM, got '{raw}'");

    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'+') => (1, &raw[1..]),
        Some(b'-') => (-1, &raw[1..]),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_defaults_only() {
        let config = ConfigLoader::new().skip_env_vars().load().unwrap();
        assert_eq!(config, CanteenConfig::default());
        assert_eq!(config.weekly_cutoff.to_string(), "Fri 17:00");
        assert_eq!(config.daily_cutoff, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn zero_store_buffer_is_rejected() {
        let base = CanteenConfig {
            store_buffer: 0,
            ..CanteenConfig::default()
        };
        let err = ConfigLoader::new()
            .with_base(base)
            .skip_env_vars()
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn weekly_cutoff_parses_names_and_abbreviations() {
        let cutoff = WeeklyCutoff::parse("Thursday 16:30").unwrap();
        assert_eq!(cutoff.weekday, Weekday::Thu);
        assert_eq!(cutoff.time, NaiveTime::from_hms_opt(16, 30, 0).unwrap());

        assert_eq!(WeeklyCutoff::parse("fri 17:00").unwrap().weekday, Weekday::Fri);
        assert!(WeeklyCutoff::parse("Friday").is_err());
        assert!(WeeklyCutoff::parse("Someday 10:00").is_err());
        assert!(WeeklyCutoff::parse("Friday 25:00").is_err());
    }

    #[test]
    fn utc_offsets() {
        assert_eq!(parse_utc_offset("+02:00").unwrap().local_minus_utc(), 7200);
        assert_eq!(parse_utc_offset("-05:30").unwrap().local_minus_utc(), -19800);
        assert_eq!(parse_utc_offset("UTC").unwrap().local_minus_utc(), 0);
        assert!(parse_utc_offset("02:00").is_err());
        assert!(parse_utc_offset("+02:75").is_err());
    }
}
