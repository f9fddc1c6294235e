//! Menu page configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MENU_CART_PATH` - Path of the persisted cart file (default: cart.json)
//! - `MENU_ADD_COOLDOWN_MS` - Add-control re-enable delay in milliseconds
//!   (default: 400)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_CART_PATH: &str = "cart.json";
const DEFAULT_ADD_COOLDOWN_MS: u64 = 400;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Menu page configuration.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    /// File the cart is persisted to between visits.
    pub cart_path: PathBuf,
    /// How long the add-control stays disabled after a submission.
    pub add_cooldown: Duration,
}

impl MenuConfig {
    /// Load configuration from the environment, filling defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `MENU_ADD_COOLDOWN_MS` is
    /// not an unsigned integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cart_path = std::env::var("MENU_CART_PATH")
            .map_or_else(|_| PathBuf::from(DEFAULT_CART_PATH), PathBuf::from);
        let add_cooldown =
            cooldown_from(std::env::var("MENU_ADD_COOLDOWN_MS").ok().as_deref())?;

        Ok(Self {
            cart_path,
            add_cooldown,
        })
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            cart_path: PathBuf::from(DEFAULT_CART_PATH),
            add_cooldown: Duration::from_millis(DEFAULT_ADD_COOLDOWN_MS),
        }
    }
}

/// Parse the cooldown override, falling back to the default when unset.
fn cooldown_from(raw: Option<&str>) -> Result<Duration, ConfigError> {
    match raw {
        None => Ok(Duration::from_millis(DEFAULT_ADD_COOLDOWN_MS)),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("MENU_ADD_COOLDOWN_MS".to_string(), e.to_string())
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_defaults_when_unset() {
        assert_eq!(
            cooldown_from(None).unwrap(),
            Duration::from_millis(DEFAULT_ADD_COOLDOWN_MS)
        );
    }

    #[test]
    fn test_cooldown_parses_override() {
        assert_eq!(
            cooldown_from(Some("250")).unwrap(),
            Duration::from_millis(250)
        );
        assert_eq!(cooldown_from(Some(" 0 ")).unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_cooldown_rejects_garbage() {
        assert!(cooldown_from(Some("soon")).is_err());
        assert!(cooldown_from(Some("-1")).is_err());
    }
}
