//! # Release Session Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::ReleaseError;

/// Default toast lifetime.
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 2200;

/// Default roster table page size.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Release session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseSessionConfig {
    /// How long a notification stays visible before auto-clearing.
    pub notification_ttl_ms: u64,

    /// Treat Tab as a scan terminator in addition to Enter.
    /// Some scanners are configured to send Tab.
    pub tab_terminates: bool,

    /// Rows per page in the roster table.
    pub page_size: usize,
}

impl Default for ReleaseSessionConfig {
    fn default() -> Self {
        Self {
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
            tab_terminates: true,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ReleaseSessionConfig {
    /// Create a config for testing (short toasts).
    pub fn for_testing() -> Self {
        Self {
            notification_ttl_ms: 100,
            tab_terminates: true,
            page_size: 4,
        }
    }

    /// Notification lifetime as a `Duration`.
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ReleaseError> {
        if self.notification_ttl_ms == 0 {
            return Err(ReleaseError::InvalidConfig(
                "notification_ttl_ms must be greater than zero".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(ReleaseError::InvalidConfig(
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReleaseSessionConfig::default();
        assert_eq!(config.notification_ttl(), Duration::from_millis(2200));
        assert!(config.tab_terminates);
        assert_eq!(config.page_size, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_testing_config() {
        let config = ReleaseSessionConfig::for_testing();
        assert_eq!(config.notification_ttl_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = ReleaseSessionConfig {
            page_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ReleaseError::InvalidConfig(_))));

        let config = ReleaseSessionConfig {
            notification_ttl_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ReleaseSessionConfig =
            serde_json::from_str(r#"{"tab_terminates": false}"#).unwrap();
        assert!(!config.tab_terminates);
        assert_eq!(config.notification_ttl_ms, DEFAULT_NOTIFICATION_TTL_MS);
    }
}
