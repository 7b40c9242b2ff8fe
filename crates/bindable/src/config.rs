#![forbid(unsafe_code)]

//! Ambient configuration for observer lists.
//!
//! Nothing here changes *what* gets notified. The knobs only control
//! diagnostics emitted through `tracing`.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BINDABLE_LOG_NOTIFICATIONS` | off | trace span + event per fan-out |
//! | `BINDABLE_OBSERVER_WARN_THRESHOLD` | 64 | warn when a list grows past this (0 = never) |
//!
//! The process-wide value is read once and cached; tests should build a
//! config with [`NotifyConfig::try_from_env_with`] instead of touching the
//! real environment.

use std::sync::OnceLock;

use crate::error::ConfigError;

/// Environment variable toggling per-notification trace output.
pub const ENV_LOG_NOTIFICATIONS: &str = "BINDABLE_LOG_NOTIFICATIONS";
/// Environment variable overriding [`NotifyConfig::observer_warn_threshold`].
pub const ENV_OBSERVER_WARN_THRESHOLD: &str = "BINDABLE_OBSERVER_WARN_THRESHOLD";

const DEFAULT_OBSERVER_WARN_THRESHOLD: usize = 64;

/// Diagnostics settings for a [`PropertyChanged`](crate::PropertyChanged) list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifyConfig {
    /// Emit a `trace` span and event around every fan-out.
    pub log_notifications: bool,
    /// Warn once a subscribe pushes the observer count past this value.
    /// Zero disables the check.
    pub observer_warn_threshold: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            log_notifications: false,
            observer_warn_threshold: DEFAULT_OBSERVER_WARN_THRESHOLD,
        }
    }
}

impl NotifyConfig {
    /// Default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle per-notification tracing.
    #[must_use]
    pub fn with_log_notifications(mut self, enabled: bool) -> Self {
        self.log_notifications = enabled;
        self
    }

    /// Set the observer-count warning threshold (0 disables).
    #[must_use]
    pub fn with_observer_warn_threshold(mut self, threshold: usize) -> Self {
        self.observer_warn_threshold = threshold;
        self
    }

    /// Build a config from a custom environment lookup.
    ///
    /// Unset variables keep their defaults.
    pub fn try_from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = get_env(ENV_LOG_NOTIFICATIONS) {
            config.log_notifications = parse_flag(ENV_LOG_NOTIFICATIONS, &value)?;
        }
        if let Some(value) = get_env(ENV_OBSERVER_WARN_THRESHOLD) {
            let threshold = value
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: ENV_OBSERVER_WARN_THRESHOLD,
                    value: value.clone(),
                })?;
            config.observer_warn_threshold = threshold;
        }
        Ok(config)
    }

    /// Like [`try_from_env_with`](Self::try_from_env_with), but falls back
    /// to defaults (with a warning) if any variable is malformed.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::try_from_env_with(get_env).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring malformed notification config");
            Self::default()
        })
    }

    /// Read the process environment, falling back to defaults on bad values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Cached process-wide config, read from the environment on first use.
    #[must_use]
    pub fn global() -> Self {
        static GLOBAL: OnceLock<NotifyConfig> = OnceLock::new();
        *GLOBAL.get_or_init(Self::from_env)
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_env_gives_defaults() {
        let config = NotifyConfig::try_from_env_with(|_| None).unwrap();
        assert_eq!(config, NotifyConfig::default());
        assert!(!config.log_notifications);
        assert_eq!(config.observer_warn_threshold, 64);
    }

    #[test]
    fn flag_words() {
        for on in ["1", "true", "YES", " on "] {
            let config =
                NotifyConfig::try_from_env_with(lookup(&[(ENV_LOG_NOTIFICATIONS, on)])).unwrap();
            assert!(config.log_notifications, "{on:?} should enable");
        }
        for off in ["0", "False", "no", "off", ""] {
            let config =
                NotifyConfig::try_from_env_with(lookup(&[(ENV_LOG_NOTIFICATIONS, off)])).unwrap();
            assert!(!config.log_notifications, "{off:?} should disable");
        }
    }

    #[test]
    fn bad_flag_is_rejected() {
        let err = NotifyConfig::try_from_env_with(lookup(&[(ENV_LOG_NOTIFICATIONS, "sometimes")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidFlag {
                var: ENV_LOG_NOTIFICATIONS,
                value: "sometimes".into()
            }
        );
    }

    #[test]
    fn threshold_parses() {
        let config =
            NotifyConfig::try_from_env_with(lookup(&[(ENV_OBSERVER_WARN_THRESHOLD, " 8 ")]))
                .unwrap();
        assert_eq!(config.observer_warn_threshold, 8);
    }

    #[test]
    fn bad_threshold_is_rejected() {
        let err = NotifyConfig::try_from_env_with(lookup(&[(ENV_OBSERVER_WARN_THRESHOLD, "-1")]))
            .unwrap_err();
        assert_eq!(err.var(), ENV_OBSERVER_WARN_THRESHOLD);
    }

    #[test]
    fn builder_overrides() {
        let config = NotifyConfig::new()
            .with_log_notifications(true)
            .with_observer_warn_threshold(0);
        assert!(config.log_notifications);
        assert_eq!(config.observer_warn_threshold, 0);
    }

    #[test]
    fn fallback_keeps_valid_input() {
        let config = NotifyConfig::from_env_with(lookup(&[
            (ENV_LOG_NOTIFICATIONS, "on"),
            (ENV_OBSERVER_WARN_THRESHOLD, "5"),
        ]));
        assert!(config.log_notifications);
        assert_eq!(config.observer_warn_threshold, 5);
    }

    #[test]
    fn fallback_on_malformed_input_gives_defaults() {
        // One bad variable discards the whole environment, good ones included.
        let config = NotifyConfig::from_env_with(lookup(&[
            (ENV_LOG_NOTIFICATIONS, "on"),
            (ENV_OBSERVER_WARN_THRESHOLD, "many"),
        ]));
        assert_eq!(config, NotifyConfig::default());

        let config = NotifyConfig::from_env_with(lookup(&[(ENV_LOG_NOTIFICATIONS, "perhaps")]));
        assert_eq!(config, NotifyConfig::default());
    }

    #[test]
    fn global_is_stable() {
        assert_eq!(NotifyConfig::global(), NotifyConfig::global());
    }
}
