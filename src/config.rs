//! # Storefront Configuration
//!
//! Every setting has a default, so `StorefrontConfig::default()` is a working configuration.
//! [`StorefrontConfig::from_env`] overlays environment variables on top of the defaults:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BREW_POLL_INTERVAL_MS` | 2500 | delay between status polls |
//! | `BREW_FAST_POLL_INTERVAL_MS` | 1000 | delay while waiting for an order to be secured |
//! | `BREW_RETRY_ATTEMPTS` | 3 | retries after a failed catalog or order read |
//! | `BREW_RETRY_DELAY_MS` | 0 | pause before each retry |
//! | `BREW_NOTICE_DURATION_MS` | 8000 | how long itemized reorder issues stay on screen |
//! | `BREW_ACTOR_BUFFER` | 32 | request queue length per repository |
//! | `BREW_POLL_CAPACITY` | 16 | values buffered per poll subscriber |
//! | `BREW_MIN_LEAD_TIME_MIN` | 30 | earliest delivery, in minutes from submission |
//!
//! Fee settings are read from the same source under `BREW_DELIVERY_FEE_RATE`,
//! `BREW_DELIVERY_FEE_MIN`, `BREW_COMMISSION_RATE` and `BREW_COMMISSION_MIN`.

use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}

/// How much shops and deliverers are paid for an order.
///
/// Each fee is a share of the order total, never below its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    pub delivery_fee_rate: f64,
    pub delivery_fee_minimum: f64,
    pub commission_rate: f64,
    pub commission_minimum: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            delivery_fee_rate: 0.15,
            delivery_fee_minimum: 3.0,
            commission_rate: 0.10,
            commission_minimum: 1.0,
        }
    }
}

impl FeeSchedule {
    pub fn delivery_fee(&self, order_total: f64) -> f64 {
        round_cents((order_total * self.delivery_fee_rate).max(self.delivery_fee_minimum))
    }

    pub fn commission(&self, order_total: f64) -> f64 {
        round_cents((order_total * self.commission_rate).max(self.commission_minimum))
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Runtime settings for the storefront.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub poll_interval_ms: u64,
    pub fast_poll_interval_ms: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub notice_duration_ms: u64,
    pub actor_buffer: usize,
    pub poll_capacity: usize,
    pub min_lead_time_minutes: i64,
    pub fees: FeeSchedule,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2500,
            fast_poll_interval_ms: 1000,
            retry_attempts: 3,
            retry_delay_ms: 0,
            notice_duration_ms: 8000,
            actor_buffer: 32,
            poll_capacity: 16,
            min_lead_time_minutes: 30,
            fees: FeeSchedule::default(),
        }
    }
}

impl StorefrontConfig {
    /// Defaults overlaid with any `BREW_*` variables set in the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let fees = &mut config.fees;

        overlay(&lookup, "BREW_POLL_INTERVAL_MS", &mut config.poll_interval_ms)?;
        overlay(
            &lookup,
            "BREW_FAST_POLL_INTERVAL_MS",
            &mut config.fast_poll_interval_ms,
        )?;
        overlay(&lookup, "BREW_RETRY_ATTEMPTS", &mut config.retry_attempts)?;
        overlay(&lookup, "BREW_RETRY_DELAY_MS", &mut config.retry_delay_ms)?;
        overlay(
            &lookup,
            "BREW_NOTICE_DURATION_MS",
            &mut config.notice_duration_ms,
        )?;
        overlay(&lookup, "BREW_ACTOR_BUFFER", &mut config.actor_buffer)?;
        overlay(&lookup, "BREW_POLL_CAPACITY", &mut config.poll_capacity)?;
        overlay(
            &lookup,
            "BREW_MIN_LEAD_TIME_MIN",
            &mut config.min_lead_time_minutes,
        )?;
        overlay(&lookup, "BREW_DELIVERY_FEE_RATE", &mut fees.delivery_fee_rate)?;
        overlay(&lookup, "BREW_DELIVERY_FEE_MIN", &mut fees.delivery_fee_minimum)?;
        overlay(&lookup, "BREW_COMMISSION_RATE", &mut fees.commission_rate)?;
        overlay(&lookup, "BREW_COMMISSION_MIN", &mut fees.commission_minimum)?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would stall the system (zero-length queues, busy polling).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Zero {
                key: "BREW_POLL_INTERVAL_MS",
            });
        }
        if self.fast_poll_interval_ms == 0 {
            return Err(ConfigError::Zero {
                key: "BREW_FAST_POLL_INTERVAL_MS",
            });
        }
        if self.actor_buffer == 0 {
            return Err(ConfigError::Zero {
                key: "BREW_ACTOR_BUFFER",
            });
        }
        if self.poll_capacity == 0 {
            return Err(ConfigError::Zero {
                key: "BREW_POLL_CAPACITY",
            });
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn fast_poll_interval(&self) -> Duration {
        Duration::from_millis(self.fast_poll_interval_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }

    pub fn min_lead_time(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.min_lead_time_minutes)
    }
}

fn overlay<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    slot: &mut T,
) -> Result<(), ConfigError> {
    if let Some(raw) = lookup(key) {
        *slot = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_storefront_timings() {
        let config = StorefrontConfig::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(2500));
        assert_eq!(config.fast_poll_interval(), Duration::from_millis(1000));
        assert_eq!(config.notice_duration(), Duration::from_millis(8000));
        assert_eq!(config.retry_attempts, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("BREW_POLL_INTERVAL_MS", "500"),
            ("BREW_RETRY_ATTEMPTS", " 5 "),
            ("BREW_COMMISSION_RATE", "0.2"),
        ]))
        .unwrap();

        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.retry_attempts, 5);
        assert_eq!(config.fees.commission_rate, 0.2);
        assert_eq!(config.fast_poll_interval_ms, 1000);
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[("BREW_ACTOR_BUFFER", "lots")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "BREW_ACTOR_BUFFER",
                value: "lots".into()
            }
        );

        let err = StorefrontConfig::from_lookup(lookup_from(&[("BREW_POLL_INTERVAL_MS", "0")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Zero {
                key: "BREW_POLL_INTERVAL_MS"
            }
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: StorefrontConfig =
            serde_json::from_str(r#"{"poll_interval_ms": 1200, "fees": {"commission_minimum": 2.0}}"#)
                .unwrap();
        assert_eq!(config.poll_interval_ms, 1200);
        assert_eq!(config.fees.commission_minimum, 2.0);
        assert_eq!(config.fees.delivery_fee_minimum, 3.0);
        assert_eq!(config.actor_buffer, 32);
    }

    #[test]
    fn fees_apply_minimums() {
        let fees = FeeSchedule::default();
        assert_eq!(fees.delivery_fee(10.0), 3.0);
        assert_eq!(fees.delivery_fee(40.0), 6.0);
        assert_eq!(fees.commission(5.0), 1.0);
        assert_eq!(fees.commission(25.0), 2.5);
    }
}
