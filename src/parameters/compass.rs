//! Compass Parameter Definitions
//!
//! # Parameters
//!
//! - `COMPASS_ENABLE` - Use the compass at all
//! - `COMPASS_SETTLE` - Settle time in microseconds between arming a proxied
//!   read and fetching its data
//! - `COMPASS_STRICT` - Fail initialization on the first transport error
//!   instead of completing every step

use super::storage::{ParamFlags, ParamValue, ParameterError, ParameterStore};
use crate::devices::compass::ak8963::Ak8963Config;

/// Lower bound accepted for `COMPASS_SETTLE`
pub const MIN_SETTLE_US: i32 = 1_000;

/// Upper bound accepted for `COMPASS_SETTLE`
pub const MAX_SETTLE_US: i32 = 50_000;

/// Compass configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompassParams {
    /// Compass enabled
    pub enabled: bool,
    /// Proxied read settle time in microseconds
    pub settle_us: u32,
    /// Propagate transport failures from initialization
    pub strict_init: bool,
}

impl Default for CompassParams {
    fn default() -> Self {
        let config = Ak8963Config::default();
        Self {
            enabled: true,
            settle_us: config.settle_delay_us,
            strict_init: config.strict_init,
        }
    }
}

impl CompassParams {
    /// Register compass parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let defaults = Self::default();
        store.register(
            "COMPASS_ENABLE",
            ParamValue::Bool(defaults.enabled),
            ParamFlags::empty(),
        )?;
        store.register(
            "COMPASS_SETTLE",
            ParamValue::Int(defaults.settle_us as i32),
            ParamFlags::empty(),
        )?;
        store.register(
            "COMPASS_STRICT",
            ParamValue::Bool(defaults.strict_init),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load compass configuration from parameter store
    ///
    /// Missing, mistyped or out-of-range values fall back to defaults.
    pub fn from_store(store: &ParameterStore) -> Self {
        let defaults = Self::default();
        Self {
            enabled: match store.get("COMPASS_ENABLE") {
                Some(ParamValue::Bool(v)) => *v,
                _ => defaults.enabled,
            },
            settle_us: match store.get("COMPASS_SETTLE") {
                Some(ParamValue::Int(v)) if (MIN_SETTLE_US..=MAX_SETTLE_US).contains(v) => {
                    *v as u32
                }
                Some(ParamValue::Int(v)) => {
                    crate::log_warn!("COMPASS_SETTLE {} out of range, using default", *v);
                    defaults.settle_us
                }
                _ => defaults.settle_us,
            },
            strict_init: match store.get("COMPASS_STRICT") {
                Some(ParamValue::Bool(v)) => *v,
                _ => defaults.strict_init,
            },
        }
    }

    /// Build a driver configuration from these parameters
    ///
    /// Returns `None` when the compass is disabled, in which case the caller
    /// must not try to detect it.
    pub fn to_config(&self) -> Option<Ak8963Config> {
        if !self.enabled {
            crate::log_info!("Compass disabled by COMPASS_ENABLE");
            return None;
        }
        Some(Ak8963Config {
            settle_delay_us: self.settle_us,
            strict_init: self.strict_init,
            ..Ak8963Config::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compass_defaults() {
        let params = CompassParams::default();
        assert!(params.enabled);
        assert_eq!(params.settle_us, 8_000);
        assert!(!params.strict_init);
    }

    #[test]
    fn test_register_defaults() {
        let mut store = ParameterStore::default();
        CompassParams::register_defaults(&mut store).unwrap();

        assert_eq!(store.get("COMPASS_ENABLE"), Some(&ParamValue::Bool(true)));
        assert_eq!(store.get("COMPASS_SETTLE"), Some(&ParamValue::Int(8_000)));
        assert_eq!(store.get("COMPASS_STRICT"), Some(&ParamValue::Bool(false)));
    }

    #[test]
    fn test_from_store() {
        let mut store = ParameterStore::default();
        CompassParams::register_defaults(&mut store).unwrap();

        store.set("COMPASS_ENABLE", ParamValue::Bool(false)).unwrap();
        store.set("COMPASS_SETTLE", ParamValue::Int(10_000)).unwrap();
        store.set("COMPASS_STRICT", ParamValue::Bool(true)).unwrap();

        let params = CompassParams::from_store(&store);
        assert!(!params.enabled);
        assert_eq!(params.settle_us, 10_000);
        assert!(params.strict_init);
    }

    #[test]
    fn test_out_of_range_settle_uses_default() {
        let mut store = ParameterStore::default();
        CompassParams::register_defaults(&mut store).unwrap();
        store.set("COMPASS_SETTLE", ParamValue::Int(-5)).unwrap();

        assert_eq!(CompassParams::from_store(&store).settle_us, 8_000);
    }

    #[test]
    fn test_mistyped_value_uses_default() {
        let mut store = ParameterStore::default();
        CompassParams::register_defaults(&mut store).unwrap();
        store.set("COMPASS_SETTLE", ParamValue::Bool(true)).unwrap();

        assert_eq!(CompassParams::from_store(&store).settle_us, 8_000);
    }

    #[test]
    fn test_to_config() {
        let params = CompassParams {
            enabled: true,
            settle_us: 12_000,
            strict_init: true,
        };
        let config = params.to_config().unwrap();
        assert_eq!(config.settle_delay_us, 12_000);
        assert!(config.strict_init);
        assert_eq!(config.reset_delay_ms, Ak8963Config::default().reset_delay_ms);
    }

    #[test]
    fn test_disabled_compass_has_no_config() {
        let mut store = ParameterStore::default();
        CompassParams::register_defaults(&mut store).unwrap();
        store.set("COMPASS_ENABLE", ParamValue::Bool(false)).unwrap();

        assert_eq!(CompassParams::from_store(&store).to_config(), None);
    }
}
