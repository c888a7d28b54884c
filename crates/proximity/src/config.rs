//! Engine configuration.

use crate::{ProximityError, Result};
use serde::{Deserialize, Serialize};

/// Tunables for the proximity engine.
///
/// All fields have serde defaults so a host config file can set only what it
/// cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Attractions within this distance appear in the ranked nearby list.
    #[serde(default = "default_nearby_radius_km")]
    pub nearby_radius_km: f64,

    /// Attractions within this distance are eligible for a crossing event.
    /// Must not exceed `nearby_radius_km`.
    #[serde(default = "default_notify_radius_km")]
    pub notify_radius_km: f64,

    /// Minimum time between crossings for the same attraction, measured in
    /// sample time.
    #[serde(default = "default_notify_cooldown_ms")]
    pub notify_cooldown_ms: i64,

    /// Reject samples whose reported accuracy is worse than this bound.
    /// `None` accepts every fix, which matches the shipped app behavior.
    #[serde(default)]
    pub max_accuracy_m: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            nearby_radius_km: default_nearby_radius_km(),
            notify_radius_km: default_notify_radius_km(),
            notify_cooldown_ms: default_notify_cooldown_ms(),
            max_accuracy_m: None,
        }
    }
}

fn default_nearby_radius_km() -> f64 {
    5.0
}

fn default_notify_radius_km() -> f64 {
    0.5
}

fn default_notify_cooldown_ms() -> i64 {
    60_000
}

impl EngineConfig {
    /// Validate radii and cooldown relationships.
    pub fn validate(&self) -> Result<()> {
        if !self.nearby_radius_km.is_finite() || self.nearby_radius_km <= 0.0 {
            return Err(ProximityError::InvalidConfig(format!(
                "nearby_radius_km must be positive, got {}",
                self.nearby_radius_km
            )));
        }
        if !self.notify_radius_km.is_finite() || self.notify_radius_km <= 0.0 {
            return Err(ProximityError::InvalidConfig(format!(
                "notify_radius_km must be positive, got {}",
                self.notify_radius_km
            )));
        }
        if self.notify_radius_km > self.nearby_radius_km {
            return Err(ProximityError::InvalidConfig(format!(
                "notify_radius_km ({}) exceeds nearby_radius_km ({})",
                self.notify_radius_km, self.nearby_radius_km
            )));
        }
        if self.notify_cooldown_ms <= 0 {
            return Err(ProximityError::InvalidConfig(format!(
                "notify_cooldown_ms must be positive, got {}",
                self.notify_cooldown_ms
            )));
        }
        if let Some(bound) = self.max_accuracy_m {
            if !bound.is_finite() || bound <= 0.0 {
                return Err(ProximityError::InvalidConfig(format!(
                    "max_accuracy_m must be positive, got {}",
                    bound
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.nearby_radius_km, 5.0);
        assert_eq!(config.notify_radius_km, 0.5);
        assert_eq!(config.notify_cooldown_ms, 60_000);
        assert!(config.max_accuracy_m.is_none());
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"nearby_radius_km": 2.5}"#).unwrap();
        assert_eq!(config.nearby_radius_km, 2.5);
        assert_eq!(config.notify_radius_km, 0.5);
        assert_eq!(config.notify_cooldown_ms, 60_000);
    }

    #[test]
    fn test_notify_radius_must_fit_inside_nearby() {
        let config = EngineConfig {
            nearby_radius_km: 1.0,
            notify_radius_km: 2.0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_values_rejected() {
        let config = EngineConfig {
            nearby_radius_km: 0.0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            notify_cooldown_ms: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            max_accuracy_m: Some(-5.0),
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
