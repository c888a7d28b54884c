//! Shake-to-refresh detection.
//!
//! The list pages refresh the catalog when the visitor shakes the device.
//! Detection is the same explicit-state, pull-evaluation shape as the
//! proximity engine: the host feeds accelerometer samples in, the detector
//! answers whether this one counts as a shake. Consecutive fires are
//! debounced so one physical shake does not refresh several times.

use serde::{Deserialize, Serialize};

/// One accelerometer reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccelSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Capture time, epoch milliseconds.
    pub at_ms: i64,
}

impl AccelSample {
    /// Total acceleration magnitude across all three axes.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Shake detection tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShakeConfig {
    /// Acceleration magnitude above which a sample counts as a shake.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Minimum time between reported shakes.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: i64,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_threshold() -> f64 {
    15.0
}

fn default_debounce_ms() -> i64 {
    1_000
}

/// Debounced shake detector over a stream of accelerometer samples.
#[derive(Debug)]
pub struct ShakeDetector {
    config: ShakeConfig,
    last_shake_at_ms: Option<i64>,
}

impl ShakeDetector {
    pub fn new(config: ShakeConfig) -> Self {
        Self {
            config,
            last_shake_at_ms: None,
        }
    }

    /// Feed one sample; true when it should be reported as a shake.
    pub fn observe(&mut self, sample: &AccelSample) -> bool {
        if let Some(last) = self.last_shake_at_ms {
            if sample.at_ms - last < self.config.debounce_ms {
                return false;
            }
        }

        if sample.magnitude() > self.config.threshold {
            self.last_shake_at_ms = Some(sample.at_ms);
            tracing::debug!(at_ms = sample.at_ms, "shake detected");
            return true;
        }

        false
    }

    /// Forget the debounce window, e.g. when the page loses focus.
    pub fn reset(&mut self) {
        self.last_shake_at_ms = None;
    }
}

impl Default for ShakeDetector {
    fn default() -> Self {
        Self::new(ShakeConfig::default())
    }
}
