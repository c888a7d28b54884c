//! Nearby-attraction proximity engine for WanderWombat.
//!
//! The engine consumes location samples and a catalog snapshot and derives
//! two outputs per evaluation:
//! - a ranked list of attractions within the nearby radius, and
//! - the set of attractions that just crossed into the notification radius,
//!   edge-triggered and cooldown-gated so a visitor loitering next to an
//!   attraction is not re-notified every GPS tick.
//!
//! The engine is pure computation: no I/O, no clocks, no subscriptions.
//! Hosts pump samples into [`ProximityEngine::evaluate`] (or wire a
//! [`ProximityWatcher`] over the capability traits) and forward crossings to
//! their notification surface.
//!
//! # Example
//!
//! ```
//! use wombat_proximity::{EngineConfig, LocationSample, ProximityEngine};
//! use wombat_catalog::parse_attractions;
//! use wombat_geo::Coordinate;
//! use serde_json::json;
//!
//! let catalog = parse_attractions(&json!([{
//!     "id": "cp", "name": "Central Park", "category": "natural",
//!     "location": {"latitude": 40.7829, "longitude": -73.9654}
//! }])).unwrap();
//!
//! let mut engine = ProximityEngine::new(EngineConfig::default()).unwrap();
//! let sample = LocationSample {
//!     coordinate: Coordinate::new(40.7825, -73.9650),
//!     accuracy_m: 10.0,
//!     captured_at_ms: 0,
//! };
//!
//! let evaluation = engine.evaluate(&sample, &catalog);
//! assert_eq!(evaluation.ranked[0].attraction.id, "cp");
//! assert_eq!(evaluation.crossings, vec!["cp".to_string()]);
//! ```

mod config;
mod engine;
mod error;
mod shake;
mod snapshot;
mod watch;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::EngineConfig;
pub use engine::{Evaluation, ProximityEngine, RankedAttraction};
pub use error::{ProximityError, Result};
pub use shake::{AccelSample, ShakeConfig, ShakeDetector};
pub use snapshot::EngineSnapshot;
pub use watch::{
    CrossingNotification, LocationSource, NotificationSink, ProximityWatcher, ReplaySource,
};

use serde::{Deserialize, Serialize};
use wombat_geo::Coordinate;

/// One GPS fix as delivered by the platform location plugin.
///
/// Samples arrive at irregular intervals and are not guaranteed to be in
/// timestamp order; the engine tolerates both. The engine never mutates a
/// sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub coordinate: Coordinate,
    /// Reported horizontal accuracy radius in meters.
    #[serde(default)]
    pub accuracy_m: f64,
    /// Capture time, epoch milliseconds.
    pub captured_at_ms: i64,
}
