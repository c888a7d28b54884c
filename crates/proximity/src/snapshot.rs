//! Engine state persistence.
//!
//! Hosts that want proximity state to survive a process restart export an
//! [`EngineSnapshot`], persist it however they like, and restore it on the
//! next launch. The snapshot is opaque: its JSON shape is an implementation
//! detail, stable only across matching crate versions.

use crate::engine::ProximityState;
use crate::{EngineConfig, ProximityEngine, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serializable export of the engine's working memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    clock_ms: Option<i64>,
    states: HashMap<String, ProximityState>,
}

impl EngineSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl ProximityEngine {
    /// Export the current proximity state.
    ///
    /// The last ranked list is display state and is not part of a snapshot;
    /// it rebuilds on the first evaluation after restore.
    pub fn snapshot(&self) -> EngineSnapshot {
        let (_, states, clock_ms) = self.parts();
        EngineSnapshot {
            clock_ms,
            states: states.clone(),
        }
    }

    /// Rebuild an engine from a snapshot and a (possibly updated) config.
    pub fn restore(config: EngineConfig, snapshot: EngineSnapshot) -> Result<Self> {
        Self::from_parts(config, snapshot.states, snapshot.clock_ms)
    }
}
