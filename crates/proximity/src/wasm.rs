//! WASM bindings for the proximity engine.
//!
//! Exposes a stateful engine handle to the app shell. All payloads cross the
//! boundary as JSON strings: a catalog snapshot in the document-store shape,
//! samples as `{"coordinate": {"latitude": .., "longitude": ..},
//! "accuracy_m": .., "captured_at_ms": ..}`.

use crate::{EngineConfig, LocationSample, ProximityEngine};
use wasm_bindgen::prelude::*;
use wombat_catalog::{Attraction, parse_attractions};

/// A proximity engine instance owned by the JS side.
#[wasm_bindgen]
pub struct NearbyEngine {
    engine: ProximityEngine,
    catalog: Vec<Attraction>,
}

#[wasm_bindgen]
impl NearbyEngine {
    /// Create an engine. `config_json` may be `"{}"`; unset fields take
    /// their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> std::result::Result<NearbyEngine, JsValue> {
        let config: EngineConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;
        let engine = ProximityEngine::new(config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(NearbyEngine {
            engine,
            catalog: Vec::new(),
        })
    }

    /// Replace the catalog snapshot. Returns the number of decoded records.
    pub fn set_catalog(&mut self, snapshot_json: &str) -> std::result::Result<u32, JsValue> {
        let snapshot: serde_json::Value = serde_json::from_str(snapshot_json)
            .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;
        self.catalog = parse_attractions(&snapshot)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.catalog.len() as u32)
    }

    /// Evaluate one sample. Returns
    /// `{"ranked": [{"attraction": .., "distance_km": .., "display_km": ..}],
    ///   "crossings": ["id", ..]}`.
    pub fn evaluate(&mut self, sample_json: &str) -> std::result::Result<String, JsValue> {
        let sample: LocationSample = serde_json::from_str(sample_json)
            .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;

        let evaluation = self.engine.evaluate(&sample, &self.catalog);
        let result = serde_json::json!({
            "ranked": evaluation.ranked,
            "crossings": evaluation.crossings,
        });

        Ok(result.to_string())
    }

    /// Export proximity state for persistence.
    pub fn snapshot(&self) -> std::result::Result<String, JsValue> {
        self.engine
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Restore proximity state exported by `snapshot`.
    pub fn restore(&mut self, snapshot_json: &str) -> std::result::Result<(), JsValue> {
        let snapshot = crate::EngineSnapshot::from_json(snapshot_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.engine = ProximityEngine::restore(self.engine.config().clone(), snapshot)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(())
    }
}
