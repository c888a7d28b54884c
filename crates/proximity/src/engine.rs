//! The proximity engine.
//!
//! One `evaluate` call per location sample: distances against the supplied
//! catalog snapshot, a ranked nearby list, and crossing events for
//! attractions that just became notification-worthy. All state lives in the
//! engine's private per-attraction map; callers serialize concurrent sample
//! sources (`&mut self` enforces at most one in-flight evaluation).

use crate::{EngineConfig, LocationSample, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use wombat_catalog::Attraction;
use wombat_geo::{display_km, haversine_distance};

/// An attraction inside the nearby radius, with its distance from the last
/// accepted sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedAttraction {
    pub attraction: Attraction,
    /// Full-precision distance; used for every threshold comparison.
    pub distance_km: f64,
    /// Distance rounded to 2 decimals for presentation.
    pub display_km: f64,
}

/// The outputs of one evaluation.
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    /// Attractions within the nearby radius, closest first, ties broken by
    /// id.
    pub ranked: Vec<RankedAttraction>,
    /// Ids of attractions that crossed into the notification radius this
    /// evaluation, in catalog order.
    pub crossings: Vec<String>,
}

/// Per-attraction working memory. Never exposed; only derived outputs leave
/// the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ProximityState {
    pub(crate) last_distance_km: f64,
    pub(crate) inside_threshold: bool,
    pub(crate) last_notified_at_ms: Option<i64>,
}

/// Derives ranked nearby lists and cooldown-gated crossing events from a
/// stream of location samples.
pub struct ProximityEngine {
    config: EngineConfig,
    states: HashMap<String, ProximityState>,
    /// Highest sample timestamp accepted so far. Stale samples never move
    /// this backwards, so cooldown bookkeeping cannot regress.
    clock_ms: Option<i64>,
    /// Ranked list from the last accepted evaluation, returned unchanged
    /// when a sample is rejected.
    last_ranked: Vec<RankedAttraction>,
}

impl ProximityEngine {
    /// Create an engine with a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            states: HashMap::new(),
            clock_ms: None,
            last_ranked: Vec::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one sample against a catalog snapshot.
    ///
    /// Never fails: rejected samples (invalid coordinate, or accuracy worse
    /// than the configured bound) are an idempotent no-op returning the
    /// previous ranked list and no crossings. Samples older than the newest
    /// accepted timestamp still refresh the ranked list but are excluded
    /// from crossing detection and leave per-attraction state untouched.
    pub fn evaluate(&mut self, sample: &LocationSample, catalog: &[Attraction]) -> Evaluation {
        if let Some(reason) = self.rejection_reason(sample) {
            tracing::debug!(reason, captured_at_ms = sample.captured_at_ms, "sample rejected");
            return Evaluation {
                ranked: self.last_ranked.clone(),
                crossings: Vec::new(),
            };
        }

        let stale = self
            .clock_ms
            .is_some_and(|clock| sample.captured_at_ms < clock);
        if !stale {
            self.clock_ms = Some(sample.captured_at_ms);
        }

        let distances: Vec<(usize, f64)> = catalog
            .iter()
            .enumerate()
            .map(|(i, attraction)| {
                (
                    i,
                    haversine_distance(&sample.coordinate, &attraction.coordinate),
                )
            })
            .collect();

        let mut ranked: Vec<RankedAttraction> = distances
            .iter()
            .filter(|(_, d)| *d <= self.config.nearby_radius_km)
            .map(|&(i, d)| RankedAttraction {
                attraction: catalog[i].clone(),
                distance_km: d,
                display_km: display_km(d),
            })
            .collect();
        ranked.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.attraction.id.cmp(&b.attraction.id))
        });

        let crossings = if stale {
            tracing::debug!(
                captured_at_ms = sample.captured_at_ms,
                "stale sample: ranked only, crossing detection skipped"
            );
            Vec::new()
        } else {
            self.update_states(sample, catalog, &distances)
        };

        self.prune_departed(catalog);
        self.last_ranked = ranked.clone();

        Evaluation { ranked, crossings }
    }

    /// Why a sample cannot be used, if any.
    fn rejection_reason(&self, sample: &LocationSample) -> Option<&'static str> {
        if !sample.coordinate.is_valid() {
            return Some("coordinate out of range");
        }
        if let Some(bound) = self.config.max_accuracy_m {
            if sample.accuracy_m > bound {
                return Some("accuracy above bound");
            }
        }
        None
    }

    /// Advance per-attraction state and collect crossings.
    ///
    /// A crossing fires for an attraction iff it is now inside the
    /// notification radius and either it has never fired or the cooldown
    /// has elapsed in sample time. Firing on the cooldown edge while still
    /// inside is deliberate; threshold flips within the window never
    /// re-fire, no matter how jittery the fixes.
    fn update_states(
        &mut self,
        sample: &LocationSample,
        catalog: &[Attraction],
        distances: &[(usize, f64)],
    ) -> Vec<String> {
        let notify_radius_km = self.config.notify_radius_km;
        let cooldown_ms = self.config.notify_cooldown_ms;
        let mut crossings = Vec::new();

        for &(i, distance_km) in distances {
            let attraction = &catalog[i];
            let inside_now = distance_km <= notify_radius_km;

            let state = self
                .states
                .entry(attraction.id.clone())
                .or_insert(ProximityState {
                    last_distance_km: distance_km,
                    inside_threshold: false,
                    last_notified_at_ms: None,
                });

            let cooldown_open = state
                .last_notified_at_ms
                .is_none_or(|notified_at| sample.captured_at_ms - notified_at >= cooldown_ms);

            if inside_now && cooldown_open {
                state.last_notified_at_ms = Some(sample.captured_at_ms);
                tracing::debug!(
                    attraction = %attraction.id,
                    distance_km,
                    "proximity crossing"
                );
                crossings.push(attraction.id.clone());
            }

            state.last_distance_km = distance_km;
            state.inside_threshold = inside_now;
        }

        crossings
    }

    /// Drop state for attractions no longer in the catalog; working memory
    /// stays bounded by catalog size.
    fn prune_departed(&mut self, catalog: &[Attraction]) {
        if self.states.len() <= catalog.len() {
            return;
        }
        let live: HashSet<&str> = catalog.iter().map(|a| a.id.as_str()).collect();
        let before = self.states.len();
        self.states.retain(|id, _| live.contains(id.as_str()));
        tracing::debug!(pruned = before - self.states.len(), "pruned departed attractions");
    }

    pub(crate) fn parts(&self) -> (&EngineConfig, &HashMap<String, ProximityState>, Option<i64>) {
        (&self.config, &self.states, self.clock_ms)
    }

    pub(crate) fn from_parts(
        config: EngineConfig,
        states: HashMap<String, ProximityState>,
        clock_ms: Option<i64>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            states,
            clock_ms,
            last_ranked: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wombat_catalog::Category;
    use wombat_geo::Coordinate;

    /// Degrees of latitude per kilometer on the reference sphere, so tests
    /// can place attractions at exact distances due north.
    const DEG_PER_KM: f64 = 180.0 / (std::f64::consts::PI * wombat_geo::EARTH_RADIUS_KM);

    /// An attraction exactly `km` north of the origin.
    fn attraction_at_km(id: &str, km: f64) -> Attraction {
        Attraction {
            id: id.to_string(),
            name: format!("Attraction {id}"),
            description: String::new(),
            category: Category::Cultural,
            coordinate: Coordinate::new(km * DEG_PER_KM, 0.0),
            rating: 4.0,
            review_count: 0,
            tags: Vec::new(),
            updated_at_ms: 0,
            reviews: Vec::new(),
        }
    }

    fn sample_at_origin(captured_at_ms: i64) -> LocationSample {
        LocationSample {
            coordinate: Coordinate::new(0.0, 0.0),
            accuracy_m: 10.0,
            captured_at_ms,
        }
    }

    fn sample_at_km(km: f64, captured_at_ms: i64) -> LocationSample {
        LocationSample {
            coordinate: Coordinate::new(km * DEG_PER_KM, 0.0),
            accuracy_m: 10.0,
            captured_at_ms,
        }
    }

    fn engine() -> ProximityEngine {
        ProximityEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_ranking_correctness() {
        let catalog: Vec<Attraction> = [0.1, 3.0, 4.9, 5.1, 10.0]
            .iter()
            .enumerate()
            .map(|(i, &km)| attraction_at_km(&format!("a{i}"), km))
            .collect();

        let evaluation = engine().evaluate(&sample_at_origin(0), &catalog);

        let ids: Vec<&str> = evaluation
            .ranked
            .iter()
            .map(|r| r.attraction.id.as_str())
            .collect();
        assert_eq!(ids, ["a0", "a1", "a2"]);
        assert!((evaluation.ranked[0].distance_km - 0.1).abs() < 1e-6);
        assert!((evaluation.ranked[2].distance_km - 4.9).abs() < 1e-6);
    }

    #[test]
    fn test_ranking_radius_cut() {
        let catalog = vec![
            attraction_at_km("in", 4.9995),
            attraction_at_km("out", 5.0005),
        ];
        let evaluation = engine().evaluate(&sample_at_origin(0), &catalog);
        assert_eq!(evaluation.ranked.len(), 1);
        assert_eq!(evaluation.ranked[0].attraction.id, "in");
    }

    #[test]
    fn test_tie_break_by_id() {
        let mut b = attraction_at_km("b", 2.0);
        let a = attraction_at_km("a", 2.0);
        b.name = "Same spot".into();

        let evaluation = engine().evaluate(&sample_at_origin(0), &[b, a]);
        let ids: Vec<&str> = evaluation
            .ranked
            .iter()
            .map(|r| r.attraction.id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_empty_catalog() {
        let evaluation = engine().evaluate(&sample_at_origin(0), &[]);
        assert!(evaluation.ranked.is_empty());
        assert!(evaluation.crossings.is_empty());
    }

    #[test]
    fn test_cooldown_idempotence() {
        let catalog = vec![attraction_at_km("cp", 0.2)];
        let mut engine = engine();

        let first = engine.evaluate(&sample_at_origin(0), &catalog);
        let second = engine.evaluate(&sample_at_origin(1_000), &catalog);
        let third = engine.evaluate(&sample_at_origin(2_000), &catalog);

        assert_eq!(first.crossings, vec!["cp".to_string()]);
        assert!(second.crossings.is_empty());
        assert!(third.crossings.is_empty());
    }

    #[test]
    fn test_cooldown_expiry_refires() {
        let catalog = vec![attraction_at_km("cp", 0.2)];
        let mut engine = engine();

        assert_eq!(engine.evaluate(&sample_at_origin(0), &catalog).crossings.len(), 1);
        assert!(engine.evaluate(&sample_at_origin(1_000), &catalog).crossings.is_empty());
        assert_eq!(
            engine.evaluate(&sample_at_origin(70_000), &catalog).crossings,
            vec!["cp".to_string()]
        );
    }

    #[test]
    fn test_edge_triggering() {
        let catalog = vec![attraction_at_km("cp", 0.0)];
        let mut engine = engine();

        // user approaches: 1.0 km out, then 0.3 km, then 0.4 km
        let outside = engine.evaluate(&sample_at_km(1.0, 0), &catalog);
        let entering = engine.evaluate(&sample_at_km(0.3, 10_000), &catalog);
        let still_inside = engine.evaluate(&sample_at_km(0.4, 20_000), &catalog);

        assert!(outside.crossings.is_empty());
        assert_eq!(entering.crossings, vec!["cp".to_string()]);
        assert!(still_inside.crossings.is_empty());
    }

    #[test]
    fn test_jitter_within_cooldown_fires_once() {
        let catalog = vec![attraction_at_km("cp", 0.0)];
        let mut engine = engine();

        // GPS jitter flips the threshold every tick; one crossing per window
        assert_eq!(engine.evaluate(&sample_at_km(0.3, 0), &catalog).crossings.len(), 1);
        assert!(engine.evaluate(&sample_at_km(0.8, 5_000), &catalog).crossings.is_empty());
        assert!(engine.evaluate(&sample_at_km(0.2, 10_000), &catalog).crossings.is_empty());
        assert!(engine.evaluate(&sample_at_km(0.9, 15_000), &catalog).crossings.is_empty());
        assert!(engine.evaluate(&sample_at_km(0.1, 20_000), &catalog).crossings.is_empty());
    }

    #[test]
    fn test_determinism() {
        let catalog = vec![attraction_at_km("a", 0.2), attraction_at_km("b", 3.0)];
        let sample = sample_at_origin(1_000);

        let mut engine_a = engine();
        let mut engine_b = engine();
        let eval_a = engine_a.evaluate(&sample, &catalog);
        let eval_b = engine_b.evaluate(&sample, &catalog);

        assert_eq!(eval_a.crossings, eval_b.crossings);
        let ids_a: Vec<&str> = eval_a.ranked.iter().map(|r| r.attraction.id.as_str()).collect();
        let ids_b: Vec<&str> = eval_b.ranked.iter().map(|r| r.attraction.id.as_str()).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_stale_sample_ranks_without_crossing() {
        let catalog = vec![attraction_at_km("cp", 0.0)];
        let mut engine = engine();

        // fresh fix far away
        let far = engine.evaluate(&sample_at_km(10.0, 60_000), &catalog);
        assert!(far.ranked.is_empty());

        // an out-of-order fix from earlier, right next to the attraction:
        // shown in the ranked list, but no crossing
        let stale = engine.evaluate(&sample_at_km(0.2, 30_000), &catalog);
        assert_eq!(stale.ranked.len(), 1);
        assert!(stale.crossings.is_empty());

        // a fresh fix at the same spot fires as usual
        let fresh = engine.evaluate(&sample_at_km(0.2, 90_000), &catalog);
        assert_eq!(fresh.crossings, vec!["cp".to_string()]);
    }

    #[test]
    fn test_accuracy_filter_rejects_as_noop() {
        let config = EngineConfig {
            max_accuracy_m: Some(50.0),
            ..EngineConfig::default()
        };
        let mut engine = ProximityEngine::new(config).unwrap();
        let catalog = vec![attraction_at_km("cp", 0.2)];

        let good = engine.evaluate(&sample_at_origin(0), &catalog);
        assert_eq!(good.ranked.len(), 1);
        assert_eq!(good.crossings.len(), 1);

        let bad = LocationSample {
            accuracy_m: 500.0,
            ..sample_at_km(20.0, 1_000)
        };
        let rejected = engine.evaluate(&bad, &catalog);
        // previous ranked list unchanged, no crossings
        assert_eq!(rejected.ranked.len(), 1);
        assert_eq!(rejected.ranked[0].attraction.id, "cp");
        assert!(rejected.crossings.is_empty());
    }

    #[test]
    fn test_accuracy_filter_off_by_default() {
        let catalog = vec![attraction_at_km("cp", 0.2)];
        let coarse = LocationSample {
            accuracy_m: 5_000.0,
            ..sample_at_origin(0)
        };
        let evaluation = engine().evaluate(&coarse, &catalog);
        assert_eq!(evaluation.ranked.len(), 1);
    }

    #[test]
    fn test_invalid_coordinate_rejected() {
        let catalog = vec![attraction_at_km("cp", 0.2)];
        let mut engine = engine();
        engine.evaluate(&sample_at_origin(0), &catalog);

        let invalid = LocationSample {
            coordinate: Coordinate::new(91.0, 0.0),
            accuracy_m: 10.0,
            captured_at_ms: 1_000,
        };
        let rejected = engine.evaluate(&invalid, &catalog);
        assert_eq!(rejected.ranked.len(), 1);
        assert!(rejected.crossings.is_empty());
    }

    #[test]
    fn test_state_pruned_when_attraction_leaves_catalog() {
        let mut engine = engine();
        let full = vec![attraction_at_km("a", 0.2), attraction_at_km("b", 0.3)];
        engine.evaluate(&sample_at_origin(0), &full);
        assert_eq!(engine.states.len(), 2);

        let reduced = vec![attraction_at_km("b", 0.3)];
        engine.evaluate(&sample_at_origin(1_000), &reduced);
        assert_eq!(engine.states.len(), 1);
        assert!(engine.states.contains_key("b"));

        // "a" returns with fresh state: it fires immediately again
        let back = engine.evaluate(&sample_at_origin(2_000), &full);
        assert_eq!(back.crossings, vec!["a".to_string()]);
    }

    #[test]
    fn test_display_distance_rounded_ranking_full_precision() {
        // 4.999 km is inside a 5 km radius even though it displays as 5.0
        let catalog = vec![attraction_at_km("edge", 4.999)];
        let evaluation = engine().evaluate(&sample_at_origin(0), &catalog);
        assert_eq!(evaluation.ranked.len(), 1);
        assert_eq!(evaluation.ranked[0].display_km, 5.0);
        assert!(evaluation.ranked[0].distance_km < 5.0);
    }
}
