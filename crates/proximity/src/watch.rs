//! Capability traits and the watch loop.
//!
//! The engine never talks to a platform plugin directly. Hosts implement
//! [`LocationSource`] over their GPS plumbing and [`NotificationSink`] over
//! their notification surface, then either call the engine themselves or let
//! a [`ProximityWatcher`] pump samples through it.

use crate::{Evaluation, LocationSample, ProximityEngine};
use wombat_catalog::Attraction;

/// A pull-based supplier of location samples.
///
/// `None` means no fix is available right now; sources with their own push
/// streams buffer into this interface.
pub trait LocationSource {
    fn next_sample(&mut self) -> Option<LocationSample>;
}

/// A crossing enriched with what a notification needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossingNotification {
    pub attraction_id: String,
    pub name: String,
    /// Display-rounded distance at crossing time.
    pub distance_km: f64,
}

/// Consumer of crossing events; the platform side owns delivery and
/// permission handling.
pub trait NotificationSink {
    fn notify(&mut self, crossing: &CrossingNotification);
}

/// Replays a fixed list of samples; backs tests and the CLI replay command.
#[derive(Debug, Default)]
pub struct ReplaySource {
    samples: std::vec::IntoIter<LocationSample>,
}

impl ReplaySource {
    pub fn new(samples: Vec<LocationSample>) -> Self {
        Self {
            samples: samples.into_iter(),
        }
    }
}

impl LocationSource for ReplaySource {
    fn next_sample(&mut self) -> Option<LocationSample> {
        self.samples.next()
    }
}

/// Pumps samples from a source through the engine and forwards crossings to
/// a sink.
pub struct ProximityWatcher<S, N> {
    engine: ProximityEngine,
    source: S,
    sink: N,
}

impl<S: LocationSource, N: NotificationSink> ProximityWatcher<S, N> {
    pub fn new(engine: ProximityEngine, source: S, sink: N) -> Self {
        Self { engine, source, sink }
    }

    /// Pull one sample, evaluate it, forward crossings. Returns `None` when
    /// the source has nothing to offer.
    pub fn tick(&mut self, catalog: &[Attraction]) -> Option<Evaluation> {
        let sample = self.source.next_sample()?;
        let evaluation = self.engine.evaluate(&sample, catalog);

        for id in &evaluation.crossings {
            // a crossing is always within the nearby radius, so it is
            // present in the ranked list
            if let Some(ranked) = evaluation.ranked.iter().find(|r| &r.attraction.id == id) {
                self.sink.notify(&CrossingNotification {
                    attraction_id: id.clone(),
                    name: ranked.attraction.name.clone(),
                    distance_km: ranked.display_km,
                });
            }
        }

        Some(evaluation)
    }

    /// Drain the source against one catalog snapshot. Returns the total
    /// number of crossings forwarded.
    pub fn run(&mut self, catalog: &[Attraction]) -> usize {
        let mut crossings = 0;
        while let Some(evaluation) = self.tick(catalog) {
            crossings += evaluation.crossings.len();
        }
        crossings
    }

    pub fn engine(&self) -> &ProximityEngine {
        &self.engine
    }

    pub fn into_engine(self) -> ProximityEngine {
        self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineConfig;
    use wombat_catalog::Category;
    use wombat_geo::Coordinate;

    #[derive(Default)]
    struct RecordingSink {
        delivered: Vec<CrossingNotification>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&mut self, crossing: &CrossingNotification) {
            self.delivered.push(crossing.clone());
        }
    }

    fn catalog() -> Vec<Attraction> {
        vec![Attraction {
            id: "cp".to_string(),
            name: "Central Park".to_string(),
            description: String::new(),
            category: Category::Natural,
            coordinate: Coordinate::new(40.7829, -73.9654),
            rating: 4.5,
            review_count: 0,
            tags: Vec::new(),
            updated_at_ms: 0,
            reviews: Vec::new(),
        }]
    }

    fn sample(lat: f64, lng: f64, at_ms: i64) -> LocationSample {
        LocationSample {
            coordinate: Coordinate::new(lat, lng),
            accuracy_m: 10.0,
            captured_at_ms: at_ms,
        }
    }

    #[test]
    fn test_watcher_forwards_crossings() {
        let engine = ProximityEngine::new(EngineConfig::default()).unwrap();
        let source = ReplaySource::new(vec![
            sample(40.7000, -73.9654, 0),      // ~9 km south, outside
            sample(40.7825, -73.9650, 30_000), // at the park
            sample(40.7825, -73.9650, 45_000), // loitering, cooled down
        ]);
        let mut watcher = ProximityWatcher::new(engine, source, RecordingSink::default());

        let total = watcher.run(&catalog());

        assert_eq!(total, 1);
        let sink = &watcher.sink;
        assert_eq!(sink.delivered.len(), 1);
        assert_eq!(sink.delivered[0].attraction_id, "cp");
        assert_eq!(sink.delivered[0].name, "Central Park");
        assert!(sink.delivered[0].distance_km < 0.5);
    }

    #[test]
    fn test_watcher_empty_source() {
        let engine = ProximityEngine::new(EngineConfig::default()).unwrap();
        let mut watcher = ProximityWatcher::new(
            engine,
            ReplaySource::new(Vec::new()),
            RecordingSink::default(),
        );
        assert!(watcher.tick(&catalog()).is_none());
        assert_eq!(watcher.run(&catalog()), 0);
    }
}
