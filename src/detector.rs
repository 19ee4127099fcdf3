// ShotLog - Shot Detector
//
// Threshold crossing with a time-based debounce. The detector re-arms purely
// on elapsed time: there is no "object left the beam" observation, so two
// real shots closer together than the debounce window count as one.

use crate::config::DEBOUNCE_MS;
use crate::events::{BaselineState, DistanceSample, ShotEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    /// The next sample below threshold is a shot.
    Armed,
    /// A shot was accepted less than one debounce window ago.
    Debounced,
}

pub struct ShotDetector {
    threshold_cm: f32,
    debounce_ms: u64,
    last_detection_ms: Option<u64>,
    shot_count: u32,
}

impl ShotDetector {
    pub fn new(baseline: &BaselineState) -> Self {
        Self::with_debounce(baseline, DEBOUNCE_MS)
    }

    pub fn with_debounce(baseline: &BaselineState, debounce_ms: u64) -> Self {
        Self {
            threshold_cm: baseline.threshold_cm,
            debounce_ms,
            last_detection_ms: None,
            shot_count: 0,
        }
    }

    pub fn shot_count(&self) -> u32 {
        self.shot_count
    }

    pub fn state_at(&self, now_ms: u64) -> DetectorState {
        match self.last_detection_ms {
            Some(last) if now_ms.saturating_sub(last) <= self.debounce_ms => DetectorState::Debounced,
            _ => DetectorState::Armed,
        }
    }

    /// Feed one sample; returns the event if this sample is an accepted shot.
    pub fn process(&mut self, sample: &DistanceSample) -> Option<ShotEvent> {
        if sample.distance_cm >= self.threshold_cm {
            return None;
        }
        if self.state_at(sample.timestamp_ms) == DetectorState::Debounced {
            return None;
        }

        self.last_detection_ms = Some(sample.timestamp_ms);
        self.shot_count = self.shot_count.wrapping_add(1);

        Some(ShotEvent {
            timestamp_ms: sample.timestamp_ms,
            shot_count: self.shot_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ShotDetector {
        ShotDetector::new(&BaselineState::new(50.0, 1.0))
    }

    fn at(timestamp_ms: u64, distance_cm: f32) -> DistanceSample {
        DistanceSample {
            distance_cm,
            timestamp_ms,
        }
    }

    #[test]
    fn crossing_inside_debounce_window_is_suppressed() {
        let mut det = detector();
        let events: Vec<_> = [0, 400, 600]
            .into_iter()
            .filter_map(|t| det.process(&at(t, 20.0)))
            .collect();

        assert_eq!(
            events,
            vec![
                ShotEvent { timestamp_ms: 0, shot_count: 1 },
                ShotEvent { timestamp_ms: 600, shot_count: 2 },
            ]
        );
    }

    #[test]
    fn readings_at_or_above_threshold_never_fire() {
        let mut det = detector();
        assert_eq!(det.process(&at(1000, 49.0)), None);
        assert_eq!(det.process(&at(2000, 50.0)), None);
        assert_eq!(det.process(&at(3000, 48.99)).map(|e| e.shot_count), Some(1));
    }

    #[test]
    fn rearms_by_time_alone() {
        let mut det = detector();
        assert!(det.process(&at(1000, 10.0)).is_some());
        assert_eq!(det.state_at(1000), DetectorState::Debounced);
        assert_eq!(det.state_at(1500), DetectorState::Debounced);
        assert_eq!(det.state_at(1501), DetectorState::Armed);

        // Object never left the beam, yet a second shot is counted.
        assert_eq!(det.process(&at(1501, 10.0)).map(|e| e.shot_count), Some(2));
        assert_eq!(det.shot_count(), 2);
    }

    #[test]
    fn suppressed_crossings_do_not_extend_the_window() {
        let mut det = detector();
        assert!(det.process(&at(0, 10.0)).is_some());
        assert!(det.process(&at(450, 10.0)).is_none());
        assert!(det.process(&at(501, 10.0)).is_some());
    }
}
