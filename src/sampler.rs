// ShotLog - Distance Sampler
//
// Fires one ultrasonic ping per call, converts the echo time-of-flight to
// centimetres and swaps implausible readings for the current baseline.

use crate::clock::Clock;
use crate::config::*;
use crate::events::DistanceSample;

/// Source of raw echo timings. The firmware implements this over the
/// HC-SR04 GPIO lines; tests feed scripted timings.
pub trait EchoSource {
    /// Emit the trigger pulse and return the echo high time in microseconds,
    /// or 0 if no echo completed within `timeout_us`.
    fn measure_echo(&mut self, timeout_us: u32) -> u32;
}

/// Round-trip echo time to one-way distance.
pub fn echo_to_distance_cm(echo_us: u32) -> f32 {
    echo_us as f32 * SPEED_OF_SOUND_CM_PER_US / 2.0
}

/// A missing echo (exactly 0 cm) or anything further than
/// `baseline + OUTLIER_MARGIN_CM` is replaced with the baseline itself.
pub fn reject_outlier(distance_cm: f32, baseline_cm: f32) -> f32 {
    if distance_cm == 0.0 || distance_cm > baseline_cm + OUTLIER_MARGIN_CM {
        baseline_cm
    } else {
        distance_cm
    }
}

pub struct Sampler<E> {
    echo: E,
    baseline_cm: f32,
}

impl<E: EchoSource> Sampler<E> {
    /// Starts with a 0 cm baseline until calibration replaces it.
    pub fn new(echo: E) -> Self {
        Self {
            echo,
            baseline_cm: 0.0,
        }
    }

    pub fn baseline_cm(&self) -> f32 {
        self.baseline_cm
    }

    #[cfg(test)]
    pub(crate) fn echo(&self) -> &E {
        &self.echo
    }

    pub fn set_baseline_cm(&mut self, baseline_cm: f32) {
        self.baseline_cm = baseline_cm;
    }

    /// Take one reading; blocks for at most `ECHO_TIMEOUT_US` on the echo.
    pub fn sample<C: Clock>(&mut self, clock: &C) -> DistanceSample {
        let echo_us = self.echo.measure_echo(ECHO_TIMEOUT_US);
        let distance_cm = reject_outlier(echo_to_distance_cm(echo_us), self.baseline_cm);

        log::debug!("Distance: {:.2} cm", distance_cm);

        DistanceSample {
            distance_cm,
            timestamp_ms: clock.now_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualClock, ScriptedEcho};
    use proptest::prelude::*;

    #[test]
    fn converts_round_trip_time_to_one_way_distance() {
        assert_eq!(echo_to_distance_cm(0), 0.0);
        assert!((echo_to_distance_cm(1000) - 17.15).abs() < 1e-4);
        assert!((echo_to_distance_cm(ECHO_TIMEOUT_US) - 514.5).abs() < 1e-2);
    }

    #[test]
    fn zero_reading_falls_back_to_baseline() {
        assert_eq!(reject_outlier(0.0, 42.5), 42.5);
    }

    #[test]
    fn far_reading_falls_back_to_baseline() {
        assert_eq!(reject_outlier(142.6, 42.5), 42.5);
        assert_eq!(reject_outlier(142.5, 42.5), 142.5);
        assert_eq!(reject_outlier(30.0, 42.5), 30.0);
    }

    #[test]
    fn uncalibrated_sampler_maps_far_readings_to_zero() {
        let clock = ManualClock::new(0);
        let mut sampler = Sampler::new(ScriptedEcho::new([10_000, 2_000]));

        assert_eq!(sampler.sample(&clock).distance_cm, 0.0);
        assert!((sampler.sample(&clock).distance_cm - 34.3).abs() < 1e-4);
    }

    #[test]
    fn sample_is_stamped_after_the_echo() {
        let clock = ManualClock::new(1234);
        let mut sampler = Sampler::new(ScriptedEcho::new([2_000]));
        sampler.set_baseline_cm(40.0);

        let sample = sampler.sample(&clock);
        assert_eq!(sample.timestamp_ms, 1234);
    }

    #[test]
    fn echo_wait_is_bounded_to_30_ms() {
        let clock = ManualClock::new(0);
        let mut sampler = Sampler::new(ScriptedEcho::new([2_000]));

        sampler.sample(&clock);

        assert_eq!(sampler.echo().last_timeout_us, Some(30_000));
    }

    proptest! {
        #[test]
        fn rejected_readings_always_equal_baseline(
            echoes in prop::collection::vec(0u32..=ECHO_TIMEOUT_US, 1..64),
            baseline in 1.0f32..300.0,
        ) {
            let clock = ManualClock::new(0);
            let mut sampler = Sampler::new(ScriptedEcho::new(echoes.clone()));
            sampler.set_baseline_cm(baseline);

            for echo_us in echoes {
                let raw = echo_to_distance_cm(echo_us);
                let out = sampler.sample(&clock).distance_cm;
                if raw == 0.0 || raw > baseline + OUTLIER_MARGIN_CM {
                    prop_assert_eq!(out, baseline);
                } else {
                    prop_assert_eq!(out, raw);
                }
            }
        }
    }
}
