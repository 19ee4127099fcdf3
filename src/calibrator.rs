// ShotLog - Baseline Calibrator
//
// Averages a burst of startup readings into the "nothing in the hoop"
// distance and derives the detection threshold from it. Runs once; there is
// no re-calibration while the loop is running.

use crate::clock::Clock;
use crate::config::*;
use crate::events::BaselineState;
use crate::sampler::{EchoSource, Sampler};

pub struct Calibrator {
    readings: usize,
    interval_ms: u64,
    threshold_offset_cm: f32,
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new(NUM_BASELINE_READINGS)
    }
}

impl Calibrator {
    pub fn new(readings: usize) -> Self {
        Self {
            readings,
            interval_ms: BASELINE_READING_INTERVAL_MS,
            threshold_offset_cm: THRESHOLD_OFFSET_CM,
        }
    }

    /// Sample `readings` times, `interval_ms` apart, and install the mean as
    /// the sampler's baseline. A dead sensor simply yields the fallback value
    /// as baseline.
    pub fn calibrate<E: EchoSource, C: Clock>(
        &self,
        sampler: &mut Sampler<E>,
        clock: &C,
    ) -> BaselineState {
        if self.readings == 0 {
            return BaselineState::new(sampler.baseline_cm(), self.threshold_offset_cm);
        }

        let mut total_cm = 0.0f32;
        for _ in 0..self.readings {
            total_cm += sampler.sample(clock).distance_cm;
            clock.delay_ms(self.interval_ms);
        }

        let baseline = BaselineState::new(total_cm / self.readings as f32, self.threshold_offset_cm);
        sampler.set_baseline_cm(baseline.baseline_cm);

        log::info!("Baseline Distance: {:.2} cm", baseline.baseline_cm);
        log::info!("Distance Threshold: {:.2} cm", baseline.threshold_cm);

        baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::echo_to_distance_cm;
    use crate::testing::{ManualClock, ScriptedEcho};

    const ECHOES: [u32; 10] = [2000, 2010, 1990, 2005, 1995, 2020, 1980, 2000, 2001, 1999];

    #[test]
    fn baseline_is_the_mean_of_the_readings() {
        let clock = ManualClock::new(0);
        let mut sampler = Sampler::new(ScriptedEcho::new(ECHOES));

        let state = Calibrator::default().calibrate(&mut sampler, &clock);

        let expected = ECHOES.iter().map(|&us| echo_to_distance_cm(us)).sum::<f32>() / 10.0;
        assert!((state.baseline_cm - expected).abs() < 1e-4);
        assert!((state.threshold_cm - (state.baseline_cm - 1.0)).abs() < 1e-6);
        assert_eq!(sampler.baseline_cm(), state.baseline_cm);
    }

    #[test]
    fn readings_are_spaced_by_the_interval() {
        let clock = ManualClock::new(0);
        let mut sampler = Sampler::new(ScriptedEcho::new(ECHOES));

        Calibrator::default().calibrate(&mut sampler, &clock);

        assert_eq!(clock.now_ms(), 10 * BASELINE_READING_INTERVAL_MS);
    }

    #[test]
    fn disconnected_sensor_yields_zero_baseline() {
        let clock = ManualClock::new(0);
        let mut sampler = Sampler::new(ScriptedEcho::new([0]));

        let state = Calibrator::default().calibrate(&mut sampler, &clock);

        assert_eq!(state.baseline_cm, 0.0);
        assert_eq!(state.threshold_cm, -1.0);
    }

    #[test]
    fn far_startup_readings_count_as_zero() {
        let clock = ManualClock::new(0);
        // 171.5 cm is beyond the 0 cm starting baseline + 100 cm margin.
        let mut sampler = Sampler::new(ScriptedEcho::new([10_000, 2_000]));

        let state = Calibrator::new(2).calibrate(&mut sampler, &clock);

        assert!((state.baseline_cm - 34.3 / 2.0).abs() < 1e-4);
    }
}
