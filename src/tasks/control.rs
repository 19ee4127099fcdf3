// ShotLog - Control Loop
//
// The single thread that owns the sensor, the detector and the log file.
// Each iteration, in order:
//   1. Apply any serial commands (RESET).
//   2. Answer pending `/get_data` snapshot requests.
//   3. Take one distance sample and run the detector.
//   4. Persist the shot, if there was one.
// `run` then sleeps for `LOOP_DELAY_MS` and goes again.

use std::sync::mpsc::Receiver;

use crate::calibrator::Calibrator;
use crate::clock::Clock;
use crate::config::*;
use crate::detector::ShotDetector;
use crate::event_log::EventLog;
use crate::events::{BaselineState, Command, ShotEvent, SnapshotRequest};
use crate::sampler::{EchoSource, Sampler};

pub struct ControlLoop<E, C> {
    sampler: Sampler<E>,
    detector: ShotDetector,
    baseline: BaselineState,
    log: EventLog,
    clock: C,
    commands: Receiver<Command>,
    snapshots: Receiver<SnapshotRequest>,
}

impl<E: EchoSource, C: Clock> ControlLoop<E, C> {
    /// Calibrate the baseline (blocks for ~1 s) and build the loop context.
    pub fn start(
        echo: E,
        clock: C,
        log: EventLog,
        commands: Receiver<Command>,
        snapshots: Receiver<SnapshotRequest>,
    ) -> Self {
        let mut sampler = Sampler::new(echo);
        let baseline = Calibrator::default().calibrate(&mut sampler, &clock);

        Self {
            sampler,
            detector: ShotDetector::new(&baseline),
            baseline,
            log,
            clock,
            commands,
            snapshots,
        }
    }

    pub fn baseline(&self) -> BaselineState {
        self.baseline
    }

    pub fn shot_count(&self) -> u32 {
        self.detector.shot_count()
    }

    /// One loop iteration without the trailing delay.
    pub fn tick(&mut self) -> Option<ShotEvent> {
        while let Ok(command) = self.commands.try_recv() {
            self.handle_command(command);
        }

        while let Ok(request) = self.snapshots.try_recv() {
            // The HTTP handler may have given up waiting; nothing to do then.
            let _ = request.reply.send(self.log.read_all());
        }

        let sample = self.sampler.sample(&self.clock);
        let event = self.detector.process(&sample)?;

        log::info!("Shot detected! ({} ms)", event.timestamp_ms);
        self.log.append(&event);
        Some(event)
    }

    pub fn run(mut self) -> ! {
        log::info!("Control loop started");
        loop {
            self.tick();
            self.clock.delay_ms(LOOP_DELAY_MS);
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Reset => match self.log.reset() {
                Ok(()) => log::info!("CSV file has been reset."),
                Err(e) => log::error!("Log reset failed: {}", e),
            },
        }
    }
}
