// ShotLog - Measurements, Events & Messages

use std::fmt;
use std::sync::mpsc::SyncSender;

use crate::event_log::LogError;

// ---------------------------------------------------------------------------
// Distance Sample (one ultrasonic reading, never persisted)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSample {
    pub distance_cm: f32,
    /// Milliseconds since boot.
    pub timestamp_ms: u64,
}

// ---------------------------------------------------------------------------
// Baseline (computed once at startup)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineState {
    pub baseline_cm: f32,
    pub threshold_cm: f32,
}

impl BaselineState {
    pub fn new(baseline_cm: f32, threshold_offset_cm: f32) -> Self {
        Self {
            baseline_cm,
            threshold_cm: baseline_cm - threshold_offset_cm,
        }
    }
}

// ---------------------------------------------------------------------------
// Shot Event
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotEvent {
    pub timestamp_ms: u64,
    /// Counts from 1 since boot; not restored from the log.
    pub shot_count: u32,
}

/// Renders the persisted `timestamp,count` record (no newline).
impl fmt::Display for ShotEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.timestamp_ms, self.shot_count)
    }
}

// ---------------------------------------------------------------------------
// Control messages - sent to the control loop via channel
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Truncate the log back to its header.
    Reset,
}

/// Asks the control loop for the full log contents. The loop answers on
/// `reply` so the store is only ever touched from the loop thread.
#[derive(Debug)]
pub struct SnapshotRequest {
    pub reply: SyncSender<Result<String, LogError>>,
}
