// Test doubles for the hardware seams.

use std::cell::Cell;
use std::collections::VecDeque;

use crate::clock::Clock;
use crate::sampler::EchoSource;

/// Replays echo timings in order, then keeps repeating the last one.
pub struct ScriptedEcho {
    script: VecDeque<u32>,
    last: u32,
    pub last_timeout_us: Option<u32>,
}

impl ScriptedEcho {
    pub fn new(script: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: script.into_iter().collect(),
            last: 0,
            last_timeout_us: None,
        }
    }

    pub fn push(&mut self, echo_us: u32) {
        self.script.push_back(echo_us);
    }
}

impl EchoSource for ScriptedEcho {
    fn measure_echo(&mut self, timeout_us: u32) -> u32 {
        self.last_timeout_us = Some(timeout_us);
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }
}

/// Time only moves when a test advances it or something calls `delay_ms`.
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn delay_ms(&self, ms: u64) {
        self.advance(ms);
    }
}
