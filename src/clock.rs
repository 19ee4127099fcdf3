// ShotLog - Time Source
//
// Monotonic milliseconds plus a blocking delay. The firmware reads the
// ESP-IDF high resolution timer; tests drive a manual clock.

pub trait Clock {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u64;

    /// Block the calling thread for `ms` milliseconds.
    fn delay_ms(&self, ms: u64);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn delay_ms(&self, ms: u64) {
        (**self).delay_ms(ms)
    }
}

/// `esp_timer`-backed clock (64-bit, does not wrap in practice).
#[cfg(target_os = "espidf")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EspClock;

#[cfg(target_os = "espidf")]
impl Clock for EspClock {
    fn now_ms(&self) -> u64 {
        unsafe { (esp_idf_sys::esp_timer_get_time() / 1000) as u64 }
    }

    fn delay_ms(&self, ms: u64) {
        std::thread::sleep(std::time::Duration::from_millis(ms));
    }
}
