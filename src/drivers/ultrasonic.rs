// ShotLog - HC-SR04 Ultrasonic Driver
//
// Bit-banged trigger pulse plus a busy-wait echo timer on the ESP-IDF
// microsecond clock. Every wait shares one timeout budget so a missing or
// stuck echo never blocks longer than `timeout_us`.

use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{AnyInputPin, AnyOutputPin, Input, Output, PinDriver};
use esp_idf_sys::EspError;

use crate::config::*;
use crate::sampler::EchoSource;

pub struct Hcsr04<'d> {
    trigger: PinDriver<'d, AnyOutputPin, Output>,
    echo: PinDriver<'d, AnyInputPin, Input>,
}

impl<'d> Hcsr04<'d> {
    pub fn new(
        mut trigger: PinDriver<'d, AnyOutputPin, Output>,
        echo: PinDriver<'d, AnyInputPin, Input>,
    ) -> anyhow::Result<Self> {
        trigger.set_low()?;
        log::info!("HC-SR04 on TRIG GPIO{} / ECHO GPIO{}", PIN_TRIGGER, PIN_ECHO);
        Ok(Self { trigger, echo })
    }

    fn fire_trigger(&mut self) -> Result<(), EspError> {
        self.trigger.set_low()?;
        Ets::delay_us(TRIGGER_SETTLE_US);
        self.trigger.set_high()?;
        Ets::delay_us(TRIGGER_PULSE_US);
        self.trigger.set_low()
    }

    /// Length of the next HIGH pulse on ECHO in microseconds, 0 on timeout.
    fn pulse_high_us(&self, timeout_us: u32) -> u32 {
        let start = now_us();
        let expired = || now_us() - start > i64::from(timeout_us);

        // A previous pulse may still be in progress.
        while self.echo.is_high() {
            if expired() {
                return 0;
            }
        }
        while self.echo.is_low() {
            if expired() {
                return 0;
            }
        }

        let rise = now_us();
        while self.echo.is_high() {
            if expired() {
                return 0;
            }
        }
        (now_us() - rise) as u32
    }
}

impl EchoSource for Hcsr04<'_> {
    fn measure_echo(&mut self, timeout_us: u32) -> u32 {
        if let Err(e) = self.fire_trigger() {
            log::warn!("HC-SR04 trigger error: {}", e);
            return 0;
        }
        self.pulse_high_us(timeout_us)
    }
}

fn now_us() -> i64 {
    unsafe { esp_idf_sys::esp_timer_get_time() }
}
