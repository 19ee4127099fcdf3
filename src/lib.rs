// ShotLog - Ultrasonic shot counter
//
// Hardware-independent pieces (sampling policy, calibration, detection, the
// CSV log, command parsing, the control loop) build and test on the host.
// GPIO, SPIFFS, Wi-Fi and the HTTP server are only compiled for ESP-IDF.

pub mod calibrator;
pub mod clock;
pub mod command;
pub mod config;
pub mod detector;
pub mod event_log;
pub mod events;
pub mod http;
pub mod sampler;
pub mod tasks;

#[cfg(target_os = "espidf")]
pub mod drivers;

#[cfg(test)]
pub(crate) mod testing;
