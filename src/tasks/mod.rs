pub mod control;
#[cfg(target_os = "espidf")]
pub mod http;
pub mod serial;
