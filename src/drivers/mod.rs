pub mod spiffs;
pub mod ultrasonic;
pub mod wifi;
