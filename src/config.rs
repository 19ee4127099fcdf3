// ShotLog - Hardware & System Configuration
// Target: ESP32 DevKit (Xtensa) with an HC-SR04 ultrasonic ranger

// ---------------------------------------------------------------------------
// GPIO Pin Definitions
// ---------------------------------------------------------------------------
// main.rs picks the matching `pins.gpioNN` fields; change both together.
pub const PIN_TRIGGER: i32 = 13; // HC-SR04 TRIG (output)
pub const PIN_ECHO: i32 = 12;    // HC-SR04 ECHO (input, 5 V tolerant via divider)

// ---------------------------------------------------------------------------
// Ultrasonic Ranging
// ---------------------------------------------------------------------------
pub const TRIGGER_SETTLE_US: u32 = 2;          // Hold TRIG low before the pulse
pub const TRIGGER_PULSE_US: u32 = 10;          // TRIG high time
pub const ECHO_TIMEOUT_US: u32 = 30_000;       // Give up on the echo after 30 ms
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.0343;
pub const OUTLIER_MARGIN_CM: f32 = 100.0;      // Readings beyond baseline + margin are rejected

// ---------------------------------------------------------------------------
// Baseline Calibration
// ---------------------------------------------------------------------------
pub const NUM_BASELINE_READINGS: usize = 10;
pub const BASELINE_READING_INTERVAL_MS: u64 = 100;
pub const THRESHOLD_OFFSET_CM: f32 = 1.0;

// ---------------------------------------------------------------------------
// Detection & Loop Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const DEBOUNCE_MS: u64 = 500;
pub const LOOP_DELAY_MS: u64 = 50;
pub const SERIAL_POLL_INTERVAL_MS: u64 = 10;

// ---------------------------------------------------------------------------
// Storage (SPIFFS)
// ---------------------------------------------------------------------------
pub const SPIFFS_BASE_PATH: &str = "/spiffs";
pub const SPIFFS_MAX_FILES: usize = 5;
pub const LOG_PATH: &str = "/spiffs/shots.csv";

// ---------------------------------------------------------------------------
// Serial Console
// ---------------------------------------------------------------------------
pub const SERIAL_LINE_MAX: usize = 64;

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------
pub const HTTP_PORT: u16 = 80;
pub const HTTP_SNAPSHOT_WAIT_MS: u64 = 2000;
pub const GET_DATA_URI: &str = "/get_data";

/// Baked in at build time; Wi-Fi and HTTP stay off when no SSID is set.
pub const WIFI_SSID: Option<&str> = option_env!("SHOTLOG_WIFI_SSID");
pub const WIFI_PASSWORD: &str = match option_env!("SHOTLOG_WIFI_PASSWORD") {
    Some(password) => password,
    None => "",
};

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_SERIAL: usize = 4096;
