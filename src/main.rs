// ShotLog - Firmware Entry Point
//
// Boot sequence:
//   1. Mount SPIFFS (the shot log lives at `LOG_PATH`).
//   2. Join Wi-Fi and start the `/get_data` HTTP endpoint, if an SSID was
//      configured at build time.
//   3. Spawn the serial console task (RESET command).
//   4. Calibrate the baseline distance and enter the control loop.
//
// Failures in steps 1-3 are logged and the loop runs anyway.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::sync::mpsc;
    use std::thread;

    use esp_idf_hal::gpio::{InputPin, OutputPin, PinDriver};
    use esp_idf_hal::prelude::*;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;

    use shotlog::clock::EspClock;
    use shotlog::config::*;
    use shotlog::drivers::{spiffs, ultrasonic::Hcsr04, wifi};
    use shotlog::event_log::EventLog;
    use shotlog::tasks;
    use shotlog::tasks::control::ControlLoop;

    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("ShotLog firmware starting");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // ---- Storage ----------------------------------------------------------
    if let Err(e) = spiffs::mount(SPIFFS_BASE_PATH, SPIFFS_MAX_FILES) {
        log::error!("An error occurred while mounting SPIFFS: {}", e);
    }

    // ---- Channels ---------------------------------------------------------
    let (command_tx, command_rx) = mpsc::channel();
    let (snapshot_tx, snapshot_rx) = mpsc::channel();

    // ---- Network (optional) -----------------------------------------------
    // Both handles must stay alive for as long as the endpoint is served.
    let mut _wifi = None;
    let mut _server = None;
    match WIFI_SSID.filter(|ssid| !ssid.is_empty()) {
        Some(ssid) => match wifi::connect(peripherals.modem, sysloop, nvs, ssid, WIFI_PASSWORD) {
            Ok(connected) => {
                _wifi = Some(connected);
                match tasks::http::start_server(snapshot_tx) {
                    Ok(server) => _server = Some(server),
                    Err(e) => log::error!("HTTP server failed to start: {}", e),
                }
            }
            Err(e) => log::error!("Wi-Fi connection failed: {}", e),
        },
        None => log::info!("No Wi-Fi SSID configured - HTTP endpoint disabled"),
    }

    // ---- Serial console ---------------------------------------------------
    thread::Builder::new()
        .name("serial".into())
        .stack_size(STACK_SERIAL)
        .spawn(move || {
            tasks::serial::serial_task(command_tx);
        })?;

    // ---- Sensor + control loop --------------------------------------------
    // Keep in step with PIN_TRIGGER / PIN_ECHO in config.rs.
    let trigger = PinDriver::output(peripherals.pins.gpio13.downgrade_output())?;
    let echo = PinDriver::input(peripherals.pins.gpio12.downgrade_input())?;
    let sensor = Hcsr04::new(trigger, echo)?;

    let control = ControlLoop::start(
        sensor,
        EspClock,
        EventLog::new(LOG_PATH),
        command_rx,
        snapshot_rx,
    );
    control.run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("shotlog is ESP32 firmware: build with --target xtensa-esp32-espidf (see .cargo/config.toml)");
}
