// ShotLog - Wi-Fi Station
//
// Blocking station-mode connect. Only needed for the HTTP log endpoint; the
// shot log is recorded whether or not this succeeds.

use anyhow::anyhow;
use esp_idf_hal::modem::Modem;
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};

pub fn connect(
    modem: impl Peripheral<P = Modem> + 'static,
    sysloop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
    ssid: &str,
    password: &str,
) -> anyhow::Result<BlockingWifi<EspWifi<'static>>> {
    let mut wifi = BlockingWifi::wrap(EspWifi::new(modem, sysloop.clone(), Some(nvs))?, sysloop)?;

    let auth_method = if password.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    };
    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: ssid.try_into().map_err(|_| anyhow!("SSID too long: {}", ssid))?,
        password: password
            .try_into()
            .map_err(|_| anyhow!("Wi-Fi password too long"))?,
        auth_method,
        ..Default::default()
    }))?;

    wifi.start()?;
    log::info!("Connecting to Wi-Fi '{}'", ssid);
    wifi.connect()?;
    wifi.wait_netif_up()?;

    let ip_info = wifi.wifi().sta_netif().get_ip_info()?;
    log::info!("Connected to Wi-Fi. IP Address: {}", ip_info.ip);

    Ok(wifi)
}
