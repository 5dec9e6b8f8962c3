//! Network bring-up: Wi-Fi station on the default event loop.
//!
//! External collaborator of the relay. Any failure here is fatal.

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::info;

use crate::platform::StartupError;

/// Connect to `ssid` and block until the interface has an address.
///
/// The returned driver must stay alive for the connection to persist.
pub fn connect_wifi(
    modem: Modem,
    sysloop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
    ssid: &str,
    password: &str,
) -> Result<BlockingWifi<EspWifi<'static>>, StartupError> {
    if ssid.is_empty() {
        return Err(StartupError::Config("WIFI_SSID not set at build time"));
    }

    let mut wifi = BlockingWifi::wrap(EspWifi::new(modem, sysloop.clone(), Some(nvs))?, sysloop)?;

    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: ssid
            .try_into()
            .map_err(|_| StartupError::Config("WIFI_SSID too long"))?,
        password: password
            .try_into()
            .map_err(|_| StartupError::Config("WIFI_PASS too long"))?,
        auth_method: if password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        },
        ..Default::default()
    }))?;

    wifi.start()?;
    info!("Wi-Fi started, connecting to {}", ssid);

    wifi.connect()?;
    wifi.wait_netif_up()?;

    let ip_info = wifi.wifi().sta_netif().get_ip_info()?;
    info!("Wi-Fi connected, IP {}", ip_info.ip);

    Ok(wifi)
}
