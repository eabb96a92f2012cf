//! Wi-Fi station over `esp-idf-svc`.
//!
//! Scan uses the driver's blocking scan. Connect only calls
//! `esp_wifi_connect`; the outcome comes back through the system event loop
//! as `StaConnected` / `StaDisconnected`.

use esp_idf_svc::eventloop::{EspSubscription, EspSystemEventLoop, System};
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sys::EspError;
use esp_idf_svc::wifi::config::ScanConfig;
use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi, WifiEvent};
use log::info;

use crate::config::MAX_SCAN_RECORDS;
use crate::wireless::{
    AccessPointRecord, LinkClassifier, ScanResultSet, WirelessControl, WirelessError,
    WirelessEvent,
};

impl From<EspError> for WirelessError {
    fn from(e: EspError) -> Self {
        WirelessError::Driver { code: e.code() }
    }
}

/// Station-mode Wi-Fi driver.
pub struct EspWirelessControl {
    wifi: EspWifi<'static>,
    sysloop: EspSystemEventLoop,
}

impl EspWirelessControl {
    /// Bring the radio up in station mode with an empty configuration.
    ///
    /// Creates the default station netif, which also starts the TCP/IP stack.
    pub fn start(
        modem: impl Peripheral<P = Modem> + 'static,
        sysloop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
    ) -> Result<Self, EspError> {
        let mut wifi = EspWifi::new(modem, sysloop.clone(), Some(nvs))?;
        wifi.set_configuration(&Configuration::Client(ClientConfiguration::default()))?;
        wifi.start()?;
        info!("wifi started in station mode");

        Ok(Self { wifi, sysloop })
    }
}

impl WirelessControl for EspWirelessControl {
    type Subscription = EspSubscription<'static, System>;

    fn scan(&mut self) -> Result<ScanResultSet, WirelessError> {
        let scan_config = ScanConfig {
            show_hidden: true,
            ..Default::default()
        };
        self.wifi.start_scan(&scan_config, true)?;

        let (aps, total) = self.wifi.get_scan_result_n::<MAX_SCAN_RECORDS>()?;

        let mut set = ScanResultSet::new();
        for ap in aps {
            set.push(AccessPointRecord {
                ssid: ap.ssid.clone(),
                rssi: ap.signal_strength,
                channel: ap.channel,
            });
        }
        set.total = set.total.max(total);
        Ok(set)
    }

    fn connect(&mut self, ssid: &str, credential: &str) -> Result<(), WirelessError> {
        let client = ClientConfiguration {
            ssid: ssid.try_into().map_err(|_| WirelessError::InvalidConfig)?,
            password: credential
                .try_into()
                .map_err(|_| WirelessError::InvalidConfig)?,
            auth_method: AuthMethod::WPA2Personal,
            ..Default::default()
        };

        self.wifi.set_configuration(&Configuration::Client(client))?;
        self.wifi.connect()?;
        Ok(())
    }

    fn subscribe<F>(&mut self, mut handler: F) -> Result<Self::Subscription, WirelessError>
    where
        F: FnMut(WirelessEvent) + Send + 'static,
    {
        let mut link = LinkClassifier::new();

        let subscription = self.sysloop.subscribe::<WifiEvent, _>(move |event| match event {
            WifiEvent::StaConnected(_) => handler(link.link_up()),
            WifiEvent::StaDisconnected(_) => handler(link.link_down()),
            _ => {}
        })?;

        Ok(subscription)
    }
}
