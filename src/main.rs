//! Serial Wi-Fi bridge - firmware entry point
//!
//! 1. Bring up NVS, the system event loop and the Wi-Fi station (fatal on error)
//! 2. Register the association notification handler
//! 3. Run the serial command loop on its own thread

#[cfg(target_os = "espidf")]
mod firmware {
    use anyhow::{anyhow, Context, Result};
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use log::info;

    use serial_wifi_bridge::hal::{EspWirelessControl, UartPort};
    use serial_wifi_bridge::{
        subscribe_notifications, AssociationCell, BridgeConfig, Dispatcher, SerialReader,
    };

    /// Stack for the UART listener thread (holds the read chunk and line buffer).
    const UART_TASK_STACK: usize = 8192;

    static ASSOCIATION: AssociationCell = AssociationCell::new();

    pub fn main() -> Result<()> {
        // Initialize ESP-IDF
        esp_idf_svc::sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();

        let config = BridgeConfig::default();
        let peripherals = Peripherals::take().context("peripherals")?;
        let sysloop = EspSystemEventLoop::take().context("system event loop")?;
        let nvs = EspDefaultNvsPartition::take().context("NVS partition")?;

        let mut wifi = EspWirelessControl::start(peripherals.modem, sysloop, nvs)
            .context("wifi bring-up")?;
        let _subscription = subscribe_notifications(&mut wifi, &ASSOCIATION)
            .map_err(|e| anyhow!("wifi event subscription: {}", e))?;
        ASSOCIATION.mark_ready();
        info!("association state: {}", ASSOCIATION.state());

        // UART0 console pins
        #[cfg(feature = "esp32s3")]
        let (tx, rx) = (peripherals.pins.gpio43, peripherals.pins.gpio44);
        #[cfg(not(feature = "esp32s3"))]
        let (tx, rx) = (peripherals.pins.gpio1, peripherals.pins.gpio3);

        let mut port =
            UartPort::new(peripherals.uart0, tx, rx, &config).context("uart driver")?;
        let mut reader = SerialReader::new(Dispatcher::new(wifi, &ASSOCIATION), &config);

        let listener = std::thread::Builder::new()
            .name("uart_listener".into())
            .stack_size(UART_TASK_STACK)
            .spawn(move || reader.run(&mut port))
            .context("spawn uart listener")?;

        // Keeps `_subscription` alive for the lifetime of the firmware.
        listener
            .join()
            .map_err(|_| anyhow!("uart listener panicked"))
    }
}

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    firmware::main()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("bridge: this firmware runs on ESP-IDF targets only");
}
