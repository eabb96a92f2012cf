//! UART console port.
//!
//! # Hardware Setup
//!
//! ```text
//! ESP32 UART0 TX/RX ◀──────▶ USB-UART bridge ◀──▶ host terminal
//! ```
//!
//! 8 data bits, no parity, 1 stop bit, no flow control.

use esp_idf_svc::hal::delay::TickType;
use esp_idf_svc::hal::gpio::{AnyIOPin, InputPin, OutputPin};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, UartDriver, UART0};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::EspError;

use crate::config::BridgeConfig;
use crate::transport::{SerialPort, TransportError};

/// UART0 driven as the command channel.
pub struct UartPort<'d> {
    driver: UartDriver<'d>,
}

impl<'d> UartPort<'d> {
    /// Install the UART driver on the console pins.
    pub fn new(
        uart: impl Peripheral<P = UART0> + 'd,
        tx: impl Peripheral<P = impl OutputPin> + 'd,
        rx: impl Peripheral<P = impl InputPin> + 'd,
        config: &BridgeConfig,
    ) -> Result<Self, EspError> {
        let uart_config = uart::config::Config::default().baudrate(Hertz(config.baud_rate));

        let driver = UartDriver::new(
            uart,
            tx,
            rx,
            Option::<AnyIOPin>::None, // CTS
            Option::<AnyIOPin>::None, // RTS
            &uart_config,
        )?;

        Ok(Self { driver })
    }
}

impl SerialPort for UartPort<'_> {
    fn read(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, TransportError> {
        let ticks = TickType::new_millis(timeout_ms as u64).ticks();
        self.driver
            .read(buf, ticks)
            .map_err(|e| TransportError::Read { code: e.code() })
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let mut rest = bytes;
        while !rest.is_empty() {
            let n = self
                .driver
                .write(rest)
                .map_err(|e| TransportError::Write { code: e.code() })?;
            rest = &rest[n..];
        }
        Ok(())
    }
}
