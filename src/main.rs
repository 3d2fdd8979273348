//! rtcwake - Main entry point
//!
//! 1. Initialize logging and load runtime parameters from NVS
//! 2. Install the UART0 driver for the console
//! 3. Loop: move received bytes into the stdin ring, run the console

#![cfg_attr(target_os = "espidf", no_std)]
#![cfg_attr(target_os = "espidf", no_main)]

#[cfg(target_os = "espidf")]
mod firmware {
    use core::fmt;
    use core::ptr;

    use esp_idf_svc::log::EspLogger;
    use esp_idf_svc::sys as esp_idf_sys;

    use esp32_rtc_wake::config::{load_from_nvs, LoadResult, CONFIG};
    use esp32_rtc_wake::console::{Console, Session};
    use esp32_rtc_wake::power::EspPowerDomains;
    use esp32_rtc_wake::rtcio::EspRtcGpio;
    use esp32_rtc_wake::uart0::{Uart0, STDIN_RING};
    use esp32_rtc_wake::wake::{EspSleep, SharedWakeConfig};

    const CONSOLE_UART: esp_idf_sys::uart_port_t = 0;
    const UART_RX_BUF: i32 = 256;
    /// Read timeout per loop iteration (ticks)
    const RX_TIMEOUT_TICKS: u32 = 10;

    static WAKE: SharedWakeConfig = SharedWakeConfig::new();

    /// Console output straight to the UART0 driver.
    struct UartOut;

    impl fmt::Write for UartOut {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let written = unsafe {
                esp_idf_sys::uart_write_bytes(CONSOLE_UART, s.as_ptr().cast(), s.len())
            };
            if written < 0 {
                Err(fmt::Error)
            } else {
                Ok(())
            }
        }
    }

    fn install_console_uart() -> Result<(), esp_idf_sys::EspError> {
        esp_idf_sys::esp!(unsafe {
            esp_idf_sys::uart_driver_install(CONSOLE_UART, UART_RX_BUF, 0, 0, ptr::null_mut(), 0)
        })
    }

    /// Move whatever the UART driver has buffered into the stdin ring.
    fn pump_rx() {
        let mut buf = [0u8; 64];
        let n = unsafe {
            esp_idf_sys::uart_read_bytes(
                CONSOLE_UART,
                buf.as_mut_ptr().cast(),
                buf.len() as u32,
                RX_TIMEOUT_TICKS,
            )
        };
        if n > 0 {
            let n = n as usize;
            if STDIN_RING.push_slice(&buf[..n]) < n {
                log::warn!("stdin ring full, {} bytes dropped total", STDIN_RING.dropped());
            }
        }
    }

    pub fn run() {
        esp_idf_sys::link_patches();
        EspLogger::initialize_default();

        match load_from_nvs() {
            Ok(LoadResult::Loaded) => log::info!("parameters loaded from NVS"),
            Ok(LoadResult::FreshInstall) => log::info!("no stored parameters, using defaults"),
            Err(e) => log::warn!("NVS load failed: {:?}", e),
        }
        CONFIG.apply_log_level();

        if let Err(e) = install_console_uart() {
            log::error!("UART0 driver install failed: {}", e);
            return;
        }

        let mut power = EspPowerDomains;
        let mut rtcio = EspRtcGpio::new();
        let mut sleep = EspSleep;
        let mut session = Session {
            wake: &WAKE,
            power: &mut power,
            rtcio: &mut rtcio,
            sleep: &mut sleep,
        };

        let uart = Uart0::take();
        let mut out = UartOut;
        let mut console = Console::new();
        console.print_banner(&mut out);

        loop {
            pump_rx();
            console.poll(&uart, &mut session, &mut out);
        }
    }
}

#[cfg(target_os = "espidf")]
#[no_mangle]
fn main() {
    firmware::run();
}

#[cfg(not(target_os = "espidf"))]
fn main() {}
