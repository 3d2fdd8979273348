//! `SleepControl` over the ESP-IDF `esp_sleep_*` API.

use core::sync::atomic::Ordering;

use esp_idf_svc::sys::*;

use super::{Ext1Mode, SleepControl, SleepKind};
use crate::config::CONFIG;
use crate::error::DriverError;
use crate::rtcio::Level;

/// ESP-IDF sleep driver.
#[derive(Debug, Default)]
pub struct EspSleep;

fn check(err: esp_err_t) -> Result<(), DriverError> {
    esp!(err).map_err(DriverError::from)
}

impl SleepControl for EspSleep {
    fn disable_all(&mut self) -> Result<(), DriverError> {
        check(unsafe { esp_sleep_disable_wakeup_source(esp_sleep_source_t_ESP_SLEEP_WAKEUP_ALL) })
    }

    fn enable_touchpad(&mut self) -> Result<(), DriverError> {
        check(unsafe { esp_sleep_enable_touchpad_wakeup() })
    }

    fn enable_ulp(&mut self) -> Result<(), DriverError> {
        check(unsafe { esp_sleep_enable_ulp_wakeup() })
    }

    fn enable_ext0(&mut self, gpio: u8, level: Level) -> Result<(), DriverError> {
        let level = match level {
            Level::Low => 0,
            Level::High => 1,
        };
        check(unsafe { esp_sleep_enable_ext0_wakeup(gpio as gpio_num_t, level) })
    }

    fn enable_ext1(&mut self, gpio_mask: u64, mode: Ext1Mode) -> Result<(), DriverError> {
        let mode = match mode {
            Ext1Mode::AllLow => esp_sleep_ext1_wakeup_mode_t_ESP_EXT1_WAKEUP_ALL_LOW,
            Ext1Mode::AnyHigh => esp_sleep_ext1_wakeup_mode_t_ESP_EXT1_WAKEUP_ANY_HIGH,
        };
        check(unsafe { esp_sleep_enable_ext1_wakeup(gpio_mask, mode) })
    }

    fn enable_gpio(&mut self) -> Result<(), DriverError> {
        check(unsafe { esp_sleep_enable_gpio_wakeup() })
    }

    fn enable_uart(&mut self, uart: u8) -> Result<(), DriverError> {
        let threshold = CONFIG.uart_wake_threshold.load(Ordering::Relaxed);
        check(unsafe { uart_set_wakeup_threshold(uart as uart_port_t, threshold as i32) })?;
        check(unsafe { esp_sleep_enable_uart_wakeup(uart as i32) })
    }

    #[allow(unreachable_code)]
    fn enter(&mut self, kind: SleepKind) -> Result<(), DriverError> {
        match kind {
            SleepKind::Light => check(unsafe { esp_light_sleep_start() }),
            SleepKind::Deep => {
                unsafe { esp_deep_sleep_start() };
                // Only reached when the SDK rejected deep sleep
                Err(DriverError(ESP_FAIL))
            }
        }
    }
}
