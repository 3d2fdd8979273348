//! `RtcGpio` over the ESP-IDF `rtc_gpio_*` driver.

use esp_idf_svc::sys::*;

use super::driver::{DriveCap, Level, RtcGpio, RtcGpioMode};
use crate::error::DriverError;

/// ESP-IDF RTC IO driver.
///
/// The SDK has no getters for hold and pull resistors, so those are
/// reported from masks updated on every successful set through this driver.
#[derive(Debug, Default)]
pub struct EspRtcGpio {
    held: u64,
    pullup: u64,
    pulldown: u64,
}

impl EspRtcGpio {
    pub const fn new() -> Self {
        Self { held: 0, pullup: 0, pulldown: 0 }
    }
}

fn bit(gpio: u8) -> u64 {
    1u64 << (gpio & 63)
}

fn update(mask: &mut u64, gpio: u8, set: bool) {
    if set {
        *mask |= bit(gpio);
    } else {
        *mask &= !bit(gpio);
    }
}

fn check(err: esp_err_t) -> Result<(), DriverError> {
    esp!(err).map_err(DriverError::from)
}

fn valid(gpio: u8) -> Result<(), DriverError> {
    if unsafe { rtc_gpio_is_valid_gpio(gpio as gpio_num_t) } {
        Ok(())
    } else {
        Err(DriverError::INVALID_ARG)
    }
}

impl RtcGpio for EspRtcGpio {
    fn init(&mut self, gpio: u8) -> Result<(), DriverError> {
        check(unsafe { rtc_gpio_init(gpio as gpio_num_t) })
    }

    fn deinit(&mut self, gpio: u8) -> Result<(), DriverError> {
        check(unsafe { rtc_gpio_deinit(gpio as gpio_num_t) })
    }

    fn level(&mut self, gpio: u8) -> Result<bool, DriverError> {
        let value = unsafe { rtc_gpio_get_level(gpio as gpio_num_t) };
        // Non-RTC pins report ESP_ERR_INVALID_ARG in-band
        if value == ESP_ERR_INVALID_ARG as u32 {
            return Err(DriverError::INVALID_ARG);
        }
        Ok(value != 0)
    }

    fn set_level(&mut self, gpio: u8, high: bool) -> Result<(), DriverError> {
        check(unsafe { rtc_gpio_set_level(gpio as gpio_num_t, high as u32) })
    }

    fn is_held(&mut self, gpio: u8) -> Result<bool, DriverError> {
        valid(gpio)?;
        Ok(self.held & bit(gpio) != 0)
    }

    fn set_hold(&mut self, gpio: u8, hold: bool) -> Result<(), DriverError> {
        if hold {
            check(unsafe { rtc_gpio_hold_en(gpio as gpio_num_t) })?;
        } else {
            check(unsafe { rtc_gpio_hold_dis(gpio as gpio_num_t) })?;
        }
        update(&mut self.held, gpio, hold);
        Ok(())
    }

    fn drive_capability(&mut self, gpio: u8) -> Result<DriveCap, DriverError> {
        let mut raw: gpio_drive_cap_t = 0;
        check(unsafe { rtc_gpio_get_drive_capability(gpio as gpio_num_t, &mut raw) })?;
        DriveCap::from_raw(raw as u32).ok_or(DriverError(ESP_FAIL))
    }

    fn set_drive_capability(&mut self, gpio: u8, cap: DriveCap) -> Result<(), DriverError> {
        check(unsafe { rtc_gpio_set_drive_capability(gpio as gpio_num_t, cap as gpio_drive_cap_t) })
    }

    fn set_direction(&mut self, gpio: u8, mode: RtcGpioMode) -> Result<(), DriverError> {
        check(unsafe { rtc_gpio_set_direction(gpio as gpio_num_t, mode as rtc_gpio_mode_t) })
    }

    fn wakeup_enable(&mut self, gpio: u8, level: Level) -> Result<(), DriverError> {
        let intr = match level {
            Level::Low => gpio_int_type_t_GPIO_INTR_LOW_LEVEL,
            Level::High => gpio_int_type_t_GPIO_INTR_HIGH_LEVEL,
        };
        check(unsafe { rtc_gpio_wakeup_enable(gpio as gpio_num_t, intr) })
    }

    fn wakeup_disable(&mut self, gpio: u8) -> Result<(), DriverError> {
        check(unsafe { rtc_gpio_wakeup_disable(gpio as gpio_num_t) })
    }

    fn is_pullup(&mut self, gpio: u8) -> Result<bool, DriverError> {
        valid(gpio)?;
        Ok(self.pullup & bit(gpio) != 0)
    }

    fn set_pullup(&mut self, gpio: u8, enable: bool) -> Result<(), DriverError> {
        if enable {
            check(unsafe { rtc_gpio_pullup_en(gpio as gpio_num_t) })?;
        } else {
            check(unsafe { rtc_gpio_pullup_dis(gpio as gpio_num_t) })?;
        }
        update(&mut self.pullup, gpio, enable);
        Ok(())
    }

    fn is_pulldown(&mut self, gpio: u8) -> Result<bool, DriverError> {
        valid(gpio)?;
        Ok(self.pulldown & bit(gpio) != 0)
    }

    fn set_pulldown(&mut self, gpio: u8, enable: bool) -> Result<(), DriverError> {
        if enable {
            check(unsafe { rtc_gpio_pulldown_en(gpio as gpio_num_t) })?;
        } else {
            check(unsafe { rtc_gpio_pulldown_dis(gpio as gpio_num_t) })?;
        }
        update(&mut self.pulldown, gpio, enable);
        Ok(())
    }

    fn isolate(&mut self, gpio: u8) -> Result<(), DriverError> {
        check(unsafe { rtc_gpio_isolate(gpio as gpio_num_t) })?;
        update(&mut self.pullup, gpio, false);
        update(&mut self.pulldown, gpio, false);
        update(&mut self.held, gpio, true);
        Ok(())
    }

    fn force_hold_disable_all(&mut self) -> Result<(), DriverError> {
        check(unsafe { rtc_gpio_force_hold_dis_all() })?;
        self.held = 0;
        Ok(())
    }
}
