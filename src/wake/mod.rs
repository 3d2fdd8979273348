//! Sleep wake-source coordination.
//!
//! [`WakeConfig`] holds the wake sources and power-domain flags that will
//! be armed before the next sleep. The hardware cannot drive some of them
//! at the same time, so every setter checks the pairwise exclusions below
//! before committing:
//!
//! ```text
//! touch  ──x── light-sleep GPIO      ulp  ──x── RTC periph forced on
//! ulp    ──x── light-sleep GPIO      ext1 ──x── light-sleep GPIO (non-empty)
//! touch  ──x── ext0 pin
//! ```
//!
//! A failed setter leaves the configuration exactly as it was.

pub mod shared;
pub mod sleep;

#[cfg(target_os = "espidf")]
pub mod esp;

pub use shared::SharedWakeConfig;
pub use sleep::{SleepControl, SleepKind};

#[cfg(target_os = "espidf")]
pub use esp::EspSleep;

use crate::error::Error;
use crate::power::{PowerDomain, PowerDomainDriver, PowerOption};
use crate::rtcio::{GpioId, Level, RtcPin};

/// ext1 trigger condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ext1Mode {
    /// Wake when every selected pin is low
    AllLow,
    /// Wake when any selected pin is high
    AnyHigh,
}

impl Ext1Mode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "all_low" | "low" | "0" => Some(Ext1Mode::AllLow),
            "any_high" | "high" | "1" => Some(Ext1Mode::AnyHigh),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ext1Mode::AllLow => "all_low",
            Ext1Mode::AnyHigh => "any_high",
        }
    }
}

/// Wake configuration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WakeConfig {
    wake_on_touch: bool,
    wake_on_ulp: bool,
    ls_wake_on_gpio: bool,
    ls_uart: Option<u8>,
    ext0_pin: Option<RtcPin>,
    ext0_level: Level,
    /// Bit n set = RTC index n selected
    ext1_pins: u32,
    ext1_mode: Ext1Mode,
    rtc_periph_force_on: bool,
}

impl WakeConfig {
    /// Everything disabled.
    pub const fn new() -> Self {
        Self {
            wake_on_touch: false,
            wake_on_ulp: false,
            ls_wake_on_gpio: false,
            ls_uart: None,
            ext0_pin: None,
            ext0_level: Level::Low,
            ext1_pins: 0,
            ext1_mode: Ext1Mode::AllLow,
            rtc_periph_force_on: false,
        }
    }

    /// Wake on touchpad.
    ///
    /// Conflicts with an ext0 pin and with light-sleep GPIO wake.
    pub fn set_touch_wake(&mut self, enabled: bool) -> Result<(), Error> {
        if self.ext0_pin.is_some() || self.ls_wake_on_gpio {
            log::warn!("touch wake: conflicts with ext0/light-sleep gpio");
            return Err(Error::ResourceConflict);
        }
        self.wake_on_touch = enabled;
        log::debug!("touch wake = {}", enabled);
        Ok(())
    }

    /// Wake on ULP co-processor.
    ///
    /// Conflicts with the RTC peripheral domain being forced on.
    pub fn set_ulp_wake(&mut self, enabled: bool) -> Result<(), Error> {
        if self.rtc_periph_force_on {
            log::warn!("ulp wake: RTC periph domain is forced on");
            return Err(Error::ResourceConflict);
        }
        self.wake_on_ulp = enabled;
        log::debug!("ulp wake = {}", enabled);
        Ok(())
    }

    /// Light-sleep wake on GPIO level.
    ///
    /// Conflicts with touch and ULP wake.
    pub fn set_light_sleep_gpio_wake(&mut self, enabled: bool) -> Result<(), Error> {
        if self.wake_on_touch || self.wake_on_ulp {
            log::warn!("light-sleep gpio wake: conflicts with touch/ulp");
            return Err(Error::ResourceConflict);
        }
        self.ls_wake_on_gpio = enabled;
        log::debug!("light-sleep gpio wake = {}", enabled);
        Ok(())
    }

    /// Light-sleep wake on UART activity. `None` disables it.
    pub fn set_light_sleep_uart_wake(&mut self, uart: Option<u8>) {
        self.ls_uart = uart;
        log::debug!("light-sleep uart wake = {:?}", uart);
    }

    /// Single-pin RTC wake (ext0). `None` clears the pin.
    pub fn set_ext0_wake<P: GpioId>(&mut self, pin: Option<P>, level: Level) -> Result<(), Error> {
        let pin = match pin {
            Some(p) => Some(RtcPin::from_gpio(p)?),
            None => None,
        };
        self.ext0_pin = pin;
        self.ext0_level = level;
        log::debug!("ext0 wake = {:?} on {}", pin.map(|p| p.gpio()), level.as_str());
        Ok(())
    }

    /// Multi-pin RTC wake (ext1). `None` keeps the current pin set.
    ///
    /// Every pin is validated before anything is committed.
    pub fn set_ext1_wake<P: GpioId>(&mut self, pins: Option<&[P]>, mode: Ext1Mode) -> Result<(), Error> {
        let mask = match pins {
            Some(pins) => {
                let mut mask = 0u32;
                for p in pins {
                    mask |= 1 << RtcPin::from_gpio(p)?.rtc();
                }
                mask
            }
            None => self.ext1_pins,
        };

        if mask != 0 && self.ls_wake_on_gpio {
            log::warn!("ext1 wake: conflicts with light-sleep gpio");
            return Err(Error::ResourceConflict);
        }

        self.ext1_pins = mask;
        self.ext1_mode = mode;
        log::debug!("ext1 wake = {:#07x} ({})", mask, mode.as_str());
        Ok(())
    }

    /// Configure sleep retention of a power domain.
    ///
    /// Forcing the RTC peripheral domain on conflicts with ULP wake; in
    /// that case the driver is not called. The forced-on flag only follows
    /// a successful driver call.
    pub fn set_power_domain_retention<D: PowerDomainDriver + ?Sized>(
        &mut self,
        driver: &mut D,
        domain: PowerDomain,
        option: PowerOption,
    ) -> Result<(), Error> {
        if domain == PowerDomain::RtcPeriph && option == PowerOption::On && self.wake_on_ulp {
            log::warn!("power domain {}: conflicts with ulp wake", domain.as_str());
            return Err(Error::ResourceConflict);
        }

        driver
            .configure(domain, option)
            .map_err(Error::InvalidArgument)?;

        if domain == PowerDomain::RtcPeriph {
            self.rtc_periph_force_on = option == PowerOption::On;
        }
        log::debug!("power domain {} = {}", domain.as_str(), option.as_str());
        Ok(())
    }

    pub fn wake_on_touch(&self) -> bool {
        self.wake_on_touch
    }

    pub fn wake_on_ulp(&self) -> bool {
        self.wake_on_ulp
    }

    pub fn light_sleep_gpio_wake(&self) -> bool {
        self.ls_wake_on_gpio
    }

    pub fn light_sleep_uart_wake(&self) -> Option<u8> {
        self.ls_uart
    }

    pub fn ext0_pin(&self) -> Option<RtcPin> {
        self.ext0_pin
    }

    pub fn ext0_level(&self) -> Level {
        self.ext0_level
    }

    /// ext1 pin set, one bit per RTC index.
    pub fn ext1_mask(&self) -> u32 {
        self.ext1_pins
    }

    pub fn ext1_mode(&self) -> Ext1Mode {
        self.ext1_mode
    }

    /// ext1 pins in RTC index order.
    pub fn ext1_pins(&self) -> impl Iterator<Item = RtcPin> + '_ {
        (0..32u8)
            .filter(move |i| self.ext1_pins & (1 << i) != 0)
            .filter_map(RtcPin::from_rtc_index)
    }

    /// ext1 pin set as the GPIO bitmask `esp_sleep_enable_ext1_wakeup` wants.
    pub fn ext1_gpio_mask(&self) -> u64 {
        self.ext1_pins().fold(0u64, |m, p| m | (1u64 << p.gpio()))
    }

    pub fn rtc_periph_force_on(&self) -> bool {
        self.rtc_periph_force_on
    }
}

impl Default for WakeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_off() {
        let cfg = WakeConfig::new();
        assert!(!cfg.wake_on_touch());
        assert!(!cfg.wake_on_ulp());
        assert!(!cfg.light_sleep_gpio_wake());
        assert_eq!(cfg.light_sleep_uart_wake(), None);
        assert_eq!(cfg.ext0_pin(), None);
        assert_eq!(cfg.ext1_mask(), 0);
        assert!(!cfg.rtc_periph_force_on());
    }

    #[test]
    fn test_ext1_gpio_mask_uses_gpio_numbers() {
        let mut cfg = WakeConfig::new();
        // GPIO32 is RTC 9, GPIO4 is RTC 10
        cfg.set_ext1_wake(Some(&[32u8, 4][..]), Ext1Mode::AnyHigh).unwrap();
        assert_eq!(cfg.ext1_mask(), (1 << 9) | (1 << 10));
        assert_eq!(cfg.ext1_gpio_mask(), (1u64 << 32) | (1u64 << 4));
    }
}
