//! Process-wide wake configuration.
//!
//! FreeRTOS tasks on both cores may reconfigure wake sources, so each
//! coordinator call runs inside one critical section: the exclusion check
//! and the commit cannot be split by another caller.

use core::cell::RefCell;

use critical_section::Mutex;

use super::{Ext1Mode, WakeConfig};
use crate::error::Error;
use crate::power::{PowerDomain, PowerDomainDriver, PowerOption};
use crate::rtcio::{GpioId, Level};

/// A [`WakeConfig`] shared between execution contexts.
///
/// # Usage
///
/// ```ignore
/// static WAKE: SharedWakeConfig = SharedWakeConfig::new();
///
/// WAKE.set_touch_wake(true)?;
/// let cfg = WAKE.snapshot();
/// ```
pub struct SharedWakeConfig {
    inner: Mutex<RefCell<WakeConfig>>,
}

impl SharedWakeConfig {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(WakeConfig::new())),
        }
    }

    /// Run `f` on the configuration inside a critical section.
    pub fn with<R>(&self, f: impl FnOnce(&mut WakeConfig) -> R) -> R {
        critical_section::with(|cs| f(&mut *self.inner.borrow_ref_mut(cs)))
    }

    /// Copy of the current configuration.
    pub fn snapshot(&self) -> WakeConfig {
        critical_section::with(|cs| *self.inner.borrow_ref(cs))
    }

    /// Reset to the all-disabled configuration.
    pub fn reset(&self) {
        self.with(|cfg| *cfg = WakeConfig::new());
    }

    pub fn set_touch_wake(&self, enabled: bool) -> Result<(), Error> {
        self.with(|cfg| cfg.set_touch_wake(enabled))
    }

    pub fn set_ulp_wake(&self, enabled: bool) -> Result<(), Error> {
        self.with(|cfg| cfg.set_ulp_wake(enabled))
    }

    pub fn set_light_sleep_gpio_wake(&self, enabled: bool) -> Result<(), Error> {
        self.with(|cfg| cfg.set_light_sleep_gpio_wake(enabled))
    }

    pub fn set_light_sleep_uart_wake(&self, uart: Option<u8>) {
        self.with(|cfg| cfg.set_light_sleep_uart_wake(uart))
    }

    pub fn set_ext0_wake<P: GpioId>(&self, pin: Option<P>, level: Level) -> Result<(), Error> {
        self.with(|cfg| cfg.set_ext0_wake(pin, level))
    }

    pub fn set_ext1_wake<P: GpioId>(&self, pins: Option<&[P]>, mode: Ext1Mode) -> Result<(), Error> {
        self.with(|cfg| cfg.set_ext1_wake(pins, mode))
    }

    /// The driver call happens inside the same critical section as the
    /// ULP check and the flag update.
    pub fn set_power_domain_retention<D: PowerDomainDriver + ?Sized>(
        &self,
        driver: &mut D,
        domain: PowerDomain,
        option: PowerOption,
    ) -> Result<(), Error> {
        self.with(|cfg| cfg.set_power_domain_retention(driver, domain, option))
    }
}

impl Default for SharedWakeConfig {
    fn default() -> Self {
        Self::new()
    }
}
