//! Arming the committed wake sources before sleep.

use super::{Ext1Mode, WakeConfig};
use crate::error::{DriverError, Error};
use crate::rtcio::Level;

/// Sleep flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepKind {
    /// CPU clock-gated, RAM retained, execution resumes after the call
    Light,
    /// Only the RTC domain stays up, wake is a reset
    Deep,
}

/// Wake-source controls of the sleep subsystem.
pub trait SleepControl {
    /// Drop every previously enabled wake source.
    fn disable_all(&mut self) -> Result<(), DriverError>;
    fn enable_touchpad(&mut self) -> Result<(), DriverError>;
    fn enable_ulp(&mut self) -> Result<(), DriverError>;
    fn enable_ext0(&mut self, gpio: u8, level: Level) -> Result<(), DriverError>;
    /// `gpio_mask` has one bit per GPIO number.
    fn enable_ext1(&mut self, gpio_mask: u64, mode: Ext1Mode) -> Result<(), DriverError>;
    /// Light sleep only.
    fn enable_gpio(&mut self) -> Result<(), DriverError>;
    /// Light sleep only.
    fn enable_uart(&mut self, uart: u8) -> Result<(), DriverError>;
    /// Enter sleep. Returns after wake for light sleep; for deep sleep it
    /// only returns if the sleep was rejected.
    fn enter(&mut self, kind: SleepKind) -> Result<(), DriverError>;
}

impl WakeConfig {
    /// Program the sleep subsystem with this configuration.
    pub fn arm<S: SleepControl + ?Sized>(&self, kind: SleepKind, ctl: &mut S) -> Result<(), Error> {
        ctl.disable_all().map_err(Error::Driver)?;

        if self.wake_on_touch() {
            ctl.enable_touchpad().map_err(Error::Driver)?;
        }
        if self.wake_on_ulp() {
            ctl.enable_ulp().map_err(Error::Driver)?;
        }
        if let Some(pin) = self.ext0_pin() {
            ctl.enable_ext0(pin.gpio(), self.ext0_level()).map_err(Error::Driver)?;
        }
        if self.ext1_mask() != 0 {
            ctl.enable_ext1(self.ext1_gpio_mask(), self.ext1_mode())
                .map_err(Error::Driver)?;
        }

        if kind == SleepKind::Light {
            if self.light_sleep_gpio_wake() {
                ctl.enable_gpio().map_err(Error::Driver)?;
            }
            if let Some(uart) = self.light_sleep_uart_wake() {
                ctl.enable_uart(uart).map_err(Error::Driver)?;
            }
        }

        log::info!(
            "armed {:?} sleep: touch={} ulp={} ext0={:?} ext1={:#07x}",
            kind,
            self.wake_on_touch(),
            self.wake_on_ulp(),
            self.ext0_pin().map(|p| p.gpio()),
            self.ext1_mask()
        );
        Ok(())
    }

    /// Arm, then sleep.
    pub fn sleep<S: SleepControl + ?Sized>(&self, kind: SleepKind, ctl: &mut S) -> Result<(), Error> {
        self.arm(kind, ctl)?;
        ctl.enter(kind).map_err(Error::Driver)
    }
}
