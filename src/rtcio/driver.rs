//! RTC IO driver seam.

use crate::error::DriverError;

/// Pin level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "low" | "0" => Some(Level::Low),
            "high" | "1" => Some(Level::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::High => "high",
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// Pad drive strength (`gpio_drive_cap_t`).
//
// Value must correspond to the SDK enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DriveCap {
    Weak = 0,
    Stronger = 1,
    Default = 2,
    Strongest = 3,
}

impl DriveCap {
    /// Convert from raw SDK value.
    pub fn from_raw(value: u32) -> Option<Self> {
        match value {
            0 => Some(DriveCap::Weak),
            1 => Some(DriveCap::Stronger),
            2 => Some(DriveCap::Default),
            3 => Some(DriveCap::Strongest),
            _ => None,
        }
    }
}

/// RTC IO direction (`rtc_gpio_mode_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RtcGpioMode {
    InputOnly = 0,
    OutputOnly = 1,
    InputOutput = 2,
    Disabled = 3,
}

/// RTC IO operations on a GPIO number.
///
/// Implementations return the raw SDK error; [`RtcPin`](super::RtcPin)
/// translates it.
pub trait RtcGpio {
    fn init(&mut self, gpio: u8) -> Result<(), DriverError>;
    fn deinit(&mut self, gpio: u8) -> Result<(), DriverError>;

    fn level(&mut self, gpio: u8) -> Result<bool, DriverError>;
    fn set_level(&mut self, gpio: u8, high: bool) -> Result<(), DriverError>;

    fn is_held(&mut self, gpio: u8) -> Result<bool, DriverError>;
    fn set_hold(&mut self, gpio: u8, hold: bool) -> Result<(), DriverError>;

    fn drive_capability(&mut self, gpio: u8) -> Result<DriveCap, DriverError>;
    fn set_drive_capability(&mut self, gpio: u8, cap: DriveCap) -> Result<(), DriverError>;

    fn set_direction(&mut self, gpio: u8, mode: RtcGpioMode) -> Result<(), DriverError>;

    fn wakeup_enable(&mut self, gpio: u8, level: Level) -> Result<(), DriverError>;
    fn wakeup_disable(&mut self, gpio: u8) -> Result<(), DriverError>;

    fn is_pullup(&mut self, gpio: u8) -> Result<bool, DriverError>;
    fn set_pullup(&mut self, gpio: u8, enable: bool) -> Result<(), DriverError>;
    fn is_pulldown(&mut self, gpio: u8) -> Result<bool, DriverError>;
    fn set_pulldown(&mut self, gpio: u8, enable: bool) -> Result<(), DriverError>;

    fn isolate(&mut self, gpio: u8) -> Result<(), DriverError>;
    fn force_hold_disable_all(&mut self) -> Result<(), DriverError>;
}
