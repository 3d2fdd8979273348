//! RTC-domain GPIO.
//!
//! The ESP32 routes 18 of its GPIOs through the RTC mux, which stays
//! alive during sleep. Each of those pins has a second number, its RTC
//! index, used by the RTC IO registers and by the ext1 wake mask.
//!
//! [`RTC_PINS`] is the fixed mapping. [`RtcPin`] is a validated handle
//! whose control operations forward to an [`RtcGpio`] driver.

pub mod driver;

#[cfg(target_os = "espidf")]
pub mod esp;

pub use driver::{DriveCap, Level, RtcGpio, RtcGpioMode};

#[cfg(target_os = "espidf")]
pub use esp::EspRtcGpio;

use crate::error::Error;

/// A GPIO that is routed through the RTC mux.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtcPin {
    gpio: u8,
    rtc: u8,
}

/// Number of RTC-capable pins.
pub const RTC_PIN_COUNT: usize = 18;

/// GPIO number to RTC index, in RTC mux table order.
///
/// Bit `n` of an ext1 wake mask refers to the entry whose RTC index is `n`.
pub const RTC_PINS: [RtcPin; RTC_PIN_COUNT] = [
    RtcPin::new(36, 0),
    RtcPin::new(37, 1),
    RtcPin::new(38, 2),
    RtcPin::new(39, 3),
    RtcPin::new(34, 4),
    RtcPin::new(35, 5),
    RtcPin::new(32, 9),
    RtcPin::new(33, 8),
    RtcPin::new(25, 6),
    RtcPin::new(26, 7),
    RtcPin::new(27, 17),
    RtcPin::new(14, 16),
    RtcPin::new(12, 15),
    RtcPin::new(13, 14),
    RtcPin::new(15, 13),
    RtcPin::new(2, 12),
    RtcPin::new(0, 11),
    RtcPin::new(4, 10),
];

/// Resolves an opaque pin handle to its GPIO number.
///
/// Returns `None` when the handle does not name a GPIO.
pub trait GpioId {
    fn gpio_num(&self) -> Option<u8>;
}

impl GpioId for u8 {
    fn gpio_num(&self) -> Option<u8> {
        Some(*self)
    }
}

impl GpioId for i32 {
    fn gpio_num(&self) -> Option<u8> {
        u8::try_from(*self).ok()
    }
}

impl GpioId for RtcPin {
    fn gpio_num(&self) -> Option<u8> {
        Some(self.gpio)
    }
}

impl<T: GpioId + ?Sized> GpioId for &T {
    fn gpio_num(&self) -> Option<u8> {
        (**self).gpio_num()
    }
}

#[cfg(target_os = "espidf")]
impl GpioId for esp_idf_svc::hal::gpio::AnyIOPin {
    fn gpio_num(&self) -> Option<u8> {
        use esp_idf_svc::hal::gpio::Pin;
        u8::try_from(self.pin()).ok()
    }
}

/// Look up the RTC index of a GPIO.
pub fn lookup_rtc_pin(gpio: u8) -> Result<u8, Error> {
    RtcPin::from_gpio(gpio).map(|p| p.rtc())
}

impl RtcPin {
    const fn new(gpio: u8, rtc: u8) -> Self {
        Self { gpio, rtc }
    }

    /// Resolve a pin handle and find its RTC table entry.
    pub fn from_gpio(pin: impl GpioId) -> Result<Self, Error> {
        let gpio = pin.gpio_num().ok_or(Error::InvalidPin)?;
        RTC_PINS
            .iter()
            .find(|p| p.gpio == gpio)
            .copied()
            .ok_or(Error::InvalidPin)
    }

    /// Find the table entry for an RTC index.
    pub fn from_rtc_index(rtc: u8) -> Option<Self> {
        RTC_PINS.iter().find(|p| p.rtc == rtc).copied()
    }

    /// GPIO number.
    pub fn gpio(&self) -> u8 {
        self.gpio
    }

    /// RTC mux index.
    pub fn rtc(&self) -> u8 {
        self.rtc
    }

    /// `(gpio, rtc)` pair.
    pub fn pin_num(&self) -> (u8, u8) {
        (self.gpio, self.rtc)
    }

    /// Route the pin through the RTC mux (`true`) or hand it back to
    /// the digital GPIO matrix (`false`).
    pub fn set_active<D: RtcGpio + ?Sized>(&self, io: &mut D, active: bool) -> Result<(), Error> {
        let res = if active { io.init(self.gpio) } else { io.deinit(self.gpio) };
        res.map_err(Error::from_rtcio)
    }

    /// Read the input level.
    pub fn value<D: RtcGpio + ?Sized>(&self, io: &mut D) -> Result<bool, Error> {
        io.level(self.gpio).map_err(Error::from_rtcio)
    }

    /// Drive the output level.
    pub fn set_value<D: RtcGpio + ?Sized>(&self, io: &mut D, high: bool) -> Result<(), Error> {
        io.set_level(self.gpio, high).map_err(Error::from_rtcio)
    }

    pub fn hold<D: RtcGpio + ?Sized>(&self, io: &mut D) -> Result<bool, Error> {
        io.is_held(self.gpio).map_err(Error::from_rtcio)
    }

    /// Latch the pad state so it survives deep sleep.
    pub fn set_hold<D: RtcGpio + ?Sized>(&self, io: &mut D, hold: bool) -> Result<(), Error> {
        io.set_hold(self.gpio, hold).map_err(Error::from_rtcio)
    }

    pub fn drive<D: RtcGpio + ?Sized>(&self, io: &mut D) -> Result<DriveCap, Error> {
        io.drive_capability(self.gpio).map_err(Error::from_rtcio)
    }

    pub fn set_drive<D: RtcGpio + ?Sized>(&self, io: &mut D, cap: DriveCap) -> Result<(), Error> {
        io.set_drive_capability(self.gpio, cap).map_err(Error::from_rtcio)
    }

    /// Set the RTC IO direction. Reading it back is not supported by the SDK.
    pub fn set_direction<D: RtcGpio + ?Sized>(&self, io: &mut D, mode: RtcGpioMode) -> Result<(), Error> {
        io.set_direction(self.gpio, mode).map_err(Error::from_rtcio)
    }

    /// Enable light-sleep wake on `level`, or disable it with `None`.
    pub fn set_light_sleep_wake<D: RtcGpio + ?Sized>(
        &self,
        io: &mut D,
        level: Option<Level>,
    ) -> Result<(), Error> {
        let res = match level {
            Some(level) => io.wakeup_enable(self.gpio, level),
            None => io.wakeup_disable(self.gpio),
        };
        res.map_err(Error::from_rtcio)
    }

    pub fn pullup<D: RtcGpio + ?Sized>(&self, io: &mut D) -> Result<bool, Error> {
        io.is_pullup(self.gpio).map_err(Error::from_rtcio)
    }

    pub fn set_pullup<D: RtcGpio + ?Sized>(&self, io: &mut D, enable: bool) -> Result<(), Error> {
        io.set_pullup(self.gpio, enable).map_err(Error::from_rtcio)
    }

    pub fn pulldown<D: RtcGpio + ?Sized>(&self, io: &mut D) -> Result<bool, Error> {
        io.is_pulldown(self.gpio).map_err(Error::from_rtcio)
    }

    pub fn set_pulldown<D: RtcGpio + ?Sized>(&self, io: &mut D, enable: bool) -> Result<(), Error> {
        io.set_pulldown(self.gpio, enable).map_err(Error::from_rtcio)
    }

    /// Disconnect the pad (input, output, pulls) to cut sleep leakage.
    pub fn isolate<D: RtcGpio + ?Sized>(&self, io: &mut D) -> Result<(), Error> {
        io.isolate(self.gpio).map_err(Error::from_rtcio)
    }

    /// Release the forced hold on every RTC pad.
    pub fn force_hold_disable_all<D: RtcGpio + ?Sized>(io: &mut D) -> Result<(), Error> {
        io.force_hold_disable_all().map_err(Error::Driver)
    }
}

impl core::fmt::Display for RtcPin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "RTCPin({}, Pin({}))", self.rtc, self.gpio)
    }
}
