//! Host-side driver doubles shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use esp32_rtc_wake::error::DriverError;
use esp32_rtc_wake::power::{PowerDomain, PowerDomainDriver, PowerOption};
use esp32_rtc_wake::rtcio::{DriveCap, Level, RtcGpio, RtcGpioMode, RTC_PINS};
use esp32_rtc_wake::wake::{Ext1Mode, SleepControl, SleepKind};

/// Per-pad state kept by [`MockRtcGpio`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Pad {
    pub active: bool,
    pub level: bool,
    pub held: bool,
    pub drive: Option<DriveCap>,
    pub mode: Option<RtcGpioMode>,
    pub wake: Option<Level>,
    pub pullup: bool,
    pub pulldown: bool,
}

/// RTC IO double. Rejects non-RTC GPIOs the way the SDK does.
#[derive(Default)]
pub struct MockRtcGpio {
    pub pads: HashMap<u8, Pad>,
    pub calls: Vec<&'static str>,
    /// Returned by the next call instead of touching the pads
    pub fail_with: Option<DriverError>,
    pub released: bool,
}

impl MockRtcGpio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pad(&self, gpio: u8) -> Pad {
        self.pads.get(&gpio).copied().unwrap_or_default()
    }

    fn enter(&mut self, name: &'static str, gpio: u8) -> Result<&mut Pad, DriverError> {
        self.calls.push(name);
        if let Some(e) = self.fail_with.take() {
            return Err(e);
        }
        if !RTC_PINS.iter().any(|p| p.gpio() == gpio) {
            return Err(DriverError::INVALID_ARG);
        }
        Ok(self.pads.entry(gpio).or_default())
    }
}

impl RtcGpio for MockRtcGpio {
    fn init(&mut self, gpio: u8) -> Result<(), DriverError> {
        self.enter("init", gpio)?.active = true;
        Ok(())
    }

    fn deinit(&mut self, gpio: u8) -> Result<(), DriverError> {
        self.enter("deinit", gpio)?.active = false;
        Ok(())
    }

    fn level(&mut self, gpio: u8) -> Result<bool, DriverError> {
        Ok(self.enter("level", gpio)?.level)
    }

    fn set_level(&mut self, gpio: u8, high: bool) -> Result<(), DriverError> {
        self.enter("set_level", gpio)?.level = high;
        Ok(())
    }

    fn is_held(&mut self, gpio: u8) -> Result<bool, DriverError> {
        Ok(self.enter("is_held", gpio)?.held)
    }

    fn set_hold(&mut self, gpio: u8, hold: bool) -> Result<(), DriverError> {
        self.enter("set_hold", gpio)?.held = hold;
        Ok(())
    }

    fn drive_capability(&mut self, gpio: u8) -> Result<DriveCap, DriverError> {
        Ok(self.enter("drive_capability", gpio)?.drive.unwrap_or(DriveCap::Default))
    }

    fn set_drive_capability(&mut self, gpio: u8, cap: DriveCap) -> Result<(), DriverError> {
        self.enter("set_drive_capability", gpio)?.drive = Some(cap);
        Ok(())
    }

    fn set_direction(&mut self, gpio: u8, mode: RtcGpioMode) -> Result<(), DriverError> {
        self.enter("set_direction", gpio)?.mode = Some(mode);
        Ok(())
    }

    fn wakeup_enable(&mut self, gpio: u8, level: Level) -> Result<(), DriverError> {
        self.enter("wakeup_enable", gpio)?.wake = Some(level);
        Ok(())
    }

    fn wakeup_disable(&mut self, gpio: u8) -> Result<(), DriverError> {
        self.enter("wakeup_disable", gpio)?.wake = None;
        Ok(())
    }

    fn is_pullup(&mut self, gpio: u8) -> Result<bool, DriverError> {
        Ok(self.enter("is_pullup", gpio)?.pullup)
    }

    fn set_pullup(&mut self, gpio: u8, enable: bool) -> Result<(), DriverError> {
        self.enter("set_pullup", gpio)?.pullup = enable;
        Ok(())
    }

    fn is_pulldown(&mut self, gpio: u8) -> Result<bool, DriverError> {
        Ok(self.enter("is_pulldown", gpio)?.pulldown)
    }

    fn set_pulldown(&mut self, gpio: u8, enable: bool) -> Result<(), DriverError> {
        self.enter("set_pulldown", gpio)?.pulldown = enable;
        Ok(())
    }

    fn isolate(&mut self, gpio: u8) -> Result<(), DriverError> {
        let pad = self.enter("isolate", gpio)?;
        pad.pullup = false;
        pad.pulldown = false;
        pad.held = true;
        Ok(())
    }

    fn force_hold_disable_all(&mut self) -> Result<(), DriverError> {
        self.calls.push("force_hold_disable_all");
        if let Some(e) = self.fail_with.take() {
            return Err(e);
        }
        for pad in self.pads.values_mut() {
            pad.held = false;
        }
        self.released = true;
        Ok(())
    }
}

/// Power-domain double recording every call.
#[derive(Default)]
pub struct MockPower {
    pub calls: Vec<(PowerDomain, PowerOption)>,
    /// Every call fails with this error when set
    pub reject: Option<DriverError>,
}

impl MockPower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(e: DriverError) -> Self {
        Self { calls: Vec::new(), reject: Some(e) }
    }
}

impl PowerDomainDriver for MockPower {
    fn configure(&mut self, domain: PowerDomain, option: PowerOption) -> Result<(), DriverError> {
        self.calls.push((domain, option));
        match self.reject {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// One call seen by [`RecordingSleep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepEvent {
    DisableAll,
    Touchpad,
    Ulp,
    Ext0(u8, Level),
    Ext1(u64, Ext1Mode),
    Gpio,
    Uart(u8),
    Enter(SleepKind),
}

/// Sleep double recording the arming sequence.
#[derive(Default)]
pub struct RecordingSleep {
    pub events: Vec<SleepEvent>,
    /// Fail the first call that would record this event
    pub fail_on: Option<SleepEvent>,
}

impl RecordingSleep {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, ev: SleepEvent) -> Result<(), DriverError> {
        if self.fail_on == Some(ev) {
            self.fail_on = None;
            return Err(DriverError(-1));
        }
        self.events.push(ev);
        Ok(())
    }
}

impl SleepControl for RecordingSleep {
    fn disable_all(&mut self) -> Result<(), DriverError> {
        self.record(SleepEvent::DisableAll)
    }

    fn enable_touchpad(&mut self) -> Result<(), DriverError> {
        self.record(SleepEvent::Touchpad)
    }

    fn enable_ulp(&mut self) -> Result<(), DriverError> {
        self.record(SleepEvent::Ulp)
    }

    fn enable_ext0(&mut self, gpio: u8, level: Level) -> Result<(), DriverError> {
        self.record(SleepEvent::Ext0(gpio, level))
    }

    fn enable_ext1(&mut self, gpio_mask: u64, mode: Ext1Mode) -> Result<(), DriverError> {
        self.record(SleepEvent::Ext1(gpio_mask, mode))
    }

    fn enable_gpio(&mut self) -> Result<(), DriverError> {
        self.record(SleepEvent::Gpio)
    }

    fn enable_uart(&mut self, uart: u8) -> Result<(), DriverError> {
        self.record(SleepEvent::Uart(uart))
    }

    fn enter(&mut self, kind: SleepKind) -> Result<(), DriverError> {
        self.record(SleepEvent::Enter(kind))
    }
}

/// Console output capture.
#[derive(Default)]
pub struct TestOutput {
    pub text: String,
}

impl TestOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, s: &str) -> bool {
        self.text.contains(s)
    }
}

impl core::fmt::Write for TestOutput {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.text.push_str(s);
        Ok(())
    }
}
