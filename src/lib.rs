//! # esp32-rtc-wake
//!
//! RTC-domain GPIO control and sleep wake-source coordination for the ESP32.
//!
//! ## Architecture
//!
//! - [`rtcio`]: the 18 RTC-capable pins and their control operations
//! - [`wake`]: wake sources with their hardware exclusions, armed before sleep
//! - [`power`]: sleep power-domain retention and Wi-Fi power save
//! - [`uart0`]: console input shim fed by the UART0 RX task
//! - [`console`]: serial command shell over all of the above
//!
//! Hardware access goes through the [`RtcGpio`], [`PowerDomainDriver`] and
//! [`SleepControl`] traits. The `Esp*` implementations exist only when
//! building for `target_os = "espidf"`.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod error;
pub mod power;
pub mod rtcio;
pub mod uart0;
pub mod wake;

pub use config::CONFIG;
pub use error::{DriverError, Error};
pub use power::{PowerDomain, PowerDomainDriver, PowerOption, WifiPowerSave};
pub use rtcio::{lookup_rtc_pin, GpioId, Level, RtcGpio, RtcPin, RTC_PINS, RTC_PIN_COUNT};
pub use uart0::{StdinRing, Uart0, STDIN_RING};
pub use wake::{Ext1Mode, SharedWakeConfig, SleepControl, SleepKind, WakeConfig};
