//! Sleep power domains and Wi-Fi power save.

#[cfg(target_os = "espidf")]
pub mod esp;

#[cfg(target_os = "espidf")]
pub use esp::{set_wifi_power_save, wifi_power_save, EspPowerDomains};

use crate::error::DriverError;

/// Power domain that can be kept up during sleep (`esp_sleep_pd_domain_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerDomain {
    /// RTC IO, sensors and the ULP co-processor
    RtcPeriph,
    RtcSlowMem,
    RtcFastMem,
    /// Main crystal oscillator
    Xtal,
}

/// Retention option (`esp_sleep_pd_option_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerOption {
    /// Power down in sleep
    Off,
    /// Keep powered in sleep
    On,
    /// Let the SDK decide from the enabled wake sources
    Auto,
}

/// Wi-Fi modem power-save mode (`wifi_ps_type_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiPowerSave {
    None,
    MinModem,
    MaxModem,
}

/// Sleep power-domain configuration.
pub trait PowerDomainDriver {
    fn configure(&mut self, domain: PowerDomain, option: PowerOption) -> Result<(), DriverError>;
}

impl<T: PowerDomainDriver + ?Sized> PowerDomainDriver for &mut T {
    fn configure(&mut self, domain: PowerDomain, option: PowerOption) -> Result<(), DriverError> {
        (**self).configure(domain, option)
    }
}

impl PowerDomain {
    pub const ALL: [PowerDomain; 4] = [
        PowerDomain::RtcPeriph,
        PowerDomain::RtcSlowMem,
        PowerDomain::RtcFastMem,
        PowerDomain::Xtal,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PowerDomain::RtcPeriph => "rtc_periph",
            PowerDomain::RtcSlowMem => "rtc_slow_mem",
            PowerDomain::RtcFastMem => "rtc_fast_mem",
            PowerDomain::Xtal => "xtal",
        }
    }
}

impl PowerOption {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "off" => Some(PowerOption::Off),
            "on" => Some(PowerOption::On),
            "auto" => Some(PowerOption::Auto),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PowerOption::Off => "off",
            PowerOption::On => "on",
            PowerOption::Auto => "auto",
        }
    }
}

impl WifiPowerSave {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(WifiPowerSave::None),
            "min_modem" => Some(WifiPowerSave::MinModem),
            "max_modem" => Some(WifiPowerSave::MaxModem),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WifiPowerSave::None => "none",
            WifiPowerSave::MinModem => "min_modem",
            WifiPowerSave::MaxModem => "max_modem",
        }
    }
}
