//! ESP-IDF backends for power domains and Wi-Fi power save.

use esp_idf_svc::sys::*;

use super::{PowerDomain, PowerDomainDriver, PowerOption, WifiPowerSave};
use crate::error::DriverError;

/// `esp_sleep_pd_config` driver.
#[derive(Debug, Default)]
pub struct EspPowerDomains;

impl PowerDomainDriver for EspPowerDomains {
    fn configure(&mut self, domain: PowerDomain, option: PowerOption) -> Result<(), DriverError> {
        let domain = match domain {
            PowerDomain::RtcPeriph => esp_sleep_pd_domain_t_ESP_PD_DOMAIN_RTC_PERIPH,
            PowerDomain::RtcSlowMem => esp_sleep_pd_domain_t_ESP_PD_DOMAIN_RTC_SLOW_MEM,
            PowerDomain::RtcFastMem => esp_sleep_pd_domain_t_ESP_PD_DOMAIN_RTC_FAST_MEM,
            PowerDomain::Xtal => esp_sleep_pd_domain_t_ESP_PD_DOMAIN_XTAL,
        };
        let option = match option {
            PowerOption::Off => esp_sleep_pd_option_t_ESP_PD_OPTION_OFF,
            PowerOption::On => esp_sleep_pd_option_t_ESP_PD_OPTION_ON,
            PowerOption::Auto => esp_sleep_pd_option_t_ESP_PD_OPTION_AUTO,
        };
        esp!(unsafe { esp_sleep_pd_config(domain, option) }).map_err(DriverError::from)
    }
}

/// Current Wi-Fi power-save mode. Fails if Wi-Fi is not started.
pub fn wifi_power_save() -> Result<WifiPowerSave, DriverError> {
    let mut raw: wifi_ps_type_t = 0;
    esp!(unsafe { esp_wifi_get_ps(&mut raw) })?;

    #[allow(non_upper_case_globals)]
    match raw {
        wifi_ps_type_t_WIFI_PS_NONE => Ok(WifiPowerSave::None),
        wifi_ps_type_t_WIFI_PS_MIN_MODEM => Ok(WifiPowerSave::MinModem),
        wifi_ps_type_t_WIFI_PS_MAX_MODEM => Ok(WifiPowerSave::MaxModem),
        _ => Err(DriverError(ESP_FAIL)),
    }
}

pub fn set_wifi_power_save(mode: WifiPowerSave) -> Result<(), DriverError> {
    let raw = match mode {
        WifiPowerSave::None => wifi_ps_type_t_WIFI_PS_NONE,
        WifiPowerSave::MinModem => wifi_ps_type_t_WIFI_PS_MIN_MODEM,
        WifiPowerSave::MaxModem => wifi_ps_type_t_WIFI_PS_MAX_MODEM,
    };
    esp!(unsafe { esp_wifi_set_ps(raw) })?;
    Ok(())
}
