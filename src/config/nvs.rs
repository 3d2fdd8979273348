//! NVS persistence for runtime parameters with schema versioning.
//!
//! # Version History
//!
//! - **v1** (current): log_level, echo, uart_wake_threshold

#[cfg(target_os = "espidf")]
use core::cmp::Ordering;
#[cfg(target_os = "espidf")]
use core::sync::atomic::Ordering as AtomicOrdering;

#[cfg(target_os = "espidf")]
use esp_idf_svc::nvs::*;
#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::EspError;

#[cfg(target_os = "espidf")]
use super::CONFIG;

/// Current NVS schema version
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// NVS namespace for runtime parameters
pub const NVS_NAMESPACE: &str = "rtcwake";

/// NVS key for schema version
#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
const VERSION_KEY: &str = "schema_ver";

#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
mod keys {
    pub const LOG_LEVEL: &str = "log_lvl";
    pub const ECHO: &str = "echo";
    pub const UART_THRESHOLD: &str = "uart_thr";
}

/// Load result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadResult {
    /// Nothing stored yet, defaults kept
    FreshInstall,
    /// Parameters loaded
    Loaded,
}

/// NVS operation errors
#[derive(Debug)]
pub enum NvsError {
    /// NVS initialization failed
    #[cfg(target_os = "espidf")]
    InitFailed(EspError),
    /// Schema version too new (downgrade not supported)
    TooNew { stored_version: u32 },
    /// NVS read/write error
    #[cfg(target_os = "espidf")]
    IoError(EspError),
    /// Feature not available on this platform
    #[cfg(not(target_os = "espidf"))]
    NotAvailable,
}

#[cfg(target_os = "espidf")]
impl From<EspError> for NvsError {
    fn from(e: EspError) -> Self {
        NvsError::IoError(e)
    }
}

#[cfg(target_os = "espidf")]
fn open() -> Result<EspNvs<NvsDefault>, NvsError> {
    let partition = EspDefaultNvsPartition::take().map_err(NvsError::InitFailed)?;
    EspNvs::new(partition, NVS_NAMESPACE, true).map_err(NvsError::InitFailed)
}

/// Load parameters from NVS into [`CONFIG`].
///
/// Missing keys keep their current value.
#[cfg(target_os = "espidf")]
pub fn load_from_nvs() -> Result<LoadResult, NvsError> {
    let storage = open()?;

    let stored_version = storage.get_u32(VERSION_KEY)?.unwrap_or(0);

    match stored_version.cmp(&CURRENT_SCHEMA_VERSION) {
        Ordering::Greater => Err(NvsError::TooNew { stored_version }),
        Ordering::Less => Ok(LoadResult::FreshInstall),
        Ordering::Equal => {
            if let Some(level) = storage.get_u8(keys::LOG_LEVEL)? {
                CONFIG.log_level.store(level.min(5), AtomicOrdering::Relaxed);
            }
            if let Some(echo) = storage.get_u8(keys::ECHO)? {
                CONFIG.echo.store(echo != 0, AtomicOrdering::Relaxed);
            }
            if let Some(thr) = storage.get_u16(keys::UART_THRESHOLD)? {
                CONFIG.uart_wake_threshold.store(thr.clamp(3, 1023), AtomicOrdering::Relaxed);
            }
            Ok(LoadResult::Loaded)
        }
    }
}

/// Stub for non-ESP platforms
#[cfg(not(target_os = "espidf"))]
pub fn load_from_nvs() -> Result<LoadResult, NvsError> {
    Err(NvsError::NotAvailable)
}

/// Save [`CONFIG`] to NVS with version stamp.
#[cfg(target_os = "espidf")]
pub fn save_to_nvs() -> Result<(), NvsError> {
    let mut storage = open()?;

    storage.set_u32(VERSION_KEY, CURRENT_SCHEMA_VERSION)?;
    storage.set_u8(keys::LOG_LEVEL, CONFIG.log_level.load(AtomicOrdering::Relaxed))?;
    storage.set_u8(keys::ECHO, CONFIG.echo.load(AtomicOrdering::Relaxed) as u8)?;
    storage.set_u16(keys::UART_THRESHOLD, CONFIG.uart_wake_threshold.load(AtomicOrdering::Relaxed))?;

    log::info!("config saved to NVS namespace '{}'", NVS_NAMESPACE);
    Ok(())
}

/// Stub for non-ESP platforms
#[cfg(not(target_os = "espidf"))]
pub fn save_to_nvs() -> Result<(), NvsError> {
    Err(NvsError::NotAvailable)
}
