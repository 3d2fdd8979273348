//! Module: config
//!
//! Purpose: Runtime parameters for the firmware (logging, console, UART
//! wake threshold).
//!
//! Architecture:
//! - `CONFIG`: single static, every field atomic (no locks)
//! - `PARAMS`: descriptor table used by the console `set`/`show` commands
//! - `nvs`: persistence of the parameters across resets
//!
//! The wake configuration itself is not a parameter: it lives in
//! [`SharedWakeConfig`](crate::wake::SharedWakeConfig) and is lost on reset.

use core::sync::atomic::{AtomicBool, AtomicU16, AtomicU8, Ordering};

pub mod nvs;

pub use nvs::{load_from_nvs, save_to_nvs, NvsError, LoadResult, NVS_NAMESPACE};

/// Runtime parameters.
pub struct RuntimeConfig {
    /// 0=off 1=error 2=warn 3=info 4=debug 5=trace
    pub log_level: AtomicU8,
    /// Echo typed characters on the console
    pub echo: AtomicBool,
    /// RX edges needed to wake from light sleep on UART
    pub uart_wake_threshold: AtomicU16,
}

pub const DEFAULT_LOG_LEVEL: u8 = 3;
pub const DEFAULT_ECHO: bool = true;
pub const DEFAULT_UART_WAKE_THRESHOLD: u16 = 3;

impl RuntimeConfig {
    pub const fn new() -> Self {
        Self {
            log_level: AtomicU8::new(DEFAULT_LOG_LEVEL),
            echo: AtomicBool::new(DEFAULT_ECHO),
            uart_wake_threshold: AtomicU16::new(DEFAULT_UART_WAKE_THRESHOLD),
        }
    }

    /// Restore defaults.
    pub fn reset(&self) {
        self.log_level.store(DEFAULT_LOG_LEVEL, Ordering::Relaxed);
        self.echo.store(DEFAULT_ECHO, Ordering::Relaxed);
        self.uart_wake_threshold.store(DEFAULT_UART_WAKE_THRESHOLD, Ordering::Relaxed);
    }

    /// `log_level` as a `log` filter.
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level.load(Ordering::Relaxed) {
            0 => log::LevelFilter::Off,
            1 => log::LevelFilter::Error,
            2 => log::LevelFilter::Warn,
            3 => log::LevelFilter::Info,
            4 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }

    /// Push `log_level` to the `log` facade.
    pub fn apply_log_level(&self) {
        log::set_max_level(self.level_filter());
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Global runtime configuration.
pub static CONFIG: RuntimeConfig = RuntimeConfig::new();

/// Typed parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValue {
    Bool(bool),
    U8(u8),
    U16(u16),
}

impl core::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::U8(n) => write!(f, "{}", n),
            ParamValue::U16(n) => write!(f, "{}", n),
        }
    }
}

/// Parameter type with bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Bool,
    U8 { min: u8, max: u8 },
    U16 { min: u16, max: u16 },
}

/// Why a set was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSetError {
    /// Text did not parse for this type
    InvalidValue,
    OutOfRange,
}

/// Parameter descriptor.
pub struct ParamDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
    pub param_type: ParamType,
    pub get_fn: fn() -> ParamValue,
    pub set_fn: fn(ParamValue) -> Result<(), ParamSetError>,
}

impl ParamDescriptor {
    /// Parse `text` for this parameter and store it.
    pub fn set_str(&self, text: &str) -> Result<ParamValue, ParamSetError> {
        let value = match self.param_type {
            ParamType::Bool => {
                let v = match text {
                    "true" | "1" | "on" => true,
                    "false" | "0" | "off" => false,
                    _ => return Err(ParamSetError::InvalidValue),
                };
                ParamValue::Bool(v)
            }
            ParamType::U8 { min, max } => {
                let v: u8 = text.parse().map_err(|_| ParamSetError::InvalidValue)?;
                if v < min || v > max {
                    return Err(ParamSetError::OutOfRange);
                }
                ParamValue::U8(v)
            }
            ParamType::U16 { min, max } => {
                let v: u16 = text.parse().map_err(|_| ParamSetError::InvalidValue)?;
                if v < min || v > max {
                    return Err(ParamSetError::OutOfRange);
                }
                ParamValue::U16(v)
            }
        };
        (self.set_fn)(value)?;
        Ok(value)
    }
}

/// All runtime parameters.
pub static PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor {
        name: "log_level",
        brief: "0=off .. 5=trace",
        param_type: ParamType::U8 { min: 0, max: 5 },
        get_fn: || ParamValue::U8(CONFIG.log_level.load(Ordering::Relaxed)),
        set_fn: set_log_level,
    },
    ParamDescriptor {
        name: "echo",
        brief: "Console echo",
        param_type: ParamType::Bool,
        get_fn: || ParamValue::Bool(CONFIG.echo.load(Ordering::Relaxed)),
        set_fn: set_echo,
    },
    ParamDescriptor {
        name: "uart_wake_threshold",
        brief: "RX edges to wake from light sleep",
        param_type: ParamType::U16 { min: 3, max: 1023 },
        get_fn: || ParamValue::U16(CONFIG.uart_wake_threshold.load(Ordering::Relaxed)),
        set_fn: set_uart_wake_threshold,
    },
];

fn set_log_level(v: ParamValue) -> Result<(), ParamSetError> {
    match v {
        ParamValue::U8(n) if n <= 5 => {
            CONFIG.log_level.store(n, Ordering::Relaxed);
            CONFIG.apply_log_level();
            Ok(())
        }
        ParamValue::U8(_) => Err(ParamSetError::OutOfRange),
        _ => Err(ParamSetError::InvalidValue),
    }
}

fn set_echo(v: ParamValue) -> Result<(), ParamSetError> {
    match v {
        ParamValue::Bool(b) => {
            CONFIG.echo.store(b, Ordering::Relaxed);
            Ok(())
        }
        _ => Err(ParamSetError::InvalidValue),
    }
}

fn set_uart_wake_threshold(v: ParamValue) -> Result<(), ParamSetError> {
    match v {
        ParamValue::U16(n) if (3..=1023).contains(&n) => {
            CONFIG.uart_wake_threshold.store(n, Ordering::Relaxed);
            Ok(())
        }
        ParamValue::U16(_) => Err(ParamSetError::OutOfRange),
        _ => Err(ParamSetError::InvalidValue),
    }
}

/// Find a parameter by exact name.
pub fn find_param(name: &str) -> Option<&'static ParamDescriptor> {
    PARAMS.iter().find(|p| p.name == name)
}

/// Parameter names, for help output.
pub fn param_names() -> impl Iterator<Item = &'static str> {
    PARAMS.iter().map(|p| p.name)
}
