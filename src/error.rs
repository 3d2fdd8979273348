//! Error types shared by the RTC pin, wake and power modules.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::EspError;

/// `ESP_ERR_INVALID_ARG` from `esp_err.h`.
pub const ESP_ERR_INVALID_ARG: i32 = 0x102;

/// Raw `esp_err_t` returned by an SDK call (never `ESP_OK`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverError(pub i32);

impl DriverError {
    /// The SDK rejected an argument.
    pub const INVALID_ARG: Self = Self(ESP_ERR_INVALID_ARG);

    /// Raw error code.
    pub fn code(&self) -> i32 {
        self.0
    }

    /// Check if this is `ESP_ERR_INVALID_ARG`.
    pub fn is_invalid_arg(&self) -> bool {
        self.0 == ESP_ERR_INVALID_ARG
    }
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

#[cfg(target_os = "espidf")]
impl From<EspError> for DriverError {
    fn from(e: EspError) -> Self {
        DriverError(e.code())
    }
}

/// Coordinator and pin-control errors.
///
/// Every error is reported at the offending call and leaves the
/// wake configuration untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// E10: Pin is not RTC-capable (or the handle did not resolve)
    InvalidPin,
    /// E11: Mutually exclusive wake/power sources requested together
    ResourceConflict,
    /// E12: Power-domain driver rejected the domain/option combination
    InvalidArgument(DriverError),
    /// E13: Any other SDK failure
    Driver(DriverError),
}

impl Error {
    /// Translate an RTC IO driver failure.
    ///
    /// The SDK reports `ESP_ERR_INVALID_ARG` for pins outside the RTC mux.
    pub fn from_rtcio(e: DriverError) -> Self {
        if e.is_invalid_arg() {
            Error::InvalidPin
        } else {
            Error::Driver(e)
        }
    }

    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPin => "E10",
            Self::ResourceConflict => "E11",
            Self::InvalidArgument(_) => "E12",
            Self::Driver(_) => "E13",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidPin => "not an RTC pin",
            Self::ResourceConflict => "no resources",
            Self::InvalidArgument(_) => "invalid argument",
            Self::Driver(_) => "driver error",
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidArgument(e) | Self::Driver(e) => {
                write!(f, "{}: {} ({})", self.code(), self.message(), e)
            }
            _ => write!(f, "{}: {}", self.code(), self.message()),
        }
    }
}
