//! Serial console for wake, power and RTC pin configuration
//!
//! Polled from the main task, fed by the UART0 input shim.
//! Zero heap allocation - all static buffers.

pub mod commands;
#[allow(clippy::module_inception)]
pub mod console;
pub mod error;
pub mod parser;

pub use commands::{command_names, execute, Session, COMMANDS};
pub use console::Console;
pub use error::ConsoleError;
pub use parser::{parse_line, ParsedCommand};
