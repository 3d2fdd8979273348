//! Line-editing console over the UART0 input shim

use core::fmt::Write;
use core::sync::atomic::Ordering;

use super::{execute, parse_line, ConsoleError, Session};
use crate::config::CONFIG;
use crate::uart0::Uart0;

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Longest accepted command line
pub const LINE_SIZE: usize = 96;

/// Console state machine
pub struct Console {
    buf: [u8; LINE_SIZE],
    len: usize,
}

impl Console {
    /// Create new console
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
        }
    }

    /// Current (unsubmitted) line
    pub fn line(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Process a single input byte
    ///
    /// Returns Some(result) if a command ran, None if more input needed.
    pub fn process_byte(
        &mut self,
        byte: u8,
        session: &mut Session<'_>,
        out: &mut dyn Write,
    ) -> Option<Result<(), ConsoleError>> {
        let echo = CONFIG.echo.load(Ordering::Relaxed);

        match byte {
            // Enter
            b'\r' | b'\n' => {
                if echo {
                    let _ = writeln!(out, "\r");
                }
                if self.len == 0 {
                    self.print_prompt(out);
                    return None;
                }

                let result = {
                    let line = core::str::from_utf8(&self.buf[..self.len]).unwrap_or("");
                    let cmd = parse_line(line);
                    execute(&cmd, session, out)
                };
                if let Err(e) = result {
                    let _ = writeln!(out, "{}\r", e);
                }
                self.len = 0;
                self.print_prompt(out);
                Some(result)
            }

            // Backspace
            0x7F | 0x08 => {
                if self.len > 0 {
                    self.len -= 1;
                    if echo {
                        let _ = write!(out, "\x08 \x08");
                    }
                }
                None
            }

            // Ctrl+C
            0x03 => {
                let _ = writeln!(out, "^C\r");
                self.len = 0;
                self.print_prompt(out);
                None
            }

            // Ctrl+U (clear line)
            0x15 => {
                if echo {
                    for _ in 0..self.len {
                        let _ = write!(out, "\x08 \x08");
                    }
                }
                self.len = 0;
                None
            }

            // Printable character
            0x20..=0x7E => {
                if self.len < LINE_SIZE {
                    self.buf[self.len] = byte;
                    self.len += 1;
                    if echo {
                        let _ = write!(out, "{}", byte as char);
                    }
                }
                None
            }

            _ => None,
        }
    }

    /// Drain everything waiting on `uart`.
    ///
    /// Returns how many commands ran.
    pub fn poll<const N: usize>(
        &mut self,
        uart: &Uart0<'_, N>,
        session: &mut Session<'_>,
        out: &mut dyn Write,
    ) -> usize {
        let mut ran = 0;
        while let Some(byte) = uart.read() {
            if self.process_byte(byte, session, out).is_some() {
                ran += 1;
            }
        }
        ran
    }

    /// Print the prompt
    pub fn print_prompt(&self, out: &mut dyn Write) {
        let _ = write!(out, "rtcwake> ");
    }

    /// Print welcome banner
    pub fn print_banner(&self, out: &mut dyn Write) {
        let _ = writeln!(out, "\r\n{}\r", VERSION);
        let _ = writeln!(out, "Type 'help' for commands.\r");
        self.print_prompt(out);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
