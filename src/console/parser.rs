//! Command line parser
//!
//! Whitespace split, max 3 arguments. List arguments use commas
//! (`wake ext1 25,26,27 any_high`).

/// Parsed command with up to 3 arguments
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    /// The command name (first token)
    pub command: &'a str,
    /// Up to 3 arguments
    pub args: [Option<&'a str>; 3],
}

impl<'a> ParsedCommand<'a> {
    /// Create empty command
    pub const fn empty() -> Self {
        Self {
            command: "",
            args: [None, None, None],
        }
    }

    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }

    /// Number of arguments present
    pub fn arg_count(&self) -> usize {
        self.args.iter().filter(|a| a.is_some()).count()
    }
}

/// Parse a command line into command and arguments
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_whitespace();

    let command = parts.next().unwrap_or("");

    let mut args = [None, None, None];
    for (i, arg) in parts.take(3).enumerate() {
        args[i] = Some(arg);
    }

    ParsedCommand { command, args }
}

/// Parse `on`/`off` style switches
pub fn parse_switch(s: &str) -> Option<bool> {
    match s {
        "on" | "1" | "true" => Some(true),
        "off" | "0" | "false" => Some(false),
        _ => None,
    }
}

/// Parse a comma-separated GPIO list into `out`.
///
/// Returns the number of entries, or `None` on a malformed number or
/// more entries than `out` holds.
pub fn parse_gpio_list(s: &str, out: &mut [u8]) -> Option<usize> {
    let mut n = 0;
    for item in s.split(',').filter(|i| !i.is_empty()) {
        let slot = out.get_mut(n)?;
        *slot = item.parse().ok()?;
        n += 1;
    }
    Some(n)
}
