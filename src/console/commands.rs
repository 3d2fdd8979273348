//! Command handlers

use core::fmt::Write;

use super::parser::{parse_gpio_list, parse_switch, ParsedCommand};
use super::ConsoleError;
use crate::config::{find_param, PARAMS};
use crate::power::{PowerDomain, PowerDomainDriver, PowerOption};
use crate::rtcio::{DriveCap, Level, RtcGpio, RtcGpioMode, RtcPin, RTC_PINS, RTC_PIN_COUNT};
use crate::wake::{Ext1Mode, SharedWakeConfig, SleepControl, SleepKind, WakeConfig};

/// Hardware a command may touch.
pub struct Session<'a> {
    pub wake: &'a SharedWakeConfig,
    pub power: &'a mut dyn PowerDomainDriver,
    pub rtcio: &'a mut dyn RtcGpio,
    pub sleep: &'a mut dyn SleepControl,
}

type Handler = fn(&ParsedCommand<'_>, &mut Session<'_>, &mut dyn Write) -> Result<(), ConsoleError>;

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
    pub handler: Handler,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor { name: "help", brief: "List commands", handler: cmd_help },
    CommandDescriptor { name: "show", brief: "Show wake|pins|config", handler: cmd_show },
    CommandDescriptor { name: "rtcpin", brief: "RTC pin control", handler: cmd_rtcpin },
    CommandDescriptor { name: "wake", brief: "Configure wake sources", handler: cmd_wake },
    CommandDescriptor { name: "pd", brief: "Sleep power domain retention", handler: cmd_pd },
    CommandDescriptor { name: "sleep", brief: "Enter light|deep sleep", handler: cmd_sleep },
    CommandDescriptor { name: "wifips", brief: "Wi-Fi power save mode", handler: cmd_wifips },
    CommandDescriptor { name: "set", brief: "Set parameter value", handler: cmd_set },
    CommandDescriptor { name: "save", brief: "Persist parameters to NVS", handler: cmd_save },
    CommandDescriptor { name: "reboot", brief: "Restart system", handler: cmd_reboot },
];

/// Execute a parsed command
pub fn execute(
    cmd: &ParsedCommand<'_>,
    session: &mut Session<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if cmd.command.is_empty() {
        return Ok(()); // Empty line, do nothing
    }

    let handler = COMMANDS
        .iter()
        .find(|c| c.name == cmd.command)
        .ok_or(ConsoleError::UnknownCommand)?;

    (handler.handler)(cmd, session, out)
}

/// Get all command names
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

// --- Command Implementations ---

fn cmd_help(cmd: &ParsedCommand<'_>, _s: &mut Session<'_>, out: &mut dyn Write) -> Result<(), ConsoleError> {
    if let Some(name) = cmd.arg(0) {
        let c = COMMANDS
            .iter()
            .find(|c| c.name == name)
            .ok_or(ConsoleError::UnknownCommand)?;
        let _ = writeln!(out, "{}: {}", c.name, c.brief);
        let _ = match c.name {
            "rtcpin" => writeln!(
                out,
                "  rtcpin <gpio> [active|value|hold|pullup|pulldown|drive|dir|lswake|isolate] [v]\r\n  rtcpin release"
            ),
            "wake" => writeln!(
                out,
                "  wake touch|ulp|gpio on|off\r\n  wake uart <n>|off\r\n  wake ext0 <gpio>|none [low|high]\r\n  wake ext1 <g,g,..>|none [all_low|any_high]"
            ),
            "pd" => writeln!(out, "  pd rtc_periph|rtc_slow_mem|rtc_fast_mem|xtal off|on|auto"),
            _ => Ok(()),
        };
    } else {
        for c in COMMANDS {
            let _ = writeln!(out, "  {:<14} {}", c.name, c.brief);
        }
    }
    Ok(())
}

fn cmd_show(cmd: &ParsedCommand<'_>, s: &mut Session<'_>, out: &mut dyn Write) -> Result<(), ConsoleError> {
    match cmd.arg(0) {
        None | Some("wake") => {
            show_wake(&s.wake.snapshot(), out);
            Ok(())
        }
        Some("pins") => {
            for p in RTC_PINS.iter() {
                let _ = writeln!(out, "{}", p);
            }
            let _ = writeln!(out, "{} RTC pins", RTC_PIN_COUNT);
            Ok(())
        }
        Some("config") => {
            for p in PARAMS {
                let _ = writeln!(out, "{}={}", p.name, (p.get_fn)());
            }
            Ok(())
        }
        Some(_) => Err(ConsoleError::InvalidValue),
    }
}

fn show_wake(cfg: &WakeConfig, out: &mut dyn Write) {
    let _ = writeln!(out, "touch={}", cfg.wake_on_touch());
    let _ = writeln!(out, "ulp={}", cfg.wake_on_ulp());
    let _ = writeln!(out, "ls_gpio={}", cfg.light_sleep_gpio_wake());
    match cfg.light_sleep_uart_wake() {
        Some(n) => { let _ = writeln!(out, "ls_uart={}", n); }
        None => { let _ = writeln!(out, "ls_uart=off"); }
    }
    match cfg.ext0_pin() {
        Some(p) => { let _ = writeln!(out, "ext0={} {}", p, cfg.ext0_level().as_str()); }
        None => { let _ = writeln!(out, "ext0=none"); }
    }
    let _ = write!(out, "ext1=");
    if cfg.ext1_mask() == 0 {
        let _ = write!(out, "none");
    } else {
        let mut first = true;
        for p in cfg.ext1_pins() {
            let _ = write!(out, "{}{}", if first { "" } else { "," }, p.gpio());
            first = false;
        }
    }
    let _ = writeln!(out, " {}", cfg.ext1_mode().as_str());
    let _ = writeln!(out, "rtc_periph_on={}", cfg.rtc_periph_force_on());
}

fn cmd_rtcpin(cmd: &ParsedCommand<'_>, s: &mut Session<'_>, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let target = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;

    if target == "release" {
        RtcPin::force_hold_disable_all(&mut *s.rtcio)?;
        let _ = writeln!(out, "hold released");
        return Ok(());
    }

    let gpio: u8 = target.parse().map_err(|_| ConsoleError::InvalidValue)?;
    let pin = RtcPin::from_gpio(gpio)?;
    let io = &mut *s.rtcio;

    match (cmd.arg(1), cmd.arg(2)) {
        (None, _) => {
            let _ = writeln!(out, "{}", pin);
        }
        (Some("active"), Some(v)) => {
            pin.set_active(io, parse_switch(v).ok_or(ConsoleError::InvalidValue)?)?;
        }
        (Some("value"), None) => {
            let _ = writeln!(out, "{}", pin.value(io)? as u8);
        }
        (Some("value"), Some(v)) => {
            pin.set_value(io, parse_switch(v).ok_or(ConsoleError::InvalidValue)?)?;
        }
        (Some("hold"), None) => {
            let _ = writeln!(out, "{}", pin.hold(io)?);
        }
        (Some("hold"), Some(v)) => {
            pin.set_hold(io, parse_switch(v).ok_or(ConsoleError::InvalidValue)?)?;
        }
        (Some("pullup"), None) => {
            let _ = writeln!(out, "{}", pin.pullup(io)?);
        }
        (Some("pullup"), Some(v)) => {
            pin.set_pullup(io, parse_switch(v).ok_or(ConsoleError::InvalidValue)?)?;
        }
        (Some("pulldown"), None) => {
            let _ = writeln!(out, "{}", pin.pulldown(io)?);
        }
        (Some("pulldown"), Some(v)) => {
            pin.set_pulldown(io, parse_switch(v).ok_or(ConsoleError::InvalidValue)?)?;
        }
        (Some("drive"), None) => {
            let _ = writeln!(out, "{}", pin.drive(io)? as u8);
        }
        (Some("drive"), Some(v)) => {
            let raw: u32 = v.parse().map_err(|_| ConsoleError::InvalidValue)?;
            let cap = DriveCap::from_raw(raw).ok_or(ConsoleError::OutOfRange)?;
            pin.set_drive(io, cap)?;
        }
        (Some("dir"), Some(v)) => {
            let mode = match v {
                "in" => RtcGpioMode::InputOnly,
                "out" => RtcGpioMode::InputOutput,
                "off" => RtcGpioMode::Disabled,
                _ => return Err(ConsoleError::InvalidValue),
            };
            pin.set_direction(io, mode)?;
        }
        (Some("lswake"), Some(v)) => {
            let level = match v {
                "off" => None,
                _ => Some(Level::from_name(v).ok_or(ConsoleError::InvalidValue)?),
            };
            pin.set_light_sleep_wake(io, level)?;
        }
        (Some("isolate"), None) => {
            pin.isolate(io)?;
        }
        (Some(_), _) => return Err(ConsoleError::InvalidValue),
    }
    Ok(())
}

fn cmd_wake(cmd: &ParsedCommand<'_>, s: &mut Session<'_>, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let source = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;

    match source {
        "touch" | "ulp" | "gpio" => {
            let value = cmd.arg(1).ok_or(ConsoleError::MissingArg)?;
            let enabled = parse_switch(value).ok_or(ConsoleError::InvalidValue)?;
            match source {
                "touch" => s.wake.set_touch_wake(enabled)?,
                "ulp" => s.wake.set_ulp_wake(enabled)?,
                _ => s.wake.set_light_sleep_gpio_wake(enabled)?,
            }
        }
        "uart" => {
            let value = cmd.arg(1).ok_or(ConsoleError::MissingArg)?;
            let uart = match value {
                "off" => None,
                n => Some(n.parse::<u8>().map_err(|_| ConsoleError::InvalidValue)?),
            };
            if uart.map_or(false, |n| n > 2) {
                return Err(ConsoleError::OutOfRange);
            }
            s.wake.set_light_sleep_uart_wake(uart);
        }
        "ext0" => {
            let pin = cmd.arg(1).ok_or(ConsoleError::MissingArg)?;
            let level = match cmd.arg(2) {
                Some(l) => Level::from_name(l).ok_or(ConsoleError::InvalidValue)?,
                None => s.wake.snapshot().ext0_level(),
            };
            let pin = match pin {
                "none" => None,
                p => Some(p.parse::<u8>().map_err(|_| ConsoleError::InvalidValue)?),
            };
            s.wake.set_ext0_wake(pin, level)?;
        }
        "ext1" => {
            let list = cmd.arg(1).ok_or(ConsoleError::MissingArg)?;
            let mode = match cmd.arg(2) {
                Some(m) => Ext1Mode::from_name(m).ok_or(ConsoleError::InvalidValue)?,
                None => s.wake.snapshot().ext1_mode(),
            };
            let mut buf = [0u8; RTC_PIN_COUNT];
            if list == "none" {
                s.wake.set_ext1_wake(Some(&buf[..0]), mode)?;
            } else {
                let n = parse_gpio_list(list, &mut buf).ok_or(ConsoleError::InvalidValue)?;
                s.wake.set_ext1_wake(Some(&buf[..n]), mode)?;
            }
        }
        _ => return Err(ConsoleError::InvalidValue),
    }

    let _ = writeln!(out, "ok");
    Ok(())
}

fn cmd_pd(cmd: &ParsedCommand<'_>, s: &mut Session<'_>, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let domain = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;
    let option = cmd.arg(1).ok_or(ConsoleError::MissingArg)?;

    let domain = PowerDomain::from_name(domain).ok_or(ConsoleError::InvalidValue)?;
    let option = PowerOption::from_name(option).ok_or(ConsoleError::InvalidValue)?;

    s.wake.set_power_domain_retention(&mut *s.power, domain, option)?;
    let _ = writeln!(out, "{}={}", domain.as_str(), option.as_str());
    Ok(())
}

fn cmd_sleep(cmd: &ParsedCommand<'_>, s: &mut Session<'_>, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let kind = match cmd.arg(0).ok_or(ConsoleError::MissingArg)? {
        "light" => SleepKind::Light,
        "deep" => SleepKind::Deep,
        _ => return Err(ConsoleError::InvalidValue),
    };

    let cfg = s.wake.snapshot();
    cfg.sleep(kind, &mut *s.sleep)?;
    let _ = writeln!(out, "awake");
    Ok(())
}

fn cmd_wifips(cmd: &ParsedCommand<'_>, _s: &mut Session<'_>, out: &mut dyn Write) -> Result<(), ConsoleError> {
    use crate::power::WifiPowerSave;

    let requested = match cmd.arg(0) {
        Some(name) => Some(WifiPowerSave::from_name(name).ok_or(ConsoleError::InvalidValue)?),
        None => None,
    };

    #[cfg(target_os = "espidf")]
    {
        use crate::power::{set_wifi_power_save, wifi_power_save};

        if let Some(mode) = requested {
            set_wifi_power_save(mode).map_err(|_| ConsoleError::DriverFailed)?;
        }
        let mode = wifi_power_save().map_err(|_| ConsoleError::DriverFailed)?;
        let _ = writeln!(out, "wifi_ps={}", mode.as_str());
    }

    #[cfg(not(target_os = "espidf"))]
    {
        let _ = requested;
        let _ = writeln!(out, "wifips: running on host");
    }

    Ok(())
}

fn cmd_set(cmd: &ParsedCommand<'_>, _s: &mut Session<'_>, out: &mut dyn Write) -> Result<(), ConsoleError> {
    let name = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;
    let value = cmd.arg(1).ok_or(ConsoleError::MissingArg)?;

    let param = find_param(name).ok_or(ConsoleError::UnknownCommand)?;
    let stored = param.set_str(value)?;
    let _ = writeln!(out, "{}={}", param.name, stored);
    Ok(())
}

fn cmd_save(_cmd: &ParsedCommand<'_>, _s: &mut Session<'_>, out: &mut dyn Write) -> Result<(), ConsoleError> {
    crate::config::save_to_nvs().map_err(|_| ConsoleError::NvsError)?;
    let _ = writeln!(out, "saved");
    Ok(())
}

fn cmd_reboot(cmd: &ParsedCommand<'_>, _s: &mut Session<'_>, _out: &mut dyn Write) -> Result<(), ConsoleError> {
    if cmd.arg(0) != Some("confirm") {
        return Err(ConsoleError::RequiresConfirm);
    }

    #[cfg(target_os = "espidf")]
    unsafe {
        esp_idf_svc::sys::esp_restart();
    }

    Ok(())
}
