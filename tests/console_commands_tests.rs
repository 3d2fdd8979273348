//! Command handler tests

mod common;

use common::{MockPower, MockRtcGpio, RecordingSleep, SleepEvent, TestOutput};
use esp32_rtc_wake::console::{execute, parse_line, Console, ConsoleError, Session, COMMANDS};
use esp32_rtc_wake::error::DriverError;
use esp32_rtc_wake::power::{PowerDomain, PowerOption};
use esp32_rtc_wake::uart0::{StdinRing, Uart0};
use esp32_rtc_wake::wake::{SharedWakeConfig, SleepKind};

/// Drivers plus wake state for one test.
#[derive(Default)]
struct Rig {
    wake: SharedWakeConfig,
    power: MockPower,
    rtcio: MockRtcGpio,
    sleep: RecordingSleep,
}

impl Rig {
    fn new() -> Self {
        Self::default()
    }

    fn session(&mut self) -> Session<'_> {
        Session {
            wake: &self.wake,
            power: &mut self.power,
            rtcio: &mut self.rtcio,
            sleep: &mut self.sleep,
        }
    }

    fn run(&mut self, line: &str) -> (Result<(), ConsoleError>, String) {
        let mut out = TestOutput::new();
        let cmd = parse_line(line);
        let result = execute(&cmd, &mut self.session(), &mut out);
        (result, out.text)
    }
}

#[test]
fn test_command_registry_has_all_commands() {
    let expected = ["help", "show", "rtcpin", "wake", "pd", "sleep", "wifips", "set", "save", "reboot"];

    for name in expected {
        assert!(
            COMMANDS.iter().any(|c| c.name == name),
            "Command '{}' should be in registry",
            name
        );
    }
}

#[test]
fn test_execute_unknown_command() {
    let mut rig = Rig::new();
    assert_eq!(rig.run("foobar").0, Err(ConsoleError::UnknownCommand));
}

#[test]
fn test_execute_empty_line() {
    let mut rig = Rig::new();
    assert_eq!(rig.run("   "), (Ok(()), String::new()));
}

#[test]
fn test_execute_help() {
    let mut rig = Rig::new();
    let (res, out) = rig.run("help");
    assert!(res.is_ok());
    assert!(out.contains("rtcpin"));

    let (res, out) = rig.run("help wake");
    assert!(res.is_ok());
    assert!(out.contains("wake ext1"));
}

#[test]
fn test_wake_touch_then_gpio_conflicts() {
    let mut rig = Rig::new();
    assert_eq!(rig.run("wake touch on"), (Ok(()), "ok\n".to_string()));
    assert!(rig.wake.snapshot().wake_on_touch());

    assert_eq!(rig.run("wake gpio on").0, Err(ConsoleError::Conflict));
    assert!(!rig.wake.snapshot().light_sleep_gpio_wake());
}

#[test]
fn test_wake_bad_switch() {
    let mut rig = Rig::new();
    assert_eq!(rig.run("wake ulp maybe").0, Err(ConsoleError::InvalidValue));
    assert_eq!(rig.run("wake ulp").0, Err(ConsoleError::MissingArg));
}

#[test]
fn test_wake_ext0_and_show() {
    let mut rig = Rig::new();
    rig.run("wake ext0 4 high").0.unwrap();

    let (_, out) = rig.run("show wake");
    assert!(out.contains("ext0=RTCPin(10, Pin(4)) high"), "{}", out);

    rig.run("wake ext0 none").0.unwrap();
    let (_, out) = rig.run("show");
    assert!(out.contains("ext0=none"));
}

#[test]
fn test_wake_ext0_invalid_pin() {
    let mut rig = Rig::new();
    assert_eq!(rig.run("wake ext0 5 low").0, Err(ConsoleError::InvalidPin));
    assert_eq!(rig.wake.snapshot().ext0_pin(), None);
}

#[test]
fn test_wake_ext1_list() {
    let mut rig = Rig::new();
    assert_eq!(rig.run("wake ext1 25,5 any_high").0, Err(ConsoleError::InvalidPin));
    assert_eq!(rig.wake.snapshot().ext1_mask(), 0);

    rig.run("wake ext1 26,25 any_high").0.unwrap();
    let (_, out) = rig.run("show wake");
    assert!(out.contains("ext1=25,26 any_high"), "{}", out);

    rig.run("wake ext1 none").0.unwrap();
    assert_eq!(rig.wake.snapshot().ext1_mask(), 0);
}

#[test]
fn test_wake_uart() {
    let mut rig = Rig::new();
    rig.run("wake uart 1").0.unwrap();
    assert_eq!(rig.wake.snapshot().light_sleep_uart_wake(), Some(1));

    assert_eq!(rig.run("wake uart 5").0, Err(ConsoleError::OutOfRange));
    rig.run("wake uart off").0.unwrap();
    assert_eq!(rig.wake.snapshot().light_sleep_uart_wake(), None);
}

#[test]
fn test_pd_conflict_skips_driver() {
    let mut rig = Rig::new();
    rig.run("wake ulp on").0.unwrap();

    assert_eq!(rig.run("pd rtc_periph on").0, Err(ConsoleError::Conflict));
    assert!(rig.power.calls.is_empty());
}

#[test]
fn test_pd_configures_domain() {
    let mut rig = Rig::new();
    let (res, out) = rig.run("pd xtal auto");
    assert!(res.is_ok());
    assert_eq!(out, "xtal=auto\n");
    assert_eq!(rig.power.calls, vec![(PowerDomain::Xtal, PowerOption::Auto)]);

    assert_eq!(rig.run("pd vdd on").0, Err(ConsoleError::InvalidValue));
}

#[test]
fn test_pd_driver_rejection() {
    let mut rig = Rig::new();
    rig.power = MockPower::rejecting(DriverError::INVALID_ARG);

    assert_eq!(rig.run("pd rtc_periph on").0, Err(ConsoleError::InvalidValue));
    assert!(!rig.wake.snapshot().rtc_periph_force_on());
}

#[test]
fn test_rtcpin_show_and_invalid() {
    let mut rig = Rig::new();
    let (res, out) = rig.run("rtcpin 25");
    assert!(res.is_ok());
    assert_eq!(out, "RTCPin(6, Pin(25))\n");

    assert_eq!(rig.run("rtcpin 5").0, Err(ConsoleError::InvalidPin));
    assert_eq!(rig.run("rtcpin x").0, Err(ConsoleError::InvalidValue));
    assert_eq!(rig.run("rtcpin").0, Err(ConsoleError::MissingArg));
}

#[test]
fn test_rtcpin_hold_and_release() {
    let mut rig = Rig::new();
    rig.run("rtcpin 25 hold on").0.unwrap();
    assert_eq!(rig.run("rtcpin 25 hold"), (Ok(()), "true\n".to_string()));

    let (res, out) = rig.run("rtcpin release");
    assert!(res.is_ok());
    assert!(out.contains("released"));
    assert!(rig.rtcio.released);
    assert!(!rig.rtcio.pad(25).held);
}

#[test]
fn test_rtcpin_drive_range() {
    let mut rig = Rig::new();
    rig.run("rtcpin 26 drive 3").0.unwrap();
    assert_eq!(rig.run("rtcpin 26 drive"), (Ok(()), "3\n".to_string()));
    assert_eq!(rig.run("rtcpin 26 drive 9").0, Err(ConsoleError::OutOfRange));
}

#[test]
fn test_rtcpin_driver_failure() {
    let mut rig = Rig::new();
    rig.rtcio.fail_with = Some(DriverError(0x103));
    assert_eq!(rig.run("rtcpin 27 value 1").0, Err(ConsoleError::DriverFailed));
}

#[test]
fn test_sleep_arms_and_enters() {
    let mut rig = Rig::new();
    rig.run("wake ulp on").0.unwrap();

    let (res, out) = rig.run("sleep light");
    assert!(res.is_ok());
    assert_eq!(out, "awake\n");
    assert_eq!(
        rig.sleep.events,
        vec![SleepEvent::DisableAll, SleepEvent::Ulp, SleepEvent::Enter(SleepKind::Light)]
    );

    assert_eq!(rig.run("sleep nap").0, Err(ConsoleError::InvalidValue));
}

#[test]
fn test_set_param() {
    let mut rig = Rig::new();
    assert_eq!(rig.run("set log_level 2"), (Ok(()), "log_level=2\n".to_string()));
    assert_eq!(rig.run("set log_level 9").0, Err(ConsoleError::OutOfRange));
    assert_eq!(rig.run("set wpm 20").0, Err(ConsoleError::UnknownCommand));
    assert_eq!(rig.run("set log_level").0, Err(ConsoleError::MissingArg));
}

#[test]
fn test_show_pins_and_config() {
    let mut rig = Rig::new();
    let (_, out) = rig.run("show pins");
    assert!(out.contains("RTCPin(0, Pin(36))"));
    assert!(out.contains("18 RTC pins"));

    let (_, out) = rig.run("show config");
    assert!(out.contains("uart_wake_threshold="));
    assert_eq!(rig.run("show everything").0, Err(ConsoleError::InvalidValue));
}

#[test]
fn test_save_unavailable_on_host() {
    let mut rig = Rig::new();
    assert_eq!(rig.run("save").0, Err(ConsoleError::NvsError));
}

#[test]
fn test_execute_reboot_requires_confirm() {
    let mut rig = Rig::new();
    assert_eq!(rig.run("reboot").0, Err(ConsoleError::RequiresConfirm));
}

#[test]
fn test_error_display() {
    assert_eq!(format!("{}", ConsoleError::Conflict), "E08: no resources");
    assert_eq!(format!("{}", ConsoleError::InvalidPin), "E07: not an RTC pin");
}

// --- Line editing ---

fn feed(console: &mut Console, rig: &mut Rig, bytes: &[u8]) -> Vec<Result<(), ConsoleError>> {
    let mut out = TestOutput::new();
    let mut session = rig.session();
    bytes
        .iter()
        .filter_map(|b| console.process_byte(*b, &mut session, &mut out))
        .collect()
}

#[test]
fn test_console_runs_line_on_enter() {
    let mut rig = Rig::new();
    let mut console = Console::new();

    let results = feed(&mut console, &mut rig, b"wake touch on\r");
    assert_eq!(results, vec![Ok(())]);
    assert!(rig.wake.snapshot().wake_on_touch());
    assert_eq!(console.line(), "");
}

#[test]
fn test_console_backspace_and_ctrl_u() {
    let mut rig = Rig::new();
    let mut console = Console::new();

    feed(&mut console, &mut rig, b"wake ulpx\x7f");
    assert_eq!(console.line(), "wake ulp");

    feed(&mut console, &mut rig, b"\x15");
    assert_eq!(console.line(), "");
}

#[test]
fn test_console_ctrl_c_discards_line() {
    let mut rig = Rig::new();
    let mut console = Console::new();

    let results = feed(&mut console, &mut rig, b"wake touch on\x03\r");
    assert!(results.is_empty());
    assert!(!rig.wake.snapshot().wake_on_touch());
}

#[test]
fn test_console_reports_errors() {
    let mut rig = Rig::new();
    let mut console = Console::new();

    let results = feed(&mut console, &mut rig, b"bogus\n");
    assert_eq!(results, vec![Err(ConsoleError::UnknownCommand)]);
}

#[test]
fn test_console_poll_drains_uart() {
    let mut rig = Rig::new();
    let mut console = Console::new();
    let ring = StdinRing::<64>::new();
    ring.push_slice(b"wake uart 0\rwake ulp on\r");

    let mut out = TestOutput::new();
    let ran = console.poll(&Uart0::new(&ring), &mut rig.session(), &mut out);
    assert_eq!(ran, 2);
    assert!(ring.is_empty());

    let cfg = rig.wake.snapshot();
    assert_eq!(cfg.light_sleep_uart_wake(), Some(0));
    assert!(cfg.wake_on_ulp());
    assert!(out.contains("rtcwake> "));
}
