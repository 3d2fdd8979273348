//! Parser tests for console command line parsing

use esp32_rtc_wake::console::parser::{parse_gpio_list, parse_line, parse_switch, ParsedCommand};

#[test]
fn test_parse_simple_command() {
    let cmd = parse_line("help");
    assert_eq!(cmd.command, "help");
    assert_eq!(cmd.args[0], None);
    assert_eq!(cmd.arg_count(), 0);
}

#[test]
fn test_parse_command_with_two_args() {
    let cmd = parse_line("wake touch on");
    assert_eq!(cmd.command, "wake");
    assert_eq!(cmd.args[0], Some("touch"));
    assert_eq!(cmd.args[1], Some("on"));
    assert_eq!(cmd.args[2], None);
    assert_eq!(cmd.arg_count(), 2);
}

#[test]
fn test_parse_trims_whitespace() {
    let cmd = parse_line("  show   pins  ");
    assert_eq!(cmd.command, "show");
    assert_eq!(cmd.args[0], Some("pins"));
}

#[test]
fn test_parse_empty_line() {
    let cmd = parse_line("");
    assert_eq!(cmd.command, "");
}

#[test]
fn test_parse_max_args() {
    let cmd = parse_line("rtcpin 25 drive 3 ignored");
    assert_eq!(cmd.command, "rtcpin");
    assert_eq!(cmd.args[0], Some("25"));
    assert_eq!(cmd.args[1], Some("drive"));
    assert_eq!(cmd.args[2], Some("3"));
    // "ignored" is dropped (max 3 args)
}

#[test]
fn test_empty_command() {
    let cmd = ParsedCommand::empty();
    assert_eq!(cmd.command, "");
    assert_eq!(cmd.arg(0), None);
    assert_eq!(cmd.arg(7), None);
}

#[test]
fn test_parse_switch() {
    assert_eq!(parse_switch("on"), Some(true));
    assert_eq!(parse_switch("0"), Some(false));
    assert_eq!(parse_switch("enable"), None);
}

#[test]
fn test_parse_gpio_list() {
    let mut buf = [0u8; 4];
    assert_eq!(parse_gpio_list("25,26,27", &mut buf), Some(3));
    assert_eq!(&buf[..3], &[25, 26, 27]);

    // Trailing comma tolerated
    assert_eq!(parse_gpio_list("4,", &mut buf), Some(1));
    assert_eq!(parse_gpio_list("4,x", &mut buf), None);
    assert_eq!(parse_gpio_list("1,2,3,4,5", &mut buf), None);
}
