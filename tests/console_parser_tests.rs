//! Parser tests for console command line parsing

use serial_wifi_bridge::console::parser::{parse_line, Command};
use serial_wifi_bridge::console::CommandError;

fn connect_fields(line: &str) -> (String, String) {
    match parse_line(line) {
        Ok(Command::Connect { ssid, credential }) => (ssid.as_str().into(), credential.as_str().into()),
        other => panic!("expected Connect for {:?}, got {:?}", line, other),
    }
}

#[test]
fn test_parse_scan() {
    assert_eq!(parse_line("scan"), Ok(Command::Scan));
}

#[test]
fn test_parse_status() {
    assert_eq!(parse_line("status"), Ok(Command::Status));
}

#[test]
fn test_parse_keyword_is_prefix_match() {
    assert_eq!(parse_line("scan now"), Ok(Command::Scan));
    assert_eq!(parse_line("statusx"), Ok(Command::Status));
}

#[test]
fn test_parse_connect() {
    let (ssid, credential) = connect_fields("connect homewifi secret123");
    assert_eq!(ssid, "homewifi");
    assert_eq!(credential, "secret123");
}

#[test]
fn test_parse_connect_keeps_fields_unmodified() {
    let cases = [
        ("a", "b"),
        ("Office-5G", "P@ss:w0rd!"),
        ("caf\u{e9}", "\u{fc}ber-secret"),
        ("x", "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef"),
    ];

    for (ssid, credential) in cases {
        let line = format!("connect {} {}", ssid, credential);
        assert_eq!(connect_fields(&line), (ssid.to_string(), credential.to_string()));
    }
}

#[test]
fn test_parse_connect_extra_whitespace() {
    let (ssid, credential) = connect_fields("connect \t homewifi   secret123  ");
    assert_eq!(ssid, "homewifi");
    assert_eq!(credential, "secret123");
}

#[test]
fn test_parse_connect_bounds() {
    let ssid_32 = "s".repeat(32);
    let cred_64 = "c".repeat(64);
    let (ssid, credential) = connect_fields(&format!("connect {} {}", ssid_32, cred_64));
    assert_eq!(ssid.len(), 32);
    assert_eq!(credential.len(), 64);

    let ssid_33 = "s".repeat(33);
    assert_eq!(
        parse_line(&format!("connect {} pw", ssid_33)),
        Err(CommandError::ArgumentTooLong)
    );

    let cred_65 = "c".repeat(65);
    assert_eq!(
        parse_line(&format!("connect net {}", cred_65)),
        Err(CommandError::ArgumentTooLong)
    );
}

#[test]
fn test_parse_connect_missing_credential() {
    assert_eq!(parse_line("connect homewifi"), Err(CommandError::InvalidArguments));
    assert_eq!(parse_line("connect"), Err(CommandError::InvalidArguments));
    assert_eq!(parse_line("connect   "), Err(CommandError::InvalidArguments));
}

#[test]
fn test_parse_connect_extra_token() {
    assert_eq!(
        parse_line("connect homewifi secret123 extra"),
        Err(CommandError::InvalidArguments)
    );
}

#[test]
fn test_parse_connect_keyword_glued_to_argument() {
    assert_eq!(parse_line("connectx a b"), Err(CommandError::InvalidArguments));
}

#[test]
fn test_parse_unknown() {
    assert_eq!(parse_line("frobnicate"), Ok(Command::Unknown { raw: "frobnicate" }));
}

#[test]
fn test_parse_keywords_are_case_sensitive() {
    assert_eq!(parse_line("SCAN"), Ok(Command::Unknown { raw: "SCAN" }));
    assert_eq!(parse_line("Status"), Ok(Command::Unknown { raw: "Status" }));
}

#[test]
fn test_parse_keyword_must_start_line() {
    assert_eq!(parse_line(" scan"), Ok(Command::Unknown { raw: " scan" }));
    assert_eq!(parse_line("please scan"), Ok(Command::Unknown { raw: "please scan" }));
}

#[test]
fn test_parse_non_keyword_inputs_are_unknown() {
    for line in ["", "sca", "stat", "conn homewifi pw", "help", "disconnect"] {
        assert_eq!(parse_line(line), Ok(Command::Unknown { raw: line }), "{:?}", line);
    }
}

#[test]
fn test_command_name_never_includes_arguments() {
    let cmd = parse_line("connect homewifi secret123").unwrap();
    assert_eq!(cmd.name(), "connect");
}
