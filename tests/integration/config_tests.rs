//! Integration tests for configuration, pattern overrides and script output

use std::fs;

use json2robot::writer::write_script;
use json2robot::{Config, ConvertError, Converter, FindingKind, SecurityLevel, UnmappedActionPolicy};
use tempfile::TempDir;

fn step_json(action: &str, arg: &str) -> String {
    serde_json::json!({
        "name": "t",
        "steps": [{"action": action, "args": [arg]}]
    })
    .to_string()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config.general.security_level, SecurityLevel::Standard);
    assert_eq!(config.general.unmapped_action_policy, UnmappedActionPolicy::Reject);
    assert_eq!(config.robot.separator_width, 4);
    assert!(config.patterns.is_empty());
    assert!(config.audit_path().is_none());
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[general]
security_level = "strict"
unmapped_action_policy = "passthrough"
audit_log = true
audit_path = "/tmp/json2robot-audit.jsonl"

[robot]
separator_width = 2
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.general.security_level, SecurityLevel::Strict);
    assert_eq!(config.general.unmapped_action_policy, UnmappedActionPolicy::Passthrough);
    assert_eq!(config.robot.separator_width, 2);
    assert_eq!(
        config.audit_path().as_deref(),
        Some(std::path::Path::new("/tmp/json2robot-audit.jsonl"))
    );
}

#[test]
fn test_missing_file_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let result = Config::load_from(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConvertError::Configuration(_))));
}

#[test]
fn test_invalid_values_rejected() {
    for toml in [
        "[general]\nsecurity_level = \"paranoid\"\n",
        "[robot]\nseparator_width = 1\n",
        "[patterns.standard]\nblocked_commands = [\"x\"]\n",
    ] {
        match Config::from_toml(toml) {
            Err(e) => assert_eq!(e.exit_code(), 3, "{}", toml),
            Ok(_) => panic!("expected error for {}", toml),
        }
    }
}

// ============================================================================
// Pattern overrides
// ============================================================================

#[test]
fn test_override_replaces_builtin_list() {
    let config = Config::from_toml(
        r#"
[patterns.standard]
dangerous_commands = ["\\bterraform\\s+destroy\\b"]
"#,
    )
    .unwrap();
    let converter = Converter::new(&config).unwrap();

    // The replacement is active
    let script = converter
        .convert(&step_json("run_command", "terraform destroy -auto-approve"))
        .unwrap();
    assert_eq!(script.findings.len(), 1);
    assert_eq!(
        script.findings[0].rule_id.as_deref(),
        Some("standard-dangerous_commands-0")
    );

    // The built-in standard commands are gone
    let script = converter.convert(&step_json("run_command", "sudo reboot")).unwrap();
    assert!(script.findings.is_empty());

    // Paths were not overridden
    let script = converter.convert(&step_json("read_file", "/etc/shadow")).unwrap();
    assert_eq!(script.findings[0].kind, FindingKind::Sensitive);
}

#[test]
fn test_override_limited_to_its_level() {
    let config = Config::from_toml(
        r#"
[general]
security_level = "strict"

[patterns.standard]
dangerous_commands = []
"#,
    )
    .unwrap();
    let converter = Converter::new(&config).unwrap();
    assert!(matches!(
        converter.convert(&step_json("run_command", "sudo reboot")),
        Err(ConvertError::SecurityViolation { .. })
    ));
}

#[test]
fn test_invalid_override_names_pattern() {
    let config = Config::from_toml(
        r#"
[patterns.permissive]
sensitive_paths = ["(unclosed"]
"#,
    )
    .unwrap();
    match Converter::new(&config) {
        Err(ConvertError::Configuration(message)) => assert!(message.contains("(unclosed")),
        other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
    }
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_separator_width_applied() {
    let config = Config::from_toml("[robot]\nseparator_width = 2\n").unwrap();
    let script = Converter::new(&config)
        .unwrap()
        .convert(&step_json("log", "hello"))
        .unwrap();
    assert!(script.text.ends_with("\n  Log  hello\n"));
}

#[test]
fn test_write_script_to_file() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("out").join("suite.robot");
    fs::create_dir(dest.parent().unwrap()).unwrap();

    let script = Converter::new(&Config::default())
        .unwrap()
        .convert(&step_json("log", "hello"))
        .unwrap();
    write_script(&dest, &script.text).unwrap();

    assert_eq!(fs::read_to_string(&dest).unwrap(), script.text);
    let leftovers: Vec<_> = fs::read_dir(dest.parent().unwrap())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name() != "suite.robot")
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_write_script_missing_directory_is_io_error() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("missing").join("suite.robot");
    match write_script(&dest, "x") {
        Err(e @ ConvertError::Io(_)) => assert_eq!(e.exit_code(), 5),
        other => panic!("expected io error, got {:?}", other),
    }
}
