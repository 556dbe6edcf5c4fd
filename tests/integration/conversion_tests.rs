//! Integration tests for JSON to Robot Framework conversion

use json2robot::{
    convert_json_to_script, ActionTable, ActionTemplate, ArgRole, Config, ConvertError, Converter,
    FindingKind, SecurityLevel, UnmappedActionPolicy,
};

fn config(level: SecurityLevel) -> Config {
    let mut config = Config::default();
    config.general.security_level = level;
    config
}

fn convert(json: &str, level: SecurityLevel) -> Result<json2robot::Script, ConvertError> {
    convert_json_to_script(json, &config(level))
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_strict_rejects_rm_rf_root() {
    let json = r#"{"name":"t1","steps":[{"action":"run_command","args":["rm -rf /"]}]}"#;
    match convert(json, SecurityLevel::Strict) {
        Err(ConvertError::SecurityViolation { step, preview, .. }) => {
            assert_eq!(step, 0);
            assert!(!preview.contains("rm -rf /"));
        }
        other => panic!("expected security violation, got {:?}", other),
    }
}

#[test]
fn test_standard_redacts_rm_rf_root() {
    let json = r#"{"name":"t1","steps":[{"action":"run_command","args":["rm -rf /"]}]}"#;
    let script = convert(json, SecurityLevel::Standard).unwrap();

    assert!(script.text.contains("[REDACTED]"));
    assert!(!script.text.contains("rm -rf /"));
    assert_eq!(script.findings.len(), 1);
    assert_eq!(script.findings[0].kind, FindingKind::Dangerous);
}

#[test]
fn test_unknown_action_rejected() {
    let json = r#"{"name":"t","steps":[{"action":"unknown_action_xyz","args":[]}]}"#;
    match convert(json, SecurityLevel::Standard) {
        Err(ConvertError::UnsupportedAction { action, step }) => {
            assert_eq!(action, "unknown_action_xyz");
            assert_eq!(step, 0);
        }
        other => panic!("expected unsupported action, got {:?}", other),
    }
}

#[test]
fn test_empty_steps() {
    let converter = Converter::new(&Config::default()).unwrap();
    let tc = json2robot::TestCase::from_json(r#"{"name":"t2","steps":[]}"#).unwrap();
    let result = converter.convert_test_case(&tc).unwrap();
    assert!(result.statements.is_empty());
    assert!(result.findings.is_empty());

    let script = converter.convert(r#"{"name":"t2","steps":[]}"#).unwrap();
    assert!(script.findings.is_empty());
    assert!(script.text.starts_with("*** Test Cases ***\nt2\n"));
}

// ============================================================================
// Output shape
// ============================================================================

#[test]
fn test_full_suite_output() {
    let json = r#"{
        "name": "Build and package",
        "documentation": "Builds the project",
        "tags": ["ci"],
        "steps": [
            {"action": "create_directory", "args": ["dist"]},
            {"action": "run_command", "args": ["make all"]},
            {"action": "file_should_exist", "args": ["dist/app.tar.gz"]},
            {"action": "log", "args": ["packaged"]}
        ]
    }"#;
    let script = convert(json, SecurityLevel::Standard).unwrap();

    let expected = "\
*** Settings ***
Library    OperatingSystem
Library    Process

*** Test Cases ***
Build and package
    [Documentation]    Builds the project
    [Tags]    ci
    Create Directory    dist
    ${result}=    Run Process    make all    shell=True
    Should Be Equal As Integers    ${result.rc}    0
    File Should Exist    dist/app.tar.gz
    Log    packaged
";
    assert_eq!(script.text, expected);
    assert!(script.findings.is_empty());
}

#[test]
fn test_input_text_is_escaped() {
    let json = r#"{"name":"t","steps":[{"action":"log","args":["value is ${SECRET}"]}]}"#;
    let script = convert(json, SecurityLevel::Standard).unwrap();
    assert!(script.text.contains("Log    value is \\${SECRET}\n"));
}

#[test]
fn test_order_preserved() {
    let steps: Vec<String> = (0..20)
        .map(|i| format!(r#"{{"action":"log","args":["message {}"]}}"#, i))
        .collect();
    let json = format!(r#"{{"name":"t","steps":[{}]}}"#, steps.join(","));
    let script = convert(&json, SecurityLevel::Standard).unwrap();

    let mut last = 0;
    for i in 0..20 {
        let pos = script
            .text
            .find(&format!("Log    message {}\n", i))
            .expect("message present");
        assert!(pos >= last, "message {} out of order", i);
        last = pos;
    }
}

#[test]
fn test_conversion_is_idempotent() {
    let json = r#"{"name":"t","steps":[
        {"action":"run_command","args":["sudo apt-get install -y jq"]},
        {"action":"read_file","args":["/home/u/.aws/credentials"]},
        {"action":"log","args":["ok"]}
    ]}"#;
    let converter = Converter::new(&config(SecurityLevel::Standard)).unwrap();
    let first = converter.convert(json).unwrap();
    let second = converter.convert(json).unwrap();
    assert_eq!(first.text, second.text);
    assert_eq!(first.findings, second.findings);
    assert_eq!(first.findings.len(), 2);
}

// ============================================================================
// Input validation
// ============================================================================

#[test]
fn test_malformed_input_names_field() {
    let cases = [
        ("not json", "$"),
        (r#"{"steps":[]}"#, "name"),
        (r#"{"name":"t","steps":[{"action":7}]}"#, "steps[0].action"),
        (r#"{"name":"t","steps":[{"action":"log","args":[null]}]}"#, "steps[0].args[0]"),
        (r#"{"name":"t","steps":[{"action":"copy_file","args":["a"]}]}"#, "steps[0].args"),
    ];
    for (json, expected) in cases {
        match convert(json, SecurityLevel::Standard) {
            Err(ConvertError::MalformedInput { path, .. }) => {
                assert_eq!(path, expected, "{}", json)
            }
            other => panic!("expected malformed input for {}, got {:?}", json, other),
        }
    }
}

// ============================================================================
// Unmapped actions
// ============================================================================

#[test]
fn test_passthrough_emits_comment() {
    let mut config = Config::default();
    config.general.unmapped_action_policy = UnmappedActionPolicy::Passthrough;
    let json = r#"{"name":"t","steps":[{"action":"click_button","args":["Submit"]}]}"#;
    let script = convert_json_to_script(json, &config).unwrap();

    assert!(script
        .text
        .contains("Comment    unmapped action: click_button    Submit\n"));
    assert_eq!(script.findings.len(), 1);
    assert_eq!(script.findings[0].kind, FindingKind::Unmapped);
}

#[test]
fn test_custom_action_table() {
    let mut actions = ActionTable::builtin();
    actions.register(
        "open_browser",
        ActionTemplate::new("Open Browser")
            .library("SeleniumLibrary")
            .arg(ArgRole::Text)
            .rest(ArgRole::Text),
    );
    let converter = Converter::with_actions(&Config::default(), actions).unwrap();
    let json = r#"{"name":"t","steps":[
        {"action":"open_browser","args":["https://example.com","chrome"]}
    ]}"#;
    let script = converter.convert(json).unwrap();

    assert!(script.text.contains("Library    SeleniumLibrary\n"));
    assert!(script.text.contains("Open Browser    https://example.com    chrome\n"));
}
