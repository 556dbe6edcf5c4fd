//! Sensitive path rules
//!
//! Defines patterns for files and directories that commonly hold
//! credentials, keys, or system configuration.

use crate::config::SecurityLevel;
use crate::rules::{active_rules, Rule};

/// Permissive tier - direct credential stores and private keys
pub const PERMISSIVE_PATH_PATTERNS: &[Rule] = &[
    Rule::new(
        "shadow",
        SecurityLevel::Permissive,
        r"/etc/(g?shadow|sudoers)\b",
        "System password hashes or sudo policy",
    ),
    Rule::new(
        "ssh-private-key",
        SecurityLevel::Permissive,
        r"\.ssh/id_(rsa|ed25519|ecdsa|dsa)$",
        "SSH private key file",
    ),
    Rule::new(
        "aws-credentials",
        SecurityLevel::Permissive,
        r"\.aws/credentials$",
        "AWS credentials file",
    ),
    Rule::new(
        "kube-config",
        SecurityLevel::Permissive,
        r"\.kube/config$",
        "Kubernetes config with credentials",
    ),
    Rule::new(
        "docker-config",
        SecurityLevel::Permissive,
        r"\.docker/config\.json$",
        "Docker registry credentials",
    ),
    Rule::new(
        "gnupg-keyring",
        SecurityLevel::Permissive,
        r"\.gnupg/(secring|private-keys)",
        "GPG private keyring",
    ),
];

/// Standard tier - secret files and key containers
pub const STANDARD_PATH_PATTERNS: &[Rule] = &[
    Rule::new(
        "env-file",
        SecurityLevel::Standard,
        r"(^|/)\.env$",
        "Environment file may contain secrets",
    ),
    Rule::new(
        "env-variant",
        SecurityLevel::Standard,
        r"\.env\.(local|production|prod|development|dev|staging|test)$",
        "Environment file variant may contain secrets",
    ),
    Rule::new(
        "key-material",
        SecurityLevel::Standard,
        r"\.(pem|key|p12|pfx|jks|keystore)$",
        "Private key or certificate container",
    ),
    Rule::new(
        "ssh-dir",
        SecurityLevel::Standard,
        r"\.ssh/",
        "SSH configuration directory",
    ),
    Rule::new(
        "token-rc-files",
        SecurityLevel::Standard,
        r"\.(netrc|npmrc|pypirc|pgpass|git-credentials)$",
        "Authentication token file",
    ),
    Rule::new(
        "credentials-json",
        SecurityLevel::Standard,
        r"credentials\.json$",
        "Credentials configuration file",
    ),
    Rule::new(
        "secrets-file",
        SecurityLevel::Standard,
        r"secrets?\.(json|ya?ml|toml)$",
        "Secrets configuration file",
    ),
    Rule::new(
        "cloud-tokens",
        SecurityLevel::Standard,
        r"(gcloud/credentials\.db|\.azure/accessTokens\.json)$",
        "Cloud provider access tokens",
    ),
    Rule::new(
        "passwd",
        SecurityLevel::Standard,
        r"/etc/passwd\b",
        "System user database",
    ),
    Rule::new(
        "root-home",
        SecurityLevel::Standard,
        r"^/root(/|$)",
        "Root user's home directory",
    ),
];

/// Strict tier - anything that might hold secrets or system state
pub const STRICT_PATH_PATTERNS: &[Rule] = &[
    Rule::new(
        "etc-dir",
        SecurityLevel::Strict,
        r"(^|/)etc/",
        "System configuration directory",
    ),
    Rule::new(
        "env-any",
        SecurityLevel::Strict,
        r"\.env",
        "Environment file or directory",
    ),
    Rule::new(
        "secret-words",
        SecurityLevel::Strict,
        r"(secret|credential|passw(or)?d|token|private)",
        "Path name suggests secrets",
    ),
    Rule::new(
        "tool-config-dirs",
        SecurityLevel::Strict,
        r"\.(config|aws|azure|gcloud|kube|docker|gnupg)/",
        "Tool configuration directory",
    ),
    Rule::new(
        "kernel-pseudo-fs",
        SecurityLevel::Strict,
        r"^/(proc|sys|boot|dev)(/|$)",
        "Kernel or boot filesystem",
    ),
    Rule::new(
        "ssh-key-name",
        SecurityLevel::Strict,
        r"\bid_[a-z0-9]+",
        "SSH key file name",
    ),
    Rule::new(
        "certificates",
        SecurityLevel::Strict,
        r"\.(crt|cer|der|csr)$",
        "Certificate file",
    ),
];

const TIERS: &[&[Rule]] = &[
    PERMISSIVE_PATH_PATTERNS,
    STANDARD_PATH_PATTERNS,
    STRICT_PATH_PATTERNS,
];

/// Get all sensitive path patterns active at the specified security level
pub fn get_path_patterns_for_level(level: SecurityLevel) -> Vec<&'static Rule> {
    active_rules(TIERS, level)
}
