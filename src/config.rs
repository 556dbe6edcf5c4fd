//! Configuration loading for json2robot
//!
//! Supports TOML configuration with embedded defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ConvertError, Result};

/// Security level determines which patterns are active and what a
/// dangerous match does.
///
/// Variants are declared least to most restrictive, so `Ord` follows
/// restrictiveness: `Permissive < Standard < Strict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    /// Only unambiguous, high-confidence patterns
    Permissive,

    /// Balanced pattern set, redacts dangerous values
    #[default]
    Standard,

    /// Broadest pattern set, rejects conversions with dangerous values
    Strict,
}

impl SecurityLevel {
    /// All levels, least restrictive first
    pub const ALL: [SecurityLevel; 3] = [
        SecurityLevel::Permissive,
        SecurityLevel::Standard,
        SecurityLevel::Strict,
    ];

    /// Check if a rule tagged with `rule_level` is active under this level
    pub fn includes(&self, rule_level: SecurityLevel) -> bool {
        rule_level <= *self
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::Permissive => "permissive",
            SecurityLevel::Standard => "standard",
            SecurityLevel::Strict => "strict",
        }
    }
}

impl FromStr for SecurityLevel {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "permissive" => Ok(SecurityLevel::Permissive),
            "standard" => Ok(SecurityLevel::Standard),
            "strict" => Ok(SecurityLevel::Strict),
            other => Err(ConvertError::Configuration(format!(
                "unknown security level `{}` (expected strict, standard or permissive)",
                other
            ))),
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with an action name that has no mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedActionPolicy {
    /// Fail the conversion
    #[default]
    Reject,

    /// Emit the step as a comment and record a finding
    Passthrough,
}

impl FromStr for UnmappedActionPolicy {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(UnmappedActionPolicy::Reject),
            "passthrough" => Ok(UnmappedActionPolicy::Passthrough),
            other => Err(ConvertError::Configuration(format!(
                "unknown unmapped action policy `{}` (expected reject or passthrough)",
                other
            ))),
        }
    }
}

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Security level for pattern selection and policy
    pub security_level: SecurityLevel,

    /// Handling of actions missing from the action table
    pub unmapped_action_policy: UnmappedActionPolicy,

    /// Enable audit logging
    pub audit_log: bool,

    /// Path to audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            security_level: SecurityLevel::Standard,
            unmapped_action_policy: UnmappedActionPolicy::Reject,
            audit_log: false,
            audit_path: Some("~/.config/json2robot/audit.jsonl".to_string()),
        }
    }
}

/// Replacement pattern lists for one level.
///
/// A list that is present replaces the built-in list entirely; there is no
/// merge. A list that is absent keeps the built-in defaults.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PatternOverride {
    pub dangerous_commands: Option<Vec<String>>,
    pub sensitive_paths: Option<Vec<String>>,
}

/// Per-level pattern overrides (`[patterns.<level>]`)
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PatternOverrides {
    pub permissive: Option<PatternOverride>,
    pub standard: Option<PatternOverride>,
    pub strict: Option<PatternOverride>,
}

impl PatternOverrides {
    /// Get the override for a level, if one was supplied
    pub fn get(&self, level: SecurityLevel) -> Option<&PatternOverride> {
        match level {
            SecurityLevel::Permissive => self.permissive.as_ref(),
            SecurityLevel::Standard => self.standard.as_ref(),
            SecurityLevel::Strict => self.strict.as_ref(),
        }
    }

    /// Set the override for a level
    pub fn set(&mut self, level: SecurityLevel, patterns: PatternOverride) {
        let slot = match level {
            SecurityLevel::Permissive => &mut self.permissive,
            SecurityLevel::Standard => &mut self.standard,
            SecurityLevel::Strict => &mut self.strict,
        };
        *slot = Some(patterns);
    }

    pub fn is_empty(&self) -> bool {
        self.permissive.is_none() && self.standard.is_none() && self.strict.is_none()
    }
}

/// Robot Framework output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Number of spaces between cells (Robot requires at least two)
    pub separator_width: usize,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self { separator_width: 4 }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub patterns: PatternOverrides,
    pub robot: RobotConfig,
}

impl Config {
    /// Load configuration from the standard locations or use defaults
    pub fn load() -> Self {
        let config_paths = [
            // User-specific config
            dirs::config_dir().map(|p| p.join("json2robot/config.toml")),
            // System-wide config
            Some(PathBuf::from("/etc/json2robot/config.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded configuration");
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "ignoring config file");
                    }
                }
            }
        }

        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConvertError::Configuration(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values serde cannot rule out on its own
    pub fn validate(&self) -> Result<()> {
        if self.robot.separator_width < 2 {
            return Err(ConvertError::Configuration(format!(
                "robot.separator_width must be at least 2, got {}",
                self.robot.separator_width
            )));
        }
        Ok(())
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get the audit log path (expanded), if auditing is enabled
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        self.general.audit_path.as_deref().map(Self::expand_path)
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[general]
security_level = "standard"
unmapped_action_policy = "reject"
audit_log = false
audit_path = "~/.config/json2robot/audit.jsonl"

[robot]
separator_width = 4
"#;
