//! JSONL audit logging for json2robot
//!
//! Records the outcome of every conversion, with its security findings, to a
//! JSONL file for later review. Raw values are never written; findings carry
//! redacted previews.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::SecurityLevel;
use crate::error::ConvertError;
use crate::output::{FindingAction, FindingKind, Location, SecurityFinding};

/// Outcome recorded for a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditOutcome {
    Converted,
    Rejected,
}

/// Redacted view of a finding
#[derive(Debug, Serialize)]
pub struct AuditFinding {
    pub kind: FindingKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    pub action: FindingAction,
    pub location: Location,
    pub preview: String,
}

impl From<&SecurityFinding> for AuditFinding {
    fn from(finding: &SecurityFinding) -> Self {
        Self {
            kind: finding.kind,
            rule_id: finding.rule_id.clone(),
            action: finding.action,
            location: finding.location,
            preview: finding.preview(),
        }
    }
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    /// Timestamp of the conversion
    pub timestamp: DateTime<Utc>,

    pub outcome: AuditOutcome,

    /// Input file, or `-` for stdin
    pub source: String,

    pub security_level: SecurityLevel,

    pub findings: Vec<AuditFinding>,

    /// Error message for rejected conversions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEntry {
    /// Entry for a successful conversion
    pub fn converted(source: &str, level: SecurityLevel, findings: &[SecurityFinding]) -> Self {
        Self {
            timestamp: Utc::now(),
            outcome: AuditOutcome::Converted,
            source: source.to_string(),
            security_level: level,
            findings: findings.iter().map(AuditFinding::from).collect(),
            error: None,
        }
    }

    /// Entry for a failed conversion
    pub fn rejected(source: &str, level: SecurityLevel, error: &ConvertError) -> Self {
        Self {
            timestamp: Utc::now(),
            outcome: AuditOutcome::Rejected,
            source: source.to_string(),
            security_level: level,
            findings: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

/// Audit logger
#[derive(Default)]
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Create a new audit logger; `None` or an unopenable path disables it
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            // Ensure parent directory exists
            if let Some(parent) = p.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    tracing::warn!(
                        path = %parent.display(),
                        error = %e,
                        "cannot create audit directory"
                    );
                }
            }

            match OpenOptions::new().create(true).append(true).open(p) {
                Ok(file) => Some(BufWriter::new(file)),
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "audit logging disabled");
                    None
                }
            }
        });

        Self { writer }
    }

    /// Log an audit entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Check if logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}
