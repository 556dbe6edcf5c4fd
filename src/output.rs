//! Conversion output model
//!
//! Statements produced by the engine, the security findings recorded along
//! the way, and the final script handed back to callers.

use serde::Serialize;

use crate::engine::common::{redacted_preview, REDACTION_PLACEHOLDER};

/// Where an argument token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Literal supplied by the action template
    Generated,
    /// Raw input string that was not subject to classification
    Verbatim,
    /// Raw input string that passed classification
    Screened,
    /// Placeholder standing in for a matched value
    Redacted,
}

/// One argument cell of a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgToken {
    pub value: String,
    pub provenance: Provenance,
}

impl ArgToken {
    pub fn generated(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            provenance: Provenance::Generated,
        }
    }

    pub fn verbatim(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            provenance: Provenance::Verbatim,
        }
    }

    pub fn screened(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            provenance: Provenance::Screened,
        }
    }

    pub fn redacted() -> Self {
        Self {
            value: REDACTION_PLACEHOLDER.to_string(),
            provenance: Provenance::Redacted,
        }
    }
}

/// One emitted keyword call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Variable assigned from the keyword's return value, e.g. `${result}`
    pub assign: Option<String>,
    pub keyword: String,
    pub args: Vec<ArgToken>,
    /// Library that must be imported for `keyword`
    pub library: Option<String>,
}

impl Statement {
    pub fn new(keyword: impl Into<String>, args: Vec<ArgToken>) -> Self {
        Self {
            assign: None,
            keyword: keyword.into(),
            args,
            library: None,
        }
    }

    pub fn with_assign(mut self, assign: impl Into<String>) -> Self {
        self.assign = Some(assign.into());
        self
    }

    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }
}

/// What a finding is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Dangerous,
    Sensitive,
    Unmapped,
}

/// What the engine did about a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingAction {
    Redacted,
    Passthrough,
}

/// Position in the input document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub step: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<usize>,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.arg {
            Some(arg) => write!(f, "steps[{}].args[{}]", self.step, arg),
            None => write!(f, "steps[{}]", self.step),
        }
    }
}

/// Advisory record of a non-fatal security decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityFinding {
    pub kind: FindingKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Original input value. Not serialized; use [`SecurityFinding::preview`].
    #[serde(skip)]
    pub value: String,
    pub action: FindingAction,
    pub location: Location,
}

impl SecurityFinding {
    /// Redacted rendering of the original value, safe to log
    pub fn preview(&self) -> String {
        redacted_preview(&self.value)
    }

    /// One-line description for warnings
    pub fn summary(&self) -> String {
        let what = match self.kind {
            FindingKind::Dangerous => "dangerous command",
            FindingKind::Sensitive => "sensitive path",
            FindingKind::Unmapped => "unmapped action",
        };
        match (&self.rule_id, self.action) {
            (Some(rule), FindingAction::Redacted) => {
                format!("{} redacted at {} ({})", what, self.location, rule)
            }
            (_, FindingAction::Passthrough) => {
                format!("{} `{}` passed through as comment at {}", what, self.value, self.location)
            }
            (None, FindingAction::Redacted) => format!("{} redacted at {}", what, self.location),
        }
    }
}

/// Finding as written to JSON reports, with the preview in place of the value
#[derive(Debug, Serialize)]
struct FindingReport<'a> {
    #[serde(flatten)]
    finding: &'a SecurityFinding,
    preview: String,
}

/// Serialize findings as a JSON array of redacted reports
pub fn findings_to_json(findings: &[SecurityFinding]) -> String {
    let reports: Vec<FindingReport<'_>> = findings
        .iter()
        .map(|finding| FindingReport {
            finding,
            preview: finding.preview(),
        })
        .collect();
    serde_json::to_string(&reports).unwrap_or_else(|_| "[]".to_string())
}

/// Engine output for one test case
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionResult {
    pub name: String,
    pub documentation: Option<String>,
    pub tags: Vec<String>,
    pub statements: Vec<Statement>,
    pub findings: Vec<SecurityFinding>,
}

/// Serialized script plus the findings recorded while producing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub text: String,
    pub findings: Vec<SecurityFinding>,
}
