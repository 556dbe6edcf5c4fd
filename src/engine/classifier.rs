//! Security classification of command and path literals

use crate::config::SecurityLevel;
use crate::rules::catalog::{PatternCatalog, PatternEntry, PatternKind};

/// Result of classifying one value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Safe,
    Dangerous,
    Sensitive,
}

/// Classification with the pattern that decided it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub outcome: Outcome,
    pub matched: Option<&'a PatternEntry>,
}

impl<'a> Classification<'a> {
    fn safe() -> Self {
        Self {
            outcome: Outcome::Safe,
            matched: None,
        }
    }

    pub fn is_safe(&self) -> bool {
        self.outcome == Outcome::Safe
    }
}

/// Evaluates values against a [`PatternCatalog`]
#[derive(Debug, Clone, Copy)]
pub struct SecurityClassifier<'a> {
    catalog: &'a PatternCatalog,
}

impl<'a> SecurityClassifier<'a> {
    pub fn new(catalog: &'a PatternCatalog) -> Self {
        Self { catalog }
    }

    /// Classify `value` as a command or a path under `level`.
    ///
    /// Matching is case-insensitive and unanchored; the first pattern in
    /// list order that matches decides.
    pub fn classify(
        &self,
        level: SecurityLevel,
        kind: PatternKind,
        value: &str,
    ) -> Classification<'a> {
        let list = self.catalog.patterns_for(level).list(kind);

        let matched = match kind {
            PatternKind::Command => list.first_match(value),
            PatternKind::Path => list.first_match(&normalize_path(value)),
        };

        match matched {
            Some(entry) => {
                tracing::debug!(%level, rule = %entry.id, ?kind, "value matched pattern");
                Classification {
                    outcome: match kind {
                        PatternKind::Command => Outcome::Dangerous,
                        PatternKind::Path => Outcome::Sensitive,
                    },
                    matched: Some(entry),
                }
            }
            None => Classification::safe(),
        }
    }
}

/// Normalize a file path for pattern matching
fn normalize_path(path: &str) -> String {
    // Windows separators
    path.replace('\\', "/")
}
