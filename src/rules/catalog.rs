//! Compiled pattern catalog
//!
//! A [`PatternCatalog`] holds one [`PatternSet`] per security level. It is
//! built once, from the built-in tiers plus any user overrides, and is
//! read-only afterwards so it can be shared across concurrent conversions.

use regex::{RegexSet, RegexSetBuilder};

use crate::config::{PatternOverride, PatternOverrides, SecurityLevel};
use crate::error::{ConvertError, Result};
use crate::rules::{dangerous, sensitive, Rule};

/// Which list a pattern belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Literal command strings
    Command,
    /// File system paths
    Path,
}

impl PatternKind {
    fn list_name(&self) -> &'static str {
        match self {
            PatternKind::Command => "dangerous_commands",
            PatternKind::Path => "sensitive_paths",
        }
    }
}

/// One pattern in a compiled list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub id: String,
    pub pattern: String,
    pub reason: String,
}

impl From<&Rule> for PatternEntry {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id.to_string(),
            pattern: rule.pattern.to_string(),
            reason: rule.reason.to_string(),
        }
    }
}

/// Ordered, compiled pattern list. Index order is match priority.
#[derive(Debug, Clone)]
pub struct PatternList {
    entries: Vec<PatternEntry>,
    set: RegexSet,
}

impl PatternList {
    fn compile(entries: Vec<PatternEntry>) -> std::result::Result<Self, regex::Error> {
        let set = RegexSetBuilder::new(entries.iter().map(|e| e.pattern.as_str()))
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()?;
        Ok(Self { entries, set })
    }

    /// Return the highest-priority pattern matching `value`
    pub fn first_match(&self, value: &str) -> Option<&PatternEntry> {
        // SetMatches iterates in ascending index order
        self.set
            .matches(value)
            .iter()
            .next()
            .and_then(|idx| self.entries.get(idx))
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Dangerous-command and sensitive-path lists for one security level
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub dangerous_commands: PatternList,
    pub sensitive_paths: PatternList,
}

impl PatternSet {
    /// Get the list used to classify values of `kind`
    pub fn list(&self, kind: PatternKind) -> &PatternList {
        match kind {
            PatternKind::Command => &self.dangerous_commands,
            PatternKind::Path => &self.sensitive_paths,
        }
    }
}

/// Pattern sets for every security level
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    permissive: PatternSet,
    standard: PatternSet,
    strict: PatternSet,
}

impl PatternCatalog {
    /// Build the catalog from built-in rules with the given overrides applied
    pub fn new(overrides: &PatternOverrides) -> Result<Self> {
        let build = |level| build_set(level, overrides.get(level));
        Ok(Self {
            permissive: build(SecurityLevel::Permissive)?,
            standard: build(SecurityLevel::Standard)?,
            strict: build(SecurityLevel::Strict)?,
        })
    }

    /// Build the catalog with built-in rules only
    pub fn builtin() -> Self {
        let sets = SecurityLevel::ALL.map(|level| {
            let commands = builtin_entries(PatternKind::Command, level);
            let paths = builtin_entries(PatternKind::Path, level);
            PatternSet {
                dangerous_commands: PatternList::compile(commands).unwrap_or_else(|e| {
                    tracing::error!(
                        %level,
                        error = %e,
                        "built-in command patterns failed to compile"
                    );
                    empty_list()
                }),
                sensitive_paths: PatternList::compile(paths).unwrap_or_else(|e| {
                    tracing::error!(%level, error = %e, "built-in path patterns failed to compile");
                    empty_list()
                }),
            }
        });
        let [permissive, standard, strict] = sets;
        Self {
            permissive,
            standard,
            strict,
        }
    }

    /// Look up the pattern set for a level
    pub fn patterns_for(&self, level: SecurityLevel) -> &PatternSet {
        match level {
            SecurityLevel::Permissive => &self.permissive,
            SecurityLevel::Standard => &self.standard,
            SecurityLevel::Strict => &self.strict,
        }
    }
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn empty_list() -> PatternList {
    PatternList {
        entries: Vec::new(),
        set: RegexSet::empty(),
    }
}

fn builtin_entries(kind: PatternKind, level: SecurityLevel) -> Vec<PatternEntry> {
    let rules = match kind {
        PatternKind::Command => dangerous::get_rules_for_level(level),
        PatternKind::Path => sensitive::get_path_patterns_for_level(level),
    };
    rules.into_iter().map(PatternEntry::from).collect()
}

fn override_entries(
    kind: PatternKind,
    level: SecurityLevel,
    patterns: &[String],
) -> Vec<PatternEntry> {
    patterns
        .iter()
        .enumerate()
        .map(|(idx, pattern)| PatternEntry {
            id: format!("{}-{}-{}", level, kind.list_name(), idx),
            pattern: pattern.clone(),
            reason: "User-supplied pattern".to_string(),
        })
        .collect()
}

fn build_list(
    kind: PatternKind,
    level: SecurityLevel,
    replacement: Option<&Vec<String>>,
) -> Result<PatternList> {
    let entries = match replacement {
        Some(patterns) => {
            // Validate one by one so the error names the offending pattern
            for pattern in patterns {
                let check = RegexSetBuilder::new([pattern.as_str()])
                    .case_insensitive(true)
                    .dot_matches_new_line(true)
                    .build();
                if let Err(e) = check {
                    return Err(ConvertError::Configuration(format!(
                        "invalid {} override for {} level: `{}`: {}",
                        kind.list_name(),
                        level,
                        pattern,
                        e
                    )));
                }
            }
            override_entries(kind, level, patterns)
        }
        None => builtin_entries(kind, level),
    };

    PatternList::compile(entries).map_err(|e| {
        ConvertError::Configuration(format!(
            "cannot compile {} for {} level: {}",
            kind.list_name(),
            level,
            e
        ))
    })
}

fn build_set(level: SecurityLevel, overrides: Option<&PatternOverride>) -> Result<PatternSet> {
    let commands = overrides.and_then(|o| o.dangerous_commands.as_ref());
    let paths = overrides.and_then(|o| o.sensitive_paths.as_ref());
    if overrides.is_some() {
        tracing::debug!(
            %level,
            commands = commands.is_some(),
            paths = paths.is_some(),
            "applying pattern overrides"
        );
    }
    Ok(PatternSet {
        dangerous_commands: build_list(PatternKind::Command, level, commands)?,
        sensitive_paths: build_list(PatternKind::Path, level, paths)?,
    })
}
