//! Security rules for json2robot
//!
//! Defines dangerous command patterns, sensitive path patterns, and the
//! catalog that compiles them per security level.

pub mod catalog;
pub mod dangerous;
pub mod sensitive;

use crate::config::SecurityLevel;

/// A built-in security rule definition
#[derive(Debug, Clone)]
pub struct Rule {
    /// Unique identifier for this rule
    pub id: &'static str,

    /// Least restrictive security level at which this rule is active
    pub level: SecurityLevel,

    /// Regex pattern to match (compiled case-insensitive, unanchored)
    pub pattern: &'static str,

    /// Human-readable reason for flagging
    pub reason: &'static str,
}

impl Rule {
    /// Create a new rule
    pub const fn new(
        id: &'static str,
        level: SecurityLevel,
        pattern: &'static str,
        reason: &'static str,
    ) -> Self {
        Self {
            id,
            level,
            pattern,
            reason,
        }
    }
}

/// Collect the rules from cumulative tiers that are active at `level`
pub(crate) fn active_rules(tiers: &[&'static [Rule]], level: SecurityLevel) -> Vec<&'static Rule> {
    tiers
        .iter()
        .flat_map(|tier| tier.iter())
        .filter(|rule| level.includes(rule.level))
        .collect()
}
