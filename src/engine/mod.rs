//! Conversion engine for json2robot
//!
//! Walks a parsed test case step by step, maps each action to keyword
//! statements and screens every command and path argument.

pub mod actions;
pub mod classifier;
pub mod common;

use crate::config::{SecurityLevel, UnmappedActionPolicy};
use crate::error::{ConvertError, Result};
use crate::input::{Step, TestCase};
use crate::output::{
    ArgToken, ConversionResult, FindingAction, FindingKind, Location, SecurityFinding, Statement,
};
use crate::rules::catalog::{PatternCatalog, PatternKind};

use actions::{ActionTable, ArgRole};
use classifier::{Outcome, SecurityClassifier};
use common::redacted_preview;

/// Keyword used for passthrough steps
const COMMENT_KEYWORD: &str = "Comment";

/// The conversion engine. Holds only borrowed, read-only state, so one
/// instance can serve concurrent conversions.
#[derive(Debug, Clone, Copy)]
pub struct ConversionEngine<'a> {
    classifier: SecurityClassifier<'a>,
    actions: &'a ActionTable,
    unmapped: UnmappedActionPolicy,
}

impl<'a> ConversionEngine<'a> {
    pub fn new(
        catalog: &'a PatternCatalog,
        actions: &'a ActionTable,
        unmapped: UnmappedActionPolicy,
    ) -> Self {
        Self {
            classifier: SecurityClassifier::new(catalog),
            actions,
            unmapped,
        }
    }

    /// Convert a test case into statements and findings
    pub fn convert(&self, test_case: &TestCase, level: SecurityLevel) -> Result<ConversionResult> {
        let mut result = ConversionResult {
            name: test_case.name.clone(),
            documentation: test_case.documentation.clone(),
            tags: test_case.tags.clone(),
            statements: Vec::with_capacity(test_case.steps.len()),
            findings: Vec::new(),
        };

        for (idx, step) in test_case.steps.iter().enumerate() {
            tracing::debug!(
                step = idx,
                action = %step.action,
                args = step.args.len(),
                "converting step"
            );
            let statements = self.convert_step(step, idx, level, &mut result.findings)?;
            result.statements.extend(statements);
        }

        Ok(result)
    }

    fn convert_step(
        &self,
        step: &Step,
        idx: usize,
        level: SecurityLevel,
        findings: &mut Vec<SecurityFinding>,
    ) -> Result<Vec<Statement>> {
        let Some(template) = self.actions.get(&step.action) else {
            return self.unmapped_step(step, idx, findings);
        };

        let count = step.args.len();
        let too_many = template.max_args().is_some_and(|max| count > max);
        if count < template.min_args() || too_many {
            return Err(ConvertError::malformed(
                format!("steps[{}].args", idx),
                format!(
                    "action `{}` takes {} argument(s), got {}",
                    step.action,
                    template.arity(),
                    count
                ),
            ));
        }

        let mut tokens = Vec::with_capacity(count);
        for (arg_idx, value) in step.args.iter().enumerate() {
            let location = Location {
                step: idx,
                arg: Some(arg_idx),
            };
            // Arity was checked above, so every position has a role
            let role = template.role_for(arg_idx).unwrap_or(ArgRole::Text);
            tokens.push(self.screen(role, value, location, level, findings)?);
        }

        Ok(template.instantiate(tokens))
    }

    /// Classify one argument and apply the policy for its outcome
    fn screen(
        &self,
        role: ArgRole,
        value: &str,
        location: Location,
        level: SecurityLevel,
        findings: &mut Vec<SecurityFinding>,
    ) -> Result<ArgToken> {
        let kind = match role {
            ArgRole::Text => return Ok(ArgToken::verbatim(value)),
            ArgRole::Command => PatternKind::Command,
            ArgRole::Path => PatternKind::Path,
        };

        let classification = self.classifier.classify(level, kind, value);
        let (rule_id, pattern) = match classification.matched {
            Some(entry) => (entry.id.clone(), entry.pattern.clone()),
            None => return Ok(ArgToken::screened(value)),
        };

        let finding_kind = match classification.outcome {
            Outcome::Safe => return Ok(ArgToken::screened(value)),
            Outcome::Dangerous if level == SecurityLevel::Strict => {
                tracing::warn!(%location, rule = %rule_id, "rejecting dangerous command");
                return Err(ConvertError::SecurityViolation {
                    rule_id,
                    pattern,
                    step: location.step,
                    preview: redacted_preview(value),
                });
            }
            Outcome::Dangerous => FindingKind::Dangerous,
            Outcome::Sensitive => FindingKind::Sensitive,
        };

        let finding = SecurityFinding {
            kind: finding_kind,
            rule_id: Some(rule_id),
            pattern: Some(pattern),
            value: value.to_string(),
            action: FindingAction::Redacted,
            location,
        };
        tracing::debug!("{}", finding.summary());
        findings.push(finding);

        Ok(ArgToken::redacted())
    }

    fn unmapped_step(
        &self,
        step: &Step,
        idx: usize,
        findings: &mut Vec<SecurityFinding>,
    ) -> Result<Vec<Statement>> {
        match self.unmapped {
            UnmappedActionPolicy::Reject => Err(ConvertError::UnsupportedAction {
                action: step.action.clone(),
                step: idx,
            }),
            UnmappedActionPolicy::Passthrough => {
                let finding = SecurityFinding {
                    kind: FindingKind::Unmapped,
                    rule_id: None,
                    pattern: None,
                    value: step.action.clone(),
                    action: FindingAction::Passthrough,
                    location: Location {
                        step: idx,
                        arg: None,
                    },
                };
                tracing::debug!("{}", finding.summary());
                findings.push(finding);

                let mut args = Vec::with_capacity(step.args.len() + 1);
                args.push(ArgToken::verbatim(format!("unmapped action: {}", step.action)));
                args.extend(step.args.iter().map(ArgToken::verbatim));
                Ok(vec![Statement::new(COMMENT_KEYWORD, args)])
            }
        }
    }
}
