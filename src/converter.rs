//! JSON to Robot Framework converter
//!
//! Orchestrates parsing, conversion and serialization.

use crate::config::{Config, SecurityLevel, UnmappedActionPolicy};
use crate::engine::actions::ActionTable;
use crate::engine::ConversionEngine;
use crate::error::Result;
use crate::input::TestCase;
use crate::output::{ConversionResult, Script};
use crate::robot::RobotWriter;
use crate::rules::catalog::PatternCatalog;

/// Reusable converter. Compiles patterns once; `convert` takes `&self` and
/// may be called from several threads at once.
#[derive(Debug, Clone)]
pub struct Converter {
    catalog: PatternCatalog,
    actions: ActionTable,
    writer: RobotWriter,
    level: SecurityLevel,
    unmapped: UnmappedActionPolicy,
}

impl Converter {
    /// Build a converter with the built-in action table
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_actions(config, ActionTable::builtin())
    }

    /// Build a converter with a caller-supplied action table
    pub fn with_actions(config: &Config, actions: ActionTable) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog: PatternCatalog::new(&config.patterns)?,
            actions,
            writer: RobotWriter::new(&config.robot),
            level: config.general.security_level,
            unmapped: config.general.unmapped_action_policy,
        })
    }

    pub fn security_level(&self) -> SecurityLevel {
        self.level
    }

    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }

    /// Run the engine on an already-parsed test case
    pub fn convert_test_case(&self, test_case: &TestCase) -> Result<ConversionResult> {
        ConversionEngine::new(&self.catalog, &self.actions, self.unmapped)
            .convert(test_case, self.level)
    }

    /// Parse, convert and serialize one JSON test case
    pub fn convert(&self, raw_json: &str) -> Result<Script> {
        let test_case = TestCase::from_json(raw_json)?;
        let result = self.convert_test_case(&test_case)?;
        let text = self.writer.render(&result);

        tracing::info!(
            test = %result.name,
            level = %self.level,
            statements = result.statements.len(),
            findings = result.findings.len(),
            "converted test case"
        );

        Ok(Script {
            text,
            findings: result.findings,
        })
    }
}

/// Convert a JSON test case to Robot Framework text in one call
pub fn convert_json_to_script(raw_json: &str, config: &Config) -> Result<Script> {
    Converter::new(config)?.convert(raw_json)
}
