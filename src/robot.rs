//! Robot Framework serialization
//!
//! Turns a [`ConversionResult`] into `.robot` source text. This layer is
//! purely syntactic: it lays out sections and cells and escapes argument
//! text, but never decides what may appear in the output.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::RobotConfig;
use crate::output::{ArgToken, ConversionResult, Provenance, Statement};

/// Runs of two or more spaces, which Robot would read as a cell separator
static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

/// A leading `name=` that Robot would read as a named argument
static NAMED_ARG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)=").unwrap());

/// Writes Robot Framework test suites
#[derive(Debug, Clone)]
pub struct RobotWriter {
    separator: String,
}

impl RobotWriter {
    pub fn new(config: &RobotConfig) -> Self {
        Self {
            separator: " ".repeat(config.separator_width.max(2)),
        }
    }

    /// Render a full suite file for one test case
    pub fn render(&self, result: &ConversionResult) -> String {
        let mut out = String::new();

        let libraries: BTreeSet<&str> = result
            .statements
            .iter()
            .filter_map(|s| s.library.as_deref())
            .collect();
        if !libraries.is_empty() {
            out.push_str("*** Settings ***\n");
            for library in libraries {
                let _ = writeln!(out, "Library{}{}", self.separator, library);
            }
            out.push('\n');
        }

        out.push_str("*** Test Cases ***\n");
        out.push_str(&escape_name(&result.name));
        out.push('\n');

        if let Some(doc) = &result.documentation {
            self.write_row(&mut out, &["[Documentation]".to_string(), escape_argument(doc)]);
        }
        if !result.tags.is_empty() {
            let mut cells = vec!["[Tags]".to_string()];
            cells.extend(result.tags.iter().map(|t| escape_argument(t)));
            self.write_row(&mut out, &cells);
        }

        if result.statements.is_empty() {
            // Robot rejects test cases without keywords
            self.write_row(&mut out, &["No Operation".to_string()]);
        }
        for statement in &result.statements {
            self.write_row(&mut out, &statement_cells(statement));
        }

        out
    }

    fn write_row(&self, out: &mut String, cells: &[String]) {
        out.push_str(&self.separator);
        out.push_str(&cells.join(&self.separator));
        out.push('\n');
    }
}

impl Default for RobotWriter {
    fn default() -> Self {
        Self::new(&RobotConfig::default())
    }
}

fn statement_cells(statement: &Statement) -> Vec<String> {
    let mut cells = Vec::with_capacity(statement.args.len() + 2);
    if let Some(assign) = &statement.assign {
        cells.push(format!("{}=", assign));
    }
    cells.push(statement.keyword.clone());
    cells.extend(statement.args.iter().map(render_token));
    cells
}

fn render_token(token: &ArgToken) -> String {
    match token.provenance {
        Provenance::Generated | Provenance::Redacted => token.value.clone(),
        Provenance::Verbatim | Provenance::Screened => escape_argument(&token.value),
    }
}

/// Escape input text so Robot reads it back as the same literal string
pub fn escape_argument(value: &str) -> String {
    if value.is_empty() {
        return "${EMPTY}".to_string();
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '$' | '@' | '&' | '%' if chars.peek() == Some(&'{') => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }

    if escaped.starts_with('#') {
        escaped.insert(0, '\\');
    }

    let escaped = NAMED_ARG.replace(&escaped, "${1}\\=").into_owned();
    let escaped = SPACE_RUN
        .replace_all(&escaped, |caps: &regex::Captures<'_>| {
            format!("${{SPACE * {}}}", caps[0].len())
        })
        .into_owned();

    protect_edge_spaces(escaped)
}

fn protect_edge_spaces(mut value: String) -> String {
    if value.starts_with(' ') {
        value.replace_range(..1, "${SPACE}");
    }
    if value.ends_with(' ') {
        let last = value.len() - 1;
        value.replace_range(last.., "${SPACE}");
    }
    value
}

/// Test names sit on their own line; only leading markers need escaping
fn escape_name(name: &str) -> String {
    let flat: String = name
        .trim()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let flat = SPACE_RUN.replace_all(&flat, " ").into_owned();
    if flat.starts_with('#') || flat.starts_with("***") {
        format!("\\{}", flat)
    } else {
        flat
    }
}
