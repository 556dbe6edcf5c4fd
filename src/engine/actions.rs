//! Action name to Robot Framework keyword templates
//!
//! Every supported action maps to exactly one [`ActionTemplate`]. The table
//! is a plain value: callers can start from [`ActionTable::builtin`] and
//! register more actions before handing it to the engine.

use std::collections::HashMap;

use crate::output::{ArgToken, Statement};

const OPERATING_SYSTEM: &str = "OperatingSystem";
const PROCESS: &str = "Process";

/// How an input argument is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgRole {
    /// Literal shell command, classified against dangerous-command patterns
    Command,
    /// File system path, classified against sensitive-path patterns
    Path,
    /// Free text, emitted without classification
    Text,
}

/// Statement emitted after the primary keyword call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUp {
    pub keyword: String,
    pub args: Vec<String>,
    pub library: Option<String>,
}

/// Template for translating one action into statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTemplate {
    pub keyword: String,
    pub library: Option<String>,
    /// Roles of the required positional arguments
    pub roles: Vec<ArgRole>,
    /// Role for arguments past `roles`; `None` means no extra arguments
    pub rest: Option<ArgRole>,
    /// Template literals appended after the input arguments
    pub trailing: Vec<String>,
    pub assign: Option<String>,
    pub follow_ups: Vec<FollowUp>,
}

impl ActionTemplate {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            library: None,
            roles: Vec::new(),
            rest: None,
            trailing: Vec::new(),
            assign: None,
            follow_ups: Vec::new(),
        }
    }

    pub fn library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }

    /// Add a required positional argument
    pub fn arg(mut self, role: ArgRole) -> Self {
        self.roles.push(role);
        self
    }

    /// Accept any number of further arguments with `role`
    pub fn rest(mut self, role: ArgRole) -> Self {
        self.rest = Some(role);
        self
    }

    pub fn trailing(mut self, literal: impl Into<String>) -> Self {
        self.trailing.push(literal.into());
        self
    }

    pub fn assign(mut self, variable: impl Into<String>) -> Self {
        self.assign = Some(variable.into());
        self
    }

    pub fn then(mut self, keyword: impl Into<String>, args: &[&str]) -> Self {
        self.follow_ups.push(FollowUp {
            keyword: keyword.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            library: None,
        });
        self
    }

    pub fn min_args(&self) -> usize {
        self.roles.len()
    }

    pub fn max_args(&self) -> Option<usize> {
        match self.rest {
            Some(_) => None,
            None => Some(self.roles.len()),
        }
    }

    /// Role of the argument at `index`, or `None` if the template takes no
    /// argument there
    pub fn role_for(&self, index: usize) -> Option<ArgRole> {
        self.roles.get(index).copied().or(self.rest)
    }

    /// Describe the accepted argument count for error messages
    pub fn arity(&self) -> String {
        match self.max_args() {
            Some(max) if max == self.min_args() => format!("exactly {}", max),
            Some(max) => format!("{} to {}", self.min_args(), max),
            None => format!("at least {}", self.min_args()),
        }
    }

    /// Build the statements for already-processed argument tokens
    pub fn instantiate(&self, mut args: Vec<ArgToken>) -> Vec<Statement> {
        args.extend(self.trailing.iter().map(ArgToken::generated));

        let mut primary = Statement::new(self.keyword.clone(), args);
        primary.assign = self.assign.clone();
        primary.library = self.library.clone();

        let mut statements = Vec::with_capacity(1 + self.follow_ups.len());
        statements.push(primary);
        for follow_up in &self.follow_ups {
            let mut stmt = Statement::new(
                follow_up.keyword.clone(),
                follow_up.args.iter().map(ArgToken::generated).collect(),
            );
            stmt.library = follow_up.library.clone();
            statements.push(stmt);
        }
        statements
    }
}

/// Lookup table from action name to template
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    templates: HashMap<String, ActionTemplate>,
}

impl ActionTable {
    /// An empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// Table with the built-in actions
    pub fn builtin() -> Self {
        use ArgRole::*;

        let mut table = Self::empty();

        // Processes
        table.register(
            "run_command",
            ActionTemplate::new("Run Process")
                .library(PROCESS)
                .arg(Command)
                .trailing("shell=True")
                .assign("${result}")
                .then("Should Be Equal As Integers", &["${result.rc}", "0"]),
        );
        table.register(
            "run_command_allow_failure",
            ActionTemplate::new("Run Process")
                .library(PROCESS)
                .arg(Command)
                .trailing("shell=True"),
        );
        table.register(
            "start_process",
            ActionTemplate::new("Start Process")
                .library(PROCESS)
                .arg(Command)
                .trailing("shell=True"),
        );
        table.register(
            "terminate_all_processes",
            ActionTemplate::new("Terminate All Processes").library(PROCESS),
        );

        // Files and directories
        table.register(
            "create_file",
            ActionTemplate::new("Create File")
                .library(OPERATING_SYSTEM)
                .arg(Path)
                .rest(Text),
        );
        table.register(
            "append_to_file",
            ActionTemplate::new("Append To File")
                .library(OPERATING_SYSTEM)
                .arg(Path)
                .arg(Text),
        );
        table.register(
            "read_file",
            ActionTemplate::new("Get File")
                .library(OPERATING_SYSTEM)
                .arg(Path)
                .assign("${content}"),
        );
        table.register(
            "remove_file",
            ActionTemplate::new("Remove File")
                .library(OPERATING_SYSTEM)
                .arg(Path),
        );
        table.register(
            "copy_file",
            ActionTemplate::new("Copy File")
                .library(OPERATING_SYSTEM)
                .arg(Path)
                .arg(Path),
        );
        table.register(
            "move_file",
            ActionTemplate::new("Move File")
                .library(OPERATING_SYSTEM)
                .arg(Path)
                .arg(Path),
        );
        table.register(
            "file_should_exist",
            ActionTemplate::new("File Should Exist")
                .library(OPERATING_SYSTEM)
                .arg(Path),
        );
        table.register(
            "file_should_not_exist",
            ActionTemplate::new("File Should Not Exist")
                .library(OPERATING_SYSTEM)
                .arg(Path),
        );
        table.register(
            "create_directory",
            ActionTemplate::new("Create Directory")
                .library(OPERATING_SYSTEM)
                .arg(Path),
        );
        table.register(
            "remove_directory",
            ActionTemplate::new("Remove Directory")
                .library(OPERATING_SYSTEM)
                .arg(Path)
                .trailing("recursive=True"),
        );
        table.register(
            "directory_should_exist",
            ActionTemplate::new("Directory Should Exist")
                .library(OPERATING_SYSTEM)
                .arg(Path),
        );
        table.register(
            "set_environment_variable",
            ActionTemplate::new("Set Environment Variable")
                .library(OPERATING_SYSTEM)
                .arg(Text)
                .arg(Text),
        );

        // BuiltIn
        table.register("log", ActionTemplate::new("Log").arg(Text).rest(Text));
        table.register("sleep", ActionTemplate::new("Sleep").arg(Text));
        table.register("no_operation", ActionTemplate::new("No Operation"));
        table.register("fail", ActionTemplate::new("Fail").arg(Text));
        table.register(
            "should_be_equal",
            ActionTemplate::new("Should Be Equal").arg(Text).arg(Text),
        );
        table.register(
            "should_contain",
            ActionTemplate::new("Should Contain").arg(Text).arg(Text),
        );

        table
    }

    /// Add or replace an action
    pub fn register(&mut self, action: impl Into<String>, template: ActionTemplate) {
        self.templates.insert(action.into(), template);
    }

    pub fn get(&self, action: &str) -> Option<&ActionTemplate> {
        self.templates.get(action)
    }

    /// Supported action names, sorted
    pub fn actions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
