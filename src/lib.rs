//! json2robot - JSON test cases to Robot Framework scripts
//!
//! Converts structured test-case descriptions into Robot Framework test
//! suites while screening every command and path argument against a
//! configurable security policy.
//!
//! # Features
//!
//! - **Action mapping**: JSON actions map to Robot keywords through an
//!   extensible [`ActionTable`]
//! - **Command screening**: Detects destructive, privileged and
//!   remote-execution commands
//! - **Path screening**: Redacts credential stores, private keys and system
//!   configuration paths
//! - **Security levels**: permissive, standard, strict
//! - **Pattern overrides**: Replace the built-in lists per level from config
//! - **Audit logging**: JSONL log of every conversion and its findings
//!
//! # Example
//!
//! ```
//! use json2robot::{convert_json_to_script, Config};
//!
//! let json = r#"{"name":"t1","steps":[{"action":"run_command","args":["rm -rf /"]}]}"#;
//! let script = convert_json_to_script(json, &Config::default()).unwrap();
//!
//! assert!(script.text.contains("[REDACTED]"));
//! assert!(!script.text.contains("rm -rf /"));
//! assert_eq!(script.findings.len(), 1);
//! ```

pub mod audit;
pub mod config;
pub mod converter;
pub mod engine;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod robot;
pub mod rules;
pub mod writer;

// Re-exports for convenience
pub use config::{Config, SecurityLevel, UnmappedActionPolicy};
pub use converter::{convert_json_to_script, Converter};
pub use engine::actions::{ActionTable, ActionTemplate, ArgRole};
pub use engine::ConversionEngine;
pub use error::{ConvertError, Result};
pub use input::{Step, TestCase};
pub use output::{ConversionResult, FindingKind, Script, SecurityFinding};
pub use rules::catalog::PatternCatalog;
