//! json2robot - JSON test cases to Robot Framework scripts
//!
//! # Usage
//!
//! ```bash
//! # Read JSON from a file, write the suite to stdout
//! json2robot case.json
//!
//! # Read from stdin, write to a file, reject dangerous commands
//! cat case.json | json2robot -o case.robot --security-level=strict
//!
//! # Emit unknown actions as comments instead of failing
//! json2robot case.json --unmapped-actions passthrough
//! ```

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use json2robot::{
    audit::{AuditEntry, AuditLogger},
    config::{Config, SecurityLevel, UnmappedActionPolicy},
    converter::Converter,
    error::{ConvertError, Result},
    logging::init_logging,
    output::findings_to_json,
    writer::write_script,
};

#[derive(Parser)]
#[command(name = "json2robot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON test case file (`-` or omitted reads stdin)
    input: Option<PathBuf>,

    /// Write the generated suite here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Security level: strict, standard, permissive
    #[arg(short = 'l', long)]
    security_level: Option<SecurityLevel>,

    /// Handling of unknown actions: reject, passthrough
    #[arg(long)]
    unmapped_actions: Option<UnmappedActionPolicy>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print security findings as JSON on stderr
    #[arg(long)]
    findings_json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Load configuration
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    // Flags override the config file
    if let Some(level) = cli.security_level {
        config.general.security_level = level;
    }
    if let Some(policy) = cli.unmapped_actions {
        config.general.unmapped_action_policy = policy;
    }

    let converter = Converter::new(&config)?;
    let mut audit = AuditLogger::new(config.audit_path().as_deref());

    let source = cli
        .input
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());
    let raw_json = read_input(cli.input.as_deref())?;

    let script = match converter.convert(&raw_json) {
        Ok(script) => script,
        Err(e) => {
            let entry = AuditEntry::rejected(&source, converter.security_level(), &e);
            if let Err(log_err) = audit.log(&entry) {
                tracing::warn!(error = %log_err, "failed to write audit log");
            }
            if matches!(e, ConvertError::UnsupportedAction { .. }) {
                eprintln!(
                    "Supported actions: {}",
                    converter.actions().actions().join(", ")
                );
            }
            return Err(e);
        }
    };

    let entry = AuditEntry::converted(&source, converter.security_level(), &script.findings);
    if let Err(e) = audit.log(&entry) {
        tracing::warn!(error = %e, "failed to write audit log");
    }

    for finding in &script.findings {
        tracing::warn!("{}", finding.summary());
    }
    if cli.findings_json {
        eprintln!("{}", findings_to_json(&script.findings));
    }

    match &cli.output {
        Some(path) => write_script(path, &script.text)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(script.text.as_bytes())?;
            handle.flush()?;
        }
    }

    Ok(())
}

/// Read the JSON document from a file or stdin
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p).map_err(ConvertError::from),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
