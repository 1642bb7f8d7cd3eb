//! # Validate Subcommand
//!
//! `hce validate --form <login|register|contact> [PATH]`
//!
//! Reads a flat object of field values from `PATH` (or stdin when `PATH`
//! is `-` or omitted), validates it, and prints the report as JSON:
//!
//! ```json
//! { "valid": false, "errors": { "email": "Invalid email" } }
//! ```
//!
//! Files ending in `.yaml` or `.yml` are read as YAML, everything else as
//! JSON. Password values are never printed.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use hce_core::{FieldValues, HceError};
use hce_forms::{validate, FormKind, ValidationReport};

/// Arguments for the `hce validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Form whose rules apply: login, register or contact.
    #[arg(long)]
    pub form: String,

    /// Payload file; `-` reads stdin.
    #[arg(value_name = "PATH", default_value = "-")]
    pub input: PathBuf,
}

/// Payload encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Pick the format from the file extension.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when valid, 1 when invalid.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let kind = parse_form(&args.form)?;
    let text = read_input(&args.input)?;
    let values = parse_values(&text, InputFormat::detect(&args.input))?;

    let schema = kind.schema();
    let report = ValidationReport::new(&schema, validate(&schema, &values));
    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.valid {
        tracing::info!(form = %kind, "payload is valid");
        Ok(0)
    } else {
        tracing::info!(
            form = %kind,
            invalid_fields = report.errors.as_ref().map_or(0, |e| e.len()),
            "payload is invalid"
        );
        Ok(1)
    }
}

/// Resolve a form name.
pub fn parse_form(name: &str) -> Result<FormKind, HceError> {
    name.parse::<FormKind>()
        .map_err(|e| HceError::UnknownForm(e.0))
}

/// Decode a payload into field values.
pub fn parse_values(text: &str, format: InputFormat) -> Result<FieldValues> {
    let values: FieldValues = match format {
        InputFormat::Json => serde_json::from_str(text).map_err(HceError::from)?,
        InputFormat::Yaml => serde_yaml::from_str(text).context("payload is not a YAML mapping of field values")?,
    };
    Ok(values)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read payload from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read payload from {}", path.display()))
    }
}
