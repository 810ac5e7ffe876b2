use crate::domain::invocation::ArgValue;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "rest-stub")]
#[command(about = "Call REST service methods described in a TOML service definition")]
pub struct CliConfig {
    #[arg(long, short = 'd', help = "Path to the service definition (TOML)")]
    pub definition: PathBuf,

    #[arg(long, help = "Override the service URL from the definition")]
    pub url: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the methods of the service
    List,
    /// Invoke one method and print the decoded result
    Invoke {
        method: String,

        /// Arguments as name=value; values that parse as JSON are passed as JSON
        #[arg(value_name = "NAME=VALUE")]
        args: Vec<String>,

        #[arg(long, conflicts_with = "body_file", help = "Body argument as JSON text")]
        body: Option<String>,

        #[arg(long, help = "Send this file as the body argument")]
        body_file: Option<PathBuf>,
    },
}

/// Splits `name=value` and converts the value: JSON scalars and documents
/// keep their type, anything else is text.
pub fn parse_named_arg(raw: &str) -> Result<(String, ArgValue)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| ClientError::InvalidArgument {
            name: raw.to_string(),
            reason: "expected NAME=VALUE".to_string(),
        })?;
    validate_non_empty_string("argument name", name)?;
    let value = match serde_json::from_str::<serde_json::Value>(value) {
        Ok(serde_json::Value::Number(n)) => ArgValue::Number(n),
        Ok(serde_json::Value::Bool(b)) => ArgValue::Bool(b),
        Ok(serde_json::Value::Null) => ArgValue::Null,
        Ok(serde_json::Value::String(s)) => ArgValue::Text(s),
        Ok(json) => ArgValue::Json(json),
        Err(_) => ArgValue::Text(value.to_string()),
    };
    Ok((name.trim().to_string(), value))
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.url {
            crate::utils::validation::validate_url("--url", url)?;
        }
        if let Command::Invoke { method, args, .. } = &self.command {
            validate_non_empty_string("method", method)?;
            for arg in args {
                parse_named_arg(arg)?;
            }
        }
        Ok(())
    }
}
