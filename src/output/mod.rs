//! Report rendering
//!
//! Every report renders as a human-readable table, pretty-printed JSON or
//! YAML. Structured formats serialize the report types directly.

pub mod table;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Table,
    Json,
    Yaml,
}

/// A report with a human-readable table form
pub trait TableReport {
    fn write_table(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    fn to_table(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        self.write_table(&mut out)?;
        Ok(out)
    }
}

/// Render a report in the requested format
pub fn render<R>(report: &R, format: OutputFormat) -> Result<String, Error>
where
    R: Serialize + TableReport,
{
    match format {
        OutputFormat::Table => Ok(report.to_table()?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)? + "\n"),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
    }
}
