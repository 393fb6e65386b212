//! Runtime configuration, collected from flags and environment variables.

use clap::ValueEnum;
use ifc_guid::{FormatOptions, HexCase};

/// Letter case of canonical output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CaseArg {
    #[default]
    Lower,
    Upper,
}

impl From<CaseArg> for HexCase {
    fn from(case: CaseArg) -> Self {
        match case {
            CaseArg::Lower => HexCase::Lower,
            CaseArg::Upper => HexCase::Upper,
        }
    }
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One result per line.
    #[default]
    Text,
    /// A JSON array on stdout.
    Json,
}

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// How canonical GUIDs are rendered.
    pub format_options: FormatOptions,

    /// Result output format.
    pub output: OutputFormat,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format_options: FormatOptions::default(),
            output: OutputFormat::Text,
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
        }
    }
}
