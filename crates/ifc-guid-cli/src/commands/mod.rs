//! CLI commands.

mod convert;
mod resolve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ifc_guid::FormatOptions;

use crate::bench;
use crate::config::{CaseArg, Config, LogFormat, OutputFormat};

/// ifcguid - Convert IFC GUIDs between the compact and canonical forms.
#[derive(Debug, Parser)]
#[command(name = "ifcguid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Letter case of canonical output.
    #[arg(long, global = true, value_enum, env = "IFCGUID_CASE", default_value = "lower")]
    case: CaseArg,

    /// Print canonical GUIDs as 32 bare hex digits.
    #[arg(long, global = true)]
    no_hyphens: bool,

    /// Output format (text or json).
    #[arg(long, global = true, value_enum, env = "IFCGUID_FORMAT", default_value = "text")]
    format: OutputFormat,

    /// Log level. `RUST_LOG` takes precedence when set.
    #[arg(long, global = true, env = "IFCGUID_LOG", default_value = "warn")]
    log_level: String,

    /// Log line format on stderr.
    #[arg(long, global = true, value_enum, env = "IFCGUID_LOG_FORMAT", default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert compact GUIDs to the canonical form.
    ToCanonical(convert::IdsArgs),

    /// Convert canonical GUIDs to the compact form.
    ToCompact(convert::IdsArgs),

    /// Detect the form of each GUID and print the other one.
    Convert(convert::IdsArgs),

    /// Resolve object ids to canonical GUIDs using a property dump.
    Resolve(resolve::ResolveCommand),

    /// Time conversions over random GUIDs.
    Bench {
        /// Number of GUIDs to generate.
        #[arg(long, default_value_t = 100_000)]
        count: usize,
    },
}

impl Cli {
    /// Collects flags and environment fallbacks into a [`Config`].
    pub fn config(&self) -> Config {
        Config {
            format_options: FormatOptions {
                case: self.case.into(),
                hyphenated: !self.no_hyphens,
            },
            output: self.format,
            log_level: self.log_level.clone(),
            log_format: self.log_format,
        }
    }

    /// Runs the selected command.
    ///
    /// Returns `Ok(false)` when some inputs failed; those failures have
    /// already been reported on stderr.
    pub fn run(&self, config: &Config) -> Result<bool> {
        match &self.command {
            Commands::ToCanonical(args) => Ok(convert::to_canonical(args, config)),
            Commands::ToCompact(args) => Ok(convert::to_compact(args, config)),
            Commands::Convert(args) => Ok(convert::convert(args, config)),
            Commands::Resolve(cmd) => cmd.run(config),
            Commands::Bench { count } => {
                let report = bench::run(*count, config.format_options)?;
                bench::print_report(&report);
                Ok(true)
            }
        }
    }
}
