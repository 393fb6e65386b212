//! Conversion commands.

use clap::Args;
use ifc_guid::alphabet::COMPACT_LEN;
use ifc_guid::{
    canonical_to_compact, decode_compact, format_canonical, FormatOptions, Guid, GuidError,
};

use crate::config::Config;
use crate::output::{print_conversions, Conversion};

#[derive(Debug, Args)]
pub struct IdsArgs {
    /// GUIDs to convert.
    #[arg(required = true)]
    pub ids: Vec<String>,
}

fn convert_all(
    args: &IdsArgs,
    config: &Config,
    f: impl Fn(&str) -> Result<String, GuidError>,
) -> bool {
    let conversions: Vec<Conversion> = args
        .ids
        .iter()
        .map(|id| Conversion::new(id, f(id)))
        .collect();
    print_conversions(&conversions, config.output)
}

pub fn to_canonical(args: &IdsArgs, config: &Config) -> bool {
    let options = config.format_options;
    convert_all(args, config, |id| {
        decode_compact(id).map(|value| format_canonical(value, options))
    })
}

pub fn to_compact(args: &IdsArgs, config: &Config) -> bool {
    convert_all(args, config, canonical_to_compact)
}

/// Detects the form of each input and renders the other one.
pub fn convert(args: &IdsArgs, config: &Config) -> bool {
    let options = config.format_options;
    convert_all(args, config, |id| convert_one(id, options))
}

fn convert_one(id: &str, options: FormatOptions) -> Result<String, GuidError> {
    let guid = Guid::parse(id)?;
    if id.chars().count() == COMPACT_LEN {
        Ok(guid.format(options))
    } else {
        Ok(guid.to_compact())
    }
}
