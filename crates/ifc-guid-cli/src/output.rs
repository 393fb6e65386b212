//! Output formatting for command results.

use ifc_guid::GuidError;
use serde::Serialize;

use crate::config::OutputFormat;

/// Result of converting one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl Conversion {
    pub fn new(input: &str, result: Result<String, GuidError>) -> Self {
        match result {
            Ok(output) => Self {
                input: input.to_string(),
                output: Some(output),
                error: None,
                code: None,
            },
            Err(e) => Self {
                input: input.to_string(),
                output: None,
                error: Some(e.to_string()),
                code: Some(e.kind().code()),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.output.is_some()
    }
}

/// Marks a failed input in text output.
pub const FAILED_PLACEHOLDER: &str = "-";

/// One stdout line per input, in input order. Failed inputs get a placeholder.
pub fn text_lines(conversions: &[Conversion]) -> Vec<&str> {
    conversions
        .iter()
        .map(|c| c.output.as_deref().unwrap_or(FAILED_PLACEHOLDER))
        .collect()
}

/// Prints conversions on stdout. Every failure is also reported on stderr.
///
/// Returns true if every conversion succeeded.
pub fn print_conversions(conversions: &[Conversion], format: OutputFormat) -> bool {
    match format {
        OutputFormat::Text => {
            for line in text_lines(conversions) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => print_json(conversions),
    }
    for c in conversions {
        if let Some(error) = &c.error {
            eprintln!("error: {}: {}", c.input, error);
        }
    }
    conversions.iter().all(Conversion::is_ok)
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("error: failed to serialize output: {}", e),
    }
}
