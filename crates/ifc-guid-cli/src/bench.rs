//! Conversion throughput benchmark over random identifiers.

use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use ifc_guid::{FormatOptions, Guid};
use tracing::info;
use uuid::Uuid;

/// Timings of one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub count: usize,
    pub encode_compact: Duration,
    pub decode_compact: Duration,
    pub format_canonical: Duration,
    pub parse_canonical: Duration,
}

fn per_second(count: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs == 0.0 {
        f64::INFINITY
    } else {
        count as f64 / secs
    }
}

/// Converts `count` random GUIDs through both forms and times each direction.
///
/// Fails if any value does not survive the round trip.
pub fn run(count: usize, options: FormatOptions) -> Result<BenchReport> {
    let guids: Vec<Guid> = (0..count).map(|_| Guid::from(Uuid::new_v4())).collect();
    info!(count, "Generated random GUIDs");

    let start = Instant::now();
    let compact: Vec<String> = guids.iter().map(Guid::to_compact).collect();
    let encode_compact = start.elapsed();

    let start = Instant::now();
    let decoded: Vec<Guid> = compact
        .iter()
        .map(|s| Guid::from_compact(s))
        .collect::<Result<_, _>>()?;
    let decode_compact = start.elapsed();

    let start = Instant::now();
    let canonical: Vec<String> = guids.iter().map(|g| g.format(options)).collect();
    let format_canonical = start.elapsed();

    let start = Instant::now();
    let parsed: Vec<Guid> = canonical
        .iter()
        .map(|s| Guid::from_canonical(s))
        .collect::<Result<_, _>>()?;
    let parse_canonical = start.elapsed();

    ensure!(decoded == guids, "compact round trip changed a value");
    ensure!(parsed == guids, "canonical round trip changed a value");

    Ok(BenchReport {
        count,
        encode_compact,
        decode_compact,
        format_canonical,
        parse_canonical,
    })
}

/// Prints one line per conversion direction with its elapsed time and ids per second.
pub fn print_report(report: &BenchReport) {
    println!("\n=== Conversions ({}) ===", report.count);
    for (label, elapsed) in [
        ("Encode compact", report.encode_compact),
        ("Decode compact", report.decode_compact),
        ("Format canonical", report.format_canonical),
        ("Parse canonical", report.parse_canonical),
    ] {
        println!(
            "{:<17} {:>12?}  ({:.0} ids/s)",
            format!("{}:", label),
            elapsed,
            per_second(report.count, elapsed)
        );
    }
}
