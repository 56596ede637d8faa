#![forbid(unsafe_code)]

use std::fmt::Write as _;

use smoke_coverage::prelude::{CoverageStats, StatsReport};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs a `fmt` subscriber honouring `RUST_LOG`, defaulting to `smoke_coverage=info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("smoke_coverage=info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn stats_columns(stats: Option<&CoverageStats>) -> String {
    match stats {
        Some(s) => format!(
            "{:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.2}",
            s.min, s.mean, s.median, s.max, s.std_dev
        ),
        None => format!("{:>39}", "no data"),
    }
}

/// Renders a [`StatsReport`] as a fixed-width text table.
pub fn format_report(report: &StatsReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:>6} {:>7} {:>7} {:>7} {:>7} {:>7}",
        "doorway", "smokes", "min", "mean", "median", "max", "stddev"
    );
    for d in &report.doorways {
        let _ = writeln!(
            out,
            "{:<16} {:>6} {}",
            d.name,
            d.smoke_count,
            stats_columns(d.stats.as_ref())
        );
    }
    let total = report.overall.as_ref().map_or(0, |s| s.count);
    let _ = writeln!(
        out,
        "{:<16} {:>6} {}",
        "overall",
        total,
        stats_columns(report.overall.as_ref())
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_table_marks_missing_data() {
        let report = StatsReport {
            doorways: vec![smoke_coverage::prelude::DoorwayStats {
                name: "window".into(),
                smoke_count: 0,
                stats: None,
            }],
            overall: CoverageStats::new([50.0, 100.0]),
        };
        let table = format_report(&report);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("window"));
        assert!(lines[1].ends_with("no data"));
        assert!(lines[2].contains("75.00"));
    }
}
