use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use smoke_coverage::prelude::*;
use smoke_coverage_examples::{format_report, init_tracing};
use tracing::info;

const DEFAULT_DOORWAYS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/mirage_doorways.json");
const DEFAULT_SMOKES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/smokes.json");

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut args = std::env::args().skip(1);
    let doorways_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_DOORWAYS.into()));
    let smokes_path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_SMOKES.into()));

    let config = AnalysisConfig::new()
        .with_detection_radius(300.0)
        .with_height_tolerance(100.0);
    config.validate()?;

    let doorways = load_doorways_from_reader(open(&doorways_path)?, &config)?;
    let smokes = load_smokes_from_reader(open(&smokes_path)?, &config)?;
    for rejection in doorways.rejected.iter().chain(&smokes.rejected) {
        println!(
            "skipped record #{} {}: {}",
            rejection.index,
            rejection.key.as_deref().unwrap_or(""),
            rejection.reason
        );
    }

    let mut sink = VecSink::only([AnalysisEventKind::SmokeDiscarded]);
    let assignment = Assigner::new(doorways.records).run_with_events(smokes.records, &mut sink)?;
    info!("{} smokes landed outside every doorway zone.", sink.len());

    for (doorway, smoke) in assignment.pairs() {
        println!(
            "{smoke} -> {doorway}: {:.1}% ({:.1} m from midpoint)",
            smoke.coverage().unwrap_or_default(),
            config.units_to_meters(smoke.distance_to_midpoint(doorway))
        );
    }

    let report = StatsReport::from_assignment(&assignment);
    println!();
    print!("{}", format_report(&report));

    println!();
    for (side, stats) in group_by(assignment.smokes(), |s| s.meta.side.clone()) {
        let mean = stats.map_or_else(|| "no data".to_owned(), |s| format!("{:.2}%", s.mean));
        println!("side {side:<4} mean coverage {mean}");
    }
    for (won, stats) in group_by(assignment.smokes(), |s| s.meta.round_won) {
        let mean = stats.map_or_else(|| "no data".to_owned(), |s| format!("{:.2}%", s.mean));
        let label = if won { "won" } else { "lost" };
        println!("rounds {label:<4} mean coverage {mean}");
    }

    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&coverage_records(&assignment))?
    );
    Ok(())
}
