use smoke_coverage::prelude::*;
use smoke_coverage_examples::init_tracing;

/// Smoke centre and radius used by the reference drawings.
const CENTER: [f64; 2] = [200.0, 200.0];
const RADIUS: f64 = 128.0;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let circle = Circle::new(CENTER, RADIUS);
    let cases = [
        ("fully covered", [125.0, 250.0], [275.0, 150.0]),
        ("no collision", [150.0, 10.0], [400.0, 110.0]),
        ("no collision unless extended", [100.0, 300.0], [25.0, 400.0]),
        ("tangent", [50.0, 72.0], [350.0, 72.0]),
        ("gaps on both sides", [75.0, 280.0], [300.0, 310.0]),
        ("gap on one side", [200.0, 200.0], [400.0, 250.0]),
    ];

    for (label, a, b) in cases {
        let coverage = solve(circle, Segment::new(a, b));
        println!(
            "{label:<30} {:?} -> {:>6.2}% ({:.1} units)",
            coverage.case, coverage.percent, coverage.covered_length
        );
    }

    // the last case again, inflated by a character hull
    let config = AnalysisConfig::new()
        .with_smoke_radius(RADIUS)
        .with_elevation_offset(0.0);
    config.validate()?;
    let doorway = Doorway::new("one-sided", [200.0, 200.0], [400.0, 250.0], 0.0, &config)?;
    let inflated = solve(circle, doorway.segment());
    println!(
        "{:<30} {:?} -> {:>6.2}% over {:.1} units",
        doorway.to_string(),
        inflated.case,
        inflated.percent,
        doorway.length()
    );
    println!("{}", doorway.draw_command());
    Ok(())
}
