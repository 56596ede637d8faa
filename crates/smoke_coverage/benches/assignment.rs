mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use smoke_coverage::prelude::{AnalysisConfig, Assigner, StatsReport};

const DOORWAY_COUNTS: [usize; 3] = [8, 32, 128];
const SMOKE_COUNTS: [usize; 3] = [256, 2048, 16384];

fn assignment_run_benches(c: &mut Criterion) {
    let config = AnalysisConfig::default();

    for &doorways in &DOORWAY_COUNTS {
        let mut group = c.benchmark_group(format!("assignment/run/doorways_{doorways}"));
        let doors = common::make_doorways(doorways, &config, 0xD00D ^ doorways as u64);

        for &n in &SMOKE_COUNTS {
            let smokes = common::make_smokes(n, &config, 0x5E0C ^ n as u64);
            group.throughput(common::elements_throughput(n));

            group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
                b.iter_batched(
                    || (Assigner::new(doors.clone()), smokes.clone()),
                    |(assigner, smokes)| {
                        let result = assigner.run(smokes).expect("fresh smokes assign");
                        black_box(result.smokes().len());
                    },
                    BatchSize::LargeInput,
                );
            });
        }

        group.finish();
    }
}

fn assignment_report_benches(c: &mut Criterion) {
    let config = AnalysisConfig::default().with_detection_radius(600.0);
    let mut group = c.benchmark_group("assignment/report");

    for &n in &SMOKE_COUNTS {
        let doors = common::make_doorways(64, &config, 0xFACE);
        let smokes = common::make_smokes(n, &config, 0xFEED ^ n as u64);
        let assignment = Assigner::new(doors).run(smokes).expect("run");
        group.throughput(common::elements_throughput(assignment.smokes().len()));

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let report = StatsReport::from_assignment(&assignment);
                black_box(report.doorways.len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = assignment_run_benches, assignment_report_benches
}
criterion_main!(benches);
