use std::time::Duration;

use criterion::{Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smoke_coverage::prelude::{AnalysisConfig, Doorway, Smoke, SmokeMeta};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

/// Half-width of the square map the inputs are scattered over.
pub const MAP_HALF_EXTENT: f64 = 3000.0;

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

#[allow(dead_code)]
fn coord(rng: &mut StdRng) -> f64 {
    (rng.random::<f64>() * 2.0 - 1.0) * MAP_HALF_EXTENT
}

#[allow(dead_code)]
pub fn make_doorways(count: usize, config: &AnalysisConfig, seed: u64) -> Vec<Doorway> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let (x, y) = (coord(&mut rng), coord(&mut rng));
            let angle = rng.random::<f64>() * std::f64::consts::TAU;
            let width = 80.0 + rng.random::<f64>() * 200.0;
            let (dx, dy) = (angle.cos() * width, angle.sin() * width);
            Doorway::new(format!("D{i}"), [x, y], [x + dx, y + dy], 0.0, config)
                .expect("random doorway has distinct endpoints")
        })
        .collect()
}

#[allow(dead_code)]
pub fn make_smokes(count: usize, config: &AnalysisConfig, seed: u64) -> Vec<Smoke> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let meta = SmokeMeta {
                round: (i % 30) as u32 + 1,
                ..Default::default()
            };
            let z = -config.elevation_offset_units + (rng.random::<f64>() - 0.5) * 80.0;
            Smoke::new(meta, [coord(&mut rng), coord(&mut rng)], z, config)
                .expect("finite smoke position")
        })
        .collect()
}
