//! Matching smokes to doorways and computing their coverage.
use tracing::{debug, info, warn};

use crate::coverage::solve;
use crate::doorway::Doorway;
use crate::error::Result;
use crate::events::{AnalysisEvent, AnalysisEventKind, EventSink};
use crate::smoke::Smoke;

/// Outcome of picking a doorway for one smoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Index of the chosen doorway.
    pub doorway: usize,
    /// How many detection zones contained the smoke.
    pub candidates: usize,
}

/// Assigns smokes to doorways.
///
/// Doorways are kept in input order; that order decides ties between equidistant
/// midpoints, so a fixed input ordering always yields the same assignment.
#[derive(Debug, Clone, Default)]
pub struct Assigner {
    doorways: Vec<Doorway>,
}

impl Assigner {
    pub fn new(doorways: Vec<Doorway>) -> Self {
        Self { doorways }
    }

    pub fn doorways(&self) -> &[Doorway] {
        &self.doorways
    }

    /// Indices of every doorway whose detection zone contains the smoke.
    pub fn candidates(&self, smoke: &Smoke) -> Vec<usize> {
        self.doorways
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_in_range(smoke))
            .map(|(i, _)| i)
            .collect()
    }

    /// Picks the doorway for a smoke.
    ///
    /// With several candidates, the doorway whose raw midpoint is closest wins; on an
    /// exact tie the earliest candidate wins.
    pub fn select(&self, smoke: &Smoke) -> Option<Selection> {
        let candidates = self.candidates(smoke);
        let doorway = match candidates.as_slice() {
            [] => return None,
            [only] => *only,
            many => {
                debug!("{smoke} in range of {} doorways; using midpoint distance.", many.len());
                many.iter().copied().min_by(|&a, &b| {
                    let da = smoke.distance_to_midpoint(&self.doorways[a]);
                    let db = smoke.distance_to_midpoint(&self.doorways[b]);
                    da.total_cmp(&db)
                })?
            }
        };
        Some(Selection {
            doorway,
            candidates: candidates.len(),
        })
    }

    /// Assigns every smoke and computes coverage.
    pub fn run(self, smokes: Vec<Smoke>) -> Result<Assignment> {
        assign_smokes_with_events(self, smokes, &mut ())
    }

    pub fn run_with_events(
        self,
        smokes: Vec<Smoke>,
        sink: &mut dyn EventSink,
    ) -> Result<Assignment> {
        assign_smokes_with_events(self, smokes, sink)
    }
}

/// Result of an assignment run.
///
/// Owns the doorways and the assigned smokes; the doorway-to-smoke association is kept
/// as index lists instead of references between the two.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    doorways: Vec<Doorway>,
    smokes: Vec<Smoke>,
    by_doorway: Vec<Vec<usize>>,
    /// Total smokes considered.
    pub smokes_evaluated: usize,
    /// Smokes outside every detection zone.
    pub smokes_discarded: usize,
}

impl Assignment {
    pub fn doorways(&self) -> &[Doorway] {
        &self.doorways
    }

    /// Assigned smokes in input order.
    pub fn smokes(&self) -> &[Smoke] {
        &self.smokes
    }

    pub fn find_doorway(&self, name: &str) -> Option<usize> {
        self.doorways.iter().position(|d| d.name() == name)
    }

    /// Smokes assigned to the doorway at `index`, in assignment order.
    pub fn smokes_for(&self, index: usize) -> impl Iterator<Item = &Smoke> + '_ {
        self.by_doorway
            .get(index)
            .into_iter()
            .flatten()
            .map(|&i| &self.smokes[i])
    }

    pub fn doorway_of(&self, smoke: &Smoke) -> Option<&Doorway> {
        smoke
            .assigned_doorway()
            .and_then(|index| self.doorways.get(index))
    }

    /// Every assigned smoke with its doorway.
    pub fn pairs(&self) -> impl Iterator<Item = (&Doorway, &Smoke)> + '_ {
        self.smokes
            .iter()
            .filter_map(|s| self.doorway_of(s).map(|d| (d, s)))
    }

    /// `(doorway name, coverage percent)` for every assigned smoke.
    pub fn outcomes(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.pairs()
            .filter_map(|(d, s)| s.coverage().map(|c| (d.name(), c)))
    }
}

/// Convenience wrapper around [`Assigner`].
pub fn assign_smokes(
    doorways: Vec<Doorway>,
    smokes: Vec<Smoke>,
    sink: Option<&mut dyn EventSink>,
) -> Result<Assignment> {
    let assigner = Assigner::new(doorways);
    if let Some(s) = sink {
        assign_smokes_with_events(assigner, smokes, s)
    } else {
        assign_smokes_with_events(assigner, smokes, &mut ())
    }
}

fn assign_smokes_with_events(
    assigner: Assigner,
    smokes: Vec<Smoke>,
    sink: &mut dyn EventSink,
) -> Result<Assignment> {
    let smoke_count = smokes.len();
    info!(
        "Assigning {} smokes to {} doorways.",
        smoke_count,
        assigner.doorways.len()
    );
    if sink.wants(AnalysisEventKind::RunStarted) {
        sink.send(AnalysisEvent::RunStarted {
            doorway_count: assigner.doorways.len(),
            smoke_count,
        });
    }
    if assigner.doorways.is_empty() {
        warn!("No doorways supplied; every smoke will be discarded.");
        if sink.wants(AnalysisEventKind::Warning) {
            sink.send(AnalysisEvent::Warning {
                context: "assignment".into(),
                message: "No doorways supplied".into(),
            });
        }
    }

    let mut by_doorway = vec![Vec::new(); assigner.doorways.len()];
    let mut assigned: Vec<Smoke> = Vec::new();
    let mut discarded = 0;

    for (index, mut smoke) in smokes.into_iter().enumerate() {
        let Some(selection) = assigner.select(&smoke) else {
            debug!("{smoke} is not in range of any doorway; skipping.");
            discarded += 1;
            if sink.wants(AnalysisEventKind::SmokeDiscarded) {
                sink.send(AnalysisEvent::SmokeDiscarded {
                    index,
                    position: smoke.position(),
                });
            }
            continue;
        };

        let doorway = &assigner.doorways[selection.doorway];
        smoke.assign(selection.doorway)?;
        debug!("{smoke} assigned to {doorway}.");
        if sink.wants(AnalysisEventKind::SmokeAssigned) {
            sink.send(AnalysisEvent::SmokeAssigned {
                index,
                doorway: doorway.name().to_owned(),
                candidates: selection.candidates,
            });
        }

        let coverage = solve(smoke.circle(), doorway.segment());
        smoke.record_coverage(coverage.percent)?;
        debug!(
            "Coverage for {smoke} - {doorway}: {:.2}% ({:?}).",
            coverage.percent, coverage.case
        );
        if sink.wants(AnalysisEventKind::CoverageComputed) {
            sink.send(AnalysisEvent::CoverageComputed {
                index,
                doorway: doorway.name().to_owned(),
                case: coverage.case,
                percent: coverage.percent,
            });
        }

        by_doorway[selection.doorway].push(assigned.len());
        assigned.push(smoke);
    }

    info!(
        "Assigned {} smokes; discarded {} outside every detection zone.",
        assigned.len(),
        discarded
    );
    if sink.wants(AnalysisEventKind::RunFinished) {
        sink.send(AnalysisEvent::RunFinished {
            assigned: assigned.len(),
            discarded,
        });
    }

    Ok(Assignment {
        doorways: assigner.doorways,
        smokes: assigned,
        by_doorway,
        smokes_evaluated: smoke_count,
        smokes_discarded: discarded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::events::VecSink;
    use crate::smoke::SmokeMeta;

    fn config() -> AnalysisConfig {
        AnalysisConfig::new()
            .with_smoke_radius(128.0)
            .with_detection_radius(200.0)
            .with_height_tolerance(50.0)
            .with_elevation_offset(0.0)
    }

    fn door(name: &str, a: [f64; 2], b: [f64; 2]) -> Doorway {
        Doorway::new(name, a, b, 0.0, &config()).expect("valid doorway")
    }

    fn smoke(x: f64, y: f64, z: f64) -> Smoke {
        Smoke::new(SmokeMeta::default(), [x, y], z, &config()).expect("valid smoke")
    }

    #[test]
    fn smoke_outside_every_zone_is_discarded() {
        let assigner = Assigner::new(vec![door("a", [0.0, 0.0], [100.0, 0.0])]);
        let result = assigner
            .run(vec![smoke(1000.0, 1000.0, 0.0), smoke(50.0, 10.0, 500.0)])
            .expect("run");
        assert!(result.smokes().is_empty());
        assert_eq!(result.smokes_evaluated, 2);
        assert_eq!(result.smokes_discarded, 2);
        assert_eq!(result.smokes_for(0).count(), 0);
    }

    #[test]
    fn single_candidate_is_assigned_with_coverage() {
        let assigner = Assigner::new(vec![door("mid", [0.0, 0.0], [100.0, 0.0])]);
        let result = assigner.run(vec![smoke(50.0, 0.0, 0.0)]).expect("run");
        let s = &result.smokes()[0];
        assert_eq!(s.assigned_doorway(), Some(0));
        assert_eq!(s.coverage(), Some(100.0));
        assert_eq!(result.outcomes().collect::<Vec<_>>(), vec![("mid", 100.0)]);
    }

    #[test]
    fn overlapping_zones_pick_closest_midpoint() {
        let assigner = Assigner::new(vec![
            door("far", [0.0, 0.0], [100.0, 0.0]),
            door("near", [150.0, 0.0], [250.0, 0.0]),
        ]);
        // midpoints (50, 0) and (200, 0)
        let s = smoke(140.0, 30.0, 0.0);
        assert_eq!(assigner.candidates(&s), vec![0, 1]);
        assert_eq!(
            assigner.select(&s),
            Some(Selection {
                doorway: 1,
                candidates: 2
            })
        );
    }

    #[test]
    fn equidistant_midpoints_prefer_input_order() {
        let first = door("first", [0.0, 0.0], [100.0, 0.0]);
        let second = door("second", [200.0, 0.0], [300.0, 0.0]);
        let s = smoke(150.0, 0.0, 0.0);

        let forward = Assigner::new(vec![first.clone(), second.clone()]);
        assert_eq!(forward.select(&s).map(|sel| sel.doorway), Some(0));

        let reverse = Assigner::new(vec![second, first]);
        let picked = reverse.select(&s).expect("in range");
        assert_eq!(reverse.doorways()[picked.doorway].name(), "second");
    }

    #[test]
    fn assignment_is_deterministic() {
        let doors = vec![
            door("a", [0.0, 0.0], [100.0, 0.0]),
            door("b", [80.0, 40.0], [80.0, 160.0]),
            door("c", [-40.0, 90.0], [40.0, 150.0]),
        ];
        let smokes: Vec<Smoke> = (0..40)
            .map(|i| smoke(-60.0 + i as f64 * 5.0, (i % 7) as f64 * 25.0, 0.0))
            .collect();

        let first = Assigner::new(doors.clone()).run(smokes.clone()).expect("run");
        let second = Assigner::new(doors).run(smokes).expect("run");
        let a: Vec<_> = first.outcomes().collect();
        let b: Vec<_> = second.outcomes().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn smokes_are_grouped_per_doorway() {
        let result = assign_smokes(
            vec![
                door("a", [0.0, 0.0], [100.0, 0.0]),
                door("b", [1000.0, 0.0], [1100.0, 0.0]),
            ],
            vec![
                smoke(50.0, 0.0, 0.0),
                smoke(1050.0, 0.0, 0.0),
                smoke(60.0, 100.0, 0.0),
            ],
            None,
        )
        .expect("run");

        let a = result.find_doorway("a").expect("doorway a");
        let positions: Vec<_> = result.smokes_for(a).map(|s| s.position().x).collect();
        assert_eq!(positions, vec![50.0, 60.0]);
        let b = result.find_doorway("b").expect("doorway b");
        assert_eq!(result.smokes_for(b).count(), 1);
        assert_eq!(result.smokes_for(99).count(), 0);
        for (d, s) in result.pairs() {
            assert_eq!(result.doorway_of(s), Some(d));
        }
    }

    #[test]
    fn reassigning_a_smoke_aborts_the_run() {
        let doors = vec![door("a", [0.0, 0.0], [100.0, 0.0])];
        let first = Assigner::new(doors.clone())
            .run(vec![smoke(50.0, 0.0, 0.0)])
            .expect("run");
        let again = Assigner::new(doors).run(first.smokes().to_vec());
        assert!(again.is_err());
    }

    #[test]
    fn events_trace_the_run() {
        let mut sink = VecSink::new();
        let assigner = Assigner::new(vec![door("a", [0.0, 0.0], [100.0, 0.0])]);
        assigner
            .run_with_events(
                vec![smoke(50.0, 0.0, 0.0), smoke(5000.0, 0.0, 0.0)],
                &mut sink,
            )
            .expect("run");

        let kinds: Vec<_> = sink.as_slice().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                AnalysisEventKind::RunStarted,
                AnalysisEventKind::SmokeAssigned,
                AnalysisEventKind::CoverageComputed,
                AnalysisEventKind::SmokeDiscarded,
                AnalysisEventKind::RunFinished,
            ]
        );
        assert!(matches!(
            sink.as_slice().last(),
            Some(AnalysisEvent::RunFinished {
                assigned: 1,
                discarded: 1
            })
        ));
    }

    #[test]
    fn empty_doorway_set_warns() {
        let mut sink = VecSink::only([AnalysisEventKind::Warning]);
        let result = Assigner::new(Vec::new())
            .run_with_events(vec![smoke(0.0, 0.0, 0.0)], &mut sink)
            .expect("run");
        assert_eq!(result.smokes_discarded, 1);
        assert_eq!(sink.len(), 1);
    }
}
