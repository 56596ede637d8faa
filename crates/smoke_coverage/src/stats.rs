//! Descriptive statistics over coverage values.
//!
//! Every summary is an `Option`: `None` is the explicit "no data" result for an empty
//! collection, so no caller ever sees a NaN mean or an undefined minimum.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::assign::Assignment;
use crate::smoke::Smoke;

/// Descriptive statistics of a set of coverage percentages.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageStats {
    /// Number of values summarized.
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Middle value; the mean of the two middle values for an even count.
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl CoverageStats {
    /// Computes statistics from unsorted values.
    ///
    /// Returns `None` if `values` is empty.
    ///
    /// ```
    /// # use smoke_coverage::stats::CoverageStats;
    /// let stats = CoverageStats::new([40.0, 100.0, 10.0, 50.0]).unwrap();
    /// assert_eq!(stats.min, 10.0);
    /// assert_eq!(stats.max, 100.0);
    /// assert_eq!(stats.mean, 50.0);
    /// assert_eq!(stats.median, 45.0);
    /// assert!(CoverageStats::new(Vec::<f64>::new()).is_none());
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes statistics from values sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted_values[mid - 1] + sorted_values[mid]) * 0.5
        } else {
            sorted_values[mid]
        };
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }

    /// Statistics over the coverage of the given smokes; unassigned smokes are skipped.
    #[must_use]
    pub fn from_smokes<'a, I>(smokes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Smoke>,
    {
        Self::new(smokes.into_iter().filter_map(Smoke::coverage))
    }
}

/// Statistics for one doorway.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DoorwayStats {
    pub name: String,
    pub smoke_count: usize,
    /// `None` when no smoke was assigned to the doorway.
    pub stats: Option<CoverageStats>,
}

/// Per-doorway and overall statistics of an assignment run.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    /// One entry per doorway, in doorway order.
    pub doorways: Vec<DoorwayStats>,
    /// Over every assigned smoke.
    pub overall: Option<CoverageStats>,
}

impl StatsReport {
    pub fn from_assignment(assignment: &Assignment) -> Self {
        let doorways = assignment
            .doorways()
            .iter()
            .enumerate()
            .map(|(index, doorway)| DoorwayStats {
                name: doorway.name().to_owned(),
                smoke_count: assignment.smokes_for(index).count(),
                stats: CoverageStats::from_smokes(assignment.smokes_for(index)),
            })
            .collect();

        Self {
            doorways,
            overall: CoverageStats::from_smokes(assignment.smokes()),
        }
    }

    pub fn doorway(&self, name: &str) -> Option<&DoorwayStats> {
        self.doorways.iter().find(|d| d.name == name)
    }
}

/// Splits smokes by `key` and summarizes each group.
///
/// ```
/// # use smoke_coverage::stats::group_by;
/// # use smoke_coverage::smoke::Smoke;
/// let smokes: Vec<Smoke> = Vec::new();
/// let by_side = group_by(&smokes, |s| s.meta.side.clone());
/// assert!(by_side.is_empty());
/// ```
pub fn group_by<'a, K, I, F>(smokes: I, key: F) -> BTreeMap<K, Option<CoverageStats>>
where
    K: Ord,
    I: IntoIterator<Item = &'a Smoke>,
    F: Fn(&Smoke) -> K,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for smoke in smokes {
        let values = groups.entry(key(smoke)).or_default();
        if let Some(coverage) = smoke.coverage() {
            values.push(coverage);
        }
    }
    groups
        .into_iter()
        .map(|(k, values)| (k, CoverageStats::new(values)))
        .collect()
}
