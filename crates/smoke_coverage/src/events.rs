//! Event types and sinks for observing analysis runs.
//!
//! This module defines [`AnalysisEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while assigning smokes via
//! [`crate::assign::Assigner::run_with_events`] or [`crate::assign::assign_smokes`],
//! and while loading input records in [`crate::records`].
use glam::DVec2;

use crate::coverage::CoverageCase;

/// Describes events emitted by analysis operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisEvent {
    /// Emitted when an assignment run starts.
    RunStarted {
        /// Number of doorways considered.
        doorway_count: usize,
        /// Number of smokes to assign.
        smoke_count: usize,
    },

    /// Emitted when a smoke is outside every detection zone.
    SmokeDiscarded {
        /// Input index of the smoke.
        index: usize,
        /// Landing position.
        position: DVec2,
    },

    /// Emitted when a smoke is matched to a doorway.
    SmokeAssigned {
        /// Input index of the smoke.
        index: usize,
        /// Name of the chosen doorway.
        doorway: String,
        /// Number of doorways whose detection zone contained the smoke.
        candidates: usize,
    },

    /// Emitted after coverage was computed for an assigned smoke.
    CoverageComputed {
        /// Input index of the smoke.
        index: usize,
        /// Name of the assigned doorway.
        doorway: String,
        /// Branch of the solver that produced the value.
        case: CoverageCase,
        /// Coverage in `[0, 100]`.
        percent: f64,
    },

    /// Emitted when the run finishes.
    RunFinished {
        /// Smokes that received a doorway.
        assigned: usize,
        /// Smokes outside every detection zone.
        discarded: usize,
    },

    /// Emitted when an input record is rejected at the loading boundary.
    RecordRejected {
        /// Position of the record in its source.
        index: usize,
        /// Record key, if the source is keyed.
        key: Option<String>,
        /// Human-readable reason.
        reason: String,
    },

    /// Non-fatal warning.
    Warning {
        /// Context string (e.g. doorway name, input file).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`AnalysisEvent`], used to filter what a sink receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnalysisEventKind {
    RunStarted,
    SmokeDiscarded,
    SmokeAssigned,
    CoverageComputed,
    RunFinished,
    RecordRejected,
    Warning,
}

impl AnalysisEvent {
    pub fn kind(&self) -> AnalysisEventKind {
        match self {
            AnalysisEvent::RunStarted { .. } => AnalysisEventKind::RunStarted,
            AnalysisEvent::SmokeDiscarded { .. } => AnalysisEventKind::SmokeDiscarded,
            AnalysisEvent::SmokeAssigned { .. } => AnalysisEventKind::SmokeAssigned,
            AnalysisEvent::CoverageComputed { .. } => AnalysisEventKind::CoverageComputed,
            AnalysisEvent::RunFinished { .. } => AnalysisEventKind::RunFinished,
            AnalysisEvent::RecordRejected { .. } => AnalysisEventKind::RecordRejected,
            AnalysisEvent::Warning { .. } => AnalysisEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`AnalysisEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: AnalysisEvent);

    /// Whether events of `kind` should be built and sent at all.
    fn wants(&self, _kind: AnalysisEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = AnalysisEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: AnalysisEvent) {}

    #[inline]
    fn wants(&self, _kind: AnalysisEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(AnalysisEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(AnalysisEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(AnalysisEvent),
{
    #[inline]
    fn send(&mut self, event: AnalysisEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<AnalysisEvent>,
    only: Option<Vec<AnalysisEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            only: None,
        }
    }

    /// Collects only events whose kind is listed.
    pub fn only(kinds: impl IntoIterator<Item = AnalysisEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<AnalysisEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[AnalysisEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: AnalysisEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: AnalysisEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: AnalysisEvent) {
        let kind = event.kind();
        for sink in self.sinks.iter_mut().filter(|s| s.wants(kind)) {
            sink.send(event.clone());
        }
    }

    fn wants(&self, kind: AnalysisEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
