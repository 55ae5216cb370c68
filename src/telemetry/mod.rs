//! Per-call diagnostics collection.
//!
//! The sink records advisory events for one analysis request, logging each
//! at warning level as it is recorded. The collected list is attached to
//! the response so downstream consumers see the same diagnostics the logs
//! do, never a silently swallowed warning.

pub mod events;

pub use events::{AnalysisEvent, Severity};

/// Collects advisory events for a single analysis call.
///
/// One sink is created per request and dropped with it; there is no shared
/// or global diagnostic state.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    events: Vec<AnalysisEvent>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an advisory event, logging it at warning level.
    pub fn record(&mut self, event: AnalysisEvent) {
        match &event {
            AnalysisEvent::FeatureClipped {
                feature,
                observed,
                lower,
                upper,
            } => {
                tracing::warn!(
                    "[Validator] {} = {:.5} outside training range, clipped to [{:.5}, {:.5}]",
                    feature,
                    observed,
                    lower,
                    upper
                );
            }
            AnalysisEvent::LowConfidence { confidence } => {
                tracing::warn!(
                    "[Classifier] Low confidence prediction ({:.1}%). Results may be uncertain.",
                    confidence * 100.0
                );
            }
        }
        self.events.push(event);
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume the sink, returning the recorded events in emission order.
    pub fn into_events(self) -> Vec<AnalysisEvent> {
        self.events
    }
}
