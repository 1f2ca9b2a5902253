//! Step recorder.
//!
//! The single point where steps enter a run's step list. Engines own one
//! recorder per generation pass, bump its counters as they compare and
//! mutate, and hand it drafts; the recorder stamps ids and metrics.

use serde::Serialize;

use crate::types::{
    AlgorithmDescriptor, AlgorithmMetrics, AlgorithmStep, DataStructureState, Metadata,
    StepMetrics, StepType,
};

/// A step under construction, before id and metrics are assigned.
#[derive(Debug, Clone)]
pub struct StepDraft {
    kind: StepType,
    description: String,
    pseudocode_line: u32,
    affected_indices: Vec<usize>,
    before: DataStructureState,
    after: DataStructureState,
    detailed_explanation: Option<String>,
    variables: Metadata,
}

impl StepDraft {
    /// A step that leaves the container untouched (before == after).
    pub fn observe(
        kind: StepType,
        description: impl Into<String>,
        pseudocode_line: u32,
        state: DataStructureState,
    ) -> Self {
        Self::mutate(kind, description, pseudocode_line, state.clone(), state)
    }

    /// A step that moves the container from `before` to `after`.
    pub fn mutate(
        kind: StepType,
        description: impl Into<String>,
        pseudocode_line: u32,
        before: DataStructureState,
        after: DataStructureState,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            pseudocode_line,
            affected_indices: Vec::new(),
            before,
            after,
            detailed_explanation: None,
            variables: Metadata::new(),
        }
    }

    /// Set the positions this step is about.
    pub fn indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.affected_indices = indices.into_iter().collect();
        self
    }

    /// Attach a longer narration.
    pub fn explain(mut self, explanation: impl Into<String>) -> Self {
        self.detailed_explanation = Some(explanation.into());
        self
    }

    /// Track a temporary variable.
    pub fn var(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.variables.insert(key.into(), v);
        }
        self
    }

    /// True if `before` and `after` hold different data.
    pub fn changes_data(&self) -> bool {
        self.before.data != self.after.data
    }

    /// Show the after-state as a `highlight`, with identical states.
    pub fn into_highlight(self) -> Self {
        Self {
            kind: StepType::Highlight,
            before: self.after.clone(),
            ..self
        }
    }
}

/// Collects steps and running counters during one generation pass.
#[derive(Debug, Clone, Default)]
pub struct StepRecorder {
    steps: Vec<AlgorithmStep>,
    operation_count: u64,
    comparison_count: u64,
    peak_memory_usage: usize,
    time_complexity: String,
}

impl StepRecorder {
    /// Create a recorder that stamps steps with the given time complexity.
    pub fn new(time_complexity: impl Into<String>) -> Self {
        Self {
            time_complexity: time_complexity.into(),
            ..Self::default()
        }
    }

    /// Clear steps and counters, keeping the complexity label.
    pub fn reset(&mut self) {
        self.steps.clear();
        self.operation_count = 0;
        self.comparison_count = 0;
        self.peak_memory_usage = 0;
    }

    /// Count one mutating action.
    pub fn increment_operations(&mut self) {
        self.operation_count += 1;
    }

    /// Count one comparison between two data values.
    pub fn increment_comparisons(&mut self) {
        self.comparison_count += 1;
    }

    /// Stamp a draft with its id and the current counters, then append it.
    pub fn record(&mut self, draft: StepDraft) -> &AlgorithmStep {
        let memory_usage = draft.after.data.memory_usage();
        self.peak_memory_usage = self.peak_memory_usage.max(memory_usage);

        let step = AlgorithmStep {
            id: format!("step-{}", self.steps.len()),
            kind: draft.kind,
            description: draft.description,
            detailed_explanation: draft.detailed_explanation,
            pseudocode_line: draft.pseudocode_line,
            affected_indices: draft.affected_indices,
            before_state: draft.before,
            after_state: draft.after,
            metrics: StepMetrics {
                operation_count: self.operation_count,
                comparison_count: self.comparison_count,
                memory_usage,
                time_complexity: self.time_complexity.clone(),
            },
            variables: draft.variables,
        };

        self.steps.push(step);
        &self.steps[self.steps.len() - 1]
    }

    /// Record a write into the container.
    ///
    /// A write that leaves `data` unchanged (an equal value stored over
    /// itself) is recorded as a `highlight` and does not count as an
    /// operation.
    pub fn record_write(&mut self, draft: StepDraft) -> &AlgorithmStep {
        if draft.changes_data() {
            self.increment_operations();
            self.record(draft)
        } else {
            self.record(draft.into_highlight())
        }
    }

    pub fn steps(&self) -> &[AlgorithmStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn operation_count(&self) -> u64 {
        self.operation_count
    }

    pub fn comparison_count(&self) -> u64 {
        self.comparison_count
    }

    pub fn peak_memory_usage(&self) -> usize {
        self.peak_memory_usage
    }

    /// Consume the recorder, keeping only its steps.
    pub fn into_steps(self) -> Vec<AlgorithmStep> {
        self.steps
    }

    /// Summary metrics for the run so far.
    pub fn summarize(&self, descriptor: &AlgorithmDescriptor) -> AlgorithmMetrics {
        AlgorithmMetrics {
            total_operations: self.operation_count,
            total_comparisons: self.comparison_count,
            peak_memory_usage: self.peak_memory_usage,
            execution_steps: self.steps.len(),
            time_complexity: descriptor.time_complexity.clone(),
            space_complexity: descriptor.space_complexity.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AlgorithmCategory, ComplexityInfo, StructureKind};

    fn descriptor() -> AlgorithmDescriptor {
        AlgorithmDescriptor {
            id: "test".to_string(),
            name: "Test".to_string(),
            category: AlgorithmCategory::Sorting,
            time_complexity: ComplexityInfo::new("O(n)", "O(n^2)", "O(n^2)"),
            space_complexity: ComplexityInfo::uniform("O(1)"),
        }
    }

    #[test]
    fn test_record_assigns_sequential_ids() {
        let mut recorder = StepRecorder::new("O(n^2)");
        let state = DataStructureState::values(StructureKind::Array, &[1, 2]);

        recorder.record(StepDraft::observe(StepType::Highlight, "a", 0, state.clone()));
        recorder.record(StepDraft::observe(StepType::Highlight, "b", 1, state));

        let ids: Vec<_> = recorder.steps().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["step-0", "step-1"]);
    }

    #[test]
    fn test_record_snapshots_counters() {
        let mut recorder = StepRecorder::new("O(n^2)");
        let state = DataStructureState::values(StructureKind::Array, &[2, 1]);

        recorder.increment_comparisons();
        recorder.record(
            StepDraft::observe(StepType::Compare, "compare", 3, state.clone()).indices([0, 1]),
        );
        recorder.increment_operations();
        let after = DataStructureState::values(StructureKind::Array, &[1, 2]);
        let step = recorder.record(
            StepDraft::mutate(StepType::Swap, "swap", 4, state, after).indices([0, 1]),
        );

        assert_eq!(step.metrics.operation_count, 1);
        assert_eq!(step.metrics.comparison_count, 1);
        assert_eq!(step.metrics.time_complexity, "O(n^2)");
        assert_eq!(recorder.steps()[0].metrics.operation_count, 0);
        assert_eq!(recorder.steps()[0].metrics.comparison_count, 1);
    }

    #[test]
    fn test_peak_memory_tracks_after_state() {
        let mut recorder = StepRecorder::new("O(1)");
        let empty = DataStructureState::values(StructureKind::Stack, &[]);
        let three = DataStructureState::values(StructureKind::Stack, &[1, 2, 3]);
        let one = DataStructureState::values(StructureKind::Stack, &[1]);

        recorder.record(StepDraft::mutate(StepType::Insert, "push", 1, empty, three.clone()));
        recorder.record(StepDraft::mutate(StepType::Delete, "pop", 2, three, one));

        assert_eq!(recorder.peak_memory_usage(), 3);
        assert_eq!(recorder.steps()[1].metrics.memory_usage, 1);
    }

    #[test]
    fn test_record_write_downgrades_unchanged_data() {
        let mut recorder = StepRecorder::new("O(n log n)");
        let same = DataStructureState::values(StructureKind::Array, &[4, 4]);
        let step = recorder.record_write(
            StepDraft::mutate(StepType::Swap, "swap equal", 6, same.clone(), same.with("heapSize", 1))
                .indices([0, 1]),
        );
        assert_eq!(step.kind, StepType::Highlight);
        assert_eq!(step.before_state, step.after_state);
        assert_eq!(step.after_state.meta("heapSize"), Some(&serde_json::json!(1)));
        assert_eq!(step.affected_indices, vec![0, 1]);
        assert_eq!(recorder.operation_count(), 0);

        let before = DataStructureState::values(StructureKind::Array, &[4, 1]);
        let after = DataStructureState::values(StructureKind::Array, &[1, 4]);
        let step = recorder.record_write(StepDraft::mutate(StepType::Swap, "swap", 6, before, after));
        assert_eq!(step.kind, StepType::Swap);
        assert_eq!(step.metrics.operation_count, 1);
    }

    #[test]
    fn test_summarize_and_reset() {
        let mut recorder = StepRecorder::new("O(n^2)");
        let state = DataStructureState::values(StructureKind::Array, &[1]);
        recorder.increment_operations();
        recorder.increment_comparisons();
        recorder.increment_comparisons();
        recorder.record(
            StepDraft::observe(StepType::Highlight, "done", 7, state)
                .explain("finished")
                .var("n", 1),
        );

        let metrics = recorder.summarize(&descriptor());
        assert_eq!(metrics.total_operations, 1);
        assert_eq!(metrics.total_comparisons, 2);
        assert_eq!(metrics.execution_steps, 1);
        assert_eq!(metrics.peak_memory_usage, 1);
        assert_eq!(metrics.space_complexity.average, "O(1)");

        let step = &recorder.steps()[0];
        assert_eq!(step.detailed_explanation.as_deref(), Some("finished"));
        assert_eq!(step.variables.get("n"), Some(&serde_json::json!(1)));

        recorder.reset();
        assert!(recorder.is_empty());
        assert_eq!(recorder.operation_count(), 0);
        assert_eq!(recorder.comparison_count(), 0);
        assert_eq!(recorder.peak_memory_usage(), 0);
    }
}
