//! Sorting engines.
//!
//! Each engine sorts a working copy of the input, opening with a `highlight`
//! of the untouched array and closing with a `highlight` over every index
//! carrying `metadata.sorted = true`.

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::{BubbleSort, BubbleSortEngine};
pub use heap::{HeapSort, HeapSortEngine};
pub use insertion::{InsertionSort, InsertionSortEngine};
pub use merge::{MergeSort, MergeSortEngine};
pub use quick::{QuickSort, QuickSortEngine};
pub use selection::{SelectionSort, SelectionSortEngine};

use stepwise_trace::{DataStructureState, StepDraft, StepRecorder, StepType, StructureKind};

use crate::engine::mismatch;
use crate::error::Result;
use crate::input::EngineInput;

pub(crate) fn accept_array(algorithm: &str, input: EngineInput) -> Result<Vec<i64>> {
    match input {
        EngineInput::Array { values } => Ok(values),
        other => mismatch(algorithm, "array", &other),
    }
}

pub(crate) fn array_state(arr: &[i64]) -> DataStructureState {
    DataStructureState::values(StructureKind::Array, arr)
}

pub(crate) fn join(arr: &[i64]) -> String {
    arr.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Opening `highlight`: whole array, nothing affected.
pub(crate) fn record_start(
    recorder: &mut StepRecorder,
    title: &str,
    arr: &[i64],
    explanation: &str,
) {
    recorder.record(
        StepDraft::observe(
            StepType::Highlight,
            format!("Starting {}", title),
            0,
            array_state(arr),
        )
        .explain(explanation)
        .var("n", arr.len()),
    );
}

/// Closing `highlight`: every index, `sorted = true`.
pub(crate) fn record_sorted(recorder: &mut StepRecorder, arr: &[i64], line: u32) {
    let comparisons = recorder.comparison_count();
    let operations = recorder.operation_count();
    recorder.record(
        StepDraft::observe(
            StepType::Highlight,
            "Array is now sorted",
            line,
            array_state(arr).with("sorted", true),
        )
        .indices(0..arr.len())
        .explain(format!(
            "All elements are now in ascending order: [{}]. Total comparisons: {}, total operations: {}.",
            join(arr),
            comparisons,
            operations
        ))
        .var("total comparisons", comparisons)
        .var("total operations", operations),
    );
}

#[cfg(test)]
pub(crate) mod testing {
    use stepwise_trace::{AlgorithmStep, StepType};

    use crate::catalog::AlgorithmId;
    use crate::engine::AlgorithmEngine;
    use crate::input::EngineInput;

    /// Run a catalog engine over `values` and return its steps.
    pub fn run(id: AlgorithmId, values: &[i64]) -> Vec<AlgorithmStep> {
        let mut engine = id.create_engine();
        engine
            .initialize(
                id.descriptor(),
                EngineInput::Array {
                    values: values.to_vec(),
                },
            )
            .unwrap();
        engine.generate_steps().unwrap().to_vec()
    }

    pub fn final_values(steps: &[AlgorithmStep]) -> Vec<i64> {
        steps
            .last()
            .and_then(|s| s.after_state.data.as_values())
            .unwrap()
            .to_vec()
    }

    /// Mutating steps change the data; the after-state of each step is the
    /// before-state of the next.
    pub fn assert_replayable(steps: &[AlgorithmStep]) {
        for pair in steps.windows(2) {
            assert_eq!(
                pair[0].after_state.data, pair[1].before_state.data,
                "{} -> {} breaks the replay chain",
                pair[0].id, pair[1].id
            );
        }
        for step in steps {
            if step.kind.is_mutation() {
                assert_ne!(step.before_state.data, step.after_state.data, "{}", step.id);
            } else {
                assert_eq!(step.before_state.data, step.after_state.data, "{}", step.id);
            }
        }
    }

    pub fn count(steps: &[AlgorithmStep], kind: StepType) -> usize {
        steps.iter().filter(|s| s.kind == kind).count()
    }
}
