//! Quick sort with Lomuto partitioning around the last element.

use stepwise_trace::{DataStructureState, StepDraft, StepRecorder, StepType};

use super::{accept_array, array_state, record_sorted, record_start};
use crate::engine::{Engine, StepGenerator};
use crate::error::Result;
use crate::input::EngineInput;

pub struct QuickSort;

pub type QuickSortEngine = Engine<QuickSort>;

impl StepGenerator for QuickSort {
    const NAME: &'static str = "quick-sort";
    type Input = Vec<i64>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        accept_array(Self::NAME, input)
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let mut arr = input.clone();

        record_start(
            recorder,
            "Quick Sort",
            &arr,
            "Each call picks the last element of its range as pivot, moves every smaller element \
             to the left of it, then recurses into both sides.",
        );

        if !arr.is_empty() {
            let high = arr.len() - 1;
            sort_range(&mut arr, 0, high, 0, recorder);
        }

        record_sorted(recorder, &arr, 10);
    }
}

/// Snapshot tagged with the current call frame.
fn frame_state(arr: &[i64], low: usize, high: usize, depth: usize, phase: &str) -> DataStructureState {
    array_state(arr)
        .with("low", low)
        .with("high", high)
        .with("depth", depth)
        .with("phase", phase)
}

fn sort_range(arr: &mut [i64], low: usize, high: usize, depth: usize, recorder: &mut StepRecorder) {
    if low >= high {
        return;
    }

    recorder.record(
        StepDraft::observe(
            StepType::Highlight,
            format!("Quick Sort on range [{}..{}]", low, high),
            1,
            frame_state(arr, low, high, depth, "call"),
        )
        .indices(low..=high)
        .var("low", low)
        .var("high", high)
        .var("depth", depth),
    );

    let pivot_index = partition(arr, low, high, depth, recorder);

    if pivot_index > low {
        sort_range(arr, low, pivot_index - 1, depth + 1, recorder);
    }
    sort_range(arr, pivot_index + 1, high, depth + 1, recorder);
}

fn partition(
    arr: &mut [i64],
    low: usize,
    high: usize,
    depth: usize,
    recorder: &mut StepRecorder,
) -> usize {
    let pivot = arr[high];

    recorder.record(
        StepDraft::observe(
            StepType::Highlight,
            format!("Selected pivot: {} at index {}", pivot, high),
            2,
            frame_state(arr, low, high, depth, "pivot")
                .with("pivot", high)
                .with("pivotIndex", high)
                .with("pivotValue", pivot),
        )
        .indices([high])
        .explain(format!(
            "Elements smaller than {} will be gathered at the front of [{}..{}].",
            pivot, low, high
        ))
        .var("pivot", pivot),
    );

    // Next slot for an element smaller than the pivot.
    let mut store = low;
    for j in low..high {
        recorder.increment_comparisons();
        recorder.record(
            StepDraft::observe(
                StepType::Compare,
                format!("Comparing {} with pivot {}", arr[j], pivot),
                4,
                frame_state(arr, low, high, depth, "partition-compare")
                    .with("pivot", high)
                    .with("comparing", j),
            )
            .indices([j, high])
            .var("j", j)
            .var("i", store)
            .var("pivot", pivot),
        );

        if arr[j] < pivot {
            if store != j {
                let before = array_state(arr);
                arr.swap(store, j);
                recorder.increment_operations();
                recorder.record(
                    StepDraft::mutate(
                        StepType::Swap,
                        format!("Swapping {} and {}", arr[j], arr[store]),
                        5,
                        before,
                        array_state(arr),
                    )
                    .indices([store, j])
                    .var("i", store)
                    .var("j", j),
                );
            }
            store += 1;
        }
    }

    // A mutating step must change the data, so a pivot that already sits
    // at its slot, or equals the value there, gets a highlight.
    if arr[store] != pivot {
        let before = array_state(arr);
        arr.swap(store, high);
        recorder.increment_operations();
        recorder.record(
            StepDraft::mutate(
                StepType::Swap,
                format!("Placing pivot {} at index {}", arr[store], store),
                7,
                before,
                array_state(arr),
            )
            .indices([store, high])
            .var("pivotIndex", store),
        );
    } else {
        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                format!("Pivot {} is already at index {}", pivot, store),
                7,
                array_state(arr),
            )
            .indices([store])
            .var("pivotIndex", store),
        );
    }

    recorder.record(
        StepDraft::observe(
            StepType::Highlight,
            format!("Partition complete. Pivot at index {}", store),
            8,
            frame_state(arr, low, high, depth, "partition-done")
                .with("partitioned", store)
                .with("pivotIndex", store)
                .with("pivotValue", pivot),
        )
        .indices([store])
        .explain(format!(
            "Everything left of index {} is smaller than {}; everything right of it is not.",
            store, pivot
        )),
    );

    store
}

#[cfg(test)]
mod tests {
    use stepwise_trace::StepType;

    use crate::catalog::AlgorithmId;
    use crate::sorting::testing::{assert_replayable, count, final_values, run};

    #[test]
    fn test_sorts_and_replays() {
        let steps = run(AlgorithmId::QuickSort, &[10, 80, 30, 90, 40, 50, 70]);
        assert_eq!(final_values(&steps), vec![10, 30, 40, 50, 70, 80, 90]);
        assert_replayable(&steps);
    }

    #[test]
    fn test_sorted_input_recurses_without_underflow() {
        let steps = run(AlgorithmId::QuickSort, &[1, 2, 3, 4, 5]);
        assert_eq!(final_values(&steps), vec![1, 2, 3, 4, 5]);
        assert_eq!(count(&steps, StepType::Swap), 0);
        // worst case for a last-element pivot: 4 + 3 + 2 + 1
        assert_eq!(steps.last().unwrap().metrics.comparison_count, 10);
    }

    #[test]
    fn test_partition_reports_pivot_position() {
        let steps = run(AlgorithmId::QuickSort, &[3, 1, 2]);
        let done = steps
            .iter()
            .find(|s| s.after_state.meta("phase") == Some(&serde_json::json!("partition-done")))
            .unwrap();
        assert_eq!(done.after_state.meta("pivotIndex"), Some(&serde_json::json!(1)));
        assert_eq!(done.after_state.meta("pivotValue"), Some(&serde_json::json!(2)));
        assert_eq!(done.after_state.meta("depth"), Some(&serde_json::json!(0)));
    }

    #[test]
    fn test_pivot_equal_to_its_slot_is_highlighted() {
        let steps = run(AlgorithmId::QuickSort, &[2, 2]);
        assert_eq!(count(&steps, StepType::Swap), 0);
        assert!(steps.iter().any(|s| s.description == "Pivot 2 is already at index 0"));
        assert_replayable(&steps);
    }

    #[test]
    fn test_reverse_input() {
        let steps = run(AlgorithmId::QuickSort, &[5, 4, 3, 2, 1]);
        assert_eq!(final_values(&steps), vec![1, 2, 3, 4, 5]);
        for step in steps.iter().filter(|s| s.kind == StepType::Swap) {
            assert_ne!(step.before_state.data, step.after_state.data);
        }
    }
}
