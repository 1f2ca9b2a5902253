//! Heap sort: bottom-up max-heap build, then repeated root extraction.

use stepwise_trace::{StepDraft, StepRecorder, StepType};

use super::{accept_array, array_state, join, record_start};
use crate::engine::{Engine, StepGenerator};
use crate::error::Result;
use crate::input::EngineInput;

pub struct HeapSort;

pub type HeapSortEngine = Engine<HeapSort>;

impl StepGenerator for HeapSort {
    const NAME: &'static str = "heap-sort";
    type Input = Vec<i64>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        accept_array(Self::NAME, input)
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let mut arr = input.clone();
        let n = arr.len();

        record_start(
            recorder,
            "Heap Sort",
            &arr,
            "Heap Sort first builds a max-heap, then repeatedly moves the root (largest value) to \
             the end and restores heap order.",
        );

        for root in (0..n / 2).rev() {
            sift_down(&mut arr, n, root, recorder);
        }

        recorder.record(
            StepDraft::observe(StepType::Highlight, "Max-heap built", 5, array_state(&arr))
                .indices(0..n)
                .var("heap", format!("[{}]", join(&arr))),
        );

        for end in (1..n).rev() {
            let before = array_state(&arr)
                .with("heapSize", end + 1)
                .with("sortedFrom", end + 1);
            arr.swap(0, end);
            // Swapping equal values shows up as a highlight.
            recorder.record_write(
                StepDraft::mutate(
                    StepType::Swap,
                    format!("Move current max {} to index {}", arr[end], end),
                    6,
                    before,
                    array_state(&arr)
                        .with("heapSize", end)
                        .with("sortedFrom", end),
                )
                .indices([0, end])
                .var("extractedMax", arr[end])
                .var("sortedIndex", end),
            );
            sift_down(&mut arr, end, 0, recorder);
        }

        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                "Heap Sort complete",
                7,
                array_state(&arr).with("sorted", true),
            )
            .indices(0..n)
            .var("sorted", format!("[{}]", join(&arr))),
        );
    }
}

/// Restore the max-heap property below `root` within `arr[..size]`.
fn sift_down(arr: &mut [i64], size: usize, root: usize, recorder: &mut StepRecorder) {
    let mut largest = root;
    let left = 2 * root + 1;
    let right = 2 * root + 2;

    if left < size {
        recorder.increment_comparisons();
        recorder.record(
            StepDraft::observe(
                StepType::Compare,
                format!("Compare root {} with left child {}", arr[largest], arr[left]),
                2,
                array_state(arr).with("heapSize", size),
            )
            .indices([largest, left])
            .var("root", root)
            .var("left", left)
            .var("heapSize", size),
        );
        if arr[left] > arr[largest] {
            largest = left;
        }
    }

    if right < size {
        recorder.increment_comparisons();
        recorder.record(
            StepDraft::observe(
                StepType::Compare,
                format!(
                    "Compare current largest {} with right child {}",
                    arr[largest], arr[right]
                ),
                3,
                array_state(arr).with("heapSize", size),
            )
            .indices([largest, right])
            .var("root", root)
            .var("right", right)
            .var("heapSize", size),
        );
        if arr[right] > arr[largest] {
            largest = right;
        }
    }

    if largest != root {
        let before = array_state(arr).with("heapSize", size);
        arr.swap(root, largest);
        recorder.increment_operations();
        recorder.record(
            StepDraft::mutate(
                StepType::Swap,
                format!("Swap {} and {} to maintain max-heap", arr[largest], arr[root]),
                4,
                before,
                array_state(arr).with("heapSize", size),
            )
            .indices([root, largest])
            .var("root", root)
            .var("largest", largest)
            .var("heapSize", size),
        );
        sift_down(arr, size, largest, recorder);
    }
}

#[cfg(test)]
mod tests {
    use stepwise_trace::StepType;

    use crate::catalog::AlgorithmId;
    use crate::sorting::testing::{assert_replayable, count, final_values, run};

    #[test]
    fn test_sorts_and_replays() {
        let steps = run(AlgorithmId::HeapSort, &[12, 11, 13, 5, 6, 7]);
        assert_eq!(final_values(&steps), vec![5, 6, 7, 11, 12, 13]);
        assert_replayable(&steps);
        assert_eq!(steps.last().unwrap().after_state.meta("sorted"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_heap_built_before_extraction() {
        let steps = run(AlgorithmId::HeapSort, &[1, 5, 3]);
        let built = steps
            .iter()
            .position(|s| s.description == "Max-heap built")
            .unwrap();
        assert_eq!(steps[built].after_state.data.as_values(), Some(&[5, 1, 3][..]));

        let first_extract = steps
            .iter()
            .position(|s| s.pseudocode_line == 6)
            .unwrap();
        assert!(first_extract > built);
    }

    #[test]
    fn test_equal_extraction_is_not_a_swap() {
        let steps = run(AlgorithmId::HeapSort, &[3, 3]);
        assert_eq!(final_values(&steps), vec![3, 3]);
        assert_eq!(count(&steps, StepType::Swap), 0);
        assert_eq!(steps.last().unwrap().metrics.operation_count, 0);

        let extract = steps.iter().find(|s| s.pseudocode_line == 6).unwrap();
        assert_eq!(extract.kind, StepType::Highlight);
        assert_eq!(extract.after_state.meta("sortedFrom"), Some(&serde_json::json!(1)));
        assert_replayable(&steps);
    }

    #[test]
    fn test_extraction_marks_boundary() {
        let steps = run(AlgorithmId::HeapSort, &[2, 9, 4]);
        let boundaries: Vec<_> = steps
            .iter()
            .filter(|s| s.kind == StepType::Swap && s.pseudocode_line == 6)
            .filter_map(|s| s.after_state.meta("sortedFrom").and_then(|v| v.as_u64()))
            .collect();
        assert_eq!(boundaries, vec![2, 1]);
    }
}
