//! Selection sort.

use stepwise_trace::{StepDraft, StepRecorder, StepType};

use super::{accept_array, array_state, join, record_sorted, record_start};
use crate::engine::{Engine, StepGenerator};
use crate::error::Result;
use crate::input::EngineInput;

pub struct SelectionSort;

pub type SelectionSortEngine = Engine<SelectionSort>;

impl StepGenerator for SelectionSort {
    const NAME: &'static str = "selection-sort";
    type Input = Vec<i64>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        accept_array(Self::NAME, input)
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let mut arr = input.clone();
        let n = arr.len();

        record_start(
            recorder,
            "Selection Sort",
            &arr,
            "For every position we scan the unsorted remainder for its minimum and move that \
             minimum into place with a single swap.",
        );

        for i in 0..n.saturating_sub(1) {
            let mut min_idx = i;

            recorder.record(
                StepDraft::observe(
                    StepType::Highlight,
                    format!("Finding minimum element from index {}", i),
                    1,
                    array_state(&arr).with("currentIndex", i),
                )
                .indices([i])
                .explain(format!(
                    "Positions 0..{} are sorted. The smallest value in arr[{}..{}] belongs at index {}.",
                    i, i, n, i
                ))
                .var("i", i)
                .var("minIdx", min_idx),
            );

            for j in i + 1..n {
                recorder.increment_comparisons();
                recorder.record(
                    StepDraft::observe(
                        StepType::Compare,
                        format!("Comparing {} with {}", arr[min_idx], arr[j]),
                        3,
                        array_state(&arr)
                            .with("minIdx", min_idx)
                            .with("comparing", j),
                    )
                    .indices([min_idx, j])
                    .var("i", i)
                    .var("j", j)
                    .var("minIdx", min_idx)
                    .var("arr[minIdx]", arr[min_idx])
                    .var("arr[j]", arr[j]),
                );

                if arr[j] < arr[min_idx] {
                    min_idx = j;
                    recorder.record(
                        StepDraft::observe(
                            StepType::Highlight,
                            format!("New minimum found: {} at index {}", arr[min_idx], min_idx),
                            4,
                            array_state(&arr).with("minIdx", min_idx),
                        )
                        .indices([min_idx])
                        .var("minIdx", min_idx),
                    );
                }
            }

            if min_idx != i {
                let before = array_state(&arr);
                arr.swap(i, min_idx);
                recorder.increment_operations();
                recorder.record(
                    StepDraft::mutate(
                        StepType::Swap,
                        format!("Swapping {} and {}", arr[min_idx], arr[i]),
                        6,
                        before,
                        array_state(&arr),
                    )
                    .indices([i, min_idx])
                    .explain(format!(
                        "The minimum {} moves to index {}. After the swap: [{}]",
                        arr[i],
                        i,
                        join(&arr)
                    ))
                    .var("i", i)
                    .var("minIdx", min_idx),
                );
            }

            recorder.record(
                StepDraft::observe(
                    StepType::Highlight,
                    format!("Element at index {} is now in its final position", i),
                    7,
                    array_state(&arr).with("sortedIndex", i),
                )
                .indices([i]),
            );
        }

        record_sorted(recorder, &arr, 8);
    }
}
