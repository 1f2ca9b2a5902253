//! Bubble sort.
//!
//! No early exit on a swap-free pass: every pass runs to completion, so an
//! array of n elements always costs n·(n-1)/2 comparisons.

use stepwise_trace::{StepDraft, StepRecorder, StepType};

use super::{accept_array, array_state, join, record_sorted, record_start};
use crate::engine::{Engine, StepGenerator};
use crate::error::Result;
use crate::input::EngineInput;

pub struct BubbleSort;

pub type BubbleSortEngine = Engine<BubbleSort>;

impl StepGenerator for BubbleSort {
    const NAME: &'static str = "bubble-sort";
    type Input = Vec<i64>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        accept_array(Self::NAME, input)
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let mut arr = input.clone();
        let n = arr.len();

        record_start(
            recorder,
            "Bubble Sort",
            &arr,
            "We iterate through the array repeatedly, comparing adjacent elements and swapping \
             them when they are out of order. Each pass bubbles the largest remaining element to the end.",
        );

        for i in 0..n.saturating_sub(1) {
            for j in 0..n - i - 1 {
                recorder.increment_comparisons();
                recorder.record(
                    StepDraft::observe(
                        StepType::Compare,
                        format!("Comparing {} and {}", arr[j], arr[j + 1]),
                        3,
                        array_state(&arr),
                    )
                    .indices([j, j + 1])
                    .explain(format!(
                        "arr[{}] = {} is compared with arr[{}] = {}. If the left value is larger they are swapped.",
                        j,
                        arr[j],
                        j + 1,
                        arr[j + 1]
                    ))
                    .var("i", i)
                    .var("j", j)
                    .var("arr[j]", arr[j])
                    .var("arr[j+1]", arr[j + 1]),
                );

                if arr[j] > arr[j + 1] {
                    let before = array_state(&arr);
                    let temp = arr[j];
                    arr.swap(j, j + 1);
                    recorder.increment_operations();

                    recorder.record(
                        StepDraft::mutate(
                            StepType::Swap,
                            format!("Swapping {} and {}", temp, arr[j]),
                            4,
                            before,
                            array_state(&arr),
                        )
                        .indices([j, j + 1])
                        .explain(format!(
                            "Since {} > {}, they trade places. After the swap: [{}]",
                            temp,
                            arr[j],
                            join(&arr)
                        ))
                        .var("i", i)
                        .var("j", j)
                        .var("temp", temp),
                    );
                }
            }

            let settled = n - i - 1;
            recorder.record(
                StepDraft::observe(
                    StepType::Highlight,
                    format!("Element at index {} is now in its final position", settled),
                    6,
                    array_state(&arr).with("sortedIndex", settled),
                )
                .indices([settled])
                .explain(format!(
                    "Pass {} complete: {} has bubbled up to index {}.",
                    i + 1,
                    arr[settled],
                    settled
                ))
                .var("pass", i + 1)
                .var("sorted position", settled)
                .var("remaining passes", n - i - 2),
            );
        }

        record_sorted(recorder, &arr, 7);
    }
}
