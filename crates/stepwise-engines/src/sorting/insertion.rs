//! Insertion sort.
//!
//! Every inner comparison is counted and shown, including the one that ends
//! the shift loop. A key that is already in place gets a `highlight` instead
//! of an `insert`, since nothing is written.

use stepwise_trace::{StepDraft, StepRecorder, StepType};

use super::{accept_array, array_state, join, record_sorted, record_start};
use crate::engine::{Engine, StepGenerator};
use crate::error::Result;
use crate::input::EngineInput;

pub struct InsertionSort;

pub type InsertionSortEngine = Engine<InsertionSort>;

impl StepGenerator for InsertionSort {
    const NAME: &'static str = "insertion-sort";
    type Input = Vec<i64>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        accept_array(Self::NAME, input)
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let mut arr = input.clone();
        let n = arr.len();

        record_start(
            recorder,
            "Insertion Sort",
            &arr,
            "The prefix arr[0..i] is always sorted. Each new element is taken out and the larger \
             elements of the prefix shift right until the gap reaches its position.",
        );

        for i in 1..n {
            let key = arr[i];

            recorder.record(
                StepDraft::observe(
                    StepType::Highlight,
                    format!("Inserting element {} into sorted portion", key),
                    2,
                    array_state(&arr).with("key", i),
                )
                .indices([i])
                .var("i", i)
                .var("key", key),
            );

            // `gap` is the slot the key would occupy if the scan stopped now.
            let mut gap = i;
            while gap > 0 {
                let j = gap - 1;
                recorder.increment_comparisons();
                recorder.record(
                    StepDraft::observe(
                        StepType::Compare,
                        format!("Comparing {} with {}", arr[j], key),
                        4,
                        array_state(&arr),
                    )
                    .indices([j, gap])
                    .var("j", j)
                    .var("arr[j]", arr[j])
                    .var("key", key),
                );

                if arr[j] <= key {
                    break;
                }

                let before = array_state(&arr);
                arr[gap] = arr[j];
                // Shifting over an equal value changes nothing.
                recorder.record_write(
                    StepDraft::mutate(
                        StepType::Update,
                        format!("Shifting {} to the right", arr[gap]),
                        5,
                        before,
                        array_state(&arr),
                    )
                    .indices([j, gap])
                    .var("j", j)
                    .var("key", key),
                );
                gap = j;
            }

            // A mutating step must change the data; a key left in place
            // is a highlight.
            if gap == i {
                recorder.record(
                    StepDraft::observe(
                        StepType::Highlight,
                        format!("{} is already in position {}", key, i),
                        7,
                        array_state(&arr),
                    )
                    .indices([i])
                    .var("key", key),
                );
                continue;
            }

            let before = array_state(&arr);
            arr[gap] = key;
            recorder.increment_operations();
            recorder.record(
                StepDraft::mutate(
                    StepType::Insert,
                    format!("Inserting {} at index {}", key, gap),
                    7,
                    before,
                    array_state(&arr),
                )
                .indices([gap])
                .explain(format!("After inserting {}: [{}]", key, join(&arr)))
                .var("key", key)
                .var("position", gap),
            );
        }

        record_sorted(recorder, &arr, 8);
    }
}

#[cfg(test)]
mod tests {
    use stepwise_trace::StepType;

    use crate::catalog::AlgorithmId;
    use crate::sorting::testing::{assert_replayable, count, final_values, run};

    #[test]
    fn test_sorts_and_replays() {
        let steps = run(AlgorithmId::InsertionSort, &[5, 2, 4, 6, 1, 3]);
        assert_eq!(final_values(&steps), vec![1, 2, 3, 4, 5, 6]);
        assert_replayable(&steps);
    }

    #[test]
    fn test_terminating_comparison_is_counted() {
        // Sorted input: one comparison per key, each stopping the scan.
        let steps = run(AlgorithmId::InsertionSort, &[1, 2, 3, 4]);
        assert_eq!(count(&steps, StepType::Compare), 3);
        assert_eq!(count(&steps, StepType::Update), 0);
        assert_eq!(count(&steps, StepType::Insert), 0);
        assert_eq!(steps.last().unwrap().metrics.operation_count, 0);
    }

    #[test]
    fn test_reverse_input_shifts_every_pair() {
        let steps = run(AlgorithmId::InsertionSort, &[3, 2, 1]);
        // key 2: one shift; key 1: two shifts; no terminating compare at index 0
        assert_eq!(count(&steps, StepType::Update), 3);
        assert_eq!(count(&steps, StepType::Compare), 3);
        assert_eq!(count(&steps, StepType::Insert), 2);
        assert_eq!(steps.last().unwrap().metrics.operation_count, 5);
    }

    #[test]
    fn test_shift_over_equal_value_is_highlighted() {
        let steps = run(AlgorithmId::InsertionSort, &[2, 2, 1]);
        assert_eq!(final_values(&steps), vec![1, 2, 2]);
        // the second shift copies 2 over the 2 already there
        assert_eq!(count(&steps, StepType::Update), 1);
        assert_eq!(count(&steps, StepType::Insert), 1);
        assert_eq!(steps.last().unwrap().metrics.operation_count, 2);
        assert_replayable(&steps);
    }

    #[test]
    fn test_mutating_steps_change_data() {
        let steps = run(AlgorithmId::InsertionSort, &[4, 1, 3, 2]);
        for step in steps.iter().filter(|s| s.kind.is_mutation()) {
            assert_ne!(step.before_state.data, step.after_state.data, "{}", step.id);
        }
    }
}
