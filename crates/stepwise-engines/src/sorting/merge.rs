//! Top-down merge sort.
//!
//! The recursion is flattened into the step list; every divide and merge
//! `highlight` carries `left`/`mid`/`right`, `depth` and `phase` so the call
//! tree can be rebuilt from the steps alone. Placing a value into the slot
//! that already holds it is a `highlight`.

use stepwise_trace::{StepDraft, StepRecorder, StepType};

use super::{accept_array, array_state, record_sorted, record_start};
use crate::engine::{Engine, StepGenerator};
use crate::error::Result;
use crate::input::EngineInput;

pub struct MergeSort;

pub type MergeSortEngine = Engine<MergeSort>;

impl StepGenerator for MergeSort {
    const NAME: &'static str = "merge-sort";
    type Input = Vec<i64>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        accept_array(Self::NAME, input)
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let mut arr = input.clone();

        record_start(
            recorder,
            "Merge Sort",
            &arr,
            "The array is split in half recursively until every piece holds one element, then \
             neighbouring pieces are merged back together in sorted order.",
        );

        if !arr.is_empty() {
            let right = arr.len() - 1;
            sort_range(&mut arr, 0, right, 0, recorder);
        }

        record_sorted(recorder, &arr, 10);
    }
}

fn sort_range(arr: &mut [i64], left: usize, right: usize, depth: usize, recorder: &mut StepRecorder) {
    if left >= right {
        return;
    }
    let mid = (left + right) / 2;

    recorder.record(
        StepDraft::observe(
            StepType::Highlight,
            format!("Dividing array from index {} to {}", left, right),
            2,
            array_state(arr)
                .with("dividing", true)
                .with("left", left)
                .with("mid", mid)
                .with("right", right)
                .with("depth", depth)
                .with("phase", "divide"),
        )
        .indices(left..=right)
        .explain(format!(
            "Split [{}..{}] into [{}..{}] and [{}..{}] at recursion depth {}.",
            left,
            right,
            left,
            mid,
            mid + 1,
            right,
            depth
        ))
        .var("left", left)
        .var("mid", mid)
        .var("right", right),
    );

    sort_range(arr, left, mid, depth + 1, recorder);
    sort_range(arr, mid + 1, right, depth + 1, recorder);
    merge(arr, left, mid, right, depth, recorder);
}

fn merge(
    arr: &mut [i64],
    left: usize,
    mid: usize,
    right: usize,
    depth: usize,
    recorder: &mut StepRecorder,
) {
    let left_run = arr[left..=mid].to_vec();
    let right_run = arr[mid + 1..=right].to_vec();

    recorder.record(
        StepDraft::observe(
            StepType::Highlight,
            format!(
                "Merging subarrays [{}..{}] and [{}..{}]",
                left,
                mid,
                mid + 1,
                right
            ),
            5,
            array_state(arr)
                .with("merging", true)
                .with("left", left)
                .with("mid", mid)
                .with("right", right)
                .with("depth", depth)
                .with("phase", "merge"),
        )
        .indices(left..=right)
        .var("left", left)
        .var("mid", mid)
        .var("right", right),
    );

    let (mut i, mut j, mut k) = (0, 0, left);

    while i < left_run.len() && j < right_run.len() {
        recorder.increment_comparisons();
        recorder.record(
            StepDraft::observe(
                StepType::Compare,
                format!("Comparing {} and {}", left_run[i], right_run[j]),
                6,
                array_state(arr),
            )
            .indices([left + i, mid + 1 + j])
            .var("i", i)
            .var("j", j)
            .var("k", k),
        );

        let before = array_state(arr);
        // `<=` keeps equal elements in their original order.
        if left_run[i] <= right_run[j] {
            arr[k] = left_run[i];
            i += 1;
        } else {
            arr[k] = right_run[j];
            j += 1;
        }
        recorder.record_write(
            StepDraft::mutate(
                StepType::Update,
                format!("Placing {} at index {}", arr[k], k),
                7,
                before,
                array_state(arr),
            )
            .indices([k])
            .var("k", k),
        );
        k += 1;
    }

    for (line, run, mut cursor) in [(8, &left_run, i), (9, &right_run, j)] {
        while cursor < run.len() {
            let before = array_state(arr);
            arr[k] = run[cursor];
            recorder.record_write(
                StepDraft::mutate(
                    StepType::Update,
                    format!("Copying remaining element {} to index {}", arr[k], k),
                    line,
                    before,
                    array_state(arr),
                )
                .indices([k])
                .var("k", k),
            );
            cursor += 1;
            k += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use stepwise_trace::StepType;

    use crate::catalog::AlgorithmId;
    use crate::sorting::testing::{assert_replayable, count, final_values, run};

    #[test]
    fn test_sorts_and_replays() {
        let steps = run(AlgorithmId::MergeSort, &[38, 27, 43, 3, 9, 82, 10]);
        assert_eq!(final_values(&steps), vec![3, 9, 10, 27, 38, 43, 82]);
        assert_replayable(&steps);
    }

    #[test]
    fn test_phase_and_depth_metadata() {
        let steps = run(AlgorithmId::MergeSort, &[4, 3, 2, 1]);
        let phases: Vec<(String, u64)> = steps
            .iter()
            .filter_map(|s| {
                let phase = s.after_state.meta("phase")?.as_str()?.to_string();
                let depth = s.after_state.meta("depth")?.as_u64()?;
                Some((phase, depth))
            })
            .collect();

        assert_eq!(
            phases,
            vec![
                ("divide".to_string(), 0),
                ("divide".to_string(), 1),
                ("merge".to_string(), 1),
                ("divide".to_string(), 1),
                ("merge".to_string(), 1),
                ("merge".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_placements_that_move_a_value_are_updates() {
        let steps = run(AlgorithmId::MergeSort, &[2, 1, 3]);
        // [2, 1] merges into [1, 2]; merging with [3] rewrites every slot
        // with the value it already holds
        assert_eq!(count(&steps, StepType::Update), 2);
        assert_eq!(steps.last().unwrap().metrics.operation_count, 2);
        let unchanged = steps
            .iter()
            .filter(|s| s.kind == StepType::Highlight && s.pseudocode_line >= 7 && s.pseudocode_line <= 9)
            .count();
        assert_eq!(unchanged, 3);
        assert_replayable(&steps);
    }

    #[test]
    fn test_sorted_pair_has_no_updates() {
        let steps = run(AlgorithmId::MergeSort, &[1, 2]);
        assert_eq!(count(&steps, StepType::Update), 0);
        assert_eq!(final_values(&steps), vec![1, 2]);
        assert_replayable(&steps);
    }

    #[test]
    fn test_single_element_has_no_divide() {
        let steps = run(AlgorithmId::MergeSort, &[42]);
        assert_eq!(steps.len(), 2);
    }
}
