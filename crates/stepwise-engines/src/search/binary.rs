//! Binary search over a pre-sorted array.
//!
//! The engine refuses unsorted input rather than sorting it; the window is
//! `[left, right]` inclusive with `mid = floor((left + right) / 2)`.

use stepwise_trace::{StepDraft, StepRecorder, StepType};

use super::{SearchInput, accept_search};
use crate::engine::{Engine, StepGenerator};
use crate::error::{EngineError, Result};
use crate::input::EngineInput;

pub struct BinarySearch;

pub type BinarySearchEngine = Engine<BinarySearch>;

impl StepGenerator for BinarySearch {
    const NAME: &'static str = "binary-search";
    type Input = SearchInput;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        let input = accept_search(Self::NAME, input)?;
        if let Some(i) = input.array.windows(2).position(|w| w[0] > w[1]) {
            return Err(EngineError::invalid(
                Self::NAME,
                format!(
                    "array must be sorted in non-decreasing order (index {} holds {}, index {} holds {})",
                    i,
                    input.array[i],
                    i + 1,
                    input.array[i + 1]
                ),
            ));
        }
        Ok(input)
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let arr = &input.array;
        let target = input.target;

        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                format!("Starting Binary Search for target: {}", target),
                0,
                input.state(),
            )
            .explain(format!(
                "Binary search works on sorted arrays by repeatedly dividing the search space in half. \
                 Each comparison of {} with the middle element eliminates half of what remains.",
                target
            ))
            .var("target", target)
            .var("array size", arr.len())
            .var("left", 0)
            .var("right", arr.len() as i64 - 1),
        );

        // Half-open [lo, hi); reported as the inclusive window [lo, hi - 1].
        let (mut lo, mut hi) = (0usize, arr.len());
        while lo < hi {
            let (left, right) = (lo, hi - 1);
            let mid = (left + right) / 2;

            recorder.record(
                StepDraft::observe(
                    StepType::Highlight,
                    format!(
                        "Search space: [{}..{}], checking middle index {}",
                        left, right, mid
                    ),
                    2,
                    input
                        .state()
                        .with("left", left)
                        .with("right", right)
                        .with("mid", mid),
                )
                .indices(left..=right)
                .explain(format!(
                    "left = {}, right = {}, mid = floor(({} + {}) / 2) = {}. arr[{}] = {}.",
                    left, right, left, right, mid, mid, arr[mid]
                ))
                .var("left", left)
                .var("right", right)
                .var("mid", mid)
                .var("arr[mid]", arr[mid])
                .var("search space size", right - left + 1),
            );

            recorder.increment_comparisons();
            recorder.record(
                StepDraft::observe(
                    StepType::Compare,
                    format!("Comparing {} with target {}", arr[mid], target),
                    3,
                    input
                        .state()
                        .with("left", left)
                        .with("right", right)
                        .with("mid", mid)
                        .with("comparing", true),
                )
                .indices([mid])
                .var("arr[mid]", arr[mid])
                .var("target", target)
                .var("comparison", format!("{} vs {}", arr[mid], target)),
            );

            if arr[mid] == target {
                let comparisons = recorder.comparison_count();
                recorder.record(
                    StepDraft::observe(
                        StepType::Highlight,
                        format!("Target {} found at index {}!", target, mid),
                        4,
                        input.state().with("found", mid),
                    )
                    .indices([mid])
                    .explain(format!(
                        "arr[{}] = {} equals the target after {} comparisons.",
                        mid, arr[mid], comparisons
                    ))
                    .var("found at", mid)
                    .var("value", arr[mid])
                    .var("total comparisons", comparisons),
                );
                return;
            }

            if arr[mid] < target {
                recorder.record(
                    StepDraft::observe(
                        StepType::Highlight,
                        format!("{} < {}, searching right half", arr[mid], target),
                        6,
                        input
                            .state()
                            .with("left", mid + 1)
                            .with("right", right),
                    )
                    .indices(mid + 1..=right)
                    .var("decision", "search right")
                    .var("new left", mid + 1)
                    .var("right", right),
                );
                lo = mid + 1;
            } else {
                recorder.record(
                    StepDraft::observe(
                        StepType::Highlight,
                        format!("{} > {}, searching left half", arr[mid], target),
                        8,
                        input
                            .state()
                            .with("left", left)
                            .with("right", mid as i64 - 1),
                    )
                    .indices(left..mid)
                    .var("decision", "search left")
                    .var("left", left)
                    .var("new right", mid as i64 - 1),
                );
                hi = mid;
            }
        }

        let comparisons = recorder.comparison_count();
        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                format!("Target {} not found in array", target),
                10,
                input.state().with("notFound", true),
            )
            .explain(format!(
                "Search space exhausted after {} comparisons; {} is not in the array.",
                comparisons, target
            ))
            .var("result", "not found")
            .var("total comparisons", comparisons),
        );
    }
}

#[cfg(test)]
mod tests {
    use stepwise_trace::StepType;

    use super::*;
    use crate::catalog::AlgorithmId;
    use crate::search::testing::search;

    fn windows(steps: &[stepwise_trace::AlgorithmStep]) -> Vec<(i64, i64)> {
        steps
            .iter()
            .filter(|s| s.kind == StepType::Highlight && s.pseudocode_line == 2)
            .map(|s| {
                let left = s.after_state.meta("left").and_then(|v| v.as_i64()).unwrap();
                let right = s.after_state.meta("right").and_then(|v| v.as_i64()).unwrap();
                (left, right)
            })
            .collect()
    }

    #[test]
    fn test_found_scenario() {
        let steps = search(AlgorithmId::BinarySearch, &[1, 2, 3, 5, 8, 9], 8);
        let last = steps.last().unwrap();
        assert_eq!(last.description, "Target 8 found at index 4!");
        assert_eq!(last.after_state.meta("found"), Some(&serde_json::json!(4)));
        assert_eq!(last.affected_indices, vec![4]);
    }

    #[test]
    fn test_windows_shrink_and_contain_target() {
        let array: Vec<i64> = (0..32).map(|v| v * 3).collect();
        let k = 19;
        let steps = search(AlgorithmId::BinarySearch, &array, array[k]);
        let windows = windows(&steps);

        assert!(!windows.is_empty());
        for (left, right) in &windows {
            assert!(*left <= k as i64 && k as i64 <= *right);
        }
        for pair in windows.windows(2) {
            assert!(pair[1].1 - pair[1].0 < pair[0].1 - pair[0].0);
        }
    }

    #[test]
    fn test_not_found_below_first_element() {
        let steps = search(AlgorithmId::BinarySearch, &[2, 4, 6], 1);
        let last = steps.last().unwrap();
        assert_eq!(last.after_state.meta("notFound"), Some(&serde_json::json!(true)));
        // mid 1 -> left half, mid 0 -> left half with right = -1
        assert_eq!(last.metrics.comparison_count, 2);
        let narrowed = &steps[steps.len() - 2];
        assert_eq!(narrowed.after_state.meta("right"), Some(&serde_json::json!(-1)));
        assert!(narrowed.affected_indices.is_empty());
    }

    #[test]
    fn test_rejects_unsorted_array() {
        let err = BinarySearch::accept(EngineInput::Search {
            array: vec![1, 5, 3],
            target: 3,
        })
        .unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("non-decreasing"));
    }
}
