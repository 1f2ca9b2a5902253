//! Linear search.

use stepwise_trace::{StepDraft, StepRecorder, StepType};

use super::{SearchInput, accept_search};
use crate::engine::{Engine, StepGenerator};
use crate::error::Result;
use crate::input::EngineInput;

pub struct LinearSearch;

pub type LinearSearchEngine = Engine<LinearSearch>;

impl StepGenerator for LinearSearch {
    const NAME: &'static str = "linear-search";
    type Input = SearchInput;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        accept_search(Self::NAME, input)
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let target = input.target;

        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                format!("Starting Linear Search for target: {}", target),
                0,
                input.state(),
            )
            .explain(format!(
                "Each element is checked from left to right until {} turns up or the array runs out.",
                target
            ))
            .var("target", target)
            .var("n", input.array.len()),
        );

        for (i, &value) in input.array.iter().enumerate() {
            recorder.increment_comparisons();
            recorder.record(
                StepDraft::observe(
                    StepType::Compare,
                    format!("Comparing {} with target {}", value, target),
                    2,
                    input.state().with("searching", i),
                )
                .indices([i])
                .var("i", i)
                .var("arr[i]", value),
            );

            if value == target {
                let comparisons = recorder.comparison_count();
                recorder.record(
                    StepDraft::observe(
                        StepType::Highlight,
                        format!("Target {} found at index {}!", target, i),
                        3,
                        input.state().with("found", i),
                    )
                    .indices([i])
                    .var("found at", i)
                    .var("total comparisons", comparisons),
                );
                return;
            }
        }

        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                format!("Target {} not found in array", target),
                5,
                input.state().with("notFound", true),
            )
            .explain(format!(
                "All {} elements were checked and none equals {}.",
                input.array.len(),
                target
            )),
        );
    }
}
