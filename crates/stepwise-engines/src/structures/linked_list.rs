//! Singly linked list, visualized as its values from head to tail.
//!
//! Deletion scans for the first matching node; those comparisons are counted
//! but only the removal itself is shown.

use stepwise_trace::{DataStructureState, StepDraft, StepRecorder, StepType, StructureKind};

use super::record_complete;
use crate::engine::{Engine, StepGenerator, mismatch};
use crate::error::Result;
use crate::input::{EngineInput, ListOp};

pub struct LinkedList;

pub type LinkedListEngine = Engine<LinkedList>;

fn state(list: &[i64]) -> DataStructureState {
    DataStructureState::values(StructureKind::LinkedList, list)
}

impl StepGenerator for LinkedList {
    const NAME: &'static str = "linked-list";
    type Input = Vec<ListOp>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        match input {
            EngineInput::LinkedList { operations } => Ok(operations),
            other => mismatch(Self::NAME, "linked_list", &other),
        }
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let mut list: Vec<i64> = Vec::new();

        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                "Linked list initialized (empty)",
                0,
                state(&list),
            )
            .explain("Node values are shown in order from head to tail."),
        );

        for op in input {
            match *op {
                ListOp::Insert { value } => {
                    let before = state(&list);
                    list.push(value);
                    recorder.increment_operations();
                    recorder.record(
                        StepDraft::mutate(
                            StepType::Insert,
                            format!("Insert node {} at tail", value),
                            1,
                            before,
                            state(&list),
                        )
                        .indices([list.len() - 1])
                        .var("value", value)
                        .var("size", list.len()),
                    );
                }
                ListOp::Delete { value } => {
                    let mut position = None;
                    for (i, &node) in list.iter().enumerate() {
                        recorder.increment_comparisons();
                        if node == value {
                            position = Some(i);
                            break;
                        }
                    }

                    match position {
                        None => {
                            recorder.record(
                                StepDraft::observe(
                                    StepType::Highlight,
                                    format!("Value {} not found for deletion", value),
                                    2,
                                    state(&list),
                                )
                                .var("value", value),
                            );
                        }
                        Some(index) => {
                            let before = state(&list);
                            list.remove(index);
                            recorder.increment_operations();
                            recorder.record(
                                StepDraft::mutate(
                                    StepType::Delete,
                                    format!("Delete node {}", value),
                                    3,
                                    before,
                                    state(&list),
                                )
                                .indices([index])
                                .var("value", value)
                                .var("deletedIndex", index),
                            );
                        }
                    }
                }
                ListOp::Search { value } => {
                    let mut found_at = None;
                    for (i, &node) in list.iter().enumerate() {
                        recorder.increment_comparisons();
                        recorder.record(
                            StepDraft::observe(
                                StepType::Compare,
                                format!("Compare node {} with target {}", node, value),
                                4,
                                state(&list),
                            )
                            .indices([i])
                            .var("index", i)
                            .var("current", node)
                            .var("target", value),
                        );
                        if node == value {
                            found_at = Some(i);
                            break;
                        }
                    }

                    let description = match found_at {
                        Some(i) => format!("Found {} at node {}", value, i),
                        None => format!("{} not found in list", value),
                    };
                    recorder.record(
                        StepDraft::observe(
                            StepType::Highlight,
                            description,
                            5,
                            state(&list).with("target", value).with("foundAt", found_at),
                        )
                        .indices(found_at)
                        .var("target", value)
                        .var("foundAt", found_at),
                    );
                }
            }
        }

        record_complete(
            recorder,
            "Linked list operations complete".to_string(),
            6,
            state(&list),
        );
    }
}
