//! Array-backed LIFO stack.

use stepwise_trace::{DataStructureState, StepDraft, StepRecorder, StepType, StructureKind};

use super::record_complete;
use crate::engine::{Engine, StepGenerator, mismatch};
use crate::error::Result;
use crate::input::{EngineInput, StackOp};
use crate::sorting::join;

pub struct Stack;

pub type StackEngine = Engine<Stack>;

fn state(stack: &[i64]) -> DataStructureState {
    DataStructureState::values(StructureKind::Stack, stack)
}

impl StepGenerator for Stack {
    const NAME: &'static str = "stack";
    type Input = Vec<StackOp>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        match input {
            EngineInput::Stack { operations } => Ok(operations),
            other => mismatch(Self::NAME, "stack", &other),
        }
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let mut stack: Vec<i64> = Vec::new();

        recorder.record(
            StepDraft::observe(StepType::Highlight, "Stack initialized (empty)", 0, state(&stack))
                .explain(
                    "A stack is a LIFO (Last-In-First-Out) structure: elements are added to and \
                     removed from the top, like a stack of plates.",
                )
                .var("size", 0)
                .var("top", serde_json::Value::Null)
                .var("isEmpty", true),
        );

        for op in input {
            match *op {
                StackOp::Push { value } => {
                    let before = state(&stack);
                    stack.push(value);
                    recorder.increment_operations();
                    let top = stack.len() - 1;

                    recorder.record(
                        StepDraft::mutate(
                            StepType::Insert,
                            format!("Push {} onto stack", value),
                            2,
                            before,
                            state(&stack),
                        )
                        .indices([top])
                        .explain(format!(
                            "push({}) appends to the end of the array; the new top index is {}.",
                            value, top
                        ))
                        .var("operation", "push")
                        .var("value", value)
                        .var("top index", top)
                        .var("size", stack.len()),
                    );
                    recorder.record(
                        StepDraft::observe(
                            StepType::Highlight,
                            format!("Top of stack is now {}", value),
                            3,
                            state(&stack).with("top", top),
                        )
                        .indices([top])
                        .var("top", value)
                        .var("stack", format!("[{}]", join(&stack))),
                    );
                }
                StackOp::Pop => {
                    let before = state(&stack);
                    let Some(popped) = stack.pop() else {
                        recorder.record(
                            StepDraft::observe(
                                StepType::Highlight,
                                "Stack underflow! Cannot pop from empty stack",
                                5,
                                state(&stack).with("underflow", true),
                            )
                            .explain(
                                "Popping an empty stack is an underflow. Check isEmpty() before popping.",
                            )
                            .var("error", "Stack Underflow")
                            .var("size", 0),
                        );
                        continue;
                    };
                    recorder.increment_operations();

                    recorder.record(
                        StepDraft::mutate(
                            StepType::Delete,
                            format!("Pop {} from stack", popped),
                            6,
                            before,
                            state(&stack),
                        )
                        .indices([stack.len()])
                        .var("operation", "pop")
                        .var("popped value", popped)
                        .var("new size", stack.len()),
                    );

                    if let Some(&top) = stack.last() {
                        let top_index = stack.len() - 1;
                        recorder.record(
                            StepDraft::observe(
                                StepType::Highlight,
                                format!("Top of stack is now {}", top),
                                7,
                                state(&stack).with("top", top_index),
                            )
                            .indices([top_index])
                            .var("new top", top)
                            .var("stack", format!("[{}]", join(&stack))),
                        );
                    }
                }
                StackOp::Peek => match stack.last() {
                    None => {
                        recorder.record(
                            StepDraft::observe(
                                StepType::Highlight,
                                "Stack is empty, nothing to peek",
                                9,
                                state(&stack).with("empty", true),
                            )
                            .var("operation", "peek")
                            .var("result", serde_json::Value::Null),
                        );
                    }
                    Some(&top) => {
                        let top_index = stack.len() - 1;
                        recorder.record(
                            StepDraft::observe(
                                StepType::Highlight,
                                format!("Peek: Top element is {}", top),
                                10,
                                state(&stack).with("peeking", true),
                            )
                            .indices([top_index])
                            .var("operation", "peek")
                            .var("top value", top)
                            .var("size", stack.len()),
                        );
                    }
                },
            }
        }

        record_complete(
            recorder,
            format!("Operations complete. Stack size: {}", stack.len()),
            12,
            state(&stack),
        );
    }
}
