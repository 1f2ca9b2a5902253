//! Array-backed FIFO queue.

use std::collections::VecDeque;

use stepwise_trace::{DataStructureState, StepDraft, StepRecorder, StepType, StructureKind};

use super::record_complete;
use crate::engine::{Engine, StepGenerator, mismatch};
use crate::error::Result;
use crate::input::{EngineInput, QueueOp};

pub struct Queue;

pub type QueueEngine = Engine<Queue>;

fn state(queue: &VecDeque<i64>) -> DataStructureState {
    let values: Vec<i64> = queue.iter().copied().collect();
    DataStructureState::values(StructureKind::Queue, &values)
}

impl StepGenerator for Queue {
    const NAME: &'static str = "queue";
    type Input = Vec<QueueOp>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        match input {
            EngineInput::Queue { operations } => Ok(operations),
            other => mismatch(Self::NAME, "queue", &other),
        }
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let mut queue: VecDeque<i64> = VecDeque::new();

        recorder.record(
            StepDraft::observe(StepType::Highlight, "Queue initialized (empty)", 0, state(&queue))
                .explain(
                    "A queue is FIFO (First-In-First-Out): elements join at the rear and leave \
                     from the front.",
                )
                .var("size", 0),
        );

        for op in input {
            match *op {
                QueueOp::Enqueue { value } => {
                    let before = state(&queue);
                    queue.push_back(value);
                    recorder.increment_operations();
                    let rear = queue.len() - 1;

                    recorder.record(
                        StepDraft::mutate(
                            StepType::Insert,
                            format!("Enqueue {} to rear of queue", value),
                            2,
                            before,
                            state(&queue).with("rear", rear),
                        )
                        .indices([rear])
                        .var("operation", "enqueue")
                        .var("value", value)
                        .var("size", queue.len()),
                    );

                    let front = queue.front().copied().unwrap_or(value);
                    let ends = if rear == 0 { vec![0] } else { vec![0, rear] };
                    recorder.record(
                        StepDraft::observe(
                            StepType::Highlight,
                            format!("Front: {}, Rear: {}", front, value),
                            3,
                            state(&queue).with("front", 0).with("rear", rear),
                        )
                        .indices(ends)
                        .var("front", front)
                        .var("rear", value),
                    );
                }
                QueueOp::Dequeue => {
                    let before = state(&queue);
                    let Some(removed) = queue.pop_front() else {
                        recorder.record(
                            StepDraft::observe(
                                StepType::Highlight,
                                "Queue underflow! Cannot dequeue from empty queue",
                                5,
                                state(&queue).with("underflow", true),
                            )
                            .var("error", "Queue Underflow")
                            .var("size", 0),
                        );
                        continue;
                    };
                    recorder.increment_operations();

                    recorder.record(
                        StepDraft::mutate(
                            StepType::Delete,
                            format!("Dequeue {} from front of queue", removed),
                            6,
                            before,
                            state(&queue),
                        )
                        .indices([0])
                        .var("operation", "dequeue")
                        .var("dequeued value", removed)
                        .var("new size", queue.len()),
                    );

                    if let Some(&front) = queue.front() {
                        recorder.record(
                            StepDraft::observe(
                                StepType::Highlight,
                                format!("New front element is {}", front),
                                7,
                                state(&queue).with("front", 0),
                            )
                            .indices([0])
                            .var("front", front),
                        );
                    }
                }
                QueueOp::Peek => match queue.front() {
                    None => {
                        recorder.record(
                            StepDraft::observe(
                                StepType::Highlight,
                                "Queue is empty, nothing to peek",
                                9,
                                state(&queue).with("empty", true),
                            )
                            .var("operation", "peek"),
                        );
                    }
                    Some(&front) => {
                        recorder.record(
                            StepDraft::observe(
                                StepType::Highlight,
                                format!("Peek: Front element is {}", front),
                                10,
                                state(&queue).with("peeking", true),
                            )
                            .indices([0])
                            .var("operation", "peek")
                            .var("front value", front),
                        );
                    }
                },
            }
        }

        record_complete(
            recorder,
            format!("Operations complete. Queue size: {}", queue.len()),
            12,
            state(&queue),
        );
    }
}
