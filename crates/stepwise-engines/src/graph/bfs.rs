//! Breadth-first traversal.

use std::collections::{BTreeSet, VecDeque};

use stepwise_trace::{StepDraft, StepRecorder, StepType};

use super::{GraphInput, order_state};
use crate::engine::{Engine, StepGenerator, mismatch};
use crate::error::Result;
use crate::input::EngineInput;

pub struct Bfs;

pub type BfsEngine = Engine<Bfs>;

impl StepGenerator for Bfs {
    const NAME: &'static str = "bfs";
    type Input = GraphInput<i64>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        match input {
            EngineInput::Graph { adjacency, start } => GraphInput::new(Self::NAME, adjacency, start),
            other => mismatch(Self::NAME, "graph", &other),
        }
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let start = input.start;
        let mut queue = VecDeque::from([start]);
        // Marked on enqueue so a node is never queued twice.
        let mut discovered = BTreeSet::from([start]);
        let mut order: Vec<i64> = Vec::new();

        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                format!("Start BFS from node {}", start),
                0,
                order_state(&order).with("start", start),
            )
            .explain("Nodes are visited level by level using a FIFO queue.")
            .var("queue", &queue)
            .var("visited", Vec::<i64>::new()),
        );

        while let Some(node) = queue.pop_front() {
            let before = order_state(&order);
            order.push(node);
            recorder.increment_operations();
            recorder.record(
                StepDraft::mutate(
                    StepType::Traverse,
                    format!("Visit node {}", node),
                    1,
                    before,
                    order_state(&order).with("node", node),
                )
                .indices([order.len() - 1])
                .var("node", node)
                .var("queue", &queue)
                .var("visited", &discovered),
            );

            for &neighbor in input.edges(node) {
                recorder.increment_comparisons();
                if discovered.insert(neighbor) {
                    queue.push_back(neighbor);
                    recorder.record(
                        StepDraft::observe(
                            StepType::Highlight,
                            format!("Enqueue neighbor {}", neighbor),
                            2,
                            order_state(&order)
                                .with("from", node)
                                .with("enqueued", neighbor),
                        )
                        .indices([order.len() - 1])
                        .var("from", node)
                        .var("enqueued", neighbor)
                        .var("queue", &queue),
                    );
                }
            }
        }

        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                "BFS traversal complete",
                3,
                order_state(&order).with("complete", true),
            )
            .indices(0..order.len())
            .var("order", &order),
        );
    }
}
