//! Recursive, pre-order depth-first traversal.

use std::collections::BTreeSet;

use stepwise_trace::{StepDraft, StepRecorder, StepType};

use super::{GraphInput, order_state};
use crate::engine::{Engine, StepGenerator, mismatch};
use crate::error::Result;
use crate::input::EngineInput;

pub struct Dfs;

pub type DfsEngine = Engine<Dfs>;

impl StepGenerator for Dfs {
    const NAME: &'static str = "dfs";
    type Input = GraphInput<i64>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        match input {
            EngineInput::Graph { adjacency, start } => GraphInput::new(Self::NAME, adjacency, start),
            other => mismatch(Self::NAME, "graph", &other),
        }
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let mut walk = Walk {
            graph: input,
            visited: BTreeSet::new(),
            order: Vec::new(),
            recorder,
        };

        walk.recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                format!("Start DFS from node {}", input.start),
                0,
                order_state(&walk.order).with("start", input.start),
            )
            .explain("Each branch is followed as deep as it goes before backtracking."),
        );

        walk.visit(input.start, 0);

        let order = walk.order;
        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                "DFS traversal complete",
                3,
                order_state(&order).with("complete", true),
            )
            .indices(0..order.len())
            .var("order", &order),
        );
    }
}

struct Walk<'a> {
    graph: &'a GraphInput<i64>,
    visited: BTreeSet<i64>,
    order: Vec<i64>,
    recorder: &'a mut StepRecorder,
}

impl Walk<'_> {
    fn visit(&mut self, node: i64, depth: usize) {
        let before = order_state(&self.order);
        self.visited.insert(node);
        self.order.push(node);
        self.recorder.increment_operations();
        self.recorder.record(
            StepDraft::mutate(
                StepType::Traverse,
                format!("Visit node {}", node),
                1,
                before,
                order_state(&self.order)
                    .with("node", node)
                    .with("depth", depth),
            )
            .indices([self.order.len() - 1])
            .var("node", node)
            .var("visited", &self.visited),
        );

        for &neighbor in self.graph.edges(node) {
            self.recorder.increment_comparisons();
            if self.visited.contains(&neighbor) {
                continue;
            }
            self.recorder.record(
                StepDraft::observe(
                    StepType::Highlight,
                    format!("Traverse edge {} -> {}", node, neighbor),
                    2,
                    order_state(&self.order)
                        .with("from", node)
                        .with("to", neighbor)
                        .with("depth", depth),
                )
                .indices([self.order.len() - 1])
                .var("from", node)
                .var("to", neighbor),
            );
            self.visit(neighbor, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use stepwise_trace::StepType;

    use crate::catalog::AlgorithmId;
    use crate::graph::testing::{assert_chained, traverse, undirected, visit_order};

    #[test]
    fn test_pre_order() {
        let adjacency = undirected(&[(0, 1), (0, 2), (1, 3), (2, 4)]);
        let steps = traverse(AlgorithmId::Dfs, adjacency, 0);
        assert_eq!(visit_order(&steps), vec![0, 1, 3, 2, 4]);
        assert_chained(&steps);
    }

    #[test]
    fn test_edge_highlight_precedes_visit() {
        let adjacency = undirected(&[(0, 1)]);
        let steps = traverse(AlgorithmId::Dfs, adjacency, 0);
        let kinds: Vec<_> = steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StepType::Highlight,
                StepType::Traverse,
                StepType::Highlight,
                StepType::Traverse,
                StepType::Highlight,
            ]
        );
        assert_eq!(steps[2].description, "Traverse edge 0 -> 1");
    }

    #[test]
    fn test_cycle_terminates() {
        let adjacency = undirected(&[(0, 1), (1, 2), (2, 0)]);
        let steps = traverse(AlgorithmId::Dfs, adjacency, 2);
        assert_eq!(visit_order(&steps), vec![2, 1, 0]);
        assert_eq!(steps.last().unwrap().metrics.operation_count, 3);
    }
}
