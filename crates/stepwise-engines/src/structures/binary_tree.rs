//! Binary search tree insertion with an in-order walkthrough.
//!
//! Snapshots show the tree as its in-order sequence. Values smaller than a
//! node go left, everything else (duplicates included) goes right.

use stepwise_trace::{DataStructureState, StepDraft, StepRecorder, StepType, StructureKind};

use crate::engine::{Engine, StepGenerator, mismatch};
use crate::error::Result;
use crate::input::EngineInput;
use crate::sorting::join;

pub struct BinaryTree;

pub type BinaryTreeEngine = Engine<BinaryTree>;

#[derive(Debug, Clone, Copy)]
struct Node {
    value: i64,
    left: Option<usize>,
    right: Option<usize>,
}

/// Arena-backed BST; node 0 is the root once anything is inserted.
#[derive(Debug, Default)]
struct Bst {
    nodes: Vec<Node>,
}

impl Bst {
    /// Insert `value`, counting one comparison per node on the descent.
    /// Returns the new node's position in the in-order sequence.
    fn insert(&mut self, value: i64, recorder: &mut StepRecorder) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            value,
            left: None,
            right: None,
        });
        if id == 0 {
            return 0;
        }

        let mut current = 0;
        loop {
            recorder.increment_comparisons();
            let node = self.nodes[current];
            let slot = if value < node.value {
                &mut self.nodes[current].left
            } else {
                &mut self.nodes[current].right
            };
            match *slot {
                Some(next) => current = next,
                None => {
                    *slot = Some(id);
                    break;
                }
            }
        }

        // Every earlier value <= `value` precedes it in order.
        self.nodes[..id].iter().filter(|n| n.value <= value).count()
    }

    fn in_order(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut cursor = if self.nodes.is_empty() { None } else { Some(0) };

        while cursor.is_some() || !stack.is_empty() {
            while let Some(id) = cursor {
                stack.push(id);
                cursor = self.nodes[id].left;
            }
            if let Some(id) = stack.pop() {
                out.push(self.nodes[id].value);
                cursor = self.nodes[id].right;
            }
        }
        out
    }
}

fn state(order: &[i64]) -> DataStructureState {
    DataStructureState::values(StructureKind::Tree, order)
}

impl StepGenerator for BinaryTree {
    const NAME: &'static str = "binary-tree";
    type Input = Vec<i64>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        match input {
            EngineInput::Tree { values } => Ok(values),
            other => mismatch(Self::NAME, "tree", &other),
        }
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let mut tree = Bst::default();

        recorder.record(
            StepDraft::observe(StepType::Highlight, "Binary tree initialized (empty)", 0, state(&[]))
                .explain("Values are inserted as a Binary Search Tree for deterministic visualization."),
        );

        for &value in input {
            let before = state(&tree.in_order());
            let position = tree.insert(value, recorder);
            recorder.increment_operations();
            let order = tree.in_order();

            recorder.record(
                StepDraft::mutate(
                    StepType::Insert,
                    format!("Insert {} into binary tree", value),
                    1,
                    before,
                    state(&order),
                )
                .indices([position])
                .var("inserted", value)
                .var("inorder", format!("[{}]", join(&order))),
            );
        }

        let order = tree.in_order();
        for (i, &value) in order.iter().enumerate() {
            recorder.record(
                StepDraft::observe(
                    StepType::Traverse,
                    format!("Visit {}", value),
                    2,
                    state(&order).with("traversal", "inorder").with("visiting", i),
                )
                .indices([i])
                .var("visited", i + 1),
            );
        }

        recorder.record(
            StepDraft::observe(
                StepType::Traverse,
                "In-order traversal complete",
                2,
                state(&order)
                    .with("traversal", "inorder")
                    .with("complete", true),
            )
            .indices(0..order.len())
            .var("inorder", format!("[{}]", join(&order))),
        );
    }
}
