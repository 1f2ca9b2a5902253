//! Data-structure simulators.
//!
//! Each engine replays a list of operations against an initially empty
//! container, opening with an "initialized" `highlight` and closing with a
//! `highlight` over every position carrying `metadata.complete = true`.
//! Operations on an empty container are reported, never rejected.

mod binary_tree;
mod hash_table;
mod linked_list;
mod queue;
mod stack;

pub use binary_tree::{BinaryTree, BinaryTreeEngine};
pub use hash_table::{HashTable, HashTableEngine, HashTableInput, MIN_BUCKETS};
pub use linked_list::{LinkedList, LinkedListEngine};
pub use queue::{Queue, QueueEngine};
pub use stack::{Stack, StackEngine};

use stepwise_trace::{DataStructureState, StepDraft, StepRecorder, StepType};

/// Closing `highlight` shared by the sequence-backed simulators.
pub(crate) fn record_complete(
    recorder: &mut StepRecorder,
    description: String,
    line: u32,
    state: DataStructureState,
) {
    let len = state.data.memory_usage();
    recorder.record(
        StepDraft::observe(StepType::Highlight, description, line, state.with("complete", true))
            .indices(0..len),
    );
}

#[cfg(test)]
pub(crate) mod testing {
    use stepwise_trace::AlgorithmStep;

    use crate::catalog::AlgorithmId;
    use crate::engine::AlgorithmEngine;
    use crate::input::EngineInput;

    pub fn replay(id: AlgorithmId, input: EngineInput) -> Vec<AlgorithmStep> {
        let mut engine = id.create_engine();
        engine.initialize(id.descriptor(), input).unwrap();
        engine.generate_steps().unwrap().to_vec()
    }

    pub fn final_data(steps: &[AlgorithmStep]) -> Vec<i64> {
        steps
            .last()
            .and_then(|s| s.after_state.data.as_values())
            .unwrap()
            .to_vec()
    }
}
