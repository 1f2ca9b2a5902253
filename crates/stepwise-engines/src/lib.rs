//! stepwise-engines: step-generation engines for teaching algorithms
//!
//! Every engine runs an algorithm to completion over caller-supplied input
//! and returns the full, ordered list of `AlgorithmStep`s describing it:
//! - Sorting: bubble, selection, insertion, merge, quick and heap sort
//! - Searching: linear and binary search
//! - Data structures: stack, queue, linked list, binary search tree, hash table
//! - Graphs: BFS, DFS and Dijkstra over adjacency lists
//! - Grid pathfinding: BFS, Dijkstra and A* sharing one search
//!
//! Engines are pure and synchronous. Replaying the steps is the job of the
//! `PlaybackStore`; `compare_pathfinding` runs the grid variants side by side.
//!
//! ```rust
//! use stepwise_engines::{AlgorithmId, EngineInput};
//!
//! let id = AlgorithmId::BubbleSort;
//! let mut engine = id.create_engine();
//! engine
//!     .initialize(id.descriptor(), EngineInput::Array { values: vec![3, 1, 2] })
//!     .unwrap();
//! let steps = engine.generate_steps().unwrap();
//! assert_eq!(steps.last().unwrap().after_state.data.as_values(), Some(&[1, 2, 3][..]));
//! ```

pub mod catalog;
pub mod compare;
pub mod engine;
pub mod error;
pub mod graph;
pub mod grid;
pub mod input;
pub mod playback;
pub mod search;
pub mod sorting;
pub mod structures;

pub use catalog::{AlgorithmId, EngineRegistry};
pub use compare::{PathfindingComparison, compare_pathfinding};
pub use engine::{AlgorithmEngine, Engine, StepGenerator};
pub use error::{EngineError, Result};
pub use graph::{Bfs, BfsEngine, Dfs, DfsEngine, Dijkstra, DijkstraEngine, GraphInput};
pub use grid::{GridPathfinding, GridPathfindingEngine, manhattan};
pub use input::{
    EngineInput, GridSpec, HashOp, ListOp, PathfindingVariant, QueueOp, StackOp, WeightedEdge,
};
pub use playback::{PlaybackState, PlaybackStatus, PlaybackStore};
pub use search::{BinarySearch, BinarySearchEngine, LinearSearch, LinearSearchEngine, SearchInput};
pub use sorting::{
    BubbleSort, BubbleSortEngine, HeapSort, HeapSortEngine, InsertionSort, InsertionSortEngine,
    MergeSort, MergeSortEngine, QuickSort, QuickSortEngine, SelectionSort, SelectionSortEngine,
};
pub use structures::{
    BinaryTree, BinaryTreeEngine, HashTable, HashTableEngine, HashTableInput, LinkedList,
    LinkedListEngine, MIN_BUCKETS, Queue, QueueEngine, Stack, StackEngine,
};

// Re-export the step model so callers need only one dependency.
pub use stepwise_trace as trace;
