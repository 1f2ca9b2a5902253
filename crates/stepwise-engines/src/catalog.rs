//! Algorithm catalog.
//!
//! Identifiers, declared complexities and engine construction for every
//! algorithm the crate ships.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use stepwise_trace::{AlgorithmCategory, AlgorithmDescriptor, ComplexityInfo};

use crate::engine::AlgorithmEngine;
use crate::error::{EngineError, Result};
use crate::graph::{BfsEngine, DfsEngine, DijkstraEngine};
use crate::grid::GridPathfindingEngine;
use crate::input::PathfindingVariant;
use crate::search::{BinarySearchEngine, LinearSearchEngine};
use crate::sorting::{
    BubbleSortEngine, HeapSortEngine, InsertionSortEngine, MergeSortEngine, QuickSortEngine,
    SelectionSortEngine,
};
use crate::structures::{
    BinaryTreeEngine, HashTableEngine, LinkedListEngine, QueueEngine, StackEngine,
};

/// Stable identifier of a catalog algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmId {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    HeapSort,
    LinearSearch,
    BinarySearch,
    Stack,
    Queue,
    LinkedList,
    BinaryTree,
    HashTable,
    Bfs,
    Dfs,
    Dijkstra,
    #[serde(rename = "pathfinding-bfs")]
    PathfindingBfs,
    #[serde(rename = "pathfinding-dijkstra")]
    PathfindingDijkstra,
    #[serde(rename = "pathfinding-astar")]
    PathfindingAStar,
}

impl AlgorithmId {
    /// Every algorithm, in catalog order.
    pub const ALL: [AlgorithmId; 19] = [
        AlgorithmId::BubbleSort,
        AlgorithmId::SelectionSort,
        AlgorithmId::InsertionSort,
        AlgorithmId::MergeSort,
        AlgorithmId::QuickSort,
        AlgorithmId::HeapSort,
        AlgorithmId::LinearSearch,
        AlgorithmId::BinarySearch,
        AlgorithmId::Stack,
        AlgorithmId::Queue,
        AlgorithmId::LinkedList,
        AlgorithmId::BinaryTree,
        AlgorithmId::HashTable,
        AlgorithmId::Bfs,
        AlgorithmId::Dfs,
        AlgorithmId::Dijkstra,
        AlgorithmId::PathfindingBfs,
        AlgorithmId::PathfindingDijkstra,
        AlgorithmId::PathfindingAStar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::BubbleSort => "bubble-sort",
            AlgorithmId::SelectionSort => "selection-sort",
            AlgorithmId::InsertionSort => "insertion-sort",
            AlgorithmId::MergeSort => "merge-sort",
            AlgorithmId::QuickSort => "quick-sort",
            AlgorithmId::HeapSort => "heap-sort",
            AlgorithmId::LinearSearch => "linear-search",
            AlgorithmId::BinarySearch => "binary-search",
            AlgorithmId::Stack => "stack",
            AlgorithmId::Queue => "queue",
            AlgorithmId::LinkedList => "linked-list",
            AlgorithmId::BinaryTree => "binary-tree",
            AlgorithmId::HashTable => "hash-table",
            AlgorithmId::Bfs => "bfs",
            AlgorithmId::Dfs => "dfs",
            AlgorithmId::Dijkstra => "dijkstra",
            AlgorithmId::PathfindingBfs => "pathfinding-bfs",
            AlgorithmId::PathfindingDijkstra => "pathfinding-dijkstra",
            AlgorithmId::PathfindingAStar => "pathfinding-astar",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmId::BubbleSort => "Bubble Sort",
            AlgorithmId::SelectionSort => "Selection Sort",
            AlgorithmId::InsertionSort => "Insertion Sort",
            AlgorithmId::MergeSort => "Merge Sort",
            AlgorithmId::QuickSort => "Quick Sort",
            AlgorithmId::HeapSort => "Heap Sort",
            AlgorithmId::LinearSearch => "Linear Search",
            AlgorithmId::BinarySearch => "Binary Search",
            AlgorithmId::Stack => "Stack (LIFO)",
            AlgorithmId::Queue => "Queue (FIFO)",
            AlgorithmId::LinkedList => "Linked List",
            AlgorithmId::BinaryTree => "Binary Tree",
            AlgorithmId::HashTable => "Hash Table",
            AlgorithmId::Bfs => "Breadth-First Search",
            AlgorithmId::Dfs => "Depth-First Search",
            AlgorithmId::Dijkstra => "Dijkstra's Algorithm",
            AlgorithmId::PathfindingBfs => "Grid BFS",
            AlgorithmId::PathfindingDijkstra => "Grid Dijkstra",
            AlgorithmId::PathfindingAStar => "Grid A*",
        }
    }

    pub fn category(&self) -> AlgorithmCategory {
        use AlgorithmId::*;
        match self {
            BubbleSort | SelectionSort | InsertionSort | MergeSort | QuickSort | HeapSort => {
                AlgorithmCategory::Sorting
            }
            LinearSearch | BinarySearch => AlgorithmCategory::Searching,
            Stack | Queue | LinkedList | BinaryTree | HashTable => AlgorithmCategory::DataStructure,
            Bfs | Dfs | Dijkstra | PathfindingBfs | PathfindingDijkstra | PathfindingAStar => {
                AlgorithmCategory::Graph
            }
        }
    }

    /// The grid variant for the pathfinding ids.
    pub fn pathfinding_variant(&self) -> Option<PathfindingVariant> {
        match self {
            AlgorithmId::PathfindingBfs => Some(PathfindingVariant::Bfs),
            AlgorithmId::PathfindingDijkstra => Some(PathfindingVariant::Dijkstra),
            AlgorithmId::PathfindingAStar => Some(PathfindingVariant::AStar),
            _ => None,
        }
    }

    /// Declared time and space complexity.
    pub fn complexity(&self) -> (ComplexityInfo, ComplexityInfo) {
        use AlgorithmId::*;
        let c = ComplexityInfo::new;
        let u = ComplexityInfo::uniform;
        match self {
            BubbleSort => (
                u("O(n²)").with_explanation("Every pass runs in full; there is no early exit."),
                u("O(1)"),
            ),
            SelectionSort => (u("O(n²)"), u("O(1)")),
            InsertionSort => (
                c("O(n)", "O(n²)", "O(n²)")
                    .with_explanation("Nearly sorted input needs few shifts."),
                u("O(1)"),
            ),
            MergeSort => (u("O(n log n)"), u("O(n)")),
            QuickSort => (
                c("O(n log n)", "O(n log n)", "O(n²)")
                    .with_explanation("A last-element pivot degrades on already sorted input."),
                c("O(log n)", "O(log n)", "O(n)"),
            ),
            HeapSort => (u("O(n log n)"), u("O(1)")),
            LinearSearch => (c("O(1)", "O(n)", "O(n)"), u("O(1)")),
            BinarySearch => (c("O(1)", "O(log n)", "O(log n)"), u("O(1)")),
            Stack | Queue => (u("O(1)"), u("O(n)")),
            LinkedList => (c("O(1)", "O(n)", "O(n)"), u("O(n)")),
            BinaryTree => (
                c("O(log n)", "O(log n)", "O(n)")
                    .with_explanation("Skewed insertion order makes the tree a list."),
                u("O(n)"),
            ),
            HashTable => (
                c("O(1)", "O(1)", "O(n)")
                    .with_explanation("Heavy collisions turn probing into a linear scan."),
                u("O(n)"),
            ),
            Bfs | Dfs => (u("O(V + E)"), u("O(V)")),
            Dijkstra => (
                u("O(V² + E)").with_explanation("Selection is a linear scan over unvisited nodes."),
                u("O(V)"),
            ),
            PathfindingBfs => (c("O(V)", "O(V + E)", "O(V + E)"), u("O(V)")),
            PathfindingDijkstra | PathfindingAStar => (
                c("O(V)", "O((V + E) log V)", "O((V + E) log V)"),
                u("O(V)"),
            ),
        }
    }

    pub fn descriptor(&self) -> AlgorithmDescriptor {
        let (time_complexity, space_complexity) = self.complexity();
        AlgorithmDescriptor {
            id: self.as_str().to_string(),
            name: self.name().to_string(),
            category: self.category(),
            time_complexity,
            space_complexity,
        }
    }

    /// A fresh, uninitialized engine for this algorithm.
    pub fn create_engine(&self) -> Box<dyn AlgorithmEngine> {
        factory(*self)()
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        AlgorithmId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| EngineError::UnknownAlgorithm(s.to_string()))
    }
}

impl From<PathfindingVariant> for AlgorithmId {
    fn from(variant: PathfindingVariant) -> Self {
        match variant {
            PathfindingVariant::Bfs => AlgorithmId::PathfindingBfs,
            PathfindingVariant::Dijkstra => AlgorithmId::PathfindingDijkstra,
            PathfindingVariant::AStar => AlgorithmId::PathfindingAStar,
        }
    }
}

type EngineFactory = fn() -> Box<dyn AlgorithmEngine>;

/// Registry of engines keyed by algorithm id string.
///
/// Registration order is kept, so listings come out in catalog order.
pub struct EngineRegistry {
    entries: IndexMap<String, (AlgorithmDescriptor, EngineFactory)>,
}

impl EngineRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// A registry holding every catalog algorithm.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for id in AlgorithmId::ALL {
            registry.register(id.descriptor(), factory(id));
        }
        registry
    }

    /// Register an engine factory under the descriptor's id.
    pub fn register(&mut self, descriptor: AlgorithmDescriptor, factory: EngineFactory) {
        self.entries.insert(descriptor.id.clone(), (descriptor, factory));
    }

    pub fn descriptor(&self, id: &str) -> Option<&AlgorithmDescriptor> {
        self.entries.get(id).map(|(descriptor, _)| descriptor)
    }

    /// Build a fresh engine for `id`.
    pub fn create(&self, id: &str) -> Result<Box<dyn AlgorithmEngine>> {
        self.entries
            .get(id)
            .map(|(_, factory)| factory())
            .ok_or_else(|| EngineError::UnknownAlgorithm(id.to_string()))
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &AlgorithmDescriptor> {
        self.entries.values().map(|(descriptor, _)| descriptor)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("algorithms", &self.ids())
            .finish()
    }
}

/// Non-capturing constructor for a catalog id.
fn factory(id: AlgorithmId) -> EngineFactory {
    use AlgorithmId::*;
    match id {
        BubbleSort => || Box::new(BubbleSortEngine::new()),
        SelectionSort => || Box::new(SelectionSortEngine::new()),
        InsertionSort => || Box::new(InsertionSortEngine::new()),
        MergeSort => || Box::new(MergeSortEngine::new()),
        QuickSort => || Box::new(QuickSortEngine::new()),
        HeapSort => || Box::new(HeapSortEngine::new()),
        LinearSearch => || Box::new(LinearSearchEngine::new()),
        BinarySearch => || Box::new(BinarySearchEngine::new()),
        Stack => || Box::new(StackEngine::new()),
        Queue => || Box::new(QueueEngine::new()),
        LinkedList => || Box::new(LinkedListEngine::new()),
        BinaryTree => || Box::new(BinaryTreeEngine::new()),
        HashTable => || Box::new(HashTableEngine::new()),
        Bfs => || Box::new(BfsEngine::new()),
        Dfs => || Box::new(DfsEngine::new()),
        Dijkstra => || Box::new(DijkstraEngine::new()),
        PathfindingBfs | PathfindingDijkstra | PathfindingAStar => {
            || Box::new(GridPathfindingEngine::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_strings() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.as_str().parse::<AlgorithmId>().unwrap(), id);
            assert_eq!(serde_json::to_value(id).unwrap(), id.as_str());
        }
        assert_eq!(
            "bogo-sort".parse::<AlgorithmId>().unwrap_err(),
            EngineError::UnknownAlgorithm("bogo-sort".to_string())
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(AlgorithmId::HeapSort.category(), AlgorithmCategory::Sorting);
        assert_eq!(AlgorithmId::BinarySearch.category(), AlgorithmCategory::Searching);
        assert_eq!(AlgorithmId::HashTable.category(), AlgorithmCategory::DataStructure);
        assert_eq!(AlgorithmId::PathfindingAStar.category(), AlgorithmCategory::Graph);
    }

    #[test]
    fn test_descriptor_and_engine_names() {
        let descriptor = AlgorithmId::QuickSort.descriptor();
        assert_eq!(descriptor.id, "quick-sort");
        assert_eq!(descriptor.time_complexity.worst, "O(n²)");

        assert_eq!(AlgorithmId::Dfs.create_engine().name(), "dfs");
        assert_eq!(
            AlgorithmId::PathfindingDijkstra.create_engine().name(),
            "grid-pathfinding"
        );
    }

    #[test]
    fn test_registry_and_ids_build_the_same_engines() {
        let registry = EngineRegistry::builtin();
        for id in AlgorithmId::ALL {
            let from_registry = registry.create(id.as_str()).unwrap();
            assert_eq!(from_registry.name(), id.create_engine().name(), "{}", id);
        }
    }

    #[test]
    fn test_pathfinding_variant_mapping() {
        for variant in PathfindingVariant::ALL {
            assert_eq!(AlgorithmId::from(variant).pathfinding_variant(), Some(variant));
        }
        assert_eq!(AlgorithmId::Bfs.pathfinding_variant(), None);
    }

    #[test]
    fn test_registry() {
        let registry = EngineRegistry::builtin();
        assert_eq!(registry.len(), 19);
        assert_eq!(registry.ids()[0], "bubble-sort");
        assert_eq!(registry.ids()[18], "pathfinding-astar");

        let engine = registry.create("hash-table").unwrap();
        assert_eq!(engine.name(), "hash-table");
        assert!(engine.descriptor().is_none());

        assert!(matches!(
            registry.create("nope"),
            Err(EngineError::UnknownAlgorithm(_))
        ));
        assert_eq!(registry.descriptor("bfs").unwrap().name, "Breadth-First Search");
    }
}
