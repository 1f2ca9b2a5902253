//! Engine input shapes.
//!
//! Every engine accepts one `EngineInput` variant; handing it any other
//! variant is an input-validation error raised by `initialize`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stepwise_trace::GridCell;

/// A stack operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StackOp {
    Push { value: i64 },
    Pop,
    Peek,
}

/// A queue operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueOp {
    Enqueue { value: i64 },
    Dequeue,
    Peek,
}

/// A linked-list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListOp {
    Insert { value: i64 },
    Delete { value: i64 },
    Search { value: i64 },
}

/// A hash-table operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HashOp {
    Set { key: i64, value: i64 },
    Get { key: i64 },
    Delete { key: i64 },
}

/// A directed, weighted edge in an adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub to: i64,
    pub weight: i64,
}

/// Which behavior the unified grid search takes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathfindingVariant {
    #[serde(rename = "pathfinding-bfs")]
    Bfs,
    #[serde(rename = "pathfinding-dijkstra")]
    Dijkstra,
    #[serde(rename = "pathfinding-astar")]
    AStar,
}

impl PathfindingVariant {
    /// All variants in presentation order.
    pub const ALL: [PathfindingVariant; 3] = [
        PathfindingVariant::Bfs,
        PathfindingVariant::Dijkstra,
        PathfindingVariant::AStar,
    ];

    /// Long-form name used in step narration.
    pub fn label(&self) -> &'static str {
        match self {
            PathfindingVariant::Bfs => "Breadth-First Search",
            PathfindingVariant::Dijkstra => "Dijkstra's Algorithm",
            PathfindingVariant::AStar => "A* Search",
        }
    }

    /// Short name used in comparison tables.
    pub fn short_label(&self) -> &'static str {
        match self {
            PathfindingVariant::Bfs => "Grid BFS",
            PathfindingVariant::Dijkstra => "Grid Dijkstra",
            PathfindingVariant::AStar => "Grid A*",
        }
    }
}

/// An occupancy grid plus search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
    /// `walls[row][col]` is true for blocked cells.
    pub walls: Vec<Vec<bool>>,
    pub start: GridCell,
    pub end: GridCell,
    pub algorithm: PathfindingVariant,
}

impl GridSpec {
    /// An open grid with no walls.
    pub fn open(
        rows: usize,
        cols: usize,
        start: GridCell,
        end: GridCell,
        algorithm: PathfindingVariant,
    ) -> Self {
        Self {
            rows,
            cols,
            walls: vec![vec![false; cols]; rows],
            start,
            end,
            algorithm,
        }
    }

    /// Same grid, different search variant.
    pub fn with_algorithm(mut self, algorithm: PathfindingVariant) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Mark a cell as blocked. Out-of-range cells are ignored.
    pub fn with_wall(mut self, row: usize, col: usize) -> Self {
        if let Some(cell) = self.walls.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = true;
        }
        self
    }
}

/// Algorithm-specific input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineInput {
    /// Values to sort.
    Array { values: Vec<i64> },
    /// Array to scan plus the value sought.
    Search { array: Vec<i64>, target: i64 },
    Stack { operations: Vec<StackOp> },
    Queue { operations: Vec<QueueOp> },
    LinkedList { operations: Vec<ListOp> },
    /// BST insertion order.
    Tree { values: Vec<i64> },
    HashTable { size: usize, operations: Vec<HashOp> },
    /// Unweighted adjacency lists.
    Graph {
        adjacency: BTreeMap<i64, Vec<i64>>,
        start: i64,
    },
    /// Weighted adjacency lists.
    WeightedGraph {
        adjacency: BTreeMap<i64, Vec<WeightedEdge>>,
        start: i64,
    },
    Grid(GridSpec),
}

impl EngineInput {
    /// Name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            EngineInput::Array { .. } => "array",
            EngineInput::Search { .. } => "search",
            EngineInput::Stack { .. } => "stack",
            EngineInput::Queue { .. } => "queue",
            EngineInput::LinkedList { .. } => "linked_list",
            EngineInput::Tree { .. } => "tree",
            EngineInput::HashTable { .. } => "hash_table",
            EngineInput::Graph { .. } => "graph",
            EngineInput::WeightedGraph { .. } => "weighted_graph",
            EngineInput::Grid(_) => "grid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_from_json() {
        let json = r#"{"kind":"stack","operations":[{"type":"push","value":5},{"type":"pop"}]}"#;
        let input: EngineInput = serde_json::from_str(json).unwrap();
        assert_eq!(
            input,
            EngineInput::Stack {
                operations: vec![StackOp::Push { value: 5 }, StackOp::Pop]
            }
        );
    }

    #[test]
    fn test_graph_input_integer_keys() {
        let json = r#"{"kind":"graph","adjacency":{"0":[1,2],"1":[0]},"start":0}"#;
        let input: EngineInput = serde_json::from_str(json).unwrap();
        match input {
            EngineInput::Graph { adjacency, start } => {
                assert_eq!(start, 0);
                assert_eq!(adjacency[&0], vec![1, 2]);
            }
            other => panic!("unexpected input: {:?}", other),
        }
    }

    #[test]
    fn test_grid_spec_builders() {
        let grid = GridSpec::open(3, 4, (0, 0), (2, 3), PathfindingVariant::Bfs)
            .with_wall(1, 1)
            .with_wall(9, 9)
            .with_algorithm(PathfindingVariant::AStar);

        assert!(grid.walls[1][1]);
        assert_eq!(grid.walls.iter().flatten().filter(|w| **w).count(), 1);
        assert_eq!(grid.algorithm, PathfindingVariant::AStar);

        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json["algorithm"], "pathfinding-astar");
        assert_eq!(json["start"], serde_json::json!([0, 0]));
    }

    #[test]
    fn test_variant_labels() {
        assert_eq!(PathfindingVariant::AStar.label(), "A* Search");
        assert_eq!(PathfindingVariant::Dijkstra.short_label(), "Grid Dijkstra");
        assert_eq!(EngineInput::Tree { values: vec![] }.kind_name(), "tree");
    }
}
