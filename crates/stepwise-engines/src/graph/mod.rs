//! Graph traversal engines.
//!
//! BFS and DFS snapshot the visit order; Dijkstra snapshots the tentative
//! distance of every listed node in ascending id order (`null` while
//! unreachable). Node ids not listed as adjacency keys have no outgoing
//! edges.

mod bfs;
mod dfs;
mod dijkstra;

pub use bfs::{Bfs, BfsEngine};
pub use dfs::{Dfs, DfsEngine};
pub use dijkstra::{Dijkstra, DijkstraEngine};

use std::collections::BTreeMap;

use stepwise_trace::{DataStructureState, StructureKind};

use crate::error::{EngineError, Result};

/// Adjacency lists plus the node the traversal starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphInput<E> {
    pub adjacency: BTreeMap<i64, Vec<E>>,
    pub start: i64,
}

impl<E> GraphInput<E> {
    /// Check the graph is non-empty and lists the start node.
    pub(crate) fn new(algorithm: &str, adjacency: BTreeMap<i64, Vec<E>>, start: i64) -> Result<Self> {
        if adjacency.is_empty() {
            return Err(EngineError::invalid(algorithm, "adjacency list is empty"));
        }
        if !adjacency.contains_key(&start) {
            return Err(EngineError::invalid(
                algorithm,
                format!("start node {} is not in the adjacency list", start),
            ));
        }
        Ok(Self { adjacency, start })
    }

    /// Outgoing edges of `node`; empty for unlisted ids.
    pub(crate) fn edges(&self, node: i64) -> &[E] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub(crate) fn order_state(order: &[i64]) -> DataStructureState {
    DataStructureState::values(StructureKind::Graph, order)
}
