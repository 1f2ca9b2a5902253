//! Step and metrics data types.
//!
//! These types are the shared vocabulary every engine emits. A step carries
//! independent before/after snapshots of the container it describes, plus the
//! cumulative counters observed at the moment it was recorded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Free-form, ordered key/value context attached to states and steps.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// A grid coordinate as `(row, col)`, serialized as `[row, col]`.
pub type GridCell = (usize, usize);

/// What a step is about. Drives the default visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Compare,
    Swap,
    Insert,
    Delete,
    Update,
    Highlight,
    Traverse,
}

impl StepType {
    /// Returns the string representation used in serialized steps.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Compare => "compare",
            StepType::Swap => "swap",
            StepType::Insert => "insert",
            StepType::Delete => "delete",
            StepType::Update => "update",
            StepType::Highlight => "highlight",
            StepType::Traverse => "traverse",
        }
    }

    /// Returns true if a step of this type is expected to change the container.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            StepType::Swap | StepType::Insert | StepType::Delete | StepType::Update
        )
    }
}

/// The semantic container a snapshot describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructureKind {
    Array,
    LinkedList,
    Tree,
    Graph,
    Stack,
    Queue,
    HashTable,
}

/// Snapshot of a grid search at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub start: GridCell,
    pub end: GridCell,
    pub walls: Vec<Vec<bool>>,
    pub visited_order: Vec<GridCell>,
    pub frontier: Vec<GridCell>,
    pub current: Option<GridCell>,
    pub final_path: Vec<GridCell>,
}

/// The payload of a snapshot.
///
/// Distances use `None` for an unreachable (infinite) tentative distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateData {
    Values(Vec<i64>),
    Distances(Vec<Option<i64>>),
    Grid(Box<GridSnapshot>),
}

impl StateData {
    /// Memory proxy: element count, or cells held by a grid search.
    pub fn memory_usage(&self) -> usize {
        match self {
            StateData::Values(values) => values.len(),
            StateData::Distances(distances) => distances.len(),
            StateData::Grid(grid) => grid.visited_order.len() + grid.frontier.len(),
        }
    }

    /// The plain values, if this is a values snapshot.
    pub fn as_values(&self) -> Option<&[i64]> {
        match self {
            StateData::Values(values) => Some(values),
            _ => None,
        }
    }

    /// The distance array, if this is a distance snapshot.
    pub fn as_distances(&self) -> Option<&[Option<i64>]> {
        match self {
            StateData::Distances(distances) => Some(distances),
            _ => None,
        }
    }

    /// The grid snapshot, if this is a grid snapshot.
    pub fn as_grid(&self) -> Option<&GridSnapshot> {
        match self {
            StateData::Grid(grid) => Some(grid),
            _ => None,
        }
    }
}

/// An independent snapshot of a container plus narration context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStructureState {
    /// Semantic container tag.
    #[serde(rename = "type")]
    pub kind: StructureKind,

    /// Owned copy of the container at this instant.
    pub data: StateData,

    /// Algorithm-specific context (bounds, pivot, depth, phase...).
    #[serde(default)]
    pub metadata: Metadata,
}

impl DataStructureState {
    /// Create a snapshot with empty metadata.
    pub fn new(kind: StructureKind, data: StateData) -> Self {
        Self {
            kind,
            data,
            metadata: Metadata::new(),
        }
    }

    /// Snapshot a slice of values.
    pub fn values(kind: StructureKind, values: &[i64]) -> Self {
        Self::new(kind, StateData::Values(values.to_vec()))
    }

    /// Add a metadata entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.metadata.insert(key.into(), v);
        }
        self
    }

    /// Look up a metadata entry.
    pub fn meta(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }
}

/// Counters as observed when a step was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepMetrics {
    pub operation_count: u64,
    pub comparison_count: u64,
    pub memory_usage: usize,
    pub time_complexity: String,
}

/// One atomic, recorded unit of algorithm progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmStep {
    /// `step-<n>`, n being the zero-based position in the sequence.
    pub id: String,

    #[serde(rename = "type")]
    pub kind: StepType,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_explanation: Option<String>,

    pub pseudocode_line: u32,

    /// Positions the step is about (flattened `row * cols + col` for grids).
    pub affected_indices: Vec<usize>,

    pub before_state: DataStructureState,

    pub after_state: DataStructureState,

    pub metrics: StepMetrics,

    /// Temporary variables worth narrating.
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub variables: Metadata,
}

/// Declared complexity for one dimension (time or space).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityInfo {
    pub best: String,
    pub average: String,
    pub worst: String,
    #[serde(default)]
    pub explanation: String,
}

impl ComplexityInfo {
    /// Create complexity info without an explanation.
    pub fn new(best: impl Into<String>, average: impl Into<String>, worst: impl Into<String>) -> Self {
        Self {
            best: best.into(),
            average: average.into(),
            worst: worst.into(),
            explanation: String::new(),
        }
    }

    /// The same bound for best, average and worst case.
    pub fn uniform(bound: impl Into<String>) -> Self {
        let bound = bound.into();
        Self::new(bound.clone(), bound.clone(), bound)
    }

    /// Attach an explanation.
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }
}

/// Broad family an algorithm belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmCategory {
    Sorting,
    Searching,
    DataStructure,
    Graph,
}

/// Static metadata about an algorithm. Read-only to engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmDescriptor {
    pub id: String,
    pub name: String,
    pub category: AlgorithmCategory,
    pub time_complexity: ComplexityInfo,
    pub space_complexity: ComplexityInfo,
}

/// Summary metrics computed once a run completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmMetrics {
    pub total_operations: u64,
    pub total_comparisons: u64,
    pub peak_memory_usage: usize,
    pub execution_steps: usize,
    pub time_complexity: ComplexityInfo,
    pub space_complexity: ComplexityInfo,
}
