//! Side-by-side runs of the grid search variants.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::AlgorithmId;
use crate::error::Result;
use crate::input::{EngineInput, GridSpec, PathfindingVariant};

/// One row of a pathfinding comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathfindingComparison {
    pub algorithm: PathfindingVariant,
    pub label: String,
    /// Wall time around initialize + generate, measured here rather than
    /// inside the engine.
    pub elapsed_ms: f64,
    pub steps: usize,
    pub operations: u64,
    pub comparisons: u64,
    pub peak_memory: usize,
    /// Moves from start to end; 0 when no path exists.
    pub path_length: usize,
    pub found: bool,
}

/// Run every grid variant over `grid`, ignoring its own `algorithm` field.
pub fn compare_pathfinding(grid: &GridSpec) -> Result<Vec<PathfindingComparison>> {
    PathfindingVariant::ALL
        .into_iter()
        .map(|variant| run_variant(grid, variant))
        .collect()
}

fn run_variant(grid: &GridSpec, variant: PathfindingVariant) -> Result<PathfindingComparison> {
    let id = AlgorithmId::from(variant);
    let input = EngineInput::Grid(grid.clone().with_algorithm(variant));
    let mut engine = id.create_engine();

    let started = Instant::now();
    engine.initialize(id.descriptor(), input)?;
    let steps = engine.generate_steps()?;
    let elapsed = started.elapsed();

    let path = steps
        .last()
        .and_then(|step| step.after_state.data.as_grid())
        .map(|snapshot| snapshot.final_path.len())
        .unwrap_or(0);
    let metrics = engine.metrics()?;

    let row = PathfindingComparison {
        algorithm: variant,
        label: variant.short_label().to_string(),
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        steps: metrics.execution_steps,
        operations: metrics.total_operations,
        comparisons: metrics.total_comparisons,
        peak_memory: metrics.peak_memory_usage,
        path_length: path.saturating_sub(1),
        found: path > 0,
    };
    debug!(
        algorithm = id.as_str(),
        steps = row.steps,
        found = row.found,
        elapsed_ms = row.elapsed_ms,
        "Compared grid variant"
    );
    Ok(row)
}
