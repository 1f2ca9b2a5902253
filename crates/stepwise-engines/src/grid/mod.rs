//! Grid pathfinding.
//!
//! One best-first search over a 4-connected occupancy grid, shaped into BFS,
//! Dijkstra or A* by its `PathfindingVariant`. The variants differ only in
//! the priority used to pick the next cell and in the test deciding whether
//! a neighbor's cost improved; frontier handling, step emission and path
//! reconstruction are shared.
//!
//! Exploration steps are sampled: a `traverse` is emitted for the first
//! visited cell, every `VISIT_STEP_INTERVAL`-th one and the goal, and
//! discovery `highlight`s only while the visited count sits on the
//! interval. Counters still see every visit and every edge check.
//!
//! ```text
//! Idle -> Exploring { select next -> mark visited -> expand neighbors }
//!      -> goal popped:       build path -> done
//!      -> open set exhausted: no path   -> done
//! ```

use indexmap::IndexSet;
use stepwise_trace::{
    DataStructureState, GridCell, GridSnapshot, StateData, StepDraft, StepRecorder, StepType,
    StructureKind,
};

use crate::engine::{Engine, StepGenerator, mismatch};
use crate::error::{EngineError, Result};
use crate::input::{EngineInput, GridSpec, PathfindingVariant};

/// Visited cells between two sampled exploration steps.
pub const VISIT_STEP_INTERVAL: usize = 12;

/// Path cells between two sampled path-building steps.
pub const PATH_STEP_INTERVAL: usize = 4;

pub struct GridPathfinding;

pub type GridPathfindingEngine = Engine<GridPathfinding>;

impl StepGenerator for GridPathfinding {
    const NAME: &'static str = "grid-pathfinding";
    type Input = GridSpec;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        let grid = match input {
            EngineInput::Grid(grid) => grid,
            other => return mismatch(Self::NAME, "grid", &other),
        };
        validate(&grid)?;
        Ok(grid)
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        Search::new(input).run(recorder);
    }
}

fn validate(grid: &GridSpec) -> Result<()> {
    let invalid = |reason: String| Err(EngineError::invalid(GridPathfinding::NAME, reason));

    if grid.rows == 0 || grid.cols == 0 {
        return invalid(format!("grid must be at least 1x1, got {}x{}", grid.rows, grid.cols));
    }
    if grid.walls.len() != grid.rows || grid.walls.iter().any(|row| row.len() != grid.cols) {
        return invalid(format!("walls must be exactly {}x{}", grid.rows, grid.cols));
    }
    for (name, (row, col)) in [("start", grid.start), ("end", grid.end)] {
        if row >= grid.rows || col >= grid.cols {
            return invalid(format!("{} ({}, {}) is outside the grid", name, row, col));
        }
        if grid.walls[row][col] {
            return invalid(format!("{} ({}, {}) is a wall", name, row, col));
        }
    }
    Ok(())
}

/// Manhattan distance between two cells.
pub fn manhattan(a: GridCell, b: GridCell) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

/// Search state, cells addressed by their flattened `row * cols + col` id.
struct Search<'a> {
    grid: &'a GridSpec,
    variant: PathfindingVariant,
    /// Hop count from the start (`gScore` in A*).
    cost: Vec<Option<usize>>,
    /// `cost + heuristic`, only maintained for A*.
    estimate: Vec<Option<usize>>,
    came_from: Vec<Option<usize>>,
    visited: Vec<bool>,
    visited_order: Vec<GridCell>,
    /// Insertion-ordered so ties go to the cell discovered first.
    open: IndexSet<usize>,
}

impl<'a> Search<'a> {
    fn new(grid: &'a GridSpec) -> Self {
        let cells = grid.rows * grid.cols;
        Self {
            grid,
            variant: grid.algorithm,
            cost: vec![None; cells],
            estimate: vec![None; cells],
            came_from: vec![None; cells],
            visited: vec![false; cells],
            visited_order: Vec::new(),
            open: IndexSet::new(),
        }
    }

    fn id(&self, (row, col): GridCell) -> usize {
        row * self.grid.cols + col
    }

    fn cell(&self, id: usize) -> GridCell {
        (id / self.grid.cols, id % self.grid.cols)
    }

    fn neighbors(&self, (row, col): GridCell) -> impl Iterator<Item = GridCell> + use<> {
        let (rows, cols) = (self.grid.rows, self.grid.cols);
        let up = row.checked_sub(1).map(|r| (r, col));
        let down = (row + 1 < rows).then_some((row + 1, col));
        let left = col.checked_sub(1).map(|c| (row, c));
        let right = (col + 1 < cols).then_some((row, col + 1));
        [up, down, left, right].into_iter().flatten()
    }

    /// The value `pick_next` minimizes.
    fn priority(&self, id: usize) -> Option<usize> {
        match self.variant {
            PathfindingVariant::Bfs | PathfindingVariant::Dijkstra => self.cost[id],
            PathfindingVariant::AStar => self.estimate[id],
        }
    }

    /// Minimum-priority member of the open set; first seen wins ties.
    fn pick_next(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for &id in &self.open {
            let Some(value) = self.priority(id) else {
                continue;
            };
            if best.is_none_or(|(_, b)| value < b) {
                best = Some((id, value));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Try to reach `to` through `from`; returns true if `to` improved.
    fn relax(&mut self, from: usize, to: usize) -> bool {
        let Some(base) = self.cost[from] else {
            return false;
        };
        let candidate = base + 1;
        let improved = match self.variant {
            // Under unit cost the first assignment is already minimal.
            PathfindingVariant::Bfs => self.cost[to].is_none(),
            PathfindingVariant::Dijkstra | PathfindingVariant::AStar => {
                self.cost[to].is_none_or(|known| candidate < known)
            }
        };
        if improved {
            self.cost[to] = Some(candidate);
            if self.variant == PathfindingVariant::AStar {
                self.estimate[to] = Some(candidate + manhattan(self.cell(to), self.grid.end));
            }
            self.came_from[to] = Some(from);
        }
        improved
    }

    fn frontier(&self) -> Vec<GridCell> {
        self.open.iter().map(|&id| self.cell(id)).collect()
    }

    fn snapshot(
        &self,
        frontier: Vec<GridCell>,
        current: Option<GridCell>,
        final_path: Vec<GridCell>,
    ) -> DataStructureState {
        let grid = GridSnapshot {
            rows: self.grid.rows,
            cols: self.grid.cols,
            start: self.grid.start,
            end: self.grid.end,
            walls: self.grid.walls.clone(),
            visited_order: self.visited_order.clone(),
            frontier,
            current,
            final_path,
        };
        DataStructureState::new(StructureKind::Graph, StateData::Grid(Box::new(grid)))
            .with("rows", self.grid.rows)
            .with("cols", self.grid.cols)
    }

    fn run(mut self, recorder: &mut StepRecorder) {
        let (start, end) = (self.grid.start, self.grid.end);
        let start_id = self.id(start);
        let end_id = self.id(end);
        let label = self.variant.label();

        self.cost[start_id] = Some(0);
        self.estimate[start_id] = Some(manhattan(start, end));
        self.open.insert(start_id);

        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                format!(
                    "Starting {} from ({}, {}) to ({}, {})",
                    label, start.0, start.1, end.0, end.1
                ),
                0,
                self.snapshot(vec![start], None, Vec::new()),
            )
            .explain(
                "Pathfinding explores walkable cells while avoiding walls, then reconstructs the \
                 best path to the destination.",
            )
            .var("algorithm", label),
        );

        let mut found = false;
        while let Some(current_id) = self.pick_next() {
            self.open.shift_remove(&current_id);
            let current = self.cell(current_id);
            if !self.visited[current_id] {
                self.visited[current_id] = true;
                self.visited_order.push(current);
            }
            recorder.increment_operations();

            let visited_count = self.visited_order.len();
            let on_interval = visited_count % VISIT_STEP_INTERVAL == 0;
            if visited_count == 1 || on_interval || current_id == end_id {
                recorder.record(
                    StepDraft::observe(
                        StepType::Traverse,
                        format!("Visiting cell ({}, {})", current.0, current.1),
                        1,
                        self.snapshot(self.frontier(), Some(current), Vec::new()),
                    )
                    .indices([current_id])
                    .var("frontierSize", self.open.len())
                    .var("visitedCount", visited_count),
                );
            }

            if current_id == end_id {
                found = true;
                break;
            }

            for next in self.neighbors(current) {
                if self.grid.walls[next.0][next.1] {
                    continue;
                }
                recorder.increment_comparisons();
                let next_id = self.id(next);
                if !self.relax(current_id, next_id) {
                    continue;
                }
                self.open.insert(next_id);

                if on_interval {
                    recorder.record(
                        StepDraft::observe(
                            StepType::Highlight,
                            format!("Discover cell ({}, {})", next.0, next.1),
                            2,
                            self.snapshot(self.frontier(), Some(current), Vec::new()),
                        )
                        .indices([next_id])
                        .var("parent", format!("({}, {})", current.0, current.1))
                        .var("discovered", format!("({}, {})", next.0, next.1)),
                    );
                }
            }
        }

        let path = if found { self.reconstruct(start_id, end_id) } else { Vec::new() };

        if path.is_empty() {
            recorder.record(
                StepDraft::observe(
                    StepType::Highlight,
                    "No path found from start to end",
                    4,
                    self.snapshot(Vec::new(), None, Vec::new()),
                )
                .var("algorithm", label)
                .var("visited", self.visited_order.len()),
            );
            return;
        }

        let last = path.len() - 1;
        for (index, &cell) in path.iter().enumerate() {
            recorder.increment_operations();
            if index == 0 || index == last || index % PATH_STEP_INTERVAL == 0 {
                let before = self.snapshot(Vec::new(), Some(cell), path[..index].to_vec());
                let after = self.snapshot(Vec::new(), Some(cell), path[..=index].to_vec());
                recorder.record(
                    StepDraft::mutate(
                        StepType::Update,
                        format!("Building final path through ({}, {})", cell.0, cell.1),
                        3,
                        before,
                        after,
                    )
                    .indices([self.id(cell)])
                    .var("pathLength", index + 1),
                );
            }
        }

        let indices: Vec<usize> = path.iter().map(|&cell| self.id(cell)).collect();
        let cells = path.len();
        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                format!("Path found! Length: {}", cells - 1),
                4,
                self.snapshot(Vec::new(), Some(end), path),
            )
            .indices(indices)
            .var("algorithm", label)
            .var("visited", self.visited_order.len())
            .var("pathLength", cells),
        );
    }

    /// Walk predecessors back from the goal; empty if the chain breaks.
    fn reconstruct(&self, start_id: usize, end_id: usize) -> Vec<GridCell> {
        let mut ids = vec![end_id];
        let mut current = end_id;
        while current != start_id {
            let Some(parent) = self.came_from[current] else {
                return Vec::new();
            };
            ids.push(parent);
            current = parent;
        }
        ids.reverse();
        ids.into_iter().map(|id| self.cell(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use stepwise_trace::AlgorithmStep;

    use super::*;
    use crate::catalog::AlgorithmId;
    use crate::engine::AlgorithmEngine;

    fn run(grid: GridSpec) -> Vec<AlgorithmStep> {
        let id = AlgorithmId::from(grid.algorithm);
        let mut engine = id.create_engine();
        engine.initialize(id.descriptor(), EngineInput::Grid(grid)).unwrap();
        engine.generate_steps().unwrap().to_vec()
    }

    fn final_grid(steps: &[AlgorithmStep]) -> GridSnapshot {
        steps
            .last()
            .and_then(|s| s.after_state.data.as_grid())
            .cloned()
            .unwrap()
    }

    fn assert_valid_path(grid: &GridSpec, path: &[GridCell]) {
        assert_eq!(path.first(), Some(&grid.start));
        assert_eq!(path.last(), Some(&grid.end));
        for &(r, c) in path {
            assert!(!grid.walls[r][c]);
        }
        for pair in path.windows(2) {
            assert_eq!(manhattan(pair[0], pair[1]), 1);
        }
    }

    /// A wall across column 3 with a single gap at the bottom row.
    fn walled(variant: PathfindingVariant) -> GridSpec {
        let mut grid = GridSpec::open(6, 7, (0, 0), (0, 6), variant);
        for row in 0..5 {
            grid = grid.with_wall(row, 3);
        }
        grid
    }

    #[test]
    fn test_open_grid_all_variants_find_shortest() {
        for variant in PathfindingVariant::ALL {
            let grid = GridSpec::open(8, 10, (1, 1), (6, 8), variant);
            let path = final_grid(&run(grid.clone())).final_path;
            assert_valid_path(&grid, &path);
            assert_eq!(path.len() - 1, manhattan(grid.start, grid.end), "{:?}", variant);
        }
    }

    #[test]
    fn test_detour_around_wall() {
        for variant in PathfindingVariant::ALL {
            let grid = walled(variant);
            let steps = run(grid.clone());
            let last = steps.last().unwrap();
            let path = final_grid(&steps).final_path;
            assert_valid_path(&grid, &path);
            // down 5, across 6, up 5
            assert_eq!(path.len() - 1, 16);
            assert_eq!(last.description, "Path found! Length: 16");
            assert_eq!(last.affected_indices.len(), path.len());
        }
    }

    #[test]
    fn test_astar_visits_no_more_than_bfs() {
        let bfs = final_grid(&run(GridSpec::open(20, 20, (0, 0), (19, 19), PathfindingVariant::Bfs)));
        let astar =
            final_grid(&run(GridSpec::open(20, 20, (0, 0), (19, 19), PathfindingVariant::AStar)));
        assert!(astar.visited_order.len() <= bfs.visited_order.len());
        assert_eq!(astar.final_path.len(), bfs.final_path.len());
    }

    #[test]
    fn test_no_path_is_a_normal_outcome() {
        let mut grid = GridSpec::open(5, 5, (0, 0), (4, 4), PathfindingVariant::Dijkstra);
        for row in 0..5 {
            grid = grid.with_wall(row, 2);
        }
        let steps = run(grid);
        let last = steps.last().unwrap();
        assert_eq!(last.description, "No path found from start to end");
        assert!(last.affected_indices.is_empty());
        let snapshot = final_grid(&steps);
        assert!(snapshot.final_path.is_empty());
        // the two left columns are fully explored
        assert_eq!(snapshot.visited_order.len(), 10);
    }

    #[test]
    fn test_sampling_bounds_steps_not_counters() {
        let grid = GridSpec::open(45, 60, (4, 4), (40, 55), PathfindingVariant::Bfs);
        let steps = run(grid);
        let snapshot = final_grid(&steps);
        let last = steps.last().unwrap();

        let traverses = steps.iter().filter(|s| s.kind == StepType::Traverse).count();
        let visited = snapshot.visited_order.len();
        assert!(traverses <= visited / VISIT_STEP_INTERVAL + 2);
        // one operation per visit plus one per path cell
        assert_eq!(last.metrics.operation_count as usize, visited + snapshot.final_path.len());

        let path_steps = steps.iter().filter(|s| s.kind == StepType::Update).count();
        assert!(path_steps < snapshot.final_path.len());
    }

    #[test]
    fn test_path_steps_grow_path_by_one_cell() {
        let steps = run(GridSpec::open(1, 9, (0, 0), (0, 8), PathfindingVariant::AStar));
        let updates: Vec<_> = steps.iter().filter(|s| s.kind == StepType::Update).collect();
        // indices 0, 4 and 8
        assert_eq!(updates.len(), 3);
        for step in updates {
            let before = step.before_state.data.as_grid().unwrap().final_path.len();
            let after = step.after_state.data.as_grid().unwrap().final_path.len();
            assert_eq!(after, before + 1);
        }
    }

    #[test]
    fn test_start_equals_end() {
        let steps = run(GridSpec::open(3, 3, (1, 1), (1, 1), PathfindingVariant::Bfs));
        assert_eq!(steps.last().unwrap().description, "Path found! Length: 0");
        assert_eq!(final_grid(&steps).final_path, vec![(1, 1)]);
    }

    #[test]
    fn test_memory_counts_visited_and_frontier() {
        let steps = run(GridSpec::open(4, 4, (0, 0), (3, 3), PathfindingVariant::Bfs));
        for step in &steps {
            assert_eq!(step.metrics.memory_usage, step.after_state.data.memory_usage());
        }
        assert_eq!(steps[0].metrics.memory_usage, 1);
    }

    #[test]
    fn test_validation() {
        let bad = |grid: GridSpec| GridPathfinding::accept(EngineInput::Grid(grid)).unwrap_err();

        let err = bad(GridSpec::open(0, 3, (0, 0), (0, 0), PathfindingVariant::Bfs));
        assert!(err.to_string().contains("at least 1x1"));

        let err = bad(GridSpec::open(3, 3, (0, 0), (3, 0), PathfindingVariant::Bfs));
        assert!(err.to_string().contains("outside the grid"));

        let err = bad(GridSpec::open(3, 3, (0, 0), (2, 2), PathfindingVariant::Bfs).with_wall(0, 0));
        assert!(err.to_string().contains("start (0, 0) is a wall"));

        let mut ragged = GridSpec::open(2, 2, (0, 0), (1, 1), PathfindingVariant::Bfs);
        ragged.walls[1].pop();
        assert!(bad(ragged).to_string().contains("exactly 2x2"));
    }
}
