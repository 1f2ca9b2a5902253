//! Text input parsing.
//!
//! Turns the comma-separated forms accepted on the command line into
//! `EngineInput`. Tokens that do not parse are dropped (stack and queue
//! tokens fall back to `peek`); an input that parses to nothing is an error
//! raised here, before any engine runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use stepwise_engines::{
    AlgorithmId, EngineInput, GridSpec, HashOp, ListOp, QueueOp, StackOp, WeightedEdge,
};
use stepwise_trace::AlgorithmCategory;
use tracing::debug;

use crate::config::Config;

/// Input flags shared by `run` and `play`.
///
/// Anything left out falls back to a small built-in example for the chosen
/// algorithm.
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Comma-separated integers to sort, search or insert into a tree
    #[arg(long)]
    pub values: Option<String>,

    /// Value to search for
    #[arg(long, allow_hyphen_values = true)]
    pub target: Option<i64>,

    /// Operations, e.g. `push:5,pop,peek` or `set:10:100,get:10`
    #[arg(long)]
    pub ops: Option<String>,

    /// Undirected edges `a-b` (or `a-b-w` for dijkstra), comma-separated
    #[arg(long)]
    pub edges: Option<String>,

    /// Start node for graph traversals
    #[arg(long, allow_hyphen_values = true)]
    pub start: Option<i64>,

    /// Grid walls file: rows of `#` (wall) and `.` (open)
    #[arg(long)]
    pub walls_file: Option<PathBuf>,

    /// Read the engine input as JSON instead of the flags above
    #[arg(long, conflicts_with_all = ["values", "target", "ops", "edges", "start", "walls_file"])]
    pub input_file: Option<PathBuf>,
}

/// Build the engine input for `id` from command-line flags.
pub fn build_input(id: AlgorithmId, args: &InputArgs, config: &Config) -> Result<EngineInput> {
    if let Some(path) = &args.input_file {
        let input = read_input_file(path)?;
        // The chosen id decides the grid variant, whatever the file says.
        return Ok(match (input, id.pathfinding_variant()) {
            (EngineInput::Grid(grid), Some(variant)) if grid.algorithm != variant => {
                debug!(file = ?grid.algorithm, chosen = ?variant, "Overriding grid variant from input file");
                EngineInput::Grid(grid.with_algorithm(variant))
            }
            (input, _) => input,
        });
    }

    let input = match id {
        AlgorithmId::LinearSearch | AlgorithmId::BinarySearch => {
            let mut array = parse_values(args.values.as_deref().unwrap_or("5,2,8,1,9,3"));
            let target = args.target.unwrap_or(8);
            if array.is_empty() {
                bail!("Please enter a valid array to search");
            }
            if id == AlgorithmId::BinarySearch {
                array.sort_unstable();
            }
            EngineInput::Search { array, target }
        }
        AlgorithmId::Stack => {
            let operations = parse_stack_ops(
                args.ops.as_deref().unwrap_or("push:5,push:3,push:8,pop,push:1"),
            );
            if operations.is_empty() {
                bail!("Please provide stack operations");
            }
            EngineInput::Stack { operations }
        }
        AlgorithmId::Queue => {
            let operations = parse_queue_ops(
                args.ops
                    .as_deref()
                    .unwrap_or("enqueue:5,enqueue:3,enqueue:8,dequeue,enqueue:1"),
            );
            if operations.is_empty() {
                bail!("Please provide queue operations");
            }
            EngineInput::Queue { operations }
        }
        AlgorithmId::LinkedList => {
            let operations = parse_list_ops(
                args.ops
                    .as_deref()
                    .unwrap_or("insert:5,insert:3,insert:8,search:3,delete:5"),
            );
            if operations.is_empty() {
                bail!("Please provide valid linked list operations");
            }
            EngineInput::LinkedList { operations }
        }
        AlgorithmId::BinaryTree => {
            let values = parse_values(args.values.as_deref().unwrap_or("8,3,10,1,6,14,4,7,13"));
            if values.is_empty() {
                bail!("Please provide valid tree values");
            }
            EngineInput::Tree { values }
        }
        AlgorithmId::HashTable => {
            let operations = parse_hash_ops(
                args.ops
                    .as_deref()
                    .unwrap_or("set:10:100,set:20:200,get:10,delete:20"),
            );
            if operations.is_empty() {
                bail!("Please provide valid hash table operations");
            }
            EngineInput::HashTable {
                size: config.hash_table.size,
                operations,
            }
        }
        AlgorithmId::Bfs | AlgorithmId::Dfs => {
            let adjacency = parse_edges(args.edges.as_deref().unwrap_or("0-1,0-2,1-3,2-4,3-5,4-5"));
            if adjacency.is_empty() {
                bail!("Please provide valid graph edges");
            }
            EngineInput::Graph {
                adjacency,
                start: args.start.unwrap_or(0),
            }
        }
        AlgorithmId::Dijkstra => {
            let adjacency = parse_weighted_edges(
                args.edges
                    .as_deref()
                    .unwrap_or("0-1-4,0-2-1,2-1-2,1-3-1,2-3-5"),
            );
            if adjacency.is_empty() {
                bail!("Please provide valid weighted edges");
            }
            EngineInput::WeightedGraph {
                adjacency,
                start: args.start.unwrap_or(0),
            }
        }
        AlgorithmId::PathfindingBfs
        | AlgorithmId::PathfindingDijkstra
        | AlgorithmId::PathfindingAStar => {
            let mut grid = grid_from_config(config, args.walls_file.as_deref())?;
            if let Some(variant) = id.pathfinding_variant() {
                grid = grid.with_algorithm(variant);
            }
            EngineInput::Grid(grid)
        }
        _ => {
            debug_assert_eq!(id.category(), AlgorithmCategory::Sorting);
            let values = parse_values(args.values.as_deref().unwrap_or("5,2,8,1,9,3"));
            if values.is_empty() {
                bail!("Please enter valid numbers");
            }
            if values.len() > config.limits.max_array_len {
                bail!(
                    "Please enter {} or fewer numbers (got {})",
                    config.limits.max_array_len,
                    values.len()
                );
            }
            EngineInput::Array { values }
        }
    };
    Ok(input)
}

fn read_input_file(path: &Path) -> Result<EngineInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse input file: {}", path.display()))
}

/// The configured grid, with walls from `walls_file` when given.
///
/// A walls file sets the grid size; endpoints always come from the config.
pub fn grid_from_config(config: &Config, walls_file: Option<&Path>) -> Result<GridSpec> {
    let grid = &config.grid;
    let mut spec = GridSpec::open(
        grid.rows,
        grid.cols,
        grid.start,
        grid.end,
        stepwise_engines::PathfindingVariant::Bfs,
    );
    if let Some(path) = walls_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read walls file: {}", path.display()))?;
        spec.walls = parse_walls(&content)
            .with_context(|| format!("Invalid walls file: {}", path.display()))?;
        spec.rows = spec.walls.len();
        spec.cols = spec.walls.first().map_or(0, Vec::len);
    }
    Ok(spec)
}

/// Split on commas, trimming and skipping empty tokens.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Comma-separated integers; anything else is dropped.
pub fn parse_values(text: &str) -> Vec<i64> {
    tokens(text).filter_map(|t| t.parse().ok()).collect()
}

/// `push:v`, `pop` and `peek`; unrecognized tokens become `peek`.
pub fn parse_stack_ops(text: &str) -> Vec<StackOp> {
    tokens(text)
        .map(|token| match token.split_once(':') {
            Some(("push", value)) => match value.trim().parse() {
                Ok(value) => StackOp::Push { value },
                Err(_) => StackOp::Peek,
            },
            None if token == "pop" => StackOp::Pop,
            _ => StackOp::Peek,
        })
        .collect()
}

/// `enqueue:v`, `dequeue` and `peek`; unrecognized tokens become `peek`.
pub fn parse_queue_ops(text: &str) -> Vec<QueueOp> {
    tokens(text)
        .map(|token| match token.split_once(':') {
            Some(("enqueue", value)) => match value.trim().parse() {
                Ok(value) => QueueOp::Enqueue { value },
                Err(_) => QueueOp::Peek,
            },
            None if token == "dequeue" => QueueOp::Dequeue,
            _ => QueueOp::Peek,
        })
        .collect()
}

/// `insert:v`, `delete:v` and `search:v`.
pub fn parse_list_ops(text: &str) -> Vec<ListOp> {
    tokens(text)
        .filter_map(|token| {
            let (kind, value) = token.split_once(':')?;
            let value = value.trim().parse().ok()?;
            match kind {
                "insert" => Some(ListOp::Insert { value }),
                "delete" => Some(ListOp::Delete { value }),
                "search" => Some(ListOp::Search { value }),
                _ => None,
            }
        })
        .collect()
}

/// `set:k:v`, `get:k` and `delete:k`.
pub fn parse_hash_ops(text: &str) -> Vec<HashOp> {
    tokens(text)
        .filter_map(|token| {
            let mut parts = token.split(':').map(str::trim);
            let kind = parts.next()?;
            let key = parts.next()?.parse().ok()?;
            match kind {
                "set" => {
                    let value = parts.next()?.parse().ok()?;
                    Some(HashOp::Set { key, value })
                }
                "get" => Some(HashOp::Get { key }),
                "delete" => Some(HashOp::Delete { key }),
                _ => None,
            }
        })
        .collect()
}

/// Undirected `a-b` edges; both directions are added.
pub fn parse_edges(text: &str) -> BTreeMap<i64, Vec<i64>> {
    let mut adjacency: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    for token in tokens(text) {
        let mut parts = token.split('-').map(str::trim);
        let (Some(Ok(from)), Some(Ok(to))) = (
            parts.next().map(str::parse::<i64>),
            parts.next().map(str::parse::<i64>),
        ) else {
            continue;
        };
        adjacency.entry(from).or_default().push(to);
        adjacency.entry(to).or_default().push(from);
    }
    adjacency
}

/// Undirected weighted `a-b-w` edges; both directions are added.
pub fn parse_weighted_edges(text: &str) -> BTreeMap<i64, Vec<WeightedEdge>> {
    let mut adjacency: BTreeMap<i64, Vec<WeightedEdge>> = BTreeMap::new();
    for token in tokens(text) {
        let parts: Vec<_> = token.split('-').map(str::trim).collect();
        let [from, to, weight] = parts.as_slice() else {
            continue;
        };
        let (Ok(from), Ok(to), Ok(weight)) =
            (from.parse::<i64>(), to.parse::<i64>(), weight.parse::<i64>())
        else {
            continue;
        };
        adjacency
            .entry(from)
            .or_default()
            .push(WeightedEdge { to, weight });
        adjacency
            .entry(to)
            .or_default()
            .push(WeightedEdge { to: from, weight });
    }
    adjacency
}

/// Rows of `#` (wall) and `.` (open). Blank lines are skipped.
pub fn parse_walls(text: &str) -> Result<Vec<Vec<bool>>> {
    let mut walls = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .chars()
            .map(|c| match c {
                '#' => Ok(true),
                '.' => Ok(false),
                other => bail!("line {}: unexpected character {:?}", number + 1, other),
            })
            .collect::<Result<Vec<_>>>()?;
        let width = walls.first().map_or(row.len(), Vec::len);
        if width != row.len() {
            bail!(
                "line {}: expected {} cells, found {}",
                number + 1,
                width,
                row.len()
            );
        }
        walls.push(row);
    }
    if walls.is_empty() {
        bail!("no grid rows found");
    }
    Ok(walls)
}
