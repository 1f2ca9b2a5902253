//! Terminal and JSON output.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use stepwise_engines::{EngineRegistry, PathfindingComparison};
use stepwise_trace::{
    AlgorithmDescriptor, AlgorithmMetrics, AlgorithmStep, GridSnapshot, StateData,
};

use crate::config::OutputFormat;

/// Everything `run --format json` prints.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport<'a> {
    algorithm: &'a AlgorithmDescriptor,
    steps: &'a [AlgorithmStep],
    metrics: &'a AlgorithmMetrics,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonReport<'a> {
    generated_at: DateTime<Utc>,
    rows: usize,
    cols: usize,
    results: &'a [PathfindingComparison],
}

pub fn write_run(
    out: &mut impl Write,
    format: OutputFormat,
    descriptor: &AlgorithmDescriptor,
    steps: &[AlgorithmStep],
    metrics: &AlgorithmMetrics,
) -> Result<()> {
    match format {
        OutputFormat::Summary => {
            writeln!(out, "{} ({})", descriptor.name, descriptor.id)?;
            for step in steps {
                writeln!(out, "{}", step_line(step))?;
            }
            writeln!(out)?;
            write_metrics(out, metrics)?;
        }
        OutputFormat::Json => {
            let report = RunReport {
                algorithm: descriptor,
                steps,
                metrics,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Jsonl => {
            for step in steps {
                serde_json::to_writer(&mut *out, step)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

fn write_metrics(out: &mut impl Write, metrics: &AlgorithmMetrics) -> Result<()> {
    writeln!(out, "steps:       {}", metrics.execution_steps)?;
    writeln!(out, "operations:  {}", metrics.total_operations)?;
    writeln!(out, "comparisons: {}", metrics.total_comparisons)?;
    writeln!(out, "peak memory: {}", metrics.peak_memory_usage)?;
    let time = &metrics.time_complexity;
    writeln!(
        out,
        "time:        best {}, average {}, worst {}",
        time.best, time.average, time.worst
    )?;
    writeln!(out, "space:       {}", metrics.space_complexity.worst)?;
    Ok(())
}

/// One-line form of a step: id, kind, pseudocode line and description.
pub fn step_line(step: &AlgorithmStep) -> String {
    format!(
        "{:>9}  {:<9}  L{:<2}  {}",
        step.id,
        step.kind.as_str(),
        step.pseudocode_line,
        step.description
    )
}

/// A step as shown during `play`: header, explanation and the data itself.
pub fn step_frame(step: &AlgorithmStep, position: usize, total: usize) -> String {
    let mut frame = format!("[{}/{}] {}\n", position + 1, total, step_line(step));
    if let Some(explanation) = &step.detailed_explanation {
        frame.push_str(&format!("  {}\n", explanation));
    }
    match &step.after_state.data {
        StateData::Values(values) => {
            let cells: Vec<String> = values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    if step.affected_indices.contains(&i) {
                        format!("[{}]", v)
                    } else {
                        v.to_string()
                    }
                })
                .collect();
            frame.push_str(&format!("  {}\n", cells.join(" ")));
        }
        StateData::Distances(distances) => {
            let cells: Vec<String> = distances
                .iter()
                .map(|d| d.map_or_else(|| "∞".to_string(), |d| d.to_string()))
                .collect();
            frame.push_str(&format!("  {}\n", cells.join(" ")));
        }
        StateData::Grid(grid) => frame.push_str(&grid_map(grid)),
    }
    frame
}

/// Character map of a grid snapshot.
///
/// `#` wall, `S`/`E` endpoints, `*` path, `@` current cell, `o` frontier,
/// `-` visited, `.` untouched.
pub fn grid_map(grid: &GridSnapshot) -> String {
    let mut cells = vec![vec!['.'; grid.cols]; grid.rows];
    for (row, line) in grid.walls.iter().enumerate() {
        for (col, &wall) in line.iter().enumerate() {
            if wall {
                cells[row][col] = '#';
            }
        }
    }
    let layers = [
        (&grid.visited_order, '-'),
        (&grid.frontier, 'o'),
        (&grid.final_path, '*'),
    ];
    for (layer, mark) in layers {
        for &(row, col) in layer {
            cells[row][col] = mark;
        }
    }
    if let Some((row, col)) = grid.current {
        cells[row][col] = '@';
    }
    cells[grid.start.0][grid.start.1] = 'S';
    cells[grid.end.0][grid.end.1] = 'E';

    let mut map = String::new();
    for line in cells {
        map.push_str("  ");
        map.extend(line);
        map.push('\n');
    }
    map
}

pub fn write_catalog(out: &mut impl Write, registry: &EngineRegistry) -> Result<()> {
    writeln!(
        out,
        "{:<22} {:<24} {:<15} {:<12} {:<18} {:<18} {}",
        "ID", "NAME", "CATEGORY", "BEST", "AVERAGE", "WORST", "SPACE"
    )?;
    for descriptor in registry.descriptors() {
        let time = &descriptor.time_complexity;
        writeln!(
            out,
            "{:<22} {:<24} {:<15} {:<12} {:<18} {:<18} {}",
            descriptor.id,
            descriptor.name,
            serde_json::to_value(descriptor.category)?
                .as_str()
                .unwrap_or_default(),
            time.best,
            time.average,
            time.worst,
            descriptor.space_complexity.worst
        )?;
    }
    Ok(())
}

pub fn write_comparison(
    out: &mut impl Write,
    json: bool,
    (rows, cols): (usize, usize),
    results: &[PathfindingComparison],
) -> Result<()> {
    if json {
        let report = ComparisonReport {
            generated_at: Utc::now(),
            rows,
            cols,
            results,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Grid {}x{}", rows, cols)?;
    writeln!(
        out,
        "{:<14} {:>6} {:>8} {:>11} {:>11} {:>8} {:>10}",
        "ALGORITHM", "STEPS", "OPS", "COMPARISONS", "PEAK MEMORY", "PATH", "TIME (ms)"
    )?;
    for row in results {
        let path = if row.found {
            row.path_length.to_string()
        } else {
            "none".to_string()
        };
        writeln!(
            out,
            "{:<14} {:>6} {:>8} {:>11} {:>11} {:>8} {:>10.3}",
            row.label,
            row.steps,
            row.operations,
            row.comparisons,
            row.peak_memory,
            path,
            row.elapsed_ms
        )?;
    }
    Ok(())
}
