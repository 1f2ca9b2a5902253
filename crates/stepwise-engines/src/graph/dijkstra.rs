//! Dijkstra's shortest paths with linear-scan selection.
//!
//! Each round scans every unvisited node for the smallest tentative
//! distance, counting one comparison per node examined. No priority queue:
//! the scan is part of what the steps show.

use std::collections::{BTreeMap, BTreeSet};

use stepwise_trace::{DataStructureState, StateData, StepDraft, StepRecorder, StepType, StructureKind};

use super::GraphInput;
use crate::engine::{Engine, StepGenerator, mismatch};
use crate::error::{EngineError, Result};
use crate::input::{EngineInput, WeightedEdge};

pub struct Dijkstra;

pub type DijkstraEngine = Engine<Dijkstra>;

impl StepGenerator for Dijkstra {
    const NAME: &'static str = "dijkstra";
    type Input = GraphInput<WeightedEdge>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        let graph = match input {
            EngineInput::WeightedGraph { adjacency, start } => {
                GraphInput::new(Self::NAME, adjacency, start)?
            }
            other => return mismatch(Self::NAME, "weighted_graph", &other),
        };

        for (&from, edges) in &graph.adjacency {
            for edge in edges {
                if !graph.adjacency.contains_key(&edge.to) {
                    return Err(EngineError::invalid(
                        Self::NAME,
                        format!("edge {} -> {} points at an unlisted node", from, edge.to),
                    ));
                }
                if edge.weight < 0 {
                    return Err(EngineError::invalid(
                        Self::NAME,
                        format!("edge {} -> {} has negative weight {}", from, edge.to, edge.weight),
                    ));
                }
            }
        }
        Ok(graph)
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let nodes: Vec<i64> = input.adjacency.keys().copied().collect();
        let index: BTreeMap<i64, usize> = nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();
        let start = index[&input.start];

        let mut distances: Vec<Option<i64>> = vec![None; nodes.len()];
        distances[start] = Some(0);
        let mut visited: BTreeSet<usize> = BTreeSet::new();

        let state = |distances: &[Option<i64>], visited: &BTreeSet<usize>| {
            let visited: Vec<i64> = visited.iter().map(|&i| nodes[i]).collect();
            DataStructureState::new(StructureKind::Graph, StateData::Distances(distances.to_vec()))
                .with("nodes", &nodes)
                .with("visited", visited)
        };

        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                format!("Initialize distances from source {}", input.start),
                0,
                state(&distances, &visited),
            )
            .indices([start])
            .explain("Every distance starts at infinity except the source, which is 0.")
            .var("source", input.start),
        );

        while visited.len() < nodes.len() {
            let mut current: Option<(usize, i64)> = None;
            for (i, distance) in distances.iter().enumerate() {
                if visited.contains(&i) {
                    continue;
                }
                recorder.increment_comparisons();
                if let Some(d) = *distance {
                    if current.is_none_or(|(_, best)| d < best) {
                        current = Some((i, d));
                    }
                }
            }

            // Everything left is unreachable.
            let Some((u, dist_u)) = current else {
                break;
            };

            visited.insert(u);
            recorder.increment_operations();
            recorder.record(
                StepDraft::observe(
                    StepType::Highlight,
                    format!("Pick next closest node {}", nodes[u]),
                    1,
                    state(&distances, &visited).with("current", nodes[u]),
                )
                .indices([u])
                .var("node", nodes[u])
                .var("distance", dist_u),
            );

            for edge in input.edges(nodes[u]) {
                let v = index[&edge.to];
                // A sum past i64::MAX cannot improve anything.
                let candidate = dist_u.checked_add(edge.weight);
                recorder.increment_comparisons();

                let before = state(&distances, &visited);
                recorder.record(
                    StepDraft::observe(
                        StepType::Compare,
                        format!("Check path {} -> {} (weight {})", nodes[u], edge.to, edge.weight),
                        2,
                        before.clone(),
                    )
                    .indices([u, v])
                    .var("from", nodes[u])
                    .var("to", edge.to)
                    .var("candidate", candidate)
                    .var("currentBest", distances[v]),
                );

                let improved =
                    candidate.filter(|&c| distances[v].is_none_or(|best| c < best));
                if let Some(candidate) = improved {
                    distances[v] = Some(candidate);
                    recorder.increment_operations();
                    recorder.record(
                        StepDraft::mutate(
                            StepType::Update,
                            format!("Update distance of {} to {}", edge.to, candidate),
                            3,
                            before,
                            state(&distances, &visited),
                        )
                        .indices([v])
                        .var("updatedNode", edge.to)
                        .var("newDistance", candidate),
                    );
                }
            }
        }

        let summary: BTreeMap<String, Option<i64>> = nodes
            .iter()
            .zip(&distances)
            .map(|(n, d)| (n.to_string(), *d))
            .collect();
        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                "Dijkstra complete",
                4,
                state(&distances, &visited).with("complete", true),
            )
            .indices(0..nodes.len())
            .var("distances", summary),
        );
    }
}
