//! Integration tests for stepwise-engines
//!
//! Drives engines through the catalog and registry the way a front end would,
//! including JSON-shaped input.

use serde_json::json;
use stepwise_engines::trace::{AlgorithmStep, StepType};
use stepwise_engines::{
    AlgorithmId, EngineError, EngineInput, EngineRegistry, PlaybackStatus, PlaybackStore,
};

fn run_json(id: &str, input: serde_json::Value) -> Vec<AlgorithmStep> {
    let registry = EngineRegistry::builtin();
    let descriptor = registry.descriptor(id).unwrap().clone();
    let input: EngineInput = serde_json::from_value(input).unwrap();

    let mut engine = registry.create(id).unwrap();
    engine.initialize(descriptor, input).unwrap();
    engine.generate_steps().unwrap().to_vec()
}

fn last_values(steps: &[AlgorithmStep]) -> Vec<i64> {
    steps
        .last()
        .and_then(|s| s.after_state.data.as_values())
        .unwrap()
        .to_vec()
}

/// Bubble sort on [5,2,8,1,9,3] makes n(n-1)/2 comparisons with no early exit.
#[test]
fn bubble_sort_scenario() {
    let steps = run_json("bubble-sort", json!({"kind": "array", "values": [5, 2, 8, 1, 9, 3]}));
    assert_eq!(last_values(&steps), vec![1, 2, 3, 5, 8, 9]);
    assert_eq!(steps.last().unwrap().metrics.comparison_count, 15);
}

#[test]
fn binary_search_scenario() {
    let steps = run_json(
        "binary-search",
        json!({"kind": "search", "array": [1, 2, 3, 5, 8, 9], "target": 8}),
    );
    let last = steps.last().unwrap();
    assert_eq!(last.after_state.meta("found"), Some(&json!(4)));
}

#[test]
fn stack_scenario() {
    let steps = run_json(
        "stack",
        json!({"kind": "stack", "operations": [
            {"type": "push", "value": 5},
            {"type": "push", "value": 3},
            {"type": "push", "value": 8},
            {"type": "pop"},
            {"type": "push", "value": 1},
        ]}),
    );
    assert_eq!(last_values(&steps), vec![5, 3, 1]);
}

#[test]
fn hash_table_scenario() {
    let steps = run_json(
        "hash-table",
        json!({"kind": "hash_table", "size": 7, "operations": [
            {"type": "set", "key": 10, "value": 100},
            {"type": "set", "key": 20, "value": 200},
            {"type": "get", "key": 10},
            {"type": "delete", "key": 20},
        ]}),
    );

    let inserts: Vec<&AlgorithmStep> = steps.iter().filter(|s| s.kind == StepType::Insert).collect();
    assert_eq!(inserts[0].affected_indices, vec![3]);
    assert_eq!(inserts[1].affected_indices, vec![6]);

    let get_probes = steps
        .iter()
        .filter(|s| s.kind == StepType::Compare && s.pseudocode_line == 2)
        .count();
    assert_eq!(get_probes, 1);

    let table = last_values(&steps);
    assert_eq!(table[6], -1);
    assert_eq!(table[3], 10);
}

#[test]
fn underflow_does_not_count_as_an_operation() {
    let steps = run_json(
        "queue",
        json!({"kind": "queue", "operations": [{"type": "dequeue"}]}),
    );
    let underflows: Vec<_> = steps
        .iter()
        .filter(|s| s.after_state.meta("underflow").is_some())
        .collect();
    assert_eq!(underflows.len(), 1);
    assert_eq!(underflows[0].kind, StepType::Highlight);
    assert_eq!(steps.last().unwrap().metrics.operation_count, 0);
}

#[test]
fn weighted_graph_from_json() {
    let steps = run_json(
        "dijkstra",
        json!({
            "kind": "weighted_graph",
            "start": 1,
            "adjacency": {
                "1": [{"to": 2, "weight": 7}, {"to": 3, "weight": 2}],
                "2": [],
                "3": [{"to": 2, "weight": 3}],
            }
        }),
    );
    let distances = steps
        .last()
        .and_then(|s| s.after_state.data.as_distances())
        .unwrap();
    assert_eq!(distances, &[Some(0), Some(5), Some(2)]);
}

#[test]
fn grid_from_json() {
    let steps = run_json(
        "pathfinding-astar",
        json!({
            "kind": "grid",
            "rows": 3,
            "cols": 3,
            "walls": [[false, false, false], [true, true, false], [false, false, false]],
            "start": [0, 0],
            "end": [2, 0],
            "algorithm": "pathfinding-astar",
        }),
    );
    let last = steps.last().unwrap();
    assert_eq!(last.description, "Path found! Length: 6");
}

#[test]
fn wrong_input_shape_is_rejected_before_any_step() {
    let id = AlgorithmId::MergeSort;
    let mut engine = id.create_engine();
    let err = engine
        .initialize(id.descriptor(), EngineInput::Tree { values: vec![1] })
        .unwrap_err();
    assert!(err.is_input_error());
    assert!(engine.steps().is_empty());
    assert_eq!(
        engine.generate_steps().unwrap_err(),
        EngineError::Uninitialized("generate_steps()")
    );
}

#[test]
fn generate_twice_gives_the_same_steps() {
    let id = AlgorithmId::QuickSort;
    let mut engine = id.create_engine();
    engine
        .initialize(id.descriptor(), EngineInput::Array { values: vec![4, 2, 7, 1] })
        .unwrap();
    let first = engine.generate_steps().unwrap().to_vec();
    let second = engine.generate_steps().unwrap().to_vec();
    assert_eq!(first, second);
}

#[test]
fn steps_serialize_with_camel_case_fields() {
    let steps = run_json("insertion-sort", json!({"kind": "array", "values": [2, 1]}));
    let json = serde_json::to_value(&steps[1]).unwrap();
    for field in ["id", "type", "description", "pseudocodeLine", "affectedIndices", "beforeState", "afterState", "metrics"] {
        assert!(json.get(field).is_some(), "missing {}", field);
    }
    assert!(json["metrics"].get("comparisonCount").is_some());
}

#[test]
fn playback_over_generated_steps() {
    let steps = run_json("linear-search", json!({"kind": "search", "array": [4, 5, 6], "target": 6}));
    let total = steps.len();

    let mut store = PlaybackStore::new();
    store.set_steps(steps);
    store.play();
    while store.tick() {}

    assert_eq!(store.status(), PlaybackStatus::Completed);
    assert_eq!(store.current_step_index(), total - 1);
    assert_eq!(store.current_step().unwrap().after_state.meta("found"), Some(&json!(2)));
}
