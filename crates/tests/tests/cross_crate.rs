//! Cross-crate integration tests
//!
//! These tests verify that the step model, the engines and the playback
//! store work together, including engines defined outside stepwise-engines.

use proptest::prelude::*;
use stepwise_engines::{
    AlgorithmEngine, AlgorithmId, Engine, EngineError, EngineInput, EngineRegistry, PlaybackStatus,
    PlaybackStore, Result, StepGenerator,
};
use stepwise_trace::{
    AlgorithmCategory, AlgorithmDescriptor, AlgorithmStep, ComplexityInfo, DataStructureState,
    StepDraft, StepRecorder, StepType, StructureKind,
};

/// Reverses an array by swapping from both ends.
struct Reverse;

impl StepGenerator for Reverse {
    const NAME: &'static str = "reverse";
    type Input = Vec<i64>;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        match input {
            EngineInput::Array { values } => Ok(values),
            other => Err(EngineError::invalid(
                Self::NAME,
                format!("expected array input, got {}", other.kind_name()),
            )),
        }
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let mut arr = input.clone();
        let n = arr.len();
        for i in 0..n / 2 {
            let before = DataStructureState::values(StructureKind::Array, &arr);
            arr.swap(i, n - 1 - i);
            recorder.record_write(
                StepDraft::mutate(
                    StepType::Swap,
                    format!("Swap {} and {}", i, n - 1 - i),
                    1,
                    before,
                    DataStructureState::values(StructureKind::Array, &arr),
                )
                .indices([i, n - 1 - i]),
            );
        }
        recorder.record(StepDraft::observe(
            StepType::Highlight,
            "Reversed",
            2,
            DataStructureState::values(StructureKind::Array, &arr).with("complete", true),
        ));
    }
}

fn reverse_descriptor() -> AlgorithmDescriptor {
    AlgorithmDescriptor {
        id: "reverse".to_string(),
        name: "Reverse".to_string(),
        category: AlgorithmCategory::Sorting,
        time_complexity: ComplexityInfo::uniform("O(n)"),
        space_complexity: ComplexityInfo::uniform("O(1)"),
    }
}

fn run(id: AlgorithmId, input: EngineInput) -> Vec<AlgorithmStep> {
    let mut engine = id.create_engine();
    engine.initialize(id.descriptor(), input).unwrap();
    engine.generate_steps().unwrap().to_vec()
}

/// A generator defined in another crate plugs into the registry like the
/// built-in ones.
#[test]
fn test_external_engine_in_registry() {
    let mut registry = EngineRegistry::new();
    registry.register(reverse_descriptor(), || Box::new(Engine::<Reverse>::new()));
    assert_eq!(registry.ids(), vec!["reverse"]);

    let mut engine = registry.create("reverse").unwrap();
    engine
        .initialize(reverse_descriptor(), EngineInput::Array { values: vec![1, 2, 3, 4, 5] })
        .unwrap();
    let steps = engine.generate_steps().unwrap();

    assert_eq!(steps.len(), 3);
    assert_eq!(
        steps.last().unwrap().after_state.data.as_values(),
        Some(&[5, 4, 3, 2, 1][..])
    );
    let metrics = engine.metrics().unwrap();
    assert_eq!(metrics.total_operations, 2);
    assert_eq!(metrics.time_complexity.average, "O(n)");

    assert!(registry.create("bubble-sort").is_err());

    // a palindrome swaps equal values only
    let mut engine = registry.create("reverse").unwrap();
    engine
        .initialize(reverse_descriptor(), EngineInput::Array { values: vec![7, 1, 7] })
        .unwrap();
    let steps = engine.generate_steps().unwrap();
    assert!(steps.iter().all(|s| s.kind == StepType::Highlight));
    assert_eq!(engine.metrics().unwrap().total_operations, 0);
}

/// Serialized steps read back into the trace types unchanged, for every
/// family of state payload.
#[test]
fn test_steps_survive_json() {
    let cases = [
        run(AlgorithmId::MergeSort, EngineInput::Array { values: vec![3, 1, 2] }),
        run(
            AlgorithmId::Dijkstra,
            serde_json::from_value(serde_json::json!({
                "kind": "weighted_graph",
                "start": 0,
                "adjacency": {"0": [{"to": 1, "weight": 3}], "1": [], "2": []}
            }))
            .unwrap(),
        ),
        run(
            AlgorithmId::PathfindingBfs,
            EngineInput::Grid(stepwise_engines::GridSpec::open(
                3,
                4,
                (0, 0),
                (2, 3),
                stepwise_engines::PathfindingVariant::Bfs,
            )),
        ),
    ];
    for steps in cases {
        let json = serde_json::to_string(&steps).unwrap();
        let back: Vec<AlgorithmStep> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, steps);
    }
}

/// Every catalog engine runs on the input shape its category implies, and its
/// last step carries the final summary counters.
#[test]
fn test_every_catalog_engine_runs() {
    let registry = EngineRegistry::builtin();
    for id in AlgorithmId::ALL {
        let input = match id.category() {
            AlgorithmCategory::Sorting => EngineInput::Array { values: vec![3, 1, 2] },
            AlgorithmCategory::Searching => EngineInput::Search {
                array: vec![1, 2, 3],
                target: 2,
            },
            AlgorithmCategory::DataStructure => match id {
                AlgorithmId::Stack => EngineInput::Stack { operations: vec![] },
                AlgorithmId::Queue => EngineInput::Queue { operations: vec![] },
                AlgorithmId::LinkedList => EngineInput::LinkedList { operations: vec![] },
                AlgorithmId::BinaryTree => EngineInput::Tree { values: vec![2, 1] },
                _ => EngineInput::HashTable {
                    size: 5,
                    operations: vec![],
                },
            },
            AlgorithmCategory::Graph => match id.pathfinding_variant() {
                Some(variant) => EngineInput::Grid(stepwise_engines::GridSpec::open(
                    2,
                    2,
                    (0, 0),
                    (1, 1),
                    variant,
                )),
                None if id == AlgorithmId::Dijkstra => serde_json::from_value(serde_json::json!({
                    "kind": "weighted_graph",
                    "start": 0,
                    "adjacency": {"0": []}
                }))
                .unwrap(),
                None => serde_json::from_value(serde_json::json!({
                    "kind": "graph",
                    "start": 0,
                    "adjacency": {"0": []}
                }))
                .unwrap(),
            },
        };

        let descriptor = registry.descriptor(id.as_str()).unwrap().clone();
        let mut engine = registry.create(id.as_str()).unwrap();
        engine.initialize(descriptor, input).unwrap();
        let steps = engine.generate_steps().unwrap().to_vec();
        assert!(!steps.is_empty(), "{} produced no steps", id);

        let metrics = engine.metrics().unwrap();
        let last = steps.last().unwrap();
        assert_eq!(metrics.execution_steps, steps.len(), "{}", id);
        assert_eq!(metrics.total_operations, last.metrics.operation_count, "{}", id);
        assert_eq!(metrics.total_comparisons, last.metrics.comparison_count, "{}", id);
        assert!(
            steps.iter().all(|s| s.metrics.memory_usage <= metrics.peak_memory_usage),
            "{}",
            id
        );
    }
}

#[test]
fn test_playback_walks_a_sort() {
    let steps = run(AlgorithmId::SelectionSort, EngineInput::Array { values: vec![3, 2, 1] });
    let mut store = PlaybackStore::new();
    store.set_steps(steps.clone());
    store.set_speed(2.0);

    store.play();
    let mut seen = vec![store.current_step().unwrap().id.clone()];
    while store.tick() {
        seen.push(store.current_step().unwrap().id.clone());
    }
    let ids: Vec<_> = steps.iter().map(|s| s.id.clone()).collect();
    assert_eq!(seen, ids);
    assert_eq!(store.status(), PlaybackStatus::Completed);

    store.step_backward();
    assert_eq!(store.status(), PlaybackStatus::Paused);
    assert_eq!(store.current_step_index(), steps.len() - 2);
}

proptest! {
    /// Steps from any sort replay: each step starts where the previous one
    /// ended.
    #[test]
    fn prop_sort_steps_chain(values in prop::collection::vec(-30i64..30, 0..12)) {
        for id in [AlgorithmId::MergeSort, AlgorithmId::QuickSort, AlgorithmId::HeapSort] {
            let steps = run(id, EngineInput::Array { values: values.clone() });
            for pair in steps.windows(2) {
                prop_assert_eq!(&pair[0].after_state.data, &pair[1].before_state.data);
            }
        }
    }
}
