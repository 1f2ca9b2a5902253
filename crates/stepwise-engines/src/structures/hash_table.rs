//! Open-addressing hash table with linear probing.
//!
//! `data` is the key column, `-1` marking an empty slot; the value column
//! rides along in `metadata.values`, so overwriting an existing key is a
//! `highlight` rather than an `update`. Every probe of an occupied slot is a
//! `compare` step. Deletion clears the slot outright, so a probe chain that
//! ran through it is cut short.

use stepwise_trace::{DataStructureState, StepDraft, StepRecorder, StepType, StructureKind};

use super::record_complete;
use crate::engine::{Engine, StepGenerator, mismatch};
use crate::error::{EngineError, Result};
use crate::input::{EngineInput, HashOp};

/// Smallest bucket count the table will use.
pub const MIN_BUCKETS: usize = 3;

const EMPTY: i64 = -1;

pub struct HashTable;

pub type HashTableEngine = Engine<HashTable>;

/// Validated hash-table input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTableInput {
    /// Bucket count, already raised to `MIN_BUCKETS`.
    pub size: usize,
    pub operations: Vec<HashOp>,
}

struct Table {
    keys: Vec<i64>,
    values: Vec<Option<i64>>,
}

/// Where a probe sequence ended.
enum Probe {
    Found(usize),
    Empty(usize),
    Exhausted,
}

impl Table {
    fn new(size: usize) -> Self {
        Self {
            keys: vec![EMPTY; size],
            values: vec![None; size],
        }
    }

    fn state(&self) -> DataStructureState {
        DataStructureState::values(StructureKind::HashTable, &self.keys).with("values", &self.values)
    }

    fn home(&self, key: i64) -> usize {
        (key as u64 % self.keys.len() as u64) as usize
    }

    /// Walk the probe sequence for `key`, one `compare` step per occupied slot.
    fn probe(&self, key: i64, line: u32, recorder: &mut StepRecorder) -> Probe {
        let size = self.keys.len();
        let mut slot = self.home(key);
        for attempt in 0..size {
            let stored = self.keys[slot];
            if stored == EMPTY {
                return Probe::Empty(slot);
            }
            recorder.increment_comparisons();
            recorder.record(
                StepDraft::observe(
                    StepType::Compare,
                    format!("Probe slot {} for key {}", slot, key),
                    line,
                    self.state(),
                )
                .indices([slot])
                .var("key", key)
                .var("slot", slot)
                .var("stored", stored)
                .var("probe", attempt + 1),
            );
            if stored == key {
                return Probe::Found(slot);
            }
            slot = (slot + 1) % size;
        }
        Probe::Exhausted
    }
}

impl StepGenerator for HashTable {
    const NAME: &'static str = "hash-table";
    type Input = HashTableInput;

    fn accept(input: EngineInput) -> Result<Self::Input> {
        let (size, operations) = match input {
            EngineInput::HashTable { size, operations } => (size, operations),
            other => return mismatch(Self::NAME, "hash_table", &other),
        };
        let negative = operations.iter().find_map(|op| {
            let key = match *op {
                HashOp::Set { key, .. } | HashOp::Get { key } | HashOp::Delete { key } => key,
            };
            (key < 0).then_some(key)
        });
        if let Some(key) = negative {
            return Err(EngineError::invalid(
                Self::NAME,
                format!("keys must be non-negative, got {}", key),
            ));
        }
        Ok(HashTableInput {
            size: size.max(MIN_BUCKETS),
            operations,
        })
    }

    fn generate(input: &Self::Input, recorder: &mut StepRecorder) {
        let mut table = Table::new(input.size);

        recorder.record(
            StepDraft::observe(
                StepType::Highlight,
                format!("Hash table initialized with {} buckets", input.size),
                0,
                table.state(),
            )
            .explain(format!(
                "Keys hash to key % {}; a collision moves on to the next slot (linear probing).",
                input.size
            ))
            .var("size", input.size),
        );

        for op in &input.operations {
            match *op {
                HashOp::Set { key, value } => {
                    let home = table.home(key);
                    match table.probe(key, 1, recorder) {
                        Probe::Empty(slot) => {
                            let before = table.state();
                            table.keys[slot] = key;
                            table.values[slot] = Some(value);
                            recorder.increment_operations();
                            recorder.record(
                                StepDraft::mutate(
                                    StepType::Insert,
                                    format!("Set key {} at slot {}", key, slot),
                                    1,
                                    before,
                                    table.state(),
                                )
                                .indices([slot])
                                .var("key", key)
                                .var("value", value)
                                .var("hash", home)
                                .var("slot", slot),
                            );
                        }
                        Probe::Found(slot) => {
                            // The key column is unchanged, so the overwrite is
                            // a highlight; the old value goes in the variables.
                            let previous = table.values[slot].replace(value);
                            recorder.increment_operations();
                            recorder.record(
                                StepDraft::observe(
                                    StepType::Highlight,
                                    format!("Update key {} at slot {}", key, slot),
                                    1,
                                    table.state().with("updated", slot),
                                )
                                .indices([slot])
                                .var("key", key)
                                .var("value", value)
                                .var("previousValue", previous)
                                .var("slot", slot),
                            );
                        }
                        Probe::Exhausted => {
                            recorder.record(
                                StepDraft::observe(
                                    StepType::Highlight,
                                    format!("Table full, cannot set key {}", key),
                                    1,
                                    table.state().with("overflow", true),
                                )
                                .var("key", key)
                                .var("value", value),
                            );
                        }
                    }
                }
                HashOp::Get { key } => {
                    let found = match table.probe(key, 2, recorder) {
                        Probe::Found(slot) => Some(slot),
                        Probe::Empty(_) | Probe::Exhausted => None,
                    };
                    let description = match found {
                        Some(slot) => format!("Key {} found at slot {}", key, slot),
                        None => format!("Key {} not found", key),
                    };
                    let value = found.and_then(|slot| table.values[slot]);
                    recorder.record(
                        StepDraft::observe(
                            StepType::Highlight,
                            description,
                            3,
                            table.state().with("found", found),
                        )
                        .indices(found)
                        .var("key", key)
                        .var("found", found)
                        .var("value", value),
                    );
                }
                HashOp::Delete { key } => match table.probe(key, 4, recorder) {
                    Probe::Found(slot) => {
                        let before = table.state();
                        table.keys[slot] = EMPTY;
                        table.values[slot] = None;
                        recorder.increment_operations();
                        recorder.record(
                            StepDraft::mutate(
                                StepType::Delete,
                                format!("Delete key {} from slot {}", key, slot),
                                4,
                                before,
                                table.state(),
                            )
                            .indices([slot])
                            .var("key", key)
                            .var("slot", slot),
                        );
                    }
                    Probe::Empty(_) | Probe::Exhausted => {
                        recorder.record(
                            StepDraft::observe(
                                StepType::Highlight,
                                format!("Key {} not found for deletion", key),
                                4,
                                table.state(),
                            )
                            .var("key", key),
                        );
                    }
                },
            }
        }

        record_complete(
            recorder,
            "Hash table operations complete".to_string(),
            5,
            table.state(),
        );
    }
}
