//! Step model and recorder for algorithm execution traces.
//!
//! This crate provides the shared vocabulary every step-generation engine emits:
//!
//! - **Types**: `AlgorithmStep`, `DataStructureState`, `StepMetrics` and the
//!   summary `AlgorithmMetrics`
//! - **Recorder**: `StepRecorder`, which stamps ids and cumulative counters onto
//!   each `StepDraft` an engine hands it
//!
//! # Usage
//!
//! ```rust
//! use stepwise_trace::{DataStructureState, StepDraft, StepRecorder, StepType, StructureKind};
//!
//! let mut recorder = StepRecorder::new("O(n)");
//! let state = DataStructureState::values(StructureKind::Array, &[3, 1, 2]);
//!
//! recorder.increment_comparisons();
//! recorder.record(
//!     StepDraft::observe(StepType::Compare, "Comparing 3 and 1", 3, state).indices([0, 1]),
//! );
//!
//! assert_eq!(recorder.steps()[0].id, "step-0");
//! assert_eq!(recorder.steps()[0].metrics.comparison_count, 1);
//! ```

pub mod recorder;
pub mod types;

pub use recorder::{StepDraft, StepRecorder};
pub use types::{
    AlgorithmCategory, AlgorithmDescriptor, AlgorithmMetrics, AlgorithmStep, ComplexityInfo,
    DataStructureState, GridCell, GridSnapshot, Metadata, StateData, StepMetrics, StepType,
    StructureKind,
};
