//! Search engines.
//!
//! Every snapshot carries `metadata.target`. A miss is a normal outcome,
//! reported by a closing `highlight` with `notFound = true`.

mod binary;
mod linear;

pub use binary::{BinarySearch, BinarySearchEngine};
pub use linear::{LinearSearch, LinearSearchEngine};

use stepwise_trace::{DataStructureState, StructureKind};

use crate::engine::mismatch;
use crate::error::Result;
use crate::input::EngineInput;

/// Array to scan plus the value sought.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    pub array: Vec<i64>,
    pub target: i64,
}

impl SearchInput {
    fn state(&self) -> DataStructureState {
        DataStructureState::values(StructureKind::Array, &self.array).with("target", self.target)
    }
}

pub(crate) fn accept_search(algorithm: &str, input: EngineInput) -> Result<SearchInput> {
    match input {
        EngineInput::Search { array, target } => Ok(SearchInput { array, target }),
        other => mismatch(algorithm, "search", &other),
    }
}
