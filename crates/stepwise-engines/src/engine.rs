//! Engine lifecycle.
//!
//! `AlgorithmEngine` is the object-safe contract callers drive:
//! `initialize` → `generate_steps` → `metrics`. Each algorithm only supplies a
//! `StepGenerator` (input validation plus the step-emitting run); `Engine<G>`
//! composes it with a `StepRecorder` and owns the lifecycle bookkeeping.

use std::fmt;
use std::marker::PhantomData;

use stepwise_trace::{AlgorithmDescriptor, AlgorithmMetrics, AlgorithmStep, StepRecorder};
use tracing::{debug, warn};

use crate::error::{EngineError, Result};
use crate::input::EngineInput;

/// A step-generation engine.
///
/// One generation pass per `initialize`; instances are not meant to be shared
/// across concurrent callers.
pub trait AlgorithmEngine: Send {
    /// Name of the algorithm family this engine implements.
    fn name(&self) -> &'static str;

    /// Store descriptor and input, validate the input and reset all counters.
    ///
    /// An invalid input leaves the engine uninitialized.
    fn initialize(&mut self, descriptor: AlgorithmDescriptor, input: EngineInput) -> Result<()>;

    /// Run the algorithm to completion and return every step, in order.
    fn generate_steps(&mut self) -> Result<&[AlgorithmStep]>;

    /// Steps produced by the last generation pass.
    fn steps(&self) -> &[AlgorithmStep];

    /// Summary counters for the last generation pass.
    fn metrics(&self) -> Result<AlgorithmMetrics>;

    /// The descriptor passed to `initialize`, if any.
    fn descriptor(&self) -> Option<&AlgorithmDescriptor>;
}

/// The algorithm-specific half of an engine.
pub trait StepGenerator {
    /// Name used in logs and validation errors.
    const NAME: &'static str;

    /// Validated, engine-owned form of the input.
    type Input: Send;

    /// Validate and convert the caller's input. No step may exist yet.
    fn accept(input: EngineInput) -> Result<Self::Input>;

    /// Run the algorithm, routing every step through `recorder`.
    fn generate(input: &Self::Input, recorder: &mut StepRecorder);
}

/// Lifecycle wrapper shared by every engine.
pub struct Engine<G: StepGenerator> {
    descriptor: Option<AlgorithmDescriptor>,
    input: Option<G::Input>,
    recorder: StepRecorder,
    _generator: PhantomData<fn() -> G>,
}

impl<G: StepGenerator> Engine<G> {
    /// Create an uninitialized engine.
    pub fn new() -> Self {
        Self {
            descriptor: None,
            input: None,
            recorder: StepRecorder::default(),
            _generator: PhantomData,
        }
    }

    /// The validated input, if initialized.
    pub fn input(&self) -> Option<&G::Input> {
        self.input.as_ref()
    }
}

impl<G: StepGenerator> Default for Engine<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: StepGenerator> fmt::Debug for Engine<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("algorithm", &G::NAME)
            .field("initialized", &self.input.is_some())
            .field("steps", &self.recorder.len())
            .finish()
    }
}

impl<G: StepGenerator> AlgorithmEngine for Engine<G> {
    fn name(&self) -> &'static str {
        G::NAME
    }

    fn initialize(&mut self, descriptor: AlgorithmDescriptor, input: EngineInput) -> Result<()> {
        self.descriptor = None;
        self.input = None;
        self.recorder = StepRecorder::default();

        let accepted = G::accept(input).inspect_err(|e| {
            warn!(algorithm = G::NAME, error = %e, "Rejected engine input");
        })?;

        self.recorder = StepRecorder::new(descriptor.time_complexity.average.clone());
        self.descriptor = Some(descriptor);
        self.input = Some(accepted);
        Ok(())
    }

    fn generate_steps(&mut self) -> Result<&[AlgorithmStep]> {
        let input = self
            .input
            .as_ref()
            .ok_or(EngineError::Uninitialized("generate_steps()"))?;

        self.recorder.reset();
        G::generate(input, &mut self.recorder);

        debug!(
            algorithm = G::NAME,
            steps = self.recorder.len(),
            operations = self.recorder.operation_count(),
            comparisons = self.recorder.comparison_count(),
            "Generated steps"
        );

        Ok(self.recorder.steps())
    }

    fn steps(&self) -> &[AlgorithmStep] {
        self.recorder.steps()
    }

    fn metrics(&self) -> Result<AlgorithmMetrics> {
        let descriptor = self
            .descriptor
            .as_ref()
            .ok_or(EngineError::Uninitialized("metrics()"))?;
        Ok(self.recorder.summarize(descriptor))
    }

    fn descriptor(&self) -> Option<&AlgorithmDescriptor> {
        self.descriptor.as_ref()
    }
}

/// Build the error for an input of the wrong shape.
pub(crate) fn mismatch<T>(algorithm: &str, expected: &str, got: &EngineInput) -> Result<T> {
    Err(EngineError::invalid(
        algorithm,
        format!("expected {} input, got {}", expected, got.kind_name()),
    ))
}
