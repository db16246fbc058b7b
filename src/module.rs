//! The contract between a processing stage and the pipeline driving it.

use crate::error::FrameError;
use crate::signal::SignalBank;

/// A block-based processing stage.
///
/// The pipeline calls [`Module::initialize`] once with a descriptor of the
/// input it will deliver, then [`Module::process`] once per input block.
/// Results are published through [`Module::output`]; a downstream stage
/// should only consume the output when its trigger is set.
pub trait Module {
    /// Short, human readable name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Validate the configuration against `input` and allocate all storage.
    fn initialize(&mut self, input: &SignalBank) -> Result<(), FrameError>;

    /// Consume one block of input and update [`Module::output`].
    fn process(&mut self, input: &SignalBank) -> Result<(), FrameError>;

    /// Return to the state right after a successful `initialize` without
    /// reallocating.
    fn reset(&mut self);

    fn output(&self) -> &SignalBank;

    fn is_initialized(&self) -> bool {
        self.output().n_channels() > 0
    }
}
