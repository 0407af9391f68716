//! Error types for sessions and frames.

use localframe_core::TypeError;
use localframe_emulator::EmulationError;

/// Errors produced by [`Session`](crate::Session) and
/// [`LocalFrame`](crate::LocalFrame).
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Row or schema inference failed.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Aggregate evaluation failed.
    #[error(transparent)]
    Emulation(#[from] EmulationError),

    /// Two columns of a frame share a name.
    #[error("duplicate column name '{name}'")]
    DuplicateColumn { name: String },

    /// Arrow export failed.
    #[cfg(feature = "arrow")]
    #[error(transparent)]
    Arrow(#[from] localframe_arrow::ArrowConvertError),
}
