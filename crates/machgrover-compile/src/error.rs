//! Error types for the compilation crate.

use machgrover_ir::{IrError, McxMode};
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR layer.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// A multi-controlled gate carries the wrong number of ancillas.
    #[error("MCX with {num_ctrl} controls in mode {mode} needs {expected} ancillas, got {got}")]
    AncillaMismatch {
        /// Number of controls.
        num_ctrl: usize,
        /// Requested synthesis mode.
        mode: McxMode,
        /// Ancillas the mode consumes.
        expected: usize,
        /// Ancillas actually attached.
        got: usize,
    },

    /// Gray-code synthesis would emit an unreasonable number of gates.
    #[error("MCX with {num_ctrl} controls exceeds the ancilla-free limit of {max}")]
    CircuitTooLarge {
        /// Number of controls.
        num_ctrl: usize,
        /// Largest supported control count.
        max: usize,
    },
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
