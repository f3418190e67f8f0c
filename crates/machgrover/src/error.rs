//! Error types for circuit construction.

use machgrover_compile::CompileError;
use machgrover_ir::IrError;
use thiserror::Error;

/// Errors raised while building oracles, diffusers and Grover circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GroverError {
    /// A qubit count was zero.
    #[error("{what} must be at least 1, got {got}")]
    InvalidQubitCount {
        /// Which count was rejected.
        what: &'static str,
        /// The rejected value.
        got: u32,
    },

    /// The target key does not match the number of search qubits.
    #[error("Target key has {got} bits but the search space has {expected} qubits")]
    KeyLengthMismatch {
        /// Number of search qubits.
        expected: usize,
        /// Length of the key.
        got: usize,
    },

    /// The target key contains something other than `0` or `1`.
    #[error("Invalid character {ch:?} at position {position} of target key")]
    InvalidKeyCharacter {
        /// The offending character.
        ch: char,
        /// Its position in the key, counted from the most significant bit.
        position: usize,
    },

    /// Not enough ancilla qubits for the requested construction.
    #[error("Oracle needs {required} ancilla qubits, got {available}")]
    InsufficientAncillas {
        /// Ancillas required.
        required: u32,
        /// Ancillas provided.
        available: u32,
    },

    /// The search register is wider than the oracle.
    #[error("Cannot search {n_qubits} qubits with an oracle over {oracle_qubits} qubits")]
    SearchSpaceTooWide {
        /// Requested number of search qubits.
        n_qubits: u32,
        /// Total qubits of the oracle circuit.
        oracle_qubits: usize,
    },

    /// Error from the IR layer.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// Error from lowering a circuit.
    #[error("Compilation error: {0}")]
    Compile(#[from] CompileError),
}

/// Result type for circuit construction.
pub type GroverResult<T> = Result<T, GroverError>;
