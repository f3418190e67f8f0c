//! Machgrover: Grover search circuit construction.
//!
//! Builds the circuits of Grover's algorithm on top of the
//! [`machgrover_ir`] circuit representation:
//!
//! - [`build_diffuser`]: reflection about the uniform superposition,
//! - [`create_mock_oracle`] / [`OracleBuilder`]: a phase oracle marking one
//!   basis state given as a bit-string [`TargetKey`],
//! - [`build_grover_circuit`]: initial Hadamard layer followed by rounds of
//!   oracle and diffuser,
//! - [`optimal_iterations`] and the [`GroverSearch`] convenience type.
//!
//! Circuits come out at the logical level, with multi-controlled X gates
//! intact. [`decompose`] lowers them to elementary gates through
//! [`machgrover_compile`].
//!
//! # Example
//!
//! ```rust
//! use machgrover::{build_grover_circuit, create_mock_oracle, decompose, optimal_iterations};
//!
//! let oracle = create_mock_oracle(4, 2, "1010").unwrap();
//! let grover = build_grover_circuit(4, optimal_iterations(4), &oracle).unwrap();
//! assert_eq!(grover.num_qubits(), 6);
//!
//! let lowered = decompose(&grover, 1).unwrap();
//! assert!(lowered.depth() > grover.depth());
//! ```

pub mod diffuser;
pub mod error;
pub mod grover;
pub mod key;
pub mod oracle;

pub use diffuser::build_diffuser;
pub use error::{GroverError, GroverResult};
pub use grover::{GroverSearch, build_grover_circuit, decompose, optimal_iterations};
pub use key::TargetKey;
pub use oracle::{OracleBuilder, create_mock_oracle, create_mock_oracle_with_mode, resolve_mcx_mode};
