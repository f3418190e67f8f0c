//! Machgrover Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing the
//! quantum circuits that the Grover builders assemble.
//!
//! # Overview
//!
//! The circuit IR uses a DAG (Directed Acyclic Graph) representation internally,
//! which gives depth computation and compilation passes a wire-level view.
//! The high-level [`Circuit`] API provides a builder pattern for constructing
//! circuits, composing sub-circuits and inverting them.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] and [`Qubit`] with optional register membership
//! - **Gates**: [`StandardGate`] (H, X, CX, CCX, multi-controlled X, ...)
//! - **Instructions**: [`Instruction`] combining gates or barriers with operands
//! - **DAG**: [`CircuitDag`] for the internal graph representation
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example: Phase flip of |11⟩
//!
//! ```rust
//! use machgrover_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("cz_via_cx", 2);
//! circuit.h(QubitId(1)).unwrap();
//! circuit.mcx(&[QubitId(0)], QubitId(1)).unwrap();
//! circuit.h(QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Z` | 1 | Pauli gates |
//! | `T`, `Tdg` | 1 | T and T-dagger gates |
//! | `P` | 1 | Phase gate |
//! | `CX`, `CZ`, `CP` | 2 | Controlled-NOT, controlled-Z, controlled phase |
//! | `CCX` | 3 | Toffoli (CCNOT) gate |
//! | `Mcx` | k+1+a | Multi-controlled X with `a` mode-dependent ancillas |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex};
pub use error::{IrError, IrResult};
pub use gate::{Gate, McxMode, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Qubit, QubitId};
