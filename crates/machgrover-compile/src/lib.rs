//! Machgrover Compilation Framework
//!
//! Lowers the logical circuits built by `machgrover` to elementary gates so
//! their decomposed depth can be measured. The design is pass-based: each
//! [`Pass`] rewrites or inspects a [`CircuitDag`](machgrover_ir::CircuitDag)
//! and a [`PassManager`] runs them in order.
//!
//! # Architecture
//!
//! ```text
//! Logical circuit (mcx, ccx, h, ...)
//!       │
//!       ▼
//! ┌─────────────┐
//! │ PassManager │ ◄── PropertySet (flags, pass statistics)
//! └─────────────┘
//!       │
//!       ├── McxSynthesis         (level 0+)
//!       ├── CancelInversePairs   (level 1+)
//!       ├── ToffoliExpansion     (level 2)
//!       └── CancelInversePairs   (level 2)
//!       │
//!       ▼
//! Elementary circuit (h, x, z, cx, cp, ccx / t, tdg)
//! ```
//!
//! # Example
//!
//! ```rust
//! use machgrover_compile::transpile;
//! use machgrover_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("mcx", 4);
//! let controls = [QubitId(0), QubitId(1), QubitId(2)];
//! circuit.mcx(&controls, QubitId(3)).unwrap();
//!
//! let lowered = transpile(&circuit, 0).unwrap();
//! assert!(lowered.count_ops().get("mcx").is_none());
//! assert!(lowered.depth() > circuit.depth());
//! ```
//!
//! # Custom Passes
//!
//! ```rust
//! use machgrover_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use machgrover_ir::CircuitDag;
//!
//! struct CountOps;
//!
//! impl Pass for CountOps {
//!     fn name(&self) -> &str { "count_ops" }
//!     fn kind(&self) -> PassKind { PassKind::Analysis }
//!
//!     fn run(&self, dag: &mut CircuitDag, props: &mut PropertySet) -> CompileResult<()> {
//!         props.insert(dag.num_ops());
//!         Ok(())
//!     }
//! }
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;
pub mod property;

pub use error::{CompileError, CompileResult};
pub use manager::{MAX_OPTIMIZATION_LEVEL, PassManager, PassManagerBuilder, transpile};
pub use pass::{Pass, PassKind};
pub use passes::{CancelInversePairs, McxSynthesis, ToffoliExpansion, synthesize_mcx};
pub use property::{CancellationStats, PropertySet, SynthesisStats};
