//! Built-in compilation passes.

mod cancel;
mod mcx;
mod toffoli;

pub use cancel::CancelInversePairs;
pub use mcx::{MAX_GRAY_CODE_CONTROLS, McxSynthesis, synthesize_mcx};
pub use toffoli::{ToffoliExpansion, expand_ccx};
