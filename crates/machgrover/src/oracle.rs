//! Mock phase oracle.
//!
//! The oracle marks a single basis state of the search register with the
//! compute / mark / uncompute pattern:
//!
//! 1. X on every search qubit whose key bit is 0,
//! 2. MCX from the search qubits into the result qubit,
//! 3. undo step 1,
//! 4. Z on the result qubit,
//! 5. steps 1 to 3 again, returning the result qubit to `|0⟩`.
//!
//! The result qubit is the first ancilla. Any further ancillas are handed
//! to the MCX for synthesis and come back unchanged.

use tracing::{debug, info, warn};

use machgrover_ir::{Circuit, McxMode, QubitId};

use crate::error::{GroverError, GroverResult};
use crate::key::TargetKey;

/// Builder for the mock oracle.
///
/// ```
/// use machgrover::{OracleBuilder, TargetKey};
/// use machgrover_ir::McxMode;
///
/// let oracle = OracleBuilder::new(TargetKey::parse("10110").unwrap())
///     .with_ancillas(4)
///     .with_mcx_mode(McxMode::VChain)
///     .build()
///     .unwrap();
/// assert_eq!(oracle.name(), "oracle_5s+4a");
/// assert_eq!(oracle.num_qubits(), 9);
/// ```
#[derive(Debug, Clone)]
pub struct OracleBuilder {
    key: TargetKey,
    n_ancillas: u32,
    mcx_mode: McxMode,
}

impl OracleBuilder {
    /// Start an oracle marking `key`, with one ancilla and the default MCX mode.
    pub fn new(key: TargetKey) -> Self {
        Self {
            key,
            n_ancillas: 1,
            mcx_mode: McxMode::default(),
        }
    }

    /// Set the total number of ancillas, result qubit included.
    #[must_use]
    pub fn with_ancillas(mut self, n_ancillas: u32) -> Self {
        self.n_ancillas = n_ancillas;
        self
    }

    /// Set the requested MCX synthesis mode.
    #[must_use]
    pub fn with_mcx_mode(mut self, mode: McxMode) -> Self {
        self.mcx_mode = mode;
        self
    }

    /// The key this oracle marks.
    pub fn key(&self) -> &TargetKey {
        &self.key
    }

    /// Build the oracle circuit.
    ///
    /// # Errors
    ///
    /// - [`GroverError::InvalidQubitCount`] for an empty key,
    /// - [`GroverError::InsufficientAncillas`] with no ancilla, or with too
    ///   few spare ancillas for [`McxMode::VChain`].
    pub fn build(&self) -> GroverResult<Circuit> {
        let n_search = u32::try_from(self.key.len()).unwrap_or(u32::MAX);
        if n_search < 1 {
            return Err(GroverError::InvalidQubitCount {
                what: "search qubit count",
                got: n_search,
            });
        }
        if self.n_ancillas < 1 {
            return Err(GroverError::InsufficientAncillas {
                required: 1,
                available: self.n_ancillas,
            });
        }

        let mut circuit = Circuit::new(format!("oracle_{n_search}s+{}a", self.n_ancillas));
        let search = circuit.add_qreg("search", n_search);
        let ancillas = circuit.add_qreg("ancilla", self.n_ancillas);
        let result = ancillas[0];
        let spare = &ancillas[1..];

        let mode = resolve_mcx_mode(n_search, self.n_ancillas, self.mcx_mode)?;
        let used = mode.num_ancillas(n_search) as usize;
        let mcx_ancillas = &spare[..used];
        if spare.len() > used {
            debug!(
                "{} spare ancillas left idle by {mode} synthesis",
                spare.len() - used
            );
        }

        let zero_qubits: Vec<QubitId> = self.key.zero_qubits().map(|q| search[q]).collect();
        let mark = |circuit: &mut Circuit| -> GroverResult<()> {
            for &q in &zero_qubits {
                circuit.x(q)?;
            }
            circuit.mcx_with_mode(&search, result, mcx_ancillas, mode)?;
            for &q in &zero_qubits {
                circuit.x(q)?;
            }
            Ok(())
        };

        mark(&mut circuit)?;
        circuit.z(result)?;
        mark(&mut circuit)?;

        info!(
            "Built {} marking {} (mcx mode {mode}, depth {})",
            circuit.name(),
            self.key,
            circuit.depth()
        );
        Ok(circuit)
    }
}

/// Pick the MCX mode the oracle actually uses.
///
/// One or two controls never need ancillas. Recursion without a spare
/// ancilla degrades to the ancilla-free construction; a V-chain without
/// enough clean ancillas is an error.
pub fn resolve_mcx_mode(
    n_search: u32,
    n_ancillas: u32,
    requested: McxMode,
) -> GroverResult<McxMode> {
    if n_search <= 2 {
        return Ok(McxMode::NoAncilla);
    }
    let spare = n_ancillas.saturating_sub(1);
    match requested {
        McxMode::NoAncilla => Ok(McxMode::NoAncilla),
        McxMode::Recursion => {
            if spare < McxMode::Recursion.num_ancillas(n_search) {
                warn!(
                    "MCX with {n_search} controls has no spare ancilla for recursion, \
                     falling back to {}",
                    McxMode::NoAncilla
                );
                Ok(McxMode::NoAncilla)
            } else {
                Ok(McxMode::Recursion)
            }
        }
        McxMode::VChain => {
            let needed = McxMode::VChain.num_ancillas(n_search);
            if spare < needed {
                Err(GroverError::InsufficientAncillas {
                    required: needed + 1,
                    available: n_ancillas,
                })
            } else {
                Ok(McxMode::VChain)
            }
        }
    }
}

/// Create the mock oracle for `key` over `n_search` search qubits and
/// `n_ancillas` ancillas, using the default MCX mode.
///
/// # Errors
///
/// - [`GroverError::InvalidQubitCount`] if `n_search` is zero,
/// - [`GroverError::KeyLengthMismatch`] if the key length differs from `n_search`,
/// - [`GroverError::InvalidKeyCharacter`] if the key is not binary,
/// - [`GroverError::InsufficientAncillas`] if `n_ancillas` is zero.
///
/// # Example
///
/// ```
/// use machgrover::create_mock_oracle;
///
/// let oracle = create_mock_oracle(3, 1, "101").unwrap();
/// assert_eq!(oracle.num_qubits(), 4);
/// assert_eq!(oracle.count_ops()["mcx"], 2);
/// ```
pub fn create_mock_oracle(n_search: u32, n_ancillas: u32, key: &str) -> GroverResult<Circuit> {
    create_mock_oracle_with_mode(n_search, n_ancillas, key, McxMode::default())
}

/// [`create_mock_oracle`] with an explicit MCX mode.
pub fn create_mock_oracle_with_mode(
    n_search: u32,
    n_ancillas: u32,
    key: &str,
    mode: McxMode,
) -> GroverResult<Circuit> {
    if n_search < 1 {
        return Err(GroverError::InvalidQubitCount {
            what: "search qubit count",
            got: n_search,
        });
    }
    let key_len = key.chars().count();
    if key_len != n_search as usize {
        return Err(GroverError::KeyLengthMismatch {
            expected: n_search as usize,
            got: key_len,
        });
    }
    let key = TargetKey::parse(key)?;
    OracleBuilder::new(key)
        .with_ancillas(n_ancillas)
        .with_mcx_mode(mode)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcx_mode(oracle: &Circuit) -> McxMode {
        oracle
            .instructions()
            .find_map(|i| match i.as_standard() {
                Some(machgrover_ir::StandardGate::Mcx { mode, .. }) => Some(*mode),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_layout_and_name() {
        let oracle = create_mock_oracle(4, 2, "1010").unwrap();
        assert_eq!(oracle.name(), "oracle_4s+2a");
        assert_eq!(oracle.num_qubits(), 6);
        assert_eq!(format!("{}", oracle.qubits()[3]), "search[3]");
        assert_eq!(format!("{}", oracle.qubits()[4]), "ancilla[0]");

        // Key 1010 has zeros on qubits 0 and 2: four X layers of two.
        let counts = oracle.count_ops();
        assert_eq!(counts["x"], 8);
        assert_eq!(counts["mcx"], 2);
        assert_eq!(counts["z"], 1);
    }

    #[test]
    fn test_result_qubit_is_mcx_target() {
        let oracle = create_mock_oracle(3, 1, "111").unwrap();
        let mcx = oracle.instructions().find(|i| i.name() == "mcx").unwrap();
        assert_eq!(mcx.qubits, vec![QubitId(0), QubitId(1), QubitId(2), QubitId(3)]);
        assert!(oracle.count_ops().get("x").is_none());
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            create_mock_oracle(0, 1, ""),
            Err(GroverError::InvalidQubitCount { got: 0, .. })
        ));
        assert!(matches!(
            create_mock_oracle(3, 1, "10"),
            Err(GroverError::KeyLengthMismatch {
                expected: 3,
                got: 2
            })
        ));
        assert!(matches!(
            create_mock_oracle(3, 1, "1a0"),
            Err(GroverError::InvalidKeyCharacter { ch: 'a', .. })
        ));
        assert!(matches!(
            create_mock_oracle(3, 0, "101"),
            Err(GroverError::InsufficientAncillas {
                required: 1,
                available: 0
            })
        ));
    }

    #[test]
    fn test_mode_resolution() {
        // Small registers always go ancilla-free.
        let oracle = create_mock_oracle_with_mode(2, 3, "01", McxMode::VChain).unwrap();
        assert_eq!(mcx_mode(&oracle), McxMode::NoAncilla);

        // Four controls recurse without borrowing.
        let oracle = create_mock_oracle(4, 1, "0000").unwrap();
        assert_eq!(mcx_mode(&oracle), McxMode::Recursion);

        // Six controls need a spare ancilla to recurse.
        let oracle = create_mock_oracle(6, 1, "000000").unwrap();
        assert_eq!(mcx_mode(&oracle), McxMode::NoAncilla);
        let oracle = create_mock_oracle(6, 2, "000000").unwrap();
        assert_eq!(mcx_mode(&oracle), McxMode::Recursion);

        assert!(matches!(
            create_mock_oracle_with_mode(5, 3, "00000", McxMode::VChain),
            Err(GroverError::InsufficientAncillas {
                required: 4,
                available: 3
            })
        ));
        let oracle = create_mock_oracle_with_mode(5, 6, "00000", McxMode::VChain).unwrap();
        assert_eq!(mcx_mode(&oracle), McxMode::VChain);
    }
}
