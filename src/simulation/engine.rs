// src/simulation/engine.rs

use crate::core::{DisqError, StateVector};
use crate::operations::Operation;
use num_complex::Complex;
use num_traits::Zero;
use std::f64::consts::FRAC_1_SQRT_2;

/// Checks that an operation's qubits fit in an `num_qubits`-wide circuit and
/// that no control aliases the target.
fn check_operation(op: &Operation, num_qubits: usize) -> Result<(), DisqError> {
    for q in op.involved_qubits() {
        if q >= num_qubits {
            return Err(DisqError::InvalidOperation {
                message: format!("operation qubit {} out of range for {} qubits", q, num_qubits),
            });
        }
    }
    let target = op.target();
    let aliased = match op {
        Operation::Not { .. } | Operation::Hadamard { .. } => false,
        Operation::Toffoli {
            control1, control2, ..
        } => *control1 == target || *control2 == target || control1 == control2,
        Operation::MultiOr { controls, .. } => controls.contains(&target),
        Operation::MultiAnd { controls, .. } => controls.iter().any(|&(q, _)| q == target),
    };
    if aliased {
        return Err(DisqError::InvalidOperation {
            message: format!("operation aliases its target qubit {}", target),
        });
    }
    Ok(())
}

/// For the permutation gates: whether the target flips, given a reader for
/// control-qubit values. `None` for basis-changing gates.
fn flip_predicate<F>(op: &Operation, read: F) -> Option<bool>
where
    F: Fn(usize) -> bool,
{
    match op {
        Operation::Not { .. } => Some(true),
        Operation::Hadamard { .. } => None,
        Operation::Toffoli {
            control1, control2, ..
        } => Some(read(*control1) && read(*control2)),
        Operation::MultiOr { controls, .. } => Some(controls.iter().any(|&q| read(q))),
        Operation::MultiAnd { controls, .. } => {
            Some(controls.iter().all(|&(q, polarity)| read(q) == polarity))
        }
    }
}

/// Bit-exact execution of permutation gates on one basis state.
///
/// Every gate the oracle builders emit (NOT, Toffoli, k-ary OR/AND) permutes
/// the computational basis, so a basis state stays a basis state and a
/// boolean vector is the whole truth. A `Hadamard` has no bit-level meaning
/// and is rejected.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    bits: Vec<bool>,
}

impl SimulationEngine {
    /// Initializes the engine with all qubits at zero.
    pub(crate) fn init(num_qubits: usize) -> Self {
        Self {
            bits: vec![false; num_qubits],
        }
    }

    /// Sets one qubit of the initial state.
    pub(crate) fn set(&mut self, qubit: usize, value: bool) -> Result<(), DisqError> {
        if qubit >= self.bits.len() {
            return Err(DisqError::SimulationError {
                message: format!(
                    "initial value for qubit {} out of range for {} qubits",
                    qubit,
                    self.bits.len()
                ),
            });
        }
        self.bits[qubit] = value;
        Ok(())
    }

    /// Applies a single operation to the bit state.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), DisqError> {
        check_operation(op, self.bits.len())?;
        let flips = flip_predicate(op, |q| self.bits[q]).ok_or_else(|| {
            DisqError::InvalidOperation {
                message: "basis-changing gate has no bit-exact execution".to_string(),
            }
        })?;
        if flips {
            let target = op.target();
            self.bits[target] = !self.bits[target];
        }
        Ok(())
    }

    /// Consumes the engine, yielding the final bits.
    pub(crate) fn into_bits(self) -> Vec<bool> {
        self.bits
    }
}

/// Full complex-amplitude execution.
///
/// Needed only where bits cannot show the effect: observing the global phase
/// written by a phase-flip oracle. Basis indices are little-endian, bit `q`
/// of an index holding qubit `q`.
/// (Internal visibility)
pub(crate) struct StateVectorEngine {
    state: StateVector,
    num_qubits: usize,
}

impl StateVectorEngine {
    /// Wraps an initial state, validating its dimension.
    pub(crate) fn from_state(state: StateVector, num_qubits: usize) -> Result<Self, DisqError> {
        let dim = 1usize
            .checked_shl(num_qubits as u32)
            .ok_or_else(|| DisqError::SimulationError {
                message: "qubit count overflows the statevector dimension".to_string(),
            })?;
        if state.dim() != dim {
            return Err(DisqError::SimulationError {
                message: format!(
                    "statevector dimension {} does not match {} qubits",
                    state.dim(),
                    num_qubits
                ),
            });
        }
        Ok(Self { state, num_qubits })
    }

    /// Applies a single operation to the statevector.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), DisqError> {
        check_operation(op, self.num_qubits)?;
        match op {
            Operation::Hadamard { target } => {
                let mask = 1usize << *target;
                let vec = self.state.vector_mut();
                for index in 0..vec.len() {
                    if index & mask == 0 {
                        let a = vec[index];
                        let b = vec[index | mask];
                        vec[index] = (a + b) * FRAC_1_SQRT_2;
                        vec[index | mask] = (a - b) * FRAC_1_SQRT_2;
                    }
                }
            }
            _ => {
                // A permutation gate moves each amplitude to the basis state
                // with the target bit conditionally flipped.
                let dim = self.state.dim();
                let mask = 1usize << op.target();
                let mut new_vec = vec![Complex::zero(); dim];
                let old = self.state.vector();
                for (index, &amplitude) in old.iter().enumerate() {
                    let flips = flip_predicate(op, |q| (index >> q) & 1 == 1)
                        .unwrap_or(false);
                    let image = if flips { index ^ mask } else { index };
                    new_vec[image] = amplitude;
                }
                self.state = StateVector::new(new_vec);
            }
        }
        Ok(())
    }

    /// Consumes the engine, yielding the final state.
    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toffoli_flips_only_when_both_controls_set() -> Result<(), DisqError> {
        let op = Operation::Toffoli {
            control1: 0,
            control2: 1,
            target: 2,
        };
        let mut engine = SimulationEngine::init(3);
        engine.set(0, true)?;
        engine.apply_operation(&op)?;
        assert_eq!(engine.bits, vec![true, false, false]);
        engine.set(1, true)?;
        engine.apply_operation(&op)?;
        assert_eq!(engine.bits, vec![true, true, true]);
        Ok(())
    }

    #[test]
    fn multi_and_honors_polarities() -> Result<(), DisqError> {
        let op = Operation::MultiAnd {
            controls: vec![(0, true), (1, false)],
            target: 2,
        };
        let mut engine = SimulationEngine::init(3);
        engine.set(0, true)?;
        engine.apply_operation(&op)?;
        assert!(engine.bits[2]);
        Ok(())
    }

    #[test]
    fn bit_engine_rejects_hadamard_and_bad_qubits() {
        let mut engine = SimulationEngine::init(2);
        assert!(engine.apply_operation(&Operation::Hadamard { target: 0 }).is_err());
        assert!(engine.apply_operation(&Operation::Not { target: 2 }).is_err());
        assert!(engine
            .apply_operation(&Operation::MultiOr {
                controls: vec![0, 1],
                target: 1,
            })
            .is_err());
    }

    #[test]
    fn hadamard_pair_is_identity() -> Result<(), DisqError> {
        let initial = StateVector::basis_state(&[true]);
        let mut engine = StateVectorEngine::from_state(initial.clone(), 1)?;
        engine.apply_operation(&Operation::Hadamard { target: 0 })?;
        engine.apply_operation(&Operation::Hadamard { target: 0 })?;
        let state = engine.into_state();
        for (a, b) in state.vector().iter().zip(initial.vector()) {
            assert!((a - b).norm() < 1e-12);
        }
        Ok(())
    }

    #[test]
    fn permutation_gates_move_basis_states() -> Result<(), DisqError> {
        let mut engine =
            StateVectorEngine::from_state(StateVector::basis_state(&[true, true, false]), 3)?;
        engine.apply_operation(&Operation::Toffoli {
            control1: 0,
            control2: 1,
            target: 2,
        })?;
        let state = engine.into_state();
        // |110> with qubit 2 flipped is |111>, basis index 7.
        assert!((state.vector()[7] - Complex::new(1.0, 0.0)).norm() < 1e-12);
        Ok(())
    }
}
