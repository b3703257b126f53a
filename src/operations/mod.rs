// src/operations/mod.rs

//! Defines the reversible primitives the synthesis engine emits.
//!
//! The gate set is deliberately small: NOT, Hadamard, pairwise AND (Toffoli),
//! and k-ary OR/AND that XOR their result into a target qubit. Every gate in
//! the set is its own inverse, which is what makes the compute/uncompute
//! discipline of the oracle builders a matter of replaying the same gates.

use std::fmt;

/// A single reversible operation on named qubit positions.
///
/// All variants except `Hadamard` permute the computational basis: they XOR a
/// boolean function of the control qubits into the target. `Hadamard` appears
/// only in the polarity adapter that turns a bit-flip oracle into a
/// phase-flip oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Flip the target qubit (X).
    Not {
        /// The qubit to flip.
        target: usize,
    },

    /// Basis change on the target qubit (H). Self-inverse.
    Hadamard {
        /// The qubit to rotate.
        target: usize,
    },

    /// XOR the conjunction of two controls into the target (CCX).
    Toffoli {
        /// First control qubit.
        control1: usize,
        /// Second control qubit.
        control2: usize,
        /// The qubit receiving the conjunction.
        target: usize,
    },

    /// XOR the disjunction of the controls into the target.
    MultiOr {
        /// Control qubits, read positively.
        controls: Vec<usize>,
        /// The qubit receiving the disjunction.
        target: usize,
    },

    /// XOR a conjunction of literals into the target. Each control carries a
    /// polarity: `true` asserts the qubit, `false` asserts its negation.
    MultiAnd {
        /// `(qubit, polarity)` literals.
        controls: Vec<(usize, bool)>,
        /// The qubit receiving the conjunction.
        target: usize,
    },
}

impl Operation {
    /// All qubit positions mentioned by this operation, target last.
    pub fn involved_qubits(&self) -> Vec<usize> {
        match self {
            Operation::Not { target } | Operation::Hadamard { target } => vec![*target],
            Operation::Toffoli {
                control1,
                control2,
                target,
            } => vec![*control1, *control2, *target],
            Operation::MultiOr { controls, target } => {
                let mut qubits = controls.clone();
                qubits.push(*target);
                qubits
            }
            Operation::MultiAnd { controls, target } => {
                let mut qubits: Vec<usize> = controls.iter().map(|&(q, _)| q).collect();
                qubits.push(*target);
                qubits
            }
        }
    }

    /// The qubit this operation writes.
    pub fn target(&self) -> usize {
        match self {
            Operation::Not { target }
            | Operation::Hadamard { target }
            | Operation::Toffoli { target, .. }
            | Operation::MultiOr { target, .. }
            | Operation::MultiAnd { target, .. } => *target,
        }
    }

    /// The inverse operation. Total on the description: every gate in this
    /// set is self-inverse, so the inverse is a copy, but callers go through
    /// this method rather than assuming it.
    pub fn inverse(&self) -> Operation {
        self.clone()
    }

    /// The same operation with every qubit position `q` replaced by `map[q]`.
    /// Used when composing a circuit into a larger one. Returns `None` if any
    /// position falls outside the map.
    pub(crate) fn remapped(&self, map: &[usize]) -> Option<Operation> {
        let get = |q: usize| map.get(q).copied();
        match self {
            Operation::Not { target } => Some(Operation::Not {
                target: get(*target)?,
            }),
            Operation::Hadamard { target } => Some(Operation::Hadamard {
                target: get(*target)?,
            }),
            Operation::Toffoli {
                control1,
                control2,
                target,
            } => Some(Operation::Toffoli {
                control1: get(*control1)?,
                control2: get(*control2)?,
                target: get(*target)?,
            }),
            Operation::MultiOr { controls, target } => Some(Operation::MultiOr {
                controls: controls.iter().map(|&q| get(q)).collect::<Option<_>>()?,
                target: get(*target)?,
            }),
            Operation::MultiAnd { controls, target } => Some(Operation::MultiAnd {
                controls: controls
                    .iter()
                    .map(|&(q, pol)| get(q).map(|m| (m, pol)))
                    .collect::<Option<_>>()?,
                target: get(*target)?,
            }),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Not { target } => write!(f, "X q{}", target),
            Operation::Hadamard { target } => write!(f, "H q{}", target),
            Operation::Toffoli {
                control1,
                control2,
                target,
            } => write!(f, "CCX q{} q{} -> q{}", control1, control2, target),
            Operation::MultiOr { controls, target } => {
                write!(f, "OR(")?;
                for (i, q) in controls.iter().enumerate() {
                    write!(f, "{}q{}", if i > 0 { " " } else { "" }, q)?;
                }
                write!(f, ") -> q{}", target)
            }
            Operation::MultiAnd { controls, target } => {
                write!(f, "AND(")?;
                for (i, (q, pol)) in controls.iter().enumerate() {
                    write!(
                        f,
                        "{}{}q{}",
                        if i > 0 { " " } else { "" },
                        if *pol { "" } else { "!" },
                        q
                    )?;
                }
                write!(f, ") -> q{}", target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn involved_qubits_lists_target_last() {
        let op = Operation::MultiAnd {
            controls: vec![(0, true), (2, false)],
            target: 5,
        };
        assert_eq!(op.involved_qubits(), vec![0, 2, 5]);
        assert_eq!(op.target(), 5);
    }

    #[test]
    fn inverse_is_identity_on_this_gate_set() {
        let ops = [
            Operation::Not { target: 0 },
            Operation::Hadamard { target: 1 },
            Operation::Toffoli {
                control1: 0,
                control2: 1,
                target: 2,
            },
            Operation::MultiOr {
                controls: vec![0, 1, 2],
                target: 3,
            },
        ];
        for op in &ops {
            assert_eq!(&op.inverse(), op);
        }
    }

    #[test]
    fn remap_follows_the_map() {
        let op = Operation::Toffoli {
            control1: 0,
            control2: 1,
            target: 2,
        };
        let mapped = op.remapped(&[4, 7, 5]).unwrap();
        assert_eq!(
            mapped,
            Operation::Toffoli {
                control1: 4,
                control2: 7,
                target: 5,
            }
        );
        assert!(op.remapped(&[4, 7]).is_none());
    }
}
