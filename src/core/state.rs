// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// A complex statevector over the computational basis of `n` qubits.
///
/// Basis indices are little-endian: bit `q` of a basis index holds the value
/// of qubit `q`. The synthesis engine emits permutation gates almost
/// exclusively, so most executions never leave the basis; the full vector
/// exists to observe the one thing bits cannot show, the global phase written
/// by a phase-flip oracle.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Creates a statevector from raw amplitudes. The length must be a power
    /// of two; validation happens where the vector meets an engine.
    pub fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// The basis state |b_{n-1} .. b_1 b_0> for the given qubit values.
    pub fn basis_state(bits: &[bool]) -> Self {
        let dim = 1usize << bits.len();
        let mut amplitudes = vec![Complex::zero(); dim];
        let mut index = 0usize;
        for (q, &bit) in bits.iter().enumerate() {
            if bit {
                index |= 1 << q;
            }
        }
        amplitudes[index] = Complex::new(1.0, 0.0);
        Self { amplitudes }
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states represented.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
