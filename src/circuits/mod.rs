// src/circuits/mod.rs

//! Reversible circuits as ordered sequences of operations over named
//! registers.
//!
//! A `Circuit` is an immutable-once-built description: qubit count, a table
//! of named contiguous registers, and the gate sequence. `inverse` and
//! `append` are total functions on this description, which is what lets the
//! oracle builders embed a sub-circuit and later its exact inverse without
//! any runtime reflection.

use crate::core::{DisqError, Register};
use crate::operations::Operation;
use std::fmt;

/// An ordered sequence of reversible operations over a fixed set of qubits,
/// partitioned into named registers.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    registers: Vec<Register>,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit with no qubits.
    pub fn new() -> Self {
        Self {
            num_qubits: 0,
            registers: Vec::new(),
            operations: Vec::new(),
        }
    }

    pub(crate) fn with_registers(registers: Vec<Register>, num_qubits: usize) -> Self {
        Self {
            num_qubits,
            registers,
            operations: Vec::new(),
        }
    }

    /// Total number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The register table, in allocation order.
    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    /// Find the named register.
    pub fn register(&self, name: &str) -> Result<&Register, DisqError> {
        self.registers
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| DisqError::InvalidOperation {
                message: format!("no register named '{}'", name),
            })
    }

    /// Adds a single operation to the end of the sequence. Qubit positions
    /// are validated when the circuit is executed or composed.
    pub fn add_operation(&mut self, op: Operation) {
        self.operations.push(op);
    }

    /// Adds multiple operations from an iterator to the end of the sequence.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// Composes `other` into this circuit: `other`'s qubit `q` acts on this
    /// circuit's qubit `qubit_map[q]`. The map must cover all of `other`'s
    /// qubits, stay in range, and not alias two wires onto one qubit.
    pub fn append(&mut self, other: &Circuit, qubit_map: &[usize]) -> Result<(), DisqError> {
        if qubit_map.len() != other.num_qubits() {
            return Err(DisqError::InvalidOperation {
                message: format!(
                    "qubit map covers {} qubits, sub-circuit has {}",
                    qubit_map.len(),
                    other.num_qubits()
                ),
            });
        }
        let mut used = vec![false; self.num_qubits];
        for &q in qubit_map {
            if q >= self.num_qubits {
                return Err(DisqError::InvalidOperation {
                    message: format!("qubit map entry {} out of range for {} qubits", q, self.num_qubits),
                });
            }
            if used[q] {
                return Err(DisqError::InvalidOperation {
                    message: format!("qubit map aliases qubit {}", q),
                });
            }
            used[q] = true;
        }
        for op in other.operations() {
            let mapped = op.remapped(qubit_map).ok_or_else(|| DisqError::InvalidOperation {
                message: "sub-circuit operation outside its own qubit range".to_string(),
            })?;
            self.operations.push(mapped);
        }
        Ok(())
    }

    /// The inverse circuit: operations in reverse order, each inverted. The
    /// register table is unchanged.
    pub fn inverse(&self) -> Circuit {
        Circuit {
            num_qubits: self.num_qubits,
            registers: self.registers.clone(),
            operations: self.operations.iter().rev().map(Operation::inverse).collect(),
        }
    }

    /// The ordered operation sequence.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Total number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "disq::Circuit[{} operations on {} qubits]",
            self.operations.len(),
            self.num_qubits
        )?;
        for reg in &self.registers {
            writeln!(f, "  {}", reg)?;
        }
        for op in &self.operations {
            writeln!(f, "  {}", op)?;
        }
        Ok(())
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper for constructing `Circuit` instances: allocate named registers,
/// obtaining their qubit ranges for use while emitting gates, then push
/// operations and build.
pub struct CircuitBuilder {
    num_qubits: usize,
    registers: Vec<Register>,
    operations: Vec<Operation>,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self {
            num_qubits: 0,
            registers: Vec::new(),
            operations: Vec::new(),
        }
    }

    /// Allocates a named register of the given size directly after the
    /// qubits allocated so far, and returns its range for addressing.
    pub fn register(&mut self, name: &str, size: usize) -> Register {
        let reg = Register::new(name, self.num_qubits, size);
        self.num_qubits += size;
        self.registers.push(reg.clone());
        reg
    }

    /// Appends a single operation.
    pub fn push(&mut self, op: Operation) {
        self.operations.push(op);
    }

    /// Appends multiple operations from an iterator.
    pub fn extend<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(ops);
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        let mut circuit = Circuit::with_registers(self.registers, self.num_qubits);
        circuit.add_operations(self.operations);
        circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}
