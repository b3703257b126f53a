// src/simulation/mod.rs

//! Executes `disq::circuits::Circuit` values.
//!
//! This module contains the `Simulator` entry point and the internal engines
//! that evolve the state. The oracle circuits consist of basis-permutation
//! gates, so their reference execution is bit-exact on boolean registers;
//! the statevector path exists to observe the one effect bits cannot show,
//! the global phase written by a phase-flip oracle.

mod results;
pub(crate) mod engine;

// Re-export the main public interface types
pub use results::SimulationResult;

use crate::circuits::Circuit;
use crate::core::{DisqError, StateVector};
use engine::{SimulationEngine, StateVectorEngine};

/// Executes circuits produced by the synthesis builders.
#[derive(Default)] // Allows Simulator::default() -> Simulator::new()
pub struct Simulator {
    // Execution is deterministic and configuration-free; the struct exists
    // as the stable entry point.
}

impl Simulator {
    /// Creates a new Simulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a circuit bit-exactly.
    ///
    /// `init_regs` names registers and the boolean values to load into them
    /// before execution; every unnamed qubit starts at zero. Fails if the
    /// circuit contains a basis-changing gate, if a named register does not
    /// exist, or if an initializer's length does not match its register.
    pub fn run(
        &self,
        circuit: &Circuit,
        init_regs: &[(&str, &[bool])],
    ) -> Result<SimulationResult, DisqError> {
        let mut engine = SimulationEngine::init(circuit.num_qubits());
        for (name, values) in init_regs {
            let reg = circuit.register(name)?;
            if values.len() != reg.size() {
                return Err(DisqError::SimulationError {
                    message: format!(
                        "initializer for '{}' has {} values, register holds {} qubits",
                        name,
                        values.len(),
                        reg.size()
                    ),
                });
            }
            for (i, &value) in values.iter().enumerate() {
                engine.set(reg.qubit(i), value)?;
            }
        }
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }
        Ok(SimulationResult::new(
            engine.into_bits(),
            circuit.registers().to_vec(),
        ))
    }

    /// Runs a circuit on a full complex statevector.
    ///
    /// Handles every gate, including the basis changes of a phase-flip
    /// wrapper. The initial state's dimension must match the circuit.
    pub fn run_statevector(
        &self,
        circuit: &Circuit,
        initial: &StateVector,
    ) -> Result<StateVector, DisqError> {
        let mut engine = StateVectorEngine::from_state(initial.clone(), circuit.num_qubits())?;
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }
        Ok(engine.into_state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::operations::Operation;

    #[test]
    fn run_initializes_named_registers() -> Result<(), DisqError> {
        let mut b = CircuitBuilder::new();
        let a = b.register("a", 2);
        let out = b.register("out", 1);
        b.push(Operation::Toffoli {
            control1: a.qubit(0),
            control2: a.qubit(1),
            target: out.qubit(0),
        });
        let qc = b.build();

        let sim = Simulator::new();
        let result = sim.run(&qc, &[("a", &[true, true])])?;
        assert_eq!(result.output_bit(), Some(true));
        assert_eq!(result.register_bits("a")?, vec![true, true]);

        let result = sim.run(&qc, &[("a", &[true, false])])?;
        assert_eq!(result.output_bit(), Some(false));
        assert!(result.register_is_zero("out")?);
        Ok(())
    }

    #[test]
    fn run_rejects_bad_initializers() {
        let mut b = CircuitBuilder::new();
        b.register("a", 2);
        let qc = b.build();
        let sim = Simulator::new();
        assert!(sim.run(&qc, &[("missing", &[true])]).is_err());
        assert!(sim.run(&qc, &[("a", &[true])]).is_err());
    }
}
