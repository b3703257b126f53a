// src/validation/mod.rs

//! Checks on execution results, built around the one invariant the whole
//! design leans on: everything transient must read zero once an oracle's
//! output is produced.
//!
//! A circuit that leaves garbage in an ancilla register still produces a
//! syntactically valid result, and a phase-flip wrapper around it silently
//! computes wrong answers. These checks make the uncompute obligation an
//! explicit, testable property instead of an assumption.

use crate::core::DisqError;
use crate::simulation::SimulationResult;

/// Checks that the named register reads all-zero in the result.
///
/// # Returns
/// * `Ok(())` if every qubit of the register is zero.
/// * `Err(DisqError::SimulationError)` if any qubit is set or the register
///   does not exist.
pub fn check_register_zero(result: &SimulationResult, name: &str) -> Result<(), DisqError> {
    if result.register_is_zero(name)? {
        Ok(())
    } else {
        Err(DisqError::SimulationError {
            message: format!("register '{}' not returned to zero", name),
        })
    }
}

/// Checks that every register not named in `outputs` reads all-zero.
///
/// For a distance oracle the outputs are `["out"]` and, before any gates
/// run, whatever inputs were loaded; callers list exactly the registers
/// whose final values they claim.
pub fn check_clean(result: &SimulationResult, outputs: &[&str]) -> Result<(), DisqError> {
    for reg in result.registers() {
        if !outputs.contains(&reg.name()) {
            check_register_zero(result, reg.name())?;
        }
    }
    Ok(())
}
