// src/lib.rs

//! `disq` - reversible-circuit oracles for graph distance profiles
//!
//! This library synthesizes reversible boolean circuits that decide, for an
//! undirected graph given as an edge-existence vector, whether the graph's
//! pairwise shortest-path lengths match a target profile. The resulting
//! decision circuit can be wrapped into a phase-flip oracle and handed to an
//! amplitude-amplification search over the space of all graphs on a fixed
//! vertex set. A classical evaluator mirrors the same layered formula in
//! plain boolean logic and is the ground truth the circuits are tested
//! against.

pub mod core;
pub mod indexing;
pub mod operations;
pub mod circuits;
pub mod profile;
pub mod synthesis;
pub mod classical;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use core::{DisqError, Register, StateVector};
pub use indexing::{EdgeIndexing, LayerTerms, Operand, PathIndexing};
pub use operations::Operation;
pub use circuits::{Circuit, CircuitBuilder};
pub use profile::{
    DistanceMatrix, DistanceProfile, FlagMask, ProfileGroup, merged_profile, per_origin_profiles,
};
pub use synthesis::{
    distance_check_circuit, grouped_distance_check_circuit, paths_circuit, phase_oracle,
};
pub use simulation::{SimulationResult, Simulator};
pub use validation::{check_clean, check_register_zero};

// Example 1: Distance oracle for a 3-vertex path graph
// Builds the decision circuit for the profile of the graph 0 - 1 - 2 and
// runs it on the graph's own edge vector; the classical evaluator agrees
// and the circuit leaves its working registers at zero.
/// ```
/// use disq::{classical, DisqError, DistanceProfile, PathIndexing, Simulator};
/// use disq::synthesis::distance_check_circuit;
///
/// fn main() -> Result<(), DisqError> {
///     let ix = PathIndexing::new(3)?;
///     let profile = DistanceProfile::new(vec![
///         (ix.edge(0, 1)?, 1),
///         (ix.edge(0, 2)?, 2),
///         (ix.edge(1, 2)?, 1),
///     ])?;
///
///     // Edge vector in position order: (0,1), (0,2), (1,2).
///     let edges = vec![true, false, true];
///     assert!(classical::distance_check(&edges, &ix, &profile)?);
///
///     let qc = distance_check_circuit(&ix, &profile)?;
///     let result = Simulator::new().run(&qc, &[("edges", &edges)])?;
///     assert_eq!(result.output_bit(), Some(true));
///     assert!(result.register_is_zero("paths")?);
///     assert!(result.register_is_zero("ancs")?);
///
///     // The triangle does not realize the profile.
///     let triangle = vec![true, true, true];
///     let result = Simulator::new().run(&qc, &[("edges", &triangle)])?;
///     assert_eq!(result.output_bit(), Some(false));
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Grouped check derived from a distance matrix
// Splits the same target into one group per source vertex; the groups share
// the edge register through their own permutations and the final decision is
// the conjunction of the group decisions.
/// ```
/// use disq::{classical, DisqError, DistanceMatrix, Simulator};
/// use disq::profile::per_origin_profiles;
/// use disq::synthesis::grouped_distance_check_circuit;
///
/// fn main() -> Result<(), DisqError> {
///     let mut dmat = DistanceMatrix::new(3);
///     dmat.set(0, 1, 1);
///     dmat.set(1, 2, 1);
///     dmat.set(0, 2, 2);
///     let group = per_origin_profiles(&dmat)?;
///
///     let edges = vec![true, false, true];
///     assert!(classical::grouped_distance_check(&edges, &group)?);
///
///     let qc = grouped_distance_check_circuit(&group)?;
///     let result = Simulator::new().run(&qc, &[("edges", &edges)])?;
///     assert_eq!(result.output_bit(), Some(true));
///     assert!(result.register_is_zero("paths")?);
///     assert!(result.register_is_zero("ancs1")?);
///     assert!(result.register_is_zero("ancs2")?);
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
