// src/synthesis/mod.rs

//! Oracle synthesis: reversible circuits deciding distance profiles.
//!
//! The builders here compose three layers. `paths_circuit` evaluates the
//! layered path-existence formula into a dedicated buffer, reclaiming its
//! working ancillas pair by pair. `distance_check_circuit` wraps that between
//! a flagged conjunction and the exact inverse of the path computation, so a
//! single decision bit is all that remains. `grouped_distance_check_circuit`
//! runs several such checks against one shared edge register and conjoins
//! their latched decisions. Every compute step is paired with its inverse;
//! by the time an output is produced, everything transient reads zero.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::DisqError;
use crate::indexing::{Operand, PathIndexing};
use crate::operations::Operation;
use crate::profile::{DistanceProfile, FlagMask, ProfileGroup};

/// Builds the layered path-existence circuit.
///
/// Registers: `edges` (input, `num_edges`), `paths` (output,
/// `num_layers * num_paths_per_layer`), `ancs` (working, `num_nodes - 2`).
/// After execution on a basis state, `paths` holds true at the layer-`d`
/// position of a pair exactly when the pair is connected by a path of length
/// `<= d + 2`, and `ancs` reads zero.
pub fn paths_circuit(ix: &PathIndexing, num_layers: usize) -> Result<Circuit, DisqError> {
    let mut b = CircuitBuilder::new();
    let edges = b.register("edges", ix.num_edges());
    let paths = b.register("paths", num_layers * ix.num_paths_per_layer());
    let ancs = b.register("ancs", ix.num_nodes() - 2);

    for d in 0..num_layers {
        for i in 0..ix.num_paths_per_layer() {
            let terms = ix.layer_terms(d, i)?;
            let qubit_of = |operand: &Operand| match *operand {
                Operand::Edge(e) => edges.qubit(e),
                Operand::Path(p) => paths.qubit(p),
            };
            let conjunctions: Vec<Operation> = terms
                .pairs
                .iter()
                .enumerate()
                .map(|(a, (prev, next))| Operation::Toffoli {
                    control1: qubit_of(prev),
                    control2: qubit_of(next),
                    target: ancs.qubit(a),
                })
                .collect();

            // Compute each intermediate-vertex conjunction into its ancilla.
            b.extend(conjunctions.iter().cloned());
            // One disjunction over every ancilla plus the direct literal.
            let mut controls = ancs.qubits();
            controls.push(qubit_of(&terms.direct));
            b.push(Operation::MultiOr {
                controls,
                target: paths.qubit(terms.out),
            });
            // Uncompute: the same Toffolis return the ancillas to zero
            // before the next pair reuses them.
            b.extend(conjunctions.into_iter().map(|op| op.inverse()));
        }
    }

    Ok(b.build())
}

/// Builds the distance-profile decision circuit.
///
/// Registers: `edges` (input), `paths`, `ancs` (working), `out` (1 qubit,
/// the decision). Derives the flag mask first, rejecting malformed profiles
/// before any gate exists; then computes the path buffer, applies the
/// flagged conjunction into `out`, and uncomputes the path buffer by running
/// the exact inverse circuit. On both outcomes everything except `out`
/// returns to its input state.
pub fn distance_check_circuit(
    ix: &PathIndexing,
    profile: &DistanceProfile,
) -> Result<Circuit, DisqError> {
    let flags = FlagMask::derive(ix, profile)?;
    let num_layers = flags.num_layers();
    let num_paths = ix.num_paths_per_layer();

    let mut b = CircuitBuilder::new();
    let edges = b.register("edges", ix.num_edges());
    let paths = b.register("paths", num_layers * num_paths);
    b.register("ancs", ix.num_nodes() - 2);
    let out = b.register("out", 1);
    let mut qc = b.build();

    let path_builder = paths_circuit(ix, num_layers)?;
    // The sub-circuit's edges/paths/ancs layout coincides with ours.
    let path_map: Vec<usize> = (0..path_builder.num_qubits()).collect();
    qc.append(&path_builder, &path_map)?;

    // The flagged literals: row 0 reads the direct-edge positions, deeper
    // rows read the path buffer.
    let controls: Vec<(usize, bool)> = flags
        .flattened()
        .iter()
        .enumerate()
        .filter(|&(_, &flag)| flag != 0)
        .map(|(index, &flag)| {
            let qubit = if index < num_paths {
                edges.qubit(index)
            } else {
                paths.qubit(index - num_paths)
            };
            (qubit, flag > 0)
        })
        .collect();
    qc.add_operation(Operation::MultiAnd {
        controls,
        target: out.qubit(0),
    });

    qc.append(&path_builder.inverse(), &path_map)?;
    Ok(qc)
}

/// Builds the grouped decision circuit over one shared edge register.
///
/// Registers: `edges`, `paths` (a window wide enough for the widest group),
/// `ancs1` (shared working ancillas), `ancs2` (one decision latch per
/// group), `out`. Each group's check reads `edges` through its own
/// permutation, latches its decision into `ancs2`; the latches are conjoined
/// into `out`; then every group is uncomputed in reverse order, un-latching
/// included. Groups share `ancs1` strictly sequentially, so the fixed
/// forward/reverse order is load-bearing.
pub fn grouped_distance_check_circuit(group: &ProfileGroup) -> Result<Circuit, DisqError> {
    let groups = group.groups();
    let paths_size = groups
        .iter()
        .flat_map(|(ix, profile)| {
            let per_layer = ix.num_paths_per_layer();
            profile.pairs().iter().map(move |&(_, d)| d * per_layer)
        })
        .max()
        .unwrap_or(0);
    let (ix0, _) = &groups[0];

    let mut b = CircuitBuilder::new();
    let edges = b.register("edges", ix0.num_edges());
    let paths = b.register("paths", paths_size);
    let ancs1 = b.register("ancs1", ix0.num_nodes() - 2);
    let ancs2 = b.register("ancs2", groups.len());
    let out = b.register("out", 1);
    let mut qc = b.build();

    let mut checks: Vec<(Circuit, Vec<usize>)> = Vec::with_capacity(groups.len());
    for (g, (ix, profile)) in groups.iter().enumerate() {
        let check = distance_check_circuit(ix, profile)?;
        let group_paths = check.register("paths")?.size();
        let mut map: Vec<usize> = Vec::with_capacity(check.num_qubits());
        for position in ix.edge_permutation()? {
            map.push(edges.qubit(position));
        }
        for p in 0..group_paths {
            map.push(paths.qubit(p));
        }
        map.extend(ancs1.qubits());
        map.push(ancs2.qubit(g));
        qc.append(&check, &map)?;
        checks.push((check, map));
    }

    qc.add_operation(Operation::MultiAnd {
        controls: ancs2.qubits().into_iter().map(|q| (q, true)).collect(),
        target: out.qubit(0),
    });

    for (check, map) in checks.iter().rev() {
        qc.append(&check.inverse(), map)?;
    }

    Ok(qc)
}

/// Wraps a bit-flip oracle into a phase-flip oracle.
///
/// The designated output is the wrapped circuit's last qubit. The wrapper
/// applies NOT and Hadamard to it, runs the oracle, and undoes both; the net
/// effect multiplies every satisfying basis state by -1 and touches nothing
/// else, provided the wrapped oracle leaves its non-output qubits at zero on
/// both outcomes. The wrapper reproduces the wrapped circuit's register
/// table so consumers can still locate its named ranges.
pub fn phase_oracle(bitflip: &Circuit) -> Result<Circuit, DisqError> {
    if bitflip.num_qubits() == 0 {
        return Err(DisqError::InvalidOperation {
            message: "cannot wrap an oracle with no qubits".to_string(),
        });
    }
    let out = bitflip.num_qubits() - 1;

    let mut b = CircuitBuilder::new();
    for reg in bitflip.registers() {
        b.register(reg.name(), reg.size());
    }
    let mut qc = b.build();

    qc.add_operation(Operation::Not { target: out });
    qc.add_operation(Operation::Hadamard { target: out });
    let identity: Vec<usize> = (0..bitflip.num_qubits()).collect();
    qc.append(bitflip, &identity)?;
    qc.add_operation(Operation::Hadamard { target: out });
    qc.add_operation(Operation::Not { target: out });
    Ok(qc)
}
