// src/indexing/mod.rs

//! Bijections between structured graph keys and dense linear positions.
//!
//! `EdgeIndexing` maps unordered vertex pairs to positions in the strict
//! upper triangle of the incidence matrix, enumerated over a permuted vertex
//! order. `PathIndexing` extends it with a level restriction selecting which
//! vertices may serve as path origins, and maps `(layer, pair)` keys into a
//! layered path buffer.
//!
//! All operations are pure and deterministic; invalid input is rejected with
//! `DisqError::IndexDomain`, never clamped.

use crate::core::DisqError;

/// Edge indexing for an undirected graph on a fixed vertex set.
///
/// Vertices are integers in `[0, num_nodes)`. Edges are unordered pairs of
/// distinct vertices, laid out by the strict upper triangle of the incidence
/// matrix after applying a vertex permutation. The permutation lets several
/// indexings view one canonical edge register from different "source" vertex
/// choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeIndexing {
    num_nodes: usize,
    /// position -> vertex
    perm: Vec<usize>,
    /// vertex -> position, inverse of `perm`
    positions: Vec<usize>,
}

impl EdgeIndexing {
    /// Indexing over the identity vertex order.
    pub fn new(num_nodes: usize) -> Result<Self, DisqError> {
        Self::shifted(num_nodes, 0)
    }

    /// Indexing over the vertex order rotated left by `shift`, so vertex
    /// `shift` comes first.
    pub fn shifted(num_nodes: usize, shift: usize) -> Result<Self, DisqError> {
        if num_nodes > 0 && shift >= num_nodes {
            return Err(DisqError::IndexDomain {
                message: format!("shift {} out of range for {} nodes", shift, num_nodes),
            });
        }
        let perm: Vec<usize> = (shift..num_nodes).chain(0..shift).collect();
        Self::permuted(num_nodes, perm)
    }

    /// Indexing over an explicit vertex order. `perm[position] = vertex`;
    /// must be a bijection on `[0, num_nodes)`.
    pub fn permuted(num_nodes: usize, perm: Vec<usize>) -> Result<Self, DisqError> {
        if num_nodes < 2 {
            return Err(DisqError::IndexDomain {
                message: format!("edge indexing needs at least 2 nodes, got {}", num_nodes),
            });
        }
        if perm.len() != num_nodes {
            return Err(DisqError::IndexDomain {
                message: format!(
                    "permutation has {} entries for {} nodes",
                    perm.len(),
                    num_nodes
                ),
            });
        }
        let mut positions = vec![usize::MAX; num_nodes];
        for (position, &vertex) in perm.iter().enumerate() {
            if vertex >= num_nodes {
                return Err(DisqError::IndexDomain {
                    message: format!("permutation entry {} out of range", vertex),
                });
            }
            if positions[vertex] != usize::MAX {
                return Err(DisqError::IndexDomain {
                    message: format!("permutation lists vertex {} twice", vertex),
                });
            }
            positions[vertex] = position;
        }
        Ok(Self {
            num_nodes,
            perm,
            positions,
        })
    }

    /// Number of vertices.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Permuted position of the given vertex.
    pub fn permute(&self, vertex: usize) -> Result<usize, DisqError> {
        self.positions
            .get(vertex)
            .copied()
            .ok_or_else(|| DisqError::IndexDomain {
                message: format!("vertex {} out of range for {} nodes", vertex, self.num_nodes),
            })
    }

    /// Inverse of `permute`: the vertex at the given permuted position.
    pub fn unpermute(&self, position: usize) -> Result<usize, DisqError> {
        self.perm
            .get(position)
            .copied()
            .ok_or_else(|| DisqError::IndexDomain {
                message: format!(
                    "position {} out of range for {} nodes",
                    position, self.num_nodes
                ),
            })
    }

    /// Number of strict-upper-triangle entries above the given row of the
    /// permuted incidence matrix. `level` must not exceed `num_nodes - 1`.
    pub fn num_edges_below_level(&self, level: usize) -> usize {
        let mut out = 0;
        for k in 0..level {
            out += self.num_nodes - 1 - k;
        }
        out
    }

    /// Linear position of the edge between vertices `i` and `j`.
    pub fn edge(&self, i: usize, j: usize) -> Result<usize, DisqError> {
        if i == j {
            return Err(DisqError::IndexDomain {
                message: format!("edge endpoints must differ, got ({}, {})", i, j),
            });
        }
        let mut k = self.permute(i)?;
        let mut l = self.permute(j)?;
        if l < k {
            std::mem::swap(&mut k, &mut l);
        }
        Ok(self.num_edges_below_level(k) + l - k - 1)
    }

    /// Inverse of `edge`: the (unpermuted) endpoints of the edge at the given
    /// position.
    pub fn to_edge(&self, position: usize) -> Result<(usize, usize), DisqError> {
        for i in 0..self.num_nodes - 1 {
            if position < self.num_edges_below_level(i + 1) {
                let j = position - self.num_edges_below_level(i) + i + 1;
                return Ok((self.unpermute(i)?, self.unpermute(j)?));
            }
        }
        Err(DisqError::IndexDomain {
            message: format!(
                "edge position {} out of range for {} edges",
                position,
                self.num_edges()
            ),
        })
    }

    /// Total number of edges on this vertex set.
    pub fn num_edges(&self) -> usize {
        self.num_edges_below_level(self.num_nodes - 1)
    }

    /// Vertices not in the given list, in ascending order.
    pub fn nodes_complement(&self, vertices: &[usize]) -> Vec<usize> {
        (0..self.num_nodes)
            .filter(|v| !vertices.contains(v))
            .collect()
    }

    /// For each local edge position, the position of the same edge under the
    /// identity permutation. Viewing a canonical edge register through this
    /// sequence presents it in this indexing's order.
    pub fn edge_permutation(&self) -> Result<Vec<usize>, DisqError> {
        let canonical = EdgeIndexing::new(self.num_nodes)?;
        (0..self.num_edges())
            .map(|i| {
                let (a, b) = self.to_edge(i)?;
                canonical.edge(a, b)
            })
            .collect()
    }
}

/// Path indexing: edge indexing plus an origin restriction.
///
/// Only the first `num_levels` positions of the vertex permutation may serve
/// as path origins. Layer `d` of the path buffer certifies paths of length
/// `<= d + 2`; position `d * num_paths_per_layer + edge(j, k)` uniquely
/// identifies "path of length `<= d + 2` between `j` and `k`".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathIndexing {
    edges: EdgeIndexing,
    num_levels: usize,
}

/// One operand of the layered path formula: a position in the edge register
/// or a position in the previous layer of the path buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Position in the edge register.
    Edge(usize),
    /// Position in the path buffer.
    Path(usize),
}

/// The operands of "path of length <= d + 2 exists between j and k" for one
/// layer and vertex pair: a `(predecessor, successor)` operand pair per
/// intermediate vertex, the direct predecessor-already-reaches-k operand, and
/// the output position in the path buffer.
///
/// The circuit builder and the classical evaluator both read this enumeration,
/// so the two forms evaluate literally the same formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerTerms {
    /// `(predecessor-exists, successor-exists)` per intermediate vertex.
    pub pairs: Vec<(Operand, Operand)>,
    /// Predecessor already reaches the far endpoint.
    pub direct: Operand,
    /// Output position in the path buffer.
    pub out: usize,
}

impl PathIndexing {
    /// Indexing of all paths over the identity vertex order.
    pub fn new(num_nodes: usize) -> Result<Self, DisqError> {
        let edges = EdgeIndexing::new(num_nodes)?;
        let num_levels = num_nodes - 1;
        Self::with_levels(edges, num_levels)
    }

    /// Restrict the given edge indexing to paths originating from the first
    /// `num_levels` positions of its vertex permutation.
    pub fn with_levels(edges: EdgeIndexing, num_levels: usize) -> Result<Self, DisqError> {
        if num_levels == 0 || num_levels > edges.num_nodes() - 1 {
            return Err(DisqError::IndexDomain {
                message: format!(
                    "num_levels {} out of range for {} nodes",
                    num_levels,
                    edges.num_nodes()
                ),
            });
        }
        Ok(Self { edges, num_levels })
    }

    /// The underlying edge indexing.
    pub fn edge_indexing(&self) -> &EdgeIndexing {
        &self.edges
    }

    /// Number of origin levels.
    pub fn num_levels(&self) -> usize {
        self.num_levels
    }

    /// Number of vertex pairs tracked per layer of the path buffer.
    pub fn num_paths_per_layer(&self) -> usize {
        self.edges.num_edges_below_level(self.num_levels)
    }

    /// Position of the layer-`d` entry for the pair `(i, j)` in the path
    /// buffer. The pair must fall inside the origin-restricted universe.
    pub fn path(&self, d: usize, i: usize, j: usize) -> Result<usize, DisqError> {
        let e = self.edges.edge(i, j)?;
        if e >= self.num_paths_per_layer() {
            return Err(DisqError::IndexDomain {
                message: format!(
                    "pair ({}, {}) lies outside the first {} origin levels",
                    i, j, self.num_levels
                ),
            });
        }
        Ok(d * self.num_paths_per_layer() + e)
    }

    /// Enumerate the operands of the layered formula for layer `d` and the
    /// pair at local position `pair`. Layer 0 predecessors read the edge
    /// register; deeper layers read the previous layer of the path buffer.
    /// Successors always read the edge register.
    pub fn layer_terms(&self, d: usize, pair: usize) -> Result<LayerTerms, DisqError> {
        if pair >= self.num_paths_per_layer() {
            return Err(DisqError::IndexDomain {
                message: format!(
                    "pair position {} out of range for {} paths per layer",
                    pair,
                    self.num_paths_per_layer()
                ),
            });
        }
        let (j, k) = self.edges.to_edge(pair)?;
        let predecessor = |p: usize| -> Result<Operand, DisqError> {
            if d == 0 {
                Ok(Operand::Edge(self.edges.edge(j, p)?))
            } else {
                Ok(Operand::Path(self.path(d - 1, j, p)?))
            }
        };
        let mut pairs = Vec::new();
        for p in self.edges.nodes_complement(&[j, k]) {
            pairs.push((predecessor(p)?, Operand::Edge(self.edges.edge(p, k)?)));
        }
        let direct = predecessor(k)?;
        let out = self.path(d, j, k)?;
        Ok(LayerTerms { pairs, direct, out })
    }

    // Delegations to the underlying edge indexing, so a path indexing can be
    // used wherever pair positions are needed.

    /// Number of vertices.
    pub fn num_nodes(&self) -> usize {
        self.edges.num_nodes()
    }

    /// Linear position of the edge between vertices `i` and `j`.
    pub fn edge(&self, i: usize, j: usize) -> Result<usize, DisqError> {
        self.edges.edge(i, j)
    }

    /// Endpoints of the edge at the given position.
    pub fn to_edge(&self, position: usize) -> Result<(usize, usize), DisqError> {
        self.edges.to_edge(position)
    }

    /// Total number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.num_edges()
    }

    /// Vertices not in the given list, in ascending order.
    pub fn nodes_complement(&self, vertices: &[usize]) -> Vec<usize> {
        self.edges.nodes_complement(vertices)
    }

    /// See [`EdgeIndexing::edge_permutation`].
    pub fn edge_permutation(&self) -> Result<Vec<usize>, DisqError> {
        self.edges.edge_permutation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_roundtrip_identity() -> Result<(), DisqError> {
        for n in 2..=6 {
            let ix = EdgeIndexing::new(n)?;
            assert_eq!(ix.num_edges(), n * (n - 1) / 2);
            for p in 0..ix.num_edges() {
                let (i, j) = ix.to_edge(p)?;
                assert_ne!(i, j);
                assert_eq!(ix.edge(i, j)?, p);
                assert_eq!(ix.edge(j, i)?, p);
            }
        }
        Ok(())
    }

    #[test]
    fn edge_roundtrip_shifted() -> Result<(), DisqError> {
        for n in 2..=5 {
            for shift in 0..n {
                let ix = EdgeIndexing::shifted(n, shift)?;
                for i in 0..n {
                    for j in 0..n {
                        if i == j {
                            continue;
                        }
                        let p = ix.edge(i, j)?;
                        let (a, b) = ix.to_edge(p)?;
                        assert!((a, b) == (i, j) || (a, b) == (j, i));
                    }
                }
            }
        }
        Ok(())
    }

    #[test]
    fn permutation_roundtrip() -> Result<(), DisqError> {
        let ix = EdgeIndexing::permuted(4, vec![2, 0, 3, 1])?;
        for v in 0..4 {
            assert_eq!(ix.unpermute(ix.permute(v)?)?, v);
        }
        assert_eq!(ix.permute(2)?, 0);
        assert_eq!(ix.unpermute(0)?, 2);
        Ok(())
    }

    #[test]
    fn shifted_puts_origin_first() -> Result<(), DisqError> {
        let ix = EdgeIndexing::shifted(4, 3)?;
        assert_eq!(ix.unpermute(0)?, 3);
        assert_eq!(ix.permute(3)?, 0);
        // The remaining vertices keep their relative order.
        assert_eq!(ix.unpermute(1)?, 0);
        assert_eq!(ix.unpermute(3)?, 2);
        Ok(())
    }

    #[test]
    fn rejects_bad_input() {
        assert!(EdgeIndexing::new(1).is_err());
        assert!(EdgeIndexing::shifted(3, 3).is_err());
        assert!(EdgeIndexing::permuted(3, vec![0, 1]).is_err());
        assert!(EdgeIndexing::permuted(3, vec![0, 1, 3]).is_err());
        assert!(EdgeIndexing::permuted(3, vec![0, 1, 1]).is_err());

        let ix = EdgeIndexing::new(4).unwrap();
        assert!(ix.edge(2, 2).is_err());
        assert!(ix.edge(0, 4).is_err());
        assert!(ix.to_edge(6).is_err());
        assert!(ix.permute(4).is_err());
    }

    #[test]
    fn nodes_complement_is_sorted() -> Result<(), DisqError> {
        let ix = EdgeIndexing::new(5)?;
        assert_eq!(ix.nodes_complement(&[1, 3]), vec![0, 2, 4]);
        assert_eq!(ix.nodes_complement(&[]), vec![0, 1, 2, 3, 4]);
        assert_eq!(ix.nodes_complement(&[0, 1, 2, 3, 4]), Vec::<usize>::new());
        Ok(())
    }

    #[test]
    fn edge_permutation_maps_to_canonical() -> Result<(), DisqError> {
        let canonical = EdgeIndexing::new(4)?;
        for shift in 0..4 {
            let ix = EdgeIndexing::shifted(4, shift)?;
            let perm = ix.edge_permutation()?;
            assert_eq!(perm.len(), ix.num_edges());
            for (local, &global) in perm.iter().enumerate() {
                let (a, b) = ix.to_edge(local)?;
                assert_eq!(canonical.edge(a, b)?, global);
            }
            // A permutation of edge positions: every position appears once.
            let mut seen = perm.clone();
            seen.sort_unstable();
            assert_eq!(seen, (0..ix.num_edges()).collect::<Vec<_>>());
        }
        Ok(())
    }

    #[test]
    fn path_positions_are_layered() -> Result<(), DisqError> {
        let ix = PathIndexing::new(4)?;
        assert_eq!(ix.num_paths_per_layer(), ix.num_edges());
        for d in 0..3 {
            for p in 0..ix.num_edges() {
                let (i, j) = ix.to_edge(p)?;
                assert_eq!(ix.path(d, i, j)?, d * ix.num_paths_per_layer() + p);
            }
        }
        Ok(())
    }

    #[test]
    fn level_restriction_limits_origins() -> Result<(), DisqError> {
        // Origin vertex 3 first, paths from it only.
        let ix = PathIndexing::with_levels(EdgeIndexing::shifted(4, 3)?, 1)?;
        assert_eq!(ix.num_paths_per_layer(), 3);
        for k in 0..3 {
            assert!(ix.edge(3, k)? < ix.num_paths_per_layer());
            assert!(ix.path(0, 3, k).is_ok());
        }
        // A pair not touching the origin lies outside the universe.
        assert!(ix.path(0, 0, 1).is_err());
        assert!(PathIndexing::with_levels(EdgeIndexing::new(4)?, 0).is_err());
        assert!(PathIndexing::with_levels(EdgeIndexing::new(4)?, 4).is_err());
        Ok(())
    }

    #[test]
    fn layer_terms_read_previous_layer() -> Result<(), DisqError> {
        let ix = PathIndexing::new(4)?;
        let terms = ix.layer_terms(0, 0)?;
        assert_eq!(terms.pairs.len(), 2);
        assert!(matches!(terms.direct, Operand::Edge(_)));
        assert_eq!(terms.out, 0);

        let deeper = ix.layer_terms(1, 0)?;
        assert!(matches!(deeper.direct, Operand::Path(0)));
        for (prev, next) in &deeper.pairs {
            assert!(matches!(prev, Operand::Path(_)));
            assert!(matches!(next, Operand::Edge(_)));
        }
        assert_eq!(deeper.out, ix.num_paths_per_layer());

        assert!(ix.layer_terms(0, ix.num_paths_per_layer()).is_err());
        Ok(())
    }
}
