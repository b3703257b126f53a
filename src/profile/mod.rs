// src/profile/mod.rs

//! Distance profiles: the target the oracle decides against.
//!
//! A `DistanceProfile` lists `(edge position, target distance)` pairs under a
//! `PathIndexing`. A `ProfileGroup` splits one target across several
//! indexings with different vertex permutations so the groups can share one
//! path buffer. Both are validated on construction, before any circuit
//! exists; a malformed profile would otherwise synthesize a circuit that is
//! syntactically fine and semantically wrong with no runtime signal.

mod flags;

pub use flags::FlagMask;

use crate::core::DisqError;
use crate::indexing::{EdgeIndexing, PathIndexing};

/// Target shortest-path distances for a set of vertex pairs, each pair named
/// by its edge position under an accompanying `PathIndexing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceProfile {
    pairs: Vec<(usize, usize)>,
}

impl DistanceProfile {
    /// Builds a profile from `(edge position, target distance)` pairs.
    /// Rejects empty profiles, zero distances, and repeated edge positions.
    pub fn new(pairs: Vec<(usize, usize)>) -> Result<Self, DisqError> {
        if pairs.is_empty() {
            return Err(DisqError::InvalidProfile {
                message: "profile lists no distances".to_string(),
            });
        }
        for &(edge, distance) in &pairs {
            if distance == 0 {
                return Err(DisqError::InvalidProfile {
                    message: format!("edge position {} has target distance 0", edge),
                });
            }
        }
        let mut positions: Vec<usize> = pairs.iter().map(|&(e, _)| e).collect();
        positions.sort_unstable();
        if positions.windows(2).any(|w| w[0] == w[1]) {
            return Err(DisqError::InvalidProfile {
                message: "profile lists an edge position twice".to_string(),
            });
        }
        Ok(Self { pairs })
    }

    /// The `(edge position, target distance)` pairs, in the given order.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// The largest target distance in the profile.
    pub fn max_distance(&self) -> usize {
        // Non-empty by construction.
        self.pairs.iter().map(|&(_, d)| d).max().unwrap_or(0)
    }
}

/// Several `(PathIndexing, DistanceProfile)` pairs over the same vertex set,
/// checked together with one shared edge register. Grouping is the caller's
/// trade-off between path-buffer width and gate count; the engine only
/// requires the groups to agree on the vertex count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileGroup {
    groups: Vec<(PathIndexing, DistanceProfile)>,
}

impl ProfileGroup {
    /// Builds a group, rejecting empty input and mismatched vertex counts.
    pub fn new(groups: Vec<(PathIndexing, DistanceProfile)>) -> Result<Self, DisqError> {
        if groups.is_empty() {
            return Err(DisqError::InvalidProfile {
                message: "profile group lists no groups".to_string(),
            });
        }
        let num_nodes = groups[0].0.num_nodes();
        for (ix, _) in &groups {
            if ix.num_nodes() != num_nodes {
                return Err(DisqError::InvalidProfile {
                    message: format!(
                        "group vertex counts differ: {} vs {}",
                        num_nodes,
                        ix.num_nodes()
                    ),
                });
            }
        }
        Ok(Self { groups })
    }

    /// The `(indexing, profile)` pairs, in checking order.
    pub fn groups(&self) -> &[(PathIndexing, DistanceProfile)] {
        &self.groups
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always `false`; groups are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// A dense symmetric all-pairs distance matrix, `None` marking unreachable
/// pairs. This is the hand-off format from whatever shortest-path routine
/// the caller runs; the crate only converts it into profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    num_nodes: usize,
    values: Vec<Option<usize>>,
}

impl DistanceMatrix {
    /// A matrix with zero diagonal and every pair unreachable.
    pub fn new(num_nodes: usize) -> Self {
        let mut values = vec![None; num_nodes * num_nodes];
        for v in 0..num_nodes {
            values[v * num_nodes + v] = Some(0);
        }
        Self { num_nodes, values }
    }

    /// Number of vertices.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Distance between `i` and `j`, `None` if unreachable.
    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        self.values[i * self.num_nodes + j]
    }

    /// Records the distance between `i` and `j`, symmetrically.
    pub fn set(&mut self, i: usize, j: usize, distance: usize) {
        self.values[i * self.num_nodes + j] = Some(distance);
        self.values[j * self.num_nodes + i] = Some(distance);
    }
}

/// Converts a distance matrix into one merged profile over the identity
/// indexing, listing every reachable pair. Fails with `InvalidProfile` when
/// no pair is reachable.
pub fn merged_profile(dmat: &DistanceMatrix) -> Result<(PathIndexing, DistanceProfile), DisqError> {
    let ix = PathIndexing::new(dmat.num_nodes())?;
    let mut pairs = Vec::new();
    for position in 0..ix.num_edges() {
        let (i, j) = ix.to_edge(position)?;
        if let Some(d) = dmat.get(i, j) {
            pairs.push((position, d));
        }
    }
    let profile = DistanceProfile::new(pairs)?;
    Ok((ix, profile))
}

/// Converts a distance matrix into one group per source vertex: vertex `o`
/// gets an indexing with `o` rotated to the front and a single origin level,
/// and a profile over the pairs `(o, k)` for `k > o` with finite distance.
/// Vertices contributing no finite pair contribute no group.
pub fn per_origin_profiles(dmat: &DistanceMatrix) -> Result<ProfileGroup, DisqError> {
    let n = dmat.num_nodes();
    let mut groups = Vec::new();
    for o in 0..n {
        let ix = PathIndexing::with_levels(EdgeIndexing::shifted(n, o)?, 1)?;
        let mut pairs = Vec::new();
        for k in o + 1..n {
            if let Some(d) = dmat.get(o, k) {
                pairs.push((ix.edge(o, k)?, d));
            }
        }
        if !pairs.is_empty() {
            groups.push((ix, DistanceProfile::new(pairs)?));
        }
    }
    ProfileGroup::new(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_validation() {
        assert!(DistanceProfile::new(vec![]).is_err());
        assert!(DistanceProfile::new(vec![(0, 0)]).is_err());
        assert!(DistanceProfile::new(vec![(0, 1), (0, 2)]).is_err());
        let profile = DistanceProfile::new(vec![(0, 1), (2, 3)]).unwrap();
        assert_eq!(profile.max_distance(), 3);
    }

    #[test]
    fn group_validation() -> Result<(), DisqError> {
        let ix3 = PathIndexing::new(3)?;
        let ix4 = PathIndexing::new(4)?;
        let p = DistanceProfile::new(vec![(0, 1)])?;
        assert!(ProfileGroup::new(vec![]).is_err());
        assert!(ProfileGroup::new(vec![(ix3.clone(), p.clone()), (ix4, p.clone())]).is_err());
        let group = ProfileGroup::new(vec![(ix3, p)])?;
        assert_eq!(group.len(), 1);
        Ok(())
    }

    #[test]
    fn merged_profile_lists_reachable_pairs() -> Result<(), DisqError> {
        // Path graph 0 - 1 - 2 plus isolated vertex 3.
        let mut dmat = DistanceMatrix::new(4);
        dmat.set(0, 1, 1);
        dmat.set(1, 2, 1);
        dmat.set(0, 2, 2);
        let (ix, profile) = merged_profile(&dmat)?;
        let expected = vec![
            (ix.edge(0, 1)?, 1),
            (ix.edge(0, 2)?, 2),
            (ix.edge(1, 2)?, 1),
        ];
        assert_eq!(profile.pairs(), expected.as_slice());
        Ok(())
    }

    #[test]
    fn per_origin_profiles_skip_empty_origins() -> Result<(), DisqError> {
        let mut dmat = DistanceMatrix::new(3);
        dmat.set(0, 1, 1);
        dmat.set(1, 2, 1);
        dmat.set(0, 2, 2);
        let group = per_origin_profiles(&dmat)?;
        // Origin 2 has no pair (2, k) with k > 2; only origins 0 and 1 remain.
        assert_eq!(group.len(), 2);
        let (ix0, p0) = &group.groups()[0];
        assert_eq!(ix0.num_levels(), 1);
        assert_eq!(p0.pairs().len(), 2);
        let (_, p1) = &group.groups()[1];
        assert_eq!(p1.pairs().len(), 1);
        Ok(())
    }

    #[test]
    fn unreachable_everywhere_is_rejected() {
        let dmat = DistanceMatrix::new(3);
        assert!(merged_profile(&dmat).is_err());
        assert!(per_origin_profiles(&dmat).is_err());
    }
}
