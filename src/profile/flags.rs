// src/profile/flags.rs

//! Flag-mask derivation: turning a distance profile into per-position
//! polarities for the final conjunction.
//!
//! The layer boundaries here are the easiest place in the whole engine to be
//! off by one, so the derivation is its own pure function with the boundary
//! cases pinned down by unit tests.

use crate::core::DisqError;
use crate::indexing::PathIndexing;
use crate::profile::DistanceProfile;

/// Per-position polarities certifying a distance profile.
///
/// Row-major grid of shape `(max target distance, num_paths_per_layer)` over
/// `{-1, 0, 1}`: `1` asserts the literal, `-1` negates it, `0` ignores it.
/// Row 0 addresses the direct-edge literals; row `r >= 1` addresses path
/// layer `r - 1` (paths of length `<= r + 1`).
///
/// For a pair with target distance 1 only its row-0 literal is asserted. For
/// target distance `d > 1` the pair's literals in rows `0 ..= d - 2` are
/// negated (no shorter connection) and its row `d - 1` literal is asserted
/// (a path of length `<= d` exists).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagMask {
    num_rows: usize,
    num_cols: usize,
    flags: Vec<i8>,
}

impl FlagMask {
    /// Derives the mask for a profile under the given indexing. Every edge
    /// position must fall inside the indexing's origin-restricted universe.
    pub fn derive(ix: &PathIndexing, profile: &DistanceProfile) -> Result<Self, DisqError> {
        let num_cols = ix.num_paths_per_layer();
        let num_rows = profile.max_distance();
        let mut flags = vec![0i8; num_rows * num_cols];
        for &(edge, distance) in profile.pairs() {
            if edge >= num_cols {
                return Err(DisqError::InvalidProfile {
                    message: format!(
                        "edge position {} outside the {} indexed pairs",
                        edge, num_cols
                    ),
                });
            }
            if distance == 1 {
                flags[edge] = 1;
            } else {
                flags[edge] = -1;
                for l in 0..distance - 2 {
                    flags[(1 + l) * num_cols + edge] = -1;
                }
                flags[(distance - 1) * num_cols + edge] = 1;
            }
        }
        Ok(Self {
            num_rows,
            num_cols,
            flags,
        })
    }

    /// Number of rows: the profile's largest target distance.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns: pairs per layer.
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Number of path layers the conjunction reads: one less than the rows,
    /// row 0 being served by the edge register directly.
    pub fn num_layers(&self) -> usize {
        self.num_rows - 1
    }

    /// The flag at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.flags[row * self.num_cols + col]
    }

    /// The whole grid, row-major.
    pub fn flattened(&self) -> &[i8] {
        &self.flags
    }
}
