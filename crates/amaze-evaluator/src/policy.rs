//! Linear navigation policies.
//!
//! A policy sees only local information: the four walls of the cell it stands on and a
//! feature describing where the goal is. It scores each direction with a dot product and
//! moves toward the best score.
//!
//! # Feature Schemes
//!
//! | scheme     | inputs                                                  | count |
//! |------------|---------------------------------------------------------|-------|
//! | `distance` | 4 wall flags, `manhattan / (width + height)`, bias      | 6     |
//! | `offset`   | 4 wall flags, `(gx - x) / width`, `(gy - y) / height`, bias | 7 |
//!
//! Wall flags are `1.0` for a wall and `0.0` for an opening, in north, east, south, west
//! order. The bias is always `1.0`.
//!
//! A scheme is fixed for a whole training run and for every later use of its result; the
//! gene count ([`FeatureScheme::gene_count`]) depends on it.
//!
//! # Weight Layout
//!
//! Genes form a row-major `4 × inputs` matrix: row `d` holds the weights of direction
//! `Direction::ALL[d]`.
//!
//! ```text
//! score[d] = Σⱼ genes[d * inputs + j] · features[j]
//! ```

use amaze_engine::{Cell, Direction, GridMaze};
use arrayvec::ArrayVec;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Feature vector layout seen by a [`LinearPolicy`].
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum FeatureScheme {
    /// Scalar normalized distance to the goal.
    #[display("distance")]
    Distance,
    /// Signed per-axis offsets to the goal.
    #[default]
    #[display("offset")]
    Offset,
}

pub type FeatureVec = ArrayVec<f32, { FeatureScheme::MAX_INPUTS }>;

impl FeatureScheme {
    pub const MAX_INPUTS: usize = 7;
    pub const OUTPUTS: usize = Direction::LEN;

    #[must_use]
    pub const fn input_count(self) -> usize {
        match self {
            Self::Distance => 6,
            Self::Offset => 7,
        }
    }

    /// Number of policy weights: one row of inputs per direction.
    #[must_use]
    pub const fn gene_count(self) -> usize {
        Self::OUTPUTS * self.input_count()
    }

    /// Builds the feature vector for an agent on `cell` heading to `goal`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn features(self, maze: &GridMaze, cell: Cell, goal: Cell) -> FeatureVec {
        let mut features = FeatureVec::new();
        let walls = maze.walls(cell);
        for direction in Direction::ALL {
            features.push(if walls.has(direction) { 1.0 } else { 0.0 });
        }
        let width = maze.width() as f32;
        let height = maze.height() as f32;
        match self {
            Self::Distance => {
                features.push(cell.manhattan_distance(goal) as f32 / (width + height));
            }
            Self::Offset => {
                features.push((goal.x as f32 - cell.x as f32) / width);
                features.push((goal.y as f32 - cell.y as f32) / height);
            }
        }
        features.push(1.0);
        debug_assert_eq!(features.len(), self.input_count());
        features
    }
}

/// A `4 × inputs` weight matrix borrowed from a chromosome.
#[derive(Debug, Clone, Copy)]
pub struct LinearPolicy<'a> {
    scheme: FeatureScheme,
    genes: &'a [f32],
}

impl<'a> LinearPolicy<'a> {
    /// # Panics
    ///
    /// Panics if `genes.len() != scheme.gene_count()`.
    #[must_use]
    pub fn new(scheme: FeatureScheme, genes: &'a [f32]) -> Self {
        assert_eq!(
            genes.len(),
            scheme.gene_count(),
            "{scheme} policy needs {} genes",
            scheme.gene_count()
        );
        Self { scheme, genes }
    }

    #[must_use]
    pub fn scheme(&self) -> FeatureScheme {
        self.scheme
    }

    /// Scores every direction for the given features.
    #[must_use]
    pub fn scores(&self, features: &[f32]) -> [f32; Direction::LEN] {
        let inputs = self.scheme.input_count();
        let mut scores = [0.0; Direction::LEN];
        for (score, row) in scores.iter_mut().zip(self.genes.chunks_exact(inputs)) {
            *score = row.iter().zip(features).map(|(w, f)| w * f).sum();
        }
        scores
    }

    /// Picks the highest-scoring direction from `cell`.
    ///
    /// Exact ties are broken uniformly: the `k`-th tied direction seen takes over with
    /// probability `1/k`, so each of `n` tied directions wins with probability `1/n`.
    /// Randomness is only drawn on ties, so untied decisions consume none.
    #[expect(clippy::float_cmp)]
    pub fn choose<R>(&self, maze: &GridMaze, cell: Cell, goal: Cell, rng: &mut R) -> Direction
    where
        R: Rng + ?Sized,
    {
        let features = self.scheme.features(maze, cell, goal);
        let scores = self.scores(&features);
        let mut best = 0;
        let mut ties = 1;
        for i in 1..scores.len() {
            if scores[i] > scores[best] {
                best = i;
                ties = 1;
            } else if scores[i] == scores[best] {
                ties += 1;
                if rng.random_ratio(1, ties) {
                    best = i;
                }
            }
        }
        Direction::ALL[best]
    }
}
