//! Isolation Forest - ensemble outlier model
//!
//! Random axis-aligned partitioning over subsampled training data. Points
//! that isolate in few splits are unusual. The decision function is the
//! sample score minus a contamination-calibrated offset, so scores below
//! zero are outliers and more negative means more unusual.

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_TREE_SAMPLES;

const EULER_GAMMA: f32 = 0.577_215_7;

/// Expected path length of an unsuccessful BST search over n points.
///
/// Normalizes raw path lengths so scores are comparable across subsample
/// sizes; also credits unexplored subtrees below terminal nodes.
fn average_path_length(n: usize) -> f32 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        n => {
            let n = n as f32;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Linear-interpolated percentile of a sorted slice, q in [0, 100].
fn percentile(sorted: &[f32], q: f32) -> f32 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let position = q / 100.0 * (n - 1) as f32;
    let low = position.floor() as usize;
    let high = position.ceil() as usize;
    let fraction = position - low as f32;
    sorted[low] + (sorted[high] - sorted[low]) * fraction
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Split {
        feature: usize,
        threshold: f32,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationForest {
    n_estimators: usize,
    max_samples: usize,
    contamination: f32,
    seed: u64,
    /// Sample-score value at the contamination percentile of the training
    /// corpus; decision = sample score - offset.
    offset: f32,
    trees: Vec<Node>,
}

impl IsolationForest {
    /// Fit an ensemble over the scaled training matrix.
    ///
    /// Construction is fully determined by the seed; refitting the same
    /// corpus with the same configuration reproduces the same forest.
    pub fn fit(data: &Array2<f32>, n_estimators: usize, contamination: f32, seed: u64) -> Self {
        let n = data.nrows();
        let max_samples = MAX_TREE_SAMPLES.min(n);
        let height_limit = (max_samples as f32).log2().ceil() as usize;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut trees = Vec::with_capacity(n_estimators);
        for _ in 0..n_estimators {
            let indices = rand::seq::index::sample(&mut rng, n, max_samples).into_vec();
            trees.push(build_tree(data, indices, 0, height_limit, &mut rng));
        }

        let mut forest = Self {
            n_estimators,
            max_samples,
            contamination,
            seed,
            offset: 0.0,
            trees,
        };

        // Calibrate the outlier threshold so that roughly the contamination
        // fraction of the training corpus falls below it.
        let mut training_scores: Vec<f32> =
            data.rows().into_iter().map(|r| forest.sample_score(r)).collect();
        training_scores.sort_by(|a, b| a.total_cmp(b));
        forest.offset = percentile(&training_scores, contamination * 100.0);

        forest
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    pub fn contamination(&self) -> f32 {
        self.contamination
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Raw sample score in (-1, 0): closer to -1 means easier to isolate.
    fn sample_score(&self, row: ArrayView1<'_, f32>) -> f32 {
        let total: f32 = self.trees.iter().map(|tree| path_length(tree, row)).sum();
        let mean_path = total / self.trees.len() as f32;
        -(2.0f32.powf(-mean_path / average_path_length(self.max_samples)))
    }

    /// Decision value per row; below zero is an outlier, more negative is
    /// more unusual.
    pub fn decision_function(&self, data: &Array2<f32>) -> Vec<f32> {
        data.rows()
            .into_iter()
            .map(|row| self.sample_score(row) - self.offset)
            .collect()
    }
}

fn build_tree(
    data: &Array2<f32>,
    indices: Vec<usize>,
    depth: usize,
    height_limit: usize,
    rng: &mut StdRng,
) -> Node {
    if indices.len() <= 1 || depth >= height_limit {
        return Node::Leaf {
            size: indices.len(),
        };
    }

    // Only features that still vary inside this node can split it.
    let n_features = data.ncols();
    let mut candidates = Vec::new();
    for feature in 0..n_features {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &i in &indices {
            let value = data[[i, feature]];
            min = min.min(value);
            max = max.max(value);
        }
        if min < max {
            candidates.push((feature, min, max));
        }
    }
    if candidates.is_empty() {
        return Node::Leaf {
            size: indices.len(),
        };
    }

    let (feature, min, max) = candidates[rng.gen_range(0..candidates.len())];
    let threshold = rng.gen_range(min..max);

    let (left, right): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| data[[i, feature]] < threshold);
    if left.is_empty() || right.is_empty() {
        return Node::Leaf {
            size: left.len() + right.len(),
        };
    }

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_tree(data, left, depth + 1, height_limit, rng)),
        right: Box::new(build_tree(data, right, depth + 1, height_limit, rng)),
    }
}

fn path_length(tree: &Node, row: ArrayView1<'_, f32>) -> f32 {
    let mut node = tree;
    let mut depth = 0.0f32;
    loop {
        match node {
            Node::Leaf { size } => return depth + average_path_length(*size),
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                node = if row[*feature] < *threshold { left } else { right };
                depth += 1.0;
            }
        }
    }
}
