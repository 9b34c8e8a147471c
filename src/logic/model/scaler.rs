//! Standard Scaler - per-dimension standardization
//!
//! Fit once over the training matrix, reused unchanged at inference. The
//! column order must match between fit and transform calls; layout.rs
//! freezes the structural part of that contract.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f32>,
    /// Per-dimension standard deviation; constant dimensions scale by 1 so
    /// they pass through centered instead of dividing by zero.
    scale: Vec<f32>,
}

impl StandardScaler {
    /// Fit mean and variance over the rows of a training matrix.
    pub fn fit(data: &Array2<f32>) -> Self {
        let columns = data.ncols();
        let mean = data
            .mean_axis(Axis(0))
            .map(|m| m.to_vec())
            .unwrap_or_else(|| vec![0.0; columns]);

        let scale = data
            .var_axis(Axis(0), 0.0)
            .iter()
            .map(|&variance| {
                let std = variance.sqrt();
                if std > 0.0 {
                    std
                } else {
                    1.0
                }
            })
            .collect();

        Self { mean, scale }
    }

    /// Standardize a matrix with the fitted parameters.
    pub fn transform(&self, data: &Array2<f32>) -> Array2<f32> {
        let mut scaled = data.clone();
        for mut row in scaled.rows_mut() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (*value - self.mean[j]) / self.scale[j];
            }
        }
        scaled
    }

    pub fn dimensions(&self) -> usize {
        self.mean.len()
    }
}
