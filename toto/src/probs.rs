//! Utilities for working with probabilities.

use crate::linear::matrix::Matrix;

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn scale(&mut self, factor: f64);
    fn outer(&self, other: &[f64], target: &mut Matrix<f64>);
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    fn scale(&mut self, factor: f64) {
        for element in self {
            *element *= factor;
        }
    }

    /// Writes the outer product of `self` (rows) and `other` (columns) into `target`.
    fn outer(&self, other: &[f64], target: &mut Matrix<f64>) {
        debug_assert_eq!(
            target.rows(),
            self.len(),
            "number of row factors {} does not match number of rows {}",
            self.len(),
            target.rows()
        );
        debug_assert_eq!(
            target.cols(),
            other.len(),
            "number of column factors {} does not match number of columns {}",
            other.len(),
            target.cols()
        );
        for (row, &factor) in self.iter().enumerate() {
            let row_slice = target.row_slice_mut(row);
            row_slice.copy_from_slice(other);
            row_slice.scale(factor);
        }
    }
}
