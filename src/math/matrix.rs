use rand::Rng;
use rand_distr::StandardNormal;
use std::ops::{Index, IndexMut};

/// Dense row-major matrix backed by a single buffer.
///
/// Weight matrices are addressed `(from, to)`: row `i` is the source neuron,
/// column `j` the destination neuron. Indexing checks both coordinates, so a
/// column overflow can never spill into the next row.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Fills the matrix row by row with `N(0, 1) * scale` draws from `rng`.
    pub fn gaussian<R: Rng + ?Sized>(rows: usize, cols: usize, scale: f64, rng: &mut R) -> Matrix {
        let data = (0..rows * cols)
            .map(|_| rng.sample::<f64, _>(StandardNormal) * scale)
            .collect();
        Matrix { rows, cols, data }
    }

    /// Builds a matrix from nested rows. Returns `None` when the rows are
    /// ragged or there are none.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Matrix> {
        let n_rows = rows.len();
        let n_cols = rows.first()?.len();
        if rows.iter().any(|r| r.len() != n_cols) {
            return None;
        }
        let data = rows.into_iter().flatten().collect();
        Some(Matrix { rows: n_rows, cols: n_cols, data })
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols.max(1)).map(<[f64]>::to_vec).collect()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "row {} out of bounds for {}x{} matrix", row, self.rows, self.cols);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    fn offset(&self, (row, col): (usize, usize)) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row, col, self.rows, self.cols
        );
        row * self.cols + col
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, idx: (usize, usize)) -> &f64 {
        &self.data[self.offset(idx)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut f64 {
        let offset = self.offset(idx);
        &mut self.data[offset]
    }
}
