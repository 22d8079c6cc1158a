//! Sparse matrix utilities.
//!
//! Helper functions for working with nalgebra-sparse matrices.

use nalgebra_sparse::{CooMatrix, CscMatrix};

/// Assemble a CSC matrix row by row.
///
/// Row `i` of the result holds the `(column, value)` pairs yielded by the
/// `i`-th item of `rows`. Repeated columns within a row are summed, and
/// zeros and columns outside `0..ncols` are skipped.
pub fn csc_from_rows<R, E>(ncols: usize, rows: R) -> CscMatrix<f64>
where
    R: IntoIterator<Item = E>,
    E: IntoIterator<Item = (usize, f64)>,
{
    let mut entries = Vec::new();
    let mut nrows = 0;
    for (row, entry) in rows.into_iter().enumerate() {
        nrows = row + 1;
        entries.extend(
            entry
                .into_iter()
                .filter(|&(col, val)| col < ncols && val != 0.0)
                .map(|(col, val)| (row, col, val)),
        );
    }

    let mut coo = CooMatrix::new(nrows, ncols);
    for (row, col, val) in entries {
        coo.push(row, col, val);
    }
    CscMatrix::from(&coo)
}
