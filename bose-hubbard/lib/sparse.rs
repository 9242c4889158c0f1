//! Coordinate- and row-compressed sparse matrices.
//!
//! Entries are accumulated as `(row, col, value)` triplets and merged
//! additively; merging is done after a stable sort so that the summation order
//! of colliding entries, and therefore every bit of the result, depends only on
//! the order in which entries were pushed.

use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::Zero;
use crate::error::{ BoseHubbardError, BoseHubbardResult };

/// Accumulator for the entries of a square sparse matrix.
#[derive(Clone, Debug, Default)]
pub struct CooBuilder {
    dim: usize,
    entries: Vec<(usize, usize, C64)>,
}

impl CooBuilder {
    /// Create a new, empty accumulator for a `dim × dim` matrix.
    pub fn new(dim: usize) -> Self {
        Self { dim, entries: Vec::new() }
    }

    /// Create a new accumulator with room for `capacity` entries.
    pub fn with_capacity(dim: usize, capacity: usize) -> Self {
        Self { dim, entries: Vec::with_capacity(capacity) }
    }

    /// Add `value` to the element at `(row, col)`.
    ///
    /// Fails with [`BoseHubbardError::OutOfRange`] if either index is not less
    /// than the matrix dimension.
    pub fn push(&mut self, row: usize, col: usize, value: C64)
        -> BoseHubbardResult<()>
    {
        let index = row.max(col);
        if index >= self.dim {
            return Err(BoseHubbardError::OutOfRange { index, size: self.dim });
        }
        self.entries.push((row, col, value));
        Ok(())
    }

    /// Append already-validated entries.
    pub(crate) fn extend_unchecked<I>(&mut self, entries: I)
    where I: IntoIterator<Item = (usize, usize, C64)>
    {
        self.entries.extend(entries);
    }

    /// Number of entries pushed so far, before merging.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Return `true` if nothing has been pushed.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Sort, merge, and drop exact zeros.
    pub fn finish(self) -> CooMatrix {
        let Self { dim, mut entries } = self;
        entries.sort_by_key(|(r, c, _)| (*r, *c));
        let mut rows: Vec<usize> = Vec::with_capacity(entries.len());
        let mut cols: Vec<usize> = Vec::with_capacity(entries.len());
        let mut values: Vec<C64> = Vec::with_capacity(entries.len());
        for (r, c, v) in entries.into_iter() {
            match (rows.last(), cols.last(), values.last_mut()) {
                (Some(lr), Some(lc), Some(lv)) if *lr == r && *lc == c => {
                    *lv += v;
                },
                _ => {
                    rows.push(r);
                    cols.push(c);
                    values.push(v);
                },
            }
        }
        let mut k: usize = 0;
        for j in 0..values.len() {
            if values[j].is_zero() { continue; }
            rows[k] = rows[j];
            cols[k] = cols[j];
            values[k] = values[j];
            k += 1;
        }
        rows.truncate(k);
        cols.truncate(k);
        values.truncate(k);
        CooMatrix { dim, rows, cols, values }
    }
}

/// A square sparse matrix in coordinate form, sorted by row then column with at
/// most one entry per position and no stored zeros.
#[derive(Clone, Debug, PartialEq)]
pub struct CooMatrix {
    dim: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<C64>,
}

impl CooMatrix {
    /// Build a matrix from arbitrary triplets, summing duplicates.
    pub fn from_triplets<I>(dim: usize, triplets: I)
        -> BoseHubbardResult<Self>
    where I: IntoIterator<Item = (usize, usize, C64)>
    {
        let mut acc = CooBuilder::new(dim);
        for (r, c, v) in triplets.into_iter() {
            acc.push(r, c, v)?;
        }
        Ok(acc.finish())
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize { self.dim }

    /// Matrix shape, `(dim, dim)`.
    pub fn shape(&self) -> (usize, usize) { (self.dim, self.dim) }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize { self.values.len() }

    /// Row indices of stored entries.
    pub fn rows(&self) -> &[usize] { &self.rows }

    /// Column indices of stored entries.
    pub fn cols(&self) -> &[usize] { &self.cols }

    /// Values of stored entries.
    pub fn values(&self) -> &[C64] { &self.values }

    /// Iterate over `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, C64)> + '_ {
        self.rows.iter().zip(&self.cols).zip(&self.values)
            .map(|((r, c), v)| (*r, *c, *v))
    }

    /// Return the element at `(row, col)`, zero if it is not stored.
    pub fn get(&self, row: usize, col: usize) -> C64 {
        let lo = self.rows.partition_point(|r| *r < row);
        let hi = self.rows.partition_point(|r| *r <= row);
        self.cols[lo..hi].binary_search(&col)
            .map(|k| self.values[lo + k])
            .unwrap_or_else(|_| C64::zero())
    }

    /// Return the diagonal as a dense array.
    pub fn diag(&self) -> nd::Array1<C64> {
        let mut d: nd::Array1<C64> = nd::Array1::zeros(self.dim);
        self.iter()
            .filter(|(r, c, _)| r == c)
            .for_each(|(r, _, v)| { d[r] = v; });
        d
    }

    /// Return `true` if `A[i, j]` and `conj(A[j, i])` agree to within `tol`
    /// for every stored entry.
    pub fn is_hermitian(&self, tol: f64) -> bool {
        self.iter().all(|(r, c, v)| (self.get(c, r).conj() - v).norm() <= tol)
    }

    /// Convert to a dense array.
    pub fn to_dense(&self) -> nd::Array2<C64> {
        let mut H: nd::Array2<C64> = nd::Array2::zeros((self.dim, self.dim));
        self.iter().for_each(|(r, c, v)| { H[[r, c]] += v; });
        H
    }

    /// Convert to compressed sparse row form.
    pub fn to_csr(&self) -> CsrMatrix {
        let mut row_ptr: Vec<usize> = vec![0; self.dim + 1];
        self.rows.iter().for_each(|r| { row_ptr[r + 1] += 1; });
        for k in 0..self.dim {
            row_ptr[k + 1] += row_ptr[k];
        }
        CsrMatrix {
            dim: self.dim,
            row_ptr,
            col_indices: self.cols.clone(),
            values: self.values.clone(),
        }
    }

    /// Compute `A x`.
    pub fn matvec(&self, x: &nd::Array1<C64>)
        -> BoseHubbardResult<nd::Array1<C64>>
    {
        if x.len() != self.dim {
            return Err(BoseHubbardError::DimensionMismatch {
                expected: self.dim,
                found: x.len(),
            });
        }
        let mut y: nd::Array1<C64> = nd::Array1::zeros(self.dim);
        self.iter().for_each(|(r, c, v)| { y[r] += v * x[c]; });
        Ok(y)
    }
}

/// A square sparse matrix in compressed sparse row form.
#[derive(Clone, Debug, PartialEq)]
pub struct CsrMatrix {
    dim: usize,
    row_ptr: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<C64>,
}

impl CsrMatrix {
    /// Matrix dimension.
    pub fn dim(&self) -> usize { self.dim }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize { self.values.len() }

    /// Offsets into [`Self::col_indices`] and [`Self::values`] for each row.
    pub fn row_ptr(&self) -> &[usize] { &self.row_ptr }

    pub fn col_indices(&self) -> &[usize] { &self.col_indices }

    pub fn values(&self) -> &[C64] { &self.values }

    /// Iterate over the `(col, value)` pairs of a single row.
    pub fn row(&self, row: usize)
        -> BoseHubbardResult<impl Iterator<Item = (usize, C64)> + '_>
    {
        if row >= self.dim {
            return Err(BoseHubbardError::OutOfRange { index: row, size: self.dim });
        }
        let range = self.row_ptr[row]..self.row_ptr[row + 1];
        Ok(
            self.col_indices[range.clone()].iter().copied()
                .zip(self.values[range].iter().copied())
        )
    }

    /// Compute `A x`.
    pub fn matvec(&self, x: &nd::Array1<C64>)
        -> BoseHubbardResult<nd::Array1<C64>>
    {
        if x.len() != self.dim {
            return Err(BoseHubbardError::DimensionMismatch {
                expected: self.dim,
                found: x.len(),
            });
        }
        let y: nd::Array1<C64>
            = self.row_ptr.iter().zip(self.row_ptr.iter().skip(1))
            .map(|(start, end)| {
                self.col_indices[*start..*end].iter()
                    .zip(&self.values[*start..*end])
                    .map(|(c, v)| *v * x[*c])
                    .sum::<C64>()
            })
            .collect();
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> C64 { C64::new(re, im) }

    #[test]
    fn merge_is_additive() {
        let A
            = CooMatrix::from_triplets(3, [
                (2, 0, c(1.0, 0.0)),
                (0, 1, c(0.5, 0.5)),
                (2, 0, c(2.0, 0.0)),
                (1, 1, c(1.0, 0.0)),
                (1, 1, c(-1.0, 0.0)),
            ])
            .unwrap();
        assert_eq!(A.shape(), (3, 3));
        assert_eq!(A.nnz(), 2);
        assert_eq!(A.rows(), &[0, 2]);
        assert_eq!(A.cols(), &[1, 0]);
        assert_eq!(A.get(2, 0), c(3.0, 0.0));
        assert_eq!(A.get(1, 1), C64::zero());
        assert_eq!(A.get(0, 2), C64::zero());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            CooMatrix::from_triplets(2, [(0, 2, c(1.0, 0.0))]),
            Err(BoseHubbardError::OutOfRange { index: 2, size: 2 })
        ));
    }

    #[test]
    fn hermiticity_check() {
        let t = c(0.1, 0.2);
        let H
            = CooMatrix::from_triplets(2, [(0, 1, t), (1, 0, t.conj())])
            .unwrap();
        assert!(H.is_hermitian(0.0));
        let A = CooMatrix::from_triplets(2, [(0, 1, t)]).unwrap();
        assert!(!A.is_hermitian(1e-12));
    }

    #[test]
    fn csr_and_dense_agree() {
        let A
            = CooMatrix::from_triplets(3, [
                (0, 0, c(1.0, 0.0)),
                (0, 2, c(0.0, 1.0)),
                (2, 0, c(0.0, -1.0)),
                (2, 2, c(3.0, 0.0)),
            ])
            .unwrap();
        let csr = A.to_csr();
        assert_eq!(csr.row_ptr(), &[0, 2, 2, 4]);
        assert_eq!(csr.row(1).unwrap().count(), 0);
        assert!(csr.row(3).is_err());

        let x = nd::array![c(1.0, 0.0), c(2.0, 0.0), c(0.0, 1.0)];
        let y_coo = A.matvec(&x).unwrap();
        let y_csr = csr.matvec(&x).unwrap();
        let y_dense = A.to_dense().dot(&x);
        assert_eq!(y_coo, y_dense);
        assert_eq!(y_csr, y_dense);
        assert_eq!(A.diag(), nd::array![c(1.0, 0.0), C64::zero(), c(3.0, 0.0)]);
    }
}
