//! Many-body Hamiltonian assembly.
//!
//! For a basis state `|n⟩`, the builder emits the diagonal element
//! ```text
//! Σ_i ε_i n_i + (U/2) Σ_i n_i (n_i - 1)
//! ```
//! and, for every site pair `i < j` with `h[j, i] ≠ 0` and `n_i > 0`, the hop
//! ```text
//! ⟨n - e_i + e_j| H |n⟩ = h[j, i] sqrt(n_i (n_j + 1))
//! ```
//! together with its conjugate on the transposed position. Each pair of
//! connected states is visited exactly once, and the target index is found
//! through the basis encoding instead of a scan over the basis, so assembly
//! costs `O(D L N)` for `D` states, `L` links, and `N` sites.

use ndarray as nd;
use num_complex::Complex64 as C64;
use rayon::iter::{ IntoParallelIterator, ParallelIterator };
use crate::{
    basis::BasisSet,
    error::{ BoseHubbardError, BoseHubbardResult },
    model::Model,
    sparse::{ CooBuilder, CooMatrix },
};

type Hops = [Vec<(usize, C64)>];

/// Hamiltonian builder for a Bose-Hubbard model restricted to one basis.
///
/// The builder only borrows its inputs and keeps no state between calls.
#[derive(Copy, Clone, Debug)]
pub struct HBuilder<'a> {
    basis: &'a BasisSet,
    model: &'a Model,
}

impl<'a> HBuilder<'a> {
    /// Create a new `HBuilder`.
    ///
    /// Fails with [`BoseHubbardError::DimensionMismatch`] if the model and the
    /// basis disagree on the number of sites.
    pub fn new(basis: &'a BasisSet, model: &'a Model)
        -> BoseHubbardResult<Self>
    {
        if model.num_sites() != basis.sites() {
            return Err(BoseHubbardError::DimensionMismatch {
                expected: model.num_sites(),
                found: basis.sites(),
            });
        }
        Ok(Self::new_unchecked(basis, model))
    }

    pub(crate) fn new_unchecked(basis: &'a BasisSet, model: &'a Model) -> Self {
        Self { basis, model }
    }

    /// Get a reference to the basis.
    pub fn basis(&self) -> &'a BasisSet { self.basis }

    /// Get a reference to the model.
    pub fn model(&self) -> &'a Model { self.model }

    fn diagonal_element(&self, state: nd::ArrayView1<'_, usize>) -> f64 {
        let u = self.model.interaction();
        state.iter().zip(self.model.onsite())
            .map(|(n, e)| {
                let n = *n as f64;
                e * n + 0.5 * u * n * (n - 1.0)
            })
            .sum()
    }

    /// Compute the diagonal (onsite + interaction) part of the Hamiltonian.
    pub fn diagonal(&self) -> nd::Array1<f64> {
        self.basis.iter().into_iter()
            .map(|state| self.diagonal_element(state))
            .collect()
    }

    // all entries in column `k` of the upper hops, plus their conjugates and
    // the diagonal, in a fixed order
    fn state_entries(
        &self,
        k: usize,
        hops: &Hops,
        scratch: &mut [usize],
        out: &mut Vec<(usize, usize, C64)>,
    ) {
        let state = self.basis.states().row(k);
        out.push((k, k, C64::from(self.diagonal_element(state))));
        scratch.iter_mut().zip(state.iter())
            .for_each(|(s, n)| { *s = *n; });
        let encoding = self.basis.encoding();
        for (i, ni) in state.iter().enumerate() {
            if *ni == 0 { continue; }
            for (j, h) in hops[i].iter() {
                let nj = state[*j];
                scratch[i] -= 1;
                scratch[*j] += 1;
                let target = encoding.rank_unchecked(scratch);
                scratch[i] += 1;
                scratch[*j] -= 1;
                let amp = *h * ((*ni * (nj + 1)) as f64).sqrt();
                out.push((target, k, amp));
                out.push((k, target, amp.conj()));
            }
        }
    }

    /// Compute the sparse many-body Hamiltonian.
    pub fn gen_sparse(&self) -> CooMatrix {
        let dim = self.basis.size();
        let hops = self.model.forward_hops();
        let num_hops: usize = hops.iter().map(Vec::len).sum();
        let mut acc
            = CooBuilder::with_capacity(
                dim, dim.saturating_mul(1 + 2 * num_hops));
        let mut scratch: Vec<usize> = vec![0; self.basis.sites()];
        let mut out: Vec<(usize, usize, C64)> = Vec::new();
        for k in 0..dim {
            self.state_entries(k, &hops, &mut scratch, &mut out);
            acc.extend_unchecked(out.drain(..));
        }
        let H = acc.finish();
        tracing::debug!(
            sites = self.basis.sites(),
            particles = self.basis.particles(),
            dim,
            nnz = H.nnz(),
            "assembled Hamiltonian"
        );
        H
    }

    /// Compute the sparse many-body Hamiltonian, sharding basis states across
    /// threads.
    ///
    /// Per-state entries are concatenated in basis order before merging, so
    /// the result is identical to [`Self::gen_sparse`] bit for bit.
    pub fn gen_sparse_par(&self) -> CooMatrix {
        let dim = self.basis.size();
        let sites = self.basis.sites();
        let hops = self.model.forward_hops();
        let entries: Vec<(usize, usize, C64)>
            = (0..dim).into_par_iter()
            .map_init(
                || vec![0; sites],
                |scratch, k| {
                    let mut out: Vec<(usize, usize, C64)> = Vec::new();
                    self.state_entries(k, &hops, scratch, &mut out);
                    out
                },
            )
            .flatten_iter()
            .collect();
        let mut acc = CooBuilder::new(dim);
        acc.extend_unchecked(entries);
        let H = acc.finish();
        tracing::debug!(dim, nnz = H.nnz(), "assembled Hamiltonian in parallel");
        H
    }

    /// Compute the many-body Hamiltonian as a dense array.
    pub fn gen_static(&self) -> nd::Array2<C64> {
        self.gen_sparse().to_dense()
    }

    /// Diagonalize the [dense representation][Self::gen_static] of the
    /// Hamiltonian, returning eigenvalues in ascending order and eigenvectors
    /// as columns.
    #[cfg(feature = "linalg")]
    pub fn diagonalize(&self)
        -> BoseHubbardResult<(nd::Array1<f64>, nd::Array2<C64>)>
    {
        use ndarray_linalg::{ EighInto, UPLO };
        Ok(self.gen_static().eigh_into(UPLO::Lower)?)
    }

    /// Diagonalize the Hamiltonian and return a ground state of the sector.
    ///
    /// Note that, in general, there may be more than one state that minimizes
    /// the energy; this method offers no guarantees about which ground state is
    /// returned.
    #[cfg(feature = "linalg")]
    pub fn ground_state(&self) -> BoseHubbardResult<(f64, nd::Array1<C64>)> {
        let (E, V) = self.diagonalize()?;
        if E.is_empty() {
            return Err(BoseHubbardError::OutOfRange { index: 0, size: 0 });
        }
        let e: f64 = E[0];
        let v: nd::Array1<C64> = V.slice(nd::s![.., 0]).to_owned();
        Ok((e, v))
    }
}
