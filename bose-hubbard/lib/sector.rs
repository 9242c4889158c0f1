//! Fixed-particle-number sectors of a [`Model`] and a scoped cache for their
//! bases.

use std::{ cell::OnceCell, sync::Arc };
use ndarray as nd;
use num_complex::Complex64 as C64;
use rustc_hash::FxHashMap as HashMap;
use crate::{
    basis::BasisSet,
    error::{ BoseHubbardError, BoseHubbardResult },
    hamiltonian::HBuilder,
    model::Model,
    sparse::CooMatrix,
};

/// Caller-owned store of bases keyed by `(sites, particles)`.
///
/// Bases depend only on the lattice size and particle number, so one cache can
/// serve many models (e.g. a sweep over `U` or onsite energies). The cache
/// lives exactly as long as its owner.
#[derive(Clone, Debug, Default)]
pub struct BasisCache {
    bases: HashMap<(usize, usize), Arc<BasisSet>>,
}

impl BasisCache {
    /// Create a new, empty cache.
    pub fn new() -> Self { Self::default() }

    /// Return the basis for `particles` bosons on `sites` sites, enumerating
    /// it on first use.
    pub fn get_or_build(&mut self, sites: usize, particles: usize)
        -> BoseHubbardResult<Arc<BasisSet>>
    {
        if let Some(basis) = self.bases.get(&(sites, particles)) {
            tracing::trace!(sites, particles, "basis cache hit");
            return Ok(Arc::clone(basis));
        }
        let basis = Arc::new(BasisSet::new(sites, particles)?);
        self.bases.insert((sites, particles), Arc::clone(&basis));
        Ok(basis)
    }

    /// Number of cached bases.
    pub fn len(&self) -> usize { self.bases.len() }

    /// Return `true` if nothing is cached.
    pub fn is_empty(&self) -> bool { self.bases.is_empty() }

    /// Drop all cached bases.
    pub fn clear(&mut self) { self.bases.clear(); }
}

/// The subspace of a [`Model`] with a fixed total particle number.
///
/// A `Sector` owns (a shared handle to) its basis and memoizes its
/// Hamiltonian on first access.
#[derive(Debug)]
pub struct Sector<'a> {
    model: &'a Model,
    basis: Arc<BasisSet>,
    hamiltonian: OnceCell<CooMatrix>,
}

impl<'a> Sector<'a> {
    /// Pair a model with a basis for the same lattice.
    ///
    /// Fails with [`BoseHubbardError::DimensionMismatch`] if the two disagree
    /// on the number of sites.
    pub fn new(model: &'a Model, basis: Arc<BasisSet>)
        -> BoseHubbardResult<Self>
    {
        if model.num_sites() != basis.sites() {
            return Err(BoseHubbardError::DimensionMismatch {
                expected: model.num_sites(),
                found: basis.sites(),
            });
        }
        Ok(Self { model, basis, hamiltonian: OnceCell::new() })
    }

    /// Return a reference to the model.
    pub fn model(&self) -> &'a Model { self.model }

    /// Return a reference to the basis.
    pub fn basis(&self) -> &BasisSet { &self.basis }

    /// Return a shared handle to the basis.
    pub fn basis_arc(&self) -> Arc<BasisSet> { Arc::clone(&self.basis) }

    /// Total particle number.
    pub fn particles(&self) -> usize { self.basis.particles() }

    /// Dimension of the sector.
    pub fn dim(&self) -> usize { self.basis.size() }

    /// Return a Hamiltonian builder for this sector.
    pub fn builder(&self) -> HBuilder<'_> {
        HBuilder::new_unchecked(&self.basis, self.model)
    }

    /// Return the sparse many-body Hamiltonian, assembling it on first call.
    pub fn hamiltonian(&self) -> &CooMatrix {
        self.hamiltonian.get_or_init(|| self.builder().gen_sparse())
    }

    /// Return a dense copy of the many-body Hamiltonian.
    pub fn dense_hamiltonian(&self) -> nd::Array2<C64> {
        self.hamiltonian().to_dense()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_reuses_bases() {
        let mut cache = BasisCache::new();
        let a = Model::ring(5, 1.0, 0.0).unwrap();
        let b = Model::chain(5, 0.5, 3.0).unwrap();
        let sa = a.sector_cached(2, &mut cache).unwrap();
        let sb = b.sector_cached(2, &mut cache).unwrap();
        assert!(Arc::ptr_eq(&sa.basis_arc(), &sb.basis_arc()));
        assert_eq!(cache.len(), 1);
        a.sector_cached(3, &mut cache).unwrap();
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn sector_rejects_foreign_basis() {
        let model = Model::ring(4, 1.0, 0.0).unwrap();
        let basis = Arc::new(BasisSet::new(3, 1).unwrap());
        assert!(matches!(
            Sector::new(&model, basis),
            Err(BoseHubbardError::DimensionMismatch { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn hamiltonian_is_memoized() {
        let model = Model::ring(4, 1.0, 2.0).unwrap();
        let sector = model.sector(2).unwrap();
        let first: *const CooMatrix = sector.hamiltonian();
        let second: *const CooMatrix = sector.hamiltonian();
        assert_eq!(first, second);
        assert_eq!(sector.dim(), 10);
        assert_eq!(sector.particles(), 2);
    }
}
