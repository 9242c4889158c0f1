//! Many-body Fock bases of fixed total particle number.

use std::fmt;
use itertools::Itertools;
use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::{ One, Zero };
use crate::{
    encoding::OccupationEncoding,
    error::{ BoseHubbardError, BoseHubbardResult },
};

/* Enumeration ****************************************************************/

/// Step `occupation` to its successor in the canonical (descending
/// lexicographic) order, returning `false` if it was already the last state.
///
/// The rightmost occupied site before the last one gives up a particle to its
/// right neighbor, which also collects everything on the last site.
pub(crate) fn advance(occupation: &mut [usize]) -> bool {
    let n = occupation.len();
    if n < 2 { return false; }
    let Some(p) = (0..n - 1).rev().find(|p| occupation[*p] > 0)
        else { return false; };
    let tail = occupation[n - 1];
    occupation[n - 1] = 0;
    occupation[p] -= 1;
    occupation[p + 1] = tail + 1;
    true
}

/// Iterator over all occupation vectors of a sector in canonical order.
///
/// States are generated directly in order; nothing is sorted.
#[derive(Clone, Debug)]
pub struct Compositions {
    next: Option<Vec<usize>>,
}

impl Compositions {
    /// Start enumerating `particles` bosons on `sites` sites.
    pub fn new(sites: usize, particles: usize) -> Self {
        let next
            = if sites == 0 {
                (particles == 0).then(Vec::new)
            } else {
                let mut first = vec![0; sites];
                first[0] = particles;
                Some(first)
            };
        Self { next }
    }
}

impl Iterator for Compositions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut succ = current.clone();
        if advance(&mut succ) { self.next = Some(succ); }
        Some(current)
    }
}

/* Basis **********************************************************************/

/// The ordered set of all occupation vectors with a fixed number of sites and
/// particles.
///
/// States are stored row-wise in a single `size × sites` array, and lookups go
/// through an [`OccupationEncoding`] rather than a search over the rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasisSet {
    encoding: OccupationEncoding,
    states: nd::Array2<usize>,
}

impl BasisSet {
    /// Enumerate the sector of `particles` bosons on `sites` sites.
    ///
    /// Fails with [`BoseHubbardError::InvalidSector`] if the number of states
    /// cannot be indexed or the states cannot be stored.
    pub fn new(sites: usize, particles: usize) -> BoseHubbardResult<Self> {
        let too_large = || {
            BoseHubbardError::sector(sites, particles, "basis too large")
        };
        let encoding = OccupationEncoding::new(sites, particles)?;
        let size = encoding.size();
        let len = size.checked_mul(sites).ok_or_else(too_large)?;
        let mut flat: Vec<usize> = Vec::new();
        flat.try_reserve_exact(len).map_err(|_| too_large())?;
        if let Some(mut current) = Compositions::new(sites, particles).next {
            loop {
                flat.extend_from_slice(&current);
                if !advance(&mut current) { break; }
            }
        }
        let states
            = nd::Array2::from_shape_vec((size, sites), flat)
            .map_err(|_| {
                BoseHubbardError::sector(
                    sites, particles, "enumeration does not match sector size")
            })?;
        tracing::debug!(sites, particles, size, "enumerated basis");
        Ok(Self { encoding, states })
    }

    /// Number of lattice sites.
    pub fn sites(&self) -> usize { self.encoding.sites() }

    /// Total particle number.
    pub fn particles(&self) -> usize { self.encoding.particles() }

    /// Number of basis states.
    pub fn size(&self) -> usize { self.states.nrows() }

    /// Return `true` if the basis holds no states.
    pub fn is_empty(&self) -> bool { self.size() == 0 }

    /// Return a reference to the underlying encoding.
    pub fn encoding(&self) -> &OccupationEncoding { &self.encoding }

    /// Return all states as a `size × sites` array, one state per row.
    pub fn states(&self) -> &nd::Array2<usize> { &self.states }

    /// Return the occupation vector at `index`.
    ///
    /// Fails with [`BoseHubbardError::OutOfRange`] if `index` is not less than
    /// [`Self::size`].
    pub fn vector_at(&self, index: usize)
        -> BoseHubbardResult<nd::ArrayView1<'_, usize>>
    {
        if index >= self.size() {
            return Err(
                BoseHubbardError::OutOfRange { index, size: self.size() });
        }
        Ok(self.states.row(index))
    }

    /// Return the index of an occupation vector.
    ///
    /// Fails with [`BoseHubbardError::NotInBasis`] if the vector has the wrong
    /// length or total particle number.
    pub fn index_of(&self, occupation: &[usize]) -> BoseHubbardResult<usize> {
        self.encoding.rank(occupation)
    }

    /// Return `true` if `occupation` is a state of this basis.
    pub fn contains(&self, occupation: &[usize]) -> bool {
        self.encoding.contains(occupation)
    }

    /// Iterate over all states in canonical order.
    pub fn iter(&self) -> nd::iter::Lanes<'_, usize, nd::Ix1> {
        self.states.rows()
    }

    /// Get an array representation of a particular basis state.
    pub fn get_vector(&self, occupation: &[usize])
        -> BoseHubbardResult<nd::Array1<C64>>
    {
        self.index_of(occupation)
            .and_then(|k| self.get_vector_index(k))
    }

    /// Get an array representation of a particular basis state by index.
    pub fn get_vector_index(&self, index: usize)
        -> BoseHubbardResult<nd::Array1<C64>>
    {
        let n = self.size();
        if index >= n {
            return Err(BoseHubbardError::OutOfRange { index, size: n });
        }
        Ok(
            (0..n).map(|j| if j == index { C64::one() } else { C64::zero() })
                .collect()
        )
    }

    /// Get an array representation of a linear combination of basis states,
    /// with weights determined by a weighting function.
    ///
    /// The weighting function is passed each occupation vector and its index.
    pub fn get_vector_weighted<F>(&self, weights: F) -> nd::Array1<C64>
    where F: Fn(nd::ArrayView1<'_, usize>, usize) -> C64
    {
        self.states.rows().into_iter().enumerate()
            .map(|(index, state)| weights(state, index))
            .collect()
    }

    /// Compute the expected occupation of every site for a state vector given
    /// in this basis.
    ///
    /// The state is not renormalized.
    pub fn mean_occupation(&self, psi: &nd::Array1<C64>)
        -> BoseHubbardResult<nd::Array1<f64>>
    {
        if psi.len() != self.size() {
            return Err(BoseHubbardError::DimensionMismatch {
                expected: self.size(),
                found: psi.len(),
            });
        }
        let probs: nd::Array1<f64> = psi.mapv(|a| a.norm_sqr());
        Ok(self.states.mapv(|n| n as f64).t().dot(&probs))
    }
}

impl fmt::Display for BasisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.size().saturating_sub(1).to_string().len();
        for (k, state) in self.states.rows().into_iter().enumerate() {
            writeln!(f, "{:w$} : |{}>", k, state.iter().join(", "), w = w)?;
        }
        Ok(())
    }
}
