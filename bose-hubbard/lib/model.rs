//! Static description of a Bose-Hubbard lattice.
//!
//! A [`Model`] owns the per-site onsite energies, the hopping links, and the
//! uniform onsite interaction strength `U`:
//! ```math
//! H = \sum_i \varepsilon_i n_i
//!     + \frac{U}{2} \sum_i n_i (n_i - 1)
//!     + \sum_{i \neq j} h_{ij} b_i^\dagger b_j
//! ```
//! The single-particle matrix `h` is Hermitian by construction: a link
//! `(i, j, t)` contributes `t` to `h[i, j]` and `t*` to `h[j, i]`.

use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::Zero;
use crate::{
    basis::BasisSet,
    error::{ BoseHubbardError, BoseHubbardResult },
    sector::{ BasisCache, Sector },
};

/// A single hopping term between two distinct sites.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub amplitude: C64,
}

impl Link {
    /// Create a new link.
    pub fn new<A>(from: usize, to: usize, amplitude: A) -> Self
    where A: Into<C64>
    {
        Self { from, to, amplitude: amplitude.into() }
    }

    /// Return the same link, stored in the opposite direction.
    pub fn reversed(self) -> Self {
        Self { from: self.to, to: self.from, amplitude: self.amplitude.conj() }
    }
}

impl From<(usize, usize, f64)> for Link {
    fn from(link: (usize, usize, f64)) -> Self {
        let (from, to, t) = link;
        Self::new(from, to, t)
    }
}

impl From<(usize, usize, C64)> for Link {
    fn from(link: (usize, usize, C64)) -> Self {
        let (from, to, t) = link;
        Self::new(from, to, t)
    }
}

/// Onsite energies, hopping links, and interaction strength of a lattice.
///
/// A `Model` is read-only once built. Particle-number sectors are derived from
/// it on demand and never stored inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    onsite: nd::Array1<f64>,
    links: Vec<Link>,
    interaction: f64,
    hopping: nd::Array2<C64>,
}

impl Model {
    /// Create a new `Model`.
    ///
    /// Fails with [`BoseHubbardError::InvalidLink`] if a link refers to a site
    /// outside the lattice, connects a site to itself, or has a non-finite
    /// amplitude.
    pub fn new<E, I, L>(onsite: E, links: I, interaction: f64)
        -> BoseHubbardResult<Self>
    where
        E: Into<nd::Array1<f64>>,
        I: IntoIterator<Item = L>,
        L: Into<Link>,
    {
        let onsite: nd::Array1<f64> = onsite.into();
        let sites = onsite.len();
        let links: Vec<Link> = links.into_iter().map(Into::into).collect();
        let mut hopping: nd::Array2<C64>
            = nd::Array2::from_diag(&onsite.mapv(C64::from));
        for link in links.iter() {
            let Link { from, to, amplitude } = *link;
            let invalid = |reason| {
                BoseHubbardError::InvalidLink { from, to, sites, reason }
            };
            if from >= sites || to >= sites {
                return Err(invalid("site out of range"));
            }
            if from == to {
                return Err(invalid("self-link"));
            }
            if !amplitude.is_finite() {
                return Err(invalid("non-finite amplitude"));
            }
            // duplicates accumulate
            hopping[[from, to]] += amplitude;
            hopping[[to, from]] += amplitude.conj();
        }
        Ok(Self { onsite, links, interaction, hopping })
    }

    /// Uniform hopping `t` around a closed ring of `sites` sites, with zero
    /// onsite energies.
    pub fn ring(sites: usize, t: f64, interaction: f64)
        -> BoseHubbardResult<Self>
    {
        let links: Vec<Link>
            = match sites {
                0 | 1 => Vec::new(),
                2 => vec![Link::new(0, 1, t)],
                _ => (0..sites).map(|i| Link::new(i, (i + 1) % sites, t))
                    .collect(),
            };
        Self::new(nd::Array1::zeros(sites), links, interaction)
    }

    /// Uniform hopping `t` along an open chain of `sites` sites, with zero
    /// onsite energies.
    pub fn chain(sites: usize, t: f64, interaction: f64)
        -> BoseHubbardResult<Self>
    {
        let links: Vec<Link>
            = (1..sites).map(|i| Link::new(i - 1, i, t)).collect();
        Self::new(nd::Array1::zeros(sites), links, interaction)
    }

    /// Number of lattice sites.
    pub fn num_sites(&self) -> usize { self.onsite.len() }

    /// Onsite energies, one per site.
    pub fn onsite(&self) -> &nd::Array1<f64> { &self.onsite }

    /// Hopping links, as supplied.
    pub fn links(&self) -> &[Link] { &self.links }

    /// Onsite interaction strength `U`.
    pub fn interaction(&self) -> f64 { self.interaction }

    /// The single-particle Hamiltonian: onsite energies on the diagonal and
    /// summed link amplitudes off the diagonal.
    pub fn hopping_matrix(&self) -> &nd::Array2<C64> { &self.hopping }

    /// Return `true` if every hopping amplitude is real.
    pub fn is_real(&self) -> bool {
        self.links.iter().all(|link| link.amplitude.im == 0.0)
    }

    /// Return the nonzero off-diagonal elements `h[j, i]` for `i < j`, grouped
    /// by `i`.
    ///
    /// Moving one particle from `i` to `j` carries amplitude `h[j, i]`; the
    /// reverse move is its conjugate.
    pub(crate) fn forward_hops(&self) -> Vec<Vec<(usize, C64)>> {
        let n = self.num_sites();
        (0..n)
            .map(|i| {
                (i + 1..n)
                    .filter_map(|j| {
                        let h = self.hopping[[j, i]];
                        (!h.is_zero()).then_some((j, h))
                    })
                    .collect()
            })
            .collect()
    }

    /// Derive the sector with `particles` bosons, enumerating a fresh basis.
    pub fn sector(&self, particles: usize) -> BoseHubbardResult<Sector<'_>> {
        let basis = BasisSet::new(self.num_sites(), particles)?;
        Sector::new(self, basis.into())
    }

    /// Derive the sector with `particles` bosons, reusing a basis from `cache`
    /// if one was already built for this lattice size.
    pub fn sector_cached(&self, particles: usize, cache: &mut BasisCache)
        -> BoseHubbardResult<Sector<'_>>
    {
        let basis = cache.get_or_build(self.num_sites(), particles)?;
        Sector::new(self, basis)
    }
}
