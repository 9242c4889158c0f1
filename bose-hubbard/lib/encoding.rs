//! Canonical ordering of bosonic occupation vectors.
//!
//! All occupation vectors of a sector with `N` sites and `M` particles are
//! ordered *descending-lexicographically*, reading sites left to right. The
//! first state is always `[M, 0, ..., 0]` and the last is `[0, ..., 0, M]`; for
//! `M = 1` the particle on site `k` sits at index `k`.
//!
//! Writing `C(m, n)` for the number of ways to place `m` bosons on `n` sites
//! and `r_p` for the number of particles on sites `p..N`, the rank of `v` is
//! ```text
//! rank(v) = Σ_{p : v_p < r_p} C(r_p - v_p - 1, N - p)
//! ```
//! which is the number of vectors sharing a prefix with `v` but holding more
//! particles at the first position where they differ.

use crate::error::{ BoseHubbardError, BoseHubbardResult };

/// Return the number of ways to distribute `m` indistinguishable particles over
/// `n` sites, `C(n + m - 1, m)`, or `None` if the result does not fit in a
/// `usize`.
///
/// By convention there is exactly one way to place zero particles on zero
/// sites and none to place any more.
pub fn sector_size(n: usize, m: usize) -> Option<usize> {
    if n == 0 { return Some(usize::from(m == 0)); }
    let top = n.checked_add(m)? - 1;
    let k = m.min(n - 1);
    let mut acc: u128 = 1;
    for i in 1..=k {
        // exact at every step: a product of i consecutive integers divides i!
        acc = acc.checked_mul((top - k + i) as u128)? / i as u128;
    }
    usize::try_from(acc).ok()
}

/// Bijection between the occupation vectors of a single sector and the
/// integers `0..size`.
///
/// The table of composition counts is built once, so [`Self::rank`] costs
/// `O(N)` lookups and never touches the basis itself. Counts on one or two
/// sites have closed forms and are never tabulated, which keeps the table no
/// larger than `(M + 1)(N - 2)` entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupationEncoding {
    sites: usize,
    particles: usize,
    // counts[(n - 3) * (particles + 1) + m] = C(m, n) for n >= 3
    counts: Vec<usize>,
}

// C(m, n) for n <= 2
fn few_sites_count(m: usize, n: usize) -> usize {
    match n {
        0 => usize::from(m == 0),
        1 => 1,
        _ => m + 1,
    }
}

impl OccupationEncoding {
    /// Build the encoding for `particles` bosons on `sites` sites.
    ///
    /// Fails with [`BoseHubbardError::InvalidSector`] if the sector is too
    /// large to index with a `usize` or its count table cannot be allocated.
    pub fn new(sites: usize, particles: usize) -> BoseHubbardResult<Self> {
        let too_large = || {
            BoseHubbardError::sector(sites, particles, "basis too large")
        };
        sector_size(sites, particles).ok_or_else(too_large)?;
        let width = particles.checked_add(1).ok_or_else(too_large)?;
        let len
            = width.checked_mul(sites.saturating_sub(2))
            .ok_or_else(too_large)?;
        let mut counts: Vec<usize> = Vec::new();
        counts.try_reserve_exact(len).map_err(|_| too_large())?;
        for n in 3..=sites {
            for m in 0..=particles {
                // either site n - 1 is empty or it holds at least one particle
                let empty
                    = if n == 3 {
                        few_sites_count(m, 2)
                    } else {
                        counts[(n - 4) * width + m]
                    };
                let occupied
                    = if m == 0 { 0 } else { counts[(n - 3) * width + m - 1] };
                counts.push(empty.checked_add(occupied).ok_or_else(too_large)?);
            }
        }
        Ok(Self { sites, particles, counts })
    }

    /// Number of lattice sites.
    pub fn sites(&self) -> usize { self.sites }

    /// Total particle number.
    pub fn particles(&self) -> usize { self.particles }

    /// Number of occupation vectors in the sector.
    pub fn size(&self) -> usize { self.count(self.particles, self.sites) }

    fn count(&self, m: usize, n: usize) -> usize {
        if n < 3 {
            few_sites_count(m, n)
        } else {
            self.counts[(n - 3) * (self.particles + 1) + m]
        }
    }

    /// Return `true` if `occupation` has the right length and total.
    pub fn contains(&self, occupation: &[usize]) -> bool {
        occupation.len() == self.sites
            && occupation.iter()
                .try_fold(0_usize, |acc, n| acc.checked_add(*n))
                == Some(self.particles)
    }

    /// Return the position of `occupation` in the canonical order.
    ///
    /// Fails with [`BoseHubbardError::NotInBasis`] if the vector has the wrong
    /// length or the wrong total particle number.
    pub fn rank(&self, occupation: &[usize]) -> BoseHubbardResult<usize> {
        if !self.contains(occupation) {
            return Err(BoseHubbardError::NotInBasis {
                occupation: occupation.to_vec(),
                sites: self.sites,
                particles: self.particles,
            });
        }
        Ok(self.rank_unchecked(occupation))
    }

    /// [`Self::rank`] without validating the input.
    pub(crate) fn rank_unchecked(&self, occupation: &[usize]) -> usize {
        let mut remaining = self.particles;
        let mut index: usize = 0;
        for (p, np) in occupation.iter().enumerate() {
            if *np < remaining {
                index += self.count(remaining - np - 1, self.sites - p);
            }
            remaining -= np;
        }
        index
    }

    /// Return the occupation vector at position `index` in the canonical
    /// order.
    ///
    /// Fails with [`BoseHubbardError::OutOfRange`] if `index` is not less than
    /// [`Self::size`].
    pub fn unrank(&self, index: usize) -> BoseHubbardResult<Vec<usize>> {
        let size = self.size();
        if index >= size {
            return Err(BoseHubbardError::OutOfRange { index, size });
        }
        let mut occupation: Vec<usize> = vec![0; self.sites];
        let mut remaining = self.particles;
        let mut rest = index;
        for (p, np) in occupation.iter_mut().enumerate() {
            let after = self.sites - p - 1;
            if after == 0 {
                *np = remaining;
                break;
            }
            // blocks of states with the same prefix, largest occupation first
            let mut value = remaining;
            loop {
                let block = self.count(remaining - value, after);
                if rest < block || value == 0 { break; }
                rest -= block;
                value -= 1;
            }
            *np = value;
            remaining -= value;
        }
        Ok(occupation)
    }
}

/// Rank a single occupation vector in the sector implied by its own length and
/// total.
pub fn rank(occupation: &[usize]) -> BoseHubbardResult<usize> {
    let particles
        = occupation.iter()
        .try_fold(0_usize, |acc, n| acc.checked_add(*n))
        .ok_or_else(|| {
            BoseHubbardError::sector(
                occupation.len(), usize::MAX, "particle count overflows")
        })?;
    OccupationEncoding::new(occupation.len(), particles)?.rank(occupation)
}

/// Inverse of [`rank`] for a sector of `particles` bosons on `sites` sites.
pub fn unrank(index: usize, sites: usize, particles: usize)
    -> BoseHubbardResult<Vec<usize>>
{
    OccupationEncoding::new(sites, particles)?.unrank(index)
}
