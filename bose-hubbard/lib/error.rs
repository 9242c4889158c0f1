//! Error types for basis enumeration and Hamiltonian assembly.
//!
//! Every variant describes a violated precondition on the caller's side; none
//! of them are transient, so nothing here is retried.

use thiserror::Error;

/// Errors raised by the core.
#[derive(Debug, Error)]
pub enum BoseHubbardError {
    /// The requested particle number cannot be represented as a sector.
    #[error("invalid sector: {particles} particles on {sites} sites ({reason})")]
    InvalidSector {
        sites: usize,
        particles: i64,
        reason: &'static str,
    },

    /// A basis (or matrix) index lies outside `[0, size)`.
    #[error("index {index} out of range for size {size}")]
    OutOfRange { index: usize, size: usize },

    /// An occupation vector has the wrong length or the wrong total.
    #[error(
        "occupation vector {occupation:?} is not in the basis of {particles} \
        particles on {sites} sites"
    )]
    NotInBasis {
        occupation: Vec<usize>,
        sites: usize,
        particles: usize,
    },

    /// Two objects disagree on a dimension (site count or vector length).
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A hopping link cannot be placed on the lattice.
    #[error("invalid link {from} -> {to} on {sites} sites: {reason}")]
    InvalidLink {
        from: usize,
        to: usize,
        sites: usize,
        reason: &'static str,
    },

    #[cfg(feature = "linalg")]
    #[error("diagonalization error: {0}")]
    Linalg(#[from] ndarray_linalg::error::LinalgError),
}

pub type BoseHubbardResult<T> = Result<T, BoseHubbardError>;

impl BoseHubbardError {
    pub(crate) fn sector(sites: usize, particles: usize, reason: &'static str)
        -> Self
    {
        Self::InvalidSector {
            sites,
            particles: i64::try_from(particles).unwrap_or(i64::MAX),
            reason,
        }
    }
}
