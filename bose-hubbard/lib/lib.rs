//! Exact many-body bases and sparse Hamiltonians for Bose-Hubbard models.
//!
//! A [`Model`] describes the lattice: onsite energies, hopping links, and an
//! onsite interaction strength. For a fixed particle number it yields a
//! [`Sector`], which owns the enumerated [`BasisSet`] and lazily assembles the
//! sparse many-body Hamiltonian through an [`HBuilder`].
//!
//! ```
//! use bose_hubbard::Model;
//!
//! let model = Model::ring(8, 0.1, 2.0).unwrap();
//! let sector = model.sector(2).unwrap();
//! assert_eq!(sector.dim(), 36);
//! assert!(sector.hamiltonian().is_hermitian(1e-12));
//! ```

#![allow(non_snake_case)]

pub mod utils;
pub mod error;
pub mod encoding;
pub mod basis;
pub mod model;
pub mod sparse;
pub mod hamiltonian;
pub mod sector;
pub mod config;

pub use error::{ BoseHubbardError, BoseHubbardResult };
pub use encoding::{ OccupationEncoding, rank, unrank, sector_size };
pub use basis::{ BasisSet, Compositions };
pub use model::{ Link, Model };
pub use sparse::{ CooBuilder, CooMatrix, CsrMatrix };
pub use hamiltonian::HBuilder;
pub use sector::{ BasisCache, Sector };
pub use config::{ ConfigError, LinkConfig, ModelConfig, ValidatedConfig };

#[doc(hidden)]
pub use ndarray_npy;
