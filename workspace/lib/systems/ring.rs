//! Small periodic ring used as a reference scenario.

use bose_hubbard::{ BoseHubbardResult, Model };

/// Number of sites.
pub const N_SITES: usize = 8;

/// Number of bosons.
pub const PARTICLES: usize = 2;

/// Nearest-neighbor hopping amplitude.
pub const HOPPING: f64 = 0.1;

/// Onsite interaction strength.
pub const INTERACTION: f64 = 2.0;

pub fn model() -> BoseHubbardResult<Model> {
    Model::ring(N_SITES, HOPPING, INTERACTION)
}
