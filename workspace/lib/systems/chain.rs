//! Open chain with a linear tilt, useful for checking onsite terms.

use bose_hubbard::{ BoseHubbardResult, Link, Model };

pub const N_SITES: usize = 6;

pub const HOPPING: f64 = -1.0;

pub const INTERACTION: f64 = 4.0;

/// Energy offset between neighboring sites.
pub const TILT: f64 = 0.5;

pub fn model() -> BoseHubbardResult<Model> {
    let onsite: Vec<f64>
        = (0..N_SITES).map(|i| TILT * i as f64).collect();
    let links: Vec<Link>
        = (0..N_SITES - 1).map(|i| Link::new(i, i + 1, HOPPING)).collect();
    Model::new(onsite, links, INTERACTION)
}
