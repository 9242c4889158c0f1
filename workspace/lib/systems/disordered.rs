//! Open chains with random onsite energies.

use anyhow::bail;
use rand::{ Rng, SeedableRng, rngs::StdRng, distributions::Uniform };
use bose_hubbard::{ Link, Model };

pub const N_SITES: usize = 10;

pub const PARTICLES: usize = 3;

pub const HOPPING: f64 = -1.0;

pub const INTERACTION: f64 = 1.0;

/// Full width of the onsite energy distribution.
pub const DISORDER: f64 = 2.0;

/// Parameters for a single disorder realization.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DisorderParams {
    pub sites: usize,
    pub hopping: f64,
    pub interaction: f64,
    /// Onsite energies are drawn uniformly from `[-w/2, w/2]`.
    pub disorder: f64,
}

impl Default for DisorderParams {
    fn default() -> Self {
        Self {
            sites: N_SITES,
            hopping: HOPPING,
            interaction: INTERACTION,
            disorder: DISORDER,
        }
    }
}

impl DisorderParams {
    /// Draw one realization. The same seed always produces the same model.
    pub fn model(&self, seed: u64) -> anyhow::Result<Model> {
        if !self.disorder.is_finite() || self.disorder < 0.0 {
            bail!("disorder strength must be finite and non-negative");
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let dist = Uniform::new_inclusive(-self.disorder / 2.0, self.disorder / 2.0);
        let onsite: Vec<f64>
            = (0..self.sites).map(|_| rng.sample(dist)).collect();
        let links: Vec<Link>
            = (1..self.sites)
            .map(|i| Link::new(i - 1, i, self.hopping))
            .collect();
        Ok(Model::new(onsite, links, self.interaction)?)
    }
}
