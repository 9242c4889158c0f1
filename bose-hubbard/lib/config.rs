//! Validated model input read from TOML.
//!
//! This is the only place where loosely shaped user input is checked; once a
//! [`ModelConfig`] has been [validated][ModelConfig::validate] the core works
//! exclusively with typed [`Model`]s and particle numbers.
//!
//! ```toml
//! onsite = [0.0, 0.0, 0.0]
//! interaction = 2.0
//! sectors = [1, 2]
//!
//! [[links]]
//! sites = [0, 1]
//! amplitude = -1.0
//!
//! [[links]]
//! sites = [1, 2]   # amplitude defaults to -1
//!
//! [[links]]
//! sites = [2, 0]   # purely imaginary, 0.5i
//! amplitude_im = 0.5
//! ```

use std::{ fs, path::Path, str::FromStr };
use itertools::Itertools;
use num_complex::Complex64 as C64;
use serde::Deserialize;
use thiserror::Error;
use crate::{
    error::BoseHubbardError,
    model::{ Link, Model },
};

/// Hopping amplitude used for a link that gives neither a real nor an imaginary
/// part.
pub const DEFAULT_AMPLITUDE: f64 = -1.0;

/// Errors arising from reading or validating a model configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error(transparent)]
    Model(#[from] BoseHubbardError),
}

/// A single hopping link as written in a config file.
///
/// A missing part counts as zero, unless both are missing, in which case the
/// link gets [`DEFAULT_AMPLITUDE`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    pub sites: [i64; 2],
    #[serde(default)]
    pub amplitude: Option<f64>,
    #[serde(default)]
    pub amplitude_im: Option<f64>,
}

/// Raw model description as written in a config file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Onsite energies, one per site.
    pub onsite: Vec<f64>,
    #[serde(default)]
    pub links: Vec<LinkConfig>,
    /// Onsite interaction strength `U`.
    #[serde(default)]
    pub interaction: f64,
    /// Particle numbers to compute.
    #[serde(default)]
    pub sectors: Vec<i64>,
}

/// Output of [`ModelConfig::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedConfig {
    pub model: Model,
    /// Requested particle numbers, deduplicated, in order of first appearance.
    pub sectors: Vec<usize>,
}

impl FromStr for ModelConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl ModelConfig {
    /// Read a config from a TOML file.
    pub fn from_file<P>(path: P) -> Result<Self, ConfigError>
    where P: AsRef<Path>
    {
        fs::read_to_string(path)?.parse()
    }

    fn check_finite(x: f64, what: &str) -> Result<(), ConfigError> {
        if x.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(format!("{what} must be finite, got {x}")))
        }
    }

    fn site(&self, k: usize, site: i64) -> Result<usize, ConfigError> {
        usize::try_from(site)
            .ok()
            .filter(|s| *s < self.onsite.len())
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "link {k}: site {site} is outside 0..{}", self.onsite.len()))
            })
    }

    /// Check everything once and produce a typed [`Model`].
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        for (k, e) in self.onsite.iter().enumerate() {
            Self::check_finite(*e, &format!("onsite energy {k}"))?;
        }
        Self::check_finite(self.interaction, "interaction")?;
        let links: Vec<Link>
            = self.links.iter().enumerate()
            .map(|(k, link)| -> Result<Link, ConfigError> {
                let from = self.site(k, link.sites[0])?;
                let to = self.site(k, link.sites[1])?;
                let (re, im)
                    = match (link.amplitude, link.amplitude_im) {
                        (None, None) => (DEFAULT_AMPLITUDE, 0.0),
                        (re, im) => (re.unwrap_or(0.0), im.unwrap_or(0.0)),
                    };
                Self::check_finite(re, &format!("link {k} amplitude"))?;
                Self::check_finite(im, &format!("link {k} amplitude_im"))?;
                Ok(Link::new(from, to, C64::new(re, im)))
            })
            .collect::<Result<_, ConfigError>>()?;
        let sites = self.onsite.len();
        let sectors: Vec<usize>
            = self.sectors.iter()
            .unique()
            .map(|m| {
                usize::try_from(*m)
                    .map_err(|_| BoseHubbardError::InvalidSector {
                        sites,
                        particles: *m,
                        reason: "negative particle number",
                    })
            })
            .collect::<Result<_, BoseHubbardError>>()?;
        let model = Model::new(self.onsite.clone(), links, self.interaction)?;
        Ok(ValidatedConfig { model, sectors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = r#"
        onsite = [0.0, 0.5, 1.0]
        interaction = 2.0
        sectors = [2, 1, 2]

        [[links]]
        sites = [0, 1]
        amplitude = 0.25

        [[links]]
        sites = [1, 2]

        [[links]]
        sites = [2, 0]
        amplitude_im = 1.0
    "#;

    #[test]
    fn parses_and_validates() {
        let config: ModelConfig = TRIANGLE.parse().unwrap();
        assert_eq!(config.links.len(), 3);
        let ValidatedConfig { model, sectors } = config.validate().unwrap();
        assert_eq!(sectors, vec![2, 1]);
        assert_eq!(model.num_sites(), 3);
        assert_eq!(model.interaction(), 2.0);
        let h = model.hopping_matrix();
        assert_eq!(h[[0, 1]], C64::from(0.25));
        assert_eq!(h[[1, 2]], C64::from(DEFAULT_AMPLITUDE));
        assert_eq!(h[[2, 0]], C64::new(0.0, 1.0));
        assert_eq!(h[[0, 2]], C64::new(0.0, -1.0));
        assert!(!model.is_real());
    }

    #[test]
    fn missing_parts_count_as_zero() {
        let config: ModelConfig
            = "onsite = [0.0, 0.0]\n\
               [[links]]\nsites = [0, 1]\namplitude = 0.5"
            .parse().unwrap();
        let model = config.validate().unwrap().model;
        assert_eq!(model.hopping_matrix()[[0, 1]], C64::new(0.5, 0.0));

        let config: ModelConfig
            = "onsite = [0.0, 0.0]\n\
               [[links]]\nsites = [0, 1]\namplitude_im = 0.5"
            .parse().unwrap();
        let model = config.validate().unwrap().model;
        assert_eq!(model.hopping_matrix()[[0, 1]], C64::new(0.0, 0.5));
        assert_eq!(model.hopping_matrix()[[1, 0]], C64::new(0.0, -0.5));
    }

    #[test]
    fn rejects_negative_sector() {
        let config: ModelConfig
            = "onsite = [0.0, 0.0]\nsectors = [1, -1]".parse().unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Model(BoseHubbardError::InvalidSector {
                particles: -1, ..
            }))
        ));
    }

    #[test]
    fn rejects_bad_sites_and_numbers() {
        let negative: ModelConfig
            = "onsite = [0.0, 0.0]\n[[links]]\nsites = [-1, 1]"
            .parse().unwrap();
        assert!(matches!(negative.validate(), Err(ConfigError::Invalid(_))));

        let outside: ModelConfig
            = "onsite = [0.0, 0.0]\n[[links]]\nsites = [0, 2]"
            .parse().unwrap();
        assert!(matches!(outside.validate(), Err(ConfigError::Invalid(_))));

        let self_link: ModelConfig
            = "onsite = [0.0, 0.0]\n[[links]]\nsites = [1, 1]"
            .parse().unwrap();
        assert!(matches!(
            self_link.validate(),
            Err(ConfigError::Model(BoseHubbardError::InvalidLink { .. }))
        ));

        let nan: ModelConfig
            = "onsite = [nan, 0.0]".parse().unwrap();
        assert!(matches!(nan.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(
            "onsite = [0.0]\nhopping = 1.0".parse::<ModelConfig>(),
            Err(ConfigError::Toml(_))
        ));
    }
}
