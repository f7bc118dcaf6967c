use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum SiteError {
    #[error(
        "Reduction partner {partner} of particle {particle} is out of range (N = {num_particles})"
    )]
    PartnerOutOfRange {
        particle: usize,
        partner: usize,
        num_particles: usize,
    },
    #[error("Reduction factor {factor} of particle {particle} lies outside [0, 1]")]
    FactorOutOfRange { particle: usize, factor: f64 },
}

/// How reduction factors outside `[0, 1]` are treated when sites are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReductionPolicy {
    /// Reject the evaluation with a data invariant violation.
    #[default]
    Strict,
    /// Clamp the factor into `[0, 1]` and continue.
    Clamp,
}

impl ReductionPolicy {
    /// Checks `factor` for `particle`, returning the value to use.
    ///
    /// NaN is rejected under both policies.
    pub fn apply(self, particle: usize, factor: f64) -> Result<f64, SiteError> {
        if (0.0..=1.0).contains(&factor) {
            return Ok(factor);
        }
        match self {
            Self::Clamp if !factor.is_nan() => Ok(factor.clamp(0.0, 1.0)),
            _ => Err(SiteError::FactorOutOfRange { particle, factor }),
        }
    }
}

/// The effective van der Waals center of one particle.
///
/// A reduced site sits on the segment between `particle` and `partner`:
/// `factor · pos[partner] + (1 - factor) · pos[particle]`. Forces acting on the
/// site are split back onto the two real particles with the same weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReductionSite {
    particle: usize,
    partner: usize,
    factor: f64,
}

impl ReductionSite {
    pub fn new(particle: usize, partner: usize, factor: f64) -> Self {
        Self {
            particle,
            partner,
            factor,
        }
    }

    /// A site located exactly on its particle.
    pub fn unreduced(particle: usize) -> Self {
        Self::new(particle, particle, 0.0)
    }

    pub fn particle(&self) -> usize {
        self.particle
    }

    pub fn partner(&self) -> usize {
        self.partner
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    #[inline]
    pub fn is_reduced(&self) -> bool {
        self.partner != self.particle
    }

    #[inline]
    pub fn resolve(&self, positions: &[Point3<f64>]) -> Point3<f64> {
        let own = &positions[self.particle];
        if !self.is_reduced() {
            return *own;
        }
        let partner = &positions[self.partner];
        let r = self.factor;
        Point3::new(
            r * partner.x + (1.0 - r) * own.x,
            r * partner.y + (1.0 - r) * own.y,
            r * partner.z + (1.0 - r) * own.z,
        )
    }

    /// Adds `force`, acting on this site, onto the real particles that define it.
    #[inline]
    pub fn distribute(&self, force: &Vector3<f64>, forces: &mut [Vector3<f64>]) {
        if !self.is_reduced() {
            forces[self.particle] += force;
            return;
        }
        forces[self.particle] += force * (1.0 - self.factor);
        forces[self.partner] += force * self.factor;
    }
}
