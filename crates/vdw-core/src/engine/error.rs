use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::combining::CombiningRuleError;
use crate::core::models::exclusions::ExclusionError;
use crate::core::models::site::SiteError;
use crate::core::utils::geometry::GeometryError;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum VdwError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Shape mismatch for '{field}': expected {expected} entries, found {found}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Data invariant violated for particle {particle}: {reason}")]
    DataInvariantViolation { particle: usize, reason: String },

    #[error("Degenerate geometry: interaction sites of particles {i} and {j} coincide")]
    DegenerateGeometry { i: usize, j: usize },
}

impl From<CombiningRuleError> for VdwError {
    fn from(err: CombiningRuleError) -> Self {
        Self::InvalidConfiguration(err.to_string())
    }
}

impl From<ConfigError> for VdwError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfiguration(err.to_string())
    }
}

impl From<GeometryError> for VdwError {
    fn from(err: GeometryError) -> Self {
        Self::InvalidConfiguration(err.to_string())
    }
}

impl From<SiteError> for VdwError {
    fn from(err: SiteError) -> Self {
        let particle = match err {
            SiteError::PartnerOutOfRange { particle, .. }
            | SiteError::FactorOutOfRange { particle, .. } => particle,
        };
        Self::DataInvariantViolation {
            particle,
            reason: err.to_string(),
        }
    }
}

impl From<ExclusionError> for VdwError {
    fn from(err: ExclusionError) -> Self {
        let particle = match err {
            ExclusionError::IndexOutOfRange { particle, .. }
            | ExclusionError::Asymmetric { particle, .. } => particle,
        };
        Self::DataInvariantViolation {
            particle,
            reason: err.to_string(),
        }
    }
}
