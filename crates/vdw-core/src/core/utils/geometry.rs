use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GeometryError {
    #[error("Periodic box edges must be positive and finite, got {0:?}")]
    InvalidBox([f64; 3]),
}

/// Separation vectors between interaction sites under some boundary convention.
pub trait Displacement: Sync {
    /// Vector pointing from `from` to `to`.
    fn displacement(&self, from: &Point3<f64>, to: &Point3<f64>) -> Vector3<f64>;

    fn is_periodic(&self) -> bool;

    /// Largest cutoff for which the convention still yields a unique image.
    fn max_cutoff(&self) -> Option<f64> {
        None
    }
}

/// Plain coordinate subtraction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OpenBoundary;

impl Displacement for OpenBoundary {
    #[inline]
    fn displacement(&self, from: &Point3<f64>, to: &Point3<f64>) -> Vector3<f64> {
        to - from
    }

    fn is_periodic(&self) -> bool {
        false
    }
}

/// Orthorhombic periodic cell with minimum-image separations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicBox {
    lengths: Vector3<f64>,
}

impl PeriodicBox {
    pub fn new(lengths: Vector3<f64>) -> Result<Self, GeometryError> {
        if lengths.iter().any(|&l| !(l.is_finite() && l > 0.0)) {
            return Err(GeometryError::InvalidBox([lengths.x, lengths.y, lengths.z]));
        }
        Ok(Self { lengths })
    }

    pub fn lengths(&self) -> &Vector3<f64> {
        &self.lengths
    }
}

impl Displacement for PeriodicBox {
    #[inline]
    fn displacement(&self, from: &Point3<f64>, to: &Point3<f64>) -> Vector3<f64> {
        let mut delta = to - from;
        for k in 0..3 {
            let length = self.lengths[k];
            delta[k] -= (delta[k] / length + 0.5).floor() * length;
        }
        delta
    }

    fn is_periodic(&self) -> bool {
        true
    }

    fn max_cutoff(&self) -> Option<f64> {
        Some(0.5 * self.lengths.min())
    }
}
