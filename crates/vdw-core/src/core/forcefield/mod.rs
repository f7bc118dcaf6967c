//! # Force Field Module
//!
//! Pairwise van der Waals physics in the AMOEBA functional form.
//!
//! ## Key Components
//!
//! - [`combining`] - Sigma and epsilon combining rules, selected by name
//! - [`potentials`] - The buffered 14-7 potential with δ = 0.07 and γ = 0.12
//!
//! ```ignore
//! use halvdw::core::forcefield::combining::{EpsilonCombiningRule, SigmaCombiningRule};
//! use halvdw::core::forcefield::potentials::buffered_14_7;
//!
//! let sigma = SigmaCombiningRule::CubicMean.combine(3.4, 2.65);
//! let epsilon = EpsilonCombiningRule::Hhg.combine(0.11, 0.0135);
//! let pair = buffered_14_7(sigma, epsilon, &delta);
//! ```

pub mod combining;
pub mod potentials;
