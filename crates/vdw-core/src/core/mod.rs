//! # Core Module
//!
//! Stateless building blocks of the van der Waals kernel.
//!
//! ## Architecture
//!
//! - **Pair physics** ([`forcefield`]) - Combining rules for σ and ε and the
//!   buffered 14-7 energy and force of one pair of sites
//! - **Particle data** ([`models`]) - Particle parameters, structure-of-arrays
//!   storage, reduced interaction sites and exclusion lists
//! - **Spatial helpers** ([`utils`]) - Separation vectors under open or
//!   periodic boundaries and brute-force neighbor lists
//!
//! Nothing in this layer validates a whole system; the engine does that once
//! per evaluation before any of these pieces is applied pair by pair.

pub mod forcefield;
pub mod models;
pub mod utils;
