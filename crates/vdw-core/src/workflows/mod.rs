//! # Workflows Module
//!
//! End-to-end entry points for callers who hold an owned
//! [`crate::core::models::system::ParticleSystem`] rather than raw arrays.
//!
//! - **Evaluation** ([`evaluate`]) - Builds the kernel from a configuration,
//!   sets up the boundary convention and neighbor list the method needs, and
//!   returns the energy together with a fresh force buffer.

pub mod evaluate;
