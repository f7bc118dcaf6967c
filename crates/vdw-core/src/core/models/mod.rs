//! Particle data consumed by the kernel.

pub mod exclusions;
pub mod particle;
pub mod site;
pub mod system;
