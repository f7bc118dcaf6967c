//! # halvdw
//!
//! Buffered 14-7 (Halgren) van der Waals forces and energies for polarizable
//! force fields of the AMOEBA family, with reduced interaction sites on
//! hydrogen-like particles.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout that keeps pure math, validated
//! evaluation and end-to-end procedures apart.
//!
//! - **[`core`]: The Foundation.** Stateless pieces: combining rules, the
//!   buffered 14-7 pair potential, reduced interaction sites, exclusion lists,
//!   particle storage, and the displacement and neighbor collaborators used by
//!   the cutoff modes.
//!
//! - **[`engine`]: The Kernel.** [`engine::driver::VdwForce`] validates a
//!   particle view, walks every unordered non-excluded pair, and adds the
//!   redistributed forces into a caller-owned buffer. It also owns the
//!   configuration model and the error taxonomy.
//!
//! - **[`workflows`]: The Public API.** One-call evaluation of an owned
//!   [`core::models::system::ParticleSystem`], wiring the geometry and
//!   neighbor list that the configured nonbonded method needs.

pub mod core;
pub mod engine;
pub mod workflows;
