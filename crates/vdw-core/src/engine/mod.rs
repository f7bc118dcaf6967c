//! # Engine Module
//!
//! The validated van der Waals kernel built on top of [`crate::core`].
//!
//! ## Overview
//!
//! A [`driver::VdwForce`] is built once from a [`config::VdwConfig`]. Each call
//! then takes a borrowed particle view and a force buffer, checks every array
//! shape, reduction partner and exclusion list, resolves the interaction
//! sites, and evaluates each unordered non-excluded pair. Forces are collected
//! in a private buffer and only added into the caller's buffer after the
//! whole loop succeeds.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Nonbonded method, combining rule names,
//!   cutoff, box and reduction policy, with a builder
//! - **Evaluation** ([`driver`]) - All-pairs and neighbor-driven entry points
//! - **Error Handling** ([`error`]) - The [`error::VdwError`] taxonomy every
//!   lower-level error converts into
//!
//! ## Key Capabilities
//!
//! - **Reduced interaction sites** with exact force redistribution
//! - **Exact all-pairs mode** and hard-cutoff modes with open or periodic boundaries
//! - **Reproducible summation** in ascending pair order for serial builds
//! - **Row-parallel evaluation** behind the `parallel` feature

pub mod config;
pub mod driver;
pub mod error;
