use crate::core::models::system::ParticleSystem;
use crate::core::utils::geometry::{Displacement, OpenBoundary, PeriodicBox};
use crate::core::utils::neighbors::NeighborList;
use crate::engine::config::{ConfigError, NonbondedMethod, VdwConfig};
use crate::engine::driver::VdwForce;
use crate::engine::error::VdwError;
use nalgebra::Vector3;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Total van der Waals energy in kcal/mol.
    pub energy: f64,
    /// Force on each particle in kcal/(mol·Å), indexed like the system.
    pub forces: Vec<Vector3<f64>>,
}

impl Evaluation {
    pub fn net_force(&self) -> Vector3<f64> {
        self.forces.iter().sum()
    }
}

#[instrument(skip_all, name = "evaluate_workflow", fields(particles = system.len()))]
pub fn run(config: &VdwConfig, system: &ParticleSystem) -> Result<Evaluation, VdwError> {
    let force = VdwForce::new(config)?;
    let particles = system.particles();
    let mut forces = vec![Vector3::zeros(); system.len()];

    info!(
        "Evaluating {} particles with method {}.",
        system.len(),
        force.nonbonded_method()
    );

    let energy = match force.nonbonded_method() {
        NonbondedMethod::NoCutoff => force.calculate_force_and_energy(&particles, &mut forces)?,
        NonbondedMethod::CutoffNonPeriodic => {
            run_with_neighbors(&force, system, &OpenBoundary, &mut forces)?
        }
        NonbondedMethod::CutoffPeriodic => {
            let lengths = config
                .box_lengths
                .ok_or(ConfigError::MissingParameter("box_lengths"))?;
            let cell = PeriodicBox::new(lengths)?;
            run_with_neighbors(&force, system, &cell, &mut forces)?
        }
    };

    info!("Total van der Waals energy: {:.6} kcal/mol.", energy);
    Ok(Evaluation { energy, forces })
}

fn run_with_neighbors<G: Displacement>(
    force: &VdwForce,
    system: &ParticleSystem,
    geometry: &G,
    forces: &mut [Vector3<f64>],
) -> Result<f64, VdwError> {
    let particles = system.particles();
    let cutoff = force
        .cutoff()
        .ok_or(ConfigError::MissingParameter("cutoff"))?;
    // Searching the resolved sites keeps the list consistent with what the kernel measures.
    let sites = force.effective_sites(&particles)?;
    let neighbors = NeighborList::build(&sites, cutoff, geometry);
    force.calculate_force_and_energy_with_neighbors(&particles, &neighbors, geometry, forces)
}
