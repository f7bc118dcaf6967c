use crate::error::{CliError, Result};
use halvdw::core::models::particle::Particle;
use halvdw::core::models::system::ParticleSystem;
use nalgebra::Point3;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ParticleEntry {
    position: [f64; 3],
    sigma: f64,
    epsilon: f64,
    #[serde(default)]
    reduction: f64,
    reduction_partner: Option<usize>,
    #[serde(default)]
    class: usize,
    #[serde(default)]
    exclusions: Vec<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct SystemFile {
    #[serde(default)]
    particle: Vec<ParticleEntry>,
}

/// Reads a `[[particle]]` table array into a [`ParticleSystem`].
///
/// An exclusion listed on either particle is recorded for both.
pub fn load_system(path: &Path) -> Result<ParticleSystem> {
    debug!("Loading particle system from file: {:?}", path);
    let content = std::fs::read_to_string(path)?;
    let file: SystemFile = toml::from_str(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    let system = build_system(file.particle).map_err(|message| CliError::System {
        path: path.to_path_buf(),
        message,
    })?;
    info!("Loaded {} particles from {:?}.", system.len(), path);
    Ok(system)
}

fn build_system(entries: Vec<ParticleEntry>) -> std::result::Result<ParticleSystem, String> {
    let mut system = ParticleSystem::with_capacity(entries.len());
    let mut pending_exclusions = Vec::new();

    for entry in entries {
        let [x, y, z] = entry.position;
        let particle = Particle::new(Point3::new(x, y, z), entry.sigma, entry.epsilon);
        let mut particle = particle.with_class(entry.class);
        match entry.reduction_partner {
            Some(partner) => particle = particle.with_reduction(partner, entry.reduction),
            None => particle.reduction = entry.reduction,
        }

        let index = system.add_particle(particle);
        for other in entry.exclusions {
            pending_exclusions.push((index, other));
        }
    }

    for (i, j) in pending_exclusions {
        if i != j {
            system
                .add_exclusion(i, j)
                .map_err(|e| format!("exclusion of particle {i}: {e}"))?;
        }
    }
    Ok(system)
}
