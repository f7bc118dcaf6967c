use super::config::{ConfigError, NonbondedMethod, VdwConfig};
use super::error::VdwError;
use crate::core::forcefield::combining::{EpsilonCombiningRule, SigmaCombiningRule};
use crate::core::forcefield::potentials;
use crate::core::models::exclusions::ExclusionPolicy;
use crate::core::models::site::{ReductionPolicy, ReductionSite, SiteError};
use crate::core::models::system::VdwParticles;
use crate::core::utils::geometry::{Displacement, OpenBoundary};
use crate::core::utils::neighbors::NeighborSource;
use nalgebra::{Point3, Vector3};
use tracing::{debug, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Buffered 14-7 van der Waals force over reduced interaction sites.
///
/// Combining rules, nonbonded method and cutoff are fixed at construction.
/// Each evaluation validates its inputs first, accumulates into a private
/// buffer, and only adds into the caller's force buffer once every pair has
/// been evaluated successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct VdwForce {
    method: NonbondedMethod,
    sigma_rule: SigmaCombiningRule,
    epsilon_rule: EpsilonCombiningRule,
    cutoff: Option<f64>,
    reduction_policy: ReductionPolicy,
}

struct EvaluationFrame<'a> {
    particles: VdwParticles<'a>,
    sites: Vec<ReductionSite>,
    site_positions: Vec<Point3<f64>>,
    exclusions: ExclusionPolicy<'a>,
    cutoff_sq: Option<f64>,
}

impl VdwForce {
    pub fn new(config: &VdwConfig) -> Result<Self, VdwError> {
        let sigma_rule: SigmaCombiningRule = config.sigma_combining_rule.parse()?;
        let epsilon_rule: EpsilonCombiningRule = config.epsilon_combining_rule.parse()?;

        let cutoff = if config.method.uses_cutoff() {
            let cutoff = config
                .cutoff
                .ok_or(ConfigError::MissingParameter("cutoff"))?;
            if !(cutoff.is_finite() && cutoff > 0.0) {
                return Err(VdwError::InvalidConfiguration(format!(
                    "cutoff must be positive and finite, got {cutoff}"
                )));
            }
            Some(cutoff)
        } else {
            None
        };

        debug!(
            "Configured vdW force: method {}, sigma rule {}, epsilon rule {}, cutoff {:?}.",
            config.method, sigma_rule, epsilon_rule, cutoff
        );

        Ok(Self {
            method: config.method,
            sigma_rule,
            epsilon_rule,
            cutoff,
            reduction_policy: config.reduction_policy,
        })
    }

    pub fn nonbonded_method(&self) -> NonbondedMethod {
        self.method
    }

    pub fn sigma_combining_rule(&self) -> SigmaCombiningRule {
        self.sigma_rule
    }

    pub fn epsilon_combining_rule(&self) -> EpsilonCombiningRule {
        self.epsilon_rule
    }

    pub fn cutoff(&self) -> Option<f64> {
        self.cutoff
    }

    pub fn reduction_policy(&self) -> ReductionPolicy {
        self.reduction_policy
    }

    /// Resolved interaction sites, one per particle, after validation.
    pub fn effective_sites(
        &self,
        particles: &VdwParticles<'_>,
    ) -> Result<Vec<Point3<f64>>, VdwError> {
        check_shapes(particles, None)?;
        let sites = self.resolve_sites(particles)?;
        Ok(sites
            .iter()
            .map(|site| site.resolve(particles.positions))
            .collect())
    }

    /// Evaluates every unordered non-excluded pair and adds the resulting
    /// forces into `forces`. Returns the total energy.
    ///
    /// Only valid for [`NonbondedMethod::NoCutoff`].
    #[instrument(
        skip_all,
        name = "vdw_all_pairs",
        fields(particles = particles.num_particles)
    )]
    pub fn calculate_force_and_energy(
        &self,
        particles: &VdwParticles<'_>,
        forces: &mut [Vector3<f64>],
    ) -> Result<f64, VdwError> {
        if self.method != NonbondedMethod::NoCutoff {
            return Err(VdwError::InvalidConfiguration(format!(
                "nonbonded method {} needs a neighbor source and displacement convention",
                self.method
            )));
        }

        let frame = self.prepare(particles, forces.len(), None)?;
        let num_particles = particles.num_particles;
        let (energy, scratch) =
            self.accumulate(&frame, &OpenBoundary, |i| (i + 1)..num_particles)?;

        add_into(forces, &scratch);
        debug!("All-pairs vdW energy: {:.8}", energy);
        Ok(energy)
    }

    /// Cutoff variant: partners come from `neighbors`, separations from
    /// `geometry`, and pairs whose sites lie beyond the cutoff are skipped.
    #[instrument(
        skip_all,
        name = "vdw_cutoff",
        fields(particles = particles.num_particles)
    )]
    pub fn calculate_force_and_energy_with_neighbors<N, G>(
        &self,
        particles: &VdwParticles<'_>,
        neighbors: &N,
        geometry: &G,
        forces: &mut [Vector3<f64>],
    ) -> Result<f64, VdwError>
    where
        N: NeighborSource + ?Sized,
        G: Displacement + ?Sized,
    {
        let cutoff = match self.cutoff {
            Some(cutoff) if self.method.uses_cutoff() => cutoff,
            _ => {
                return Err(VdwError::InvalidConfiguration(format!(
                    "nonbonded method {} evaluates all pairs and takes no neighbor source",
                    self.method
                )));
            }
        };
        if self.method.is_periodic() != geometry.is_periodic() {
            return Err(VdwError::InvalidConfiguration(format!(
                "nonbonded method {} is incompatible with a {} displacement convention",
                self.method,
                if geometry.is_periodic() {
                    "periodic"
                } else {
                    "non-periodic"
                }
            )));
        }
        if let Some(max_cutoff) = geometry.max_cutoff() {
            if cutoff > max_cutoff {
                return Err(VdwError::InvalidConfiguration(format!(
                    "cutoff {cutoff} exceeds the largest admissible value {max_cutoff} for this box"
                )));
            }
        }

        let frame = self.prepare(particles, forces.len(), Some(cutoff * cutoff))?;
        check_neighbors(neighbors, particles.num_particles)?;

        let (energy, scratch) = self.accumulate(&frame, geometry, |i| {
            neighbors
                .candidates(i)
                .iter()
                .copied()
                .filter(move |&j| j > i)
        })?;

        add_into(forces, &scratch);
        debug!("Cutoff vdW energy: {:.8}", energy);
        Ok(energy)
    }

    fn prepare<'a>(
        &self,
        particles: &VdwParticles<'a>,
        num_forces: usize,
        cutoff_sq: Option<f64>,
    ) -> Result<EvaluationFrame<'a>, VdwError> {
        check_shapes(particles, Some(num_forces))?;
        check_parameters(particles)?;
        let sites = self.resolve_sites(particles)?;
        let exclusions = ExclusionPolicy::new(particles.exclusions);
        exclusions.validate()?;

        let site_positions = sites
            .iter()
            .map(|site| site.resolve(particles.positions))
            .collect();

        Ok(EvaluationFrame {
            particles: *particles,
            sites,
            site_positions,
            exclusions,
            cutoff_sq,
        })
    }

    fn resolve_sites(
        &self,
        particles: &VdwParticles<'_>,
    ) -> Result<Vec<ReductionSite>, VdwError> {
        let num_particles = particles.num_particles;
        let mut sites = Vec::with_capacity(num_particles);

        for (i, (&partner, &factor)) in particles
            .reduction_partners
            .iter()
            .zip(particles.reductions)
            .enumerate()
        {
            if partner >= num_particles {
                return Err(SiteError::PartnerOutOfRange {
                    particle: i,
                    partner,
                    num_particles,
                }
                .into());
            }
            let applied = self.reduction_policy.apply(i, factor)?;
            if applied != factor {
                warn!(
                    "Reduction factor {} of particle {} clamped to {}.",
                    factor, i, applied
                );
            }
            sites.push(ReductionSite::new(i, partner, applied));
        }

        Ok(sites)
    }

    #[cfg(not(feature = "parallel"))]
    fn accumulate<G, F, I>(
        &self,
        frame: &EvaluationFrame<'_>,
        geometry: &G,
        partners: F,
    ) -> Result<(f64, Vec<Vector3<f64>>), VdwError>
    where
        G: Displacement + ?Sized,
        F: Fn(usize) -> I + Sync,
        I: Iterator<Item = usize>,
    {
        let num_particles = frame.sites.len();
        let mut energy = 0.0;
        let mut scratch = vec![Vector3::zeros(); num_particles];

        // Ascending (i, j) keeps the energy summation order canonical.
        for i in 0..num_particles {
            self.accumulate_row(i, partners(i), frame, geometry, &mut energy, &mut scratch)?;
        }

        Ok((energy, scratch))
    }

    #[cfg(feature = "parallel")]
    fn accumulate<G, F, I>(
        &self,
        frame: &EvaluationFrame<'_>,
        geometry: &G,
        partners: F,
    ) -> Result<(f64, Vec<Vector3<f64>>), VdwError>
    where
        G: Displacement + ?Sized,
        F: Fn(usize) -> I + Sync,
        I: Iterator<Item = usize>,
    {
        let num_particles = frame.sites.len();
        let empty = || (0.0, vec![Vector3::zeros(); num_particles]);

        // Rows are folded into thread-local buffers, so no force slot is shared.
        (0..num_particles)
            .into_par_iter()
            .try_fold(empty, |(mut energy, mut scratch), i| {
                self.accumulate_row(i, partners(i), frame, geometry, &mut energy, &mut scratch)?;
                Ok::<_, VdwError>((energy, scratch))
            })
            .try_reduce(empty, |(energy_a, mut forces_a), (energy_b, forces_b)| {
                add_into(&mut forces_a, &forces_b);
                Ok((energy_a + energy_b, forces_a))
            })
    }

    fn accumulate_row<G, I>(
        &self,
        i: usize,
        partners: I,
        frame: &EvaluationFrame<'_>,
        geometry: &G,
        energy: &mut f64,
        forces: &mut [Vector3<f64>],
    ) -> Result<(), VdwError>
    where
        G: Displacement + ?Sized,
        I: Iterator<Item = usize>,
    {
        let particles = &frame.particles;
        let site_i = &frame.site_positions[i];

        for j in partners {
            if frame.exclusions.is_excluded(i, j) {
                continue;
            }

            let delta = geometry.displacement(&frame.site_positions[j], site_i);
            if let Some(cutoff_sq) = frame.cutoff_sq {
                if delta.norm_squared() > cutoff_sq {
                    continue;
                }
            }

            let sigma = self
                .sigma_rule
                .combine(particles.sigmas[i], particles.sigmas[j]);
            let epsilon = self
                .epsilon_rule
                .combine(particles.epsilons[i], particles.epsilons[j]);

            let pair = potentials::buffered_14_7(sigma, epsilon, &delta)
                .ok_or(VdwError::DegenerateGeometry { i, j })?;
            if !pair.is_finite() {
                return Err(VdwError::DataInvariantViolation {
                    particle: i,
                    reason: format!("interaction with particle {j} is not finite"),
                });
            }

            *energy += pair.energy;
            frame.sites[i].distribute(&pair.force, forces);
            frame.sites[j].distribute(&-pair.force, forces);
        }

        Ok(())
    }
}

fn check_shapes(
    particles: &VdwParticles<'_>,
    num_forces: Option<usize>,
) -> Result<(), VdwError> {
    let expected = particles.num_particles;
    let lengths = [
        ("positions", particles.positions.len()),
        ("reduction_partners", particles.reduction_partners.len()),
        ("classes", particles.classes.len()),
        ("sigmas", particles.sigmas.len()),
        ("epsilons", particles.epsilons.len()),
        ("reductions", particles.reductions.len()),
        ("exclusions", particles.exclusions.len()),
    ];

    for (field, found) in lengths
        .into_iter()
        .chain(num_forces.map(|found| ("forces", found)))
    {
        if found != expected {
            return Err(VdwError::ShapeMismatch {
                field,
                expected,
                found,
            });
        }
    }
    Ok(())
}

/// Sizes and well depths must be finite and non-negative for every
/// combining rule to yield a finite pair parameter.
fn check_parameters(particles: &VdwParticles<'_>) -> Result<(), VdwError> {
    let values = particles.sigmas.iter().zip(particles.epsilons);
    for (particle, (&sigma, &epsilon)) in values.enumerate() {
        for (name, value) in [("sigma", sigma), ("epsilon", epsilon)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(VdwError::DataInvariantViolation {
                    particle,
                    reason: format!("{name} must be finite and non-negative, got {value}"),
                });
            }
        }
    }
    Ok(())
}

fn check_neighbors<N: NeighborSource + ?Sized>(
    neighbors: &N,
    num_particles: usize,
) -> Result<(), VdwError> {
    if neighbors.num_particles() != num_particles {
        return Err(VdwError::ShapeMismatch {
            field: "neighbors",
            expected: num_particles,
            found: neighbors.num_particles(),
        });
    }
    // Stamped with the last row that listed each index.
    let mut listed_by = vec![usize::MAX; num_particles];
    for i in 0..num_particles {
        for &j in neighbors.candidates(i) {
            if j >= num_particles {
                return Err(VdwError::DataInvariantViolation {
                    particle: i,
                    reason: format!("neighbor candidate {j} is out of range (N = {num_particles})"),
                });
            }
            if listed_by[j] == i {
                return Err(VdwError::DataInvariantViolation {
                    particle: i,
                    reason: format!("neighbor candidate {j} is listed more than once"),
                });
            }
            listed_by[j] = i;
        }
    }
    Ok(())
}

fn add_into(target: &mut [Vector3<f64>], contributions: &[Vector3<f64>]) {
    for (force, contribution) in target.iter_mut().zip(contributions) {
        *force += contribution;
    }
}
