use super::particle::Particle;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SystemError {
    #[error("Particle index {index} is out of range (N = {num_particles})")]
    IndexOutOfRange { index: usize, num_particles: usize },
}

/// Borrowed per-evaluation view of the particle arrays.
///
/// `num_particles` is stated separately and must equal the length of every
/// slice; the kernel checks this before it touches any output.
#[derive(Debug, Clone, Copy)]
pub struct VdwParticles<'a> {
    pub num_particles: usize,
    pub positions: &'a [Point3<f64>],
    pub reduction_partners: &'a [usize],
    pub classes: &'a [usize],
    pub sigmas: &'a [f64],
    pub epsilons: &'a [f64],
    pub reductions: &'a [f64],
    pub exclusions: &'a [Vec<usize>],
}

/// Owned structure-of-arrays storage for a particle system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSystem {
    positions: Vec<Point3<f64>>,
    reduction_partners: Vec<usize>,
    classes: Vec<usize>,
    sigmas: Vec<f64>,
    epsilons: Vec<f64>,
    reductions: Vec<f64>,
    exclusions: Vec<Vec<usize>>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            reduction_partners: Vec::with_capacity(capacity),
            classes: Vec::with_capacity(capacity),
            sigmas: Vec::with_capacity(capacity),
            epsilons: Vec::with_capacity(capacity),
            reductions: Vec::with_capacity(capacity),
            exclusions: Vec::with_capacity(capacity),
        }
    }

    /// Appends a particle and returns its index.
    ///
    /// The reduction partner is not range-checked here, since it may refer to
    /// a particle added later; the kernel validates it at evaluation time.
    pub fn add_particle(&mut self, particle: Particle) -> usize {
        let index = self.positions.len();
        self.positions.push(particle.position);
        self.reduction_partners
            .push(particle.reduction_partner.unwrap_or(index));
        self.classes.push(particle.class);
        self.sigmas.push(particle.sigma);
        self.epsilons.push(particle.epsilon);
        self.reductions.push(particle.reduction);
        self.exclusions.push(Vec::new());
        index
    }

    /// Records a mutual exclusion between `i` and `j`.
    pub fn add_exclusion(&mut self, i: usize, j: usize) -> Result<(), SystemError> {
        let num_particles = self.len();
        for index in [i, j] {
            if index >= num_particles {
                return Err(SystemError::IndexOutOfRange {
                    index,
                    num_particles,
                });
            }
        }
        if !self.exclusions[i].contains(&j) {
            self.exclusions[i].push(j);
        }
        if !self.exclusions[j].contains(&i) {
            self.exclusions[j].push(i);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [Point3<f64>] {
        &mut self.positions
    }

    pub fn exclusions_of(&self, index: usize) -> Option<&[usize]> {
        self.exclusions.get(index).map(Vec::as_slice)
    }

    pub fn particles(&self) -> VdwParticles<'_> {
        VdwParticles {
            num_particles: self.len(),
            positions: &self.positions,
            reduction_partners: &self.reduction_partners,
            classes: &self.classes,
            sigmas: &self.sigmas,
            epsilons: &self.epsilons,
            reductions: &self.reductions,
            exclusions: &self.exclusions,
        }
    }
}
