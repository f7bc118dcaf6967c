use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ExclusionError {
    #[error(
        "Exclusion list of particle {particle} references index {index}, but N = {num_particles}"
    )]
    IndexOutOfRange {
        particle: usize,
        index: usize,
        num_particles: usize,
    },
    #[error("Particle {particle} excludes {other}, but {other} does not exclude {particle}")]
    Asymmetric { particle: usize, other: usize },
}

/// Read-only view over per-particle exclusion lists.
///
/// Lists are short (bonded neighbors), so membership is a linear scan.
#[derive(Debug, Clone, Copy)]
pub struct ExclusionPolicy<'a> {
    lists: &'a [Vec<usize>],
}

impl<'a> ExclusionPolicy<'a> {
    pub fn new(lists: &'a [Vec<usize>]) -> Self {
        Self { lists }
    }

    #[inline]
    pub fn is_excluded(&self, i: usize, j: usize) -> bool {
        self.lists[i].contains(&j)
    }

    /// Checks that every entry is in range and that every exclusion is mirrored.
    pub fn validate(&self) -> Result<(), ExclusionError> {
        let num_particles = self.lists.len();
        for (particle, list) in self.lists.iter().enumerate() {
            for &index in list {
                if index >= num_particles {
                    return Err(ExclusionError::IndexOutOfRange {
                        particle,
                        index,
                        num_particles,
                    });
                }
            }
        }
        for (particle, list) in self.lists.iter().enumerate() {
            for &other in list {
                if other != particle && !self.is_excluded(other, particle) {
                    return Err(ExclusionError::Asymmetric { particle, other });
                }
            }
        }
        Ok(())
    }
}
