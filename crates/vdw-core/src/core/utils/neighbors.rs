use super::geometry::Displacement;
use nalgebra::Point3;
use tracing::debug;

/// Supplies candidate interaction partners for each particle.
///
/// Candidates may be a half list (`j > i` only) or a full list; consumers
/// that walk unordered pairs should keep only `j > i`. Each row must list an
/// index at most once.
pub trait NeighborSource: Sync {
    fn num_particles(&self) -> usize;

    fn candidates(&self, i: usize) -> &[usize];
}

/// Half neighbor list: `neighbors[i]` holds ascending indices `j > i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeighborList {
    neighbors: Vec<Vec<usize>>,
    cutoff: f64,
}

impl NeighborList {
    /// Brute-force O(N²) search for all pairs closer than `cutoff`.
    pub fn build<G: Displacement + ?Sized>(
        sites: &[Point3<f64>],
        cutoff: f64,
        geometry: &G,
    ) -> Self {
        let cutoff_sq = cutoff * cutoff;
        let mut neighbors = vec![Vec::new(); sites.len()];
        let mut num_pairs = 0usize;

        for (i, site_i) in sites.iter().enumerate() {
            for (j, site_j) in sites.iter().enumerate().skip(i + 1) {
                if geometry.displacement(site_i, site_j).norm_squared() <= cutoff_sq {
                    neighbors[i].push(j);
                    num_pairs += 1;
                }
            }
        }

        debug!(
            "Built neighbor list: {} sites, {} pairs within {:.3} Å.",
            sites.len(),
            num_pairs,
            cutoff
        );
        Self { neighbors, cutoff }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn num_pairs(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum()
    }
}

impl NeighborSource for NeighborList {
    fn num_particles(&self) -> usize {
        self.neighbors.len()
    }

    fn candidates(&self, i: usize) -> &[usize] {
        &self.neighbors[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::geometry::{OpenBoundary, PeriodicBox};
    use nalgebra::Vector3;

    fn line_of_sites() -> Vec<Point3<f64>> {
        (0..4).map(|k| Point3::new(2.0 * k as f64, 0.0, 0.0)).collect()
    }

    #[test]
    fn open_boundary_list_keeps_pairs_within_cutoff() {
        let list = NeighborList::build(&line_of_sites(), 2.5, &OpenBoundary);
        assert_eq!(list.num_particles(), 4);
        assert_eq!(list.candidates(0), &[1]);
        assert_eq!(list.candidates(1), &[2]);
        assert_eq!(list.candidates(2), &[3]);
        assert!(list.candidates(3).is_empty());
        assert_eq!(list.num_pairs(), 3);
    }

    #[test]
    fn periodic_list_finds_pairs_across_the_boundary() {
        let cell = PeriodicBox::new(Vector3::new(8.0, 8.0, 8.0)).unwrap();
        let list = NeighborList::build(&line_of_sites(), 2.5, &cell);
        assert_eq!(list.candidates(0), &[1, 3]);
        assert_eq!(list.num_pairs(), 4);
    }

    #[test]
    fn list_records_its_cutoff() {
        let list = NeighborList::build(&line_of_sites(), 1.0, &OpenBoundary);
        assert_eq!(list.cutoff(), 1.0);
        assert_eq!(list.num_pairs(), 0);
    }
}
