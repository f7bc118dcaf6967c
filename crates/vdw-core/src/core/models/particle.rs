use nalgebra::Point3;

/// Per-particle van der Waals parameters together with the particle's position.
///
/// `reduction_partner` of `None` means the interaction site sits on the
/// particle itself. With a partner `p`, the site is
/// `reduction · pos[p] + (1 - reduction) · pos[self]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Cartesian position in Angstroms.
    pub position: Point3<f64>,
    /// Size parameter σ in Angstroms.
    pub sigma: f64,
    /// Well depth ε in kcal/mol.
    pub epsilon: f64,
    /// Reduction factor in `[0, 1]`.
    pub reduction: f64,
    /// Index of the particle the site is pulled toward, if any.
    pub reduction_partner: Option<usize>,
    /// Type class index; carried through but not used by the combining rules.
    pub class: usize,
}

impl Particle {
    pub fn new(position: Point3<f64>, sigma: f64, epsilon: f64) -> Self {
        Self {
            position,
            sigma,
            epsilon,
            reduction: 0.0,
            reduction_partner: None,
            class: 0,
        }
    }

    pub fn with_reduction(mut self, partner: usize, reduction: f64) -> Self {
        self.reduction_partner = Some(partner);
        self.reduction = reduction;
        self
    }

    pub fn with_class(mut self, class: usize) -> Self {
        self.class = class;
        self
    }
}
