use nalgebra::Vector3;

/// Buffering constant δ of Halgren's buffered 14-7 form.
pub const HAL_DELTA: f64 = 0.07;
/// Buffering constant γ of Halgren's buffered 14-7 form.
pub const HAL_GAMMA: f64 = 0.12;

/// Energy and force of a single site-site interaction.
///
/// `force` acts on the first site of the pair; the second site receives `-force`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairInteraction {
    pub energy: f64,
    pub force: Vector3<f64>,
}

impl PairInteraction {
    pub fn is_finite(&self) -> bool {
        self.energy.is_finite() && self.force.iter().all(|c| c.is_finite())
    }
}

#[inline]
fn pow7(x: f64) -> f64 {
    let x3 = x * x * x;
    x3 * x3 * x
}

/// Buffered 14-7 energy at scalar separation `dist`.
///
/// `E = ε · [(1+δ)/(ρ+δ)]^7 · [(1+γ)/(ρ^7+γ) - 2]` with `ρ = dist / σ`.
#[inline]
pub fn buffered_14_7_energy(dist: f64, sigma: f64, epsilon: f64) -> f64 {
    let sigma_7 = pow7(sigma);
    let rho = pow7(dist) + HAL_GAMMA * sigma_7;
    let tau = (HAL_DELTA + 1.0) / (dist + HAL_DELTA * sigma);
    epsilon * pow7(tau) * sigma_7 * ((HAL_GAMMA + 1.0) * sigma_7 / rho - 2.0)
}

/// Evaluates the buffered 14-7 interaction for the separation `delta = site_i - site_j`.
///
/// Returns `None` when the two sites coincide, where the force direction is undefined.
#[inline]
pub fn buffered_14_7(sigma: f64, epsilon: f64, delta: &Vector3<f64>) -> Option<PairInteraction> {
    let r_ij_2 = delta.x * delta.x + delta.y * delta.y + delta.z * delta.z;
    let r_ij = r_ij_2.sqrt();
    if r_ij == 0.0 || !r_ij.is_finite() {
        return None;
    }

    let sigma_7 = pow7(sigma);
    let r_ij_6 = r_ij_2 * r_ij_2 * r_ij_2;
    let r_ij_7 = r_ij_6 * r_ij;

    let rho = r_ij_7 + HAL_GAMMA * sigma_7;
    let tau = (HAL_DELTA + 1.0) / (r_ij + HAL_DELTA * sigma);
    let tau_7 = pow7(tau);
    let dtau = tau / (HAL_DELTA + 1.0);
    let ratio = sigma_7 / rho;
    let gtau = epsilon * tau_7 * r_ij_6 * (HAL_GAMMA + 1.0) * ratio * ratio;

    let energy = epsilon * tau_7 * sigma_7 * ((HAL_GAMMA + 1.0) * sigma_7 / rho - 2.0);
    let d_e_d_r = -7.0 * (dtau * energy + gtau);

    // Gradient with respect to site i is dE/dr · delta / r; the force is its negation.
    let force = -(delta * d_e_d_r / r_ij);

    Some(PairInteraction { energy, force })
}
