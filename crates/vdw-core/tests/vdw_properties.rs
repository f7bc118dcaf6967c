use halvdw::core::forcefield::combining::{EpsilonCombiningRule, SigmaCombiningRule};
use halvdw::core::models::system::VdwParticles;
use halvdw::engine::config::VdwConfigBuilder;
use halvdw::engine::driver::VdwForce;
use halvdw::engine::error::VdwError;
use nalgebra::{Point3, Vector3};

const TOLERANCE: f64 = 1e-9;

fn f64_approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

/// Raw per-particle arrays, as a host engine would hand them over.
struct Arrays {
    positions: Vec<Point3<f64>>,
    partners: Vec<usize>,
    classes: Vec<usize>,
    sigmas: Vec<f64>,
    epsilons: Vec<f64>,
    reductions: Vec<f64>,
    exclusions: Vec<Vec<usize>>,
}

impl Arrays {
    fn view(&self) -> VdwParticles<'_> {
        VdwParticles {
            num_particles: self.positions.len(),
            positions: &self.positions,
            reduction_partners: &self.partners,
            classes: &self.classes,
            sigmas: &self.sigmas,
            epsilons: &self.epsilons,
            reductions: &self.reductions,
            exclusions: &self.exclusions,
        }
    }
}

/// Two three-site molecules (heavy atom plus two reduced hydrogens) and an ion.
fn mixed_system() -> Arrays {
    Arrays {
        positions: vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.76, 0.59, 0.0),
            Point3::new(-0.76, 0.59, 0.0),
            Point3::new(2.9, 0.3, 0.4),
            Point3::new(3.5, 1.0, 0.6),
            Point3::new(2.6, 0.2, 1.35),
            Point3::new(-1.8, -2.6, 1.1),
        ],
        partners: vec![0, 0, 0, 3, 3, 3, 6],
        classes: vec![1, 2, 2, 1, 2, 2, 3],
        sigmas: vec![3.405, 2.655, 2.655, 3.405, 2.655, 2.655, 3.75],
        epsilons: vec![0.11, 0.0135, 0.0135, 0.11, 0.0135, 0.0135, 0.26],
        reductions: vec![0.0, 0.09, 0.09, 0.0, 0.09, 0.09, 0.0],
        exclusions: vec![
            vec![0, 1, 2],
            vec![0, 1, 2],
            vec![0, 1, 2],
            vec![3, 4, 5],
            vec![3, 4, 5],
            vec![3, 4, 5],
            vec![],
        ],
    }
}

fn amoeba_force() -> VdwForce {
    let config = VdwConfigBuilder::new()
        .sigma_combining_rule("CUBIC-MEAN")
        .epsilon_combining_rule("HHG")
        .build()
        .unwrap();
    VdwForce::new(&config).unwrap()
}

fn energy_of(force: &VdwForce, arrays: &Arrays) -> f64 {
    let mut forces = vec![Vector3::zeros(); arrays.positions.len()];
    force
        .calculate_force_and_energy(&arrays.view(), &mut forces)
        .unwrap()
}

#[test]
fn net_force_vanishes_for_every_rule_combination() {
    let arrays = mixed_system();
    for sigma_rule in SigmaCombiningRule::ALL {
        for epsilon_rule in EpsilonCombiningRule::ALL {
            let config = VdwConfigBuilder::new()
                .sigma_combining_rule(sigma_rule.name())
                .epsilon_combining_rule(epsilon_rule.name())
                .build()
                .unwrap();
            let force = VdwForce::new(&config).unwrap();
            let mut forces = vec![Vector3::zeros(); arrays.positions.len()];
            force
                .calculate_force_and_energy(&arrays.view(), &mut forces)
                .unwrap();
            let total: Vector3<f64> = forces.iter().sum();
            assert!(
                total.norm() < 1e-10,
                "{sigma_rule}/{epsilon_rule}: net force {total:?}"
            );
        }
    }
}

#[test]
fn forces_are_the_negative_energy_gradient() {
    let force = amoeba_force();
    let arrays = mixed_system();
    let mut forces = vec![Vector3::zeros(); arrays.positions.len()];
    force
        .calculate_force_and_energy(&arrays.view(), &mut forces)
        .unwrap();

    let h = 1e-6;
    for particle in 0..arrays.positions.len() {
        for axis in 0..3 {
            let mut plus = mixed_system();
            plus.positions[particle][axis] += h;
            let mut minus = mixed_system();
            minus.positions[particle][axis] -= h;
            let numerical = -(energy_of(&force, &plus) - energy_of(&force, &minus)) / (2.0 * h);
            assert!(
                (forces[particle][axis] - numerical).abs() < 1e-6,
                "particle {particle}, axis {axis}: analytic {} vs numerical {numerical}",
                forces[particle][axis]
            );
        }
    }
}

#[test]
fn classes_do_not_change_the_result() {
    let force = amoeba_force();
    let reference = energy_of(&force, &mixed_system());
    let mut relabelled = mixed_system();
    relabelled.classes = vec![0; relabelled.positions.len()];
    assert!(f64_approx_equal(energy_of(&force, &relabelled), reference));
}

#[test]
fn repeated_evaluation_agrees() {
    let force = amoeba_force();
    let first = energy_of(&force, &mixed_system());
    let second = energy_of(&force, &mixed_system());
    assert!(f64_approx_equal(first, second));
}

#[test]
fn missing_class_entry_is_a_shape_mismatch_and_buffer_is_untouched() {
    let mut arrays = mixed_system();
    arrays.classes.pop();
    let mut forces = vec![Vector3::new(0.5, -0.5, 0.25); arrays.positions.len()];
    let force = amoeba_force();
    let result = force.calculate_force_and_energy(&arrays.view(), &mut forces);
    assert_eq!(
        result,
        Err(VdwError::ShapeMismatch {
            field: "classes",
            expected: 7,
            found: 6
        })
    );
    assert!(forces.iter().all(|f| *f == Vector3::new(0.5, -0.5, 0.25)));
}

#[test]
fn exclusion_naming_a_missing_particle_is_rejected() {
    let mut arrays = mixed_system();
    arrays.exclusions[6] = vec![9];
    let mut forces = vec![Vector3::zeros(); arrays.positions.len()];
    let force = amoeba_force();
    let result = force.calculate_force_and_energy(&arrays.view(), &mut forces);
    assert!(matches!(
        result,
        Err(VdwError::DataInvariantViolation { particle: 6, .. })
    ));
}

#[test]
fn non_finite_parameters_are_rejected_before_any_force_is_written() {
    let mut arrays = mixed_system();
    arrays.epsilons[4] = f64::NAN;
    let mut forces = vec![Vector3::new(0.5, -0.5, 0.25); arrays.positions.len()];
    let force = amoeba_force();
    let result = force.calculate_force_and_energy(&arrays.view(), &mut forces);
    assert!(matches!(
        result,
        Err(VdwError::DataInvariantViolation { particle: 4, .. })
    ));
    assert!(forces.iter().all(|f| *f == Vector3::new(0.5, -0.5, 0.25)));
}

#[test]
fn bogus_rule_fails_before_any_evaluation() {
    let config = VdwConfigBuilder::new()
        .sigma_combining_rule("bogus")
        .build()
        .unwrap();
    match VdwForce::new(&config) {
        Err(VdwError::InvalidConfiguration(message)) => assert!(message.contains("bogus")),
        other => panic!("expected InvalidConfiguration, got {other:?}"),
    }
}
