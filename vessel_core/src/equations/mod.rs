//! # Engineering Equations
//!
//! Every closed-form relation the engine uses, kept in one place so each can
//! be checked against its reference and reused across calculation types.
//!
//! ## Modules
//!
//! - [`vessel`] - Thin-wall pressure vessel mechanics (stress, burst, volume)
//! - [`ply`] - Ply stress transform, Tsai-Wu, Hashin, max-stress, first-ply failure
//! - [`fatigue`] - S-N life, Goodman correction, Palmgren-Miner damage
//! - [`statistics`] - Inverse normal CDF, percentiles, confidence intervals
//!
//! ## Units
//!
//! N-mm-MPa throughout: pressures and stresses in MPa, lengths in mm,
//! force resultants in N/mm, angles in degrees.
//!
//! ## Sign Conventions
//!
//! - **Stress**: Tension positive
//! - **Strengths**: Always positive magnitudes, compression included
//! - **Limit states**: Negative means failure
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition
//! - Daniel & Ishai, Engineering Mechanics of Composite Materials, 2nd Edition
//! - Shigley's Mechanical Engineering Design, Ch. 6 (fatigue)
//! - Acklam, "An algorithm for computing the inverse normal cumulative
//!   distribution function", 2003

pub mod fatigue;
pub mod ply;
pub mod statistics;
pub mod vessel;

pub use fatigue::{
    allowable_stress,
    cumulative_damage,
    fatigue_life,
    fatigue_safety_factor,
    goodman_correction,
    mean_stress,
    stress_amplitude,
    LoadBlock,
    StressComponent,
};
pub use ply::{
    first_ply_failure,
    first_ply_failure_with,
    hashin_indices,
    max_stress_margins,
    ply_stress,
    tsai_wu_index,
    tsai_wu_index_with,
    FailureMode,
    FiberMode,
    FirstPlyFailure,
    HashinResult,
    MatrixMode,
    MaxStressMargins,
    PlyStress,
};
pub use statistics::{inverse_normal_cdf, percentile, wald_interval, ConfidenceInterval};
pub use vessel::{
    axial_stress,
    burst_pressure,
    burst_ratio,
    cylinder_volume,
    hoop_stress,
    r_ratio,
    required_thickness,
    tank_weight,
    von_mises_stress,
    DEFAULT_SAFETY_FACTOR,
};

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::materials::CompositeGrade;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn axial_is_half_hoop(p in 0.1_f64..200.0, r in 10.0_f64..500.0, t in 0.5_f64..60.0) {
            let hoop = hoop_stress(p, r, t).unwrap();
            let axial = axial_stress(p, r, t).unwrap();
            prop_assert!((axial - hoop / 2.0).abs() <= 1e-12 * hoop.abs());
        }

        #[test]
        fn burst_increases_with_thickness(sigma in 100.0_f64..3000.0, r in 10.0_f64..500.0, t in 0.5_f64..60.0, dt in 0.01_f64..10.0) {
            let thin = burst_pressure(sigma, t, r).unwrap();
            let thick = burst_pressure(sigma, t + dt, r).unwrap();
            prop_assert!(thick > thin);
        }

        #[test]
        fn tsai_wu_zero_at_zero_stress(k in -1.0_f64..0.0) {
            for grade in CompositeGrade::ALL {
                let index = tsai_wu_index_with(&PlyStress::default(), &grade.properties(), k);
                prop_assert_eq!(index, 0.0);
            }
        }

        #[test]
        fn hashin_branch_follows_fiber_sign(s1 in -3000.0_f64..3000.0, s2 in -200.0_f64..200.0, t12 in -100.0_f64..100.0) {
            let h = hashin_indices(&PlyStress::new(s1, s2, t12), &CompositeGrade::T700Epoxy.properties());
            if s1 >= 0.0 {
                prop_assert_eq!(h.fiber_mode, FiberMode::Tension);
            } else {
                prop_assert_eq!(h.fiber_mode, FiberMode::Compression);
            }
        }

        #[test]
        fn fatigue_life_decreasing(s in 300.0_f64..1000.0, ds in 0.1_f64..100.0) {
            // Steel-4130 endurance limit is 300 MPa
            let sn = crate::materials::SnCurve::Steel4130.parameters();
            prop_assert!(fatigue_life(s + ds, &sn) < fatigue_life(s, &sn));
        }
    }
}
