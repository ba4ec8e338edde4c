use water_supply_toolbox::water::viscosity::{kinematic_viscosity_m2_s, VISCOSITY_POINTS};

#[test]
fn viscosity_table_and_clamping() {
    assert_eq!(kinematic_viscosity_m2_s(10.0), 1.31e-6);
    assert_eq!(kinematic_viscosity_m2_s(5.0), 1.52e-6);
    assert_eq!(kinematic_viscosity_m2_s(70.0), 0.41e-6);
    assert_eq!(kinematic_viscosity_m2_s(0.0), 1.52e-6);
    assert_eq!(kinematic_viscosity_m2_s(95.0), 0.41e-6);
    let mid = kinematic_viscosity_m2_s(15.0);
    assert!((mid - 1.155e-6).abs() < 1e-15, "ν(15) = {mid}");
}

#[test]
fn viscosity_decreases_with_temperature() {
    let mut prev = f64::INFINITY;
    for t in (0..=80).map(f64::from) {
        let nu = kinematic_viscosity_m2_s(t);
        assert!(nu <= prev, "ν({t}) = {nu} > {prev}");
        prev = nu;
    }
    for &(t, nu) in VISCOSITY_POINTS.iter() {
        assert_eq!(kinematic_viscosity_m2_s(t), nu);
    }
}
