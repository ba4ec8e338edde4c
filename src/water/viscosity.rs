use crate::interp;

/// 물의 온도별 동점도 보정점 `(°C, m²/s)`.
pub const VISCOSITY_POINTS: [(f64, f64); 8] = [
    (5.0, 1.52e-6),
    (10.0, 1.31e-6),
    (20.0, 1.00e-6),
    (30.0, 0.80e-6),
    (40.0, 0.66e-6),
    (50.0, 0.55e-6),
    (60.0, 0.47e-6),
    (70.0, 0.41e-6),
];

/// 수온 [°C]에서 물의 동점도 [m²/s]를 선형 보간으로 구한다.
///
/// 5~70 °C 밖은 가장자리 값으로 클램프한다.
pub fn kinematic_viscosity_m2_s(temp_c: f64) -> f64 {
    interp::linear(&VISCOSITY_POINTS, temp_c)
}
