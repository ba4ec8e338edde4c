//! 배관 구간 수두손실 계산.
//!
//! 재질별 경험식으로 동수경사 i [m/m]를 구하고, 마찰계수 λ는 Darcy-Weisbach
//! 관계 λ = i·2g·d / v² 로 역산해 진단값으로 돌려준다.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::viscosity::kinematic_viscosity_m2_s;
use crate::interp::non_negative;

/// 중력가속도 [m/s²]
pub const G: f64 = 9.80665;

const MIN_DIAMETER_M: f64 = 1.0e-6;
const MIN_VISCOSITY_M2_S: f64 = 1.0e-9;
const MIN_VELOCITY_M_S: f64 = 1.0e-9;
const MIN_VELOCITY_SQ: f64 = 1.0e-12;

/// 사용 강관의 난류 영역 판정 경계 v/ν [1/m].
pub const STEEL_ROUGH_REGIME_RATIO: f64 = 9.2e5;
/// 사용 주철관의 고유속 판정 경계 [m/s].
pub const CAST_IRON_HIGH_VELOCITY_M_S: f64 = 1.2;

/// 관 재질.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeMaterial {
    /// 수도용 아연도 강관
    SteelVgp,
    /// 전기용접 강관
    SteelWelded,
    CastIron,
    /// PE/PVC
    Plastic,
    /// PP-R/AL/PP-R 복합관
    MetalPlastic,
    Fiberglass,
    /// PP-R
    Polyplastic,
    Copper,
}

impl PipeMaterial {
    pub const ALL: [PipeMaterial; 8] = [
        PipeMaterial::SteelVgp,
        PipeMaterial::SteelWelded,
        PipeMaterial::CastIron,
        PipeMaterial::Plastic,
        PipeMaterial::MetalPlastic,
        PipeMaterial::Fiberglass,
        PipeMaterial::Polyplastic,
        PipeMaterial::Copper,
    ];

    /// 재질 코드 문자열.
    pub fn code(self) -> &'static str {
        match self {
            PipeMaterial::SteelVgp => "steel_vgp",
            PipeMaterial::SteelWelded => "steel_welded",
            PipeMaterial::CastIron => "cast_iron",
            PipeMaterial::Plastic => "plastic",
            PipeMaterial::MetalPlastic => "metal_plastic",
            PipeMaterial::Fiberglass => "fiberglass",
            PipeMaterial::Polyplastic => "polyplastic",
            PipeMaterial::Copper => "copper",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PipeMaterial::SteelVgp => "수도용 강관",
            PipeMaterial::SteelWelded => "전기용접 강관",
            PipeMaterial::CastIron => "주철관",
            PipeMaterial::Plastic => "플라스틱관 (PE/PVC)",
            PipeMaterial::MetalPlastic => "금속복합관 (PP-R/AL/PP-R)",
            PipeMaterial::Fiberglass => "유리섬유강화관",
            PipeMaterial::Polyplastic => "폴리프로필렌관 (PP-R)",
            PipeMaterial::Copper => "동관",
        }
    }

    /// 근거 규범 문서.
    pub fn reference_doc(self) -> &'static str {
        match self {
            PipeMaterial::SteelVgp => "СП 30.13330.2020; ГОСТ 3262-75",
            PipeMaterial::SteelWelded => "СП 30.13330.2020; ГОСТ 10704-91",
            PipeMaterial::CastIron => "СП 30.13330.2020; ГОСТ ISO 2531-2022",
            PipeMaterial::Plastic => "СП 30.13330.2020; ГОСТ Р 70628.2-2023",
            PipeMaterial::MetalPlastic => "СП 40-102-2000",
            PipeMaterial::Fiberglass => "СП 40-104-2001",
            PipeMaterial::Polyplastic => "СП 41-109-2005",
            PipeMaterial::Copper => "СП 40-108-2004",
        }
    }

    fn is_steel(self) -> bool {
        matches!(self, PipeMaterial::SteelVgp | PipeMaterial::SteelWelded)
    }
}

impl fmt::Display for PipeMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 알 수 없는 재질 코드.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("알 수 없는 관 재질: {0}")]
pub struct UnknownMaterial(pub String);

impl FromStr for PipeMaterial {
    type Err = UnknownMaterial;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().replace('-', "_").to_ascii_lowercase();
        PipeMaterial::ALL
            .into_iter()
            .find(|m| m.code() == key)
            .ok_or_else(|| UnknownMaterial(s.to_string()))
    }
}

/// 국부손실 산정 방식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum LocalLoss {
    #[default]
    None,
    /// 마찰손실 비례: h_local = k·h_friction
    Coefficient(f64),
    /// 국부저항계수 합: h_local = Σξ·v²/(2g)
    XiSum(f64),
}

impl LocalLoss {
    /// k와 Σξ 중 주어진 값으로 방식을 고른다. 둘 다 있으면 k가 우선이다.
    pub fn from_options(k: Option<f64>, xi: Option<f64>) -> Self {
        match (k, xi) {
            (Some(k), _) => LocalLoss::Coefficient(k),
            (None, Some(xi)) => LocalLoss::XiSum(xi),
            (None, None) => LocalLoss::None,
        }
    }
}

/// 관망 용도별 국부손실 비례계수 k 프리셋.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkPurpose {
    /// 생활·소화 겸용 (주거·공공 건물)
    CombinedDomesticFire,
    /// 생산용
    Industrial,
    /// 생활용 (주거·공공 건물)
    Domestic,
    /// 생산·소화 겸용
    CombinedIndustrialFire,
    /// 소화 전용
    Fire,
    /// 사용자 지정
    Custom,
}

impl NetworkPurpose {
    /// 프리셋 k 값. 사용자 지정은 `None`.
    pub fn k_local(self) -> Option<f64> {
        match self {
            NetworkPurpose::CombinedDomesticFire => Some(0.20),
            NetworkPurpose::Industrial => Some(0.20),
            NetworkPurpose::Domestic => Some(0.30),
            NetworkPurpose::CombinedIndustrialFire => Some(0.15),
            NetworkPurpose::Fire => Some(0.10),
            NetworkPurpose::Custom => None,
        }
    }
}

/// 배관 구간 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydraulicInput {
    pub material: PipeMaterial,
    /// 설계 유량 [L/s]
    pub flow_l_s: f64,
    /// 내경 [m]
    pub diameter_m: f64,
    /// 구간 길이 [m]
    pub length_m: f64,
    /// 수온 [°C]
    pub temp_c: f64,
    /// 신관 여부 (강관·주철관 경험식 선택)
    pub is_new: bool,
    #[serde(default)]
    pub local_loss: LocalLoss,
}

/// 수두손실 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HydraulicResult {
    /// 유속 [m/s]
    pub v_m_s: f64,
    /// 동수경사 [m/m]
    pub i_m_per_m: f64,
    pub h_friction_m: f64,
    pub h_local_m: f64,
    pub h_total_m: f64,
    /// 마찰계수 λ
    pub lambda_f: f64,
    /// 계산에 쓴 내경 [m]
    pub dp_m: f64,
    pub re: f64,
    /// 동점도 [m²/s]
    pub nu_m2_s: f64,
}

/// 경험식 결과 (동수경사, 마찰계수).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Friction {
    pub gradient: f64,
    pub lambda: f64,
}

impl Friction {
    fn from_gradient(gradient: f64, d: f64, v: f64) -> Self {
        Self {
            gradient,
            lambda: lambda_from_gradient(gradient, d, v),
        }
    }

    fn from_lambda(lambda: f64, d: f64, v: f64) -> Self {
        Self {
            gradient: lambda * v * v / (2.0 * G * d),
            lambda,
        }
    }
}

/// λ = i·2g·d / v². 유속이 0이면 0.
pub fn lambda_from_gradient(gradient: f64, d: f64, v: f64) -> f64 {
    if v <= 0.0 {
        return 0.0;
    }
    gradient * 2.0 * G * d / (v * v).max(MIN_VELOCITY_SQ)
}

/// 매끈한 관 마찰계수: 층류 64/Re, 난류 Blasius 0.3164/Re^0.25.
pub fn smooth_friction_factor(re: f64) -> f64 {
    if re <= 0.0 {
        0.0
    } else if re < 2300.0 {
        64.0 / re
    } else {
        0.3164 / re.powf(0.25)
    }
}

fn steel_friction(d: f64, v: f64, nu: f64, is_new: bool) -> Friction {
    if is_new {
        let lambda =
            (0.312 / d.powf(0.226)) * (1.9e-6 + nu / v.max(MIN_VELOCITY_M_S)).powf(0.226);
        return Friction::from_lambda(lambda, d, v);
    }
    let ratio = v / nu;
    let gradient = if ratio >= STEEL_ROUGH_REGIME_RATIO {
        0.021 * v * v / d.powf(0.3)
    } else {
        v * v / d.powf(0.3) * (1.5e-6 + nu / v.max(MIN_VELOCITY_M_S)).powf(0.3)
    };
    Friction::from_gradient(gradient, d, v)
}

fn cast_iron_friction(d: f64, v: f64, is_new: bool) -> Friction {
    if is_new {
        let lambda =
            (0.01424 / d.powf(0.284)) * (1.0 + 2.36 / v.max(MIN_VELOCITY_M_S)).powf(0.284);
        return Friction::from_lambda(lambda, d, v);
    }
    let gradient = if v > CAST_IRON_HIGH_VELOCITY_M_S {
        0.00107 * v * v / d.powf(1.3)
    } else {
        0.000912 * v * v / d.powf(1.3) * (1.0 + 0.867 / v.max(MIN_VELOCITY_M_S)).powf(0.3)
    };
    Friction::from_gradient(gradient, d, v)
}

/// 재질별 경험식으로 동수경사와 마찰계수를 구한다.
pub fn material_friction(material: PipeMaterial, d: f64, v: f64, nu: f64, is_new: bool) -> Friction {
    let d = d.max(MIN_DIAMETER_M);
    let v = non_negative(v);
    let nu = nu.max(MIN_VISCOSITY_M2_S);

    match material {
        m if m.is_steel() => steel_friction(d, v, nu, is_new),
        PipeMaterial::CastIron => cast_iron_friction(d, v, is_new),
        PipeMaterial::Plastic => {
            Friction::from_gradient(0.000685 * v.powf(1.774) / d.powf(1.226), d, v)
        }
        PipeMaterial::Fiberglass => {
            let lambda = 0.0146 * (v * d).max(MIN_VELOCITY_SQ).powf(-0.226);
            Friction::from_lambda(lambda, d, v)
        }
        _ => {
            let re = if v > 0.0 { v * d / nu } else { 0.0 };
            Friction::from_lambda(smooth_friction_factor(re), d, v)
        }
    }
}

/// 배관 구간의 유속, 동수경사, 마찰·국부·총 수두손실을 계산한다.
///
/// 내경이 0 이하이면 아주 작은 값으로 바꿔 계산하므로 결과가 포화된다.
/// 호출 측에서 내경 > 0을 먼저 확인해야 의미 있는 값이 나온다.
pub fn solve(input: &HydraulicInput) -> HydraulicResult {
    let flow_l_s = non_negative(input.flow_l_s);
    if input.diameter_m.is_nan() || input.diameter_m <= 0.0 {
        warn!("내경 {} m: 계산 결과가 의미 없음", input.diameter_m);
    }
    let d = non_negative(input.diameter_m).max(MIN_DIAMETER_M);
    let length = non_negative(input.length_m);

    let nu = kinematic_viscosity_m2_s(input.temp_c);
    let area = PI * d * d / 4.0;
    let v = if area > 0.0 {
        flow_l_s / 1000.0 / area
    } else {
        0.0
    };
    let re = if nu > 0.0 { v * d / nu } else { 0.0 };

    let friction = material_friction(input.material, d, v, nu, input.is_new);
    let h_friction = friction.gradient * length;
    let h_local = match input.local_loss {
        LocalLoss::None => 0.0,
        LocalLoss::Coefficient(k) => h_friction * non_negative(k),
        LocalLoss::XiSum(xi) => non_negative(xi) * v * v / (2.0 * G),
    };

    debug!(
        "{}: Q={:.3} L/s d={:.4} m v={:.3} m/s Re={:.0} i={:.6} λ={:.5}",
        input.material, flow_l_s, d, v, re, friction.gradient, friction.lambda
    );

    HydraulicResult {
        v_m_s: v,
        i_m_per_m: friction.gradient,
        h_friction_m: h_friction,
        h_local_m: h_local,
        h_total_m: h_friction + h_local,
        lambda_f: friction.lambda,
        dp_m: d,
        re,
        nu_m2_s: nu,
    }
}
