//! 재질별 후보 내경과 유속 한계 기준 관경 추천.

use serde::Serialize;

use super::hydraulics::{self, HydraulicInput, LocalLoss, PipeMaterial};

// 강관: 호칭경 [mm]
const STEEL_MM: &[f64] = &[
    15.0, 20.0, 25.0, 32.0, 40.0, 50.0, 65.0, 80.0, 100.0, 125.0, 150.0, 200.0,
];
const CAST_IRON_MM: &[f64] = &[65.0, 80.0, 100.0, 125.0, 150.0, 200.0, 250.0, 300.0];
const PLASTIC_MM: &[f64] = &[
    20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 75.0, 90.0, 110.0, 125.0, 140.0, 160.0, 200.0, 250.0,
    315.0,
];
const COPPER_MM: &[f64] = &[
    6.0, 8.0, 10.0, 12.0, 15.0, 18.0, 22.0, 28.0, 35.0, 42.0, 54.0, 64.0, 66.7, 76.1, 88.9,
    108.0, 133.0, 159.0, 219.0, 267.0,
];
// 유리섬유강화관: 제조 방식별 표의 내경을 합친 목록
const FIBERGLASS_MM: &[f64] = &[
    50.0, 60.0, 65.0, 80.0, 90.0, 100.0, 110.0, 122.0, 150.0, 175.0, 200.0, 215.0, 265.0,
    300.0, 315.0, 400.0, 500.0,
];
const METAL_PLASTIC_MM: &[f64] = &[20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 75.0, 90.0, 110.0];
const POLYPLASTIC_MM: &[f64] = &[
    20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 75.0, 90.0, 110.0, 125.0, 140.0, 160.0,
];

/// 재질별 후보 내경 [mm], 오름차순.
pub fn candidate_diameters_mm(material: PipeMaterial) -> &'static [f64] {
    match material {
        PipeMaterial::SteelVgp | PipeMaterial::SteelWelded => STEEL_MM,
        PipeMaterial::CastIron => CAST_IRON_MM,
        PipeMaterial::Plastic => PLASTIC_MM,
        PipeMaterial::Copper => COPPER_MM,
        PipeMaterial::Fiberglass => FIBERGLASS_MM,
        PipeMaterial::MetalPlastic => METAL_PLASTIC_MM,
        PipeMaterial::Polyplastic => POLYPLASTIC_MM,
    }
}

/// 추천 계산에서 평가한 후보 한 개.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiameterCandidate {
    pub diameter_mm: f64,
    pub v_m_s: f64,
    pub i_m_per_m: f64,
}

/// 관경 추천 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiameterRecommendation {
    pub diameter_mm: f64,
    /// 평가 순서대로의 후보 목록
    pub shortlist: Vec<DiameterCandidate>,
}

/// 관경 추천 조건.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendInput {
    pub material: PipeMaterial,
    pub flow_l_s: f64,
    pub temp_c: f64,
    pub is_new: bool,
    pub v_min_m_s: f64,
    pub v_max_m_s: f64,
}

/// 후보 내경을 작은 것부터 검토해 유속 한계를 만족하는 관경을 고른다.
///
/// v_min ≤ v ≤ v_max 인 첫 관경에서 멈춘다. 그런 관경이 없으면
/// v ≤ v_max 였던 마지막 관경, 그것도 없으면 가장 큰 관경을 돌려준다.
pub fn recommend_diameter(input: &RecommendInput) -> DiameterRecommendation {
    let candidates = candidate_diameters_mm(input.material);
    let mut best = candidates.last().copied().unwrap_or(100.0);
    let mut shortlist = Vec::with_capacity(candidates.len());

    for &dmm in candidates {
        let r = hydraulics::solve(&HydraulicInput {
            material: input.material,
            flow_l_s: input.flow_l_s,
            diameter_m: dmm / 1000.0,
            length_m: 1.0,
            temp_c: input.temp_c,
            is_new: input.is_new,
            local_loss: LocalLoss::None,
        });
        shortlist.push(DiameterCandidate {
            diameter_mm: dmm,
            v_m_s: r.v_m_s,
            i_m_per_m: r.i_m_per_m,
        });
        if r.v_m_s >= input.v_min_m_s && r.v_m_s <= input.v_max_m_s {
            best = dmm;
            break;
        }
        if r.v_m_s <= input.v_max_m_s {
            best = dmm;
        }
    }

    DiameterRecommendation {
        diameter_mm: best,
        shortlist,
    }
}
