use serde::{Deserialize, Serialize};

use super::hydraulics::HydraulicResult;
use crate::interp::non_negative;

/// 급수 설비 필요 수두 구성 [m].
///
/// H_req = H_geo + h_network + H_free + h_meter + h_hex + h_inlet
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadRequirement {
    /// 기하학적 높이
    pub geometric_height_m: f64,
    /// 관로 마찰 + 국부손실 (수두손실 계산의 `h_total_m`)
    pub network_loss_m: f64,
    /// 말단 자유수두
    pub free_head_m: f64,
    /// 계량기 손실
    pub meter_loss_m: f64,
    /// 열교환기 손실
    pub heat_exchanger_loss_m: f64,
    /// 인입관 손실
    pub inlet_loss_m: f64,
}

impl HeadRequirement {
    /// 수두손실 계산 결과를 관로 손실 항으로 받아 만든다.
    pub fn with_network(result: &HydraulicResult) -> Self {
        Self {
            network_loss_m: result.h_total_m,
            ..Self::default()
        }
    }

    /// 필요 수두 [m]. 음수 항은 0으로 본다.
    pub fn required_head_m(&self) -> f64 {
        [
            self.geometric_height_m,
            self.network_loss_m,
            self.free_head_m,
            self.meter_loss_m,
            self.heat_exchanger_loss_m,
            self.inlet_loss_m,
        ]
        .into_iter()
        .map(non_negative)
        .sum()
    }
}
