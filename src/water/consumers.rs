use serde::{Deserialize, Serialize};

use crate::interp::{non_negative, ratio_or_zero};

/// 소비자 그룹의 특수 분류. 입력 수집 단계에서 한 번 지정한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumerCategory {
    /// 일반 소비자
    #[default]
    Regular,
    /// 녹지·도로 살수
    Irrigation,
    /// 빙상장 표면 주수
    IceRinkFill,
    /// 보일러실 보충수. 대수는 다른 소비자 기준 수량에서 자동 산정된다.
    BoilerMakeup,
}

impl ConsumerCategory {
    /// 보일러 보충수 기준 수량에서 제외되는 특수 분류인지 여부.
    pub fn is_special(self) -> bool {
        !matches!(self, ConsumerCategory::Regular)
    }

    /// 보고서에 운전 시간을 표시하는 분류인지 여부.
    pub fn has_operating_time(self) -> bool {
        matches!(self, ConsumerCategory::Regular)
    }

    /// 하수로 배출되지 않고 손실로 처리되는 분류인지 여부.
    pub fn is_irretrievable(self) -> bool {
        matches!(self, ConsumerCategory::Irrigation | ConsumerCategory::IceRinkFill)
    }
}

/// 급수원 구분.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplySource {
    /// 시 상수도
    #[default]
    CityMains,
    /// 지하수 관정
    Wells,
    /// 공업용수
    ProcessWater,
    /// 순환수 계통
    Recycled,
}

/// 배수 수질 구분.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SewerCategory {
    /// 생활 하수
    #[default]
    Domestic,
    /// 조건부 청정수
    ConditionallyClean,
    /// 기계적·무기 오염
    MechanicallyPolluted,
    /// 화학적·유기 오염
    ChemicallyPolluted,
}

/// 수요 집계의 한 행. 같은 사용 패턴을 가진 소비자 묶음.
///
/// 유량 단위: 일 원단위 [L/(단위·일)], 시간 원단위 [L/(단위·h)],
/// 기구 유량 [L/s] 또는 [L/h]. 0은 "미입력"을 뜻한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerGroup {
    pub name: String,
    /// 계량 단위(인, 병상, 좌석 등)
    pub unit: String,
    pub category: ConsumerCategory,
    /// 단위 수 U
    pub count: f64,
    /// 구형 입력: 냉수 일 원단위
    pub cold_l_per_unit_day: f64,
    /// 구형 입력: 온수 일 원단위
    pub hot_l_per_unit_day: f64,
    /// 총 일 원단위 q_u,tot
    pub q_u_total_l_day: f64,
    /// 온수 일 원단위 q_u,h
    pub q_u_hot_l_day: f64,
    /// 최대시 총 원단위 q_hr,u,tot
    pub q_hr_total_l_h: f64,
    /// 최대시 온수 원단위 q_hr,u,h
    pub q_hr_hot_l_h: f64,
    /// 기구 유량(총) q0,tot [L/s]
    pub q0_total_l_s: f64,
    /// 기구 유량(총) q0,hr,tot [L/h]
    pub q0_total_l_h: f64,
    /// 계통별 기구 유량 q0 [L/s]
    pub q0_spec_l_s: f64,
    /// 계통별 기구 유량 q0,hr [L/h]
    pub q0_spec_l_h: f64,
    /// 하루 운전 시간 T [h]
    pub t_hours: f64,
    pub source_doc: String,
    pub source_item: String,
    pub source: SupplySource,
    pub sewer: SewerCategory,
}

impl Default for ConsumerGroup {
    fn default() -> Self {
        Self {
            name: String::new(),
            unit: String::new(),
            category: ConsumerCategory::Regular,
            count: 0.0,
            cold_l_per_unit_day: 0.0,
            hot_l_per_unit_day: 0.0,
            q_u_total_l_day: 0.0,
            q_u_hot_l_day: 0.0,
            q_hr_total_l_h: 0.0,
            q_hr_hot_l_h: 0.0,
            q0_total_l_s: 0.0,
            q0_total_l_h: 0.0,
            q0_spec_l_s: 0.0,
            q0_spec_l_h: 0.0,
            t_hours: 24.0,
            source_doc: String::new(),
            source_item: String::new(),
            source: SupplySource::CityMains,
            sewer: SewerCategory::Domestic,
        }
    }
}

/// 단위당 일 원단위 [L/(단위·일)].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyNorms {
    pub total: f64,
    pub hot: f64,
    pub cold: f64,
}

/// 단위당 최대시 원단위 [L/(단위·h)].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HourlyRates {
    pub total: f64,
    pub hot: f64,
    pub cold: f64,
}

/// 확률 계산에 쓰는 기구 유량.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FixtureRates {
    /// q0,tot [L/s]
    pub total_l_s: f64,
    /// q0,hr,tot [L/h]
    pub total_l_h: f64,
    /// 냉수/온수 계통 q0 [L/s]
    pub spec_l_s: f64,
    /// 냉수/온수 계통 q0,hr [L/h]
    pub spec_l_h: f64,
}

impl ConsumerGroup {
    /// 음수를 0으로 정리한 단위 수.
    pub fn clamped_count(&self) -> f64 {
        non_negative(self.count)
    }

    /// 음수를 0으로 정리한 운전 시간.
    pub fn clamped_hours(&self) -> f64 {
        non_negative(self.t_hours)
    }

    /// 총 일 원단위. 명시값 우선, 없으면 구형 냉수+온수 합.
    pub fn total_daily_norm(&self) -> f64 {
        let explicit = non_negative(self.q_u_total_l_day);
        if explicit > 0.0 {
            explicit
        } else {
            non_negative(self.cold_l_per_unit_day) + non_negative(self.hot_l_per_unit_day)
        }
    }

    /// 총/온수/냉수 일 원단위를 결정한다.
    pub fn daily_norms(&self) -> DailyNorms {
        let total = self.total_daily_norm();
        let explicit_hot = non_negative(self.q_u_hot_l_day);
        let hot = if explicit_hot > 0.0 {
            explicit_hot
        } else {
            non_negative(self.hot_l_per_unit_day)
        };
        DailyNorms {
            total,
            hot,
            cold: (total - hot).max(0.0),
        }
    }

    /// 최대시 원단위나 기구 유량이 하나라도 입력되었는지 여부.
    ///
    /// 없으면 최대시·최대초 유량을 만들어내지 않는다.
    pub fn has_peak_data(&self) -> bool {
        [
            self.q_hr_total_l_h,
            self.q_hr_hot_l_h,
            self.q0_total_l_s,
            self.q0_total_l_h,
            self.q0_spec_l_s,
            self.q0_spec_l_h,
        ]
        .iter()
        .any(|v| non_negative(*v) > 0.0)
    }

    /// 최대시 원단위. 명시 q_hr → 기구 q0,hr → q_u/T → q_u/24·K_hr 순으로 정한다.
    pub fn hourly_rates(&self, norms: &DailyNorms, peak_hour_factor: f64) -> HourlyRates {
        let hours = self.clamped_hours();
        let k_hour = peak_hour_factor.max(1.0);
        let chain = |explicit: f64, fixture: f64, daily: f64| -> f64 {
            let explicit = non_negative(explicit);
            let fixture = non_negative(fixture);
            if explicit > 0.0 {
                explicit
            } else if fixture > 0.0 {
                fixture
            } else if hours > 0.0 {
                daily / hours
            } else {
                daily / 24.0 * k_hour
            }
        };
        let total = chain(self.q_hr_total_l_h, self.q0_total_l_h, norms.total);
        let hot = chain(self.q_hr_hot_l_h, self.q0_spec_l_h, norms.hot);
        HourlyRates {
            total,
            hot,
            cold: (total - hot).max(0.0),
        }
    }

    /// 기구 유량. 계통별 값이 없으면 총 기구 유량으로 대체한다.
    pub fn fixture_rates(&self, hourly: &HourlyRates) -> FixtureRates {
        let q0_total_l_s = non_negative(self.q0_total_l_s);
        let q0_total_l_h = non_negative(self.q0_total_l_h);
        let total_l_s = if q0_total_l_s > 0.0 {
            q0_total_l_s
        } else {
            ratio_or_zero(hourly.total, 3600.0)
        };
        let total_l_h = if q0_total_l_h > 0.0 {
            q0_total_l_h
        } else {
            hourly.total
        };
        let spec_l_s = non_negative(self.q0_spec_l_s);
        let spec_l_h = non_negative(self.q0_spec_l_h);
        FixtureRates {
            total_l_s,
            total_l_h,
            spec_l_s: if spec_l_s > 0.0 { spec_l_s } else { total_l_s },
            spec_l_h: if spec_l_h > 0.0 { spec_l_h } else { total_l_h },
        }
    }
}
