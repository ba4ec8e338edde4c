//! 소비자 그룹별 일·시·초 유량 집계.
//!
//! 최대초 유량 q = 5·q0·α, 최대시 유량 q_hr = 0.005·q0,hr·α_hr 로 구하고,
//! α는 [`peak_factor`](super::peak_factor) 표에서 조회한다.
//! 일 수량과 최대 유량 합계에는 전역 보정계수(일 불균등 × 여유 × 누수)를 곱한다.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::consumers::{
    ConsumerCategory, ConsumerGroup, DailyNorms, FixtureRates, HourlyRates, SewerCategory,
    SupplySource,
};
use super::peak_factor::{self, AlphaTable};
use crate::interp::{non_negative, ratio_or_zero};

/// 보일러 보충수 = 일반 소비자 일 수량의 6.4%.
pub const BOILER_MAKEUP_SHARE: f64 = 0.064;
/// 최대초 유량 계수: q = 5·q0·α [L/s]
pub const PEAK_SECOND_COEFF: f64 = 5.0;
/// 최대시 유량 계수: q_hr = 0.005·q0,hr·α_hr [m³/h]
pub const PEAK_HOUR_COEFF: f64 = 0.005;

/// 전역 보정계수.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemandFactors {
    /// 최대시 계수 K_hr (최대시 원단위가 없을 때만 사용)
    pub peak_hour_factor: f64,
    /// 일 불균등 계수
    pub day_factor: f64,
    /// 여유 계수
    pub reserve_factor: f64,
    /// 누수·손실 [%]
    pub leakage_percent: f64,
    /// 최대일 계수
    pub max_day_factor: f64,
    /// 배수량/급수량 비
    pub wastewater_factor: f64,
}

impl Default for DemandFactors {
    fn default() -> Self {
        Self {
            peak_hour_factor: 1.8,
            day_factor: 1.0,
            reserve_factor: 1.0,
            leakage_percent: 0.0,
            max_day_factor: 1.1,
            wastewater_factor: 1.0,
        }
    }
}

impl DemandFactors {
    /// 각 계수를 자연 하한으로 클램프한 사본.
    pub fn clamped(&self) -> Self {
        Self {
            peak_hour_factor: self.peak_hour_factor.max(1.0),
            day_factor: self.day_factor.max(1.0),
            reserve_factor: self.reserve_factor.max(1.0),
            leakage_percent: non_negative(self.leakage_percent),
            max_day_factor: self.max_day_factor.max(1.0),
            wastewater_factor: non_negative(self.wastewater_factor),
        }
    }

    /// 일 수량·최대 유량에 곱하는 보정계수.
    pub fn adjustment_factor(&self) -> f64 {
        let k = self.clamped();
        k.day_factor * k.reserve_factor * (1.0 + k.leakage_percent / 100.0)
    }
}

/// 한 확률값에 대한 α 조회 내역.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakLookup {
    pub p: f64,
    pub np: f64,
    pub alpha: f64,
    pub table: AlphaTable,
}

impl PeakLookup {
    fn resolve(count: f64, hourly_rate: f64, fixture_rate: f64, normalizer: f64) -> Self {
        let denom = fixture_rate * normalizer;
        let p = ratio_or_zero(hourly_rate, denom);
        let np = ratio_or_zero(count * hourly_rate, denom);
        let lookup = peak_factor::alpha_lookup(count, p, np);
        Self {
            p,
            np,
            alpha: lookup.alpha,
            table: lookup.table,
        }
    }
}

/// 냉수·온수·총 계통별 α 조회.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakSet {
    pub cold: PeakLookup,
    pub hot: PeakLookup,
    pub total: PeakLookup,
}

/// 소비자 그룹별 계산 행.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumerRow {
    pub name: String,
    pub unit: String,
    pub category: ConsumerCategory,
    pub source: SupplySource,
    pub sewer: SewerCategory,
    /// 계산에 쓴 단위 수 (보일러 보충수는 자동 산정값)
    pub count: f64,
    /// 단위 수가 자동 산정되었는지 여부
    pub count_synthesized: bool,
    pub t_hours: f64,
    pub norms: DailyNorms,
    pub hourly: HourlyRates,
    pub fixtures: FixtureRates,
    /// 최대초 기준 (P = q_hr / (q0·3600))
    pub second: PeakSet,
    /// 최대시 기준 (P_hr = q_hr / q0,hr)
    pub hour: PeakSet,
    pub cold_m3_day: f64,
    pub hot_m3_day: f64,
    pub total_m3_day: f64,
    pub cold_max_l_s: f64,
    pub hot_max_l_s: f64,
    pub total_max_l_s: f64,
    pub cold_max_m3_hour: f64,
    pub hot_max_m3_hour: f64,
    pub total_max_m3_hour: f64,
    pub source_doc: String,
    pub source_item: String,
}

/// 집계 합계. `_base`는 보정 전, 나머지 일 수량·최대 유량은 보정 후 값이다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DemandTotals {
    pub cold_m3_day_base: f64,
    pub hot_m3_day_base: f64,
    pub total_m3_day_base: f64,
    pub cold_m3_day: f64,
    pub hot_m3_day: f64,
    pub total_m3_day: f64,
    pub cold_avg_m3_hour: f64,
    pub hot_avg_m3_hour: f64,
    pub avg_m3_hour: f64,
    pub cold_max_m3_hour: f64,
    pub hot_max_m3_hour: f64,
    pub max_m3_hour: f64,
    pub cold_max_l_s: f64,
    pub hot_max_l_s: f64,
    pub max_l_s: f64,
    /// Σ(U·q_hr,u) 기준 최대시 유량 (표시용, 보정 없음)
    pub cold_norm_max_m3_hour: f64,
    pub hot_norm_max_m3_hour: f64,
    pub norm_max_m3_hour: f64,
    pub cold_max_m3_day: f64,
    pub hot_max_m3_day: f64,
    pub total_max_m3_day: f64,
    pub sewer_avg_m3_day: f64,
    pub sewer_max_m3_day: f64,
    pub sewer_max_m3_hour: f64,
    pub sewer_max_l_s: f64,
}

/// 수량 밸런스 표의 고정 행 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceKind {
    Cold,
    Hot,
    SupplyTotal,
    DrainageTotal,
}

impl BalanceKind {
    pub fn label(self) -> &'static str {
        match self {
            BalanceKind::Cold => "냉수",
            BalanceKind::Hot => "온수",
            BalanceKind::SupplyTotal => "급수 합계",
            BalanceKind::DrainageTotal => "배수 합계",
        }
    }
}

/// 수량 밸런스 표의 한 행.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalanceRow {
    pub kind: BalanceKind,
    pub q_sec_l_s: f64,
    pub q_avg_day_m3_day: f64,
    pub q_max_day_m3_day: f64,
    pub q_max_hour_m3_hour: f64,
}

/// 급수원별 일 수량 [m³/일].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SourceTotals {
    pub city_mains: f64,
    pub wells: f64,
    pub process_water: f64,
    pub recycled: f64,
}

impl SourceTotals {
    fn add(&mut self, source: SupplySource, m3_day: f64) {
        let slot = match source {
            SupplySource::CityMains => &mut self.city_mains,
            SupplySource::Wells => &mut self.wells,
            SupplySource::ProcessWater => &mut self.process_water,
            SupplySource::Recycled => &mut self.recycled,
        };
        *slot += m3_day;
    }
}

/// 배수 수질별 일 수량 [m³/일].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SewerTotals {
    pub domestic: f64,
    pub conditionally_clean: f64,
    pub mechanically_polluted: f64,
    pub chemically_polluted: f64,
}

impl SewerTotals {
    fn add(&mut self, sewer: SewerCategory, m3_day: f64) {
        let slot = match sewer {
            SewerCategory::Domestic => &mut self.domestic,
            SewerCategory::ConditionallyClean => &mut self.conditionally_clean,
            SewerCategory::MechanicallyPolluted => &mut self.mechanically_polluted,
            SewerCategory::ChemicallyPolluted => &mut self.chemically_polluted,
        };
        *slot += m3_day;
    }
}

/// 급수원 × 배수처별 수량 (보정 전 행별 일 수량 합).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WaterBalance {
    pub by_source: SourceTotals,
    /// 살수·빙상 주수처럼 하수로 가지 않는 손실
    pub irretrievable_loss_m3_day: f64,
    pub by_sewer: SewerTotals,
}

/// 집계 결과 전체.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    /// 클램프 후 실제 적용한 계수
    pub factors: DemandFactors,
    pub adjustment_factor: f64,
    /// 특수 분류를 제외한 일반 소비자 일 수량 [m³/일]
    pub non_special_base_m3_day: f64,
    pub totals: DemandTotals,
    pub rows: Vec<ConsumerRow>,
    pub balance: Vec<BalanceRow>,
    pub water_balance: WaterBalance,
}

/// 특수 분류를 제외한 일반 소비자의 일 수량 [m³/일].
pub fn non_special_base_m3_day(groups: &[ConsumerGroup]) -> f64 {
    groups
        .iter()
        .filter(|g| g.clamped_count() > 0.0 && !g.category.is_special())
        .map(|g| g.clamped_count() * g.total_daily_norm() / 1000.0)
        .sum()
}

/// 보일러 보충수 그룹의 단위 수: U = V_base·0.064·1000 / q_u.
///
/// 원단위가 0이면 `None` (사용자 입력 대수를 그대로 쓴다).
pub fn boiler_makeup_count(base_m3_day: f64, unit_norm_l_day: f64) -> Option<f64> {
    if unit_norm_l_day > 0.0 {
        Some(base_m3_day * BOILER_MAKEUP_SHARE * 1000.0 / unit_norm_l_day)
    } else {
        None
    }
}

fn evaluate_group(group: &ConsumerGroup, base_m3_day: f64, peak_hour_factor: f64) -> ConsumerRow {
    let mut count = group.clamped_count();
    let mut count_synthesized = false;
    if group.category == ConsumerCategory::BoilerMakeup {
        if let Some(n) = boiler_makeup_count(base_m3_day, group.total_daily_norm()) {
            count = n;
            count_synthesized = true;
        }
    }
    let t_hours = group.clamped_hours();
    let norms = group.daily_norms();
    if norms.hot > norms.total && norms.total > 0.0 {
        warn!(
            "'{}': 온수 원단위 {} > 총 원단위 {}",
            group.name, norms.hot, norms.total
        );
    }

    let (hourly, fixtures) = if group.has_peak_data() {
        let hourly = group.hourly_rates(&norms, peak_hour_factor);
        let fixtures = group.fixture_rates(&hourly);
        (hourly, fixtures)
    } else {
        (HourlyRates::default(), FixtureRates::default())
    };

    let second = PeakSet {
        cold: PeakLookup::resolve(count, hourly.cold, fixtures.spec_l_s, 3600.0),
        hot: PeakLookup::resolve(count, hourly.hot, fixtures.spec_l_s, 3600.0),
        total: PeakLookup::resolve(count, hourly.total, fixtures.total_l_s, 3600.0),
    };
    let hour = PeakSet {
        cold: PeakLookup::resolve(count, hourly.cold, fixtures.spec_l_h, 1.0),
        hot: PeakLookup::resolve(count, hourly.hot, fixtures.spec_l_h, 1.0),
        total: PeakLookup::resolve(count, hourly.total, fixtures.total_l_h, 1.0),
    };

    let cold_m3_day = count * norms.cold / 1000.0;
    let hot_m3_day = count * norms.hot / 1000.0;

    let row = ConsumerRow {
        name: group.name.clone(),
        unit: group.unit.clone(),
        category: group.category,
        source: group.source,
        sewer: group.sewer,
        count,
        count_synthesized,
        t_hours,
        norms,
        hourly,
        fixtures,
        second,
        hour,
        cold_m3_day,
        hot_m3_day,
        total_m3_day: cold_m3_day + hot_m3_day,
        cold_max_l_s: PEAK_SECOND_COEFF * fixtures.spec_l_s * second.cold.alpha,
        hot_max_l_s: PEAK_SECOND_COEFF * fixtures.spec_l_s * second.hot.alpha,
        total_max_l_s: PEAK_SECOND_COEFF * fixtures.total_l_s * second.total.alpha,
        cold_max_m3_hour: PEAK_HOUR_COEFF * fixtures.spec_l_h * hour.cold.alpha,
        hot_max_m3_hour: PEAK_HOUR_COEFF * fixtures.spec_l_h * hour.hot.alpha,
        total_max_m3_hour: PEAK_HOUR_COEFF * fixtures.total_l_h * hour.total.alpha,
        source_doc: group.source_doc.trim().to_string(),
        source_item: group.source_item.trim().to_string(),
    };
    debug!(
        "'{}': U={:.3} Qday={:.3} m3 q={:.3} L/s q_hr={:.3} m3/h (α={:.3}/{:?}, α_hr={:.3}/{:?})",
        row.name,
        row.count,
        row.total_m3_day,
        row.total_max_l_s,
        row.total_max_m3_hour,
        second.total.alpha,
        second.total.table,
        hour.total.alpha,
        hour.total.table
    );
    row
}

/// 소비자 그룹 목록을 집계한다. 입력 순서대로 행을 만든다.
pub fn aggregate(groups: &[ConsumerGroup], factors: &DemandFactors) -> AggregateResult {
    let k = factors.clamped();
    let adjust = k.adjustment_factor();
    let base_m3_day = non_special_base_m3_day(groups);

    let rows: Vec<ConsumerRow> = groups
        .iter()
        .map(|g| evaluate_group(g, base_m3_day, k.peak_hour_factor))
        .collect();

    let mut sum = DemandTotals::default();
    let mut cold_avg_base = 0.0;
    let mut hot_avg_base = 0.0;
    let mut cold_max_hour_base = 0.0;
    let mut hot_max_hour_base = 0.0;
    let mut total_max_hour_base = 0.0;
    let mut cold_max_sec_base = 0.0;
    let mut hot_max_sec_base = 0.0;
    let mut total_max_sec_base = 0.0;
    let mut water_balance = WaterBalance::default();

    for row in &rows {
        sum.cold_m3_day_base += row.cold_m3_day;
        sum.hot_m3_day_base += row.hot_m3_day;
        let hours = if row.t_hours > 0.0 { row.t_hours } else { 24.0 };
        cold_avg_base += row.cold_m3_day / hours;
        hot_avg_base += row.hot_m3_day / hours;

        sum.cold_norm_max_m3_hour += row.count * row.hourly.cold / 1000.0;
        sum.hot_norm_max_m3_hour += row.count * row.hourly.hot / 1000.0;

        cold_max_hour_base += row.cold_max_m3_hour;
        hot_max_hour_base += row.hot_max_m3_hour;
        total_max_hour_base += row.total_max_m3_hour;
        cold_max_sec_base += row.cold_max_l_s;
        hot_max_sec_base += row.hot_max_l_s;
        total_max_sec_base += row.total_max_l_s;

        if row.count > 0.0 {
            water_balance.by_source.add(row.source, row.total_m3_day);
            if row.category.is_irretrievable() {
                water_balance.irretrievable_loss_m3_day += row.total_m3_day;
            } else {
                water_balance.by_sewer.add(row.sewer, row.total_m3_day);
            }
        }
    }

    sum.total_m3_day_base = sum.cold_m3_day_base + sum.hot_m3_day_base;
    sum.norm_max_m3_hour = sum.cold_norm_max_m3_hour + sum.hot_norm_max_m3_hour;

    sum.cold_m3_day = sum.cold_m3_day_base * adjust;
    sum.hot_m3_day = sum.hot_m3_day_base * adjust;
    sum.total_m3_day = sum.total_m3_day_base * adjust;

    sum.cold_max_m3_hour = cold_max_hour_base * adjust;
    sum.hot_max_m3_hour = hot_max_hour_base * adjust;
    sum.max_m3_hour = total_max_hour_base * adjust;

    // 초 유량이 0이면 최대시 유량을 초 단위로 환산해 대신 쓴다.
    let hour_to_sec = |m3_hour: f64| m3_hour * 1000.0 / 3600.0;
    sum.cold_max_l_s = cold_max_sec_base * adjust;
    if sum.cold_max_l_s <= 0.0 {
        sum.cold_max_l_s = hour_to_sec(sum.cold_max_m3_hour);
    }
    sum.hot_max_l_s = hot_max_sec_base * adjust;
    if sum.hot_max_l_s <= 0.0 {
        sum.hot_max_l_s = hour_to_sec(sum.hot_max_m3_hour);
    }
    sum.max_l_s = total_max_sec_base * adjust;
    if sum.max_l_s <= 0.0 {
        sum.max_l_s = hour_to_sec(sum.max_m3_hour);
    }

    sum.cold_avg_m3_hour = cold_avg_base * adjust;
    sum.hot_avg_m3_hour = hot_avg_base * adjust;
    sum.avg_m3_hour = sum.cold_avg_m3_hour + sum.hot_avg_m3_hour;

    sum.cold_max_m3_day = sum.cold_m3_day * k.max_day_factor;
    sum.hot_max_m3_day = sum.hot_m3_day * k.max_day_factor;
    sum.total_max_m3_day = sum.total_m3_day * k.max_day_factor;

    sum.sewer_avg_m3_day = sum.total_m3_day * k.wastewater_factor;
    sum.sewer_max_m3_day = sum.total_max_m3_day * k.wastewater_factor;
    sum.sewer_max_m3_hour = sum.max_m3_hour * k.wastewater_factor;
    sum.sewer_max_l_s = sum.max_l_s * k.wastewater_factor;

    let balance = balance_rows(&sum);

    info!(
        "수요 집계: {}개 그룹, Qday={:.3} m3/일, q={:.3} L/s, q_hr={:.3} m3/h (보정 {:.3})",
        rows.len(),
        sum.total_m3_day,
        sum.max_l_s,
        sum.max_m3_hour,
        adjust
    );

    AggregateResult {
        factors: k,
        adjustment_factor: adjust,
        non_special_base_m3_day: base_m3_day,
        totals: sum,
        rows,
        balance,
        water_balance,
    }
}

fn balance_rows(t: &DemandTotals) -> Vec<BalanceRow> {
    vec![
        BalanceRow {
            kind: BalanceKind::Cold,
            q_sec_l_s: t.cold_max_l_s,
            q_avg_day_m3_day: t.cold_m3_day,
            q_max_day_m3_day: t.cold_max_m3_day,
            q_max_hour_m3_hour: t.cold_max_m3_hour,
        },
        BalanceRow {
            kind: BalanceKind::Hot,
            q_sec_l_s: t.hot_max_l_s,
            q_avg_day_m3_day: t.hot_m3_day,
            q_max_day_m3_day: t.hot_max_m3_day,
            q_max_hour_m3_hour: t.hot_max_m3_hour,
        },
        BalanceRow {
            kind: BalanceKind::SupplyTotal,
            q_sec_l_s: t.max_l_s,
            q_avg_day_m3_day: t.total_m3_day,
            q_max_day_m3_day: t.total_max_m3_day,
            q_max_hour_m3_hour: t.max_m3_hour,
        },
        BalanceRow {
            kind: BalanceKind::DrainageTotal,
            q_sec_l_s: t.sewer_max_l_s,
            q_avg_day_m3_day: t.sewer_avg_m3_day,
            q_max_day_m3_day: t.sewer_max_m3_day,
            q_max_hour_m3_hour: t.sewer_max_m3_hour,
        },
    ]
}
