//! 급수 수요 집계 테스트. 주거 그룹 + 살수 그룹 기준 시나리오의 값은 수계산으로 확인했다.
use approx::assert_relative_eq;
use water_supply_toolbox::water::consumers::{
    ConsumerCategory, ConsumerGroup, SewerCategory, SupplySource,
};
use water_supply_toolbox::water::demand::{
    aggregate, boiler_makeup_count, non_special_base_m3_day, BalanceKind, DemandFactors,
};
use water_supply_toolbox::water::peak_factor::AlphaTable;

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn apartments() -> ConsumerGroup {
    ConsumerGroup {
        name: "apartments".into(),
        unit: "person".into(),
        count: 100.0,
        q_u_total_l_day: 200.0,
        q_u_hot_l_day: 50.0,
        q_hr_total_l_h: 10.0,
        q_hr_hot_l_h: 3.0,
        q0_total_l_s: 0.3,
        q0_spec_l_s: 0.2,
        t_hours: 24.0,
        source_doc: "SP 30.13330.2020".into(),
        ..ConsumerGroup::default()
    }
}

fn irrigation() -> ConsumerGroup {
    ConsumerGroup {
        name: "lawn watering".into(),
        unit: "m2".into(),
        category: ConsumerCategory::Irrigation,
        count: 50.0,
        q_u_total_l_day: 4.0,
        source_doc: "SP 30.13330.2020".into(),
        ..ConsumerGroup::default()
    }
}

#[test]
fn reference_scenario_rows() {
    let result = aggregate(&[apartments(), irrigation()], &DemandFactors::default());
    assert_eq!(result.rows.len(), 2);
    assert_eq!(result.adjustment_factor, 1.0);

    let a = &result.rows[0];
    assert_close("cold m3/day", a.cold_m3_day, 15.0, 1e-12);
    assert_close("hot m3/day", a.hot_m3_day, 5.0, 1e-12);
    assert_close("hourly cold", a.hourly.cold, 7.0, 1e-12);
    assert_close("fixture l/h fallback", a.fixtures.total_l_h, 10.0, 1e-12);

    assert_eq!(a.second.total.table, AlphaTable::B2);
    assert_close("P", a.second.total.p, 10.0 / (0.3 * 3600.0), 1e-12);
    assert_close("α total", a.second.total.alpha, 0.929_740_740_740_740_6, 1e-9);
    assert_close("q total", a.total_max_l_s, 1.394_611_111_111_111, 1e-9);
    assert_close("q cold", a.cold_max_l_s, 0.954_277_777_777_777_8, 1e-9);
    assert_close("q hot", a.hot_max_l_s, 0.621_666_666_666_666_7, 1e-9);

    // P_hr = 10/10 = 1.0 > 0.8 이므로 표 B.1 P 상한(0.8) 값
    assert_eq!(a.hour.total.table, AlphaTable::B1);
    assert_close("α_hr total", a.hour.total.alpha, 19.6, 1e-12);
    assert_close("q_hr total", a.total_max_m3_hour, 0.98, 1e-12);
    assert_close("q_hr cold", a.cold_max_m3_hour, 0.888_823_529_411_764_8, 1e-9);
    assert_close("q_hr hot", a.hot_max_m3_hour, 0.442_393_939_393_939_4, 1e-9);

    let b = &result.rows[1];
    assert_close("irrigation m3/day", b.total_m3_day, 0.2, 1e-12);
    assert_eq!(b.total_max_l_s, 0.0);
    assert_eq!(b.total_max_m3_hour, 0.0);
    assert_eq!(b.hourly.total, 0.0);
}

#[test]
fn reference_scenario_totals() {
    let result = aggregate(&[apartments(), irrigation()], &DemandFactors::default());
    let t = &result.totals;
    assert_close("Qday", t.total_m3_day, 20.2, 1e-12);
    assert_close("Qday cold", t.cold_m3_day, 15.2, 1e-12);
    assert_close("Qday max", t.total_max_m3_day, 22.22, 1e-12);
    assert_close("avg hour", t.avg_m3_hour, 20.2 / 24.0, 1e-12);
    assert_close("q", t.max_l_s, 1.394_611_111_111_111, 1e-9);
    assert_close("q_hr", t.max_m3_hour, 0.98, 1e-12);
    assert_close("norm q_hr", t.norm_max_m3_hour, 1.0, 1e-12);
    assert_close("sewer", t.sewer_avg_m3_day, 20.2, 1e-12);
    assert_close("base", result.non_special_base_m3_day, 20.0, 1e-12);
}

#[test]
fn adjustment_scales_every_total() {
    let factors = DemandFactors {
        day_factor: 1.2,
        reserve_factor: 1.1,
        leakage_percent: 5.0,
        ..DemandFactors::default()
    };
    let groups = [apartments(), irrigation()];
    let result = aggregate(&groups, &factors);
    let adjust = 1.2 * 1.1 * 1.05;
    assert_relative_eq!(result.adjustment_factor, adjust, max_relative = 1e-12);

    let rows_day: f64 = result.rows.iter().map(|r| r.total_m3_day).sum();
    let rows_sec: f64 = result.rows.iter().map(|r| r.total_max_l_s).sum();
    let rows_hour: f64 = result.rows.iter().map(|r| r.total_max_m3_hour).sum();
    let t = &result.totals;
    assert_relative_eq!(t.total_m3_day_base, rows_day, max_relative = 1e-12);
    assert_relative_eq!(t.total_m3_day, rows_day * adjust, max_relative = 1e-12);
    assert_relative_eq!(t.max_l_s, rows_sec * adjust, max_relative = 1e-12);
    assert_relative_eq!(t.max_m3_hour, rows_hour * adjust, max_relative = 1e-12);
    // 원단위 최대시 유량은 보정하지 않는다
    assert_relative_eq!(t.norm_max_m3_hour, 1.0, max_relative = 1e-12);
}

#[test]
fn factors_below_one_are_clamped() {
    let factors = DemandFactors {
        peak_hour_factor: 0.2,
        day_factor: 0.5,
        reserve_factor: -3.0,
        leakage_percent: -10.0,
        max_day_factor: 0.9,
        wastewater_factor: -1.0,
    };
    let result = aggregate(&[apartments()], &factors);
    assert_eq!(result.adjustment_factor, 1.0);
    assert_eq!(result.factors.max_day_factor, 1.0);
    assert_eq!(result.totals.sewer_avg_m3_day, 0.0);
}

#[test]
fn groups_without_peak_data_produce_no_peaks() {
    let only_daily = ConsumerGroup {
        name: "office".into(),
        count: 40.0,
        q_u_total_l_day: 15.0,
        t_hours: 8.0,
        ..ConsumerGroup::default()
    };
    let result = aggregate(&[only_daily], &DemandFactors::default());
    let row = &result.rows[0];
    assert_close("Qday", row.total_m3_day, 0.6, 1e-12);
    assert_eq!(row.second.total.alpha, 0.2);
    assert_eq!(row.total_max_l_s, 0.0);
    assert_eq!(result.totals.max_l_s, 0.0);
    assert_eq!(result.totals.max_m3_hour, 0.0);
    // 평균 시 유량은 운전 시간 8 h 기준
    assert_close("avg hour", result.totals.avg_m3_hour, 0.6 / 8.0, 1e-12);
}

#[test]
fn hourly_rate_falls_back_to_daily_over_hours() {
    // q0만 있고 최대시 원단위가 없으면 q_u/T를 최대시 원단위로 쓴다
    let shop = ConsumerGroup {
        name: "shop".into(),
        count: 10.0,
        q_u_total_l_day: 120.0,
        q0_total_l_s: 0.1,
        t_hours: 12.0,
        ..ConsumerGroup::default()
    };
    let result = aggregate(&[shop.clone()], &DemandFactors::default());
    assert_close("q_hr,u", result.rows[0].hourly.total, 10.0, 1e-12);

    // T = 0 이면 q_u/24·K_hr
    let no_hours = ConsumerGroup {
        t_hours: 0.0,
        ..shop
    };
    let result = aggregate(&[no_hours], &DemandFactors::default());
    assert_close("q_hr,u", result.rows[0].hourly.total, 120.0 / 24.0 * 1.8, 1e-12);
}

#[test]
fn boiler_makeup_count_is_synthesized() {
    let boiler = ConsumerGroup {
        name: "boiler make-up".into(),
        category: ConsumerCategory::BoilerMakeup,
        count: 0.0,
        q_u_total_l_day: 1000.0,
        ..ConsumerGroup::default()
    };
    let groups = [apartments(), irrigation(), boiler];
    assert_close("base", non_special_base_m3_day(&groups), 20.0, 1e-12);

    let result = aggregate(&groups, &DemandFactors::default());
    let row = &result.rows[2];
    assert!(row.count_synthesized);
    assert_close("U", row.count, 20.0 * 0.064 * 1000.0 / 1000.0, 1e-12);
    assert_close("Qday", row.total_m3_day, 20.0 * 0.064, 1e-12);

    assert_eq!(boiler_makeup_count(20.0, 0.0), None);
    let u = boiler_makeup_count(20.0, 250.0).unwrap_or_default();
    assert_close("U·q_u/1000", u * 250.0 / 1000.0, 20.0 * 0.064, 1e-12);
}

#[test]
fn zero_and_negative_counts_keep_their_rows() {
    let empty = ConsumerGroup {
        name: "reserved".into(),
        count: 0.0,
        q_u_total_l_day: 100.0,
        ..ConsumerGroup::default()
    };
    let negative = ConsumerGroup {
        name: "typo".into(),
        count: -5.0,
        q_u_total_l_day: -100.0,
        q_hr_total_l_h: -2.0,
        ..ConsumerGroup::default()
    };
    let result = aggregate(&[empty, negative], &DemandFactors::default());
    assert_eq!(result.rows.len(), 2);
    for row in &result.rows {
        assert_eq!(row.count, 0.0);
        assert_eq!(row.total_m3_day, 0.0);
        assert!(row.total_max_l_s >= 0.0);
    }
    assert_eq!(result.totals.total_m3_day, 0.0);
    assert_eq!(result.water_balance.by_source.city_mains, 0.0);
}

#[test]
fn balance_rows_follow_totals() {
    let result = aggregate(&[apartments(), irrigation()], &DemandFactors::default());
    let kinds: Vec<BalanceKind> = result.balance.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        [
            BalanceKind::Cold,
            BalanceKind::Hot,
            BalanceKind::SupplyTotal,
            BalanceKind::DrainageTotal
        ]
    );
    let supply = &result.balance[2];
    assert_eq!(supply.q_sec_l_s, result.totals.max_l_s);
    assert_eq!(supply.q_avg_day_m3_day, result.totals.total_m3_day);
    assert_eq!(supply.q_max_day_m3_day, result.totals.total_max_m3_day);
    assert_eq!(supply.q_max_hour_m3_hour, result.totals.max_m3_hour);
}

#[test]
fn water_balance_splits_sources_and_sewers() {
    let wells = ConsumerGroup {
        name: "car wash".into(),
        count: 2.0,
        q_u_total_l_day: 500.0,
        source: SupplySource::Wells,
        sewer: SewerCategory::MechanicallyPolluted,
        ..ConsumerGroup::default()
    };
    let result = aggregate(&[apartments(), irrigation(), wells], &DemandFactors::default());
    let wb = &result.water_balance;
    assert_close("city", wb.by_source.city_mains, 20.2, 1e-12);
    assert_close("wells", wb.by_source.wells, 1.0, 1e-12);
    assert_close("loss", wb.irretrievable_loss_m3_day, 0.2, 1e-12);
    assert_close("domestic", wb.by_sewer.domestic, 20.0, 1e-12);
    assert_close("mech", wb.by_sewer.mechanically_polluted, 1.0, 1e-12);
}

#[test]
fn consumer_file_parses_from_toml() {
    let text = r#"
[[group]]
name = "apartments"
count = 100
q_u_total_l_day = 200
q_u_hot_l_day = 50

[[group]]
name = "lawn"
category = "irrigation"
count = 50
q_u_total_l_day = 4
"#;
    let file: water_supply_toolbox::app::ConsumerFile =
        toml::from_str(text).expect("consumer file");
    assert!(file.factors.is_none());
    assert_eq!(file.groups.len(), 2);
    assert_eq!(file.groups[1].category, ConsumerCategory::Irrigation);
    assert_eq!(file.groups[0].t_hours, 24.0);
}

#[test]
fn demo_consumer_file_aggregates() {
    let file: water_supply_toolbox::app::ConsumerFile =
        toml::from_str(include_str!("../demos/consumers.toml")).expect("demo file");
    let factors = file.factors.unwrap_or_default();
    let result = aggregate(&file.groups, &factors);
    assert_eq!(result.rows.len(), 3);
    assert!(result.rows[2].count_synthesized);
    assert_close("Qday", result.totals.total_m3_day, 20.2 + 1.28, 1e-12);
    assert_close(
        "conditionally clean",
        result.water_balance.by_sewer.conditionally_clean,
        1.28,
        1e-12,
    );
}
