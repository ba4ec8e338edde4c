use water_supply_toolbox::config::{self, Config};
use water_supply_toolbox::water::consumers::ConsumerGroup;
use water_supply_toolbox::water::data_checks::{data_checks, DataCheck};
use water_supply_toolbox::water::demand::{aggregate, DemandFactors};
use water_supply_toolbox::water::head::HeadRequirement;
use water_supply_toolbox::water::hydraulics::{solve, HydraulicInput, LocalLoss, PipeMaterial};
use water_supply_toolbox::water::pipe_catalog::{
    candidate_diameters_mm, recommend_diameter, RecommendInput,
};

fn steel_request(flow_l_s: f64, v_min: f64, v_max: f64) -> RecommendInput {
    RecommendInput {
        material: PipeMaterial::SteelVgp,
        flow_l_s,
        temp_c: 10.0,
        is_new: true,
        v_min_m_s: v_min,
        v_max_m_s: v_max,
    }
}

#[test]
fn candidate_lists_are_ascending() {
    for material in PipeMaterial::ALL {
        let list = candidate_diameters_mm(material);
        assert!(!list.is_empty(), "{material}");
        assert!(list.windows(2).all(|w| w[0] < w[1]), "{material}: {list:?}");
    }
}

#[test]
fn recommends_first_diameter_within_velocity_band() {
    // 2 L/s: 40 mm → 1.59 m/s, 50 mm → 1.02 m/s
    let rec = recommend_diameter(&steel_request(2.0, 0.0, 1.5));
    assert_eq!(rec.diameter_mm, 50.0);
    assert_eq!(rec.shortlist.len(), 6);
    let last = rec.shortlist.last().map(|c| c.v_m_s).unwrap_or_default();
    assert!((last - 1.018_591_635_788_130_2).abs() < 1e-9);
}

#[test]
fn recommendation_falls_back_to_largest() {
    let rec = recommend_diameter(&steel_request(1000.0, 0.0, 1.5));
    assert_eq!(rec.diameter_mm, 200.0);
    assert_eq!(rec.shortlist.len(), candidate_diameters_mm(PipeMaterial::SteelVgp).len());

    // 어느 관경도 v_min 을 넘지 못하면 v ≤ v_max 였던 마지막 관경
    let rec = recommend_diameter(&steel_request(0.01, 0.5, 1.5));
    assert_eq!(rec.diameter_mm, 200.0);
}

#[test]
fn required_head_sums_components() {
    let head = HeadRequirement {
        geometric_height_m: 12.0,
        network_loss_m: 3.5,
        free_head_m: 20.0,
        meter_loss_m: 1.2,
        heat_exchanger_loss_m: 0.0,
        inlet_loss_m: -4.0,
    };
    assert!((head.required_head_m() - 36.7).abs() < 1e-12);

    let r = solve(&HydraulicInput {
        material: PipeMaterial::Plastic,
        flow_l_s: 2.0,
        diameter_m: 0.05,
        length_m: 30.0,
        temp_c: 10.0,
        is_new: true,
        local_loss: LocalLoss::Coefficient(0.3),
    });
    let head = HeadRequirement {
        free_head_m: 10.0,
        ..HeadRequirement::with_network(&r)
    };
    assert!((head.required_head_m() - (10.0 + r.h_total_m)).abs() < 1e-12);
}

fn checks_for(groups: &[ConsumerGroup]) -> Vec<DataCheck> {
    data_checks(&aggregate(groups, &DemandFactors::default()).rows)
}

#[test]
fn data_checks_flag_suspicious_rows() {
    assert_eq!(checks_for(&[]), vec![DataCheck::NoConsumers]);

    let good = ConsumerGroup {
        name: "apartments".into(),
        count: 10.0,
        q_u_total_l_day: 200.0,
        q_u_hot_l_day: 80.0,
        source_doc: "SP 30.13330.2020".into(),
        ..ConsumerGroup::default()
    };
    assert!(checks_for(&[good.clone()]).is_empty());

    let bad = ConsumerGroup {
        name: "bad".into(),
        count: 3.0,
        q_u_total_l_day: 50.0,
        q_u_hot_l_day: 80.0,
        t_hours: 0.0,
        ..ConsumerGroup::default()
    };
    let empty = ConsumerGroup {
        name: "empty".into(),
        source_doc: "SP".into(),
        ..ConsumerGroup::default()
    };
    let checks = checks_for(&[good, bad, empty]);
    assert_eq!(
        checks,
        vec![
            DataCheck::ZeroNorms(1),
            DataCheck::MissingSource(1),
            DataCheck::HotExceedsTotal(1),
            DataCheck::ZeroOperatingTime(1),
        ]
    );
    assert!(checks[2].to_string().contains('1'));
}

#[test]
fn hot_exceeding_resolved_daily_total_is_flagged() {
    // 구형 입력: 총 원단위 = 냉수 100 + 온수 50 = 150 < 명시 온수 200
    let legacy = ConsumerGroup {
        name: "legacy".into(),
        count: 10.0,
        cold_l_per_unit_day: 100.0,
        hot_l_per_unit_day: 50.0,
        q_u_hot_l_day: 200.0,
        source_doc: "SP".into(),
        ..ConsumerGroup::default()
    };
    assert_eq!(checks_for(&[legacy]), vec![DataCheck::HotExceedsTotal(1)]);
}

#[test]
fn hot_exceeding_resolved_hourly_total_is_flagged() {
    // 최대시 총 원단위 = q_u/T = 200/24 ≈ 8.3 < 최대시 온수 20
    let group = ConsumerGroup {
        name: "hourly".into(),
        count: 10.0,
        q_u_total_l_day: 200.0,
        q_hr_hot_l_h: 20.0,
        q0_total_l_s: 0.3,
        source_doc: "SP".into(),
        ..ConsumerGroup::default()
    };
    assert_eq!(checks_for(&[group]), vec![DataCheck::HotExceedsTotal(1)]);
}

#[test]
fn resolved_hourly_rate_satisfies_operating_time() {
    // T = 0 이어도 기구 유량이 있으면 최대시 원단위가 q_u/24·K_hr 로 확정된다
    let group = ConsumerGroup {
        name: "fixtures only".into(),
        count: 10.0,
        q_u_total_l_day: 200.0,
        q0_total_l_s: 0.3,
        t_hours: 0.0,
        source_doc: "SP".into(),
        ..ConsumerGroup::default()
    };
    assert!(checks_for(&[group]).is_empty());
}

#[test]
fn config_round_trips_through_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("water_supply.toml");

    let created = config::load_or_default(&path).expect("default config");
    assert_eq!(created, Config::default());
    assert!(path.exists());

    let mut cfg = created;
    cfg.demand.reserve_factor = 1.15;
    cfg.hydraulics.v_max_m_s = 1.5;
    cfg.save(&path).expect("save");
    let loaded = config::load_or_default(&path).expect("reload");
    assert_eq!(loaded, cfg);
}
