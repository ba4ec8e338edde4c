use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::DEFAULT_CONFIG_PATH;
use crate::water::data_checks::DataCheck;
use crate::water::demand::AggregateResult;
use crate::water::head::HeadRequirement;
use crate::water::hydraulics::{HydraulicInput, HydraulicResult, LocalLoss, NetworkPurpose, PipeMaterial};
use crate::water::pipe_catalog::DiameterRecommendation;

/// SP 30.13330 기준 급수 수요·수두손실 계산기.
#[derive(Debug, Parser)]
#[command(name = "water_supply_toolbox", version)]
pub struct Cli {
    /// 설정 파일 경로 (없으면 기본값으로 생성)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

/// 실행할 계산.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 소비자 입력 파일(TOML)로 수요를 집계한다
    Demand {
        file: PathBuf,
        /// 결과를 TOML로 출력
        #[arg(long)]
        toml: bool,
    },
    /// 배관 구간 수두손실
    Hydraulics(HydraulicsArgs),
    /// 유속 한계 기준 관경 추천
    Recommend {
        #[arg(long)]
        material: PipeMaterial,
        /// 유량 [L/s]
        #[arg(long)]
        flow_l_s: f64,
        /// 수온 [°C]
        #[arg(long)]
        temp_c: Option<f64>,
        #[command(flatten)]
        age: PipeAgeArgs,
        #[arg(long)]
        v_min: Option<f64>,
        #[arg(long)]
        v_max: Option<f64>,
    },
    /// 피크계수 α 조회
    Alpha {
        #[arg(long)]
        n: f64,
        #[arg(long)]
        p: f64,
        /// 생략하면 N·P
        #[arg(long)]
        np: Option<f64>,
    },
    /// 수온별 동점도
    Viscosity {
        #[arg(long)]
        temp_c: f64,
    },
    /// 필요 수두 합산
    Head {
        #[arg(long, default_value_t = 0.0)]
        geometric_m: f64,
        #[arg(long, default_value_t = 0.0)]
        losses_m: f64,
        #[arg(long, default_value_t = 0.0)]
        free_m: f64,
        #[arg(long, default_value_t = 0.0)]
        meter_m: f64,
        #[arg(long, default_value_t = 0.0)]
        hex_m: f64,
        #[arg(long, default_value_t = 0.0)]
        inlet_m: f64,
    },
}

/// 관망 용도 프리셋 (명령행 값).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NetworkArg {
    CombinedDomesticFire,
    Industrial,
    Domestic,
    CombinedIndustrialFire,
    Fire,
}

impl From<NetworkArg> for NetworkPurpose {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::CombinedDomesticFire => NetworkPurpose::CombinedDomesticFire,
            NetworkArg::Industrial => NetworkPurpose::Industrial,
            NetworkArg::Domestic => NetworkPurpose::Domestic,
            NetworkArg::CombinedIndustrialFire => NetworkPurpose::CombinedIndustrialFire,
            NetworkArg::Fire => NetworkPurpose::Fire,
        }
    }
}

/// 신관/사용관 선택. 둘 다 없으면 설정 파일의 `is_new`를 따른다.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct PipeAgeArgs {
    /// 신관 기준
    #[arg(long, conflicts_with = "used")]
    pub new: bool,
    /// 사용관(경년) 기준
    #[arg(long)]
    pub used: bool,
}

impl PipeAgeArgs {
    /// 명령행 지정이 설정값보다 우선한다.
    pub fn is_new(self, config_default: bool) -> bool {
        if self.new {
            true
        } else if self.used {
            false
        } else {
            config_default
        }
    }
}

/// 수두손실 계산 인자.
#[derive(Debug, Args)]
pub struct HydraulicsArgs {
    /// 관 재질 코드 (steel_vgp, steel_welded, cast_iron, plastic, metal_plastic, fiberglass, polyplastic, copper)
    #[arg(long)]
    pub material: PipeMaterial,
    /// 유량 [L/s]
    #[arg(long)]
    pub flow_l_s: f64,
    /// 내경 [mm]
    #[arg(long)]
    pub diameter_mm: f64,
    /// 구간 길이 [m]
    #[arg(long)]
    pub length_m: f64,
    #[arg(long)]
    pub temp_c: Option<f64>,
    #[command(flatten)]
    pub age: PipeAgeArgs,
    /// 국부손실 비례계수 k
    #[arg(long, conflicts_with_all = ["xi", "network"])]
    pub k: Option<f64>,
    /// 국부저항계수 합 Σξ
    #[arg(long, conflicts_with = "network")]
    pub xi: Option<f64>,
    /// 관망 용도 k 프리셋
    #[arg(long, value_enum)]
    pub network: Option<NetworkArg>,
}

impl HydraulicsArgs {
    pub fn local_loss(&self) -> LocalLoss {
        let preset = self
            .network
            .and_then(|n| NetworkPurpose::from(n).k_local());
        LocalLoss::from_options(self.k.or(preset), self.xi)
    }
}

fn print_line(label: &str, value: f64, unit: &str) {
    println!("  {label:<24} {value:>12.4} {unit}");
}

/// 수요 집계 결과를 출력한다.
pub fn print_aggregate(result: &AggregateResult) {
    println!("\n=== 급수 수요 집계 ===");
    println!(
        "보정계수 = K_day {:.2} × 예비 {:.2} × (1 + 누수 {:.1}%) = {:.4}",
        result.factors.day_factor,
        result.factors.reserve_factor,
        result.factors.leakage_percent,
        result.adjustment_factor
    );
    for row in &result.rows {
        let marker = if row.count_synthesized { " (자동 산정)" } else { "" };
        println!(
            "- {} [{}] U={:.2}{marker}: {:.3} m³/일, q={:.3} L/s, q_hr={:.3} m³/h (α 초={:.3} {:?}, α 시={:.3} {:?})",
            row.name,
            row.unit,
            row.count,
            row.total_m3_day,
            row.total_max_l_s,
            row.total_max_m3_hour,
            row.second.total.alpha,
            row.second.total.table,
            row.hour.total.alpha,
            row.hour.total.table,
        );
    }
    let t = &result.totals;
    println!("\n-- 합계 --");
    print_line("일 수량(보정 전)", t.total_m3_day_base, "m³/일");
    print_line("일 수량", t.total_m3_day, "m³/일");
    print_line("  냉수", t.cold_m3_day, "m³/일");
    print_line("  온수", t.hot_m3_day, "m³/일");
    print_line("최대일 수량", t.total_max_m3_day, "m³/일");
    print_line("평균 시 유량", t.avg_m3_hour, "m³/h");
    print_line("최대 시 유량", t.max_m3_hour, "m³/h");
    print_line("최대 초 유량", t.max_l_s, "L/s");
    print_line("원단위 최대시 유량", t.norm_max_m3_hour, "m³/h");
    print_line("배수 일 수량", t.sewer_avg_m3_day, "m³/일");
    print_line("배수 최대 초 유량", t.sewer_max_l_s, "L/s");

    println!("\n-- 수량 밸런스 --");
    println!(
        "  {:<12} {:>10} {:>12} {:>12} {:>12}",
        "구분", "q [L/s]", "평균일", "최대일", "최대시"
    );
    for b in &result.balance {
        println!(
            "  {:<12} {:>10.3} {:>12.3} {:>12.3} {:>12.3}",
            b.kind.label(),
            b.q_sec_l_s,
            b.q_avg_day_m3_day,
            b.q_max_day_m3_day,
            b.q_max_hour_m3_hour
        );
    }

    let wb = &result.water_balance;
    println!("\n-- 급수원 / 배수처 [m³/일] --");
    print_line("시 상수도", wb.by_source.city_mains, "");
    print_line("관정", wb.by_source.wells, "");
    print_line("공업용수", wb.by_source.process_water, "");
    print_line("재이용수", wb.by_source.recycled, "");
    print_line("비회수 손실", wb.irretrievable_loss_m3_day, "");
    print_line("생활 하수", wb.by_sewer.domestic, "");
    print_line("조건부 청정", wb.by_sewer.conditionally_clean, "");
    print_line("기계적 오염", wb.by_sewer.mechanically_polluted, "");
    print_line("화학적 오염", wb.by_sewer.chemically_polluted, "");
}

/// 데이터 점검 결과를 출력한다.
pub fn print_checks(checks: &[DataCheck]) {
    if checks.is_empty() {
        return;
    }
    println!("\n-- 데이터 점검 --");
    for c in checks {
        println!("  ! {c}");
    }
}

/// 수두손실 결과를 출력한다.
pub fn print_hydraulics(input: &HydraulicInput, result: &HydraulicResult) {
    println!(
        "\n=== 수두손실: {} ({}) ===",
        input.material.label(),
        input.material.reference_doc()
    );
    print_line("유속 v", result.v_m_s, "m/s");
    print_line("동점도 ν", result.nu_m2_s, "m²/s");
    print_line("레이놀즈수 Re", result.re, "");
    print_line("마찰계수 λ", result.lambda_f, "");
    print_line("동수경사 i", result.i_m_per_m, "m/m");
    print_line("마찰손실", result.h_friction_m, "m");
    print_line("국부손실", result.h_local_m, "m");
    print_line("전체 손실", result.h_total_m, "m");
}

/// 관경 추천 결과를 출력한다.
pub fn print_recommendation(material: PipeMaterial, rec: &DiameterRecommendation) {
    println!("\n=== 관경 추천: {} ===", material.label());
    for c in &rec.shortlist {
        println!(
            "  DN {:>6.1} mm: v = {:.3} m/s, i = {:.5} m/m",
            c.diameter_mm, c.v_m_s, c.i_m_per_m
        );
    }
    println!("추천 내경: {:.1} mm", rec.diameter_mm);
}

/// 필요 수두 구성을 출력한다.
pub fn print_head(head: &HeadRequirement) {
    println!("\n=== 필요 수두 ===");
    print_line("기하학적 높이", head.geometric_height_m, "m");
    print_line("관로 손실", head.network_loss_m, "m");
    print_line("자유수두", head.free_head_m, "m");
    print_line("계량기 손실", head.meter_loss_m, "m");
    print_line("열교환기 손실", head.heat_exchanger_loss_m, "m");
    print_line("인입관 손실", head.inlet_loss_m, "m");
    print_line("필요 수두", head.required_head_m(), "m");
}
