use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::ui_cli::{self, Command};
use crate::water::consumers::ConsumerGroup;
use crate::water::data_checks::data_checks;
use crate::water::demand::{aggregate, DemandFactors};
use crate::water::head::HeadRequirement;
use crate::water::hydraulics::{self, HydraulicInput};
use crate::water::peak_factor;
use crate::water::pipe_catalog::{recommend_diameter, RecommendInput};
use crate::water::viscosity::kinematic_viscosity_m2_s;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 소비자 입력 파일 파싱 오류
    #[error("입력 파일 오류: {0}")]
    Input(#[from] toml::de::Error),
    /// 결과 직렬화 오류
    #[error("결과 직렬화 오류: {0}")]
    Output(#[from] toml::ser::Error),
}

/// 소비자 입력 파일. `[factors]`가 없으면 설정 파일의 계수를 쓴다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerFile {
    pub factors: Option<DemandFactors>,
    #[serde(rename = "group")]
    pub groups: Vec<ConsumerGroup>,
}

/// TOML 소비자 입력 파일을 읽는다.
pub fn load_consumer_file(path: &Path) -> Result<ConsumerFile, AppError> {
    let content = fs::read_to_string(path)?;
    let file: ConsumerFile = toml::from_str(&content)?;
    info!("소비자 입력 로드: {} ({}개 그룹)", path.display(), file.groups.len());
    Ok(file)
}

/// 선택된 명령을 실행한다.
pub fn run(command: Command, config: &Config) -> Result<(), AppError> {
    match command {
        Command::Demand { file, toml: as_toml } => {
            let input = load_consumer_file(&file)?;
            let factors = input.factors.unwrap_or(config.demand);
            let result = aggregate(&input.groups, &factors);
            let checks = data_checks(&result.rows);
            if as_toml {
                println!("{}", toml::to_string_pretty(&result)?);
            } else {
                ui_cli::print_aggregate(&result);
            }
            ui_cli::print_checks(&checks);
        }
        Command::Hydraulics(args) => {
            let local_loss = args.local_loss();
            let input = HydraulicInput {
                material: args.material,
                flow_l_s: args.flow_l_s,
                diameter_m: args.diameter_mm / 1000.0,
                length_m: args.length_m,
                temp_c: args.temp_c.unwrap_or(config.hydraulics.temp_c),
                is_new: args.age.is_new(config.hydraulics.is_new),
                local_loss,
            };
            let result = hydraulics::solve(&input);
            ui_cli::print_hydraulics(&input, &result);
        }
        Command::Recommend {
            material,
            flow_l_s,
            temp_c,
            age,
            v_min,
            v_max,
        } => {
            let defaults = config.hydraulics;
            let rec = recommend_diameter(&RecommendInput {
                material,
                flow_l_s,
                temp_c: temp_c.unwrap_or(defaults.temp_c),
                is_new: age.is_new(defaults.is_new),
                v_min_m_s: v_min.unwrap_or(defaults.v_min_m_s),
                v_max_m_s: v_max.unwrap_or(defaults.v_max_m_s),
            });
            ui_cli::print_recommendation(material, &rec);
        }
        Command::Alpha { n, p, np } => {
            let np = np.unwrap_or(n * p);
            let lookup = peak_factor::alpha_lookup(n, p, np);
            println!(
                "N={n}, P={p}, NP={np:.4} → α={:.4} (표 {:?})",
                lookup.alpha, lookup.table
            );
        }
        Command::Viscosity { temp_c } => {
            println!(
                "{temp_c} °C: ν = {:.3e} m²/s",
                kinematic_viscosity_m2_s(temp_c)
            );
        }
        Command::Head {
            geometric_m,
            losses_m,
            free_m,
            meter_m,
            hex_m,
            inlet_m,
        } => {
            let head = HeadRequirement {
                geometric_height_m: geometric_m,
                network_loss_m: losses_m,
                free_head_m: free_m,
                meter_loss_m: meter_m,
                heat_exchanger_loss_m: hex_m,
                inlet_loss_m: inlet_m,
            };
            ui_cli::print_head(&head);
        }
    }
    Ok(())
}
