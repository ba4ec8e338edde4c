use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::water::demand::DemandFactors;

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_PATH: &str = "water_supply.toml";

/// 수두손실·관경 추천 기본값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydraulicDefaults {
    /// 설계 수온 [°C]
    pub temp_c: f64,
    /// 신관 기준으로 계산할지 여부
    pub is_new: bool,
    /// 관경 추천 최소 유속 [m/s]
    pub v_min_m_s: f64,
    /// 관경 추천 최대 유속 [m/s]
    pub v_max_m_s: f64,
}

impl Default for HydraulicDefaults {
    fn default() -> Self {
        Self {
            temp_c: 10.0,
            is_new: true,
            v_min_m_s: 0.0,
            v_max_m_s: 3.0,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 수요 집계 전역 계수
    pub demand: DemandFactors,
    pub hydraulics: HydraulicDefaults,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        info!("설정 로드: {}", path.display());
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        info!("기본 설정 생성: {}", path.display());
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 지정 경로에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }
}
