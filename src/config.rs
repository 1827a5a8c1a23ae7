use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 연수기 자율 운전일(재생 주기) 판정 정책.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftenerPolicy {
    /// 이 경도[°Hf]를 넘을 때만 연수기를 선정한다. 이하이면 스케일 방지제 주입으로 대체.
    pub hardness_threshold_hf: f64,
    /// 일반(가정용/소형) 조건의 최소 자율 운전일
    pub domestic_min_days: f64,
    /// 산업용 대용량 조건의 최소 자율 운전일 (초과 조건)
    pub industrial_min_days: f64,
    /// 산업용 RO이면서 일 사용량이 이 값[L/day]을 넘으면 산업용 기준을 적용
    pub industrial_consumption_threshold_l: f64,
    /// 산업용 기준에서 Duplex 구성은 자율 운전일과 무관하게 허용
    pub duplex_override: bool,
    /// 경도 부하가 0일 때 사용하는 자율 운전일
    pub no_load_days: f64,
}

impl Default for SoftenerPolicy {
    fn default() -> Self {
        Self {
            hardness_threshold_hf: 5.0,
            domestic_min_days: 0.8,
            industrial_min_days: 1.0,
            industrial_consumption_threshold_l: 5000.0,
            duplex_override: true,
            no_load_days: 99.0,
        }
    }
}

impl SoftenerPolicy {
    /// 재생 주기 5일 이상을 요구하는 보수적 정책.
    pub fn conservative() -> Self {
        Self {
            domestic_min_days: 5.0,
            industrial_min_days: 5.0,
            duplex_override: false,
            ..Self::default()
        }
    }
}

/// 최종 제품수 탱크 용량 산정 규칙.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FinalTankRule {
    /// 일 사용량의 일정 비율
    DailyFraction { fraction: f64 },
    /// 피크 시간대 유량 부족분 × 피크 시간 × 여유율
    PeakDeficit { margin: f64 },
}

impl Default for FinalTankRule {
    fn default() -> Self {
        FinalTankRule::DailyFraction { fraction: 0.75 }
    }
}

/// 경험적 설계 상수. 모두 설정 파일로 조정할 수 있다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineeringParams {
    /// RO 투과수 염도 비율 (0.05 = 95% 제거율 가정)
    pub rejection_ratio: f64,
    /// 펌프 순간 피크 계수
    pub peaking_factor: f64,
    pub domestic_usage_factor: f64,
    pub industrial_usage_factor: f64,
    /// 이 일 생산량[L/day]을 넘으면 산업용 RO를 우선한다
    pub industrial_demand_threshold_l: f64,
    pub reference_temperature_c: f64,
    /// 기준 온도 이하 1°C당 생산량 감소율
    pub tcf_per_degree: f64,
    pub tcf_floor: f64,
    pub high_salinity_threshold_ppm: f64,
    /// 고염도 원수에서 회수율에 곱하는 계수
    pub high_salinity_recovery_factor: f64,
    /// 버퍼 탱크 사용 시 전처리 운전 시간 [h/day] (나머지는 역세 시간)
    pub buffer_window_hours: f64,
    /// 버퍼 탱크가 보유할 RO 피크 흡입 유량 시간 [h]
    pub buffer_tank_hours: f64,
    pub well_safety_factor: f64,
    pub mains_safety_factor: f64,
    /// 설치 요구사항에 표기하는 최소 공급 압력 [bar]
    pub feed_pressure_bar: f64,
    /// 집수 배관 허용 유속 [m/s]
    pub max_pipe_velocity_m_s: f64,
    pub final_tank: FinalTankRule,
    pub softener: SoftenerPolicy,
}

impl Default for EngineeringParams {
    fn default() -> Self {
        Self {
            rejection_ratio: 0.05,
            peaking_factor: 1.5,
            domestic_usage_factor: 0.4,
            industrial_usage_factor: 1.0,
            industrial_demand_threshold_l: 600.0,
            reference_temperature_c: 25.0,
            tcf_per_degree: 0.03,
            tcf_floor: 0.1,
            high_salinity_threshold_ppm: 2500.0,
            high_salinity_recovery_factor: 0.85,
            buffer_window_hours: 20.0,
            buffer_tank_hours: 2.0,
            well_safety_factor: 1.2,
            mains_safety_factor: 1.0,
            feed_pressure_bar: 2.5,
            max_pipe_velocity_m_s: 2.5,
            final_tank: FinalTankRule::default(),
            softener: SoftenerPolicy::default(),
        }
    }
}

impl EngineeringParams {
    /// 0 이하가 되면 계산식의 분모가 깨지는 값들을 검사한다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("peaking_factor", self.peaking_factor),
            ("domestic_usage_factor", self.domestic_usage_factor),
            ("industrial_usage_factor", self.industrial_usage_factor),
            ("tcf_floor", self.tcf_floor),
            ("high_salinity_recovery_factor", self.high_salinity_recovery_factor),
            ("buffer_window_hours", self.buffer_window_hours),
            ("well_safety_factor", self.well_safety_factor),
            ("mains_safety_factor", self.mains_safety_factor),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid(name));
            }
        }
        if !(0.0..1.0).contains(&self.rejection_ratio) {
            return Err(ConfigError::Invalid("rejection_ratio"));
        }
        if self.buffer_window_hours > 24.0 {
            return Err(ConfigError::Invalid("buffer_window_hours"));
        }
        match self.final_tank {
            FinalTankRule::DailyFraction { fraction } if fraction < 0.0 => {
                return Err(ConfigError::Invalid("final_tank.fraction"))
            }
            FinalTankRule::PeakDeficit { margin } if margin < 0.0 => {
                return Err(ConfigError::Invalid("final_tank.margin"))
            }
            _ => {}
        }
        Ok(())
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(ko/en/auto). 없으면 시스템 로케일을 따른다.
    pub language: Option<String>,
    pub engineering: EngineeringParams,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("잘못된 설계 상수: {0}")]
    Invalid(&'static str),
}

/// TOML 문자열에서 설정을 읽는다. 빠진 항목은 기본값으로 채운다.
pub fn load_from_str(content: &str) -> Result<Config, ConfigError> {
    let cfg: Config = toml::from_str(content)?;
    cfg.engineering.validate()?;
    Ok(cfg)
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg = load_from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::info!(path = %path.display(), "wrote default configuration");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let cfg = load_from_str(
            r#"
language = "en"

[engineering]
peaking_factor = 1.8

[engineering.softener]
domestic_min_days = 2.0
"#,
        )
        .expect("parse");
        assert_eq!(cfg.language.as_deref(), Some("en"));
        assert_eq!(cfg.engineering.peaking_factor, 1.8);
        assert_eq!(cfg.engineering.rejection_ratio, 0.05);
        assert_eq!(cfg.engineering.softener.domestic_min_days, 2.0);
        assert_eq!(cfg.engineering.softener.industrial_min_days, 1.0);
    }

    #[test]
    fn final_tank_rule_is_tagged() {
        let cfg = load_from_str(
            r#"
[engineering.final_tank]
rule = "peak_deficit"
margin = 1.2
"#,
        )
        .expect("parse");
        assert_eq!(
            cfg.engineering.final_tank,
            FinalTankRule::PeakDeficit { margin: 1.2 }
        );
    }

    #[test]
    fn default_config_survives_toml() {
        let text = toml::to_string_pretty(&Config::default()).expect("serialize");
        let back = load_from_str(&text).expect("parse");
        assert_eq!(back, Config::default());
    }

    #[test]
    fn rejects_zero_buffer_window() {
        let err = load_from_str("[engineering]\nbuffer_window_hours = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("buffer_window_hours")));
    }

    #[test]
    fn conservative_policy_requires_five_days() {
        let p = SoftenerPolicy::conservative();
        assert_eq!(p.domestic_min_days, 5.0);
        assert!(!p.duplex_override);
        assert_eq!(p.hardness_threshold_hf, 5.0);
    }
}
