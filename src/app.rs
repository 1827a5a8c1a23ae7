use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use crate::catalog::PretreatmentKind;
use crate::config::{self, Config, DEFAULT_CONFIG_PATH};
use crate::conversion::{self, ConversionError};
use crate::i18n::{resolve_language, Translator};
use crate::report;
use crate::treatment::economics::CostRates;
use crate::treatment::engine::{size_installation, InputError, SizingRequest};
use crate::treatment::pretreatment::SourceType;
use crate::treatment::TreatmentTarget;
use crate::ui_cli;
use crate::units::{convert_hardness, convert_temperature, convert_volume, HardnessUnit, TemperatureUnit, VolumeUnit};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] config::ConfigError),
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    #[error("입력 오류: {0}")]
    Input(#[from] InputError),
    #[error("JSON 출력 오류: {0}")]
    Json(#[from] serde_json::Error),
}

/// 수처리 장비 사이징 도구.
#[derive(Debug, Parser)]
#[command(name = "water_treatment_toolbox", version, about)]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// 언어 코드 (ko, en, auto)
    #[arg(long, global = true)]
    pub lang: Option<String>,
    /// 언어팩 디렉터리 (<dir>/<lang>.toml)
    #[arg(long, global = true)]
    pub locales: Option<PathBuf>,
    /// 로그 수준 (trace, debug, info, warn, error). RUST_LOG가 있으면 그쪽을 따른다.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 조건을 입력받아 장비를 선정하고 보고서를 출력한다
    Size(SizeArgs),
    /// 표준 장비 카탈로그를 출력한다
    Catalog {
        #[arg(value_enum)]
        kind: Option<CatalogKind>,
    },
    /// 단위 변환 (volume, flow, temperature, hardness)
    Convert {
        kind: String,
        value: f64,
        from: String,
        to: String,
    },
    /// 대화형 입력 모드
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogKind {
    Ro,
    Softener,
    Carbon,
    Sand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Mains,
    Well,
}

impl From<SourceArg> for SourceType {
    fn from(value: SourceArg) -> Self {
        match value {
            SourceArg::Mains => SourceType::Mains,
            SourceArg::Well => SourceType::Well,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SizeArgs {
    /// 일 사용량
    #[arg(long, default_value_t = 2000.0)]
    pub consumption: f64,
    /// 사용량 단위 (L, m3, gal)
    #[arg(long, default_value = "L")]
    pub volume_unit: String,
    /// 원수 염도 [ppm]
    #[arg(long, default_value_t = 800.0)]
    pub feed_ppm: f64,
    /// 목표 생산수 염도 [ppm]. 생략하면 최대 처리.
    #[arg(long)]
    pub target_ppm: Option<f64>,
    #[arg(long, default_value_t = 35.0)]
    pub hardness: f64,
    /// 경도 단위 (fH, dH, ppm, mmol/L)
    #[arg(long, default_value = "fH")]
    pub hardness_unit: String,
    #[arg(long, default_value_t = 15.0)]
    pub temperature: f64,
    /// 온도 단위 (C, F, K)
    #[arg(long, default_value = "C")]
    pub temperature_unit: String,
    #[arg(long, default_value_t = 24.0)]
    pub operating_hours: f64,
    #[arg(long, default_value_t = 8.0)]
    pub peak_hours: f64,
    #[arg(long, value_enum, default_value_t = SourceArg::Mains)]
    pub source: SourceArg,
    /// 용수 단가 [€/m3]
    #[arg(long, default_value_t = 1.5)]
    pub water_cost: f64,
    /// 소금 단가 [€/kg]
    #[arg(long, default_value_t = 0.45)]
    pub salt_cost: f64,
    /// 전력 단가 [€/kWh]
    #[arg(long, default_value_t = 0.20)]
    pub electricity_cost: f64,
    /// 전처리 뒤 버퍼 탱크 사용
    #[arg(long)]
    pub buffer_tank: bool,
    /// 연수기 대신 스케일 방지제 사용
    #[arg(long)]
    pub no_softener: bool,
    /// 최종 탱크 수동 지정 [L]
    #[arg(long)]
    pub final_tank: Option<f64>,
    /// 버퍼 탱크 수동 지정 [L]
    #[arg(long)]
    pub buffer_tank_volume: Option<f64>,
    /// 보고서 대신 JSON 출력
    #[arg(long)]
    pub json: bool,
}

impl SizeArgs {
    /// 단위를 내부 기준(L, °C, °fH)으로 환산해 요청을 만든다.
    pub fn to_request(&self) -> Result<SizingRequest, ConversionError> {
        let volume_unit = conversion::parse_volume_unit(&self.volume_unit)?;
        let hardness_unit = conversion::parse_hardness_unit(&self.hardness_unit)?;
        let temperature_unit = conversion::parse_temperature_unit(&self.temperature_unit)?;
        Ok(SizingRequest {
            consumption_l_day: convert_volume(self.consumption, volume_unit, VolumeUnit::Liter),
            feed_ppm: self.feed_ppm,
            target: self
                .target_ppm
                .map_or(TreatmentTarget::MaximumPurity, TreatmentTarget::TargetSalinity),
            hardness_hf: convert_hardness(self.hardness, hardness_unit, HardnessUnit::French),
            temperature_c: convert_temperature(
                self.temperature,
                temperature_unit,
                TemperatureUnit::Celsius,
            ),
            operating_hours: self.operating_hours,
            peak_hours: self.peak_hours,
            source: self.source.into(),
            costs: CostRates {
                water_per_m3: self.water_cost,
                salt_per_kg: self.salt_cost,
                electricity_per_kwh: self.electricity_cost,
            },
            buffer_tank: self.buffer_tank,
            softener_enabled: !self.no_softener,
            final_tank_override_l: self.final_tank,
            buffer_tank_override_l: self.buffer_tank_volume,
        })
    }
}

/// 설정과 언어를 준비한 뒤 명령을 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(&cli.config)?;
    let lang = resolve_language(cli.lang.as_deref(), cfg.language.as_deref());
    let tr = Translator::new_with_pack(&lang, cli.locales.as_deref());
    tracing::debug!(lang = %lang, "translator ready");

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Size(args) => run_size(&args, &cfg, &tr),
        Command::Catalog { kind } => {
            print!("{}", render_catalogs(kind, &tr));
            Ok(())
        }
        Command::Convert {
            kind,
            value,
            from,
            to,
        } => {
            let result = conversion::convert_named(&kind, value, &from, &to)?;
            println!("{value} {from} = {result:.6} {to}");
            Ok(())
        }
        Command::Interactive => ui_cli::run_interactive(&cfg, &tr),
    }
}

fn run_size(args: &SizeArgs, cfg: &Config, tr: &Translator) -> Result<(), AppError> {
    let request = args.to_request()?;
    let result = size_installation(&request, &cfg.engineering)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render_report(&request, &result, tr));
    }
    Ok(())
}

fn render_catalogs(kind: Option<CatalogKind>, tr: &Translator) -> String {
    let mut out = String::new();
    if matches!(kind, None | Some(CatalogKind::Ro)) {
        out.push_str(&report::render_ro_catalog(tr));
    }
    for (k, pk) in [
        (CatalogKind::Softener, PretreatmentKind::Softener),
        (CatalogKind::Carbon, PretreatmentKind::Carbon),
        (CatalogKind::Sand, PretreatmentKind::Sand),
    ] {
        if kind.is_none() || kind == Some(k) {
            out.push_str(&report::render_pretreatment_catalog(pk, tr));
        }
    }
    out
}
