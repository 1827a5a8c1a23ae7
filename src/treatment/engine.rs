use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{self, PretreatmentKind, PretreatmentUnit, RoUnit};
use crate::config::EngineeringParams;
use crate::i18n::{fill_template, keys, Translator};

use super::blending::{blend_plan, BlendPlan, TreatmentTarget};
use super::economics::{operating_costs, CostRates, OperatingCostInput, OperatingCosts};
use super::hydraulics::{
    buffer_tank_volume_l, final_tank_volume_l, peak_flow_deficit_lh, recommend_pipe,
    FinalTankInput, PipeRecommendation,
};
use super::pretreatment::{
    design_flow, peak_intake_flow_lh, select_filter, DesignFlow, DesignFlowInput,
    FilterSelection, OperatingMode, SourceType,
};
use super::ro_selection::{select_ro, RoSelection};
use super::softener::{select_softener, SoftenerDuty, SoftenerSelection, SoftenerTier};
use super::temperature::temperature_correction_factor;

/// 사이징 요청. 호출 측에서 검증된 값을 넘기며, 엔진은 분모가 0이 되는 값만 다시 거른다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingRequest {
    /// 일 사용량 [L/day]
    pub consumption_l_day: f64,
    /// 원수 염도(TDS) [ppm]
    pub feed_ppm: f64,
    pub target: TreatmentTarget,
    /// 원수 경도 [°Hf]
    pub hardness_hf: f64,
    /// 수온 [°C]
    pub temperature_c: f64,
    /// 하루 가용 운전 시간 [h]
    pub operating_hours: f64,
    /// 피크 사용 시간 [h]
    pub peak_hours: f64,
    pub source: SourceType,
    pub costs: CostRates,
    pub buffer_tank: bool,
    pub softener_enabled: bool,
    /// 최종 탱크 수동 지정 [L] (0 이하는 무시)
    pub final_tank_override_l: Option<f64>,
    /// 버퍼 탱크 수동 지정 [L] (0 이하는 무시)
    pub buffer_tank_override_l: Option<f64>,
}

impl Default for SizingRequest {
    fn default() -> Self {
        Self {
            consumption_l_day: 2000.0,
            feed_ppm: 800.0,
            target: TreatmentTarget::MaximumPurity,
            hardness_hf: 35.0,
            temperature_c: 15.0,
            operating_hours: 24.0,
            peak_hours: 8.0,
            source: SourceType::Mains,
            costs: CostRates::default(),
            buffer_tank: false,
            softener_enabled: true,
            final_tank_override_l: None,
            buffer_tank_override_l: None,
        }
    }
}

/// 입력 검증 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} 값은 0보다 커야 합니다 (입력: {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} 값은 음수일 수 없습니다 (입력: {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} 값이 허용 범위를 벗어났습니다 (입력: {value})")]
    OutOfRange { field: &'static str, value: f64 },
}

impl SizingRequest {
    /// 계산식이 깨지는 입력(0 분모, 음수, NaN)을 거른다.
    pub fn validate(&self) -> Result<(), InputError> {
        for (field, value) in [
            ("consumption_l_day", self.consumption_l_day),
            ("peak_hours", self.peak_hours),
            ("operating_hours", self.operating_hours),
        ] {
            if !(value > 0.0) {
                return Err(InputError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("feed_ppm", self.feed_ppm),
            ("hardness_hf", self.hardness_hf),
            ("costs.water_per_m3", self.costs.water_per_m3),
            ("costs.salt_per_kg", self.costs.salt_per_kg),
            ("costs.electricity_per_kwh", self.costs.electricity_per_kwh),
        ] {
            if !(value >= 0.0) {
                return Err(InputError::Negative { field, value });
            }
        }
        for (field, value) in [("peak_hours", self.peak_hours), ("operating_hours", self.operating_hours)] {
            if value > 24.0 {
                return Err(InputError::OutOfRange { field, value });
            }
        }
        if !self.temperature_c.is_finite() {
            return Err(InputError::OutOfRange {
                field: "temperature_c",
                value: self.temperature_c,
            });
        }
        if let TreatmentTarget::TargetSalinity(ppm) = self.target {
            if !(ppm >= 0.0) {
                return Err(InputError::Negative {
                    field: "target_ppm",
                    value: ppm,
                });
            }
        }
        Ok(())
    }
}

/// 결과에 붙는 권고/주의 사항. 오류가 아니라 데이터 상태를 알린다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// 어떤 표준 RO도 염도/용량 조건을 만족하지 못함
    NoStandardRo { feed_ppm: f64, required_l_day: f64 },
    /// 고염도 원수로 회수율을 낮춰 계산함
    HighSalinity { feed_ppm: f64, recovery_factor: f64 },
    /// 요청 목표 염도가 RO 투과수 염도보다 낮아 보정함
    TargetBelowPermeate { requested_ppm: f64, achievable_ppm: f64 },
    /// 목표 염도가 원수 이상이라 RO 처리량이 0. RO는 예비 설비로만 산정됨
    RoNotRequired { feed_ppm: f64, target_ppm: f64 },
    /// 연수기 대신 스케일 방지제 주입 가정
    AntiscalantDosing { hardness_hf: f64 },
    /// 연수기 자율 운전일 부족
    SoftenerUndersized { autonomy_days: f64, required_days: f64 },
    /// 설계 유량이 모든 연수기 정격을 초과
    SoftenerOutOfRange { design_flow_lh: f64 },
    /// 설계 유량이 모든 활성탄/모래 여과기 정격을 초과
    FilterOutOfRange { filter: PretreatmentKind, design_flow_lh: f64 },
    /// 피크 시간 수요가 RO 실생산 유량을 초과
    FlowDeficit { deficit_lh: f64 },
    /// RO 필요 운전 시간이 가용 운전 시간을 초과
    RunHoursExceeded { run_hours: f64, available_hours: f64 },
    /// 추천 배관 유속이 허용치를 초과
    PipeVelocityHigh { velocity_m_s: f64, limit_m_s: f64 },
}

impl Advisory {
    /// 현재 언어로 메시지를 만든다.
    pub fn message(&self, tr: &Translator) -> String {
        let (key, vars): (&str, Vec<(&str, String)>) = match self {
            Advisory::NoStandardRo {
                feed_ppm,
                required_l_day,
            } => (
                keys::ADVISORY_NO_STANDARD_RO,
                vec![
                    ("ppm", format!("{feed_ppm:.0}")),
                    ("liters", format!("{required_l_day:.0}")),
                ],
            ),
            Advisory::HighSalinity {
                feed_ppm,
                recovery_factor,
            } => (
                keys::ADVISORY_HIGH_SALINITY,
                vec![
                    ("ppm", format!("{feed_ppm:.0}")),
                    ("factor", format!("{recovery_factor:.2}")),
                ],
            ),
            Advisory::TargetBelowPermeate {
                requested_ppm,
                achievable_ppm,
            } => (
                keys::ADVISORY_TARGET_BELOW_PERMEATE,
                vec![
                    ("requested", format!("{requested_ppm:.0}")),
                    ("achievable", format!("{achievable_ppm:.0}")),
                ],
            ),
            Advisory::RoNotRequired {
                feed_ppm,
                target_ppm,
            } => (
                keys::ADVISORY_RO_NOT_REQUIRED,
                vec![
                    ("ppm", format!("{feed_ppm:.0}")),
                    ("target", format!("{target_ppm:.0}")),
                ],
            ),
            Advisory::AntiscalantDosing { hardness_hf } => (
                keys::ADVISORY_ANTISCALANT,
                vec![("hardness", format!("{hardness_hf:.1}"))],
            ),
            Advisory::SoftenerUndersized {
                autonomy_days,
                required_days,
            } => (
                keys::ADVISORY_SOFTENER_UNDERSIZED,
                vec![
                    ("days", format!("{autonomy_days:.2}")),
                    ("required", format!("{required_days:.1}")),
                ],
            ),
            Advisory::SoftenerOutOfRange { design_flow_lh } => (
                keys::ADVISORY_SOFTENER_OUT_OF_RANGE,
                vec![("flow", format!("{design_flow_lh:.0}"))],
            ),
            Advisory::FilterOutOfRange {
                filter,
                design_flow_lh,
            } => (
                match filter {
                    PretreatmentKind::Carbon => keys::ADVISORY_CARBON_OUT_OF_RANGE,
                    PretreatmentKind::Sand => keys::ADVISORY_SAND_OUT_OF_RANGE,
                    PretreatmentKind::Softener => keys::ADVISORY_SOFTENER_OUT_OF_RANGE,
                },
                vec![("flow", format!("{design_flow_lh:.0}"))],
            ),
            Advisory::FlowDeficit { deficit_lh } => (
                keys::ADVISORY_FLOW_DEFICIT,
                vec![("deficit", format!("{deficit_lh:.0}"))],
            ),
            Advisory::RunHoursExceeded {
                run_hours,
                available_hours,
            } => (
                keys::ADVISORY_RUN_HOURS,
                vec![
                    ("hours", format!("{run_hours:.1}")),
                    ("available", format!("{available_hours:.1}")),
                ],
            ),
            Advisory::PipeVelocityHigh {
                velocity_m_s,
                limit_m_s,
            } => (
                keys::ADVISORY_PIPE_VELOCITY,
                vec![
                    ("velocity", format!("{velocity_m_s:.2}")),
                    ("limit", format!("{limit_m_s:.1}")),
                ],
            ),
        };
        fill_template(tr.t(key), &vars)
    }
}

/// 일일 물수지.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowBalance {
    /// RO 측 생산 요구량 [L/day]
    pub ro_production_l: f64,
    /// 바이패스 원수 [L/day]
    pub bypass_l: f64,
    /// 최종 공급수(= 일 사용량) [L/day]
    pub product_l: f64,
    /// RO 급수량 [L/day]
    pub ro_feed_l: f64,
    /// 총 급수량(RO 급수 + 바이패스) [L/day]
    pub feed_l: f64,
    /// RO 농축수 [L/day]
    pub reject_l: f64,
    /// 수온 보정 실생산 능력 [L/day]
    pub real_production_l_day: f64,
    /// 시간당 실생산 [L/h]
    pub production_lh: f64,
    /// 계산에 적용된 회수율
    pub effective_recovery: f64,
}

impl FlowBalance {
    fn new(blend: &BlendPlan, unit: &RoUnit, tcf: f64, effective_recovery: f64) -> Self {
        let ro_feed_l = blend.ro_volume_l / effective_recovery;
        let real_production_l_day = unit.nominal_production_l_day * tcf;
        Self {
            ro_production_l: blend.ro_volume_l,
            bypass_l: blend.bypass_volume_l,
            product_l: blend.ro_volume_l + blend.bypass_volume_l,
            ro_feed_l,
            feed_l: ro_feed_l + blend.bypass_volume_l,
            reject_l: ro_feed_l - blend.ro_volume_l,
            real_production_l_day,
            production_lh: real_production_l_day / 24.0,
            effective_recovery,
        }
    }
}

/// 설치 요구사항(보고서용).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstallationRequirements {
    /// 최소 공급 유량 [L/h]
    pub min_feed_flow_lh: f64,
    /// 최소 공급 유량 [m3/h]
    pub min_feed_flow_m3h: f64,
    /// 공급 압력 가정 [bar]
    pub feed_pressure_bar: f64,
    pub pipe_label: &'static str,
    pub buffer_tank_l: Option<f64>,
    pub final_tank_l: f64,
}

/// RO가 선정된 경우의 전체 설비 구성.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstallationDesign {
    pub flows: FlowBalance,
    /// RO 피크 흡입 유량 [L/h]
    pub peak_intake_lh: f64,
    pub design_flow: DesignFlow,
    pub softener: Option<SoftenerSelection>,
    pub carbon: Option<FilterSelection>,
    pub sand: Option<FilterSelection>,
    /// 버퍼 탱크 [L] (버퍼 방식일 때만)
    pub buffer_tank_l: Option<f64>,
    /// 최종 제품수 탱크 [L]
    pub final_tank_l: f64,
    pub pipe: PipeRecommendation,
    pub economics: OperatingCosts,
    pub installation: InstallationRequirements,
}

/// 사이징 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingResult {
    /// 온도 보정 계수
    pub tcf: f64,
    pub blend: BlendPlan,
    pub ro: Option<RoSelection>,
    /// RO가 선정된 경우에만 존재한다.
    pub design: Option<InstallationDesign>,
    pub advisories: Vec<Advisory>,
}

impl SizingResult {
    /// 표준 장비로 해결 가능한지 여부.
    pub fn is_solution(&self) -> bool {
        self.ro.is_some()
    }
}

/// 엔진이 참조하는 카탈로그 묶음.
#[derive(Debug, Clone, Copy)]
pub struct Catalogs<'a> {
    pub ro: &'a [RoUnit],
    pub softeners: &'a [PretreatmentUnit],
    pub carbon: &'a [PretreatmentUnit],
    pub sand: &'a [PretreatmentUnit],
}

impl Catalogs<'static> {
    /// 표준 카탈로그.
    pub fn standard() -> Self {
        Self {
            ro: catalog::ro_catalog(),
            softeners: catalog::softener_catalog(),
            carbon: catalog::carbon_catalog(),
            sand: catalog::sand_catalog(),
        }
    }
}

/// 표준 카탈로그로 사이징한다.
pub fn size_installation(
    request: &SizingRequest,
    params: &EngineeringParams,
) -> Result<SizingResult, InputError> {
    size_with_catalogs(request, params, &Catalogs::standard())
}

/// 주어진 카탈로그로 사이징한다. 같은 입력에는 항상 같은 결과를 낸다.
pub fn size_with_catalogs(
    request: &SizingRequest,
    params: &EngineeringParams,
    catalogs: &Catalogs<'_>,
) -> Result<SizingResult, InputError> {
    request.validate()?;
    let mut advisories = Vec::new();

    let tcf = temperature_correction_factor(request.temperature_c, params);
    let blend = blend_plan(
        request.consumption_l_day,
        request.feed_ppm,
        request.target,
        params.rejection_ratio,
    );
    if blend.target_clamped {
        if let TreatmentTarget::TargetSalinity(requested_ppm) = request.target {
            advisories.push(Advisory::TargetBelowPermeate {
                requested_ppm,
                achievable_ppm: blend.permeate_ppm,
            });
        }
    }
    if blend.ro_fraction == 0.0 {
        advisories.push(Advisory::RoNotRequired {
            feed_ppm: request.feed_ppm,
            target_ppm: blend.target_ppm,
        });
    }
    tracing::debug!(
        tcf,
        ro_fraction = blend.ro_fraction,
        ro_volume_l = blend.ro_volume_l,
        "blend plan computed"
    );

    let high_salinity = request.feed_ppm > params.high_salinity_threshold_ppm;
    if high_salinity {
        advisories.push(Advisory::HighSalinity {
            feed_ppm: request.feed_ppm,
            recovery_factor: params.high_salinity_recovery_factor,
        });
    }

    let Some(ro) = select_ro(catalogs.ro, request.feed_ppm, blend.ro_volume_l, tcf, params) else {
        tracing::info!(feed_ppm = request.feed_ppm, "no standard RO solution");
        advisories.push(Advisory::NoStandardRo {
            feed_ppm: request.feed_ppm,
            required_l_day: blend.ro_volume_l,
        });
        return Ok(SizingResult {
            tcf,
            blend,
            ro: None,
            design: None,
            advisories,
        });
    };

    let recovery_factor = if high_salinity {
        params.high_salinity_recovery_factor
    } else {
        1.0
    };
    let design = design_installation(
        request,
        params,
        catalogs,
        &blend,
        &ro,
        tcf,
        ro.unit.recovery * recovery_factor,
        &mut advisories,
    );
    tracing::info!(
        ro = ro.unit.name,
        softener = design.softener.as_ref().map(|s| s.unit.name),
        total_annual = design.economics.total_annual,
        "sizing complete"
    );

    Ok(SizingResult {
        tcf,
        blend,
        ro: Some(ro),
        design: Some(design),
        advisories,
    })
}

#[allow(clippy::too_many_arguments)]
fn design_installation(
    request: &SizingRequest,
    params: &EngineeringParams,
    catalogs: &Catalogs<'_>,
    blend: &BlendPlan,
    ro: &RoSelection,
    tcf: f64,
    effective_recovery: f64,
    advisories: &mut Vec<Advisory>,
) -> InstallationDesign {
    let flows = FlowBalance::new(blend, &ro.unit, tcf, effective_recovery);
    let peak_intake_lh =
        peak_intake_flow_lh(ro.unit.nominal_production_l_day, effective_recovery, params);
    let mode = if request.buffer_tank {
        OperatingMode::Buffered
    } else {
        OperatingMode::Direct
    };
    let design_flow = design_flow(
        &DesignFlowInput {
            mode,
            peak_intake_lh,
            bypass_l_day: flows.bypass_l,
            peak_hours: request.peak_hours,
            total_feed_l_day: flows.feed_l,
            source: request.source,
        },
        params,
    );
    let design_flow_lh = design_flow.design_flow_lh;
    tracing::debug!(?mode, peak_intake_lh, design_flow_lh, "pretreatment design flow");

    let policy = &params.softener;
    let softener = if request.softener_enabled && request.hardness_hf > policy.hardness_threshold_hf {
        let duty = SoftenerDuty {
            feed_l_day: flows.feed_l,
            hardness_hf: request.hardness_hf,
            design_flow_lh,
            industrial_ro: ro.unit.is_industrial(),
            consumption_l_day: request.consumption_l_day,
        };
        let selection = select_softener(catalogs.softeners, &duty, policy);
        match &selection {
            None => advisories.push(Advisory::SoftenerOutOfRange { design_flow_lh }),
            Some(sel) if sel.tier == SoftenerTier::Fallback => {
                advisories.push(Advisory::SoftenerUndersized {
                    autonomy_days: sel.autonomy_days,
                    required_days: sel.required_days,
                })
            }
            Some(_) => {}
        }
        selection
    } else {
        if request.hardness_hf > 0.0 {
            advisories.push(Advisory::AntiscalantDosing {
                hardness_hf: request.hardness_hf,
            });
        }
        None
    };

    let carbon = select_filter(catalogs.carbon, design_flow_lh);
    if carbon.is_none() {
        advisories.push(Advisory::FilterOutOfRange {
            filter: PretreatmentKind::Carbon,
            design_flow_lh,
        });
    }
    let sand = select_filter(catalogs.sand, design_flow_lh);
    if sand.is_none() {
        advisories.push(Advisory::FilterOutOfRange {
            filter: PretreatmentKind::Sand,
            design_flow_lh,
        });
    }

    let economics = operating_costs(&OperatingCostInput {
        feed_l_day: flows.feed_l,
        ro_production_l_day: flows.ro_production_l,
        production_lh: flows.production_lh,
        power_kw: ro.unit.power_kw,
        softener: softener
            .as_ref()
            .map(|s| (s.autonomy_days, s.unit.salt_per_regen_kg)),
        rates: request.costs,
    });
    if economics.ro_run_hours_day > request.operating_hours {
        advisories.push(Advisory::RunHoursExceeded {
            run_hours: economics.ro_run_hours_day,
            available_hours: request.operating_hours,
        });
    }

    if let Some(deficit_lh) =
        peak_flow_deficit_lh(request.consumption_l_day, request.peak_hours, flows.production_lh)
    {
        advisories.push(Advisory::FlowDeficit { deficit_lh });
    }

    let buffer_tank_l = match mode {
        OperatingMode::Buffered => Some(buffer_tank_volume_l(
            peak_intake_lh,
            request.buffer_tank_override_l,
            params,
        )),
        OperatingMode::Direct => None,
    };
    let final_tank_l = final_tank_volume_l(
        &FinalTankInput {
            consumption_l_day: request.consumption_l_day,
            peak_hours: request.peak_hours,
            production_lh: flows.production_lh,
            override_l: request.final_tank_override_l,
        },
        params.final_tank,
    );

    let mut pipe_flows = vec![design_flow_lh];
    pipe_flows.extend(
        [
            softener.as_ref().map(|s| &s.unit),
            carbon.as_ref().map(|s| &s.unit),
            sand.as_ref().map(|s| &s.unit),
        ]
        .into_iter()
        .flatten()
        .map(PretreatmentUnit::backwash_flow_lh),
    );
    let pipe = recommend_pipe(&pipe_flows);
    if pipe.velocity_m_s > params.max_pipe_velocity_m_s {
        advisories.push(Advisory::PipeVelocityHigh {
            velocity_m_s: pipe.velocity_m_s,
            limit_m_s: params.max_pipe_velocity_m_s,
        });
    }

    let installation = InstallationRequirements {
        min_feed_flow_lh: design_flow_lh,
        min_feed_flow_m3h: design_flow_lh / 1000.0,
        feed_pressure_bar: params.feed_pressure_bar,
        pipe_label: pipe.label,
        buffer_tank_l,
        final_tank_l,
    };

    InstallationDesign {
        flows,
        peak_intake_lh,
        design_flow,
        softener,
        carbon,
        sand,
        buffer_tank_l,
        final_tank_l,
        pipe,
        economics,
        installation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_zero_peak_hours() {
        let req = SizingRequest {
            peak_hours: 0.0,
            ..SizingRequest::default()
        };
        assert_eq!(
            req.validate(),
            Err(InputError::NonPositive {
                field: "peak_hours",
                value: 0.0
            })
        );
    }

    #[test]
    fn validate_rejects_negative_cost() {
        let req = SizingRequest {
            costs: CostRates {
                salt_per_kg: -1.0,
                ..CostRates::default()
            },
            ..SizingRequest::default()
        };
        assert!(matches!(
            req.validate(),
            Err(InputError::Negative {
                field: "costs.salt_per_kg",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_more_than_a_day_of_hours() {
        let req = SizingRequest {
            operating_hours: 30.0,
            ..SizingRequest::default()
        };
        assert!(matches!(req.validate(), Err(InputError::OutOfRange { .. })));
    }

    #[test]
    fn flow_balance_closes() {
        let blend = blend_plan(1000.0, 800.0, TreatmentTarget::TargetSalinity(200.0), 0.05);
        let unit = catalog::find_ro("ALFA 140").expect("unit");
        let flows = FlowBalance::new(&blend, unit, 1.0, 0.5);
        assert!((flows.feed_l - flows.reject_l - flows.product_l).abs() < 1e-9);
        assert!((flows.ro_feed_l - 2.0 * flows.ro_production_l).abs() < 1e-9);
    }

    #[test]
    fn advisory_message_fills_placeholders() {
        let tr = Translator::new("en");
        let msg = Advisory::SoftenerUndersized {
            autonomy_days: 0.6,
            required_days: 0.8,
        }
        .message(&tr);
        assert!(msg.contains("0.60"), "{msg}");
        assert!(!msg.contains('{'), "{msg}");
    }

    #[test]
    fn full_bypass_message_names_feed_and_target() {
        let msg = Advisory::RoNotRequired {
            feed_ppm: 300.0,
            target_ppm: 500.0,
        }
        .message(&Translator::new("ko"));
        assert!(msg.contains("500 ppm") && msg.contains("300 ppm"), "{msg}");
        assert!(!msg.contains('{'), "{msg}");
    }
}
