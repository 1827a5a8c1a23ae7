use serde::{Deserialize, Serialize};

use crate::catalog::PretreatmentUnit;
use crate::config::EngineeringParams;

/// 원수 공급원.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// 상수도
    Mains,
    /// 지하수/하천수. 탁도 변동이 커서 안전율을 둔다.
    Well,
}

/// 전처리 설비의 수리 운전 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    /// 버퍼 탱크 없이 RO 흡입 피크를 전처리가 직접 공급
    Direct,
    /// 중간 버퍼 탱크를 두고 전처리를 장시간 저유량으로 운전
    Buffered,
}

/// 공급원별 안전율.
pub fn safety_factor(source: SourceType, params: &EngineeringParams) -> f64 {
    match source {
        SourceType::Mains => params.mains_safety_factor,
        SourceType::Well => params.well_safety_factor,
    }
}

/// RO 순간 피크 흡입 유량 [L/h] = 공칭 생산량 / 24 / 회수율 × 피크 계수.
pub fn peak_intake_flow_lh(nominal_l_day: f64, recovery: f64, params: &EngineeringParams) -> f64 {
    nominal_l_day / 24.0 / recovery * params.peaking_factor
}

/// 전처리 설계 유량 산정 입력.
#[derive(Debug, Clone)]
pub struct DesignFlowInput {
    pub mode: OperatingMode,
    /// RO 피크 흡입 유량 [L/h]
    pub peak_intake_lh: f64,
    /// 바이패스 원수량 [L/day]
    pub bypass_l_day: f64,
    /// 피크 사용 시간 [h]
    pub peak_hours: f64,
    /// 전처리를 통과하는 총 일 급수량(RO 급수 + 바이패스) [L/day]
    pub total_feed_l_day: f64,
    pub source: SourceType,
}

/// 전처리 설계 유량 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignFlow {
    pub mode: OperatingMode,
    /// 피크 시간대 바이패스 유량 [L/h] (직결 방식에서만 의미가 있다)
    pub bypass_lh: f64,
    pub safety_factor: f64,
    /// 전처리 설비가 감당해야 하는 설계 유량 [L/h]
    pub design_flow_lh: f64,
}

/// 운전 방식에 따라 전처리 설계 유량을 계산한다.
pub fn design_flow(input: &DesignFlowInput, params: &EngineeringParams) -> DesignFlow {
    let sf = safety_factor(input.source, params);
    match input.mode {
        OperatingMode::Direct => {
            let bypass_lh = if input.peak_hours > 0.0 {
                input.bypass_l_day / input.peak_hours
            } else {
                0.0
            };
            DesignFlow {
                mode: input.mode,
                bypass_lh,
                safety_factor: sf,
                design_flow_lh: (input.peak_intake_lh + bypass_lh) * sf,
            }
        }
        OperatingMode::Buffered => DesignFlow {
            mode: input.mode,
            bypass_lh: 0.0,
            safety_factor: sf,
            design_flow_lh: input.total_feed_l_day / params.buffer_window_hours * sf,
        },
    }
}

/// 활성탄/모래 여과기 선정 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSelection {
    pub unit: PretreatmentUnit,
    /// 설계 유량 / 정격 유량
    pub load_ratio: f64,
}

/// 설계 유량 이상을 통수할 수 있는 가장 작은 여과기를 고른다. 없으면 `None`.
pub fn select_filter(catalog: &[PretreatmentUnit], design_flow_lh: f64) -> Option<FilterSelection> {
    catalog
        .iter()
        .filter(|unit| unit.max_flow_lh() >= design_flow_lh)
        .min_by(|a, b| a.max_flow_m3h.total_cmp(&b.max_flow_m3h))
        .map(|unit| FilterSelection {
            unit: unit.clone(),
            load_ratio: design_flow_lh / unit.max_flow_lh(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{carbon_catalog, sand_catalog};

    fn input(mode: OperatingMode, source: SourceType) -> DesignFlowInput {
        DesignFlowInput {
            mode,
            peak_intake_lh: 625.0,
            bypass_l_day: 400.0,
            peak_hours: 8.0,
            total_feed_l_day: 4400.0,
            source,
        }
    }

    #[test]
    fn peak_intake_for_alfa_140() {
        let p = EngineeringParams::default();
        assert!((peak_intake_flow_lh(5000.0, 0.5, &p) - 625.0).abs() < 1e-9);
    }

    #[test]
    fn direct_mode_adds_bypass_over_peak_window() {
        let p = EngineeringParams::default();
        let flow = design_flow(&input(OperatingMode::Direct, SourceType::Mains), &p);
        assert!((flow.bypass_lh - 50.0).abs() < 1e-9);
        assert!((flow.design_flow_lh - 675.0).abs() < 1e-9);
    }

    #[test]
    fn well_source_applies_safety_factor() {
        let p = EngineeringParams::default();
        let flow = design_flow(&input(OperatingMode::Direct, SourceType::Well), &p);
        assert!((flow.design_flow_lh - 810.0).abs() < 1e-9);
    }

    #[test]
    fn buffered_mode_spreads_feed_over_window() {
        let p = EngineeringParams::default();
        let flow = design_flow(&input(OperatingMode::Buffered, SourceType::Mains), &p);
        assert!((flow.design_flow_lh - 220.0).abs() < 1e-9);
    }

    #[test]
    fn picks_smallest_sufficient_filter() {
        let sel = select_filter(carbon_catalog(), 900.0).expect("carbon");
        assert_eq!(sel.unit.vessel, "12x52");
        assert!((sel.load_ratio - 0.75).abs() < 1e-9);
    }

    #[test]
    fn exact_rating_is_eligible() {
        let sel = select_filter(sand_catalog(), 1000.0).expect("sand");
        assert_eq!(sel.unit.vessel, "10x54");
    }

    #[test]
    fn flow_above_catalog_returns_none() {
        assert!(select_filter(sand_catalog(), 20_000.0).is_none());
    }
}
