use serde::Serialize;

use crate::catalog::{RoCategory, RoUnit};
use crate::config::EngineeringParams;

/// 선정된 RO 장비와 선정 시점의 보정 용량.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoSelection {
    pub unit: RoUnit,
    /// 온도·등급 보정 후 일 생산 가능량 [L/day]
    pub derated_capacity_l_day: f64,
}

/// 등급별 사용 계수. 가정용 장비는 연속 운전 정격이 아니므로 크게 낮춘다.
pub fn usage_factor(category: RoCategory, params: &EngineeringParams) -> f64 {
    match category {
        RoCategory::Industrial => params.industrial_usage_factor,
        RoCategory::Domestic => params.domestic_usage_factor,
    }
}

/// 공칭 생산량에 온도 보정과 등급 사용 계수를 곱한 보정 용량 [L/day].
pub fn derated_capacity(unit: &RoUnit, tcf: f64, params: &EngineeringParams) -> f64 {
    unit.nominal_production_l_day * tcf * usage_factor(unit.category, params)
}

/// 염도 상한과 보정 용량을 만족하는 RO 장비를 고른다.
///
/// 후보는 카탈로그 순서를 유지한다. 요구량이 임계값을 넘으면 첫 산업용 후보
/// (없으면 마지막 후보), 아니면 첫 가정용 후보(없으면 첫 후보)를 선택한다.
/// 후보가 없으면 `None` (표준 장비로는 해결 불가).
pub fn select_ro(
    catalog: &[RoUnit],
    feed_ppm: f64,
    required_l_day: f64,
    tcf: f64,
    params: &EngineeringParams,
) -> Option<RoSelection> {
    let candidates: Vec<RoSelection> = catalog
        .iter()
        .filter(|unit| unit.max_ppm >= feed_ppm)
        .map(|unit| RoSelection {
            unit: unit.clone(),
            derated_capacity_l_day: derated_capacity(unit, tcf, params),
        })
        .filter(|sel| sel.derated_capacity_l_day >= required_l_day)
        .collect();

    let preferred = if required_l_day > params.industrial_demand_threshold_l {
        RoCategory::Industrial
    } else {
        RoCategory::Domestic
    };
    let chosen = candidates
        .iter()
        .find(|sel| sel.unit.category == preferred)
        .or_else(|| match preferred {
            RoCategory::Industrial => candidates.last(),
            RoCategory::Domestic => candidates.first(),
        })
        .cloned();

    match &chosen {
        Some(sel) => tracing::debug!(
            unit = sel.unit.name,
            derated = sel.derated_capacity_l_day,
            candidates = candidates.len(),
            "RO unit selected"
        ),
        None => tracing::debug!(feed_ppm, required_l_day, "no RO unit satisfies the request"),
    }
    chosen
}
