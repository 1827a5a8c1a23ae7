use serde::{Deserialize, Serialize};

/// 체적 유량 단위. 내부 기준은 L/h이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowRateUnit {
    LiterPerHour,
    LiterPerMinute,
    CubicMeterPerHour,
    UsGallonPerMinute,
}

fn to_liter_per_hour(value: f64, unit: FlowRateUnit) -> f64 {
    match unit {
        FlowRateUnit::LiterPerHour => value,
        FlowRateUnit::LiterPerMinute => value * 60.0,
        FlowRateUnit::CubicMeterPerHour => value * 1000.0,
        FlowRateUnit::UsGallonPerMinute => value * 3.785_411_784 * 60.0,
    }
}

fn from_liter_per_hour(value: f64, unit: FlowRateUnit) -> f64 {
    match unit {
        FlowRateUnit::LiterPerHour => value,
        FlowRateUnit::LiterPerMinute => value / 60.0,
        FlowRateUnit::CubicMeterPerHour => value / 1000.0,
        FlowRateUnit::UsGallonPerMinute => value / (3.785_411_784 * 60.0),
    }
}

/// 유량을 변환한다.
pub fn convert_flow_rate(value: f64, from: FlowRateUnit, to: FlowRateUnit) -> f64 {
    from_liter_per_hour(to_liter_per_hour(value, from), to)
}
