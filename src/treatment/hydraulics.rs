use serde::Serialize;

use crate::config::{EngineeringParams, FinalTankRule};

/// 집수 배관 호칭 규격. 내경은 PVC PN16 기준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PipeSize {
    ThreeQuarter,
    One,
    OneAndQuarter,
    OneAndHalf,
    Two,
    TwoAndHalf,
}

impl PipeSize {
    pub fn label(&self) -> &'static str {
        match self {
            PipeSize::ThreeQuarter => "3/4\"",
            PipeSize::One => "1\"",
            PipeSize::OneAndQuarter => "1 1/4\"",
            PipeSize::OneAndHalf => "1 1/2\"",
            PipeSize::Two => "2\"",
            PipeSize::TwoAndHalf => "2 1/2\"",
        }
    }

    /// 내경 [m]
    pub fn inner_diameter_m(&self) -> f64 {
        match self {
            PipeSize::ThreeQuarter => 0.0204,
            PipeSize::One => 0.0262,
            PipeSize::OneAndQuarter => 0.0326,
            PipeSize::OneAndHalf => 0.0408,
            PipeSize::Two => 0.0514,
            PipeSize::TwoAndHalf => 0.0612,
        }
    }
}

/// 유량 [L/h] 구간별 배관 규격. 일정 유속을 가정한 구간표이다.
pub fn pipe_for_flow(flow_lh: f64) -> PipeSize {
    if flow_lh < 1500.0 {
        PipeSize::ThreeQuarter
    } else if flow_lh < 3000.0 {
        PipeSize::One
    } else if flow_lh < 5000.0 {
        PipeSize::OneAndQuarter
    } else if flow_lh < 9000.0 {
        PipeSize::OneAndHalf
    } else if flow_lh < 15000.0 {
        PipeSize::Two
    } else {
        PipeSize::TwoAndHalf
    }
}

/// 원형 배관 내 평균 유속 [m/s].
pub fn pipe_velocity_m_s(flow_lh: f64, inner_diameter_m: f64) -> f64 {
    let flow_m3_s = flow_lh / 1000.0 / 3600.0;
    let area = std::f64::consts::PI * inner_diameter_m * inner_diameter_m / 4.0;
    flow_m3_s / area
}

/// 추천 배관.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipeRecommendation {
    pub size: PipeSize,
    pub label: &'static str,
    /// 규격을 결정한 최대 유량 [L/h]
    pub governing_flow_lh: f64,
    pub velocity_m_s: f64,
}

/// 설계 유량과 각 설비 역세 유량 중 최대값으로 배관을 정한다.
pub fn recommend_pipe(flows_lh: &[f64]) -> PipeRecommendation {
    let governing_flow_lh = flows_lh.iter().copied().fold(0.0, f64::max);
    let size = pipe_for_flow(governing_flow_lh);
    PipeRecommendation {
        size,
        label: size.label(),
        governing_flow_lh,
        velocity_m_s: pipe_velocity_m_s(governing_flow_lh, size.inner_diameter_m()),
    }
}

fn manual(override_l: Option<f64>) -> Option<f64> {
    override_l.filter(|v| *v > 0.0)
}

/// 버퍼 탱크 용량 [L]. 수동 지정값(>0)이 우선한다.
pub fn buffer_tank_volume_l(
    peak_intake_lh: f64,
    override_l: Option<f64>,
    params: &EngineeringParams,
) -> f64 {
    manual(override_l).unwrap_or(params.buffer_tank_hours * peak_intake_lh)
}

/// 피크 시간 평균 수요가 RO 실생산 유량을 넘는 부족분 [L/h].
pub fn peak_flow_deficit_lh(consumption_l_day: f64, peak_hours: f64, production_lh: f64) -> Option<f64> {
    if peak_hours <= 0.0 {
        return None;
    }
    let demand_lh = consumption_l_day / peak_hours;
    (demand_lh > production_lh).then(|| demand_lh - production_lh)
}

/// 최종 제품수 탱크 산정 입력.
#[derive(Debug, Clone)]
pub struct FinalTankInput {
    pub consumption_l_day: f64,
    pub peak_hours: f64,
    pub production_lh: f64,
    pub override_l: Option<f64>,
}

/// 최종 제품수 탱크 용량 [L]. 수동 지정값(>0)이 우선한다.
pub fn final_tank_volume_l(input: &FinalTankInput, rule: FinalTankRule) -> f64 {
    if let Some(v) = manual(input.override_l) {
        return v;
    }
    match rule {
        FinalTankRule::DailyFraction { fraction } => input.consumption_l_day * fraction,
        FinalTankRule::PeakDeficit { margin } => {
            peak_flow_deficit_lh(input.consumption_l_day, input.peak_hours, input.production_lh)
                .map(|deficit| deficit * input.peak_hours * margin)
                .unwrap_or(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_bands() {
        assert_eq!(pipe_for_flow(1499.0), PipeSize::ThreeQuarter);
        assert_eq!(pipe_for_flow(1500.0), PipeSize::One);
        assert_eq!(pipe_for_flow(4999.0), PipeSize::OneAndQuarter);
        assert_eq!(pipe_for_flow(8000.0), PipeSize::OneAndHalf);
        assert_eq!(pipe_for_flow(14_999.0), PipeSize::Two);
        assert_eq!(pipe_for_flow(15_000.0), PipeSize::TwoAndHalf);
    }

    #[test]
    fn pipe_follows_largest_flow() {
        let rec = recommend_pipe(&[625.0, 500.0, 1000.0, 1400.0]);
        assert_eq!(rec.size, PipeSize::ThreeQuarter);
        assert_eq!(rec.governing_flow_lh, 1400.0);
        assert!(rec.velocity_m_s > 1.0 && rec.velocity_m_s < 1.3);
    }

    #[test]
    fn buffer_tank_is_two_hours_of_peak_intake() {
        let p = EngineeringParams::default();
        assert_eq!(buffer_tank_volume_l(625.0, None, &p), 1250.0);
        assert_eq!(buffer_tank_volume_l(625.0, Some(0.0), &p), 1250.0);
        assert_eq!(buffer_tank_volume_l(625.0, Some(3000.0), &p), 3000.0);
    }

    #[test]
    fn final_tank_rules() {
        let input = FinalTankInput {
            consumption_l_day: 2000.0,
            peak_hours: 8.0,
            production_lh: 145.0,
            override_l: None,
        };
        assert_eq!(
            final_tank_volume_l(&input, FinalTankRule::DailyFraction { fraction: 0.75 }),
            1500.0
        );
        let deficit = final_tank_volume_l(&input, FinalTankRule::PeakDeficit { margin: 1.2 });
        assert!((deficit - (250.0 - 145.0) * 8.0 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn no_deficit_when_production_covers_peak() {
        assert!(peak_flow_deficit_lh(1000.0, 10.0, 150.0).is_none());
    }
}
