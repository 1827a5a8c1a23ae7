use serde::{Deserialize, Serialize};

/// 처리 목표. 최대 처리(전량 RO) 또는 목표 염도 블렌딩.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "ppm", rename_all = "snake_case")]
pub enum TreatmentTarget {
    MaximumPurity,
    /// 목표 생산수 염도 [ppm]
    TargetSalinity(f64),
}

/// RO 투과수와 원수 바이패스의 분배 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlendPlan {
    /// 추정 RO 투과수 염도 [ppm]
    pub permeate_ppm: f64,
    /// 실제 적용된 생산수 목표 염도 [ppm] (투과수 염도 이하 요청은 끌어올림)
    pub target_ppm: f64,
    /// 요청 목표가 투과수 염도보다 낮아 보정되었는지 여부
    pub target_clamped: bool,
    /// RO를 거치는 비율(0~1)
    pub ro_fraction: f64,
    /// RO 측 일 생산 요구량 [L/day]
    pub ro_volume_l: f64,
    /// 바이패스 원수량 [L/day]
    pub bypass_volume_l: f64,
}

/// 목표 염도를 맞추기 위한 RO/바이패스 분배를 계산한다.
///
/// `ro_fraction = (ppm_in - ppm_out) / (ppm_in - ppm_ro)` 를 [0, 1]로 제한한다.
pub fn blend_plan(
    consumption_l_day: f64,
    feed_ppm: f64,
    target: TreatmentTarget,
    rejection_ratio: f64,
) -> BlendPlan {
    let permeate_ppm = feed_ppm * rejection_ratio;
    let (target_ppm, target_clamped, ro_fraction) = match target {
        TreatmentTarget::MaximumPurity => (permeate_ppm, false, 1.0),
        TreatmentTarget::TargetSalinity(requested) => {
            let clamped = requested < permeate_ppm;
            let ppm_out = requested.max(permeate_ppm);
            let fraction = if feed_ppm == permeate_ppm {
                1.0
            } else {
                ((feed_ppm - ppm_out) / (feed_ppm - permeate_ppm)).clamp(0.0, 1.0)
            };
            (ppm_out, clamped, fraction)
        }
    };
    let ro_volume_l = consumption_l_day * ro_fraction;
    BlendPlan {
        permeate_ppm,
        target_ppm,
        target_clamped,
        ro_fraction,
        ro_volume_l,
        bypass_volume_l: consumption_l_day - ro_volume_l,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maximum_purity_sends_everything_through_ro() {
        let plan = blend_plan(2000.0, 800.0, TreatmentTarget::MaximumPurity, 0.05);
        assert_eq!(plan.ro_fraction, 1.0);
        assert_eq!(plan.ro_volume_l, 2000.0);
        assert_eq!(plan.bypass_volume_l, 0.0);
        assert!((plan.permeate_ppm - 40.0).abs() < 1e-12);
    }

    #[test]
    fn target_below_permeate_is_raised() {
        let plan = blend_plan(1000.0, 800.0, TreatmentTarget::TargetSalinity(10.0), 0.05);
        assert!(plan.target_clamped);
        assert!((plan.target_ppm - 40.0).abs() < 1e-12);
        assert_eq!(plan.ro_fraction, 1.0);
    }

    #[test]
    fn target_above_feed_needs_no_ro() {
        let plan = blend_plan(1000.0, 300.0, TreatmentTarget::TargetSalinity(500.0), 0.05);
        assert_eq!(plan.ro_fraction, 0.0);
        assert_eq!(plan.bypass_volume_l, 1000.0);
    }

    #[test]
    fn zero_salinity_feed_keeps_full_ro() {
        let plan = blend_plan(1000.0, 0.0, TreatmentTarget::TargetSalinity(0.0), 0.05);
        assert_eq!(plan.ro_fraction, 1.0);
    }
}
