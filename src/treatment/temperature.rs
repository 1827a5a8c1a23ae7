use crate::config::EngineeringParams;

/// 저온에서 막 투과도 감소를 반영하는 온도 보정 계수(TCF)를 계산한다.
///
/// 기준 온도(25°C) 이상이면 1.0, 그 아래에서는 1°C당 3%씩 줄이되 하한 0.1을 둔다.
pub fn temperature_correction_factor(temp_c: f64, params: &EngineeringParams) -> f64 {
    if temp_c >= params.reference_temperature_c {
        1.0
    } else {
        let drop = (params.reference_temperature_c - temp_c) * params.tcf_per_degree;
        (1.0 - drop).max(params.tcf_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warm_water_is_not_derated() {
        let p = EngineeringParams::default();
        assert_eq!(temperature_correction_factor(25.0, &p), 1.0);
        assert_eq!(temperature_correction_factor(32.0, &p), 1.0);
    }

    #[test]
    fn cold_water_loses_three_percent_per_degree() {
        let p = EngineeringParams::default();
        let tcf = temperature_correction_factor(15.0, &p);
        assert!((tcf - 0.7).abs() < 1e-12);
    }

    #[test]
    fn floor_prevents_non_positive_capacity() {
        let p = EngineeringParams::default();
        assert_eq!(temperature_correction_factor(-20.0, &p), 0.1);
    }
}
