use serde::{Deserialize, Serialize};

/// 운전비 단가.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRates {
    /// 용수 단가 [€/m3]
    pub water_per_m3: f64,
    /// 소금 단가 [€/kg]
    pub salt_per_kg: f64,
    /// 전력 단가 [€/kWh]
    pub electricity_per_kwh: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            water_per_m3: 1.5,
            salt_per_kg: 0.45,
            electricity_per_kwh: 0.20,
        }
    }
}

/// 운전비 계산 입력.
#[derive(Debug, Clone)]
pub struct OperatingCostInput {
    /// 총 일 급수량(RO 급수 + 바이패스) [L/day]
    pub feed_l_day: f64,
    /// RO 측 일 생산 요구량 [L/day]
    pub ro_production_l_day: f64,
    /// RO 시간당 실생산량 [L/h]
    pub production_lh: f64,
    /// RO 소비 전력 [kW]
    pub power_kw: f64,
    /// 연수기 (재생 주기 [day], 재생당 소금 [kg]). 연수기가 없으면 None.
    pub softener: Option<(f64, f64)>,
    pub rates: CostRates,
}

/// 연간/일간 운전비 내역.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatingCosts {
    pub water_annual: f64,
    pub salt_annual: f64,
    pub electricity_annual: f64,
    pub total_annual: f64,
    pub total_daily: f64,
    /// 연간 소금 사용량 [kg/year]
    pub salt_kg_year: f64,
    /// RO 일 운전 시간 [h/day]
    pub ro_run_hours_day: f64,
}

/// 용수·소금·전력 연간 비용을 합산한다.
pub fn operating_costs(input: &OperatingCostInput) -> OperatingCosts {
    let water_annual = input.feed_l_day / 1000.0 * 365.0 * input.rates.water_per_m3;

    let salt_kg_year = match input.softener {
        Some((days, salt_kg)) if days > 0.0 => 365.0 / days * salt_kg,
        _ => 0.0,
    };
    let salt_annual = salt_kg_year * input.rates.salt_per_kg;

    let ro_run_hours_day = if input.production_lh > 0.0 {
        input.ro_production_l_day / input.production_lh
    } else {
        0.0
    };
    let electricity_annual =
        ro_run_hours_day * input.power_kw * 365.0 * input.rates.electricity_per_kwh;

    let total_annual = water_annual + salt_annual + electricity_annual;
    OperatingCosts {
        water_annual,
        salt_annual,
        electricity_annual,
        total_annual,
        total_daily: total_annual / 365.0,
        salt_kg_year,
        ro_run_hours_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alfa_140_reference_costs() {
        let costs = operating_costs(&OperatingCostInput {
            feed_l_day: 4000.0,
            ro_production_l_day: 2000.0,
            production_lh: 5000.0 * 0.7 / 24.0,
            power_kw: 0.75,
            softener: Some((256.0 / 140.0, 6.0)),
            rates: CostRates::default(),
        });
        assert!((costs.water_annual - 2190.0).abs() < 1e-9);
        assert!((costs.salt_kg_year - 365.0 * 140.0 / 256.0 * 6.0).abs() < 1e-9);
        assert!((costs.ro_run_hours_day - 2000.0 * 24.0 / 3500.0).abs() < 1e-9);
        assert!((costs.total_daily * 365.0 - costs.total_annual).abs() < 1e-9);
    }

    #[test]
    fn no_softener_means_no_salt() {
        let costs = operating_costs(&OperatingCostInput {
            feed_l_day: 1000.0,
            ro_production_l_day: 500.0,
            production_lh: 100.0,
            power_kw: 0.1,
            softener: None,
            rates: CostRates::default(),
        });
        assert_eq!(costs.salt_annual, 0.0);
        assert_eq!(costs.salt_kg_year, 0.0);
        assert!((costs.electricity_annual - 5.0 * 0.1 * 365.0 * 0.2).abs() < 1e-9);
    }
}
