//! 표준 장비 카탈로그(역삼투, 연수기, 활성탄 여과기, 모래 여과기).
//! 값은 제조사 카탈로그 기준이며 프로세스 시작 후 변경되지 않는다.
use serde::Serialize;

/// 역삼투 장비 등급. 가정용은 간헐 운전 기준으로 정격이 매겨진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoCategory {
    Domestic,
    Industrial,
}

/// 밸브/뱅크 구성.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValveConfig {
    /// 단일 탱크. 재생 중 통수 중단.
    Simplex,
    /// 교번 운전 2탱크. 재생 중에도 연속 통수.
    Duplex,
}

/// 전처리 설비 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PretreatmentKind {
    Softener,
    Carbon,
    Sand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoUnit {
    pub category: RoCategory,
    pub name: &'static str,
    /// 공칭 생산량 [L/day] (25°C 기준)
    pub nominal_production_l_day: f64,
    /// 허용 원수 염도 상한 [ppm]
    pub max_ppm: f64,
    /// 회수율(0~1)
    pub recovery: f64,
    /// 소비 전력 [kW]
    pub power_kw: f64,
}

impl RoUnit {
    pub fn is_industrial(&self) -> bool {
        self.category == RoCategory::Industrial
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PretreatmentUnit {
    pub kind: PretreatmentKind,
    pub name: &'static str,
    /// 용기 규격 (직경x높이, inch)
    pub vessel: &'static str,
    /// 수지/여재 충전량 [L]. 용기 크기 정렬 기준.
    pub media_litres: f64,
    /// 최대 통수 유량 [m3/h]
    pub max_flow_m3h: f64,
    /// 이온교환 용량 [°Hf·m3]. 연수기 외에는 0.
    pub exchange_capacity: f64,
    /// 재생 1회당 소금 사용량 [kg]. 연수기 외에는 0.
    pub salt_per_regen_kg: f64,
    pub valve: ValveConfig,
    /// 역세 유량 [m3/h]
    pub backwash_flow_m3h: f64,
}

impl PretreatmentUnit {
    /// 최대 통수 유량 [L/h]
    pub fn max_flow_lh(&self) -> f64 {
        self.max_flow_m3h * 1000.0
    }

    /// 역세 유량 [L/h]
    pub fn backwash_flow_lh(&self) -> f64 {
        self.backwash_flow_m3h * 1000.0
    }

    pub fn is_duplex(&self) -> bool {
        self.valve == ValveConfig::Duplex
    }
}

pub fn ro_catalog() -> &'static [RoUnit] {
    RO_UNITS
}

pub fn softener_catalog() -> &'static [PretreatmentUnit] {
    SOFTENERS
}

pub fn carbon_catalog() -> &'static [PretreatmentUnit] {
    CARBON_FILTERS
}

pub fn sand_catalog() -> &'static [PretreatmentUnit] {
    SAND_FILTERS
}

/// 종류별 전처리 카탈로그를 반환한다.
pub fn pretreatment_catalog(kind: PretreatmentKind) -> &'static [PretreatmentUnit] {
    match kind {
        PretreatmentKind::Softener => SOFTENERS,
        PretreatmentKind::Carbon => CARBON_FILTERS,
        PretreatmentKind::Sand => SAND_FILTERS,
    }
}

pub fn find_ro(name: &str) -> Option<&'static RoUnit> {
    RO_UNITS.iter().find(|u| u.name.eq_ignore_ascii_case(name.trim()))
}

pub fn find_pretreatment(kind: PretreatmentKind, name: &str) -> Option<&'static PretreatmentUnit> {
    pretreatment_catalog(kind)
        .iter()
        .find(|u| u.name.eq_ignore_ascii_case(name.trim()))
}

const fn ro(
    category: RoCategory,
    name: &'static str,
    nominal_production_l_day: f64,
    max_ppm: f64,
    recovery: f64,
    power_kw: f64,
) -> RoUnit {
    RoUnit {
        category,
        name,
        nominal_production_l_day,
        max_ppm,
        recovery,
        power_kw,
    }
}

#[allow(clippy::too_many_arguments)]
const fn softener(
    name: &'static str,
    vessel: &'static str,
    media_litres: f64,
    max_flow_m3h: f64,
    exchange_capacity: f64,
    salt_per_regen_kg: f64,
    valve: ValveConfig,
    backwash_flow_m3h: f64,
) -> PretreatmentUnit {
    PretreatmentUnit {
        kind: PretreatmentKind::Softener,
        name,
        vessel,
        media_litres,
        max_flow_m3h,
        exchange_capacity,
        salt_per_regen_kg,
        valve,
        backwash_flow_m3h,
    }
}

const fn filter(
    kind: PretreatmentKind,
    name: &'static str,
    vessel: &'static str,
    media_litres: f64,
    max_flow_m3h: f64,
    backwash_flow_m3h: f64,
) -> PretreatmentUnit {
    PretreatmentUnit {
        kind,
        name,
        vessel,
        media_litres,
        max_flow_m3h,
        exchange_capacity: 0.0,
        salt_per_regen_kg: 0.0,
        valve: ValveConfig::Simplex,
        backwash_flow_m3h,
    }
}

use PretreatmentKind::{Carbon, Sand};
use RoCategory::{Domestic, Industrial};
use ValveConfig::{Duplex, Simplex};

const RO_UNITS: &[RoUnit] = &[
    ro(Domestic, "PURHOME PLUS", 300.0, 3000.0, 0.50, 0.03),
    ro(Domestic, "DF 800 UV-LED", 3000.0, 1500.0, 0.71, 0.08),
    ro(Domestic, "Direct Flow 1200", 4500.0, 1500.0, 0.66, 0.10),
    ro(Industrial, "ALFA 140", 5000.0, 2000.0, 0.50, 0.75),
    ro(Industrial, "ALFA 240", 10000.0, 2000.0, 0.50, 1.1),
    ro(Industrial, "ALFA 440", 20000.0, 2000.0, 0.60, 1.1),
    ro(Industrial, "ALFA 640", 30000.0, 2000.0, 0.60, 2.2),
    ro(Industrial, "AP-6000 LUXE", 18000.0, 6000.0, 0.60, 2.2),
];

const SOFTENERS: &[PretreatmentUnit] = &[
    softener("BI BLOC 30L IMPRESSION", "10x35", 30.0, 1.8, 192.0, 4.5, Simplex, 0.4),
    softener("BI BLOC 60L IMPRESSION", "12x48", 60.0, 3.6, 384.0, 9.0, Simplex, 0.7),
    softener("BI BLOC 100L IMPRESSION", "14x65", 100.0, 6.0, 640.0, 15.0, Simplex, 1.1),
    softener("TWIN 40L DF IMPRESSION", "10x44", 40.0, 2.4, 256.0, 6.0, Duplex, 0.5),
    softener("TWIN 100L DF IMPRESSION", "14x65", 100.0, 6.0, 640.0, 15.0, Duplex, 1.1),
    softener("TWIN 140L DF IMPRESSION", "16x65", 140.0, 6.0, 896.0, 25.0, Duplex, 1.5),
];

const CARBON_FILTERS: &[PretreatmentUnit] = &[
    filter(Carbon, "CARBON 10x54", "10x54", 28.0, 0.8, 1.0),
    filter(Carbon, "CARBON 12x52", "12x52", 40.0, 1.2, 1.5),
    filter(Carbon, "CARBON 14x65", "14x65", 60.0, 1.6, 2.1),
    filter(Carbon, "CARBON 16x65", "16x65", 85.0, 2.2, 2.7),
    filter(Carbon, "CARBON 21x62", "21x62", 140.0, 3.5, 4.6),
    filter(Carbon, "CARBON 24x72", "24x72", 200.0, 4.6, 6.0),
    filter(Carbon, "CARBON 30x72", "30x72", 330.0, 7.2, 9.4),
    filter(Carbon, "CARBON 36x72", "36x72", 470.0, 10.0, 13.5),
];

const SAND_FILTERS: &[PretreatmentUnit] = &[
    filter(Sand, "SILEX 10x54", "10x54", 28.0, 1.0, 1.4),
    filter(Sand, "SILEX 12x52", "12x52", 40.0, 1.5, 2.0),
    filter(Sand, "SILEX 14x65", "14x65", 60.0, 2.0, 2.8),
    filter(Sand, "SILEX 16x65", "16x65", 85.0, 2.7, 3.6),
    filter(Sand, "SILEX 21x62", "21x62", 140.0, 4.5, 6.2),
    filter(Sand, "SILEX 24x72", "24x72", 200.0, 6.0, 8.0),
    filter(Sand, "SILEX 30x72", "30x72", 330.0, 9.3, 12.5),
    filter(Sand, "SILEX 36x72", "36x72", 470.0, 13.0, 18.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_ro_is_case_insensitive() {
        let unit = find_ro("alfa 140").expect("ALFA 140");
        assert_eq!(unit.category, RoCategory::Industrial);
        assert!(find_ro("ALFA 9000").is_none());
    }

    #[test]
    fn only_softeners_carry_exchange_capacity() {
        assert!(softener_catalog().iter().all(|u| u.exchange_capacity > 0.0));
        assert!(carbon_catalog()
            .iter()
            .chain(sand_catalog())
            .all(|u| u.exchange_capacity == 0.0 && u.salt_per_regen_kg == 0.0));
    }

    #[test]
    fn filter_catalogs_are_sorted_by_flow() {
        for cat in [carbon_catalog(), sand_catalog()] {
            assert!(cat.windows(2).all(|w| w[0].max_flow_m3h < w[1].max_flow_m3h));
        }
    }

    #[test]
    fn unit_flow_helpers_convert_to_litres() {
        let unit = find_pretreatment(PretreatmentKind::Softener, "TWIN 40L DF IMPRESSION")
            .expect("twin 40");
        assert!((unit.max_flow_lh() - 2400.0).abs() < 1e-9);
        assert!((unit.backwash_flow_lh() - 500.0).abs() < 1e-9);
        assert!(unit.is_duplex());
    }
}
