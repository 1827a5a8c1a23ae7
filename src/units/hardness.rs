use serde::{Deserialize, Serialize};

/// 경도 단위. 내부 기준은 프랑스 경도(°fH, 1 °fH = 10 mg/L CaCO3)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HardnessUnit {
    /// 프랑스 경도 °fH
    French,
    /// 독일 경도 °dH (CaO 10 mg/L)
    German,
    /// mg/L as CaCO3
    PpmCaCO3,
    /// mmol/L (Ca + Mg)
    MillimolePerLiter,
}

const PPM_CACO3_PER_FRENCH: f64 = 10.0;
const PPM_CACO3_PER_GERMAN: f64 = 17.848;
const PPM_CACO3_PER_MMOL: f64 = 100.09;

fn to_ppm(value: f64, unit: HardnessUnit) -> f64 {
    match unit {
        HardnessUnit::French => value * PPM_CACO3_PER_FRENCH,
        HardnessUnit::German => value * PPM_CACO3_PER_GERMAN,
        HardnessUnit::PpmCaCO3 => value,
        HardnessUnit::MillimolePerLiter => value * PPM_CACO3_PER_MMOL,
    }
}

fn from_ppm(ppm: f64, unit: HardnessUnit) -> f64 {
    match unit {
        HardnessUnit::French => ppm / PPM_CACO3_PER_FRENCH,
        HardnessUnit::German => ppm / PPM_CACO3_PER_GERMAN,
        HardnessUnit::PpmCaCO3 => ppm,
        HardnessUnit::MillimolePerLiter => ppm / PPM_CACO3_PER_MMOL,
    }
}

/// 경도를 변환한다.
pub fn convert_hardness(value: f64, from: HardnessUnit, to: HardnessUnit) -> f64 {
    from_ppm(to_ppm(value, from), to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn german_degree_in_french() {
        let f = convert_hardness(1.0, HardnessUnit::German, HardnessUnit::French);
        assert!((f - 1.7848).abs() < 1e-9);
    }

    #[test]
    fn french_to_ppm() {
        assert_eq!(
            convert_hardness(35.0, HardnessUnit::French, HardnessUnit::PpmCaCO3),
            350.0
        );
    }
}
