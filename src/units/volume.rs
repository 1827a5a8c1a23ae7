use serde::{Deserialize, Serialize};

/// 체적 단위. 내부 기준은 리터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeUnit {
    Liter,
    CubicMeter,
    UsGallon,
}

const LITERS_PER_US_GALLON: f64 = 3.785_411_784;

fn to_liter(value: f64, unit: VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::Liter => value,
        VolumeUnit::CubicMeter => value * 1000.0,
        VolumeUnit::UsGallon => value * LITERS_PER_US_GALLON,
    }
}

fn from_liter(value: f64, unit: VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::Liter => value,
        VolumeUnit::CubicMeter => value / 1000.0,
        VolumeUnit::UsGallon => value / LITERS_PER_US_GALLON,
    }
}

/// 체적을 변환한다.
pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    from_liter(to_liter(value, from), to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_meter_is_thousand_liters() {
        assert_eq!(convert_volume(2.0, VolumeUnit::CubicMeter, VolumeUnit::Liter), 2000.0);
    }

    #[test]
    fn gallon_to_liter() {
        let l = convert_volume(100.0, VolumeUnit::UsGallon, VolumeUnit::Liter);
        assert!((l - 378.541_178_4).abs() < 1e-6);
    }
}
