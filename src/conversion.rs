use thiserror::Error;

use crate::quantity::QuantityKind;
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
    #[error("지원하지 않는 물리량: {0}")]
    UnsupportedQuantity(String),
}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `L`, `m3`, `gal`, `L/h`, `gpm`, `C`, `F`, `fH`, `dH`, `ppm` 등을 사용할 수 있다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Volume => {
            let from = parse_volume_unit(from_unit_str)?;
            let to = parse_volume_unit(to_unit_str)?;
            Ok(convert_volume(value, from, to))
        }
        QuantityKind::FlowRate => {
            let from = parse_flow_rate_unit(from_unit_str)?;
            let to = parse_flow_rate_unit(to_unit_str)?;
            Ok(convert_flow_rate(value, from, to))
        }
        QuantityKind::Temperature => {
            let from = parse_temperature_unit(from_unit_str)?;
            let to = parse_temperature_unit(to_unit_str)?;
            Ok(convert_temperature(value, from, to))
        }
        QuantityKind::Hardness => {
            let from = parse_hardness_unit(from_unit_str)?;
            let to = parse_hardness_unit(to_unit_str)?;
            Ok(convert_hardness(value, from, to))
        }
    }
}

/// 물리량 이름 문자열까지 받아 변환한다.
pub fn convert_named(
    kind: &str,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    let kind = QuantityKind::parse(kind)
        .ok_or_else(|| ConversionError::UnsupportedQuantity(kind.to_string()))?;
    convert(kind, value, from_unit_str, to_unit_str)
}

pub fn parse_volume_unit(s: &str) -> Result<VolumeUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "l" | "liter" | "litre" => Ok(VolumeUnit::Liter),
        "m3" | "m³" => Ok(VolumeUnit::CubicMeter),
        "gal" | "usgal" | "gallon" => Ok(VolumeUnit::UsGallon),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_flow_rate_unit(s: &str) -> Result<FlowRateUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "l/h" | "lph" => Ok(FlowRateUnit::LiterPerHour),
        "l/min" | "lpm" => Ok(FlowRateUnit::LiterPerMinute),
        "m3/h" | "m³/h" => Ok(FlowRateUnit::CubicMeterPerHour),
        "gpm" => Ok(FlowRateUnit::UsGallonPerMinute),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_temperature_unit(s: &str) -> Result<TemperatureUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "c" | "°c" | "celsius" => Ok(TemperatureUnit::Celsius),
        "f" | "°f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
        "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_hardness_unit(s: &str) -> Result<HardnessUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "fh" | "°fh" | "°f" | "french" => Ok(HardnessUnit::French),
        "dh" | "°dh" | "german" => Ok(HardnessUnit::German),
        "ppm" | "mg/l" => Ok(HardnessUnit::PpmCaCO3),
        "mmol/l" | "mmol" => Ok(HardnessUnit::MillimolePerLiter),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_flow_by_name() {
        let v = convert_named("flow", 1.5, "m3/h", "L/h").expect("flow");
        assert!((v - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_unknown_unit() {
        let err = convert(QuantityKind::Hardness, 1.0, "grain", "fH").unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit(u) if u == "grain"));
    }

    #[test]
    fn rejects_unknown_quantity() {
        assert!(matches!(
            convert_named("pressure", 1.0, "bar", "psi"),
            Err(ConversionError::UnsupportedQuantity(_))
        ));
    }
}
