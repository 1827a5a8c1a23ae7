//! 수처리 계산에 쓰이는 단위 정의 및 변환 모듈 모음.

pub mod flow_rate;
pub mod hardness;
pub mod temperature;
pub mod volume;

pub use flow_rate::{convert_flow_rate, FlowRateUnit};
pub use hardness::{convert_hardness, HardnessUnit};
pub use temperature::{convert_temperature, TemperatureUnit};
pub use volume::{convert_volume, VolumeUnit};
