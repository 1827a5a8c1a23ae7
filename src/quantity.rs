/// 변환기에서 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Volume,
    FlowRate,
    Temperature,
    Hardness,
}

impl QuantityKind {
    /// CLI 인자(`volume`, `flow`, `temperature`, `hardness`)를 해석한다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "volume" | "vol" => Some(QuantityKind::Volume),
            "flow" | "flow_rate" | "flowrate" => Some(QuantityKind::FlowRate),
            "temperature" | "temp" => Some(QuantityKind::Temperature),
            "hardness" => Some(QuantityKind::Hardness),
            _ => None,
        }
    }
}
