//! 수처리 장비 선정 및 수리/경제성 계산 엔진.
//! 온도 보정 → 블렌딩 → RO 선정 → 전처리 선정 → 경제성/수리 계산 순으로 진행한다.

pub mod blending;
pub mod economics;
pub mod engine;
pub mod hydraulics;
pub mod pretreatment;
pub mod ro_selection;
pub mod softener;
pub mod temperature;

pub use blending::*;
pub use engine::*;
pub use ro_selection::*;
