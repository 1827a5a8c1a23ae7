//! 수처리(역삼투) 장비 사이징 계산을 라이브러리로 분리하여 CLI 뿐 아니라 추후 다른 화면에서도 재사용한다.

pub mod app;
pub mod catalog;
pub mod config;
pub mod conversion;
pub mod i18n;
pub mod quantity;
pub mod report;
pub mod treatment;
pub mod ui_cli;
pub mod units;
