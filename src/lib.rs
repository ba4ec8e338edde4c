//! 급수 수요 집계·피크계수·배관 수두손실 계산을 라이브러리로 분리하여
//! CLI 외의 보고서 도구에서도 같은 계산을 쓰도록 한다.

pub mod app;
pub mod config;
pub mod interp;
pub mod ui_cli;
pub mod water;
