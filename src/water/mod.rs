//! 급수 수요 집계와 배관 수두손실 계산 모듈 모음.
//! 점도표 → 수두손실, 피크계수 표 → 수요 집계 순으로 의존한다.

pub mod consumers;
pub mod data_checks;
pub mod demand;
pub mod head;
pub mod hydraulics;
pub mod peak_factor;
pub mod pipe_catalog;
pub mod viscosity;

pub use consumers::{ConsumerCategory, ConsumerGroup, SewerCategory, SupplySource};
pub use data_checks::{data_checks, DataCheck};
pub use demand::{aggregate, AggregateResult, DemandFactors};
pub use head::HeadRequirement;
pub use hydraulics::{solve, HydraulicInput, HydraulicResult, LocalLoss, PipeMaterial};
pub use peak_factor::{alpha, alpha_lookup, AlphaTable};
pub use viscosity::kinematic_viscosity_m2_s;
