//! Core planning logic: simulation, comparison, reference data and export

pub mod compare;
pub mod config;
pub mod error;
pub mod export;
pub mod funds;
pub mod log;
pub mod simulation;

// Re-export main types for cleaner imports
pub use compare::{RateComparison, compare};
pub use error::PlanError;
pub use funds::{FundDataProvider, FundPerformance};
pub use simulation::{
    ContributionTiming, MonthlyRecord, Simulation, SimulationRequest, YearlyRecord, simulate,
};
