pub mod chart;
pub mod compare;
pub mod export;
pub mod funds;
pub mod plan;
pub mod setup;
pub mod ui;
