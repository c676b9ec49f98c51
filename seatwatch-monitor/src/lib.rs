pub mod resiliency;
pub mod state;
pub mod worker;

pub use state::{Monitor, MonitorSettings};
pub use worker::CycleReport;
