pub mod config;
pub mod error;
pub mod types;

pub use config::RackPlan;
pub use error::{PlanError, PlanResult};
pub use types::*;
