pub mod plan;
pub mod scheduler;

pub use plan::{SweepPlan, SweepWindow};
pub use scheduler::{Sweeper, SweeperConfig};
