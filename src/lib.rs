pub mod display;
pub mod driver;
pub mod error;
pub mod ode;
pub mod spring;
pub mod trajectory;
pub mod utils;

pub use display::display_trajectory;
pub use driver::{
  adaptive_step, fixed_step, AdaptiveRun, AdaptiveSettings, AdaptiveStats,
};
pub use error::Error;
pub use spring::Spring;
pub use trajectory::{Record, Trajectory};
