pub mod adaptive;
pub mod fixed;
pub mod quality;

pub use adaptive::{adaptive_step, AdaptiveRun, AdaptiveSettings, AdaptiveStats};
pub use fixed::fixed_step;
pub use quality::quality;

use crate::ode::{Model, Real, State};
use crate::Error;

fn check_model<M: Model>(model: &M, initial: &State<M::S>) -> Result<(), Error> {
  if model.dimension() == 0 {
    return Err(Error::EmptyModel);
  }

  if model.dimension() != initial.len() {
    return Err(Error::DimensionMismatch {
      state: initial.len(),
      model: model.dimension(),
    });
  }

  Ok(())
}

// false for NaN
fn is_positive<S: Real>(value: S) -> bool {
  value > S::zero()
}
