use crate::ode::{Model, State};

pub trait Integrator<M: Model> {
  type Settings: Clone;

  fn new(settings: Self::Settings) -> Self;

  /// Returns the change in `state` over one step of size `time_step`
  /// starting at `time`. `state` is left untouched.
  fn increment(
    &self,
    model: &M,
    state: &State<M::S>,
    time: M::S,
    time_step: M::S,
  ) -> State<M::S>;

  fn step(
    &self,
    model: &M,
    state: &mut State<M::S>,
    time: &mut M::S,
    time_step: M::S,
  ) {
    let increment = self.increment(model, state, *time, time_step);

    for (state, increment) in state.iter_mut().zip(increment.iter()) {
      *state += *increment;
    }

    *time += time_step;
  }
}
