use crate::ode::{Integrator, Model, NullSettings, State};

pub type MidpointSettings = NullSettings;

pub struct Midpoint;

impl<M: Model> Integrator<M> for Midpoint {
  type Settings = MidpointSettings;

  fn new(_: Self::Settings) -> Self {
    Self
  }

  fn increment(
    &self,
    model: &M,
    state: &State<M::S>,
    time: M::S,
    time_step: M::S,
  ) -> State<M::S> {
    let dxdt = model.eval(state, time);

    let two: M::S = 2.0f32.into();
    let half_time_step = time_step / two;

    let mut midpoint_state = state.clone();
    for (midpoint_state, dxdt) in midpoint_state.iter_mut().zip(dxdt.iter()) {
      *midpoint_state += *dxdt * half_time_step
    }

    let midpoint_time = time + half_time_step;

    let mut dxdt = model.eval(&midpoint_state, midpoint_time);

    for dxdt in dxdt.iter_mut() {
      *dxdt *= time_step;
    }

    dxdt
  }
}

#[cfg(test)]
use crate::ode::System;

#[test]
fn exact_for_linear_in_time() {
  // dx/dt = t integrates exactly with a midpoint rule
  let system = System::new().with(|_: &[f64], t| t);

  let state = State::from_vec(vec![0.0]);
  let increment = Midpoint.increment(&system, &state, 1.0, 0.5);

  // x(1.5) - x(1) = (1.5^2 - 1^2) / 2
  assert_eq!(increment[0], 0.625);
}

#[test]
fn uses_midpoint_state() {
  let system = System::new().with(|x: &[f64], _| x[0]);

  let state = State::from_vec(vec![1.0]);
  let increment = Midpoint.increment(&system, &state, 0.0, 0.5);

  // h * (x + h/2 * x)
  assert_eq!(increment[0], 0.5 * 1.25);
  assert_eq!(state[0], 1.0);
}
