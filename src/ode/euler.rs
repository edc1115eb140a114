use crate::ode::{Integrator, Model, NullSettings, State};

pub type EulerSettings = NullSettings;

pub struct Euler;

impl<M: Model> Integrator<M> for Euler {
  type Settings = EulerSettings;

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
    let mut dxdt = model.eval(state, time);

    for dxdt in dxdt.iter_mut() {
      *dxdt *= time_step;
    }

    dxdt
  }
}

#[cfg(test)]
use crate::ode::System;

#[test]
fn single_increment() {
  let system = System::new()
    .with(|x: &[f64], _| x[1])
    .with(|x: &[f64], _| -x[0] - x[1]);

  let state = State::from_vec(vec![-0.5, 0.0]);
  let increment = Euler.increment(&system, &state, 0.0, 0.25);

  assert_eq!(increment, State::from_vec(vec![0.0, 0.125]));
  // input untouched
  assert_eq!(state, State::from_vec(vec![-0.5, 0.0]));
}

#[test]
fn step_advances_time() {
  let system = System::new().with(|_: &[f64], t| 2.0 * t);

  let mut state = State::from_vec(vec![1.0]);
  let mut time = 1.0;
  Euler.step(&system, &mut state, &mut time, 0.5);

  assert_eq!(state[0], 2.0);
  assert_eq!(time, 1.5);
}
