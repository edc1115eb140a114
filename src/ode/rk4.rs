use crate::ode::{Integrator, Model, NullSettings, State};

pub type RK4Settings = NullSettings;

pub struct RK4;

impl<M: Model> Integrator<M> for RK4 {
  type Settings = RK4Settings;

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
    let two: M::S = 2.0f32.into();
    let six: M::S = 6.0f32.into();

    // k[i] already scaled by the time step
    let mut k: Vec<State<M::S>> = Vec::with_capacity(4);

    let mut intermediate_state = state.clone();
    let mut last_multiplier: M::S = 0.0f32.into();
    for multiplier in [Some(0.5f32), Some(0.5), Some(1.0), None].iter() {
      let mut k_val = model
        .eval(&intermediate_state, time + last_multiplier * time_step);

      for k_val in k_val.iter_mut() {
        *k_val *= time_step;
      }

      if let Some(multiplier) = multiplier.map(<M::S as From<f32>>::from) {
        for ((next_state, state), k_val) in intermediate_state
          .iter_mut()
          .zip(state.iter())
          .zip(k_val.iter())
        {
          *next_state = *state + multiplier * *k_val;
        }
        last_multiplier = multiplier;
      }

      k.push(k_val);
    }

    State::from_iterator(
      state.len(),
      k[0]
        .iter()
        .zip(k[1].iter())
        .zip(k[2].iter())
        .zip(k[3].iter())
        .map(|(((k_0, k_1), k_2), k_3)| {
          (*k_0 + two * *k_1 + two * *k_2 + *k_3) / six
        }),
    )
  }
}

#[cfg(test)]
use crate::assert_float_eq;
#[cfg(test)]
use crate::ode::System;

#[test]
fn exact_for_cubic_in_time() {
  let system = System::new().with(|_: &[f64], t| 3.0 * t * t);

  let state = State::from_vec(vec![0.0]);
  let increment = RK4.increment(&system, &state, 1.0, 1.0);

  // 2^3 - 1^3
  assert_float_eq!(increment[0], 7.0);
}

#[test]
fn exponential_growth() {
  let system = System::new().with(|x: &[f64], _| x[0]);

  let state = State::from_vec(vec![1.0]);
  let increment = RK4.increment(&system, &state, 0.0, 0.1);

  assert_float_eq!(increment[0], 0.1f64.exp() - 1.0);
  assert_eq!(state[0], 1.0);
}
