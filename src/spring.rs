use crate::ode::{Real, System};

/// Mass-spring-damper, `m x'' + b x' + k x = 0`, as the state `[x, v]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring<S: Real> {
  pub k: S,
  pub m: S,
  pub b: S,
}

impl<S: Real> Spring<S> {
  pub fn new(k: S, m: S, b: S) -> Self {
    Self { k, m, b }
  }

  pub fn system(&self) -> System<S> {
    let Self { k, m, b } = *self;

    System::new()
      .with(|x: &[S], _| x[1])
      .with(move |x: &[S], _| -k * x[0] / m - b * x[1] / m)
  }
}

#[test]
fn derivatives_at_rest_offset() {
  use crate::ode::{Model, State};

  let system = Spring::new(1.0, 1.0, 1.0).system();
  let dxdt = system.eval(&State::from_vec(vec![-0.5, 0.0]), 0.0);

  assert_eq!(dxdt, State::from_vec(vec![0.0, 0.5]));
}

#[test]
fn damping_opposes_velocity() {
  use crate::ode::{Model, State};

  let system = Spring::new(0.0, 2.0, 4.0).system();
  let dxdt = system.eval(&State::from_vec(vec![0.0, 1.0]), 0.0);

  assert_eq!(dxdt[1], -2.0);
}
