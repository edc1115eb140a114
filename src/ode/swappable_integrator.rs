use crate::ode::{
  Euler, EulerSettings, Integrator, Midpoint, MidpointSettings, Model, State,
  RK4Settings, RK4,
};
use clap::Subcommand;

#[derive(Subcommand, Clone, Debug, PartialEq)]
pub enum IntegratorType {
  /// Explicit Euler (first order)
  Euler(EulerSettings),
  /// Explicit midpoint (second order)
  Midpoint(MidpointSettings),
  /// Classical Runge-Kutta (fourth order)
  #[command(name = "rk4")]
  RK4(RK4Settings),
}

pub enum SwappableIntegrator {
  Euler(Euler),
  Midpoint(Midpoint),
  RK4(RK4),
}

impl SwappableIntegrator {
  pub fn new(t: IntegratorType) -> Self {
    match t {
      IntegratorType::Euler(_) => Self::Euler(Euler),
      IntegratorType::Midpoint(_) => Self::Midpoint(Midpoint),
      IntegratorType::RK4(_) => Self::RK4(RK4),
    }
  }
}

impl<M: Model> Integrator<M> for SwappableIntegrator {
  type Settings = IntegratorType;

  fn new(t: IntegratorType) -> Self {
    Self::new(t)
  }

  fn increment(
    &self,
    model: &M,
    state: &State<M::S>,
    time: M::S,
    time_step: M::S,
  ) -> State<M::S> {
    match self {
      Self::Euler(method) => method.increment(model, state, time, time_step),
      Self::Midpoint(method) => {
        method.increment(model, state, time, time_step)
      }
      Self::RK4(method) => method.increment(model, state, time, time_step),
    }
  }
}

#[cfg(test)]
use crate::ode::System;

#[test]
fn dispatches_to_selected_method() {
  let system = System::new().with(|x: &[f64], _| x[0]);
  let state = State::from_vec(vec![1.0]);

  for (integrator_type, expected) in [
    (IntegratorType::Euler(EulerSettings {}), 0.5),
    (IntegratorType::Midpoint(MidpointSettings {}), 0.625),
    (
      IntegratorType::RK4(RK4Settings {}),
      0.5 * (1.0 + 0.25 + 0.5 * 0.5 / 6.0 + 0.5 * 0.5 * 0.5 / 24.0),
    ),
  ]
  .iter()
  {
    let integrator = SwappableIntegrator::new(integrator_type.clone());
    let increment = integrator.increment(&system, &state, 0.0, 0.5);

    assert!((increment[0] - expected).abs() < 1e-12);
  }
}
