use crate::driver::{check_model, is_positive};
use crate::ode::{Integrator, Model, State};
use crate::{Error, Trajectory};

/// Integrates from `t0` while `t <= tmax` with a constant step, recording each
/// point before stepping away from it.
///
/// # Errors
///
/// Returns an error if `model` is empty, its dimension differs from
/// `initial`, or `time_step` is not positive.
pub fn fixed_step<M, I>(
  integrator: &I,
  model: &M,
  initial: &State<M::S>,
  t0: M::S,
  tmax: M::S,
  time_step: M::S,
) -> Result<Trajectory<M::S>, Error>
where
  M: Model,
  I: Integrator<M>,
{
  check_model(model, initial)?;
  if !is_positive(time_step) {
    return Err(Error::InvalidStep);
  }

  let mut trajectory = Trajectory::new();
  let mut state = initial.clone();
  let mut time = t0;

  while time <= tmax {
    let increment = integrator.increment(model, &state, time, time_step);

    trajectory.append(time, &state, time_step, &increment);

    for (state, increment) in state.iter_mut().zip(increment.iter()) {
      *state += *increment;
    }

    time += time_step;
  }

  Ok(trajectory)
}

#[cfg(test)]
use crate::ode::{Euler, Midpoint, System, RK4};
#[cfg(test)]
use crate::spring::Spring;

#[test]
fn euler_record_count_and_times() {
  let system = Spring::new(1.0, 1.0, 1.0).system();
  let initial = State::from_vec(vec![-0.5, 0.0]);

  let trajectory =
    fixed_step(&Euler, &system, &initial, 0.0, 3.0, 0.25).unwrap();

  assert_eq!(trajectory.len(), 13);
  for (i, time) in trajectory.times().enumerate() {
    assert_eq!(time, 0.25 * i as f64);
  }
}

#[test]
fn euler_matches_closed_form_update() {
  let (k, m, b) = (1.0, 1.0, 1.0);
  let h = 0.25;
  let system = Spring::new(k, m, b).system();
  let initial = State::from_vec(vec![-0.5, 0.0]);

  let trajectory = fixed_step(&Euler, &system, &initial, 0.0, 3.0, h).unwrap();

  let (mut x, mut v): (f64, f64) = (-0.5, 0.0);
  for record in &trajectory {
    assert_eq!(record.state[0], x);
    assert_eq!(record.state[1], v);

    let (dx, dv) = (h * v, h * (-k * x / m - b * v / m));
    x += dx;
    v += dv;
  }
}

#[test]
fn first_row_rates() {
  let system = Spring::new(1.0, 1.0, 1.0).system();
  let initial = State::from_vec(vec![-0.5, 0.0]);

  let trajectory =
    fixed_step(&Euler, &system, &initial, 0.0, 3.0, 0.25).unwrap();

  let first = &trajectory.records()[0];
  assert_eq!(first.rate[0], 0.0);
  assert_eq!(first.rate[1], 0.5);
  assert_eq!(first.step, 0.25);
}

#[test]
fn deterministic_across_runs() {
  let system = Spring::new(2.0, 0.5, 0.1).system();
  let initial = State::from_vec(vec![1.0, -0.25]);

  let first = fixed_step(&RK4, &system, &initial, 0.0, 5.0, 0.1).unwrap();
  let second = fixed_step(&RK4, &system, &initial, 0.0, 5.0, 0.1).unwrap();

  assert_eq!(first, second);
}

#[test]
fn tmax_before_t0_is_empty() {
  let system = Spring::new(1.0, 1.0, 1.0).system();
  let initial = State::from_vec(vec![-0.5, 0.0]);

  let trajectory =
    fixed_step(&Midpoint, &system, &initial, 1.0, 0.0, 0.25).unwrap();

  assert!(trajectory.is_empty());
}

#[test]
fn rejects_contract_violations() {
  let system = Spring::new(1.0, 1.0, 1.0).system();
  let initial = State::from_vec(vec![-0.5, 0.0]);

  assert_eq!(
    fixed_step(&Euler, &system, &initial, 0.0, 1.0, 0.0),
    Err(Error::InvalidStep)
  );
  assert_eq!(
    fixed_step(&Euler, &system, &initial, 0.0, 1.0, std::f64::NAN),
    Err(Error::InvalidStep)
  );
  assert_eq!(
    fixed_step(&Euler, &system, &State::from_vec(vec![0.0]), 0.0, 1.0, 0.1),
    Err(Error::DimensionMismatch { state: 1, model: 2 })
  );
  assert_eq!(
    fixed_step(&Euler, &System::new(), &State::zeros(0), 0.0, 1.0, 0.1),
    Err(Error::EmptyModel)
  );
}

#[cfg(test)]
fn energy_drift<I: Integrator<System<f64>>>(integrator: &I) -> f64 {
  // k = m = 1, b = 0
  let system = Spring::new(1.0, 1.0, 0.0).system();
  let initial = State::from_vec(vec![1.0, 0.0]);

  let trajectory =
    fixed_step(integrator, &system, &initial, 0.0, 5.0, 0.01).unwrap();

  trajectory
    .iter()
    .map(|record| {
      let energy = record.state[0].powi(2) + record.state[1].powi(2);
      (energy - 1.0).abs()
    })
    .fold(0.0, f64::max)
}

#[test]
fn energy_drift_follows_method_order() {
  let euler = energy_drift(&Euler);
  let midpoint = energy_drift(&Midpoint);
  let rk4 = energy_drift(&RK4);

  assert!(euler < 0.1);
  assert!(rk4 < 1e-6);
  assert!(rk4 < midpoint);
  assert!(midpoint < euler);
}
