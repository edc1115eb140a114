use crate::driver::{check_model, is_positive, quality};
use crate::ode::{Integrator, Model, Real, State};
use crate::{Error, Trajectory};

/// Step size control for [`adaptive_step`].
#[derive(Clone, Debug, PartialEq)]
pub struct AdaptiveSettings<S: Real> {
  /// Below this the current attempt is accepted whatever its quality.
  pub min_step: S,
  /// Quality above which the step is halved and retried.
  pub shrink_threshold: S,
  /// Quality below which the step is doubled for the next point.
  pub grow_threshold: S,
  /// Attempts per point before the last one is taken as is.
  pub max_attempts: usize,
}

impl<S: Real> AdaptiveSettings<S> {
  pub fn new(min_step: S) -> Self {
    let (shrink, grow, per_mille): (S, S, S) =
      (5.0f32.into(), 0.5f32.into(), 1000.0f32.into());

    Self {
      min_step,
      shrink_threshold: shrink / per_mille,
      grow_threshold: grow / per_mille,
      max_attempts: 5,
    }
  }

  fn validate(&self) -> Result<(), Error> {
    if !is_positive(self.min_step) {
      return Err(Error::InvalidMinStep);
    }

    // also rejects NaN thresholds
    if !(self.grow_threshold < self.shrink_threshold) {
      return Err(Error::EmptyDeadBand);
    }

    if self.max_attempts == 0 {
      return Err(Error::NoAttempts);
    }

    Ok(())
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdaptiveStats {
  /// Recorded points.
  pub steps: usize,
  /// Full-step/half-step comparisons made.
  pub attempts: usize,
  pub shrinks: usize,
  pub grows: usize,
  /// Points accepted because the step fell below the minimum.
  pub floor_accepts: usize,
  /// Points accepted after running out of attempts.
  pub exhausted: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdaptiveRun<S: Real> {
  pub trajectory: Trajectory<S>,
  /// Step size staged for the point after the last one recorded.
  pub next_step: S,
  pub stats: AdaptiveStats,
}

enum Decision {
  Floor,
  Shrink,
  Grow,
  Keep,
}

fn decide<S: Real>(
  settings: &AdaptiveSettings<S>,
  time_step: S,
  quality: S,
) -> Decision {
  if time_step < settings.min_step {
    Decision::Floor
  } else if quality > settings.shrink_threshold {
    Decision::Shrink
  } else if quality < settings.grow_threshold {
    Decision::Grow
  } else {
    Decision::Keep
  }
}

/// Integrates from `t0` while `t <= tmax`, choosing each step by comparing
/// one step of size `h` against two of size `h / 2`.
///
/// Each point makes up to `max_attempts` attempts. An attempt whose quality
/// exceeds the shrink threshold halves `h` and retries; one below the grow
/// threshold is accepted and doubles `h` for the next point only. Steps are
/// never clamped from above, so the final step may overshoot `tmax`.
///
/// # Errors
///
/// Returns an error if `model` is empty, its dimension differs from
/// `initial`, `h0` is not positive, or `settings` is inconsistent.
pub fn adaptive_step<M, I>(
  integrator: &I,
  model: &M,
  initial: &State<M::S>,
  t0: M::S,
  tmax: M::S,
  h0: M::S,
  settings: &AdaptiveSettings<M::S>,
) -> Result<AdaptiveRun<M::S>, Error>
where
  M: Model,
  I: Integrator<M>,
{
  check_model(model, initial)?;
  if !is_positive(h0) {
    return Err(Error::InvalidStep);
  }
  settings.validate()?;

  let two: M::S = 2.0f32.into();

  let mut trajectory = Trajectory::new();
  let mut stats = AdaptiveStats::default();
  let mut state = initial.clone();
  let mut time = t0;
  let mut h = h0;

  while time <= tmax {
    let mut attempt = 0;

    let (used_step, increment) = loop {
      attempt += 1;
      stats.attempts += 1;

      let used_step = h;
      let increment = integrator.increment(model, &state, time, used_step);

      let mut full_estimate = state.clone();
      for (estimate, increment) in
        full_estimate.iter_mut().zip(increment.iter())
      {
        *estimate += *increment;
      }

      let half_step = used_step / two;
      let mut half_estimate = state.clone();
      let mut half_time = time;
      integrator.step(model, &mut half_estimate, &mut half_time, half_step);
      integrator.step(model, &mut half_estimate, &mut half_time, half_step);

      let q = quality(&full_estimate, &half_estimate, used_step);

      match decide(settings, used_step, q) {
        Decision::Floor => {
          stats.floor_accepts += 1;
          break (used_step, increment);
        }
        Decision::Shrink => {
          stats.shrinks += 1;
          h = used_step / two;
          if attempt == settings.max_attempts {
            stats.exhausted += 1;
            break (used_step, increment);
          }
        }
        Decision::Grow => {
          stats.grows += 1;
          h = used_step * two;
          break (used_step, increment);
        }
        Decision::Keep => break (used_step, increment),
      }
    };

    trajectory.append(time, &state, used_step, &increment);
    stats.steps += 1;

    time += used_step;
    for (state, increment) in state.iter_mut().zip(increment.iter()) {
      *state += *increment;
    }
  }

  Ok(AdaptiveRun {
    trajectory,
    next_step: h,
    stats,
  })
}

#[cfg(test)]
use crate::driver::fixed_step;
#[cfg(test)]
use crate::ode::{Euler, IntegratorType, SwappableIntegrator, System};
#[cfg(test)]
use crate::spring::Spring;
#[cfg(test)]
use proptest::prelude::*;
#[cfg(test)]
use proptest_derive::Arbitrary;

#[cfg(test)]
fn oscillator() -> (System<f64>, State<f64>) {
  (
    Spring::new(1.0, 1.0, 0.0).system(),
    State::from_vec(vec![-0.5, 0.0]),
  )
}

#[test]
fn shrinks_large_initial_step() {
  let (system, initial) = oscillator();
  let settings = AdaptiveSettings::new(1e-6);

  let run =
    adaptive_step(&Euler, &system, &initial, 0.0, 3.0, 1.0, &settings).unwrap();

  assert!(run.stats.shrinks >= 1);
  assert!(run.trajectory.records()[0].step < 1.0);
}

#[test]
fn floor_above_initial_step_accepts_first_attempt() {
  let (system, initial) = oscillator();
  let settings = AdaptiveSettings::new(0.5);

  let run = adaptive_step(&Euler, &system, &initial, 0.0, 3.0, 0.25, &settings)
    .unwrap();

  assert_eq!(run.stats.shrinks, 0);
  assert_eq!(run.stats.grows, 0);
  assert_eq!(run.stats.attempts, run.stats.steps);
  assert_eq!(run.stats.floor_accepts, run.stats.steps);
  assert_eq!(run.next_step, 0.25);

  // identical to the fixed-step run at the same step
  let fixed = fixed_step(&Euler, &system, &initial, 0.0, 3.0, 0.25).unwrap();
  assert_eq!(run.trajectory, fixed);
}

#[test]
fn growth_is_deferred_and_unbounded() {
  // Euler is exact for a constant slope, so every attempt grows
  let system = System::new().with(|_: &[f64], _| 1.0);
  let initial = State::from_vec(vec![0.0]);
  let settings = AdaptiveSettings::new(1e-3);

  let run =
    adaptive_step(&Euler, &system, &initial, 0.0, 2.0, 0.125, &settings)
      .unwrap();

  assert_eq!(
    run.trajectory.times().collect::<Vec<_>>(),
    vec![0.0, 0.125, 0.375, 0.875, 1.875]
  );
  assert_eq!(
    run
      .trajectory
      .iter()
      .map(|record| record.step)
      .collect::<Vec<_>>(),
    vec![0.125, 0.25, 0.5, 1.0, 2.0]
  );
  assert_eq!(run.stats.grows, 5);
  assert_eq!(run.next_step, 4.0);
  // the last step runs past tmax
  let last = run.trajectory.last().unwrap();
  assert!(last.time + last.step > 2.0 + 1.0);
}

#[test]
fn dead_band_keeps_step() {
  let (system, initial) = oscillator();
  let settings = AdaptiveSettings {
    min_step: 1e-6,
    shrink_threshold: 1.0,
    grow_threshold: -1.0,
    max_attempts: 5,
  };

  let run = adaptive_step(&Euler, &system, &initial, 0.0, 1.0, 0.1, &settings)
    .unwrap();

  assert_eq!(run.stats.shrinks, 0);
  assert_eq!(run.stats.grows, 0);
  assert_eq!(run.next_step, 0.1);
  assert!(run.trajectory.iter().all(|record| record.step == 0.1));
}

#[test]
fn exhausting_attempts_takes_last_attempt() {
  let (system, initial) = oscillator();
  let settings = AdaptiveSettings {
    min_step: 0.001,
    shrink_threshold: 1e-12,
    grow_threshold: 0.0,
    max_attempts: 5,
  };

  let run =
    adaptive_step(&Euler, &system, &initial, 0.0, 0.02, 0.25, &settings)
      .unwrap();

  let records = run.trajectory.records();
  // 0.25 halved by each of the first four attempts
  assert_eq!(records[0].step, 0.25 / 16.0);
  // the fifth halving carries over, then three more reach the floor
  assert_eq!(records[1].time, 0.25 / 16.0);
  assert_eq!(records[1].step, 0.25 / 256.0);
  assert_eq!(run.stats.exhausted, 1);
  assert_eq!(run.stats.shrinks, 8);
  assert_eq!(run.stats.floor_accepts, run.stats.steps - 1);
  assert!(run.trajectory.iter().skip(1).all(|r| r.step == 0.25 / 256.0));
}

#[test]
fn tmax_before_t0_is_empty() {
  let (system, initial) = oscillator();
  let settings = AdaptiveSettings::new(1e-3);

  let run = adaptive_step(&Euler, &system, &initial, 1.0, 0.5, 0.1, &settings)
    .unwrap();

  assert!(run.trajectory.is_empty());
  assert_eq!(run.stats, AdaptiveStats::default());
  assert_eq!(run.next_step, 0.1);
}

#[test]
fn rejects_inconsistent_settings() {
  let (system, initial) = oscillator();
  let run = |h0, settings: AdaptiveSettings<f64>| {
    adaptive_step(&Euler, &system, &initial, 0.0, 1.0, h0, &settings)
  };

  assert_eq!(
    run(0.1, AdaptiveSettings::new(0.0)).unwrap_err(),
    Error::InvalidMinStep
  );
  assert_eq!(
    run(-0.1, AdaptiveSettings::new(1e-3)).unwrap_err(),
    Error::InvalidStep
  );
  assert_eq!(
    run(
      0.1,
      AdaptiveSettings {
        grow_threshold: 0.005,
        ..AdaptiveSettings::new(1e-3)
      }
    )
    .unwrap_err(),
    Error::EmptyDeadBand
  );
  assert_eq!(
    run(
      0.1,
      AdaptiveSettings {
        max_attempts: 0,
        ..AdaptiveSettings::new(1e-3)
      }
    )
    .unwrap_err(),
    Error::NoAttempts
  );
}

#[cfg(test)]
#[derive(Debug, Arbitrary)]
enum IntegratorOption {
  Euler,
  Midpoint,
  RK4,
}

#[cfg(test)]
impl IntegratorOption {
  fn integrator(&self) -> SwappableIntegrator {
    SwappableIntegrator::new(match self {
      IntegratorOption::Euler => IntegratorType::Euler(Default::default()),
      IntegratorOption::Midpoint => {
        IntegratorType::Midpoint(Default::default())
      }
      IntegratorOption::RK4 => IntegratorType::RK4(Default::default()),
    })
  }
}

#[cfg(test)]
proptest! {
#[test]
fn records_advance_by_used_step(
  option: IntegratorOption,
  k in 0.1f64..10.0,
  m in 0.1f64..10.0,
  b in 0.0f64..2.0,
  x0 in -2.0f64..2.0,
  h0 in 0.01f64..1.0,
  min_step in 1e-4f64..1e-2,
) {
  let system = Spring::new(k, m, b).system();
  let initial = State::from_vec(vec![x0, 0.0]);
  let settings = AdaptiveSettings::new(min_step);

  let run = adaptive_step(
    &option.integrator(),
    &system,
    &initial,
    0.0,
    2.0,
    h0,
    &settings,
  ).unwrap();

  let records = run.trajectory.records();
  prop_assert!(!records.is_empty());
  prop_assert_eq!(records[0].time, 0.0);
  prop_assert!(run.trajectory.times().all(|time| time <= 2.0));
  for pair in records.windows(2) {
    prop_assert_eq!(pair[1].time, pair[0].time + pair[0].step);
  }
  prop_assert!(run.stats.attempts <= settings.max_attempts * run.stats.steps);
}
}
