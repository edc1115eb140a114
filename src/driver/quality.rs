use crate::ode::{Real, State};

/// Largest per-component gap between a full-step and a two-half-step estimate,
/// divided by the step size.
pub fn quality<S: Real>(full: &State<S>, half: &State<S>, time_step: S) -> S {
  debug_assert_eq!(full.len(), half.len());

  let max_diff = full
    .iter()
    .zip(half.iter())
    .map(|(full, half)| (*full - *half).abs())
    .fold(S::zero(), |max, diff| if diff > max { diff } else { max });

  max_diff / time_step
}

#[cfg(test)]
use proptest::prelude::*;

#[test]
fn takes_max_over_all_components() {
  let full = State::from_vec(vec![1.0, 2.0, 3.0]);
  let half = State::from_vec(vec![1.0, 2.5, 2.75]);

  assert_eq!(quality(&full, &half, 0.5), 1.0);
  assert_eq!(quality(&full, &full, 0.5), 0.0);
}

#[test]
fn last_component_can_dominate() {
  let full = State::from_vec(vec![0.0, 0.0, -4.0]);
  let half = State::from_vec(vec![0.0, 0.0, 0.0]);

  assert_eq!(quality(&full, &half, 2.0), 2.0);
}

#[cfg(test)]
proptest! {
#[test]
fn symmetric(
  pairs in prop::collection::vec((-1e6f64..1e6, -1e6f64..1e6), 1..8),
  time_step in 1e-6f64..10.0,
) {
  let a = State::from_iterator(pairs.len(), pairs.iter().map(|p| p.0));
  let b = State::from_iterator(pairs.len(), pairs.iter().map(|p| p.1));

  prop_assert_eq!(quality(&a, &b, time_step), quality(&b, &a, time_step));
  prop_assert!(quality(&a, &b, time_step) >= 0.0);
}
}
