use crate::ode::{Real, State};
use std::slice::Iter;

/// A recorded point of an integration run.
#[derive(Clone, Debug, PartialEq)]
pub struct Record<S: Real> {
  pub time: S,
  /// Step size used to leave this point.
  pub step: S,
  /// Copy of the state at `time`, independent of the driver's live state.
  pub state: State<S>,
  /// Slope applied over the step, `increment / step`.
  pub rate: State<S>,
}

/// Append-only sequence of records in increasing time order.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory<S: Real> {
  records: Vec<Record<S>>,
}

impl<S: Real> Trajectory<S> {
  pub fn new() -> Self {
    Self {
      records: Vec::new(),
    }
  }

  pub fn append(
    &mut self,
    time: S,
    state: &State<S>,
    step: S,
    increment: &State<S>,
  ) {
    debug_assert_eq!(state.len(), increment.len());
    debug_assert!(self.records.last().map_or(true, |last| last.time < time));

    self.records.push(Record {
      time,
      step,
      state: state.clone(),
      rate: State::from_iterator(
        increment.len(),
        increment.iter().map(|increment| *increment / step),
      ),
    });
  }

  pub fn records(&self) -> &[Record<S>] {
    &self.records
  }

  pub fn into_records(self) -> Vec<Record<S>> {
    self.records
  }

  pub fn iter(&self) -> Iter<'_, Record<S>> {
    self.records.iter()
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn last(&self) -> Option<&Record<S>> {
    self.records.last()
  }

  pub fn times(&self) -> impl Iterator<Item = S> + '_ {
    self.records.iter().map(|record| record.time)
  }
}

impl<S: Real> Default for Trajectory<S> {
  fn default() -> Self {
    Self::new()
  }
}

impl<'a, S: Real> IntoIterator for &'a Trajectory<S> {
  type Item = &'a Record<S>;

  type IntoIter = Iter<'a, Record<S>>;

  fn into_iter(self) -> Self::IntoIter {
    self.records.iter()
  }
}

#[test]
fn snapshot_is_independent_of_live_state() {
  let mut trajectory = Trajectory::new();
  let mut state = State::from_vec(vec![1.0, 2.0]);
  let increment = State::from_vec(vec![0.5, -0.5]);

  trajectory.append(0.0, &state, 0.5, &increment);
  state[0] = 100.0;
  trajectory.append(0.5, &state, 0.5, &increment);

  assert_eq!(trajectory.len(), 2);
  assert_eq!(trajectory.records()[0].state, State::from_vec(vec![1.0, 2.0]));
  assert_eq!(trajectory.records()[1].state[0], 100.0);
  assert_eq!(trajectory.records()[0].rate, State::from_vec(vec![1.0, -1.0]));
}

#[test]
fn keeps_insertion_order() {
  let mut trajectory = Trajectory::new();
  let state = State::from_vec(vec![0.0]);

  for time in &[0.0, 0.25, 1.0, 4.0] {
    trajectory.append(*time, &state, 1.0, &state);
  }

  assert_eq!(trajectory.times().collect::<Vec<_>>(), vec![0.0, 0.25, 1.0, 4.0]);
  assert_eq!(trajectory.last().map(|record| record.time), Some(4.0));
  assert_eq!((&trajectory).into_iter().count(), 4);
}
