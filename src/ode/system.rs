use crate::ode::{Model, Real};

/// One component of dx/dt, evaluated at `(state, time)`.
pub type DerivativeFunction<S> = Box<dyn Fn(&[S], S) -> S>;

/// An ordered list of derivative functions, one per state dimension. Entry `i`
/// computes d(state[i])/dt.
pub struct System<S: Real> {
  derivatives: Vec<DerivativeFunction<S>>,
}

impl<S: Real> System<S> {
  pub fn new() -> Self {
    Self {
      derivatives: Vec::new(),
    }
  }

  pub fn with<F>(mut self, f: F) -> Self
  where
    F: Fn(&[S], S) -> S + 'static,
  {
    self.push(f);
    self
  }

  pub fn push<F>(&mut self, f: F)
  where
    F: Fn(&[S], S) -> S + 'static,
  {
    self.derivatives.push(Box::new(f));
  }

  pub fn len(&self) -> usize {
    self.derivatives.len()
  }

  pub fn is_empty(&self) -> bool {
    self.derivatives.is_empty()
  }
}

impl<S: Real> Default for System<S> {
  fn default() -> Self {
    Self::new()
  }
}

impl<S: Real> Model for System<S> {
  type S = S;

  fn dimension(&self) -> usize {
    self.derivatives.len()
  }

  fn derivative(&self, x: &[S], dxdt: &mut [S], t: S) {
    debug_assert_eq!(x.len(), self.derivatives.len());

    for (dxdt, f) in dxdt.iter_mut().zip(&self.derivatives) {
      *dxdt = f(x, t);
    }
  }
}

#[cfg(test)]
use crate::ode::State;

#[test]
fn evaluates_in_order() {
  let system = System::new()
    .with(|x: &[f64], _| x[1])
    .with(|x: &[f64], t| -x[0] + t);

  assert_eq!(system.dimension(), 2);

  let dxdt = system.eval(&State::from_vec(vec![3.0, 4.0]), 10.0);

  assert_eq!(dxdt, State::from_vec(vec![4.0, 7.0]));
}

#[test]
fn empty_system() {
  let system: System<f64> = System::default();

  assert!(system.is_empty());
  assert_eq!(system.dimension(), 0);
}
