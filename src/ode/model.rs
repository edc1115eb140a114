use alga::general::RealField;
use nalgebra::DVector;

pub trait Real: RealField + From<f32> {}

impl<T: RealField + From<f32>> Real for T {}

// owned by the driver for the duration of a run
pub type State<S> = DVector<S>;

pub trait Model {
  type S: Real;

  fn dimension(&self) -> usize;

  /// Writes dx/dt at `(x, t)` into `dxdt`. Both slices have length
  /// `dimension()`.
  fn derivative(&self, x: &[Self::S], dxdt: &mut [Self::S], t: Self::S);

  fn eval(&self, x: &State<Self::S>, t: Self::S) -> State<Self::S> {
    let mut dxdt = State::zeros(x.len());
    self.derivative(x.as_slice(), dxdt.as_mut_slice(), t);
    dxdt
  }
}
