use thiserror::Error;

/// Contract violations rejected at driver entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("model has no derivative functions")]
  EmptyModel,

  #[error("state has {state} components but model has {model} derivatives")]
  DimensionMismatch { state: usize, model: usize },

  #[error("step size must be positive")]
  InvalidStep,

  #[error("minimum step size must be positive")]
  InvalidMinStep,

  #[error("grow threshold must be below shrink threshold")]
  EmptyDeadBand,

  #[error("at least one attempt per step is required")]
  NoAttempts,
}
