use ndarray::{Array, Ix4};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("session mutex poisoned: {0}")]
    SessionPoisoned(String),
    #[error("inference failed: {0}")]
    RunFailed(String),
    #[error("model output is not a scalar score")]
    EmptyOutput,
}

/// Seam between the request pipeline and the inference runtime, so the
/// HTTP layer can be exercised with a stub model.
pub trait ModelService: Send + Sync + 'static {
    /// Scores one preprocessed (1, 224, 224, 3) tensor, returning the
    /// model's sigmoid output in [0, 1].
    fn predict(&self, input: &Array<f32, Ix4>) -> Result<f32, InferenceError>;
}
