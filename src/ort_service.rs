use crate::model_service::{InferenceError, ModelService};
use ndarray::{Array, Ix4};
use ort::{
    session::{builder::GraphOptimizationLevel, Session},
    value::TensorRef,
};
use std::sync::Mutex;

/// ONNX-backed model built from the artifact bytes downloaded at startup.
pub struct OrtModelService {
    session: Mutex<Session>,
    output_name: String,
}

impl OrtModelService {
    pub fn from_bytes(model_data: &[u8]) -> Result<Self, ort::Error> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_memory(model_data)?;

        let output_name = session.outputs[0].name.clone();
        tracing::info!("Created ONNX session, output `{}`", output_name);

        Ok(Self {
            session: Mutex::new(session),
            output_name,
        })
    }
}

impl ModelService for OrtModelService {
    fn predict(&self, input: &Array<f32, Ix4>) -> Result<f32, InferenceError> {
        let mut session = self
            .session
            .lock()
            .map_err(|e| InferenceError::SessionPoisoned(e.to_string()))?;

        let tensor_ref = TensorRef::from_array_view(input.view())
            .map_err(|e| InferenceError::RunFailed(e.to_string()))?;

        let outputs = session
            .run(ort::inputs![tensor_ref])
            .map_err(|e| InferenceError::RunFailed(e.to_string()))?;

        let (_, data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::RunFailed(e.to_string()))?;

        let score = *data.first().ok_or(InferenceError::EmptyOutput)?;
        tracing::debug!("Model score: {:.4}", score);

        Ok(score)
    }
}
