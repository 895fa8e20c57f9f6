use crate::{
    classifier::classify,
    model_service::InferenceError,
    preprocess::{self, DecodeError},
    record::PredictionRecord,
    server::SharedState,
    store::PersistenceError,
};
use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

const UPLOAD_FIELD: &str = "image";

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("upload rejected: {0}")]
    InvalidUpload(String),
    #[error("image decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),
    #[error("persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
}

#[derive(Serialize)]
struct SuccessResponse {
    status: &'static str,
    message: &'static str,
    data: PredictionRecord,
}

#[derive(Serialize)]
struct FailResponse {
    status: &'static str,
    message: &'static str,
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let message = match &self {
            PredictError::InvalidUpload(reason) => {
                tracing::debug!("Rejected upload: {}", reason);
                "File must be an image."
            }
            // Downstream faults collapse to one generic client response;
            // the detail stays in the server logs.
            other => {
                tracing::error!("Prediction request failed: {}", other);
                "An error occurred while predicting."
            }
        };

        (
            StatusCode::BAD_REQUEST,
            Json(FailResponse {
                status: "fail",
                message,
            }),
        )
            .into_response()
    }
}

#[instrument(skip(state, multipart))]
pub async fn predict(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Response, PredictError> {
    let image_data = extract_image_field(multipart).await?;

    let tensor = preprocess::image_to_tensor(&image_data)?;
    let score = state.model.predict(&tensor)?;
    let record = PredictionRecord::new(classify(score));

    state.store.save(&record).await?;

    let response = Json(SuccessResponse {
        status: "success",
        message: "Model is predicted successfully",
        data: record,
    });

    Ok((StatusCode::OK, response).into_response())
}

async fn extract_image_field(mut multipart: Multipart) -> Result<Bytes, PredictError> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| PredictError::InvalidUpload(e.to_string()))?;

        let Some(field) = field else {
            return Err(PredictError::InvalidUpload(format!(
                "no `{}` field in the form",
                UPLOAD_FIELD
            )));
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let is_image = field
            .content_type()
            .is_some_and(|ct| ct.starts_with("image"));
        if !is_image {
            return Err(PredictError::InvalidUpload(format!(
                "content type {:?} is not an image",
                field.content_type()
            )));
        }

        return field
            .bytes()
            .await
            .map_err(|e| PredictError::InvalidUpload(e.to_string()));
    }
}
