use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::services::AuthFailure;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub match_percentage: f32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<&'static str>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn verify_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut audio: Option<Vec<u8>> = None;
    let mut username: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return bad_request(format!("failed to read multipart: {}", e));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => match field.bytes().await {
                Ok(data) => audio = Some(data.to_vec()),
                Err(e) => return bad_request(format!("failed to read audio: {}", e)),
            },
            "username" => username = field.text().await.ok().map(|t| t.trim().to_string()),
            _ => continue,
        }
    }

    let Some(audio) = audio else {
        return bad_request("no audio file provided".to_string());
    };
    let Some(username) = username else {
        return bad_request("missing required field: username".to_string());
    };

    tracing::debug!(username = %username, bytes = audio.len(), "Processing verification upload");

    match state.auth_service.verify(&username, &audio).await {
        Ok(outcome) => {
            let status = if outcome.success {
                StatusCode::OK
            } else {
                failure_status(outcome.failure.as_ref())
            };
            (
                status,
                Json(VerifyResponse {
                    success: outcome.success,
                    match_percentage: outcome.match_percentage,
                    message: outcome.reason,
                    failure: outcome.failure.as_ref().map(AuthFailure::kind),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Verification failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "verification failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn failure_status(failure: Option<&AuthFailure>) -> StatusCode {
    match failure {
        Some(AuthFailure::IdentityNotFound) => StatusCode::NOT_FOUND,
        Some(AuthFailure::InvalidAudioFormat { .. }) => StatusCode::BAD_REQUEST,
        _ => StatusCode::UNAUTHORIZED,
    }
}

fn bad_request(error: String) -> axum::response::Response {
    tracing::warn!(error = %error, "Rejected verification request");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}
