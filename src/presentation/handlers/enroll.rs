use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use crate::application::services::AuthFailure;
use crate::domain::UserProfile;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct EnrollResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<&'static str>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn enroll_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut audio: Option<Vec<u8>> = None;
    let mut username: Option<String> = None;
    let mut full_name: Option<String> = None;
    let mut email: Option<String> = None;
    let mut date_of_birth: Option<String> = None;

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
            "username" => username = read_text_field(field).await,
            "fullname" => full_name = read_text_field(field).await,
            "email" => email = read_text_field(field).await,
            "dob" => date_of_birth = read_text_field(field).await,
            _ => continue,
        }
    }

    let Some(audio) = audio else {
        return bad_request("no audio file provided".to_string());
    };
    let Some(username) = username else {
        return bad_request("missing required field: username".to_string());
    };
    let Some(full_name) = full_name else {
        return bad_request("missing required field: fullname".to_string());
    };
    let Some(email) = email else {
        return bad_request("missing required field: email".to_string());
    };
    let Some(date_of_birth) = date_of_birth else {
        return bad_request("missing required field: dob".to_string());
    };

    let date_of_birth = match NaiveDate::parse_from_str(&date_of_birth, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => return bad_request("invalid date of birth, expected YYYY-MM-DD".to_string()),
    };

    let profile = UserProfile {
        full_name,
        email,
        date_of_birth,
    };

    tracing::debug!(username = %username, bytes = audio.len(), "Processing enrollment upload");

    match state.auth_service.enroll(&username, profile, &audio).await {
        Ok(outcome) if outcome.success => (
            StatusCode::OK,
            Json(EnrollResponse {
                success: true,
                passphrase: outcome.passphrase,
                message: outcome.reason,
                failure: None,
            }),
        )
            .into_response(),
        Ok(outcome) => {
            let status = match &outcome.failure {
                Some(AuthFailure::DuplicateIdentity) => StatusCode::CONFLICT,
                _ => StatusCode::BAD_REQUEST,
            };
            (
                status,
                Json(EnrollResponse {
                    success: false,
                    passphrase: None,
                    message: outcome.reason,
                    failure: outcome.failure.as_ref().map(AuthFailure::kind),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Enrollment failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "enrollment failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Option<String> {
    field.text().await.ok().map(|t| t.trim().to_string())
}

fn bad_request(error: String) -> axum::response::Response {
    tracing::warn!(error = %error, "Rejected enrollment request");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}
