//! HTTP handlers for the form endpoints.
//!
//! Every response is the `{success, message?}` envelope the frontend
//! expects. Validation failures answer 400 with the exact user-facing
//! message; sink failures answer 500 with a generic one and keep the
//! upstream detail in the logs.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::contact::{self, ContactPayload, MailPayload, Screening};
use crate::server::AppState;
use crate::{mailer, store};

/// Response envelope shared by the form endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Liveness probe. Lives under `/api` so the locale middleware skips it.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /api/contact`: screen a phone submission and write it to the
/// document store.
pub async fn contact_handler(
    State(state): State<AppState>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Ok(Json(payload)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failure("Invalid JSON body")),
        );
    };

    let record = match contact::screen_contact(&payload) {
        Ok(Screening::Accepted(record)) => record,
        Ok(Screening::BotLike) => {
            // On the wire a bot sees exactly what a human sees.
            debug!("Honeypot tripped on /api/contact; dropping submission");
            return (StatusCode::OK, Json(ApiResponse::ok()));
        }
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::failure(e.to_string())),
            )
        }
    };

    let Some(settings) = store::settings(&state.config) else {
        let missing = store::missing_settings(&state.config);
        error!(
            "Contact store is not configured; missing: {}",
            missing.join(", ")
        );
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::failure(format!(
                "Contact form is not configured on the server. Missing: {}",
                missing.join(", ")
            ))),
        );
    };

    let id = store::submission_id();
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let document = store::contact_document(&record, &created_at);

    match store::write(&settings, &state.config.contact_collection, &id, &document).await {
        Ok(()) => {
            info!(%id, "Contact submission stored");
            (StatusCode::OK, Json(ApiResponse::ok()))
        }
        Err(e) => {
            error!("Failed to store contact submission: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure("Failed to save message")),
            )
        }
    }
}

/// `POST /api/sendEmail`: screen an email submission and relay it as a
/// notification email.
pub async fn send_email_handler(
    State(state): State<AppState>,
    payload: Result<Json<MailPayload>, JsonRejection>,
) -> (StatusCode, Json<ApiResponse>) {
    let Ok(Json(payload)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failure("Invalid JSON body")),
        );
    };

    let record = match contact::screen_mail(&payload) {
        Ok(Screening::Accepted(record)) => record,
        Ok(Screening::BotLike) => {
            debug!("Honeypot tripped on /api/sendEmail; dropping submission");
            return (StatusCode::OK, Json(ApiResponse::ok()));
        }
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::failure(e.to_string())),
            )
        }
    };

    let Some(settings) = mailer::settings(&state.config) else {
        let missing = mailer::missing_settings(&state.config);
        error!(
            "Mail relay is not configured; missing: {}",
            missing.join(", ")
        );
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::failure(format!(
                "Email is not configured on the server. Missing: {}",
                missing.join(", ")
            ))),
        );
    };

    let message = mailer::contact_notification(&settings, &record);

    match mailer::send(&settings, &message).await {
        Ok(()) => {
            info!(reply_to = %message.reply_to, "Contact notification sent");
            (StatusCode::OK, Json(ApiResponse::ok()))
        }
        Err(e) => {
            error!("Failed to send contact notification: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure("Failed to send email")),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_omits_message() {
        let body = serde_json::to_value(ApiResponse::ok()).unwrap();
        assert_eq!(body, serde_json::json!({ "success": true }));
    }

    #[test]
    fn test_failure_envelope_carries_message() {
        let body = serde_json::to_value(ApiResponse::failure("Invalid phone number")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "message": "Invalid phone number" })
        );
    }
}
