// src/services/http.rs

use crate::errors::AppError;
use reqwest::{Response, StatusCode};
use serde::Deserialize;

/// Tenant-identifying header sent on tenant-scoped requests.
pub(crate) const TENANT_HEADER: &str = "x-tenant-id";
/// Admin key header sent on super-admin requests.
pub(crate) const ADMIN_KEY_HEADER: &str = "x-admin-key";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Map a non-success response onto the error taxonomy, preferring the
/// server-provided `message` and falling back to a generic description.
/// 401/403 become `Unauthorized`, which callers treat as a forced logout.
pub(crate) async fn error_for(response: Response) -> AppError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body
            .message
            .or(body.error)
            .unwrap_or_else(|| generic_message(status)),
        Err(_) => generic_message(status),
    };

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        AppError::Unauthorized(message)
    } else {
        AppError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

fn generic_message(status: StatusCode) -> String {
    format!("Request failed with status {}", status.as_u16())
}
