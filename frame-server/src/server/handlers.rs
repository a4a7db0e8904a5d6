// HTTP request handlers
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use frame_message::{ActionPayload, FrameMessageError};
use tracing::{error, info, warn};

use crate::server::state::AppState;

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Frame server is running")
}

/// Frame action endpoint - decodes the trusted data, verifies it with the hub
/// and returns the combined record.
pub async fn frame_handler(
    State(state): State<AppState>,
    Json(payload): Json<ActionPayload>,
) -> Response {
    info!(
        "Received frame action with {} hex characters",
        payload.trusted_data.message_bytes.len()
    );

    let result = state
        .parser
        .parse(&payload)
        .await
        .and_then(|message| message.ensure_valid());

    match result {
        Ok(message) => {
            info!(
                requester_fid = message.data.requester_fid,
                button_index = message.data.button_index,
                verified = message.is_valid().is_some(),
                "Frame action accepted"
            );
            (StatusCode::OK, Json(message)).into_response()
        }
        Err(e) => error_response(e).into_response(),
    }
}

fn status_for(err: &FrameMessageError) -> StatusCode {
    match err {
        FrameMessageError::InvalidSignature => StatusCode::UNAUTHORIZED,
        FrameMessageError::Hub(_) => StatusCode::BAD_GATEWAY,
        e if e.is_decode_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: FrameMessageError) -> (StatusCode, Json<serde_json::Value>) {
    let status = status_for(&err);
    if status.is_server_error() {
        error!(error = %err, "Failed to process frame action");
    } else {
        warn!(error = %err, "Rejected frame action");
    }

    (
        status,
        Json(serde_json::json!({
            "status": "error",
            "message": err.to_string()
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub::{HubEndpoint, HubError};

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&FrameMessageError::InvalidSignature),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&FrameMessageError::MissingFrameActionBody),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&FrameMessageError::Hub(HubError::Status {
                endpoint: HubEndpoint::LinkById,
                status: 500
            })),
            StatusCode::BAD_GATEWAY
        );
    }
}
