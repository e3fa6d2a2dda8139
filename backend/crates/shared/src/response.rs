//! Success envelope
//!
//! Every successful response is `{success: true, message, data?}`.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip)]
    pub status: u16,
}

impl<T> ApiResponse<T> {
    /// 200 with data
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            status: 200,
        }
    }

    /// 201 with data
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status: 201,
            ..Self::ok(message, data)
        }
    }
}

impl ApiResponse<()> {
    /// 200 without a `data` member
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            status: 200,
        }
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Unwrap a JSON request body; extractor rejections become a 400 envelope
#[cfg(feature = "axum")]
pub fn json_body<T>(
    payload: Result<axum::Json<T>, axum::extract::rejection::JsonRejection>,
) -> crate::error::app_error::AppResult<T> {
    payload
        .map(|axum::Json(body)| body)
        .map_err(|rejection| crate::error::app_error::AppError::bad_request(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::ok("Blog retrieved successfully", 7)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "Blog retrieved successfully", "data": 7})
        );

        let json = serde_json::to_value(ApiResponse::message("Logout successful")).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "message": "Logout successful"}));
    }

    #[test]
    fn test_created_status() {
        assert_eq!(ApiResponse::created("Blog created successfully", ()).status, 201);
    }
}
