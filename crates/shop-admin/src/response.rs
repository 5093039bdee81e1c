//! # Response Envelope
//!
//! Every operation result is reported to callers as an [`ApiResponse`]: a numeric
//! status, a human-readable message, a machine-readable error tag, a
//! `Success`/`Error` status message and the payload (or null).

use serde::Serialize;

/// Error taxonomy shared by every collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    Invalid,
    OutOfStock,
    Unauthorized,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::AlreadyExists => 409,
            ErrorKind::Invalid | ErrorKind::OutOfStock => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Internal => 500,
        }
    }
}

/// Implemented by every domain error so it can be rendered into an envelope.
pub trait ApiError: std::error::Error {
    fn kind(&self) -> ErrorKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusMessage {
    Success,
    Error,
}

/// Status used for successful reads.
pub const STATUS_OK: u16 = 200;
/// Status used for successful writes.
pub const STATUS_CREATED: u16 = 201;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub type_error: Option<ErrorKind>,
    pub status_message: StatusMessage,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(status: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            status,
            message: message.into(),
            type_error: None,
            status_message: StatusMessage::Success,
            data: Some(data),
        }
    }

    pub fn failure<E: ApiError>(error: &E) -> Self {
        let kind = error.kind();
        Self {
            status: kind.status(),
            message: error.to_string(),
            type_error: Some(kind),
            status_message: StatusMessage::Error,
            data: None,
        }
    }

    /// Renders a read result (200 on success).
    pub fn fetched<E: ApiError>(result: Result<T, E>, message: impl Into<String>) -> Self {
        match result {
            Ok(data) => Self::success(STATUS_OK, message, data),
            Err(e) => Self::failure(&e),
        }
    }

    /// Renders a write result (201 on success).
    pub fn completed<E: ApiError>(result: Result<T, E>, message: impl Into<String>) -> Self {
        match result {
            Ok(data) => Self::success(STATUS_CREATED, message, data),
            Err(e) => Self::failure(&e),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_message == StatusMessage::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, thiserror::Error)]
    #[error("The product with id: product_2 out of the stock")]
    struct Shortage;

    impl ApiError for Shortage {
        fn kind(&self) -> ErrorKind {
            ErrorKind::OutOfStock
        }
    }

    #[test]
    fn test_failure_envelope_serializes_with_null_data() {
        let response: ApiResponse<u32> = ApiResponse::completed(Err(Shortage), "Created");
        assert!(!response.is_success());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": 400,
                "message": "The product with id: product_2 out of the stock",
                "typeError": "OUT_OF_STOCK",
                "statusMessage": "Error",
                "data": null,
            })
        );
    }

    #[test]
    fn test_success_envelope() {
        let response = ApiResponse::fetched(Ok::<_, Shortage>(vec![1, 2]), "Success");
        assert_eq!(response.status, STATUS_OK);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": 200,
                "message": "Success",
                "typeError": null,
                "statusMessage": "Success",
                "data": [1, 2],
            })
        );
    }
}
