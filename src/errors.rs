use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// Why a calculation was refused before any arithmetic ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    NonPositivePrice,
    NonPositiveVolatility,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositivePrice => write!(f, "non-positive price"),
            Self::NonPositiveVolatility => write!(f, "non-positive volatility"),
        }
    }
}

/// Domain-specific error types for the calculator and its HTTP shell.
/// Invalid input is refused outright: no clamping, no partial result.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: InvalidReason },

    #[error("model computation error: {0}")]
    Model(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("server error: {0}")]
    Server(String),
}

impl CalcError {
    pub fn invalid(reason: InvalidReason) -> Self {
        CalcError::InvalidInput { reason }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CalcError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<std::io::Error> for CalcError {
    fn from(e: std::io::Error) -> Self {
        CalcError::Server(e.to_string())
    }
}

impl IntoResponse for CalcError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
