use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Completion API error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Completion API unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Report assembly error: {0}")]
    ReportAssembly(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::Upstream { .. } | Error::Transport(_) | Error::MalformedResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            Error::ReportAssembly(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let error_message = match self {
            Error::BadRequest(msg) => msg,
            Error::MethodNotAllowed => "Метод не разрешен".to_string(),
            Error::Validation(err) => validation_message(&err),
            Error::Config(_) => "An unexpected error occurred".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ReportAssembly(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::ReportAssembly(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ReportAssembly(err.to_string())
    }
}

// Surface the first field message instead of validator's debug-style dump.
fn validation_message(err: &validator::ValidationErrors) -> String {
    err.field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| err.to_string())
}
