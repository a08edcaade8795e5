mod health;
mod notifications;
mod registrations;

pub use health::*;
pub use notifications::*;
pub use registrations::*;

use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::Request;

/// The JSON body of every failed request.
#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn new(error: &'static str) -> Self {
        Self {
            error,
            detail: None,
        }
    }

    pub fn with_detail(error: &'static str, detail: String) -> Self {
        Self {
            error,
            detail: Some(detail),
        }
    }

    pub(crate) fn respond_with<'r>(
        self,
        status: Status,
        request: &'r Request<'_>,
    ) -> rocket::response::Result<'static> {
        (status, Json(self)).respond_to(request)
    }
}

/// `{"success": true}`
#[derive(serde::Serialize)]
pub struct Acknowledgement {
    pub success: bool,
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
