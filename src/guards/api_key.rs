use crate::guards::OrStatus;
use anyhow::anyhow;
use rocket::http::Status;
use rocket::outcome::Outcome::{Failure, Success};
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use secrecy::{ExposeSecret, Secret};
use subtle::ConstantTimeEq;

pub const API_KEY_HEADER: &str = "x-api-key";

/// The shared secret callers must present. Managed by Rocket; `None` when the
/// deployment has not configured one.
pub struct ApiSecret(pub Option<Secret<String>>);

/// Proof that the request carried the configured shared secret.
pub struct ApiKey {
    // prevents construction outside of this module
    _private: (),
}

#[async_trait]
impl<'r> FromRequest<'r> for ApiKey {
    type Error = anyhow::Error;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match from_request_result(request) {
            Ok(api_key) => Success(api_key),
            Err((status, e)) => {
                tracing::warn!(error.cause_chain = ?e, "Rejected request credentials");
                Failure((status, e))
            }
        }
    }
}

fn from_request_result(request: &Request) -> Result<ApiKey, (Status, anyhow::Error)> {
    let presented = request
        .headers()
        .get_one(API_KEY_HEADER)
        .or_status(Status::Forbidden, "The 'x-api-key' header was missing.")?;

    let expected = request
        .rocket()
        .state::<ApiSecret>()
        .and_then(|secret| secret.0.as_ref())
        .or_status(Status::Forbidden, "No API secret key is configured.")?;

    if !secrets_match(presented, expected) {
        return Err((Status::Forbidden, anyhow!("The presented API key is invalid.")));
    }
    Ok(ApiKey { _private: () })
}

fn secrets_match(presented: &str, expected: &Secret<String>) -> bool {
    presented
        .as_bytes()
        .ct_eq(expected.expose_secret().as_bytes())
        .into()
}
