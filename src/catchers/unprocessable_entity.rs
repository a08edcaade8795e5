use crate::routes::ErrorBody;
use rocket::response::status;
use rocket::response::status::BadRequest;
use rocket::serde::json::Json;
use rocket::Request;

// Rocket answers 422 when the JSON is well-formed but has the wrong shape.
#[catch(422)]
pub fn unprocessable_entity_to_bad_request(_req: &Request) -> BadRequest<Json<ErrorBody>> {
    invalid_request_body()
}

/// Registered at `/`, so it rewrites every 400 Rocket itself produces, not just
/// JSON syntax errors. Handlers returning their own 400 responses bypass it.
#[catch(400)]
pub fn any_bad_request_as_invalid_body(_req: &Request) -> BadRequest<Json<ErrorBody>> {
    invalid_request_body()
}

fn invalid_request_body() -> BadRequest<Json<ErrorBody>> {
    status::BadRequest(Some(Json(ErrorBody::new("Invalid request body"))))
}
