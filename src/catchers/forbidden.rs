use crate::routes::ErrorBody;
use rocket::serde::json::Json;

/// Guards reject bad credentials with 403; this gives them the JSON body
/// callers expect.
#[catch(403)]
pub fn forbidden_as_unauthorized() -> Unauthorized {
    Unauthorized::new()
}

#[derive(Responder)]
#[response(status = 403)]
pub struct Unauthorized {
    inner: Json<ErrorBody>,
}

impl Unauthorized {
    fn new() -> Unauthorized {
        Unauthorized {
            inner: Json(ErrorBody::new("Unauthorized")),
        }
    }
}

impl Default for Unauthorized {
    fn default() -> Self {
        Self::new()
    }
}
