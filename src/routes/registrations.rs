use crate::domain::NewRegistration;
use crate::guards::ApiKey;
use crate::models::NewRingUser;
use crate::routes::{error_chain_fmt, Acknowledgement, ErrorBody};
use crate::startup::RelayDbConn;
use chrono::Utc;
use diesel::{ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};
use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::Request;
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct RegisterBody {
    user_id: Option<String>,
    app_id: Option<String>,
    subscription: Option<serde_json::Value>,
    onesignal_player_id: Option<String>,
}

impl TryFrom<RegisterBody> for NewRegistration {
    type Error = String;

    fn try_from(body: RegisterBody) -> Result<Self, Self::Error> {
        NewRegistration::parse(
            body.user_id,
            body.app_id,
            body.subscription,
            body.onesignal_player_id,
        )
    }
}

#[tracing::instrument(
    name = "Registering a push subscription",
    skip(_api_key, body, conn),
    fields(
        request_id = %Uuid::new_v4(),
        user_id = ?body.user_id,
        app_id = ?body.app_id
    )
)]
#[post("/register", data = "<body>")]
pub async fn register(
    _api_key: ApiKey,
    body: Json<RegisterBody>,
    conn: RelayDbConn,
) -> Result<Json<Acknowledgement>, RegisterError> {
    let registration: NewRegistration = body
        .into_inner()
        .try_into()
        .map_err(RegisterError::ValidationError)?;

    let app_found = app_exists(&conn, registration.app_id.to_string())
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error.cause_chain = ?e, "Failed to look up the app");
            false
        });
    if !app_found {
        return Err(RegisterError::InvalidApp);
    }

    upsert_ring_user(&conn, registration)
        .await
        .map_err(RegisterError::PersistenceError)?;
    Ok(Json(Acknowledgement { success: true }))
}

#[derive(thiserror::Error)]
pub enum RegisterError {
    #[error("{0}")]
    ValidationError(String),
    #[error("The app_id does not match a registered app.")]
    InvalidApp,
    #[error("Failed to store the subscription.")]
    PersistenceError(#[source] diesel::result::Error),
}

impl std::fmt::Debug for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl<'r> Responder<'r, 'static> for RegisterError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        tracing::warn!("RegisterError: {:?}", self);
        let (status, body) = match self {
            RegisterError::ValidationError(_) => {
                (Status::BadRequest, ErrorBody::new("Missing fields"))
            }
            RegisterError::InvalidApp => (Status::BadRequest, ErrorBody::new("Invalid app_id")),
            RegisterError::PersistenceError(e) => (
                Status::InternalServerError,
                ErrorBody::with_detail("Failed to register user", e.to_string()),
            ),
        };
        body.respond_with(status, request)
    }
}

#[tracing::instrument(name = "Check that the app exists", skip(conn))]
async fn app_exists(
    conn: &RelayDbConn,
    app_id: String,
) -> Result<bool, diesel::result::Error> {
    use crate::schema::ring_apps;
    conn.run(move |c: &mut PgConnection| {
        ring_apps::table
            .select(ring_apps::id)
            .filter(ring_apps::id.eq(app_id))
            .first::<String>(c)
            .optional()
            .map(|app| app.is_some())
    })
    .await
}

#[tracing::instrument(
    name = "Saving the subscription in the database",
    skip(conn, registration)
)]
async fn upsert_ring_user(
    conn: &RelayDbConn,
    registration: NewRegistration,
) -> Result<usize, diesel::result::Error> {
    use crate::schema::ring_users;
    conn.run(move |c: &mut PgConnection| {
        let ring_user = NewRingUser {
            user_id: registration.user_id.as_ref(),
            app_id: registration.app_id.as_ref(),
            onesignal_player_id: registration.onesignal_player_id.as_deref(),
            subscription: &registration.subscription,
            created_at: &Utc::now(),
        };
        diesel::insert_into(ring_users::table)
            .values(&ring_user)
            .on_conflict((ring_users::user_id, ring_users::app_id))
            .do_update()
            .set(&ring_user)
            .execute(c)
            .map_err(|e| {
                tracing::error!("Failed to execute query: {:?}", e);
                e
            })
    })
    .await
}
