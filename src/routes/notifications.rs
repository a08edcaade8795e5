use crate::domain::OutboundMessage;
use crate::guards::ApiKey;
use crate::models::NewDeliveryLog;
use crate::push::{PushNotification, PushProvider};
use crate::routes::{error_chain_fmt, ErrorBody};
use crate::startup::RelayDbConn;
use anyhow::Context;
use chrono::Utc;
use diesel::{ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};
use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use rocket::{Request, State};
use std::sync::Arc;
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct SendBody {
    user_id: Option<String>,
    app_id: Option<String>,
    message: Option<String>,
    url: Option<String>,
}

impl TryFrom<SendBody> for OutboundMessage {
    type Error = String;

    fn try_from(body: SendBody) -> Result<Self, Self::Error> {
        OutboundMessage::parse(body.user_id, body.app_id, body.message, body.url)
    }
}

#[derive(serde::Serialize)]
pub struct SendAcknowledgement {
    pub success: bool,
    pub onesignal: serde_json::Value,
}

/// Provider-side addressing for one (user, app) pair.
struct DeliveryTarget {
    subscriber_id: String,
    provider_app_id: String,
}

#[tracing::instrument(
    name = "Relaying a notification",
    skip(_api_key, body, conn, push_provider),
    fields(
        request_id = %Uuid::new_v4(),
        user_id = ?body.user_id,
        app_id = ?body.app_id
    )
)]
#[post("/send", data = "<body>")]
pub async fn send(
    _api_key: ApiKey,
    body: Json<SendBody>,
    conn: RelayDbConn,
    push_provider: &State<Arc<dyn PushProvider>>,
) -> Result<Json<SendAcknowledgement>, SendError> {
    let message: OutboundMessage = body
        .into_inner()
        .try_into()
        .map_err(SendError::ValidationError)?;

    let target = match get_delivery_target(&conn, &message).await {
        Ok(Some(target)) => target,
        Ok(None) => return Err(SendError::InvalidUserOrApp),
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, "Failed to resolve the delivery target");
            return Err(SendError::InvalidUserOrApp);
        }
    };

    let notification = PushNotification {
        provider_app_id: &target.provider_app_id,
        subscriber_id: &target.subscriber_id,
        message: message.message.as_ref(),
        url: message.url.as_deref(),
    };
    let response = push_provider
        .send_notification(&notification)
        .await
        .map_err(SendError::ProviderError)?;

    // The notification is already out; a failed log write does not fail the request.
    if let Err(e) = record_delivery(&conn, message, response.status).await {
        tracing::error!(error.cause_chain = ?e, "Failed to record the delivery");
    }

    Ok(Json(SendAcknowledgement {
        success: true,
        onesignal: response.body,
    }))
}

#[derive(thiserror::Error)]
pub enum SendError {
    #[error("{0}")]
    ValidationError(String),
    #[error("No subscriber or provider app id is known for this user and app.")]
    InvalidUserOrApp,
    #[error("Failed to deliver the notification to the push provider.")]
    ProviderError(#[source] anyhow::Error),
}

impl std::fmt::Debug for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl<'r> Responder<'r, 'static> for SendError {
    fn respond_to(self, request: &'r Request<'_>) -> rocket::response::Result<'static> {
        tracing::warn!("SendError: {:?}", self);
        let (status, body) = match self {
            SendError::ValidationError(_) => (Status::BadRequest, ErrorBody::new("Missing fields")),
            SendError::InvalidUserOrApp => {
                (Status::BadRequest, ErrorBody::new("Invalid user or app"))
            }
            SendError::ProviderError(e) => (
                Status::BadGateway,
                ErrorBody::with_detail("Failed to reach push provider", format!("{:#}", e)),
            ),
        };
        body.respond_with(status, request)
    }
}

#[tracing::instrument(name = "Resolve provider ids", skip(conn, message))]
async fn get_delivery_target(
    conn: &RelayDbConn,
    message: &OutboundMessage,
) -> Result<Option<DeliveryTarget>, anyhow::Error> {
    let user_id = message.user_id.to_string();
    let app_id = message.app_id.to_string();
    conn.run(move |c: &mut PgConnection| query_delivery_target(c, &user_id, &app_id))
        .await
}

fn query_delivery_target(
    conn: &PgConnection,
    user_id: &str,
    app_id: &str,
) -> Result<Option<DeliveryTarget>, anyhow::Error> {
    use crate::schema::{ring_apps, ring_users};
    let subscriber_id = ring_users::table
        .select(ring_users::onesignal_player_id)
        .filter(ring_users::user_id.eq(user_id))
        .filter(ring_users::app_id.eq(app_id))
        .first::<Option<String>>(conn)
        .optional()
        .context("Failed to look up the subscriber id.")?
        .flatten();
    let provider_app_id = ring_apps::table
        .select(ring_apps::onesignal_app_id)
        .filter(ring_apps::id.eq(app_id))
        .first::<Option<String>>(conn)
        .optional()
        .context("Failed to look up the provider app id.")?
        .flatten();

    Ok(match (subscriber_id, provider_app_id) {
        (Some(subscriber_id), Some(provider_app_id))
            if !subscriber_id.is_empty() && !provider_app_id.is_empty() =>
        {
            Some(DeliveryTarget {
                subscriber_id,
                provider_app_id,
            })
        }
        _ => None,
    })
}

#[tracing::instrument(name = "Append a delivery log entry", skip(conn, message))]
async fn record_delivery(
    conn: &RelayDbConn,
    message: OutboundMessage,
    response_status: u16,
) -> Result<(), anyhow::Error> {
    use crate::schema::ring_logs;
    conn.run(move |c: &mut PgConnection| {
        diesel::insert_into(ring_logs::table)
            .values(NewDeliveryLog {
                id: &Uuid::new_v4(),
                user_id: message.user_id.as_ref(),
                app_id: message.app_id.as_ref(),
                message: message.message.as_ref(),
                url: message.url.as_deref(),
                sent_at: &Utc::now(),
                response_status: i32::from(response_status),
            })
            .execute(c)
            .context("Failed to insert the delivery log entry.")
            .map(|_| ())
    })
    .await
}
