use crate::schema::ring_users;
use chrono::offset::Utc;
use chrono::DateTime;

/// Read model of a stored subscription. The handlers only write rows; the
/// integration tests are the only reader.
#[derive(Queryable)]
pub struct RingUser {
    pub user_id: String,
    pub app_id: String,
    pub onesignal_player_id: Option<String>,
    pub subscription: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Doubles as the changeset applied when `(user_id, app_id)` already exists, so
/// a registration without a player id clears the stored one.
#[derive(Insertable, AsChangeset)]
#[table_name = "ring_users"]
#[primary_key(user_id, app_id)]
#[changeset_options(treat_none_as_null = "true")]
pub struct NewRingUser<'a> {
    pub user_id: &'a str,
    pub app_id: &'a str,
    pub onesignal_player_id: Option<&'a str>,
    pub subscription: &'a serde_json::Value,
    pub created_at: &'a DateTime<Utc>,
}
