use crate::schema::ring_logs;
use chrono::offset::Utc;
use chrono::DateTime;

/// Read model of a delivery log row. The relay only appends; the integration
/// tests are the only reader.
#[derive(Queryable)]
pub struct DeliveryLog {
    pub id: uuid::Uuid,
    pub user_id: String,
    pub app_id: String,
    pub message: String,
    pub url: Option<String>,
    pub sent_at: DateTime<Utc>,
    pub response_status: i32,
}

#[derive(Insertable)]
#[table_name = "ring_logs"]
pub struct NewDeliveryLog<'a> {
    pub id: &'a uuid::Uuid,
    pub user_id: &'a str,
    pub app_id: &'a str,
    pub message: &'a str,
    pub url: Option<&'a str>,
    pub sent_at: &'a DateTime<Utc>,
    pub response_status: i32,
}
