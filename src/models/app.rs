use crate::schema::ring_apps;

/// Apps are provisioned out of band and the service only reads them; this
/// insert is used by the integration tests.
#[derive(Insertable)]
#[table_name = "ring_apps"]
pub struct NewApp<'a> {
    pub id: &'a str,
    pub onesignal_app_id: Option<&'a str>,
}
