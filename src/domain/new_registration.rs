use crate::domain::identifiers::optional;
use crate::domain::{AppId, UserId};
use serde_json::Value;

#[derive(Debug)]
pub struct NewRegistration {
    pub user_id: UserId,
    pub app_id: AppId,
    pub subscription: Value,
    pub onesignal_player_id: Option<String>,
}

impl NewRegistration {
    pub fn parse(
        user_id: Option<String>,
        app_id: Option<String>,
        subscription: Option<Value>,
        onesignal_player_id: Option<String>,
    ) -> Result<NewRegistration, String> {
        let user_id = UserId::parse(user_id)?;
        let app_id = AppId::parse(app_id)?;
        let subscription = subscription
            .filter(|payload| !is_blank(payload))
            .ok_or_else(|| "`subscription` is missing.".to_string())?;
        Ok(NewRegistration {
            user_id,
            app_id,
            subscription,
            onesignal_player_id: optional(onesignal_player_id),
        })
    }
}

// The payload is opaque, but `false`, `0` and `""` carry no subscription.
fn is_blank(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
