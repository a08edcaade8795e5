use crate::domain::identifiers::optional;
use crate::domain::{AppId, MessageText, UserId};

#[derive(Debug)]
pub struct OutboundMessage {
    pub user_id: UserId,
    pub app_id: AppId,
    pub message: MessageText,
    pub url: Option<String>,
}

impl OutboundMessage {
    pub fn parse(
        user_id: Option<String>,
        app_id: Option<String>,
        message: Option<String>,
        url: Option<String>,
    ) -> Result<OutboundMessage, String> {
        Ok(OutboundMessage {
            user_id: UserId::parse(user_id)?,
            app_id: AppId::parse(app_id)?,
            message: MessageText::parse(message)?,
            url: optional(url),
        })
    }
}
