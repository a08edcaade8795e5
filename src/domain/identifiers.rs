/// Absent, `null` and empty strings all count as a missing field.
fn required(value: Option<String>, field: &str) -> Result<String, String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(format!("`{}` is missing.", field)),
    }
}

/// Empty strings are dropped instead of being forwarded.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserId(String);

impl UserId {
    pub fn parse(value: Option<String>) -> Result<UserId, String> {
        required(value, "user_id").map(Self)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppId(String);

impl AppId {
    pub fn parse(value: Option<String>) -> Result<AppId, String> {
        required(value, "app_id").map(Self)
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageText(String);

impl MessageText {
    pub fn parse(value: Option<String>) -> Result<MessageText, String> {
        required(value, "message").map(Self)
    }
}

impl AsRef<str> for MessageText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
