use uuid::Uuid;

pub const ANONYMOUS_USER_ID: &str = "anonymous";

/// Caller identity attached to every outbound turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: String,
    pub session_id: String,
}

impl SessionIdentity {
    pub fn new(user_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }

    /// Fills missing parts: `anonymous` user, fresh v4 session id.
    pub fn resolve(user_id: Option<String>, session_id: Option<String>) -> Self {
        Self {
            user_id: user_id.unwrap_or_else(|| ANONYMOUS_USER_ID.to_string()),
            session_id: session_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}
