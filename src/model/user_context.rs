use serde::{Deserialize, Serialize};

/// Requesting user identity, passed explicitly into every resolver call,
/// never read from ambient state. Repository access checks are scoped to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    pub username: String,
    pub user_email: Option<String>,
}

impl UserContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            user_email: None,
        }
    }

    pub fn with_email(username: impl Into<String>, email: Option<String>) -> Self {
        Self {
            username: username.into(),
            user_email: email,
        }
    }

    /// Anonymous context for development and tests.
    pub fn anonymous() -> Self {
        Self {
            username: "anonymous".to_string(),
            user_email: None,
        }
    }
}

impl Default for UserContext {
    fn default() -> Self {
        Self::anonymous()
    }
}
