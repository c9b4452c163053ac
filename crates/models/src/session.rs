use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Patient,
}

/// Explicit per-session identity and credentials.
///
/// Established on login and passed to every core operation that needs
/// identity; dropped on logout. There is no ambient/global session storage.
/// Collaborator clients read the bearer token from the context they are
/// handed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub access_token: String,
}

impl SessionContext {
    pub fn establish(
        user_id: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            role,
            access_token: access_token.into(),
        }
    }
}
