use serde::{Deserialize, Serialize};

use crate::ADMIN_ROLE;

/// Public metadata attached to a user profile by the identity provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

/// Signed-in user as stored in the session identity by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Provider subject identifier.
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub public_metadata: UserMetadata,
}

impl AuthenticatedUser {
    /// Whether the profile's role metadata marks the user as a store admin.
    pub fn is_admin(&self) -> bool {
        self.public_metadata.role.as_deref() == Some(ADMIN_ROLE)
    }
}
