//! Authentication state

use eshop_core::AccessToken;

/// Who is using the dashboard
///
/// Lives in memory only; a restart always begins anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// No one is logged in
    #[default]
    Anonymous,
    /// A successful login has stored a token
    Authenticated {
        /// Bearer token for mutating calls
        token: AccessToken,
        /// Name the user logged in with
        username: String,
    },
}

impl Session {
    /// Build an authenticated session
    pub fn authenticated(token: AccessToken, username: impl Into<String>) -> Self {
        Self::Authenticated {
            token,
            username: username.into(),
        }
    }

    /// Whether mutating actions are allowed
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Bearer token, if logged in
    #[must_use]
    pub const fn token(&self) -> Option<&AccessToken> {
        match self {
            Self::Authenticated { token, .. } => Some(token),
            Self::Anonymous => None,
        }
    }

    /// Display name, if logged in
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Authenticated { username, .. } => Some(username.as_str()),
            Self::Anonymous => None,
        }
    }
}
