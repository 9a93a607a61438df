use chrono::{DateTime, Utc};

use crate::{
    errors::ShapeError,
    id::{SessionId, UserId},
    uac::{User, UserRole},
};

/// The user embedded in a [`Session`]
///
/// Same shape as [`User`] except that `id` and `role` are required: every
/// live session must know who the user is and what role they hold
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: UserId,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// An authenticated client context
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: SessionUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    /// When `true` the session is to be treated as invalid on the next check
    /// irrespective of `expires`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_logout: Option<bool>,
}

impl SessionUser {
    pub fn new(id: UserId, role: UserRole) -> Self {
        Self {
            id,
            role,
            session_id: None,
            name: None,
            email: None,
            image: None,
        }
    }
}

impl TryFrom<User> for SessionUser {
    type Error = ShapeError;

    fn try_from(value: User) -> Result<Self, Self::Error> {
        let Some(id) = value.id else {
            tracing::debug!("user without an id cannot be attached to a session");
            return Err(ShapeError::MissingField("id"));
        };
        let Some(role) = value.role else {
            tracing::debug!(%id, "user without a role cannot be attached to a session");
            return Err(ShapeError::MissingField("role"));
        };
        Ok(Self {
            id,
            role,
            session_id: value.session_id,
            name: value.name,
            email: value.email,
            image: value.image,
        })
    }
}

impl From<SessionUser> for User {
    fn from(value: SessionUser) -> Self {
        Self {
            id: Some(value.id),
            role: Some(value.role),
            session_id: value.session_id,
            name: value.name,
            email: value.email,
            image: value.image,
        }
    }
}

impl Session {
    pub fn new(user: SessionUser) -> Self {
        Self {
            user,
            expires: None,
            force_logout: None,
        }
    }

    pub fn with_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn with_force_logout(mut self, force_logout: bool) -> Self {
        self.force_logout = Some(force_logout);
        self
    }

    /// Only an explicit `true` forces a logout, an absent flag does not
    pub fn is_force_logout(&self) -> bool {
        self.force_logout == Some(true)
    }

    /// A session without an expiry never expires by time alone
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.user.session_id.as_ref()
    }
}
