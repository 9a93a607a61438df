use crate::{
    errors::ShapeError,
    id::{SessionId, UserId},
    session::{Session, SessionUser},
    time::{Seconds, Timestamp},
    uac::{User, UserRole},
};

/// Compact credential carried between client and server
///
/// Carries the same identity as the session but every field is optional
#[derive(Default, Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Links the token back to the session it originated from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<Timestamp>,
    /// Carried over from the session so a forced logout survives the trip
    /// through a token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_logout: Option<bool>,
}

impl Token {
    pub fn with_expiry(mut self, issued_at: Timestamp, lifetime: Seconds) -> Self {
        self.iat = Some(issued_at);
        self.exp = Some(issued_at + lifetime);
        self
    }

    /// Only an explicit `true` forces a logout, an absent flag does not
    pub fn is_force_logout(&self) -> bool {
        self.force_logout == Some(true)
    }

    /// A token without `exp` never expires by time alone
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }

    /// The user this token identifies, `id` is preferred over `sub`
    pub fn user_id(&self) -> Result<Option<UserId>, ShapeError> {
        match (&self.id, &self.sub) {
            (Some(id), _) => Ok(Some(id.clone())),
            (None, Some(sub)) => sub
                .clone()
                .try_into()
                .map(Some)
                .map_err(|source| ShapeError::InvalidField { field: "sub", source }),
            (None, None) => Ok(None),
        }
    }
}

impl From<&User> for Token {
    fn from(value: &User) -> Self {
        Self {
            id: value.id.clone(),
            role: value.role,
            session_id: value.session_id.clone(),
            name: value.name.clone(),
            email: value.email.clone(),
            picture: value.image.clone(),
            sub: value.id.as_ref().map(ToString::to_string),
            iat: None,
            exp: None,
            force_logout: None,
        }
    }
}

impl From<&Session> for Token {
    fn from(value: &Session) -> Self {
        let user = &value.user;
        Self {
            id: Some(user.id.clone()),
            role: Some(user.role),
            session_id: user.session_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            picture: user.image.clone(),
            sub: Some(user.id.to_string()),
            iat: None,
            exp: value.expires.map(Timestamp::from_utc_datetime_saturating),
            force_logout: value.force_logout,
        }
    }
}

impl TryFrom<Token> for SessionUser {
    type Error = ShapeError;

    fn try_from(value: Token) -> Result<Self, Self::Error> {
        let id = value.user_id()?.ok_or(ShapeError::MissingField("id"))?;
        let role = value.role.ok_or(ShapeError::MissingField("role"))?;
        Ok(Self {
            id,
            role,
            session_id: value.session_id,
            name: value.name,
            email: value.email,
            image: value.picture,
        })
    }
}

impl Session {
    /// Builds the session view of a token, copying its identity into
    /// `user`, its `exp` into `expires` and its forced logout flag
    pub fn try_from_token(token: Token) -> Result<Self, ShapeError> {
        let expires = match token.exp {
            Some(exp) => Some(
                exp.as_utc_datetime()
                    .ok_or(ShapeError::OutOfRange { field: "exp" })?,
            ),
            None => None,
        };
        let force_logout = token.force_logout;
        let mut result = Self::new(token.try_into()?);
        result.expires = expires;
        result.force_logout = force_logout;
        Ok(result)
    }
}
