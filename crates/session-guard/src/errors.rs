use session_shape::{errors::ShapeError, id::SessionId};

/// Reasons a session or token is not accepted
#[derive(thiserror::Error, Debug)]
pub enum SessionRejection {
    #[error("Session has been forcibly logged out")]
    ForcedLogout { session_id: Option<SessionId> },
    #[error("Session Expired")]
    Expired,
    #[error("Session '{0}' is not a tracked session")]
    UnknownSession(SessionId),
    #[error("Session identifier required but not present")]
    MissingSessionId,
    #[error("Malformed session: {0}")]
    Malformed(#[from] ShapeError),
    #[error("Unable to parse session: {0}")]
    Unparsable(#[from] serde_json::Error),
    #[error("Unexpected Error")]
    UnexpectedError(#[from] anyhow::Error),
}

impl SessionRejection {
    /// Returns `true` if the session rejection is [`ForcedLogout`].
    ///
    /// [`ForcedLogout`]: SessionRejection::ForcedLogout
    #[must_use]
    pub fn is_forced_logout(&self) -> bool {
        matches!(self, Self::ForcedLogout { .. })
    }

    /// Returns `true` if the session itself is not a valid shape as opposed
    /// to a valid shape that is no longer acceptable
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::Unparsable(_))
    }
}
