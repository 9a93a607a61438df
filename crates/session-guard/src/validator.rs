use anyhow::Context as _;
use chrono::{DateTime, Utc};
use session_shape::{id::SessionId, session::Session, time::Timestamp, token::Token};
use tracing::{info, warn};

use crate::{SessionRegistry, SessionRejection, SessionSettings};

/// Decides whether a well formed session or token may still be used
///
/// Checks run in this order so that a forced logout always wins over any
/// other outcome:
/// 1. the `forceLogout` flag on the session or token
/// 2. a forced logout recorded by the registry
/// 3. expiry
/// 4. the session identifier refers to a tracked session
#[derive(Debug)]
pub struct SessionValidator<R> {
    settings: SessionSettings,
    registry: R,
}

impl<R: SessionRegistry> SessionValidator<R> {
    pub fn new(settings: SessionSettings, registry: R) -> Self {
        Self { settings, registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn validate_session(&self, session: &Session) -> Result<(), SessionRejection> {
        self.validate_session_at(session, Utc::now())
    }

    #[tracing::instrument(skip(self, session), fields(user_id = %session.user.id), err(Debug))]
    pub fn validate_session_at(
        &self,
        session: &Session,
        now: DateTime<Utc>,
    ) -> Result<(), SessionRejection> {
        let session_id = session.session_id();
        if session.is_force_logout() {
            info!("session carries the forced logout flag");
            return Err(SessionRejection::ForcedLogout {
                session_id: session_id.cloned(),
            });
        }
        self.check_registry_force_logout(session_id)?;
        if session.is_expired_at(now) {
            return Err(SessionRejection::Expired);
        }
        self.check_tracked(session_id)
    }

    pub fn validate_token(&self, token: &Token) -> Result<(), SessionRejection> {
        self.validate_token_at(token, Timestamp::now())
    }

    #[tracing::instrument(skip(self, token), err(Debug))]
    pub fn validate_token_at(&self, token: &Token, now: Timestamp) -> Result<(), SessionRejection> {
        let session_id = token.session_id.as_ref();
        if token.is_force_logout() {
            info!("token carries the forced logout flag");
            return Err(SessionRejection::ForcedLogout {
                session_id: session_id.cloned(),
            });
        }
        self.check_registry_force_logout(session_id)?;
        if token.is_expired_at(now) {
            return Err(SessionRejection::Expired);
        }
        self.check_tracked(session_id)
    }

    /// Parses a JSON session and validates it. A session missing `user.id` or
    /// `user.role` is rejected as malformed
    #[tracing::instrument(skip(self, raw), err(Debug))]
    pub fn validate_raw_session(&self, raw: &str) -> Result<Session, SessionRejection> {
        let session: Session = serde_json::from_str(raw).inspect_err(|err| {
            warn!(?err, "received a malformed session");
        })?;
        self.validate_session(&session)?;
        Ok(session)
    }

    /// Validates `token` then builds the session it describes
    ///
    /// A token without `exp` gets a session lasting the configured maximum
    /// age from `now`
    #[tracing::instrument(skip(self, token), err(Debug))]
    pub fn session_from_token_at(
        &self,
        token: Token,
        now: DateTime<Utc>,
    ) -> Result<Session, SessionRejection> {
        let now_timestamp = Timestamp::try_from(now)?;
        self.validate_token_at(&token, now_timestamp)?;
        let mut session = Session::try_from_token(token)?;
        if session.expires.is_none() {
            let max_age = self.settings.max_age();
            let expires = now
                .checked_add_signed(chrono::TimeDelta::from(max_age))
                .with_context(|| {
                    format!("configured max age of {max_age} seconds from {now} is out of range")
                })?;
            session.expires = Some(expires);
        }
        Ok(session)
    }

    pub fn session_from_token(&self, token: Token) -> Result<Session, SessionRejection> {
        self.session_from_token_at(token, Utc::now())
    }

    fn check_registry_force_logout(
        &self,
        session_id: Option<&SessionId>,
    ) -> Result<(), SessionRejection> {
        match session_id {
            Some(id) if self.registry.is_force_logout(id) => {
                info!(%id, "session marked for forced logout");
                Err(SessionRejection::ForcedLogout {
                    session_id: Some(id.clone()),
                })
            }
            _ => Ok(()),
        }
    }

    fn check_tracked(&self, session_id: Option<&SessionId>) -> Result<(), SessionRejection> {
        match session_id {
            Some(id) if self.registry.is_tracked(id) => Ok(()),
            Some(id) => Err(SessionRejection::UnknownSession(id.clone())),
            None if self.settings.require_session_id => Err(SessionRejection::MissingSessionId),
            None => Ok(()),
        }
    }
}
