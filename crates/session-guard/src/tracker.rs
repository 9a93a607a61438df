use std::sync::Mutex;

use session_shape::{
    id::{SessionId, UserId},
    time::{Seconds, Timestamp},
};
use tracing::{field, info, warn, Span};

use crate::SessionRegistry;

/// In memory record of live sessions
///
/// Records are only kept until the record lifetime elapses. Nothing is
/// persisted, a restart forgets every session
#[derive(Debug)]
pub struct SessionTracker {
    // ASSUMPTION: small enough scale that a vec is the most efficient implementation
    record_lifetime: Seconds,
    records: Mutex<Vec<SessionRecord>>,
}

#[derive(Debug)]
struct SessionRecord {
    timestamp: Timestamp,
    session_id: SessionId,
    user_id: UserId,
    force_logout: bool,
}

impl SessionTracker {
    #[tracing::instrument(name = "New Session_Tracker")]
    pub fn new(record_lifetime: Seconds) -> Self {
        Self {
            record_lifetime,
            records: Default::default(),
        }
    }

    /// Starts tracking `session_id`, refreshing any existing record for it
    ///
    /// A forced logout mark on an existing record is kept, re-tracking never
    /// revives a session
    #[tracing::instrument(skip(self))]
    pub fn track(&self, session_id: SessionId, user_id: UserId) {
        self.purge_stale();
        let mut guard = self.records.lock().expect("mutex poisoned");
        let mut force_logout = false;
        guard.retain(|rec| {
            if rec.session_id == session_id {
                force_logout |= rec.force_logout;
                false
            } else {
                true
            }
        });
        if force_logout {
            warn!("re-tracked a session that is marked for forced logout");
        }
        guard.push(SessionRecord {
            timestamp: Timestamp::now(),
            session_id,
            user_id,
            force_logout,
        });
    }

    /// Stops tracking the session. Returns true if it was being tracked
    #[tracing::instrument(skip(self), ret)]
    pub fn revoke(&self, session_id: &SessionId) -> bool {
        let mut guard = self.records.lock().expect("mutex poisoned");
        let position = guard.iter().position(|rec| &rec.session_id == session_id);
        if let Some(index) = position {
            guard.swap_remove(index);
            true
        } else {
            false
        }
    }

    /// Marks a single session for forced logout. Returns true if it was found
    #[tracing::instrument(skip(self), ret)]
    pub fn force_logout_session(&self, session_id: &SessionId) -> bool {
        self.purge_stale();
        let mut guard = self.records.lock().expect("mutex poisoned");
        match guard.iter_mut().find(|rec| &rec.session_id == session_id) {
            Some(rec) => {
                rec.force_logout = true;
                true
            }
            None => false,
        }
    }

    /// Marks every tracked session of `user_id` for forced logout and returns
    /// how many were marked
    #[tracing::instrument(skip(self), ret)]
    pub fn force_logout_user(&self, user_id: &UserId) -> usize {
        self.purge_stale();
        let mut guard = self.records.lock().expect("mutex poisoned");
        let mut count = 0;
        for rec in guard.iter_mut().filter(|rec| &rec.user_id == user_id) {
            rec.force_logout = true;
            count += 1;
        }
        info!(count, "sessions marked for forced logout");
        count
    }

    /// Number of records currently held, stale ones included until the next
    /// purge
    pub fn len(&self) -> usize {
        self.records.lock().expect("mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[tracing::instrument(skip(self), fields(len_before=field::Empty, len_after=field::Empty, remove_count=field::Empty))]
    pub fn purge_stale(&self) {
        let current_timestamp = Timestamp::now();
        let mut guard = self.records.lock().expect("mutex poisoned");
        let len_before = guard.len();
        Span::current().record("len_before", len_before);
        guard.retain(|rec| {
            let Some(seconds_elapsed) = current_timestamp.seconds_since(rec.timestamp) else {
                warn!(
                    ?current_timestamp,
                    ?rec.timestamp, "Deleted a session record with a timestamp in the future",
                );
                return false;
            };
            self.record_lifetime >= seconds_elapsed
        });
        Span::current().record("len_after", guard.len());
        Span::current().record("remove_count", len_before - guard.len());
    }
}

impl SessionRegistry for SessionTracker {
    #[tracing::instrument(skip(self), ret)]
    fn is_tracked(&self, session_id: &SessionId) -> bool {
        self.purge_stale();
        self.records
            .lock()
            .expect("mutex poisoned")
            .iter()
            .any(|rec| &rec.session_id == session_id)
    }

    #[tracing::instrument(skip(self), ret)]
    fn is_force_logout(&self, session_id: &SessionId) -> bool {
        self.purge_stale();
        self.records
            .lock()
            .expect("mutex poisoned")
            .iter()
            .any(|rec| &rec.session_id == session_id && rec.force_logout)
    }
}
