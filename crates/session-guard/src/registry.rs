use std::sync::Arc;

use session_shape::id::SessionId;

/// Source of truth for sessions tracked independently of the records
/// clients present
pub trait SessionRegistry: Send + Sync {
    /// True if `session_id` refers to a live tracked session
    fn is_tracked(&self, session_id: &SessionId) -> bool;

    /// True if the session has been marked for forced logout
    fn is_force_logout(&self, session_id: &SessionId) -> bool;
}

impl<T: SessionRegistry + ?Sized> SessionRegistry for Arc<T> {
    fn is_tracked(&self, session_id: &SessionId) -> bool {
        (**self).is_tracked(session_id)
    }

    fn is_force_logout(&self, session_id: &SessionId) -> bool {
        (**self).is_force_logout(session_id)
    }
}
