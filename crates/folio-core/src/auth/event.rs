//! Session lifecycle events.

use serde::{Deserialize, Serialize};

/// Events published by the session manager as the session changes.
///
/// Consumers subscribe to react to lifecycle changes without polling;
/// the CLI uses `SessionExpired` to print its re-login notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A login completed and the token was persisted.
    LoggedIn,
    /// The session was torn down by an explicit logout.
    LoggedOut,
    /// The backend rejected the held token; the session was reset.
    /// Emitted at most once per authenticated period.
    SessionExpired,
}
