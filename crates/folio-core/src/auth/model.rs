//! Session state machine.

use serde::{Deserialize, Serialize};

/// Client-side authentication state.
///
/// The token only exists inside the `Authenticated` variant, so
/// "authenticated" and "holds a token" cannot drift apart.
///
/// Transitions: `Loading` is the initial state and is left exactly once,
/// when startup restoration completes. `login` moves
/// `Unauthenticated -> Authenticated`; `logout` and an authorization
/// failure on a protected call move `Authenticated -> Unauthenticated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Startup restoration of a persisted token has not finished yet.
    Loading,
    /// No valid credential is held.
    Unauthenticated,
    /// A bearer token is held and attached to outgoing requests.
    Authenticated { token: String },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The held token, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token } => Some(token),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_presence_tracks_authentication() {
        let state = SessionState::Authenticated {
            token: "t".to_string(),
        };
        assert!(state.is_authenticated());
        assert_eq!(state.token(), Some("t"));

        assert!(SessionState::Unauthenticated.token().is_none());
        assert!(SessionState::Loading.token().is_none());
    }
}
