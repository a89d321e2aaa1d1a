//! Authentication session domain.
//!
//! Owns the token lifecycle: restoring a persisted token at startup,
//! exchanging credentials for a new one, tearing the session down on
//! logout, and reacting to authorization failures reported by the
//! transport.
//!
//! # Module Structure
//!
//! - `model`: Session state machine (`SessionState`)
//! - `event`: Session lifecycle events (`SessionEvent`)
//! - `gateway`: Trait for the HTTP side of authentication (`AuthGateway`)
//! - `store`: Trait for token persistence (`TokenStore`)
//! - `manager`: Session lifecycle management (`SessionManager`)

pub mod event;
pub mod gateway;
pub mod manager;
pub mod model;
pub mod store;

pub use event::SessionEvent;
pub use gateway::AuthGateway;
pub use manager::SessionManager;
pub use model::SessionState;
pub use store::TokenStore;
