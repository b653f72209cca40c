//! Session state and credential persistence

pub mod state;
pub mod store;

pub use state::{LogoutCallback, Session, SessionState};
pub use store::{CredentialStore, FileStore, MemoryStore};
