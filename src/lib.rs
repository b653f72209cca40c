//! VaporZone - back-office client for a small vape shop
//!
//! Library interface: session state persisted to a credential store, a route
//! guard deciding which screens may render, and an API client that attaches
//! the bearer token and ends the session on any 401.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod shop;

pub use app::App;
pub use config::Config;
pub use error::Error;
pub use session::{Session, SessionState};
