//! Backend REST API client

pub mod auth;
pub mod client;
pub mod contabilidad;
pub mod models;
pub mod productos;
pub mod transacciones;

pub use client::ApiClient;
pub use models::*;
