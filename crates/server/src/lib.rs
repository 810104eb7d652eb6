//! # Deskline API Server
//!
//! Axum-based HTTP API server for the Deskline help desk.
//!
//! ## Modules
//!
//! - [`identity`]: Email login and role derivation
//! - [`sessions`]: Opaque-token session store with idle timeout
//! - [`lifecycle`]: The ticket state machine and its authorization rules
//! - [`dashboard`]: Role-scoped aggregate counts
//! - [`intelligence`]: Client for the external suggestion/similarity service
//! - [`dto`]: Request/response data transfer objects
//! - [`middleware`]: HTTP middleware (session auth)
//! - [`router`]: API route configuration

pub mod auth;
pub mod dashboard;
pub mod dto;
pub mod identity;
pub mod intelligence;
pub mod lifecycle;
pub mod middleware;
pub mod router;
pub mod sessions;
pub mod teams;
pub mod tickets;

pub use router::create_app_router;

/// Application state shared across request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:           sea_orm::DbConn,
    /// Client for the external intelligence service
    pub intelligence: intelligence::IntelligenceClient,
}
