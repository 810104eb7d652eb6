//! # HTTP Middleware
//!
//! Middleware applied to protected routes.

pub mod auth;
