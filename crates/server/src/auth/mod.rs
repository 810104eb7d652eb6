//! # Authentication
//!
//! Login, logout and identity endpoints.

pub mod handlers;
