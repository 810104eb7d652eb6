//! # Data Transfer Objects
//!
//! Request and response types for the HTTP API.

pub mod auth;
pub mod dashboard;
pub mod teams;
pub mod tickets;
