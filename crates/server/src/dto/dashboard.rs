//! # Dashboard Data Transfer Objects
//!
//! Response types for the role-scoped dashboard and the help-desk queue.

use serde::Serialize;

use crate::dashboard::{HelpDeskStats, ScopedStats};
use crate::identity::Role;

/// The stats payload, shaped by the caller's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DashboardStats {
    /// HelpDesk: global totals plus the per-team summary
    Global(HelpDeskStats),
    /// Requester and Support: counts scoped to the caller
    Scoped(ScopedStats),
}

/// Response for the dashboard endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    /// The role the stats were computed for
    pub role:    Role,
    pub stats:   DashboardStats,
}

/// Response for the help-desk queue listing, read from the
/// `helpdesk_tickets` view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueResponse {
    pub success: bool,
    pub tickets: Vec<entity::helpdesk_tickets::Model>,
}
