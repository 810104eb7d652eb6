//! # Team Data Transfer Objects
//!
//! Response types for the team directory endpoint.

use serde::Serialize;

/// Response for a single team
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamResponse {
    /// Team code, e.g. `NETWORK`
    pub team_id:          String,
    /// Display name
    pub team_name:        String,
    /// Team description
    pub team_description: Option<String>,
}

impl From<entity::teams::Model> for TeamResponse {
    fn from(team: entity::teams::Model) -> Self {
        Self {
            team_id:          team.team_id,
            team_name:        team.team_name,
            team_description: team.team_description,
        }
    }
}

/// Response for the team directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamListResponse {
    /// Whether the operation was successful
    pub success: bool,
    /// All teams, ordered by name
    pub teams:   Vec<TeamResponse>,
}
