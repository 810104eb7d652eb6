//! # Team Handlers
//!
//! The team directory endpoint. The help desk uses it to populate the
//! assign dropdown; it is read-only.

use axum::Json;
use entity::{teams, Teams};
use error::Result;
use sea_orm::{EntityTrait, QueryOrder};

use crate::{
    dto::teams::{TeamListResponse, TeamResponse},
    AppState,
};

/// List all teams, ordered by name.
pub async fn list_teams_handler_inner(state: &AppState) -> Result<Json<TeamListResponse>> {
    let team_rows = Teams::find()
        .order_by_asc(teams::Column::TeamName)
        .all(&state.db)
        .await?;

    let team_responses: Vec<TeamResponse> = team_rows.into_iter().map(TeamResponse::from).collect();

    Ok(Json(TeamListResponse {
        success: true,
        teams:   team_responses,
    }))
}
