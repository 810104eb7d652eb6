//! # API Router Configuration
//!
//! Configures API routes for the Deskline application. Handlers live next
//! to their domain modules; the wrappers here only adapt Axum extractors
//! onto them.

use axum::{
    extract::{Extension, Path, Query, State as AxumState},
    middleware,
    routing::{get, post},
    Json,
    Router,
};
use error::Result;
use tower_http::trace::TraceLayer;

use crate::{
    dto::{
        auth::{AuthSuccessResponse, IdentityResponse, LoginRequest, SuccessResponse, UserListResponse},
        dashboard::{DashboardResponse, QueueResponse},
        teams::TeamListResponse,
        tickets::{
            AssignTicketRequest,
            CreateTicketRequest,
            ResolveTicketRequest,
            SimilarTicketsResponse,
            SuggestRequest,
            SuggestSolutionResponse,
            SuggestTeamResponse,
            TicketActionResponse,
            TicketListQuery,
            TicketListResponse,
        },
    },
    identity::Identity,
    sessions::SessionToken,
    AppState,
};

/// Creates the API router with all routes
///
/// # Arguments
///
/// * `state` - Application state containing DB pool and the intelligence client
///
/// # Returns
///
/// Configured Axum router with all routes
pub fn create_router(state: AppState) -> Router {
    // Protected routes that require a live session
    let protected_routes = Router::new()
        .route("/api/v1/auth/logout", post(logout_handler))
        .route("/api/v1/auth/me", get(me_handler))
        .route("/api/v1/teams", get(list_teams_handler))
        .route(
            "/api/v1/tickets",
            get(list_tickets_handler).post(create_ticket_handler),
        )
        .route("/api/v1/tickets/:id/assign", post(assign_ticket_handler))
        .route("/api/v1/tickets/:id/start", post(start_work_handler))
        .route("/api/v1/tickets/:id/resolve", post(resolve_ticket_handler))
        .route("/api/v1/tickets/:id/cancel", post(cancel_ticket_handler))
        .route(
            "/api/v1/tickets/:id/dismiss-suggestion",
            post(dismiss_suggestion_handler),
        )
        .route("/api/v1/tickets/:id/suggest-team", post(suggest_team_handler))
        .route(
            "/api/v1/tickets/:id/suggest-solution",
            post(suggest_solution_handler),
        )
        .route("/api/v1/tickets/:id/similar", post(find_similar_handler))
        .route("/api/v1/dashboard", get(dashboard_handler))
        .route("/api/v1/dashboard/queue", get(queue_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::session_auth,
        ));

    // Public routes that don't require authentication
    let public_routes = Router::new()
        .route("/api/v1/auth/users", get(list_users_handler))
        .route("/api/v1/auth/login", post(login_handler));

    public_routes
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wrapper handler for the login user list
async fn list_users_handler(AxumState(state): AxumState<AppState>) -> Result<Json<UserListResponse>> {
    crate::auth::handlers::list_users_handler_inner(&state).await
}

/// Wrapper handler for login
async fn login_handler(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthSuccessResponse>> {
    crate::auth::handlers::login_handler_inner(&state, req).await
}

/// Wrapper handler for logout
async fn logout_handler(
    AxumState(state): AxumState<AppState>,
    Extension(token): Extension<SessionToken>,
) -> Result<Json<SuccessResponse>> {
    crate::auth::handlers::logout_handler_inner(&state, token).await
}

/// Wrapper handler for the current identity
async fn me_handler(Extension(identity): Extension<Identity>) -> Result<Json<IdentityResponse>> {
    crate::auth::handlers::me_handler_inner(identity).await
}

/// Wrapper handler for the team directory
async fn list_teams_handler(AxumState(state): AxumState<AppState>) -> Result<Json<TeamListResponse>> {
    crate::teams::list_teams_handler_inner(&state).await
}

/// Wrapper handler for the role-scoped ticket list
async fn list_tickets_handler(
    AxumState(state): AxumState<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<TicketListQuery>,
) -> Result<Json<TicketListResponse>> {
    crate::tickets::list_tickets_handler_inner(&state, identity, query).await
}

/// Wrapper handler for ticket creation
async fn create_ticket_handler(
    AxumState(state): AxumState<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<CreateTicketRequest>,
) -> Result<Json<TicketActionResponse>> {
    crate::tickets::create_ticket_handler_inner(&state, identity, req).await
}

/// Wrapper handler for assigning a ticket to a team
async fn assign_ticket_handler(
    AxumState(state): AxumState<AppState>,
    Extension(identity): Extension<Identity>,
    Path(ticket_id): Path<i32>,
    Json(req): Json<AssignTicketRequest>,
) -> Result<Json<TicketActionResponse>> {
    crate::tickets::assign_ticket_handler_inner(&state, identity, ticket_id, req).await
}

/// Wrapper handler for starting work on a ticket
async fn start_work_handler(
    AxumState(state): AxumState<AppState>,
    Extension(identity): Extension<Identity>,
    Path(ticket_id): Path<i32>,
) -> Result<Json<TicketActionResponse>> {
    crate::tickets::start_work_handler_inner(&state, identity, ticket_id).await
}

/// Wrapper handler for resolving a ticket
async fn resolve_ticket_handler(
    AxumState(state): AxumState<AppState>,
    Extension(identity): Extension<Identity>,
    Path(ticket_id): Path<i32>,
    Json(req): Json<ResolveTicketRequest>,
) -> Result<Json<TicketActionResponse>> {
    crate::tickets::resolve_ticket_handler_inner(&state, identity, ticket_id, req).await
}

/// Wrapper handler for canceling a ticket
async fn cancel_ticket_handler(
    AxumState(state): AxumState<AppState>,
    Extension(identity): Extension<Identity>,
    Path(ticket_id): Path<i32>,
) -> Result<Json<TicketActionResponse>> {
    crate::tickets::cancel_ticket_handler_inner(&state, identity, ticket_id).await
}

/// Wrapper handler for dismissing an advisory suggestion
async fn dismiss_suggestion_handler(
    AxumState(state): AxumState<AppState>,
    Extension(identity): Extension<Identity>,
    Path(ticket_id): Path<i32>,
) -> Result<Json<TicketActionResponse>> {
    crate::tickets::dismiss_suggestion_handler_inner(&state, identity, ticket_id).await
}

/// Wrapper handler for the team suggestion
async fn suggest_team_handler(
    AxumState(state): AxumState<AppState>,
    Extension(identity): Extension<Identity>,
    Path(ticket_id): Path<i32>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<SuggestTeamResponse>> {
    crate::tickets::suggest_team_handler_inner(&state, identity, ticket_id, req).await
}

/// Wrapper handler for the solution suggestion
async fn suggest_solution_handler(
    AxumState(state): AxumState<AppState>,
    Extension(identity): Extension<Identity>,
    Path(ticket_id): Path<i32>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<SuggestSolutionResponse>> {
    crate::tickets::suggest_solution_handler_inner(&state, identity, ticket_id, req).await
}

/// Wrapper handler for the similarity search
async fn find_similar_handler(
    AxumState(state): AxumState<AppState>,
    Extension(identity): Extension<Identity>,
    Path(ticket_id): Path<i32>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<SimilarTicketsResponse>> {
    crate::tickets::find_similar_handler_inner(&state, identity, ticket_id, req).await
}

/// Wrapper handler for the role-scoped dashboard
async fn dashboard_handler(
    AxumState(state): AxumState<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<DashboardResponse>> {
    crate::dashboard::dashboard_handler_inner(&state, identity).await
}

/// Wrapper handler for the help-desk queue
async fn queue_handler(
    AxumState(state): AxumState<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<QueueResponse>> {
    crate::dashboard::queue_handler_inner(&state, identity).await
}

/// Creates the health check router
pub fn create_health_router() -> Router { Router::new().route("/health", get(|| async { "OK" })) }

/// Creates the main application router
///
/// # Arguments
///
/// * `state` - Application state containing DB pool and the intelligence client
///
/// # Returns
///
/// Main router with health checks and API routes
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .merge(create_health_router())
        .merge(create_router(state))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_route() {
        let app = super::create_health_router();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = super::create_health_router();
        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
