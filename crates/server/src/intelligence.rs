//! # External Intelligence Client
//!
//! HTTP client for the remote service that suggests a team, drafts a
//! solution, finds similar tickets and indexes new ones. Everything it
//! returns is advisory: it never mutates ticket state here, and any
//! failure — non-2xx, timeout, connect error, malformed body — degrades to
//! "no suggestion" with a warning instead of failing the page. Requests are
//! independent and timeout-bound so a hung remote call cannot block other
//! tickets' operations.

use std::time::Duration;

use error::{AppError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration for the intelligence client.
#[derive(Debug, Clone)]
pub struct IntelligenceConfig {
    /// Base URL of the remote service
    pub base_url:      String,
    /// Per-request timeout in seconds
    pub timeout_secs:  u64,
    /// `top_k` used when the caller does not specify one
    pub default_top_k: u32,
}

impl Default for IntelligenceConfig {
    fn default() -> Self {
        Self {
            base_url:      "http://localhost:8000".to_string(),
            timeout_secs:  10,
            default_top_k: 5,
        }
    }
}

/// A team routing suggestion for a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSuggestion {
    #[serde(default)]
    pub ticket_id:          i32,
    pub assigned_team_id:   String,
    pub assigned_team_name: String,
    #[serde(default)]
    pub reasoning:          String,
}

/// A drafted solution with its ranked sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionSuggestion {
    #[serde(default)]
    pub ticket_id: i32,
    pub solution:  Option<String>,
    #[serde(default)]
    pub sources:   Vec<SolutionSource>,
}

/// One ranked source ticket behind a solution suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionSource {
    pub ticket_id: i32,
    pub title:     Option<String>,
    pub score:     Option<f64>,
}

/// One hit from the similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarTicket {
    pub ticket_id:          i32,
    pub score:              f64,
    pub title:              Option<String>,
    pub answer:             Option<String>,
    pub assigned_team_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct SimilarResponse {
    #[serde(default)]
    results: Vec<SimilarTicket>,
}

/// The wire body every advisory endpoint accepts.
#[derive(Debug, Clone, Serialize)]
struct SuggestionQuery {
    ticket_id: i32,
    top_k:     u32,
}

/// Notification kinds the remote service can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    TicketAssignedUser,
    TicketAssignedTeam,
    TicketResolved,
    TicketCanceled,
}

impl NotificationKind {
    fn endpoint(&self) -> &'static str {
        match self {
            NotificationKind::TicketAssignedUser => "/notify/ticket-assigned/user",
            NotificationKind::TicketAssignedTeam => "/notify/ticket-assigned/team",
            NotificationKind::TicketResolved => "/notify/ticket-resolved",
            NotificationKind::TicketCanceled => "/notify/ticket-canceled",
        }
    }
}

/// Body for a notification request.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationRequest {
    pub ticket_id: i32,
    pub recipient: String,
    pub user_name: String,
}

/// Client for the external intelligence service.
#[derive(Debug, Clone)]
pub struct IntelligenceClient {
    http:          reqwest::Client,
    base_url:      String,
    default_top_k: u32,
}

impl IntelligenceClient {
    /// Build a client from configuration.
    pub fn new(config: &IntelligenceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build intelligence client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_top_k: config.default_top_k,
        })
    }

    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }

    fn top_k(&self, top_k: Option<u32>) -> u32 { top_k.unwrap_or(self.default_top_k).max(1) }

    /// POST a JSON body and decode a JSON response; all failures become `None`.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Option<T>
    where
        B: Serialize,
        T: serde::de::DeserializeOwned,
    {
        let url = self.url(path);
        let response = match self.http.post(&url).json(body).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Intelligence request failed");
                return None;
            },
        };

        if !response.status().is_success() {
            warn!(url = %url, status = %response.status(), "Intelligence request was not successful");
            return None;
        }

        match response.json::<T>().await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(url = %url, error = %e, "Intelligence response body was malformed");
                None
            },
        }
    }

    /// POST a JSON body where only the status matters.
    async fn post_ok<B: Serialize>(&self, path: &str, body: &B) -> bool {
        let url = self.url(path);
        match self.http.post(&url).json(body).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(url = %url, status = %response.status(), "Intelligence request was not successful");
                false
            },
            Err(e) => {
                warn!(url = %url, error = %e, "Intelligence request failed");
                false
            },
        }
    }

    /// Suggest a team for a ticket.
    pub async fn suggest_team(&self, ticket_id: i32, top_k: Option<u32>) -> Option<TeamSuggestion> {
        let body = SuggestionQuery {
            ticket_id,
            top_k: self.top_k(top_k),
        };
        self.post_json("/assign", &body).await
    }

    /// Suggest a solution for a ticket.
    pub async fn suggest_solution(&self, ticket_id: i32, top_k: Option<u32>) -> Option<SolutionSuggestion> {
        let body = SuggestionQuery {
            ticket_id,
            top_k: self.top_k(top_k),
        };
        self.post_json("/solution", &body).await
    }

    /// Rank tickets similar to the given one. Failures are an empty list.
    pub async fn find_similar(&self, ticket_id: i32, top_k: Option<u32>) -> Vec<SimilarTicket> {
        let body = SuggestionQuery {
            ticket_id,
            top_k: self.top_k(top_k),
        };
        self.post_json::<_, SimilarResponse>("/similar", &body)
            .await
            .map(|r| r.results)
            .unwrap_or_default()
    }

    /// Forward a newly created ticket so the remote service can index and
    /// embed it. The local store is the system of record; this is
    /// best-effort only.
    pub async fn create_ticket(&self, ticket: &entity::tickets::Model) -> bool {
        self.post_ok("/tickets", ticket).await
    }

    /// Deliver a notification. Failures are logged and reported as `false`.
    pub async fn notify(&self, kind: NotificationKind, request: &NotificationRequest) -> bool {
        self.post_ok(kind.endpoint(), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = IntelligenceClient::new(&IntelligenceConfig {
            base_url: "http://intel.local/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.url("/assign"), "http://intel.local/assign");
    }

    #[test]
    fn test_top_k_defaults_and_floors() {
        let client = IntelligenceClient::new(&IntelligenceConfig::default()).unwrap();
        assert_eq!(client.top_k(None), 5);
        assert_eq!(client.top_k(Some(3)), 3);
        assert_eq!(client.top_k(Some(0)), 1);
    }

    #[test]
    fn test_notification_endpoints() {
        assert_eq!(
            NotificationKind::TicketAssignedUser.endpoint(),
            "/notify/ticket-assigned/user"
        );
        assert_eq!(
            NotificationKind::TicketAssignedTeam.endpoint(),
            "/notify/ticket-assigned/team"
        );
        assert_eq!(NotificationKind::TicketResolved.endpoint(), "/notify/ticket-resolved");
        assert_eq!(NotificationKind::TicketCanceled.endpoint(), "/notify/ticket-canceled");
    }
}
