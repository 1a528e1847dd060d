//! Types for WebODM API requests and configuration.

use serde::{Deserialize, Serialize};

/// Default token lifetime in seconds before a mandatory refresh.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 21_600;

/// Configuration for connecting to a WebODM server.
#[derive(Debug, Clone)]
pub struct WebOdmConfig {
    /// Base URL of the server (e.g., "https://demo.webodm.org")
    pub url: String,
    /// Account username
    pub username: String,
    /// Account password
    pub password: String,
    /// Seconds a token stays valid before the client refreshes it
    pub token_ttl_secs: i64,
}

impl WebOdmConfig {
    /// Create a new config with the default token lifetime.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    /// Override the token lifetime.
    pub fn with_token_ttl(mut self, secs: i64) -> Self {
        self.token_ttl_secs = secs;
        self
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Request body for the token-auth endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Response from the token-auth endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

/// Request body for project creation.
#[derive(Debug, Serialize)]
pub(crate) struct CreateProjectRequest {
    pub name: String,
    pub description: String,
}

/// Response body of a task removal action.
#[derive(Debug, Deserialize)]
pub(crate) struct RemoveTaskResponse {
    #[serde(default)]
    pub success: bool,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query filters for listing projects.
///
/// Unset fields are omitted from the query string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectFilter {
    /// Free-text search over name and description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact project id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Exact name match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Exact description match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ProjectFilter {
    /// Create an empty filter (lists every visible project).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by free-text search.
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    /// Filter by project name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
