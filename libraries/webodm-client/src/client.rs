//! Main WebODM client.

use chrono::{DateTime, Duration, Utc};
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, Result};
use crate::project::Project;
use crate::task::Task;
use crate::types::{
    CreateProjectRequest, ProjectFilter, RemoveTaskResponse, TokenRequest, TokenResponse,
    WebOdmConfig,
};

/// Main client for interacting with a WebODM server.
///
/// The client validates the server URL at construction, obtains a bearer
/// token lazily on the first authenticated request, and refreshes it once
/// it is older than the configured lifetime. Each method issues exactly
/// one HTTP request; a non-success status is reported as absent data
/// (`None` / `false`) rather than an error.
///
/// # Example
///
/// ```ignore
/// use webodm_client::{WebOdmClient, WebOdmConfig, ProjectFilter};
///
/// // Create client
/// let config = WebOdmConfig::new("https://demo.webodm.org", "admin", "secret");
/// let client = WebOdmClient::new(config)?;
///
/// // List projects
/// if let Some(projects) = client.list_projects(&ProjectFilter::new()).await? {
///     for project in &projects {
///         println!("{}: {} tasks", project.name(), project.task_count());
///     }
/// }
///
/// // Read a single task
/// if let Some(task) = client.read_task(2, "4338d342-e9e5-4a2d").await? {
///     println!("{} is {:?}", task.name(), task.status());
/// }
/// ```
pub struct WebOdmClient {
    http: RwLock<Option<reqwest::Client>>,
    base_url: Url,
    username: String,
    password: String,
    token_ttl: Duration,
    auth: RwLock<AuthState>,
}

/// Cached bearer token plus the instant it was obtained.
struct AuthState {
    token: String,
    acquired_at: DateTime<Utc>,
}

impl WebOdmClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails when the URL is not `http`/`https`, has no hostname, or
    /// carries an unusable port. No request is issued yet.
    pub fn new(config: WebOdmConfig) -> Result<Self> {
        let mut base_url =
            Url::parse(&config.url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                base_url.scheme()
            )));
        }
        if base_url.host_str().map_or(true, str::is_empty) {
            return Err(ClientError::InvalidUrl("missing hostname".into()));
        }

        // Only scheme, host and port identify the server.
        base_url.set_path("");
        base_url.set_query(None);
        base_url.set_fragment(None);

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .user_agent(format!("webodm-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http: RwLock::new(Some(http)),
            base_url,
            username: config.username,
            password: config.password,
            token_ttl: Duration::seconds(config.token_ttl_secs),
            auth: RwLock::new(AuthState {
                token: String::new(),
                acquired_at: Utc::now(),
            }),
        })
    }

    /// Get the validated base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ─────────────────────────────────────────────────────────────────────
    // Token lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Get a usable bearer token.
    ///
    /// Returns the cached token while it is non-empty and younger than
    /// the configured lifetime, otherwise refreshes it first.
    pub async fn token(&self) -> Result<String> {
        {
            let auth = self.auth.read().await;
            if !auth.token.is_empty() && Utc::now() - auth.acquired_at < self.token_ttl {
                return Ok(auth.token.clone());
            }
        }
        self.token_refresh().await
    }

    /// Request a fresh token from the server.
    ///
    /// On HTTP 200 the new token replaces the cached one and its age is
    /// reset. Any other status leaves the cache untouched; the previous
    /// (possibly empty) token is returned and subsequent requests will
    /// surface the rejection as absent data.
    pub async fn token_refresh(&self) -> Result<String> {
        let http = self.http().await?;
        let url = self.endpoint("/api/token-auth/");
        debug!(url = %url, username = %self.username, "requesting auth token");

        let request = TokenRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        };

        let response = http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();

        if status == StatusCode::OK {
            let body: TokenResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("failed to parse token response: {e}"))
            })?;

            let mut auth = self.auth.write().await;
            auth.token = body.token;
            auth.acquired_at = Utc::now();
            info!("auth token refreshed");
            Ok(auth.token.clone())
        } else {
            warn!(status = %status, "token request rejected");
            Ok(self.auth.read().await.token.clone())
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Projects
    // ─────────────────────────────────────────────────────────────────────

    /// Create a project.
    ///
    /// Returns the created project on HTTP 201, `None` otherwise.
    pub async fn create_project(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Option<Project>> {
        let http = self.http().await?;
        let auth = self.auth_header().await?;
        let url = self.endpoint("/api/projects/");
        debug!(url = %url, name = %name, "creating project");

        let request = CreateProjectRequest {
            name: name.to_string(),
            description: description.to_string(),
        };

        let response = http
            .post(url)
            .header(AUTHORIZATION, auth)
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();

        if status == StatusCode::CREATED {
            let data: Value = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("failed to parse project response: {e}"))
            })?;
            Ok(Some(Project::new(data)))
        } else {
            debug!(status = %status, "project not created");
            Ok(None)
        }
    }

    /// List projects matching the given filters.
    ///
    /// Returns the matching projects on HTTP 200, `None` otherwise.
    pub async fn list_projects(&self, filter: &ProjectFilter) -> Result<Option<Vec<Project>>> {
        let http = self.http().await?;
        let auth = self.auth_header().await?;
        let url = self.endpoint("/api/projects/");
        debug!(url = %url, "listing projects");

        let response = http
            .get(url)
            .header(AUTHORIZATION, auth)
            .query(filter)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();

        if status == StatusCode::OK {
            let data: Vec<Value> = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("failed to parse project list: {e}"))
            })?;
            debug!(projects = data.len(), "listed projects");
            Ok(Some(data.into_iter().map(Project::new).collect()))
        } else {
            debug!(status = %status, "project listing rejected");
            Ok(None)
        }
    }

    /// Read a single project.
    ///
    /// Returns the project on HTTP 200, `None` otherwise.
    pub async fn read_project(&self, project_id: i64) -> Result<Option<Project>> {
        let http = self.http().await?;
        let auth = self.auth_header().await?;
        let url = self.endpoint(&format!("/api/projects/{project_id}"));
        debug!(url = %url, project_id, "reading project");

        let response = http
            .get(url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();

        if status == StatusCode::OK {
            let data: Value = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("failed to parse project response: {e}"))
            })?;
            Ok(Some(Project::new(data)))
        } else {
            debug!(status = %status, "project not readable");
            Ok(None)
        }
    }

    /// Delete a project.
    ///
    /// Returns `true` only on HTTP 204.
    pub async fn delete_project(&self, project_id: i64) -> Result<bool> {
        let http = self.http().await?;
        let auth = self.auth_header().await?;
        let url = self.endpoint(&format!("/api/projects/{project_id}"));
        debug!(url = %url, project_id, "deleting project");

        let response = http
            .delete(url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            Ok(true)
        } else {
            debug!(status = %status, "project not deleted");
            Ok(false)
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Tasks
    // ─────────────────────────────────────────────────────────────────────

    /// List the tasks of a project.
    ///
    /// Returns the tasks on HTTP 200, `None` otherwise.
    pub async fn list_project_tasks(&self, project_id: i64) -> Result<Option<Vec<Task>>> {
        let http = self.http().await?;
        let auth = self.auth_header().await?;
        let url = self.endpoint(&format!("/api/projects/{project_id}/tasks/"));
        debug!(url = %url, project_id, "listing tasks");

        let response = http
            .get(url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();

        if status == StatusCode::OK {
            let data: Vec<Value> = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("failed to parse task list: {e}"))
            })?;
            debug!(tasks = data.len(), "listed tasks");
            Ok(Some(data.into_iter().map(Task::new).collect()))
        } else {
            debug!(status = %status, "task listing rejected");
            Ok(None)
        }
    }

    /// Read a single task.
    ///
    /// Returns the task on HTTP 200, `None` otherwise.
    pub async fn read_task(&self, project_id: i64, task_id: &str) -> Result<Option<Task>> {
        let http = self.http().await?;
        let auth = self.auth_header().await?;
        let url = self.endpoint(&format!("/api/projects/{project_id}/tasks/{task_id}/"));
        debug!(url = %url, task_id = %task_id, "reading task");

        let response = http
            .get(url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();

        if status == StatusCode::OK {
            let data: Value = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("failed to parse task response: {e}"))
            })?;
            Ok(Some(Task::new(data)))
        } else {
            debug!(status = %status, "task not readable");
            Ok(None)
        }
    }

    /// Delete a task through its removal action.
    ///
    /// Returns `true` only when the server answers HTTP 200 with a body
    /// confirming the removal.
    pub async fn delete_task(&self, project_id: i64, task_id: &str) -> Result<bool> {
        let http = self.http().await?;
        let auth = self.auth_header().await?;
        let url = self.endpoint(&format!("/api/projects/{project_id}/tasks/{task_id}/remove/"));
        debug!(url = %url, task_id = %task_id, "deleting task");

        let response = http
            .post(url)
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();

        if status == StatusCode::OK {
            let body: RemoveTaskResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("failed to parse removal response: {e}"))
            })?;
            Ok(body.success)
        } else {
            debug!(status = %status, "task not deleted");
            Ok(false)
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Release the underlying HTTP session.
    ///
    /// Every operation afterwards fails with [`ClientError::Closed`].
    /// Dropping the client releases the session as well, so calling this
    /// is only needed to invalidate a client that stays alive.
    pub async fn close(&self) {
        let mut http = self.http.write().await;
        *http = None;
        debug!("client closed");
    }

    /// Whether [`close`](Self::close) was called.
    pub async fn closed(&self) -> bool {
        self.http.read().await.is_none()
    }

    async fn http(&self) -> Result<reqwest::Client> {
        let guard = self.http.read().await;
        guard.as_ref().cloned().ok_or(ClientError::Closed)
    }

    async fn auth_header(&self) -> Result<String> {
        Ok(format!("JWT {}", self.token().await?))
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }
}

/// Map connection-level failures onto their own variant.
fn map_send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}
