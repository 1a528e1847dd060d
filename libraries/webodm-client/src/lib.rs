//! WebODM Client
//!
//! HTTP client library for interacting with the WebODM REST API.
//!
//! # Features
//!
//! - **Authentication**: username/password token auth with time-based refresh
//! - **Projects**: create, list (with filters), read, delete
//! - **Tasks**: list per project, read, delete
//! - **Views**: typed read-only accessors over the raw JSON the API returns
//! - **Presets**: read/write named processing-option presets
//!
//! # Example
//!
//! ```ignore
//! use webodm_client::{ProjectFilter, WebOdmClient, WebOdmConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client
//!     let config = WebOdmConfig::new("https://demo.webodm.org", "admin", "secret");
//!     let client = WebOdmClient::new(config)?;
//!
//!     // Create a project and inspect its tasks
//!     if let Some(project) = client.create_project("North field", "May flights").await? {
//!         println!("Created project {}", project.id());
//!
//!         if let Some(tasks) = client.list_project_tasks(project.id()).await? {
//!             for task in &tasks {
//!                 println!("{} is {:?}", task.name(), task.status());
//!             }
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod format;
mod preset;
mod project;
mod task;
mod types;

// Re-export main types
pub use client::WebOdmClient;
pub use error::{ClientError, Result};
pub use project::Project;
pub use task::{Task, TaskStatus};
pub use types::{ProjectFilter, WebOdmConfig, DEFAULT_TOKEN_TTL_SECS};

// Re-export helpers for direct use if needed
pub use format::{format_size, format_time_span};
pub use preset::{preset_to_options, read_preset, save_preset};
