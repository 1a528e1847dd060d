//! Read-only view over a WebODM project.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::task::parse_timestamp;

/// A project as returned by the API.
///
/// Like [`crate::Task`], this wraps the raw JSON object and never mutates
/// it; every accessor falls back to a neutral default when a field is
/// absent or malformed.
#[derive(Debug, Clone)]
pub struct Project {
    data: Value,
}

impl Project {
    /// Wrap a raw project object.
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Project identifier.
    pub fn id(&self) -> i64 {
        self.data.get("id").and_then(Value::as_i64).unwrap_or(0)
    }

    /// Project name.
    pub fn name(&self) -> String {
        self.data
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Project description, if one was set.
    pub fn description(&self) -> Option<String> {
        self.data
            .get("description")
            .and_then(Value::as_str)
            .map(ToString::to_string)
    }

    /// Creation timestamp, `None` when absent or not in the API's format.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.data.get("created_at"))
    }

    /// Identifiers of the tasks contained in this project.
    pub fn task_list(&self) -> Vec<String> {
        self.tasks().map(ToString::to_string).collect()
    }

    /// Number of tasks contained in this project.
    pub fn task_count(&self) -> usize {
        self.data
            .get("tasks")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Iterate over the contained task identifiers without copying them.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.data
            .get("tasks")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    /// Whether the authenticated user may add tasks to this project.
    pub fn can_add(&self) -> bool {
        self.has_permission("add")
    }

    /// Whether the authenticated user may delete this project.
    pub fn can_delete(&self) -> bool {
        self.has_permission("delete")
    }

    /// Whether the authenticated user may change this project.
    pub fn can_change(&self) -> bool {
        self.has_permission("change")
    }

    /// Whether the authenticated user may view this project.
    pub fn can_view(&self) -> bool {
        self.has_permission("view")
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.data
            .get("permissions")
            .and_then(Value::as_array)
            .map_or(false, |perms| {
                perms.iter().filter_map(Value::as_str).any(|p| p == permission)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_project() -> Project {
        Project::new(json!({
            "id": 7,
            "name": "North field",
            "description": "May survey flights",
            "created_at": "2023-05-01T10:15:30.123456Z",
            "tasks": [
                "4338d342-e9e5-4a2d-a97d-e5d8c9348e4d",
                "e9b8a6d0-7a8c-4f0a-8f1e-2f1b6f6d2c11"
            ],
            "permissions": ["add", "change", "view"]
        }))
    }

    #[test]
    fn test_basic_accessors() {
        let project = sample_project();
        assert_eq!(project.id(), 7);
        assert_eq!(project.name(), "North field");
        assert_eq!(project.description().as_deref(), Some("May survey flights"));
        assert!(project.date().is_some());
    }

    #[test]
    fn test_task_iteration() {
        let project = sample_project();
        assert_eq!(project.task_count(), 2);
        assert_eq!(project.task_list().len(), 2);

        let first = project.tasks().next().unwrap();
        assert_eq!(first, "4338d342-e9e5-4a2d-a97d-e5d8c9348e4d");
    }

    #[test]
    fn test_permission_flags() {
        let project = sample_project();
        assert!(project.can_add());
        assert!(project.can_change());
        assert!(project.can_view());
        assert!(!project.can_delete());
    }

    #[test]
    fn test_defaults_on_empty_object() {
        let project = Project::new(json!({}));
        assert_eq!(project.id(), 0);
        assert_eq!(project.name(), "");
        assert!(project.description().is_none());
        assert!(project.date().is_none());
        assert_eq!(project.task_count(), 0);
        assert_eq!(project.tasks().count(), 0);
        assert!(!project.can_add());
        assert!(!project.can_delete());
        assert!(!project.can_change());
        assert!(!project.can_view());
    }

    #[test]
    fn test_date_rejects_malformed_timestamp() {
        let project = Project::new(json!({ "created_at": "01/05/2023 10:15" }));
        assert!(project.date().is_none());
    }
}
