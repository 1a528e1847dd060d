//! Read-only view over a WebODM task.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde_json::{Map, Value};

/// Processing state of a task.
///
/// `Unknown`: some unforeseen situation.
/// `Queued`: task's files have been uploaded and are waiting to be processed.
/// `Running`: task is currently being processed.
/// `Failed`: task has failed for some reason (not enough images, out of memory, etc).
/// `Completed`: task has completed. Assets are ready to be downloaded.
/// `Canceled`: task was manually canceled by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Unknown,
    Queued,
    Running,
    Failed,
    Completed,
    Canceled,
}

impl TaskStatus {
    /// Decode the numeric status code the API reports.
    ///
    /// Unrecognized codes map to `Unknown`.
    pub fn from_code(code: i64) -> Self {
        match code {
            10 => Self::Queued,
            20 => Self::Running,
            30 => Self::Failed,
            40 => Self::Completed,
            50 => Self::Canceled,
            _ => Self::Unknown,
        }
    }

    /// Whether the task has reached a terminal state.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Canceled | Self::Completed | Self::Failed)
    }
}

/// Timestamp format the API uses for `created_at` fields.
const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Parse a `created_at` value into a UTC instant.
///
/// Anything that is not a string in the expected format yields `None`.
pub(crate) fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let raw = value?.as_str()?;
    NaiveDateTime::parse_from_str(raw, CREATED_AT_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// A processing task as returned by the API.
///
/// Wraps the raw JSON object and exposes typed accessors. Each accessor
/// applies its own fallback when the field is absent or malformed, so a
/// partially-populated task never panics.
#[derive(Debug, Clone)]
pub struct Task {
    data: Value,
}

impl Task {
    /// Wrap a raw task object.
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Task identifier.
    pub fn id(&self) -> String {
        self.string_field("id")
    }

    /// Id of the project that owns this task.
    pub fn project(&self) -> i64 {
        self.data.get("project").and_then(Value::as_i64).unwrap_or(0)
    }

    /// Id of the processing node the task was assigned to, if any.
    pub fn processing_node(&self) -> Option<i64> {
        self.data.get("processing_node").and_then(Value::as_i64)
    }

    /// Name of the processing node the task was assigned to, if any.
    pub fn processing_node_name(&self) -> Option<String> {
        self.optional_string_field("processing_node_name")
    }

    /// Number of images in the task, if reported.
    pub fn images_count(&self) -> Option<i64> {
        self.data.get("images_count").and_then(Value::as_i64)
    }

    /// UUID assigned by the processing node, if any.
    pub fn uuid(&self) -> Option<String> {
        self.optional_string_field("uuid")
    }

    /// Task name.
    pub fn name(&self) -> String {
        self.string_field("name")
    }

    /// Time spent processing, as reported in milliseconds.
    pub fn processing_time(&self) -> Duration {
        self.data
            .get("processing_time")
            .and_then(Value::as_i64)
            .map_or_else(Duration::zero, Duration::milliseconds)
    }

    /// Current processing state.
    pub fn status(&self) -> TaskStatus {
        self.data
            .get("status")
            .and_then(Value::as_i64)
            .map_or(TaskStatus::Unknown, TaskStatus::from_code)
    }

    /// Message of the last error, empty when none occurred.
    pub fn last_error(&self) -> String {
        self.string_field("last_error")
    }

    /// EPSG code of the output coordinate system, if set.
    pub fn epsg(&self) -> Option<i64> {
        self.data.get("epsg").and_then(Value::as_i64)
    }

    /// Size of the task's assets in megabytes, if reported.
    pub fn size(&self) -> Option<f64> {
        self.data.get("size").and_then(Value::as_f64)
    }

    /// Processing options, reconstructed from the preset list the API
    /// reports into a name → value map.
    pub fn options(&self) -> Map<String, Value> {
        self.data
            .get("options")
            .and_then(Value::as_array)
            .map(|items| crate::preset::preset_to_options(items))
            .unwrap_or_default()
    }

    /// Raw statistics object.
    pub fn statistics(&self) -> Map<String, Value> {
        self.data
            .get("statistics")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    /// Reconstructed area in m², if available.
    pub fn area(&self) -> Option<f64> {
        self.statistic("area").and_then(Value::as_f64)
    }

    /// Ground sample distance in cm, if available.
    pub fn gsd(&self) -> Option<f64> {
        self.statistic("gsd").and_then(Value::as_f64)
    }

    /// Number of reconstructed points, if available.
    pub fn points(&self) -> Option<i64> {
        self.statistic("pointcloud")
            .and_then(|pc| pc.get("points"))
            .and_then(Value::as_i64)
    }

    /// Identifiers of the assets ready for download.
    pub fn available_assets(&self) -> Vec<String> {
        self.string_list_field("available_assets")
    }

    /// Tags attached to the task.
    pub fn tags(&self) -> Vec<String> {
        self.string_list_field("tags")
    }

    /// Creation timestamp, `None` when absent or not in the API's format.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.data.get("created_at"))
    }

    /// Time elapsed since the task finished processing.
    ///
    /// Zero while the task is still pending or when the creation
    /// timestamp is unusable.
    pub fn age(&self) -> Duration {
        if !self.finished() {
            return Duration::zero();
        }
        match self.date() {
            Some(date) => Utc::now() - (date + self.processing_time()),
            None => Duration::zero(),
        }
    }

    /// Image upload progress, 0.0 to 1.0.
    pub fn upload_progress(&self) -> f64 {
        self.progress_field("upload_progress")
    }

    /// Image resize progress, 0.0 to 1.0.
    pub fn resize_progress(&self) -> f64 {
        self.progress_field("resize_progress")
    }

    /// Processing progress, 0.0 to 1.0.
    pub fn running_progress(&self) -> f64 {
        self.progress_field("running_progress")
    }

    /// Whether the task was flagged as partially complete.
    pub fn partial(&self) -> bool {
        self.data
            .get("partial")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Whether the task reached a terminal state.
    pub fn finished(&self) -> bool {
        self.status().is_finished()
    }

    fn string_field(&self, key: &str) -> String {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    fn optional_string_field(&self, key: &str) -> Option<String> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .map(ToString::to_string)
    }

    fn string_list_field(&self, key: &str) -> Vec<String> {
        self.data
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn progress_field(&self, key: &str) -> f64 {
        self.data.get(key).and_then(Value::as_f64).unwrap_or(0.0)
    }

    fn statistic(&self, key: &str) -> Option<&Value> {
        self.data.get("statistics").and_then(|stats| stats.get(key))
    }
}
