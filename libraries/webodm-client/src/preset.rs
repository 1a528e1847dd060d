//! Persistence for named processing-option presets.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::Result;

/// Write a named preset to `<name>.preset`.
pub fn save_preset(name: &str, options: &Map<String, Value>) -> Result<()> {
    let path = format!("{name}.preset");
    debug!(path = %path, "saving preset");
    let file = File::create(&path)?;
    serde_json::to_writer(file, options)?;
    Ok(())
}

/// Read a preset file written by [`save_preset`].
///
/// Unparsable content falls back to the default preset; a missing or
/// unreadable file is an error.
pub fn read_preset(path: impl AsRef<Path>) -> Result<Map<String, Value>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    match serde_json::from_reader(BufReader::new(file)) {
        Ok(Value::Object(options)) => Ok(options),
        Ok(_) | Err(_) => {
            warn!(path = %path.display(), "preset file unparsable, using default preset");
            Ok(default_preset())
        }
    }
}

/// Reconstruct an options map from the `[{"name": .., "value": ..}, ..]`
/// preset list shape the API uses.
///
/// Entries without a string `name` are skipped.
pub fn preset_to_options(items: &[Value]) -> Map<String, Value> {
    items
        .iter()
        .filter_map(|item| {
            let name = item.get("name")?.as_str()?;
            let value = item.get("value")?.clone();
            Some((name.to_string(), value))
        })
        .collect()
}

fn default_preset() -> Map<String, Value> {
    let mut options = Map::new();
    options.insert("auto-boundary".to_string(), Value::Bool(true));
    options
}
