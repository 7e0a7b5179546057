//! Generic JSON file read/write over buffered handles.
//!
//! Thin wrappers around `serde_json` used by [`SceneState`](crate::scene::SceneState)
//! and available to callers that store other documents next to the scene file
//! (replay indices, annotation dumps). Both functions are blocking; callers
//! are responsible for keeping them off latency-sensitive paths.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SceneError;

/// Serialize `value` as JSON to `path`, truncating any existing file.
///
/// Fails before writing anything if the path cannot be opened, so a failed
/// call on an unopenable path leaves prior file content untouched. There is
/// no partial-write cleanup beyond the truncate-on-open.
pub fn write_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), SceneError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Read and parse a JSON document from `path`.
///
/// Fails if the path cannot be opened or the content does not parse as `T`.
/// Record-shape validation beyond what `T`'s `Deserialize` impl enforces is
/// the caller's responsibility.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, SceneError> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
