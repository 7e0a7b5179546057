//! Ordered collection of object snapshots with JSON persistence.

use std::path::Path;

use crate::error::SceneError;
use crate::json;
use crate::object::ObjectState;

/// The serializable ordered snapshot of all simulation objects.
///
/// Object order is insertion order (capture order when produced by
/// [`SceneState::capture`](crate::world)) and is preserved round-trip through
/// the scene file. The collection never interprets order semantically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneState {
    objects: Vec<ObjectState>,
}

impl SceneState {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene from an existing list of object snapshots.
    pub fn from_objects(objects: Vec<ObjectState>) -> Self {
        Self { objects }
    }

    /// Append one object snapshot.
    pub fn push(&mut self, object: ObjectState) {
        self.objects.push(object);
    }

    /// Remove all object snapshots.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Number of object snapshots.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The object snapshots, in list order.
    pub fn objects(&self) -> &[ObjectState] {
        &self.objects
    }

    /// Iterate over the object snapshots in list order.
    pub fn iter(&self) -> std::slice::Iter<'_, ObjectState> {
        self.objects.iter()
    }

    /// Write the scene to `path` as a JSON array, one element per object.
    ///
    /// An empty scene writes `[]`, never `null`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        json::write_json(&self.objects, path)?;
        tracing::info!(objects = self.objects.len(), path = %path.display(), "scene saved");
        Ok(())
    }

    /// Replace the current object list with the contents of the file at `path`.
    ///
    /// The document is fully parsed before any state changes, so a failed
    /// load (unopenable path, malformed JSON) leaves the current list
    /// untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let objects: Vec<ObjectState> = json::read_json(path)?;
        tracing::info!(objects = objects.len(), path = %path.display(), "scene loaded");
        self.objects = objects;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SceneState {
    type Item = &'a ObjectState;
    type IntoIter = std::slice::Iter<'a, ObjectState>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
