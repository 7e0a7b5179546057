//! Error type for scene capture, file I/O, and world reconstruction.

/// Errors produced while loading, saving, or rebuilding a scene.
///
/// Every operation in this crate is pass/fail with no retry; callers that
/// only care about success can treat the error as an opaque failure, which
/// keeps the original boolean contract while still carrying a cause.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The scene file could not be opened, read, or written.
    #[error("scene file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The scene file opened but did not contain valid JSON, or an in-memory
    /// value could not be serialized.
    #[error("scene JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    /// A polygon object's vertices do not form a usable convex shape, so no
    /// collider can be rebuilt for it.
    #[error("object {id} has a degenerate polygon shape")]
    DegenerateShape {
        /// Identifier of the offending object record.
        id: u64,
    },
}
