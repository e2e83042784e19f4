//! Error types shared by the geometry factory, the assembler and the controllers.

use thiserror::Error;

/// Failure of a single geometry builder call.
///
/// A failing builder never touches geometry that was built before it, so the
/// assembler can drop the affected subsystem and keep its siblings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid parameter for {builder}: {reason}")]
    InvalidParameter {
        builder: &'static str,
        reason: String,
    },
    #[error("polygon triangulation failed: {0}")]
    Triangulation(String),
}

impl GeometryError {
    pub(crate) fn invalid(builder: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            builder,
            reason: reason.into(),
        }
    }
}

/// Failure to act on the scene graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// The named handle is absent from the registry or no longer resolves to a node.
    #[error("no scene node registered under handle `{0}`")]
    LookupFailure(String),
    /// A replacement geometry for an existing node could not be built.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
