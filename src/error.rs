use thiserror::Error;

/// Errors raised while building a session from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("asset roster is empty, at least one placeable asset must be configured")]
    EmptyRoster,

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reasons a placement (or snapshot) did not produce a pose.
///
/// Both are expected conditions; the coordinator swallows them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no detected surface under the tapped point")]
    NoSurfaceHit,

    #[error("camera has not produced a frame yet")]
    NoCurrentFrame,

    #[error("asset scene has no node named '{scene_node_id}'")]
    UnknownAsset { scene_node_id: String },
}
