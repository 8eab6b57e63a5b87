//! Placement and session coordination for a plane-detecting AR demo.
//!
//! The AR session, renderer and UI live behind [`backend::ArBackend`]; this crate
//! decides what to place, where, and what the user is told.

pub mod backend;
pub mod config;
pub mod demo;
pub mod error;
pub mod headless;
pub mod math;
pub mod placement;
pub mod registry;
pub mod roster;
pub mod scene_graph;
pub mod session;
pub mod tracking;

pub use backend::{AnchorId, ArBackend, PlaneAnchor, UiRegion};
pub use config::SessionConfig;
pub use error::{ConfigError, PlacementError};
pub use headless::HeadlessBackend;
pub use placement::{PlacementMode, SurfaceHit};
pub use session::{SessionCoordinator, TapOutcome};
pub use tracking::{LimitedReason, TrackingQuality, TrackingStatus};
