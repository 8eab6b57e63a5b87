//! The AR / rendering side of a session. The coordinator only talks to it through [`ArBackend`].

use std::f32::consts::FRAC_PI_2;
use std::fmt::Debug;

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::placement::SurfaceHit;
use crate::scene_graph::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

/// A horizontal plane reported by the tracking subsystem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneAnchor {
    pub id: AnchorId,
    /// World transform of the anchor itself.
    pub transform: Mat4,
    /// Plane center relative to the anchor.
    pub center: Vec3,
    /// Width (x) and depth (z) of the estimated plane.
    pub extent: Vec3,
}

/// Menu regions hidden and shown together by the menu toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiRegion {
    SessionInfo,
    PlacementInfo,
    AssetButton,
    PlacementModeButton,
    PhotoSnapshotButton,
    UndoButton,
}

impl UiRegion {
    pub const ALL: [UiRegion; 6] = [
        UiRegion::SessionInfo,
        UiRegion::PlacementInfo,
        UiRegion::AssetButton,
        UiRegion::PlacementModeButton,
        UiRegion::PhotoSnapshotButton,
        UiRegion::UndoButton,
    ];
}

/// World tracking with horizontal plane detection, optionally restarted from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOptions {
    pub reset_tracking: bool,
    pub remove_existing_anchors: bool,
}

impl RunOptions {
    pub fn reset() -> Self {
        Self {
            reset_tracking: true,
            remove_existing_anchors: true,
        }
    }
}

/// Geometry and placement of a plane visual, in its anchor's space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneVisualSpec {
    pub size: Vec2,
    pub transform: Transform,
    pub opacity: f32,
    pub hidden: bool,
}

impl PlaneVisualSpec {
    /// Flattens the anchor's center onto its plane and lays a vertical plane
    /// geometry down horizontally.
    pub fn from_anchor(anchor: &PlaneAnchor, opacity: f32, hidden: bool) -> Self {
        Self {
            size: Vec2::new(anchor.extent.x, anchor.extent.z),
            transform: Transform::new(
                Vec3::new(anchor.center.x, 0.0, anchor.center.z),
                Quat::from_rotation_x(-FRAC_PI_2),
                Vec3::ONE,
            ),
            opacity,
            hidden,
        }
    }
}

pub trait ArBackend {
    type Node: Copy + Eq + Debug;

    fn run_session(&mut self, options: RunOptions);
    fn pause_session(&mut self);

    /// `None` until the camera has produced a frame.
    fn current_camera_transform(&self) -> Option<Mat4>;
    fn viewport_size(&self) -> Vec2;

    /// Placed content under a screen point, nearest first.
    fn hit_test_objects(&self, point: Vec2) -> Vec<Self::Node>;
    /// Nearest existing plane under a screen point, within the plane's extent.
    fn hit_test_surfaces(&self, point: Vec2) -> Option<SurfaceHit>;
    fn node_name(&self, node: Self::Node) -> Option<String>;

    /// Authored transform of an asset in the asset scene.
    fn asset_transform(&self, scene_node_id: &str) -> Option<Transform>;
    fn clone_node(&mut self, scene_node_id: &str) -> Option<Self::Node>;
    fn add_node(&mut self, node: Self::Node, transform: Transform, name: &str);
    fn remove_node(&mut self, node: Self::Node);
    fn set_node_hidden(&mut self, node: Self::Node, hidden: bool);

    fn snapshot_image(&mut self) -> Vec<u8>;
    /// Creates a camera-facing, unlit plane showing `image`. Not yet added to the scene.
    fn create_image_plane(&mut self, image: Vec<u8>, size: Vec2) -> Self::Node;

    /// Creates a plane visual attached to the anchor's node.
    fn add_plane_visual(&mut self, anchor: &PlaneAnchor, visual: &PlaneVisualSpec) -> Self::Node;
    fn update_plane_visual(
        &mut self,
        node: Self::Node,
        anchor: &PlaneAnchor,
        visual: &PlaneVisualSpec,
    );

    fn set_region_hidden(&mut self, region: UiRegion, hidden: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_visual_is_flattened_and_laid_horizontal() {
        let anchor = PlaneAnchor {
            id: AnchorId(1),
            transform: Mat4::IDENTITY,
            center: Vec3::new(0.5, 0.2, -0.3),
            extent: Vec3::new(2.0, 0.0, 3.0),
        };

        let spec = PlaneVisualSpec::from_anchor(&anchor, 0.25, false);
        assert_eq!(spec.size, Vec2::new(2.0, 3.0));
        assert_eq!(spec.transform.translation(), Vec3::new(0.5, 0.0, -0.3));

        // Local +Z of the plane geometry must end up pointing up.
        let normal = spec.transform.rotation() * Vec3::Z;
        assert!(normal.abs_diff_eq(Vec3::Y, 1e-6));
    }
}
