use glam::{Mat4, Vec2, Vec3};

use crate::error::PlacementError;
use crate::scene_graph::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementMode {
    /// In front of the camera, at a fixed offset.
    #[default]
    SpaceRelative,
    /// On a detected plane under the tapped point.
    SurfaceSnapped,
}

impl PlacementMode {
    pub fn toggled(self) -> Self {
        match self {
            PlacementMode::SpaceRelative => PlacementMode::SurfaceSnapped,
            PlacementMode::SurfaceSnapped => PlacementMode::SpaceRelative,
        }
    }

    /// Short name used in the placement hint.
    pub fn short_label(self) -> &'static str {
        match self {
            PlacementMode::SpaceRelative => "Space",
            PlacementMode::SurfaceSnapped => "Plane",
        }
    }

    /// Title of the placement-mode button.
    pub fn button_label(self) -> &'static str {
        match self {
            PlacementMode::SpaceRelative => "Space Placement",
            PlacementMode::SurfaceSnapped => "Plane Placement",
        }
    }
}

/// Result of hit-testing the tapped point against detected planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub transform: Mat4,
    pub extent: Option<Vec2>,
}

impl SurfaceHit {
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }
}

/// `camera * translate(0, 0, offset)`, i.e. a point in front of (negative offset) the camera.
pub fn camera_offset(camera: Mat4, offset: f32) -> Mat4 {
    camera * Mat4::from_translation(Vec3::new(0.0, 0.0, offset))
}

/// Computes the world pose of a new instance of an asset whose authored transform is `base`.
///
/// Space placement composes the camera offset and then reapplies the asset's base scale.
/// Surface placement only takes the hit position; rotation and scale stay as authored.
pub fn compute_pose(
    mode: PlacementMode,
    camera: Mat4,
    surface_hit: Option<&SurfaceHit>,
    base: &Transform,
    offset: f32,
) -> Result<Transform, PlacementError> {
    match mode {
        PlacementMode::SpaceRelative => {
            let pose = Transform::from_matrix(camera_offset(camera, offset));
            Ok(pose.with_scale(base.scale()))
        }
        PlacementMode::SurfaceSnapped => {
            let hit = surface_hit.ok_or(PlacementError::NoSurfaceHit)?;
            Ok(base.with_translation(hit.position()))
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;

    const OFFSET: f32 = -0.1;

    #[test]
    fn mode_toggles_back_and_forth() {
        let mode = PlacementMode::default();
        assert_eq!(mode, PlacementMode::SpaceRelative);
        assert_eq!(mode.toggled(), PlacementMode::SurfaceSnapped);
        assert_eq!(mode.toggled().toggled(), mode);
        assert_eq!(mode.toggled().short_label(), "Plane");
    }

    #[test]
    fn space_placement_from_identity_camera() {
        let base = Transform::from_scale(Vec3::splat(2.0));
        let pose = compute_pose(
            PlacementMode::SpaceRelative,
            Mat4::IDENTITY,
            None,
            &base,
            OFFSET,
        )
        .unwrap();

        assert!(pose.translation().abs_diff_eq(Vec3::new(0.0, 0.0, -0.1), 1e-6));
        assert!(pose.scale().abs_diff_eq(Vec3::splat(2.0), 1e-6));
    }

    #[test]
    fn space_placement_reapplies_base_scale_for_any_camera() {
        let base = Transform::from_scale(Vec3::new(2.0, 1.0, 0.5));
        let camera = Mat4::from_rotation_translation(
            Quat::from_euler(glam::EulerRot::YXZ, 0.8, -0.3, 0.1),
            Vec3::new(1.0, 1.5, -2.0),
        );

        let pose =
            compute_pose(PlacementMode::SpaceRelative, camera, None, &base, OFFSET).unwrap();

        assert!(pose.scale().abs_diff_eq(base.scale(), 1e-5));
        let expected = camera.transform_point3(Vec3::new(0.0, 0.0, OFFSET));
        assert!(pose.translation().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn surface_placement_without_hit_fails() {
        let result = compute_pose(
            PlacementMode::SurfaceSnapped,
            Mat4::IDENTITY,
            None,
            &Transform::IDENTITY,
            OFFSET,
        );

        assert_eq!(result, Err(PlacementError::NoSurfaceHit));
    }

    #[test]
    fn surface_placement_only_takes_hit_position() {
        let base = Transform::new(
            Vec3::new(9.0, 9.0, 9.0),
            Quat::from_rotation_z(0.4),
            Vec3::splat(0.2),
        );
        let hit = SurfaceHit {
            transform: Mat4::from_scale_rotation_translation(
                Vec3::splat(5.0),
                Quat::from_rotation_y(1.2),
                Vec3::new(0.5, -1.0, -2.0),
            ),
            extent: None,
        };

        let pose = compute_pose(
            PlacementMode::SurfaceSnapped,
            Mat4::IDENTITY,
            Some(&hit),
            &base,
            OFFSET,
        )
        .unwrap();

        assert_eq!(pose.translation(), Vec3::new(0.5, -1.0, -2.0));
        assert_eq!(pose.rotation(), base.rotation());
        assert_eq!(pose.scale(), base.scale());
    }
}
