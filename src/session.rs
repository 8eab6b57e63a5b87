use std::collections::HashMap;

use glam::Vec2;

use crate::backend::{AnchorId, ArBackend, PlaneAnchor, PlaneVisualSpec, RunOptions, UiRegion};
use crate::config::SessionConfig;
use crate::error::{ConfigError, PlacementError};
use crate::placement::{camera_offset, compute_pose, PlacementMode};
use crate::registry::SceneObjectRegistry;
use crate::roster::{AssetDescriptor, AssetRoster};
use crate::scene_graph::Transform;
use crate::tracking::{self, LimitedReason, StatusMessage, TrackingQuality};

/// Name given to placed photo snapshots.
pub const SNAPSHOT_NAME: &str = "Snapshot";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome<N> {
    /// Tapped on existing content; reported, nothing placed.
    ObjectHit(N),
    /// Placement is disabled while the menu is hidden.
    MenuHidden,
    Placed(N),
    /// Placement did not happen for an expected reason.
    Suppressed(PlacementError),
}

/// Owns the roster, placement mode, menu flag and placed objects, and turns
/// UI and AR events into instructions for the backend.
pub struct SessionCoordinator<B: ArBackend> {
    backend: B,
    config: SessionConfig,
    roster: AssetRoster,
    mode: PlacementMode,
    menu_hidden: bool,
    registry: SceneObjectRegistry<B::Node>,
    anchors: HashMap<AnchorId, B::Node>,
    tracking: TrackingQuality,
    status: StatusMessage,
    placement_text: String,
}

impl<B: ArBackend> SessionCoordinator<B> {
    pub fn new(backend: B, config: SessionConfig) -> Result<Self, ConfigError> {
        let roster = AssetRoster::new(config.assets.clone())?;
        let tracking = TrackingQuality::Limited(LimitedReason::Initializing);
        let mode = PlacementMode::default();
        let placement_text = placement_hint(roster.current(), mode);

        Ok(Self {
            backend,
            config,
            roster,
            mode,
            menu_hidden: false,
            registry: SceneObjectRegistry::new(),
            anchors: HashMap::new(),
            tracking,
            status: tracking::classify(tracking, false),
            placement_text,
        })
    }

    /// Runs world tracking with horizontal plane detection.
    pub fn start(&mut self) {
        log::info!("Starting AR session");
        self.backend.run_session(RunOptions::default());
        self.sync_status_region();
    }

    pub fn pause(&mut self) {
        log::info!("Pausing AR session");
        self.backend.pause_session();
    }

    pub fn handle_tap(&mut self, point: Vec2) -> TapOutcome<B::Node> {
        if let Some(&node) = self.backend.hit_test_objects(point).first() {
            let name = self.backend.node_name(node).unwrap_or_default();
            log::info!("Tapping: {}", name);
            return TapOutcome::ObjectHit(node);
        }

        if self.menu_hidden {
            log::debug!("Ignoring tap at {:?}, menu is hidden", point);
            return TapOutcome::MenuHidden;
        }

        match self.place_current_asset(point) {
            Ok(node) => TapOutcome::Placed(node),
            Err(err) => {
                log::debug!("Nothing placed at {:?}: {}", point, err);
                TapOutcome::Suppressed(err)
            }
        }
    }

    fn place_current_asset(&mut self, point: Vec2) -> Result<B::Node, PlacementError> {
        let camera = self
            .backend
            .current_camera_transform()
            .ok_or(PlacementError::NoCurrentFrame)?;

        let asset = self.roster.current().clone();
        let unknown_asset = || PlacementError::UnknownAsset {
            scene_node_id: asset.scene_node_id.clone(),
        };

        let base = self
            .backend
            .asset_transform(&asset.scene_node_id)
            .ok_or_else(unknown_asset)?;

        let surface_hit = match self.mode {
            PlacementMode::SurfaceSnapped => self.backend.hit_test_surfaces(point),
            PlacementMode::SpaceRelative => None,
        };

        let pose = compute_pose(
            self.mode,
            camera,
            surface_hit.as_ref(),
            &base,
            self.config.placement_offset,
        )?;

        let node = self
            .backend
            .clone_node(&asset.scene_node_id)
            .ok_or_else(unknown_asset)?;

        self.backend.add_node(node, pose, &asset.display_name);
        self.registry.place_instance(asset.display_name.as_str(), pose, node);

        log::info!(
            "Placed {} at {:?} ({:?})",
            asset.display_name,
            pose.translation(),
            self.mode
        );
        Ok(node)
    }

    pub fn cycle_asset(&mut self) -> &AssetDescriptor {
        let asset = self.roster.advance();
        self.placement_text = placement_hint(asset, self.mode);
        log::debug!("Current asset: {}", asset.display_name);
        self.roster.current()
    }

    pub fn toggle_placement_mode(&mut self) -> PlacementMode {
        self.mode = self.mode.toggled();
        self.placement_text = placement_hint(self.roster.current(), self.mode);
        log::debug!("Placement mode: {:?}", self.mode);
        self.mode
    }

    /// Pins the current camera image into the scene just in front of the camera.
    pub fn photo_snapshot(&mut self) -> Option<B::Node> {
        let Some(camera) = self.backend.current_camera_transform() else {
            log::debug!("Skipping snapshot: {}", PlacementError::NoCurrentFrame);
            return None;
        };

        let image = self.backend.snapshot_image();
        let size = self.backend.viewport_size() * self.config.snapshot_scale;
        let node = self.backend.create_image_plane(image, size);
        let pose = Transform::from_matrix(camera_offset(camera, self.config.placement_offset));

        self.backend.add_node(node, pose, SNAPSHOT_NAME);
        self.registry.place_instance(SNAPSHOT_NAME, pose, node);

        log::info!("Placed snapshot at {:?}", pose.translation());
        Some(node)
    }

    /// Removes the most recently placed object. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.registry.undo_last() {
            Some(instance) => {
                self.backend.remove_node(instance.handle);
                log::info!("Removed {}", instance.asset_name);
                true
            }
            None => false,
        }
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_hidden = !self.menu_hidden;

        for region in UiRegion::ALL {
            let hidden = match region {
                UiRegion::SessionInfo => self.session_info_hidden(),
                _ => self.menu_hidden,
            };
            self.backend.set_region_hidden(region, hidden);
        }

        self.registry.set_all_plane_visuals_hidden(self.menu_hidden);
        for visual in self.registry.plane_visuals() {
            self.backend.set_node_hidden(visual.handle, !visual.visible);
        }

        log::debug!("Menu hidden: {}", self.menu_hidden);
        self.menu_hidden
    }

    pub fn on_anchor_added(&mut self, anchor: &PlaneAnchor) {
        if self.anchors.contains_key(&anchor.id) {
            log::warn!("Anchor {:?} added twice, updating instead", anchor.id);
            self.on_anchor_updated(anchor);
            return;
        }

        let visual = self.plane_visual_spec(anchor);
        let node = self.backend.add_plane_visual(anchor, &visual);
        self.registry.add_plane_visual(node);
        self.anchors.insert(anchor.id, node);

        log::debug!("Plane detected: {:?} extent {:?}", anchor.id, anchor.extent);
        self.refresh_tracking_status();
    }

    pub fn on_anchor_updated(&mut self, anchor: &PlaneAnchor) {
        let Some(&node) = self.anchors.get(&anchor.id) else {
            return;
        };

        let visual = self.plane_visual_spec(anchor);
        self.backend.update_plane_visual(node, anchor, &visual);
    }

    pub fn on_anchor_removed(&mut self, anchor_id: AnchorId) {
        if let Some(node) = self.anchors.remove(&anchor_id) {
            self.registry.remove_plane_visual(node);
            self.backend.remove_node(node);
            log::debug!("Plane removed: {:?}", anchor_id);
        }

        self.refresh_tracking_status();
    }

    pub fn on_tracking_changed(&mut self, quality: TrackingQuality) {
        self.tracking = quality;
        self.apply_status(tracking::classify(quality, !self.anchors.is_empty()));
    }

    pub fn on_session_interrupted(&mut self) {
        self.apply_status(tracking::session_interrupted());
    }

    pub fn on_session_interruption_ended(&mut self) {
        self.apply_status(tracking::session_interruption_ended());
    }

    pub fn on_session_failed(&mut self, reason: &str) {
        log::error!("AR session failed: {}", reason);
        self.apply_status(tracking::session_failed(reason));
    }

    fn plane_visual_spec(&self, anchor: &PlaneAnchor) -> PlaneVisualSpec {
        PlaneVisualSpec::from_anchor(anchor, self.config.plane_opacity, self.menu_hidden)
    }

    /// Anchor changes only update the banner once the camera is producing frames.
    fn refresh_tracking_status(&mut self) {
        if self.backend.current_camera_transform().is_none() {
            return;
        }

        self.apply_status(tracking::classify(self.tracking, !self.anchors.is_empty()));
    }

    fn apply_status(&mut self, message: StatusMessage) {
        if message != self.status {
            log::info!("Status: {:?} {:?}", message.status, message.text);
        }

        let reset = message.status.requires_reset();
        self.status = message;
        self.sync_status_region();

        // Fire and forget; the new status is already shown.
        if reset {
            self.reset_tracking();
        }
    }

    /// Restarts tracking without anchors. Plane visuals go with them, so a plane
    /// detected again afterwards is a fresh anchor.
    fn reset_tracking(&mut self) {
        for (anchor_id, node) in self.anchors.drain() {
            self.registry.remove_plane_visual(node);
            self.backend.remove_node(node);
            log::debug!("Plane dropped by reset: {:?}", anchor_id);
        }

        self.backend.run_session(RunOptions::reset());
    }

    fn session_info_hidden(&self) -> bool {
        self.menu_hidden || !self.status.show_banner
    }

    fn sync_status_region(&mut self) {
        let hidden = self.session_info_hidden();
        self.backend.set_region_hidden(UiRegion::SessionInfo, hidden);
    }

    pub fn status_text(&self) -> &str {
        &self.status.text
    }

    pub fn status_visible(&self) -> bool {
        !self.session_info_hidden()
    }

    pub fn current_asset_label(&self) -> &str {
        &self.roster.current().display_name
    }

    pub fn current_mode_label(&self) -> &'static str {
        self.mode.button_label()
    }

    pub fn menu_button_label(&self) -> &'static str {
        if self.menu_hidden {
            "Show Menu"
        } else {
            "Hide Menu"
        }
    }

    pub fn placement_text(&self) -> &str {
        &self.placement_text
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    pub fn is_menu_hidden(&self) -> bool {
        self.menu_hidden
    }

    pub fn registry(&self) -> &SceneObjectRegistry<B::Node> {
        &self.registry
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

fn placement_hint(asset: &AssetDescriptor, mode: PlacementMode) -> String {
    format!(
        "Tap to place {} in {}",
        asset.display_name,
        mode.short_label()
    )
}
