use glam::{Mat4, Vec2, Vec3};

use crate::backend::{AnchorId, ArBackend, PlaneAnchor};
use crate::config::SessionConfig;
use crate::headless::HeadlessBackend;
use crate::scene_graph::Transform;
use crate::session::{SessionCoordinator, TapOutcome};
use crate::tracking::{LimitedReason, TrackingQuality};

/// Authored scale of the bundled models in the asset scene.
fn authored_scale(scene_node_id: &str) -> Vec3 {
    match scene_node_id {
        "shipMesh" => Vec3::splat(0.02),
        "orange" => Vec3::splat(0.05),
        "plane" => Vec3::new(0.1, 0.1, 1.0),
        _ => Vec3::splat(0.05),
    }
}

pub struct DemoState {
    pub session: SessionCoordinator<HeadlessBackend>,
}

impl DemoState {
    pub fn new(config: SessionConfig) -> anyhow::Result<Self> {
        let mut backend = HeadlessBackend::from_config(&config);
        for asset in &config.assets {
            backend.register_asset(
                &asset.scene_node_id,
                Transform::from_scale(authored_scale(&asset.scene_node_id)),
            );
        }

        let session = SessionCoordinator::new(backend, config)?;
        Ok(Self { session })
    }

    fn screen_point(&self, x: f32, y: f32) -> Vec2 {
        self.session.backend().viewport_size() * Vec2::new(x, y)
    }

    fn report(&self, step: &str) {
        log::info!(
            "[{}] status={:?} visible={} hint={:?} placed={}",
            step,
            self.session.status_text(),
            self.session.status_visible(),
            self.session.placement_text(),
            self.session.registry().len()
        );
    }

    /// Plays back a short session: warm-up, plane detection, placements,
    /// snapshot, undo, menu toggling and an interruption.
    pub fn run(&mut self) {
        self.session.start();
        self.report("start");

        let center = self.screen_point(0.5, 0.5);
        let lower = self.screen_point(0.5, 0.75);

        let outcome = self.session.handle_tap(center);
        log::info!("Tap before first frame: {:?}", outcome);

        // Camera at the origin looking down -Z, floor 1.2m below.
        self.session.backend_mut().set_camera(Some(Mat4::IDENTITY));
        self.session
            .on_tracking_changed(TrackingQuality::Limited(LimitedReason::Initializing));
        self.session.on_tracking_changed(TrackingQuality::Normal);
        self.report("tracking");

        let floor = PlaneAnchor {
            id: AnchorId(1),
            transform: Mat4::from_translation(Vec3::new(0.0, -1.2, -3.0)),
            center: Vec3::ZERO,
            extent: Vec3::new(2.0, 0.0, 2.0),
        };
        self.session.on_anchor_added(&floor);
        self.session.on_anchor_updated(&PlaneAnchor {
            extent: Vec3::new(3.0, 0.0, 4.0),
            ..floor
        });
        self.report("plane detected");

        let outcome = self.session.handle_tap(self.screen_point(0.25, 0.5));
        log::info!("Space placement: {:?}", outcome);

        self.session.cycle_asset();
        self.session.toggle_placement_mode();
        let outcome = self.session.handle_tap(lower);
        log::info!("Plane placement: {:?}", outcome);

        let outcome = self.session.handle_tap(self.screen_point(0.5, 0.1));
        log::info!("Plane placement above horizon: {:?}", outcome);

        let snapshot = self.session.photo_snapshot();
        log::info!("Snapshot: {:?}", snapshot);
        self.session.undo();
        self.report("placements");

        self.session.toggle_menu();
        if let TapOutcome::MenuHidden = self.session.handle_tap(self.screen_point(0.9, 0.9)) {
            log::info!("Tap ignored while menu is hidden");
        }
        self.session.toggle_menu();

        self.session.on_session_interrupted();
        self.report("interrupted");
        self.session.on_session_interruption_ended();
        self.report("resumed");

        self.session.pause();
    }
}
