//! In-memory AR collaborator backed by the scene graph. Used by the demo binary
//! and by tests, which inspect the commands it has received.

use std::collections::HashMap;

use glam::{Mat4, Vec2, Vec3};

use crate::backend::{AnchorId, ArBackend, PlaneAnchor, PlaneVisualSpec, RunOptions, UiRegion};
use crate::config::SessionConfig;
use crate::math::Projection;
use crate::placement::SurfaceHit;
use crate::scene_graph::{Object3D, ObjectId, ObjectKind, Scene, Transform};

/// Screen-space distance, in points, within which a tap picks an object.
const PICK_RADIUS: f32 = 44.0;

/// Every instruction received from the coordinator, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    RunSession(RunOptions),
    PauseSession,
    AddNode { node: ObjectId, name: String },
    RemoveNode(ObjectId),
    SetNodeHidden { node: ObjectId, hidden: bool },
    AddPlaneVisual { anchor: AnchorId, node: ObjectId },
    UpdatePlaneVisual { anchor: AnchorId, node: ObjectId },
    SetRegionHidden { region: UiRegion, hidden: bool },
}

pub struct HeadlessBackend {
    pub scene: Scene,
    projection: Projection,
    camera: Option<Mat4>,
    anchor_nodes: HashMap<AnchorId, ObjectId>,
    hidden_regions: HashMap<UiRegion, bool>,
    running: bool,
    snapshot_count: u32,
    commands: Vec<BackendCommand>,
}

impl HeadlessBackend {
    pub fn new(viewport: Vec2, vertical_fov_degrees: f32) -> Self {
        Self {
            scene: Scene::new(),
            projection: Projection::new(viewport, vertical_fov_degrees),
            camera: None,
            anchor_nodes: HashMap::new(),
            hidden_regions: HashMap::new(),
            running: false,
            snapshot_count: 0,
            commands: Vec::new(),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.viewport, config.vertical_fov_degrees)
    }

    /// Adds a node to the asset scene under `scene_node_id`.
    pub fn register_asset(&mut self, scene_node_id: &str, transform: Transform) -> ObjectId {
        self.scene
            .add_template(Object3D::new(scene_node_id, ObjectKind::Model, transform))
    }

    pub fn set_camera(&mut self, camera: Option<Mat4>) {
        self.camera = camera;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_region_hidden(&self, region: UiRegion) -> bool {
        self.hidden_regions.get(&region).copied().unwrap_or(false)
    }

    pub fn commands(&self) -> &[BackendCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<BackendCommand> {
        std::mem::take(&mut self.commands)
    }

    fn anchor_node(&mut self, anchor: &PlaneAnchor) -> ObjectId {
        let transform = Transform::from_matrix(anchor.transform);

        match self.anchor_nodes.get(&anchor.id).copied() {
            Some(node) => {
                self.scene.set_object_transform(node, transform);
                node
            }
            None => {
                let node = self.scene.add_object(Object3D::new(
                    format!("anchor-{}", anchor.id.0),
                    ObjectKind::Group,
                    transform,
                ));
                self.scene.attach_to_root(node);
                self.anchor_nodes.insert(anchor.id, node);
                node
            }
        }
    }

    fn apply_plane_visual(&mut self, node: ObjectId, visual: &PlaneVisualSpec) {
        if let Some(object) = self.scene.get_object_mut(node) {
            object.transform = visual.transform;
            object.kind = ObjectKind::PlaneVisual { size: visual.size };
            object.opacity = visual.opacity;
            object.hidden = visual.hidden;
        }
    }

    fn anchor_of(&self, node: ObjectId) -> Option<AnchorId> {
        let parent = self.scene.get_object(node)?.parent_id?;
        self.anchor_nodes
            .iter()
            .find(|(_, &anchor_node)| anchor_node == parent)
            .map(|(&id, _)| id)
    }
}

impl ArBackend for HeadlessBackend {
    type Node = ObjectId;

    fn run_session(&mut self, options: RunOptions) {
        if options.remove_existing_anchors {
            for (_, node) in self.anchor_nodes.drain() {
                self.scene.detach(node);
            }
        }
        self.running = true;
        self.commands.push(BackendCommand::RunSession(options));
    }

    fn pause_session(&mut self) {
        self.running = false;
        self.commands.push(BackendCommand::PauseSession);
    }

    fn current_camera_transform(&self) -> Option<Mat4> {
        self.camera
    }

    fn viewport_size(&self) -> Vec2 {
        self.projection.viewport
    }

    fn hit_test_objects(&self, point: Vec2) -> Vec<ObjectId> {
        let Some(camera) = self.camera else {
            return Vec::new();
        };

        let mut hits: Vec<(f32, ObjectId)> = self
            .scene
            .attached_objects()
            .into_iter()
            .filter(|&id| self.scene.objects[id].is_pickable())
            .filter(|&id| !self.scene.is_effectively_hidden(id))
            .filter_map(|id| {
                let position = self.scene.world_matrix(id).w_axis.truncate();
                let (screen, depth) = self.projection.project(camera, position)?;
                (screen.distance(point) <= PICK_RADIUS).then_some((depth, id))
            })
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        hits.into_iter().map(|(_, id)| id).collect()
    }

    fn hit_test_surfaces(&self, point: Vec2) -> Option<SurfaceHit> {
        let camera = self.camera?;
        let ray = self.projection.ray_through(camera, point);

        self.scene
            .attached_objects()
            .into_iter()
            .filter_map(|id| {
                let object = &self.scene.objects[id];
                let ObjectKind::PlaneVisual { size } = object.kind else {
                    return None;
                };

                let world = self.scene.world_matrix(id);
                let center = world.w_axis.truncate();
                let normal = world.transform_vector3(Vec3::Z).normalize();
                let distance = ray.intersect_plane(center, normal)?;
                let position = ray.at(distance);

                // Extent test in the plane's own coordinates.
                let local = world.inverse().transform_point3(position);
                if local.x.abs() > size.x * 0.5 || local.y.abs() > size.y * 0.5 {
                    return None;
                }

                let anchor_rotation = object
                    .parent_id
                    .map(|parent| self.scene.world_matrix(parent).to_scale_rotation_translation().1)
                    .unwrap_or_default();

                Some((
                    distance,
                    SurfaceHit {
                        transform: Mat4::from_rotation_translation(anchor_rotation, position),
                        extent: Some(size),
                    },
                ))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, hit)| hit)
    }

    fn node_name(&self, node: ObjectId) -> Option<String> {
        self.scene.get_object(node).map(|object| object.name.clone())
    }

    fn asset_transform(&self, scene_node_id: &str) -> Option<Transform> {
        let template = self.scene.get_template(scene_node_id)?;
        self.scene.get_object_transform(template).copied()
    }

    fn clone_node(&mut self, scene_node_id: &str) -> Option<ObjectId> {
        let template = self.scene.get_template(scene_node_id)?;
        self.scene.clone_object(template)
    }

    fn add_node(&mut self, node: ObjectId, transform: Transform, name: &str) {
        if let Some(object) = self.scene.get_object_mut(node) {
            object.transform = transform;
            object.name = name.to_string();
        }
        self.scene.attach_to_root(node);
        self.commands.push(BackendCommand::AddNode {
            node,
            name: name.to_string(),
        });
    }

    fn remove_node(&mut self, node: ObjectId) {
        let anchor = self.anchor_of(node);
        let parent = self.scene.get_object(node).and_then(|object| object.parent_id);
        self.scene.detach(node);

        // Anchor nodes only exist to carry their plane visual.
        if let (Some(anchor), Some(parent)) = (anchor, parent) {
            if self.scene.objects[parent].child_ids.is_empty() {
                self.anchor_nodes.remove(&anchor);
                self.scene.detach(parent);
            }
        }

        self.commands.push(BackendCommand::RemoveNode(node));
    }

    fn set_node_hidden(&mut self, node: ObjectId, hidden: bool) {
        if let Some(object) = self.scene.get_object_mut(node) {
            object.hidden = hidden;
        }
        self.commands
            .push(BackendCommand::SetNodeHidden { node, hidden });
    }

    fn snapshot_image(&mut self) -> Vec<u8> {
        self.snapshot_count += 1;

        // 2x2 RGBA, shaded by capture count
        let shade = (self.snapshot_count % 256) as u8;
        [shade, shade, shade, 255].repeat(4)
    }

    fn create_image_plane(&mut self, image: Vec<u8>, size: Vec2) -> ObjectId {
        self.scene.add_object(Object3D::new(
            "",
            ObjectKind::ImagePlane { size, image },
            Transform::IDENTITY,
        ))
    }

    fn add_plane_visual(&mut self, anchor: &PlaneAnchor, visual: &PlaneVisualSpec) -> ObjectId {
        let anchor_node = self.anchor_node(anchor);
        let node = self.scene.add_object(Object3D::new(
            "anchor",
            ObjectKind::PlaneVisual { size: visual.size },
            visual.transform,
        ));
        self.apply_plane_visual(node, visual);
        self.scene.set_object_parent(node, Some(anchor_node));

        self.commands.push(BackendCommand::AddPlaneVisual {
            anchor: anchor.id,
            node,
        });
        node
    }

    fn update_plane_visual(&mut self, node: ObjectId, anchor: &PlaneAnchor, visual: &PlaneVisualSpec) {
        if self.anchor_of(node) != Some(anchor.id) {
            log::warn!("Plane visual {:?} does not belong to anchor {:?}", node, anchor.id);
            return;
        }

        self.anchor_node(anchor);
        self.apply_plane_visual(node, visual);
        self.commands.push(BackendCommand::UpdatePlaneVisual {
            anchor: anchor.id,
            node,
        });
    }

    fn set_region_hidden(&mut self, region: UiRegion, hidden: bool) {
        self.hidden_regions.insert(region, hidden);
        self.commands
            .push(BackendCommand::SetRegionHidden { region, hidden });
    }
}
