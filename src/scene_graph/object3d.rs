use glam::Vec2;
use id_arena::Id;

use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ObjectKind {
    /// Transform-only node, e.g. a scene root or an anchor.
    #[default]
    Group,
    /// Node from the asset scene, or a clone of one.
    Model,
    /// Unlit plane showing a captured image.
    ImagePlane { size: Vec2, image: Vec<u8> },
    /// Semi-transparent proxy of a detected plane.
    PlaneVisual { size: Vec2 },
}

#[derive(Debug, Clone)]
pub struct Object3D {
    pub name: String,
    pub transform: Transform,
    pub kind: ObjectKind,
    pub opacity: f32,
    pub hidden: bool,
    pub parent_id: Option<ObjectId>,
    pub child_ids: Vec<ObjectId>,
}

impl Object3D {
    pub fn new(name: impl Into<String>, kind: ObjectKind, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            kind,
            ..Default::default()
        }
    }

    /// Whether taps should report this object.
    pub fn is_pickable(&self) -> bool {
        matches!(self.kind, ObjectKind::Model | ObjectKind::ImagePlane { .. })
    }
}

impl Default for Object3D {
    fn default() -> Self {
        Self {
            name: String::new(),
            transform: Transform::IDENTITY,
            kind: ObjectKind::Group,
            opacity: 1.0,
            hidden: false,
            parent_id: None,
            child_ids: Vec::new(),
        }
    }
}
