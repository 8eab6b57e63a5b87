use glam::Mat4;
use id_arena::Arena;
use std::collections::HashMap;

use crate::scene_graph::object3d::{Object3D, ObjectId, ObjectKind};
use crate::scene_graph::transform::Transform;

/// Object arena with a single root. Objects not reachable from the root are
/// detached: they keep their data (templates, removed nodes) but are not part
/// of the visible scene.
pub struct Scene {
    pub objects: Arena<Object3D>,
    root_id: ObjectId,
    templates: HashMap<String, ObjectId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let mut objects = Arena::new();
        let root_id = objects.alloc(Object3D::new("root", ObjectKind::Group, Transform::IDENTITY));

        Self {
            objects,
            root_id,
            templates: HashMap::new(),
        }
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id)
    }

    /// Registers a detached node of the asset scene that placements clone from.
    pub fn add_template(&mut self, object: Object3D) -> ObjectId {
        let name = object.name.clone();
        let id = self.add_object(object);
        self.templates.insert(name, id);
        id
    }

    pub fn get_template(&self, name: &str) -> Option<ObjectId> {
        self.templates.get(name).copied()
    }

    /// Deep-copies an object and its children. The copy is detached.
    pub fn clone_object(&mut self, object_id: ObjectId) -> Option<ObjectId> {
        let mut object = self.objects.get(object_id)?.clone();
        let child_ids = std::mem::take(&mut object.child_ids);
        object.parent_id = None;

        let clone_id = self.add_object(object);

        for child_id in child_ids {
            if let Some(child_clone) = self.clone_object(child_id) {
                self.set_object_parent(child_clone, Some(clone_id));
            }
        }

        Some(clone_id)
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        // Remove from old parent's children list
        if let Some(child) = self.objects.get(child_id) {
            if let Some(old_parent_id) = child.parent_id {
                if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                    old_parent.child_ids.retain(|&id| id != child_id);
                }
            }
        }

        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                if let Some(new_parent) = self.objects.get_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }
    }

    pub fn attach_to_root(&mut self, object_id: ObjectId) {
        self.set_object_parent(object_id, Some(self.root_id));
    }

    pub fn detach(&mut self, object_id: ObjectId) {
        self.set_object_parent(object_id, None);
    }

    pub fn is_attached(&self, object_id: ObjectId) -> bool {
        let mut current = Some(object_id);
        while let Some(id) = current {
            if id == self.root_id {
                return true;
            }
            current = self.objects.get(id).and_then(|object| object.parent_id);
        }
        false
    }

    /// Attached objects in depth-first order, root excluded.
    pub fn attached_objects(&self) -> Vec<ObjectId> {
        let mut ordered = Vec::new();
        let mut stack: Vec<ObjectId> = self.objects[self.root_id]
            .child_ids
            .iter()
            .rev()
            .copied()
            .collect();

        while let Some(id) = stack.pop() {
            ordered.push(id);
            if let Some(object) = self.objects.get(id) {
                stack.extend(object.child_ids.iter().rev().copied());
            }
        }

        ordered
    }

    /// Whether the object or any of its ancestors is hidden.
    pub fn is_effectively_hidden(&self, object_id: ObjectId) -> bool {
        let mut current = Some(object_id);
        while let Some(id) = current {
            match self.objects.get(id) {
                Some(object) if object.hidden => return true,
                Some(object) => current = object.parent_id,
                None => return false,
            }
        }
        false
    }

    pub fn world_matrix(&self, object_id: ObjectId) -> Mat4 {
        match self.objects.get(object_id) {
            Some(object) => {
                let local = object.transform.matrix();
                match object.parent_id {
                    Some(parent_id) => self.world_matrix(parent_id) * local,
                    None => local,
                }
            }
            None => Mat4::IDENTITY,
        }
    }

    pub fn set_object_transform(&mut self, object_id: ObjectId, transform: Transform) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform = transform;
        }
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.objects.get(object_id).map(|object| &object.transform)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn clone_copies_children_and_starts_detached() {
        let mut scene = Scene::new();
        let ship = scene.add_template(Object3D::new(
            "shipMesh",
            ObjectKind::Model,
            Transform::from_scale(Vec3::splat(0.01)),
        ));
        let exhaust = scene.add_object(Object3D::new("exhaust", ObjectKind::Model, Transform::IDENTITY));
        scene.set_object_parent(exhaust, Some(ship));

        let clone = scene.clone_object(ship).unwrap();
        assert_ne!(clone, ship);
        assert!(!scene.is_attached(clone));
        assert_eq!(scene.get_object(clone).unwrap().child_ids.len(), 1);
        assert_ne!(scene.get_object(clone).unwrap().child_ids[0], exhaust);

        scene.attach_to_root(clone);
        assert!(scene.is_attached(clone));
        assert_eq!(scene.attached_objects(), vec![clone, scene.objects[clone].child_ids[0]]);
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut scene = Scene::new();
        let anchor = scene.add_object(Object3D::new(
            "anchor",
            ObjectKind::Group,
            Transform::from_translation(Vec3::new(0.0, -1.0, 0.0)),
        ));
        let plane = scene.add_object(Object3D::new(
            "plane",
            ObjectKind::Group,
            Transform::from_translation(Vec3::new(0.5, 0.0, 0.0)),
        ));
        scene.attach_to_root(anchor);
        scene.set_object_parent(plane, Some(anchor));

        let world = scene.world_matrix(plane);
        assert!(world
            .w_axis
            .truncate()
            .abs_diff_eq(Vec3::new(0.5, -1.0, 0.0), 1e-6));
    }

    #[test]
    fn hidden_parent_hides_children() {
        let mut scene = Scene::new();
        let parent = scene.add_object(Object3D::default());
        let child = scene.add_object(Object3D::default());
        scene.attach_to_root(parent);
        scene.set_object_parent(child, Some(parent));

        assert!(!scene.is_effectively_hidden(child));
        scene.get_object_mut(parent).unwrap().hidden = true;
        assert!(scene.is_effectively_hidden(child));

        scene.detach(parent);
        assert!(!scene.is_attached(child));
    }
}
