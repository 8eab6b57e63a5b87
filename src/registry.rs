use crate::scene_graph::Transform;

/// An instance the user placed, together with the external node that renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedInstance<H> {
    pub asset_name: String,
    pub transform: Transform,
    pub handle: H,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneVisual<H> {
    pub handle: H,
    pub visible: bool,
}

/// Placed instances in insertion order (undo is LIFO), plus the plane visuals
/// whose visibility follows the menu.
#[derive(Debug)]
pub struct SceneObjectRegistry<H> {
    instances: Vec<PlacedInstance<H>>,
    plane_visuals: Vec<PlaneVisual<H>>,
    plane_visuals_hidden: bool,
}

impl<H> Default for SceneObjectRegistry<H> {
    fn default() -> Self {
        Self {
            instances: Vec::new(),
            plane_visuals: Vec::new(),
            plane_visuals_hidden: false,
        }
    }
}

impl<H: Copy + PartialEq> SceneObjectRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place_instance(&mut self, asset_name: impl Into<String>, transform: Transform, handle: H) {
        self.instances.push(PlacedInstance {
            asset_name: asset_name.into(),
            transform,
            handle,
        });
    }

    /// Removes the most recently placed instance. Nothing to undo is not an error.
    pub fn undo_last(&mut self) -> Option<PlacedInstance<H>> {
        self.instances.pop()
    }

    pub fn instances(&self) -> &[PlacedInstance<H>] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Registers a plane visual; it starts with the current bulk visibility.
    pub fn add_plane_visual(&mut self, handle: H) -> &PlaneVisual<H> {
        self.plane_visuals.push(PlaneVisual {
            handle,
            visible: !self.plane_visuals_hidden,
        });
        let index = self.plane_visuals.len() - 1;
        &self.plane_visuals[index]
    }

    pub fn remove_plane_visual(&mut self, handle: H) -> Option<PlaneVisual<H>> {
        let index = self
            .plane_visuals
            .iter()
            .position(|visual| visual.handle == handle)?;
        Some(self.plane_visuals.remove(index))
    }

    pub fn set_all_plane_visuals_hidden(&mut self, hidden: bool) {
        self.plane_visuals_hidden = hidden;
        for visual in &mut self.plane_visuals {
            visual.visible = !hidden;
        }
    }

    pub fn plane_visuals(&self) -> &[PlaneVisual<H>] {
        &self.plane_visuals
    }
}
