use glam::{vec3, Mat4, Vec2, Vec3};

/// Pinhole camera used to map between screen points and world space.
/// Screen origin is the top-left corner, y grows downwards.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub viewport: Vec2,
    pub vertical_fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(viewport: Vec2, vertical_fov_degrees: f32) -> Self {
        Self {
            viewport,
            vertical_fov: vertical_fov_degrees.to_radians(),
            near: 0.01,
            far: 100.0,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.vertical_fov,
            self.viewport.x / self.viewport.y,
            self.near,
            self.far,
        )
    }

    fn view_projection(&self, camera: Mat4) -> Mat4 {
        self.matrix() * camera.inverse()
    }

    fn screen_to_ndc(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * point.x / self.viewport.x - 1.0,
            1.0 - 2.0 * point.y / self.viewport.y,
        )
    }

    /// Screen position and view depth of a world point, or `None` when it is behind the camera.
    pub fn project(&self, camera: Mat4, world: Vec3) -> Option<(Vec2, f32)> {
        let clip = self.view_projection(camera) * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        );

        Some((screen, clip.w))
    }

    /// Ray from the near plane through `point`.
    pub fn ray_through(&self, camera: Mat4, point: Vec2) -> Ray {
        let ndc = self.screen_to_ndc(point);
        let inverse = self.view_projection(camera).inverse();

        // glam's right-handed perspective maps depth to [0, 1]
        let near = inverse.project_point3(vec3(ndc.x, ndc.y, 0.0));
        let far = inverse.project_point3(vec3(ndc.x, ndc.y, 1.0));

        Ray {
            origin: near,
            direction: (far - near).normalize(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Distance along the ray to the plane through `point` with `normal`.
    /// Parallel planes and planes behind the origin are misses.
    pub fn intersect_plane(&self, point: Vec3, normal: Vec3) -> Option<f32> {
        let denominator = normal.dot(self.direction);
        if denominator.abs() < f32::EPSILON {
            return None;
        }

        let distance = normal.dot(point - self.origin) / denominator;
        (distance >= 0.0).then_some(distance)
    }
}
