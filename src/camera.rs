use glam::DVec2;

/// Player viewpoint in grid-cell units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: DVec2,  // (x, y) = (col, row), continuous
    pub direction: DVec2, // facing
    pub camera: DVec2,    // half-width of the view plane, roughly perpendicular to `direction`
}

impl Pose {
    pub const fn new(position: DVec2, direction: DVec2, camera: DVec2) -> Self {
        Self {
            position,
            direction,
            camera,
        }
    }

    /// Rotates `direction` and `camera` about the origin. Positive turns left.
    #[inline]
    #[must_use]
    pub fn rotated(self, degrees: f64) -> Self {
        // (x', y') = (x * cos - y * sin, x * sin + y * cos)
        let rot = DVec2::from_angle(degrees.to_radians());
        Self {
            position: self.position,
            direction: rot.rotate(self.direction),
            camera: rot.rotate(self.camera),
        }
    }

    /// Ray through screen column `x` of `screen_width`: -1 at the left edge, ~+1 at the right.
    #[inline]
    pub fn column_ray(&self, x: u32, screen_width: u32) -> DVec2 {
        let camera_multiplier = 2.0 * f64::from(x) / f64::from(screen_width) - 1.0;
        self.direction + self.camera * camera_multiplier
    }

    /// Horizontal field of view in degrees implied by the camera plane.
    pub fn fov_degrees(&self) -> f64 {
        let d = self.direction.length();
        if d == 0.0 {
            return 0.0;
        }
        2.0 * (self.camera.length() / d).atan().to_degrees()
    }
}
