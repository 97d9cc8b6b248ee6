use glam::{Mat4, Vec3};

/// 4x4 camera matrix with in-place, right-multiplying operations.
///
/// Every transform call post-multiplies: `m.translate(t)` leaves `m * T(t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    pub m: Mat4,
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    pub fn identity() -> Self {
        Self { m: Mat4::IDENTITY }
    }

    pub fn make_identity(&mut self) {
        self.m = Mat4::IDENTITY;
    }

    pub fn is_identity(&self) -> bool {
        self.m == Mat4::IDENTITY
    }

    /// Copy another matrix into this one.
    pub fn load(&mut self, other: &Matrix4) {
        self.m = other.m;
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.m *= Mat4::from_scale(Vec3::new(sx, sy, sz));
    }

    /// Rotate by `angle` degrees about the axis (x, y, z).
    pub fn rotate(&mut self, angle: f32, x: f32, y: f32, z: f32) {
        let axis = Vec3::new(x, y, z);
        if axis.length_squared() == 0.0 {
            return;
        }
        self.m *= Mat4::from_axis_angle(axis.normalize(), angle.to_radians());
    }

    pub fn translate(&mut self, tx: f32, ty: f32, tz: f32) {
        self.m *= Mat4::from_translation(Vec3::new(tx, ty, tz));
    }

    /// Right-multiply: `self = self * other`.
    pub fn multiply(&mut self, other: &Matrix4) {
        self.m *= other.m;
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        self.m.to_cols_array()
    }
}
