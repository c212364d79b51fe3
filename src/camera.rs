use glam::{Mat4, Vec3};

/// One of the five fixed viewpoints, all looking at the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraPreset {
    Front,
    Top,
    Profile,
    #[default]
    Axonometric,
    Back,
}

impl CameraPreset {
    pub const ALL: [CameraPreset; 5] = [
        CameraPreset::Front,
        CameraPreset::Top,
        CameraPreset::Profile,
        CameraPreset::Axonometric,
        CameraPreset::Back,
    ];

    /// Eye position.
    pub fn eye(self) -> Vec3 {
        match self {
            CameraPreset::Front => Vec3::new(0.5, 0.0, 0.0),
            CameraPreset::Top => Vec3::new(0.0, 1.0, 0.0),
            CameraPreset::Profile => Vec3::ZERO,
            CameraPreset::Axonometric => Vec3::new(3.0, 3.0, 3.0),
            CameraPreset::Back => Vec3::new(-0.5, 0.0, 0.0),
        }
    }

    /// Look-at target.
    pub fn center(self) -> Vec3 {
        Vec3::ZERO
    }

    /// Up hint.
    pub fn up(self) -> Vec3 {
        match self {
            CameraPreset::Axonometric => Vec3::new(1.0, 2.0, 1.0),
            _ => Vec3::new(1.0, 1.0, 0.0),
        }
    }

    pub fn view_matrix(self) -> Mat4 {
        look_at(self.eye(), self.center(), self.up())
    }

    pub fn name(self) -> &'static str {
        match self {
            CameraPreset::Front => "front",
            CameraPreset::Top => "top",
            CameraPreset::Profile => "profile",
            CameraPreset::Axonometric => "axonometric",
            CameraPreset::Back => "back",
        }
    }
}

/// Right-handed look-at. Coincident eye and center yield the identity.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    if eye.abs_diff_eq(center, f32::EPSILON) {
        return Mat4::IDENTITY;
    }
    Mat4::look_at_rh(eye, center, up)
}

/// Symmetric orthographic projection sized by the zoom distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub half_width: f32,
    pub half_height: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    /// Half-extents `zoom * aspect` by `zoom`, depth range `[-3 zoom, 3 zoom]`.
    pub fn orthographic(zoom: f32, aspect: f32) -> Self {
        Self {
            half_width: zoom * aspect,
            half_height: zoom,
            near: -3.0 * zoom,
            far: 3.0 * zoom,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            -self.half_width,
            self.half_width,
            -self.half_height,
            self.half_height,
            self.near,
            self.far,
        )
    }
}
