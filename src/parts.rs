//! Literal dimensions, placements, and colors of every tank part.
//!
//! All positions are in the hull frame: the tank's rear-left wheel hub sits
//! near the origin and the cannon points along +X.

use glam::Vec3;

use crate::color::Color;
use crate::primitives::Primitive;
use crate::transform_stack::{Axis, TransformStack};

/// Fixed local placement of one drawable part.
#[derive(Clone, Copy, Debug)]
pub struct Part {
    pub label: &'static str,
    pub primitive: Primitive,
    pub translation: Vec3,
    /// Applied in order after the translation.
    pub rotations: &'static [(Axis, f32)],
    pub scale: Vec3,
    pub color: Color,
}

impl Part {
    /// Composes this part's local transform onto `stack`.
    ///
    /// Order: translate by `translation + offset`, the fixed rotations, an
    /// optional spin about the part's own Y axis, then scale.
    pub fn compose(&self, stack: &mut TransformStack, offset: Vec3, spin: Option<f32>) {
        stack.translate(self.translation + offset);
        for &(axis, degrees) in self.rotations {
            stack.rotate(axis, degrees);
        }
        if let Some(degrees) = spin {
            stack.rotate(Axis::Y, degrees);
        }
        stack.scale(self.scale);
    }
}

// Floor

/// Tiles span `FLOOR_MIN..FLOOR_MAX` on both X and Z.
pub const FLOOR_MIN: i32 = -15;
pub const FLOOR_MAX: i32 = 15;
pub const FLOOR_TILE_SCALE: Vec3 = Vec3::new(1.0, 0.4, 1.0);
/// Applied after the tile scale, so the tile top ends up at y = 0.
pub const FLOOR_TILE_Y: f32 = -0.5;

// Hull frame

/// Hull frame origin relative to the world, before the hull offset.
pub const HULL_ORIGIN: Vec3 = Vec3::new(-1.5, 0.0, -1.5);
/// Turret yaw pivot (the head's center in X/Z).
pub const TURRET_PIVOT: Vec3 = Vec3::new(1.5, 0.0, 1.5);
/// Cannon pitch pivot, at the hatch.
pub const CANNON_PIVOT: Vec3 = Vec3::new(1.7, 2.5, 0.0);

/// Wheel hubs along X.
pub const WHEEL_COLUMNS: [f32; 4] = [0.0, 1.0, 2.0, 3.0];
/// Left and right wheel rows along Z.
pub const WHEEL_ROWS: [f32; 2] = [0.0, 3.0];

const SIDEWAYS: &[(Axis, f32)] = &[(Axis::X, 90.0)];
const ALONG_X: &[(Axis, f32)] = &[(Axis::Z, 90.0)];
const GRILLE: &[(Axis, f32)] = &[(Axis::Y, 90.0), (Axis::Z, 90.0)];

pub const WHEEL: Part = Part {
    label: "wheel",
    primitive: Primitive::Cylinder,
    translation: Vec3::new(0.0, 0.5, 0.0),
    rotations: SIDEWAYS,
    scale: Vec3::new(1.0, 0.5, 1.0),
    color: Color::BLACK,
};

pub const RIM: Part = Part {
    label: "rim",
    primitive: Primitive::Cylinder,
    translation: Vec3::new(0.0, 0.5, 0.0),
    rotations: SIDEWAYS,
    scale: Vec3::new(0.6, 0.51, 0.6),
    color: Color::DESERT_YELLOW,
};

pub const AXLE: Part = Part {
    label: "axle",
    primitive: Primitive::Cylinder,
    translation: Vec3::new(0.0, 0.5, 1.5),
    rotations: SIDEWAYS,
    scale: Vec3::new(0.3, 3.0, 0.3),
    color: Color::DARK_DESERT_YELLOW,
};

pub const BODY: Part = Part {
    label: "body",
    primitive: Primitive::Cube,
    translation: Vec3::new(1.5, 1.25, 1.5),
    rotations: &[],
    scale: Vec3::new(5.0, 1.5, 4.0),
    color: Color::PURPLE,
};

pub const GRILLES: [Part; 3] = [
    grille(1.7, 2.0),
    grille(1.5, 1.7),
    grille(1.3, 1.3),
];

const fn grille(height: f32, length: f32) -> Part {
    Part {
        label: "grille",
        primitive: Primitive::Cylinder,
        translation: Vec3::new(-1.001, height, 1.5),
        rotations: GRILLE,
        scale: Vec3::new(0.01, length, 0.01),
        color: Color::BLACK,
    }
}

// Turret (rotates with yaw)

pub const HEAD: Part = Part {
    label: "head",
    primitive: Primitive::Cube,
    translation: Vec3::new(1.5, 2.25, 1.5),
    rotations: &[],
    scale: Vec3::new(3.0, 0.5, 2.0),
    color: Color::DESERT_YELLOW,
};

pub const APPENDICE: Part = Part {
    label: "appendice",
    primitive: Primitive::Cube,
    translation: Vec3::new(0.5, 2.75, 1.5),
    rotations: &[],
    scale: Vec3::new(0.2, 0.5, 0.8),
    color: Color::WHITE,
};

pub const ANTENNAE: [Part; 2] = [
    Part {
        label: "antenna",
        primitive: Primitive::Cylinder,
        translation: Vec3::new(0.2, 3.5, 0.7),
        rotations: &[(Axis::X, -10.0)],
        scale: Vec3::new(0.01, 3.0, 0.01),
        color: Color::BLACK,
    },
    Part {
        label: "antenna",
        primitive: Primitive::Cylinder,
        translation: Vec3::new(0.2, 3.5, 2.3),
        rotations: &[(Axis::X, 10.0)],
        scale: Vec3::new(0.01, 3.0, 0.01),
        color: Color::BLACK,
    },
];

pub const HATCHET: Part = Part {
    label: "hatchet",
    primitive: Primitive::Sphere,
    translation: Vec3::new(1.7, 2.5, 1.5),
    rotations: &[],
    scale: Vec3::splat(1.5),
    color: Color::WHITE,
};

// Cannon (rotates with pitch)

pub const CANNON: Part = Part {
    label: "cannon",
    primitive: Primitive::Cylinder,
    translation: Vec3::new(3.5, 2.6, 1.5),
    rotations: ALONG_X,
    scale: Vec3::new(0.16, 3.7, 0.16),
    color: Color::DARK_PURPLE,
};

pub const BELT: Part = Part {
    label: "belt",
    primitive: Primitive::Cylinder,
    translation: Vec3::new(2.6, 2.6, 1.5),
    rotations: ALONG_X,
    scale: Vec3::new(0.21, 0.5, 0.21),
    color: Color::PINK,
};

pub const SLEEVE: Part = Part {
    label: "sleeve",
    primitive: Primitive::Torus,
    translation: Vec3::new(4.8, 2.6, 1.5),
    rotations: ALONG_X,
    scale: Vec3::new(0.21, 3.0, 0.21),
    color: Color::PINK,
};

/// Resting position is the muzzle; flight displacement is added on top.
pub const PROJECTILE: Part = Part {
    label: "projectile",
    primitive: Primitive::Sphere,
    translation: Vec3::new(5.3, 2.6, 1.5),
    rotations: &[],
    scale: Vec3::splat(0.2),
    color: Color::BLACK,
};

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn compose_orders_translate_rotate_spin_scale() {
        let mut stack = TransformStack::new();
        WHEEL.compose(&mut stack, Vec3::new(2.0, 0.0, 3.0), Some(45.0));

        let expected = Mat4::from_translation(Vec3::new(2.0, 0.5, 3.0))
            * Mat4::from_rotation_x(90f32.to_radians())
            * Mat4::from_rotation_y(45f32.to_radians())
            * Mat4::from_scale(WHEEL.scale);
        assert!(stack.current().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn projectile_rests_at_muzzle_end() {
        // Sleeve spans 4.8 +/- 1.5 after its Z rotation; the shot sits inside.
        assert!(PROJECTILE.translation.x > CANNON.translation.x);
        assert!(PROJECTILE.translation.x < SLEEVE.translation.x + SLEEVE.scale.y / 2.0);
        assert_eq!(PROJECTILE.translation.y, CANNON.translation.y);
    }

    #[test]
    fn wheel_layout_counts() {
        assert_eq!(WHEEL_COLUMNS.len() * WHEEL_ROWS.len(), 8);
        assert_eq!((FLOOR_MAX - FLOOR_MIN) * (FLOOR_MAX - FLOOR_MIN), 900);
    }
}
