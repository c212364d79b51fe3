//! Per-frame traversal of the tank hierarchy.
//!
//! ```text
//! camera view
//! ├── floor tiles
//! └── hull frame (origin + hull offset)
//!     ├── wheels, rims, axles (spin from hull offset)
//!     ├── body, grilles
//!     ├── turret (yaw about the head center)
//!     │   ├── head, appendice, antennae
//!     │   ├── cannon assembly (pitch about the hatch)
//!     │   │   └── cannon, belt, sleeve
//!     │   └── hatchet
//!     └── projectile (launch yaw, launch pitch, flight displacement)
//! ```
//!
//! Every node is a [`TransformScope`](crate::TransformScope), so each branch
//! pops back to its parent frame no matter how it exits.

use glam::{Vec2, Vec3};

use crate::color::Color;
use crate::draw_list::{DrawCommand, DrawSink};
use crate::parts::*;
use crate::pose::{SimState, TankPose};
use crate::primitives::{FillMode, Primitive};
use crate::projectile::LaunchSnapshot;
use crate::transform_stack::{Axis, TransformStack};

/// Turns [`SimState`] into an ordered list of primitive draws.
#[derive(Debug, Default)]
pub struct SceneComposer {
    stack: TransformStack,
}

impl SceneComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits every visible part of the scene into `sink`.
    ///
    /// Draw order is fixed: floor, running gear, hull, turret, cannon, then
    /// the projectile if one is in flight.
    pub fn compose(&mut self, state: &SimState, sink: &mut dyn DrawSink) {
        let pose = &state.pose;
        self.stack.reset(pose.camera.view_matrix());

        draw_floor(&mut self.stack, sink, pose.fill);

        {
            let mut hull = self.stack.scope();
            hull.translate(HULL_ORIGIN)
                .translate(Vec3::X * pose.hull_offset);

            draw_tank(&mut hull, sink, pose);

            if let Some(launch) = state.projectile.launch() {
                draw_projectile(
                    &mut hull,
                    sink,
                    launch,
                    state.projectile.displacement(),
                    pose.fill,
                );
            }
        }

        debug_assert_eq!(self.stack.depth(), 0, "unbalanced transform stack");
    }
}

fn emit(
    stack: &mut TransformStack,
    sink: &mut dyn DrawSink,
    part: &Part,
    offset: Vec3,
    spin: Option<f32>,
    fill: FillMode,
) {
    let mut local = stack.scope();
    part.compose(&mut local, offset, spin);
    sink.draw(DrawCommand {
        label: part.label,
        primitive: part.primitive,
        fill,
        model_view: local.current(),
        color: part.color,
    });
}

fn draw_floor(stack: &mut TransformStack, sink: &mut dyn DrawSink, fill: FillMode) {
    for i in FLOOR_MIN..FLOOR_MAX {
        for j in FLOOR_MIN..FLOOR_MAX {
            let mut tile = stack.scope();
            // Scale first: the tile offset is in scaled units.
            tile.scale(FLOOR_TILE_SCALE)
                .translate(Vec3::new(i as f32, FLOOR_TILE_Y, j as f32));

            let color = if (i + j).rem_euclid(2) == 0 {
                Color::CYAN
            } else {
                Color::MAGENTA
            };
            sink.draw(DrawCommand {
                label: "floor",
                primitive: Primitive::Cube,
                fill,
                model_view: tile.current(),
                color,
            });
        }
    }
}

fn draw_tank(stack: &mut TransformStack, sink: &mut dyn DrawSink, pose: &TankPose) {
    let fill = pose.fill;
    let spin = Some(pose.wheel_spin());

    for part in [&WHEEL, &RIM] {
        for x in WHEEL_COLUMNS {
            for z in WHEEL_ROWS {
                emit(stack, sink, part, Vec3::new(x, 0.0, z), spin, fill);
            }
        }
    }
    for x in WHEEL_COLUMNS {
        emit(stack, sink, &AXLE, Vec3::new(x, 0.0, 0.0), spin, fill);
    }

    emit(stack, sink, &BODY, Vec3::ZERO, None, fill);
    for grille in &GRILLES {
        emit(stack, sink, grille, Vec3::ZERO, None, fill);
    }

    let mut turret = stack.scope();
    turret.pivot(TURRET_PIVOT, Axis::Y, pose.turret_yaw);

    for part in [&HEAD, &APPENDICE, &ANTENNAE[0], &ANTENNAE[1]] {
        emit(&mut turret, sink, part, Vec3::ZERO, None, fill);
    }

    {
        let mut cannon = turret.scope();
        cannon.pivot(CANNON_PIVOT, Axis::Z, pose.cannon_pitch);
        for part in [&CANNON, &BELT, &SLEEVE] {
            emit(&mut cannon, sink, part, Vec3::ZERO, None, fill);
        }
    }

    emit(&mut turret, sink, &HATCHET, Vec3::ZERO, None, fill);
}

fn draw_projectile(
    stack: &mut TransformStack,
    sink: &mut dyn DrawSink,
    launch: LaunchSnapshot,
    displacement: Vec2,
    fill: FillMode,
) {
    let mut barrel = stack.scope();
    barrel
        .pivot(TURRET_PIVOT, Axis::Y, launch.yaw)
        .pivot(CANNON_PIVOT, Axis::Z, launch.pitch);

    // Displacement y points down.
    let flight = Vec3::new(displacement.x, -displacement.y, 0.0);
    emit(&mut barrel, sink, &PROJECTILE, flight, None, fill);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraPreset;
    use crate::draw_list::DrawList;
    use glam::Mat4;

    fn profile_state() -> SimState {
        let mut state = SimState::default();
        state.pose.camera = CameraPreset::Profile;
        state
    }

    fn compose(state: &SimState) -> DrawList {
        let mut composer = SceneComposer::new();
        let mut list = DrawList::new();
        composer.compose(state, &mut list);
        assert_eq!(composer.stack.depth(), 0);
        list
    }

    fn origin(command: &DrawCommand) -> Vec3 {
        command.model_view.transform_point3(Vec3::ZERO)
    }

    fn first(list: &DrawList, label: &str) -> DrawCommand {
        *list.labelled(label).next().unwrap()
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-4)
    }

    #[test]
    fn part_counts() {
        let list = compose(&SimState::default());
        assert_eq!(list.len(), 900 + 8 + 8 + 4 + 1 + 3 + 1 + 1 + 2 + 3 + 1);

        let count = |label| list.labelled(label).count();
        assert_eq!(count("floor"), 900);
        assert_eq!(count("wheel"), 8);
        assert_eq!(count("rim"), 8);
        assert_eq!(count("axle"), 4);
        assert_eq!(count("grille"), 3);
        assert_eq!(count("antenna"), 2);
        assert_eq!(count("projectile"), 0);
    }

    #[test]
    fn projectile_drawn_only_in_flight() {
        let mut state = SimState::default();
        state.projectile.fire(0.0, 0.0);
        let list = compose(&state);
        assert_eq!(list.len(), 933);
        assert_eq!(list.commands().last().map(|c| c.label), Some("projectile"));

        while state.projectile.in_flight() {
            state.step(0.05);
        }
        assert_eq!(compose(&state).labelled("projectile").count(), 0);
    }

    #[test]
    fn composing_is_repeatable() {
        let state = SimState::default();
        let mut composer = SceneComposer::new();
        let mut a = DrawList::new();
        let mut b = DrawList::new();
        composer.compose(&state, &mut a);
        composer.compose(&state, &mut b);
        assert_eq!(a.commands(), b.commands());
    }

    #[test]
    fn view_matrix_is_the_root() {
        let state = SimState::default();
        let list = compose(&state);
        let tile = list.commands()[0];
        let expected = CameraPreset::Axonometric.view_matrix()
            * Mat4::from_scale(FLOOR_TILE_SCALE)
            * Mat4::from_translation(Vec3::new(-15.0, -0.5, -15.0));
        assert!(tile.model_view.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn floor_is_a_checkerboard() {
        let list = compose(&profile_state());
        let tiles: Vec<_> = list.labelled("floor").collect();

        assert_eq!(tiles[0].color, Color::CYAN);
        assert_eq!(tiles[1].color, Color::MAGENTA);
        assert_eq!(tiles[30].color, Color::MAGENTA);
        assert_eq!(tiles[31].color, Color::CYAN);
        assert!(close(origin(tiles[0]), Vec3::new(-15.0, -0.2, -15.0)));
        assert!(close(origin(tiles[899]), Vec3::new(14.0, -0.2, 14.0)));
    }

    #[test]
    fn fill_mode_applies_to_every_draw() {
        let mut state = SimState::default();
        state.pose.fill = FillMode::Wireframe;
        state.projectile.fire(0.0, 0.0);
        let list = compose(&state);
        assert!(list.iter().all(|c| c.fill == FillMode::Wireframe));
    }

    #[test]
    fn hull_offset_moves_tank_not_floor() {
        let mut state = profile_state();
        let still = compose(&state);
        state.pose.hull_offset = 2.0;
        let moved = compose(&state);

        for (a, b) in still.iter().zip(moved.iter()) {
            let shift = origin(b) - origin(a);
            let expected = if a.label == "floor" { Vec3::ZERO } else { Vec3::X * 2.0 };
            assert!(close(shift, expected), "{}: {shift}", a.label);
        }
    }

    #[test]
    fn body_sits_at_hull_center() {
        let list = compose(&profile_state());
        assert!(close(origin(&first(&list, "body")), Vec3::new(0.0, 1.25, 0.0)));
    }

    #[test]
    fn turret_yaws_about_head_center() {
        let mut state = profile_state();
        state.pose.turret_yaw = 90.0;
        let list = compose(&state);

        // The head is centered on the pivot, so only its orientation changes.
        assert!(close(origin(&first(&list, "head")), Vec3::new(0.0, 2.25, 0.0)));
        assert!(close(origin(&first(&list, "body")), Vec3::new(0.0, 1.25, 0.0)));
        // (0.2, 0.7) relative to the pivot is (-1.3, -0.8); +90 about Y maps
        // (x, z) to (z, -x).
        assert!(close(origin(&first(&list, "antenna")), Vec3::new(-0.8, 3.5, 1.3)));
    }

    #[test]
    fn cannon_pitches_about_the_hatch() {
        let mut state = profile_state();
        let level = compose(&state);
        state.pose.cannon_pitch = 30.0;
        let raised = compose(&state);

        let (s, c) = 30f32.to_radians().sin_cos();
        let (rx, ry) = (3.5 - 1.7, 2.6 - 2.5);
        let expected = Vec3::new(-1.5 + 1.7 + c * rx - s * ry, 2.5 + s * rx + c * ry, 0.0);
        assert!(close(origin(&first(&raised, "cannon")), expected));
        assert!(origin(&first(&raised, "sleeve")).y > origin(&first(&level, "sleeve")).y);

        // The hatchet belongs to the turret, not the cannon assembly.
        assert!(close(
            origin(&first(&raised, "hatchet")),
            origin(&first(&level, "hatchet"))
        ));
    }

    #[test]
    fn wheels_spin_in_place() {
        let mut state = profile_state();
        let still = first(&compose(&state), "wheel");
        state.pose.hull_offset = 0.03;
        let rolled = first(&compose(&state), "wheel");

        assert!(close(origin(&rolled) - origin(&still), Vec3::new(0.03, 0.0, 0.0)));
        let axis = |c: &DrawCommand| c.model_view.transform_vector3(Vec3::X);
        assert!(!close(axis(&rolled), axis(&still)));
    }

    #[test]
    fn running_gear_walks_columns_then_rows() {
        let list = compose(&profile_state());
        for label in ["wheel", "rim"] {
            let origins: Vec<Vec3> = list.labelled(label).map(origin).collect();
            let expected: Vec<Vec3> = WHEEL_COLUMNS
                .into_iter()
                .flat_map(|x| WHEEL_ROWS.into_iter().map(move |z| Vec3::new(x - 1.5, 0.5, z - 1.5)))
                .collect();
            assert_eq!(origins.len(), 8);
            for (got, want) in origins.iter().zip(&expected) {
                assert!(close(*got, *want), "{label}: {got} != {want}");
            }
        }

        let wheels: Vec<Vec3> = list.labelled("wheel").map(origin).collect();
        assert!(close(wheels[0], Vec3::new(-1.5, 0.5, -1.5)));
        assert!(close(wheels[1], Vec3::new(-1.5, 0.5, 1.5)));
    }

    #[test]
    fn projectile_follows_launch_snapshot() {
        let mut state = profile_state();
        state.projectile.fire(0.0, 0.0);
        state.pose.turret_yaw = 90.0;
        state.pose.cannon_pitch = 30.0;

        let muzzle = Vec3::new(-1.5 + 5.3, 2.6, 0.0);
        let list = compose(&state);
        assert!(close(origin(&first(&list, "projectile")), muzzle));

        state.step(0.05);
        let list = compose(&state);
        let flown = muzzle + Vec3::new(0.53675, -0.03675, 0.0);
        assert!(close(origin(&first(&list, "projectile")), flown));
    }
}
