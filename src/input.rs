//! Keyboard commands and how they mutate [`SimState`].
//!
//! Key events arrive from winit between frames on the event-loop thread. Each
//! press maps to at most one [`Command`], which is applied to the state as soon
//! as it arrives. There is no queue and no debouncing.
//!
//! | Key            | Command                    |
//! |----------------|----------------------------|
//! | `+` / `-`      | zoom in / out              |
//! | `w` / `s`      | raise / lower cannon       |
//! | `W` / `S`      | wireframe / solid          |
//! | `a` / `d`      | yaw turret left / right    |
//! | space          | fire                       |
//! | arrow up/down  | move hull forward / back   |
//! | `1`..`5`       | front, top, profile, axonometric, back camera |

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use crate::camera::CameraPreset;
use crate::pose::SimState;
use crate::primitives::FillMode;
use crate::projectile::FireOutcome;

/// A discrete, immediately applied state mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    ZoomIn,
    ZoomOut,
    RaiseCannon,
    LowerCannon,
    Fill(FillMode),
    YawLeft,
    YawRight,
    Fire,
    Forward,
    Backward,
    Camera(CameraPreset),
}

impl Command {
    /// Maps a symbolic key name (as produced by a browser `KeyboardEvent.key`
    /// or winit's logical key) to a command.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let command = match symbol {
            "+" => Command::ZoomIn,
            "-" => Command::ZoomOut,
            "w" => Command::RaiseCannon,
            "s" => Command::LowerCannon,
            "W" => Command::Fill(FillMode::Wireframe),
            "S" => Command::Fill(FillMode::Solid),
            "a" => Command::YawLeft,
            "d" => Command::YawRight,
            " " => Command::Fire,
            "ArrowUp" => Command::Forward,
            "ArrowDown" => Command::Backward,
            "1" => Command::Camera(CameraPreset::Front),
            "2" => Command::Camera(CameraPreset::Top),
            "3" => Command::Camera(CameraPreset::Profile),
            "4" => Command::Camera(CameraPreset::Axonometric),
            "5" => Command::Camera(CameraPreset::Back),
            _ => return None,
        };
        Some(command)
    }

    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Character(text) => Self::from_symbol(text.as_str()),
            Key::Named(NamedKey::Space) => Some(Command::Fire),
            Key::Named(NamedKey::ArrowUp) => Some(Command::Forward),
            Key::Named(NamedKey::ArrowDown) => Some(Command::Backward),
            _ => None,
        }
    }

    /// The command bound to a key press event, if any.
    ///
    /// OS key repeat is passed through, so holding a key keeps applying it.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                Self::from_key(&event.logical_key)
            }
            _ => None,
        }
    }
}

/// Applies [`Command`]s to the simulation state.
pub struct InputController;

impl InputController {
    /// Applies one command. Returns `true` if anything changed.
    ///
    /// For [`Command::Fire`], `true` means a shot left the barrel.
    pub fn apply(state: &mut SimState, command: Command) -> bool {
        let config = &state.config;
        let pose = &mut state.pose;

        match command {
            Command::ZoomIn => {
                let zoom = (pose.zoom - config.zoom_step).max(config.zoom_min);
                set_if_changed(&mut pose.zoom, zoom)
            }
            Command::ZoomOut => {
                let zoom = (pose.zoom + config.zoom_step).min(config.zoom_max);
                set_if_changed(&mut pose.zoom, zoom)
            }
            Command::RaiseCannon => {
                let pitch = (pose.cannon_pitch + config.pitch_step).min(config.pitch_max);
                set_if_changed(&mut pose.cannon_pitch, pitch)
            }
            Command::LowerCannon => {
                let pitch = (pose.cannon_pitch - config.pitch_step).max(config.pitch_min);
                set_if_changed(&mut pose.cannon_pitch, pitch)
            }
            Command::Fill(fill) => {
                let changed = pose.fill != fill;
                pose.fill = fill;
                if changed {
                    log::info!("fill mode: {fill:?}");
                }
                changed
            }
            Command::YawLeft => {
                pose.turret_yaw += config.yaw_step;
                true
            }
            Command::YawRight => {
                pose.turret_yaw -= config.yaw_step;
                true
            }
            Command::Forward => {
                pose.hull_offset += config.hull_step;
                true
            }
            Command::Backward => {
                pose.hull_offset -= config.hull_step;
                true
            }
            Command::Camera(preset) => {
                let changed = pose.camera != preset;
                pose.camera = preset;
                if changed {
                    log::info!("camera: {}", preset.name());
                }
                changed
            }
            Command::Fire => {
                let (yaw, pitch) = (pose.turret_yaw, pose.cannon_pitch);
                match state.projectile.fire(yaw, pitch) {
                    FireOutcome::Ignored => {
                        log::debug!("fire ignored, shot already in flight");
                        false
                    }
                    outcome => {
                        log::info!("fire: {outcome:?}");
                        true
                    }
                }
            }
        }
    }
}

fn set_if_changed(slot: &mut f32, value: f32) -> bool {
    let changed = *slot != value;
    *slot = value;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_n(state: &mut SimState, command: Command, n: usize) {
        for _ in 0..n {
            InputController::apply(state, command);
        }
    }

    #[test]
    fn symbol_bindings() {
        assert_eq!(Command::from_symbol("+"), Some(Command::ZoomIn));
        assert_eq!(Command::from_symbol("w"), Some(Command::RaiseCannon));
        assert_eq!(
            Command::from_symbol("W"),
            Some(Command::Fill(FillMode::Wireframe))
        );
        assert_eq!(Command::from_symbol("S"), Some(Command::Fill(FillMode::Solid)));
        assert_eq!(Command::from_symbol(" "), Some(Command::Fire));
        assert_eq!(
            Command::from_symbol("4"),
            Some(Command::Camera(CameraPreset::Axonometric))
        );
        assert_eq!(Command::from_symbol("x"), None);
    }

    #[test]
    fn winit_named_keys() {
        assert_eq!(
            Command::from_key(&Key::Named(NamedKey::Space)),
            Some(Command::Fire)
        );
        assert_eq!(
            Command::from_key(&Key::Named(NamedKey::ArrowDown)),
            Some(Command::Backward)
        );
        assert_eq!(Command::from_key(&Key::Character("d".into())), Some(Command::YawRight));
        assert_eq!(Command::from_key(&Key::Named(NamedKey::Escape)), None);
    }

    #[test]
    fn zoom_stays_within_bounds() {
        let mut state = SimState::default();
        apply_n(&mut state, Command::ZoomIn, 50);
        assert_eq!(state.pose.zoom, 3.0);
        assert!(!InputController::apply(&mut state, Command::ZoomIn));

        apply_n(&mut state, Command::ZoomOut, 50);
        assert_eq!(state.pose.zoom, 10.0);
        assert!(!InputController::apply(&mut state, Command::ZoomOut));
    }

    #[test]
    fn cannon_pitch_stays_within_bounds() {
        let mut state = SimState::default();
        assert!(!InputController::apply(&mut state, Command::LowerCannon));
        assert_eq!(state.pose.cannon_pitch, 0.0);

        apply_n(&mut state, Command::RaiseCannon, 100);
        assert_eq!(state.pose.cannon_pitch, 30.0);

        apply_n(&mut state, Command::LowerCannon, 100);
        assert_eq!(state.pose.cannon_pitch, 0.0);
    }

    #[test]
    fn yaw_is_unbounded_and_additive() {
        let mut state = SimState::default();
        apply_n(&mut state, Command::YawLeft, 1000);
        assert_eq!(state.pose.turret_yaw, 500.0);
        apply_n(&mut state, Command::YawRight, 1400);
        assert_eq!(state.pose.turret_yaw, -200.0);
    }

    #[test]
    fn fill_toggle_is_global() {
        let mut state = SimState::default();
        assert!(InputController::apply(&mut state, Command::Fill(FillMode::Wireframe)));
        assert_eq!(state.pose.fill, FillMode::Wireframe);
        assert!(!InputController::apply(&mut state, Command::Fill(FillMode::Wireframe)));
        assert!(InputController::apply(&mut state, Command::Fill(FillMode::Solid)));
        assert_eq!(state.pose.fill, FillMode::Solid);
    }

    #[test]
    fn fire_snapshots_current_orientation_and_ignores_refire() {
        let mut state = SimState::default();
        apply_n(&mut state, Command::YawLeft, 10);
        apply_n(&mut state, Command::RaiseCannon, 4);
        assert!(InputController::apply(&mut state, Command::Fire));

        let launch = state.projectile.launch().expect("armed");
        assert_eq!(launch.yaw, 5.0);
        assert_eq!(launch.pitch, 2.0);

        apply_n(&mut state, Command::YawLeft, 10);
        for _ in 0..5 {
            assert!(!InputController::apply(&mut state, Command::Fire));
        }
        assert_eq!(state.projectile.launch().map(|l| l.yaw), Some(5.0));
    }

    #[test]
    fn each_command_is_visible_immediately() {
        let mut state = SimState::default();

        assert!(InputController::apply(&mut state, Command::Camera(CameraPreset::Top)));
        assert_eq!(state.pose.camera, CameraPreset::Top);

        assert!(InputController::apply(&mut state, Command::Camera(CameraPreset::Back)));
        assert_eq!(state.pose.camera, CameraPreset::Back);

        assert!(InputController::apply(&mut state, Command::ZoomIn));
        assert_eq!(state.pose.zoom, 4.0);
        assert!(InputController::apply(&mut state, Command::ZoomOut));
        assert_eq!(state.pose.zoom, 5.0);
    }

    #[test]
    fn zoom_and_pitch_move_one_step_per_command() {
        let mut state = SimState::default();
        assert!(InputController::apply(&mut state, Command::ZoomIn));
        assert_eq!(state.pose.zoom, 4.0);
        assert!(InputController::apply(&mut state, Command::ZoomOut));
        assert!(InputController::apply(&mut state, Command::ZoomOut));
        assert_eq!(state.pose.zoom, 6.0);

        assert!(InputController::apply(&mut state, Command::RaiseCannon));
        assert_eq!(state.pose.cannon_pitch, 0.5);
        assert!(InputController::apply(&mut state, Command::LowerCannon));
        assert_eq!(state.pose.cannon_pitch, 0.0);
    }

    #[test]
    fn end_to_end_scenario() {
        let mut state = SimState::default();
        assert_eq!(state.pose.zoom, 5.0);
        assert_eq!(state.pose.cannon_pitch, 0.0);
        assert_eq!(state.pose.turret_yaw, 0.0);

        let raise = Command::from_symbol("w").unwrap();
        apply_n(&mut state, raise, 60);
        assert_eq!(state.pose.cannon_pitch, 30.0);

        InputController::apply(&mut state, Command::from_symbol("4").unwrap());
        let cam = state.pose.camera;
        assert_eq!(cam, CameraPreset::Axonometric);
        assert_eq!(cam.eye(), glam::Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(cam.center(), glam::Vec3::ZERO);
        assert_eq!(cam.up(), glam::Vec3::new(1.0, 2.0, 1.0));

        InputController::apply(&mut state, Command::from_symbol("ArrowUp").unwrap());
        assert!((state.pose.hull_offset - 0.03).abs() < 1e-7);
        let expected_spin = -(0.03_f32 * 360.0) / std::f32::consts::PI;
        assert!((state.pose.wheel_spin() - expected_spin).abs() < 1e-5);
    }
}
