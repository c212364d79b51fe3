//! Mutable scene state and the tunables that bound it.

use crate::camera::CameraPreset;
use crate::primitives::FillMode;
use crate::projectile::{ProjectileConfig, ProjectileSimulator, StepOutcome};

/// Step sizes, bounds, and defaults for everything the keyboard can change.
#[derive(Clone, Debug, PartialEq)]
pub struct TankConfig {
    /// Starting orthographic half-height.
    pub zoom: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_step: f32,
    /// Cannon pitch bounds and step, in degrees.
    pub pitch_min: f32,
    pub pitch_max: f32,
    pub pitch_step: f32,
    /// Turret yaw step in degrees.
    pub yaw_step: f32,
    /// Hull travel per key press.
    pub hull_step: f32,
    pub projectile: ProjectileConfig,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            zoom: 5.0,
            zoom_min: 3.0,
            zoom_max: 10.0,
            zoom_step: 1.0,
            pitch_min: 0.0,
            pitch_max: 30.0,
            pitch_step: 0.5,
            yaw_step: 0.5,
            hull_step: 0.03,
            projectile: ProjectileConfig::default(),
        }
    }
}

impl TankConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(mut self, zoom: f32, min: f32, max: f32) -> Self {
        self.zoom_min = min;
        self.zoom_max = max;
        self.zoom = zoom.max(min).min(max);
        self
    }

    pub fn pitch_limits(mut self, min: f32, max: f32) -> Self {
        self.pitch_min = min;
        self.pitch_max = max;
        self
    }

    pub fn hull_step(mut self, step: f32) -> Self {
        self.hull_step = step;
        self
    }

    pub fn projectile(mut self, projectile: ProjectileConfig) -> Self {
        self.projectile = projectile;
        self
    }
}

/// Hull, turret, cannon, and view state.
#[derive(Clone, Debug, PartialEq)]
pub struct TankPose {
    /// Longitudinal hull displacement along +X.
    pub hull_offset: f32,
    /// Turret yaw in degrees, unbounded.
    pub turret_yaw: f32,
    /// Cannon pitch in degrees, within the configured limits.
    pub cannon_pitch: f32,
    pub camera: CameraPreset,
    pub fill: FillMode,
    /// Orthographic half-height.
    pub zoom: f32,
}

impl TankPose {
    pub fn new(config: &TankConfig) -> Self {
        Self {
            hull_offset: 0.0,
            turret_yaw: 0.0,
            cannon_pitch: 0.0_f32.max(config.pitch_min).min(config.pitch_max),
            camera: CameraPreset::default(),
            fill: FillMode::default(),
            zoom: config.zoom,
        }
    }

    /// Rolling angle of wheels, rims, and axles in degrees.
    ///
    /// Derived from the hull offset; there is no separate wheel state.
    pub fn wheel_spin(&self) -> f32 {
        wheel_spin(self.hull_offset)
    }
}

/// Degrees of wheel rotation for a given hull offset.
pub fn wheel_spin(hull_offset: f32) -> f32 {
    -(hull_offset * 360.0) / std::f32::consts::PI
}

/// Everything that persists between frames.
#[derive(Clone, Debug)]
pub struct SimState {
    pub config: TankConfig,
    pub pose: TankPose,
    pub projectile: ProjectileSimulator,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(TankConfig::default())
    }
}

impl SimState {
    pub fn new(config: TankConfig) -> Self {
        Self {
            pose: TankPose::new(&config),
            projectile: ProjectileSimulator::new(config.projectile.clone()),
            config,
        }
    }

    /// Advances time-driven state by `dt` seconds.
    pub fn step(&mut self, dt: f32) -> StepOutcome {
        self.projectile.advance(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Command, InputController};

    #[test]
    fn defaults() {
        let state = SimState::default();
        assert_eq!(state.pose.zoom, 5.0);
        assert_eq!(state.pose.cannon_pitch, 0.0);
        assert_eq!(state.pose.turret_yaw, 0.0);
        assert_eq!(state.pose.hull_offset, 0.0);
        assert_eq!(state.pose.camera, CameraPreset::Axonometric);
        assert_eq!(state.pose.fill, FillMode::Solid);
        assert!(!state.projectile.in_flight());
    }

    #[test]
    fn wheel_spin_tracks_hull_offset() {
        assert_eq!(wheel_spin(0.0), 0.0);
        let one_step = wheel_spin(0.03);
        assert!((one_step + 0.03 * 360.0 / std::f32::consts::PI).abs() < 1e-6);
        assert!((wheel_spin(0.06) - 2.0 * one_step).abs() < 1e-5);
        assert!(wheel_spin(-0.03) > 0.0);
    }

    #[test]
    fn config_builder_clamps_start_zoom() {
        let config = TankConfig::new().zoom(20.0, 2.0, 8.0);
        assert_eq!(config.zoom, 8.0);
        assert_eq!(TankPose::new(&config).zoom, 8.0);
    }

    #[test]
    fn zoom_builder_tolerates_inverted_or_nan_bounds() {
        let inverted = TankConfig::new().zoom(5.0, 10.0, 3.0);
        assert_eq!(inverted.zoom, 3.0);

        let nan_start = TankConfig::new().zoom(f32::NAN, 3.0, 10.0);
        assert_eq!(nan_start.zoom, 3.0);

        let nan_bound = TankConfig::new().zoom(5.0, f32::NAN, 10.0);
        assert_eq!(nan_bound.zoom, 5.0);
    }

    #[test]
    fn pitch_limits_bound_start_and_raise() {
        let config = TankConfig::new().pitch_limits(5.0, 20.0);
        let mut state = SimState::new(config);
        assert_eq!(state.pose.cannon_pitch, 5.0);

        for _ in 0..100 {
            InputController::apply(&mut state, Command::RaiseCannon);
        }
        assert_eq!(state.pose.cannon_pitch, 20.0);
        assert!(!InputController::apply(&mut state, Command::RaiseCannon));

        for _ in 0..100 {
            InputController::apply(&mut state, Command::LowerCannon);
        }
        assert_eq!(state.pose.cannon_pitch, 5.0);
    }
}
