//! Forward-Euler projectile integrator.
//!
//! The simulator is idle until [`fire`](ProjectileSimulator::fire) arms it
//! with the turret yaw and cannon pitch of that instant. While in flight,
//! each [`advance`](ProjectileSimulator::advance) integrates velocity first
//! and then displacement with the updated velocity:
//!
//! ```text
//! v += g * dt
//! d += v * dt + g * dt^2 / 2
//! ```
//!
//! Displacement is measured from the muzzle: `x` along the barrel, `y`
//! downward. The shot lands once `y` reaches the launch height, at which
//! point everything resets to the arm-time defaults.
//!
//! By default gravity acts on the horizontal axis as well as the vertical
//! one, so shots speed up along the barrel as they fall. Set
//! [`ProjectileConfig::horizontal_gravity`] to `false` for a plain
//! ballistic arc.

use glam::Vec2;

/// What to do with a fire command while a shot is already in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RefirePolicy {
    /// Keep the current shot; the command is dropped.
    #[default]
    Ignore,
    /// Re-arm from the current turret orientation.
    Restart,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileConfig {
    /// Launch velocity; `x` along the barrel, `y` downward.
    pub launch_velocity: Vec2,
    /// Downward acceleration magnitude.
    pub gravity: f32,
    /// Height of the muzzle above the ground plane.
    pub launch_height: f32,
    pub horizontal_gravity: bool,
    pub refire: RefirePolicy,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            launch_velocity: Vec2::new(10.0, 0.0),
            gravity: 9.8,
            launch_height: 2.6,
            horizontal_gravity: true,
            refire: RefirePolicy::Ignore,
        }
    }
}

/// Turret orientation captured when the shot was fired.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchSnapshot {
    /// Turret yaw in degrees.
    pub yaw: f32,
    /// Cannon pitch in degrees.
    pub pitch: f32,
}

/// Result of [`ProjectileSimulator::fire`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireOutcome {
    Launched,
    Restarted,
    Ignored,
}

/// Result of [`ProjectileSimulator::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Idle,
    InFlight,
    /// The shot reached the ground this step and was reset.
    Landed,
}

#[derive(Clone, Debug)]
pub struct ProjectileSimulator {
    config: ProjectileConfig,
    launch: Option<LaunchSnapshot>,
    elapsed: f32,
    velocity: Vec2,
    displacement: Vec2,
}

impl ProjectileSimulator {
    pub fn new(config: ProjectileConfig) -> Self {
        Self {
            velocity: config.launch_velocity,
            config,
            launch: None,
            elapsed: 0.0,
            displacement: Vec2::ZERO,
        }
    }

    pub fn config(&self) -> &ProjectileConfig {
        &self.config
    }

    pub fn in_flight(&self) -> bool {
        self.launch.is_some()
    }

    /// The launch orientation, while a shot is in flight.
    pub fn launch(&self) -> Option<LaunchSnapshot> {
        self.launch
    }

    /// Seconds since the shot was fired.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn displacement(&self) -> Vec2 {
        self.displacement
    }

    /// Arms a shot along the given turret yaw and cannon pitch.
    pub fn fire(&mut self, yaw: f32, pitch: f32) -> FireOutcome {
        let outcome = match (self.in_flight(), self.config.refire) {
            (false, _) => FireOutcome::Launched,
            (true, RefirePolicy::Ignore) => return FireOutcome::Ignored,
            (true, RefirePolicy::Restart) => FireOutcome::Restarted,
        };

        self.reset();
        self.launch = Some(LaunchSnapshot { yaw, pitch });
        log::debug!("projectile armed at yaw {yaw}°, pitch {pitch}°");
        outcome
    }

    /// Integrates one step of `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> StepOutcome {
        if !self.in_flight() {
            return StepOutcome::Idle;
        }

        let g = self.config.gravity;
        let accel = Vec2::new(if self.config.horizontal_gravity { g } else { 0.0 }, g);

        self.elapsed += dt;
        self.velocity += accel * dt;
        self.displacement += self.velocity * dt + accel * (0.5 * dt * dt);

        if self.displacement.y >= self.config.launch_height {
            log::debug!(
                "projectile landed after {:.3}s, {:.3} along the barrel",
                self.elapsed,
                self.displacement.x
            );
            self.reset();
            return StepOutcome::Landed;
        }
        StepOutcome::InFlight
    }

    fn reset(&mut self) {
        self.launch = None;
        self.elapsed = 0.0;
        self.velocity = self.config.launch_velocity;
        self.displacement = Vec2::ZERO;
    }
}
