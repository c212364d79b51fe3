//! # Tank Scene
//!
//! **An interactive, hierarchically modeled tank on a checkerboard floor.**
//!
//! Every frame the scene is rebuilt from a handful of numbers: hull offset,
//! turret yaw, cannon pitch, camera preset, fill mode, zoom, and the state of
//! at most one projectile. A [`TransformStack`] walks the part hierarchy and
//! emits one draw per part into a [`DrawList`], which the GPU pass submits
//! under an orthographic camera.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() {
//!     env_logger::init();
//!     if let Err(err) = tank_scene::run(tank_scene::AppConfig::default()) {
//!         log::error!("{err}");
//!     }
//! }
//! ```
//!
//! ## Headless use
//!
//! Input, simulation, and composition have no GPU dependency:
//!
//! ```
//! use tank_scene::{Command, DrawList, InputController, SceneComposer, SimState};
//!
//! let mut state = SimState::default();
//! InputController::apply(&mut state, Command::Fire);
//! state.step(1.0 / 60.0);
//!
//! let mut draws = DrawList::new();
//! SceneComposer::new().compose(&state, &mut draws);
//! assert_eq!(draws.labelled("projectile").count(), 1);
//! ```

mod app;
mod camera;
mod color;
mod draw_list;
mod error;
mod geometry;
mod gpu;
mod input;
mod mesh;
pub mod parts;
mod pose;
mod primitives;
mod projectile;
mod scene_composer;
mod tank_pass;
mod transform_stack;

pub use app::{AppConfig, run};
pub use camera::{CameraPreset, Projection, look_at};
pub use color::Color;
pub use draw_list::{DrawCommand, DrawList, DrawSink};
pub use error::RenderError;
pub use geometry::RawGeometry;
pub use gpu::GpuContext;
pub use input::{Command, InputController};
pub use mesh::{Mesh, Vertex3d};
pub use pose::{SimState, TankConfig, TankPose, wheel_spin};
pub use primitives::{FillMode, Primitive, PrimitiveLibrary};
pub use projectile::{
    FireOutcome, LaunchSnapshot, ProjectileConfig, ProjectileSimulator, RefirePolicy, StepOutcome,
};
pub use scene_composer::SceneComposer;
pub use tank_pass::{CameraUniforms, ModelUniforms, TankPass};
pub use transform_stack::{Axis, TransformScope, TransformStack};

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec2, Vec3};
