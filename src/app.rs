use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::camera::Projection;
use crate::color::Color;
use crate::draw_list::DrawList;
use crate::error::RenderError;
use crate::gpu::GpuContext;
use crate::input::{Command, InputController};
use crate::pose::{SimState, TankConfig};
use crate::primitives::PrimitiveLibrary;
use crate::projectile::StepOutcome;
use crate::scene_composer::SceneComposer;
use crate::tank_pass::TankPass;

/// Upper bound on the simulation step taken per frame, in seconds.
const MAX_FRAME_DT: f32 = 0.1;

/// Configuration for the app window and the scene it shows.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: Color,
    pub tank: TankConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Tank".to_string(),
            width: 1024,
            height: 768,
            clear_color: Color::SKY,
            tank: TankConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn tank(mut self, tank: TankConfig) -> Self {
        self.tank = tank;
        self
    }
}

/// Opens the window and runs the scene until it is closed.
///
/// # Example
/// ```no_run
/// use tank_scene::{AppConfig, TankConfig};
///
/// tank_scene::run(AppConfig::new().size(1280, 720).tank(TankConfig::new().hull_step(0.05)))
///     .expect("tank scene failed");
/// ```
pub fn run(config: AppConfig) -> Result<(), RenderError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = TankApp::Pending { config };
    event_loop.run_app(&mut app)?;

    match app {
        TankApp::Failed(err) => Err(err),
        _ => Ok(()),
    }
}

enum TankApp {
    Pending {
        config: AppConfig,
    },
    Running {
        window: Arc<Window>,
        gpu: GpuContext,
        library: PrimitiveLibrary,
        pass: TankPass,
        composer: SceneComposer,
        draws: DrawList,
        state: SimState,
        title: String,
        clear_color: Color,
        last_frame: Instant,
        fired_at: Option<Instant>,
    },
    Failed(RenderError),
}

impl TankApp {
    fn start(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self, RenderError> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = GpuContext::new(window.clone())?;
        let library = PrimitiveLibrary::new(&gpu);
        let pass = TankPass::new(&gpu)?;
        let state = SimState::new(config.tank.clone());

        window.set_title(&window_title(&config.title, &state));
        log::info!("scene ready at {}x{}", gpu.width(), gpu.height());

        Ok(TankApp::Running {
            window,
            gpu,
            library,
            pass,
            composer: SceneComposer::new(),
            draws: DrawList::new(),
            state,
            title: config.title.clone(),
            clear_color: config.clear_color,
            last_frame: Instant::now(),
            fired_at: None,
        })
    }
}

impl ApplicationHandler for TankApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let TankApp::Pending { config } = self else {
            return;
        };
        match TankApp::start(event_loop, config) {
            Ok(running) => *self = running,
            Err(err) => {
                log::error!("startup failed: {err}");
                *self = TankApp::Failed(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let TankApp::Running {
            window,
            gpu,
            library,
            pass,
            composer,
            draws,
            state,
            title,
            clear_color,
            last_frame,
            fired_at,
        } = self
        else {
            return;
        };

        if let Some(command) = Command::from_window_event(&event) {
            let shown = (state.pose.camera, state.pose.fill);
            let changed = InputController::apply(state, command);
            if changed && command == Command::Fire {
                *fired_at = Some(Instant::now());
            }
            if shown != (state.pose.camera, state.pose.fill) {
                window.set_title(&window_title(title, state));
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                gpu.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = step_seconds(*last_frame, fired_at.take(), now);
                *last_frame = now;

                if state.step(dt) == StepOutcome::Landed {
                    log::info!("projectile landed");
                }

                draws.clear();
                composer.compose(state, draws);

                let projection = Projection::orthographic(state.pose.zoom, gpu.aspect());
                render_frame(gpu, pass, library, projection, draws, *clear_color);

                window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Simulation time covered by the frame ending at `now`.
///
/// A shot fired since the previous frame integrates only from its fire instant.
fn step_seconds(last_frame: Instant, fired_at: Option<Instant>, now: Instant) -> f32 {
    let start = match fired_at {
        Some(fired) if fired > last_frame => fired,
        _ => last_frame,
    };
    now.saturating_duration_since(start)
        .as_secs_f32()
        .min(MAX_FRAME_DT)
}

fn window_title(base: &str, state: &SimState) -> String {
    format!(
        "{base} | {} view | {:?}",
        state.pose.camera.name(),
        state.pose.fill
    )
}

fn render_frame(
    gpu: &GpuContext,
    pass: &mut TankPass,
    library: &PrimitiveLibrary,
    projection: Projection,
    draws: &DrawList,
    clear: Color,
) {
    let output = match gpu.surface.get_current_texture() {
        Ok(output) => output,
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            log::debug!("surface lost or outdated, reconfiguring");
            gpu.reconfigure();
            return;
        }
        Err(wgpu::SurfaceError::Timeout) => {
            log::warn!("surface timeout, skipping frame");
            return;
        }
        Err(err) => {
            log::error!("failed to acquire surface texture: {err}");
            return;
        }
    };
    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Tank Frame Encoder"),
        });

    pass.render(
        gpu,
        &mut encoder,
        &view,
        library,
        projection.matrix(),
        draws,
        clear,
    );

    gpu.queue.submit(std::iter::once(encoder.finish()));
    output.present();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::camera::CameraPreset;
    use crate::primitives::FillMode;

    #[test]
    fn config_builder() {
        let config = AppConfig::new()
            .title("Test")
            .size(640, 480)
            .clear_color(Color::BLACK);
        assert_eq!(config.title, "Test");
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.clear_color, Color::BLACK);
        assert_eq!(AppConfig::default().clear_color, Color::SKY);
    }

    #[test]
    fn title_names_camera_and_fill() {
        let mut state = SimState::default();
        assert_eq!(window_title("Tank", &state), "Tank | axonometric view | Solid");

        state.pose.camera = CameraPreset::Top;
        state.pose.fill = FillMode::Wireframe;
        assert_eq!(window_title("Tank", &state), "Tank | top view | Wireframe");
    }

    #[test]
    fn step_runs_from_previous_frame_without_a_shot() {
        let last = Instant::now();
        let now = last + Duration::from_millis(40);
        assert!((step_seconds(last, None, now) - 0.04).abs() < 1e-6);
    }

    #[test]
    fn first_step_after_fire_starts_at_fire_instant() {
        let last = Instant::now();
        let fired = last + Duration::from_millis(30);
        let now = last + Duration::from_millis(40);
        assert!((step_seconds(last, Some(fired), now) - 0.01).abs() < 1e-6);

        // A fire stamp older than the previous frame does not stretch the step.
        let stale = last;
        let later = last + Duration::from_millis(5);
        assert!((step_seconds(later, Some(stale), now) - 0.035).abs() < 1e-6);
    }

    #[test]
    fn step_is_clamped_after_a_stall() {
        let last = Instant::now();
        let now = last + Duration::from_secs(3);
        assert_eq!(step_seconds(last, None, now), MAX_FRAME_DT);
        let fired = last + Duration::from_secs(1);
        assert_eq!(step_seconds(last, Some(fired), now), MAX_FRAME_DT);
    }
}
