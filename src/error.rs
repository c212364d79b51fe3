//! Startup and rendering failures.

use thiserror::Error;

/// Everything that can stop the scene from reaching the screen.
///
/// Per-frame surface hiccups (`Lost`, `Outdated`, `Timeout`) are not errors
/// here; the app recovers from those in place.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats for this adapter")]
    SurfaceUnsupported,

    /// Shader compilation or pipeline linking was rejected by validation.
    #[error("program `{label}` failed validation: {message}")]
    Program { label: &'static str, message: String },
}
