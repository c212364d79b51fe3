//! Depth-tested flat-color pass that submits a [`DrawList`].
//!
//! # Architecture
//!
//! Two bind groups, both created once with the pipelines:
//! - **Group 0**: camera uniforms (the orthographic projection)
//! - **Group 1**: model uniforms (model-view matrix and color), one slot per
//!   draw in a single buffer addressed with dynamic offsets
//!
//! All model uniforms for a frame are staged into one byte vector and uploaded
//! with a single `write_buffer`; each draw then only rebinds group 1 at its
//! slot offset. The buffer grows to the next power of two when a frame has
//! more draws than slots.
//!
//! Solid and wireframe use separate pipelines (triangle list and line list)
//! over the same shader and layouts.

use std::num::NonZeroU64;

use glam::Mat4;

use crate::color::Color;
use crate::draw_list::DrawList;
use crate::error::RenderError;
use crate::gpu::GpuContext;
use crate::mesh::Vertex3d;
use crate::primitives::{FillMode, PrimitiveLibrary};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const INITIAL_MODEL_SLOTS: usize = 1024;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    /// View space to clip space.
    pub projection: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniforms {
    /// Object space to view space.
    pub model_view: [[f32; 4]; 4],
    pub color: [f32; 4],
}

const MODEL_UNIFORMS_SIZE: u64 = std::mem::size_of::<ModelUniforms>() as u64;

/// Rounds `size` up to a multiple of `alignment`.
fn aligned_stride(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment) * alignment
}

pub struct TankPass {
    solid: wgpu::RenderPipeline,
    wireframe: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    model_layout: wgpu::BindGroupLayout,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    model_stride: u64,
    model_slots: usize,
    staging: Vec<u8>,
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
}

impl TankPass {
    /// Compiles the shader and builds both pipelines.
    ///
    /// Validation errors from shader compilation or pipeline creation are
    /// captured and returned instead of aborting the process.
    pub fn new(gpu: &GpuContext) -> Result<Self, RenderError> {
        let device = &gpu.device;
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Tank Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/tank.wgsl").into()),
        });

        // Camera uniform buffer (group 0)
        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        // Model uniform buffer (group 1)
        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Model Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(MODEL_UNIFORMS_SIZE),
                },
                count: None,
            }],
        });

        let model_stride = aligned_stride(
            MODEL_UNIFORMS_SIZE,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let (model_buffer, model_bind_group) =
            Self::create_model_slots(device, &model_layout, model_stride, INITIAL_MODEL_SLOTS);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Tank Pipeline Layout"),
            bind_group_layouts: &[&camera_layout, &model_layout],
            push_constant_ranges: &[],
        });

        let solid = Self::create_pipeline(gpu, &pipeline_layout, &shader, FillMode::Solid);
        let wireframe = Self::create_pipeline(gpu, &pipeline_layout, &shader, FillMode::Wireframe);

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::Program {
                label: "tank",
                message: error.to_string(),
            });
        }

        let depth_view = Self::create_depth_view(gpu);
        log::debug!("tank pass ready, model uniform stride {model_stride} bytes");

        Ok(Self {
            solid,
            wireframe,
            camera_buffer,
            camera_bind_group,
            model_layout,
            model_buffer,
            model_bind_group,
            model_stride,
            model_slots: INITIAL_MODEL_SLOTS,
            staging: Vec::new(),
            depth_view,
            depth_size: (gpu.width(), gpu.height()),
        })
    }

    fn create_pipeline(
        gpu: &GpuContext,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        fill: FillMode,
    ) -> wgpu::RenderPipeline {
        let label = match fill {
            FillMode::Solid => "Tank Solid Pipeline",
            FillMode::Wireframe => "Tank Wireframe Pipeline",
        };
        gpu.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs"),
                    buffers: &[Vertex3d::LAYOUT],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: gpu.config.format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                // Scaled primitives flip winding, so nothing is culled.
                primitive: wgpu::PrimitiveState {
                    topology: fill.topology(),
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }

    fn create_model_slots(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        slots: usize,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Model Uniforms"),
            size: stride * slots as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: NonZeroU64::new(MODEL_UNIFORMS_SIZE),
                }),
            }],
        });
        (buffer, bind_group)
    }

    fn create_depth_view(gpu: &GpuContext) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Recreates the depth buffer if the surface size changed.
    pub fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            self.depth_view = Self::create_depth_view(gpu);
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    fn ensure_model_slots(&mut self, gpu: &GpuContext, draws: usize) {
        if draws <= self.model_slots {
            return;
        }
        let slots = draws.next_power_of_two();
        log::debug!("growing model uniforms from {} to {slots} slots", self.model_slots);
        let (buffer, bind_group) =
            Self::create_model_slots(&gpu.device, &self.model_layout, self.model_stride, slots);
        self.model_buffer = buffer;
        self.model_bind_group = bind_group;
        self.model_slots = slots;
    }

    fn pipeline(&self, fill: FillMode) -> &wgpu::RenderPipeline {
        match fill {
            FillMode::Solid => &self.solid,
            FillMode::Wireframe => &self.wireframe,
        }
    }

    /// Clears `target` to `clear` and draws every command in `draws`.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        library: &PrimitiveLibrary,
        projection: Mat4,
        draws: &DrawList,
        clear: Color,
    ) {
        self.ensure_depth_size(gpu);
        self.ensure_model_slots(gpu, draws.len());

        let camera = CameraUniforms {
            projection: projection.to_cols_array_2d(),
        };
        gpu.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&camera));

        let stride = self.model_stride as usize;
        self.staging.clear();
        self.staging.resize(draws.len() * stride, 0);
        for (slot, command) in self.staging.chunks_exact_mut(stride).zip(draws) {
            let uniforms = ModelUniforms {
                model_view: command.model_view.to_cols_array_2d(),
                color: command.color.to_array(),
            };
            slot[..MODEL_UNIFORMS_SIZE as usize].copy_from_slice(bytemuck::bytes_of(&uniforms));
        }
        if !self.staging.is_empty() {
            gpu.queue.write_buffer(&self.model_buffer, 0, &self.staging);
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Tank Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        let mut bound: Option<FillMode> = None;
        for (index, command) in draws.iter().enumerate() {
            if bound != Some(command.fill) {
                render_pass.set_pipeline(self.pipeline(command.fill));
                bound = Some(command.fill);
            }
            let offset = (index as u64 * self.model_stride) as u32;
            render_pass.set_bind_group(1, &self.model_bind_group, &[offset]);
            library.draw(&mut render_pass, command.primitive, command.fill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_uniforms_match_shader_layout() {
        // mat4x4<f32> + vec4<f32>
        assert_eq!(MODEL_UNIFORMS_SIZE, 80);
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 64);
    }

    #[test]
    fn stride_respects_offset_alignment() {
        assert_eq!(aligned_stride(80, 256), 256);
        assert_eq!(aligned_stride(80, 64), 128);
        assert_eq!(aligned_stride(80, 16), 80);
        assert_eq!(aligned_stride(256, 256), 256);
    }
}
