//! GPU-resident primitive meshes.
//!
//! - [`Vertex3d`] is the vertex format shared by every primitive
//! - [`Mesh`] owns one vertex buffer and two index buffers, a triangle list
//!   for solid rendering and a line list for wireframe rendering
//!
//! # Vertex Layout
//!
//! | Attribute | Format    | Offset | Shader Location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | normal    | Float32x3 | 12     | 1               |
//! | uv        | Float32x2 | 24     | 2               |

use wgpu::util::DeviceExt;

use crate::geometry::RawGeometry;
use crate::gpu::GpuContext;
use crate::primitives::FillMode;

/// A vertex with position, normal, and texture coordinates (32 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    /// Model-space position.
    pub position: [f32; 3],
    /// Surface normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl Vertex3d {
    /// Buffer layout for pipelines reading [`Vertex3d`] data.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex3d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
            // uv
            wgpu::VertexAttribute {
                offset: 24,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x2,
            },
        ],
    };

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// One index buffer and the number of indices it holds.
#[derive(Debug)]
pub(crate) struct IndexBuffer {
    pub(crate) buffer: wgpu::Buffer,
    pub(crate) count: u32,
}

/// Uploaded geometry, drawable as triangles or lines.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) triangles: IndexBuffer,
    pub(crate) lines: IndexBuffer,
}

impl Mesh {
    /// Uploads `geometry` to the GPU.
    pub fn new(gpu: &GpuContext, label: &str, geometry: &RawGeometry) -> Self {
        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertex Buffer")),
                contents: bytemuck::cast_slice(&geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let triangles = Self::index_buffer(
            gpu,
            &format!("{label} Triangle Indices"),
            &geometry.triangles,
        );
        let lines = Self::index_buffer(gpu, &format!("{label} Line Indices"), &geometry.lines);

        Self {
            vertex_buffer,
            triangles,
            lines,
        }
    }

    fn index_buffer(gpu: &GpuContext, label: &str, indices: &[u32]) -> IndexBuffer {
        let buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        IndexBuffer {
            buffer,
            count: indices.len() as u32,
        }
    }

    /// Binds the buffers for `fill` and issues one indexed draw.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass, fill: FillMode) {
        let indices = match fill {
            FillMode::Solid => &self.triangles,
            FillMode::Wireframe => &self.lines,
        };
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(indices.buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..indices.count, 0, 0..1);
    }
}
