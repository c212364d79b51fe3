//! The fixed set of drawable shapes.
//!
//! [`PrimitiveLibrary`] uploads one [`Mesh`] per [`Primitive`] at startup and
//! exposes `draw(kind, fill)`; nothing is regenerated per frame.

use crate::geometry::RawGeometry;
use crate::gpu::GpuContext;
use crate::mesh::Mesh;

/// Shape kinds the scene can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Cube,
    Cylinder,
    Sphere,
    Torus,
    Pyramid,
}

impl Primitive {
    pub const ALL: [Primitive; 5] = [
        Primitive::Cube,
        Primitive::Cylinder,
        Primitive::Sphere,
        Primitive::Torus,
        Primitive::Pyramid,
    ];

    /// CPU geometry for this shape at the library's tessellation.
    pub fn geometry(self) -> RawGeometry {
        match self {
            Primitive::Cube => RawGeometry::cube(),
            Primitive::Cylinder => RawGeometry::cylinder(30),
            Primitive::Sphere => RawGeometry::sphere(30, 15),
            Primitive::Torus => RawGeometry::torus(30, 30),
            Primitive::Pyramid => RawGeometry::pyramid(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Primitive::Cube => "Cube",
            Primitive::Cylinder => "Cylinder",
            Primitive::Sphere => "Sphere",
            Primitive::Torus => "Torus",
            Primitive::Pyramid => "Pyramid",
        }
    }
}

/// Global solid/wireframe toggle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillMode {
    #[default]
    Solid,
    Wireframe,
}

impl FillMode {
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            FillMode::Solid => wgpu::PrimitiveTopology::TriangleList,
            FillMode::Wireframe => wgpu::PrimitiveTopology::LineList,
        }
    }
}

/// One uploaded mesh per [`Primitive`].
pub struct PrimitiveLibrary {
    meshes: [Mesh; 5],
}

impl PrimitiveLibrary {
    pub fn new(gpu: &GpuContext) -> Self {
        let meshes = Primitive::ALL.map(|kind| Mesh::new(gpu, kind.label(), &kind.geometry()));
        log::debug!("uploaded {} primitive meshes", meshes.len());
        Self { meshes }
    }

    pub fn mesh(&self, kind: Primitive) -> &Mesh {
        &self.meshes[kind as usize]
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass, kind: Primitive, fill: FillMode) {
        self.mesh(kind).draw(render_pass, fill);
    }
}
