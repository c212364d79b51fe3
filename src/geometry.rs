//! CPU-side mesh generators for the primitive library.
//!
//! Every generator returns a [`RawGeometry`] holding both a triangle list and
//! a line list over the same vertices, so the renderer can switch between
//! solid and wireframe without regenerating anything. All shapes fit the unit
//! cube centered at the origin:
//!
//! | Shape    | Extent                                   |
//! |----------|------------------------------------------|
//! | cube     | `[-0.5, 0.5]` on every axis               |
//! | cylinder | radius 0.5, height 1, axis along Y        |
//! | sphere   | radius 0.5                                |
//! | torus    | ring radius 0.4, tube radius 0.1, axis Y  |
//! | pyramid  | square base at `y = -0.5`, apex `y = 0.5` |

use std::collections::BTreeSet;
use std::f32::consts::TAU;

use glam::Vec3;

use crate::mesh::Vertex3d;

/// Geometry before GPU upload.
#[derive(Clone, Debug)]
pub struct RawGeometry {
    pub vertices: Vec<Vertex3d>,
    /// Triangle list, three indices per triangle.
    pub triangles: Vec<u32>,
    /// Line list, two indices per segment.
    pub lines: Vec<u32>,
}

impl RawGeometry {
    /// Computes the axis-aligned bounding box as `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in &self.vertices {
            let p = Vec3::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    pub fn cube() -> Self {
        let mut b = Builder::default();
        // (normal, u axis, v axis) per face; corners are n/2 ± u/2 ± v/2.
        let faces = [
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        ];
        for (n, u, v) in faces {
            let c = n * 0.5;
            let a = b.vertex(c - u * 0.5 - v * 0.5, n, [0.0, 0.0]);
            let bb = b.vertex(c + u * 0.5 - v * 0.5, n, [1.0, 0.0]);
            let cc = b.vertex(c + u * 0.5 + v * 0.5, n, [1.0, 1.0]);
            let d = b.vertex(c - u * 0.5 + v * 0.5, n, [0.0, 1.0]);
            b.quad(a, bb, cc, d);
        }
        b.finish()
    }

    /// Closed cylinder with `segments` divisions around the axis.
    pub fn cylinder(segments: u32) -> Self {
        let segments = segments.max(3);
        let mut b = Builder::default();

        let side_start = b.next_index();
        for i in 0..=segments {
            let t = i as f32 / segments as f32;
            let (sin, cos) = (t * TAU).sin_cos();
            let n = Vec3::new(cos, 0.0, sin);
            b.vertex(n * 0.5 - Vec3::Y * 0.5, n, [t, 0.0]);
            b.vertex(n * 0.5 + Vec3::Y * 0.5, n, [t, 1.0]);
        }
        for i in 0..segments {
            let lo = side_start + i * 2;
            b.quad(lo, lo + 2, lo + 3, lo + 1);
        }

        for (y, n) in [(0.5, Vec3::Y), (-0.5, Vec3::NEG_Y)] {
            let center = b.vertex(Vec3::new(0.0, y, 0.0), n, [0.5, 0.5]);
            let ring = b.next_index();
            for i in 0..segments {
                let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
                b.vertex(
                    Vec3::new(cos * 0.5, y, sin * 0.5),
                    n,
                    [0.5 + cos * 0.5, 0.5 + sin * 0.5],
                );
            }
            for i in 0..segments {
                let a = ring + i;
                let c = ring + (i + 1) % segments;
                if y > 0.0 {
                    b.triangle(center, c, a);
                } else {
                    b.triangle(center, a, c);
                }
            }
        }
        b.finish()
    }

    /// UV sphere with latitude/longitude subdivision.
    pub fn sphere(segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);
        let mut b = Builder::default();

        for ring in 0..=rings {
            let phi = std::f32::consts::PI * ring as f32 / rings as f32;
            let y = phi.cos();
            let ring_radius = phi.sin();

            for seg in 0..=segments {
                let theta = TAU * seg as f32 / segments as f32;
                let n = Vec3::new(ring_radius * theta.cos(), y, ring_radius * theta.sin());
                let uv = [seg as f32 / segments as f32, ring as f32 / rings as f32];
                b.vertex(n * 0.5, n, uv);
            }
        }

        for ring in 0..rings {
            for seg in 0..segments {
                let current = ring * (segments + 1) + seg;
                let next = current + segments + 1;
                b.quad(current, next, next + 1, current + 1);
            }
        }
        b.finish()
    }

    /// Torus lying in the XZ plane.
    pub fn torus(ring_segments: u32, tube_segments: u32) -> Self {
        const RING_RADIUS: f32 = 0.4;
        const TUBE_RADIUS: f32 = 0.1;

        let ring_segments = ring_segments.max(3);
        let tube_segments = tube_segments.max(3);
        let mut b = Builder::default();

        for i in 0..=ring_segments {
            let u = i as f32 / ring_segments as f32;
            let (sin_t, cos_t) = (u * TAU).sin_cos();
            let center = Vec3::new(cos_t, 0.0, sin_t) * RING_RADIUS;
            for j in 0..=tube_segments {
                let v = j as f32 / tube_segments as f32;
                let (sin_p, cos_p) = (v * TAU).sin_cos();
                let n = Vec3::new(cos_p * cos_t, sin_p, cos_p * sin_t);
                b.vertex(center + n * TUBE_RADIUS, n, [u, v]);
            }
        }

        let stride = tube_segments + 1;
        for i in 0..ring_segments {
            for j in 0..tube_segments {
                let a = i * stride + j;
                let c = a + stride;
                b.quad(a, a + 1, c + 1, c);
            }
        }
        b.finish()
    }

    /// Square pyramid with flat-shaded faces.
    pub fn pyramid() -> Self {
        let mut b = Builder::default();
        let apex = Vec3::new(0.0, 0.5, 0.0);
        let base = [
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(-0.5, -0.5, -0.5),
        ];

        for i in 0..4 {
            let p0 = base[i];
            let p1 = base[(i + 1) % 4];
            let n = (p1 - p0).cross(apex - p0).normalize();
            let a = b.vertex(p0, n, [0.0, 0.0]);
            let c = b.vertex(p1, n, [1.0, 0.0]);
            let d = b.vertex(apex, n, [0.5, 1.0]);
            b.triangle(a, c, d);
        }

        let n = Vec3::NEG_Y;
        let corners: Vec<u32> = [base[3], base[2], base[1], base[0]]
            .iter()
            .zip([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
            .map(|(p, uv)| b.vertex(*p, n, uv))
            .collect();
        b.quad(corners[0], corners[1], corners[2], corners[3]);
        b.finish()
    }
}

/// Accumulates triangles and their outline edges.
///
/// Quads contribute their four sides but not the diagonal, so wireframes
/// show the logical faces rather than the triangulation.
#[derive(Default)]
struct Builder {
    vertices: Vec<Vertex3d>,
    triangles: Vec<u32>,
    edges: BTreeSet<(u32, u32)>,
}

impl Builder {
    fn next_index(&self) -> u32 {
        self.vertices.len() as u32
    }

    fn vertex(&mut self, position: Vec3, normal: Vec3, uv: [f32; 2]) -> u32 {
        let index = self.next_index();
        self.vertices
            .push(Vertex3d::new(position.to_array(), normal.to_array(), uv));
        index
    }

    fn edge(&mut self, a: u32, b: u32) {
        if a != b {
            self.edges.insert((a.min(b), a.max(b)));
        }
    }

    fn triangle(&mut self, a: u32, b: u32, c: u32) {
        self.triangles.extend_from_slice(&[a, b, c]);
        self.edge(a, b);
        self.edge(b, c);
        self.edge(c, a);
    }

    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.triangles.extend_from_slice(&[a, b, c, c, d, a]);
        self.edge(a, b);
        self.edge(b, c);
        self.edge(c, d);
        self.edge(d, a);
    }

    fn finish(self) -> RawGeometry {
        let lines = self.edges.into_iter().flat_map(|(a, b)| [a, b]).collect();
        RawGeometry {
            vertices: self.vertices,
            triangles: self.triangles,
            lines,
        }
    }
}
