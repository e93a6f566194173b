//! Unit-geometry primitives.
//!
//! Every primitive is generated once on the CPU at unit size and placed in the
//! world purely through the model matrix. All triangles wind counter-clockwise
//! when seen from outside, matching the back-face culling of the scene
//! pipeline. Texture coordinates follow the bottom-left origin convention that
//! textures are flipped into on load.

use std::f32::consts::{PI, TAU};

use cgmath::{InnerSpace, Vector3};

const RADIAL_SEGMENTS: u32 = 36;
const SPHERE_STACKS: u32 = 18;
const TORUS_TUBE_SEGMENTS: u32 = 18;

/// Major radius of the torus ring.
pub const TORUS_MAJOR_RADIUS: f32 = 1.0;
/// Radius of the torus tube.
pub const TORUS_TUBE_RADIUS: f32 = 0.2;

/// The unit primitives the mesh library can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Box,
    Cylinder,
    Torus,
    Sphere,
    Cone,
    Plane,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 6] = [
        PrimitiveKind::Box,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Torus,
        PrimitiveKind::Sphere,
        PrimitiveKind::Cone,
        PrimitiveKind::Plane,
    ];

    /// Position of the kind in [`PrimitiveKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            PrimitiveKind::Box => 0,
            PrimitiveKind::Cylinder => 1,
            PrimitiveKind::Torus => 2,
            PrimitiveKind::Sphere => 3,
            PrimitiveKind::Cone => 4,
            PrimitiveKind::Plane => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Box => "box",
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::Torus => "torus",
            PrimitiveKind::Sphere => "sphere",
            PrimitiveKind::Cone => "cone",
            PrimitiveKind::Plane => "plane",
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl ShapeVertex {
    fn new(position: Vector3<f32>, normal: Vector3<f32>, tex_coords: [f32; 2]) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
            tex_coords,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ShapeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// CPU-side geometry of one primitive.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<ShapeVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn for_kind(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Box => Self::unit_box(),
            PrimitiveKind::Cylinder => Self::cylinder(RADIAL_SEGMENTS),
            PrimitiveKind::Torus => {
                Self::torus(TORUS_MAJOR_RADIUS, TORUS_TUBE_RADIUS, RADIAL_SEGMENTS, TORUS_TUBE_SEGMENTS)
            }
            PrimitiveKind::Sphere => Self::sphere(RADIAL_SEGMENTS, SPHERE_STACKS),
            PrimitiveKind::Cone => Self::cone(RADIAL_SEGMENTS),
            PrimitiveKind::Plane => Self::plane(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as (min, max).
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for v in &self.vertices {
            for axis in 0..3 {
                min[axis] = min[axis].min(v.position[axis]);
                max[axis] = max[axis].max(v.position[axis]);
            }
        }
        (min, max)
    }

    /// Cube of side 1 centred at the origin.
    pub fn unit_box() -> Self {
        let x = Vector3::unit_x();
        let y = Vector3::unit_y();
        let z = Vector3::unit_z();
        let mut mesh = Self::default();
        // (outward normal, u, v) with u x v == normal
        for (n, u, v) in [
            (x, -z, y),
            (-x, z, y),
            (y, x, -z),
            (-y, x, z),
            (z, x, y),
            (-z, -x, y),
        ] {
            mesh.push_quad(n * 0.5, u * 0.5, v * 0.5, n);
        }
        mesh
    }

    /// Square of side 1 on the XZ plane, visible from above and below.
    pub fn plane() -> Self {
        let x = Vector3::unit_x();
        let y = Vector3::unit_y();
        let z = Vector3::unit_z();
        let mut mesh = Self::default();
        mesh.push_quad(Vector3::new(0.0, 0.0, 0.0), x * 0.5, -z * 0.5, y);
        mesh.push_quad(Vector3::new(0.0, 0.0, 0.0), x * 0.5, z * 0.5, -y);
        mesh
    }

    /// Radius 1, height 1, base on y = 0, both ends capped.
    pub fn cylinder(segments: u32) -> Self {
        let segments = segments.max(3);
        let mut mesh = Self::default();

        let side_start = mesh.vertices.len() as u32;
        for j in 0..=segments {
            let (dir, u) = ring_direction(j, segments);
            mesh.vertices.push(ShapeVertex::new(dir, dir, [u, 0.0]));
            mesh.vertices.push(ShapeVertex::new(dir + Vector3::unit_y(), dir, [u, 1.0]));
        }
        for j in 0..segments {
            let b0 = side_start + j * 2;
            let t0 = b0 + 1;
            let b1 = b0 + 2;
            let t1 = b0 + 3;
            mesh.indices.extend_from_slice(&[b0, b1, t1, b0, t1, t0]);
        }

        mesh.push_cap(1.0, segments, true);
        mesh.push_cap(0.0, segments, false);
        mesh
    }

    /// Radius 1 base on y = 0 with the apex at y = 1, base capped.
    pub fn cone(segments: u32) -> Self {
        let segments = segments.max(3);
        let mut mesh = Self::default();
        let apex = Vector3::unit_y();

        for j in 0..segments {
            let (d0, u0) = ring_direction(j, segments);
            let (d1, u1) = ring_direction(j + 1, segments);
            let (mid, _) = ring_direction_f(j as f32 + 0.5, segments);
            // slope of 45 degrees for radius == height
            let n0 = (d0 + Vector3::unit_y()).normalize();
            let n1 = (d1 + Vector3::unit_y()).normalize();
            let na = (mid + Vector3::unit_y()).normalize();
            let base = mesh.vertices.len() as u32;
            mesh.vertices.push(ShapeVertex::new(d0, n0, [u0, 0.0]));
            mesh.vertices.push(ShapeVertex::new(d1, n1, [u1, 0.0]));
            mesh.vertices
                .push(ShapeVertex::new(apex, na, [(u0 + u1) * 0.5, 1.0]));
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
        }

        mesh.push_cap(0.0, segments, false);
        mesh
    }

    /// UV sphere of radius 1 centred at the origin.
    pub fn sphere(sectors: u32, stacks: u32) -> Self {
        let sectors = sectors.max(3);
        let stacks = stacks.max(2);
        let mut mesh = Self::default();

        for i in 0..=stacks {
            let stack_angle = PI / 2.0 - i as f32 * PI / stacks as f32;
            let ring = stack_angle.cos();
            let height = stack_angle.sin();
            for j in 0..=sectors {
                let sector_angle = j as f32 * TAU / sectors as f32;
                let p = Vector3::new(
                    ring * sector_angle.cos(),
                    height,
                    -ring * sector_angle.sin(),
                );
                mesh.vertices.push(ShapeVertex::new(
                    p,
                    p,
                    [j as f32 / sectors as f32, 1.0 - i as f32 / stacks as f32],
                ));
            }
        }

        for i in 0..stacks {
            for j in 0..sectors {
                let first = i * (sectors + 1) + j;
                let second = first + sectors + 1;
                if i != 0 {
                    mesh.indices.extend_from_slice(&[first, second, first + 1]);
                }
                if i != stacks - 1 {
                    mesh.indices
                        .extend_from_slice(&[second, second + 1, first + 1]);
                }
            }
        }
        mesh
    }

    /// Torus around the Z axis, so the ring lies in the XY plane.
    pub fn torus(major_radius: f32, tube_radius: f32, ring_segments: u32, tube_segments: u32) -> Self {
        let ring_segments = ring_segments.max(3);
        let tube_segments = tube_segments.max(3);
        let mut mesh = Self::default();

        for i in 0..=ring_segments {
            let alpha = i as f32 * TAU / ring_segments as f32;
            let (sa, ca) = alpha.sin_cos();
            let centre = Vector3::new(major_radius * ca, major_radius * sa, 0.0);
            for j in 0..=tube_segments {
                let beta = j as f32 * TAU / tube_segments as f32;
                let (sb, cb) = beta.sin_cos();
                let normal = Vector3::new(cb * ca, cb * sa, sb);
                mesh.vertices.push(ShapeVertex::new(
                    centre + normal * tube_radius,
                    normal,
                    [
                        i as f32 / ring_segments as f32,
                        j as f32 / tube_segments as f32,
                    ],
                ));
            }
        }

        let stride = tube_segments + 1;
        for i in 0..ring_segments {
            for j in 0..tube_segments {
                let a = i * stride + j;
                let b = (i + 1) * stride + j;
                let c = b + 1;
                let d = a + 1;
                mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }
        mesh
    }

    fn push_quad(
        &mut self,
        centre: Vector3<f32>,
        u: Vector3<f32>,
        v: Vector3<f32>,
        normal: Vector3<f32>,
    ) {
        let base = self.vertices.len() as u32;
        self.vertices
            .push(ShapeVertex::new(centre - u - v, normal, [0.0, 0.0]));
        self.vertices
            .push(ShapeVertex::new(centre + u - v, normal, [1.0, 0.0]));
        self.vertices
            .push(ShapeVertex::new(centre + u + v, normal, [1.0, 1.0]));
        self.vertices
            .push(ShapeVertex::new(centre - u + v, normal, [0.0, 1.0]));
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Disc of radius 1 at height `y`, facing up or down.
    fn push_cap(&mut self, y: f32, segments: u32, facing_up: bool) {
        let normal = if facing_up {
            Vector3::unit_y()
        } else {
            -Vector3::unit_y()
        };
        let lift = Vector3::new(0.0, y, 0.0);
        let centre = self.vertices.len() as u32;
        self.vertices.push(ShapeVertex::new(lift, normal, [0.5, 0.5]));
        for j in 0..=segments {
            let (dir, _) = ring_direction(j, segments);
            self.vertices.push(ShapeVertex::new(
                dir + lift,
                normal,
                [0.5 + 0.5 * dir.x, 0.5 - 0.5 * dir.z],
            ));
        }
        for j in 0..segments {
            let p0 = centre + 1 + j;
            let p1 = p0 + 1;
            if facing_up {
                self.indices.extend_from_slice(&[centre, p0, p1]);
            } else {
                self.indices.extend_from_slice(&[centre, p1, p0]);
            }
        }
    }
}

/// Unit direction on the XZ ring for step `j` and the matching U coordinate.
/// The angle runs from +X towards -Z so that ring quads wind outward.
fn ring_direction(j: u32, segments: u32) -> (Vector3<f32>, f32) {
    ring_direction_f(j as f32, segments)
}

fn ring_direction_f(j: f32, segments: u32) -> (Vector3<f32>, f32) {
    let u = j / segments as f32;
    let (s, c) = (u * TAU).sin_cos();
    (Vector3::new(c, 0.0, -s), u)
}
