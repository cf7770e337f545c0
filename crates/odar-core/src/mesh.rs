//! Triangle tessellation of scene primitives and baking of the rigid device.
//!
//! The device never deforms, so every mesh below the `device` node is baked
//! once into a single vertex stream expressed in device space. The GPU then
//! applies one model matrix per frame for the whole unit.

use crate::scene::{DeviceScene, Material, Primitive};
use glam::{Mat3, Mat4, Vec3};
use std::f32::consts::TAU;

/// Vertex of a tessellated primitive in its own local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<LocalVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let base = self.vertices.len() as u32;
        for position in corners {
            self.vertices.push(LocalVertex { position, normal });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Emissive slot values stored in `DeviceVertex::emissive[3]`.
pub const EMISSIVE_STATIC: f32 = 0.0;
pub const EMISSIVE_INDICATOR: f32 = 1.0;

/// Material flag bits stored in `DeviceVertex::surface[3]`.
pub const SURFACE_FLAG_UNLIT: u32 = 1;

/// GPU vertex for the baked device mesh.
///
/// - `surface`: metalness, roughness, clearcoat, flag bits (as float)
/// - `emissive`: rgb, slot (static or driven by the per-frame indicator intensity)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DeviceVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub surface: [f32; 4],
    pub emissive: [f32; 4],
}

#[derive(Clone, Debug, Default)]
pub struct BakedMesh {
    pub vertices: Vec<DeviceVertex>,
    pub indices: Vec<u32>,
}

impl BakedMesh {
    /// Axis-aligned bounds of all baked positions, `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.vertices.iter().map(|v| Vec3::from(v.position));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

pub fn tessellate(primitive: &Primitive) -> MeshData {
    match *primitive {
        Primitive::Box { size } => box_mesh(size),
        Primitive::Cylinder {
            radius,
            height,
            segments,
        } => cylinder_mesh(radius, height, segments),
        Primitive::Sprite { size } => {
            let mut mesh = MeshData::default();
            let (hx, hy) = (size.x * 0.5, size.y * 0.5);
            mesh.push_quad(
                [
                    Vec3::new(-hx, -hy, 0.0),
                    Vec3::new(hx, -hy, 0.0),
                    Vec3::new(hx, hy, 0.0),
                    Vec3::new(-hx, hy, 0.0),
                ],
                Vec3::Z,
            );
            mesh
        }
    }
}

pub fn box_mesh(size: Vec3) -> MeshData {
    let h = size * 0.5;
    let mut mesh = MeshData::default();
    // (normal, u axis, v axis); corners wind counter-clockwise seen from outside
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (n, u, v) in faces {
        let c = n * h;
        let du = u * h;
        let dv = v * h;
        mesh.push_quad([c - du - dv, c + du - dv, c + du + dv, c - du + dv], n);
    }
    mesh
}

pub fn cylinder_mesh(radius: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let mut mesh = MeshData::default();

    // side wall
    let base = mesh.vertices.len() as u32;
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (s, c) = theta.sin_cos();
        let normal = Vec3::new(s, 0.0, c);
        mesh.vertices.push(LocalVertex {
            position: Vec3::new(radius * s, half, radius * c),
            normal,
        });
        mesh.vertices.push(LocalVertex {
            position: Vec3::new(radius * s, -half, radius * c),
            normal,
        });
    }
    for i in 0..segments {
        let top0 = base + i * 2;
        let bot0 = top0 + 1;
        let top1 = top0 + 2;
        let bot1 = top0 + 3;
        mesh.indices
            .extend_from_slice(&[top0, bot0, top1, bot0, bot1, top1]);
    }

    // caps
    for (y, normal) in [(half, Vec3::Y), (-half, Vec3::NEG_Y)] {
        let center = mesh.vertices.len() as u32;
        mesh.vertices.push(LocalVertex {
            position: Vec3::new(0.0, y, 0.0),
            normal,
        });
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            let (s, c) = theta.sin_cos();
            mesh.vertices.push(LocalVertex {
                position: Vec3::new(radius * s, y, radius * c),
                normal,
            });
        }
        for i in 0..segments {
            let a = center + 1 + i;
            let b = a + 1;
            if normal.y > 0.0 {
                mesh.indices.extend_from_slice(&[center, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }
    mesh
}

fn vertex_attributes(material: &Material, is_indicator: bool) -> ([f32; 4], [f32; 4]) {
    let flags = if material.unlit { SURFACE_FLAG_UNLIT } else { 0 };
    let surface = [
        material.metalness,
        material.roughness,
        material.clearcoat,
        flags as f32,
    ];
    let emissive = match material.emissive {
        Some(e) if is_indicator => {
            let c = e.color.to_array();
            [c[0], c[1], c[2], EMISSIVE_INDICATOR]
        }
        Some(e) => {
            let c = e.color.0 * e.intensity;
            [c.x, c.y, c.z, EMISSIVE_STATIC]
        }
        None => [0.0, 0.0, 0.0, EMISSIVE_STATIC],
    };
    (surface, emissive)
}

/// Bake every non-sprite mesh below the device node into device space.
pub fn bake_device(scene: &DeviceScene) -> BakedMesh {
    let mut baked = BakedMesh::default();
    for mesh in scene.graph.meshes_under(scene.device) {
        if matches!(mesh.primitive, Primitive::Sprite { .. }) {
            continue;
        }
        let local = tessellate(mesh.primitive);
        append_transformed(
            &mut baked,
            &local,
            mesh.matrix,
            mesh.material,
            mesh.id == scene.indicator,
        );
    }
    log::info!(
        "[mesh] baked device: {} vertices, {} triangles",
        baked.vertices.len(),
        baked.indices.len() / 3
    );
    baked
}

fn append_transformed(
    out: &mut BakedMesh,
    local: &MeshData,
    matrix: Mat4,
    material: &Material,
    is_indicator: bool,
) {
    let normal_matrix = Mat3::from_mat4(matrix).inverse().transpose();
    let (surface, emissive) = vertex_attributes(material, is_indicator);
    let color = material.color.to_array();
    let base = out.vertices.len() as u32;
    out.vertices.extend(local.vertices.iter().map(|v| DeviceVertex {
        position: matrix.transform_point3(v.position).to_array(),
        normal: (normal_matrix * v.normal).normalize_or_zero().to_array(),
        color,
        surface,
        emissive,
    }));
    out.indices.extend(local.indices.iter().map(|i| base + i));
}
