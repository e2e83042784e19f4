//! Immutable vertex data produced by the geometry factory.
//!
//! A [`Geometry`] is never mutated once built. Scene nodes hold it behind an
//! `Rc` so any number of instances can share one copy; updating a node's
//! geometry means swapping in a freshly built one.

/// Description of the builder call that produced a geometry.
///
/// Two geometries built with equal parameters contain identical data, which
/// makes the descriptor a cheap fingerprint for comparing assembled trees.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryParams {
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        open_ended: bool,
        theta_start: f32,
        theta_length: f32,
    },
    Plane {
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
        theta_start: f32,
        theta_length: f32,
    },
    Circle {
        radius: f32,
        segments: u32,
    },
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
    Parametric {
        label: &'static str,
        u_segments: u32,
        v_segments: u32,
    },
    Tube {
        path_points: usize,
        radius: f32,
        radial_segments: u32,
    },
    Extrusion {
        outer_points: usize,
        holes: usize,
        depth: f32,
    },
    Shape {
        outer_points: usize,
        holes: usize,
    },
}

/// Interleaved vertex layout handed to a renderer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Geometry {
    params: GeometryParams,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    /// Secondary UV channel used for ambient-occlusion maps.
    uv2: Option<Vec<[f32; 2]>>,
    indices: Vec<u32>,
}

impl Geometry {
    pub(crate) fn new(
        params: GeometryParams,
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        uvs: Vec<[f32; 2]>,
        indices: Vec<u32>,
    ) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        debug_assert_eq!(positions.len(), uvs.len());
        debug_assert_eq!(indices.len() % 3, 0);
        Self {
            params,
            positions,
            normals,
            uvs,
            uv2: None,
            indices,
        }
    }

    /// Duplicates the primary UVs into the secondary channel.
    pub fn with_occlusion_uv(mut self) -> Self {
        self.uv2 = Some(self.uvs.clone());
        self
    }

    pub fn params(&self) -> &GeometryParams {
        &self.params
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn occlusion_uvs(&self) -> Option<&[[f32; 2]]> {
        self.uv2.as_deref()
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for p in &self.positions {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        (min, max)
    }

    /// Packs the geometry into renderer vertices with computed tangents.
    pub fn to_vertices(&self) -> Vec<ModelVertex> {
        let mut vertices = self
            .positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((position, normal), uv)| ModelVertex {
                position: *position,
                tex_coords: *uv,
                normal: *normal,
                // We'll calculate these later
                tangent: [0.0; 3],
                bitangent: [0.0; 3],
            })
            .collect::<Vec<_>>();
        crate::resources::mesh::compute_tangents(&mut vertices, &self.indices);
        vertices
    }
}
