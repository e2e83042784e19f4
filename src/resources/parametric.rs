use cgmath::Vector3;

use crate::{
    data_structures::geometry::{Geometry, GeometryParams},
    error::GeometryError,
    resources::{mesh::accumulate_normals, primitives::GeometryBuffers, require_segments},
};

/**
 * Samples `f(u, v)` on a regular `(u_segments + 1) × (v_segments + 1)` grid
 * over `[0, 1]²` and stitches it into `2 · u_segments · v_segments` triangles.
 *
 * Every quad is split the same way, so all triangles share the winding of
 * `∂f/∂u × ∂f/∂v`; normals are averaged from the faces.
 */
pub fn parametric_surface<F>(
    label: &'static str,
    f: F,
    u_segments: u32,
    v_segments: u32,
) -> Result<Geometry, GeometryError>
where
    F: Fn(f32, f32) -> Vector3<f32>,
{
    require_segments("parametric_surface", "u_segments", u_segments, 1)?;
    require_segments("parametric_surface", "v_segments", v_segments, 1)?;

    let mut buffers = GeometryBuffers::default();
    let row = u_segments + 1;
    for i in 0..=v_segments {
        let v = i as f32 / v_segments as f32;
        for j in 0..=u_segments {
            let u = j as f32 / u_segments as f32;
            let p = f(u, v);
            if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
                return Err(GeometryError::invalid(
                    "parametric_surface",
                    format!("`{label}` is not finite at ({u}, {v})"),
                ));
            }
            buffers.push_vertex(p.into(), [0.0; 3], [u, v]);
        }
    }
    for i in 0..v_segments {
        for j in 0..u_segments {
            let a = i * row + j;
            let b = i * row + j + 1;
            let c = (i + 1) * row + j + 1;
            let d = (i + 1) * row + j;
            buffers.push_triangle(a, b, d);
            buffers.push_triangle(b, c, d);
        }
    }
    buffers.normals = accumulate_normals(&buffers.positions, &buffers.indices);

    Ok(buffers.build(GeometryParams::Parametric {
        label,
        u_segments,
        v_segments,
    }))
}
