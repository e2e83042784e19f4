//! Polygons with holes: flat shapes and straight extrusions along +z.

use cgmath::Vector2;

use crate::{
    data_structures::geometry::{Geometry, GeometryParams},
    error::GeometryError,
    resources::{primitives::GeometryBuffers, require_positive},
};

/// Twice the signed area; positive for counter-clockwise rings.
fn signed_area2(ring: &[Vector2<f32>]) -> f32 {
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum()
}

/// Outer ring counter-clockwise, holes clockwise, closing duplicates dropped.
fn normalise_rings(
    builder: &'static str,
    outer: &[Vector2<f32>],
    holes: &[Vec<Vector2<f32>>],
) -> Result<Vec<Vec<Vector2<f32>>>, GeometryError> {
    let mut rings = Vec::with_capacity(holes.len() + 1);
    for (idx, ring) in std::iter::once(outer).chain(holes.iter().map(Vec::as_slice)).enumerate() {
        let mut ring = ring.to_vec();
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(GeometryError::invalid(
                builder,
                format!("ring {idx} has {} points, at least 3 are required", ring.len()),
            ));
        }
        let area = signed_area2(&ring);
        if area.abs() <= f32::EPSILON {
            return Err(GeometryError::invalid(builder, format!("ring {idx} has no area")));
        }
        let wants_ccw = idx == 0;
        if (area > 0.0) != wants_ccw {
            ring.reverse();
        }
        rings.push(ring);
    }
    Ok(rings)
}

/// Triangulates the outer ring minus its holes. Triangles come back counter-clockwise.
fn triangulate(rings: &[Vec<Vector2<f32>>]) -> Result<(Vec<Vector2<f32>>, Vec<[u32; 3]>), GeometryError> {
    let points: Vec<Vector2<f32>> = rings.iter().flatten().copied().collect();
    let data: Vec<f64> = points
        .iter()
        .flat_map(|p| [p.x as f64, p.y as f64])
        .collect();
    let mut hole_indices = Vec::with_capacity(rings.len().saturating_sub(1));
    let mut offset = 0;
    for ring in rings.iter().take(rings.len() - 1) {
        offset += ring.len();
        hole_indices.push(offset);
    }

    let flat = earcutr::earcut(&data, &hole_indices, 2)
        .map_err(|e| GeometryError::Triangulation(format!("{:?}", e)))?;
    if flat.is_empty() {
        return Err(GeometryError::Triangulation("no triangles produced".to_string()));
    }

    let triangles = flat
        .chunks_exact(3)
        .map(|t| {
            let [a, b, c] = [t[0], t[1], t[2]];
            let (pa, pb, pc) = (points[a], points[b], points[c]);
            let cross = (pb.x - pa.x) * (pc.y - pa.y) - (pb.y - pa.y) * (pc.x - pa.x);
            if cross < 0.0 {
                [a as u32, c as u32, b as u32]
            } else {
                [a as u32, b as u32, c as u32]
            }
        })
        .collect();
    Ok((points, triangles))
}

/// A flat polygon with holes in the xy plane, facing +z.
pub fn shape(outer: &[Vector2<f32>], holes: &[Vec<Vector2<f32>>]) -> Result<Geometry, GeometryError> {
    let rings = normalise_rings("shape", outer, holes)?;
    let (points, triangles) = triangulate(&rings)?;

    let mut buffers = GeometryBuffers::default();
    for p in &points {
        buffers.push_vertex([p.x, p.y, 0.0], [0.0, 0.0, 1.0], [p.x, p.y]);
    }
    for [a, b, c] in triangles {
        buffers.push_triangle(a, b, c);
    }

    Ok(buffers.build(GeometryParams::Shape {
        outer_points: rings[0].len(),
        holes: rings.len() - 1,
    }))
}

/**
 * Extrudes a polygon with holes from `z = 0` to `z = depth`.
 *
 * Both caps are triangulated with the hole areas left open. Side walls are
 * emitted for the outer ring and for every hole, each quad with its own
 * vertices so the hard edges keep flat normals. All normals point away from
 * the solid.
 */
pub fn extruded_polygon(
    outer: &[Vector2<f32>],
    holes: &[Vec<Vector2<f32>>],
    depth: f32,
) -> Result<Geometry, GeometryError> {
    require_positive("extruded_polygon", "depth", depth)?;
    let rings = normalise_rings("extruded_polygon", outer, holes)?;
    let (points, triangles) = triangulate(&rings)?;

    let mut buffers = GeometryBuffers::default();

    // back cap at z = 0 faces -z
    let back = buffers.positions.len() as u32;
    for p in &points {
        buffers.push_vertex([p.x, p.y, 0.0], [0.0, 0.0, -1.0], [p.x, p.y]);
    }
    for [a, b, c] in &triangles {
        buffers.push_triangle(back + a, back + c, back + b);
    }

    // front cap at z = depth faces +z
    let front = buffers.positions.len() as u32;
    for p in &points {
        buffers.push_vertex([p.x, p.y, depth], [0.0, 0.0, 1.0], [p.x, p.y]);
    }
    for [a, b, c] in &triangles {
        buffers.push_triangle(front + a, front + b, front + c);
    }

    // walls: for a counter-clockwise outer ring and clockwise holes the right
    // hand side of each edge is outside the solid
    for ring in &rings {
        let mut along = 0.0;
        for (k, p0) in ring.iter().enumerate() {
            let p1 = ring[(k + 1) % ring.len()];
            let d = p1 - *p0;
            let len = cgmath::InnerSpace::magnitude(d);
            let normal = [d.y / len, -d.x / len, 0.0];
            let base = buffers.positions.len() as u32;
            buffers.push_vertex([p0.x, p0.y, 0.0], normal, [along, 0.0]);
            buffers.push_vertex([p1.x, p1.y, 0.0], normal, [along + len, 0.0]);
            buffers.push_vertex([p1.x, p1.y, depth], normal, [along + len, depth]);
            buffers.push_vertex([p0.x, p0.y, depth], normal, [along, depth]);
            buffers.push_triangle(base, base + 1, base + 2);
            buffers.push_triangle(base, base + 2, base + 3);
            along += len;
        }
    }

    Ok(buffers.build(GeometryParams::Extrusion {
        outer_points: rings[0].len(),
        holes: rings.len() - 1,
        depth,
    }))
}

/// Axis-aligned rectangle ring from `(x0, y0)` to `(x1, y1)`, counter-clockwise.
pub fn rectangle(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Vector2<f32>> {
    vec![
        Vector2::new(x0, y0),
        Vector2::new(x1, y0),
        Vector2::new(x1, y1),
        Vector2::new(x0, y1),
    ]
}
