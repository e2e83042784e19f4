//! Arc sampling and tubes lofted along sampled paths.

use cgmath::{InnerSpace, Rotation, Vector2, Vector3};

use crate::{
    data_structures::geometry::{Geometry, GeometryParams},
    error::GeometryError,
    resources::{primitives::GeometryBuffers, require_positive, require_segments},
};

/// Samples a half-sine arch spanning `2 * half_width` and rising to `arch_height`.
///
/// Point `i` sits at `t = i / segments` with `x = cos(tπ)·half_width` and
/// `y = sin(tπ)·arch_height`, so the first point is `(half_width, 0, 0)`, the
/// last is `(-half_width, 0, 0)` and the apex is `(0, arch_height, 0)`.
pub fn arc_centerline(
    half_width: f32,
    arch_height: f32,
    segments: u32,
) -> Result<Vec<Vector3<f32>>, GeometryError> {
    require_positive("arc_centerline", "half_width", half_width)?;
    require_positive("arc_centerline", "arch_height", arch_height)?;
    require_segments("arc_centerline", "segments", segments, 3)?;

    let mut points: Vec<Vector3<f32>> = (0..=segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * std::f32::consts::PI;
            Vector3::new(angle.cos() * half_width, angle.sin() * arch_height, 0.0)
        })
        .collect();
    // cos(π) and sin(π) are not exact in floating point
    points[0] = Vector3::new(half_width, 0.0, 0.0);
    points[segments as usize] = Vector3::new(-half_width, 0.0, 0.0);
    Ok(points)
}

/// Samples `segments + 1` points of a circle arc from `start` to `end` radians.
pub fn arc_points(
    center: Vector2<f32>,
    radius: f32,
    start: f32,
    end: f32,
    segments: u32,
) -> Result<Vec<Vector2<f32>>, GeometryError> {
    require_positive("arc_points", "radius", radius)?;
    require_segments("arc_points", "segments", segments, 3)?;
    if start == end {
        return Err(GeometryError::invalid("arc_points", "arc has zero sweep"));
    }
    Ok((0..=segments)
        .map(|i| {
            let angle = start + (end - start) * i as f32 / segments as f32;
            center + Vector2::new(angle.cos(), angle.sin()) * radius
        })
        .collect())
}

/// The circle that the secondary roof beams rest on.
///
/// The radius is `(width² + 4·arch_height²) / (6·arch_height)` and the centre
/// lies on the span axis, one radius below the apex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularArc {
    pub radius: f32,
}

impl CircularArc {
    pub fn from_span(width: f32, arch_height: f32) -> Result<Self, GeometryError> {
        require_positive("circular_arc", "width", width)?;
        require_positive("circular_arc", "arch_height", arch_height)?;
        let radius = (width * width + 4.0 * arch_height * arch_height) / (6.0 * arch_height);
        Ok(Self { radius })
    }

    pub fn center_y(&self, apex_y: f32) -> f32 {
        apex_y - self.radius
    }

    /// Elevation of the arc at `offset` from the span centre, for an apex at `apex_y`.
    pub fn height_at(&self, apex_y: f32, offset: f32) -> Result<f32, GeometryError> {
        let under_root = self.radius * self.radius - offset * offset;
        if under_root < 0.0 {
            return Err(GeometryError::invalid(
                "circular_arc",
                format!("offset {offset} lies outside radius {}", self.radius),
            ));
        }
        Ok(self.center_y(apex_y) + under_root.sqrt())
    }
}

/**
 * Lofts a circular cross-section of `radius` along `path`.
 *
 * One ring of `radial_segments + 1` vertices is emitted per path point. Ring
 * orientation is carried from point to point by parallel transport so the
 * tube does not twist around bends.
 */
pub fn tube(
    path: &[Vector3<f32>],
    radius: f32,
    radial_segments: u32,
) -> Result<Geometry, GeometryError> {
    require_positive("tube", "radius", radius)?;
    require_segments("tube", "radial_segments", radial_segments, 3)?;
    if path.len() < 2 {
        return Err(GeometryError::invalid("tube", "path needs at least two points"));
    }
    if path.windows(2).any(|w| (w[1] - w[0]).magnitude2() <= f32::EPSILON) {
        return Err(GeometryError::invalid("tube", "path has a zero-length segment"));
    }

    let last = path.len() - 1;
    let tangents: Vec<Vector3<f32>> = (0..path.len())
        .map(|i| (path[(i + 1).min(last)] - path[i.saturating_sub(1)]).normalize())
        .collect();

    let mut normal = initial_normal(tangents[0]);
    let mut buffers = GeometryBuffers::default();
    let ring = radial_segments + 1;

    for (i, point) in path.iter().enumerate() {
        if i > 0 {
            let transport = cgmath::Quaternion::from_arc(tangents[i - 1], tangents[i], None);
            normal = transport.rotate_vector(normal).normalize();
        }
        let binormal = tangents[i].cross(normal).normalize();
        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * std::f32::consts::TAU;
            let (sin, cos) = v.sin_cos();
            let dir = normal * -cos + binormal * sin;
            buffers.push_vertex(
                (*point + dir * radius).into(),
                dir.into(),
                [i as f32 / last as f32, j as f32 / radial_segments as f32],
            );
        }
    }
    for i in 1..path.len() as u32 {
        for j in 1..=radial_segments {
            let a = ring * (i - 1) + (j - 1);
            let b = ring * i + (j - 1);
            let c = ring * i + j;
            let d = ring * (i - 1) + j;
            buffers.push_triangle(a, b, d);
            buffers.push_triangle(b, c, d);
        }
    }

    Ok(buffers.build(GeometryParams::Tube {
        path_points: path.len(),
        radius,
        radial_segments,
    }))
}

/// A unit vector perpendicular to `tangent`, built against the axis the
/// tangent is least aligned with.
fn initial_normal(tangent: Vector3<f32>) -> Vector3<f32> {
    let abs = Vector3::new(tangent.x.abs(), tangent.y.abs(), tangent.z.abs());
    let axis = if abs.x <= abs.y && abs.x <= abs.z {
        Vector3::unit_x()
    } else if abs.y <= abs.z {
        Vector3::unit_y()
    } else {
        Vector3::unit_z()
    };
    tangent.cross(axis).normalize()
}
