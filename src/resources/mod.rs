use crate::error::GeometryError;

/**
 * This module contains all procedural mesh builders. Every builder validates
 * its inputs and returns an immutable `Geometry` that callers wrap in an `Rc`
 * to share between scene nodes.
 */
pub mod curves;
pub mod extrude;
pub mod mesh;
pub mod parametric;
pub mod primitives;

pub use curves::{arc_centerline, arc_points, tube, CircularArc};
pub use extrude::{extruded_polygon, rectangle, shape};
pub use parametric::parametric_surface;
pub use primitives::{circle, cone, cuboid, cylinder, cylinder_sector, plane, sphere, sphere_section};

/// Rejects zero, negative and non-finite dimensions.
pub(crate) fn require_positive(
    builder: &'static str,
    field: &str,
    value: f32,
) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid(
            builder,
            format!("`{field}` must be a positive finite number, got {value}"),
        ))
    }
}

pub(crate) fn require_segments(
    builder: &'static str,
    field: &str,
    value: u32,
    min: u32,
) -> Result<(), GeometryError> {
    if value >= min {
        Ok(())
    } else {
        Err(GeometryError::invalid(
            builder,
            format!("`{field}` must be at least {min}, got {value}"),
        ))
    }
}
