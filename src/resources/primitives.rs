//! Primitive builders: cylinders, cones, planes, spheres, circles and boxes.
//!
//! Conventions follow the usual right-handed, y-up layout: cylinders and cones
//! stand on the y axis centred at the origin, planes and circles face +z.

use std::f32::consts::{PI, TAU};

use crate::{
    data_structures::geometry::{Geometry, GeometryParams},
    error::GeometryError,
    resources::{require_positive, require_segments},
};

/// Collects vertex attributes while a builder runs.
#[derive(Default)]
pub(crate) struct GeometryBuffers {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl GeometryBuffers {
    pub fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> u32 {
        let idx = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        idx
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn build(self, params: GeometryParams) -> Geometry {
        Geometry::new(params, self.positions, self.normals, self.uvs, self.indices)
    }
}

pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
    open_ended: bool,
) -> Result<Geometry, GeometryError> {
    cylinder_sector(radius_top, radius_bottom, height, radial_segments, open_ended, 0.0, TAU)
}

/// A cylinder (or truncated cone) covering only `theta_length` radians of
/// its circumference, starting at `theta_start`.
pub fn cylinder_sector(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
    open_ended: bool,
    theta_start: f32,
    theta_length: f32,
) -> Result<Geometry, GeometryError> {
    require_positive("cylinder", "radius_top", radius_top)?;
    require_positive("cylinder", "radius_bottom", radius_bottom)?;
    require_positive("cylinder", "height", height)?;
    require_positive("cylinder", "theta_length", theta_length)?;
    require_segments("cylinder", "radial_segments", radial_segments, 3)?;
    Ok(lathe(
        radius_top,
        radius_bottom,
        height,
        radial_segments,
        open_ended,
        theta_start,
        theta_length,
    ))
}

/// A cone with its apex at `+height / 2`.
pub fn cone(
    radius: f32,
    height: f32,
    radial_segments: u32,
    open_ended: bool,
) -> Result<Geometry, GeometryError> {
    require_positive("cone", "radius", radius)?;
    require_positive("cone", "height", height)?;
    require_segments("cone", "radial_segments", radial_segments, 3)?;
    Ok(lathe(0.0, radius, height, radial_segments, open_ended, 0.0, TAU))
}

fn lathe(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
    open_ended: bool,
    theta_start: f32,
    theta_length: f32,
) -> Geometry {
    let mut buffers = GeometryBuffers::default();
    let half_height = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;
    let ring = radial_segments + 1;

    // torso: one row at the top (v = 0) and one at the bottom (v = 1)
    for row in 0..2 {
        let v = row as f32;
        let radius = v * (radius_bottom - radius_top) + radius_top;
        for x in 0..=radial_segments {
            let u = x as f32 / radial_segments as f32;
            let theta = u * theta_length + theta_start;
            let (sin, cos) = theta.sin_cos();
            let normal = cgmath::Vector3::new(sin, slope, cos);
            let normal = normal / cgmath::InnerSpace::magnitude(normal);
            buffers.push_vertex(
                [radius * sin, -v * height + half_height, radius * cos],
                normal.into(),
                [u, 1.0 - v],
            );
        }
    }
    for x in 0..radial_segments {
        let a = x;
        let b = ring + x;
        let c = ring + x + 1;
        let d = x + 1;
        buffers.push_triangle(a, b, d);
        buffers.push_triangle(b, c, d);
    }

    if !open_ended {
        if radius_top > 0.0 {
            push_cap(&mut buffers, true, radius_top, half_height, radial_segments, theta_start, theta_length);
        }
        if radius_bottom > 0.0 {
            push_cap(&mut buffers, false, radius_bottom, half_height, radial_segments, theta_start, theta_length);
        }
    }

    buffers.build(GeometryParams::Cylinder {
        radius_top,
        radius_bottom,
        height,
        radial_segments,
        open_ended,
        theta_start,
        theta_length,
    })
}

fn push_cap(
    buffers: &mut GeometryBuffers,
    top: bool,
    radius: f32,
    half_height: f32,
    radial_segments: u32,
    theta_start: f32,
    theta_length: f32,
) {
    let sign = if top { 1.0 } else { -1.0 };
    let y = half_height * sign;
    let center = buffers.push_vertex([0.0, y, 0.0], [0.0, sign, 0.0], [0.5, 0.5]);
    let first = center + 1;
    for x in 0..=radial_segments {
        let u = x as f32 / radial_segments as f32;
        let theta = u * theta_length + theta_start;
        let (sin, cos) = theta.sin_cos();
        buffers.push_vertex(
            [radius * sin, y, radius * cos],
            [0.0, sign, 0.0],
            [cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5],
        );
    }
    for x in 0..radial_segments {
        let i = first + x;
        if top {
            buffers.push_triangle(i, i + 1, center);
        } else {
            buffers.push_triangle(i + 1, i, center);
        }
    }
}

/// A `width × height` plane in the xy plane facing +z, subdivided into a
/// `width_segments × height_segments` grid.
pub fn plane(
    width: f32,
    height: f32,
    width_segments: u32,
    height_segments: u32,
) -> Result<Geometry, GeometryError> {
    require_positive("plane", "width", width)?;
    require_positive("plane", "height", height)?;
    require_segments("plane", "width_segments", width_segments, 1)?;
    require_segments("plane", "height_segments", height_segments, 1)?;

    let mut buffers = GeometryBuffers::default();
    let grid_x1 = width_segments + 1;
    let segment_width = width / width_segments as f32;
    let segment_height = height / height_segments as f32;

    for iy in 0..=height_segments {
        let y = iy as f32 * segment_height - height / 2.0;
        for ix in 0..=width_segments {
            let x = ix as f32 * segment_width - width / 2.0;
            buffers.push_vertex(
                [x, -y, 0.0],
                [0.0, 0.0, 1.0],
                [
                    ix as f32 / width_segments as f32,
                    1.0 - iy as f32 / height_segments as f32,
                ],
            );
        }
    }
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = ix + grid_x1 * iy;
            let b = ix + grid_x1 * (iy + 1);
            let c = ix + 1 + grid_x1 * (iy + 1);
            let d = ix + 1 + grid_x1 * iy;
            buffers.push_triangle(a, b, d);
            buffers.push_triangle(b, c, d);
        }
    }

    Ok(buffers.build(GeometryParams::Plane {
        width,
        height,
        width_segments,
        height_segments,
    }))
}

pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Result<Geometry, GeometryError> {
    sphere_section(radius, width_segments, height_segments, 0.0, PI)
}

/// A full-circumference band of a sphere between polar angles `theta_start`
/// and `theta_start + theta_length` (0 is the +y pole).
pub fn sphere_section(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    theta_start: f32,
    theta_length: f32,
) -> Result<Geometry, GeometryError> {
    require_positive("sphere", "radius", radius)?;
    require_positive("sphere", "theta_length", theta_length)?;
    require_segments("sphere", "width_segments", width_segments, 3)?;
    require_segments("sphere", "height_segments", height_segments, 2)?;

    let theta_end = (theta_start + theta_length).min(PI);
    let mut buffers = GeometryBuffers::default();
    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(height_segments as usize + 1);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = theta_start + v * theta_length;
        let mut row = Vec::with_capacity(width_segments as usize + 1);
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * TAU;
            let position = [
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ];
            let normal = [position[0] / radius, position[1] / radius, position[2] / radius];
            row.push(buffers.push_vertex(position, normal, [u, 1.0 - v]));
        }
        grid.push(row);
    }

    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 || theta_start > 0.0 {
                buffers.push_triangle(a, b, d);
            }
            if iy != height_segments as usize - 1 || theta_end < PI {
                buffers.push_triangle(b, c, d);
            }
        }
    }

    Ok(buffers.build(GeometryParams::Sphere {
        radius,
        width_segments,
        height_segments,
        theta_start,
        theta_length,
    }))
}

/// A flat disk in the xy plane facing +z.
pub fn circle(radius: f32, segments: u32) -> Result<Geometry, GeometryError> {
    require_positive("circle", "radius", radius)?;
    require_segments("circle", "segments", segments, 3)?;

    let mut buffers = GeometryBuffers::default();
    let center = buffers.push_vertex([0.0; 3], [0.0, 0.0, 1.0], [0.5, 0.5]);
    for s in 0..=segments {
        let theta = s as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        buffers.push_vertex(
            [radius * cos, radius * sin, 0.0],
            [0.0, 0.0, 1.0],
            [cos * 0.5 + 0.5, sin * 0.5 + 0.5],
        );
    }
    for s in 1..=segments {
        buffers.push_triangle(s, s + 1, center);
    }

    Ok(buffers.build(GeometryParams::Circle { radius, segments }))
}

/// An axis-aligned box centred at the origin: 24 vertices, 12 triangles.
pub fn cuboid(width: f32, height: f32, depth: f32) -> Result<Geometry, GeometryError> {
    require_positive("cuboid", "width", width)?;
    require_positive("cuboid", "height", height)?;
    require_positive("cuboid", "depth", depth)?;

    let half = cgmath::Vector3::new(width / 2.0, height / 2.0, depth / 2.0);
    let x = cgmath::Vector3::unit_x();
    let y = cgmath::Vector3::unit_y();
    let z = cgmath::Vector3::unit_z();
    // (normal, u axis, v axis) with u × v == normal
    let faces = [(x, -z, y), (-x, z, y), (y, x, -z), (-y, x, z), (z, x, y), (-z, -x, y)];

    let mut buffers = GeometryBuffers::default();
    for (normal, u, v) in faces {
        let scale = |axis: cgmath::Vector3<f32>| {
            cgmath::Vector3::new(axis.x * half.x, axis.y * half.y, axis.z * half.z)
        };
        let center = scale(normal);
        let (du, dv) = (scale(u), scale(v));
        let corners = [
            (center - du - dv, [0.0, 0.0]),
            (center + du - dv, [1.0, 0.0]),
            (center + du + dv, [1.0, 1.0]),
            (center - du + dv, [0.0, 1.0]),
        ];
        let base = buffers.positions.len() as u32;
        for (corner, uv) in corners {
            buffers.push_vertex(corner.into(), normal.into(), uv);
        }
        buffers.push_triangle(base, base + 1, base + 2);
        buffers.push_triangle(base, base + 2, base + 3);
    }

    Ok(buffers.build(GeometryParams::Cuboid { width, height, depth }))
}
