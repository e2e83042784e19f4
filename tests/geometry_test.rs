use cgmath::{Vector2, Vector3};
use greenhouse_ngin::{
    error::GeometryError,
    structures::cover::notched_outline,
    resources::{
        arc_centerline, arc_points, circle, cone, cuboid, cylinder, extruded_polygon, parametric_surface,
        plane, rectangle, shape, sphere, tube, CircularArc,
    },
};

use crate::common::test_utils::assert_close;

mod common;

fn is_invalid<T: std::fmt::Debug>(result: Result<T, GeometryError>) -> bool {
    matches!(result, Err(GeometryError::InvalidParameter { .. }))
}

#[test]
fn cylinder_counts_follow_the_closed_form() {
    for radial in [3, 8, 16, 32] {
        let r = radial as usize;
        let closed = cylinder(0.5, 0.5, 2.0, radial, false).unwrap();
        assert_eq!(closed.vertex_count(), 2 * (r + 1) + 2 * (r + 2));
        assert_eq!(closed.triangle_count(), 2 * r + 2 * r);

        let open = cylinder(0.5, 0.5, 2.0, radial, true).unwrap();
        assert_eq!(open.vertex_count(), 2 * (r + 1));
        assert_eq!(open.triangle_count(), 2 * r);
    }
}

#[test]
fn cone_has_a_single_cap() {
    let geometry = cone(0.05, 0.08, 12, false).unwrap();
    assert_eq!(geometry.vertex_count(), 2 * 13 + 14);
    assert_eq!(geometry.triangle_count(), 2 * 12 + 12);
}

#[test]
fn cylinder_rejects_bad_parameters() {
    assert!(is_invalid(cylinder(0.0, 1.0, 1.0, 8, false)));
    assert!(is_invalid(cylinder(1.0, -1.0, 1.0, 8, false)));
    assert!(is_invalid(cylinder(1.0, 1.0, 0.0, 8, false)));
    assert!(is_invalid(cylinder(1.0, 1.0, 1.0, 2, false)));
    assert!(is_invalid(cylinder(f32::NAN, 1.0, 1.0, 8, false)));
}

#[test]
fn cylinder_is_centred_on_the_y_axis() {
    let geometry = cylinder(0.2, 0.2, 3.0, 16, false).unwrap();
    let (min, max) = geometry.bounds();
    assert_close(min[1], -1.5);
    assert_close(max[1], 1.5);
    assert_close(max[0], 0.2);
    assert_close(min[2], -0.2);
}

#[test]
fn arc_centerline_endpoints_are_exact() {
    for arch_height in [0.5, 1.0, 5.0, 12.0] {
        let points = arc_centerline(7.0, arch_height, 20).unwrap();
        assert_eq!(points.len(), 21);
        assert_eq!(points[0], Vector3::new(7.0, 0.0, 0.0));
        assert_eq!(points[20], Vector3::new(-7.0, 0.0, 0.0));
        assert_close(points[10].y, arch_height);
        assert_close(points[10].x, 0.0);
    }
}

#[test]
fn arc_centerline_rejects_flat_arches() {
    assert!(is_invalid(arc_centerline(7.0, 0.0, 20)));
    assert!(is_invalid(arc_centerline(7.0, 5.0, 2)));
}

#[test]
fn arc_points_sample_the_circle() {
    let points = arc_points(Vector2::new(1.0, 2.0), 0.5, 0.0, std::f32::consts::FRAC_PI_2, 8).unwrap();
    assert_eq!(points.len(), 9);
    assert_close(points[0].x, 1.5);
    assert_close(points[0].y, 2.0);
    assert_close(points[8].x, 1.0);
    assert_close(points[8].y, 2.5);
    assert!(is_invalid(arc_points(Vector2::new(0.0, 0.0), 1.0, 1.0, 1.0, 8)));
}

#[test]
fn circular_arc_uses_the_canonical_radius() {
    let arc = CircularArc::from_span(14.0, 5.0).unwrap();
    assert_close(arc.radius, (14.0 * 14.0 + 4.0 * 25.0) / 30.0);
    assert_close(arc.height_at(13.0, 0.0).unwrap(), 13.0);
    let side = arc.height_at(13.0, 14.0 / 3.0).unwrap();
    assert!(side < 13.0);
    assert_close(side, arc.height_at(13.0, -14.0 / 3.0).unwrap());
    assert!(is_invalid(arc.height_at(13.0, arc.radius * 2.0)));
}

#[test]
fn parametric_surface_grid_counts() {
    let geometry = parametric_surface("saddle", |u, v| Vector3::new(u, u * v, v), 7, 4).unwrap();
    assert_eq!(geometry.vertex_count(), 8 * 5);
    assert_eq!(geometry.triangle_count(), 2 * 7 * 4);
    for normal in geometry.normals() {
        let length = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
        assert_close(length, 1.0);
    }
}

#[test]
fn parametric_surface_winding_is_consistent() {
    // a flat sheet: every triangle must face the same way
    let geometry = parametric_surface("sheet", |u, v| Vector3::new(u, v, 0.0), 5, 5).unwrap();
    let positions = geometry.positions();
    for [a, b, c] in geometry.triangles() {
        let (pa, pb, pc) = (positions[a as usize], positions[b as usize], positions[c as usize]);
        let cross = (pb[0] - pa[0]) * (pc[1] - pa[1]) - (pb[1] - pa[1]) * (pc[0] - pa[0]);
        assert!(cross > 0.0);
    }
}

#[test]
fn parametric_surface_rejects_non_finite_samples() {
    let result = parametric_surface("pole", |u, _| Vector3::new(1.0 / u, 0.0, 0.0), 4, 4);
    assert!(is_invalid(result));
}

#[test]
fn tube_has_one_ring_per_path_point() {
    let path = arc_centerline(1.0, 1.0, 10).unwrap();
    let geometry = tube(&path, 0.1, 16).unwrap();
    assert_eq!(geometry.vertex_count(), path.len() * 17);
    assert_eq!(geometry.triangle_count(), 2 * 16 * (path.len() - 1));
}

#[test]
fn tube_rings_keep_their_radius() {
    let path = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 2.0)];
    let geometry = tube(&path, 0.25, 8).unwrap();
    for p in geometry.positions() {
        let radial = (p[0] * p[0] + p[1] * p[1]).sqrt();
        assert_close(radial, 0.25);
    }
    assert!(is_invalid(tube(&path[..1], 0.25, 8)));
}

#[test]
fn extrusion_with_hole_counts() {
    let outer = rectangle(-1.0, -1.0, 1.0, 1.0);
    let hole = rectangle(-0.5, -0.5, 0.5, 0.5);
    let geometry = extruded_polygon(&outer, &[hole], 0.4).unwrap();
    // 8 ring points per cap, 4 vertices per wall quad
    assert_eq!(geometry.vertex_count(), 2 * 8 + 8 * 4);
    // earcut yields n + 2h - 2 triangles per cap
    assert_eq!(geometry.triangle_count(), 2 * 8 + 8 * 2);
    let (min, max) = geometry.bounds();
    assert_close(min[2], 0.0);
    assert_close(max[2], 0.4);
}

#[test]
fn extrusion_walls_face_outward() {
    let outer = rectangle(-1.0, -1.0, 1.0, 1.0);
    let hole = rectangle(-0.5, -0.5, 0.5, 0.5);
    let geometry = extruded_polygon(&outer, &[hole], 0.4).unwrap();
    for (p, n) in geometry.positions().iter().zip(geometry.normals()) {
        if n[2] != 0.0 {
            continue;
        }
        let on_outer = p[0].abs() > 0.75 || p[1].abs() > 0.75;
        let outward = p[0] * n[0] + p[1] * n[1];
        if on_outer {
            assert!(outward > 0.0, "outer wall normal {:?} at {:?} points inward", n, p);
        } else {
            assert!(outward < 0.0, "hole wall normal {:?} at {:?} points into the hole", n, p);
        }
    }
}

#[test]
fn extrusion_normalises_ring_orientation() {
    let mut clockwise = rectangle(0.0, 0.0, 2.0, 1.0);
    clockwise.reverse();
    let reversed = extruded_polygon(&clockwise, &[], 1.0).unwrap();
    let forward = extruded_polygon(&rectangle(0.0, 0.0, 2.0, 1.0), &[], 1.0).unwrap();
    assert_eq!(reversed.vertex_count(), forward.vertex_count());
    assert_eq!(reversed.triangle_count(), forward.triangle_count());
}

#[test]
fn extrusion_rejects_degenerate_input() {
    let outer = rectangle(0.0, 0.0, 1.0, 1.0);
    assert!(is_invalid(extruded_polygon(&outer, &[], 0.0)));
    assert!(is_invalid(extruded_polygon(&outer[..2], &[], 1.0)));
    let collinear = vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        Vector2::new(2.0, 0.0),
    ];
    assert!(is_invalid(extruded_polygon(&collinear, &[], 1.0)));
}

#[test]
fn shape_triangles_face_up() {
    let outline = arc_centerline(7.0, 5.0, 20)
        .unwrap()
        .iter()
        .map(|p| Vector2::new(p.x, p.y))
        .collect::<Vec<_>>();
    let geometry = shape(&outline, &[]).unwrap();
    assert_eq!(geometry.vertex_count(), 21);
    assert_eq!(geometry.triangle_count(), 19);
    let positions = geometry.positions();
    for [a, b, c] in geometry.triangles() {
        let (pa, pb, pc) = (positions[a as usize], positions[b as usize], positions[c as usize]);
        let cross = (pb[0] - pa[0]) * (pc[1] - pa[1]) - (pb[1] - pa[1]) * (pc[0] - pa[0]);
        assert!(cross >= 0.0);
    }
}

#[test]
fn plane_sphere_circle_and_cuboid_counts() {
    let grid = plane(30.0, 42.0, 20, 20).unwrap();
    assert_eq!(grid.vertex_count(), 21 * 21);
    assert_eq!(grid.triangle_count(), 2 * 20 * 20);
    assert!(is_invalid(plane(1.0, 1.0, 0, 1)));

    let ball = sphere(1.0, 6, 6).unwrap();
    assert_eq!(ball.vertex_count(), 7 * 7);
    assert_eq!(ball.triangle_count(), 2 * 6 * 6 - 2 * 6);

    let disk = circle(0.4, 16).unwrap();
    assert_eq!(disk.vertex_count(), 18);
    assert_eq!(disk.triangle_count(), 16);

    let block = cuboid(0.75, 2.5, 0.05).unwrap();
    assert_eq!(block.vertex_count(), 24);
    assert_eq!(block.triangle_count(), 12);
    let (min, max) = block.bounds();
    assert_close(max[1] - min[1], 2.5);
}

#[test]
fn occlusion_uvs_copy_the_primary_channel() {
    let geometry = plane(1.0, 1.0, 2, 2).unwrap();
    assert!(geometry.occlusion_uvs().is_none());
    let geometry = geometry.with_occlusion_uv();
    assert_eq!(geometry.occlusion_uvs(), Some(geometry.uvs()));
}

#[test]
fn vertices_carry_tangents() {
    let geometry = plane(2.0, 2.0, 1, 1).unwrap();
    let vertices = geometry.to_vertices();
    assert_eq!(vertices.len(), geometry.vertex_count());
    for vertex in vertices {
        assert_close(vertex.tangent[0], 2.0);
        assert_close(vertex.tangent[2], 0.0);
    }
}

fn cap_area(positions: &[[f32; 3]], triangles: impl Iterator<Item = [u32; 3]>, z: f32) -> f32 {
    triangles
        .map(|t| t.map(|i| positions[i as usize]))
        .filter(|[a, b, c]| [a, b, c].iter().all(|p| (p[2] - z).abs() < 1e-6))
        .map(|[a, b, c]| ((b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])).abs() / 2.0)
        .sum()
}

#[test]
fn notched_panel_leaves_the_door_open() {
    let outline = notched_outline(42.0, 8.0, 1.5, 2.5);
    let expected = 42.0 * 8.0 - 1.5 * 2.5;

    let panel = shape(&outline, &[]).unwrap();
    let area = cap_area(panel.positions(), panel.triangles(), 0.0);
    assert!((area - expected).abs() < 1e-2, "panel covers {}", area);

    let depth = 0.01;
    let extruded = extruded_polygon(&outline, &[], depth).unwrap();
    let positions = extruded.positions();
    let front = cap_area(positions, extruded.triangles(), depth);
    assert!((front - expected).abs() < 1e-2, "front cap covers {}", front);

    // no cap triangle covers the doorway
    for [a, b, c] in extruded.triangles() {
        let (pa, pb, pc) = (positions[a as usize], positions[b as usize], positions[c as usize]);
        let centroid = [(pa[0] + pb[0] + pc[0]) / 3.0, (pa[1] + pb[1] + pc[1]) / 3.0];
        let in_doorway = centroid[0].abs() < 0.75 && centroid[1] < 2.5;
        let on_cap = [pa, pb, pc].iter().all(|p| p[2] == pa[2]);
        assert!(!(on_cap && in_doorway), "cap triangle at {:?} fills the doorway", centroid);
    }
}
