//! Per-node transformation data.
//!
//! Every scene node carries a local [`Instance`] and a cached world
//! [`Instance`]. Nodes that share geometry differ only in these transforms,
//! and the world transforms are packed into [`InstanceRaw`] for a GPU
//! renderer to consume in instanced draws.

use std::ops::Mul;

use cgmath::{InnerSpace, One, Rad, Rotation3, SquareMatrix};

/// Position, rotation (as quaternion) and scale of a node.
///
/// Composition follows the scene graph: `parent * local` yields the child's
/// world transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    pub position: cgmath::Vector3<f32>,
    pub rotation: cgmath::Quaternion<f32>,
    pub scale: cgmath::Vector3<f32>,
}

impl Instance {
    /// Create a new instance with identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: cgmath::Vector3::new(0.0, 0.0, 0.0),
            // `Quaternion::one()` is the identity quaternion (no rotation)
            rotation: cgmath::Quaternion::one(),
            scale: cgmath::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        cgmath::Vector3::new(x, y, z).into()
    }

    /// Replaces the rotation with Euler angles applied in XYZ order.
    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = euler_xyz(x, y, z);
        self
    }

    pub fn scaled(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = cgmath::Vector3::new(x, y, z);
        self
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position)
            * cgmath::Matrix4::from(self.rotation)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Maps a point from this transform's local space into its parent space.
    pub fn transform_point(&self, point: cgmath::Vector3<f32>) -> cgmath::Vector3<f32> {
        let scaled = cgmath::Vector3::new(
            self.scale.x * point.x,
            self.scale.y * point.y,
            self.scale.z * point.z,
        );
        self.position + self.rotation * scaled
    }

    pub fn to_raw(&self) -> InstanceRaw {
        let world_matrix = self.to_matrix();
        let det = world_matrix.determinant();
        let handedness = det.signum();
        InstanceRaw {
            model: world_matrix.into(),
            normal: cgmath::Matrix3::from(self.rotation.normalize()).into(),
            handedness,
        }
    }
}

/// Quaternion for Euler angles in XYZ order, matching `Rx * Ry * Rz`.
pub fn euler_xyz(x: f32, y: f32, z: f32) -> cgmath::Quaternion<f32> {
    cgmath::Quaternion::from_angle_x(Rad(x))
        * cgmath::Quaternion::from_angle_y(Rad(y))
        * cgmath::Quaternion::from_angle_z(Rad(z))
}

impl Mul<Instance> for Instance {
    type Output = Self;

    fn mul(self, rhs: Instance) -> Self::Output {
        &self * &rhs
    }
}

impl<'a, 'b> Mul<&'b Instance> for &'a Instance {
    type Output = Instance;

    fn mul(self, rhs: &'b Instance) -> Self::Output {
        let new_rotation = self.rotation * rhs.rotation;

        let new_scale = cgmath::Vector3::new(
            self.scale.x * rhs.scale.x,
            self.scale.y * rhs.scale.y,
            self.scale.z * rhs.scale.z,
        );
        let new_position = self.transform_point(rhs.position);

        Instance {
            position: new_position,
            rotation: new_rotation,
            scale: new_scale,
        }
    }
}

impl From<cgmath::Vector3<f32>> for Instance {
    fn from(position: cgmath::Vector3<f32>) -> Self {
        Instance {
            position,
            ..Default::default()
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * The raw instance is what a renderer uploads per instance: the world matrix,
 * the rotation part for normals and the sign of the determinant so mirrored
 * instances can flip their winding.
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    model: [[f32; 4]; 4],
    normal: [[f32; 3]; 3],
    handedness: f32,
}

impl InstanceRaw {
    pub fn model(&self) -> cgmath::Matrix4<f32> {
        self.model.into()
    }

    pub fn translation(&self) -> cgmath::Vector3<f32> {
        cgmath::Vector3::new(self.model[3][0], self.model[3][1], self.model[3][2])
    }

    pub fn handedness(&self) -> f32 {
        self.handedness
    }
}
