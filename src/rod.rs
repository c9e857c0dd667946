use cgmath::{Point3, Vector3};

use crate::cut::Aabb3;

/// Geometry published for the rod after every pose change: either the eight
/// box corners, or a single rigid pose.
#[derive(Clone, Debug, PartialEq)]
pub enum RodGeometry {
    Corners([Point3<f64>; 8]),
    /// Position plus identity orientation quaternion (x, y, z, qx, qy, qz, qw).
    RigidPose([f64; 7]),
}

/// Pose of the rod tool: a movable center with fixed half-extents.
///
/// The half-extents are non-negative and constant after construction; only
/// the center moves.
#[derive(Clone, Debug)]
pub struct RodState {
    center: Point3<f64>,
    half_extents: Vector3<f64>,
    rigid: bool,
}

impl RodState {
    pub fn new(center: Point3<f64>, half_extents: Vector3<f64>, rigid: bool) -> Self {
        debug_assert!(
            half_extents.x >= 0.0 && half_extents.y >= 0.0 && half_extents.z >= 0.0,
            "rod half-extents must be non-negative"
        );
        Self {
            center,
            half_extents,
            rigid,
        }
    }

    pub fn center(&self) -> Point3<f64> {
        self.center
    }

    pub fn half_extents(&self) -> Vector3<f64> {
        self.half_extents
    }

    pub fn is_rigid(&self) -> bool {
        self.rigid
    }

    pub fn bounds(&self) -> Aabb3 {
        Aabb3::from_center_half_extents(self.center, self.half_extents)
    }

    /// Move the center by `delta`. Returns false without touching the pose
    /// when every component is exactly zero, so callers can skip a redundant
    /// geometry republish.
    pub fn translate(&mut self, delta: Vector3<f64>) -> bool {
        if delta.x == 0.0 && delta.y == 0.0 && delta.z == 0.0 {
            return false;
        }
        self.center += delta;
        true
    }

    pub fn reset_center(&mut self) {
        self.center = Point3::new(0.0, 0.0, 0.0);
    }

    /// Current geometry to publish. Box corners follow a fixed ordering
    /// (-,-,-), (+,-,-), (+,+,-), (-,+,-), (-,-,+), (+,-,+), (+,+,+), (-,+,+)
    /// so the triangulation wired up by the host stays consistent as the rod
    /// moves.
    pub fn geometry(&self) -> RodGeometry {
        let c = self.center;
        if self.rigid {
            return RodGeometry::RigidPose([c.x, c.y, c.z, 0.0, 0.0, 0.0, 1.0]);
        }
        let h = self.half_extents;
        RodGeometry::Corners([
            Point3::new(c.x - h.x, c.y - h.y, c.z - h.z),
            Point3::new(c.x + h.x, c.y - h.y, c.z - h.z),
            Point3::new(c.x + h.x, c.y + h.y, c.z - h.z),
            Point3::new(c.x - h.x, c.y + h.y, c.z - h.z),
            Point3::new(c.x - h.x, c.y - h.y, c.z + h.z),
            Point3::new(c.x + h.x, c.y - h.y, c.z + h.z),
            Point3::new(c.x + h.x, c.y + h.y, c.z + h.z),
            Point3::new(c.x - h.x, c.y + h.y, c.z + h.z),
        ])
    }
}
