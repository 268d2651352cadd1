//! Common types used throughout planimetry_nav

use nalgebra::{Vector2, Vector3};

/// 3D point in the robot frame: x forward, y lateral (positive to the left), z up.
///
/// Units are whatever the caller scaled the sensor data to; the planimetry
/// constructor expects centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// Scale every component, e.g. meters to centimeters with `factor = 100.0`
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl From<(f64, f64, f64)> for Point3D {
    fn from(tuple: (f64, f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1, z: tuple.2 }
    }
}

impl From<Vector3<f64>> for Point3D {
    fn from(v: Vector3<f64>) -> Self {
        Self { x: v[0], y: v[1], z: v[2] }
    }
}

/// 2D pose (position + orientation)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, yaw }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, yaw: 0.0 }
    }

    pub fn position(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Translate the pose by `(dx, dy)` in the fixed frame, keeping the yaw
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.yaw)
    }
}

impl From<Vector3<f64>> for Pose2D {
    fn from(v: Vector3<f64>) -> Self {
        Self { x: v[0], y: v[1], yaw: v[2] }
    }
}

/// Cell of the planimetry: `row` is the forward depth, `col` the lateral index.
///
/// Signed so that re-based coordinates which land outside the clipped grid
/// (a signal beyond the lateral obstacle span) stay representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridCell {
    pub row: i32,
    pub col: i32,
}

impl GridCell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// Squared Euclidean distance in grid units
    pub fn distance_squared(&self, other: &GridCell) -> i64 {
        let dr = i64::from(self.row - other.row);
        let dc = i64::from(self.col - other.col);
        dr * dr + dc * dc
    }

    pub fn distance(&self, other: &GridCell) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

impl From<(i32, i32)> for GridCell {
    fn from(tuple: (i32, i32)) -> Self {
        Self { row: tuple.0, col: tuple.1 }
    }
}

/// Ordered sequence of grid cells from start to terminal cell
pub type GridPath = Vec<GridCell>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_cell_distance() {
        let a = GridCell::new(0, 0);
        let b = GridCell::new(3, 4);
        assert_eq!(a.distance_squared(&b), 25);
        assert!((a.distance(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_point3d_scaled() {
        let p = Point3D::new(1.5, -0.25, 0.3).scaled(100.0);
        assert!((p.x - 150.0).abs() < 1e-10);
        assert!((p.y + 25.0).abs() < 1e-10);
        assert!((p.z - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_conversions() {
        let p: Point3D = (1.0, 2.0, 3.0).into();
        assert_eq!(p, Point3D::from(Vector3::new(1.0, 2.0, 3.0)));

        let pose = Pose2D::from(Vector3::new(0.5, -0.5, 1.0));
        assert_eq!(pose, Pose2D::new(0.5, -0.5, 1.0));
        assert_eq!(pose.position(), Vector2::new(0.5, -0.5));

        let cell: GridCell = (4, -2).into();
        assert_eq!(cell, GridCell::new(4, -2));
        assert_eq!(cell.offset(1, 2), GridCell::new(5, 0));
    }

    #[test]
    fn test_pose2d_translated() {
        let pose = Pose2D::new(1.0, 2.0, 0.5).translated(0.5, -1.0);
        assert_eq!(pose, Pose2D::new(1.5, 1.0, 0.5));
    }
}
