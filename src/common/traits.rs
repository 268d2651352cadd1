//! Common traits defining the collaborators of the navigation core

use nalgebra::{DMatrix, Isometry2, Matrix3, Point2, Vector2};

use crate::common::error::NavigationResult;
use crate::common::types::Pose2D;

/// One synchronized color + depth capture
#[derive(Debug, Clone)]
pub struct RgbdFrame {
    pub rgb: DMatrix<[u8; 3]>,
    /// Depth in meters, same shape as `rgb`
    pub depth: DMatrix<f32>,
}

/// Motion and sensing interface of the robot base.
///
/// Handles are passed explicitly to whatever needs them; motion calls block
/// until the motion completes or fails.
pub trait RobotInterface {
    /// Current pose in the odometry frame
    fn odometry(&mut self) -> NavigationResult<Pose2D>;

    /// Move by an offset expressed in the robot's current frame
    fn move_to_relative(&mut self, x: f64, y: f64, theta: f64) -> NavigationResult<()>;

    /// Move to a pose of the odometry frame
    fn move_to_absolute(&mut self, x: f64, y: f64, theta: f64) -> NavigationResult<()>;

    /// Zero the odometry reference
    fn reset_global_position(&mut self) -> NavigationResult<()>;

    fn rgbd_frame(&mut self) -> NavigationResult<RgbdFrame>;

    /// 3x3 pinhole camera matrix
    fn intrinsics(&self) -> NavigationResult<Matrix3<f64>>;

    /// Rotate in place
    fn turn(&mut self, angle: f64) -> NavigationResult<()> {
        self.move_to_relative(0.0, 0.0, angle)
    }
}

/// Relative offset between two poses of the same fixed frame
pub trait PoseProjection {
    /// Offset `(dx, dy)` that takes `from` to `to`, expressed in `from`'s frame
    fn project(&self, from: &Pose2D, to: &Pose2D) -> Vector2<f64>;
}

/// Rigid-body projection: `to` expressed in the frame attached to `from`
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameProjection;

impl PoseProjection for FrameProjection {
    fn project(&self, from: &Pose2D, to: &Pose2D) -> Vector2<f64> {
        let frame = Isometry2::new(from.position(), from.yaw);
        frame
            .inverse_transform_point(&Point2::new(to.x, to.y))
            .coords
    }
}
