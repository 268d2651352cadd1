//! Trajectory following on the robot base
//!
//! Turns a planned planimetry path into a sequence of blocking relative
//! moves. Grid units are converted to meters with
//! [`MotionConfig::units_per_meter`]; each waypoint becomes one increment of
//! a running odometry pose, and that increment is projected into the frame
//! of the previous pose before it is sent to the base.

use log::{debug, trace};
use nalgebra::Vector2;

use crate::common::{FrameProjection, GridCell, NavigationResult, Pose2D, PoseProjection, RobotInterface};
use crate::config::MotionConfig;

/// Drives a [`RobotInterface`] along planimetry paths
#[derive(Debug, Clone, Default)]
pub struct TrajectoryFollower<P: PoseProjection = FrameProjection> {
    projection: P,
    config: MotionConfig,
}

impl TrajectoryFollower<FrameProjection> {
    pub fn new(config: MotionConfig) -> Self {
        Self::with_projection(FrameProjection, config)
    }
}

impl<P: PoseProjection> TrajectoryFollower<P> {
    pub fn with_projection(projection: P, config: MotionConfig) -> Self {
        Self { projection, config }
    }

    /// Relative commands `(x, y)` [m] for `trajectory`, starting at `start_pose`.
    ///
    /// The lateral increment of the first waypoint is measured as
    /// `col - robot_col`, later ones as `previous_col - col`. The `(0, 0)`
    /// cell doubles as the "no previous waypoint" marker.
    pub fn relative_commands(
        &self,
        start_pose: Pose2D,
        trajectory: &[GridCell],
        robot_coords: GridCell,
    ) -> Vec<Vector2<f64>> {
        let scale = self.config.units_per_meter;
        let y_robot = f64::from(robot_coords.col);

        let mut pose = start_pose;
        let mut previous = GridCell::new(0, 0);
        let mut commands = Vec::with_capacity(trajectory.len());

        for cell in trajectory {
            let mut y_new = if previous == GridCell::new(0, 0) {
                f64::from(cell.col) / scale
            } else {
                (y_robot - f64::from(cell.col)) / scale
            };
            let x_new = f64::from(cell.row) / scale - f64::from(previous.row) / scale;
            y_new -= (y_robot - f64::from(previous.col)) / scale;

            let current = pose.translated(x_new, y_new);
            let mut offset = self.projection.project(&pose, &current);

            pose = current;
            previous = *cell;

            if offset.y.abs() < self.config.lateral_deadband {
                offset.y = 0.0;
            }
            commands.push(offset);
        }

        commands
    }

    /// Follow a path of the planimetry whose robot cell is `robot_coords`
    pub fn follow_trajectory<R: RobotInterface>(
        &self,
        robot: &mut R,
        trajectory: &[GridCell],
        robot_coords: GridCell,
    ) -> NavigationResult<()> {
        let start_pose = robot.odometry()?;
        debug!(
            "following {} waypoints from pose ({:.3}, {:.3}, {:.3})",
            trajectory.len(),
            start_pose.x,
            start_pose.y,
            start_pose.yaw
        );

        let commands = self.relative_commands(start_pose, trajectory, robot_coords);
        for (cell, command) in trajectory.iter().zip(&commands) {
            trace!("waypoint {:?} -> relative move ({:.3}, {:.3})", cell, command.x, command.y);
            robot.move_to_relative(command.x, command.y, 0.0)?;
        }
        Ok(())
    }

    /// Follow a path expressed in an earlier planimetry after zeroing odometry.
    ///
    /// Columns are re-based on `old_robot_coords`; every waypoint is reached
    /// with an absolute move along x whose heading points at the waypoint.
    pub fn follow_trajectory_with_update<R: RobotInterface>(
        &self,
        robot: &mut R,
        trajectory: &[GridCell],
        old_robot_coords: GridCell,
    ) -> NavigationResult<()> {
        robot.reset_global_position()?;

        let scale = self.config.units_per_meter;
        for cell in trajectory {
            let x = f64::from(cell.row) / scale;
            let y = f64::from(cell.col - old_robot_coords.col) / scale;
            let theta = y.atan2(x);
            trace!("waypoint {:?} -> absolute move ({:.3}, 0, {:.3})", cell, x, theta);
            robot.move_to_absolute(x, 0.0, theta)?;
        }
        Ok(())
    }
}
