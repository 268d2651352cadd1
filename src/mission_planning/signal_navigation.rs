//! Signal navigation pipeline
//!
//! point cloud -> planimetry -> grid search -> shrink -> clean -> relative moves

use log::{debug, warn};

use crate::common::{GridCell, GridPath, NavigationResult, Point3D, RobotInterface};
use crate::config::NavigationConfig;
use crate::mapping::{MapConstructor, PlanimetryResult};
use crate::path_planning::{clean_shrink_path, shrink_path, GridPathPlanner, PlannedPath};
use crate::path_tracking::TrajectoryFollower;

/// Outcome of one planning round
#[derive(Debug, Clone)]
pub struct NavigationPlan {
    /// Planimetry the search ran on, signal region already cleared
    pub planimetry: PlanimetryResult,
    pub goal: GridCell,
    /// Unsimplified search result
    pub raw: PlannedPath,
    /// Waypoints handed to the follower
    pub path: GridPath,
    /// Whether the search ended within tolerance of the goal
    pub reached: bool,
}

impl NavigationPlan {
    pub fn robot_coords(&self) -> GridCell {
        self.planimetry.robot_coords()
    }
}

/// One-shot planner from a point-cloud snapshot to robot motion
pub struct SignalNavigator {
    config: NavigationConfig,
    constructor: MapConstructor,
    planner: GridPathPlanner,
    follower: TrajectoryFollower,
}

impl SignalNavigator {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            constructor: MapConstructor::new(config.planimetry.clone()),
            planner: GridPathPlanner::new(config.planner.clone()),
            follower: TrajectoryFollower::new(config.motion.clone()),
            config,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Plan from the robot to a detected signal
    pub fn plan_to_signal(&self, points: &[Point3D], signal: &Point3D) -> NavigationResult<NavigationPlan> {
        let (mut grid, robot_coords, signal_coords) =
            self.constructor.construct_signal_planimetry(points, signal)?;

        self.constructor.circle_around_signal(
            &mut grid,
            signal_coords.row,
            signal_coords.col,
            self.config.planimetry.signal_clear_radius,
        );

        let planimetry = PlanimetryResult::Signal {
            grid,
            robot_coords,
            signal_coords,
        };
        Ok(self.finish_plan(planimetry, robot_coords, signal_coords))
    }

    /// Plan straight ahead to the end of the exploration depth when no signal is known
    pub fn plan_exploration(&self, points: &[Point3D]) -> NavigationResult<NavigationPlan> {
        let planimetry = self.constructor.construct_planimetry(points, None)?;
        let robot_coords = planimetry.robot_coords();
        let goal = GridCell::new(planimetry.grid().rows() as i32 - 1, robot_coords.col);
        Ok(self.finish_plan(planimetry, robot_coords, goal))
    }

    fn finish_plan(&self, planimetry: PlanimetryResult, start: GridCell, goal: GridCell) -> NavigationPlan {
        let raw = self.planner.plan(planimetry.grid(), start, goal);
        let reached = raw.reaches(goal, self.config.planner.goal_tolerance);
        if !reached {
            warn!(
                "search stopped at {:?} ({:?}), {:?} not reached",
                raw.last(),
                raw.termination,
                goal
            );
        }

        let shrunk = shrink_path(&raw.path, self.config.planner.shrink_threshold);
        let path = clean_shrink_path(&shrunk, goal);
        debug!(
            "planned {} cells, {} waypoints after shrinking towards {:?}",
            raw.path.len(),
            path.len(),
            goal
        );

        NavigationPlan {
            planimetry,
            goal,
            raw,
            path,
            reached,
        }
    }

    /// Drive the robot along a plan's waypoints
    pub fn execute<R: RobotInterface>(&self, robot: &mut R, plan: &NavigationPlan) -> NavigationResult<()> {
        self.follower.follow_trajectory(robot, &plan.path, plan.robot_coords())
    }
}

impl Default for SignalNavigator {
    fn default() -> Self {
        Self::new(NavigationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::NavigationError;
    use crate::path_tracking::trajectory_follower::tests::{Command, MockRobot};

    fn floor_cloud() -> Vec<Point3D> {
        let mut points = Vec::new();
        for x in (0..200).step_by(10) {
            for y in -30..=30 {
                points.push(Point3D::new(x as f64, y as f64, 0.0));
            }
        }
        points
    }

    /// Two side walls and a block straight ahead of the robot
    fn corridor_cloud() -> Vec<Point3D> {
        let mut points = floor_cloud();
        for x in 20..40 {
            points.push(Point3D::new(x as f64, 15.0, 30.0));
            points.push(Point3D::new(x as f64, -15.0, 30.0));
        }
        for y in -5..=5 {
            points.push(Point3D::new(60.0, y as f64, 30.0));
        }
        points
    }

    #[test]
    fn test_plan_to_signal_around_block() {
        let navigator = SignalNavigator::default();
        let signal = Point3D::new(120.0, 0.0, 0.0);

        let plan = navigator.plan_to_signal(&corridor_cloud(), &signal).unwrap();

        let grid = plan.planimetry.grid();
        assert_eq!(grid.shape(), (120, 31));
        assert_eq!(plan.robot_coords(), GridCell::new(0, 16));
        assert_eq!(plan.goal, GridCell::new(120, 16));
        assert!(plan.reached);

        for cell in &plan.raw.path {
            assert!(grid.is_free(*cell));
        }
        assert!(!plan.raw.path.iter().any(|c| c.row == 60 && (10..=20).contains(&c.col)));

        assert!(!plan.path.is_empty());
        assert!(plan.path.len() <= plan.raw.path.len());
        for waypoint in &plan.path {
            assert!(plan.raw.path.contains(waypoint));
        }
    }

    #[test]
    fn test_plan_exploration() {
        let navigator = SignalNavigator::default();

        let plan = navigator.plan_exploration(&floor_cloud()).unwrap();

        assert_eq!(plan.planimetry.signal_coords(), None);
        assert_eq!(plan.goal, GridCell::new(149, 30));
        assert!(plan.reached);
        assert_eq!(plan.path.last(), plan.raw.path.last());
    }

    #[test]
    fn test_execute_sends_one_move_per_waypoint() {
        let navigator = SignalNavigator::default();
        let signal = Point3D::new(120.0, 0.0, 0.0);
        let plan = navigator.plan_to_signal(&corridor_cloud(), &signal).unwrap();
        let mut robot = MockRobot::default();

        navigator.execute(&mut robot, &plan).unwrap();

        assert_eq!(robot.commands.len(), plan.path.len());
        assert!(robot
            .commands
            .iter()
            .all(|c| matches!(c, Command::Relative(_, _, theta) if *theta == 0.0)));
    }

    #[test]
    fn test_invalid_input_fails_fast() {
        let navigator = SignalNavigator::default();
        let signal = Point3D::new(120.0, 0.0, 0.0);
        assert!(matches!(
            navigator.plan_to_signal(&[], &signal),
            Err(NavigationError::EmptyInput(_))
        ));
        let behind = Point3D::new(-10.0, 0.0, 0.0);
        assert!(matches!(
            navigator.plan_to_signal(&floor_cloud(), &behind),
            Err(NavigationError::DegenerateGrid { .. })
        ));
    }
}
