//! Planimetry construction
//!
//! Projects a 3D point cloud (robot frame, centimeters) onto a 2D occupancy
//! grid whose rows are the forward depth and whose columns are lateral
//! offsets re-based around the middle of the lateral span. When a signal is
//! known the grid stops at the signal depth and is clipped laterally to the
//! span that actually contains obstacles, re-basing robot and signal cells
//! so that their lateral offset is preserved.

use log::{debug, warn};

use crate::common::{GridCell, NavigationError, NavigationResult, Point3D};
use crate::config::PlanimetryConfig;
use crate::utils::{OccupancyGrid, OCCUPIED};

/// Planimetry together with the robot cell, and the signal cell when one is known
#[derive(Debug, Clone, PartialEq)]
pub enum PlanimetryResult {
    /// No signal: full-width grid of the exploration depth
    Exploration {
        grid: OccupancyGrid,
        robot_coords: GridCell,
    },
    /// Signal branch: grid clipped to the obstacle span
    Signal {
        grid: OccupancyGrid,
        robot_coords: GridCell,
        signal_coords: GridCell,
    },
}

impl PlanimetryResult {
    pub fn grid(&self) -> &OccupancyGrid {
        match self {
            PlanimetryResult::Exploration { grid, .. } => grid,
            PlanimetryResult::Signal { grid, .. } => grid,
        }
    }

    pub fn robot_coords(&self) -> GridCell {
        match self {
            PlanimetryResult::Exploration { robot_coords, .. } => *robot_coords,
            PlanimetryResult::Signal { robot_coords, .. } => *robot_coords,
        }
    }

    pub fn signal_coords(&self) -> Option<GridCell> {
        match self {
            PlanimetryResult::Exploration { .. } => None,
            PlanimetryResult::Signal { signal_coords, .. } => Some(*signal_coords),
        }
    }
}

/// Builds and clips planimetries
#[derive(Debug, Clone, Default)]
pub struct MapConstructor {
    config: PlanimetryConfig,
}

impl MapConstructor {
    pub fn new(config: PlanimetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlanimetryConfig {
        &self.config
    }

    /// Free every cell within `radius` of `(xc, yc)` so the signal region is traversable
    pub fn circle_around_signal(&self, grid: &mut OccupancyGrid, xc: i32, yc: i32, radius: f64) {
        grid.clear_disc(GridCell::new(xc, yc), radius);
    }

    /// Points whose height lies strictly between floor and robot height
    /// and whose forward coordinate is below `max_depth`
    pub fn obstacle_points<'a>(
        &self,
        points: &'a [Point3D],
        max_depth: i64,
    ) -> impl Iterator<Item = &'a Point3D> + 'a {
        let floor = self.config.floor_height_limit * self.config.point_scale;
        let ceiling = self.config.robot_height * self.config.point_scale;
        points.iter().filter(move |p| {
            p.z > floor && p.z < ceiling && (p.x.round() as i64) < max_depth
        })
    }

    /// Build the planimetry of `points`.
    ///
    /// With a signal, the grid depth is the signal depth and the result is
    /// clipped; otherwise the grid spans the configured exploration depth.
    pub fn construct_planimetry(
        &self,
        points: &[Point3D],
        signal: Option<&Point3D>,
    ) -> NavigationResult<PlanimetryResult> {
        match signal {
            Some(s) => {
                let (grid, robot_coords, signal_coords) = self.construct_signal_planimetry(points, s)?;
                Ok(PlanimetryResult::Signal {
                    grid,
                    robot_coords,
                    signal_coords,
                })
            }
            None => {
                let (grid, middle_position) =
                    self.rasterize(points, self.config.max_depth_exploration)?;
                Ok(PlanimetryResult::Exploration {
                    grid,
                    robot_coords: GridCell::new(0, middle_position as i32),
                })
            }
        }
    }

    /// Signal branch of [`construct_planimetry`](Self::construct_planimetry):
    /// clipped grid, robot cell and signal cell
    pub fn construct_signal_planimetry(
        &self,
        points: &[Point3D],
        signal: &Point3D,
    ) -> NavigationResult<(OccupancyGrid, GridCell, GridCell)> {
        let max_depth = signal.x.round() as i64;
        let (grid, middle_position) = self.rasterize(points, max_depth)?;

        let robot_coords = GridCell::new(0, middle_position as i32);
        let signal_coords =
            GridCell::new(max_depth as i32, (middle_position - signal.y.round() as i64) as i32);
        Ok(clip_planimetry(&grid, robot_coords, signal_coords))
    }

    /// Occupancy grid of `max_depth` rows and the middle column of the lateral span
    fn rasterize(&self, points: &[Point3D], max_depth: i64) -> NavigationResult<(OccupancyGrid, i64)> {
        if points.is_empty() {
            return Err(NavigationError::EmptyInput(
                "point cloud has no points".to_string(),
            ));
        }

        let y_left = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let y_right = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let y_range = (y_left - y_right).abs().round() as i64;
        let middle_position = (y_range as f64 / 2.0).round_ties_even() as i64;

        let mut grid = OccupancyGrid::new(max_depth, y_range)?;
        let (rows, cols) = grid.shape();

        let mut obstacles = 0usize;
        let mut dropped = 0usize;
        for p in self.obstacle_points(points, max_depth) {
            let row = p.x.round() as i64;
            // -1: physical lateral offsets are one-based
            let col = middle_position - p.y.round() as i64 - 1;
            let cell = GridCell::new(row as i32, col as i32);
            if grid.set(cell, OCCUPIED) {
                obstacles += 1;
            } else if self.config.strict_bounds {
                return Err(NavigationError::ObstacleOutOfBounds { row, col, rows, cols });
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            warn!("dropped {} obstacle points outside the {}x{} planimetry", dropped, rows, cols);
        }
        debug!(
            "planimetry {}x{} from {} points, {} obstacle cells, middle column {}",
            rows,
            cols,
            points.len(),
            obstacles,
            middle_position
        );

        Ok((grid, middle_position))
    }
}

/// Crop the planimetry to the lateral span holding obstacles and re-base
/// robot and signal columns.
///
/// `robot.col - signal.col` is the same before and after clipping; the
/// signal row is untouched and the robot always lands on row 0.
pub fn clip_planimetry(
    grid: &OccupancyGrid,
    robot_coords: GridCell,
    signal_coords: GridCell,
) -> (OccupancyGrid, GridCell, GridCell) {
    let old_y_difference = robot_coords.col - signal_coords.col;
    let width = grid.cols() as i32;

    let mut boundary_left = grid.first_occupied_column().map_or(0, |c| c as i32);
    let mut boundary_right = grid.last_occupied_column().map_or(width, |c| c as i32 + 1);

    let robot_col = robot_coords.col;
    let new_robot = if robot_col < boundary_left {
        // robot left of every obstacle
        boundary_left = robot_col;
        GridCell::new(0, 0)
    } else if robot_col > boundary_right {
        boundary_right = robot_col;
        // -1 keeps the robot's own limit column
        GridCell::new(0, robot_col - boundary_left - 1)
    } else {
        let planimetry_dim = boundary_right - boundary_left;
        let robot_distance_from_right = robot_col - boundary_right;
        GridCell::new(0, planimetry_dim + robot_distance_from_right)
    };

    let cropped = grid.crop_columns(boundary_left.max(0) as usize, boundary_right.max(0) as usize);
    let new_signal = GridCell::new(signal_coords.row, new_robot.col - old_y_difference);

    debug!(
        "clipped planimetry to columns [{}, {}): robot {:?} -> {:?}, signal {:?} -> {:?}",
        boundary_left, boundary_right, robot_coords, new_robot, signal_coords, new_signal
    );

    (cropped, new_robot, new_signal)
}
