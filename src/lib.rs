//! planimetry_nav - navigation core of a signal-seeking mobile robot
//!
//! A 3D point-cloud snapshot is projected onto a 2D occupancy grid (the
//! planimetry), the grid is clipped to the corridor between robot and
//! signal, an anytime grid search finds a route across it, and the route is
//! reduced to a few waypoints that the robot base follows with relative
//! moves.

// Core modules
pub mod common;
pub mod config;
pub mod utils;

// Algorithm modules
pub mod mapping;
pub mod path_planning;
pub mod path_tracking;
pub mod mission_planning;

// Re-export common types for convenience
pub use common::{GridCell, GridPath, Point3D, Pose2D};
pub use common::{FrameProjection, PoseProjection, RgbdFrame, RobotInterface};
pub use common::{NavigationError, NavigationResult};
pub use config::NavigationConfig;
