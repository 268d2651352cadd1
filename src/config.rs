//! Navigation configuration.
//!
//! Every section deserializes from TOML with per-field defaults, so a file
//! only needs to name the values it overrides:
//!
//! ```toml
//! [planner]
//! time_budget_secs = 1.0
//! allow_diagonal = true
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::common::{NavigationError, NavigationResult};

/// Top-level configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default)]
    pub planimetry: PlanimetryConfig,

    #[serde(default)]
    pub planner: PlannerConfig,

    #[serde(default)]
    pub motion: MotionConfig,
}

impl NavigationConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> NavigationResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but would break planning or motion
    pub fn validate(&self) -> NavigationResult<()> {
        self.planimetry.validate()?;
        self.planner.validate()?;
        self.motion.validate()
    }
}

fn invalid(name: &str, value: f64, expected: &str) -> NavigationError {
    NavigationError::InvalidParameter(format!("{} = {}, expected {}", name, value, expected))
}

fn ensure_positive(name: &str, value: f64) -> NavigationResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "a finite value > 0"))
    }
}

fn ensure_non_negative(name: &str, value: f64) -> NavigationResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "a finite value >= 0"))
    }
}

/// Planimetry construction settings
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanimetryConfig {
    /// Points at or below this height [m] are floor
    pub floor_height_limit: f64,

    /// Points at or above this height [m] pass over the robot
    pub robot_height: f64,

    /// Forward extent of the grid when no signal is known [grid units]
    pub max_depth_exploration: i64,

    /// Factor from meters to grid units
    pub point_scale: f64,

    /// Fail on obstacle cells outside the grid instead of dropping them
    pub strict_bounds: bool,

    /// Radius cleared around the signal before planning [grid units]
    pub signal_clear_radius: f64,
}

impl PlanimetryConfig {
    pub fn validate(&self) -> NavigationResult<()> {
        ensure_positive("planimetry.point_scale", self.point_scale)?;
        ensure_non_negative("planimetry.signal_clear_radius", self.signal_clear_radius)?;
        if !self.floor_height_limit.is_finite() {
            return Err(invalid("planimetry.floor_height_limit", self.floor_height_limit, "a finite value"));
        }
        if !self.robot_height.is_finite() || self.robot_height <= self.floor_height_limit {
            return Err(invalid(
                "planimetry.robot_height",
                self.robot_height,
                &format!("a finite value above floor_height_limit ({})", self.floor_height_limit),
            ));
        }
        Ok(())
    }
}

impl Default for PlanimetryConfig {
    fn default() -> Self {
        Self {
            floor_height_limit: 0.05,
            robot_height: 0.60,
            max_depth_exploration: 150,
            point_scale: 100.0,
            strict_bounds: true,
            signal_clear_radius: 10.0,
        }
    }
}

/// Grid planner settings
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Wall-clock budget of one `compute` call [s]
    pub time_budget_secs: f64,

    /// Distance to the goal that counts as arrival [grid units]
    pub goal_tolerance: f64,

    /// Forward row beyond which the search stops [grid units]
    pub max_forward_depth: i32,

    /// Enable 8-directional movement
    pub allow_diagonal: bool,

    /// Minimum row deviation kept by path shrinking [grid units]
    pub shrink_threshold: i32,
}

impl PlannerConfig {
    pub fn validate(&self) -> NavigationResult<()> {
        ensure_non_negative("planner.time_budget_secs", self.time_budget_secs)?;
        ensure_non_negative("planner.goal_tolerance", self.goal_tolerance)
    }

    /// Budget as a `Duration`; negative or NaN seconds count as zero and
    /// values too large to represent as unbounded
    pub fn time_budget(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_budget_secs.max(0.0)).unwrap_or(Duration::MAX)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: 0.5,
            goal_tolerance: 7.0,
            max_forward_depth: 150,
            allow_diagonal: false,
            shrink_threshold: 25,
        }
    }
}

/// Trajectory following settings
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Grid units per meter of robot motion
    pub units_per_meter: f64,

    /// Lateral commands smaller than this [m] are sent as zero
    pub lateral_deadband: f64,
}

impl MotionConfig {
    pub fn validate(&self) -> NavigationResult<()> {
        ensure_positive("motion.units_per_meter", self.units_per_meter)?;
        ensure_non_negative("motion.lateral_deadband", self.lateral_deadband)
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            units_per_meter: 100.0,
            lateral_deadband: 0.1,
        }
    }
}
