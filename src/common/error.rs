//! Error types for planimetry_nav

use thiserror::Error;

/// Main error type for the navigation core
///
/// Planner budget exhaustion is not represented here: the planner always
/// returns its best-effort path together with a termination reason.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// No points to build a planimetry from
    #[error("Empty input: {0}")]
    EmptyInput(String),
    /// Planimetry with a non-positive dimension
    #[error("Degenerate grid: {rows} x {cols}")]
    DegenerateGrid { rows: i64, cols: i64 },
    /// Obstacle point mapped outside the planimetry
    #[error("Obstacle cell ({row}, {col}) outside {rows} x {cols} planimetry")]
    ObstacleOutOfBounds {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },
    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Failure reported by the robot interface
    #[error("Robot error: {0}")]
    Robot(String),
    /// Malformed configuration
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type alias for navigation operations
pub type NavigationResult<T> = Result<T, NavigationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NavigationError::DegenerateGrid { rows: 0, cols: 12 };
        assert_eq!(format!("{}", err), "Degenerate grid: 0 x 12");

        let err = NavigationError::EmptyInput("point cloud".to_string());
        assert_eq!(format!("{}", err), "Empty input: point cloud");
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Table>("planner = [").unwrap_err();
        let err: NavigationError = toml_err.into();
        assert!(matches!(err, NavigationError::Config(_)));
    }
}
