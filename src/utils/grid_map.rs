// Occupancy grid used as planimetry
// rows are forward depth, columns are lateral offsets

use std::ops::Deref;

use itertools::iproduct;
use nalgebra::DMatrix;

use crate::common::{GridCell, NavigationError, NavigationResult};

/// Free or unknown cell
pub const FREE: u8 = 0;
/// Obstacle cell
pub const OCCUPIED: u8 = 255;

#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    grid: DMatrix<u8>,
}

impl OccupancyGrid {
    /// All-free grid of `rows` x `cols`
    pub fn new(rows: i64, cols: i64) -> NavigationResult<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(NavigationError::DegenerateGrid { rows, cols });
        }
        Ok(Self {
            grid: DMatrix::zeros(rows as usize, cols as usize),
        })
    }

    pub fn rows(&self) -> usize {
        self.grid.nrows()
    }

    pub fn cols(&self) -> usize {
        self.grid.ncols()
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows()
            && (cell.col as usize) < self.cols()
    }

    /// In bounds and not an obstacle
    pub fn is_free(&self, cell: GridCell) -> bool {
        self.contains(cell) && self.grid[(cell.row as usize, cell.col as usize)] == FREE
    }

    pub fn get(&self, cell: GridCell) -> Option<u8> {
        if self.contains(cell) {
            Some(self.grid[(cell.row as usize, cell.col as usize)])
        } else {
            None
        }
    }

    /// Set a cell; returns false when the cell is out of bounds
    pub fn set(&mut self, cell: GridCell, value: u8) -> bool {
        if !self.contains(cell) {
            return false;
        }
        self.grid[(cell.row as usize, cell.col as usize)] = value;
        true
    }

    fn column_occupied(&self, col: usize) -> bool {
        self.grid.column(col).iter().any(|&v| v != FREE)
    }

    /// Index of the left-most column holding an obstacle
    pub fn first_occupied_column(&self) -> Option<usize> {
        (0..self.cols()).find(|&c| self.column_occupied(c))
    }

    /// Index of the right-most column holding an obstacle
    pub fn last_occupied_column(&self) -> Option<usize> {
        (0..self.cols()).rev().find(|&c| self.column_occupied(c))
    }

    /// Copy of the columns in `[start, end)`, clamped to the grid
    pub fn crop_columns(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.cols());
        let start = start.min(end);
        Self {
            grid: self.grid.columns(start, end - start).into_owned(),
        }
    }

    /// Free every cell within Euclidean `radius` of `center`
    pub fn clear_disc(&mut self, center: GridCell, radius: f64) {
        let radius_sq = radius * radius;
        for (r, c) in iproduct!(0..self.rows(), 0..self.cols()) {
            let dr = r as f64 - f64::from(center.row);
            let dc = c as f64 - f64::from(center.col);
            if dr * dr + dc * dc <= radius_sq {
                self.grid[(r, c)] = FREE;
            }
        }
    }

    /// All obstacle cells in row-major order
    pub fn occupied_cells(&self) -> Vec<GridCell> {
        iproduct!(0..self.rows(), 0..self.cols())
            .filter(|&(r, c)| self.grid[(r, c)] != FREE)
            .map(|(r, c)| GridCell::new(r as i32, c as i32))
            .collect()
    }

    pub fn is_clear(&self) -> bool {
        self.grid.iter().all(|&v| v == FREE)
    }
}

impl Deref for OccupancyGrid {
    type Target = DMatrix<u8>;

    fn deref(&self) -> &Self::Target {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_degenerate() {
        assert!(OccupancyGrid::new(0, 10).is_err());
        assert!(OccupancyGrid::new(10, -1).is_err());
        let grid = OccupancyGrid::new(4, 6).unwrap();
        assert_eq!(grid.shape(), (4, 6));
        assert!(grid.is_clear());
    }

    #[test]
    fn test_occupied_columns() {
        let mut grid = OccupancyGrid::new(5, 10).unwrap();
        assert_eq!(grid.first_occupied_column(), None);
        grid.set(GridCell::new(1, 3), OCCUPIED);
        grid.set(GridCell::new(4, 7), OCCUPIED);
        assert_eq!(grid.first_occupied_column(), Some(3));
        assert_eq!(grid.last_occupied_column(), Some(7));
        assert!(!grid.set(GridCell::new(5, 0), OCCUPIED));
    }

    #[test]
    fn test_crop_columns() {
        let mut grid = OccupancyGrid::new(3, 10).unwrap();
        grid.set(GridCell::new(2, 4), OCCUPIED);
        let cropped = grid.crop_columns(4, 8);
        assert_eq!(cropped.shape(), (3, 4));
        assert_eq!(cropped.get(GridCell::new(2, 0)), Some(OCCUPIED));
        assert_eq!(grid.crop_columns(8, 20).cols(), 2);
    }

    #[test]
    fn test_is_free_bounds() {
        let mut grid = OccupancyGrid::new(3, 3).unwrap();
        grid.set(GridCell::new(1, 1), OCCUPIED);
        assert!(grid.is_free(GridCell::new(0, 0)));
        assert!(!grid.is_free(GridCell::new(1, 1)));
        assert!(!grid.is_free(GridCell::new(-1, 0)));
        assert!(!grid.is_free(GridCell::new(0, 3)));
    }
}
