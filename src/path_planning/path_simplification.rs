//! Waypoint reduction for planned grid paths

use crate::common::{GridCell, GridPath};

/// Default row deviation between kept waypoints [grid units]
pub const SHRINK_THRESHOLD: i32 = 25;

/// Keep only waypoints that move more than `threshold` rows away from the
/// previously kept one; the final cell is always appended.
///
/// The column condition is `|prev.col| - col != 0`: the absolute value
/// applies to the previous column only, so it is not a lateral deviation
/// test. A cell on the same non-negative column as the last kept one is
/// never kept, and any column change passes. When the final cell already
/// passed both tests it is kept twice.
pub fn shrink_path(path: &[GridCell], threshold: i32) -> GridPath {
    let (first, last) = match (path.first(), path.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let mut point = first;
    let mut shrunk = Vec::new();

    for &cell in &path[1..] {
        if (point.row - cell.row).abs() > threshold && point.col.abs() - cell.col != 0 {
            shrunk.push(cell);
            point = cell;
        }
    }

    shrunk.push(last);
    shrunk
}

/// Drop the final waypoint when the one before it is strictly closer to the signal
pub fn clean_shrink_path(path: &[GridCell], signal_coords: GridCell) -> GridPath {
    let n = path.len();
    if n >= 2 {
        let last = path[n - 1].distance_squared(&signal_coords);
        let penultimate = path[n - 2].distance_squared(&signal_coords);
        if penultimate < last {
            return path[..n - 1].to_vec();
        }
    }
    path.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn column(rows: std::ops::RangeInclusive<i32>, col: i32) -> GridPath {
        rows.map(|r| GridCell::new(r, col)).collect()
    }

    #[test]
    fn test_shrink_straight_column_keeps_last_only() {
        let path = column(0..=140, 30);
        assert_eq!(shrink_path(&path, SHRINK_THRESHOLD), vec![GridCell::new(140, 30)]);
    }

    #[test]
    fn test_shrink_staircase() {
        let path: GridPath = (0..=60).map(|i| GridCell::new(i, i)).collect();
        assert_eq!(
            shrink_path(&path, SHRINK_THRESHOLD),
            vec![GridCell::new(26, 26), GridCell::new(52, 52), GridCell::new(60, 60)]
        );
    }

    #[test]
    fn test_shrink_keeps_duplicate_last() {
        let path = vec![GridCell::new(0, 0), GridCell::new(26, 1)];
        assert_eq!(
            shrink_path(&path, SHRINK_THRESHOLD),
            vec![GridCell::new(26, 1), GridCell::new(26, 1)]
        );
    }

    #[test]
    fn test_shrink_column_condition() {
        // |prev.col| - col == 0 rejects the cell even past the row threshold
        let path = vec![GridCell::new(0, 4), GridCell::new(30, 4), GridCell::new(31, 4)];
        assert_eq!(shrink_path(&path, SHRINK_THRESHOLD), vec![GridCell::new(31, 4)]);

        // negative previous column: the absolute value makes -4 and 4 differ
        let path = vec![GridCell::new(0, -4), GridCell::new(30, -4), GridCell::new(31, -4)];
        assert_eq!(
            shrink_path(&path, SHRINK_THRESHOLD),
            vec![GridCell::new(30, -4), GridCell::new(31, -4)]
        );
    }

    #[test]
    fn test_shrink_edge_cases() {
        assert!(shrink_path(&[], SHRINK_THRESHOLD).is_empty());
        let single = vec![GridCell::new(3, 3)];
        assert_eq!(shrink_path(&single, SHRINK_THRESHOLD), single);
    }

    #[test]
    fn test_shrink_invariants() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let len = rng.gen_range(1..200);
            let mut cell = GridCell::new(0, rng.gen_range(0..60));
            let mut path = vec![cell];
            for _ in 1..len {
                cell = match rng.gen_range(0..3) {
                    0 => cell.offset(1, 0),
                    1 => cell.offset(0, 1),
                    _ => cell.offset(0, -1),
                };
                path.push(cell);
            }
            let threshold = rng.gen_range(1..40);

            let shrunk = shrink_path(&path, threshold);
            assert_eq!(shrunk.last(), path.last());
            assert!(shrunk.len() <= path.len());
        }
    }

    #[test]
    fn test_clean_drops_overshoot() {
        let signal = GridCell::new(100, 30);
        let path = vec![GridCell::new(0, 30), GridCell::new(98, 30), GridCell::new(110, 30)];
        assert_eq!(clean_shrink_path(&path, signal), path[..2].to_vec());
    }

    #[test]
    fn test_clean_keeps_closer_last() {
        let signal = GridCell::new(100, 30);
        let path = vec![GridCell::new(0, 30), GridCell::new(60, 30), GridCell::new(95, 30)];
        assert_eq!(clean_shrink_path(&path, signal), path);

        // equal distances keep the last point
        let path = vec![GridCell::new(95, 30), GridCell::new(105, 30)];
        assert_eq!(clean_shrink_path(&path, signal), path);
    }

    #[test]
    fn test_clean_short_paths() {
        let signal = GridCell::new(10, 10);
        assert!(clean_shrink_path(&[], signal).is_empty());
        let single = vec![GridCell::new(0, 0)];
        assert_eq!(clean_shrink_path(&single, signal), single);
    }
}
