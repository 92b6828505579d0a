//! Collected generations as a 2D array of states.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rows of state indices, oldest generation first.
///
/// Rows produced by the driver all share one width. The transforms keep
/// that property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Grid {
    rows: Vec<Vec<u8>>,
}

impl Grid {
    /// Wraps existing rows.
    pub fn new(rows: Vec<Vec<u8>>) -> Self {
        Self { rows }
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    /// A single row.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        self.rows.get(y).map(Vec::as_slice)
    }

    /// Gets a cell, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the first row, or 0 for an empty grid.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row.
    pub fn push(&mut self, row: Vec<u8>) {
        self.rows.push(row);
    }

    /// Consumes the grid and returns its rows.
    pub fn into_rows(self) -> Vec<Vec<u8>> {
        self.rows
    }

    /// Rows become columns.
    ///
    /// Spans the widest row; cells missing from shorter rows read as state 0.
    /// A grid whose rows are all empty has no columns and transposes to an
    /// empty grid.
    pub fn transposed(&self) -> Self {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = (0..width)
            .map(|x| {
                self.rows
                    .iter()
                    .map(|row| row.get(x).copied().unwrap_or(0))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Counts how many cells hold each state, indexed by state.
    pub fn state_counts(&self) -> Vec<usize> {
        let mut counts = Vec::new();
        for &state in self.rows.iter().flatten() {
            let state = state as usize;
            if state >= counts.len() {
                counts.resize(state + 1, 0);
            }
            counts[state] += 1;
        }
        counts
    }
}

impl From<Vec<Vec<u8>>> for Grid {
    fn from(rows: Vec<Vec<u8>>) -> Self {
        Self::new(rows)
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let grid = Grid::new(vec![vec![0, 1, 2], vec![2, 1, 0]]);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.get(2, 1), Some(0));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.row(0), Some(&[0u8, 1, 2][..]));

        let empty = Grid::default();
        assert!(empty.is_empty());
        assert_eq!(empty.width(), 0);
    }

    #[test]
    fn test_transposed() {
        let grid = Grid::new(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let t = grid.transposed();
        assert_eq!(t.rows(), &[vec![1, 4], vec![2, 5], vec![3, 6]]);
        assert_eq!(t.transposed(), grid);
    }

    #[test]
    fn test_transposed_ragged_rows_padded() {
        let grid = Grid::new(vec![vec![1], vec![2, 3, 4]]);
        let t = grid.transposed();
        assert_eq!(t.rows(), &[vec![1, 2], vec![0, 3], vec![0, 4]]);
    }

    #[test]
    fn test_transposed_zero_width() {
        let grid = Grid::new(vec![vec![], vec![]]);
        assert!(grid.transposed().is_empty());
    }

    #[test]
    fn test_state_counts() {
        let grid = Grid::new(vec![vec![0, 2, 2], vec![0, 0, 1]]);
        assert_eq!(grid.state_counts(), vec![3, 1, 2]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_transparent() {
        let grid = Grid::new(vec![vec![0, 1], vec![1, 0]]);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, "[[0,1],[1,0]]");
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
