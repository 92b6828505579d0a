//! Geometric reshaping of a collected grid.
//!
//! Transforms are queued in a [`TransformPipeline`] and applied strictly left
//! to right. A repeated tag runs again; nothing is merged or cancelled.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ConfigError;
use crate::grid::Grid;

/// One grid-reshaping step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Transform {
    /// Rotate 90° clockwise.
    Rotate,
    /// Reverse the row order.
    Reverse,
    /// Append the rows in reverse, without repeating the last row.
    VerticalMirror,
    /// Append each row reversed, without repeating its last cell.
    HorizontalMirror,
}

impl Transform {
    /// Every transform, in declaration order.
    pub const ALL: [Transform; 4] = [
        Transform::Rotate,
        Transform::Reverse,
        Transform::VerticalMirror,
        Transform::HorizontalMirror,
    ];

    /// The tag used in text and configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Transform::Rotate => "rotate",
            Transform::Reverse => "reverse",
            Transform::VerticalMirror => "vertical-mirror",
            Transform::HorizontalMirror => "horizontal-mirror",
        }
    }

    /// Applies this transform.
    pub fn apply(&self, grid: Grid) -> Grid {
        match self {
            Transform::Rotate => rotate(grid),
            Transform::Reverse => reverse(grid),
            Transform::VerticalMirror => vertical_mirror(grid),
            Transform::HorizontalMirror => horizontal_mirror(grid),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase().replace('_', "-");
        Transform::ALL
            .into_iter()
            .find(|t| t.name() == tag)
            .ok_or_else(|| ConfigError::UnknownTransform(s.to_string()))
    }
}

/// Transpose, then reverse each row. Ragged rows are padded to the widest
/// with state 0 first.
fn rotate(grid: Grid) -> Grid {
    let rows = grid
        .transposed()
        .into_rows()
        .into_iter()
        .map(|mut row| {
            row.reverse();
            row
        })
        .collect();
    Grid::new(rows)
}

fn reverse(grid: Grid) -> Grid {
    let mut rows = grid.into_rows();
    rows.reverse();
    Grid::new(rows)
}

/// `R ++ reverse(R)[1..]`
fn vertical_mirror(grid: Grid) -> Grid {
    let mut rows = grid.into_rows();
    let tail: Vec<Vec<u8>> = rows.iter().rev().skip(1).cloned().collect();
    rows.extend(tail);
    Grid::new(rows)
}

/// `r[..len - 1] ++ reverse(r)` for every row.
fn horizontal_mirror(grid: Grid) -> Grid {
    let rows = grid
        .into_rows()
        .into_iter()
        .map(|row| {
            let keep = row.len().saturating_sub(1);
            let mut mirrored = Vec::with_capacity(keep + row.len());
            mirrored.extend_from_slice(&row[..keep]);
            mirrored.extend(row.iter().rev());
            mirrored
        })
        .collect();
    Grid::new(rows)
}

/// An ordered queue of transforms.
///
/// ```
/// use rhizome_resin_automata::{Grid, Transform, TransformPipeline};
///
/// let mut pipeline = TransformPipeline::new();
/// pipeline.push(Transform::Reverse);
/// pipeline.push(Transform::VerticalMirror);
///
/// let grid = Grid::new(vec![vec![0], vec![1], vec![2]]);
/// let out = pipeline.apply(grid);
/// assert_eq!(out.into_rows(), vec![vec![2], vec![1], vec![0], vec![1], vec![2]]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TransformPipeline {
    /// Transforms in execution order.
    pub ops: Vec<Transform>,
}

impl TransformPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Adds a transform to the end.
    pub fn push(&mut self, op: Transform) {
        self.ops.push(op);
    }

    /// Returns true if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the number of transforms.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Runs every transform in order.
    pub fn apply(&self, grid: Grid) -> Grid {
        self.ops.iter().fold(grid, |grid, op| {
            let out = op.apply(grid);
            trace!(transform = %op, rows = out.height(), cols = out.width(), "applied transform");
            out
        })
    }
}

impl FromIterator<Transform> for TransformPipeline {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Transform>> for TransformPipeline {
    fn from(ops: Vec<Transform>) -> Self {
        Self { ops }
    }
}

/// Parses a comma-separated list such as `"rotate, vertical-mirror"`.
impl FromStr for TransformPipeline {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(Transform::from_str)
            .collect()
    }
}
