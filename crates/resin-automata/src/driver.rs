//! Runs an automaton and collects a window of its generations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cells::Cells;
use crate::grid::Grid;

/// Iteration ceiling as a multiple of the requested line count.
pub const CEILING_FACTOR: usize = 10;

/// Which generations to keep and when to stop.
///
/// Iterations are numbered from 1. Every iteration captures the current
/// generation once `start_line` is reached, then steps the automaton. A run
/// never exceeds `line_count * CEILING_FACTOR` iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OutputWindow {
    /// First iteration whose generation is captured (1-indexed).
    pub start_line: usize,
    /// Requested number of lines.
    pub line_count: usize,
    /// Stop at the first step that leaves the cells unchanged instead of
    /// after `line_count` iterations.
    pub until_fixed_point: bool,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Iteration count passed `line_count`.
    LineCount,
    /// A step reproduced its input.
    FixedPoint,
    /// Hit `line_count * CEILING_FACTOR` iterations.
    Ceiling,
}

/// Captured grid plus how the run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOutput {
    /// Captured generations, oldest first.
    pub grid: Grid,
    /// Why the loop stopped.
    pub stop: StopReason,
    /// Iterations executed, including ones before `start_line`.
    pub iterations: usize,
}

impl OutputWindow {
    /// Captures from the first generation and stops on the line count.
    pub fn new(line_count: usize) -> Self {
        Self {
            start_line: 1,
            line_count,
            until_fixed_point: false,
        }
    }

    /// Skips generations before `start_line`.
    pub fn starting_at(mut self, start_line: usize) -> Self {
        self.start_line = start_line;
        self
    }

    /// Stops at a fixed point rather than the line count.
    pub fn with_fixed_point_stop(mut self, enabled: bool) -> Self {
        self.until_fixed_point = enabled;
        self
    }

    /// Hard limit on iterations.
    pub fn ceiling(&self) -> usize {
        self.line_count.saturating_mul(CEILING_FACTOR)
    }

    /// Runs `cells` and returns the captured generations.
    pub fn run(&self, cells: &mut Cells) -> Grid {
        self.run_detailed(cells).grid
    }

    /// Like [`run`](Self::run), also reporting why and when the loop ended.
    pub fn run_detailed(&self, cells: &mut Cells) -> DriverOutput {
        let ceiling = self.ceiling();
        let mut grid = Grid::default();
        let mut stop = StopReason::Ceiling;
        let mut iterations = 0;

        for i in 1..=ceiling {
            iterations = i;
            if i >= self.start_line {
                grid.push(cells.cells().to_vec());
            }
            cells.compute_next();

            if self.until_fixed_point {
                if cells.duplicate_state() {
                    stop = StopReason::FixedPoint;
                    break;
                }
            } else if i > self.line_count {
                stop = StopReason::LineCount;
                break;
            }
        }

        debug!(
            rows = grid.height(),
            iterations,
            ?stop,
            "automaton run finished"
        );

        DriverOutput {
            grid,
            stop,
            iterations,
        }
    }
}

impl Default for OutputWindow {
    fn default() -> Self {
        Self::new(40)
    }
}
