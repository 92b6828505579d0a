//! The current generation of a one-dimensional, multi-state automaton.

use crate::cycle::Cycle;
use crate::error::{AutomataError, ConfigError, Result};
use crate::rule::{RuleNumber, RuleSpec, RuleTable, neighbourhood_code};

/// One generation of cells plus the rules that advance it.
///
/// Cells hold state indices in `[0, radix)`. Each call to
/// [`compute_next`](Self::compute_next) takes the next rule from the cycle,
/// so with rules `[a, b]` the generations alternate between `a` and `b`.
///
/// ```
/// use rhizome_resin_automata::{Cells, RuleSpec};
///
/// let spec = RuleSpec::new(2, [90u64]).unwrap();
/// let mut cells = Cells::new(7, &spec).unwrap();
/// cells.set_single_cell_centred();
/// cells.compute_next();
/// assert_eq!(cells.cells(), &[0, 0, 1, 0, 1, 0, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct Cells {
    /// Current generation.
    cells: Vec<u8>,
    /// Number of states.
    radix: u32,
    /// Rule tables, one taken per generation.
    rules: Cycle<RuleTable>,
    /// Treat the two ends as neighbours.
    wrap: bool,
    /// Set when the last step left the cells unchanged.
    duplicate_state: bool,
    /// Steps taken so far.
    generation: u64,
}

impl Cells {
    /// Creates `cell_count` cells, all in state 0, with wrapping on.
    pub fn new(cell_count: usize, spec: &RuleSpec) -> Result<Self> {
        if cell_count == 0 {
            return Err(ConfigError::NoCells.into());
        }
        Ok(Self {
            cells: vec![0; cell_count],
            radix: spec.radix(),
            rules: spec.cycle()?,
            wrap: true,
            duplicate_state: false,
            generation: 0,
        })
    }

    /// Sets whether the ends wrap around.
    pub fn set_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Whether the ends wrap around.
    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Number of states.
    pub fn radix(&self) -> u32 {
        self.radix
    }

    /// Number of cells. Never changes after construction.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of times [`compute_next`](Self::compute_next) has run.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True iff the most recent step produced the generation it started from.
    pub fn duplicate_state(&self) -> bool {
        self.duplicate_state
    }

    /// The rule table most recently applied, or the first one before any step.
    pub fn current_rule(&self) -> &RuleTable {
        self.rules.current()
    }

    /// Normalized rule numbers in the order they are applied.
    pub fn rule_numbers(&self) -> Vec<RuleNumber> {
        self.rules
            .as_slice()
            .iter()
            .map(|t| t.rule_number().clone())
            .collect()
    }

    /// Gets the state of a cell, or 0 past the end.
    pub fn get(&self, x: usize) -> u8 {
        self.cells.get(x).copied().unwrap_or(0)
    }

    /// Sets the state of a cell. Out-of-range indices are ignored.
    pub fn set(&mut self, x: usize, state: u8) {
        if x < self.cells.len() {
            self.cells[x] = state;
        }
    }

    /// Sets every cell to state 0.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Replaces the whole generation.
    ///
    /// States are not range-checked here; the seed builder does that.
    pub fn set_cells(&mut self, values: Vec<u8>) -> Result<()> {
        if values.len() != self.cells.len() {
            return Err(AutomataError::LengthMismatch {
                expected: self.cells.len(),
                got: values.len(),
            });
        }
        self.cells = values;
        Ok(())
    }

    /// A single state-1 cell in the middle of a zero field.
    ///
    /// With an even cell count the cell sits left of centre.
    pub fn set_single_cell_centred(&mut self) {
        self.clear();
        let centre = (self.cells.len() - 1) / 2;
        self.cells[centre] = 1;
    }

    /// Advances one generation.
    ///
    /// Takes exactly one rule from the cycle. Without wrapping, the missing
    /// neighbours at the ends read as state 0.
    pub fn compute_next(&mut self) {
        let table = self.rules.advance();
        let cells = &self.cells;
        let width = cells.len();
        let last = width - 1;

        let next: Vec<u8> = (0..width)
            .map(|i| {
                let left = if i == 0 {
                    if self.wrap { cells[last] } else { 0 }
                } else {
                    cells[i - 1]
                };
                let right = if i == last {
                    if self.wrap { cells[0] } else { 0 }
                } else {
                    cells[i + 1]
                };
                table.next_state(neighbourhood_code(left, cells[i], right, self.radix))
            })
            .collect();

        self.duplicate_state = next == self.cells;
        self.cells = next;
        self.generation += 1;
    }

    /// Advances `n` generations.
    pub fn steps(&mut self, n: usize) {
        for _ in 0..n {
            self.compute_next();
        }
    }

    /// The current generation.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}
