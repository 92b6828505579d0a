//! Endlessly repeating sequences.

use crate::error::{AutomataError, Result};

/// A non-empty sequence that yields its elements forever, wrapping to the
/// start after the last one.
///
/// Each instance owns its own cursor. The automaton keeps one for its rule
/// tables, and a renderer can keep another for per-line colours.
///
/// ```
/// use rhizome_resin_automata::Cycle;
///
/// let mut colours = Cycle::new(vec!["red", "green"]).unwrap();
/// assert_eq!(*colours.current(), "red");
/// assert_eq!(*colours.advance(), "red");
/// assert_eq!(*colours.advance(), "green");
/// assert_eq!(*colours.advance(), "red");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle<T> {
    items: Vec<T>,
    /// Index of the element last returned by `advance`, `None` before the first call.
    cursor: Option<usize>,
}

impl<T> Cycle<T> {
    /// Creates a cycle over `items`.
    ///
    /// Fails with [`AutomataError::ExhaustedCycle`] if `items` is empty.
    pub fn new(items: Vec<T>) -> Result<Self> {
        if items.is_empty() {
            return Err(AutomataError::ExhaustedCycle);
        }
        Ok(Self {
            items,
            cursor: None,
        })
    }

    /// Moves to the next element and returns it.
    pub fn advance(&mut self) -> &T {
        let next = match self.cursor {
            Some(i) if i + 1 < self.items.len() => i + 1,
            _ => 0,
        };
        self.cursor = Some(next);
        &self.items[next]
    }

    /// Returns the element at the cursor without moving it.
    ///
    /// Before the first `advance` this is the first element.
    pub fn current(&self) -> &T {
        &self.items[self.cursor.unwrap_or(0)]
    }

    /// Index of the element last returned by [`advance`](Self::advance).
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    /// Rewinds so the next `advance` returns the first element again.
    pub fn reset(&mut self) {
        self.cursor = None;
    }

    /// Number of distinct elements in one period.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The underlying elements, in order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consumes the cycle and returns its elements.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}
