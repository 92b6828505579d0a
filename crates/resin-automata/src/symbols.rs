//! Mapping between state indices and display characters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::Grid;

/// Default symbols: digits, then upper case, then lower case.
pub const DEFAULT_SYMBOLS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// An ordered set of characters, one per state.
///
/// ```
/// use rhizome_resin_automata::Alphabet;
///
/// let alphabet = Alphabet::new(" o").unwrap();
/// assert_eq!(alphabet.render_row(&[0, 1, 1, 0]), " oo ");
/// assert_eq!(alphabet.parse(" o ").unwrap(), vec![0, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Builds an alphabet from a string; state `i` is its `i`th character.
    pub fn new(symbols: &str) -> Result<Self, ConfigError> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(ConfigError::DuplicateSymbol(*c));
            }
        }
        Ok(Self { symbols })
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; construction rejects empty alphabets.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol for a state, if the alphabet has one.
    pub fn symbol(&self, state: u8) -> Option<char> {
        self.symbols.get(state as usize).copied()
    }

    /// State for a symbol.
    pub fn state_of(&self, symbol: char) -> Option<u8> {
        self.symbols
            .iter()
            .position(|&c| c == symbol)
            .and_then(|i| u8::try_from(i).ok())
    }

    /// Parses a string of symbols into states.
    pub fn parse(&self, text: &str) -> Result<Vec<u8>, ConfigError> {
        text.chars()
            .map(|c| self.state_of(c).ok_or(ConfigError::UnknownSymbol(c)))
            .collect()
    }

    /// Renders one row. States without a symbol render as `?`.
    pub fn render_row(&self, row: &[u8]) -> String {
        row.iter().map(|&s| self.symbol(s).unwrap_or('?')).collect()
    }

    /// Renders every row of a grid.
    pub fn render(&self, grid: &Grid) -> Vec<String> {
        grid.rows().iter().map(|row| self.render_row(row)).collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.chars().collect(),
        }
    }
}

impl TryFrom<String> for Alphabet {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols.into_iter().collect()
    }
}
