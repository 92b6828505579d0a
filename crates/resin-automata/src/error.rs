//! Error types for resin-automata.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AutomataError>;

/// Errors raised while building or running an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomataError {
    /// The configuration was rejected before anything ran.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A state array did not match the configured cell count.
    #[error("state length mismatch: expected {expected} cells, got {got}")]
    LengthMismatch {
        /// Configured cell count.
        expected: usize,
        /// Length of the rejected state.
        got: usize,
    },

    /// A cyclic sequence was built from zero elements.
    #[error("cyclic sequence must contain at least one element")]
    ExhaustedCycle,
}

/// Problems with the values an automaton is configured from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Radix outside `2..=MAX_RADIX`.
    #[error("radix must be between 2 and 256, got {0}")]
    InvalidRadix(u32),

    /// No rule numbers were supplied.
    #[error("at least one rule number is required")]
    EmptyRules,

    /// A random seed was requested with an empty weight list.
    #[error("random state weights must not be empty")]
    EmptyWeights,

    /// Every weight was zero, leaving nothing to sample.
    #[error("at least one random state weight must be non-zero")]
    ZeroWeights,

    /// More weights than there are states.
    #[error("{weights} weights given but radix is {radix}")]
    TooManyWeights {
        /// Number of weights supplied.
        weights: usize,
        /// Radix of the automaton.
        radix: u32,
    },

    /// A state index that does not exist under the radix.
    #[error("state {state} is out of range for radix {radix}")]
    StateOutOfRange {
        /// Offending state.
        state: u32,
        /// Radix of the automaton.
        radix: u32,
    },

    /// A character with no state in the alphabet.
    #[error("unknown state symbol {0:?}")]
    UnknownSymbol(char),

    /// Symbol appears twice in an alphabet.
    #[error("state symbol {0:?} appears more than once")]
    DuplicateSymbol(char),

    /// Alphabet with no symbols.
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    /// Rule number text that is not a non-negative decimal integer.
    #[error("invalid rule number: {0}")]
    InvalidRuleNumber(String),

    /// Transform tag that names no known transform.
    #[error("unknown transform: {0}")]
    UnknownTransform(String),

    /// Automaton with zero cells.
    #[error("cell count must be at least 1")]
    NoCells,

    /// Configuration document could not be decoded.
    #[error("failed to decode configuration: {0}")]
    Json(String),
}
