//! Multi-state one-dimensional cellular automata.
//!
//! Generalizes Wolfram's elementary automata to any number of states
//! (the radix, 2 to 256) with a three-cell neighbourhood. A rule number is
//! read as the base-`radix` digit table of the next-state function.
//!
//! - [`RuleTable`] / [`RuleSpec`] - rule numbers and their lookup tables
//! - [`Cells`] - one generation plus the rule cycle that advances it
//! - [`OutputWindow`] - runs cells and collects generations into a [`Grid`]
//! - [`Transform`] / [`TransformPipeline`] - rotate, reverse and mirror grids
//! - [`SeedSpec`] - explicit, single-cell or weighted random first generations
//! - [`AutomatonConfig`] - the whole run as one configuration operation
//!
//! # Example
//!
//! ```
//! use rhizome_resin_automata::{Alphabet, AutomatonConfig, OutputWindow, SeedSource, SeedSpec};
//!
//! // Three states, one rule, a random seed that is the same every run.
//! let mut config = AutomatonConfig::new(21, 3, [1_234_567_890_123u64]);
//! config.seed = SeedSpec::new(SeedSource::random());
//! config.window = OutputWindow::new(10);
//! config.random_seed = Some(42);
//!
//! let run = config.apply().unwrap();
//! assert_eq!(run.grid.height(), 11);
//!
//! for line in Alphabet::new(" .#").unwrap().render(&run.grid) {
//!     assert_eq!(line.chars().count(), 21);
//! }
//! ```

mod cells;
mod config;
mod cycle;
mod driver;
mod error;
mod grid;
mod rule;
mod seed;
mod symbols;
mod transform;

pub use cells::Cells;
pub use config::{AutomatonConfig, RuleSource, Run};
pub use cycle::Cycle;
pub use driver::{CEILING_FACTOR, DriverOutput, OutputWindow, StopReason};
pub use error::{AutomataError, ConfigError, Result};
pub use grid::Grid;
pub use rule::{
    MAX_RADIX, NEIGHBOURHOOD_SIZE, RuleNumber, RuleSpec, RuleTable, elementary_rules,
    neighbourhood_code, rule_possibilities, table_len,
};
pub use seed::{SeedSource, SeedSpec, StatePool, centre, sample_states};
pub use symbols::{Alphabet, DEFAULT_SYMBOLS};
pub use transform::{Transform, TransformPipeline};

// Re-export for callers that build rule numbers above `u64`.
pub use num_bigint::BigUint;
