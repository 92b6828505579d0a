//! One-shot configuration of a full automaton run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cells::Cells;
use crate::driver::OutputWindow;
#[cfg(feature = "serde")]
use crate::error::ConfigError;
use crate::error::Result;
use crate::grid::Grid;
use crate::rule::{RuleNumber, RuleSpec, elementary_rules};
use crate::seed::SeedSpec;
use crate::transform::TransformPipeline;

/// Where the rule numbers of a run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RuleSource {
    /// Fixed rule numbers, cycled in order.
    Fixed(Vec<RuleNumber>),
    /// `random` rules drawn uniformly for the radix.
    Random {
        /// How many rules to draw.
        random: usize,
    },
}

impl Default for RuleSource {
    fn default() -> Self {
        RuleSource::Fixed(vec![elementary_rules::RULE_30.into()])
    }
}

impl<R: Into<RuleNumber>> FromIterator<R> for RuleSource {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        RuleSource::Fixed(iter.into_iter().map(Into::into).collect())
    }
}

/// Configuration operation for a complete run: seed, step, collect, transform.
///
/// ```
/// use rhizome_resin_automata::{AutomatonConfig, OutputWindow, Transform};
///
/// let mut config = AutomatonConfig::new(31, 2, [90u64]);
/// config.window = OutputWindow::new(15);
/// config.transforms.push(Transform::VerticalMirror);
///
/// let run = config.apply().unwrap();
/// assert_eq!(run.grid.height(), 31);
/// assert_eq!(run.file_stem(), "pic_90");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutomatonConfig {
    /// Number of cells per generation.
    pub cell_count: usize,
    /// Number of states.
    pub radix: u32,
    /// Rule numbers, or how many to draw at random.
    pub rules: RuleSource,
    /// Whether the ends wrap around.
    pub wrap: bool,
    /// First generation.
    pub seed: SeedSpec,
    /// Which generations to keep.
    pub window: OutputWindow,
    /// Applied to the collected grid, in order.
    pub transforms: TransformPipeline,
    /// Seed for every random draw (None = thread RNG).
    pub random_seed: Option<u64>,
}

/// Result of [`AutomatonConfig::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Run {
    /// Collected and transformed generations.
    pub grid: Grid,
    /// Normalized rule numbers actually used, in cycle order.
    pub rules: Vec<RuleNumber>,
}

impl Run {
    /// Default output name, e.g. `pic_30` or `pic_30_90` for two rules.
    pub fn file_stem(&self) -> String {
        let rules: Vec<String> = self.rules.iter().map(ToString::to_string).collect();
        format!("pic_{}", rules.join("_"))
    }
}

impl AutomatonConfig {
    /// Creates a configuration with fixed rules and default settings.
    pub fn new<I, R>(cell_count: usize, radix: u32, rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RuleNumber>,
    {
        Self {
            cell_count,
            radix,
            rules: rules.into_iter().collect(),
            wrap: false,
            seed: SeedSpec::default(),
            window: OutputWindow::default(),
            transforms: TransformPipeline::new(),
            random_seed: None,
        }
    }

    /// Decodes a JSON configuration. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Validates the radix and resolves the rule numbers.
    pub fn rule_spec(&self) -> Result<RuleSpec> {
        self.rule_spec_with_rng(&mut rand::rng())
    }

    /// Like [`rule_spec`](Self::rule_spec) with a caller-supplied source for
    /// random rules.
    pub fn rule_spec_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RuleSpec> {
        let spec = match &self.rules {
            RuleSource::Fixed(rules) => RuleSpec::new(self.radix, rules.iter().cloned())?,
            RuleSource::Random { random } => RuleSpec::random_with_rng(self.radix, *random, rng)?,
        };
        Ok(spec)
    }

    /// Runs the automaton, seeding randomness from `random_seed` when set.
    pub fn apply(&self) -> Result<Run> {
        match self.random_seed {
            Some(seed) => self.apply_with_rng(&mut StdRng::seed_from_u64(seed)),
            None => self.apply_with_rng(&mut rand::rng()),
        }
    }

    /// Runs the automaton with a caller-supplied random source.
    ///
    /// Everything is validated before the first step; no partial grid is
    /// returned on error.
    pub fn apply_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Run> {
        let spec = self.rule_spec_with_rng(rng)?;
        let rules = spec.rule_numbers();

        let mut cells = Cells::new(self.cell_count, &spec)?;
        cells.set_wrap(self.wrap);
        cells.set_cells(self.seed.build_with_rng(self.cell_count, self.radix, rng)?)?;

        debug!(
            cell_count = self.cell_count,
            radix = self.radix,
            rules = %rules.iter().map(ToString::to_string).collect::<Vec<_>>().join(","),
            wrap = self.wrap,
            "starting automaton run"
        );

        let grid = self.window.run(&mut cells);
        let grid = self.transforms.apply(grid);
        Ok(Run { grid, rules })
    }
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self::new(80, 2, [elementary_rules::RULE_30])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AutomataError, ConfigError};
    use crate::rule::rule_possibilities;
    use crate::seed::SeedSource;
    use crate::transform::Transform;

    #[test]
    fn test_default_config() {
        let config = AutomatonConfig::default();
        let run = config.apply().unwrap();
        assert_eq!(run.grid.height(), 41);
        assert_eq!(run.grid.width(), 80);
        assert_eq!(run.grid.get(39, 0), Some(1));
        assert_eq!(run.grid.rows()[0].iter().filter(|&&s| s == 1).count(), 1);
        assert_eq!(run.file_stem(), "pic_30");
    }

    #[test]
    fn test_rule_90_rows() {
        let mut config = AutomatonConfig::new(7, 2, [90u64]);
        config.window = OutputWindow::new(3);
        let run = config.apply().unwrap();
        assert_eq!(
            run.grid.rows(),
            &[
                vec![0, 0, 0, 1, 0, 0, 0],
                vec![0, 0, 1, 0, 1, 0, 0],
                vec![0, 1, 0, 0, 0, 1, 0],
                vec![1, 0, 1, 0, 1, 0, 1],
            ]
        );
    }

    #[test]
    fn test_transforms_applied_after_collection() {
        let mut config = AutomatonConfig::new(7, 2, [90u64]);
        config.window = OutputWindow::new(3);
        let plain = config.apply().unwrap().grid;

        config.transforms.push(Transform::Reverse);
        let reversed = config.apply().unwrap().grid;

        let mut expected = plain.into_rows();
        expected.reverse();
        assert_eq!(reversed.into_rows(), expected);
    }

    #[test]
    fn test_multi_rule_file_stem_uses_normalized_rules() {
        let config = AutomatonConfig::new(9, 2, [30u64, 90 + 256]);
        let run = config.apply().unwrap();
        assert_eq!(run.rules, vec![RuleNumber::from(30u64), RuleNumber::from(90u64)]);
        assert_eq!(run.file_stem(), "pic_30_90");
    }

    #[test]
    fn test_random_seed_reproducible() {
        let mut config = AutomatonConfig::new(32, 3, [12345u64]);
        config.seed = SeedSpec::new(SeedSource::random());
        config.window = OutputWindow::new(8);
        config.random_seed = Some(7);

        let a = config.apply().unwrap();
        let b = config.apply().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_rules() {
        let mut config = AutomatonConfig::new(16, 3, Vec::<u64>::new());
        config.rules = RuleSource::Random { random: 2 };
        config.window = OutputWindow::new(4);
        config.random_seed = Some(99);

        let run = config.apply().unwrap();
        assert_eq!(run.rules.len(), 2);
        let limit = rule_possibilities(3);
        assert!(run.rules.iter().all(|r| r.as_biguint() < &limit));
        assert_eq!(config.apply().unwrap().rules, run.rules);
    }

    #[test]
    fn test_validation_errors() {
        let config = AutomatonConfig::new(10, 1, [0u64]);
        assert_eq!(
            config.apply(),
            Err(AutomataError::Config(ConfigError::InvalidRadix(1)))
        );

        let config = AutomatonConfig::new(10, 2, Vec::<u64>::new());
        assert_eq!(config.apply(), Err(ConfigError::EmptyRules.into()));

        let config = AutomatonConfig::new(0, 2, [30u64]);
        assert_eq!(config.apply(), Err(ConfigError::NoCells.into()));

        let mut config = AutomatonConfig::new(10, 2, [30u64]);
        config.seed = SeedSpec::new(SeedSource::Explicit {
            states: vec![1, 0, 1],
        });
        assert_eq!(
            config.apply(),
            Err(AutomataError::LengthMismatch {
                expected: 10,
                got: 3
            })
        );
    }

    #[test]
    fn test_wrap_flag_reaches_cells() {
        // Rule 240 shifts right; with wrapping the cell comes back around.
        let mut config = AutomatonConfig::new(4, 2, [240u64]);
        config.seed = SeedSpec::new(SeedSource::Explicit {
            states: vec![0, 0, 0, 1],
        });
        config.window = OutputWindow::new(1);

        config.wrap = true;
        let wrapped = config.apply().unwrap();
        assert_eq!(wrapped.grid.row(1), Some(&[1u8, 0, 0, 0][..]));

        config.wrap = false;
        let open = config.apply().unwrap();
        assert_eq!(open.grid.row(1), Some(&[0u8, 0, 0, 0][..]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let config = AutomatonConfig::from_json(
            r#"{
                "cell_count": 21,
                "radix": 3,
                "rules": [7625597484988, "7625597484989"],
                "wrap": true,
                "seed": {
                    "source": { "mode": "random", "weights": [1, 3], "mirrored": true },
                    "centred": true
                },
                "window": { "line_count": 10, "start_line": 2 },
                "transforms": ["rotate", "horizontal-mirror"],
                "random_seed": 3
            }"#,
        )
        .unwrap();

        assert_eq!(config.cell_count, 21);
        assert_eq!(
            config.rules,
            RuleSource::Fixed(vec![
                RuleNumber::from(7625597484988u64),
                RuleNumber::from(7625597484989u64)
            ])
        );
        assert_eq!(config.window.start_line, 2);
        assert!(!config.window.until_fixed_point);
        assert_eq!(
            config.transforms.ops,
            vec![Transform::Rotate, Transform::HorizontalMirror]
        );

        let run = config.apply().unwrap();
        // 10 rows captured (iterations 2..=11), rotated to 10 wide, then mirrored.
        assert_eq!(run.grid.height(), 21);
        assert_eq!(run.grid.width(), 19);
        // 3^27 wraps the rule numbers to 1 and 2.
        assert_eq!(run.file_stem(), "pic_1_2");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_defaults_and_errors() {
        let config = AutomatonConfig::from_json("{}").unwrap();
        assert_eq!(config, AutomatonConfig::default());

        let config = AutomatonConfig::from_json(r#"{ "rules": { "random": 3 } }"#).unwrap();
        assert_eq!(config.rules, RuleSource::Random { random: 3 });

        let negative = AutomatonConfig::from_json(
            r#"{ "seed": { "source": { "mode": "random", "weights": [1, -1] } } }"#,
        );
        assert!(matches!(negative, Err(ConfigError::Json(_))));

        let unknown = AutomatonConfig::from_json(r#"{ "transforms": ["flip"] }"#);
        assert!(matches!(unknown, Err(ConfigError::Json(_))));
    }
}
