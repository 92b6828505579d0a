//! Builds the first generation.
//!
//! A seed is either given explicitly or drawn at random from a weighted
//! pool of states, optionally as a palindrome, and optionally centred in a
//! field of zero cells.

use std::collections::VecDeque;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{AutomataError, ConfigError, Result};
use crate::symbols::Alphabet;

/// Where the initial states come from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "kebab-case"))]
pub enum SeedSource {
    /// A single state-1 cell in the middle of the field. Always centred,
    /// whatever [`SeedSpec::centred`] says.
    SingleCell,
    /// Literal state indices.
    Explicit {
        /// States, left to right.
        states: Vec<u8>,
    },
    /// Literal states written with the default symbols, e.g. `"0120"`.
    Text {
        /// Symbol string.
        value: String,
    },
    /// States drawn from a weighted pool.
    Random {
        /// Relative weight of each state, indexed by state. `None` weighs
        /// every state equally.
        #[cfg_attr(feature = "serde", serde(default))]
        weights: Option<Vec<u32>>,
        /// Produce a palindrome, drawn from the middle outward.
        #[cfg_attr(feature = "serde", serde(default))]
        mirrored: bool,
        /// Number of states to draw; the full cell count when `None`.
        #[cfg_attr(feature = "serde", serde(default))]
        length: Option<usize>,
    },
}

impl SeedSource {
    /// Random states with equal weights over the full width.
    pub fn random() -> Self {
        SeedSource::Random {
            weights: None,
            mirrored: false,
            length: None,
        }
    }
}

/// Seed source plus layout.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeedSpec {
    /// Where the states come from.
    pub source: SeedSource,
    /// Pad both sides with state 0 up to the cell count.
    pub centred: bool,
}

impl SeedSpec {
    /// A seed with the given source, not centred.
    pub fn new(source: SeedSource) -> Self {
        Self {
            source,
            centred: false,
        }
    }

    /// Sets centring.
    pub fn centred(mut self, centred: bool) -> Self {
        self.centred = centred;
        self
    }

    /// Builds the first generation using the thread RNG.
    pub fn build(&self, cell_count: usize, radix: u32) -> Result<Vec<u8>> {
        self.build_with_rng(cell_count, radix, &mut rand::rng())
    }

    /// Builds the first generation.
    ///
    /// Fails with `StateOutOfRange` for states not below `radix` and with
    /// `LengthMismatch` unless the result is exactly `cell_count` long.
    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        cell_count: usize,
        radix: u32,
        rng: &mut R,
    ) -> Result<Vec<u8>> {
        let states = match &self.source {
            SeedSource::SingleCell => vec![1],
            SeedSource::Explicit { states } => states.clone(),
            SeedSource::Text { value } => Alphabet::default().parse(value)?,
            SeedSource::Random {
                weights,
                mirrored,
                length,
            } => {
                let pool = StatePool::new(weights.as_deref(), radix)?;
                sample_states(&pool, length.unwrap_or(cell_count), *mirrored, rng)
            }
        };

        if let Some(&state) = states.iter().find(|&&s| u32::from(s) >= radix) {
            return Err(ConfigError::StateOutOfRange {
                state: state.into(),
                radix,
            }
            .into());
        }

        let centred = self.centred || self.source == SeedSource::SingleCell;
        let states = if centred {
            centre(&states, cell_count)
        } else {
            states
        };

        if states.len() != cell_count {
            return Err(AutomataError::LengthMismatch {
                expected: cell_count,
                got: states.len(),
            });
        }
        Ok(states)
    }
}

impl Default for SeedSpec {
    fn default() -> Self {
        Self {
            source: SeedSource::SingleCell,
            centred: true,
        }
    }
}

/// The flattened pool of states a random seed draws from.
///
/// State `s` appears `weights[s]` times, so a uniform draw from the pool
/// picks states in proportion to their weight. The pool is stored as
/// cumulative counts rather than materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePool {
    /// `cumulative[s]` is the pool length up to and including state `s`.
    cumulative: Vec<u64>,
}

impl StatePool {
    /// Builds the pool. `None` gives every state weight 1.
    pub fn new(weights: Option<&[u32]>, radix: u32) -> std::result::Result<Self, ConfigError> {
        let even;
        let weights = match weights {
            Some(w) => w,
            None => {
                even = vec![1; radix as usize];
                &even[..]
            }
        };

        if weights.is_empty() {
            return Err(ConfigError::EmptyWeights);
        }
        if weights.len() > radix as usize {
            return Err(ConfigError::TooManyWeights {
                weights: weights.len(),
                radix,
            });
        }

        let cumulative: Vec<u64> = weights
            .iter()
            .scan(0u64, |total, &w| {
                *total += u64::from(w);
                Some(*total)
            })
            .collect();
        if cumulative.last() == Some(&0) {
            return Err(ConfigError::ZeroWeights);
        }
        Ok(Self { cumulative })
    }

    /// Length of the flattened pool.
    pub fn len(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Always false; construction rejects empty pools.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The state at position `index` of the flattened pool.
    pub fn get(&self, index: u64) -> Option<u8> {
        if index >= self.len() {
            return None;
        }
        let state = self.cumulative.partition_point(|&c| c <= index);
        u8::try_from(state).ok()
    }

    /// Draws one state uniformly from the pool.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        let index = rng.random_range(0..self.len());
        self.get(index).unwrap_or(0)
    }
}

/// Draws `count` states from `pool`.
///
/// Mirrored output is a palindrome: for odd counts the centre is drawn first,
/// then each further draw is placed at both ends.
pub fn sample_states<R: Rng + ?Sized>(
    pool: &StatePool,
    count: usize,
    mirrored: bool,
    rng: &mut R,
) -> Vec<u8> {
    if !mirrored {
        return (0..count).map(|_| pool.sample(rng)).collect();
    }

    let mut states = VecDeque::with_capacity(count);
    if count % 2 == 1 {
        states.push_back(pool.sample(rng));
    }
    for _ in 0..count / 2 {
        let state = pool.sample(rng);
        states.push_front(state);
        states.push_back(state);
    }
    states.into()
}

/// Pads `states` with zeros on both sides to `width`.
///
/// When the padding is odd the extra cell goes on the right. Input at least
/// `width` long is returned unchanged.
pub fn centre(states: &[u8], width: usize) -> Vec<u8> {
    let pad = width.saturating_sub(states.len());
    let left = pad / 2;
    let mut out = Vec::with_capacity(states.len() + pad);
    out.resize(left, 0);
    out.extend_from_slice(states);
    out.resize(states.len() + pad, 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(12345)
    }

    fn random(weights: Option<Vec<u32>>, mirrored: bool, length: Option<usize>) -> SeedSpec {
        SeedSpec::new(SeedSource::Random {
            weights,
            mirrored,
            length,
        })
    }

    #[test]
    fn test_single_cell_default() {
        let seed = SeedSpec::default().build(5, 2).unwrap();
        assert_eq!(seed, vec![0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_explicit_used_as_is() {
        let spec = SeedSpec::new(SeedSource::Explicit {
            states: vec![0, 2, 1],
        });
        assert_eq!(spec.build(3, 3).unwrap(), vec![0, 2, 1]);
    }

    #[test]
    fn test_explicit_length_mismatch() {
        let spec = SeedSpec::new(SeedSource::Explicit {
            states: vec![1, 1],
        });
        assert_eq!(
            spec.build(5, 2),
            Err(AutomataError::LengthMismatch {
                expected: 5,
                got: 2
            })
        );
    }

    #[test]
    fn test_explicit_too_long_even_when_centred() {
        let spec = SeedSpec::new(SeedSource::Explicit {
            states: vec![1; 6],
        })
        .centred(true);
        assert!(matches!(
            spec.build(5, 2),
            Err(AutomataError::LengthMismatch { expected: 5, got: 6 })
        ));
    }

    #[test]
    fn test_explicit_state_out_of_range() {
        let spec = SeedSpec::new(SeedSource::Explicit {
            states: vec![0, 2],
        });
        assert_eq!(
            spec.build(2, 2),
            Err(ConfigError::StateOutOfRange { state: 2, radix: 2 }.into())
        );
    }

    #[test]
    fn test_text_seed() {
        let spec = SeedSpec::new(SeedSource::Text {
            value: "12".to_string(),
        })
        .centred(true);
        assert_eq!(spec.build(5, 3).unwrap(), vec![0, 1, 2, 0, 0]);

        let unknown = SeedSpec::new(SeedSource::Text {
            value: "1-".to_string(),
        });
        assert_eq!(
            unknown.build(2, 3),
            Err(ConfigError::UnknownSymbol('-').into())
        );

        // 'x' is a default symbol, but its state does not exist at radix 3.
        let too_high = SeedSpec::new(SeedSource::Text {
            value: "1x".to_string(),
        });
        assert_eq!(
            too_high.build(2, 3),
            Err(ConfigError::StateOutOfRange { state: 59, radix: 3 }.into())
        );
    }

    #[test]
    fn test_single_cell_ignores_centred_flag() {
        let uncentred = SeedSpec::new(SeedSource::SingleCell);
        assert!(!uncentred.centred);
        assert_eq!(uncentred.build(5, 2).unwrap(), vec![0, 0, 1, 0, 0]);
        assert_eq!(uncentred.build(4, 2).unwrap(), vec![0, 1, 0, 0]);
        assert_eq!(uncentred.build(1, 2).unwrap(), vec![1]);
    }

    #[test]
    fn test_centre_padding() {
        assert_eq!(centre(&[1, 2], 5), vec![0, 1, 2, 0, 0]);
        assert_eq!(centre(&[1, 2], 6), vec![0, 0, 1, 2, 0, 0]);
        assert_eq!(centre(&[1], 4), vec![0, 1, 0, 0]);
        assert_eq!(centre(&[1, 1, 1], 2), vec![1, 1, 1]);
    }

    #[test]
    fn test_random_deterministic() {
        let spec = SeedSpec::new(SeedSource::random());
        let a = spec.build_with_rng(40, 4, &mut rng()).unwrap();
        let b = spec.build_with_rng(40, 4, &mut rng()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
        assert!(a.iter().all(|&s| s < 4));
    }

    #[test]
    fn test_zero_weight_excludes_state() {
        let spec = random(Some(vec![1, 0, 1]), false, None);
        let seed = spec.build_with_rng(200, 3, &mut rng()).unwrap();
        assert!(!seed.contains(&1));
        assert!(seed.contains(&0));
        assert!(seed.contains(&2));
    }

    #[test]
    fn test_weights_shift_distribution() {
        let spec = random(Some(vec![1, 3]), false, None);
        let seed = spec.build_with_rng(4000, 2, &mut rng()).unwrap();
        let ones = seed.iter().filter(|&&s| s == 1).count();
        assert!(ones > 2700 && ones < 3300, "ones = {ones}");
    }

    #[test]
    fn test_mirrored_palindrome() {
        for width in [1, 2, 7, 10] {
            let spec = random(None, true, None);
            let seed = spec.build_with_rng(width, 5, &mut rng()).unwrap();
            let mut reversed = seed.clone();
            reversed.reverse();
            assert_eq!(seed, reversed, "width {width}");
        }
    }

    #[test]
    fn test_short_random_centred() {
        let spec = random(Some(vec![0, 1]), false, Some(4)).centred(true);
        let seed = spec.build_with_rng(10, 2, &mut rng()).unwrap();
        assert_eq!(seed, vec![0, 0, 0, 1, 1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_short_random_without_centring_mismatches() {
        let spec = random(None, false, Some(4));
        assert!(matches!(
            spec.build_with_rng(10, 2, &mut rng()),
            Err(AutomataError::LengthMismatch { expected: 10, got: 4 })
        ));
    }

    #[test]
    fn test_weight_errors() {
        assert_eq!(
            StatePool::new(Some(&[]), 2),
            Err(ConfigError::EmptyWeights)
        );
        assert_eq!(
            StatePool::new(Some(&[0, 0]), 2),
            Err(ConfigError::ZeroWeights)
        );
        assert_eq!(
            StatePool::new(Some(&[1, 1, 1]), 2),
            Err(ConfigError::TooManyWeights {
                weights: 3,
                radix: 2
            })
        );
    }

    #[test]
    fn test_pool_flattening() {
        let pool = StatePool::new(Some(&[2, 1, 0, 3]), 4).unwrap();
        assert_eq!(pool.len(), 6);
        let flat: Vec<u8> = (0..pool.len()).filter_map(|i| pool.get(i)).collect();
        assert_eq!(flat, vec![0, 0, 1, 3, 3, 3]);
        assert_eq!(pool.get(6), None);

        let even = StatePool::new(None, 3).unwrap();
        assert_eq!(even.len(), 3);
    }

    #[test]
    fn test_sample_states_mirrored_draw_order() {
        // Every draw yields the only state in the pool, so only the shape is checked.
        let pool = StatePool::new(Some(&[0, 0, 5]), 3).unwrap();
        assert_eq!(sample_states(&pool, 5, true, &mut rng()), vec![2; 5]);
        assert_eq!(sample_states(&pool, 0, true, &mut rng()), Vec::<u8>::new());
    }
}
