//! Rule numbers and the lookup tables derived from them.
//!
//! A rule over `radix` states is a number in `[0, radix^(radix^3))`. Written in
//! base `radix`, least significant digit first, digit `n` is the next state of
//! any cell whose neighbourhood code is `n`. For radix 2 this is Wolfram's
//! elementary numbering.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cycle::Cycle;
use crate::error::{ConfigError, Result};

/// Cells in a neighbourhood: left, self, right.
pub const NEIGHBOURHOOD_SIZE: u32 = 3;

/// Largest supported radix. States are stored as `u8`.
pub const MAX_RADIX: u32 = 256;

/// Number of distinct neighbourhoods, `radix^3`.
pub fn table_len(radix: u32) -> usize {
    (radix as usize).pow(NEIGHBOURHOOD_SIZE)
}

/// Number of distinct rules, `radix^(radix^3)`.
pub fn rule_possibilities(radix: u32) -> BigUint {
    BigUint::from(radix).pow(table_len(radix) as u32)
}

/// Encodes a `(left, this, right)` window as a base-`radix` number.
#[inline]
pub fn neighbourhood_code(left: u8, this: u8, right: u8, radix: u32) -> usize {
    let r = radix as usize;
    (left as usize * r + this as usize) * r + right as usize
}

pub(crate) fn check_radix(radix: u32) -> std::result::Result<(), ConfigError> {
    if (2..=MAX_RADIX).contains(&radix) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRadix(radix))
    }
}

/// An arbitrary-precision, non-negative rule number.
///
/// Parses from decimal text and converts from machine integers. With the
/// `serde` feature it reads either a JSON integer or a decimal string, so
/// rules too large for `u64` survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RuleNumber(BigUint);

impl RuleNumber {
    /// Wraps a big integer.
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    /// The number as a big integer.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// The number as `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }
}

impl From<u64> for RuleNumber {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u32> for RuleNumber {
    fn from(value: u32) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<BigUint> for RuleNumber {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl FromStr for RuleNumber {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let digits = s.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::InvalidRuleNumber(s.to_string()));
        }
        BigUint::from_str(digits)
            .map(Self)
            .map_err(|_| ConfigError::InvalidRuleNumber(s.to_string()))
    }
}

impl fmt::Display for RuleNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "serde")]
impl Serialize for RuleNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.to_u64() {
            Some(n) => serializer.serialize_u64(n),
            None => serializer.serialize_str(&self.to_string()),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for RuleNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(u64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(n) => Ok(n.into()),
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// The next-state function of one rule.
///
/// The rule's base-`radix` digits are expanded once at construction, so
/// [`next_state`](Self::next_state) is a single index.
///
/// ```
/// use rhizome_resin_automata::{RuleTable, RuleNumber};
///
/// let rule_30 = RuleTable::new(2, &RuleNumber::from(30u64)).unwrap();
/// let outputs: Vec<u8> = (0..8).rev().map(|n| rule_30.next_state(n)).collect();
/// assert_eq!(outputs, vec![0, 0, 0, 1, 1, 1, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    radix: u32,
    /// Rule reduced modulo `radix^(radix^3)`.
    rule: RuleNumber,
    /// Next state indexed by neighbourhood code.
    next: Vec<u8>,
}

impl RuleTable {
    /// Builds the table for `rule` under `radix`, reducing the rule modulo
    /// the number of possible rules.
    pub fn new(radix: u32, rule: &RuleNumber) -> std::result::Result<Self, ConfigError> {
        check_radix(radix)?;
        // Keeping only the low radix^3 digits is the modulo reduction.
        let mut next = rule.0.to_radix_le(radix);
        next.resize(table_len(radix), 0);
        let normalized =
            BigUint::from_radix_le(&next, radix).ok_or(ConfigError::InvalidRadix(radix))?;

        Ok(Self {
            radix,
            rule: RuleNumber(normalized),
            next,
        })
    }

    /// Next state for a neighbourhood code in `[0, radix^3)`.
    #[inline]
    pub fn next_state(&self, code: usize) -> u8 {
        self.next[code]
    }

    /// Next state for an explicit `(left, this, right)` window.
    pub fn apply(&self, left: u8, this: u8, right: u8) -> u8 {
        self.next_state(neighbourhood_code(left, this, right, self.radix))
    }

    /// The radix this table was built for.
    pub fn radix(&self) -> u32 {
        self.radix
    }

    /// The normalized rule number.
    pub fn rule_number(&self) -> &RuleNumber {
        &self.rule
    }

    /// Number of neighbourhood codes, `radix^3`.
    pub fn len(&self) -> usize {
        self.next.len()
    }

    /// Always false: every radix has at least eight neighbourhoods.
    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// Next states indexed by neighbourhood code.
    pub fn as_slice(&self) -> &[u8] {
        &self.next
    }

    /// Iterates `(left, this, right, next)` from the highest neighbourhood
    /// code down to zero, the order used by Wolfram's rule icons.
    pub fn entries(&self) -> impl Iterator<Item = (u8, u8, u8, u8)> + '_ {
        let r = self.radix as usize;
        (0..self.next.len()).rev().map(move |code| {
            (
                (code / (r * r)) as u8,
                ((code / r) % r) as u8,
                (code % r) as u8,
                self.next[code],
            )
        })
    }

    /// The rule in base `radix`, zero-padded to `radix^3` digits, most
    /// significant first. `None` above radix 36.
    pub fn digit_string(&self) -> Option<String> {
        if self.radix > 36 {
            return None;
        }
        self.next
            .iter()
            .rev()
            .map(|&d| char::from_digit(d as u32, self.radix))
            .collect()
    }
}

/// Radix plus the ordered, non-empty list of rules an automaton cycles through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    radix: u32,
    tables: Vec<RuleTable>,
}

impl RuleSpec {
    /// Validates the radix and normalizes every rule number.
    pub fn new<I, R>(radix: u32, rules: I) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = R>,
        R: Into<RuleNumber>,
    {
        check_radix(radix)?;
        let tables = rules
            .into_iter()
            .map(|rule| RuleTable::new(radix, &rule.into()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        if tables.is_empty() {
            return Err(ConfigError::EmptyRules);
        }
        Ok(Self { radix, tables })
    }

    /// Draws `count` rules uniformly from every possible rule for `radix`.
    pub fn random(radix: u32, count: usize) -> std::result::Result<Self, ConfigError> {
        Self::random_with_rng(radix, count, &mut rand::rng())
    }

    /// Like [`random`](Self::random) with a caller-supplied source.
    ///
    /// Each base-`radix` digit is drawn independently, which is uniform over
    /// `[0, radix^(radix^3))`.
    pub fn random_with_rng<R: Rng + ?Sized>(
        radix: u32,
        count: usize,
        rng: &mut R,
    ) -> std::result::Result<Self, ConfigError> {
        check_radix(radix)?;
        let len = table_len(radix);
        let rules: Vec<RuleNumber> = (0..count)
            .map(|_| {
                let digits: Vec<u8> = (0..len).map(|_| rng.random_range(0..radix) as u8).collect();
                BigUint::from_radix_le(&digits, radix)
                    .map(RuleNumber)
                    .unwrap_or_else(|| RuleNumber(BigUint::zero()))
            })
            .collect();
        Self::new(radix, rules)
    }

    /// Number of states.
    pub fn radix(&self) -> u32 {
        self.radix
    }

    /// Cells per neighbourhood. Always 3.
    pub fn neighbourhood_size(&self) -> u32 {
        NEIGHBOURHOOD_SIZE
    }

    /// Normalized rule numbers in cycle order.
    pub fn rule_numbers(&self) -> Vec<RuleNumber> {
        self.tables.iter().map(|t| t.rule_number().clone()).collect()
    }

    /// One lookup table per rule, in cycle order.
    pub fn tables(&self) -> &[RuleTable] {
        &self.tables
    }

    /// A fresh cycle over the tables, positioned before the first rule.
    pub fn cycle(&self) -> Result<Cycle<RuleTable>> {
        Cycle::new(self.tables.clone())
    }
}

/// Well-known radix-2 rules.
pub mod elementary_rules {
    /// Rule 18 - nested triangles from random noise.
    pub const RULE_18: u64 = 18;

    /// Rule 30 - chaotic, used for random number generation.
    pub const RULE_30: u64 = 30;

    /// Rule 57 - embossed diagonal bands.
    pub const RULE_57: u64 = 57;

    /// Rule 90 - Sierpinski triangle.
    pub const RULE_90: u64 = 90;

    /// Rule 99 - mirror image of rule 57.
    pub const RULE_99: u64 = 99;

    /// Rule 110 - Turing complete.
    pub const RULE_110: u64 = 110;

    /// Rule 132 - isolated cells survive, blocks erode.
    pub const RULE_132: u64 = 132;

    /// Rule 160 - runs shrink from both sides into pyramids.
    pub const RULE_160: u64 = 160;

    /// Rule 164 - stepped pyramids.
    pub const RULE_164: u64 = 164;

    /// Rule 168 - runs shrink from the left, leaving slopes.
    pub const RULE_168: u64 = 168;

    /// Rule 184 - traffic flow model.
    pub const RULE_184: u64 = 184;

    /// Rule 202 - fixed background with sharp vertical cuts.
    pub const RULE_202: u64 = 202;
}
