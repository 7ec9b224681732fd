//! Scalar quantization
//!
//! Coordinates are rounded to a fixed number of decimal places before they are
//! compared or written. Results that land exactly on an integer are stored as
//! [`Number::Int`], so a vertex sitting on a grid line serializes as `1` rather
//! than `1.0` or `1.000`.
//!
//! # Rounding
//!
//! Rounding is half-to-even on the exact binary value of the input. `2.675` is
//! stored as `2.67499999...` and therefore rounds down to `2.67` at two places,
//! while `0.125` (exactly representable) rounds to `0.12`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::ParseIntError;
use std::str::FromStr;

/// Smallest `|x|` that no longer fits in an `i64` (2^63)
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Number of decimal places kept by [`quantize`].
///
/// Always within `MIN..=MAX`; construct with [`Precision::new`] or parse from
/// a string/config value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Precision(u8);

impl Precision {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 10;
    pub const DEFAULT: Precision = Precision(3);

    /// Validate a decimal place count.
    pub fn new(places: u32) -> Result<Self, PrecisionError> {
        Self::try_from(i64::from(places))
    }

    /// Decimal places as an integer
    pub const fn get(self) -> u32 {
        self.0 as u32
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Precision {
    type Error = PrecisionError;

    fn try_from(places: i64) -> Result<Self, Self::Error> {
        if places < i64::from(Self::MIN) || places > i64::from(Self::MAX) {
            return Err(PrecisionError::OutOfRange(places));
        }
        Ok(Precision(places as u8))
    }
}

impl From<Precision> for u32 {
    fn from(precision: Precision) -> Self {
        precision.get()
    }
}

impl FromStr for Precision {
    type Err = PrecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let places: i64 = s.trim().parse()?;
        Self::try_from(places)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected precision value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrecisionError {
    #[error("precision {0} out of range (must be 1-10 decimal places)")]
    OutOfRange(i64),

    #[error("invalid precision: {0}")]
    Parse(#[from] ParseIntError),
}

/// A quantized scalar.
///
/// Equality and hashing are exact: two floats are equal only if their bit
/// patterns match. Quantization never produces `-0.0` or an integral float,
/// so this is the same as numeric equality for quantized values.
///
/// Serializes as a bare JSON number. Integers that overflow `i64` decode as
/// floats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Number::Int(_))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Number::Int(i) => {
                state.write_u8(0);
                i.hash(state);
            }
            Number::Float(f) => {
                state.write_u8(1);
                f.to_bits().hash(state);
            }
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

/// Round `value` to `precision` decimal places.
///
/// Integral results are returned as [`Number::Int`] (including `-0.0`, which
/// becomes `Int(0)`). Non-finite input is passed through as a float; callers
/// that need a finite result must check beforehand.
pub fn quantize(value: f64, precision: Precision) -> Number {
    if !value.is_finite() {
        return Number::Float(value);
    }

    let rounded = round_decimal(value, precision.get());
    if rounded.fract() == 0.0 && rounded.abs() < I64_LIMIT {
        Number::Int(rounded as i64)
    } else {
        Number::Float(rounded)
    }
}

/// Decimal rounding via exact formatting, then back to the nearest f64.
fn round_decimal(value: f64, places: u32) -> f64 {
    format!("{:.*}", places as usize, value)
        .parse()
        .unwrap_or(value)
}
