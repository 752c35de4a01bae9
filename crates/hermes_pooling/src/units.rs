use std::{
    iter::Sum,
    ops::{Add, Div, Mul},
};

use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Currency amount in the pooling cost model (rupee-equivalent units).
pub type Cost = f64;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize, JsonSchema)]
pub struct Kilometers(f64);

impl Kilometers {
    pub const ZERO: Kilometers = Kilometers(0.0);

    pub const fn new(value: f64) -> Self {
        Kilometers(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Kilometers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}km", self.0)
    }
}

impl From<f64> for Kilometers {
    fn from(value: f64) -> Self {
        Kilometers::new(value)
    }
}

impl Add for Kilometers {
    type Output = Kilometers;

    fn add(self, other: Kilometers) -> Kilometers {
        Kilometers(self.0 + other.0)
    }
}

/// Distance times a per-km rate.
impl Mul<f64> for Kilometers {
    type Output = f64;

    fn mul(self, rate: f64) -> f64 {
        self.0 * rate
    }
}

impl Div<Kilometers> for Kilometers {
    type Output = f64;

    fn div(self, other: Kilometers) -> f64 {
        self.0 / other.0
    }
}

impl Sum for Kilometers {
    fn sum<I: Iterator<Item = Kilometers>>(iter: I) -> Kilometers {
        iter.fold(Kilometers::ZERO, |acc, x| acc + x)
    }
}

/// Converts a fractional number of minutes into a duration. Saturates on
/// non-finite or out of range input.
pub fn minutes(value: f64) -> SignedDuration {
    SignedDuration::try_from_secs_f64(value * 60.0).unwrap_or(SignedDuration::MAX)
}
