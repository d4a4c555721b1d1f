//! Pre-carry convolution of two binary digit sequences.

use num_bigint::BigUint;
use serde::Serialize;

use crate::carry::{self, CarrySchedule, Normalization};
use crate::digits::{bit_length, bit_positions};
use crate::error::Result;

/// Coefficients of the schoolbook product of two binary numbers before any
/// carry is applied, least significant position first.
///
/// Entry k counts the pairs (i, j) with a_i = b_j = 1 and i + j = k. Reading
/// the entries as base-2 place values gives a·b exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Convolution(Vec<u64>);

impl Convolution {
    pub fn coefficients(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all entries; equals popcount(a) · popcount(b).
    pub fn mass(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Largest entry (H).
    pub fn height(&self) -> u64 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Total excess over 1 (C): Σ max(c_k - 1, 0).
    pub fn carry_mass(&self) -> u64 {
        self.0.iter().map(|&c| c.saturating_sub(1)).sum()
    }

    /// Propagate carries under `schedule` until every entry is a bit.
    pub fn normalize(&self, schedule: CarrySchedule) -> Result<Normalization> {
        carry::normalize(&self.0, schedule)
    }
}

impl From<Vec<u64>> for Convolution {
    fn from(coefficients: Vec<u64>) -> Self {
        Convolution(coefficients)
    }
}

/// Full convolution of the digit sequences of `a` and `b`.
///
/// Length is `bit_length(a) + bit_length(b) - 1`. Both operands must be
/// positive.
pub fn binary_convolution(a: &BigUint, b: &BigUint) -> Result<Convolution> {
    let len_a = bit_length(a)?;
    let len_b = bit_length(b)?;
    let pa = bit_positions(a)?;
    let pb = bit_positions(b)?;

    let mut coefficients = vec![0u64; (len_a + len_b - 1) as usize];
    for &i in &pa {
        for &j in &pb {
            coefficients[(i + j) as usize] += 1;
        }
    }
    Ok(Convolution(coefficients))
}
