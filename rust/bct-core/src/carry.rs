//! Carry normalization of a pre-carry convolution.
//!
//! Both chain-length invariants come from the same loop: repeat a full pass
//! over the coefficient sequence until every entry is 0 or 1, counting
//! passes. The two schedules differ only in how a pass reads its neighbours.
//!
//! - [`CarrySchedule::Sequential`] walks LSB to MSB and feeds each carry into
//!   the very next position within the same pass, so one pass always suffices.
//! - [`CarrySchedule::Parallel`] updates every position at once from the
//!   previous round's values: `new[k] = old[k] mod 2 + old[k-1] div 2`.
//!   Carries move one position per round, so ripples can take many rounds.
//!
//! In both schedules the carry that leaves the last position is appended as
//! binary digits, growing the sequence.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serialize;

use crate::error::{BctError, Result};

/// Round bound for the sequential schedule. Never reached in practice; one
/// sweep normalizes any convolution.
pub const SEQUENTIAL_SWEEP_LIMIT: usize = 1000;

/// Round bound for the synchronous schedule.
pub const PARALLEL_ROUND_LIMIT: usize = 1000;

/// How a normalization pass propagates carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CarrySchedule {
    /// In-place LSB to MSB sweep; carries are consumed immediately.
    Sequential,
    /// Synchronous update from the previous round's values.
    Parallel,
}

impl CarrySchedule {
    /// Maximum number of passes before the simulation gives up.
    pub fn round_limit(self) -> usize {
        match self {
            CarrySchedule::Sequential => SEQUENTIAL_SWEEP_LIMIT,
            CarrySchedule::Parallel => PARALLEL_ROUND_LIMIT,
        }
    }

    fn pass(self, digits: &[u64]) -> Vec<u64> {
        match self {
            CarrySchedule::Sequential => sequential_pass(digits),
            CarrySchedule::Parallel => parallel_pass(digits),
        }
    }
}

impl fmt::Display for CarrySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarrySchedule::Sequential => write!(f, "sequential"),
            CarrySchedule::Parallel => write!(f, "parallel"),
        }
    }
}

/// Outcome of a carry simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalization {
    pub schedule: CarrySchedule,
    /// Passes performed; 0 when the input was already binary.
    pub rounds: usize,
    /// Final digits, LSB first, each 0 or 1.
    pub digits: Vec<u64>,
}

impl Normalization {
    /// The normalized digits read back as an integer.
    pub fn value(&self) -> BigUint {
        self.digits
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, &d| (acc << 1u32) + d)
    }
}

fn is_binary(digits: &[u64]) -> bool {
    digits.iter().all(|&d| d <= 1)
}

/// Append an overflow carry past the current end as binary digits.
fn push_carry(digits: &mut Vec<u64>, mut carry: u64) {
    while carry > 0 {
        digits.push(carry % 2);
        carry /= 2;
    }
}

fn sequential_pass(old: &[u64]) -> Vec<u64> {
    let mut out = Vec::with_capacity(old.len() + 2);
    let mut carry = 0u64;
    for &c in old {
        let total = c + carry;
        out.push(total % 2);
        carry = total / 2;
    }
    push_carry(&mut out, carry);
    out
}

fn parallel_pass(old: &[u64]) -> Vec<u64> {
    let mut out: Vec<u64> = old
        .iter()
        .enumerate()
        .map(|(k, &c)| {
            let incoming = if k > 0 { old[k - 1] / 2 } else { 0 };
            c % 2 + incoming
        })
        .collect();
    push_carry(&mut out, old.last().map_or(0, |&c| c / 2));
    out
}

/// Run passes of `schedule` over `coefficients` until every entry is 0 or 1.
///
/// Fails with [`BctError::ComputationLimit`] if the schedule's round limit is
/// reached without normalizing.
pub fn normalize(coefficients: &[u64], schedule: CarrySchedule) -> Result<Normalization> {
    normalize_within(coefficients, schedule, schedule.round_limit())
}

pub(crate) fn normalize_within(
    coefficients: &[u64],
    schedule: CarrySchedule,
    limit: usize,
) -> Result<Normalization> {
    let mut digits = coefficients.to_vec();
    let mut rounds = 0usize;

    while !is_binary(&digits) {
        if rounds == limit {
            log::warn!(
                "{} normalization still unresolved after {} rounds (length {})",
                schedule,
                limit,
                digits.len()
            );
            return Err(BctError::ComputationLimit { schedule, limit });
        }
        digits = schedule.pass(&digits);
        rounds += 1;
        log::trace!("{} round {}: {:?}", schedule, rounds, digits);
    }

    Ok(Normalization {
        schedule,
        rounds,
        digits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_binary_takes_no_rounds() {
        for schedule in [CarrySchedule::Sequential, CarrySchedule::Parallel] {
            let norm = normalize(&[1, 1, 1, 1], schedule).unwrap();
            assert_eq!(norm.rounds, 0);
            assert_eq!(norm.digits, vec![1, 1, 1, 1]);
            assert_eq!(norm.value(), BigUint::from(15u32));
        }
    }

    #[test]
    fn test_sequential_single_sweep_mersenne_triangle() {
        // conv(7, 7) = [1, 2, 3, 2, 1]; 49 = 110001b.
        let norm = normalize(&[1, 2, 3, 2, 1], CarrySchedule::Sequential).unwrap();
        assert_eq!(norm.rounds, 1);
        assert_eq!(norm.digits, vec![1, 0, 0, 0, 1, 1]);
        assert_eq!(norm.value(), BigUint::from(49u32));
    }

    #[test]
    fn test_parallel_rounds_mersenne_triangle() {
        let norm = normalize(&[1, 2, 3, 2, 1], CarrySchedule::Parallel).unwrap();
        assert_eq!(norm.rounds, 3);
        assert_eq!(norm.digits, vec![1, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_parallel_single_round_trace() {
        assert_eq!(parallel_pass(&[1, 2, 3, 2, 1]), vec![1, 0, 2, 1, 2]);
        assert_eq!(parallel_pass(&[1, 0, 2, 1, 2]), vec![1, 0, 0, 2, 0, 1]);
    }

    #[test]
    fn test_overflow_carry_appended_as_binary() {
        // A single coefficient of 6 at the top: 6 = 110b.
        assert_eq!(sequential_pass(&[6]), vec![0, 1, 1]);
        assert_eq!(parallel_pass(&[6]), vec![0, 1, 1]);
        assert_eq!(sequential_pass(&[4]), vec![0, 0, 1]);
    }

    #[test]
    fn test_round_limits() {
        assert_eq!(CarrySchedule::Parallel.round_limit(), PARALLEL_ROUND_LIMIT);
        assert_eq!(CarrySchedule::Sequential.round_limit(), SEQUENTIAL_SWEEP_LIMIT);
        let norm = normalize(&[1, 2, 1], CarrySchedule::Parallel).unwrap();
        assert_eq!(norm.rounds, 2);
        assert_eq!(norm.value(), BigUint::from(9u32));
    }

    #[test]
    fn test_exceeding_limit_is_an_error() {
        let err = normalize_within(&[1, 2, 3, 2, 1], CarrySchedule::Parallel, 2).unwrap_err();
        assert_eq!(
            err,
            BctError::ComputationLimit {
                schedule: CarrySchedule::Parallel,
                limit: 2
            }
        );
        // Exactly enough rounds is fine.
        assert!(normalize_within(&[1, 2, 3, 2, 1], CarrySchedule::Parallel, 3).is_ok());
    }

    #[test]
    fn test_empty_sequence() {
        let norm = normalize(&[], CarrySchedule::Parallel).unwrap();
        assert_eq!(norm.rounds, 0);
        assert!(norm.value().is_zero());
    }
}
