//! The three BCT invariants of a factorization pair: height H, carry count C
//! and chain length L (with the synchronous variant L_parallel).

use num_bigint::BigUint;
use serde::Serialize;

use crate::carry::CarrySchedule;
use crate::convolution::{binary_convolution, Convolution};
use crate::digits::binary_string;
use crate::divisors::factorizations;
use crate::error::Result;

/// H(a, b): the largest pre-carry coefficient.
///
/// Always satisfies `1 <= H <= min(popcount(a), popcount(b))`.
pub fn height(a: &BigUint, b: &BigUint) -> Result<u64> {
    Ok(binary_convolution(a, b)?.height())
}

/// C(a, b): total excess of the coefficients over 1.
pub fn carry_count(a: &BigUint, b: &BigUint) -> Result<u64> {
    Ok(binary_convolution(a, b)?.carry_mass())
}

/// L(a, b) under the sequential LSB to MSB sweep.
///
/// The sweep is simulated, not assumed. A convolution that is already binary
/// needs no work but still counts as one sweep, so L is 1 for every pair.
pub fn chain_length(a: &BigUint, b: &BigUint) -> Result<u64> {
    chain_length_of(&binary_convolution(a, b)?)
}

/// L of an already computed convolution. Never less than 1.
pub fn chain_length_of(conv: &Convolution) -> Result<u64> {
    let norm = conv.normalize(CarrySchedule::Sequential)?;
    Ok(norm.rounds.max(1) as u64)
}

/// L_parallel(a, b): synchronous carry rounds until the sequence is binary.
///
/// Returns 0 for orthogonal pairs, where no round is needed.
pub fn parallel_chain_length(a: &BigUint, b: &BigUint) -> Result<u64> {
    parallel_chain_length_of(&binary_convolution(a, b)?)
}

pub fn parallel_chain_length_of(conv: &Convolution) -> Result<u64> {
    Ok(conv.normalize(CarrySchedule::Parallel)?.rounds as u64)
}

/// (H, C, L) computed from a single convolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BctInvariants {
    pub height: u64,
    pub carry_count: u64,
    pub chain_length: u64,
}

impl BctInvariants {
    pub fn is_orthogonal(&self) -> bool {
        self.height == 1
    }
}

pub fn bct_invariants(a: &BigUint, b: &BigUint) -> Result<BctInvariants> {
    let conv = binary_convolution(a, b)?;
    invariants_of(&conv)
}

fn invariants_of(conv: &Convolution) -> Result<BctInvariants> {
    Ok(BctInvariants {
        height: conv.height(),
        carry_count: conv.carry_mass(),
        chain_length: chain_length_of(conv)?,
    })
}

/// H(n, n), the self-overlap of n's bit pattern.
pub fn self_height(n: &BigUint) -> Result<u64> {
    height(n, n)
}

/// One factorization pair together with its convolution and invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorizationProfile {
    pub a: BigUint,
    pub b: BigUint,
    pub binary_a: String,
    pub binary_b: String,
    pub convolution: Convolution,
    pub invariants: BctInvariants,
}

impl FactorizationProfile {
    pub fn is_orthogonal(&self) -> bool {
        self.invariants.is_orthogonal()
    }
}

/// Profiles for every factorization of n, the trivial pair (1, n) first.
pub fn analyze_factorizations(n: &BigUint) -> Result<Vec<FactorizationProfile>> {
    factorizations(n, true)?
        .into_iter()
        .map(|(a, b)| {
            let convolution = binary_convolution(&a, &b)?;
            let invariants = invariants_of(&convolution)?;
            Ok(FactorizationProfile {
                binary_a: binary_string(&a),
                binary_b: binary_string(&b),
                a,
                b,
                convolution,
                invariants,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digits::{mersenne, popcount};

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_height_examples() {
        assert_eq!(height(&big(7), &big(7)).unwrap(), 3);
        assert_eq!(height(&big(21), &big(13)).unwrap(), 2);
        assert_eq!(height(&big(3), &big(5)).unwrap(), 1);
        assert_eq!(height(&big(8), &big(9)).unwrap(), 1);
    }

    #[test]
    fn test_height_bounded_by_popcount() {
        for a in 1u64..64 {
            for b in 1u64..64 {
                let h = height(&big(a), &big(b)).unwrap();
                let bound = popcount(&big(a)).min(popcount(&big(b)));
                assert!(h >= 1 && h <= bound, "H({a}, {b}) = {h}, bound {bound}");
            }
        }
    }

    #[test]
    fn test_carry_count_mersenne() {
        for k in 2..10 {
            let m = mersenne(k).unwrap();
            assert_eq!(carry_count(&m, &m).unwrap(), (k - 1) * (k - 1));
        }
        assert_eq!(carry_count(&big(3), &big(5)).unwrap(), 0);
    }

    #[test]
    fn test_chain_length_always_one() {
        assert_eq!(chain_length(&big(7), &big(7)).unwrap(), 1);
        assert_eq!(chain_length(&big(3), &big(5)).unwrap(), 1);
        assert_eq!(chain_length(&big(1), &big(1)).unwrap(), 1);
        assert_eq!(chain_length(&big(21), &big(13)).unwrap(), 1);
    }

    #[test]
    fn test_chain_length_of_binary_convolution() {
        let conv = binary_convolution(&big(3), &big(5)).unwrap();
        assert_eq!(conv.normalize(CarrySchedule::Sequential).unwrap().rounds, 0);
        assert_eq!(chain_length_of(&conv).unwrap(), 1);
        assert_eq!(parallel_chain_length_of(&conv).unwrap(), 0);

        let conv = binary_convolution(&big(7), &big(7)).unwrap();
        assert_eq!(chain_length_of(&conv).unwrap(), 1);
        assert_eq!(parallel_chain_length_of(&conv).unwrap(), 3);
    }

    #[test]
    fn test_parallel_chain_length() {
        assert_eq!(parallel_chain_length(&big(7), &big(7)).unwrap(), 3);
        assert_eq!(parallel_chain_length(&big(3), &big(3)).unwrap(), 2);
        assert_eq!(parallel_chain_length(&big(3), &big(5)).unwrap(), 0);
        assert_eq!(parallel_chain_length(&big(21), &big(13)).unwrap(), 4);
    }

    #[test]
    fn test_bct_invariants_bundle() {
        let inv = bct_invariants(&big(7), &big(7)).unwrap();
        assert_eq!(
            inv,
            BctInvariants {
                height: 3,
                carry_count: 4,
                chain_length: 1
            }
        );
        assert!(!inv.is_orthogonal());
        assert!(bct_invariants(&big(4), &big(5)).unwrap().is_orthogonal());
    }

    #[test]
    fn test_self_height() {
        assert_eq!(self_height(&big(807_743)).unwrap(), 6);
        assert_eq!(self_height(&big(5)).unwrap(), 2);
        assert_eq!(self_height(&big(1)).unwrap(), 1);
    }

    #[test]
    fn test_analyze_factorizations_of_15() {
        let profiles = analyze_factorizations(&big(15)).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!((profiles[0].a.clone(), profiles[0].b.clone()), (big(1), big(15)));
        assert_eq!(profiles[1].binary_a, "11");
        assert_eq!(profiles[1].binary_b, "101");
        assert_eq!(profiles[1].convolution.coefficients(), &[1, 1, 1, 1]);
        assert!(profiles.iter().all(FactorizationProfile::is_orthogonal));
    }

    #[test]
    fn test_analyze_factorizations_of_21() {
        let profiles = analyze_factorizations(&big(21)).unwrap();
        let nontrivial = &profiles[1];
        assert_eq!((nontrivial.a.clone(), nontrivial.b.clone()), (big(3), big(7)));
        assert_eq!(nontrivial.invariants.height, 2);
        assert!(!nontrivial.is_orthogonal());
    }
}
