//! Binary digit model: digit sequences, popcount, bit positions and the
//! special forms (powers of two, Mersenne and Fermat numbers) that the
//! convolution invariants are studied on.

use std::collections::BTreeSet;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::{BctError, Result};

/// The five known Fermat primes F_0 through F_4.
pub const FERMAT_PRIMES: [u64; 5] = [3, 5, 17, 257, 65537];

/// Largest Fermat index `fermat` will materialize; F_24 already has 2^24 + 1 bits.
pub const MAX_FERMAT_INDEX: u32 = 24;

fn require_positive(n: &BigUint, operation: &'static str) -> Result<()> {
    if n.is_zero() {
        return Err(BctError::domain(operation, "n must be a positive integer"));
    }
    Ok(())
}

/// Iterate the bits of n from least significant upward, `n.bits()` of them.
fn lsb_first(n: &BigUint) -> impl Iterator<Item = bool> + '_ {
    let len = n.bits();
    n.iter_u64_digits()
        .flat_map(|limb| (0..64).map(move |i| (limb >> i) & 1 == 1))
        .take(len as usize)
}

/// Binary digits of n, least significant first.
///
/// `digit_sequence(13)` is `[1, 0, 1, 1]`.
pub fn digit_sequence(n: &BigUint) -> Result<Vec<u8>> {
    require_positive(n, "digit_sequence")?;
    Ok(lsb_first(n).map(u8::from).collect())
}

/// Number of 1-bits (Hamming weight). Zero has popcount 0.
pub fn popcount(n: &BigUint) -> u64 {
    n.iter_u64_digits().map(|limb| limb.count_ones() as u64).sum()
}

/// Indices of the 1-bits of n, counted from the least significant bit.
pub fn bit_positions(n: &BigUint) -> Result<BTreeSet<u64>> {
    require_positive(n, "bit_positions")?;
    Ok(lsb_first(n)
        .enumerate()
        .filter(|&(_, bit)| bit)
        .map(|(i, _)| i as u64)
        .collect())
}

/// Index of the highest set bit plus one.
pub fn bit_length(n: &BigUint) -> Result<u64> {
    require_positive(n, "bit_length")?;
    Ok(n.bits())
}

/// MSB-first binary rendering, e.g. `"1101"` for 13.
pub fn binary_string(n: &BigUint) -> String {
    n.to_str_radix(2)
}

/// True iff n has exactly one set bit.
pub fn is_power_of_two(n: &BigUint) -> bool {
    popcount(n) == 1
}

/// If n = 2^k - 1 for some k, return k.
///
/// Note that 1 = 2^1 - 1 is reported as `Some(1)`.
pub fn mersenne_exponent(n: &BigUint) -> Option<u64> {
    if n.is_zero() {
        return None;
    }
    let m = n + 1u32;
    if is_power_of_two(&m) {
        Some(m.bits() - 1)
    } else {
        None
    }
}

/// If n = 2^(2^k) + 1 for some k >= 0, return k.
pub fn fermat_index(n: &BigUint) -> Option<u64> {
    if *n <= BigUint::one() {
        return None;
    }
    let m = n - 1u32;
    if !is_power_of_two(&m) {
        return None;
    }
    // n - 1 = 2^exp; exp itself must be 2^k.
    let exp = m.bits() - 1;
    match exp {
        // n = 2: 2^0 + 1 is not of Fermat form.
        0 => None,
        // n = 3 = F_0. log2(exp) = 0 here, handled before the generic branch.
        1 => Some(0),
        _ if exp.is_power_of_two() => Some(exp.trailing_zeros() as u64),
        _ => None,
    }
}

/// Mersenne number M_k = 2^k - 1, for k >= 1.
pub fn mersenne(k: u64) -> Result<BigUint> {
    if k < 1 {
        return Err(BctError::domain("mersenne", "exponent k must be >= 1"));
    }
    Ok((BigUint::one() << k) - 1u32)
}

/// Fermat number F_k = 2^(2^k) + 1.
pub fn fermat(k: u32) -> Result<BigUint> {
    if k > MAX_FERMAT_INDEX {
        return Err(BctError::domain(
            "fermat",
            format!("index k must be <= {MAX_FERMAT_INDEX}, got {k}"),
        ));
    }
    Ok((BigUint::one() << (1u64 << k)) + 1u32)
}

/// Whether the 1-bit positions of n are symmetric about their midpoint.
///
/// The mirror of position p is `first + last - p`; every present position
/// must have its mirror present. Numbers with at most one set bit are
/// trivially symmetric.
pub fn is_centrally_symmetric(n: &BigUint) -> Result<bool> {
    let positions = bit_positions(n)?;
    if positions.len() <= 1 {
        return Ok(true);
    }
    let first = *positions.iter().next().unwrap_or(&0);
    let last = *positions.iter().next_back().unwrap_or(&0);
    let span = first + last;
    Ok(positions.iter().all(|&p| positions.contains(&(span - p))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_digit_sequence_lsb_first() {
        assert_eq!(digit_sequence(&big(13)).unwrap(), vec![1, 0, 1, 1]);
        assert_eq!(digit_sequence(&big(5)).unwrap(), vec![1, 0, 1]);
        assert_eq!(digit_sequence(&big(8)).unwrap(), vec![0, 0, 0, 1]);
        assert_eq!(digit_sequence(&big(1)).unwrap(), vec![1]);
    }

    #[test]
    fn test_digit_sequence_rejects_zero() {
        assert!(matches!(
            digit_sequence(&BigUint::zero()),
            Err(BctError::Domain { operation: "digit_sequence", .. })
        ));
        assert!(bit_positions(&BigUint::zero()).is_err());
        assert!(bit_length(&BigUint::zero()).is_err());
        assert!(is_centrally_symmetric(&BigUint::zero()).is_err());
    }

    #[test]
    fn test_popcount() {
        assert_eq!(popcount(&big(0)), 0);
        assert_eq!(popcount(&big(1)), 1);
        assert_eq!(popcount(&big(7)), 3);
        assert_eq!(popcount(&big(8)), 1);
        assert_eq!(popcount(&big(255)), 8);
        // Spans more than one limb.
        let wide = (BigUint::one() << 130u32) + (BigUint::one() << 64u32) + 1u32;
        assert_eq!(popcount(&wide), 3);
    }

    #[test]
    fn test_digit_sequence_multi_limb() {
        let n = (BigUint::one() << 70u32) + 1u32;
        let digits = digit_sequence(&n).unwrap();
        assert_eq!(digits.len(), 71);
        assert_eq!(digits[0], 1);
        assert_eq!(digits[70], 1);
        assert_eq!(digits.iter().map(|&d| d as u64).sum::<u64>(), 2);
    }

    #[test]
    fn test_bit_positions() {
        let expected: BTreeSet<u64> = [0, 2, 3].into_iter().collect();
        assert_eq!(bit_positions(&big(13)).unwrap(), expected);
        let expected: BTreeSet<u64> = [3].into_iter().collect();
        assert_eq!(bit_positions(&big(8)).unwrap(), expected);
    }

    #[test]
    fn test_bit_length_and_binary_string() {
        assert_eq!(bit_length(&big(13)).unwrap(), 4);
        assert_eq!(bit_length(&big(1)).unwrap(), 1);
        assert_eq!(binary_string(&big(5)), "101");
        assert_eq!(binary_string(&big(8)), "1000");
        assert_eq!(binary_string(&big(0)), "0");
    }

    #[test]
    fn test_power_of_two() {
        assert!(is_power_of_two(&big(1)));
        assert!(is_power_of_two(&big(64)));
        assert!(!is_power_of_two(&big(0)));
        assert!(!is_power_of_two(&big(12)));
    }

    #[test]
    fn test_mersenne_exponent() {
        assert_eq!(mersenne_exponent(&big(3)), Some(2));
        assert_eq!(mersenne_exponent(&big(7)), Some(3));
        assert_eq!(mersenne_exponent(&big(15)), Some(4));
        assert_eq!(mersenne_exponent(&big(31)), Some(5));
        assert_eq!(mersenne_exponent(&big(127)), Some(7));
        assert_eq!(mersenne_exponent(&big(5)), None);
        assert_eq!(mersenne_exponent(&big(30)), None);
        assert_eq!(mersenne_exponent(&big(0)), None);
    }

    #[test]
    fn test_fermat_index() {
        assert_eq!(fermat_index(&big(3)), Some(0));
        assert_eq!(fermat_index(&big(5)), Some(1));
        assert_eq!(fermat_index(&big(17)), Some(2));
        assert_eq!(fermat_index(&big(257)), Some(3));
        assert_eq!(fermat_index(&big(65537)), Some(4));
        assert_eq!(fermat_index(&big(4_294_967_297)), Some(5));
        // 2^3 + 1: exponent 3 is not a power of two.
        assert_eq!(fermat_index(&big(9)), None);
        assert_eq!(fermat_index(&big(7)), None);
        assert_eq!(fermat_index(&big(15)), None);
        assert_eq!(fermat_index(&big(2)), None);
        assert_eq!(fermat_index(&big(1)), None);
        assert_eq!(fermat_index(&big(0)), None);
    }

    #[test]
    fn test_generators() {
        assert_eq!(mersenne(5).unwrap(), big(31));
        assert!(mersenne(0).is_err());
        assert_eq!(fermat(0).unwrap(), big(3));
        assert_eq!(fermat(2).unwrap(), big(17));
        assert!(fermat(MAX_FERMAT_INDEX + 1).is_err());
        for (k, &f) in FERMAT_PRIMES.iter().enumerate() {
            assert_eq!(fermat(k as u32).unwrap(), big(f));
        }
    }

    #[test]
    fn test_central_symmetry() {
        assert!(is_centrally_symmetric(&big(7)).unwrap()); // 111
        assert!(is_centrally_symmetric(&big(5)).unwrap()); // 101
        assert!(is_centrally_symmetric(&big(9)).unwrap()); // 1001
        assert!(is_centrally_symmetric(&big(6)).unwrap()); // 110, center 1.5
        assert!(is_centrally_symmetric(&big(8)).unwrap()); // single bit
        assert!(!is_centrally_symmetric(&big(11)).unwrap()); // 1011
        assert!(!is_centrally_symmetric(&big(807_743)).unwrap());
    }
}
