//! Orthogonality and BCT-perfectness.

use num_bigint::BigUint;
use num_traits::One;

use crate::divisors::factorizations;
use crate::error::{BctError, Result};
use crate::invariants::height;

/// a ⊥ b: no position of the convolution receives more than one product.
pub fn is_orthogonal(a: &BigUint, b: &BigUint) -> Result<bool> {
    Ok(height(a, b)? == 1)
}

/// Whether every non-trivial factorization of n is orthogonal.
///
/// Primes have no non-trivial factorization and count as BCT-perfect.
/// n must be greater than 1.
pub fn is_bct_perfect(n: &BigUint) -> Result<bool> {
    if *n <= BigUint::one() {
        return Err(BctError::domain("is_bct_perfect", "n must be greater than 1"));
    }
    for (a, b) in factorizations(n, false)? {
        if !is_orthogonal(&a, &b)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_orthogonality() {
        assert!(is_orthogonal(&big(3), &big(5)).unwrap());
        assert!(is_orthogonal(&big(8), &big(13)).unwrap());
        assert!(!is_orthogonal(&big(3), &big(7)).unwrap());
        assert!(!is_orthogonal(&big(7), &big(7)).unwrap());
        assert!(is_orthogonal(&BigUint::zero(), &big(1)).is_err());
    }

    #[test]
    fn test_bct_perfect_examples() {
        assert!(is_bct_perfect(&big(15)).unwrap());
        assert!(!is_bct_perfect(&big(21)).unwrap());
        assert!(is_bct_perfect(&big(51)).unwrap());
        assert!(is_bct_perfect(&big(85)).unwrap());
        assert!(!is_bct_perfect(&big(35)).unwrap());
    }

    #[test]
    fn test_primes_are_bct_perfect() {
        for p in [2u64, 3, 5, 7, 11, 13, 97, 65_537] {
            assert!(is_bct_perfect(&big(p)).unwrap(), "{p}");
        }
    }

    #[test]
    fn test_even_perfect_numbers() {
        for n in [6u64, 28, 496, 8128] {
            assert!(is_bct_perfect(&big(n)).unwrap(), "{n}");
        }
    }

    #[test]
    fn test_small_bct_perfect_composites() {
        let found: Vec<u64> = (4u64..31)
            .filter(|&n| !crate::divisors::is_prime(&big(n)))
            .filter(|&n| is_bct_perfect(&big(n)).unwrap())
            .collect();
        assert_eq!(found, vec![4, 6, 8, 10, 12, 14, 15, 16, 20, 22, 24, 26, 27, 28, 30]);
    }

    #[test]
    fn test_domain() {
        assert!(is_bct_perfect(&big(1)).is_err());
        assert!(is_bct_perfect(&BigUint::zero()).is_err());
    }
}
