//! Divisor arithmetic by trial division: factorization pairs, σ(n), the
//! abundance ratio and prime factorizations.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::{BctError, Result};

/// Operands wider than this are shifted down before converting to `f64`.
const F64_SAFE_BITS: u64 = 1000;

fn require_positive(n: &BigUint, operation: &'static str) -> Result<()> {
    if n.is_zero() {
        return Err(BctError::domain(operation, "n must be a positive integer"));
    }
    Ok(())
}

/// All pairs (a, b) with a <= b and a·b = n, ascending in a.
///
/// The trivial pair (1, n) is included only when `include_trivial` is set.
/// For n = 1 that pair is (1, 1); without it the list is empty.
pub fn factorizations(n: &BigUint, include_trivial: bool) -> Result<Vec<(BigUint, BigUint)>> {
    require_positive(n, "factorizations")?;
    let root = n.sqrt();
    let mut pairs = Vec::new();

    let mut a = if include_trivial {
        BigUint::one()
    } else {
        BigUint::from(2u32)
    };
    while a <= root {
        let (b, rem) = n.div_rem(&a);
        if rem.is_zero() {
            pairs.push((a.clone(), b));
        }
        a += 1u32;
    }
    Ok(pairs)
}

/// σ(n), the sum of all positive divisors of n.
pub fn sigma(n: &BigUint) -> Result<BigUint> {
    require_positive(n, "sigma")?;
    let root = n.sqrt();
    let mut total = BigUint::zero();

    let mut d = BigUint::one();
    while d <= root {
        let (q, rem) = n.div_rem(&d);
        if rem.is_zero() {
            if q != d {
                total += &q;
            }
            total += &d;
        }
        d += 1u32;
    }
    Ok(total)
}

/// σ(n)/n as a float. Perfect numbers give exactly 2.0.
pub fn abundance_ratio(n: &BigUint) -> Result<f64> {
    let s = sigma(n)?;
    Ok(ratio(&s, n))
}

/// num/den as `f64`, both scaled by the same power of two when den is wide.
fn ratio(num: &BigUint, den: &BigUint) -> f64 {
    let shift = den.bits().saturating_sub(F64_SAFE_BITS);
    let num = (num >> shift).to_f64().unwrap_or(f64::INFINITY);
    let den = (den >> shift).to_f64().unwrap_or(f64::INFINITY);
    num / den
}

/// Prime factorization as ascending (prime, exponent) pairs. 1 has none.
pub fn prime_factorization(n: &BigUint) -> Result<Vec<(BigUint, u32)>> {
    require_positive(n, "prime_factorization")?;
    let mut factors = Vec::new();
    let mut remaining = n.clone();

    let mut twos = 0u32;
    while remaining.is_even() && !remaining.is_zero() {
        remaining >>= 1u32;
        twos += 1;
    }
    if twos > 0 {
        factors.push((BigUint::from(2u32), twos));
    }

    let mut divisor = BigUint::from(3u32);
    while &divisor * &divisor <= remaining {
        let mut exp = 0u32;
        loop {
            let (q, rem) = remaining.div_rem(&divisor);
            if !rem.is_zero() {
                break;
            }
            remaining = q;
            exp += 1;
        }
        if exp > 0 {
            factors.push((divisor.clone(), exp));
        }
        divisor += 2u32;
    }

    if remaining > BigUint::one() {
        factors.push((remaining, 1));
    }
    Ok(factors)
}

/// Deterministic primality by trial division.
pub fn is_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    if n.is_even() {
        return *n == two;
    }
    let mut d = BigUint::from(3u32);
    while &d * &d <= *n {
        if (n % &d).is_zero() {
            return false;
        }
        d += 2u32;
    }
    true
}

/// Primes below `limit` by the Sieve of Eratosthenes.
pub fn primes_below(limit: u64) -> Vec<u64> {
    if limit < 3 {
        return Vec::new();
    }
    let size = limit as usize;
    let mut composite = vec![false; size];
    let mut i = 2usize;
    while i * i < size {
        if !composite[i] {
            for j in (i * i..size).step_by(i) {
                composite[j] = true;
            }
        }
        i += 1;
    }
    (2..size)
        .filter(|&k| !composite[k])
        .map(|k| k as u64)
        .collect()
}
