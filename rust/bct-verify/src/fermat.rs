//! Theorem 6, Lemma 4 and Theorem 9: Fermat numbers as minimal resonators.

use bct_core::{fermat, fermat_index, height, is_prime, popcount, primes_below, Result};
use num_bigint::BigUint;
use serde::Serialize;

use crate::config::VerifyConfig;
use crate::report::Summary;

/// Theorem 6: H(F_k, F_k) = 2 and pop(F_k) = 2 for k ∈ [0, max_k].
pub fn verify_fermat_resonance(max_k: u32) -> Result<Summary> {
    let mut summary = Summary::new(
        "Theorem 6",
        "H(F_k, F_k) = 2 = pop(F_k)",
        format!("k ∈ [0, {max_k}]"),
    );
    for k in 0..=max_k {
        let f = fermat(k)?;
        let h = height(&f, &f)?;
        if !summary.check(h == 2 && popcount(&f) == 2) {
            log::debug!("F_{k}: H = {h}");
        }
    }
    Ok(summary.finish())
}

#[derive(Debug, Serialize)]
pub struct SparsePrimeReport {
    pub summary: Summary,
    /// Odd primes below the limit with exactly two set bits.
    pub sparse_primes: Vec<u64>,
}

/// Lemma 4: an odd prime has popcount 2 exactly when it is a Fermat prime.
///
/// Forward direction over every odd prime below `limit`; converse over the
/// Fermat numbers below `limit` that are prime.
pub fn verify_sparse_primes(limit: u64) -> Result<SparsePrimeReport> {
    let mut summary = Summary::new(
        "Lemma 4",
        "odd prime p: pop(p) = 2 ⟺ p is a Fermat prime",
        format!("p < {limit}"),
    );

    let sparse_primes: Vec<u64> = primes_below(limit)
        .into_iter()
        .filter(|&p| p % 2 == 1 && p.count_ones() == 2)
        .collect();
    for &p in &sparse_primes {
        if !summary.check(fermat_index(&BigUint::from(p)).is_some()) {
            log::debug!("Lemma 4: {p} has two set bits but is not a Fermat prime");
        }
    }

    let limit_big = BigUint::from(limit);
    for k in 0..=bct_core::digits::MAX_FERMAT_INDEX {
        let f = fermat(k)?;
        if f >= limit_big {
            break;
        }
        if is_prime(&f) {
            summary.check(popcount(&f) == 2);
        }
    }

    Ok(SparsePrimeReport {
        summary: summary.finish(),
        sparse_primes,
    })
}

/// Theorem 9: distinct Fermat numbers are pairwise orthogonal.
pub fn verify_pairwise_orthogonality(max_k: u32) -> Result<Summary> {
    let mut summary = Summary::new(
        "Theorem 9",
        "H(F_i, F_j) = 1 for i ≠ j",
        format!("i, j ∈ [0, {max_k}]"),
    );
    let numbers = (0..=max_k).map(fermat).collect::<Result<Vec<_>>>()?;
    for (i, fi) in numbers.iter().enumerate() {
        for fj in &numbers[i + 1..] {
            summary.check(height(fi, fj)? == 1);
        }
    }
    Ok(summary.finish())
}

#[derive(Debug, Serialize)]
pub struct FermatReport {
    pub resonance: Summary,
    pub sparse_primes: SparsePrimeReport,
    pub orthogonality: Summary,
}

impl FermatReport {
    pub fn summaries(&self) -> Vec<&Summary> {
        vec![
            &self.resonance,
            &self.sparse_primes.summary,
            &self.orthogonality,
        ]
    }

    pub fn print(&self) {
        println!("\n=== Theorem 6, Lemma 4, Theorem 9: Fermat Numbers ===");
        println!("{}", self.resonance);
        println!("{}", self.sparse_primes.summary);
        println!("  odd primes with popcount 2: {:?}", self.sparse_primes.sparse_primes);
        println!("{}", self.orthogonality);
    }
}

pub fn run(config: &VerifyConfig) -> Result<FermatReport> {
    log::debug!(
        "fermat: k ≤ {}, primes < {}",
        config.max_fermat_k,
        config.sparse_prime_limit
    );
    Ok(FermatReport {
        resonance: verify_fermat_resonance(config.max_fermat_k)?,
        sparse_primes: verify_sparse_primes(config.sparse_prime_limit)?,
        orthogonality: verify_pairwise_orthogonality(config.max_fermat_k)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resonance() {
        let s = verify_fermat_resonance(4).unwrap();
        assert!(s.verified);
        assert_eq!(s.checked, 5);
    }

    #[test]
    fn test_sparse_primes_below_100000() {
        let r = verify_sparse_primes(100_000).unwrap();
        assert!(r.summary.verified);
        assert_eq!(r.sparse_primes, vec![3, 5, 17, 257, 65_537]);
        // Five forward checks plus the five Fermat primes below the limit.
        assert_eq!(r.summary.checked, 10);
    }

    #[test]
    fn test_pairwise_orthogonality() {
        let s = verify_pairwise_orthogonality(4).unwrap();
        assert!(s.verified);
        assert_eq!(s.checked, 10);
    }
}
