//! Theorems 1 to 3 and Lemma 1: popcount bounds on the height, the
//! counting lower bound, and the equality case.

use std::collections::BTreeMap;

use bct_core::{
    bit_length, bit_positions, factorizations, height, is_centrally_symmetric, popcount,
    self_height, Result,
};
use num_bigint::BigUint;
use serde::Serialize;

use crate::config::VerifyConfig;
use crate::report::Summary;

/// The integer the paper uses to show the self-height gap can reach 6.
pub const PAPER_EXAMPLE: u64 = 807_743;

/// Lower bound ⌈w² / (2L − 1)⌉ on H(n, n) for w set bits in L positions.
pub fn pigeonhole_bound(w: u64, l: u64) -> u64 {
    if l == 0 {
        return 1;
    }
    (w * w).div_ceil(2 * l - 1)
}

/// Upper bound on pop(n) − H(n, n) implied by [`pigeonhole_bound`].
pub fn gap_upper_bound(w: u64, l: u64) -> u64 {
    w.saturating_sub(pigeonhole_bound(w, l))
}

#[derive(Debug, Serialize)]
pub struct UpperBoundReport {
    pub summary: Summary,
    /// Pairs where H reaches min(pop(a), pop(b)).
    pub tight_cases: u64,
    pub max_height: u64,
}

/// Theorem 1 over every non-trivial factorization of n ∈ [4, max_n].
pub fn verify_upper_bound(max_n: u64) -> Result<UpperBoundReport> {
    let mut summary = Summary::new(
        "Theorem 1",
        "H(a, b) ≤ min(pop(a), pop(b))",
        format!("n ∈ [4, {max_n}]"),
    );
    let mut tight_cases = 0;
    let mut max_height = 0;

    for n in 4..=max_n {
        for (a, b) in factorizations(&BigUint::from(n), false)? {
            let h = height(&a, &b)?;
            let bound = popcount(&a).min(popcount(&b));
            if !summary.check(h <= bound) {
                log::debug!("Theorem 1 violated at {a} × {b}: H = {h}, bound {bound}");
            }
            if h == bound {
                tight_cases += 1;
            }
            max_height = max_height.max(h);
        }
    }

    Ok(UpperBoundReport {
        summary: summary.finish(),
        tight_cases,
        max_height,
    })
}

#[derive(Debug, Serialize)]
pub struct SelfBoundReport {
    pub summary: Summary,
    /// n with H(n, n) = pop(n).
    pub equality_cases: u64,
}

/// Theorem 2: H(n, n) ≤ pop(n) for n ∈ [2, max_n].
pub fn verify_self_bound(max_n: u64) -> Result<SelfBoundReport> {
    let mut summary = Summary::new("Theorem 2", "H(n, n) ≤ pop(n)", format!("n ∈ [2, {max_n}]"));
    let mut equality_cases = 0;

    for n in 2..=max_n {
        let big = BigUint::from(n);
        let h = self_height(&big)?;
        let w = popcount(&big);
        summary.check(h <= w);
        if h == w {
            equality_cases += 1;
        }
    }

    Ok(SelfBoundReport {
        summary: summary.finish(),
        equality_cases,
    })
}

/// Lemma 1: H(n, n) ≥ ⌈w² / (2L − 1)⌉ for n ∈ [2, max_n], the sumset
/// counting bound applied to the bit positions of n.
pub fn verify_counting_lemma(max_n: u64) -> Result<Summary> {
    let mut summary = Summary::new(
        "Lemma 1",
        "H(n, n) ≥ ⌈w² / (2L − 1)⌉",
        format!("n ∈ [2, {max_n}]"),
    );
    for n in 2..=max_n {
        let big = BigUint::from(n);
        let w = popcount(&big);
        let l = bit_length(&big)?;
        let h = self_height(&big)?;
        if !summary.check(h >= pigeonhole_bound(w, l)) {
            log::debug!("Lemma 1 violated at n = {n}: H = {h}, w = {w}, L = {l}");
        }
    }
    Ok(summary.finish())
}

#[derive(Debug, Serialize)]
pub struct EqualityReport {
    pub summary: Summary,
    pub equality_cases: u64,
    pub pigeonhole_violations: u64,
    pub gap_bound_violations: u64,
    pub max_gap: u64,
    pub max_gap_n: Option<u64>,
    /// gap = pop(n) − H(n, n) → number of n with that gap.
    pub gap_distribution: BTreeMap<u64, u64>,
}

/// Theorem 3: H(n, n) = pop(n) exactly when the set bits of n are centrally
/// symmetric. An n passes only if it also respects the pigeonhole lower bound
/// and the gap bound.
pub fn verify_equality_condition(max_n: u64) -> Result<EqualityReport> {
    let mut summary = Summary::new(
        "Theorem 3",
        "H(n, n) = pop(n) ⟺ bits centrally symmetric",
        format!("n ∈ [2, {max_n}]"),
    );
    let mut equality_cases = 0;
    let mut pigeonhole_violations = 0;
    let mut gap_bound_violations = 0;
    let mut max_gap = 0;
    let mut max_gap_n = None;
    let mut gap_distribution = BTreeMap::new();

    for n in 2..=max_n {
        let big = BigUint::from(n);
        let h = self_height(&big)?;
        let w = popcount(&big);
        let l = bit_length(&big)?;
        let equality = h == w;

        let biconditional = equality == is_centrally_symmetric(&big)?;
        let above_pigeonhole = h >= pigeonhole_bound(w, l);
        let gap = w.saturating_sub(h);
        let within_gap_bound = gap <= gap_upper_bound(w, l);

        if !summary.check(biconditional && above_pigeonhole && within_gap_bound) {
            log::debug!(
                "Theorem 3 fails at n = {n}: biconditional {biconditional}, \
                 pigeonhole {above_pigeonhole}, gap bound {within_gap_bound}"
            );
        }
        if equality {
            equality_cases += 1;
        }
        if !above_pigeonhole {
            pigeonhole_violations += 1;
        }
        if !within_gap_bound {
            gap_bound_violations += 1;
        }
        *gap_distribution.entry(gap).or_insert(0) += 1;
        if gap > max_gap {
            max_gap = gap;
            max_gap_n = Some(n);
        }
        if n % 100_000 == 0 {
            log::debug!("Theorem 3: checked n ≤ {n}");
        }
    }

    Ok(EqualityReport {
        summary: summary.finish(),
        equality_cases,
        pigeonhole_violations,
        gap_bound_violations,
        max_gap,
        max_gap_n,
        gap_distribution,
    })
}

#[derive(Debug, Serialize)]
pub struct PaperExampleReport {
    pub summary: Summary,
    pub n: u64,
    pub popcount: u64,
    pub bit_length: u64,
    pub self_height: u64,
    pub gap: u64,
    pub positions: Vec<u64>,
    pub symmetric: bool,
}

/// The worked example 807743: w = 12, L = 20, H = 6, gap 6, not symmetric.
pub fn paper_example_807743() -> Result<PaperExampleReport> {
    let n = BigUint::from(PAPER_EXAMPLE);
    let positions: Vec<u64> = bit_positions(&n)?.into_iter().collect();
    let w = popcount(&n);
    let l = bit_length(&n)?;
    let h = self_height(&n)?;
    let symmetric = is_centrally_symmetric(&n)?;

    let mut summary = Summary::new(
        "Example 807743",
        "w = 12, L = 20, H = 6, gap = 6, not symmetric",
        "n = 807743",
    );
    summary.check(w == 12);
    summary.check(l == 20);
    summary.check(h == 6);
    summary.check(w.saturating_sub(h) == 6);
    summary.check(positions == [0, 1, 2, 3, 4, 5, 8, 9, 12, 14, 18, 19]);
    summary.check(!symmetric);

    Ok(PaperExampleReport {
        summary: summary.finish(),
        n: PAPER_EXAMPLE,
        popcount: w,
        bit_length: l,
        self_height: h,
        gap: w.saturating_sub(h),
        positions,
        symmetric,
    })
}

#[derive(Debug, Serialize)]
pub struct BoundsReport {
    pub upper_bound: UpperBoundReport,
    pub self_bound: SelfBoundReport,
    pub counting_lemma: Summary,
    pub equality: EqualityReport,
    pub example_807743: PaperExampleReport,
}

impl BoundsReport {
    pub fn summaries(&self) -> Vec<&Summary> {
        vec![
            &self.upper_bound.summary,
            &self.self_bound.summary,
            &self.counting_lemma,
            &self.equality.summary,
            &self.example_807743.summary,
        ]
    }

    pub fn print(&self) {
        println!("\n=== Theorems 1-3: Height Bounds ===");
        println!("{}", self.upper_bound.summary);
        println!(
            "  tight cases H = min(pop): {}, max H: {}",
            self.upper_bound.tight_cases, self.upper_bound.max_height
        );
        println!("{}", self.self_bound.summary);
        println!("  equality cases H = pop: {}", self.self_bound.equality_cases);
        println!("{}", self.counting_lemma);

        let eq = &self.equality;
        println!("{}", eq.summary);
        println!(
            "  pigeonhole violations: {}, gap bound violations: {}",
            eq.pigeonhole_violations, eq.gap_bound_violations
        );
        match eq.max_gap_n {
            Some(n) => println!("  max gap: {} (first at n = {n})", eq.max_gap),
            None => println!("  max gap: 0"),
        }
        println!("  {:>5} {:>10}", "gap", "count");
        for (gap, count) in &eq.gap_distribution {
            println!("  {gap:>5} {count:>10}");
        }

        let ex = &self.example_807743;
        println!("{}", ex.summary);
        println!(
            "  S = {:?}, w = {}, L = {}, H = {}, gap = {}",
            ex.positions, ex.popcount, ex.bit_length, ex.self_height, ex.gap
        );
    }
}

pub fn run(config: &VerifyConfig) -> Result<BoundsReport> {
    log::debug!("bounds: n ≤ {} / {}", config.bound_max_n, config.equality_max_n);
    Ok(BoundsReport {
        upper_bound: verify_upper_bound(config.bound_max_n)?,
        self_bound: verify_self_bound(config.bound_max_n)?,
        counting_lemma: verify_counting_lemma(config.bound_max_n)?,
        equality: verify_equality_condition(config.equality_max_n)?,
        example_807743: paper_example_807743()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pigeonhole_bound() {
        // 807743: w = 12, L = 20 → ⌈144 / 39⌉ = 4.
        assert_eq!(pigeonhole_bound(12, 20), 4);
        assert_eq!(gap_upper_bound(12, 20), 8);
        assert_eq!(pigeonhole_bound(3, 3), 2);
        assert_eq!(pigeonhole_bound(1, 1), 1);
        assert_eq!(pigeonhole_bound(0, 0), 1);
    }

    #[test]
    fn test_upper_bound_small_range() {
        let r = verify_upper_bound(100).unwrap();
        assert!(r.summary.verified);
        assert!(r.tight_cases > 0);
        assert!(r.max_height >= 2);
    }

    #[test]
    fn test_equality_condition_to_10000() {
        let r = verify_equality_condition(10_000).unwrap();
        assert!(r.summary.verified);
        assert_eq!(r.summary.checked, 9_999);
        assert_eq!(r.equality_cases, 662);
        assert_eq!(r.max_gap, 4);
        assert_eq!(r.max_gap_n, Some(9_927));
        assert_eq!(r.gap_distribution.values().sum::<u64>(), 9_999);
    }

    #[test]
    fn test_counting_lemma() {
        let s = verify_counting_lemma(2_000).unwrap();
        assert!(s.verified, "{s}");
        assert_eq!(s.checked, 1_999);
    }

    #[test]
    fn test_equality_checks_once_per_n() {
        let r = verify_equality_condition(500).unwrap();
        assert_eq!(r.summary.checked, 499);
        assert!(r.summary.violations <= r.summary.checked);
        assert_eq!(r.pigeonhole_violations, 0);
        assert_eq!(r.gap_bound_violations, 0);
        assert!(r.summary.verified);
    }

    #[test]
    fn test_paper_example() {
        let r = paper_example_807743().unwrap();
        assert!(r.summary.verified);
        assert_eq!(r.summary.checked, 6);
        assert_eq!(r.gap, 6);
    }
}
