//! Theorem 8 and its corollaries: even perfect numbers are BCT-perfect and
//! are exactly the binary patterns 1^p 0^(p−1) with M_p prime.

use bct_core::{
    abundance_ratio, binary_string, height, is_bct_perfect, is_prime, mersenne, sigma, Result,
};
use num_bigint::BigUint;
use num_traits::One;
use serde::Serialize;

use crate::config::VerifyConfig;
use crate::report::Summary;

/// 2^(p−1) · M_p when M_p = 2^p − 1 is prime, otherwise `None`.
pub fn even_perfect_number(p: u64) -> Option<BigUint> {
    let m = mersenne(p).ok()?;
    if !is_prime(&m) {
        return None;
    }
    Some(binary_pattern(p))
}

/// The integer written as p ones followed by p − 1 zeros.
fn binary_pattern(p: u64) -> BigUint {
    let ones = (BigUint::one() << p) - 1u32;
    ones << p.saturating_sub(1)
}

fn expected_pattern(p: u64) -> String {
    "1".repeat(p as usize) + &"0".repeat(p.saturating_sub(1) as usize)
}

fn is_perfect(n: &BigUint) -> Result<bool> {
    Ok(sigma(n)? == n << 1u32)
}

#[derive(Debug, Clone, Serialize)]
pub struct EvenPerfectRow {
    pub p: u64,
    pub perfect: String,
    pub binary: String,
    /// H(2^(p−1), M_p).
    pub height: u64,
    pub abundance_ratio: f64,
    pub bct_perfect: bool,
}

#[derive(Debug, Serialize)]
pub struct EvenPerfectReport {
    pub summary: Summary,
    pub rows: Vec<EvenPerfectRow>,
}

/// Theorem 8: for each Mersenne prime exponent p, P = 2^(p−1)·M_p has
/// H(2^(p−1), M_p) = 1, bin(P) = 1^p 0^(p−1), σ(P)/P = 2 and is BCT-perfect.
pub fn verify_even_perfect(exponents: &[u64]) -> Result<EvenPerfectReport> {
    let mut summary = Summary::new(
        "Theorem 8",
        "even perfect P: H = 1, bin(P) = 1^p 0^(p−1), σ(P)/P = 2, BCT-perfect",
        format!("p ∈ {exponents:?}"),
    );
    let mut rows = Vec::new();

    for &p in exponents {
        let Some(perfect) = even_perfect_number(p) else {
            log::debug!("Theorem 8: M_{p} is not prime");
            summary.check(false);
            continue;
        };
        let power = BigUint::one() << (p - 1);
        let m = mersenne(p)?;
        let h = height(&power, &m)?;
        let binary = binary_string(&perfect);
        let bct_perfect = is_bct_perfect(&perfect)?;

        summary.check(
            h == 1 && binary == expected_pattern(p) && is_perfect(&perfect)? && bct_perfect,
        );
        rows.push(EvenPerfectRow {
            p,
            perfect: perfect.to_string(),
            binary,
            height: h,
            abundance_ratio: abundance_ratio(&perfect)?,
            bct_perfect,
        });
    }

    Ok(EvenPerfectReport {
        summary: summary.finish(),
        rows,
    })
}

/// Lemma 2: H(2^a, m) = 1, since a single set bit only shifts the other operand.
pub fn verify_power_of_two_orthogonality(max_a: u32, max_m: u64) -> Result<Summary> {
    let mut summary = Summary::new(
        "Lemma 2",
        "H(2^a, m) = 1",
        format!("a ∈ [1, {max_a}], m ∈ [1, {max_m}]"),
    );
    for a in 1..=max_a {
        let power = BigUint::one() << a;
        for m in 1..=max_m {
            summary.check(height(&power, &BigUint::from(m))? == 1);
        }
    }
    Ok(summary.finish())
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationRow {
    pub p: u64,
    pub pattern: String,
    pub mersenne_prime: bool,
    pub perfect: bool,
}

#[derive(Debug, Serialize)]
pub struct BinaryGenerationReport {
    pub summary: Summary,
    pub rows: Vec<GenerationRow>,
}

/// Both directions of the binary generation corollary: every known even
/// perfect number has the pattern 1^p 0^(p−1), and for p ∈ [2, max_p] the
/// pattern is perfect exactly when M_p is prime.
pub fn verify_binary_generation(exponents: &[u64], max_p: u64) -> Result<BinaryGenerationReport> {
    let mut summary = Summary::new(
        "Binary generation",
        "1^p 0^(p−1) is perfect ⟺ M_p is prime",
        format!("p ∈ [2, {max_p}]"),
    );

    for &p in exponents {
        let matches = even_perfect_number(p)
            .map(|n| binary_string(&n) == expected_pattern(p))
            .unwrap_or(false);
        summary.check(matches);
    }

    let mut rows = Vec::new();
    for p in 2..=max_p {
        let n = binary_pattern(p);
        let mersenne_prime = is_prime(&mersenne(p)?);
        let perfect = is_perfect(&n)?;
        if !summary.check(perfect == mersenne_prime) {
            log::debug!("binary generation: p = {p}, perfect = {perfect}, M_p prime = {mersenne_prime}");
        }
        rows.push(GenerationRow {
            p,
            pattern: binary_string(&n),
            mersenne_prime,
            perfect,
        });
    }

    Ok(BinaryGenerationReport {
        summary: summary.finish(),
        rows,
    })
}

#[derive(Debug, Serialize)]
pub struct PerfectReport {
    pub even_perfect: EvenPerfectReport,
    pub power_of_two: Summary,
    pub generation: BinaryGenerationReport,
}

impl PerfectReport {
    pub fn summaries(&self) -> Vec<&Summary> {
        vec![
            &self.even_perfect.summary,
            &self.power_of_two,
            &self.generation.summary,
        ]
    }

    pub fn print(&self) {
        println!("\n=== Theorem 8: Even Perfect Numbers ===");
        println!("{:>3} {:>14} {:>3} {:>8} {:>6}  {}", "p", "P", "H", "σ(P)/P", "BCT", "binary");
        println!("{}", "-".repeat(72));
        for row in &self.even_perfect.rows {
            println!(
                "{:>3} {:>14} {:>3} {:>8.4} {:>6}  {}",
                row.p,
                row.perfect,
                row.height,
                row.abundance_ratio,
                if row.bct_perfect { "yes" } else { "no" },
                row.binary
            );
        }
        println!("{}", self.even_perfect.summary);
        println!("{}", self.power_of_two);
        println!("{}", self.generation.summary);
        let perfect_p: Vec<u64> = self
            .generation
            .rows
            .iter()
            .filter(|r| r.perfect)
            .map(|r| r.p)
            .collect();
        println!("  patterns that are perfect: p ∈ {perfect_p:?}");
    }
}

pub fn run(config: &VerifyConfig) -> Result<PerfectReport> {
    log::debug!(
        "perfect: exponents {:?}, binary generation p ≤ {}",
        config.perfect_exponents,
        config.binary_generation_max_p
    );
    Ok(PerfectReport {
        even_perfect: verify_even_perfect(&config.perfect_exponents)?,
        power_of_two: verify_power_of_two_orthogonality(
            config.power_of_two_max_a,
            config.power_of_two_max_m,
        )?,
        generation: verify_binary_generation(
            &config.perfect_exponents,
            config.binary_generation_max_p,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_perfect_number() {
        assert_eq!(even_perfect_number(2), Some(BigUint::from(6u32)));
        assert_eq!(even_perfect_number(3), Some(BigUint::from(28u32)));
        assert_eq!(even_perfect_number(5), Some(BigUint::from(496u32)));
        assert_eq!(even_perfect_number(7), Some(BigUint::from(8128u32)));
        assert_eq!(even_perfect_number(11), None);
        assert_eq!(even_perfect_number(4), None);
        assert_eq!(even_perfect_number(0), None);
    }

    #[test]
    fn test_expected_pattern() {
        assert_eq!(expected_pattern(3), "11100");
        assert_eq!(binary_string(&binary_pattern(3)), "11100");
        assert_eq!(binary_pattern(2), BigUint::from(6u32));
    }

    #[test]
    fn test_even_perfect_small_exponents() {
        let r = verify_even_perfect(&[2, 3, 5, 7, 13]).unwrap();
        assert!(r.summary.verified);
        assert!(r.rows.iter().all(|row| row.abundance_ratio == 2.0));
    }

    #[test]
    fn test_non_mersenne_exponent_fails_theorem_8() {
        let r = verify_even_perfect(&[2, 11]).unwrap();
        assert!(!r.summary.verified);
        assert_eq!(r.summary.violations, 1);
    }

    #[test]
    fn test_power_of_two() {
        let s = verify_power_of_two_orthogonality(10, 100).unwrap();
        assert!(s.verified);
        assert_eq!(s.checked, 1000);
    }

    #[test]
    fn test_binary_generation() {
        let r = verify_binary_generation(&[2, 3, 5, 7], 12).unwrap();
        assert!(r.summary.verified);
        let perfect: Vec<u64> = r.rows.iter().filter(|row| row.perfect).map(|row| row.p).collect();
        assert_eq!(perfect, vec![2, 3, 5, 7]);
    }
}
