//! Theorems 10 to 13 and Conjecture 1: the structure and abundance of
//! BCT-perfect odd composites, and why neither they nor odd squarefree
//! semiprimes can be perfect.

use std::fmt;

use bct_core::{
    abundance_ratio, is_bct_perfect, is_prime, prime_factorization, primes_below, sigma, Result,
};
use num_bigint::BigUint;
use serde::Serialize;

use crate::config::VerifyConfig;
use crate::report::Summary;

/// Range over which the published structure table was computed.
pub const TABLE1_LIMIT: u64 = 100_000;

/// Number of BCT-perfect odd composites below [`TABLE1_LIMIT`].
pub const TABLE1_TOTAL: u64 = 522;

/// σ(n)/n bound of Theorem 11(b).
pub const ABUNDANCE_BOUND: f64 = 1.71;

/// σ(pq)/pq ≤ 8/5 for odd primes p < q, as (numerator, denominator).
pub const SEMIPRIME_BOUND: (u32, u32) = (8, 5);

/// Prime-exponent shape of an odd composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Structure {
    #[serde(rename = "p×q")]
    PQ,
    #[serde(rename = "p×q×r")]
    PQR,
    #[serde(rename = "p²×q")]
    P2Q,
    #[serde(rename = "p³")]
    P3,
    #[serde(rename = "other")]
    Other,
}

impl Structure {
    pub const ALL: [Structure; 5] = [
        Structure::PQ,
        Structure::PQR,
        Structure::P2Q,
        Structure::P3,
        Structure::Other,
    ];

    /// (share in percent, maximum σ(n)/n) from the published table.
    pub fn published(self) -> (f64, f64) {
        match self {
            Structure::PQ => (93.30, 1.6000),
            Structure::PQR => (3.45, 1.6941),
            Structure::P2Q => (1.34, 1.6508),
            Structure::P3 => (0.57, 1.4815),
            Structure::Other => (1.34, 1.7007),
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Structure::PQ => "p×q",
            Structure::PQR => "p×q×r",
            Structure::P2Q => "p²×q",
            Structure::P3 => "p³",
            Structure::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// Classify n by the exponents of its prime factorization.
pub fn classify_structure(n: &BigUint) -> Result<Structure> {
    let mut exponents: Vec<u32> = prime_factorization(n)?.into_iter().map(|(_, e)| e).collect();
    exponents.sort_unstable();
    Ok(match exponents.as_slice() {
        [3] => Structure::P3,
        [1, 1] => Structure::PQ,
        [1, 2] => Structure::P2Q,
        [1, 1, 1] => Structure::PQR,
        _ => Structure::Other,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct OddPerfect {
    pub n: u64,
    pub abundance_ratio: f64,
    pub structure: Structure,
}

/// Every BCT-perfect odd composite below `limit`, ascending.
pub fn find_bct_perfect_odds(limit: u64) -> Result<Vec<OddPerfect>> {
    let mut found = Vec::new();
    let progress_step = (limit / 10).max(1);
    let mut n = 9;
    while n < limit {
        let big = BigUint::from(n);
        if !is_prime(&big) && is_bct_perfect(&big)? {
            found.push(OddPerfect {
                n,
                abundance_ratio: abundance_ratio(&big)?,
                structure: classify_structure(&big)?,
            });
        }
        if n % progress_step < 2 {
            log::debug!("BCT-perfect odd search: {n}/{limit}, {} found", found.len());
        }
        n += 2;
    }
    Ok(found)
}

fn max_by_ratio<'a>(found: impl IntoIterator<Item = &'a OddPerfect>) -> Option<&'a OddPerfect> {
    found
        .into_iter()
        .max_by(|a, b| a.abundance_ratio.total_cmp(&b.abundance_ratio))
}

#[derive(Debug, Clone, Serialize)]
pub struct StructureRow {
    pub structure: Structure,
    pub count: u64,
    pub percent: f64,
    pub max_ratio: f64,
    pub max_n: Option<u64>,
    pub example: Option<u64>,
    pub published_percent: f64,
    pub published_max_ratio: f64,
}

#[derive(Debug, Serialize)]
pub struct StructureReport {
    pub summary: Summary,
    pub total: u64,
    /// Whether shares were compared too (only meaningful at the published range).
    pub compared_shares: bool,
    pub rows: Vec<StructureRow>,
}

const PERCENT_TOLERANCE: f64 = 0.1;
const RATIO_TOLERANCE: f64 = 0.001;

fn structure_table(found: &[OddPerfect], limit: u64) -> StructureReport {
    let mut summary = Summary::new(
        "Theorem 10",
        "BCT-perfect odd composites fall into the published structural types",
        format!("n < {limit}"),
    );
    let total = found.len() as u64;
    let compared_shares = limit == TABLE1_LIMIT;

    let rows: Vec<StructureRow> = Structure::ALL
        .iter()
        .map(|&structure| {
            let members: Vec<&OddPerfect> =
                found.iter().filter(|r| r.structure == structure).collect();
            let count = members.len() as u64;
            let percent = if total > 0 {
                100.0 * count as f64 / total as f64
            } else {
                0.0
            };
            let top = max_by_ratio(members.iter().copied());
            let (published_percent, published_max_ratio) = structure.published();
            StructureRow {
                structure,
                count,
                percent,
                max_ratio: top.map_or(0.0, |r| r.abundance_ratio),
                max_n: top.map(|r| r.n),
                example: members.first().map(|r| r.n),
                published_percent,
                published_max_ratio,
            }
        })
        .collect();

    for row in &rows {
        // Below the published range a type's maximum can only be smaller.
        let mut holds = row.max_ratio <= row.published_max_ratio + RATIO_TOLERANCE;
        if compared_shares {
            holds = holds
                && (row.percent - row.published_percent).abs() < PERCENT_TOLERANCE
                && (row.max_ratio - row.published_max_ratio).abs() < RATIO_TOLERANCE;
        }
        if !summary.check(holds) {
            log::debug!(
                "Theorem 10: {} has {:.2}% / max {:.4}, published {:.2}% / {:.4}",
                row.structure,
                row.percent,
                row.max_ratio,
                row.published_percent,
                row.published_max_ratio
            );
        }
    }

    StructureReport {
        summary: summary.finish(),
        total,
        compared_shares,
        rows,
    }
}

/// Theorem 10 over BCT-perfect odd composites n < limit.
pub fn verify_structure_table(limit: u64) -> Result<StructureReport> {
    Ok(structure_table(&find_bct_perfect_odds(limit)?, limit))
}

#[derive(Debug, Serialize)]
pub struct AbundanceBoundReport {
    pub summary: Summary,
    pub bound: f64,
    pub count: u64,
    pub max_ratio: f64,
    pub max_n: Option<u64>,
    /// The ten largest ratios, descending.
    pub top: Vec<OddPerfect>,
}

fn abundance_bound(
    found: &[OddPerfect],
    limit: u64,
    name: &'static str,
    statement: &'static str,
    bound: f64,
) -> AbundanceBoundReport {
    let mut summary = Summary::new(name, statement, format!("n < {limit}"));
    for r in found {
        if !summary.check(r.abundance_ratio < bound) {
            log::debug!("{name}: σ({0})/{0} = {1:.6}", r.n, r.abundance_ratio);
        }
    }

    let mut top = found.to_vec();
    top.sort_by(|a, b| b.abundance_ratio.total_cmp(&a.abundance_ratio));
    top.truncate(10);
    let max = top.first();

    AbundanceBoundReport {
        summary: summary.finish(),
        bound,
        count: found.len() as u64,
        max_ratio: max.map_or(0.0, |r| r.abundance_ratio),
        max_n: max.map(|r| r.n),
        top,
    }
}

/// Theorem 11(b): σ(n)/n < 1.71 for every BCT-perfect odd composite n < limit.
pub fn verify_abundance_bound(limit: u64) -> Result<AbundanceBoundReport> {
    let found = find_bct_perfect_odds(limit)?;
    Ok(theorem_11b(&found, limit))
}

fn theorem_11b(found: &[OddPerfect], limit: u64) -> AbundanceBoundReport {
    abundance_bound(
        found,
        limit,
        "Theorem 11(b)",
        "σ(n)/n < 1.71 for BCT-perfect odd composites",
        ABUNDANCE_BOUND,
    )
}

/// Conjecture 1: σ(n)/n < 2 for every BCT-perfect odd composite n < limit.
/// If it holds in general, no odd perfect number is BCT-perfect.
pub fn verify_odd_abundance_conjecture(limit: u64) -> Result<AbundanceBoundReport> {
    let found = find_bct_perfect_odds(limit)?;
    Ok(conjecture_1(&found, limit))
}

fn conjecture_1(found: &[OddPerfect], limit: u64) -> AbundanceBoundReport {
    abundance_bound(
        found,
        limit,
        "Conjecture 1",
        "σ(n)/n < 2 for BCT-perfect odd composites",
        2.0,
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct SemiprimeRow {
    pub p: u64,
    pub q: u64,
    pub n: u64,
    pub abundance_ratio: f64,
}

#[derive(Debug, Serialize)]
pub struct SemiprimeReport {
    /// Theorem 11(a).
    pub bound: Summary,
    /// Theorem 12.
    pub obstruction: Summary,
    pub pairs: u64,
    pub max: Option<SemiprimeRow>,
    /// 2 − max σ(pq)/pq.
    pub gap_from_perfection: f64,
    /// The five largest ratios, descending.
    pub top: Vec<SemiprimeRow>,
}

/// Theorems 11(a) and 12 over odd primes p < q < max_p.
///
/// 11(a): 5·σ(pq) ≤ 8·pq for every pair, with the maximum at 3 × 5.
/// 12: σ(pq) ≠ 2·pq, so no odd squarefree semiprime is perfect.
/// Both comparisons are exact.
pub fn verify_semiprime_bound(max_p: u64) -> Result<SemiprimeReport> {
    let range = format!("odd primes p < q < {max_p}");
    let mut bound = Summary::new("Theorem 11(a)", "σ(pq)/pq ≤ 8/5, maximum at 3 × 5", range.clone());
    let mut obstruction = Summary::new("Theorem 12", "no odd squarefree semiprime is perfect", range);
    let (num, den) = SEMIPRIME_BOUND;

    let odd_primes: Vec<u64> = primes_below(max_p).into_iter().filter(|&p| p > 2).collect();
    let mut rows = Vec::new();
    for (i, &p) in odd_primes.iter().enumerate() {
        for &q in &odd_primes[i + 1..] {
            let n = BigUint::from(p) * q;
            let s = sigma(&n)?;
            if !bound.check(&s * den <= &n * num) {
                log::debug!("Theorem 11(a) violated at {p} × {q}: σ = {s}");
            }
            obstruction.check(s != &n << 1u32);
            rows.push(SemiprimeRow {
                p,
                q,
                n: p * q,
                abundance_ratio: abundance_ratio(&n)?,
            });
        }
    }

    rows.sort_by(|a, b| b.abundance_ratio.total_cmp(&a.abundance_ratio));
    let pairs = rows.len() as u64;
    let max = rows.first().cloned();
    if let Some(top) = &max {
        bound.check((top.p, top.q) == (3, 5));
    }
    rows.truncate(5);

    Ok(SemiprimeReport {
        bound: bound.finish(),
        obstruction: obstruction.finish(),
        pairs,
        gap_from_perfection: 2.0 - max.as_ref().map_or(0.0, |r| r.abundance_ratio),
        max,
        top: rows,
    })
}

#[derive(Debug, Serialize)]
pub struct ObstructionReport {
    pub summary: Summary,
    pub count: u64,
    /// BCT-perfect odd composites with σ(n) = 2n.
    pub counterexamples: Vec<u64>,
}

/// Theorem 13: no BCT-perfect odd composite n < limit is perfect.
pub fn verify_bct_obstruction(limit: u64) -> Result<ObstructionReport> {
    let found = find_bct_perfect_odds(limit)?;
    theorem_13(&found, limit)
}

fn theorem_13(found: &[OddPerfect], limit: u64) -> Result<ObstructionReport> {
    let mut summary = Summary::new(
        "Theorem 13",
        "no BCT-perfect odd composite has σ(n) = 2n",
        format!("n < {limit}"),
    );
    let mut counterexamples = Vec::new();
    for r in found {
        let n = BigUint::from(r.n);
        if !summary.check(sigma(&n)? != &n << 1u32) {
            counterexamples.push(r.n);
        }
    }
    Ok(ObstructionReport {
        summary: summary.finish(),
        count: found.len() as u64,
        counterexamples,
    })
}

#[derive(Debug, Serialize)]
pub struct AbundanceReport {
    pub structure: StructureReport,
    pub semiprime: SemiprimeReport,
    pub bound: AbundanceBoundReport,
    pub obstruction: ObstructionReport,
    pub conjecture: AbundanceBoundReport,
}

impl AbundanceReport {
    pub fn summaries(&self) -> Vec<&Summary> {
        vec![
            &self.structure.summary,
            &self.semiprime.bound,
            &self.bound.summary,
            &self.semiprime.obstruction,
            &self.obstruction.summary,
            &self.conjecture.summary,
        ]
    }

    pub fn print(&self) {
        println!("\n=== Theorem 10: Structure of BCT-Perfect Odd Composites ===");
        println!(
            "{:<8} {:>7} {:>8} {:>8} {:>8} {:>8} {:>8}",
            "type", "count", "actual%", "paper%", "max σ/n", "paper", "example"
        );
        println!("{}", "-".repeat(64));
        for row in &self.structure.rows {
            println!(
                "{:<8} {:>7} {:>7.2}% {:>7.2}% {:>8.4} {:>8.4} {:>8}",
                row.structure.to_string(),
                row.count,
                row.percent,
                row.published_percent,
                row.max_ratio,
                row.published_max_ratio,
                row.example.map_or_else(|| "-".to_string(), |n| n.to_string())
            );
        }
        println!("{}", "-".repeat(64));
        println!("{:<8} {:>7}", "total", self.structure.total);
        if !self.structure.compared_shares {
            println!("  (shares only compared at n < {TABLE1_LIMIT})");
        }
        println!("{}", self.structure.summary);

        let semi = &self.semiprime;
        println!("{}", semi.bound);
        println!("{}", semi.obstruction);
        if let Some(max) = &semi.max {
            println!(
                "  {} pairs, max σ(pq)/pq = {:.6} at {} × {} = {}, gap from perfection {:.4}",
                semi.pairs, max.abundance_ratio, max.p, max.q, max.n, semi.gap_from_perfection
            );
        }
        for r in &semi.top {
            println!("  {:>5} × {:<5} = {:>8} {:>10.6}", r.p, r.q, r.n, r.abundance_ratio);
        }

        for report in [&self.bound, &self.conjecture] {
            println!("{}", report.summary);
            if let Some(n) = report.max_n {
                println!(
                    "  {} BCT-perfect odd composites, max σ(n)/n = {:.6} at n = {n} (margin {:.6})",
                    report.count,
                    report.max_ratio,
                    report.bound - report.max_ratio
                );
            }
        }
        println!("  top ratios:");
        for r in &self.bound.top {
            println!("  {:>10} {:>10.6} {}", r.n, r.abundance_ratio, r.structure);
        }

        println!("{}", self.obstruction.summary);
        println!(
            "  {} BCT-perfect odd composites, {} with σ(n) = 2n",
            self.obstruction.count,
            self.obstruction.counterexamples.len()
        );
    }
}

pub fn run(config: &VerifyConfig) -> Result<AbundanceReport> {
    log::debug!(
        "abundance: structure n < {}, conjecture n < {}, semiprimes p < {}",
        config.structure_limit,
        config.odd_abundance_limit,
        config.semiprime_max_p
    );
    let found = find_bct_perfect_odds(config.structure_limit)?;
    let wider = if config.odd_abundance_limit == config.structure_limit {
        None
    } else {
        Some(find_bct_perfect_odds(config.odd_abundance_limit)?)
    };
    let odd_found = wider.as_deref().unwrap_or(&found[..]);
    Ok(AbundanceReport {
        structure: structure_table(&found, config.structure_limit),
        semiprime: verify_semiprime_bound(config.semiprime_max_p)?,
        bound: theorem_11b(&found, config.structure_limit),
        obstruction: theorem_13(odd_found, config.odd_abundance_limit)?,
        conjecture: conjecture_1(odd_found, config.odd_abundance_limit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(n: u64) -> Structure {
        classify_structure(&BigUint::from(n)).unwrap()
    }

    #[test]
    fn test_classify_structure() {
        assert_eq!(classify(15), Structure::PQ);
        assert_eq!(classify(255), Structure::PQR);
        assert_eq!(classify(63), Structure::P2Q);
        assert_eq!(classify(75), Structure::P2Q);
        assert_eq!(classify(27), Structure::P3);
        assert_eq!(classify(65_535), Structure::Other);
        assert_eq!(classify(81), Structure::Other);
        assert_eq!(classify(7), Structure::Other);
    }

    #[test]
    fn test_structure_display() {
        assert_eq!(Structure::P2Q.to_string(), "p²×q");
        assert_eq!(Structure::Other.to_string(), "other");
    }

    #[test]
    fn test_find_below_1000() {
        let found = find_bct_perfect_odds(1000).unwrap();
        assert_eq!(found.len(), 29);
        assert_eq!(found[0].n, 15);
        assert_eq!(found.last().map(|r| r.n), Some(965));
    }

    #[test]
    fn test_bounds_below_1000() {
        let found = find_bct_perfect_odds(1000).unwrap();
        let bound = theorem_11b(&found, 1000);
        assert!(bound.summary.verified);
        assert_eq!(bound.max_n, Some(255));
        assert!((bound.max_ratio - 1.694_117_6).abs() < 1e-6);
        assert!(conjecture_1(&found, 1000).summary.verified);
    }

    #[test]
    fn test_published_table() {
        let report = verify_structure_table(TABLE1_LIMIT).unwrap();
        assert!(report.summary.verified, "{}", report.summary);
        assert!(report.compared_shares);
        assert_eq!(report.total, TABLE1_TOTAL);
        let counts: Vec<u64> = report.rows.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![487, 18, 7, 3, 7]);
        assert_eq!(report.rows[4].max_n, Some(65_535));
    }

    #[test]
    fn test_semiprime_bound_peaks_at_15() {
        let r = verify_semiprime_bound(100).unwrap();
        assert!(r.bound.verified, "{}", r.bound);
        assert!(r.obstruction.verified, "{}", r.obstruction);
        assert_eq!(r.pairs, 276);
        assert_eq!(r.obstruction.checked, 276);
        // One check per pair plus the location of the maximum.
        assert_eq!(r.bound.checked, 277);
        let max = r.max.unwrap();
        assert_eq!((max.p, max.q, max.n), (3, 5, 15));
        assert!((max.abundance_ratio - 1.6).abs() < 1e-12);
        assert!((r.gap_from_perfection - 0.4).abs() < 1e-12);
        assert_eq!(r.top.len(), 5);
    }

    #[test]
    fn test_semiprime_bound_without_pairs_is_unverified() {
        let r = verify_semiprime_bound(5).unwrap();
        assert_eq!(r.pairs, 0);
        assert!(r.max.is_none());
        assert!(!r.bound.verified);
    }

    #[test]
    fn test_bct_obstruction_below_1000() {
        let r = verify_bct_obstruction(1000).unwrap();
        assert!(r.summary.verified);
        assert_eq!(r.count, 29);
        assert_eq!(r.summary.checked, 29);
        assert!(r.counterexamples.is_empty());
    }

    #[test]
    fn test_obstruction_flags_a_perfect_entry() {
        let fake = [OddPerfect {
            n: 28,
            abundance_ratio: 2.0,
            structure: Structure::Other,
        }];
        let r = theorem_13(&fake, 100).unwrap();
        assert_eq!(r.counterexamples, vec![28]);
        assert!(!r.summary.verified);
    }

    #[test]
    fn test_run_shares_the_odd_search() {
        let report = run(&VerifyConfig::quick()).unwrap();
        assert_eq!(report.summaries().len(), 6);
        assert!(report.summaries().iter().all(|s| s.verified));
        assert_eq!(report.obstruction.count, report.structure.total);
    }
}
