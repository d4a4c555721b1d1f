//! Theorem 7 and Proposition 5: sequential sweeps versus synchronous rounds.

use std::collections::BTreeMap;

use bct_core::{
    binary_convolution, chain_length, chain_length_of, factorizations, height,
    parallel_chain_length, parallel_chain_length_of, BctError, CarrySchedule, Result,
};
use num_bigint::BigUint;
use num_traits::One;
use serde::Serialize;

use crate::config::VerifyConfig;
use crate::report::Summary;

/// m = (2^k + 1) / 3 for odd k ≥ 3, the partner of 3 whose carries ripple
/// one position per synchronous round.
pub fn proposition5_m(k: u32) -> Result<BigUint> {
    if k < 3 || k % 2 == 0 {
        return Err(BctError::Domain {
            operation: "proposition5_m",
            reason: format!("k must be odd and at least 3, got {k}"),
        });
    }
    Ok(((BigUint::one() << k) + 1u32) / 3u32)
}

/// Theorem 7: one LSB to MSB sweep normalizes every factorization of n ∈ [4, max_n].
pub fn verify_single_sweep(max_n: u64) -> Result<Summary> {
    let mut summary = Summary::new(
        "Theorem 7",
        "L(a, b) = 1 for all factorizations",
        format!("n ∈ [4, {max_n}]"),
    );
    for n in 4..=max_n {
        let big = BigUint::from(n);
        for (a, b) in factorizations(&big, false)? {
            let norm = binary_convolution(&a, &b)?.normalize(CarrySchedule::Sequential)?;
            let holds = norm.rounds <= 1 && chain_length(&a, &b)? == 1 && norm.value() == big;
            if !summary.check(holds) {
                log::debug!("Theorem 7: {a} × {b} took {} sweeps", norm.rounds);
            }
        }
    }
    Ok(summary.finish())
}

#[derive(Debug, Clone, Serialize)]
pub struct ChainRow {
    pub k: u32,
    pub m: String,
    pub height: u64,
    pub parallel_chain_length: u64,
}

#[derive(Debug, Serialize)]
pub struct LongChainReport {
    pub summary: Summary,
    pub rows: Vec<ChainRow>,
}

/// Proposition 5: H(3, m) = 2 while L_parallel(3, m) = k − 1, so the
/// synchronous chain grows without bound at fixed height.
pub fn verify_long_parallel_chains(range: (u32, u32)) -> Result<LongChainReport> {
    let mut summary = Summary::new(
        "Proposition 5",
        "m = (2^k + 1)/3: H(3, m) = 2, L_par(3, m) = k − 1",
        format!("odd k ∈ [{}, {}]", range.0, range.1),
    );
    let three = BigUint::from(3u32);
    let mut rows = Vec::new();

    for k in (range.0..=range.1).filter(|k| k % 2 == 1) {
        let m = proposition5_m(k)?;
        let h = height(&three, &m)?;
        let lp = parallel_chain_length(&three, &m)?;
        summary.check(h == 2 && lp == u64::from(k - 1));
        rows.push(ChainRow {
            k,
            m: m.to_string(),
            height: h,
            parallel_chain_length: lp,
        });
    }

    Ok(LongChainReport {
        summary: summary.finish(),
        rows,
    })
}

#[derive(Debug, Serialize)]
pub struct ScheduleComparison {
    pub summary: Summary,
    pub factorizations: u64,
    /// Pairs with H > 1.
    pub collisions: u64,
    /// Pairs with H > 1 and L_parallel = H.
    pub parallel_equals_height: u64,
    pub parallel_equals_height_pct: f64,
    pub max_height: u64,
    pub max_parallel_chain_length: u64,
    pub height_distribution: BTreeMap<u64, u64>,
    pub parallel_distribution: BTreeMap<u64, u64>,
}

/// H and L_parallel statistics over every non-trivial factorization of
/// n ∈ [4, max_n]. The checked claim is that the sequential chain stays 1.
pub fn compare_schedules(max_n: u64) -> Result<ScheduleComparison> {
    let mut summary = Summary::new(
        "Schedule comparison",
        "L = 1 while L_par varies with the carry ripple",
        format!("n ∈ [4, {max_n}]"),
    );
    let mut collisions = 0;
    let mut parallel_equals_height = 0;
    let mut height_distribution = BTreeMap::new();
    let mut parallel_distribution = BTreeMap::new();

    let progress_step = (max_n / 10).max(1);
    for n in 4..=max_n {
        if n % progress_step == 0 {
            log::debug!("schedule comparison: {n}/{max_n}");
        }
        for (a, b) in factorizations(&BigUint::from(n), false)? {
            let conv = binary_convolution(&a, &b)?;
            let h = conv.height();
            let sequential = chain_length_of(&conv)?;
            let parallel = parallel_chain_length_of(&conv)?;

            summary.check(sequential == 1);
            *height_distribution.entry(h).or_insert(0) += 1;
            *parallel_distribution.entry(parallel).or_insert(0) += 1;
            if h > 1 {
                collisions += 1;
                if parallel == h {
                    parallel_equals_height += 1;
                }
            }
        }
    }

    let pct = if collisions > 0 {
        100.0 * parallel_equals_height as f64 / collisions as f64
    } else {
        0.0
    };
    Ok(ScheduleComparison {
        factorizations: summary.checked,
        summary: summary.finish(),
        collisions,
        parallel_equals_height,
        parallel_equals_height_pct: pct,
        max_height: height_distribution.keys().next_back().copied().unwrap_or(0),
        max_parallel_chain_length: parallel_distribution.keys().next_back().copied().unwrap_or(0),
        height_distribution,
        parallel_distribution,
    })
}

#[derive(Debug, Serialize)]
pub struct SweepReport {
    pub single_sweep: Summary,
    pub long_chains: LongChainReport,
    pub schedules: ScheduleComparison,
}

impl SweepReport {
    pub fn summaries(&self) -> Vec<&Summary> {
        vec![
            &self.single_sweep,
            &self.long_chains.summary,
            &self.schedules.summary,
        ]
    }

    pub fn print(&self) {
        println!("\n=== Theorem 7, Proposition 5: Carry Schedules ===");
        println!("{}", self.single_sweep);

        println!("{}", self.long_chains.summary);
        println!("{:>4} {:>10} {:>4} {:>7}", "k", "m", "H", "L_par");
        for row in &self.long_chains.rows {
            println!(
                "{:>4} {:>10} {:>4} {:>7}",
                row.k, row.m, row.height, row.parallel_chain_length
            );
        }

        let s = &self.schedules;
        println!("{}", s.summary);
        println!(
            "  factorizations: {}, with H > 1: {}, L_par = H: {} ({:.2}%)",
            s.factorizations, s.collisions, s.parallel_equals_height, s.parallel_equals_height_pct
        );
        println!(
            "  max H: {}, max L_par: {}",
            s.max_height, s.max_parallel_chain_length
        );
        println!("  H distribution: {:?}", s.height_distribution);
        println!("  L_par distribution: {:?}", s.parallel_distribution);
    }
}

pub fn run(config: &VerifyConfig) -> Result<SweepReport> {
    log::debug!(
        "sweep: n ≤ {}, prop5 k ∈ {:?}, schedules n ≤ {}",
        config.sweep_max_n,
        config.prop5_k,
        config.schedule_max_n
    );
    Ok(SweepReport {
        single_sweep: verify_single_sweep(config.sweep_max_n)?,
        long_chains: verify_long_parallel_chains(config.prop5_k)?,
        schedules: compare_schedules(config.schedule_max_n)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposition5_m() {
        assert_eq!(proposition5_m(3).unwrap(), BigUint::from(3u32));
        assert_eq!(proposition5_m(5).unwrap(), BigUint::from(11u32));
        assert_eq!(proposition5_m(7).unwrap(), BigUint::from(43u32));
        assert!(proposition5_m(1).is_err());
        assert!(proposition5_m(4).is_err());
    }

    #[test]
    fn test_long_chains() {
        let r = verify_long_parallel_chains((3, 21)).unwrap();
        assert!(r.summary.verified);
        assert_eq!(r.rows.len(), 10);
        assert_eq!(r.rows.last().map(|row| row.parallel_chain_length), Some(20));
    }

    #[test]
    fn test_schedule_comparison_to_1000() {
        let r = compare_schedules(1000).unwrap();
        assert!(r.summary.verified);
        assert_eq!(r.factorizations, 2550);
        assert_eq!(r.collisions, 1230);
        assert_eq!(r.parallel_equals_height, 576);
        assert_eq!(r.max_height, 5);
        assert_eq!(r.max_parallel_chain_length, 8);
    }

    #[test]
    fn test_single_sweep() {
        let s = verify_single_sweep(300).unwrap();
        assert!(s.verified);
        assert!(s.checked > 0);
    }
}
