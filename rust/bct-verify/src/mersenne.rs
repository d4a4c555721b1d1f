//! Theorems 4 and 5: maximal resonance of Mersenne numbers M_k = 2^k − 1.

use bct_core::{binary_convolution, mersenne, popcount, Result};
use serde::Serialize;

use crate::config::VerifyConfig;
use crate::report::Summary;

/// [1, 2, …, k, …, 2, 1]: the convolution of M_k with itself.
pub fn expected_triangle(k: u64) -> Vec<u64> {
    (1..=k).chain((1..k).rev()).collect()
}

/// (k − 1)², the carry count of M_k squared.
pub fn expected_carry_count(k: u64) -> u64 {
    let d = k.saturating_sub(1);
    d * d
}

#[derive(Debug, Clone, Serialize)]
pub struct MersenneRow {
    pub k: u64,
    pub m: String,
    pub popcount: u64,
    pub height: u64,
    pub carry_count: u64,
    pub convolution: Vec<u64>,
}

/// One row per k in the inclusive range, shared by every Mersenne check.
pub fn mersenne_rows(range: (u64, u64)) -> Result<Vec<MersenneRow>> {
    (range.0..=range.1)
        .map(|k| {
            let m = mersenne(k)?;
            let conv = binary_convolution(&m, &m)?;
            Ok(MersenneRow {
                k,
                m: m.to_string(),
                popcount: popcount(&m),
                height: conv.height(),
                carry_count: conv.carry_mass(),
                convolution: conv.coefficients().to_vec(),
            })
        })
        .collect()
}

fn range_label(range: (u64, u64)) -> String {
    format!("k ∈ [{}, {}]", range.0, range.1)
}

fn rows_label(rows: &[MersenneRow]) -> String {
    match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => range_label((first.k, last.k)),
        _ => "k ∈ ∅".to_string(),
    }
}

/// Theorem 4: H(M_k, M_k) = k = pop(M_k).
pub fn verify_mersenne_height(rows: &[MersenneRow]) -> Summary {
    let mut summary = Summary::new("Theorem 4", "H(M_k, M_k) = k = pop(M_k)", rows_label(rows));
    for row in rows {
        summary.check(row.height == row.k && row.popcount == row.k);
    }
    summary.finish()
}

/// Theorem 5: C(M_k, M_k) = (k − 1)².
pub fn verify_mersenne_carry(rows: &[MersenneRow]) -> Summary {
    let mut summary = Summary::new("Theorem 5", "C(M_k, M_k) = (k − 1)²", rows_label(rows));
    for row in rows {
        summary.check(row.carry_count == expected_carry_count(row.k));
    }
    summary.finish()
}

/// conv(M_k, M_k) is the symmetric triangle peaking at k.
pub fn verify_triangle_patterns(rows: &[MersenneRow]) -> Summary {
    let mut summary = Summary::new(
        "Mersenne triangle",
        "conv(M_k, M_k) = [1, 2, …, k, …, 2, 1]",
        rows_label(rows),
    );
    for row in rows {
        if !summary.check(row.convolution == expected_triangle(row.k)) {
            log::debug!("M_{} convolution is not a triangle: {:?}", row.k, row.convolution);
        }
    }
    summary.finish()
}

#[derive(Debug, Serialize)]
pub struct MersenneReport {
    pub height: Summary,
    pub carry: Summary,
    pub triangle: Summary,
    pub rows: Vec<MersenneRow>,
}

impl MersenneReport {
    pub fn summaries(&self) -> Vec<&Summary> {
        vec![&self.height, &self.carry, &self.triangle]
    }

    pub fn print(&self) {
        println!("\n=== Theorems 4-5: Mersenne Resonance ===");
        println!("{:>4} {:>8} {:>5} {:>5} {:>8} {:>8}", "k", "M_k", "pop", "H", "C", "(k-1)²");
        println!("{}", "-".repeat(44));
        for row in &self.rows {
            println!(
                "{:>4} {:>8} {:>5} {:>5} {:>8} {:>8}",
                row.k,
                row.m,
                row.popcount,
                row.height,
                row.carry_count,
                expected_carry_count(row.k)
            );
        }
        println!("{}", self.height);
        println!("{}", self.carry);
        println!("{}", self.triangle);
    }
}

pub fn run(config: &VerifyConfig) -> Result<MersenneReport> {
    let range = config.mersenne_k;
    log::debug!("mersenne: {}", range_label(range));
    let rows = mersenne_rows(range)?;
    Ok(MersenneReport {
        height: verify_mersenne_height(&rows),
        carry: verify_mersenne_carry(&rows),
        triangle: verify_triangle_patterns(&rows),
        rows,
    })
}
