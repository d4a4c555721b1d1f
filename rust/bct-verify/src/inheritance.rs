//! Lemma 3 and Table 2: a power of two never changes BCT-perfectness, so
//! every BCT-perfect composite is a power of two times an odd number that is
//! itself BCT-perfect (or prime).

use std::collections::BTreeSet;
use std::fmt;

use bct_core::{is_bct_perfect, is_prime, Result};
use num_bigint::BigUint;
use serde::Serialize;

use crate::abundance::{find_bct_perfect_odds, TABLE1_LIMIT, TABLE1_TOTAL};
use crate::config::VerifyConfig;
use crate::report::Summary;

/// (a, m) with n = 2^a · m and m odd. Zero has no odd part and maps to (0, 0).
pub fn odd_part(n: u64) -> (u32, u64) {
    if n == 0 {
        return (0, 0);
    }
    let a = n.trailing_zeros();
    (a, n >> a)
}

#[derive(Debug, Serialize)]
pub struct OddPartReport {
    pub summary: Summary,
    /// n = 2^a with a ≥ 2.
    pub powers_of_two: u64,
    /// n = 2^a · p with p an odd prime.
    pub prime_odd_parts: u64,
    /// Odd part composite and BCT-perfect.
    pub perfect_odd_parts: u64,
    /// Odd part composite and not BCT-perfect.
    pub imperfect_odd_parts: u64,
}

/// Lemma 3 over even composites n < limit: n = 2^a · m is BCT-perfect
/// exactly when m is, and pure powers of two are BCT-perfect.
pub fn verify_inheritance(limit: u64) -> Result<OddPartReport> {
    let mut summary = Summary::new(
        "Lemma 3",
        "2^a · m is BCT-perfect ⟺ m is BCT-perfect",
        format!("even n ∈ [4, {limit})"),
    );
    let mut powers_of_two = 0;
    let mut prime_odd_parts = 0;
    let mut perfect_odd_parts = 0;
    let mut imperfect_odd_parts = 0;

    for n in (4..limit).step_by(2) {
        let (a, m) = odd_part(n);
        let n_perfect = is_bct_perfect(&BigUint::from(n))?;
        let holds = if m == 1 {
            powers_of_two += 1;
            n_perfect
        } else {
            let odd = BigUint::from(m);
            let m_perfect = is_bct_perfect(&odd)?;
            if is_prime(&odd) {
                prime_odd_parts += 1;
            } else if m_perfect {
                perfect_odd_parts += 1;
            } else {
                imperfect_odd_parts += 1;
            }
            n_perfect == m_perfect
        };
        if !summary.check(holds) {
            log::debug!("Lemma 3 fails at n = 2^{a} · {m} = {n}");
        }
    }

    Ok(OddPartReport {
        summary: summary.finish(),
        powers_of_two,
        prime_odd_parts,
        perfect_odd_parts,
        imperfect_odd_parts,
    })
}

/// Classes of BCT-perfect composites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PerfectClass {
    /// 2^k.
    #[serde(rename = "A")]
    PowerOfTwo,
    /// Odd BCT-perfect composites.
    #[serde(rename = "B")]
    OddComposite,
    /// 2^a · m with m in class B.
    #[serde(rename = "C")]
    PowerTimesOdd,
    /// 2^a · p with p an odd prime, BCT-perfect by Lemmas 2 and 3.
    #[serde(rename = "2^a·p")]
    PowerTimesPrime,
}

impl PerfectClass {
    pub const ALL: [PerfectClass; 4] = [
        PerfectClass::PowerOfTwo,
        PerfectClass::OddComposite,
        PerfectClass::PowerTimesOdd,
        PerfectClass::PowerTimesPrime,
    ];
}

impl fmt::Display for PerfectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PerfectClass::PowerOfTwo => "A (2^k)",
            PerfectClass::OddComposite => "B (odd)",
            PerfectClass::PowerTimesOdd => "C (2^a·m)",
            PerfectClass::PowerTimesPrime => "2^a·p",
        };
        write!(f, "{s}")
    }
}

/// Class of a BCT-perfect composite n, given the odd BCT-perfect composites
/// below n. `None` means n fits no class.
pub fn classify_perfect(n: u64, odd_perfects: &BTreeSet<u64>) -> Option<PerfectClass> {
    let (a, m) = odd_part(n);
    if m == 1 {
        Some(PerfectClass::PowerOfTwo)
    } else if a == 0 {
        odd_perfects.contains(&n).then_some(PerfectClass::OddComposite)
    } else if odd_perfects.contains(&m) {
        Some(PerfectClass::PowerTimesOdd)
    } else if is_prime(&BigUint::from(m)) {
        Some(PerfectClass::PowerTimesPrime)
    } else {
        None
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassRow {
    pub class: PerfectClass,
    pub count: u64,
    /// The five smallest members.
    pub examples: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub struct ClassificationReport {
    pub summary: Summary,
    pub total: u64,
    pub rows: Vec<ClassRow>,
    pub unclassified: Vec<u64>,
    /// Whether class B was compared with the published count.
    pub compared_published: bool,
}

/// Table 2: every BCT-perfect composite n < limit falls into one class.
/// At the published range class B must also hold exactly 522 numbers.
pub fn verify_classification(limit: u64) -> Result<ClassificationReport> {
    let mut summary = Summary::new(
        "Table 2",
        "BCT-perfect composites are 2^k, odd, 2^a·m or 2^a·p",
        format!("n < {limit}"),
    );
    let odd_perfects: BTreeSet<u64> = find_bct_perfect_odds(limit)?
        .into_iter()
        .map(|r| r.n)
        .collect();

    let mut members: Vec<(PerfectClass, u64)> = Vec::new();
    let mut unclassified = Vec::new();
    let progress_step = (limit / 10).max(1);
    for n in 4..limit {
        if n % progress_step == 0 {
            log::debug!("Table 2: {n}/{limit}");
        }
        let big = BigUint::from(n);
        if is_prime(&big) || !is_bct_perfect(&big)? {
            continue;
        }
        match classify_perfect(n, &odd_perfects) {
            Some(class) => {
                summary.check(true);
                members.push((class, n));
            }
            None => {
                summary.check(false);
                log::debug!("Table 2: {n} fits no class");
                unclassified.push(n);
            }
        }
    }

    let rows: Vec<ClassRow> = PerfectClass::ALL
        .iter()
        .map(|&class| {
            let of_class: Vec<u64> = members
                .iter()
                .filter(|(c, _)| *c == class)
                .map(|&(_, n)| n)
                .collect();
            ClassRow {
                class,
                count: of_class.len() as u64,
                examples: of_class.into_iter().take(5).collect(),
            }
        })
        .collect();

    let compared_published = limit == TABLE1_LIMIT;
    if compared_published {
        let odd = rows
            .iter()
            .find(|r| r.class == PerfectClass::OddComposite)
            .map_or(0, |r| r.count);
        if !summary.check(odd == TABLE1_TOTAL) {
            log::debug!("Table 2: class B has {odd} members, published {TABLE1_TOTAL}");
        }
    }

    Ok(ClassificationReport {
        summary: summary.finish(),
        total: members.len() as u64 + unclassified.len() as u64,
        rows,
        unclassified,
        compared_published,
    })
}

#[derive(Debug, Serialize)]
pub struct InheritanceReport {
    pub inheritance: OddPartReport,
    pub classification: ClassificationReport,
}

impl InheritanceReport {
    pub fn summaries(&self) -> Vec<&Summary> {
        vec![&self.inheritance.summary, &self.classification.summary]
    }

    pub fn print(&self) {
        println!("\n=== Lemma 3: BCT-Perfectness Inheritance ===");
        let inh = &self.inheritance;
        println!("{}", inh.summary);
        println!(
            "  powers of two: {}, odd part prime: {}, odd part perfect: {}, odd part imperfect: {}",
            inh.powers_of_two, inh.prime_odd_parts, inh.perfect_odd_parts, inh.imperfect_odd_parts
        );

        println!("\n=== Table 2: Classes of BCT-Perfect Composites ===");
        println!("{:<10} {:>8}  {}", "class", "count", "smallest");
        println!("{}", "-".repeat(50));
        for row in &self.classification.rows {
            println!("{:<10} {:>8}  {:?}", row.class.to_string(), row.count, row.examples);
        }
        println!("{}", "-".repeat(50));
        println!("{:<10} {:>8}", "total", self.classification.total);
        if !self.classification.unclassified.is_empty() {
            println!("  unclassified: {:?}", self.classification.unclassified);
        }
        if !self.classification.compared_published {
            println!("  (class B only compared at n < {TABLE1_LIMIT})");
        }
        println!("{}", self.classification.summary);
    }
}

pub fn run(config: &VerifyConfig) -> Result<InheritanceReport> {
    log::debug!(
        "inheritance: Lemma 3 n < {}, Table 2 n < {}",
        config.inheritance_limit,
        config.classification_limit
    );
    Ok(InheritanceReport {
        inheritance: verify_inheritance(config.inheritance_limit)?,
        classification: verify_classification(config.classification_limit)?,
    })
}
