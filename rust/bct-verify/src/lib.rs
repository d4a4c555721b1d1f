//! Finite-range verification of the Binary Convolution Theory theorems.
//!
//! Each module checks one family of claims from the paper against the
//! invariant engine in `bct_core` and returns serializable reports:
//!
//!   bounds      : Theorems 1-3, Lemma 1: H ≤ min popcount, H(n, n) ≤ pop(n), equality case
//!   mersenne    : Theorems 4-5: M_k squared is a triangle with H = k, C = (k−1)²
//!   fermat      : Theorem 6, Lemma 4, Theorem 9: Fermat numbers resonate minimally
//!   sweep       : Theorem 7, Proposition 5: sequential vs synchronous carries
//!   perfect     : Theorem 8, Lemma 2: even perfect numbers are BCT-perfect
//!   inheritance : Lemma 3, Table 2: powers of two preserve BCT-perfectness
//!   abundance   : Theorems 10-13, Conjecture 1: BCT-perfect odd composites
//!
//! A run is finite evidence, never a proof.

pub mod abundance;
pub mod bounds;
pub mod config;
pub mod fermat;
pub mod inheritance;
pub mod mersenne;
pub mod perfect;
pub mod report;
pub mod sweep;

use std::fmt;
use std::str::FromStr;

pub use config::VerifyConfig;
pub use report::{RunReport, Summary};

/// Which group of claims to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    All,
    Bounds,
    Mersenne,
    Fermat,
    Sweep,
    Perfect,
    Inheritance,
    Abundance,
    /// Every group over the small ranges of [`VerifyConfig::quick`].
    Quick,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Mode::All),
            "bounds" => Ok(Mode::Bounds),
            "mersenne" => Ok(Mode::Mersenne),
            "fermat" => Ok(Mode::Fermat),
            "sweep" => Ok(Mode::Sweep),
            "perfect" => Ok(Mode::Perfect),
            "inheritance" => Ok(Mode::Inheritance),
            "abundance" => Ok(Mode::Abundance),
            "quick" => Ok(Mode::Quick),
            other => Err(format!(
                "Unknown mode: {other}. Use --mode=all|bounds|mersenne|fermat|sweep|perfect|inheritance|abundance|quick"
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::All => "all",
            Mode::Bounds => "bounds",
            Mode::Mersenne => "mersenne",
            Mode::Fermat => "fermat",
            Mode::Sweep => "sweep",
            Mode::Perfect => "perfect",
            Mode::Inheritance => "inheritance",
            Mode::Abundance => "abundance",
            Mode::Quick => "quick",
        };
        write!(f, "{s}")
    }
}

/// Run the groups selected by `mode` over the ranges in `config`.
pub fn run(mode: Mode, config: &VerifyConfig) -> bct_core::Result<RunReport> {
    let every = matches!(mode, Mode::All | Mode::Quick);
    let mut report = RunReport::default();

    if every || mode == Mode::Bounds {
        report.bounds = Some(bounds::run(config)?);
    }
    if every || mode == Mode::Mersenne {
        report.mersenne = Some(mersenne::run(config)?);
    }
    if every || mode == Mode::Fermat {
        report.fermat = Some(fermat::run(config)?);
    }
    if every || mode == Mode::Sweep {
        report.sweep = Some(sweep::run(config)?);
    }
    if every || mode == Mode::Perfect {
        report.perfect = Some(perfect::run(config)?);
    }
    if every || mode == Mode::Inheritance {
        report.inheritance = Some(inheritance::run(config)?);
    }
    if every || mode == Mode::Abundance {
        report.abundance = Some(abundance::run(config)?);
    }

    log::info!(
        "{mode}: {} claims checked, all verified: {}",
        report.summaries().len(),
        report.verified()
    );
    Ok(report)
}
