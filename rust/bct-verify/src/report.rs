//! Per-claim summaries, the combined run report, and JSON output.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::abundance::AbundanceReport;
use crate::bounds::BoundsReport;
use crate::fermat::FermatReport;
use crate::inheritance::InheritanceReport;
use crate::mersenne::MersenneReport;
use crate::perfect::PerfectReport;
use crate::sweep::SweepReport;

/// Outcome of checking one claim over a finite range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub name: &'static str,
    pub statement: &'static str,
    pub range: String,
    pub checked: u64,
    pub violations: u64,
    pub verified: bool,
}

impl Summary {
    pub fn new(name: &'static str, statement: &'static str, range: impl Into<String>) -> Self {
        Self {
            name,
            statement,
            range: range.into(),
            checked: 0,
            violations: 0,
            verified: false,
        }
    }

    /// Count one case; returns `holds` so callers can branch on it.
    pub fn check(&mut self, holds: bool) -> bool {
        self.checked += 1;
        if !holds {
            self.violations += 1;
        }
        holds
    }

    /// Seal the summary. A claim checked on zero cases is not verified.
    pub fn finish(mut self) -> Self {
        self.verified = self.checked > 0 && self.violations == 0;
        log::info!("{self}");
        self
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.verified { "PASS" } else { "FAIL" };
        write!(
            f,
            "[{tag}] {}: {} ({}; {} checked, {} violations)",
            self.name, self.statement, self.range, self.checked, self.violations
        )
    }
}

/// Everything one invocation produced. Groups that were not run are `None`.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundsReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mersenne: Option<MersenneReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fermat: Option<FermatReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep: Option<SweepReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perfect: Option<PerfectReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inheritance: Option<InheritanceReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abundance: Option<AbundanceReport>,
}

impl RunReport {
    pub fn summaries(&self) -> Vec<&Summary> {
        let mut out = Vec::new();
        if let Some(r) = &self.bounds {
            out.extend(r.summaries());
        }
        if let Some(r) = &self.mersenne {
            out.extend(r.summaries());
        }
        if let Some(r) = &self.fermat {
            out.extend(r.summaries());
        }
        if let Some(r) = &self.sweep {
            out.extend(r.summaries());
        }
        if let Some(r) = &self.perfect {
            out.extend(r.summaries());
        }
        if let Some(r) = &self.inheritance {
            out.extend(r.summaries());
        }
        if let Some(r) = &self.abundance {
            out.extend(r.summaries());
        }
        out
    }

    pub fn verified(&self) -> bool {
        let summaries = self.summaries();
        !summaries.is_empty() && summaries.iter().all(|s| s.verified)
    }

    /// Print the detail tables of every group that ran, then the scorecard.
    pub fn print(&self) {
        if let Some(r) = &self.bounds {
            r.print();
        }
        if let Some(r) = &self.mersenne {
            r.print();
        }
        if let Some(r) = &self.fermat {
            r.print();
        }
        if let Some(r) = &self.sweep {
            r.print();
        }
        if let Some(r) = &self.perfect {
            r.print();
        }
        if let Some(r) = &self.inheritance {
            r.print();
        }
        if let Some(r) = &self.abundance {
            r.print();
        }
        print_scorecard(&self.summaries());
    }
}

pub fn print_scorecard(summaries: &[&Summary]) {
    println!("\n=== BCT Verification Summary ===");
    println!("{:<6} {:<28} {:>10} {:>10}  {}", "status", "claim", "checked", "violations", "range");
    println!("{}", "-".repeat(80));
    for s in summaries {
        let tag = if s.verified { "PASS" } else { "FAIL" };
        println!(
            "{:<6} {:<28} {:>10} {:>10}  {}",
            tag, s.name, s.checked, s.violations, s.range
        );
    }
    let passed = summaries.iter().filter(|s| s.verified).count();
    println!("{}", "-".repeat(80));
    println!("{passed}/{} claims verified", summaries.len());
}

/// Write `value` as pretty JSON, creating the parent directory if needed.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)
}
