//! Binary Convolution Theory: verification CLI
//!
//! Usage:
//!   bct-verify [--mode=MODE] [--full] [--max-n=N] [--json=PATH]
//!
//! Modes:
//!   all         : every theorem group (default)
//!   bounds      : Theorems 1-3, Lemma 1 and the 807743 example
//!   mersenne    : Theorems 4-5
//!   fermat      : Theorem 6, Lemma 4, Theorem 9
//!   sweep       : Theorem 7, Proposition 5, schedule statistics
//!   perfect     : Theorem 8, Lemma 2 and binary generation
//!   inheritance : Lemma 3 and the Table 2 classes
//!   abundance   : Theorems 10-13, Conjecture 1
//!   quick       : every group over small ranges (smoke test)
//!
//! --full selects the paper's larger ranges; --max-n overrides every n limit.
//! Exits 0 when every claim verified, 1 otherwise.

use bct_verify::{run, Mode, VerifyConfig};
use std::collections::HashMap;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = parse_args(&args);

    let mode: Mode = match opts.get("mode").map(|s| s.as_str()).unwrap_or("all").parse() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = match mode {
        Mode::Quick => VerifyConfig::quick(),
        _ if opts.contains_key("full") => VerifyConfig::full(),
        _ => VerifyConfig::default(),
    };
    if let Some(max_n) = opts.get("max-n") {
        match max_n.parse() {
            Ok(n) => config = config.with_max_n(n),
            Err(_) => {
                eprintln!("Invalid --max-n={max_n}: expected a positive integer");
                return ExitCode::FAILURE;
            }
        }
    }

    println!("BCT verification, mode: {mode}");
    println!("Config: {config:?}\n");

    let report = match run(mode, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Verification aborted: {e}");
            return ExitCode::FAILURE;
        }
    };
    report.print();

    if let Some(path) = opts.get("json") {
        match bct_verify::report::write_json(&report, Path::new(path)) {
            Ok(()) => println!("\nResults written to {path}"),
            Err(e) => eprintln!("Warning: could not write {path}: {e}"),
        }
    }

    if report.verified() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// ---------------------------------------------------------------------------
// Argument parsing helpers
// ---------------------------------------------------------------------------

fn parse_args(args: &[String]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for arg in args {
        if let Some(kv) = arg.strip_prefix("--") {
            if let Some((k, v)) = kv.split_once('=') {
                map.insert(k.to_string(), v.to_string());
            } else {
                map.insert(kv.to_string(), "true".to_string());
            }
        }
    }
    map
}
