//! Runs the bounded TNF enumerator for a given `(n_states, n_symbols)` and
//! prints the per-bucket tally.
//!
//! Run with e.g. `cargo run --example run_enumerator -- 3 2`.

use std::env;

use turing_lab::config::Config;
use turing_lab::enumerator::Enumerator;

fn main() {
    let args: Vec<String> = env::args().collect();
    let n_states: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);
    let n_symbols: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(2);

    let config = Config::builder(n_states, n_symbols).verbose(true).build();
    println!("Enumerating ({n_states}, {n_symbols}) machines...");
    println!("{config}");

    let mut enumerator = Enumerator::new(&config);
    let summary = match enumerator.run(&config) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("enumeration failed: {e}");
            std::process::exit(1);
        }
    };

    println!("Visited {} machines:", summary.total_visited);
    let mut counts: Vec<_> = summary.counts.into_iter().collect();
    counts.sort_by_key(|(bucket, _)| *bucket);
    for (bucket, count) in counts {
        println!("  {bucket}: {count}");
    }
}
