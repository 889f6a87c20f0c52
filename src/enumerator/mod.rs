//! Bounded TNF tree enumeration with a cost-ordered classification pipeline.
//! Each partial table is actually run from a blank tape to find the next
//! cell the machine would read that has not been filled in yet, and only
//! that reachable cell gets candidates; unreachable cells stay `---`. An
//! explicit machine stack (rather than recursion) drives the traversal, so
//! depth is bounded independent of the host call stack.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::decider::bouncer::DeciderBouncer;
use crate::decider::cycler::DeciderCycler;
use crate::decider::translated_cycler::DeciderTranslatedCycler;
use crate::decider::Decider;
use crate::error::GenericError;
use crate::machine::Machine;
use crate::reporter::Reporter;
use crate::rule::{Direction, Rule, StateSlot, Symbol, Transition};
use crate::status::{Bucket, DeciderResult, UndecidedReason};

/// One frame of the explicit depth-first stack: a partially-filled rule
/// (unfilled cells hold [`Transition::UNDEFINED`]) plus the canonical-
/// extension bookkeeping (highest symbol/state reached so far) needed to
/// bound the next cell's candidates.
#[derive(Clone)]
struct Frame {
    cells: Vec<Transition>,
    highest_symbol_seen: Symbol,
    highest_state_seen: usize,
}

/// Candidates for one cell, in the order they should be *explored*: write
/// symbol ascending, direction Left then Right, target state ascending, with
/// the halt transition tried last (it never grows the reachable transition
/// graph, so it is the least interesting branch for continued search).
fn candidates_in_order(highest_symbol_seen: Symbol, highest_state_seen: usize, n_states: usize, n_symbols: usize) -> Vec<Transition> {
    let max_symbol = (highest_symbol_seen + 1).min(n_symbols as Symbol - 1);
    let max_state = (highest_state_seen + 1).min(n_states - 1);
    let mut out = Vec::new();
    for symbol in 0..=max_symbol {
        for direction in [Direction::Left, Direction::Right] {
            for target in 0..=max_state {
                out.push(Transition {
                    write_symbol: symbol,
                    direction,
                    target_state: target as StateSlot,
                });
            }
        }
    }
    out.push(Transition::HALT_TRANSITION);
    out
}

/// Runs the machine built from `rule` forward from a blank tape, stopping
/// the instant it is about to read a cell that has not been filled in yet.
/// Returns that cell's `(state, symbol)` address.
///
/// Returns `None` if the machine halts on an already-filled transition, or
/// exceeds `max_steps` without ever reaching an unfilled cell — both mean
/// every remaining unfilled cell is unreachable from this table's start, so
/// the partial rule (with `---` left in place for those cells) is already a
/// complete, if degenerate, machine to classify.
fn find_next_unfilled_cell(rule: &Rule, n_symbols: usize, max_steps: u64) -> Option<(usize, Symbol)> {
    let mut machine = Machine::new(rule.clone());
    for _ in 0..max_steps {
        if machine.halted() {
            return None;
        }
        let state = machine.state() as usize;
        let symbol = machine.tape().peek();
        if rule.transition(state, symbol).is_undefined() {
            return Some((state, symbol));
        }
        machine.step();
    }
    None
}

/// Classification buckets, cheapest check first. Each stage runs a decider
/// with a budget scaled down from the full configured one; a machine is
/// filed in the first bucket whose decider produces a certificate.
fn classify(machine: &Machine, config: &Config) -> (Bucket, DeciderResult) {
    let (steps, halted) = machine.clone().run(config.step_limit_decider_halt());
    if halted {
        return (Bucket::Halted, DeciderResult::Halted { steps });
    }

    let cheap_tc_budget = (config.step_limit_decider_translated_cycler() / 100).max(100) as u64;
    if let DeciderResult::TranslatedCycler(r) =
        DeciderTranslatedCycler::find_with_budget(machine, cheap_tc_budget, 100)
    {
        return (
            Bucket::CheapTranslatedCycler,
            DeciderResult::TranslatedCycler(r),
        );
    }

    let cycler_result = DeciderCycler.find(machine, config);
    if matches!(cycler_result, DeciderResult::Cycler(_)) {
        return (Bucket::Cycler, cycler_result);
    }

    let medium_tc_result = DeciderTranslatedCycler.find(machine, config);
    if matches!(medium_tc_result, DeciderResult::TranslatedCycler(_)) {
        return (Bucket::MediumTranslatedCycler, medium_tc_result);
    }

    let cheap_bouncer_budget = (config.step_limit_decider_bouncer() / 10).max(1_000) as u64;
    let bouncer_result = DeciderBouncer::find_with_budget(
        machine,
        2,
        cheap_bouncer_budget,
        config.max_period(),
        config.confidence_level(),
    );
    let bouncer_result = if matches!(bouncer_result, DeciderResult::Bouncer(_)) {
        bouncer_result
    } else {
        DeciderBouncer.find(machine, config)
    };
    if matches!(bouncer_result, DeciderResult::Bouncer(_)) {
        return (Bucket::Bouncer, bouncer_result);
    }

    let mut sim = machine.clone();
    let counter_steps = config.step_limit_decider_cycler() as u64;
    let (sim_steps, sim_halted) = sim.run(counter_steps);
    if !sim_halted {
        let threshold = 25.0 * (sim_steps.max(10) as f64).log10();
        if (sim.tape().touched_len() as f64) < threshold {
            return (
                Bucket::Counter,
                DeciderResult::Undecided(UndecidedReason::NoCertificateFound),
            );
        }
    }

    let heavy_tc_budget = config
        .step_limit_decider_translated_cycler()
        .saturating_mul(10) as u64;
    if let DeciderResult::TranslatedCycler(r) =
        DeciderTranslatedCycler::find_with_budget(machine, heavy_tc_budget, 100)
    {
        return (
            Bucket::HeavyTranslatedCycler,
            DeciderResult::TranslatedCycler(r),
        );
    }

    (
        Bucket::Unclassified,
        DeciderResult::Undecided(UndecidedReason::StepLimit),
    )
}

/// Buffered, lazily-opened bucket output files under
/// `<output_dir>/<n_states>x<n_symbols>/<bucket>.txt`.
struct BucketWriters {
    dir: PathBuf,
    open: HashMap<Bucket, BufWriter<File>>,
}

impl BucketWriters {
    fn new(config: &Config) -> Result<Self, GenericError> {
        let dir = PathBuf::from(config.config_toml().output_dir())
            .join(format!("{}x{}", config.n_states(), config.n_symbols()));
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            open: HashMap::new(),
        })
    }

    fn write(&mut self, bucket: Bucket, line: &str) -> Result<(), GenericError> {
        if !self.open.contains_key(&bucket) {
            let path = self.dir.join(format!("{}.txt", bucket.sub_dir()));
            let file = File::create(path)?;
            self.open.insert(bucket, BufWriter::new(file));
        }
        let writer = self.open.get_mut(&bucket).unwrap();
        writeln!(writer, "{line}")?;
        Ok(())
    }

    fn flush_all(&mut self) -> Result<(), GenericError> {
        for writer in self.open.values_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

/// Per-bucket counts after a bounded sweep.
#[derive(Debug, Default, Clone)]
pub struct EnumerationSummary {
    pub counts: HashMap<Bucket, u64>,
    pub total_visited: u64,
}

/// Bounded TNF tree enumerator for `(n_states, n_symbols)`, driven by an
/// explicit stack of [`Frame`]s rather than recursion (so the traversal
/// depth is independent of the host stack size).
pub struct Enumerator {
    n_states: usize,
    n_symbols: usize,
    stack: Vec<Frame>,
}

impl Enumerator {
    pub fn new(config: &Config) -> Self {
        let n_states = config.n_states();
        let n_symbols = config.n_symbols();
        let root = Frame {
            cells: vec![Transition::UNDEFINED; n_states * n_symbols],
            highest_symbol_seen: 0,
            highest_state_seen: 0,
        };
        Self {
            n_states,
            n_symbols,
            stack: vec![root],
        }
    }

    /// Runs the sweep to completion or until `config.machines_limit()`
    /// complete machines have been classified, writing each classified
    /// machine's canonical TNF to its bucket file and printing progress
    /// through a [`Reporter`] when `config.verbose()`.
    pub fn run(&mut self, config: &Config) -> Result<EnumerationSummary, GenericError> {
        let mut writers = BucketWriters::new(config)?;
        let mut reporter = Reporter::new(config.machines_limit());
        let mut summary = EnumerationSummary::default();

        let reachability_budget = config.step_limit_decider_halt();

        while let Some(frame) = self.stack.pop() {
            let rule = Rule::from_table(self.n_states, self.n_symbols, frame.cells.clone());

            match find_next_unfilled_cell(&rule, self.n_symbols, reachability_budget) {
                Some((state, symbol)) => {
                    let candidates = candidates_in_order(
                        frame.highest_symbol_seen,
                        frame.highest_state_seen,
                        self.n_states,
                        self.n_symbols,
                    );
                    #[cfg(feature = "debug_enumerator")]
                    eprintln!(
                        "enumerator: reached cell (state {state}, symbol {symbol}) with {} candidates",
                        candidates.len()
                    );
                    for candidate in candidates.into_iter().rev() {
                        let mut child = frame.clone();
                        child.cells[state * self.n_symbols + symbol as usize] = candidate;
                        if !candidate.is_halt() {
                            child.highest_symbol_seen = child.highest_symbol_seen.max(candidate.write_symbol);
                            child.highest_state_seen = child.highest_state_seen.max(candidate.target_state as usize);
                        }
                        self.stack.push(child);
                    }
                    continue;
                }
                None => {
                    let machine = Machine::new(rule.clone());
                    let (bucket, result) = classify(&machine, config);

                    summary.total_visited += 1;
                    *summary.counts.entry(bucket).or_insert(0) += 1;
                    #[cfg(feature = "debug_enumerator")]
                    eprintln!(
                        "enumerator: #{} {} -> {bucket} ({result})",
                        summary.total_visited,
                        rule.to_standard_tm_text_format()
                    );
                    if result_worth_recording(&result, config) {
                        let lnf = rule.lexical_normal_form();
                        writers.write(
                            bucket,
                            &format!("{}\t{}\t{}", summary.total_visited, lnf.to_standard_tm_text_format(), result),
                        )?;
                    }

                    if config.verbose() {
                        if let Some(line) = reporter.report(summary.total_visited) {
                            println!("{line}");
                        }
                    }
                    if summary.total_visited >= config.machines_limit() {
                        break;
                    }
                }
            }
        }

        writers.flush_all()?;
        Ok(summary)
    }
}

/// Bucket files skip machines whose detected period/degree is at or below
/// the configured noise floor — still counted in [`EnumerationSummary`], just
/// not written out.
fn result_worth_recording(result: &DeciderResult, config: &Config) -> bool {
    let floor = config.config_toml().min_period_to_record() as u64;
    match result {
        DeciderResult::Cycler(r) => r.period as u64 > floor,
        DeciderResult::TranslatedCycler(r) => r.period as u64 > floor,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_sweep_classifies_every_visited_machine() {
        let config = Config::builder(2, 2).machines_limit(200).verbose(false).build();
        let mut enumerator = Enumerator::new(&config);
        let summary = enumerator.run(&config).unwrap();

        assert!(summary.total_visited > 0);
        let counted: u64 = summary.counts.values().sum();
        assert_eq!(summary.total_visited, counted);
        assert!(summary.counts.contains_key(&Bucket::Halted));
    }

    #[test]
    fn unreachable_cells_are_not_filled() {
        // State 0 halts immediately on the blank tape; state 1 and the
        // second symbol of state 0 are never read, so they must stay
        // Transition::UNDEFINED instead of being handed candidates.
        let table = vec![
            Transition::HALT_TRANSITION,
            Transition::UNDEFINED,
            Transition::UNDEFINED,
            Transition::UNDEFINED,
        ];
        let rule = Rule::from_table(2, 2, table);
        assert!(find_next_unfilled_cell(&rule, 2, 1_000).is_none());
    }

    #[test]
    fn candidates_respect_canonical_extension_bound() {
        let candidates = candidates_in_order(0, 0, 3, 2);
        assert!(candidates.iter().all(|t| t.is_halt() || t.write_symbol <= 1));
        assert!(candidates
            .iter()
            .all(|t| t.is_halt() || t.target_state <= 1));
    }
}
