//! Cycler Decider: detects exact cyclers (period with no spatial
//! displacement). The preperiod binary search has one tie-break: when it
//! returns exactly its own starting low bound, it is rerun over
//! `[0, result]` to catch low-period machines the first pass undershoots.

use crate::config::{Config, StepBig, StepSmall};
use crate::decider::{Decider, DeciderId, DECIDER_CYCLER_ID};
use crate::machine::Machine;
use crate::status::{CyclerResult, DeciderResult, UndecidedReason};

const PERIOD_GROWTH_RATIO: f64 = 1.1;
const START_PERIOD_BOUND: u64 = 100;

/// Compares the touched window `[start, stop]` (in `before`'s coordinate
/// space) across `before` and `after`, each measured relative to its own
/// head — this is what lets the same routine serve both the zero-offset
/// cycler and (via the translated-cycler's own window choice) a
/// displacement-tolerant variant.
fn check_for_period(before: &Machine, after: &Machine, start: i64, stop: i64) -> bool {
    if before.state() != after.state() {
        return false;
    }
    let l = if after.tape().head() < before.tape().head() {
        after.tape().left_edge()
    } else {
        start
    };
    let h = if after.tape().head() > before.tape().head() {
        after.tape().right_edge()
    } else {
        stop
    };
    let rel_start = l - before.tape().head();
    let rel_end = h - before.tape().head();
    if rel_start > rel_end {
        return true;
    }
    let seg_before = before.segment(before.tape().head() + rel_start, before.tape().head() + rel_end);
    let seg_after = after.segment(after.tape().head() + rel_start, after.tape().head() + rel_end);
    seg_before.data == seg_after.data
}

/// Whether `m`, run forward `period` more steps, returns to the same state
/// and an identical touched window around the head.
fn is_periodic(m: &Machine, period: StepSmall) -> bool {
    let start = m.clone();
    let mut machine = m.clone();
    let mut lh = start.tape().head();
    let mut hh = lh;
    for _ in 0..period {
        if !machine.step().success {
            return false;
        }
        lh = lh.min(machine.tape().head());
        hh = hh.max(machine.tape().head());
    }
    check_for_period(&start, &machine, lh, hh)
}

/// Binary-searches the exact preperiod in `[low, high]`, given the period is
/// already known.
fn find_preperiod(machine: Machine, period: StepSmall, low: StepBig, high: StepBig) -> StepBig {
    let mut m = machine;
    if m.steps_taken() > low {
        m.reset();
    }
    while m.steps_taken() < low {
        m.step();
    }
    if is_periodic(&m, period) {
        return low;
    }
    let (mut low, mut high) = (low, high);
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        let mut copy = m.clone();
        while copy.steps_taken() < mid {
            copy.step();
        }
        if is_periodic(&copy, period) {
            high = mid;
        } else {
            low = mid;
            m = copy;
        }
    }
    high
}

struct CyclerSearch {
    period: StepSmall,
    preperiod: StepBig,
    last_machine: Machine,
}

/// The period-only search: a doubling period bound with snapshot-and-compare
/// rounds. Returns `None` if the machine halts or the step budget is
/// exhausted with no period found.
fn find_period_only(machine: &Machine, max_steps: StepBig, start_period_bound: u64) -> Option<CyclerSearch> {
    let mut period_bound = start_period_bound;
    let mut machine = machine.clone();
    let mut prev2 = machine.clone();
    let max_steps_abs = machine.steps_taken() + max_steps;

    while machine.steps_taken() <= max_steps_abs {
        let prev = machine.clone();
        let mut lh = prev.tape().head();
        let mut hh = lh;
        let mut found = None;

        for i in 1..=period_bound {
            if !machine.step().success {
                return None;
            }
            lh = lh.min(machine.tape().head());
            hh = hh.max(machine.tape().head());
            if machine.tape().head() == prev.tape().head() && check_for_period(&prev, &machine, lh, hh) {
                let last_machine = if i <= start_period_bound {
                    prev2.clone()
                } else {
                    Machine::new(machine.rule().clone())
                };
                found = Some(CyclerSearch {
                    period: i as StepSmall,
                    preperiod: machine.steps_taken() - i,
                    last_machine,
                });
                break;
            }
        }
        if let Some(result) = found {
            return Some(result);
        }
        #[cfg(feature = "debug_cycler")]
        eprintln!(
            "cycler: round done at step {}, no period <= {period_bound} found, widening",
            machine.steps_taken()
        );
        period_bound = (period_bound + 1).max((period_bound as f64 * PERIOD_GROWTH_RATIO) as u64);
        prev2 = prev;
    }
    None
}

pub struct DeciderCycler;

impl DeciderCycler {
    /// Runs the cycler search and the exact preperiod refinement. Low-period
    /// machines can make the binary search bottom out at its own low bound;
    /// when that happens the search is widened to `[0, result]` and rerun.
    pub fn find_with_budget(
        machine: &Machine,
        max_steps: StepBig,
        start_period_bound: u64,
    ) -> DeciderResult {
        let Some(search) = find_period_only(machine, max_steps, start_period_bound) else {
            return DeciderResult::Undecided(UndecidedReason::StepLimit);
        };
        #[cfg(feature = "debug_cycler")]
        eprintln!(
            "cycler: candidate period {} found by step {}",
            search.period,
            search.last_machine.steps_taken() + search.preperiod
        );
        let low = search.last_machine.steps_taken();
        let mut preperiod = find_preperiod(search.last_machine.clone(), search.period, low, search.preperiod);
        if preperiod == low {
            preperiod = find_preperiod(search.last_machine, search.period, 0, preperiod);
        }
        DeciderResult::Cycler(CyclerResult {
            period: search.period,
            preperiod,
        })
    }
}

impl Decider for DeciderCycler {
    fn decider_id(&self) -> DeciderId {
        DECIDER_CYCLER_ID
    }

    fn find(&self, machine: &Machine, config: &Config) -> DeciderResult {
        Self::find_with_budget(machine, config.step_limit_decider_cycler() as StepBig, START_PERIOD_BOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;

    fn machine(text: &str) -> Machine {
        Machine::new(Rule::from_standard_tm_text_format(text).unwrap())
    }

    #[test]
    fn small_cycler_scenario() {
        let m = machine("1RB---_1RC1RC_1LC1LB");
        let result = DeciderCycler::find_with_budget(&m, 300, 100);
        match result {
            DeciderResult::Cycler(r) => {
                assert_eq!(2, r.period);
                assert_eq!(3, r.preperiod);
            }
            other => panic!("expected Cycler, got {other:?}"),
        }
    }

    #[test]
    fn halting_machine_is_not_a_cycler() {
        let m = machine("1RB1LB_1LA1RZ");
        let result = DeciderCycler::find_with_budget(&m, 10_000, 100);
        assert!(matches!(result, DeciderResult::Undecided(_)));
    }
}
