//! Translated-Cycler Decider: detects lin-recurrence with a fixed spatial
//! offset per period, via tape-edge anchoring (advance until the tape
//! grows, anchor there) and an asymmetric window comparison. The preperiod
//! refinement reuses the same binary search as the plain cycler.

use crate::config::{Config, StepBig, StepSmall};
use crate::decider::{Decider, DeciderId, DECIDER_TRANSLATED_CYCLER_ID};
use crate::machine::Machine;
use crate::status::{DeciderResult, TranslatedCyclerResult, UndecidedReason};

const PERIOD_GROWTH_RATIO: f64 = 1.1;
const START_PERIOD_BOUND: u64 = 1_000;

fn spans_equal(a: &Machine, b: &Machine, rel_start: i64, rel_end: i64) -> bool {
    if rel_start > rel_end {
        return true;
    }
    let seg_a = a.segment(a.tape().head() + rel_start, a.tape().head() + rel_end);
    let seg_b = b.segment(b.tape().head() + rel_start, b.tape().head() + rel_end);
    seg_a.data == seg_b.data
}

/// A variant of [`super::cycler`]'s periodicity check for the translated
/// case: "periodic" means same state with a displaced head, not an
/// identical configuration, so it's kept as its own small routine.
fn is_periodic_translated(m: &Machine, period: StepSmall, start_head: i64) -> bool {
    let mut machine = m.clone();
    let start_state = m.state();
    for _ in 0..period {
        if !machine.step().success {
            return false;
        }
    }
    machine.state() == start_state && machine.tape().head() != start_head
}

struct TranslatedSearch {
    period: StepSmall,
    preperiod: StepBig,
    offset: i64,
    last_machine: Machine,
}

fn find_period_only(
    machine: &Machine,
    max_steps: StepBig,
    start_period_bound: u64,
) -> Option<TranslatedSearch> {
    let mut period_bound = start_period_bound;
    let mut prev_period_bound = 0u64;
    let mut machine = machine.clone();
    let mut prev2 = machine.clone();
    let max_steps_abs = machine.steps_taken() + max_steps;

    while machine.steps_taken() <= max_steps_abs {
        let mut anchor: Option<Machine> = None;
        let mut expand_dir = 0i8;

        for _ in 0..period_bound {
            let step = machine.step();
            if !step.success {
                return None;
            }
            if step.grew {
                anchor = Some(machine.clone());
                expand_dir = if machine.tape().head() < 0 { -1 } else { 1 };
                break;
            }
        }
        let Some(prev) = anchor else {
            continue;
        };

        let mut lh = prev.tape().head();
        let mut hh = lh;
        let mut found = None;

        for i in 1..=period_bound {
            let step = machine.step();
            if !step.success {
                return None;
            }
            lh = lh.min(machine.tape().head());
            hh = hh.max(machine.tape().head());
            if step.grew && machine.state() == prev.state() {
                let expand_dir2 = if machine.tape().head() < 0 { -1 } else { 1 };
                if expand_dir != expand_dir2 {
                    continue;
                }
                let (l, h) = if machine.tape().head() < 0 {
                    (0, hh - prev.tape().head())
                } else {
                    (lh - prev.tape().head(), 0)
                };
                if spans_equal(&prev, &machine, l, h) {
                    let last_machine = if prev_period_bound >= i {
                        prev2.clone()
                    } else {
                        Machine::new(machine.rule().clone())
                    };
                    found = Some(TranslatedSearch {
                        period: i as StepSmall,
                        preperiod: machine.steps_taken() - i,
                        offset: machine.tape().head() - prev.tape().head(),
                        last_machine,
                    });
                    break;
                }
            }
        }
        if let Some(result) = found {
            return Some(result);
        }
        #[cfg(feature = "debug_cycler")]
        eprintln!(
            "translated-cycler: round done at step {}, no period <= {period_bound} found, widening",
            machine.steps_taken()
        );
        prev_period_bound = period_bound;
        period_bound = (period_bound + 1).max((period_bound as f64 * PERIOD_GROWTH_RATIO) as u64);
        prev2 = prev;
    }
    None
}

/// Binary-searches the exact preperiod for a translated cycler: same
/// bisection as the plain cycler, but "periodic" means "same state and
/// displaced head" rather than "identical configuration".
fn find_preperiod(machine: Machine, period: StepSmall, low: StepBig, high: StepBig) -> StepBig {
    let mut m = machine;
    if m.steps_taken() > low {
        m.reset();
    }
    while m.steps_taken() < low {
        m.step();
    }
    let start_head = m.tape().head();
    if is_periodic_translated(&m, period, start_head) {
        return low;
    }
    let (mut low, mut high) = (low, high);
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        let mut copy = m.clone();
        while copy.steps_taken() < mid {
            copy.step();
        }
        let head_at_copy = copy.tape().head();
        if is_periodic_translated(&copy, period, head_at_copy) {
            high = mid;
        } else {
            low = mid;
            m = copy;
        }
    }
    high
}

pub struct DeciderTranslatedCycler;

impl DeciderTranslatedCycler {
    pub fn find_with_budget(
        machine: &Machine,
        max_steps: StepBig,
        start_period_bound: u64,
    ) -> DeciderResult {
        let Some(search) = find_period_only(machine, max_steps, start_period_bound) else {
            return DeciderResult::Undecided(UndecidedReason::StepLimit);
        };
        let low = search.last_machine.steps_taken();
        let mut preperiod = find_preperiod(search.last_machine.clone(), search.period, low, search.preperiod);
        if preperiod == low {
            preperiod = find_preperiod(search.last_machine, search.period, 0, preperiod);
        }
        DeciderResult::TranslatedCycler(TranslatedCyclerResult {
            period: search.period,
            preperiod,
            offset: search.offset,
        })
    }
}

impl Decider for DeciderTranslatedCycler {
    fn decider_id(&self) -> DeciderId {
        DECIDER_TRANSLATED_CYCLER_ID
    }

    fn find(&self, machine: &Machine, config: &Config) -> DeciderResult {
        Self::find_with_budget(
            machine,
            config.step_limit_decider_translated_cycler() as StepBig,
            START_PERIOD_BOUND,
        )
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
    fn boyd_johnson_translated_cycler() {
        let m = machine("1RB0RC_1LB1LD_0RA0LD_1LA1RC");
        let result = DeciderTranslatedCycler::find_with_budget(&m, 10_000_000, START_PERIOD_BOUND);
        match result {
            DeciderResult::TranslatedCycler(r) => {
                assert_eq!(17_620, r.period);
                assert_eq!(158_491, r.preperiod);
                assert_eq!(118, r.offset);
            }
            other => panic!("expected TranslatedCycler, got {other:?}"),
        }
    }

    #[test]
    fn offset_minus_one_translated_cycler() {
        let m = machine("1RB1LC_1RD1RB_0RD0RC_1LD1LA");
        let result = DeciderTranslatedCycler::find_with_budget(&m, 50_000_000, START_PERIOD_BOUND);
        match result {
            DeciderResult::TranslatedCycler(r) => {
                assert_eq!(1, r.period);
                assert_eq!(32_779_478, r.preperiod);
                assert_eq!(-1, r.offset);
            }
            other => panic!("expected TranslatedCycler, got {other:?}"),
        }
    }
}
