//! Bouncer / Bell Decider: detects a polynomial tape-growth signature via
//! the k-th finite difference of the step-count sequence of extension
//! events on one side. A degree-2 signature is a classical bouncer;
//! degree >= 3 is a bell.

use crate::config::{Config, StepBig};
use crate::decider::{Decider, DeciderId, DECIDER_BOUNCER_ID};
use crate::machine::Machine;
use crate::rule::Direction;
use crate::status::{BouncerResult, DeciderResult, UndecidedReason};

/// Checks whether the last `1 + (degree + confidence_level - 1) * p` records
/// of `v`, sampled at stride `p`, form a degree-`d` polynomial (`d <=
/// degree`): the `d`-th successive difference is constant and positive.
/// Returns `(degree_found, start_step)`.
fn check_poly(v: &[StepBig], degree: usize, p: usize, confidence_level: usize) -> Option<(usize, StepBig)> {
    let n = degree + confidence_level;
    if n == 0 || p == 0 {
        return None;
    }
    let capacity_needed = 1 + (n - 1) * p;
    if v.len() < capacity_needed {
        return None;
    }
    let start_idx = v.len() - capacity_needed;
    let mut w: Vec<i128> = (0..n).map(|i| v[start_idx + i * p] as i128).collect();

    for d in 1..=degree {
        if w.len() < 2 {
            break;
        }
        for i in 0..w.len() - 1 {
            w[i] = w[i + 1] - w[i];
        }
        w.pop();
        if w.len() >= 2 && w.windows(2).all(|pair| pair[0] == pair[1]) && w[0] > 0 {
            return Some((d, v[start_idx]));
        }
    }
    None
}

pub struct DeciderBouncer;

impl DeciderBouncer {
    /// Runs the bouncer/bell search up to `max_steps`, polynomial degree up
    /// to `degree`, spatial period up to `max_period`.
    pub fn find_with_budget(
        machine: &Machine,
        degree: usize,
        max_steps: StepBig,
        max_period: usize,
        confidence_level: usize,
    ) -> DeciderResult {
        let mut machine = machine.clone();
        let mut ls: Vec<StepBig> = vec![0];
        let mut rs: Vec<StepBig> = vec![0];

        while !machine.halted() && machine.steps_taken() < max_steps {
            let step = machine.step();
            if !step.grew {
                continue;
            }
            let (side, records) = if machine.tape().head() < 0 {
                (Direction::Left, &mut ls)
            } else {
                (Direction::Right, &mut rs)
            };
            records.push(machine.steps_taken());
            for p in 1..=max_period {
                if let Some((found_degree, start)) = check_poly(records, degree, p, confidence_level) {
                    return DeciderResult::Bouncer(BouncerResult {
                        degree: found_degree,
                        start,
                        x_period: p,
                        side,
                    });
                }
            }
        }
        DeciderResult::Undecided(UndecidedReason::StepLimit)
    }
}

impl Decider for DeciderBouncer {
    fn decider_id(&self) -> DeciderId {
        DECIDER_BOUNCER_ID
    }

    fn find(&self, machine: &Machine, config: &Config) -> DeciderResult {
        Self::find_with_budget(
            machine,
            config.bouncer_max_degree(),
            config.step_limit_decider_bouncer() as StepBig,
            config.max_period(),
            config.confidence_level(),
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
    fn quadratic_bouncer_scenario() {
        let m = machine("1RB0RC_1RC1LC_1LD1RA_0LB0LA");
        let result = DeciderBouncer::find_with_budget(&m, 2, 100_000, 100, 5);
        match result {
            DeciderResult::Bouncer(r) => {
                assert_eq!(2, r.degree);
                assert_eq!(65, r.start);
                assert_eq!(36, r.x_period);
            }
            other => panic!("expected Bouncer, got {other:?}"),
        }
    }

    #[test]
    fn cubic_bell_scenario() {
        let m = machine("1RB0LB_1RC1LB_0LD0RD_1LA1RD");
        let result = DeciderBouncer::find_with_budget(&m, 4, 100_000_000, 200, 5);
        match result {
            DeciderResult::Bouncer(r) => {
                assert_eq!(3, r.degree);
                assert_eq!(145, r.start);
                assert_eq!(2, r.x_period);
            }
            other => panic!("expected Bouncer, got {other:?}"),
        }
    }
}
