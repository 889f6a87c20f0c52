//! Binds a [`Rule`] and a [`Tape`] together with a step counter, and exposes
//! the `step`/`peek`/`seek`/`reset` operations the deciders and enumerator
//! drive a machine through. `step` reports whether the tape grew this step,
//! which the bouncer decider depends on.

use crate::rule::{Rule, StateSlot, Symbol};
use crate::tape::{Tape, TapeSegment};

/// Result of a single [`Machine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// `false` iff the machine was already halted; no side effect occurred.
    pub success: bool,
    /// `true` iff the touched tape region grew by one cell this step.
    pub grew: bool,
}

impl StepResult {
    const REFUSED: StepResult = StepResult {
        success: false,
        grew: false,
    };
}

/// `(rule, tape, steps_taken)`. State is read from the tape, which carries
/// it so a [`TapeSegment`] snapshot is self-describing.
#[derive(Debug, Clone)]
pub struct Machine {
    rule: Rule,
    tape: Tape,
    steps_taken: u64,
}

impl Machine {
    /// A fresh machine in its initial configuration: state 0, blank tape,
    /// head at 0, zero steps taken.
    pub fn new(rule: Rule) -> Self {
        let tape = Tape::new(0);
        Self {
            rule,
            tape,
            steps_taken: 0,
        }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn state(&self) -> StateSlot {
        self.tape.state()
    }

    pub fn halted(&self) -> bool {
        let state = self.tape.state();
        state < 0 || state as usize >= self.rule.n_states()
    }

    /// `rule[state, *tape]` — the transition that would be applied on the
    /// next step, without mutating anything.
    pub fn peek(&self) -> Option<crate::rule::Transition> {
        if self.halted() {
            return None;
        }
        let symbol = self.tape.peek();
        Some(self.rule.transition(self.tape.state() as usize, symbol))
    }

    /// Applies one transition. Stepping a halted machine fails without side
    /// effect; callers distinguish "could not step" from "stepped but did
    /// not grow" via [`StepResult`].
    pub fn step(&mut self) -> StepResult {
        if self.halted() {
            return StepResult::REFUSED;
        }
        let symbol = self.tape.peek();
        let transition = self.rule.transition(self.tape.state() as usize, symbol);
        let grew = self.tape.step(transition);
        self.steps_taken += 1;
        StepResult {
            success: true,
            grew,
        }
    }

    /// Steps forward to a target step count. Stepping backwards is not
    /// supported directly — callers must [`Machine::reset`] and replay
    /// forward; this is an explicit slow path.
    pub fn seek(&mut self, target_step: u64) {
        if target_step < self.steps_taken {
            eprintln!(
                "warning: Machine::seek({target_step}) is behind current step {}; \
                 resetting and replaying forward (slow path)",
                self.steps_taken
            );
            self.reset();
        }
        while self.steps_taken < target_step && !self.halted() {
            self.step();
        }
    }

    /// Rewinds to step 0 on a blank tape; keeps the rule.
    pub fn reset(&mut self) {
        self.tape = Tape::new(0);
        self.steps_taken = 0;
    }

    pub fn segment(&self, start: i64, stop: i64) -> TapeSegment {
        self.tape.segment(start, stop)
    }

    /// Runs the machine forward until it halts or `max_steps` is reached.
    /// Returns the step count at exit and whether it halted.
    pub fn run(&mut self, max_steps: u64) -> (u64, bool) {
        while self.steps_taken < max_steps {
            if !self.step().success {
                return (self.steps_taken, true);
            }
        }
        (self.steps_taken, self.halted())
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
    fn small_cycler_halts_never() {
        let mut m = machine("1RB---_1RC1RC_1LC1LB");
        let (steps, halted) = m.run(300);
        assert_eq!(300, steps);
        assert!(!halted);
    }

    #[test]
    fn step_on_halted_machine_is_a_noop() {
        let mut m = machine("1RB1LB_1LA1RZ");
        loop {
            if !m.step().success {
                break;
            }
        }
        assert!(m.halted());
        let result = m.step();
        assert!(!result.success);
        assert!(!result.grew);
    }

    #[test]
    fn clone_and_replay_agree_with_fresh_run() {
        let mut a = machine("1RB0RC_1LB1LD_0RA0LD_1LA1RC");
        for _ in 0..1000 {
            a.step();
        }
        let mut b = machine("1RB0RC_1LB1LD_0RA0LD_1LA1RC");
        for _ in 0..1000 {
            b.step();
        }
        assert_eq!(a.steps_taken(), b.steps_taken());
        assert_eq!(a.tape().head(), b.tape().head());
        assert_eq!(a.state(), b.state());
        assert_eq!(a.halted(), b.halted());
    }

    #[test]
    fn bb5_champion_halts_at_expected_step() {
        let mut m = machine("1RB1LC_1RC1RB_1RD0LE_1LA1LD_1RZ0LA");
        let (steps, halted) = m.run(47_176_869);
        assert_eq!(47_176_869, steps);
        assert!(!halted);
        m.step();
        assert!(m.halted());
        assert_eq!(47_176_870, m.steps_taken());
        assert_eq!(-12_242, m.tape().head());
        assert_eq!(12_289, m.tape().touched_len());
        assert_eq!(4_098, m.tape().count_nonzero());
    }
}
