//! Tagged-variant result types shared by the deciders and the enumerator: a
//! `Display` impl for human-readable CLI output, one enum variant per
//! decider's positive result, and a catch-all "not found".

use std::fmt::Display;

use crate::config::{StepBig, StepSmall};
use crate::rule::Direction;

/// A certified cycler: the machine repeats exactly with no displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclerResult {
    pub period: StepSmall,
    pub preperiod: StepBig,
}

/// A certified translated cycler: repeats with a fixed signed head
/// displacement `offset` per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslatedCyclerResult {
    pub period: StepSmall,
    pub preperiod: StepBig,
    pub offset: i64,
}

/// A certified bouncer/bell: the extension-step sequence on `side` is
/// eventually a degree-`degree` polynomial in the extension count, sampled
/// at stride `x_period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BouncerResult {
    pub degree: usize,
    pub start: StepBig,
    pub x_period: usize,
    pub side: Direction,
}

/// Why a decider returned "not found" within its budget. Never a proof of
/// absence — only that nothing was detected within this bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndecidedReason {
    StepLimit,
    TapeSizeLimit,
    NoCertificateFound,
}

impl Display for UndecidedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UndecidedReason::StepLimit => write!(f, "step limit reached"),
            UndecidedReason::TapeSizeLimit => write!(f, "tape size limit reached"),
            UndecidedReason::NoCertificateFound => write!(f, "no certificate found"),
        }
    }
}

/// The outcome a single decider reports for a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeciderResult {
    Halted {
        steps: StepBig,
    },
    Cycler(CyclerResult),
    TranslatedCycler(TranslatedCyclerResult),
    Bouncer(BouncerResult),
    Undecided(UndecidedReason),
}

impl Display for DeciderResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeciderResult::Halted { steps } => write!(f, "Halted after {steps} steps"),
            DeciderResult::Cycler(r) => {
                write!(f, "Cycler: period={}, preperiod={}", r.period, r.preperiod)
            }
            DeciderResult::TranslatedCycler(r) => write!(
                f,
                "Translated-Cycler: period={}, preperiod={}, offset={}",
                r.period, r.preperiod, r.offset
            ),
            DeciderResult::Bouncer(r) => write!(
                f,
                "Bouncer: degree={}, start={}, xPeriod={}, side={:?}",
                r.degree, r.start, r.x_period, r.side
            ),
            DeciderResult::Undecided(reason) => write!(f, "Undecided: {reason}"),
        }
    }
}

/// The enumerator's classification buckets, in cost-ordered pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    CheapTranslatedCycler,
    Cycler,
    MediumTranslatedCycler,
    Bouncer,
    Counter,
    HeavyTranslatedCycler,
    Unclassified,
    Halted,
}

impl Bucket {
    pub fn sub_dir(self) -> &'static str {
        match self {
            Bucket::CheapTranslatedCycler => "cheap_translated_cycler",
            Bucket::Cycler => "cycler",
            Bucket::MediumTranslatedCycler => "medium_translated_cycler",
            Bucket::Bouncer => "bouncer",
            Bucket::Counter => "counter",
            Bucket::HeavyTranslatedCycler => "heavy_translated_cycler",
            Bucket::Unclassified => "unclassified",
            Bucket::Halted => "halted",
        }
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sub_dir())
    }
}
