//! The decider family: behavioural classifiers for Turing machines. Each
//! decider implements [`Decider`] and is idempotent: given a machine, it
//! either produces a positive certificate or reports "undecided" within its
//! budget — never "definitely not in the class".

pub mod bouncer;
pub mod cycler;
pub mod translated_cycler;

use crate::config::Config;
use crate::machine::Machine;
use crate::status::DeciderResult;

/// Identifies a decider for logging and bucket-file naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeciderId {
    pub id: u8,
    pub name: &'static str,
    pub sub_dir: &'static str,
}

pub const DECIDER_CYCLER_ID: DeciderId = DeciderId {
    id: 1,
    name: "Cycler",
    sub_dir: "cycler",
};
pub const DECIDER_TRANSLATED_CYCLER_ID: DeciderId = DeciderId {
    id: 2,
    name: "Translated-Cycler",
    sub_dir: "translated_cycler",
};
pub const DECIDER_BOUNCER_ID: DeciderId = DeciderId {
    id: 3,
    name: "Bouncer",
    sub_dir: "bouncer",
};

/// Shared decider interface: `find(machine, config) -> DeciderResult`.
pub trait Decider {
    fn decider_id(&self) -> DeciderId;

    /// Runs the decider on a clone of `machine` (deciders never mutate the
    /// caller's machine) and reports a certificate or "undecided".
    fn find(&self, machine: &Machine, config: &Config) -> DeciderResult;
}
