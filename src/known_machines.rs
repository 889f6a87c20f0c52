//! Named reference machines in Standard TM Text Format, used by tests and
//! the demo binaries. `antihydra` and the other Collatz-like curiosities are
//! intentionally not carried here — this crate's scope stops at deciding
//! cyclers, translated cyclers, and bouncers/bells, not Collatz-style proof
//! search.

/// BB(2) champion. Halts after 6 steps.
pub const BB2_CHAMPION: &str = "1RB1LB_1LA1RZ";
/// BB(3) champion. Halts after 21 steps.
pub const BB3_CHAMPION: &str = "1RB1RZ_1LB0RC_1LC1LA";
/// BB(4) champion. Halts after 107 steps.
pub const BB4_CHAMPION: &str = "1RB1LB_1LA0LC_1RZ1LD_1RD0RA";
/// BB(5) champion. Halts after 47,176,870 steps.
pub const BB5_CHAMPION: &str = "1RB1LC_1RC1RB_1RD0LE_1LA1LD_1RZ0LA";
/// BB(6) current champion (state D is the rarest by far).
pub const BB6_CHAMPION: &str = "1RB0LD_1RC0RF_1LC1LA_0LE1RZ_1LF0RB_0RC0RE";
/// BB(2, 3) champion. Halts after 38 steps.
pub const BB23_CHAMPION: &str = "1RB2LB1RZ_2LA2RB1LB";
/// A lin-recurrent machine with an unusually long preperiod: 158,491
/// preperiod, 17,620 period, offset 118.
pub const BOYD_JOHNSON: &str = "1RB0RC_1LB1LD_0RA0LD_1LA1RC";
/// Another lin-recurrent machine: 7,170 preperiod, 29,117 period.
pub const BOYD_JOHNSON_2: &str = "1RB0RA_1RC0RB_1LD1LC_1RA0LC";
/// Another lin-recurrent machine: 28,812 preperiod, 5,588 period.
pub const BOYD_JOHNSON_3: &str = "1RB1RA_0RC0LB_0RD0RA_1LD0LA";

/// Resolves a case-insensitive name to a TNF string, or `None` if unknown.
pub fn by_name(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "bb2_champion" | "bb2champion" => Some(BB2_CHAMPION),
        "bb3_champion" | "bb3champion" => Some(BB3_CHAMPION),
        "bb4_champion" | "bb4champion" => Some(BB4_CHAMPION),
        "bb5_champion" | "bb5champion" => Some(BB5_CHAMPION),
        "bb6_champion" | "bb6champion" => Some(BB6_CHAMPION),
        "bb23_champion" | "bb23champion" => Some(BB23_CHAMPION),
        "boyd_johnson" | "boydjohnson" => Some(BOYD_JOHNSON),
        "boyd_johnson_2" | "boydjohnson2" => Some(BOYD_JOHNSON_2),
        "boyd_johnson_3" | "boydjohnson3" => Some(BOYD_JOHNSON_3),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;

    #[test]
    fn every_known_machine_parses() {
        for name in [
            "bb2_champion",
            "bb3_champion",
            "bb4_champion",
            "bb5_champion",
            "bb6_champion",
            "bb23_champion",
            "boyd_johnson",
            "boyd_johnson_2",
            "boyd_johnson_3",
        ] {
            let text = by_name(name).unwrap();
            assert!(Rule::from_standard_tm_text_format(text).is_ok(), "{name} failed to parse");
        }
    }

    #[test]
    fn unknown_name_returns_none() {
        assert!(by_name("not_a_machine").is_none());
    }
}
