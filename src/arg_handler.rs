//! Hand-rolled CLI argument reader: '-m 1RB1LC_1RC1RB_1RD0LE_1LA1LD_1RZ0LA'.
//! See [`help_string`] for the full surface. Deliberately not clap: this
//! crate's CLI footprint is two flags plus a single positional TNF string.

use crate::known_machines;
use crate::rule::Rule;

/// The return value of the argument handler.
#[non_exhaustive]
pub enum ArgValue {
    Rule(Box<Rule>),
    /// Returned when the arg value leads to an action that was already
    /// performed directly (e.g. printing help).
    Done,
    None,
    Error(String),
}

pub fn help_string() -> String {
    let mut s = String::new();
    s.push_str("This program accepts the following arguments:\n");
    s.push_str("-h, --help:                  This help text\n");
    s.push_str("-v, --verbose:               Print step-by-step detail\n");
    s.push_str("-m, --machine <transitions>: Run machine, e.g. '-m 1RB1LC_1RC1RB_1RD0LE_1LA1LD_1RZ0LA'\n");
    s.push_str("-k, --known <name>:          Run a named reference machine, e.g. '-k bb5_champion'\n");
    s
}

pub fn standard_args(args: &[String]) -> ArgValue {
    if args.len() <= 1 {
        return ArgValue::None;
    }

    if matches!(args[1].as_str(), "-h" | "--help") {
        println!("{}", help_string());
        return ArgValue::Done;
    }

    if args.len() == 3 {
        match args[1].as_str() {
            "-m" | "--machine" => {
                return match Rule::from_standard_tm_text_format(&args[2]) {
                    Ok(rule) => ArgValue::Rule(Box::new(rule)),
                    Err(e) => ArgValue::Error(e.to_string()),
                };
            }
            "-k" | "--known" => {
                return match known_machines::by_name(&args[2]) {
                    Some(text) => match Rule::from_standard_tm_text_format(text) {
                        Ok(rule) => ArgValue::Rule(Box::new(rule)),
                        Err(e) => ArgValue::Error(e.to_string()),
                    },
                    None => ArgValue::Error(format!("No known machine named '{}'", args[2])),
                };
            }
            _ => {}
        }
    }

    println!("Invalid arguments: {:?}\n", &args[1..]);
    println!("{}", help_string());
    ArgValue::None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn machine_flag_parses_a_tnf_string() {
        let text = "1RB1LB_1LA1RZ";
        let args = vec!["path".to_string(), "-m".to_string(), text.to_string()];
        let r = standard_args(&args);
        let rule = match r {
            ArgValue::Rule(rule) => rule,
            _ => panic!("expected ArgValue::Rule"),
        };
        assert_eq!(text, rule.to_standard_tm_text_format());
    }

    #[test]
    fn known_flag_resolves_by_name() {
        let args = vec!["path".to_string(), "-k".to_string(), "bb5_champion".to_string()];
        let r = standard_args(&args);
        assert!(matches!(r, ArgValue::Rule(_)));
    }

    #[test]
    fn unknown_known_name_is_an_error() {
        let args = vec!["path".to_string(), "-k".to_string(), "not_a_machine".to_string()];
        let r = standard_args(&args);
        assert!(matches!(r, ArgValue::Error(_)));
    }

    #[test]
    fn help_flag_is_handled_directly() {
        let args = vec!["path".to_string(), "-h".to_string()];
        assert!(matches!(standard_args(&args), ArgValue::Done));
    }
}
