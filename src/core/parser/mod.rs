//! mhchem input parser
//!
//! The parser is a set of table-driven state machines. Each machine maps a
//! state to an ordered list of rules; a rule names a pattern and the actions
//! to run when the pattern matches the start of the remaining input. Actions
//! fill a per-invocation [`Buffer`] and emit [`Node`]s, and may recurse into
//! other machines for sub-parts (subscripts, arrow conditions, units, ...).
//!
//! ## Usage Examples
//!
//! ```rust
//! use chemtex::core::parser::parse;
//! use chemtex::core::node::Node;
//!
//! let nodes = parse("H2O", "ce").unwrap();
//! assert!(matches!(nodes[0], Node::ChemFive { .. }));
//! ```

#[macro_use]
mod transitions;

pub mod actions;
pub mod buffer;
pub mod machines;
pub mod observe;
pub mod patterns;

pub use actions::{ActionFn, ActionTable};
pub use buffer::Buffer;
pub use patterns::{match_pattern, Matched, PatternMatch};
pub use transitions::{compile, ActionSpec, Param, RawTransitions, Task, Transition, Transitions};

use crate::core::node::Node;
use crate::utils::error::{ChemError, ChemResult};

/// Number of consecutive passes over unchanged input before giving up
const WATCHDOG_LIMIT: u32 = 10;

/// A named, compiled state machine with its local actions
pub struct StateMachine {
    pub name: &'static str,
    pub transitions: Transitions,
    pub actions: ActionTable,
}

impl StateMachine {
    pub fn new(name: &'static str, transitions: Transitions, actions: ActionTable) -> Self {
        StateMachine {
            name,
            transitions,
            actions,
        }
    }

    /// Rules of `state`, falling back to the `*` rules
    fn rules(&self, state: &str) -> ChemResult<&[Transition]> {
        self.transitions
            .get(state)
            .or_else(|| self.transitions.get("*"))
            .map(Vec::as_slice)
            .ok_or_else(|| ChemError::UnmatchedInput {
                machine: self.name.to_string(),
                state: state.to_string(),
                input: String::new(),
            })
    }

    /// Resolve an action, machine-local first
    pub fn action(&self, name: &str) -> ChemResult<ActionFn> {
        self.actions
            .get(name)
            .or_else(|| actions::GENERIC_ACTIONS.get(name))
            .copied()
            .ok_or_else(|| ChemError::UnknownAction {
                machine: self.name.to_string(),
                name: name.to_string(),
            })
    }

    fn execute(&self, spec: &ActionSpec, buffer: &mut Buffer, m: &Matched) -> ChemResult<Vec<Node>> {
        let action = self.action(spec.name)?;
        action(buffer, m, spec.param.as_ref())
    }
}

/// Parse `input` with the registered machine `machine`
pub fn parse(input: &str, machine: &str) -> ChemResult<Vec<Node>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    parse_with(machines::get(machine)?, input)
}

/// Parse `input` with an explicit machine
pub fn parse_with(machine: &StateMachine, input: &str) -> ChemResult<Vec<Node>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let normalized = normalize(input);
    let mut input: &str = &normalized;
    let mut state: &'static str = "0";
    let mut buffer = Buffer::new();
    let mut output = Vec::new();

    let mut last_input: Option<&str> = None;
    let mut watchdog = WATCHDOG_LIMIT;
    loop {
        if last_input != Some(input) {
            watchdog = WATCHDOG_LIMIT;
            last_input = Some(input);
        } else {
            watchdog = watchdog.saturating_sub(1);
        }

        let mut matched = false;
        for rule in machine.rules(state)? {
            let Some(found) = match_pattern(rule.pattern, input)? else {
                continue;
            };
            matched = true;
            for spec in &rule.task.actions {
                output.extend(machine.execute(spec, &mut buffer, &found.value)?);
            }
            if let Some(next) = rule.task.next_state {
                state = next;
            }
            if input.is_empty() {
                return Ok(output);
            }
            if !rule.task.revisit {
                input = found.remainder;
            }
            if !rule.task.to_continue {
                break;
            }
        }

        if !matched {
            return Err(ChemError::UnmatchedInput {
                machine: machine.name.to_string(),
                state: state.to_string(),
                input: input.to_string(),
            });
        }
        if watchdog == 0 {
            return Err(ChemError::Stagnation {
                machine: machine.name.to_string(),
                state: state.to_string(),
                input: input.to_string(),
            });
        }
    }
}

/// Line breaks become spaces, dash variants become `-`, `…` becomes `...`
fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\n' => out.push(' '),
            '\u{2212}' | '\u{2013}' | '\u{2014}' | '\u{2010}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxhash::FxHashMap;
    use pretty_assertions::assert_eq;

    fn literals(nodes: &[Node]) -> Vec<&str> {
        nodes
            .iter()
            .filter_map(|n| match n {
                Node::Literal { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("", "ce").unwrap(), Vec::<Node>::new());
        assert_eq!(parse("", "no such machine").unwrap(), Vec::<Node>::new());
    }

    #[test]
    fn test_unknown_machine() {
        assert_eq!(
            parse("x", "no such machine").unwrap_err(),
            ChemError::unknown_machine("no such machine")
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // "digits" and "else" both match "1"; "digits" is declared first
        let machine = StateMachine::new(
            "ordered",
            transitions! {
                "empty" => { "*" => task![] },
                "digits" => { "*" => task![("write", "digits")] },
                "else" => { "*" => task![("write", "else")] },
            },
            FxHashMap::default(),
        );
        let nodes = parse_with(&machine, "12a").unwrap();
        assert_eq!(literals(&nodes), vec!["digits", "else"]);
    }

    #[test]
    fn test_continue_keeps_scanning() {
        let machine = StateMachine::new(
            "continued",
            transitions! {
                "empty" => { "*" => task![] },
                "else" => { "0" => task![("write", "first")].revisit().and_continue() },
                "else2" => { "*" => task!["copy"] },
            },
            FxHashMap::default(),
        );
        let nodes = parse_with(&machine, "ab").unwrap();
        assert_eq!(literals(&nodes), vec!["first", "a", "first", "b"]);
    }

    #[test]
    fn test_revisit_without_progress_stagnates() {
        let machine = StateMachine::new(
            "stuck",
            transitions! {
                "else" => { "*" => task![].revisit() },
            },
            FxHashMap::default(),
        );
        match parse_with(&machine, "x").unwrap_err() {
            ChemError::Stagnation { machine, input, .. } => {
                assert_eq!(machine, "stuck");
                assert_eq!(input, "x");
            }
            other => panic!("expected stagnation, got {:?}", other),
        }
    }

    #[test]
    fn test_unmatched_input() {
        let machine = StateMachine::new(
            "digits only",
            transitions! {
                "empty" => { "*" => task![] },
                "digits" => { "*" => task!["copy"] },
            },
            FxHashMap::default(),
        );
        assert!(matches!(
            parse_with(&machine, "12a"),
            Err(ChemError::UnmatchedInput { ref input, .. }) if input == "a"
        ));
    }

    #[test]
    fn test_unknown_action() {
        let machine = StateMachine::new(
            "broken",
            transitions! {
                "else" => { "*" => task!["no such action"] },
            },
            FxHashMap::default(),
        );
        assert!(matches!(
            parse_with(&machine, "x"),
            Err(ChemError::UnknownAction { .. })
        ));
    }

    #[test]
    fn test_input_is_normalized() {
        assert_eq!(normalize("a\nb\u{2212}c\u{2026}"), "a b-c...");
    }
}
