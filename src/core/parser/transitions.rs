//! Transition table compiler
//!
//! State machines are written as a table keyed by pattern name, then by state
//! name, with a [`Task`] per cell. Both keys may list alternatives separated
//! by `|`, and the state `*` stands for every state of the machine. The
//! compiler turns such a table into one ordered rule list per state:
//!
//! ```text
//! { pattern: { "a|b": task } }  =>  { a: [(pattern, task)], b: [(pattern, task)] }
//! ```
//!
//! Rule order follows the order of the pattern keys in the table; the first
//! matching rule wins.

use fxhash::FxHashMap;
use indexmap::IndexMap;

/// Action parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Str(&'static str),
    Int(u8),
    Bool(bool),
}

impl Param {
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Param::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<u8> {
        match self {
            Param::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Param::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// An action referenced by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub name: &'static str,
    pub param: Option<Param>,
}

impl From<&'static str> for ActionSpec {
    fn from(name: &'static str) -> Self {
        ActionSpec { name, param: None }
    }
}

impl From<(&'static str, &'static str)> for ActionSpec {
    fn from((name, param): (&'static str, &'static str)) -> Self {
        ActionSpec {
            name,
            param: Some(Param::Str(param)),
        }
    }
}

impl From<(&'static str, u8)> for ActionSpec {
    fn from((name, param): (&'static str, u8)) -> Self {
        ActionSpec {
            name,
            param: Some(Param::Int(param)),
        }
    }
}

impl From<(&'static str, bool)> for ActionSpec {
    fn from((name, param): (&'static str, bool)) -> Self {
        ActionSpec {
            name,
            param: Some(Param::Bool(param)),
        }
    }
}

/// What to do when a rule's pattern matches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Task {
    pub actions: Vec<ActionSpec>,
    pub next_state: Option<&'static str>,
    /// Keep the input unconsumed so it is matched again in the next state
    pub revisit: bool,
    /// Keep trying the following rules at the same position
    pub to_continue: bool,
}

impl Task {
    pub fn new(actions: Vec<ActionSpec>) -> Self {
        Task {
            actions,
            ..Task::default()
        }
    }

    pub fn next(mut self, state: &'static str) -> Self {
        self.next_state = Some(state);
        self
    }

    pub fn revisit(mut self) -> Self {
        self.revisit = true;
        self
    }

    pub fn and_continue(mut self) -> Self {
        self.to_continue = true;
        self
    }
}

/// One compiled rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub pattern: &'static str,
    pub task: Task,
}

/// Compiled rules per state
pub type Transitions = FxHashMap<&'static str, Vec<Transition>>;

/// Table as written: pattern key, then (state key, task) cells, in declaration order
pub type RawTransitions = Vec<(&'static str, Vec<(&'static str, Task)>)>;

/// Build a [`Task`] from a list of actions (`"name"` or `("name", param)`)
macro_rules! task {
    ($($action:expr),* $(,)?) => {
        $crate::core::parser::transitions::Task::new(vec![
            $($crate::core::parser::transitions::ActionSpec::from($action)),*
        ])
    };
}

/// Write and compile a transition table
macro_rules! transitions {
    ($($pattern:literal => { $($states:literal => $task:expr),* $(,)? }),* $(,)?) => {
        $crate::core::parser::transitions::compile(vec![
            $(($pattern, vec![$(($states, $task)),*])),*
        ])
    };
}

pub fn compile(raw: RawTransitions) -> Transitions {
    // All states must be known before `*` cells are distributed
    let mut states: IndexMap<&'static str, Vec<Transition>> = IndexMap::new();
    for (_, cells) in &raw {
        for &(state_key, _) in cells {
            for state in state_key.split('|') {
                states.entry(state).or_default();
            }
        }
    }

    for (pattern_key, cells) in raw {
        for (state_key, task) in cells {
            for state in state_key.split('|') {
                for pattern in pattern_key.split('|') {
                    let rule = Transition {
                        pattern,
                        task: task.clone(),
                    };
                    if state == "*" {
                        for rules in states.values_mut() {
                            rules.push(rule.clone());
                        }
                    } else if let Some(rules) = states.get_mut(state) {
                        rules.push(rule);
                    }
                }
            }
        }
    }

    states.into_iter().collect()
}
