//! Pass-through machine: text is copied, `\ce{}` and `\pu{}` are translated
//! and wrapped in one brace pair each.

use fxhash::FxHashMap;

use crate::core::parser::StateMachine;

pub(super) fn machine() -> StateMachine {
    let transitions = transitions! {
        "empty" => { "0" => task!["copy"] },
        "\\ce{(...)}" => { "0" => task![("write", "{"), "ce", ("write", "}")] },
        "\\pu{(...)}" => { "0" => task![("write", "{"), "pu", ("write", "}")] },
        "else" => { "0" => task!["copy"] },
    };
    StateMachine::new("tex", transitions, FxHashMap::default())
}
