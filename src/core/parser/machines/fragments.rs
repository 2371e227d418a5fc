//! Machines for the parts of a chemical entity
//!
//! The `ce` machine collects raw strings for amount, symbol, sub- and
//! superscripts; these machines turn each part into nodes.

use fxhash::FxHashMap;

use crate::core::node::Node;
use crate::core::parser::actions::{two_groups, ActionTable};
use crate::core::parser::{parse, Buffer, Matched, Param, StateMachine};
use crate::utils::error::ChemResult;

/// `a`: stoichiometric amount
pub(super) fn amount() -> StateMachine {
    let transitions = transitions! {
        "empty" => { "*" => task![] },
        "1/2$" => { "0" => task!["1/2"] },
        "else" => { "0" => task![].next("1").revisit() },
        "${(...)}$__$(...)$" => { "*" => task!["tex-math tight"].next("1") },
        "," => { "*" => task![("insert", "commaDecimal")] },
        "else2" => { "*" => task!["copy"] },
    };
    StateMachine::new("a", transitions, FxHashMap::default())
}

/// `o`: main symbol
pub(super) fn symbol() -> StateMachine {
    let transitions = transitions! {
        "empty" => { "*" => task![] },
        "1/2$" => { "0" => task!["1/2"] },
        "else" => { "0" => task![].next("1").revisit() },
        "letters" => { "*" => task!["rm"] },
        "\\ca" => { "*" => task![("insert", "circa")] },
        "\\pu{(...)}" => { "*" => task![("write", "{"), "pu", ("write", "}")] },
        "\\x{}{}|\\x{}|\\x" => { "*" => task!["copy"] },
        "${(...)}$__$(...)$" => { "*" => task!["tex-math"] },
        "{(...)}" => { "*" => task![("write", "{"), "text", ("write", "}")] },
        "else2" => { "*" => task!["copy"] },
    };
    StateMachine::new("o", transitions, FxHashMap::default())
}

/// `text`: upright text with embedded math
pub(super) fn text() -> StateMachine {
    let transitions = transitions! {
        "empty" => { "*" => task!["output"] },
        "{...}" => { "*" => task!["text="] },
        "${(...)}$__$(...)$" => { "*" => task!["tex-math"] },
        "\\greek" => { "*" => task!["output", "rm"] },
        "\\pu{(...)}" => { "*" => task!["output", ("write", "{"), "pu", ("write", "}")] },
        "\\,|\\x{}{}|\\x{}|\\x" => { "*" => task!["output", "copy"] },
        "else" => { "*" => task!["text="] },
    };
    let mut actions: ActionTable = FxHashMap::default();
    actions.insert("output", text_output);
    StateMachine::new("text", transitions, actions)
}

fn text_output(buffer: &mut Buffer, _: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    if buffer.text.is_empty() {
        return Ok(Vec::new());
    }
    let text = std::mem::take(&mut buffer.text);
    buffer.clear();
    Ok(vec![Node::Text { text }])
}

/// `pq`: subscripts
pub(super) fn subscript() -> StateMachine {
    let transitions = transitions! {
        "empty" => { "*" => task![] },
        "state of aggregation $" => { "*" => task!["state of aggregation"] },
        "i$" => { "0" => task![].next("!f").revisit() },
        "(KV letters)," => { "0" => task!["rm"].next("0") },
        "formula$" => { "0" => task![].next("f").revisit() },
        "1/2$" => { "0" => task!["1/2"] },
        "else" => { "0" => task![].next("!f").revisit() },
        "${(...)}$__$(...)$" => { "*" => task!["tex-math"] },
        "{(...)}" => { "*" => task!["text"] },
        "a-z" => { "f" => task!["tex-math"] },
        "letters" => { "*" => task!["rm"] },
        "-9.,9" => { "*" => task!["9,9"] },
        "," => { "*" => task![("insert+p1", "comma enumeration S")] },
        "\\color{(...)}{(...)}" => { "*" => task!["color-output"] },
        "\\color{(...)}" => { "*" => task!["color0-output"] },
        "\\ce{(...)}" => { "*" => task!["ce"] },
        "\\pu{(...)}" => { "*" => task![("write", "{"), "pu", ("write", "}")] },
        "\\,|\\x{}{}|\\x{}|\\x" => { "*" => task!["copy"] },
        "else2" => { "*" => task!["copy"] },
    };
    let mut actions: ActionTable = FxHashMap::default();
    actions.insert("state of aggregation", subscript_aggregation);
    actions.insert("color-output", |_, m, _| colored(m, "pq"));
    StateMachine::new("pq", transitions, actions)
}

fn subscript_aggregation(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    Ok(vec![Node::StateOfAggregationSubscript {
        content: parse(&m.text(), "o")?,
    }])
}

/// `\color{c}{content}` with the content parsed by `machine`
fn colored(m: &Matched, machine: &str) -> ChemResult<Vec<Node>> {
    let (color, content) = two_groups(m, "color-output")?;
    Ok(vec![Node::Color {
        color: color.to_string(),
        content: parse(content, machine)?,
    }])
}

/// `bd`: superscripts
pub(super) fn superscript() -> StateMachine {
    let transitions = transitions! {
        "empty" => { "*" => task![] },
        "x$" => { "0" => task![].next("!f").revisit() },
        "formula$" => { "0" => task![].next("f").revisit() },
        "else" => { "0" => task![].next("!f").revisit() },
        "-9.,9 no missing 0" => { "*" => task!["9,9"] },
        "." => { "*" => task![("insert", "electron dot")] },
        "a-z" => { "f" => task!["tex-math"] },
        "x" => { "*" => task![("insert", "KV x")] },
        "letters" => { "*" => task!["rm"] },
        "'" => { "*" => task![("insert", "prime")] },
        "${(...)}$__$(...)$" => { "*" => task!["tex-math"] },
        "{(...)}" => { "*" => task!["text"] },
        "\\color{(...)}{(...)}" => { "*" => task!["color-output"] },
        "\\color{(...)}" => { "*" => task!["color0-output"] },
        "\\ce{(...)}" => { "*" => task!["ce"] },
        "\\pu{(...)}" => { "*" => task![("write", "{"), "pu", ("write", "}")] },
        "\\,|\\x{}{}|\\x{}|\\x" => { "*" => task!["copy"] },
        "else2" => { "*" => task!["copy"] },
    };
    let mut actions: ActionTable = FxHashMap::default();
    actions.insert("color-output", |_, m, _| colored(m, "bd"));
    StateMachine::new("bd", transitions, actions)
}

/// `oxidation`: Roman numerals and `\pm 0`
pub(super) fn oxidation() -> StateMachine {
    let transitions = transitions! {
        "empty" => { "*" => task!["roman-numeral"] },
        "pm-operator" => { "*" => task![("o=+p1", "\\pm")] },
        "else" => { "*" => task!["o="] },
    };
    let mut actions: ActionTable = FxHashMap::default();
    actions.insert("roman-numeral", |buffer, _, _| {
        Ok(vec![Node::RomanNumeral {
            text: buffer.o.clone(),
        }])
    });
    StateMachine::new("oxidation", transitions, actions)
}

/// `tex-math`: math material collected into one node
pub(super) fn tex_math() -> StateMachine {
    let transitions = transitions! {
        "empty" => { "*" => task!["output"] },
        "\\ce{(...)}" => { "*" => task!["output", "ce"] },
        "\\pu{(...)}" => { "*" => task!["output", ("write", "{"), "pu", ("write", "}")] },
        "{...}|\\,|\\x{}{}|\\x{}|\\x" => { "*" => task!["o="] },
        "else" => { "*" => task!["o="] },
    };
    let mut actions: ActionTable = FxHashMap::default();
    actions.insert("output", math_output);
    StateMachine::new("tex-math", transitions, actions)
}

/// `tex-math tight`: as `tex-math`, with `+` and `-` braced to drop operator spacing
pub(super) fn tex_math_tight() -> StateMachine {
    let transitions = transitions! {
        "empty" => { "*" => task!["output"] },
        "\\ce{(...)}" => { "*" => task!["output", "ce"] },
        "\\pu{(...)}" => { "*" => task!["output", ("write", "{"), "pu", ("write", "}")] },
        "{...}|\\,|\\x{}{}|\\x{}|\\x" => { "*" => task!["o="] },
        "-|+" => { "*" => task!["tight operator"] },
        "else" => { "*" => task!["o="] },
    };
    let mut actions: ActionTable = FxHashMap::default();
    actions.insert("output", math_output);
    actions.insert("tight operator", |buffer, m, _| {
        buffer.o.push('{');
        buffer.o.push_str(&m.text());
        buffer.o.push('}');
        Ok(Vec::new())
    });
    StateMachine::new("tex-math tight", transitions, actions)
}

fn math_output(buffer: &mut Buffer, _: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    if buffer.o.is_empty() {
        return Ok(Vec::new());
    }
    let text = std::mem::take(&mut buffer.o);
    buffer.clear();
    Ok(vec![Node::TexMath { text }])
}

/// `9,9`: numbers with a decimal comma
pub(super) fn decimal() -> StateMachine {
    let transitions = transitions! {
        "empty" => { "*" => task![] },
        "," => { "*" => task!["comma"] },
        "else" => { "*" => task!["copy"] },
    };
    let mut actions: ActionTable = FxHashMap::default();
    actions.insert("comma", |_, _, _| Ok(vec![Node::CommaDecimal]));
    StateMachine::new("9,9", transitions, actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_subscript_formula_uses_math_letters() {
        assert_eq!(
            parse("2n+1", "pq").unwrap(),
            vec![
                Node::literal("2"),
                Node::TexMath { text: "n".into() },
                Node::literal("+"),
                Node::literal("1"),
            ]
        );
    }

    #[test]
    fn test_superscript_tokens() {
        assert_eq!(
            parse("x", "bd").unwrap(),
            vec![Node::KvX]
        );
        assert_eq!(
            parse(".", "bd").unwrap(),
            vec![Node::ElectronDot]
        );
    }

    #[test]
    fn test_tight_math_braces_signs() {
        assert_eq!(
            parse("2n-1", "tex-math tight").unwrap(),
            vec![Node::TexMath {
                text: "2n{-}1".into()
            }]
        );
    }

    #[test]
    fn test_text_splits_at_macros() {
        assert_eq!(
            parse("a\\,b", "text").unwrap(),
            vec![
                Node::Text { text: "a".into() },
                Node::literal("\\,"),
                Node::Text { text: "b".into() },
            ]
        );
    }

    #[test]
    fn test_oxidation_with_plus_minus() {
        assert_eq!(
            parse("\\pm0", "oxidation").unwrap(),
            vec![Node::RomanNumeral {
                text: "\\pm0".into()
            }]
        );
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(
            parse("1,5", "9,9").unwrap(),
            vec![Node::literal("1"), Node::CommaDecimal, Node::literal("5")]
        );
    }
}
