//! Main `\ce{}` machine
//!
//! States:
//!
//! | state | meaning |
//! |-------|---------|
//! | `0` | start, or after an operator |
//! | `1` | after a space or an inserted element |
//! | `2` | after an opening parenthesis or a hyphen |
//! | `3` | after a bond |
//! | `a`, `as` | amount read (`as`: followed by a space) |
//! | `b`, `p`, `bp` | left superscript / subscript read |
//! | `o` | main symbol read |
//! | `q`, `d`, `D`, `qd`, `qD`, `dq` | right subscript / superscript read (`D`: braced) |
//! | `r`, `rt`, `rd`, `rdt`, `rdq` | arrow and its conditions |
//!
//! A chemical entity is collected in the buffer and emitted as one
//! [`Node::ChemFive`] by the `output` action when the next token cannot
//! belong to it.

use std::mem;

use fxhash::FxHashMap;
use lazy_static::lazy_static;
use regex::Regex;

use crate::core::node::{DType, Node};
use crate::core::parser::actions::{str_param, two_groups, ActionTable};
use crate::core::parser::{match_pattern, parse, Buffer, Matched, Param, StateMachine};
use crate::utils::error::ChemResult;

pub(super) fn machine() -> StateMachine {
    let transitions = transitions! {
        "empty" => {
            "*" => task!["output"],
        },
        "else" => {
            "0|1|2" => task!["beginsWithBond=false"].revisit().and_continue(),
        },
        "oxidation$" => {
            "0" => task!["oxidation-output"],
        },
        "CMT" => {
            "r" => task!["rdt="].next("rt"),
            "rd" => task!["rqt="].next("rdt"),
        },
        "arrowUpDown" => {
            "0|1|2|as" => task!["sb=false", "output", "operator"].next("1"),
        },
        "uprightEntities" => {
            "0|1|2" => task!["o=", "output"].next("1"),
        },
        "orbital" => {
            "0|1|2|3" => task!["o="].next("o"),
        },
        "->" => {
            "0|1|2|3" => task!["r="].next("r"),
            "a|as" => task!["output", "r="].next("r"),
            "*" => task!["output", "r="].next("r"),
        },
        "+" => {
            "o" => task!["d= kv"].next("d"),
            "d|D" => task!["d="].next("d"),
            "q" => task!["d="].next("qd"),
            "qd|qD" => task!["d="].next("qd"),
            "dq" => task!["output", "d="].next("d"),
            "3" => task!["sb=false", "output", "operator"].next("0"),
        },
        "amount" => {
            "0|2" => task!["a="].next("a"),
        },
        "pm-operator" => {
            "0|1|2|a|as" => task!["sb=false", "output", ("operator", "\\pm")].next("0"),
        },
        "operator" => {
            "0|1|2|a|as" => task!["sb=false", "output", "operator"].next("0"),
        },
        "-$" => {
            "o|q" => task!["charge or bond", "output"].next("qd"),
            "d" => task!["d="].next("d"),
            "D" => task!["output", ("bond", "-")].next("3"),
            "q" => task!["d="].next("qd"),
            "qd" => task!["d="].next("qd"),
            "qD|dq" => task!["output", ("bond", "-")].next("3"),
        },
        "-9" => {
            "3|o" => task!["output", ("insert", "hyphen")].next("3"),
        },
        "- orbital overlap" => {
            "o" => task!["output", ("insert", "hyphen")].next("2"),
            "d" => task!["output", ("insert", "hyphen")].next("2"),
        },
        "-" => {
            "0|1|2" => task![("output", 1u8), "beginsWithBond=true", ("bond", "-")].next("3"),
            "3" => task![("bond", "-")],
            "a" => task!["output", ("insert", "hyphen")].next("2"),
            "as" => task![("output", 2u8), ("bond", "-")].next("3"),
            "b" => task!["b="],
            "o" => task![("- after o/d", false)].next("2"),
            "q" => task![("- after o/d", false)].next("2"),
            "d|qd|dq" => task![("- after o/d", true)].next("2"),
            "D|qD|p" => task!["output", ("bond", "-")].next("3"),
        },
        "amount2" => {
            "1|3" => task!["a="].next("a"),
        },
        "letters" => {
            "0|1|2|3|a|as|b|p|bp|o" => task!["o="].next("o"),
            "q|dq" => task!["output", "o="].next("o"),
            "d|D|qd|qD" => task!["o after d"].next("o"),
        },
        "digits" => {
            "o" => task!["q="].next("q"),
            "d|D" => task!["q="].next("dq"),
            "q" => task!["output", "o="].next("o"),
            "a" => task!["o="].next("o"),
        },
        "space A" => {
            "b|p|bp" => task![],
        },
        "space" => {
            "a" => task![].next("as"),
            "0" => task!["sb=false"],
            "1|2" => task!["sb=true"],
            "r|rt|rd|rdt|rdq" => task!["output"].next("0"),
            "*" => task!["output", "sb=true"].next("1"),
        },
        "1st-level escape" => {
            "1|2" => task!["output", ("insert+p1", "1st-level escape")],
            "*" => task!["output", ("insert+p1", "1st-level escape")].next("0"),
        },
        "[(...)]" => {
            "r|rt" => task!["rd="].next("rd"),
            "rd|rdt" => task!["rq="].next("rdq"),
        },
        "..." => {
            "o|d|D|dq|qd|qD" => task!["output", ("bond", "...")].next("3"),
            "*" => task![("output", 1u8), ("insert", "ellipsis")].next("1"),
        },
        ". __* " => {
            "*" => task!["output", ("insert", "addition compound")].next("1"),
        },
        "state of aggregation $" => {
            "*" => task!["output", "state of aggregation"].next("1"),
        },
        "{[(" => {
            "a|as|o" => task!["o=", "output", "parenthesisLevel++"].next("2"),
            "0|1|2|3" => task!["o=", "output", "parenthesisLevel++"].next("2"),
            "*" => task!["output", "o=", "output", "parenthesisLevel++"].next("2"),
        },
        ")]}" => {
            "0|1|2|3|b|p|bp|o" => task!["o=", "parenthesisLevel--"].next("o"),
            "a|as|d|D|q|qd|qD|dq" => task!["output", "o=", "parenthesisLevel--"].next("o"),
        },
        ", " => {
            "*" => task!["output", "comma"].next("0"),
        },
        "^_" => {
            "*" => task![],
        },
        "^{(...)}|^($...$)" => {
            "0|1|2|as" => task!["b="].next("b"),
            "p" => task!["b="].next("bp"),
            "3|o" => task!["d= kv"].next("D"),
            "q" => task!["d="].next("qD"),
            "d|D|qd|qD|dq" => task!["output", "d="].next("D"),
        },
        "^a|^\\x{}{}|^\\x{}|^\\x|'" => {
            "0|1|2|as" => task!["b="].next("b"),
            "p" => task!["b="].next("bp"),
            "3|o" => task!["d= kv"].next("d"),
            "q" => task!["d="].next("qd"),
            "d|qd|D|qD" => task!["d="],
            "dq" => task!["output", "d="].next("d"),
        },
        "_{(state of aggregation)}$" => {
            "d|D|q|qd|qD|dq" => task!["output", "q="].next("q"),
        },
        "_{(...)}|_($...$)|_9|_\\x{}{}|_\\x{}|_\\x" => {
            "0|1|2|as" => task!["p="].next("p"),
            "b" => task!["p="].next("bp"),
            "3|o" => task!["q="].next("q"),
            "d|D" => task!["q="].next("dq"),
            "q|qd|qD|dq" => task!["output", "q="].next("q"),
        },
        "=<>" => {
            "0|1|2|3|a|as|o|q|d|D|qd|qD|dq" => task![("output", 2u8), "bond"].next("3"),
        },
        "#" => {
            "0|1|2|3|a|as|o" => task![("output", 2u8), ("bond", "#")].next("3"),
        },
        "{}^" => {
            "*" => task![("output", 1u8), ("insert", "tinySkip")].next("1"),
        },
        "{}" => {
            "*" => task![("output", 1u8)].next("1"),
        },
        "{...}" => {
            "0|1|2|3|a|as|b|p|bp" => task!["o="].next("o"),
            "o|d|D|q|qd|qD|dq" => task!["output", "o="].next("o"),
        },
        "$...$" => {
            // 2$n$
            "a" => task!["a="],
            "0|1|2|3|as|b|p|bp|o" => task!["o="].next("o"),
            "as|o" => task!["o="],
            "q|d|D|qd|qD|dq" => task!["output", "o="].next("o"),
        },
        "\\bond{(...)}" => {
            "*" => task![("output", 2u8), "bond"].next("3"),
        },
        "\\frac{(...)}" => {
            "*" => task![("output", 1u8), "frac-output"].next("3"),
        },
        "\\overset{(...)}" => {
            "*" => task![("output", 2u8), "overset-output"].next("3"),
        },
        "\\underset{(...)}" => {
            "*" => task![("output", 2u8), "underset-output"].next("3"),
        },
        "\\underbrace{(...)}" => {
            "*" => task![("output", 2u8), "underbrace-output"].next("3"),
        },
        "\\color{(...)}{(...)}" => {
            "*" => task![("output", 2u8), "color-output"].next("3"),
        },
        "\\color{(...)}" => {
            "*" => task![("output", 2u8), "color0-output"],
        },
        "\\ce{(...)}" => {
            "*" => task![("output", 2u8), "ce"].next("3"),
        },
        "\\," => {
            "*" => task![("output", 1u8), "copy"].next("1"),
        },
        "\\pu{(...)}" => {
            "*" => task!["output", ("write", "{"), "pu", ("write", "}")].next("3"),
        },
        "\\x{}{}|\\x{}|\\x" => {
            "0|1|2|3|a|as|b|p|bp|o|c0" => task!["o=", "output"].next("3"),
            "*" => task!["output", "o=", "output"].next("3"),
        },
        "others" => {
            "*" => task![("output", 1u8), "copy"].next("3"),
        },
        "else2" => {
            "a" => task!["a to o"].next("o").revisit(),
            "as" => task!["output", "sb=true"].next("1").revisit(),
            "r|rt|rd|rdt|rdq" => task!["output"].next("0").revisit(),
            "*" => task!["output", "copy"].next("3"),
        },
    };
    StateMachine::new("ce", transitions, actions())
}

fn actions() -> ActionTable {
    let mut m: ActionTable = FxHashMap::default();
    m.insert("o after d", o_after_d);
    m.insert("d= kv", set_d_kv);
    m.insert("charge or bond", charge_or_bond);
    m.insert("- after o/d", hyphen_after_symbol);
    m.insert("a to o", amount_to_symbol);
    m.insert("sb=true", |buffer, _, _| {
        buffer.sb = true;
        Ok(Vec::new())
    });
    m.insert("sb=false", |buffer, _, _| {
        buffer.sb = false;
        Ok(Vec::new())
    });
    m.insert("beginsWithBond=true", |buffer, _, _| {
        buffer.begins_with_bond = true;
        Ok(Vec::new())
    });
    m.insert("beginsWithBond=false", |buffer, _, _| {
        buffer.begins_with_bond = false;
        Ok(Vec::new())
    });
    m.insert("parenthesisLevel++", |buffer, _, _| {
        buffer.parenthesis_level += 1;
        Ok(Vec::new())
    });
    m.insert("parenthesisLevel--", |buffer, _, _| {
        buffer.parenthesis_level -= 1;
        Ok(Vec::new())
    });
    m.insert("state of aggregation", state_of_aggregation);
    m.insert("comma", comma);
    m.insert("output", output);
    m.insert("oxidation-output", oxidation_output);
    m.insert("frac-output", frac_output);
    m.insert("overset-output", overset_output);
    m.insert("underset-output", underset_output);
    m.insert("underbrace-output", underbrace_output);
    m.insert("color-output", color_output);
    m.insert("r=", |buffer, m, _| {
        buffer.r = m.text().into_owned();
        Ok(Vec::new())
    });
    m.insert("rdt=", |buffer, m, _| {
        buffer.rdt = m.text().into_owned();
        Ok(Vec::new())
    });
    m.insert("rd=", |buffer, m, _| {
        buffer.rd = m.text().into_owned();
        Ok(Vec::new())
    });
    m.insert("rqt=", |buffer, m, _| {
        buffer.rqt = m.text().into_owned();
        Ok(Vec::new())
    });
    m.insert("rq=", |buffer, m, _| {
        buffer.rq = m.text().into_owned();
        Ok(Vec::new())
    });
    m.insert("operator", operator);
    m
}

/// Emit the pending entity or arrow and reset the buffer.
///
/// `entity_follows`:
/// - `None`: nothing to emit means the space just read is dropped too
/// - `Some(1)`: an entity follows, keep a pending space
/// - `Some(2)`: as 1, and the entity may carry an amount, so the amount is
///   not promoted to the main symbol
pub(super) fn emit(buffer: &mut Buffer, entity_follows: Option<u8>) -> ChemResult<Vec<Node>> {
    let mut out = Vec::new();
    if buffer.r.is_empty() {
        if !buffer.has_no_entity() || entity_follows.is_some() {
            if buffer.sb {
                out.push(Node::EntitySkip);
            }
            let no_right = buffer.o.is_empty() && buffer.q.is_empty() && buffer.d.is_empty();
            let no_left = buffer.b.is_empty() && buffer.p.is_empty();
            if no_right && no_left && entity_follows != Some(2) {
                buffer.o = mem::take(&mut buffer.a);
            } else if no_right && !no_left {
                buffer.o = mem::take(&mut buffer.a);
                buffer.d = mem::take(&mut buffer.b);
                buffer.q = mem::take(&mut buffer.p);
            } else if !buffer.o.is_empty() && buffer.d_type == Some(DType::Kv) {
                if match_pattern("d-oxidation$", &buffer.d)?.is_some() {
                    buffer.d_type = Some(DType::Oxidation);
                } else if buffer.q.is_empty() {
                    buffer.d_type = None;
                }
            }
            let d_machine = if buffer.d_type == Some(DType::Oxidation) {
                "oxidation"
            } else {
                "bd"
            };
            out.push(Node::ChemFive {
                a: parse(&buffer.a, "a")?,
                b: parse(&buffer.b, "bd")?,
                p: parse(&buffer.p, "pq")?,
                o: parse(&buffer.o, "o")?,
                q: parse(&buffer.q, "pq")?,
                d: parse(&buffer.d, d_machine)?,
                d_type: buffer.d_type,
            });
        }
    } else {
        out.push(Node::Arrow {
            kind: buffer.r.clone(),
            above: conditions(&buffer.rdt, &buffer.rd)?,
            below: conditions(&buffer.rqt, &buffer.rq)?,
        });
    }
    buffer.reset_keeping_persistent();
    Ok(out)
}

/// Arrow condition by its type marker: `M` math, `T` text, otherwise `\ce`
fn conditions(marker: &str, text: &str) -> ChemResult<Vec<Node>> {
    match marker {
        "M" => parse(text, "tex-math"),
        "T" => Ok(vec![Node::Text {
            text: text.to_string(),
        }]),
        _ => parse(text, "ce"),
    }
}

fn output(buffer: &mut Buffer, _: &Matched, param: Option<&Param>) -> ChemResult<Vec<Node>> {
    emit(buffer, param.and_then(|p| p.as_int()))
}

lazy_static! {
    static ref LEADING_NUMBER: Regex = Regex::new(r"^[1-9][0-9]*$").expect("static pattern");
}

// A plain number after a superscript belongs to the next entity: 2H^{2}3He
fn o_after_d(buffer: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let mut out;
    if LEADING_NUMBER.is_match(&buffer.d) {
        let moved = mem::take(&mut buffer.d);
        out = emit(buffer, None)?;
        out.push(Node::TinySkip);
        buffer.b = moved;
    } else {
        out = emit(buffer, None)?;
    }
    buffer.o.push_str(&m.text());
    Ok(out)
}

fn set_d_kv(buffer: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    buffer.d = m.text().into_owned();
    buffer.d_type = Some(DType::Kv);
    Ok(Vec::new())
}

fn charge_or_bond(buffer: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    if buffer.begins_with_bond {
        let mut out = emit(buffer, None)?;
        out.push(Node::Bond { kind: "-".into() });
        Ok(out)
    } else {
        buffer.d = m.text().into_owned();
        Ok(Vec::new())
    }
}

/// A `-` after a main symbol is a hyphen, a charge or a bond
fn hyphen_after_symbol(
    buffer: &mut Buffer,
    m: &Matched,
    param: Option<&Param>,
) -> ChemResult<Vec<Node>> {
    let is_after_d = param.and_then(|p| p.as_bool()).unwrap_or(false);
    let orbital = match_pattern("orbital", &buffer.o)?.map(|c| c.remainder.is_empty());
    let greek = match_pattern("one lowercase greek letter $", &buffer.o)?.is_some();
    let latin = match_pattern("one lowercase latin letter $", &buffer.o)?.is_some();
    let latin_math = match_pattern("$one lowercase latin letter$ $", &buffer.o)?.is_some();

    let hyphen_follows =
        m.text() == "-" && (orbital == Some(true) || greek || latin || latin_math);
    if hyphen_follows
        && buffer.a.is_empty()
        && buffer.b.is_empty()
        && buffer.p.is_empty()
        && buffer.d.is_empty()
        && buffer.q.is_empty()
        && orbital.is_none()
        && latin
    {
        buffer.o = format!("${}$", buffer.o);
    }

    let mut out;
    if hyphen_follows {
        out = emit(buffer, None)?;
        out.push(Node::Hyphen);
    } else {
        let numeric_d = match_pattern("digits", &buffer.d)?.is_some_and(|c| c.remainder.is_empty());
        if is_after_d && numeric_d {
            buffer.d.push_str(&m.text());
            out = emit(buffer, None)?;
        } else {
            out = emit(buffer, None)?;
            out.push(Node::Bond { kind: "-".into() });
        }
    }
    Ok(out)
}

fn amount_to_symbol(buffer: &mut Buffer, _: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    buffer.o = mem::take(&mut buffer.a);
    Ok(Vec::new())
}

fn state_of_aggregation(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    Ok(vec![Node::StateOfAggregation {
        content: parse(&m.text(), "o")?,
    }])
}

/// `,` or `;` with trailing space is an enumeration outside parentheses
fn comma(buffer: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let matched = m.text();
    let text = matched.trim_end().to_string();
    let with_space = text.len() != matched.len();
    if with_space && buffer.parenthesis_level == 0 {
        Ok(vec![Node::CommaEnumerationL { text }])
    } else {
        Ok(vec![Node::CommaEnumerationM { text }])
    }
}

fn oxidation_output(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let mut out = vec![Node::literal("{")];
    out.extend(parse(&m.text(), "oxidation")?);
    out.push(Node::literal("}"));
    Ok(out)
}

fn frac_output(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let (numerator, denominator) = two_groups(m, "frac-output")?;
    Ok(vec![Node::FracCe {
        numerator: parse(numerator, "ce")?,
        denominator: parse(denominator, "ce")?,
    }])
}

fn overset_output(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let (over, base) = two_groups(m, "overset-output")?;
    Ok(vec![Node::Overset {
        over: parse(over, "ce")?,
        base: parse(base, "ce")?,
    }])
}

fn underset_output(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let (under, base) = two_groups(m, "underset-output")?;
    Ok(vec![Node::Underset {
        under: parse(under, "ce")?,
        base: parse(base, "ce")?,
    }])
}

fn underbrace_output(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let (base, label) = two_groups(m, "underbrace-output")?;
    Ok(vec![Node::Underbrace {
        base: parse(base, "ce")?,
        label: parse(label, "ce")?,
    }])
}

fn color_output(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let (color, content) = two_groups(m, "color-output")?;
    Ok(vec![Node::Color {
        color: color.to_string(),
        content: parse(content, "ce")?,
    }])
}

pub(super) fn operator(_: &mut Buffer, m: &Matched, param: Option<&Param>) -> ChemResult<Vec<Node>> {
    let kind = match param {
        Some(_) => str_param(param, "operator")?.to_string(),
        None => m.text().into_owned(),
    };
    Ok(vec![Node::Operator { kind }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rm(text: &str) -> Vec<Node> {
        vec![Node::Rm { text: text.into() }]
    }

    fn literal(text: &str) -> Vec<Node> {
        vec![Node::literal(text)]
    }

    #[test]
    fn test_water() {
        let nodes = parse("H2O", "ce").unwrap();
        assert_eq!(
            nodes,
            vec![
                Node::ChemFive {
                    a: vec![],
                    b: vec![],
                    p: vec![],
                    o: rm("H"),
                    q: literal("2"),
                    d: vec![],
                    d_type: None,
                },
                Node::ChemFive {
                    a: vec![],
                    b: vec![],
                    p: vec![],
                    o: rm("O"),
                    q: vec![],
                    d: vec![],
                    d_type: None,
                },
            ]
        );
    }

    #[test]
    fn test_charge_is_not_oxidation() {
        let nodes = parse("X^{2+}", "ce").unwrap();
        match &nodes[..] {
            [Node::ChemFive { o, d, d_type, .. }] => {
                assert_eq!(o, &rm("X"));
                assert_eq!(d, &vec![Node::literal("2"), Node::literal("+")]);
                assert_eq!(*d_type, None);
            }
            other => panic!("unexpected nodes {:?}", other),
        }
    }

    #[test]
    fn test_oxidation_state() {
        let nodes = parse("Fe^{II}", "ce").unwrap();
        match &nodes[..] {
            [Node::ChemFive { d, d_type, .. }] => {
                assert_eq!(*d_type, Some(DType::Oxidation));
                assert_eq!(
                    d,
                    &vec![Node::RomanNumeral {
                        text: "II".into()
                    }]
                );
            }
            other => panic!("unexpected nodes {:?}", other),
        }
    }

    #[test]
    fn test_reaction_arrow() {
        let nodes = parse("A + B -> C", "ce").unwrap();
        let kinds: Vec<_> = nodes
            .iter()
            .filter_map(|n| match n {
                Node::Operator { kind } => Some(format!("op {}", kind)),
                Node::Arrow { kind, .. } => Some(format!("arrow {}", kind)),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec!["op +", "arrow ->"]);
        assert_eq!(
            nodes
                .iter()
                .filter(|n| matches!(n, Node::ChemFive { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn test_arrow_conditions() {
        let nodes = parse("->[T][$x$]", "ce").unwrap();
        assert_eq!(
            nodes,
            vec![Node::Arrow {
                kind: "->".into(),
                above: vec![Node::ChemFive {
                    a: vec![],
                    b: vec![],
                    p: vec![],
                    o: rm("T"),
                    q: vec![],
                    d: vec![],
                    d_type: None,
                }],
                below: vec![Node::ChemFive {
                    a: vec![],
                    b: vec![],
                    p: vec![],
                    o: vec![Node::TexMath { text: "x".into() }],
                    q: vec![],
                    d: vec![],
                    d_type: None,
                }],
            }]
        );
    }

    #[test]
    fn test_hyphen_after_greek_letter() {
        let nodes = parse("\\alpha-Fe", "ce").unwrap();
        assert!(nodes.contains(&Node::Hyphen));
        assert!(!nodes.iter().any(|n| matches!(n, Node::Bond { .. })));
    }

    #[test]
    fn test_bond_after_symbol() {
        let nodes = parse("H-H", "ce").unwrap();
        assert!(nodes.contains(&Node::Bond { kind: "-".into() }));
    }

    #[test]
    fn test_comma_spacing_depends_on_parentheses() {
        let nodes = parse("A, B", "ce").unwrap();
        assert!(nodes.contains(&Node::CommaEnumerationL { text: ",".into() }));
        let nodes = parse("(A, B)", "ce").unwrap();
        assert!(nodes.contains(&Node::CommaEnumerationM { text: ",".into() }));
    }

    #[test]
    fn test_emit_promotes_amount() {
        let mut buffer = Buffer {
            a: "2".into(),
            ..Buffer::default()
        };
        let nodes = emit(&mut buffer, None).unwrap();
        match &nodes[..] {
            [Node::ChemFive { a, o, .. }] => {
                assert!(a.is_empty());
                assert_eq!(o, &literal("2"));
            }
            other => panic!("unexpected nodes {:?}", other),
        }
        assert!(buffer.a.is_empty());
    }

    #[test]
    fn test_emit_nothing_pending() {
        let mut buffer = Buffer {
            sb: true,
            parenthesis_level: 1,
            ..Buffer::default()
        };
        assert!(emit(&mut buffer, None).unwrap().is_empty());
        assert!(!buffer.sb);
        assert_eq!(buffer.parenthesis_level, 1);
    }
}
