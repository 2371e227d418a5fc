//! `\pu{}` machines: numbers with units
//!
//! `pu` splits the input into a number part and a unit part (optionally a
//! `/` or `//` fraction of units), `pu-2` renders unit names and exponents,
//! and `pu-9,9` groups digits in threes.

use fxhash::FxHashMap;

use super::ce::operator;
use crate::core::node::Node;
use crate::core::parser::actions::ActionTable;
use crate::core::parser::{match_pattern, parse, Buffer, Matched, Param, StateMachine};
use crate::utils::error::ChemResult;

/// Runs longer than this are split into groups of three digits
const GROUPING_THRESHOLD: usize = 4;

pub(super) fn machine() -> StateMachine {
    let transitions = transitions! {
        "empty" => { "*" => task!["output"] },
        "space$" => { "*" => task!["output", "space"] },
        "{[(|)]}" => { "0|a" => task!["copy"] },
        "(-)(9)^(-9)" => { "0" => task!["number^"].next("a") },
        "(-)(9.,9)(e)(99)" => { "0" => task!["enumber"].next("a") },
        "space" => { "0|a" => task![] },
        "pm-operator" => { "0|a" => task![("operator", "\\pm")].next("0") },
        "operator" => { "0|a" => task!["copy"].next("0") },
        "//" => { "d" => task!["o="].next("/") },
        "/" => { "d" => task!["o="].next("/") },
        "{...}|else" => {
            "0|d" => task!["d="].next("d"),
            "a" => task!["space", "d="].next("d"),
            "/|q" => task!["q="].next("q"),
        },
    };
    let mut actions: ActionTable = FxHashMap::default();
    actions.insert("enumber", scientific_number);
    actions.insert("number^", number_with_exponent);
    actions.insert("operator", operator);
    actions.insert("space", |_, _, _| Ok(vec![Node::PuSpace1]));
    actions.insert("output", unit_output);
    StateMachine::new("pu", transitions, actions)
}

fn sign(sign: Option<&str>) -> Option<Node> {
    match sign {
        Some("+-") | Some("+/-") => Some(Node::literal("\\pm ")),
        Some(sign) => Some(Node::literal(sign)),
        None => None,
    }
}

/// Groups: sign, number, uncertainty, `e`, times operator, exponent
fn scientific_number(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let mut out: Vec<Node> = sign(m.group(0)).into_iter().collect();
    if let Some(number) = m.group(1) {
        out.extend(parse(number, "pu-9,9")?);
        if let Some(uncertainty) = m.group(2) {
            if uncertainty.contains(|c: char| c == ',' || c == '.') {
                out.extend(parse(uncertainty, "pu-9,9")?);
            } else {
                out.push(Node::literal(uncertainty));
            }
        }
        if m.group(3).is_some() || m.group(4).is_some() {
            if m.group(3) == Some("e") || m.group(4) == Some("*") {
                out.push(Node::Cdot);
            } else {
                out.push(Node::Times);
            }
        }
    }
    if let Some(exponent) = m.group(5) {
        out.push(Node::literal(format!("10^{{{}}}", exponent)));
    }
    Ok(out)
}

/// Groups: sign, number, exponent
fn number_with_exponent(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let mut out: Vec<Node> = sign(m.group(0)).into_iter().collect();
    out.extend(parse(m.group(1).unwrap_or(""), "pu-9,9")?);
    out.push(Node::literal(format!("^{{{}}}", m.group(2).unwrap_or(""))));
    Ok(out)
}

/// Content of `{...}` if the braces span the whole of `s`
fn unbraced(s: &str) -> ChemResult<Option<String>> {
    Ok(match_pattern("{(...)}", s)?
        .filter(|m| m.remainder.is_empty())
        .map(|m| m.value.text().into_owned()))
}

fn with_degree_signs(s: &str) -> String {
    s.replace("\u{00B0}C", "{}^{\\circ}C")
        .replace("^oC", "{}^{\\circ}C")
        .replace("^{o}C", "{}^{\\circ}C")
        .replace("\u{00B0}F", "{}^{\\circ}F")
        .replace("^oF", "{}^{\\circ}F")
        .replace("^{o}F", "{}^{\\circ}F")
}

fn unit_output(buffer: &mut Buffer, _: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    if let Some(d) = unbraced(&buffer.d)? {
        buffer.d = d;
    }
    if let Some(q) = unbraced(&buffer.q)? {
        buffer.q = q;
    }
    let numerator = with_degree_signs(&buffer.d);
    let out = if buffer.q.is_empty() {
        parse(&numerator, "pu-2")?
    } else {
        let denominator = with_degree_signs(&buffer.q);
        let numerator = parse(&numerator, "pu")?;
        let denominator = parse(&denominator, "pu")?;
        if buffer.o == "//" {
            vec![Node::PuFrac {
                numerator,
                denominator,
            }]
        } else {
            let slash = if numerator.len() > 1 || denominator.len() > 1 {
                Node::SpacedSlash
            } else {
                Node::Slash
            };
            let mut out = numerator;
            out.push(slash);
            out.extend(denominator);
            out
        }
    };
    buffer.clear();
    Ok(out)
}

/// `pu-2`: unit names joined by `\cdot`, with exponents
pub(super) fn unit_names() -> StateMachine {
    let transitions = transitions! {
        "empty" => { "*" => task!["output"] },
        "*" => { "*" => task!["output", "cdot"].next("0") },
        "\\x" => { "*" => task!["rm="] },
        "space" => { "*" => task!["output", "space"].next("0") },
        "^{(...)}|^(-1)" => { "1" => task!["^(-1)"] },
        "-9.,9" => {
            "0" => task!["rm="].next("0"),
            "1" => task!["^(-1)"].next("0"),
        },
        "{...}|else" => { "*" => task!["rm="].next("1") },
    };
    let mut actions: ActionTable = FxHashMap::default();
    actions.insert("cdot", |_, _, _| Ok(vec![Node::TightCdot]));
    actions.insert("^(-1)", |buffer, m, _| {
        buffer.rm.push_str(&format!("^{{{}}}", m.text()));
        Ok(Vec::new())
    });
    actions.insert("space", |_, _, _| Ok(vec![Node::PuSpace2]));
    actions.insert("output", unit_name_output);
    StateMachine::new("pu-2", transitions, actions)
}

fn unit_name_output(buffer: &mut Buffer, _: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let out = if buffer.rm.is_empty() {
        Vec::new()
    } else if let Some(inner) = unbraced(&buffer.rm)? {
        parse(&inner, "pu")?
    } else {
        vec![Node::Rm {
            text: buffer.rm.clone(),
        }]
    };
    buffer.clear();
    Ok(out)
}

/// `pu-9,9`: digit grouping on both sides of the decimal mark
pub(super) fn digit_groups() -> StateMachine {
    let transitions = transitions! {
        "empty" => {
            "0" => task!["output-0"],
            "o" => task!["output-o"],
        },
        "," => { "0" => task!["output-0", "comma"].next("o") },
        "." => { "0" => task!["output-0", "copy"].next("o") },
        "else" => { "*" => task!["text="] },
    };
    let mut actions: ActionTable = FxHashMap::default();
    actions.insert("comma", |_, _, _| Ok(vec![Node::CommaDecimal]));
    actions.insert("output-0", integral_output);
    actions.insert("output-o", fractional_output);
    StateMachine::new("pu-9,9", transitions, actions)
}

/// Integral digits, grouped from the right
fn integral_output(buffer: &mut Buffer, _: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let digits: Vec<char> = std::mem::take(&mut buffer.text).chars().collect();
    buffer.clear();
    if digits.len() <= GROUPING_THRESHOLD {
        return Ok(vec![Node::literal(digits.into_iter().collect::<String>())]);
    }
    let head = match digits.len() % 3 {
        0 => 3,
        n => n,
    };
    let mut out = vec![Node::literal(digits[..head].iter().collect::<String>())];
    for group in digits[head..].chunks(3) {
        out.push(Node::ThousandSeparator);
        out.push(Node::literal(group.iter().collect::<String>()));
    }
    Ok(out)
}

/// Fractional digits, grouped from the left
fn fractional_output(buffer: &mut Buffer, _: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let digits: Vec<char> = std::mem::take(&mut buffer.text).chars().collect();
    buffer.clear();
    if digits.len() <= GROUPING_THRESHOLD {
        return Ok(vec![Node::literal(digits.into_iter().collect::<String>())]);
    }
    let mut out = Vec::new();
    let mut start = 0;
    while start < digits.len() - 3 {
        out.push(Node::literal(digits[start..start + 3].iter().collect::<String>()));
        out.push(Node::ThousandSeparator);
        start += 3;
    }
    out.push(Node::literal(digits[start..].iter().collect::<String>()));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lit(text: &str) -> Node {
        Node::literal(text)
    }

    #[test]
    fn test_integral_grouping() {
        assert_eq!(parse("1234", "pu-9,9").unwrap(), vec![lit("1234")]);
        assert_eq!(
            parse("12345", "pu-9,9").unwrap(),
            vec![lit("12"), Node::ThousandSeparator, lit("345")]
        );
        assert_eq!(
            parse("123456", "pu-9,9").unwrap(),
            vec![lit("123"), Node::ThousandSeparator, lit("456")]
        );
    }

    #[test]
    fn test_fractional_grouping() {
        assert_eq!(
            parse("0.123456", "pu-9,9").unwrap(),
            vec![
                lit("0"),
                lit("."),
                lit("123"),
                Node::ThousandSeparator,
                lit("456")
            ]
        );
        assert_eq!(
            parse("1,12345", "pu-9,9").unwrap(),
            vec![
                lit("1"),
                Node::CommaDecimal,
                lit("123"),
                Node::ThousandSeparator,
                lit("45")
            ]
        );
    }

    #[test]
    fn test_uncertainty_is_copied() {
        assert_eq!(
            parse("1.23(4)", "pu").unwrap(),
            vec![lit("1"), lit("."), lit("23"), lit("(4)")]
        );
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(
            parse("1.5e3", "pu").unwrap(),
            vec![lit("1"), lit("."), lit("5"), Node::Cdot, lit("10^{3}")]
        );
        assert_eq!(
            parse("2x10^5", "pu").unwrap(),
            vec![lit("2"), Node::Times, lit("10^{5}")]
        );
    }

    #[test]
    fn test_units_with_exponent() {
        assert_eq!(
            parse("10 m s-1", "pu").unwrap(),
            vec![
                lit("10"),
                Node::PuSpace1,
                Node::Rm { text: "m".into() },
                Node::PuSpace2,
                Node::Rm {
                    text: "s^{-1}".into()
                },
            ]
        );
    }

    #[test]
    fn test_unit_fraction() {
        assert_eq!(
            parse("J/mol", "pu").unwrap(),
            vec![
                Node::Rm { text: "J".into() },
                Node::Slash,
                Node::Rm { text: "mol".into() },
            ]
        );
        assert!(matches!(
            &parse("J//mol", "pu").unwrap()[..],
            [Node::PuFrac { .. }]
        ));
    }

    #[test]
    fn test_degree_celsius() {
        assert_eq!(
            parse("25 ^oC", "pu").unwrap(),
            vec![
                lit("25"),
                Node::PuSpace1,
                Node::Rm {
                    text: "{}^{\\circ}C".into()
                },
            ]
        );
    }
}
