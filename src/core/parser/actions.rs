//! Actions shared by all state machines
//!
//! An action receives the buffer, the value captured by the rule's pattern and
//! the optional parameter from the table, and returns the nodes it emits.

use fxhash::FxHashMap;
use lazy_static::lazy_static;
use regex::Regex;

use super::buffer::Buffer;
use super::parse;
use super::patterns::Matched;
use super::transitions::Param;
use crate::core::node::Node;
use crate::utils::error::{ChemError, ChemResult};

pub type ActionFn = fn(&mut Buffer, &Matched, Option<&Param>) -> ChemResult<Vec<Node>>;

pub type ActionTable = FxHashMap<&'static str, ActionFn>;

/// String parameter of an action, or `BadMatch` naming the action
pub(super) fn str_param(param: Option<&Param>, action: &str) -> ChemResult<&'static str> {
    param
        .and_then(|p| p.as_str())
        .ok_or_else(|| ChemError::bad_match(action))
}

/// The first two capture groups of a two-argument match
pub(super) fn two_groups<'m>(m: &'m Matched, action: &str) -> ChemResult<(&'m str, &'m str)> {
    match m {
        Matched::Groups(groups) if groups.len() >= 2 => Ok((
            groups[0].as_deref().unwrap_or(""),
            groups[1].as_deref().unwrap_or(""),
        )),
        _ => Err(ChemError::bad_match(action)),
    }
}

macro_rules! append_to {
    ($($name:ident => $field:ident),* $(,)?) => {
        $(
            fn $name(buffer: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
                buffer.$field.push_str(&m.text());
                Ok(Vec::new())
            }
        )*
    };
}

append_to! {
    append_a => a,
    append_b => b,
    append_p => p,
    append_o => o,
    append_q => q,
    append_d => d,
    append_rm => rm,
    append_text => text,
}

fn append_o_param(buffer: &mut Buffer, _: &Matched, param: Option<&Param>) -> ChemResult<Vec<Node>> {
    buffer.o.push_str(str_param(param, "o=+p1")?);
    Ok(Vec::new())
}

fn insert(_: &mut Buffer, _: &Matched, param: Option<&Param>) -> ChemResult<Vec<Node>> {
    Ok(vec![Node::token(str_param(param, "insert")?)?])
}

fn insert_with_text(_: &mut Buffer, m: &Matched, param: Option<&Param>) -> ChemResult<Vec<Node>> {
    let kind = str_param(param, "insert+p1")?;
    Ok(vec![Node::token_with_text(kind, m.text())?])
}

fn copy(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    Ok(vec![Node::literal(m.text())])
}

fn write(_: &mut Buffer, _: &Matched, param: Option<&Param>) -> ChemResult<Vec<Node>> {
    Ok(vec![Node::literal(str_param(param, "write")?)])
}

fn rm(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    Ok(vec![Node::Rm {
        text: m.text().into_owned(),
    }])
}

fn bond(_: &mut Buffer, m: &Matched, param: Option<&Param>) -> ChemResult<Vec<Node>> {
    let kind = match param.and_then(|p| p.as_str()) {
        Some(kind) => kind.to_string(),
        None => m.text().into_owned(),
    };
    Ok(vec![Node::Bond { kind }])
}

fn color0(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    Ok(vec![Node::Color0 {
        color: m.text().into_owned(),
    }])
}

macro_rules! delegate_to {
    ($($name:ident => $machine:literal),* $(,)?) => {
        $(
            fn $name(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
                parse(&m.text(), $machine)
            }
        )*
    };
}

delegate_to! {
    parse_text => "text",
    parse_tex_math => "tex-math",
    parse_tex_math_tight => "tex-math tight",
    parse_ce => "ce",
    parse_pu => "pu",
    parse_decimal => "9,9",
}

lazy_static! {
    static ref FRACTION: Regex =
        Regex::new(r"^([0-9]+|\$[a-z]\$|[a-z])/([0-9]+)(\$[a-z]\$|[a-z])?$").expect("static pattern");
}

/// `1/2`, `-n/2`, `3/2$x$` as an inline fraction with an optional trailing variable
fn fraction(_: &mut Buffer, m: &Matched, _: Option<&Param>) -> ChemResult<Vec<Node>> {
    let text = m.text();
    let mut out = Vec::new();
    let mut rest: &str = &text;
    if rest.starts_with(&['+', '-'][..]) {
        out.push(Node::literal(&rest[..1]));
        rest = &rest[1..];
    }
    let caps = FRACTION
        .captures(rest)
        .ok_or_else(|| ChemError::bad_match("1/2"))?;
    out.push(Node::Frac {
        numerator: caps[1].replace('$', ""),
        denominator: caps[2].to_string(),
    });
    if let Some(variable) = caps.get(3) {
        out.push(Node::TexMath {
            text: variable.as_str().replace('$', ""),
        });
    }
    Ok(out)
}

lazy_static! {
    pub(super) static ref GENERIC_ACTIONS: ActionTable = {
        let mut m: ActionTable = FxHashMap::default();
        m.insert("a=", append_a);
        m.insert("b=", append_b);
        m.insert("p=", append_p);
        m.insert("o=", append_o);
        m.insert("o=+p1", append_o_param);
        m.insert("q=", append_q);
        m.insert("d=", append_d);
        m.insert("rm=", append_rm);
        m.insert("text=", append_text);
        m.insert("insert", insert);
        m.insert("insert+p1", insert_with_text);
        m.insert("copy", copy);
        m.insert("write", write);
        m.insert("rm", rm);
        m.insert("text", parse_text);
        m.insert("tex-math", parse_tex_math);
        m.insert("tex-math tight", parse_tex_math_tight);
        m.insert("bond", bond);
        m.insert("color0-output", color0);
        m.insert("ce", parse_ce);
        m.insert("pu", parse_pu);
        m.insert("1/2", fraction);
        m.insert("9,9", parse_decimal);
        m
    };
}

/// Whether `name` is one of the shared actions
pub fn is_generic(name: &str) -> bool {
    GENERIC_ACTIONS.contains_key(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Matched {
        Matched::Text(s.to_string())
    }

    fn run(name: &str, buffer: &mut Buffer, m: &Matched, param: Option<Param>) -> Vec<Node> {
        GENERIC_ACTIONS[name](buffer, m, param.as_ref()).unwrap()
    }

    #[test]
    fn test_setters_append() {
        let mut buffer = Buffer::new();
        run("o=", &mut buffer, &text("H"), None);
        run("o=", &mut buffer, &text("e"), None);
        run("o=+p1", &mut buffer, &text("ignored"), Some(Param::Str("\\pm")));
        assert_eq!(buffer.o, "He\\pm");
    }

    #[test]
    fn test_bond_prefers_parameter() {
        let mut buffer = Buffer::new();
        assert_eq!(
            run("bond", &mut buffer, &text("="), Some(Param::Str("-"))),
            vec![Node::Bond { kind: "-".into() }]
        );
        assert_eq!(
            run("bond", &mut buffer, &text("="), None),
            vec![Node::Bond { kind: "=".into() }]
        );
    }

    #[test]
    fn test_fraction() {
        let mut buffer = Buffer::new();
        assert_eq!(
            run("1/2", &mut buffer, &text("-$n$/2x"), None),
            vec![
                Node::literal("-"),
                Node::Frac {
                    numerator: "n".into(),
                    denominator: "2".into()
                },
                Node::TexMath { text: "x".into() },
            ]
        );
    }

    #[test]
    fn test_missing_parameter_is_reported() {
        let mut buffer = Buffer::new();
        let err = GENERIC_ACTIONS["write"](&mut buffer, &text("x"), None).unwrap_err();
        assert_eq!(err, ChemError::bad_match("write"));
    }

    #[test]
    fn test_two_groups_requires_groups() {
        let groups = Matched::Groups(vec![Some("a".into()), None]);
        assert_eq!(two_groups(&groups, "x").unwrap(), ("a", ""));
        assert!(two_groups(&text("a"), "x").is_err());
    }
}
