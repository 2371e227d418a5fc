//! TeX generator
//!
//! Turns the node sequence produced by the parser into a TeX math string.
//! Every node kind has a fixed template; nested sequences are rendered
//! recursively without outer braces.

use crate::core::node::{DType, Node};
use crate::data::symbols::{self, STACKED_ARROWS};
use crate::utils::error::{ChemError, ChemResult};

/// Render `nodes`, wrapping the result in one brace pair if `add_outer_braces`
/// is set, the result is non-empty and no top-level node is a first-level
/// escape (`&`, `\\`, `\hline`).
pub fn go(nodes: &[Node], add_outer_braces: bool) -> ChemResult<String> {
    let mut res = String::new();
    let mut escaped = false;
    for node in nodes {
        res.push_str(&node_to_tex(node)?);
        escaped |= node.is_first_level_escape();
    }
    if add_outer_braces && !escaped && !res.is_empty() {
        res = format!("{{{}}}", res);
    }
    Ok(res)
}

fn inner(nodes: &[Node]) -> ChemResult<String> {
    go(nodes, false)
}

fn node_to_tex(node: &Node) -> ChemResult<String> {
    let tex = match node {
        Node::Literal { text } => text.clone(),
        Node::ChemFive {
            a,
            b,
            p,
            o,
            q,
            d,
            d_type,
        } => chem_five(
            &inner(a)?,
            &inner(b)?,
            &inner(p)?,
            &inner(o)?,
            &inner(q)?,
            &inner(d)?,
            *d_type,
        ),
        Node::Rm { text } | Node::RomanNumeral { text } => format!("\\mathrm{{{}}}", text),
        Node::Text { text } => {
            if text.contains(&['^', '_'][..]) {
                let text = text.replacen(' ', "~", 1).replacen('-', "\\text{-}", 1);
                format!("\\mathrm{{{}}}", text)
            } else {
                format!("\\text{{{}}}", text)
            }
        }
        Node::StateOfAggregation { content } => format!("\\mskip2mu {}", inner(content)?),
        Node::StateOfAggregationSubscript { content } => {
            format!("\\mskip1mu {}", inner(content)?)
        }
        Node::Bond { kind } => symbols::bond(kind)
            .ok_or_else(|| ChemError::UnknownBond { kind: kind.clone() })?
            .to_string(),
        Node::Frac {
            numerator,
            denominator,
        } => math_choice(&format!("\\frac{{{}}}{{{}}}", numerator, denominator)),
        Node::PuFrac {
            numerator,
            denominator,
        } => math_choice(&format!(
            "\\frac{{{}}}{{{}}}",
            inner(numerator)?,
            inner(denominator)?
        )),
        Node::TexMath { text } => format!("{} ", text),
        Node::FracCe {
            numerator,
            denominator,
        } => format!("\\frac{{{}}}{{{}}}", inner(numerator)?, inner(denominator)?),
        Node::Overset { over, base } => {
            format!("\\overset{{{}}}{{{}}}", inner(over)?, inner(base)?)
        }
        Node::Underset { under, base } => {
            format!("\\underset{{{}}}{{{}}}", inner(under)?, inner(base)?)
        }
        Node::Underbrace { base, label } => {
            format!("\\underbrace{{{}}}_{{{}}}", inner(base)?, inner(label)?)
        }
        Node::Color { color, content } => {
            format!("{{\\color{{{}}}{{{}}}}}", color, inner(content)?)
        }
        Node::Color0 { color } => format!("\\color{{{}}}", color),
        Node::Arrow { kind, above, below } => arrow(kind, &inner(above)?, &inner(below)?)?,
        Node::Operator { kind } => symbols::operator(kind)
            .ok_or_else(|| ChemError::UnknownOperator { kind: kind.clone() })?
            .to_string(),
        Node::FirstLevelEscape { text } => format!("{} ", text),
        Node::TinySkip => "\\mkern2mu".to_string(),
        Node::EntitySkip | Node::PuSpace1 => "~".to_string(),
        Node::PuSpace2 => "\\mkern3mu ".to_string(),
        Node::ThousandSeparator => "\\mkern2mu ".to_string(),
        Node::CommaDecimal => "{,}".to_string(),
        Node::CommaEnumerationL { text } => format!("{{{}}}\\mkern6mu ", text),
        Node::CommaEnumerationM { text } => format!("{{{}}}\\mkern3mu ", text),
        Node::CommaEnumerationS { text } => format!("{{{}}}\\mkern1mu ", text),
        Node::Hyphen => "\\text{-}".to_string(),
        Node::AdditionCompound => "\\,{\\cdot}\\,".to_string(),
        Node::ElectronDot => "\\mkern1mu \\bullet\\mkern1mu ".to_string(),
        Node::KvX => "{\\times}".to_string(),
        Node::Prime => "\\prime ".to_string(),
        Node::Cdot => "\\cdot ".to_string(),
        Node::TightCdot => "\\mkern1mu{\\cdot}\\mkern1mu ".to_string(),
        Node::Times => "\\times ".to_string(),
        Node::Circa => "{\\sim}".to_string(),
        Node::Ellipsis => "\\ldots ".to_string(),
        Node::Slash => "/".to_string(),
        Node::SpacedSlash => "\\,/\\,".to_string(),
    };
    Ok(tex)
}

/// Fraction that stays text-sized in display style
fn math_choice(frac: &str) -> String {
    format!(
        "\\mathchoice{{\\textstyle{0}}}{{{0}}}{{{0}}}{{{0}}}",
        frac
    )
}

/// Braces around a part that starts with a sign, so it is not read as an operator
fn brace_signed(part: &str) -> String {
    if part.starts_with(&['+', '-'][..]) {
        format!("{{{}}}", part)
    } else {
        part.to_string()
    }
}

fn chem_five(
    a: &str,
    b: &str,
    p: &str,
    o: &str,
    q: &str,
    d: &str,
    d_type: Option<DType>,
) -> String {
    let mut res = String::new();
    if !a.is_empty() {
        res.push_str(&brace_signed(a));
        res.push_str("\\,");
    }
    if !b.is_empty() || !p.is_empty() {
        res.push_str("{\\vphantom{A}}");
        res.push_str(&format!(
            "^{{\\hphantom{{{}}}}}_{{\\hphantom{{{}}}}}",
            b, p
        ));
        res.push_str("\\mkern-1.5mu");
        res.push_str("{\\vphantom{A}}");
        res.push_str(&format!("^{{\\smash[t]{{\\vphantom{{2}}}}\\llap{{{}}}}}", b));
        res.push_str(&format!("_{{\\vphantom{{2}}\\llap{{\\smash[t]{{{}}}}}}}", p));
    }
    if !o.is_empty() {
        res.push_str(&brace_signed(o));
    }
    let superscript = |res: &mut String| res.push_str(&format!("^{{{}}}", d));
    let subscript = |res: &mut String| res.push_str(&format!("_{{\\smash[t]{{{}}}}}", q));
    match d_type {
        Some(DType::Kv) => {
            if !d.is_empty() || !q.is_empty() {
                res.push_str("{\\vphantom{A}}");
            }
            if !d.is_empty() {
                superscript(&mut res);
            }
            if !q.is_empty() {
                subscript(&mut res);
            }
        }
        Some(DType::Oxidation) => {
            if !d.is_empty() {
                res.push_str("{\\vphantom{A}}");
                superscript(&mut res);
            }
            if !q.is_empty() {
                res.push_str("{\\vphantom{A}}");
                subscript(&mut res);
            }
        }
        None => {
            if !q.is_empty() {
                res.push_str("{\\vphantom{A}}");
                subscript(&mut res);
            }
            if !d.is_empty() {
                res.push_str("{\\vphantom{A}}");
                superscript(&mut res);
            }
        }
    }
    res
}

fn arrow(kind: &str, above: &str, below: &str) -> ChemResult<String> {
    let name = symbols::arrow(kind).ok_or_else(|| ChemError::UnknownArrow {
        kind: kind.to_string(),
    })?;
    if above.is_empty() && below.is_empty() {
        return Ok(format!(" {{}}\\mathrel{{\\long{}}}{{}} ", name));
    }
    if STACKED_ARROWS.contains(&kind) {
        let mut arrow = format!("\\long{}", name);
        if !above.is_empty() {
            arrow = format!("\\overset{{{}}}{{{}}}", above, arrow);
        }
        if !below.is_empty() {
            let lower = if kind == "<-->" { "2mu" } else { "6mu" };
            arrow = format!("\\underset{{\\lower{}{{{}}}}}{{{}}}", lower, below, arrow);
        }
        Ok(format!(" {{}}\\mathrel{{{}}}{{}} ", arrow))
    } else {
        let mut arrow = name.to_string();
        if !below.is_empty() {
            arrow.push_str(&format!("[{{{}}}]", below));
        }
        arrow.push_str(&format!("{{{}}}", above));
        Ok(format!(" {{}}\\mathrel{{\\x{}}}{{}} ", arrow))
    }
}
