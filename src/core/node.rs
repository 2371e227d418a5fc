//! Parse output nodes
//!
//! The state machines produce a flat sequence of [`Node`]s, where structured
//! nodes carry nested sequences of their own. The TeX generator in
//! [`crate::core::texify`] maps every variant to a fixed template.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::utils::error::{ChemError, ChemResult};

/// How the right-hand superscript of a chemical group is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DType {
    /// Charge or valence written with Kekulé notation (`^{2+}` next to a bare symbol)
    Kv,
    /// Oxidation number (`^{II}`)
    Oxidation,
}

/// A single element of the parse output
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "kebab-case"))]
pub enum Node {
    /// Raw TeX, copied verbatim
    Literal { text: String },
    /// A chemical group: amount, left super/subscript, symbol, right sub/superscript
    ChemFive {
        a: Vec<Node>,
        b: Vec<Node>,
        p: Vec<Node>,
        o: Vec<Node>,
        q: Vec<Node>,
        d: Vec<Node>,
        d_type: Option<DType>,
    },
    Rm { text: String },
    Text { text: String },
    RomanNumeral { text: String },
    StateOfAggregation { content: Vec<Node> },
    StateOfAggregationSubscript { content: Vec<Node> },
    Bond { kind: String },
    Frac {
        numerator: String,
        denominator: String,
    },
    PuFrac {
        numerator: Vec<Node>,
        denominator: Vec<Node>,
    },
    TexMath { text: String },
    FracCe {
        numerator: Vec<Node>,
        denominator: Vec<Node>,
    },
    Overset { over: Vec<Node>, base: Vec<Node> },
    Underset { under: Vec<Node>, base: Vec<Node> },
    Underbrace { base: Vec<Node>, label: Vec<Node> },
    Color { color: String, content: Vec<Node> },
    /// `\color{...}` switching the color for the rest of the group
    Color0 { color: String },
    /// Reaction arrow with its (possibly empty) conditions above and below
    Arrow {
        kind: String,
        above: Vec<Node>,
        below: Vec<Node>,
    },
    Operator { kind: String },
    /// `&`, `\\` or `\hline`
    FirstLevelEscape { text: String },
    TinySkip,
    EntitySkip,
    PuSpace1,
    PuSpace2,
    ThousandSeparator,
    CommaDecimal,
    CommaEnumerationL { text: String },
    CommaEnumerationM { text: String },
    CommaEnumerationS { text: String },
    Hyphen,
    AdditionCompound,
    ElectronDot,
    KvX,
    Prime,
    Cdot,
    TightCdot,
    Times,
    Circa,
    Ellipsis,
    Slash,
    SpacedSlash,
}

impl Node {
    pub fn literal(text: impl Into<String>) -> Self {
        Node::Literal { text: text.into() }
    }

    /// Build a payload-free node from its table name, as used by `insert`
    pub fn token(name: &str) -> ChemResult<Self> {
        Ok(match name {
            "tinySkip" => Node::TinySkip,
            "commaDecimal" => Node::CommaDecimal,
            "hyphen" => Node::Hyphen,
            "addition compound" => Node::AdditionCompound,
            "electron dot" => Node::ElectronDot,
            "KV x" => Node::KvX,
            "prime" => Node::Prime,
            "circa" => Node::Circa,
            "ellipsis" => Node::Ellipsis,
            _ => {
                return Err(ChemError::UnknownNodeKind {
                    name: name.to_string(),
                })
            }
        })
    }

    /// Build a node carrying one text payload from its table name, as used by `insert+p1`
    pub fn token_with_text(name: &str, text: impl Into<String>) -> ChemResult<Self> {
        let text = text.into();
        Ok(match name {
            "1st-level escape" => Node::FirstLevelEscape { text },
            "comma enumeration S" => Node::CommaEnumerationS { text },
            _ => {
                return Err(ChemError::UnknownNodeKind {
                    name: name.to_string(),
                })
            }
        })
    }

    pub fn is_first_level_escape(&self) -> bool {
        matches!(self, Node::FirstLevelEscape { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_names() {
        assert_eq!(Node::token("hyphen").unwrap(), Node::Hyphen);
        assert_eq!(Node::token("KV x").unwrap(), Node::KvX);
        assert!(Node::token("entitySkip").is_err());
        assert!(matches!(
            Node::token("no such thing"),
            Err(ChemError::UnknownNodeKind { .. })
        ));
    }

    #[test]
    fn test_token_with_text() {
        let node = Node::token_with_text("1st-level escape", "&").unwrap();
        assert!(node.is_first_level_escape());
        assert_eq!(
            Node::token_with_text("comma enumeration S", ";").unwrap(),
            Node::CommaEnumerationS { text: ";".into() }
        );
        assert!(Node::token_with_text("hyphen", "-").is_err());
        assert!(Node::token_with_text("rm", "x").is_err());
    }
}
