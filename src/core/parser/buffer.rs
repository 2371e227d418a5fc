//! Per-invocation parse buffer
//!
//! Fields accumulate the parts of the entity currently being read. An empty
//! string means the part is absent.

use crate::core::node::DType;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    /// Amount
    pub a: String,
    /// Left superscript
    pub b: String,
    /// Left subscript
    pub p: String,
    /// Main symbol
    pub o: String,
    /// Right subscript
    pub q: String,
    /// Right superscript
    pub d: String,
    pub d_type: Option<DType>,
    pub rm: String,
    pub text: String,
    /// A space was read before the pending entity
    pub sb: bool,
    /// Reaction arrow
    pub r: String,
    /// Type marker of the text above the arrow (`C`, `M` or `T`)
    pub rdt: String,
    /// Text above the arrow
    pub rd: String,
    /// Type marker of the text below the arrow
    pub rqt: String,
    /// Text below the arrow
    pub rq: String,
    pub parenthesis_level: i32,
    pub begins_with_bond: bool,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything except `parenthesis_level` and `begins_with_bond`
    pub fn reset_keeping_persistent(&mut self) {
        *self = Buffer {
            parenthesis_level: self.parenthesis_level,
            begins_with_bond: self.begins_with_bond,
            ..Buffer::default()
        };
    }

    pub fn clear(&mut self) {
        *self = Buffer::default();
    }

    /// No part of a chemical entity has been read yet
    pub fn has_no_entity(&self) -> bool {
        self.a.is_empty()
            && self.b.is_empty()
            && self.p.is_empty()
            && self.o.is_empty()
            && self.q.is_empty()
            && self.d.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_keeps_persistent_fields() {
        let mut buffer = Buffer {
            o: "H".to_string(),
            d_type: Some(DType::Kv),
            sb: true,
            r: "->".to_string(),
            parenthesis_level: 2,
            begins_with_bond: true,
            ..Buffer::default()
        };
        buffer.reset_keeping_persistent();
        assert!(buffer.has_no_entity());
        assert!(buffer.r.is_empty());
        assert!(!buffer.sb);
        assert_eq!(buffer.d_type, None);
        assert_eq!(buffer.parenthesis_level, 2);
        assert!(buffer.begins_with_bond);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut buffer = Buffer {
            text: "abc".to_string(),
            parenthesis_level: 1,
            ..Buffer::default()
        };
        buffer.clear();
        assert_eq!(buffer, Buffer::new());
    }
}
