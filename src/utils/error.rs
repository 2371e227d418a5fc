//! Error handling for chemtex translations
//!
//! This module provides a unified error type and result type for parsing
//! and TeX generation. Errors fall in two classes: malformed user input, and
//! internal inconsistencies of the state machine tables.

use std::fmt;

/// Translation error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChemError {
    /// A `}` was found with no matching `{` while scanning a group
    MismatchedBrace {
        /// Remaining input starting at the offending brace
        context: String,
    },
    /// `\bond{...}` named a bond that has no TeX rendering
    UnknownBond { kind: String },
    /// An arrow kind that has no TeX rendering
    UnknownArrow { kind: String },
    /// The same input was seen too many times in a row
    Stagnation {
        machine: String,
        state: String,
        input: String,
    },
    /// No rule of the active state matched the remaining input
    UnmatchedInput {
        machine: String,
        state: String,
        input: String,
    },
    /// A table referenced a pattern that does not exist
    UnknownPattern { name: String },
    /// A table referenced an action that does not exist
    UnknownAction { machine: String, name: String },
    /// A state machine was requested by a name that does not exist
    UnknownMachine { name: String },
    /// An `insert` action named a node kind that does not exist
    UnknownNodeKind { name: String },
    /// An operator kind that has no TeX rendering
    UnknownOperator { kind: String },
    /// An action received a match shape it cannot use
    BadMatch { action: String },
}

/// The two classes of [`ChemError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caused by invalid user input
    MalformedInput,
    /// Caused by a bug in the state machine tables
    InternalInconsistency,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorClass::MalformedInput => write!(f, "malformed input"),
            ErrorClass::InternalInconsistency => write!(f, "internal inconsistency"),
        }
    }
}

impl fmt::Display for ChemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChemError::MismatchedBrace { context } => {
                write!(
                    f,
                    "Extra close brace or missing open brace near '{}'",
                    context
                )
            }
            ChemError::UnknownBond { kind } => write!(f, "Unknown bond type ({})", kind),
            ChemError::UnknownArrow { kind } => write!(f, "Unknown arrow type ({})", kind),
            ChemError::Stagnation {
                machine,
                state,
                input,
            } => write!(
                f,
                "Internal error: no progress in machine '{}' state '{}' at '{}'",
                machine, state, input
            ),
            ChemError::UnmatchedInput {
                machine,
                state,
                input,
            } => write!(
                f,
                "Internal error: unexpected input in machine '{}' state '{}' at '{}'",
                machine, state, input
            ),
            ChemError::UnknownPattern { name } => {
                write!(f, "Internal error: unknown pattern '{}'", name)
            }
            ChemError::UnknownAction { machine, name } => {
                write!(
                    f,
                    "Internal error: unknown action '{}' in machine '{}'",
                    name, machine
                )
            }
            ChemError::UnknownMachine { name } => {
                write!(f, "Internal error: unknown state machine '{}'", name)
            }
            ChemError::UnknownNodeKind { name } => {
                write!(f, "Internal error: unknown node kind '{}'", name)
            }
            ChemError::UnknownOperator { kind } => {
                write!(f, "Internal error: unknown operator '{}'", kind)
            }
            ChemError::BadMatch { action } => {
                write!(f, "Internal error: unexpected match shape for action '{}'", action)
            }
        }
    }
}

impl std::error::Error for ChemError {}

/// Result type for translation operations
pub type ChemResult<T> = Result<T, ChemError>;

// Convenience constructors and classification
impl ChemError {
    pub fn mismatched_brace(context: impl Into<String>) -> Self {
        ChemError::MismatchedBrace {
            context: context.into(),
        }
    }

    pub fn unknown_pattern(name: impl Into<String>) -> Self {
        ChemError::UnknownPattern { name: name.into() }
    }

    pub fn unknown_machine(name: impl Into<String>) -> Self {
        ChemError::UnknownMachine { name: name.into() }
    }

    pub fn bad_match(action: impl Into<String>) -> Self {
        ChemError::BadMatch {
            action: action.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            ChemError::MismatchedBrace { .. }
            | ChemError::UnknownBond { .. }
            | ChemError::UnknownArrow { .. } => ErrorClass::MalformedInput,
            _ => ErrorClass::InternalInconsistency,
        }
    }

    pub fn is_malformed_input(&self) -> bool {
        self.class() == ErrorClass::MalformedInput
    }

    pub fn is_internal(&self) -> bool {
        self.class() == ErrorClass::InternalInconsistency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_brace_display() {
        let err = ChemError::mismatched_brace("}x");
        assert!(err.to_string().contains("Extra close brace"));
        assert!(err.to_string().contains("}x"));
    }

    #[test]
    fn test_error_classes() {
        assert!(ChemError::mismatched_brace("}").is_malformed_input());
        assert!(ChemError::UnknownBond {
            kind: "?".to_string()
        }
        .is_malformed_input());
        assert!(ChemError::unknown_pattern("nope").is_internal());
        assert_eq!(
            ChemError::Stagnation {
                machine: "ce".to_string(),
                state: "0".to_string(),
                input: "x".to_string(),
            }
            .class(),
            ErrorClass::InternalInconsistency
        );
    }

    #[test]
    fn test_internal_display_names_location() {
        let err = ChemError::UnmatchedInput {
            machine: "pu".to_string(),
            state: "d".to_string(),
            input: "%".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'pu'"));
        assert!(msg.contains("'d'"));
        assert!(msg.contains("'%'"));
    }
}
