//! Core translation modules
//!
//! - `parser`: pattern library, transition tables and the state-machine interpreter
//! - `node`: the intermediate node tree the parser produces
//! - `texify`: TeX generator for node trees

use std::fmt;
use std::str::FromStr;

pub mod node;
pub mod parser;
pub mod texify;

pub use node::{DType, Node};
pub use parser::{parse, parse_with, StateMachine};

use crate::utils::error::ChemResult;

/// Which notation the input is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// TeX with embedded `\ce{}` / `\pu{}` commands
    PassThrough,
    /// Body of a `\ce{}` command
    #[default]
    Equation,
    /// Body of a `\pu{}` command
    Unit,
}

impl Mode {
    /// Name of the machine that starts a parse in this mode
    pub fn machine(&self) -> &'static str {
        match self {
            Mode::PassThrough => "tex",
            Mode::Equation => "ce",
            Mode::Unit => "pu",
        }
    }

    fn adds_outer_braces(&self) -> bool {
        !matches!(self, Mode::PassThrough)
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tex" | "pass-through" | "passthrough" => Ok(Mode::PassThrough),
            "ce" | "equation" => Ok(Mode::Equation),
            "pu" | "unit" => Ok(Mode::Unit),
            other => Err(format!(
                "unknown mode '{}' (expected ce, pu or tex)",
                other
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.machine())
    }
}

/// Parse `input` in `mode` and render it as TeX
///
/// `Equation` and `Unit` results are wrapped in one brace pair (unless empty
/// or containing a top-level `&`, `\\` or `\hline`); pass-through output is not.
pub fn translate(input: &str, mode: Mode) -> ChemResult<String> {
    let nodes = parse(input, mode.machine())?;
    texify::go(&nodes, mode.adds_outer_braces())
}

pub fn ce_to_tex(input: &str) -> ChemResult<String> {
    translate(input, Mode::Equation)
}

pub fn pu_to_tex(input: &str) -> ChemResult<String> {
    translate(input, Mode::Unit)
}

pub fn tex_to_tex(input: &str) -> ChemResult<String> {
    translate(input, Mode::PassThrough)
}
