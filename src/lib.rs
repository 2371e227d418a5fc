//! # chemtex
//!
//! Translator for mhchem-style `\ce{}` chemical equations and `\pu{}`
//! physical units into plain TeX math.
//!
//! ## Features
//!
//! - **Chemical equations**: formulas, charges, oxidation states, isotopes,
//!   bonds, reaction arrows with conditions, states of aggregation
//! - **Physical units**: numbers with uncertainty and exponents, digit grouping,
//!   unit products and fractions
//! - **Pass-through**: TeX text with embedded `\ce{}` / `\pu{}` commands
//! - **WASM Support**: Compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ```rust
//! use chemtex::{ce_to_tex, translate, Mode};
//!
//! let tex = ce_to_tex("H2O").unwrap();
//! assert_eq!(tex, r"{\mathrm{H}{\vphantom{A}}_{\smash[t]{2}}\mathrm{O}}");
//!
//! let tex = translate(r"water is \ce{H2O}", Mode::PassThrough).unwrap();
//! assert!(tex.starts_with("water is {"));
//! ```
//!
//! ### Inspecting the node tree
//!
//! ```rust
//! use chemtex::{parse, Node};
//!
//! let nodes = parse("A -> B", "ce").unwrap();
//! assert!(nodes.iter().any(|n| matches!(n, Node::Arrow { .. })));
//! ```

/// Core translation modules
pub mod core;

/// Data layer - static TeX tables
pub mod data;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core translation functions
pub use core::node::{DType, Node};
pub use core::parser::{parse, parse_with, StateMachine};
pub use core::texify;
pub use core::{ce_to_tex, pu_to_tex, tex_to_tex, translate, Mode};

// Re-export symbol data
pub use data::symbols;

// Re-export utilities
pub use utils::error::{ChemError, ChemResult, ErrorClass};

/// Render an already parsed node sequence as TeX
///
/// # Arguments
/// * `nodes` - Output of [`parse`]
/// * `add_outer_braces` - Wrap the result in one brace pair
pub fn render(nodes: &[Node], add_outer_braces: bool) -> ChemResult<String> {
    texify::go(nodes, add_outer_braces)
}
