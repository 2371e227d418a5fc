//! Data layer - static TeX tables

pub mod symbols;

pub use symbols::{ARROWS, BONDS, OPERATORS};
