//! Registry of the mhchem state machines
//!
//! - `tex`: pass-through text with embedded `\ce{}` / `\pu{}`
//! - `ce` and its helpers (`a`, `o`, `text`, `pq`, `bd`, `oxidation`,
//!   `tex-math`, `tex-math tight`, `9,9`)
//! - `pu`, `pu-2`, `pu-9,9` for physical units

mod ce;
mod fragments;
mod tex;
mod units;


use fxhash::FxHashMap;
use lazy_static::lazy_static;

use super::StateMachine;
use crate::utils::error::{ChemError, ChemResult};

lazy_static! {
    static ref MACHINES: FxHashMap<&'static str, StateMachine> = {
        let all = [
            tex::machine(),
            ce::machine(),
            fragments::amount(),
            fragments::symbol(),
            fragments::text(),
            fragments::subscript(),
            fragments::superscript(),
            fragments::oxidation(),
            fragments::tex_math(),
            fragments::tex_math_tight(),
            fragments::decimal(),
            units::machine(),
            units::unit_names(),
            units::digit_groups(),
        ];
        all.into_iter().map(|m| (m.name, m)).collect()
    };
}

/// Look up a machine by name
pub fn get(name: &str) -> ChemResult<&'static StateMachine> {
    MACHINES
        .get(name)
        .ok_or_else(|| ChemError::unknown_machine(name))
}

/// Names of all registered machines
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = MACHINES.keys().copied().collect();
    names.sort_unstable();
    names
}
