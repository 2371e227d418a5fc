//! TeX renderings of bonds, arrows and operators

use phf::phf_map;

/// Bond kind to TeX
pub static BONDS: phf::Map<&'static str, &'static str> = phf_map! {
    "-" => "{-}",
    "1" => "{-}",
    "=" => "{=}",
    "2" => "{=}",
    "#" => "{\\equiv}",
    "3" => "{\\equiv}",
    "~" => "{\\tripledash}",
    "~-" => "{\\rlap{\\lower.1em{-}}\\raise.1em{\\tripledash}}",
    "~=" => "{\\rlap{\\lower.2em{-}}\\rlap{\\raise.2em{\\tripledash}}-}",
    "~--" => "{\\rlap{\\lower.2em{-}}\\rlap{\\raise.2em{\\tripledash}}-}",
    "-~-" => "{\\rlap{\\lower.2em{-}}\\rlap{\\raise.2em{-}}\\tripledash}",
    "..." => "{{\\cdot}{\\cdot}{\\cdot}}",
    "...." => "{{\\cdot}{\\cdot}{\\cdot}{\\cdot}}",
    "->" => "{\\rightarrow}",
    "<-" => "{\\leftarrow}",
    "<" => "{<}",
    ">" => "{>}",
};

/// Arrow kind to the name of the TeX arrow macro, without backslash or `long` prefix
pub static ARROWS: phf::Map<&'static str, &'static str> = phf_map! {
    "->" => "rightarrow",
    "\u{2192}" => "rightarrow",
    "\u{27F6}" => "rightarrow",
    "<-" => "leftarrow",
    "<->" => "leftrightarrow",
    "<-->" => "leftrightarrows",
    "<=>" => "rightleftharpoons",
    "\u{21CC}" => "rightleftharpoons",
    "<=>>" => "Rightleftharpoons",
    "<<=>" => "Leftrightharpoons",
};

/// Operator kind to TeX, spacing included
pub static OPERATORS: phf::Map<&'static str, &'static str> = phf_map! {
    "+" => " {}+{} ",
    "-" => " {}-{} ",
    "=" => " {}={} ",
    "<" => " {}<{} ",
    ">" => " {}>{} ",
    "<<" => " {}\\ll{} ",
    ">>" => " {}\\gg{} ",
    "\\pm" => " {}\\pm{} ",
    "\\approx" => " {}\\approx{} ",
    "$\\approx$" => " {}\\approx{} ",
    "v" => " \\downarrow{} ",
    "(v)" => " \\downarrow{} ",
    "^" => " \\uparrow{} ",
    "(^)" => " \\uparrow{} ",
};

/// Arrows whose conditions are stacked with `\overset`/`\underset` instead of `\x...`
pub const STACKED_ARROWS: &[&str] = &["<=>", "<=>>", "<<=>", "<-->"];

pub fn bond(kind: &str) -> Option<&'static str> {
    BONDS.get(kind).copied()
}

pub fn arrow(kind: &str) -> Option<&'static str> {
    ARROWS.get(kind).copied()
}

pub fn operator(kind: &str) -> Option<&'static str> {
    OPERATORS.get(kind).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups() {
        assert_eq!(bond("#"), Some("{\\equiv}"));
        assert_eq!(bond("?"), None);
        assert_eq!(arrow("\u{21CC}"), arrow("<=>"));
        assert_eq!(operator("(^)"), Some(" \\uparrow{} "));
    }
}
