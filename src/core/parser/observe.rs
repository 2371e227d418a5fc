//! Balanced group scanning
//!
//! Scans forward from an opening delimiter to the matching closing
//! delimiter, counting `{`/`}` depth so that nested groups are skipped.
//! Two groups can be chained for two-argument macros such as `\frac{..}{..}`.

use super::patterns::{Matched, PatternMatch};
use crate::utils::error::{ChemError, ChemResult};

/// One delimiter of a group
#[derive(Debug, Clone, Copy)]
pub enum Delim {
    /// Matches the empty string; as a closing delimiter it means "unused"
    Empty,
    Lit(&'static str),
    /// Custom matcher returning the matched length at the start of the input
    Scan(fn(&str) -> Option<usize>),
}

impl Delim {
    fn match_len(&self, input: &str) -> Option<usize> {
        match self {
            Delim::Empty => Some(0),
            Delim::Lit(lit) => input.starts_with(lit).then(|| lit.len()),
            Delim::Scan(scan) => scan(input),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Delim::Empty)
    }
}

/// Delimiters of a single group
///
/// `beg_excl` is consumed but not part of the match, `beg_incl` is part of
/// it. The group ends at `end_incl` (kept in the match) or, if that is
/// empty, at `end_excl` (consumed but dropped).
#[derive(Debug, Clone, Copy)]
pub struct Group {
    pub beg_excl: Delim,
    pub beg_incl: Delim,
    pub end_incl: Delim,
    pub end_excl: Delim,
}

impl Group {
    pub const fn new(beg_excl: Delim, beg_incl: Delim, end_incl: Delim, end_excl: Delim) -> Self {
        Group {
            beg_excl,
            beg_incl,
            end_incl,
            end_excl,
        }
    }

    /// `prefix` ... `suffix`, both excluded from the match
    pub const fn wrapped(prefix: &'static str, suffix: &'static str) -> Self {
        Group::new(
            Delim::Lit(prefix),
            Delim::Empty,
            Delim::Empty,
            Delim::Lit(suffix),
        )
    }

    /// `open` ... `close`, both included in the match
    pub const fn enclosed(open: &'static str, close: &'static str) -> Self {
        Group::new(
            Delim::Empty,
            Delim::Lit(open),
            Delim::Lit(close),
            Delim::Empty,
        )
    }
}

/// A one- or two-group scan
#[derive(Debug, Clone, Copy)]
pub struct GroupSpec {
    pub first: Group,
    pub second: Option<Group>,
    /// Join both spans into one string instead of returning them separately
    pub combine: bool,
}

impl GroupSpec {
    pub const fn single(first: Group) -> Self {
        GroupSpec {
            first,
            second: None,
            combine: false,
        }
    }

    pub const fn pair(first: Group, second: Group) -> Self {
        GroupSpec {
            first,
            second: Some(second),
            combine: false,
        }
    }

    pub const fn joined(first: Group, second: Group) -> Self {
        GroupSpec {
            first,
            second: Some(second),
            combine: true,
        }
    }
}

/// Run a group scan against the start of `input`
pub fn find_observe_groups<'a>(
    input: &'a str,
    spec: &GroupSpec,
) -> ChemResult<Option<PatternMatch<'a>>> {
    let Some((first, remainder)) = scan_group(input, &spec.first)? else {
        return Ok(None);
    };
    let Some(second_group) = spec.second else {
        return Ok(Some(PatternMatch {
            value: Matched::Text(first.to_string()),
            remainder,
        }));
    };
    let Some((second, remainder)) = scan_group(remainder, &second_group)? else {
        return Ok(None);
    };
    let value = if spec.combine {
        Matched::Text(format!("{}{}", first, second))
    } else {
        Matched::Groups(vec![Some(first.to_string()), Some(second.to_string())])
    };
    Ok(Some(PatternMatch { value, remainder }))
}

fn scan_group<'a>(input: &'a str, group: &Group) -> ChemResult<Option<(&'a str, &'a str)>> {
    let Some(excluded) = group.beg_excl.match_len(input) else {
        return Ok(None);
    };
    let input = &input[excluded..];
    let Some(included) = group.beg_incl.match_len(input) else {
        return Ok(None);
    };
    let keep_end = !group.end_incl.is_empty();
    let end = if keep_end {
        group.end_incl
    } else {
        group.end_excl
    };
    let Some((end_begin, end_end)) = find_end(input, included, end)? else {
        return Ok(None);
    };
    let matched = &input[..if keep_end { end_end } else { end_begin }];
    Ok(Some((matched, &input[end_end..])))
}

/// Position of the closing delimiter at brace depth zero, as (begin, end)
fn find_end(input: &str, start: usize, end: Delim) -> ChemResult<Option<(usize, usize)>> {
    let mut braces = 0usize;
    for (offset, c) in input[start..].char_indices() {
        let i = start + offset;
        if braces == 0 {
            if let Some(len) = end.match_len(&input[i..]) {
                return Ok(Some((i, i + len)));
            }
        }
        match c {
            '{' => braces += 1,
            '}' => {
                if braces == 0 {
                    return Err(ChemError::mismatched_brace(&input[i..]));
                }
                braces -= 1;
            }
            _ => {}
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRACED: GroupSpec = GroupSpec::single(Group::enclosed("{", "}"));
    const FRAC: GroupSpec = GroupSpec::pair(
        Group::wrapped("\\frac{", "}"),
        Group::wrapped("{", "}"),
    );

    #[test]
    fn test_nested_braces_are_skipped() {
        let m = find_observe_groups("{a{b}c}d", &BRACED).unwrap().unwrap();
        assert_eq!(m.value, Matched::Text("{a{b}c}".to_string()));
        assert_eq!(m.remainder, "d");
    }

    #[test]
    fn test_excluded_delimiters() {
        let spec = GroupSpec::single(Group::wrapped("^{", "}"));
        let m = find_observe_groups("^{2+}x", &spec).unwrap().unwrap();
        assert_eq!(m.value, Matched::Text("2+".to_string()));
        assert_eq!(m.remainder, "x");
    }

    #[test]
    fn test_two_groups() {
        let m = find_observe_groups("\\frac{1}{2}+", &FRAC).unwrap().unwrap();
        assert_eq!(
            m.value,
            Matched::Groups(vec![Some("1".to_string()), Some("2".to_string())])
        );
        assert_eq!(m.remainder, "+");
    }

    #[test]
    fn test_unclosed_group_is_no_match() {
        assert!(find_observe_groups("{abc", &BRACED).unwrap().is_none());
        assert!(find_observe_groups("\\frac{1}", &FRAC).unwrap().is_none());
    }

    #[test]
    fn test_extra_close_brace_is_an_error() {
        let spec = GroupSpec::single(Group::enclosed("$", "$"));
        let err = find_observe_groups("$a}b$", &spec).unwrap_err();
        assert_eq!(err, ChemError::mismatched_brace("}b$"));
    }

    #[test]
    fn test_closing_delimiter_wins_over_brace_check() {
        let spec = GroupSpec::single(Group::wrapped("\\ce{", "}"));
        let m = find_observe_groups("\\ce{A}}", &spec).unwrap().unwrap();
        assert_eq!(m.value, Matched::Text("A".to_string()));
        assert_eq!(m.remainder, "}");
    }
}
