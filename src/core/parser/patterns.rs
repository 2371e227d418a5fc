//! Pattern library
//!
//! Every pattern is looked up by name and matched against the *start* of the
//! remaining input. A match yields the captured value and the remainder.
//!
//! Plain patterns are anchored regexes. The `regex` crate has no lookaround,
//! so patterns ending in a lookahead are split into a regex and a guard that
//! must match at the start of the remainder; the few patterns with lookahead
//! inside an alternation or repetition are hand-written scanners.

use std::borrow::Cow;

use fxhash::FxHashMap;
use lazy_static::lazy_static;
use regex::Regex;

use super::observe::{find_observe_groups, Delim, Group, GroupSpec};
use crate::utils::error::{ChemError, ChemResult};

/// Value captured by a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matched {
    Text(String),
    /// Ordered capture groups; groups that did not participate are `None`
    Groups(Vec<Option<String>>),
}

impl Matched {
    /// The match as one string; groups are concatenated
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Matched::Text(s) => Cow::Borrowed(s),
            Matched::Groups(groups) => Cow::Owned(groups.iter().flatten().cloned().collect()),
        }
    }

    /// Capture group `i`, treating an empty capture as absent
    pub fn group(&self, i: usize) -> Option<&str> {
        match self {
            Matched::Text(_) => None,
            Matched::Groups(groups) => groups
                .get(i)
                .and_then(|g| g.as_deref())
                .filter(|g| !g.is_empty()),
        }
    }
}

/// A successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch<'a> {
    pub value: Matched,
    pub remainder: &'a str,
}

pub type PatternFn = for<'a> fn(&'a str) -> ChemResult<Option<PatternMatch<'a>>>;

/// A named matcher
pub enum Pattern {
    Regex(Regex),
    /// Regex followed by a lookahead that must match the remainder
    Guarded { re: Regex, ahead: Regex },
    /// Balanced group scans, tried in order
    Observe(Vec<GroupSpec>),
    Func(PatternFn),
}

impl Pattern {
    fn regex(re: &str) -> Self {
        Pattern::Regex(Regex::new(re).expect("static pattern"))
    }

    fn guarded(re: &str, ahead: &str) -> Self {
        Pattern::Guarded {
            re: Regex::new(re).expect("static pattern"),
            ahead: Regex::new(ahead).expect("static pattern"),
        }
    }

    fn observe(spec: GroupSpec) -> Self {
        Pattern::Observe(vec![spec])
    }

    pub fn find<'a>(&self, input: &'a str) -> ChemResult<Option<PatternMatch<'a>>> {
        match self {
            Pattern::Regex(re) => Ok(capture(re, input)),
            Pattern::Guarded { re, ahead } => {
                Ok(capture(re, input).filter(|m| ahead.is_match(m.remainder)))
            }
            Pattern::Observe(specs) => {
                for spec in specs {
                    if let Some(m) = find_observe_groups(input, spec)? {
                        return Ok(Some(m));
                    }
                }
                Ok(None)
            }
            Pattern::Func(f) => f(input),
        }
    }
}

/// Regex match with the capture convention of the tables: more than one
/// group yields the list of groups, one group yields that group (or the
/// whole match if the group is empty), no group yields the whole match.
fn capture<'a>(re: &Regex, input: &'a str) -> Option<PatternMatch<'a>> {
    let caps = re.captures(input)?;
    let whole = caps.get(0)?;
    let value = if re.captures_len() > 2 {
        Matched::Groups(
            (1..caps.len())
                .map(|i| caps.get(i).map(|g| g.as_str().to_string()))
                .collect(),
        )
    } else {
        let group = caps.get(1).map(|g| g.as_str()).filter(|g| !g.is_empty());
        Matched::Text(group.unwrap_or(whole.as_str()).to_string())
    };
    Some(PatternMatch {
        value,
        remainder: &input[whole.end()..],
    })
}

fn text_match(input: &str, len: usize) -> PatternMatch<'_> {
    PatternMatch {
        value: Matched::Text(input[..len].to_string()),
        remainder: &input[len..],
    }
}

/// Match `name` against the start of `input`
pub fn match_pattern<'a>(name: &str, input: &'a str) -> ChemResult<Option<PatternMatch<'a>>> {
    match PATTERNS.get(name) {
        Some(pattern) => pattern.find(input),
        None => Err(ChemError::unknown_pattern(name)),
    }
}

/// Whether `name` is a registered pattern
pub fn is_known(name: &str) -> bool {
    PATTERNS.contains_key(name)
}

const GREEK: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "omicron", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi",
    "psi", "omega", "Gamma", "Delta", "Theta", "Lambda", "Xi", "Pi", "Sigma", "Upsilon", "Phi",
    "Psi", "Omega",
];

const GREEK_LOWER: &str = "alpha|beta|gamma|delta|epsilon|zeta|eta|theta|iota|kappa|lambda|mu|nu|xi|omicron|pi|rho|sigma|tau|upsilon|phi|chi|psi|omega";

/// ASCII-letter run at the start of `s`
fn ascii_letters(s: &str) -> usize {
    s.bytes().take_while(|b| b.is_ascii_alphabetic()).count()
}

fn starts_with_letter(s: &str) -> bool {
    s.bytes().next().is_some_and(|b| b.is_ascii_alphabetic())
}

/// `\alpha` and friends, with a trailing run of spaces or `{}` swallowed
fn greek_command(input: &str) -> Option<usize> {
    let rest = input.strip_prefix('\\')?;
    let name_len = ascii_letters(rest);
    if !GREEK.contains(&&rest[..name_len]) {
        return None;
    }
    let mut len = 1 + name_len;
    let tail = &input[len..];
    let spaces: usize = tail
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(char::len_utf8)
        .sum();
    if spaces > 0 {
        len += spaces;
    } else if tail.starts_with("{}") {
        len += 2;
    }
    Some(len)
}

fn is_letter_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || ('\u{03B1}'..='\u{03C9}').contains(&c)
        || ('\u{0391}'..='\u{03A9}').contains(&c)
        || c == '?'
        || c == '@'
}

fn letters(input: &str) -> ChemResult<Option<PatternMatch<'_>>> {
    let mut len = 0;
    loop {
        let rest = &input[len..];
        match rest.chars().next() {
            Some(c) if is_letter_char(c) => len += c.len_utf8(),
            Some('\\') => match greek_command(rest) {
                Some(n) => len += n,
                None => break,
            },
            _ => break,
        }
    }
    Ok((len > 0).then(|| text_match(input, len)))
}

fn greek(input: &str) -> ChemResult<Option<PatternMatch<'_>>> {
    Ok(greek_command(input).map(|len| text_match(input, len)))
}

lazy_static! {
    static ref AMOUNT_NUMBER: Regex = Regex::new(
        r"^(?:\([+\-]?[0-9]+/[0-9]+\)|[+\-]?(?:[0-9]+|\$[a-z]\$|[a-z])/[0-9]+|[+\-]?[0-9]+[.,][0-9]+|[+\-]?\.[0-9]+|[+\-]?[0-9]+)"
    )
    .expect("static pattern");
    static ref AMOUNT_LETTER: Regex = Regex::new(r"^[+\-]?[a-z]").expect("static pattern");
    static ref UPPERCASE_AHEAD: Regex = Regex::new(r"^\s*[A-Z]").expect("static pattern");
    static ref NO_SPACE_AHEAD: Regex = Regex::new(r"^(?:$|\S)").expect("static pattern");
    static ref AMOUNT_MATH: Regex = Regex::new(
        r"^\$(?:\(?[+\-]?(?:[0-9]*[a-z]?[+\-])?[0-9]*[a-z](?:[+\-][0-9]*[a-z]?)?\)?|\+|-)\$$"
    )
    .expect("static pattern");
    static ref OPERATOR_AHEAD: Regex = Regex::new(r"^(?:\s|$|-?[0-9])").expect("static pattern");
    static ref ORBITAL_NUMBERED: Regex = Regex::new(r"^[0-9]{1,2}[spdfgh]").expect("static pattern");
    static ref ORBITAL_HYBRID: Regex = Regex::new(r"^[0-9]{0,2}sp").expect("static pattern");
    static ref NOT_LETTER_AHEAD: Regex = Regex::new(r"^(?:$|[^a-zA-Z])").expect("static pattern");
    static ref CA_SPACED: Regex = Regex::new(r"^\\ca\s+").expect("static pattern");
    static ref AGGREGATION_OPEN: Regex = Regex::new(r"^\([a-z]{1,3}").expect("static pattern");
    static ref PHRASE_END: Regex = Regex::new(r"^(?:$|[\s,;\)\]\}])").expect("static pattern");
    static ref CRYSTAL_SYSTEM: Regex = Regex::new(r"^\((?:\\ca\s?)?\$[amothc]\$\)").expect("static pattern");
    static ref PARENTHESIZED_LETTERS: Regex = Regex::new(r"^\([a-z]+\)$").expect("static pattern");
    static ref FORMULA: Regex = Regex::new(
        r"^(?:[a-z]|(?:[0-9 +\-,.()]+[a-z])+[0-9 +\-,.()]*|(?:[a-z][0-9 +\-,.()]+)+[a-z]?)$"
    )
    .expect("static pattern");
    static ref SCIENTIFIC: Regex = Regex::new(
        r"^(\+\-|\+/\-|\+|\-|\\pm\s?)?([0-9]+(?:[,.][0-9]+)?|[0-9]*(?:\.[0-9]+))?(\((?:[0-9]+(?:[,.][0-9]+)?|[0-9]*(?:\.[0-9]+))\))?(?:(?:([eE])|\s*(\*|x|\\times|\x{00D7})\s*10\^)([+\-]?[0-9]+|\{[+\-]?[0-9]+\}))?"
    )
    .expect("static pattern");
}

/// Stoichiometric amount: `2`, `0.5`, `1/2`, `-2`, `n/2`, `+`, `$2n-1$`
fn amount(input: &str) -> ChemResult<Option<PatternMatch<'_>>> {
    if let Some(m) = AMOUNT_NUMBER.find(input) {
        let mut len = m.end();
        let rest = &input[len..];
        if rest.bytes().next().is_some_and(|b| b.is_ascii_lowercase())
            && UPPERCASE_AHEAD.is_match(&rest[1..])
        {
            len += 1;
        }
        return Ok(Some(text_match(input, len)));
    }
    if let Some(m) = AMOUNT_LETTER.find(input) {
        if UPPERCASE_AHEAD.is_match(&input[m.end()..]) {
            return Ok(Some(text_match(input, m.end())));
        }
    }
    if input.starts_with('+') && NO_SPACE_AHEAD.is_match(&input[1..]) {
        return Ok(Some(text_match(input, 1)));
    }
    let math = GroupSpec::single(Group::enclosed("$", "$"));
    if let Some(m) = find_observe_groups(input, &math)? {
        let text = m.value.text();
        if AMOUNT_MATH.is_match(&text) {
            return Ok(Some(text_match(input, text.len())));
        }
    }
    Ok(None)
}

/// `+`, or one of `- = < > << >> \approx $\approx$` before a space, the end, or a number
fn operator(input: &str) -> ChemResult<Option<PatternMatch<'_>>> {
    if input.starts_with('+') {
        return Ok(Some(text_match(input, 1)));
    }
    const GUARDED: &[&str] = &["-", "=", "<", ">", "<<", ">>", "\\approx", "$\\approx$"];
    for op in GUARDED {
        if input.starts_with(op) && OPERATOR_AHEAD.is_match(&input[op.len()..]) {
            return Ok(Some(text_match(input, op.len())));
        }
    }
    Ok(None)
}

/// Orbitals with a number in front (`2p`, `sp3` is matched as `sp`)
fn orbital(input: &str) -> ChemResult<Option<PatternMatch<'_>>> {
    for re in [&*ORBITAL_NUMBERED, &*ORBITAL_HYBRID] {
        if let Some(m) = re.find(input) {
            if NOT_LETTER_AHEAD.is_match(&input[m.end()..]) {
                return Ok(Some(text_match(input, m.end())));
            }
        }
    }
    Ok(None)
}

fn circa(input: &str) -> ChemResult<Option<PatternMatch<'_>>> {
    if let Some(m) = CA_SPACED.find(input) {
        return Ok(Some(text_match(input, m.end())));
    }
    if input.starts_with("\\ca") && !starts_with_letter(&input[3..]) {
        return Ok(Some(text_match(input, 3)));
    }
    Ok(None)
}

/// `^` or `_` without a sensible argument
fn bare_script(input: &str) -> ChemResult<Option<PatternMatch<'_>>> {
    let matched = (input.starts_with("^_") || input.starts_with("_^") || input == "^" || input == "_")
        .then_some(1);
    Ok(matched.map(|len| text_match(input, len)))
}

fn aggregation_open(input: &str) -> Option<usize> {
    let m = AGGREGATION_OPEN.find(input)?;
    input[m.end()..]
        .starts_with(&[')', ','][..])
        .then(|| m.end())
}

fn brace_ahead(input: &str) -> Option<usize> {
    input.starts_with('{').then_some(0)
}

/// `\name{`
fn macro_open(input: &str) -> Option<usize> {
    let rest = input.strip_prefix('\\')?;
    let name = ascii_letters(rest);
    (name > 0 && rest[name..].starts_with('{')).then(|| name + 2)
}

const AGGREGATION: GroupSpec = GroupSpec::single(Group::new(
    Delim::Empty,
    Delim::Scan(aggregation_open),
    Delim::Lit(")"),
    Delim::Empty,
));

/// `(aq)`, `(aq,$\infty$)`, `(aq, sat)` at the end of a phrase, or a crystal system `($o$)`
fn state_of_aggregation(input: &str) -> ChemResult<Option<PatternMatch<'_>>> {
    if let Some(m) = find_observe_groups(input, &AGGREGATION)? {
        if PHRASE_END.is_match(m.remainder) {
            return Ok(Some(m));
        }
    }
    Ok(CRYSTAL_SYSTEM
        .find(input)
        .map(|m| text_match(input, m.end())))
}

fn formula(input: &str) -> ChemResult<Option<PatternMatch<'_>>> {
    if PARENTHESIZED_LETTERS.is_match(input) {
        return Ok(None);
    }
    Ok(FORMULA.find(input).map(|m| text_match(input, m.end())))
}

/// Number with optional sign, uncertainty and power of ten
fn scientific(input: &str) -> ChemResult<Option<PatternMatch<'_>>> {
    Ok(capture(&SCIENTIFIC, input).filter(|m| m.remainder.len() < input.len()))
}

const fn wrapped(prefix: &'static str, suffix: &'static str) -> GroupSpec {
    GroupSpec::single(Group::wrapped(prefix, suffix))
}

const fn macro_group(prefix: &'static str) -> Group {
    Group::new(
        Delim::Lit(prefix),
        Delim::Scan(macro_open),
        Delim::Lit("}"),
        Delim::Empty,
    )
}

const fn two_args(command: &'static str, first_end: &'static str) -> GroupSpec {
    GroupSpec::pair(Group::wrapped(command, first_end), Group::wrapped("{", "}"))
}

lazy_static! {
    static ref PATTERNS: FxHashMap<&'static str, Pattern> = {
        let mut m = FxHashMap::default();
        m.insert("empty", Pattern::regex(r"^$"));
        m.insert("else", Pattern::regex(r"^."));
        m.insert("else2", Pattern::regex(r"^."));
        m.insert("space", Pattern::regex(r"^\s"));
        m.insert("space A", Pattern::guarded(r"^\s", r"^[A-Z\\$]"));
        m.insert("space$", Pattern::regex(r"^\s$"));
        m.insert("a-z", Pattern::regex(r"^[a-z]"));
        m.insert("x", Pattern::regex(r"^x"));
        m.insert("x$", Pattern::regex(r"^x$"));
        m.insert("i$", Pattern::regex(r"^i$"));
        m.insert("letters", Pattern::Func(letters));
        m.insert("\\greek", Pattern::Func(greek));
        m.insert(
            "one lowercase latin letter $",
            Pattern::regex(r"^(?:([a-z])(?:$|[^a-zA-Z]))$"),
        );
        m.insert(
            "$one lowercase latin letter$ $",
            Pattern::regex(r"^\$(?:([a-z])(?:$|[^a-zA-Z]))\$$"),
        );
        m.insert(
            "one lowercase greek letter $",
            Pattern::regex(&format!(
                r"^(?:\$?[\x{{03B1}}-\x{{03C9}}]\$?|\$?\\(?:{})\s*\$?)(?:\s+|\{{\}})?$",
                GREEK_LOWER
            )),
        );
        m.insert("digits", Pattern::regex(r"^[0-9]+"));
        m.insert(
            "-9.,9",
            Pattern::regex(r"^[+\-]?(?:[0-9]+(?:[,.][0-9]+)?|[0-9]*(?:\.[0-9]+))"),
        );
        m.insert(
            "-9.,9 no missing 0",
            Pattern::regex(r"^[+\-]?[0-9]+(?:[.,][0-9]+)?"),
        );
        m.insert("(-)(9.,9)(e)(99)", Pattern::Func(scientific));
        m.insert(
            "(-)(9)^(-9)",
            Pattern::regex(
                r"^(\+\-|\+/\-|\+|\-|\\pm\s?)?([0-9]+(?:[,.][0-9]+)?|[0-9]*(?:\.[0-9]+)?)\^([+\-]?[0-9]+|\{[+\-]?[0-9]+\})",
            ),
        );
        m.insert("state of aggregation $", Pattern::Func(state_of_aggregation));
        m.insert(
            "_{(state of aggregation)}$",
            Pattern::regex(r"^_\{(\([a-z]{1,3}\))\}"),
        );
        m.insert("{[(", Pattern::regex(r"^(?:\\\{|\[|\()"));
        m.insert(")]}", Pattern::regex(r"^(?:\)|\]|\\\})"));
        m.insert(", ", Pattern::regex(r"^[,;]\s*"));
        m.insert(",", Pattern::regex(r"^[,;]"));
        m.insert(".", Pattern::regex(r"^[.]"));
        m.insert(
            ". __* ",
            Pattern::regex(r"^([.\x{22C5}\x{00B7}\x{2022}]|[*])\s*"),
        );
        m.insert("...", Pattern::guarded(r"^\.\.\.", r"^(?:$|[^.])"));
        m.insert("^{(...)}", Pattern::observe(wrapped("^{", "}")));
        m.insert(
            "^($...$)",
            Pattern::observe(GroupSpec::single(Group::new(
                Delim::Lit("^"),
                Delim::Lit("$"),
                Delim::Lit("$"),
                Delim::Empty,
            ))),
        );
        m.insert("^a", Pattern::regex(r"^\^([0-9]+|[^\\_])"));
        m.insert(
            "^\\x{}{}",
            Pattern::observe(GroupSpec::joined(
                macro_group("^"),
                Group::enclosed("{", "}"),
            )),
        );
        m.insert("^\\x{}", Pattern::observe(GroupSpec::single(macro_group("^"))));
        m.insert("^\\x", Pattern::regex(r"^\^(\\[a-zA-Z]+)\s*"));
        m.insert("^(-1)", Pattern::regex(r"^\^(-?[0-9]+)"));
        m.insert("'", Pattern::regex(r"^'"));
        m.insert("_{(...)}", Pattern::observe(wrapped("_{", "}")));
        m.insert(
            "_($...$)",
            Pattern::observe(GroupSpec::single(Group::new(
                Delim::Lit("_"),
                Delim::Lit("$"),
                Delim::Lit("$"),
                Delim::Empty,
            ))),
        );
        m.insert("_9", Pattern::regex(r"^_([+\-]?[0-9]+|[^\\])"));
        m.insert(
            "_\\x{}{}",
            Pattern::observe(GroupSpec::joined(
                macro_group("_"),
                Group::enclosed("{", "}"),
            )),
        );
        m.insert("_\\x{}", Pattern::observe(GroupSpec::single(macro_group("_"))));
        m.insert("_\\x", Pattern::regex(r"^_(\\[a-zA-Z]+)\s*"));
        m.insert("^_", Pattern::Func(bare_script));
        m.insert("{}^", Pattern::guarded(r"^\{\}", r"^\^"));
        m.insert("{}", Pattern::regex(r"^\{\}"));
        m.insert(
            "{...}",
            Pattern::observe(GroupSpec::single(Group::enclosed("{", "}"))),
        );
        m.insert("{(...)}", Pattern::observe(wrapped("{", "}")));
        m.insert(
            "$...$",
            Pattern::observe(GroupSpec::single(Group::enclosed("$", "$"))),
        );
        m.insert(
            "${(...)}$__$(...)$",
            Pattern::Observe(vec![wrapped("${", "}$"), wrapped("$", "$")]),
        );
        m.insert("=<>", Pattern::regex(r"^[=<>]"));
        m.insert("#", Pattern::regex(r"^[#\x{2261}]"));
        m.insert("+", Pattern::regex(r"^\+"));
        m.insert(
            "-$",
            Pattern::guarded(r"^-", r"^(?:[\s_},;\]/]|$|\([a-z]+\))"),
        );
        m.insert("-9", Pattern::guarded(r"^-", r"^[0-9]"));
        m.insert(
            "- orbital overlap",
            Pattern::guarded(r"^-", r"^(?:[spd]|sp)(?:$|[\s,;\)\]\}])"),
        );
        m.insert("-", Pattern::regex(r"^-"));
        m.insert(
            "pm-operator",
            Pattern::regex(r"^(?:\\pm|\$\\pm\$|\+-|\+/-)"),
        );
        m.insert("operator", Pattern::Func(operator));
        m.insert(
            "arrowUpDown",
            Pattern::guarded(r"^(?:v|\(v\)|\^|\(\^\))", r"^(?:$|[\s,;\)\]\}])"),
        );
        m.insert("\\bond{(...)}", Pattern::observe(wrapped("\\bond{", "}")));
        m.insert(
            "->",
            Pattern::regex(r"^(?:<->|<-->|->|<-|<=>>|<<=>|<=>|[\x{2192}\x{27F6}\x{21CC}])"),
        );
        m.insert("CMT", Pattern::guarded(r"^[CMT]", r"^\["));
        m.insert("[(...)]", Pattern::observe(wrapped("[", "]")));
        m.insert("1st-level escape", Pattern::regex(r"^(&|\\\\|\\hline)\s*"));
        m.insert("\\,", Pattern::regex(r"^\\[, ;:]"));
        m.insert(
            "\\x{}{}",
            Pattern::observe(GroupSpec::joined(
                macro_group(""),
                Group::enclosed("{", "}"),
            )),
        );
        m.insert("\\x{}", Pattern::observe(GroupSpec::single(macro_group(""))));
        m.insert("\\ca", Pattern::Func(circa));
        m.insert("\\x", Pattern::regex(r"^(?:\\[a-zA-Z]+\s*|\\[_&{}%])"));
        m.insert("orbital", Pattern::Func(orbital));
        m.insert("others", Pattern::regex(r"^[/~|]"));
        m.insert("\\frac{(...)}", Pattern::observe(two_args("\\frac{", "}")));
        m.insert("\\overset{(...)}", Pattern::observe(two_args("\\overset{", "}")));
        m.insert("\\underset{(...)}", Pattern::observe(two_args("\\underset{", "}")));
        m.insert(
            "\\underbrace{(...)}",
            Pattern::observe(two_args("\\underbrace{", "}_")),
        );
        m.insert("\\color{(...)}", Pattern::observe(wrapped("\\color{", "}")));
        m.insert(
            "\\color{(...)}{(...)}",
            Pattern::Observe(vec![
                two_args("\\color{", "}"),
                GroupSpec::pair(
                    Group::new(
                        Delim::Lit("\\color"),
                        Delim::Lit("\\"),
                        Delim::Empty,
                        Delim::Scan(brace_ahead),
                    ),
                    Group::wrapped("{", "}"),
                ),
            ]),
        );
        m.insert("\\ce{(...)}", Pattern::observe(wrapped("\\ce{", "}")));
        m.insert("\\pu{(...)}", Pattern::observe(wrapped("\\pu{", "}")));
        m.insert(
            "oxidation$",
            Pattern::regex(r"^(?:[+-][IVX]+|(?:\\pm|\$\\pm\$|\+-|\+/-)\s*0)$"),
        );
        m.insert(
            "d-oxidation$",
            Pattern::regex(r"^(?:[+-]?[IVX]+|(?:\\pm|\$\\pm\$|\+-|\+/-)\s*0)$"),
        );
        m.insert(
            "1/2$",
            Pattern::regex(r"^[+\-]?(?:[0-9]+|\$[a-z]\$|[a-z])/[0-9]+(?:\$[a-z]\$|[a-z])?$"),
        );
        m.insert("amount", Pattern::Func(amount));
        m.insert("amount2", Pattern::Func(amount));
        m.insert(
            "(KV letters),",
            Pattern::guarded(r"^(?:[A-Z][a-z]{0,2}|i)", r"^,"),
        );
        m.insert("formula$", Pattern::Func(formula));
        m.insert(
            "uprightEntities",
            Pattern::guarded(r"^(?:pH|pOH|pC|pK|iPr|iBu)", r"^(?:$|[^a-zA-Z])"),
        );
        m.insert("/", Pattern::regex(r"^\s*(/)\s*"));
        m.insert("//", Pattern::regex(r"^\s*(//)\s*"));
        m.insert("*", Pattern::regex(r"^\s*[*.]\s*"));
        m
    };
}
