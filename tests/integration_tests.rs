//! Integration tests for chemtex translation

use chemtex::core::parser::{compile, ActionSpec, ActionTable, Task};
use chemtex::{
    ce_to_tex, parse, parse_with, pu_to_tex, render, tex_to_tex, translate, ChemError, ErrorClass,
    Mode, Node, StateMachine,
};

fn brace_depth_never_negative_and_ends_at_zero(tex: &str) -> bool {
    let mut depth: i64 = 0;
    let mut escaped = false;
    for c in tex.chars() {
        match c {
            '\\' if !escaped => {
                escaped = true;
                continue;
            }
            '{' if !escaped => depth += 1,
            '}' if !escaped => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
        escaped = false;
    }
    depth == 0
}

// ============================================================================
// Chemical equations
// ============================================================================

mod equations {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_water() {
        assert_eq!(
            ce_to_tex("H2O").unwrap(),
            r"{\mathrm{H}{\vphantom{A}}_{\smash[t]{2}}\mathrm{O}}"
        );
    }

    #[test]
    fn test_reaction() {
        let result = ce_to_tex("A + B -> C").unwrap();
        let plus = result.find(" {}+{} ").expect("operator");
        let arrow = result.find(r"\mathrel{\longrightarrow}").expect("arrow");
        assert!(result.starts_with(r"{\mathrm{A}"));
        assert!(plus < arrow);
        assert!(result.ends_with(r"\mathrm{C}}"));
    }

    #[test]
    fn test_charge() {
        assert_eq!(
            ce_to_tex("X^{2+}").unwrap(),
            r"{\mathrm{X}{\vphantom{A}}^{2+}}"
        );
    }

    #[test]
    fn test_oxidation_state() {
        assert_eq!(
            ce_to_tex("Fe^{II}").unwrap(),
            r"{\mathrm{Fe}{\vphantom{A}}^{\mathrm{II}}}"
        );
    }

    #[test]
    fn test_arrow_with_conditions() {
        let result = ce_to_tex("A ->[T] B").unwrap();
        assert!(
            result.contains(r"\mathrel{\xrightarrow{\mathrm{T}}}"),
            "got '{}'",
            result
        );
    }

    #[test]
    fn test_arrow_node_kind() {
        let nodes = parse("A + B -> C", "ce").unwrap();
        assert!(nodes
            .iter()
            .any(|n| matches!(n, Node::Arrow { kind, above, below }
                if kind == "->" && above.is_empty() && below.is_empty())));
    }
}

// ============================================================================
// Physical units
// ============================================================================

mod units {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_uncertainty_is_not_grouped() {
        assert_eq!(pu_to_tex("1.23(4)").unwrap(), "{1.23(4)}");
    }

    #[test]
    fn test_digit_grouping() {
        assert_eq!(pu_to_tex("12345").unwrap(), r"{12\mkern2mu 345}");
    }

    #[test]
    fn test_number_with_units() {
        assert_eq!(
            pu_to_tex("10 m s-1").unwrap(),
            r"{10~\mathrm{m}\mkern3mu \mathrm{s^{-1}}}"
        );
    }

    #[test]
    fn test_unit_fraction() {
        assert_eq!(pu_to_tex("J/mol").unwrap(), r"{\mathrm{J}/\mathrm{mol}}");
        assert!(pu_to_tex("J//mol").unwrap().contains(r"\frac{\mathrm{J}}{\mathrm{mol}}"));
    }
}

// ============================================================================
// Pass-through
// ============================================================================

mod pass_through {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_is_copied() {
        assert_eq!(tex_to_tex("a + b").unwrap(), "a + b");
    }

    #[test]
    fn test_embedded_equation_matches_direct_translation() {
        for formula in ["A", "H2O", "X^{2+}", "A + B -> C"] {
            let embedded = tex_to_tex(&format!("\\ce{{{}}}", formula)).unwrap();
            assert_eq!(embedded, ce_to_tex(formula).unwrap(), "formula {}", formula);
        }
    }

    #[test]
    fn test_embedded_in_text() {
        assert_eq!(
            tex_to_tex(r"x \ce{H2O} y").unwrap(),
            format!("x {} y", ce_to_tex("H2O").unwrap())
        );
    }

    #[test]
    fn test_embedded_unit() {
        assert_eq!(
            tex_to_tex(r"\pu{10 m}").unwrap(),
            pu_to_tex("10 m").unwrap()
        );
    }
}

// ============================================================================
// Errors
// ============================================================================

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unmatched_brace_is_malformed_input() {
        let err = translate("$x}$", Mode::Equation).unwrap_err();
        assert!(matches!(err, ChemError::MismatchedBrace { .. }), "{:?}", err);
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_unknown_bond_is_malformed_input() {
        let err = ce_to_tex(r"A\bond{?}B").unwrap_err();
        assert_eq!(err, ChemError::UnknownBond { kind: "?".into() });
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_empty_bond_is_malformed_input() {
        let err = ce_to_tex(r"A\bond{}B").unwrap_err();
        assert_eq!(err, ChemError::UnknownBond { kind: "".into() });
        assert_eq!(err.class(), ErrorClass::MalformedInput);
    }

    #[test]
    fn test_unclosed_embedded_command_is_copied() {
        assert_eq!(tex_to_tex(r"\ce{H2O").unwrap(), r"\ce{H2O");
        assert_eq!(tex_to_tex(r"a \pu{10 m").unwrap(), r"a \pu{10 m");
    }

    #[test]
    fn test_unmatched_brace_in_subscript() {
        let err = ce_to_tex("A_{$x}$}").unwrap_err();
        assert!(matches!(err, ChemError::MismatchedBrace { .. }), "{:?}", err);
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_unknown_machine_is_internal() {
        let err = parse("x", "no-such-machine").unwrap_err();
        assert_eq!(
            err,
            ChemError::UnknownMachine {
                name: "no-such-machine".into()
            }
        );
        assert!(err.is_internal());
    }

    #[test]
    fn test_input_no_rule_accepts_is_internal() {
        let machine = StateMachine::new(
            "digits only",
            compile(vec![
                ("empty", vec![("*", Task::default())]),
                ("digits", vec![("*", Task::new(vec![ActionSpec::from("copy")]))]),
            ]),
            ActionTable::default(),
        );
        let err = parse_with(&machine, "12a").unwrap_err();
        assert_eq!(
            err,
            ChemError::UnmatchedInput {
                machine: "digits only".into(),
                state: "0".into(),
                input: "a".into(),
            }
        );
        assert_eq!(err.class(), ErrorClass::InternalInconsistency);
    }

    #[test]
    fn test_revisit_loop_is_stopped() {
        let machine = StateMachine::new(
            "looping",
            compile(vec![(
                "else",
                vec![("0|1", Task::default().next("1").revisit())],
            )]),
            ActionTable::default(),
        );
        let err = parse_with(&machine, "x").unwrap_err();
        assert!(
            matches!(&err, ChemError::Stagnation { machine, input, .. }
                if machine == "looping" && input == "x"),
            "{:?}",
            err
        );
        assert!(err.is_internal());
    }
}

// ============================================================================
// Properties
// ============================================================================

mod properties {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLES: &[(&str, Mode)] = &[
        ("H2O", Mode::Equation),
        ("A + B -> C", Mode::Equation),
        ("X^{2+}", Mode::Equation),
        ("Fe^{II}", Mode::Equation),
        ("CO2 + C -> 2 CO", Mode::Equation),
        ("->[T][$x$]", Mode::Equation),
        ("H-H", Mode::Equation),
        ("(A, B)", Mode::Equation),
        ("1.23(4)", Mode::Unit),
        ("10 m s-1", Mode::Unit),
        ("J//mol", Mode::Unit),
        ("25 ^oC", Mode::Unit),
        (r"x \ce{H2O} y", Mode::PassThrough),
    ];

    #[test]
    fn test_deterministic() {
        for (input, mode) in SAMPLES {
            assert_eq!(
                translate(input, *mode).unwrap(),
                translate(input, *mode).unwrap()
            );
        }
    }

    #[test]
    fn test_braces_balanced() {
        for (input, mode) in SAMPLES {
            let tex = translate(input, *mode).unwrap();
            assert!(
                brace_depth_never_negative_and_ends_at_zero(&tex),
                "unbalanced output for '{}': '{}'",
                input,
                tex
            );
        }
    }

    #[test]
    fn test_render_matches_translate() {
        for (input, mode) in SAMPLES {
            let nodes = parse(input, mode.machine()).unwrap();
            let braces = *mode != Mode::PassThrough;
            assert_eq!(
                render(&nodes, braces).unwrap(),
                translate(input, *mode).unwrap()
            );
        }
    }

    #[test]
    fn test_parallel_calls_agree() {
        let expected = ce_to_tex("CO2 + C -> 2 CO").unwrap();
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| ce_to_tex("CO2 + C -> 2 CO").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_empty_input() {
        for mode in [Mode::Equation, Mode::Unit, Mode::PassThrough] {
            assert_eq!(translate("", mode).unwrap(), "");
        }
    }
}
