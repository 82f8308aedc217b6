//! Matcher behavior tests: binding, scan failures, dependency rules,
//! overflow capture, and the purity properties callers rely on.

use clasp::{ArgRegistry, ArgSpec, ErrorCode, Matcher};

/// The demo driver's argument set: one flag, one aliased valued option, one
/// heavily aliased flag.
fn echo_registry() -> ArgRegistry {
    ArgRegistry::new()
        .declare(ArgSpec::flag("--help"))
        .declare(ArgSpec::valued("--say").alias("-s"))
        .declare(ArgSpec::flag("--no-log").aliases(["--nl", "-nl", "--nol"]))
}

#[cfg(test)]
mod binding_tests {
    use super::*;

    #[test]
    fn round_trip_binds_flags_and_values() {
        let registry = echo_registry();
        let result = Matcher::new(&registry).parse(["--help", "-s", "hi", "-nl"]);

        assert!(result.is_ok());
        assert!(result.is_set("--help"));
        assert_eq!(result.value_of("--say"), "hi");
        assert!(result.is_set("--no-log"));
    }

    #[test]
    fn every_alias_of_a_valued_spec_binds_the_value() {
        let registry =
            ArgRegistry::new().declare(ArgSpec::valued("--say").aliases(["-s", "--speak"]));

        for alias in ["--say", "-s", "--speak"] {
            let result = Matcher::new(&registry).parse([alias, "v"]);
            assert!(result.is_ok(), "alias {} failed to match", alias);
            assert_eq!(result.value_of("--say"), "v");
        }
    }

    #[test]
    fn queries_accept_any_alias_of_the_spec() {
        let registry = echo_registry();
        let result = Matcher::new(&registry).parse(["--say", "hi", "--nol"]);

        assert_eq!(result.value_of("-s"), "hi");
        assert!(result.is_set("-nl"));
        assert!(result.is_set("--no-log"));
    }

    #[test]
    fn absent_flags_and_undeclared_names_query_false() {
        let registry = echo_registry();
        let result = Matcher::new(&registry).parse(["-s", "hi"]);

        assert!(result.is_ok());
        assert!(!result.is_set("--help"));
        assert!(!result.is_set("--never-declared"));
        assert_eq!(result.value_of("--never-declared"), "");
        assert!(!result.has_value("--never-declared"));
    }

    #[test]
    fn kind_mismatched_queries_stay_inert() {
        let registry = echo_registry();
        let result = Matcher::new(&registry).parse(["--help", "-s", "hi"]);

        // A valued spec is never "set"; a flag never has a value.
        assert!(!result.is_set("--say"));
        assert_eq!(result.value_of("--help"), "");
    }

    #[test]
    fn positional_fallback_claims_an_unresolved_token() {
        let registry = ArgRegistry::new().declare(ArgSpec::positional("file"));
        let result = Matcher::new(&registry).parse(["unknown.txt"]);

        assert!(result.is_ok());
        assert_eq!(result.value_of("file"), "unknown.txt");
    }

    #[test]
    fn positionals_fill_in_declaration_order() {
        let registry = ArgRegistry::new()
            .declare(ArgSpec::positional("src"))
            .declare(ArgSpec::positional("dst"));
        let result = Matcher::new(&registry).parse(["a.txt", "b.txt"]);

        assert!(result.is_ok());
        assert_eq!(result.value_of("src"), "a.txt");
        assert_eq!(result.value_of("dst"), "b.txt");
    }

    #[test]
    fn explicitly_matched_positional_binds_its_own_token() {
        let registry = ArgRegistry::new().declare(ArgSpec::positional("status"));
        let result = Matcher::new(&registry).parse(["status"]);

        assert!(result.is_ok());
        assert_eq!(result.value_of("status"), "status");
    }

    #[test]
    fn declared_alias_wins_over_an_open_positional_slot() {
        let registry = ArgRegistry::new()
            .declare(ArgSpec::flag("--verbose").alias("-v"))
            .declare(ArgSpec::positional("file"));

        let result = Matcher::new(&registry).parse(["-v", "in.txt"]);
        assert!(result.is_ok());
        assert!(result.is_set("--verbose"));
        assert_eq!(result.value_of("file"), "in.txt");

        // The alias alone must not leak into the positional slot either.
        let result = Matcher::new(&registry).parse(["-v"]);
        assert!(result.is_ok());
        assert!(result.is_set("--verbose"));
        assert_eq!(result.value_of("file"), "");
    }

    #[test]
    fn rebinding_overwrites_with_the_last_occurrence() {
        let registry = ArgRegistry::new().declare(ArgSpec::valued("--say"));
        let result = Matcher::new(&registry).parse(["--say", "first", "--say", "second"]);

        assert!(result.is_ok());
        assert_eq!(result.value_of("--say"), "second");
    }
}

#[cfg(test)]
mod scan_failure_tests {
    use super::*;

    #[test]
    fn empty_input_reports_no_args() {
        let registry = echo_registry();
        let result = Matcher::new(&registry).parse(Vec::<String>::new());

        assert!(!result.is_ok());
        assert_eq!(result.error_code(), Some(ErrorCode::NoArgs));
    }

    #[test]
    fn unresolved_token_without_fallback_reports_unknown_arg() {
        let registry = echo_registry();
        let result = Matcher::new(&registry).parse(["--bogus"]);

        assert_eq!(result.error_code(), Some(ErrorCode::UnknownArg));
        assert_eq!(result.diagnostic(), Some("--bogus"));
    }

    #[test]
    fn valued_spec_at_the_final_index_reports_missing_value() {
        let registry = ArgRegistry::new().declare(ArgSpec::valued("--say"));
        let result = Matcher::new(&registry).parse(["--say"]);

        assert_eq!(result.error_code(), Some(ErrorCode::MissingValue));
        assert_eq!(result.diagnostic(), Some("--say"));
    }

    #[test]
    fn fixed_position_is_satisfied_at_its_declared_index() {
        let registry = ArgRegistry::new().declare(ArgSpec::positional("cmd").at_position(0));
        let result = Matcher::new(&registry).parse(["cmd"]);

        assert!(result.is_ok());
        assert_eq!(result.value_of("cmd"), "cmd");
    }

    #[test]
    fn fixed_position_violation_fails_the_whole_parse() {
        let registry = ArgRegistry::new()
            .declare(ArgSpec::flag("other"))
            .declare(ArgSpec::positional("cmd").at_position(0));
        let result = Matcher::new(&registry).parse(["other", "cmd"]);

        assert_eq!(result.error_code(), Some(ErrorCode::PositionMismatch));
        assert_eq!(result.diagnostic(), Some("cmd"));
    }

    #[test]
    fn fallback_claims_honor_fixed_positions_too() {
        let registry = ArgRegistry::new()
            .declare(ArgSpec::flag("--verbose"))
            .declare(ArgSpec::positional("file").at_position(0));
        let result = Matcher::new(&registry).parse(["--verbose", "data.txt"]);

        assert_eq!(result.error_code(), Some(ErrorCode::PositionMismatch));
        assert_eq!(result.diagnostic(), Some("data.txt"));
    }

    #[test]
    fn failed_result_still_exposes_the_bound_state() {
        let registry = ArgRegistry::new()
            .declare(ArgSpec::valued("--say"))
            .declare(ArgSpec::flag("--must").required());
        let result = Matcher::new(&registry).parse(["--say", "hi"]);

        assert_eq!(result.error_code(), Some(ErrorCode::MissingRequired));
        assert_eq!(result.value_of("--say"), "hi");
    }
}

#[cfg(test)]
mod dependency_tests {
    use super::*;

    #[test]
    fn required_flag_left_unbound_fails_validation() {
        let registry = ArgRegistry::new()
            .declare(ArgSpec::flag("--other"))
            .declare(ArgSpec::flag("--required").required());
        let result = Matcher::new(&registry).parse(["--other"]);

        assert_eq!(result.error_code(), Some(ErrorCode::MissingRequired));
        assert_eq!(result.diagnostic(), Some("--required"));
    }

    #[test]
    fn required_flag_is_satisfied_by_presence() {
        let registry = ArgRegistry::new().declare(ArgSpec::flag("--required").required());
        let result = Matcher::new(&registry).parse(["--required"]);

        assert!(result.is_ok());
        assert!(result.is_set("--required"));
    }

    #[test]
    fn required_valued_spec_needs_a_non_empty_value() {
        let registry = ArgRegistry::new().declare(ArgSpec::valued("--out").required());
        let result = Matcher::new(&registry).parse(["--out", ""]);

        assert_eq!(result.error_code(), Some(ErrorCode::MissingRequired));
        assert_eq!(result.diagnostic(), Some("--out"));
    }

    #[test]
    fn unknown_tokens_are_reported_before_dependency_validation() {
        let registry = ArgRegistry::new().declare(ArgSpec::flag("--required").required());
        let result = Matcher::new(&registry).parse(["stray"]);

        assert_eq!(result.error_code(), Some(ErrorCode::UnknownArg));
        assert_eq!(result.diagnostic(), Some("stray"));
    }

    #[test]
    fn required_violation_surfaces_even_when_the_bin_absorbs_the_input() {
        let registry = ArgRegistry::new()
            .declare(ArgSpec::flag("--required").required())
            .capture_overflow();
        let result = Matcher::new(&registry).parse(["a", "b"]);

        assert_eq!(result.error_code(), Some(ErrorCode::MissingRequired));
        assert_eq!(result.diagnostic(), Some("--required"));
        assert_eq!(result.bin(), ["a", "b"]);
    }

    #[test]
    fn forbidden_spec_bound_fails_validation() {
        let registry = ArgRegistry::new().declare(ArgSpec::flag("--legacy").forbidden());
        let result = Matcher::new(&registry).parse(["--legacy"]);

        assert_eq!(result.error_code(), Some(ErrorCode::ForbiddenPresent));
        assert_eq!(result.diagnostic(), Some("--legacy"));
    }

    #[test]
    fn forbidden_spec_left_alone_passes() {
        let registry = ArgRegistry::new()
            .declare(ArgSpec::flag("--legacy").forbidden())
            .declare(ArgSpec::flag("--modern"));
        let result = Matcher::new(&registry).parse(["--modern"]);

        assert!(result.is_ok());
        assert!(!result.is_set("--legacy"));
    }

    #[test]
    fn required_violations_outrank_earlier_declared_forbidden_violations() {
        let registry = ArgRegistry::new()
            .declare(ArgSpec::flag("--legacy").forbidden())
            .declare(ArgSpec::flag("--must").required());
        let result = Matcher::new(&registry).parse(["--legacy"]);

        assert_eq!(result.error_code(), Some(ErrorCode::MissingRequired));
        assert_eq!(result.diagnostic(), Some("--must"));
    }

    #[test]
    fn first_required_violation_in_declaration_order_wins() {
        let registry = ArgRegistry::new()
            .declare(ArgSpec::flag("--present"))
            .declare(ArgSpec::flag("--first").required())
            .declare(ArgSpec::flag("--second").required());
        let result = Matcher::new(&registry).parse(["--present"]);

        assert_eq!(result.error_code(), Some(ErrorCode::MissingRequired));
        assert_eq!(result.diagnostic(), Some("--first"));
    }
}

#[cfg(test)]
mod overflow_tests {
    use super::*;

    #[test]
    fn unresolved_trailing_tokens_land_in_the_bin() {
        let registry = ArgRegistry::new()
            .declare(ArgSpec::flag("--verbose"))
            .capture_overflow();
        let result = Matcher::new(&registry).parse(["a", "b", "c"]);

        assert!(result.is_ok());
        assert_eq!(result.bin(), ["a", "b", "c"]);
        assert!(!result.is_set("--verbose"));
    }

    #[test]
    fn the_bin_sweeps_everything_after_the_first_unresolved_token() {
        let registry = ArgRegistry::new()
            .declare(ArgSpec::flag("--help"))
            .capture_overflow();
        let result = Matcher::new(&registry).parse(["x", "--help"]);

        // Once the scan overflows it terminates; later tokens are not
        // re-examined even when they would have resolved.
        assert!(result.is_ok());
        assert_eq!(result.bin(), ["x", "--help"]);
        assert!(!result.is_set("--help"));
    }

    #[test]
    fn overflow_begins_only_after_positional_slots_fill() {
        let registry = ArgRegistry::new()
            .declare(ArgSpec::positional("file"))
            .capture_overflow();
        let result = Matcher::new(&registry).parse(["a", "b", "c"]);

        assert!(result.is_ok());
        assert_eq!(result.value_of("file"), "a");
        assert_eq!(result.bin(), ["b", "c"]);
    }

    #[test]
    fn the_bin_stays_empty_when_every_token_binds() {
        let registry = echo_registry();
        let result = Matcher::new(&registry).parse(["--help"]);

        assert!(result.is_ok());
        assert!(result.bin().is_empty());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn parsing_identical_tokens_twice_yields_equal_results() {
        let registry = echo_registry().capture_overflow();
        let matcher = Matcher::new(&registry);

        let first = matcher.parse(["--help", "-s", "hi", "tail"]);
        let second = matcher.parse(["--help", "-s", "hi", "tail"]);
        assert_eq!(first.args(), second.args());
        assert_eq!(first.bin(), second.bin());
        assert_eq!(first.error_code(), second.error_code());

        let first = matcher.parse(Vec::<String>::new());
        let second = matcher.parse(Vec::<String>::new());
        assert_eq!(first.args(), second.args());
        assert_eq!(first.error_code(), second.error_code());
    }

    #[test]
    fn a_failed_parse_leaves_no_trace_in_the_next_one() {
        let registry = ArgRegistry::new().declare(ArgSpec::valued("--say"));
        let matcher = Matcher::new(&registry);

        let failed = matcher.parse(["--say"]);
        assert_eq!(failed.error_code(), Some(ErrorCode::MissingValue));

        let clean = matcher.parse(["--say", "hi"]);
        assert!(clean.is_ok());
        assert_eq!(clean.value_of("--say"), "hi");
    }

    #[test]
    fn one_registry_serves_concurrent_parses() {
        let registry = echo_registry();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        let result = Matcher::new(&registry).parse(["--help", "-s", "hi"]);
                        assert!(result.is_ok());
                        assert_eq!(result.value_of("--say"), "hi");
                    }
                });
            }
        });
    }

    #[test]
    fn results_outlive_later_parses_of_the_same_registry() {
        let registry = echo_registry();
        let matcher = Matcher::new(&registry);

        let earlier = matcher.parse(["-s", "kept"]);
        let _later = matcher.parse(["-s", "overwritten?"]);
        assert_eq!(earlier.value_of("--say"), "kept");
    }
}
