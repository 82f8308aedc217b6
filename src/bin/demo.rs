//! Demonstration driver for the matcher.
//!
//! Declares a small argument set, parses the real argv with the library, and
//! prints what it matched. Doubles as the target of the CLI regression tests.

use std::process::ExitCode;

use clasp::{errors, ArgRegistry, ArgSpec, LogSink, Matcher};

fn build_registry() -> ArgRegistry {
    ArgRegistry::new()
        .declare(ArgSpec::flag("--help"))
        .declare(ArgSpec::valued("--say").alias("-s"))
        .declare(ArgSpec::flag("--no-log").aliases(["--nl", "-nl", "--nol"]))
        .declare(ArgSpec::flag("--dump"))
}

fn main() -> ExitCode {
    let registry = build_registry();

    // First pass without a sink, just to learn whether logging is wanted.
    // Parsing is pure, so a second pass sees exactly the same bindings.
    let probe = Matcher::new(&registry).parse_env();
    let sink = if probe.is_set("--no-log") {
        LogSink::disabled()
    } else {
        LogSink::to_file("demo.log")
    };
    sink.clear();

    let result = Matcher::new(&registry).with_log(&sink).parse_env();
    if let Some(error) = result.error() {
        errors::print_error(error.clone());
        return ExitCode::FAILURE;
    }

    if result.is_set("--help") {
        print_usage();
    }
    if result.has_value("--say") {
        println!("{}", result.value_of("--say"));
    }
    if result.is_set("--dump") {
        match serde_json::to_string_pretty(result.args()) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("dump failed: {}", err),
        }
    }
    ExitCode::SUCCESS
}

fn print_usage() {
    println!("usage: demo [--help] [--say <text>] [--no-log] [--dump]");
    println!("  --help           print this message");
    println!("  --say, -s <text> echo <text> back");
    println!("  --no-log         skip writing demo.log (aliases: --nl, -nl, --nol)");
    println!("  --dump           print the bound snapshot as JSON");
}
