//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `snaplist_core` linkage without the Flutter runtime.
//! - Parse a shorthand line passed as arguments and print it as JSON.

use std::process::ExitCode;

fn main() -> ExitCode {
    let line = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if line.trim().is_empty() {
        println!("snaplist_core ping={}", snaplist_core::ping());
        println!("snaplist_core version={}", snaplist_core::core_version());
        return ExitCode::SUCCESS;
    }

    if snaplist_core::is_bare_url(&line) {
        eprintln!("note: input is a bare URL; hosts route it through URL review");
    }

    let parsed = snaplist_core::parse_note(&line);
    match serde_json::to_string_pretty(&parsed) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to encode parsed note: {err}");
            ExitCode::FAILURE
        }
    }
}
