//! Fable CLI
//!
//! Runs narrative programs from a directory of cached programs and text
//! compositions.

use std::path::Path;

use fablec::commands::{check_cache, run_dir, show_composition, RunOptions, DEFAULT_ENTRY};
use fablec::init_tracing;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "run" => {
            let mut options = None;
            let mut entry = None;
            let mut i = 2;
            while i < args.len() {
                if args[i] == "--entry" && i + 1 < args.len() {
                    entry = Some(args[i + 1].clone());
                    i += 2;
                } else if let Some(name) = args[i].strip_prefix("--entry=") {
                    entry = Some(name.to_string());
                    i += 1;
                } else {
                    if !args[i].starts_with('-') && options.is_none() {
                        options = Some(RunOptions::new(&args[i]));
                    }
                    i += 1;
                }
            }

            let Some(mut options) = options else {
                eprintln!("error: missing directory");
                eprintln!("Usage: fable run <dir> [--entry <program>]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --entry <program>   Program to run (default: {DEFAULT_ENTRY})");
                std::process::exit(1);
            };
            if let Some(entry) = entry {
                options.entry = entry;
            }
            run_dir(&options).map(|value| {
                tracing::debug!(result = %value, "run finished");
            })
        }
        "compose" => {
            if args.len() < 3 {
                eprintln!("Usage: fable compose <file.ftx>");
                std::process::exit(1);
            }
            show_composition(Path::new(&args[2])).map(|outline| print!("{outline}"))
        }
        "check-cache" => {
            if args.len() < 3 {
                eprintln!("Usage: fable check-cache <dir>");
                std::process::exit(1);
            }
            let mut report = String::new();
            let result = check_cache(Path::new(&args[2]), &mut report);
            print!("{report}");
            result
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("fable {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Fable narrative scripting engine");
    println!();
    println!("Usage: fable <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <dir> [--entry <program>]   Load a directory and run a program");
    println!("  compose <file.ftx>              Show a composition's paragraphs");
    println!("  check-cache <dir>               Report stale or unreadable program caches");
    println!("  help                            Show this message");
    println!("  version                         Show version information");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=fable_eval=debug) to control logging.");
}
