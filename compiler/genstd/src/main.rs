//! genstd CLI
//!
//! Links bodyless Gno functions in a standard library tree to their native
//! Go implementations.

use std::process::ExitCode;

use genstd::commands::{explain_error, run_link};
use genstd::tracing_setup::init_tracing;
use genstd::Options;

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let command = &args[1];

    match command.as_str() {
        "link" => match Options::parse(&args[2..]) {
            Ok(options) => run_link(&options),
            Err(err) => {
                eprintln!("error: {err}");
                eprintln!();
                eprintln!(
                    "Usage: genstd link [dir] [--module=<path>] [--json] [--color=<mode>]"
                );
                ExitCode::FAILURE
            }
        },
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: genstd explain <ERROR_CODE>");
                eprintln!("Example: genstd explain E2002");
                return ExitCode::FAILURE;
            }
            explain_error(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("genstd {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("genstd: link Gno standard libraries to native Go functions");
    println!();
    println!("Usage: genstd <command> [options]");
    println!();
    println!("Commands:");
    println!("  link [dir]           Link every package under dir (default: .)");
    println!("  explain <code>       Explain an error code (e.g., E2002)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Link options:");
    println!("  --module=<path>      Go module prefix of the packages");
    println!("                       (default: github.com/gnolang/gno/gnovm/stdlibs)");
    println!("  --json               Print mappings as JSON");
    println!("  --color=<mode>       Diagnostic colors: auto, always, never");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable tracing output (e.g. genstd_link=debug)");
    println!("  GENSTD_LOG_TREE      Render tracing output as a span tree");
}
