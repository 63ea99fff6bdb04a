//! CLI binary for `verify_hooks`.
//!
//! This binary is a thin wrapper that reads stdin and delegates to the library.

use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;

use clap::Parser;
use verify_hooks::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Only read stdin for commands that need it (avoids blocking on terminal)
    let stdin = if cli.command.needs_stdin() && !io::stdin().is_terminal() {
        read_stdin()
    } else {
        String::new()
    };

    let output = cli::run(cli.command, &stdin);

    for line in output.stdout {
        println!("{line}");
    }
    for msg in output.stderr {
        eprintln!("{msg}");
    }

    output.exit_code
}

fn read_stdin() -> String {
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("Error reading stdin: {e}");
    }
    input
}
