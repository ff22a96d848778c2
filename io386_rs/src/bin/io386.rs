use std::process::ExitCode;

use io386::cli::entrypoint::{EntryOptions, run};

fn main() -> ExitCode {
    run(&EntryOptions {
        binary_name: "io386",
    })
}
