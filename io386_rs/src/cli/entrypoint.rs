//! Shared CLI entry point.
//!
//! `run` is the whole `main()` body: compile argv, report compile errors with
//! usage, install logging, then hand the descriptor to the dispatcher with
//! the real port backend and the process streams. `run_with` takes the
//! port backend and streams explicitly so the full flow is testable without
//! privileges.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use tracing::debug;

use super::command::{ParsedCommand, format_usage};
use super::parser::parse_command;
use crate::error::render;
use crate::port::{HardwarePorts, PortAccess};
use crate::{dispatch, logging};

/// Options controlling binary-specific behavior.
pub struct EntryOptions {
    /// Name shown in `-V` output and used when argv[0] is unavailable.
    pub binary_name: &'static str,
}

/// Run the CLI against the real hardware and process streams.
pub fn run(opts: &EntryOptions) -> ExitCode {
    // nosemgrep: rust.lang.security.args.args
    // argv only selects the port and transfer shape; argv[0] is display-only.
    let mut argv = std::env::args();
    let program = argv
        .next()
        .unwrap_or_else(|| opts.binary_name.to_string());
    let raw_args: Vec<String> = argv.collect();

    let mut ports = HardwarePorts::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(
        opts,
        &program,
        &raw_args,
        &mut ports,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut io::stderr(),
    )
}

/// The `main()` body with ports and streams injected.
///
/// Usage and error lines go to `diag`; `tracing` diagnostics (such as the
/// iopl escalation warning) go through the installed subscriber.
pub fn run_with<P, R, W, E>(
    opts: &EntryOptions,
    program: &str,
    args: &[String],
    ports: &mut P,
    input: &mut R,
    output: &mut W,
    diag: &mut E,
) -> ExitCode
where
    P: PortAccess + ?Sized,
    R: Read + ?Sized,
    W: Write + ?Sized,
    E: Write + ?Sized,
{
    if args.is_empty() {
        let _ = write!(diag, "{}", format_usage(program));
        return ExitCode::FAILURE;
    }

    let invocation = match parse_command(args) {
        Ok(ParsedCommand::Run(invocation)) => invocation,
        Ok(ParsedCommand::Help) => {
            let _ = write!(output, "{}", format_usage(program));
            return ExitCode::SUCCESS;
        }
        Ok(ParsedCommand::Version) => {
            let _ = writeln!(output, "{} {}", opts.binary_name, env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = writeln!(diag, "{err}");
            let _ = write!(diag, "{}", format_usage(program));
            return ExitCode::FAILURE;
        }
    };

    logging::init(invocation.global.verbose);
    debug!(descriptor = ?invocation.descriptor, "compiled");

    match dispatch::run(&invocation.descriptor, ports, input, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(diag, "{}", render(err));
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
