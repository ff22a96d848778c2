//! Argument compiler: getopt-style flag scanning followed by positional
//! parsing.
//!
//! Scanning stops at the first error. Positionals are only looked at once
//! every flag has been accepted, so a bad flag never masks itself behind a
//! bad port.

use super::super::command::{GlobalOptions, Invocation, ParsedCommand};
use super::helpers::{get_base, get_width, parse_number};
use crate::error::CompileError;
use crate::types::{Direction, OperationDescriptor, Width};

/// Flags that take a value, either glued (`-ib`) or as the next argument.
const VALUE_FLAGS: &[char] = &['i', 'o', 'b', 's'];

/// Compile the argument vector (without the program name).
pub fn parse_command(args: &[String]) -> Result<ParsedCommand, CompileError> {
    let mut desc = OperationDescriptor::default();
    let mut global = GlobalOptions::default();
    let mut positionals: Vec<&str> = Vec::new();
    let mut options_done = false;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        i += 1;

        if options_done || arg == "-" || !arg.starts_with('-') {
            positionals.push(arg);
            continue;
        }
        if arg == "--" {
            options_done = true;
            continue;
        }

        let cluster = &arg[1..];
        for (pos, flag) in cluster.char_indices() {
            if !VALUE_FLAGS.contains(&flag) {
                match flag {
                    'p' => desc.use_pause = true,
                    'v' => global.verbose = true,
                    'h' => return Ok(ParsedCommand::Help),
                    'V' => return Ok(ParsedCommand::Version),
                    other => return Err(CompileError::UnknownOption(other)),
                }
                continue;
            }

            if flag == 'i' || flag == 'o' {
                check_direction(&desc, flag)?;
            }

            let glued = &cluster[pos + flag.len_utf8()..];
            let value = if glued.is_empty() {
                let next = args
                    .get(i)
                    .ok_or(CompileError::MissingOptionValue(flag))?;
                i += 1;
                next.as_str()
            } else {
                glued
            };
            apply_value(&mut desc, flag, value)?;
            break;
        }
    }

    if desc.direction == Direction::Uninitialized {
        return Err(CompileError::MissingDirection);
    }

    parse_positionals(&mut desc, &positionals)?;

    Ok(ParsedCommand::Run(Invocation {
        descriptor: desc,
        global,
    }))
}

fn check_direction(desc: &OperationDescriptor, flag: char) -> Result<(), CompileError> {
    let conflicting = match flag {
        'i' => Direction::Output,
        _ => Direction::Input,
    };
    if desc.direction == conflicting {
        return Err(CompileError::DirectionConflict);
    }
    Ok(())
}

fn apply_value(
    desc: &mut OperationDescriptor,
    flag: char,
    value: &str,
) -> Result<(), CompileError> {
    match flag {
        'i' | 'o' => {
            desc.direction = if flag == 'i' {
                Direction::Input
            } else {
                Direction::Output
            };
            desc.width = get_width(value);
            if desc.width == Width::Invalid {
                return Err(CompileError::InvalidWidth);
            }
        }
        'b' => {
            desc.base = get_base(value).ok_or(CompileError::InvalidBase)?;
        }
        's' => {
            desc.element_count = parse_number(value).ok_or(CompileError::InvalidCount)?;
        }
        other => return Err(CompileError::UnknownOption(other)),
    }
    Ok(())
}

/// `port`, then `data` for scalar writes. Anything left over is an error.
fn parse_positionals(
    desc: &mut OperationDescriptor,
    positionals: &[&str],
) -> Result<(), CompileError> {
    let mut rest = positionals.iter();

    let raw_port = rest.next().ok_or(CompileError::MissingPort)?;
    desc.port = parse_number(raw_port)
        .and_then(|port| u16::try_from(port).ok())
        .ok_or(CompileError::InvalidPort)?;

    if desc.direction == Direction::Output && desc.element_count == 0 {
        let raw_data = rest.next().ok_or(CompileError::MissingData)?;
        let data = parse_number(raw_data).ok_or(CompileError::InvalidData)?;
        let max = desc.width.max_value().ok_or(CompileError::InvalidWidth)?;
        if data > max {
            return Err(CompileError::DataOverflow);
        }
        desc.data = data;
    }

    if let Some(extra) = rest.next() {
        return Err(CompileError::UnexpectedArgument((*extra).to_string()));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
