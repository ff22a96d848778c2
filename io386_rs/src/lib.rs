//! # io386
//!
//! Raw x86 I/O port access from userspace. One invocation grants the process
//! access to a single port (or the whole port space for ports at or above
//! `0x3ff`) and performs exactly one transaction:
//!
//! - a scalar read, printed as unsigned decimal,
//! - a scalar write of a value that fits the declared width,
//! - a block read of `count` elements streamed raw to stdout,
//! - a block write of `count` elements read raw from stdin.
//!
//! ## CLI Usage
//!
//! ```bash
//! io386 -i b 0x60              # read one byte from the keyboard controller
//! io386 -o b 0x80 0x42         # write a POST code
//! io386 -i w -s 256 0x1f0 > s  # read 256 words from the ATA data port
//! io386 -o w -s 256 0x1f0 < s  # and write them back
//! ```
//!
//! ## Library Usage
//!
//! The compiler and dispatcher work against any [`port::PortAccess`]
//! implementation and any `Read`/`Write` streams:
//!
//! ```rust,no_run
//! use io386::cli::{ParsedCommand, parse_command};
//! use io386::{dispatch, port::HardwarePorts};
//!
//! let args: Vec<String> = ["-i", "b", "0x60"].iter().map(|s| s.to_string()).collect();
//! if let Ok(ParsedCommand::Run(invocation)) = parse_command(&args) {
//!     let mut ports = HardwarePorts::new();
//!     let mut out = Vec::new();
//!     dispatch::run(&invocation.descriptor, &mut ports, &mut std::io::empty(), &mut out).unwrap();
//! }
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Argument compiler, usage text and the shared entry point.
pub mod cli;

/// Permission step and scalar/block transactions.
pub mod dispatch;

/// Compile, permission, dispatch and transfer errors.
pub mod error;

/// `PortAccess` capability and the hardware backend.
pub mod port;

/// Descriptor, width, base and transaction types.
pub mod types;

// ============================================================================
// Utilities
// ============================================================================

/// stderr `tracing` subscriber.
pub mod logging;

pub use error::{CompileError, Io386Error};
pub use types::{Base, Direction, OperationDescriptor, Transaction, Width};
