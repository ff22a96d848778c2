//! Command-line surface.
//!
//! ```text
//! argv ──▶ parser ──▶ ParsedCommand ──▶ entrypoint ──▶ dispatch ──▶ exit code
//!             │                             │
//!             └── CompileError ─────────────┴──▶ usage on stderr
//! ```
//!
//! # Module Structure
//!
//! - [`command`] - compiled command types and usage text
//! - [`parser`] - argument compiler
//! - [`entrypoint`] - shared `main()` body

pub mod command;
pub mod entrypoint;
pub mod parser;

pub use command::{GlobalOptions, Invocation, ParsedCommand, format_usage};
pub use parser::parse_command;
