//! Argument compiler for the io386 flag grammar.
//!
//! - [`core`] - flag scanning, direction/width resolution, positionals
//! - [`helpers`] - width/base marks and number parsing

pub mod core;
pub mod helpers;

pub use self::core::parse_command;
pub use helpers::{get_base, get_width, parse_number};
