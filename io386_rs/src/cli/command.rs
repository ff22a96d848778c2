//! Compiled command types and help text.

use crate::types::OperationDescriptor;

/// Options that do not describe the transaction itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Debug-level diagnostics on stderr (`-v`)
    pub verbose: bool,
}

/// A compiled transaction plus the options around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub descriptor: OperationDescriptor,
    pub global: GlobalOptions,
}

/// Result of compiling the argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedCommand {
    Run(Invocation),
    Help,
    Version,
}

/// Usage text, with `program` as the invoked name.
pub fn format_usage(program: &str) -> String {
    format!(
        "Wrapper tool around outb(2) and its friends.\n\
Usage: {program} -i|-o <width> [-b <base for output>] [-p] [-s <count>] [-v] port [data]\n\
       {program} -h | -V\n\
<width> = b(unsigned char), w(unsigned short), l(unsigned int)\n\
<base> = d(decimal, default), 8(octal), x(for hexadecimal)\n\
-p uses the paced variant (settling delay after each scalar access).\n\
-s switches to array mode: input writes <count> raw elements to stdout,\n\
   output reads <count> raw elements of <width> from stdin.\n\
-v prints debug diagnostics to stderr.\n\
Ports at or above 0x3ff need full I/O privilege (iopl).\n"
    )
}
