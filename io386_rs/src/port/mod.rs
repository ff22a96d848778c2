//! Port access capability.
//!
//! The dispatcher only ever talks to a [`PortAccess`] implementation, so the
//! privileged primitives live in one place ([`hardware`]) and the decision
//! logic above them runs in tests against a recording fake.

pub mod hardware;

#[cfg(test)]
pub(crate) mod fake;

use std::io;

use crate::types::Width;

pub use hardware::HardwarePorts;

/// Scope of an I/O permission request.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Grant {
    /// `ioperm(port, 1, 1)`
    Single(u16),
    /// `iopl(3)`: every port in the address space.
    Full,
}

/// Process-global port permission and fixed-width port primitives.
///
/// Widths reaching these methods are already validated; implementations may
/// treat [`Width::Invalid`] as a no-op.
pub trait PortAccess {
    fn request_access(&mut self, grant: Grant) -> io::Result<()>;

    /// Read one element; the result is zero-extended to 32 bits.
    fn read(&mut self, width: Width, port: u16, paced: bool) -> u32;

    /// Write the low `width` bits of `value`.
    fn write(&mut self, width: Width, port: u16, value: u32, paced: bool);

    /// Fill `buf` with `buf.len() / width.byte_size()` elements.
    fn read_block(&mut self, width: Width, port: u16, buf: &mut [u8]);

    /// Send `buf.len() / width.byte_size()` elements from `buf`.
    fn write_block(&mut self, width: Width, port: u16, buf: &[u8]);
}
