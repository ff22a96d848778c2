//! Transaction dispatcher.
//!
//! Takes a validated [`OperationDescriptor`], asks the [`PortAccess`] backend
//! for the narrowest permission that covers the port, then performs exactly
//! one scalar or block transaction. Streams are passed in so the same code
//! drives stdin/stdout in the binary and in-memory buffers in tests.

use std::io::{self, Read, Write};

use tracing::{debug, warn};

use crate::error::{Io386Error, Result};
use crate::port::{Grant, PortAccess};
use crate::types::{DELAY_PORT, LOW_PORT_LIMIT, OperationDescriptor, Transaction, Width};

/// Permission step + transaction.
pub fn run<P, R, W>(
    desc: &OperationDescriptor,
    ports: &mut P,
    input: &mut R,
    output: &mut W,
) -> Result<()>
where
    P: PortAccess + ?Sized,
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    acquire_permission(desc, ports)?;
    execute(desc, ports, input, output)
}

/// Request I/O permission for `desc.port`.
///
/// Low ports get a single-port grant; anything at or above
/// [`LOW_PORT_LIMIT`] escalates to the full I/O privilege level.
pub fn acquire_permission<P>(desc: &OperationDescriptor, ports: &mut P) -> Result<()>
where
    P: PortAccess + ?Sized,
{
    let port = desc.port;
    let denied = |source| Io386Error::Permission { port, source };

    if !desc.needs_full_privilege() {
        debug!(port, "requesting single-port grant");
        ports.request_access(Grant::Single(port)).map_err(denied)?;
        // Paced scalar primitives also touch the delay port.
        if desc.use_pause && desc.element_count == 0 && port != DELAY_PORT {
            debug!(port = DELAY_PORT, "requesting delay-port grant");
            ports
                .request_access(Grant::Single(DELAY_PORT))
                .map_err(denied)?;
        }
    } else {
        warn!(
            "port {port} (0x{port:04x}) is at or above 0x{LOW_PORT_LIMIT:x}, escalating to iopl(3)"
        );
        ports.request_access(Grant::Full).map_err(denied)?;
    }
    Ok(())
}

/// Perform the transaction. Permission must already be granted.
pub fn execute<P, R, W>(
    desc: &OperationDescriptor,
    ports: &mut P,
    input: &mut R,
    output: &mut W,
) -> Result<()>
where
    P: PortAccess + ?Sized,
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let width = desc.width;
    let size = width.byte_size().ok_or(Io386Error::Dispatch(width))?;
    let port = desc.port;

    match desc.transaction() {
        Transaction::ReadScalar => {
            let value = width.truncate(ports.read(width, port, desc.use_pause));
            debug!(port, %width, value, "scalar read");
            writeln!(output, "{value}")?;
            output.flush()?;
        }
        Transaction::WriteScalar(data) => {
            debug!(port, %width, data, "scalar write");
            ports.write(width, port, data, desc.use_pause);
        }
        Transaction::ReadArray(count) => {
            note_unpaced(desc);
            let mut buf = transfer_buffer(count, size)?;
            ports.read_block(width, port, &mut buf);
            debug!(port, %width, count, bytes = buf.len(), "block read");
            output.write_all(&buf)?;
            output.flush()?;
        }
        Transaction::WriteArray(count) => {
            note_unpaced(desc);
            let mut buf = transfer_buffer(count, size)?;
            let filled = fill_from(input, &mut buf)?;
            if filled < buf.len() {
                debug!(
                    expected = buf.len(),
                    read = filled,
                    "short read on stdin, sending zero padding"
                );
            }
            ports.write_block(width, port, &buf);
            debug!(port, %width, count, bytes = buf.len(), "block write");
        }
    }
    Ok(())
}

fn note_unpaced(desc: &OperationDescriptor) {
    if desc.use_pause {
        debug!("-p has no effect on block transfers");
    }
}

/// Zeroed buffer for `count` elements of `size` bytes.
fn transfer_buffer(count: u32, size: usize) -> io::Result<Vec<u8>> {
    let too_large = || {
        io::Error::new(
            io::ErrorKind::OutOfMemory,
            format!("cannot allocate {count} elements of {size} bytes"),
        )
    };
    let len = (count as usize).checked_mul(size).ok_or_else(too_large)?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| too_large())?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Read until `buf` is full or the stream ends; returns the bytes read.
fn fill_from<R: Read + ?Sized>(input: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match input.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

// ============================================================================
// Tests
// ============================================================================
