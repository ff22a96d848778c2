//! Real port primitives for Linux on x86-64.
//!
//! Permission goes through the `ioperm`/`iopl` system calls; the transfers
//! are single `in`/`out` instructions, or `rep ins`/`rep outs` for blocks.
//! On any other target the type still exists but refuses every grant, so
//! the binary builds everywhere and fails cleanly before touching a port.

use std::io;

use super::{Grant, PortAccess};
use crate::types::Width;

/// [`PortAccess`] backed by the CPU's I/O instructions.
#[derive(Debug, Default)]
pub struct HardwarePorts {
    _private: (),
}

impl HardwarePorts {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
impl PortAccess for HardwarePorts {
    fn request_access(&mut self, grant: Grant) -> io::Result<()> {
        // SAFETY: both calls only change this process's I/O permission state.
        let ret = unsafe {
            match grant {
                Grant::Single(port) => {
                    libc::syscall(libc::SYS_ioperm, port as libc::c_ulong, 1 as libc::c_ulong, 1)
                }
                Grant::Full => libc::syscall(libc::SYS_iopl, 3 as libc::c_int),
            }
        };
        if ret == -1 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn read(&mut self, width: Width, port: u16, paced: bool) -> u32 {
        // SAFETY: the dispatcher only calls this after `request_access`
        // succeeded for `port` (and for the delay port when paced).
        unsafe {
            let value = match width {
                Width::Byte => asm::inb(port) as u32,
                Width::Short => asm::inw(port) as u32,
                Width::Int => asm::inl(port),
                Width::Invalid => return 0,
            };
            if paced {
                asm::io_delay();
            }
            value
        }
    }

    fn write(&mut self, width: Width, port: u16, value: u32, paced: bool) {
        // SAFETY: see `read`.
        unsafe {
            match width {
                Width::Byte => asm::outb(port, value as u8),
                Width::Short => asm::outw(port, value as u16),
                Width::Int => asm::outl(port, value),
                Width::Invalid => return,
            }
            if paced {
                asm::io_delay();
            }
        }
    }

    fn read_block(&mut self, width: Width, port: u16, buf: &mut [u8]) {
        let Some(size) = width.byte_size() else {
            return;
        };
        let count = buf.len() / size;
        // SAFETY: `rep ins` stores exactly `count * size` bytes, which fits
        // in `buf`; permission was granted beforehand.
        unsafe {
            match width {
                Width::Byte => asm::insb(port, buf.as_mut_ptr(), count),
                Width::Short => asm::insw(port, buf.as_mut_ptr(), count),
                Width::Int => asm::insl(port, buf.as_mut_ptr(), count),
                Width::Invalid => {}
            }
        }
    }

    fn write_block(&mut self, width: Width, port: u16, buf: &[u8]) {
        let Some(size) = width.byte_size() else {
            return;
        };
        let count = buf.len() / size;
        // SAFETY: `rep outs` loads exactly `count * size` bytes from `buf`.
        unsafe {
            match width {
                Width::Byte => asm::outsb(port, buf.as_ptr(), count),
                Width::Short => asm::outsw(port, buf.as_ptr(), count),
                Width::Int => asm::outsl(port, buf.as_ptr(), count),
                Width::Invalid => {}
            }
        }
    }
}

#[cfg(not(all(target_os = "linux", target_arch = "x86_64")))]
impl PortAccess for HardwarePorts {
    fn request_access(&mut self, _grant: Grant) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "port I/O is only supported on Linux x86-64",
        ))
    }

    fn read(&mut self, _width: Width, _port: u16, _paced: bool) -> u32 {
        0
    }

    fn write(&mut self, _width: Width, _port: u16, _value: u32, _paced: bool) {}

    fn read_block(&mut self, _width: Width, _port: u16, _buf: &mut [u8]) {}

    fn write_block(&mut self, _width: Width, _port: u16, _buf: &[u8]) {}
}

#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
mod asm {
    use core::arch::asm;

    use crate::types::DELAY_PORT;

    #[inline]
    pub unsafe fn inb(port: u16) -> u8 {
        let value: u8;
        unsafe {
            asm!("in al, dx", out("al") value, in("dx") port, options(nomem, nostack, preserves_flags));
        }
        value
    }

    #[inline]
    pub unsafe fn inw(port: u16) -> u16 {
        let value: u16;
        unsafe {
            asm!("in ax, dx", out("ax") value, in("dx") port, options(nomem, nostack, preserves_flags));
        }
        value
    }

    #[inline]
    pub unsafe fn inl(port: u16) -> u32 {
        let value: u32;
        unsafe {
            asm!("in eax, dx", out("eax") value, in("dx") port, options(nomem, nostack, preserves_flags));
        }
        value
    }

    #[inline]
    pub unsafe fn outb(port: u16, value: u8) {
        unsafe {
            asm!("out dx, al", in("dx") port, in("al") value, options(nomem, nostack, preserves_flags));
        }
    }

    #[inline]
    pub unsafe fn outw(port: u16, value: u16) {
        unsafe {
            asm!("out dx, ax", in("dx") port, in("ax") value, options(nomem, nostack, preserves_flags));
        }
    }

    #[inline]
    pub unsafe fn outl(port: u16, value: u32) {
        unsafe {
            asm!("out dx, eax", in("dx") port, in("eax") value, options(nomem, nostack, preserves_flags));
        }
    }

    /// Settling delay used by the paced primitives.
    #[inline]
    pub unsafe fn io_delay() {
        unsafe { outb(DELAY_PORT, 0) }
    }

    // The string instructions use AT&T syntax: LLVM's Intel parser wants
    // explicit memory operands for them.

    #[inline]
    pub unsafe fn insb(port: u16, dst: *mut u8, count: usize) {
        unsafe {
            asm!("rep insb", in("dx") port, inout("rdi") dst => _, inout("rcx") count => _,
                options(nostack, preserves_flags, att_syntax));
        }
    }

    #[inline]
    pub unsafe fn insw(port: u16, dst: *mut u8, count: usize) {
        unsafe {
            asm!("rep insw", in("dx") port, inout("rdi") dst => _, inout("rcx") count => _,
                options(nostack, preserves_flags, att_syntax));
        }
    }

    #[inline]
    pub unsafe fn insl(port: u16, dst: *mut u8, count: usize) {
        unsafe {
            asm!("rep insl", in("dx") port, inout("rdi") dst => _, inout("rcx") count => _,
                options(nostack, preserves_flags, att_syntax));
        }
    }

    #[inline]
    pub unsafe fn outsb(port: u16, src: *const u8, count: usize) {
        unsafe {
            asm!("rep outsb", in("dx") port, inout("rsi") src => _, inout("rcx") count => _,
                options(nostack, preserves_flags, readonly, att_syntax));
        }
    }

    #[inline]
    pub unsafe fn outsw(port: u16, src: *const u8, count: usize) {
        unsafe {
            asm!("rep outsw", in("dx") port, inout("rsi") src => _, inout("rcx") count => _,
                options(nostack, preserves_flags, readonly, att_syntax));
        }
    }

    #[inline]
    pub unsafe fn outsl(port: u16, src: *const u8, count: usize) {
        unsafe {
            asm!("rep outsl", in("dx") port, inout("rsi") src => _, inout("rcx") count => _,
                options(nostack, preserves_flags, readonly, att_syntax));
        }
    }
}
