//! Domain types shared by the argument compiler and the dispatcher.

use std::fmt;

/// Ports below this address get a single-port grant; anything at or above it
/// needs the process-wide I/O privilege level.
pub const LOW_PORT_LIMIT: u16 = 0x3ff;

/// POST diagnostic port written by the paced primitives as a settling delay.
pub const DELAY_PORT: u16 = 0x80;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Direction {
    #[default]
    Uninitialized,
    Input,
    Output,
}

/// Element width of a transaction.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Width {
    Byte,
    Short,
    Int,
    #[default]
    Invalid,
}

impl Width {
    /// Size of one element in bytes, `None` for [`Width::Invalid`].
    pub fn byte_size(self) -> Option<usize> {
        match self {
            Width::Byte => Some(1),
            Width::Short => Some(2),
            Width::Int => Some(4),
            Width::Invalid => None,
        }
    }

    /// Largest value an element of this width can hold.
    pub fn max_value(self) -> Option<u32> {
        match self {
            Width::Byte => Some(u8::MAX as u32),
            Width::Short => Some(u16::MAX as u32),
            Width::Int => Some(u32::MAX),
            Width::Invalid => None,
        }
    }

    /// Truncate a raw primitive value to this width.
    pub fn truncate(self, value: u32) -> u32 {
        match self {
            Width::Byte => value as u8 as u32,
            Width::Short => value as u16 as u32,
            Width::Int | Width::Invalid => value,
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Width::Byte => "byte",
            Width::Short => "short",
            Width::Int => "int",
            Width::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Base {
    #[default]
    Decimal,
    Octal,
    Hexadecimal,
}

/// A fully validated request for one port transaction.
///
/// Only the argument compiler builds these, so `direction` and `width` are
/// never sentinels once a descriptor leaves `cli::parser`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct OperationDescriptor {
    pub direction: Direction,
    pub width: Width,
    /// Parsed for compatibility; scalar reads always print decimal.
    pub base: Base,
    pub use_pause: bool,
    /// Zero selects a scalar transaction.
    pub element_count: u32,
    pub port: u16,
    /// Value for scalar writes, unused otherwise.
    pub data: u32,
}

/// The shape of the single transaction a descriptor asks for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Transaction {
    ReadScalar,
    WriteScalar(u32),
    ReadArray(u32),
    WriteArray(u32),
}

impl OperationDescriptor {
    pub fn transaction(&self) -> Transaction {
        match (self.direction, self.element_count) {
            (Direction::Output, 0) => Transaction::WriteScalar(self.data),
            (Direction::Output, count) => Transaction::WriteArray(count),
            (_, 0) => Transaction::ReadScalar,
            (_, count) => Transaction::ReadArray(count),
        }
    }

    /// Whether the target port needs full I/O privilege rather than a
    /// single-port grant.
    pub fn needs_full_privilege(&self) -> bool {
        self.port >= LOW_PORT_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_sizes_and_limits() {
        assert_eq!(Width::Byte.byte_size(), Some(1));
        assert_eq!(Width::Short.byte_size(), Some(2));
        assert_eq!(Width::Int.byte_size(), Some(4));
        assert_eq!(Width::Invalid.byte_size(), None);

        assert_eq!(Width::Byte.max_value(), Some(255));
        assert_eq!(Width::Short.max_value(), Some(65535));
        assert_eq!(Width::Int.max_value(), Some(u32::MAX));
    }

    #[test]
    fn truncate_keeps_low_bits() {
        assert_eq!(Width::Byte.truncate(0x1234_56ff), 0xff);
        assert_eq!(Width::Short.truncate(0x1234_abcd), 0xabcd);
        assert_eq!(Width::Int.truncate(0xdead_beef), 0xdead_beef);
    }

    #[test]
    fn transaction_follows_direction_and_count() {
        let mut desc = OperationDescriptor {
            direction: Direction::Input,
            width: Width::Byte,
            port: 0x60,
            ..Default::default()
        };
        assert_eq!(desc.transaction(), Transaction::ReadScalar);

        desc.element_count = 8;
        assert_eq!(desc.transaction(), Transaction::ReadArray(8));

        desc.direction = Direction::Output;
        assert_eq!(desc.transaction(), Transaction::WriteArray(8));

        desc.element_count = 0;
        desc.data = 0x42;
        assert_eq!(desc.transaction(), Transaction::WriteScalar(0x42));
    }

    #[test]
    fn low_port_limit_boundary() {
        let mut desc = OperationDescriptor {
            port: 0x3fe,
            ..Default::default()
        };
        assert!(!desc.needs_full_privilege());
        desc.port = LOW_PORT_LIMIT;
        assert!(desc.needs_full_privilege());
        desc.port = 0x500;
        assert!(desc.needs_full_privilege());
    }
}
