//! Recording [`PortAccess`] used by unit tests.

use std::io;

use super::{Grant, PortAccess};
use crate::types::Width;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Access(Grant),
    Read { width: Width, port: u16, paced: bool },
    Write { width: Width, port: u16, value: u32, paced: bool },
    ReadBlock { width: Width, port: u16, len: usize },
    WriteBlock { width: Width, port: u16, bytes: Vec<u8> },
}

/// Logs every primitive call. Scalar reads return `scalar`; block reads
/// produce an incrementing byte pattern starting at `block_seed`.
#[derive(Debug, Default)]
pub(crate) struct RecordingPorts {
    pub calls: Vec<Call>,
    pub deny: Option<i32>,
    pub scalar: u32,
    pub block_seed: u8,
}

impl RecordingPorts {
    pub fn denying(errno: i32) -> Self {
        Self {
            deny: Some(errno),
            ..Default::default()
        }
    }

    pub fn grants(&self) -> Vec<Grant> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Access(grant) => Some(*grant),
                _ => None,
            })
            .collect()
    }

    pub fn transfers(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|call| !matches!(call, Call::Access(_)))
            .collect()
    }
}

impl PortAccess for RecordingPorts {
    fn request_access(&mut self, grant: Grant) -> io::Result<()> {
        self.calls.push(Call::Access(grant));
        match self.deny {
            Some(errno) => Err(io::Error::from_raw_os_error(errno)),
            None => Ok(()),
        }
    }

    fn read(&mut self, width: Width, port: u16, paced: bool) -> u32 {
        self.calls.push(Call::Read { width, port, paced });
        self.scalar
    }

    fn write(&mut self, width: Width, port: u16, value: u32, paced: bool) {
        self.calls.push(Call::Write {
            width,
            port,
            value,
            paced,
        });
    }

    fn read_block(&mut self, width: Width, port: u16, buf: &mut [u8]) {
        self.calls.push(Call::ReadBlock {
            width,
            port,
            len: buf.len(),
        });
        let mut next = self.block_seed;
        for byte in buf.iter_mut() {
            *byte = next;
            next = next.wrapping_add(1);
        }
    }

    fn write_block(&mut self, width: Width, port: u16, buf: &[u8]) {
        self.calls.push(Call::WriteBlock {
            width,
            port,
            bytes: buf.to_vec(),
        });
    }
}
