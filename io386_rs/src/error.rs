//! Error taxonomy for io386.
//!
//! Every variant is terminal: the entry point reports it once and exits with
//! a failure status.

use std::io;

use thiserror::Error;

use crate::types::Width;

/// Argument grammar and semantic errors, detected before any port access.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("Input and output are mutually exclusive!")]
    DirectionConflict,

    #[error("Either -i or -o must be given!")]
    MissingDirection,

    #[error("Invalid width mark!")]
    InvalidWidth,

    #[error("Invalid base mark!")]
    InvalidBase,

    #[error("Invalid count notation!")]
    InvalidCount,

    #[error("Option -{0} requires an argument!")]
    MissingOptionValue(char),

    #[error("Unknown option -{0}!")]
    UnknownOption(char),

    #[error("Missing port!")]
    MissingPort,

    #[error("Invalid port!")]
    InvalidPort,

    #[error("Missing data!")]
    MissingData,

    #[error("Invalid data!")]
    InvalidData,

    #[error("Data overflown!")]
    DataOverflow,

    #[error("Unexpected argument '{0}'!")]
    UnexpectedArgument(String),
}

#[derive(Debug, Error)]
pub enum Io386Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("Unable to operate port {port} from userspace")]
    Permission {
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("No port primitive for {0} width!")]
    Dispatch(Width),

    #[error("transfer failed")]
    Transfer(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Io386Error>;

/// One-line diagnostic including the OS error behind the failure.
pub fn render(err: Io386Error) -> String {
    format!("{:#}", anyhow::Error::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_error_carries_os_detail() {
        let err = Io386Error::Permission {
            port: 96,
            source: io::Error::from_raw_os_error(libc::EPERM),
        };
        let line = render(err);
        assert!(line.starts_with("Unable to operate port 96 from userspace: "));
        assert!(line.contains("os error 1"));
    }

    #[test]
    fn compile_errors_render_verbatim() {
        assert_eq!(render(CompileError::DataOverflow.into()), "Data overflown!");
        assert_eq!(
            render(CompileError::MissingOptionValue('s').into()),
            "Option -s requires an argument!"
        );
    }

    #[test]
    fn dispatch_fault_matches_diagnostic_style() {
        assert_eq!(
            render(Io386Error::Dispatch(Width::Invalid)),
            "No port primitive for invalid width!"
        );
    }

    #[test]
    fn transfer_error_keeps_cause() {
        let err = Io386Error::from(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(render(err).starts_with("transfer failed: "));
    }
}
