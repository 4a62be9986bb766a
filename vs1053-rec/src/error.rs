//! Error types.

use core::fmt;

use crate::constants::INVALID_ENTRY;

/// Malformed boot image or plugin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatError {
    /// The stream does not start with `P&H`.
    BadMagic,
    /// A record kind of 4 or above.
    InvalidRecordKind(u8),
    /// The source ended before an Execute record, or inside a record.
    UnexpectedEof,
    /// The Execute record names the reserved address `0xFFFF`.
    InvalidEntry,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::BadMagic => f.write_str("missing P&H magic"),
            FormatError::InvalidRecordKind(kind) => write!(f, "invalid record kind {kind}"),
            FormatError::UnexpectedEof => f.write_str("image ended before Execute record"),
            FormatError::InvalidEntry => f.write_str("entry address 0xFFFF is reserved"),
        }
    }
}

/// Failure to load code into the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError<E> {
    /// The image itself is malformed.
    Format(FormatError),
    /// The register transport failed mid-load.
    Transport(E),
}

impl<E> LoadError<E> {
    /// The entry address a failed load reports in the raw `u16` contract.
    pub const fn sentinel(&self) -> u16 {
        INVALID_ENTRY
    }
}

impl<E> From<FormatError> for LoadError<E> {
    fn from(err: FormatError) -> Self {
        LoadError::Format(err)
    }
}

/// Failure while draining the device buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrainError<E, S> {
    /// Register access failed.
    Transport(E),
    /// The output sink rejected a byte or failed to close.
    Sink(S),
}

/// Failure of a complete recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError<E, S> {
    /// The encoder image could not be loaded; the device was never started.
    Load(LoadError<E>),
    /// Register access failed during setup or recording.
    Transport(E),
    /// The output sink failed.
    Sink(S),
}

impl<E, S> From<DrainError<E, S>> for SessionError<E, S> {
    fn from(err: DrainError<E, S>) -> Self {
        match err {
            DrainError::Transport(e) => SessionError::Transport(e),
            DrainError::Sink(e) => SessionError::Sink(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_load_failure_maps_to_sentinel() {
        let format: LoadError<()> = FormatError::BadMagic.into();
        assert_eq!(format.sentinel(), 0xFFFF);
        assert_eq!(LoadError::Transport(()).sentinel(), 0xFFFF);
    }

    #[test]
    fn drain_errors_keep_their_source() {
        let e: SessionError<u8, u16> = DrainError::Sink(7u16).into();
        assert_eq!(e, SessionError::Sink(7));
        let e: SessionError<u8, u16> = DrainError::Transport(3u8).into();
        assert_eq!(e, SessionError::Transport(3));
    }
}
