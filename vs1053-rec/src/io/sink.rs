//! Output stream for the encoded recording.

/// Append-only byte sink the recording is written to.
///
/// Typically an open file on an SD card. Bytes arrive strictly in device
/// emission order; [`close()`](Self::close) is called exactly once, after
/// the last byte of a completed recording.
pub trait AudioSink {
    /// Error type for sink operations.
    type Error;

    /// Append one byte.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Flush and close the stream.
    fn close(&mut self) -> Result<(), Self::Error>;

    /// Append both bytes of a big-endian word.
    fn write_word(&mut self, word: u16) -> Result<(), Self::Error> {
        self.write_byte((word >> 8) as u8)?;
        self.write_byte(word as u8)
    }
}

impl<T: AudioSink + ?Sized> AudioSink for &mut T {
    type Error = T::Error;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        T::write_byte(self, byte)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        T::close(self)
    }

    fn write_word(&mut self, word: u16) -> Result<(), Self::Error> {
        T::write_word(self, word)
    }
}
