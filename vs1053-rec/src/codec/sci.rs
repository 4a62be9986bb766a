//! Register transport to the VS1053.

/// Serial Control Interface access to the VS1053.
///
/// Implementors block until each access completes. The loader and the
/// drain engine only ever talk to the device through this trait, so they
/// can be driven by a simulated device in tests.
pub trait SciBus {
    /// Error type for bus operations.
    type Error;

    /// Write a 16-bit value to an SCI register.
    fn write_register(&mut self, register: u8, value: u16) -> Result<(), Self::Error>;

    /// Read a 16-bit value from an SCI register.
    fn read_register(&mut self, register: u8) -> Result<u16, Self::Error>;

    /// Block until the device signals ready (DREQ high) or `timeout_ms`
    /// elapses.
    ///
    /// An expired timeout is not an error; callers carry on regardless.
    fn wait_ready(&mut self, timeout_ms: u32) -> Result<(), Self::Error>;
}

impl<T: SciBus + ?Sized> SciBus for &mut T {
    type Error = T::Error;

    fn write_register(&mut self, register: u8, value: u16) -> Result<(), Self::Error> {
        T::write_register(self, register, value)
    }

    fn read_register(&mut self, register: u8) -> Result<u16, Self::Error> {
        T::read_register(self, register)
    }

    fn wait_ready(&mut self, timeout_ms: u32) -> Result<(), Self::Error> {
        T::wait_ready(self, timeout_ms)
    }
}
