//! SCI transport over `embedded-hal` SPI.
//!
//! The VS1053 control port is a plain SPI device (XCS as chip select) plus
//! the DREQ output, which goes high when the chip can take another
//! command. The adapter is generic over any [`SpiDevice`], [`InputPin`]
//! and [`DelayNs`] implementation.
//!
//! # Example
//!
//! ```ignore
//! let mut sci = SpiSci::new(spi_device, dreq_pin, delay);
//! sci.write_register(reg::SCI_CLOCKF, 0xC000)?;
//! sci.wait_ready(100)?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use embedded_hal::spi::{Operation, SpiDevice};

use super::registers as reg;
use super::sci::SciBus;
use crate::constants::DEFAULT_READY_TIMEOUT_MS;

/// DREQ polling interval while waiting for the device.
const POLL_INTERVAL_US: u32 = 10;

/// Error raised by [`SpiSci`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SciError<S, P> {
    /// The SPI transfer failed.
    Spi(S),
    /// Reading the DREQ pin failed.
    Dreq(P),
}

/// VS1053 SCI driver over an SPI device and the DREQ pin.
pub struct SpiSci<SPI, DREQ, D> {
    spi: SPI,
    dreq: DREQ,
    delay: D,
    /// DREQ wait before each register access.
    access_timeout_ms: u32,
}

impl<SPI, DREQ, D> SpiSci<SPI, DREQ, D>
where
    SPI: SpiDevice,
    DREQ: InputPin,
    D: DelayNs,
{
    /// Create a new transport with the default pre-access DREQ timeout.
    pub fn new(spi: SPI, dreq: DREQ, delay: D) -> Self {
        Self::new_with_timeout(spi, dreq, delay, DEFAULT_READY_TIMEOUT_MS)
    }

    /// Create a new transport that waits at most `access_timeout_ms` for
    /// DREQ before every register access.
    pub fn new_with_timeout(spi: SPI, dreq: DREQ, delay: D, access_timeout_ms: u32) -> Self {
        Self {
            spi,
            dreq,
            delay,
            access_timeout_ms,
        }
    }

    /// Release the SPI device, DREQ pin and delay.
    pub fn release(self) -> (SPI, DREQ, D) {
        (self.spi, self.dreq, self.delay)
    }

    fn poll_dreq(&mut self, timeout_ms: u32) -> Result<(), SciError<SPI::Error, DREQ::Error>> {
        let budget_us = timeout_ms.saturating_mul(1000);
        let mut waited_us = 0u32;
        loop {
            if self.dreq.is_high().map_err(SciError::Dreq)? {
                return Ok(());
            }
            if waited_us >= budget_us {
                return Ok(());
            }
            self.delay.delay_us(POLL_INTERVAL_US);
            waited_us = waited_us.saturating_add(POLL_INTERVAL_US);
        }
    }
}

impl<SPI, DREQ, D> SciBus for SpiSci<SPI, DREQ, D>
where
    SPI: SpiDevice,
    DREQ: InputPin,
    D: DelayNs,
{
    type Error = SciError<SPI::Error, DREQ::Error>;

    fn write_register(&mut self, register: u8, value: u16) -> Result<(), Self::Error> {
        self.poll_dreq(self.access_timeout_ms)?;
        let buf = [reg::SCI_OP_WRITE, register, (value >> 8) as u8, value as u8];
        self.spi.write(&buf).map_err(SciError::Spi)
    }

    fn read_register(&mut self, register: u8) -> Result<u16, Self::Error> {
        self.poll_dreq(self.access_timeout_ms)?;
        let cmd = [reg::SCI_OP_READ, register];
        let mut val = [0u8; 2];
        self.spi
            .transaction(&mut [Operation::Write(&cmd), Operation::Read(&mut val)])
            .map_err(SciError::Spi)?;
        Ok(u16::from_be_bytes(val))
    }

    fn wait_ready(&mut self, timeout_ms: u32) -> Result<(), Self::Error> {
        // DREQ lags the command by up to a microsecond
        self.delay.delay_us(1);
        self.poll_dreq(timeout_ms)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
