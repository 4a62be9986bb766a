//! VS1053 register interface.
//!
//! [`SciBus`] is the register transport everything else in the crate is
//! written against. [`SpiSci`] implements it over `embedded-hal` SPI.
//!
//! # Feature gate
//!
//! [`SpiSci`] is available when the `spi` feature is enabled (on by default).

pub mod registers;
mod sci;

#[cfg(feature = "spi")]
mod spi;

pub use sci::SciBus;

#[cfg(feature = "spi")]
pub use spi::{SciError, SpiSci};
