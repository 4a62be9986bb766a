//! # vs1053-rec
//!
//! A `no_std`, allocation-free driver for recording Ogg Vorbis with the
//! [VLSI VS1053b](https://www.vlsi.fi/en/products/vs1053.html) codec. The
//! encoding itself runs on the chip; this crate loads the encoder
//! application, starts it and streams its output to storage without losing
//! or corrupting the end of the stream.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Transport | [`codec`] | `SciBus` register access, SPI adapter (feature-gated) |
//! | Loading | [`loader`] | `.img` boot images and `.plg` plugin tables |
//! | Recording | [`record`] | Drain state machine and full session driver |
//! | Collaborators | [`io`] | Output sink and stop signal traits |
//! | Settings | [`config`] | Clock, input, gain and timeout settings |
//!
//! ## Quick start
//!
//! ```ignore
//! use vs1053_rec::codec::SpiSci;
//! use vs1053_rec::config::RecorderConfig;
//! use vs1053_rec::record::Recorder;
//!
//! static ENCODER: &[u8] = include_bytes!("venc44k2q05.img");
//!
//! let sci = SpiSci::new(spi_device, dreq, delay);
//! let mut recorder = Recorder::new(sci, RecorderConfig::new());
//!
//! // The opener runs after the image loads and returns an `AudioSink`;
//! // the second closure is polled for a stop request
//! let report = recorder.record(
//!     ENCODER.iter().copied(),
//!     || fs.create("record.ogg"),
//!     &mut || button_pressed(),
//! )?;
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `spi` | yes | [`codec::SpiSci`] over `embedded-hal` 1.0 |
//! | `defmt` | no | `defmt` logging and `defmt::Format` on public types |
//!
//! ## Transfer parameters
//!
//! - **Block size:** 256 words / 512 bytes ([`constants::BLOCK_WORDS`])
//! - **Failed load sentinel:** `0xFFFF` ([`constants::INVALID_ENTRY`])
//! - **Word order:** big-endian, high byte written first

#![no_std]

mod fmt;

pub mod constants;
pub mod error;
pub mod config;
pub mod codec;
pub mod io;
pub mod loader;
pub mod record;

#[cfg(test)]
mod mock;

pub use error::{DrainError, FormatError, LoadError, SessionError};
