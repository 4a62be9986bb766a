//! `.img` boot image loader.
//!
//! VLSI distributes VS1053 applications (such as the Ogg Vorbis encoder)
//! as `.img` files: the tag `P&H` followed by records of the form
//!
//! ```text
//! Tp  L1 L0  A1 A0  D0 D1 D2 ...
//! ```
//!
//! where `Tp` is the [`RecordKind`], `L` the payload length in bytes and
//! `A` the bank-relative start address. The Execute record carries only
//! `A1 A0`, the entry point, and ends the image.
//!
//! Payload words go to the device through `SCI_WRAMADDR` / `SCI_WRAM`,
//! which auto-increments, so each record costs one address write plus one
//! write per word. The image is streamed; nothing is buffered.
//!
//! # Example
//!
//! ```ignore
//! let report = load_image(&mut sci, image_bytes.iter().copied())?;
//! sci.write_register(reg::SCI_AIADDR, report.entry)?;
//! ```

use crate::codec::registers as reg;
use crate::codec::SciBus;
use crate::constants::{IMAGE_MAGIC, INVALID_ENTRY};
use crate::error::{FormatError, LoadError};

/// `SCI_WRAMADDR` base of each payload address space, indexed by kind.
const WRAM_OFFSETS: [u16; 3] = [reg::WRAM_CODE_BASE, reg::WRAM_X_BASE, reg::WRAM_Y_BASE];

/// Image record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordKind {
    /// Instruction memory.
    Code = 0,
    /// X data memory.
    XMemory = 1,
    /// Y data memory.
    YMemory = 2,
    /// Entry point; terminates the image.
    Execute = 3,
}

impl RecordKind {
    /// Offset added to a record address to reach its memory through
    /// `SCI_WRAMADDR`. `None` for [`RecordKind::Execute`].
    pub const fn wram_offset(self) -> Option<u16> {
        match self {
            RecordKind::Execute => None,
            kind => Some(WRAM_OFFSETS[kind as usize]),
        }
    }
}

impl TryFrom<u8> for RecordKind {
    type Error = FormatError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(RecordKind::Code),
            1 => Ok(RecordKind::XMemory),
            2 => Ok(RecordKind::YMemory),
            3 => Ok(RecordKind::Execute),
            other => Err(FormatError::InvalidRecordKind(other)),
        }
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoadReport {
    /// Start address to write to `SCI_AIADDR`.
    pub entry: u16,
    /// Payload records transferred.
    pub records: u16,
    /// Data words written through `SCI_WRAM`.
    pub words: u32,
}

/// Big-endian byte reader over the image source.
struct ImageReader<I> {
    bytes: I,
}

impl<I: Iterator<Item = u8>> ImageReader<I> {
    fn u8(&mut self) -> Result<u8, FormatError> {
        self.bytes.next().ok_or(FormatError::UnexpectedEof)
    }

    fn u16(&mut self) -> Result<u16, FormatError> {
        let hi = self.u8()?;
        let lo = self.u8()?;
        Ok(u16::from_be_bytes([hi, lo]))
    }
}

/// Load a `.img` image into the device.
///
/// Fails with [`FormatError`] on a missing magic, an invalid record kind,
/// or a source that ends before the Execute record, and with
/// [`LoadError::Transport`] on the first register write that fails. Payload
/// records already
/// sent before the failure stay in device memory; the caller must not
/// start the application.
pub fn load_image<B, I>(bus: &mut B, image: I) -> Result<LoadReport, LoadError<B::Error>>
where
    B: SciBus,
    I: IntoIterator<Item = u8>,
{
    let mut src = ImageReader {
        bytes: image.into_iter(),
    };

    for expected in IMAGE_MAGIC {
        if src.bytes.next() != Some(expected) {
            return Err(FormatError::BadMagic.into());
        }
    }

    let mut records = 0u16;
    let mut words = 0u32;

    // Running out of records here means no Execute record was seen
    while let Some(tag) = src.bytes.next() {
        let kind = RecordKind::try_from(tag)?;

        let Some(offset) = kind.wram_offset() else {
            let entry = src.u16()?;
            if entry == INVALID_ENTRY {
                return Err(FormatError::InvalidEntry.into());
            }
            info!("image loaded: {} records, {} words, entry {=u16:#x}", records, words, entry);
            return Ok(LoadReport {
                entry,
                records,
                words,
            });
        };

        let len = src.u16()? & !1;
        let addr = src.u16()?;
        trace!("record {} len {} addr {=u16:#x}", tag, len, addr);

        bus.write_register(reg::SCI_WRAMADDR, addr.wrapping_add(offset))
            .map_err(LoadError::Transport)?;
        for _ in 0..len / 2 {
            let word = src.u16()?;
            bus.write_register(reg::SCI_WRAM, word)
                .map_err(LoadError::Transport)?;
        }

        records += 1;
        words += u32::from(len / 2);
    }

    Err(FormatError::UnexpectedEof.into())
}

/// Load a `.img` image, reporting the entry address or `0xFFFF` on any
/// failure.
pub fn load_image_or_sentinel<B, I>(bus: &mut B, image: I) -> u16
where
    B: SciBus,
    I: IntoIterator<Item = u8>,
{
    match load_image(bus, image) {
        Ok(report) => report.entry,
        Err(err) => {
            warn!("image load failed");
            err.sentinel()
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
