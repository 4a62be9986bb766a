//! VS1053 SCI register addresses and bitfield definitions.
//!
//! Taken from the VS1053b datasheet and the Ogg Vorbis Encoder application
//! manual. SCI registers are addressed by a single byte and hold 16-bit
//! values, transferred big-endian.

// Some registers are listed for completeness (STATUS, AUDATA, etc.) but
// are not touched by the recorder.
#![allow(dead_code)]

// ── SCI opcodes ────────────────────────────────────────────────────────────

/// SPI opcode for an SCI register write.
pub const SCI_OP_WRITE: u8 = 0x02;

/// SPI opcode for an SCI register read.
pub const SCI_OP_READ: u8 = 0x03;

// ── Register map ───────────────────────────────────────────────────────────

/// Mode control (see `SM_*` bits).
pub const SCI_MODE: u8 = 0x0;

/// Status of the VS1053.
pub const SCI_STATUS: u8 = 0x1;

/// Built-in bass/treble control. Cleared before loading the encoder.
pub const SCI_BASS: u8 = 0x2;

/// Clock frequency and multiplier.
/// - Bits 15:13 — SC_MULT (0xC000 = XTALI × 4.5)
/// - Bits 12:11 — SC_ADD
/// - Bits 10:0  — SC_FREQ
pub const SCI_CLOCKF: u8 = 0x3;

/// Decode time in seconds.
pub const SCI_DECODE_TIME: u8 = 0x4;

/// Sample rate and channel count.
pub const SCI_AUDATA: u8 = 0x5;

/// RAM write/read data. Auto-increments `SCI_WRAMADDR`.
pub const SCI_WRAM: u8 = 0x6;

/// Base address for RAM write/read.
/// - 0x0000–0x3FFF — X memory
/// - 0x4000–0x7FFF — Y memory
/// - 0x8000–0xBFFF — instruction memory
/// - 0xC000–0xFFFF — I/O
pub const SCI_WRAMADDR: u8 = 0x7;

/// Stream header data 0. While recording: next word of encoded data.
pub const SCI_HDAT0: u8 = 0x8;

/// Stream header data 1. While recording: words waiting in the buffer.
pub const SCI_HDAT1: u8 = 0x9;

/// Start address of an application. Writing starts it.
pub const SCI_AIADDR: u8 = 0xA;

/// Volume control (0.5 dB steps).
/// - Bits 15:8 — left attenuation
/// - Bits  7:0 — right attenuation
pub const SCI_VOL: u8 = 0xB;

/// Application control register 0.
pub const SCI_AICTRL0: u8 = 0xC;

/// Application control register 1. Encoder: record gain, 1024 = 1×, 0 = AGC.
pub const SCI_AICTRL1: u8 = 0xD;

/// Application control register 2. Encoder: maximum AGC gain, 1024 = 1×.
pub const SCI_AICTRL2: u8 = 0xE;

/// Application control register 3. Encoder: setup flags on start,
/// stop request and stop status while recording.
pub const SCI_AICTRL3: u8 = 0xF;

// ── SCI_MODE bits ──────────────────────────────────────────────────────────

/// Differential (left channel inverted).
pub const SM_DIFF: u16 = 1 << 0;

/// Allow MPEG layers I & II.
pub const SM_LAYER12: u16 = 1 << 1;

/// Soft reset.
pub const SM_RESET: u16 = 1 << 2;

/// Cancel decoding current file.
pub const SM_CANCEL: u16 = 1 << 3;

/// Allow SDI tests.
pub const SM_TESTS: u16 = 1 << 5;

/// Stream mode.
pub const SM_STREAM: u16 = 1 << 6;

/// VS1002 native SPI modes.
pub const SM_SDINEW: u16 = 1 << 11;

/// PCM/ADPCM recording active. The Ogg encoder requires it as well.
pub const SM_ADPCM: u16 = 1 << 12;

/// Select line input instead of the microphone.
pub const SM_LINE1: u16 = 1 << 14;

/// Input clock range (12–13 MHz when clear).
pub const SM_CLK_RANGE: u16 = 1 << 15;

// ── SCI_AICTRL3 encoder bits ───────────────────────────────────────────────

/// Written by the host: request the encoder to finish the stream.
pub const AICTRL3_STOP_REQUEST: u16 = 1 << 0;

/// Read back: the encoder has stopped and flushed its last page.
pub const AICTRL3_STOPPED: u16 = 1 << 1;

/// Read back: the final buffered word carries only one valid byte.
pub const AICTRL3_ODD_LAST_BYTE: u16 = 1 << 2;

// ── Memory-mapped I/O ──────────────────────────────────────────────────────

/// Interrupt enable register in the I/O address space.
pub const INT_ENABLE: u16 = 0xC01A;

/// `INT_ENABLE` value leaving only the SCI interrupt enabled.
pub const INT_ENABLE_SCI_ONLY: u16 = 0x0002;

// ── Address-space offsets for boot images ──────────────────────────────────

/// Instruction memory base as seen through `SCI_WRAMADDR`.
pub const WRAM_CODE_BASE: u16 = 0x8000;

/// X data memory base as seen through `SCI_WRAMADDR`.
pub const WRAM_X_BASE: u16 = 0x0000;

/// Y data memory base as seen through `SCI_WRAMADDR`.
pub const WRAM_Y_BASE: u16 = 0x4000;
