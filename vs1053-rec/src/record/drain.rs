//! Encoder output drain.
//!
//! While the Ogg Vorbis encoder runs, it queues 16-bit words in an internal
//! ring buffer. `SCI_HDAT1` reports how many are waiting and each read of
//! `SCI_HDAT0` pops one. [`DrainEngine`] moves them to an [`AudioSink`] in
//! 256-word blocks (512 bytes, one storage sector) and walks the stop
//! handshake:
//!
//! ```text
//! Recording ──stop signal──► StopRequested ──AICTRL3 bit 1──► DeviceStopped ──last block──► Finished
//! ```
//!
//! Only the final block may be short. Its last word is handled apart:
//! the high byte is always written, the low byte only if bit 2 of
//! `SCI_AICTRL3` is clear (the stream ended on an even byte).

use crate::codec::registers as reg;
use crate::codec::SciBus;
use crate::constants::BLOCK_WORDS;
use crate::error::DrainError;
use crate::io::{AudioSink, StopSignal};

/// Progress of a recording towards a clean shutdown.
///
/// States only ever advance, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrainState {
    /// Encoder running, whole blocks drained.
    Recording,
    /// Stop sent to the encoder, waiting for it to acknowledge.
    StopRequested,
    /// Encoder stopped; draining what is left, including a short block.
    DeviceStopped,
    /// Last word written. Terminal.
    Finished,
}

impl DrainState {
    /// Fewest buffered words worth starting a block for.
    const fn threshold(self) -> u16 {
        match self {
            DrainState::Recording | DrainState::StopRequested => BLOCK_WORDS,
            DrainState::DeviceStopped | DrainState::Finished => 1,
        }
    }
}

/// Running totals of a drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainStats {
    /// Words read from `SCI_HDAT0`.
    pub words: u64,
    /// Bytes written to the sink.
    pub bytes: u64,
}

/// Recording drain state machine.
///
/// Call [`poll()`](Self::poll) from the main loop, or hand the loop over
/// with [`run()`](Self::run). Neither closes the sink.
#[derive(Debug)]
pub struct DrainEngine {
    state: DrainState,
    stats: DrainStats,
}

impl DrainEngine {
    /// Create an engine in [`DrainState::Recording`].
    pub const fn new() -> Self {
        Self {
            state: DrainState::Recording,
            stats: DrainStats { words: 0, bytes: 0 },
        }
    }

    /// Current state.
    pub fn state(&self) -> DrainState {
        self.state
    }

    /// Totals so far.
    pub fn stats(&self) -> DrainStats {
        self.stats
    }

    /// Whether the last word has been written.
    pub fn is_finished(&self) -> bool {
        self.state == DrainState::Finished
    }

    /// Run one iteration of the drain loop and return the resulting state.
    ///
    /// `stop` is sampled only while [`DrainState::Recording`]; once a stop
    /// is under way further requests are ignored. Polling a finished
    /// engine does nothing.
    pub fn poll<B, K, S>(
        &mut self,
        bus: &mut B,
        sink: &mut K,
        stop: &mut S,
    ) -> Result<DrainState, DrainError<B::Error, K::Error>>
    where
        B: SciBus,
        K: AudioSink,
        S: StopSignal,
    {
        if self.state == DrainState::Finished {
            return Ok(self.state);
        }

        if self.state == DrainState::Recording && stop.stop_requested() {
            bus.write_register(reg::SCI_AICTRL3, reg::AICTRL3_STOP_REQUEST)
                .map_err(DrainError::Transport)?;
            self.advance(DrainState::StopRequested);
        }

        let mut waiting = bus
            .read_register(reg::SCI_HDAT1)
            .map_err(DrainError::Transport)?;

        if self.state == DrainState::StopRequested {
            let status = bus
                .read_register(reg::SCI_AICTRL3)
                .map_err(DrainError::Transport)?;
            if status & reg::AICTRL3_STOPPED != 0 {
                self.advance(DrainState::DeviceStopped);
                // Words may have landed since the HDAT1 read above; do not
                // drop this re-read
                waiting = bus
                    .read_register(reg::SCI_HDAT1)
                    .map_err(DrainError::Transport)?;
            }
        }

        while self.state != DrainState::Finished && waiting >= self.state.threshold() {
            let mut block = waiting.min(BLOCK_WORDS);
            waiting -= block;

            // The very last word is handled after the block
            if self.state == DrainState::DeviceStopped && waiting == 0 {
                block -= 1;
            }

            for _ in 0..block {
                let word = bus
                    .read_register(reg::SCI_HDAT0)
                    .map_err(DrainError::Transport)?;
                sink.write_word(word).map_err(DrainError::Sink)?;
            }
            self.stats.words += u64::from(block);
            self.stats.bytes += 2 * u64::from(block);

            if block < BLOCK_WORDS {
                self.finish(bus, sink)?;
            }
        }

        Ok(self.state)
    }

    /// Poll until [`DrainState::Finished`] and return the totals.
    pub fn run<B, K, S>(
        &mut self,
        bus: &mut B,
        sink: &mut K,
        stop: &mut S,
    ) -> Result<DrainStats, DrainError<B::Error, K::Error>>
    where
        B: SciBus,
        K: AudioSink,
        S: StopSignal,
    {
        while self.poll(bus, sink, stop)? != DrainState::Finished {}
        Ok(self.stats)
    }

    /// Write the final word: high byte always, low byte unless the encoder
    /// flags it as padding.
    fn finish<B, K>(&mut self, bus: &mut B, sink: &mut K) -> Result<(), DrainError<B::Error, K::Error>>
    where
        B: SciBus,
        K: AudioSink,
    {
        self.advance(DrainState::Finished);

        let last = bus
            .read_register(reg::SCI_HDAT0)
            .map_err(DrainError::Transport)?;
        sink.write_byte((last >> 8) as u8)
            .map_err(DrainError::Sink)?;
        self.stats.words += 1;
        self.stats.bytes += 1;

        // The first read only refreshes the status; the second is valid
        bus.read_register(reg::SCI_AICTRL3)
            .map_err(DrainError::Transport)?;
        let status = bus
            .read_register(reg::SCI_AICTRL3)
            .map_err(DrainError::Transport)?;
        if status & reg::AICTRL3_ODD_LAST_BYTE == 0 {
            sink.write_byte(last as u8).map_err(DrainError::Sink)?;
            self.stats.bytes += 1;
        }

        info!("recording drained: {} words, {} bytes", self.stats.words, self.stats.bytes);
        Ok(())
    }

    fn advance(&mut self, next: DrainState) {
        debug_assert!(next > self.state);
        info!("drain {} -> {}", self.state, next);
        self.state = next;
    }
}

impl Default for DrainEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
