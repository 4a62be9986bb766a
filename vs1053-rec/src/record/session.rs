//! Complete recording session.
//!
//! [`Recorder`] runs the sequence from the VS1053b Ogg Vorbis Encoder
//! manual: clock up, soft reset, mask interrupts, load the encoder image,
//! program mode and gain, start the encoder, drain until stopped, close
//! the output. Whatever happens, the device is soft-reset on the way out
//! so it stops monitoring audio.
//!
//! # Example
//!
//! ```ignore
//! let mut recorder = Recorder::new(sci, RecorderConfig::new().with_agc(4096));
//! let report = recorder.record(
//!     ENCODER_IMG.iter().copied(),
//!     || fs.create("record.ogg"),
//!     &mut || button.is_low(),
//! )?;
//! ```

use core::ops::{Deref, DerefMut};

use super::drain::{DrainEngine, DrainStats};
use crate::codec::registers as reg;
use crate::codec::SciBus;
use crate::config::RecorderConfig;
use crate::error::SessionError;
use crate::io::{AudioSink, StopSignal};
use crate::loader::load_image;

/// Summary of a completed recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionReport {
    /// Entry address the encoder was started at.
    pub entry: u16,
    /// Drain totals.
    pub stats: DrainStats,
}

/// Soft-resets the device when dropped.
struct ResetGuard<'a, B: SciBus> {
    bus: &'a mut B,
}

impl<B: SciBus> Deref for ResetGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        &*self.bus
    }
}

impl<B: SciBus> DerefMut for ResetGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        &mut *self.bus
    }
}

impl<B: SciBus> Drop for ResetGuard<'_, B> {
    fn drop(&mut self) {
        if soft_reset(self.bus).is_err() {
            warn!("device reset failed");
        }
    }
}

/// VS1053 recording session driver.
///
/// Generic over the register transport. The output sink and stop signal
/// are passed per recording.
pub struct Recorder<B> {
    bus: B,
    config: RecorderConfig,
}

impl<B: SciBus> Recorder<B> {
    /// Create a recorder with the given settings.
    pub fn new(bus: B, config: RecorderConfig) -> Self {
        Self { bus, config }
    }

    /// Current settings.
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Replace the settings used by the next recording.
    pub fn set_config(&mut self, config: RecorderConfig) {
        self.config = config;
    }

    /// Release the register transport.
    pub fn release(self) -> B {
        self.bus
    }

    /// Record one Ogg Vorbis stream into the sink returned by `open`.
    ///
    /// `image` is the encoder `.img` file. `open` is called once the image
    /// has loaded and before the encoder starts, so no audio is lost to a
    /// slow file system and a rejected image never creates an output. The
    /// sink is closed once the last word is written.
    ///
    /// The device is soft-reset before returning, on success and on error.
    pub fn record<I, O, K, S>(
        &mut self,
        image: I,
        open: O,
        stop: &mut S,
    ) -> Result<SessionReport, SessionError<B::Error, K::Error>>
    where
        I: IntoIterator<Item = u8>,
        O: FnOnce() -> Result<K, K::Error>,
        K: AudioSink,
        S: StopSignal,
    {
        let config = self.config;
        let mut bus = ResetGuard { bus: &mut self.bus };

        prepare(&mut *bus, &config).map_err(SessionError::Transport)?;

        let loaded = load_image(&mut *bus, image).map_err(|e| {
            warn!("encoder image rejected, not starting");
            SessionError::Load(e)
        })?;

        let mut sink = open().map_err(|e| {
            warn!("output could not be opened, not starting");
            SessionError::Sink(e)
        })?;

        start(&mut *bus, &config, loaded.entry).map_err(SessionError::Transport)?;

        let stats = DrainEngine::new().run(&mut *bus, &mut sink, stop)?;
        sink.close().map_err(SessionError::Sink)?;

        Ok(SessionReport {
            entry: loaded.entry,
            stats,
        })
    }

    /// Soft-reset the device.
    pub fn reset(&mut self) -> Result<(), B::Error> {
        soft_reset(&mut self.bus)
    }
}

/// Clock, reset and interrupt setup ahead of the image load.
fn prepare<B: SciBus>(bus: &mut B, config: &RecorderConfig) -> Result<(), B::Error> {
    debug!("preparing VS1053, clock {=u16:#x}", config.clock);
    bus.write_register(reg::SCI_CLOCKF, config.clock)?;
    bus.wait_ready(config.ready_timeout_ms)?;

    bus.write_register(reg::SCI_BASS, 0)?;

    bus.write_register(reg::SCI_MODE, reg::SM_SDINEW | reg::SM_RESET)?;
    bus.wait_ready(config.ready_timeout_ms)?;

    // Everything but the SCI interrupt off
    bus.write_register(reg::SCI_WRAMADDR, reg::INT_ENABLE)?;
    bus.write_register(reg::SCI_WRAM, reg::INT_ENABLE_SCI_ONLY)
}

/// Program recording mode and gains, then start the encoder at `entry`.
fn start<B: SciBus>(bus: &mut B, config: &RecorderConfig, entry: u16) -> Result<(), B::Error> {
    bus.write_register(reg::SCI_MODE, config.recording_mode())?;
    bus.write_register(reg::SCI_AICTRL1, config.gain)?;
    bus.write_register(reg::SCI_AICTRL2, config.max_agc_gain)?;
    bus.write_register(reg::SCI_AICTRL3, config.encoder_flags)?;
    if let Some(volume) = config.monitor_volume {
        bus.write_register(reg::SCI_VOL, volume)?;
    }

    bus.write_register(reg::SCI_AIADDR, entry)?;
    bus.wait_ready(config.ready_timeout_ms)?;
    info!("encoder started at {=u16:#x}", entry);
    Ok(())
}

fn soft_reset<B: SciBus>(bus: &mut B) -> Result<(), B::Error> {
    bus.write_register(reg::SCI_MODE, reg::SM_SDINEW | reg::SM_RESET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Input;
    use crate::mock::{Access, MockVs1053};
    use pretty_assertions::assert_eq;

    #[test]
    fn prepare_sequence() {
        let mut dev = MockVs1053::new();
        prepare(&mut dev, &RecorderConfig::new()).unwrap();

        assert_eq!(
            dev.log.as_slice(),
            &[
                Access::Write(reg::SCI_CLOCKF, 0xC000),
                Access::Wait(100),
                Access::Write(reg::SCI_BASS, 0),
                Access::Write(reg::SCI_MODE, 0x0804),
                Access::Wait(100),
                Access::Write(reg::SCI_WRAMADDR, 0xC01A),
                Access::Write(reg::SCI_WRAM, 0x0002),
            ]
        );
    }

    #[test]
    fn start_sequence_with_volume_and_agc() {
        let mut dev = MockVs1053::new();
        let config = RecorderConfig::new()
            .with_input(Input::Mic)
            .with_agc(2048)
            .with_encoder_flags(0x0010)
            .with_monitor_volume(0x2020)
            .with_ready_timeout_ms(20);
        start(&mut dev, &config, 0x0034).unwrap();

        assert_eq!(
            dev.log.as_slice(),
            &[
                Access::Write(reg::SCI_MODE, reg::SM_ADPCM | reg::SM_SDINEW),
                Access::Write(reg::SCI_AICTRL1, 0),
                Access::Write(reg::SCI_AICTRL2, 2048),
                Access::Write(reg::SCI_AICTRL3, 0x0010),
                Access::Write(reg::SCI_VOL, 0x2020),
                Access::Write(reg::SCI_AIADDR, 0x0034),
                Access::Wait(20),
            ]
        );
    }

    #[test]
    fn guard_resets_on_drop() {
        let mut dev = MockVs1053::new();
        {
            let mut bus = ResetGuard { bus: &mut dev };
            bus.write_register(reg::SCI_VOL, 0).unwrap();
        }
        assert_eq!(
            dev.log.as_slice(),
            &[
                Access::Write(reg::SCI_VOL, 0),
                Access::Write(reg::SCI_MODE, reg::SM_SDINEW | reg::SM_RESET),
            ]
        );
    }

    #[test]
    fn explicit_reset() {
        let mut recorder = Recorder::new(MockVs1053::new(), RecorderConfig::default());
        recorder.reset().unwrap();
        let dev = recorder.release();
        assert_eq!(dev.reg(reg::SCI_MODE), 0x0804);
    }
}
