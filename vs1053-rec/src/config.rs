//! Recording session settings.

use crate::codec::registers as reg;
use crate::constants::DEFAULT_READY_TIMEOUT_MS;

/// Analog input the encoder records from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    /// Line input (`SM_LINE1` set).
    LineIn,
    /// Microphone input.
    Mic,
}

/// Device settings applied by [`Recorder`](crate::record::Recorder)
/// around the image load.
///
/// The defaults match the VS1053b Ogg Vorbis Encoder manual: 4.5× clock,
/// line input, fixed gain of 1×, no encoder flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RecorderConfig {
    /// `SCI_CLOCKF` value. The encoder needs at least 4.5× (0xC000).
    pub clock: u16,
    /// Recording input.
    pub input: Input,
    /// Record gain in `SCI_AICTRL1`: 1024 = 1×, 0 = automatic gain control.
    pub gain: u16,
    /// Maximum AGC gain in `SCI_AICTRL2`: 1024 = 1×, 0 = 64×. Only used
    /// with AGC.
    pub max_agc_gain: u16,
    /// Encoder setup bits written to `SCI_AICTRL3` before activation.
    pub encoder_flags: u16,
    /// Monitor volume for `SCI_VOL`, left in the high byte. `None` leaves
    /// the power-on volume alone.
    pub monitor_volume: Option<u16>,
    /// DREQ wait after clock changes, resets and activation.
    pub ready_timeout_ms: u32,
}

impl RecorderConfig {
    /// Default settings.
    pub const fn new() -> Self {
        Self {
            clock: 0xC000,
            input: Input::LineIn,
            gain: 1024,
            max_agc_gain: 0,
            encoder_flags: 0,
            monitor_volume: None,
            ready_timeout_ms: DEFAULT_READY_TIMEOUT_MS,
        }
    }

    /// Set the `SCI_CLOCKF` value.
    pub const fn with_clock(mut self, clock: u16) -> Self {
        self.clock = clock;
        self
    }

    /// Select the recording input.
    pub const fn with_input(mut self, input: Input) -> Self {
        self.input = input;
        self
    }

    /// Fixed record gain (1024 = 1×).
    pub const fn with_gain(mut self, gain: u16) -> Self {
        self.gain = gain;
        self
    }

    /// Automatic gain control, limited to `max_gain` (1024 = 1×).
    pub const fn with_agc(mut self, max_gain: u16) -> Self {
        self.gain = 0;
        self.max_agc_gain = max_gain;
        self
    }

    /// Encoder setup bits for `SCI_AICTRL3`.
    pub const fn with_encoder_flags(mut self, flags: u16) -> Self {
        self.encoder_flags = flags;
        self
    }

    /// Monitor volume written to `SCI_VOL`.
    pub const fn with_monitor_volume(mut self, volume: u16) -> Self {
        self.monitor_volume = Some(volume);
        self
    }

    /// DREQ wait used during setup.
    pub const fn with_ready_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.ready_timeout_ms = timeout_ms;
        self
    }

    /// `SCI_MODE` value for recording with this configuration.
    pub const fn recording_mode(&self) -> u16 {
        let mode = reg::SM_ADPCM | reg::SM_SDINEW;
        match self.input {
            Input::LineIn => mode | reg::SM_LINE1,
            Input::Mic => mode,
        }
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self::new()
    }
}
