//! User stop request.

use core::sync::atomic::{AtomicBool, Ordering};

/// Source of the "user wants the recording to end" signal.
///
/// Polled once per drain iteration while the engine is still recording.
pub trait StopSignal {
    /// Whether a stop has been requested.
    fn stop_requested(&mut self) -> bool;
}

impl<F> StopSignal for F
where
    F: FnMut() -> bool,
{
    fn stop_requested(&mut self) -> bool {
        self()
    }
}

/// Stop signal backed by a flag set elsewhere, e.g. from a button
/// interrupt handler.
#[derive(Debug, Clone, Copy)]
pub struct StopFlag<'a>(pub &'a AtomicBool);

impl StopSignal for StopFlag<'_> {
    fn stop_requested(&mut self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
