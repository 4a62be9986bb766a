//! Collaborators the recorder talks to besides the device.
//!
//! | Trait | Provided by | Used for |
//! |-------|-------------|----------|
//! | [`AudioSink`] | file system / storage | encoded Ogg stream output |
//! | [`StopSignal`] | user interface | ending the recording |
//!
//! [`StopSignal`] is implemented for any `FnMut() -> bool` and for
//! [`StopFlag`], a wrapper around an [`AtomicBool`](core::sync::atomic::AtomicBool)
//! set from an interrupt handler.

mod sink;
mod stop;

pub use sink::AudioSink;
pub use stop::{StopFlag, StopSignal};
