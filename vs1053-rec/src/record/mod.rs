//! Recording: encoder output drain and the session around it.
//!
//! ## Components
//!
//! | Type | Role |
//! |------|------|
//! | [`DrainEngine`] | Moves encoded words from the device to an [`AudioSink`](crate::io::AudioSink) and runs the stop handshake |
//! | [`Recorder`] | Device setup, image load, activation, drain, close and reset |

mod drain;
mod session;

pub use drain::{DrainEngine, DrainState, DrainStats};
pub use session::{Recorder, SessionReport};
