//! Compressed plugin (`.plg`) loader.
//!
//! Plugins are distributed as C arrays of 16-bit words, a sequence of
//! records:
//!
//! ```text
//! register  count  data...
//! ```
//!
//! If bit 15 of `count` is set, the record is run-length encoded: the single
//! following word is written `count & 0x7FFF` times. Otherwise `count` data
//! words follow, each written to `register` in turn. Most records target
//! `SCI_WRAMADDR` / `SCI_WRAM`, but any SCI register may appear.

use crate::codec::SciBus;
use crate::error::{FormatError, LoadError};

/// Run-length flag in the `count` word.
const RLE_FLAG: u16 = 0x8000;

/// Write a plugin table to the device.
///
/// Returns the number of register writes issued. A table that ends inside
/// a record is rejected with [`FormatError::UnexpectedEof`]; records before
/// it have already been written.
pub fn load_plugin<B: SciBus>(bus: &mut B, plugin: &[u16]) -> Result<u32, LoadError<B::Error>> {
    let mut words = plugin.iter().copied();
    let mut writes = 0u32;

    while let Some(register) = words.next() {
        let count = words.next().ok_or(FormatError::UnexpectedEof)?;
        let register = register as u8;

        if count & RLE_FLAG != 0 {
            let value = words.next().ok_or(FormatError::UnexpectedEof)?;
            for _ in 0..count & !RLE_FLAG {
                bus.write_register(register, value)
                    .map_err(LoadError::Transport)?;
            }
            writes += u32::from(count & !RLE_FLAG);
        } else {
            for _ in 0..count {
                let value = words.next().ok_or(FormatError::UnexpectedEof)?;
                bus.write_register(register, value)
                    .map_err(LoadError::Transport)?;
            }
            writes += u32::from(count);
        }
    }

    debug!("plugin loaded: {} register writes", writes);
    Ok(writes)
}
