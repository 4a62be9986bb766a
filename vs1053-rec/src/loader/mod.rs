//! Getting code into the VS1053.
//!
//! | Format | Loader | Source |
//! |--------|--------|--------|
//! | `.img` boot image | [`load_image`] | byte stream, `P&H` records |
//! | `.plg` plugin table | [`load_plugin`] | `&[u16]` compiled into firmware |
//!
//! Both stream straight into device memory through `SCI_WRAMADDR` and
//! `SCI_WRAM`; neither buffers the image.

mod image;
mod plugin;

pub use image::{load_image, load_image_or_sentinel, LoadReport, RecordKind};
pub use plugin::load_plugin;
