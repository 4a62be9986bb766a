/// Words moved per drain block (one 512-byte storage sector).
pub const BLOCK_WORDS: u16 = 256;

/// Entry address reserved to signal a failed image load.
pub const INVALID_ENTRY: u16 = 0xFFFF;

/// Tag that opens every `.img` boot image.
pub const IMAGE_MAGIC: [u8; 3] = *b"P&H";

/// Default DREQ wait after clock changes, resets and plugin activation.
pub const DEFAULT_READY_TIMEOUT_MS: u32 = 100;
