//! Audio library scanning.
//!
//! - **scanner**: lazy directory walk filtered to audio extensions,
//!   with URL-safe relative paths
//! - **listing**: per-request view over every configured directory

pub mod listing;
pub mod scanner;

pub use listing::{mount_prefix, ListingService, FILES_PREFIX};
pub use scanner::{
    decode_relative_path, encode_relative_path, is_audio_file, LibraryScanner, Scan,
    AUDIO_EXTENSIONS,
};
