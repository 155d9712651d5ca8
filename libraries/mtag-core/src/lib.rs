//! MTag Core
//!
//! Object model for reading and writing media file tags through a pluggable
//! [`TagEngine`].
//!
//! A file may carry several tag flavors at once (for example an ID3v1 and an
//! ID3v2 tag in the same MP3). This crate provides:
//! - **File handles** that own the engine's native file resource
//! - **Tag handles** for field get/set and bulk enumeration
//! - **Acquisition policy**: a single memoized tag per file plus one-shot
//!   flavor lookups
//! - **Error Handling**: Unified `MTagError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use mtag_core::{MTag, MemoryEngine};
//!
//! # fn example() -> mtag_core::Result<()> {
//! let engine = MemoryEngine::new()
//!     .with_file("/music/song.mp3", "MPEG")
//!     .with_default_flavor("/music/song.mp3", "id3v2");
//! let mtag = MTag::new(engine);
//!
//! let file = mtag.open("/music/song.mp3")?;
//! let tag = file.tag()?;
//! tag.set_title("My Favorite Song")?;
//! assert_eq!(tag.get("title")?.as_deref(), Some("My Favorite Song"));
//!
//! // No ID3v1 tag in this file
//! assert!(file.lookup("id3v1")?.is_none());
//!
//! file.save()?;
//! file.close();
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod factory;
pub mod fields;
pub mod file;
pub mod flavor;
pub mod memory;
pub mod tag;

// Re-export commonly used types
pub use engine::TagEngine;
pub use error::{MTagError, Result};
pub use factory::MTag;
pub use fields::{collect_fields, FieldMap, RawField};
pub use file::File;
pub use flavor::{FlavorId, TagOrigin};
pub use memory::{MemoryEngine, MemoryFile};
pub use tag::Tag;
