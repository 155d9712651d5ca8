//! MTag Lofty Engine
//!
//! [`TagEngine`](mtag_core::TagEngine) implementation backed by the lofty
//! library.
//!
//! Supported flavors: `id3v1`, `id3v2`, `ape`, `vorbis`, `mp4`, `riff` and
//! `aiff`, in whichever combinations the file format allows.
//!
//! # Example
//!
//! ```rust,no_run
//! use mtag_core::MTag;
//! use mtag_lofty::{EngineConfig, LoftyEngine};
//! # fn example() -> mtag_core::Result<()> {
//! let mtag = MTag::new(LoftyEngine::new(EngineConfig::default()));
//!
//! let file = mtag.open("/music/song.mp3")?;
//! file.strip("id3v1")?;
//!
//! let tag = file.tag()?;
//! println!("{:?} - {:?}", tag.artist()?, tag.title()?);
//! tag.set_artist("foo")?;
//! file.save()?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod config;
mod engine;
mod error;
mod keys;

pub use config::{EngineConfig, ParsingStrictness};
pub use engine::{LoftyEngine, LoftyFile};
pub use error::{LoftyEngineError, Result};
