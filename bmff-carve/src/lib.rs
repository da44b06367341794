//! # bmff-carve
//!
//! Trims trailing junk from ISO Base Media File Format (ISO/IEC 14496-12) files: MP4, MOV, CR3, HEIF, etc.
//!
//! Recovery tools often produce files with garbage appended past the logical end.
//! Every top-level box declares its own size, so the legitimate content can be recovered by walking the boxes
//! in order until the terminal box (usually `mdat`) and cutting everything after it.
//!
//! ## Components
//! - [Walker] reads top-level [BoxHeader]s from a [Source] without reading any payloads.
//! - [resolve] consumes the headers and finds the [Extent] of the legitimate content.
//! - [commit] copies that extent to a temporary file and atomically renames it into place.
//! - [repair] and [repair_file] (plus their `_with` variants) run all three for a single source and return an [Outcome].
//!
//! Nothing here logs or keeps global state; every call takes a [Config] and returns its result.
//!
//! ## Example
//! ```rust
//! use std::io::Cursor;
//! use bmff_carve::{resolve, Config, Walker};
//!
//! # fn main() -> anyhow::Result<()> {
//! // ftyp (16 bytes), mdat (8 bytes), followed by junk.
//! let mut data = b"\0\0\0\x10ftypcrx \0\0\0\x01\0\0\0\x08mdat".to_vec();
//! data.extend_from_slice(b"junk junk junk");
//!
//! let mut source = Cursor::new(data);
//! let extent = resolve(Walker::new(&mut source)?, &Config::default())?;
//!
//! assert!(extent.found());
//! assert_eq!(extent.end, 24);
//! # Ok(()) }
//! ```

mod carve;
mod error;
mod header;
mod io;
mod repair;
mod resolve;
mod types;
mod walker;

pub use carve::*;
pub use error::*;
pub use header::*;
pub use io::*;
pub use repair::*;
pub use resolve::*;
pub use types::*;
pub use walker::*;

#[cfg(test)]
mod test;
