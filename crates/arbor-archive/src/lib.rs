//! # arbor-archive
//!
//! The archiver contract shared by every concrete text format.
//!
//! An [`Archiver`] implements two operations against an I/O stream:
//! [`Archiver::save`] writes a [`Container`](arbor_val::Container) as the
//! element named `root_name`, and [`Archiver::load`] reads it back. Every
//! other entry point (files, in-memory strings, [`Persist`](arbor_val::Persist)
//! objects) is a provided method derived from those two.
//!
//! ```rust
//! use arbor_archive::{Archiver, ArchiveResult};
//! use arbor_val::Container;
//!
//! fn backup(archiver: &dyn Archiver, settings: &Container) -> ArchiveResult<String> {
//!     archiver.save_string(settings, "settings")
//! }
//! ```

mod archiver;
mod error;
mod format;

pub use archiver::*;
pub use error::{ArchiveError, ArchiveResult};
pub use format::*;
