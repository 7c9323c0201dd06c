//! XML archiver for arbor containers.
//!
//! A container becomes an element: attributes become XML attributes and
//! children become child elements, both in order. XML attributes are plain
//! text, so every non-text value is paired with a type annotation in the
//! `urn:arbor:types` namespace:
//!
//! ```xml
//! <root xmlns:arbor="urn:arbor:types" id="5" arbor:id="int" name="box">
//!   <item/>
//! </root>
//! ```
//!
//! Unannotated attributes load as text, so hand-written documents work too.

mod archiver;
mod reader;
mod writer;

pub use archiver::*;

/// Namespace of the type annotation attributes.
pub const TYPES_NS: &str = "urn:arbor:types";

/// Prefix bound to [`TYPES_NS`] on the root element of saved documents.
pub const TYPES_PREFIX: &str = "arbor";
