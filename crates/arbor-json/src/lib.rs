//! JSON archiver for arbor containers.
//!
//! A document is an object with a single key, the root name. Every
//! container is an object with two optional keys:
//!
//! ```json
//! {
//!   "root": {
//!     "attributes": { "id": 5, "ratio": 0.5, "name": "box" },
//!     "children": [ { "item": {} }, { "item": {} } ]
//!   }
//! }
//! ```
//!
//! JSON keeps booleans, integers, floats and strings apart, so no extra type
//! annotation is needed. Children are a list of single-key objects so that
//! repeated names and their order survive.

mod archiver;
mod decode;
mod encode;

pub use archiver::*;

pub const ATTRIBUTES_KEY: &str = "attributes";
pub const CHILDREN_KEY: &str = "children";
