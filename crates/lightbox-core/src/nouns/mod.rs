//! Typed resource records ("nouns") for the Lightbox REST API.
//!
//! These map one-to-one onto the JSON shapes the service returns. Fields the
//! crate does not interpret are left off; serde ignores unknown keys.

mod access;
mod album;
mod field;
mod file;
mod keyword;

pub use access::*;
pub use album::*;
pub use field::*;
pub use file::*;
pub use keyword::*;
