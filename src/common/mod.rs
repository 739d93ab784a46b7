//!
//! Common utilities across compiling and scanning.
//!

pub mod location;
pub mod source;

pub use location::*;
pub use source::Diagnostic;
