//! Text and JSON structure measurements used by the validators.
//!
//! Both analyzers are approximations: the complexity scan does not know
//! about string literals or comments, so braces and keywords inside them
//! are counted like real code.

pub mod complexity;
pub mod structure;

pub use complexity::{complexity, nesting_depth};
pub use structure::{json_depth, json_size};
