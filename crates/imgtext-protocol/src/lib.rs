//! Report types for imgtext.
//!
//! This crate defines the extraction report and the response envelope
//! printed by the CLI in JSON mode, plus the error codes shared by both
//! front-ends.

mod report;
mod response;

pub use report::*;
pub use response::*;
