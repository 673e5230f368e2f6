//! Terminal output for the upload client.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};
