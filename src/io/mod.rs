//! PDF input and output.
//!
//! - [`reader`] parses uploaded bytes into documents
//! - [`writer`] serializes documents back into bytes

pub mod reader;
pub mod writer;

pub use reader::{LoadStatistics, LoadedPdf, PdfReader, Upload};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
