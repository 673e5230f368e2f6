//! pdfmerge - Merge uploaded PDF files into a single downloadable document.
//!
//! The crate has two halves that talk over HTTP:
//!
//! - a stateless merge server ([`server`]) accepting `multipart/form-data`
//!   uploads and answering with one concatenated PDF
//! - an upload client ([`client`]) that tracks the selection, submits it and
//!   stores the download
//!
//! The merge pipeline itself ([`merge::merge_uploads`]) is usable without
//! either of them.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::Upload;
//! use pdfmerge::merge::{MergeOptions, merge_uploads};
//!
//! # async fn example(a: Vec<u8>, b: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let uploads = vec![
//!     Upload::new(Some("a.pdf".to_string()), a),
//!     Upload::new(Some("b.pdf".to_string()), b),
//! ];
//!
//! let merged = merge_uploads(&uploads, &MergeOptions::default()).await?;
//! println!("Created {} page document", merged.statistics.total_pages);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod server;
pub mod utils;

// Re-export commonly used types
pub use config::{ClientConfig, ServerConfig};
pub use error::{MergeError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
