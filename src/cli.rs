//! CLI argument parsing for pdfmerge.
//!
//! Two subcommands share one binary:
//! - `serve` runs the HTTP merge endpoint
//! - `merge` uploads local files to a running server and saves the result
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::cli::{Cli, Command};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! if let Command::Serve(args) = &cli.command {
//!     let config = args.to_config().expect("Invalid configuration");
//!     println!("Listening on {}", config.bind);
//! }
//! ```

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{
    ClientConfig, CompressionLevel, DEFAULT_BIND, DEFAULT_FIELD_NAME, DEFAULT_MAX_UPLOAD_MIB,
    DEFAULT_MERGE_PATH, MERGED_FILE_NAME, ServerConfig,
};
use crate::error::{MergeError, Result};
use crate::utils::collect_paths_for_patterns;

/// Merge PDF files over HTTP.
///
/// Run `pdfmerge serve` to accept multipart uploads and answer with a single
/// merged PDF, or `pdfmerge merge` to send local files to such a server.
#[derive(Parser, Debug)]
#[command(name = "pdfmerge")]
#[command(version)]
#[command(about = "Merge PDF files over HTTP", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Log filter (e.g. "info", "pdfmerge=debug,tower_http=debug")
    #[arg(long, global = true, value_name = "FILTER", env = "PDFMERGE_LOG", default_value = "info")]
    pub log_level: String,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the merge server
    Serve(ServeArgs),

    /// Merge local PDF files through a running server
    Merge(MergeArgs),
}

/// Arguments of `pdfmerge serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(short, long, value_name = "ADDR", env = "PDFMERGE_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Path of the merge endpoint
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MERGE_PATH)]
    pub merge_path: String,

    /// Multipart field name carrying the PDFs
    #[arg(long, value_name = "NAME", default_value = DEFAULT_FIELD_NAME)]
    pub field_name: String,

    /// Maximum request body size, in MiB
    #[arg(long, value_name = "MIB", default_value_t = DEFAULT_MAX_UPLOAD_MIB)]
    pub max_upload_size: usize,

    /// Number of uploads parsed in parallel
    ///
    /// Default is number of CPU cores. Use 1 for sequential parsing.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Compression level for the merged PDF
    ///
    /// - none: streams are written as loaded
    /// - standard: compress uncompressed streams (default)
    /// - maximum: also renumber objects densely
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,
}

impl ServeArgs {
    /// Convert the arguments into a validated server configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind address cannot be parsed or the
    /// configuration is invalid.
    pub fn to_config(&self) -> Result<ServerConfig> {
        let bind = SocketAddr::from_str(&self.bind).map_err(|e| {
            MergeError::invalid_config(format!("Invalid bind address {:?}: {e}", self.bind))
        })?;

        let config = ServerConfig {
            bind,
            merge_path: self.merge_path.clone(),
            field_name: self.field_name.clone(),
            max_upload_bytes: self.max_upload_size.saturating_mul(1024 * 1024),
            jobs: self.jobs,
            compression: CompressionLevel::from_str(&self.compression)?,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Arguments of `pdfmerge merge`.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input PDF files to merge (in order)
    ///
    /// Glob patterns are expanded; matches of one pattern are sorted.
    ///
    /// Examples:
    ///   pdfmerge merge cover.pdf body.pdf
    ///   pdfmerge merge "chapter-*.pdf" -o book.pdf
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Base URL of the merge server
    #[arg(short, long, value_name = "URL", env = "PDFMERGE_SERVER", default_value = "http://127.0.0.1:3000")]
    pub server: String,

    /// Path of the merge endpoint
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MERGE_PATH)]
    pub merge_path: String,

    /// Multipart field name carrying the PDFs
    #[arg(long, value_name = "NAME", default_value = DEFAULT_FIELD_NAME)]
    pub field_name: String,

    /// Where to save the merged PDF
    #[arg(short, long, value_name = "FILE", default_value = MERGED_FILE_NAME)]
    pub output: PathBuf,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show each selected file before uploading
    #[arg(short, long)]
    pub verbose: bool,
}

impl MergeArgs {
    /// Expand the inputs and build a validated client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is malformed or matches nothing, or the
    /// configuration is invalid.
    pub fn to_config(&self) -> Result<ClientConfig> {
        let inputs = collect_paths_for_patterns(&self.inputs)?;

        let config = ClientConfig {
            inputs,
            server: self.server.clone(),
            merge_path: self.merge_path.clone(),
            field_name: self.field_name.clone(),
            output: self.output.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
        };

        config.validate()?;
        Ok(config)
    }
}
