//! Level filtered, colored stderr logging.
//!
//! Install the global logger once with [`init`] (filters from `RUST_LOG`) or
//! [`init_with_filters`], then log through the [`error!`], [`warn!`],
//! [`info!`], [`debug!`] and [`trace!`] macros. Logging before
//! initialization is a no-op.

#[macro_use]
mod log;
mod error;
pub mod fmt;

pub use error::LogError;
pub use fmt::{LogFmt, LogFmtBuilder, LogSpec, SegmentSpec};

pub type Result<T> = core::result::Result<T, LogError>;

pub use log::*;
