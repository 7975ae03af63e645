//! genstd: links the Gno standard libraries to their Go implementations.
//!
//! # Pipeline
//!
//! ```text
//! stdlib tree
//!     │  walk_stdlibs (parse every .gno/.go file)
//!     ▼
//! Vec<Package>
//!     │  Linker::link
//!     ▼
//! MappingSet ──► listing or JSON on stdout
//! ```
//!
//! Any error stops the run and is reported as a single diagnostic.

pub mod commands;
pub mod config;
mod error;
pub mod tracing_setup;
pub mod walk;

pub use config::{Options, OptionsError, OutputMode};
pub use error::Error;
pub use walk::{walk_stdlibs, WalkError};
