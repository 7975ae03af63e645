//! Subcommands of the `genstd` binary.

mod explain;
mod link;

pub use explain::explain_error;
pub use link::{link_stdlibs, report_error, run_link, write_mappings};
