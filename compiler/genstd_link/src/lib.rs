//! Linking of Gno declarations to native Go implementations.
//!
//! The Gno standard libraries declare some functions without a body; their
//! implementation lives in Go. This crate reconciles the two declarations:
//!
//! - [`registry`]: Gno named types represented by a different Go type
//! - [`unify`]: merging one Gno type with one Go type
//! - [`linker`]: matching whole function signatures
//! - [`mapping`]: the resulting records, ready for code generation
//!
//! ```text
//! let registry = LinkedTypeRegistry::stdlibs();
//! let config = LinkerConfig::default();
//! let mappings = Linker::new(&registry, &config).link(&packages)?;
//! ```

pub mod linker;
pub mod mapping;
pub mod registry;
pub mod unify;

pub use linker::{FuncRef, LinkError, Linker, LinkerConfig, MismatchReason, Slot};
pub use mapping::{import_ident, Mapping, MappingSet, MappingType};
pub use registry::{LinkedType, LinkedTypeRegistry, RegistryError};
pub use unify::{MergeError, MergedType, Side, Unifier};
