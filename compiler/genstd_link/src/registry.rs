//! Linked-type registry.
//!
//! A linked type is a Gno named type whose native counterpart is a different
//! Go named type: `std.Address` is represented in Go by
//! `crypto.Bech32Address`. The registry is built once, never mutated, and
//! shared by reference with every unifier.

use std::fmt;

use genstd_diagnostic::{Diagnostic, ErrorCode};
use genstd_ir::Span;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// One Gno named type paired with the Go named type that implements it.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct LinkedType {
    /// Gno import path of the declaring package.
    pub gno_package: String,
    /// Type name in the Gno package.
    pub gno_name: String,
    /// Go import path of the implementing package.
    pub go_package: String,
    /// Type name in the Go package.
    pub go_name: String,
}

impl LinkedType {
    pub fn new(
        gno_package: impl Into<String>,
        gno_name: impl Into<String>,
        go_package: impl Into<String>,
        go_name: impl Into<String>,
    ) -> Self {
        LinkedType {
            gno_package: gno_package.into(),
            gno_name: gno_name.into(),
            go_package: go_package.into(),
            go_name: go_name.into(),
        }
    }

    /// Whether the Go side of this record is `go_package.go_name`.
    pub fn targets(&self, go_package: &str, go_name: &str) -> bool {
        self.go_package == go_package && self.go_name == go_name
    }
}

impl fmt::Display for LinkedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} => {}.{}",
            self.gno_package, self.gno_name, self.go_package, self.go_name
        )
    }
}

const TM2_CRYPTO: &str = "github.com/gnolang/gno/tm2/pkg/crypto";
const TM2_STD: &str = "github.com/gnolang/gno/tm2/pkg/std";
const STDLIBS_STD: &str = "github.com/gnolang/gno/gnovm/stdlibs/std";

/// The fixed table of linked types in the Gno standard libraries.
const STDLIB_LINKED_TYPES: &[(&str, &str, &str, &str)] = &[
    ("std", "Address", TM2_CRYPTO, "Bech32Address"),
    ("std", "Coin", TM2_STD, "Coin"),
    ("std", "Coins", TM2_STD, "Coins"),
    ("std", "Realm", STDLIBS_STD, "Realm"),
    ("std", "BankerType", STDLIBS_STD, "BankerType"),
    ("std", "Banker", STDLIBS_STD, "Banker"),
];

/// Error building a registry from a custom table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RegistryError {
    /// Two records share the same Gno package and name.
    Duplicate {
        gno_package: String,
        gno_name: String,
    },
}

impl RegistryError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::E2007)
            .with_message(self.to_string())
            .with_label(None, Span::DUMMY, "second record for this type")
            .with_note("each gno type links to at most one go type")
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Duplicate {
                gno_package,
                gno_name,
            } => write!(f, "duplicate linked type {gno_package}.{gno_name}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Immutable table of linked types, keyed by `(gno_package, gno_name)`.
#[derive(Clone, Debug, Default)]
pub struct LinkedTypeRegistry {
    entries: Vec<LinkedType>,
    /// `gno_package -> gno_name -> position in entries`.
    index: FxHashMap<String, FxHashMap<String, usize>>,
}

impl LinkedTypeRegistry {
    /// The registry of the Gno standard libraries.
    pub fn stdlibs() -> Self {
        let entries = STDLIB_LINKED_TYPES
            .iter()
            .map(|&(gp, gn, op, on)| LinkedType::new(gp, gn, op, on));
        let mut registry = LinkedTypeRegistry::default();
        for entry in entries {
            registry.insert(entry);
        }
        registry
    }

    /// Build a registry from a custom table, rejecting duplicate Gno types.
    pub fn from_entries(
        entries: impl IntoIterator<Item = LinkedType>,
    ) -> Result<Self, RegistryError> {
        let mut registry = LinkedTypeRegistry::default();
        for entry in entries {
            if registry.lookup(&entry.gno_package, &entry.gno_name).is_some() {
                return Err(RegistryError::Duplicate {
                    gno_package: entry.gno_package,
                    gno_name: entry.gno_name,
                });
            }
            registry.insert(entry);
        }
        Ok(registry)
    }

    fn insert(&mut self, entry: LinkedType) {
        self.index
            .entry(entry.gno_package.clone())
            .or_default()
            .insert(entry.gno_name.clone(), self.entries.len());
        self.entries.push(entry);
    }

    /// Look up the record for a Gno type. Absence is the common case.
    pub fn lookup(&self, gno_package: &str, gno_name: &str) -> Option<&LinkedType> {
        let &i = self.index.get(gno_package)?.get(gno_name)?;
        self.entries.get(i)
    }

    /// All records, in table order.
    pub fn iter(&self) -> impl Iterator<Item = &LinkedType> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
