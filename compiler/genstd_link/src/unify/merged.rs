//! The result of unifying a Gno type with a Go type.

use std::fmt;

use crate::LinkedType;

/// A Gno/Go type pair reconciled into one Go type.
///
/// Every variant is expressible as a single Go type expression, so the
/// merged tree is what generated code spells out on the native side.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MergedType {
    /// Same identifier on both sides: `int`, or a type declared in the Go
    /// home package.
    Ident(String),
    /// Same named type reached through an import on both sides.
    Qualified {
        /// Full import path.
        path: String,
        /// Type name.
        name: String,
    },
    /// A Gno type and the Go type registered for it.
    Linked(LinkedType),
    /// `*T`
    Pointer(Box<MergedType>),
    /// `[N]T`, with the length text both sides agreed on.
    Array { len: String, elem: Box<MergedType> },
    /// `[]T`
    Slice(Box<MergedType>),
}

impl MergedType {
    /// The type under any pointer, array and slice wrappers.
    pub fn innermost(&self) -> &MergedType {
        let mut current = self;
        while let MergedType::Pointer(elem)
        | MergedType::Array { elem, .. }
        | MergedType::Slice(elem) = current
        {
            current = elem;
        }
        current
    }
}

/// Renders Go syntax with package references shortened to the last path
/// segment (`*crypto.Bech32Address`). Generated code uses
/// `MappingType::go_qualified_name` instead, which is unambiguous.
impl fmt::Display for MergedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergedType::Ident(name) => f.write_str(name),
            MergedType::Qualified { path, name } => {
                write!(f, "{}.{name}", last_segment(path))
            }
            MergedType::Linked(lt) => write!(f, "{}.{}", last_segment(&lt.go_package), lt.go_name),
            MergedType::Pointer(elem) => write!(f, "*{elem}"),
            MergedType::Array { len, elem } => write!(f, "[{len}]{elem}"),
            MergedType::Slice(elem) => write!(f, "[]{elem}"),
        }
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
