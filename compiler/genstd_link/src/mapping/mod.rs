//! Mapping records: the output of linking.
//!
//! A `Mapping` ties one bodyless Gno function to the Go function
//! implementing it, with every parameter and result reconciled into a single
//! Go type. Code generators consume mappings through the query methods here;
//! nothing downstream needs the parsed sources again.
//!
//! Go package references are spelled through generated import identifiers
//! (see [`import_ident`]) so that two packages with the same name, such as
//! `tm2/pkg/std` and `gnovm/stdlibs/std`, never collide in generated code.

mod set;

pub use set::MappingSet;

use std::collections::BTreeSet;
use std::fmt::{self, Write};

use genstd_ir::{is_predeclared_type, TypeExpr};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::MergedType;

/// Render an import path as a Go identifier: `lib_` followed by the path
/// with every non-alphanumeric byte replaced by `_`.
///
/// `github.com/gnolang/gno/tm2/pkg/crypto` becomes
/// `lib_github_com_gnolang_gno_tm2_pkg_crypto`.
pub fn import_ident(path: &str) -> String {
    let mut ident = String::with_capacity(path.len() + 4);
    ident.push_str("lib_");
    ident.extend(
        path.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }),
    );
    ident
}

/// One parameter or result of a mapping.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MappingType {
    gno_type: TypeExpr,
    /// The merged type, or the interpreter's boxed value type when boxed.
    go_type: MergedType,
    is_boxed: bool,
    /// Go import path of the implementing package; bare non-builtin names
    /// in `go_type` live there.
    go_home: String,
}

impl MappingType {
    /// A slot whose Gno and Go types were unified.
    pub fn merged(gno_type: TypeExpr, merged: MergedType, go_home: impl Into<String>) -> Self {
        MappingType {
            gno_type,
            go_type: merged,
            is_boxed: false,
            go_home: go_home.into(),
        }
    }

    /// A slot the Go side receives as a boxed interpreter value.
    pub fn boxed(
        gno_type: TypeExpr,
        interpreter_package: impl Into<String>,
        boxed_type: impl Into<String>,
        go_home: impl Into<String>,
    ) -> Self {
        MappingType {
            gno_type,
            go_type: MergedType::Qualified {
                path: interpreter_package.into(),
                name: boxed_type.into(),
            },
            is_boxed: true,
            go_home: go_home.into(),
        }
    }

    /// The Gno type as written.
    pub fn gno_type(&self) -> &TypeExpr {
        &self.gno_type
    }

    /// The Gno type rendered as Go source text.
    pub fn gno_type_string(&self) -> String {
        self.gno_type.to_string()
    }

    /// The Go type generated code uses for this slot.
    pub fn go_type(&self) -> &MergedType {
        &self.go_type
    }

    /// The unified type; `None` for boxed slots, which skip unification.
    pub fn merged_type(&self) -> Option<&MergedType> {
        (!self.is_boxed).then_some(&self.go_type)
    }

    /// Whether the Go side takes this slot as a boxed interpreter value.
    pub fn is_boxed(&self) -> bool {
        self.is_boxed
    }

    /// The Go type with every package reference spelled through its import
    /// identifier: `*lib_github_com_gnolang_gno_tm2_pkg_crypto.Bech32Address`.
    pub fn go_qualified_name(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = write_qualified(&mut out, &self.go_type, &self.go_home);
        out
    }

    /// Import paths `go_qualified_name` refers to.
    fn referenced_packages<'s>(&'s self, out: &mut BTreeSet<&'s str>) {
        match self.go_type.innermost() {
            MergedType::Ident(name) if !is_predeclared_type(name) => {
                out.insert(&self.go_home);
            }
            MergedType::Qualified { path, .. } => {
                out.insert(path);
            }
            MergedType::Linked(lt) => {
                out.insert(&lt.go_package);
            }
            _ => {}
        }
    }
}

fn write_qualified(out: &mut String, ty: &MergedType, home: &str) -> fmt::Result {
    match ty {
        MergedType::Ident(name) if is_predeclared_type(name) => out.write_str(name),
        MergedType::Ident(name) => write!(out, "{}.{name}", import_ident(home)),
        MergedType::Qualified { path, name } => write!(out, "{}.{name}", import_ident(path)),
        MergedType::Linked(lt) => write!(out, "{}.{}", import_ident(&lt.go_package), lt.go_name),
        MergedType::Pointer(elem) => {
            out.write_char('*')?;
            write_qualified(out, elem, home)
        }
        MergedType::Array { len, elem } => {
            write!(out, "[{len}]")?;
            write_qualified(out, elem, home)
        }
        MergedType::Slice(elem) => {
            out.write_str("[]")?;
            write_qualified(out, elem, home)
        }
    }
}

impl Serialize for MappingType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MappingType", 3)?;
        state.serialize_field("gno_type", &self.gno_type_string())?;
        state.serialize_field("go_type", &self.go_qualified_name())?;
        state.serialize_field("is_boxed", &self.is_boxed)?;
        state.end()
    }
}

/// A linked Gno/Go function pair.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct Mapping {
    /// Gno import path of the declaring package (`std`, `math/bits`).
    pub gno_import_path: String,
    /// Gno function name.
    pub gno_func: String,
    /// Go import path of the implementing package.
    pub go_import_path: String,
    /// Go function name.
    pub go_func: String,
    /// Whether the Go function takes the interpreter machine first.
    pub needs_context: bool,
    pub params: Vec<MappingType>,
    pub results: Vec<MappingType>,
    #[serde(skip)]
    interpreter_package: String,
}

impl Mapping {
    /// Build a mapping. `interpreter_package` is the import path providing
    /// the machine and boxed value types.
    #[allow(clippy::too_many_arguments, reason = "flat record constructor")]
    pub fn new(
        gno_import_path: impl Into<String>,
        gno_func: impl Into<String>,
        go_import_path: impl Into<String>,
        go_func: impl Into<String>,
        needs_context: bool,
        params: Vec<MappingType>,
        results: Vec<MappingType>,
        interpreter_package: impl Into<String>,
    ) -> Self {
        Mapping {
            gno_import_path: gno_import_path.into(),
            gno_func: gno_func.into(),
            go_import_path: go_import_path.into(),
            go_func: go_func.into(),
            needs_context,
            params,
            results,
            interpreter_package: interpreter_package.into(),
        }
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Whether any parameter or result is boxed.
    pub fn has_boxed(&self) -> bool {
        self.slots().any(MappingType::is_boxed)
    }

    fn slots(&self) -> impl Iterator<Item = &MappingType> {
        self.params.iter().chain(&self.results)
    }

    /// Import paths this mapping's generated code needs, sorted.
    pub(crate) fn go_import_paths(&self) -> BTreeSet<&str> {
        let mut paths = BTreeSet::new();
        if self.needs_context {
            paths.insert(self.interpreter_package.as_str());
        }
        for slot in self.slots() {
            slot.referenced_packages(&mut paths);
        }
        paths
    }

    /// `(identifier, path)` pairs of the Go imports this mapping needs,
    /// sorted by path and deduplicated.
    pub fn go_imports(&self) -> Vec<(String, String)> {
        self.go_import_paths()
            .into_iter()
            .map(|path| (import_ident(path), path.to_owned()))
            .collect()
    }
}

/// One line per mapping: `std.Fn(int) int => github.com/.../std.Fn`.
impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.gno_import_path, self.gno_func)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param.gno_type)?;
        }
        f.write_str(")")?;
        match self.results.as_slice() {
            [] => {}
            [single] => write!(f, " {}", single.gno_type)?,
            results => {
                f.write_str(" (")?;
                for (i, result) in results.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", result.gno_type)?;
                }
                f.write_str(")")?;
            }
        }
        write!(f, " => {}.{}", self.go_import_path, self.go_func)?;
        if self.needs_context {
            f.write_str(" [machine]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
