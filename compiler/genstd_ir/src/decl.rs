//! Function declarations, source files and packages.

use std::path::PathBuf;

use crate::{Field, Imports, Signature, Span};

/// Which side of the link a source file belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SourceKind {
    /// A `.gno` file: the interpreted declarations.
    Gno,
    /// A `.go` file: the native implementations.
    Go,
}

impl SourceKind {
    /// File extension for this kind, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            SourceKind::Gno => "gno",
            SourceKind::Go => "go",
        }
    }
}

/// A top-level function or method declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FuncDecl {
    /// Function name.
    pub name: String,
    /// Receiver, for methods.
    pub receiver: Option<Field>,
    /// Whether the declaration has a type parameter list.
    pub has_type_params: bool,
    /// Parameters and results.
    pub signature: Signature,
    /// Whether the declaration has a body. Bodyless Gno functions are the
    /// ones implemented natively.
    pub has_body: bool,
    /// Span of the function name.
    pub span: Span,
}

impl FuncDecl {
    /// Whether the function name is exported.
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }

    /// Whether this declaration is a method.
    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }

    /// Whether this is a plain function declared without a body.
    pub fn is_bodyless(&self) -> bool {
        !self.has_body && !self.is_method()
    }
}

/// Check whether an identifier is exported (starts with an upper-case letter).
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// One parsed source file.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SourceFile {
    /// Path the file was read from.
    pub path: PathBuf,
    /// Gno or Go.
    pub kind: SourceKind,
    /// Name from the package clause.
    pub package_name: String,
    /// Import declarations, in order.
    pub imports: Imports,
    /// Top-level function declarations, in source order.
    pub funcs: Vec<FuncDecl>,
}

/// A directory of Gno and Go sources sharing one import path.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Package {
    /// Import path of the Gno package (`std`, `math/bits`).
    pub gno_import_path: String,
    /// Import path of the Go package implementing it.
    pub go_import_path: String,
    /// Directory the package was read from.
    pub dir: PathBuf,
    /// Gno sources, in walk order.
    pub gno_files: Vec<SourceFile>,
    /// Go sources, in walk order.
    pub go_files: Vec<SourceFile>,
}

impl Package {
    /// Create an empty package.
    pub fn new(
        gno_import_path: impl Into<String>,
        go_import_path: impl Into<String>,
        dir: impl Into<PathBuf>,
    ) -> Self {
        Package {
            gno_import_path: gno_import_path.into(),
            go_import_path: go_import_path.into(),
            dir: dir.into(),
            gno_files: Vec::new(),
            go_files: Vec::new(),
        }
    }

    /// Add a parsed file to the matching side.
    pub fn add_file(&mut self, file: SourceFile) {
        match file.kind {
            SourceKind::Gno => self.gno_files.push(file),
            SourceKind::Go => self.go_files.push(file),
        }
    }

    /// Bodyless Gno functions, in discovery order.
    pub fn bodyless_gno_funcs(&self) -> impl Iterator<Item = (&SourceFile, &FuncDecl)> {
        self.gno_files
            .iter()
            .flat_map(|file| file.funcs.iter().map(move |func| (file, func)))
            .filter(|(_, func)| func.is_bodyless())
    }

    /// Find an exported, receiver-less Go function by name.
    ///
    /// Go function names are unique within a package, so the first hit is
    /// the only one.
    pub fn find_go_func(&self, name: &str) -> Option<(&SourceFile, &FuncDecl)> {
        self.go_files
            .iter()
            .flat_map(|file| file.funcs.iter().map(move |func| (file, func)))
            .find(|(_, func)| !func.is_method() && func.is_exported() && func.name == name)
    }
}

#[cfg(test)]
mod tests;
