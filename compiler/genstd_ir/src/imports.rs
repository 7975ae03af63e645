//! File-scoped import tables.
//!
//! Qualified identifiers in a type expression name a package through the
//! importing file's local alias. `Imports` maps those aliases back to full
//! import paths so the linker can compare packages by path, never by alias.

/// A single import declaration: `import alias "path"`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ImportSpec {
    /// Explicit alias: an identifier, `.` or `_`.
    pub name: Option<String>,
    /// The import path, without quotes.
    pub path: String,
}

impl ImportSpec {
    /// Create an import without an alias.
    pub fn new(path: impl Into<String>) -> Self {
        ImportSpec {
            name: None,
            path: path.into(),
        }
    }

    /// Create an aliased import.
    pub fn aliased(name: impl Into<String>, path: impl Into<String>) -> Self {
        ImportSpec {
            name: Some(name.into()),
            path: path.into(),
        }
    }

    /// The identifier this import binds in the file.
    ///
    /// Without an explicit alias this is the last path segment, which is the
    /// package name for every package the stdlibs import.
    pub fn local_name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => self.path.rsplit('/').next().unwrap_or(&self.path),
        }
    }

    /// Whether this import binds a usable qualifier (not `.` or `_`).
    pub fn binds_name(&self) -> bool {
        !matches!(self.name.as_deref(), Some("." | "_"))
    }
}

/// Ordered import table of one source file.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Imports {
    specs: Vec<ImportSpec>,
}

impl Imports {
    /// Create an empty import table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an import declaration.
    pub fn push(&mut self, spec: ImportSpec) {
        self.specs.push(spec);
    }

    /// Resolve a file-local qualifier to its import path.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.specs
            .iter()
            .find(|spec| spec.binds_name() && spec.local_name() == alias)
            .map(|spec| spec.path.as_str())
    }

    /// Iterate over imports in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ImportSpec> {
        self.specs.iter()
    }

    /// Number of import declarations.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Check if there are no imports.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl FromIterator<ImportSpec> for Imports {
    fn from_iter<I: IntoIterator<Item = ImportSpec>>(iter: I) -> Self {
        Imports {
            specs: iter.into_iter().collect(),
        }
    }
}
