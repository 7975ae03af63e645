//! Standard library discovery.
//!
//! Every directory below the root that holds at least one `.gno` or `.go`
//! source becomes one package. Its Gno import path is the directory relative
//! to the root (`math/bits`); its Go import path is that path under the
//! module prefix. Test files and generated Go files are not part of a
//! package's declarations and are skipped.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use genstd_diagnostic::{Diagnostic, ErrorCode};
use genstd_ir::{Package, SourceFile, SourceKind};
use genstd_parse::{parse_file, ParseError};

/// Suffixes of files that never carry linkable declarations.
const SKIPPED_SUFFIXES: &[&str] = &["_test.gno", "_filetest.gno", "_test.go", ".gen.go"];

/// Directories never descended into, besides hidden ones.
const SKIPPED_DIRS: &[&str] = &["target"];

/// Walk `root` and parse every package below it.
///
/// Packages come out sorted by Gno import path; files within a package are
/// read in file name order. Files directly in `root` belong to no package
/// and are ignored.
#[tracing::instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub fn walk_stdlibs(root: &Path, module_prefix: &str) -> Result<Vec<Package>, WalkError> {
    let mut packages = Vec::new();
    let (files, dirs) = read_dir_sorted(root)?;
    if !files.is_empty() {
        tracing::debug!(count = files.len(), "ignoring files at the root");
    }
    for dir in dirs {
        visit(root, &dir, module_prefix, &mut packages)?;
    }
    packages.sort_by(|a, b| a.gno_import_path.cmp(&b.gno_import_path));
    tracing::debug!(packages = packages.len(), "walk complete");
    Ok(packages)
}

fn visit(
    root: &Path,
    dir: &Path,
    module_prefix: &str,
    packages: &mut Vec<Package>,
) -> Result<(), WalkError> {
    let (files, subdirs) = read_dir_sorted(dir)?;

    let sources: Vec<PathBuf> = files
        .into_iter()
        .filter(|path| is_package_source(path))
        .collect();
    if !sources.is_empty() {
        packages.push(read_package(root, dir, module_prefix, &sources)?);
    }

    for subdir in subdirs {
        visit(root, &subdir, module_prefix, packages)?;
    }
    Ok(())
}

fn read_package(
    root: &Path,
    dir: &Path,
    module_prefix: &str,
    sources: &[PathBuf],
) -> Result<Package, WalkError> {
    let gno_import_path = import_path(root, dir);
    let go_import_path = if module_prefix.is_empty() {
        gno_import_path.clone()
    } else {
        format!("{module_prefix}/{gno_import_path}")
    };
    let mut package = Package::new(gno_import_path, go_import_path, dir);

    for path in sources {
        let source = fs::read_to_string(path).map_err(|source| WalkError::Io {
            path: path.clone(),
            source,
        })?;
        let file = parse_file(path, &source).map_err(|error| WalkError::Parse {
            path: path.clone(),
            error,
        })?;
        check_package_name(&package, &file)?;
        package.add_file(file);
    }

    tracing::debug!(
        package = %package.gno_import_path,
        gno_files = package.gno_files.len(),
        go_files = package.go_files.len(),
        "read package"
    );
    Ok(package)
}

/// All files of one kind in a directory share a package name.
fn check_package_name(package: &Package, file: &SourceFile) -> Result<(), WalkError> {
    let siblings = match file.kind {
        SourceKind::Gno => &package.gno_files,
        SourceKind::Go => &package.go_files,
    };
    match siblings.first() {
        Some(first) if first.package_name != file.package_name => Err(WalkError::MixedPackages {
            kind: file.kind,
            first: first.path.clone(),
            first_name: first.package_name.clone(),
            path: file.path.clone(),
            name: file.package_name.clone(),
        }),
        _ => Ok(()),
    }
}

/// Whether a file is a `.gno` or `.go` source that declares package members.
fn is_package_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        tracing::warn!(path = %path.display(), "skipping file with non-UTF-8 name");
        return false;
    };
    if !(name.ends_with(".gno") || name.ends_with(".go")) {
        return false;
    }
    if SKIPPED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        tracing::trace!(file = name, "skipping test or generated file");
        return false;
    }
    true
}

/// `dir` relative to `root`, `/`-separated.
fn import_path(root: &Path, dir: &Path) -> String {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Files and walkable subdirectories of `dir`, each sorted by name.
fn read_dir_sorted(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>), WalkError> {
    let io_err = |source| WalkError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let path = entry.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            continue;
        }
        if entry.file_type().map_err(io_err)?.is_dir() {
            let skipped = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| SKIPPED_DIRS.contains(&n));
            if !skipped {
                dirs.push(path);
            }
        } else {
            files.push(path);
        }
    }

    files.sort();
    dirs.sort();
    Ok((files, dirs))
}

/// Failure while discovering or reading packages.
#[derive(Debug)]
pub enum WalkError {
    /// A directory or file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// A source file did not parse.
    Parse { path: PathBuf, error: ParseError },
    /// Two files of the same kind in one directory disagree on the package.
    MixedPackages {
        kind: SourceKind,
        first: PathBuf,
        first_name: String,
        path: PathBuf,
        name: String,
    },
}

impl WalkError {
    pub fn code(&self) -> ErrorCode {
        match self {
            WalkError::Io { .. } => ErrorCode::E3001,
            WalkError::Parse { error, .. } => error.code(),
            WalkError::MixedPackages { .. } => ErrorCode::E3002,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            WalkError::Io { path, .. } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_note(format!("while reading {}", path.display())),
            WalkError::Parse { path, error } => {
                error.to_diagnostic(Some(&path.display().to_string()))
            }
            WalkError::MixedPackages {
                first, first_name, ..
            } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_note(format!(
                    "{} declares package {first_name}",
                    first.display()
                )),
        }
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            WalkError::Parse { path, error } => write!(f, "{}: {error}", path.display()),
            WalkError::MixedPackages {
                kind,
                first_name,
                path,
                name,
                ..
            } => write!(
                f,
                "{} declares package {name}, but other .{} files in its directory declare package {first_name}",
                path.display(),
                kind.extension()
            ),
        }
    }
}

impl std::error::Error for WalkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WalkError::Io { source, .. } => Some(source),
            WalkError::Parse { error, .. } => Some(error),
            WalkError::MixedPackages { .. } => None,
        }
    }
}
