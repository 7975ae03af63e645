//! Command-line options for `genstd link`.

use std::fmt;
use std::path::PathBuf;

use genstd_diagnostic::emitter::ColorMode;

/// Go module the standard library packages live under.
pub const DEFAULT_MODULE_PREFIX: &str = "github.com/gnolang/gno/gnovm/stdlibs";

/// How mappings are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// One line per mapping, grouped by package.
    #[default]
    Listing,
    /// A JSON array of mapping records.
    Json,
}

/// Options for a link run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Root of the standard library tree.
    pub root: PathBuf,
    /// Prefix joined with a package's Gno import path to form its Go
    /// import path.
    pub module_prefix: String,
    pub output: OutputMode,
    pub color: ColorMode,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            root: PathBuf::from("."),
            module_prefix: DEFAULT_MODULE_PREFIX.to_owned(),
            output: OutputMode::default(),
            color: ColorMode::default(),
        }
    }
}

impl Options {
    /// Parse the arguments following `genstd link`.
    ///
    /// Flags may appear before or after the directory.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, OptionsError> {
        let mut options = Options::default();
        let mut root: Option<PathBuf> = None;

        for arg in args.iter().map(AsRef::as_ref) {
            if let Some(prefix) = arg.strip_prefix("--module=") {
                if prefix.is_empty() {
                    return Err(OptionsError::EmptyModule);
                }
                options.module_prefix = prefix.trim_end_matches('/').to_owned();
            } else if arg == "--json" {
                options.output = OutputMode::Json;
            } else if let Some(mode) = arg.strip_prefix("--color=") {
                options.color =
                    ColorMode::parse(mode).ok_or_else(|| OptionsError::InvalidColor(mode.to_owned()))?;
            } else if arg.starts_with('-') {
                return Err(OptionsError::UnknownFlag(arg.to_owned()));
            } else if root.is_none() {
                root = Some(PathBuf::from(arg));
            } else {
                return Err(OptionsError::UnexpectedArgument(arg.to_owned()));
            }
        }

        if let Some(root) = root {
            options.root = root;
        }
        Ok(options)
    }
}

/// Invalid `genstd link` arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionsError {
    UnknownFlag(String),
    InvalidColor(String),
    EmptyModule,
    UnexpectedArgument(String),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::UnknownFlag(flag) => write!(f, "unknown option '{flag}'"),
            OptionsError::InvalidColor(mode) => write!(
                f,
                "invalid color mode '{mode}' (expected auto, always or never)"
            ),
            OptionsError::EmptyModule => f.write_str("--module needs a non-empty import path"),
            OptionsError::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument '{arg}': only one directory is accepted")
            }
        }
    }
}

impl std::error::Error for OptionsError {}
