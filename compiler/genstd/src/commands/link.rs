//! The `link` command: walk the tree, link every package, print the result.

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use genstd_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use genstd_link::{LinkedTypeRegistry, Linker, LinkerConfig, MappingSet};

use crate::config::{Options, OutputMode};
use crate::walk::walk_stdlibs;
use crate::Error;

/// Walk `options.root` and link every package below it.
pub fn link_stdlibs(options: &Options) -> Result<MappingSet, Error> {
    let packages = walk_stdlibs(&options.root, &options.module_prefix)?;
    let registry = LinkedTypeRegistry::stdlibs();
    let config = LinkerConfig::default();
    let mappings = Linker::new(&registry, &config).link(&packages)?;
    tracing::info!(
        packages = packages.len(),
        mappings = mappings.len(),
        "link complete"
    );
    Ok(MappingSet::new(mappings))
}

/// Print mappings in the requested format.
///
/// The listing groups mappings by Gno package and ends with the Go imports
/// the generated code needs.
pub fn write_mappings(set: &MappingSet, mode: OutputMode, out: &mut impl Write) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, set)?;
            writeln!(out)
        }
        OutputMode::Listing => {
            for (package, mappings) in set.by_package() {
                writeln!(out, "package {package}")?;
                for mapping in mappings {
                    writeln!(out, "  {mapping}")?;
                }
            }
            let imports = set.imports();
            if !imports.is_empty() {
                writeln!(out, "imports")?;
                for (ident, path) in imports {
                    writeln!(out, "  {ident} {path:?}")?;
                }
            }
            Ok(())
        }
    }
}

/// Emit `err` through `emitter`, with the source of every labelled file
/// loaded so locations render as line and column.
pub fn report_error<W: Write>(err: &Error, emitter: &mut TerminalEmitter<W>) {
    let diagnostic = err.to_diagnostic();
    for path in diagnostic.labels.iter().filter_map(|label| label.path.as_deref()) {
        match fs::read_to_string(path) {
            Ok(source) => emitter.add_source(path, source),
            Err(error) => tracing::debug!(path, %error, "source unavailable for diagnostic"),
        }
    }
    emitter.emit(&diagnostic);
    emitter.flush();
}

/// Run `genstd link`. On failure the diagnostic goes to stderr and nothing
/// is printed on stdout.
pub fn run_link(options: &Options) -> ExitCode {
    let set = match link_stdlibs(options) {
        Ok(set) => set,
        Err(err) => {
            let mut emitter = TerminalEmitter::stderr(options.color, io::stderr().is_terminal());
            report_error(&err, &mut emitter);
            return ExitCode::FAILURE;
        }
    };

    let mut rendered = Vec::new();
    let written = write_mappings(&set, options.output, &mut rendered)
        .and_then(|()| io::stdout().lock().write_all(&rendered));
    if let Err(err) = written {
        eprintln!("error: cannot write mappings: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
