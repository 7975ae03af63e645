//! Linker configuration.

/// Names the linker treats specially on the Go side.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinkerConfig {
    /// Import path of the interpreter package.
    pub interpreter_package: String,
    /// Interpreter type whose pointer, as the first Go parameter, gives the
    /// implementation access to the running machine.
    pub context_type: String,
    /// Interpreter type carrying a boxed value of any Gno type.
    pub boxed_type: String,
    /// Prefix turning an unexported Gno name into an exported Go name.
    pub unexported_prefix: String,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        LinkerConfig {
            interpreter_package: "github.com/gnolang/gno/gnovm/pkg/gnolang".to_owned(),
            context_type: "Machine".to_owned(),
            boxed_type: "TypedValue".to_owned(),
            unexported_prefix: "X_".to_owned(),
        }
    }
}

impl LinkerConfig {
    /// The Go function name implementing a Gno function.
    ///
    /// Exported names carry over; unexported ones get the prefix, since Go
    /// only links exported functions across packages.
    pub fn go_name_for(&self, gno_name: &str) -> String {
        if genstd_ir::is_exported(gno_name) {
            gno_name.to_owned()
        } else {
            format!("{}{gno_name}", self.unexported_prefix)
        }
    }
}
