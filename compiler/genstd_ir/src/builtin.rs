/// Go's predeclared type identifiers.
///
/// These are the only bare identifiers that mean the same thing in every
/// package, so they can cross a package boundary unqualified.
const PREDECLARED_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

/// Check whether `name` is a predeclared type identifier.
pub fn is_predeclared_type(name: &str) -> bool {
    PREDECLARED_TYPES.contains(&name)
}
