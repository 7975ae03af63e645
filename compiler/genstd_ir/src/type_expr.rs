//! Type expression trees.
//!
//! `TypeExpr` captures a parameter or result type exactly as written in
//! source, before any linking. The tree covers every shape the front end can
//! produce in a type position, including shapes the linker refuses:
//!
//! - Supported: identifiers, qualified identifiers, pointers, arrays, slices
//! - Unsupported: maps, funcs, interfaces, structs
//! - Invalid: anything else, including channels, variadics (`...T`) and
//!   expressions rather than types (`1 + 2`)
//!
//! # Display
//!
//! `Display` renders canonical Go syntax: no optional whitespace inside
//! composite types, `; ` between struct fields and interface methods. The
//! rendering is stable, so generated code and test expectations can compare
//! text.

use std::fmt;

/// A parsed type expression, preserving full structure.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeExpr {
    /// A bare identifier: `int`, `Address`.
    Ident(String),

    /// A package-qualified identifier: `crypto.Bech32Address`.
    Qualified {
        /// The file-local import name.
        package: String,
        /// The identifier within that package.
        name: String,
    },

    /// `*T`
    Pointer(Box<TypeExpr>),

    /// `[N]T`
    Array {
        /// The length, as written.
        len: ArrayLen,
        /// Element type.
        elem: Box<TypeExpr>,
    },

    /// `[]T`
    Slice(Box<TypeExpr>),

    /// `map[K]V`
    Map {
        /// Key type.
        key: Box<TypeExpr>,
        /// Value type.
        value: Box<TypeExpr>,
    },

    /// `func(params) results`
    Func(Box<Signature>),

    /// `interface{ ... }`
    Interface(Vec<InterfaceElem>),

    /// `struct{ ... }`
    Struct(Vec<Field>),

    /// `chan T`, `chan<- T`, `<-chan T`
    Chan {
        /// Channel direction.
        dir: ChanDir,
        /// Element type.
        elem: Box<TypeExpr>,
    },

    /// `...T` in a variadic parameter.
    Ellipsis(Box<TypeExpr>),

    /// A literal: `11`, `0x8`, `"s"`.
    BasicLit(String),

    /// A unary expression: `-1`, `!x`.
    Unary {
        /// Operator text.
        op: String,
        /// Operand.
        operand: Box<TypeExpr>,
    },

    /// A binary expression: `1 + 2`.
    Binary {
        /// Operator text.
        op: String,
        /// Left operand.
        lhs: Box<TypeExpr>,
        /// Right operand.
        rhs: Box<TypeExpr>,
    },

    /// `(X)`
    Paren(Box<TypeExpr>),

    /// `X[A, B]`: generic instantiation or an index expression.
    Index {
        /// The indexed expression.
        base: Box<TypeExpr>,
        /// Index arguments.
        args: Vec<TypeExpr>,
    },
}

/// Array length as written in source.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArrayLen {
    /// A literal length, text kept verbatim (`8`, `0x8`, `010`).
    Literal(String),
    /// Any other length expression: `(11)`, `N`, `2 * N`.
    Expr(Box<TypeExpr>),
    /// `...` in a composite literal type: `[...]int`.
    Inferred,
}

/// Channel direction.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// A single parameter, result, or struct field.
///
/// Lists are flattened: `a, b int` becomes two fields with the same type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Field {
    /// Declared name, `None` for unnamed parameters and embedded fields.
    pub name: Option<String>,
    /// Declared type.
    pub ty: TypeExpr,
}

/// Parameter and result lists of a function or func type.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Signature {
    /// Parameters, one entry per declared name.
    pub params: Vec<Field>,
    /// Results, one entry per declared name.
    pub results: Vec<Field>,
}

/// An element of an interface type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum InterfaceElem {
    /// A method: `S() map[int]Banker`.
    Method {
        /// Method name.
        name: String,
        /// Method signature.
        sig: Signature,
    },
    /// An embedded interface or type constraint.
    Embed(TypeExpr),
}

/// Classification of a type expression for the linker.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeShape {
    /// Identifiers, qualified identifiers, pointers, arrays and slices.
    Supported,
    /// A legal type the linker does not handle.
    Unsupported,
    /// Not a type expression at all.
    Invalid,
}

impl TypeExpr {
    /// Create an identifier.
    #[inline]
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(name.into())
    }

    /// Create a qualified identifier.
    #[inline]
    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Create a pointer type.
    #[inline]
    pub fn pointer(elem: TypeExpr) -> Self {
        TypeExpr::Pointer(Box::new(elem))
    }

    /// Create an array type with a literal length.
    #[inline]
    pub fn array(len: impl Into<String>, elem: TypeExpr) -> Self {
        TypeExpr::Array {
            len: ArrayLen::Literal(len.into()),
            elem: Box::new(elem),
        }
    }

    /// Create a slice type.
    #[inline]
    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice(Box::new(elem))
    }

    /// Create a map type.
    #[inline]
    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Classify this node (not its children).
    pub fn shape(&self) -> TypeShape {
        match self {
            TypeExpr::Ident(_)
            | TypeExpr::Qualified { .. }
            | TypeExpr::Pointer(_)
            | TypeExpr::Array { .. }
            | TypeExpr::Slice(_) => TypeShape::Supported,
            TypeExpr::Map { .. }
            | TypeExpr::Func(_)
            | TypeExpr::Interface(_)
            | TypeExpr::Struct(_) => TypeShape::Unsupported,
            TypeExpr::Chan { .. }
            | TypeExpr::Ellipsis(_)
            | TypeExpr::BasicLit(_)
            | TypeExpr::Unary { .. }
            | TypeExpr::Binary { .. }
            | TypeExpr::Paren(_)
            | TypeExpr::Index { .. } => TypeShape::Invalid,
        }
    }

    /// Human-readable name of this node's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeExpr::Ident(_) => "identifier",
            TypeExpr::Qualified { .. } => "qualified identifier",
            TypeExpr::Pointer(_) => "pointer type",
            TypeExpr::Array { .. } => "array type",
            TypeExpr::Slice(_) => "slice type",
            TypeExpr::Map { .. } => "map type",
            TypeExpr::Func(_) => "func type",
            TypeExpr::Interface(_) => "interface type",
            TypeExpr::Struct(_) => "struct type",
            TypeExpr::Chan { .. } => "channel type",
            TypeExpr::Ellipsis(_) => "variadic parameter",
            TypeExpr::BasicLit(_) => "literal",
            TypeExpr::Unary { .. } => "unary expression",
            TypeExpr::Binary { .. } => "binary expression",
            TypeExpr::Paren(_) => "parenthesized expression",
            TypeExpr::Index { .. } => "index expression",
        }
    }
}

impl Field {
    /// Create an unnamed field.
    pub fn unnamed(ty: TypeExpr) -> Self {
        Field { name: None, ty }
    }

    /// Create a named field.
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Field {
            name: Some(name.into()),
            ty,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Ident(name) | TypeExpr::BasicLit(name) => f.write_str(name),
            TypeExpr::Qualified { package, name } => write!(f, "{package}.{name}"),
            TypeExpr::Pointer(elem) => write!(f, "*{elem}"),
            TypeExpr::Array { len, elem } => write!(f, "[{len}]{elem}"),
            TypeExpr::Slice(elem) => write!(f, "[]{elem}"),
            TypeExpr::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeExpr::Func(sig) => write!(f, "func{sig}"),
            TypeExpr::Interface(elems) => {
                f.write_str("interface{")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    match elem {
                        InterfaceElem::Method { name, sig } => write!(f, "{name}{sig}")?,
                        InterfaceElem::Embed(ty) => write!(f, "{ty}")?,
                    }
                }
                f.write_str("}")
            }
            TypeExpr::Struct(fields) => {
                f.write_str("struct{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str("}")
            }
            TypeExpr::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {elem}"),
                ChanDir::Send => write!(f, "chan<- {elem}"),
                ChanDir::Recv => write!(f, "<-chan {elem}"),
            },
            TypeExpr::Ellipsis(elem) => write!(f, "...{elem}"),
            TypeExpr::Unary { op, operand } => write!(f, "{op}{operand}"),
            TypeExpr::Binary { op, lhs, rhs } => write!(f, "{lhs} {op} {rhs}"),
            TypeExpr::Paren(inner) => write!(f, "({inner})"),
            TypeExpr::Index { base, args } => {
                write!(f, "{base}[")?;
                write_list(f, args)?;
                f.write_str("]")
            }
        }
    }
}

impl fmt::Display for ArrayLen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayLen::Literal(text) => f.write_str(text),
            ArrayLen::Expr(expr) => write!(f, "{expr}"),
            ArrayLen::Inferred => f.write_str("..."),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} {}", self.ty),
            None => write!(f, "{}", self.ty),
        }
    }
}

/// Renders `(params) results` without the leading `func` keyword, so the
/// same code serves func types and interface methods.
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_list(f, &self.params)?;
        f.write_str(")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [Field { name: None, ty }] => write!(f, " {ty}"),
            results => {
                f.write_str(" (")?;
                write_list(f, results)?;
                f.write_str(")")
            }
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
