//! Signature matching.
//!
//! For every bodyless Gno function, the linker finds the Go function that
//! implements it and checks that the two signatures agree position by
//! position, modulo two interpreter conventions on the Go side:
//!
//! - a leading `*gnolang.Machine` parameter gives the implementation access
//!   to the interpreter and has no Gno counterpart;
//! - a `gnolang.TypedValue` parameter or result receives the Gno value boxed,
//!   whatever its Gno type.

mod config;
mod error;

pub use config::LinkerConfig;
pub use error::{FuncRef, LinkError, MismatchReason, Slot};

use genstd_ir::{Field, FuncDecl, Imports, Package, SourceFile, TypeExpr};

use crate::unify::{Side, Unifier};
use crate::{LinkedTypeRegistry, Mapping, MappingType};

/// Links Gno declarations to Go implementations.
pub struct Linker<'a> {
    registry: &'a LinkedTypeRegistry,
    config: &'a LinkerConfig,
}

impl<'a> Linker<'a> {
    pub fn new(registry: &'a LinkedTypeRegistry, config: &'a LinkerConfig) -> Self {
        Linker { registry, config }
    }

    /// Link every bodyless Gno function in `packages`.
    ///
    /// Mappings come out in discovery order: packages in the given order,
    /// then Gno files, then declarations in source order. The first error
    /// aborts the run.
    #[tracing::instrument(level = "debug", skip_all, fields(packages = packages.len()))]
    pub fn link(&self, packages: &[Package]) -> Result<Vec<Mapping>, LinkError> {
        let mut mappings = Vec::new();
        for package in packages {
            for (file, func) in package.bodyless_gno_funcs() {
                let mapping = self.link_func(package, file, func)?;
                tracing::debug!(%mapping, "linked");
                mappings.push(mapping);
            }
        }
        Ok(mappings)
    }

    fn link_func(
        &self,
        package: &Package,
        gno_file: &SourceFile,
        gno_func: &FuncDecl,
    ) -> Result<Mapping, LinkError> {
        let gno_ref = func_ref(&package.gno_import_path, gno_file, gno_func);
        let go_name = self.config.go_name_for(&gno_func.name);

        let Some((go_file, go_func)) = package.find_go_func(&go_name) else {
            return Err(LinkError::Unresolved {
                gno: gno_ref,
                go_name,
            });
        };
        let go_ref = func_ref(&package.go_import_path, go_file, go_func);

        if gno_func.has_type_params {
            return Err(LinkError::Generic { func: gno_ref });
        }
        if go_func.has_type_params {
            return Err(LinkError::Generic { func: go_ref });
        }

        let mut go_params = go_func.signature.params.as_slice();
        let needs_context = go_params
            .first()
            .is_some_and(|p| self.is_context_param(&p.ty, &go_file.imports));
        if needs_context {
            go_params = &go_params[1..];
        }

        let gno_sig = &gno_func.signature;
        let arity = |what, gno: &[Field], go: &[Field]| {
            (gno.len() != go.len()).then(|| MismatchReason::Arity {
                what,
                gno: gno.len(),
                go: go.len(),
            })
        };
        if let Some(reason) = arity("parameters", &gno_sig.params, go_params)
            .or_else(|| arity("results", &gno_sig.results, &go_func.signature.results))
        {
            return Err(LinkError::SignatureMismatch {
                gno: gno_ref,
                go: go_ref,
                reason,
            });
        }

        let unifier = Unifier::new(
            self.registry,
            Side::new(&package.gno_import_path, &gno_file.imports),
            Side::new(&package.go_import_path, &go_file.imports),
        );
        let link_slots = |gno: &[Field], go: &[Field], slot: fn(usize) -> Slot| {
            gno.iter()
                .zip(go)
                .enumerate()
                .map(|(i, (gno_field, go_field))| {
                    self.link_slot(&unifier, package, go_file, gno_field, go_field)
                        .map_err(|error| slot_error(&gno_ref, &go_ref, slot(i), error))
                })
                .collect::<Result<Vec<_>, _>>()
        };
        let params = link_slots(&gno_sig.params, go_params, Slot::Param)?;
        let results = link_slots(&gno_sig.results, &go_func.signature.results, Slot::Result)?;

        Ok(Mapping::new(
            package.gno_import_path.as_str(),
            gno_func.name.as_str(),
            package.go_import_path.as_str(),
            go_func.name.as_str(),
            needs_context,
            params,
            results,
            self.config.interpreter_package.as_str(),
        ))
    }

    fn link_slot(
        &self,
        unifier: &Unifier<'_>,
        package: &Package,
        go_file: &SourceFile,
        gno: &Field,
        go: &Field,
    ) -> Result<MappingType, crate::MergeError> {
        if self.is_interpreter_type(&go.ty, &self.config.boxed_type, &go_file.imports) {
            return Ok(MappingType::boxed(
                gno.ty.clone(),
                self.config.interpreter_package.as_str(),
                self.config.boxed_type.as_str(),
                package.go_import_path.as_str(),
            ));
        }
        let merged = unifier.merge(&gno.ty, &go.ty)?;
        Ok(MappingType::merged(
            gno.ty.clone(),
            merged,
            package.go_import_path.as_str(),
        ))
    }

    /// `*<interpreter>.Machine`
    fn is_context_param(&self, ty: &TypeExpr, imports: &Imports) -> bool {
        matches!(ty, TypeExpr::Pointer(elem)
            if self.is_interpreter_type(elem, &self.config.context_type, imports))
    }

    /// `<alias>.<name>` where `alias` imports the interpreter package.
    fn is_interpreter_type(&self, ty: &TypeExpr, name: &str, imports: &Imports) -> bool {
        match ty {
            TypeExpr::Qualified {
                package,
                name: type_name,
            } => {
                type_name == name
                    && imports.resolve(package) == Some(self.config.interpreter_package.as_str())
            }
            _ => false,
        }
    }
}

fn func_ref(package: &str, file: &SourceFile, func: &FuncDecl) -> FuncRef {
    FuncRef {
        package: package.to_owned(),
        name: func.name.clone(),
        path: file.path.clone(),
        span: func.span,
    }
}

/// A type mismatch is a signature mismatch; refusals keep their own kind.
fn slot_error(gno: &FuncRef, go: &FuncRef, slot: Slot, error: crate::MergeError) -> LinkError {
    if error.is_mismatch() {
        LinkError::SignatureMismatch {
            gno: gno.clone(),
            go: go.clone(),
            reason: MismatchReason::Type { slot, error },
        }
    } else {
        LinkError::Merge {
            gno: gno.clone(),
            go: go.clone(),
            slot,
            error,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
