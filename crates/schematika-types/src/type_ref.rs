//! `TypeRef` — a type that may not be resolved yet (§3).
//!
//! Grounded on `xo-expression2/src/expression2/TypeRef.cpp`: a `TypeRef`
//! always carries a unique name (used to seed unification variables before
//! a `TypeDescr` is known) and optionally a resolved `TypeDescr`. Once a
//! `TypeDescr` is attached the unique name is no longer load-bearing, but it
//! stays around for diagnostics.

use std::cell::Cell;

use crate::TypeDescr;

thread_local! {
    static UNIQUE_COUNTER: Cell<u32> = Cell::new(0);
}

/// A possibly-unresolved type reference.
///
/// Mirrors `TypeRef::dwim` / `TypeRef::generate_unique` / `TypeRef::is_concrete`
/// from the original reader: when a binding's declared type is absent, the
/// parser manufactures a `TypeRef` with a generated name (`"if:7"`,
/// `"lambda:3"`) so that type inference has something to unify against.
#[derive(Clone, Debug)]
pub struct TypeRef {
    name: String,
    resolved: Option<TypeDescr>,
}

impl TypeRef {
    /// A `TypeRef` that is already resolved — `dwim` when a `TypeDescr` is
    /// on hand and no placeholder name is needed.
    pub fn resolved(td: TypeDescr) -> Self {
        Self { name: td.name(), resolved: Some(td) }
    }

    /// A `TypeRef` with only a name, not yet resolved to a `TypeDescr`.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self { name: name.into(), resolved: None }
    }

    /// `TypeRef::dwim` — use `td` directly if present, otherwise synthesize
    /// a placeholder name from `prefix` via [`Self::generate_unique`].
    pub fn dwim(prefix: &str, td: Option<TypeDescr>) -> Self {
        match td {
            Some(td) => Self::resolved(td),
            None => Self::generate_unique(prefix),
        }
    }

    /// Mint a fresh placeholder name like `"if:7"` or `"lambda:3"`.
    pub fn generate_unique(prefix: &str) -> Self {
        let n = UNIQUE_COUNTER.with(|c| {
            let v = c.get();
            c.set(v + 1);
            v
        });
        Self { name: format!("{prefix}:{n}"), resolved: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_concrete(&self) -> bool {
        self.resolved.is_some()
    }

    pub fn type_descr(&self) -> Option<TypeDescr> {
        self.resolved
    }

    /// Attach a resolved `TypeDescr`, as inference binds this placeholder.
    pub fn resolve(&mut self, td: TypeDescr) {
        self.resolved = Some(td);
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Primitive;

    #[test]
    fn dwim_with_descr_is_concrete() {
        let td = TypeDescr::require_primitive(Primitive::I32);
        let tr = TypeRef::dwim("x", Some(td));
        assert!(tr.is_concrete());
        assert_eq!(tr.type_descr(), Some(td));
    }

    #[test]
    fn dwim_without_descr_generates_name() {
        let tr = TypeRef::dwim("if", None);
        assert!(!tr.is_concrete());
        assert!(tr.name().starts_with("if:"));
    }

    #[test]
    fn generate_unique_names_differ() {
        let a = TypeRef::generate_unique("lambda");
        let b = TypeRef::generate_unique("lambda");
        assert_ne!(a.name(), b.name());
    }

    #[test]
    fn resolve_makes_concrete() {
        let mut tr = TypeRef::unresolved("let1:0");
        assert!(!tr.is_concrete());
        tr.resolve(TypeDescr::require_primitive(Primitive::Bool));
        assert!(tr.is_concrete());
    }
}
