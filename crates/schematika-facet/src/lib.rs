//! Facet registry (§4.A) — polymorphic dispatch without a class hierarchy.
//!
//! Grounded on `xo-expression2/include/xo/expression2/detail/AExpression.hpp`:
//! the original toolkit pairs an abstract facet (`AExpression`) with a
//! per-concrete-type implementation (`IExpression_DConstant`, ...) selected
//! at runtime by a `typeseq` — a small integer RTTI tag. Rust has no
//! `dynamic_cast`-style facility to lean on, so the registry below reproduces
//! the same shape with `std::any::TypeId` standing in for `typeseq` and a
//! `HashMap<(facet tag, TypeId), Box<dyn Any>>` standing in for the
//! generated `IFacet_DRepr` dispatch tables.

mod error;

pub use error::{FacetError, FacetResult};

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::OnceLock;

/// One of the facets an AST/runtime value may implement (§4.A, §4.E).
///
/// `Expression` carries `typeref`/`valuetype`/`assign_valuetype`;
/// `Printable` carries pretty-printing; `GcObject` carries tracing;
/// `SymbolTable` carries the `Local`/`Global` binding-resolution contract
/// shared by §4.F.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FacetTag {
    Expression,
    Printable,
    GcObject,
    SymbolTable,
}

/// Type-erased implementation of one facet for one concrete representation.
///
/// Concrete crates implement a trait (e.g. `Expression`, `Printable`) for
/// their representation type, box it, and register it once at startup; the
/// registry only knows how to get it back out as `&dyn Any`.
type VTable = Box<dyn Any + Send + Sync>;

#[derive(Default)]
struct Registry {
    table: RefCell<HashMap<(FacetTag, TypeId), VTable>>,
}

/// Process-wide facet dispatch table.
///
/// Registration happens once, at or before first use (mirroring the
/// original's static facet-specialization pattern); after that every lookup
/// is a read. The VM has one mutator thread (§5), so a `RefCell` behind a
/// `OnceLock` is sufficient — no atomics, no `Mutex`.
pub struct FacetRegistry {
    inner: Registry,
}

static GLOBAL: OnceLock<FacetRegistry> = OnceLock::new();

impl FacetRegistry {
    fn new() -> Self {
        Self { inner: Registry::default() }
    }

    /// The single process-wide registry (§4.A: "a single process-wide
    /// registry, initialized once at startup").
    pub fn global() -> &'static FacetRegistry {
        GLOBAL.get_or_init(FacetRegistry::new)
    }

    /// Register `vtable` as the implementation of `facet` for representation
    /// type `R`. Write-once: registering the same `(facet, R)` pair twice is
    /// a logic error (§4.A invariant) and returns `AlreadyRegistered`.
    pub fn register<R: 'static>(&self, facet: FacetTag, vtable: VTable) -> FacetResult<()> {
        let key = (facet, TypeId::of::<R>());
        let mut table = self.inner.table.borrow_mut();
        if table.contains_key(&key) {
            return Err(FacetError::AlreadyRegistered { facet: format!("{facet:?}") });
        }
        table.insert(key, vtable);
        tracing::trace!("registered {facet:?} for {}", std::any::type_name::<R>());
        Ok(())
    }

    /// Look up the implementation of `facet` for representation type `R`,
    /// downcast to `V`.
    pub fn lookup<R: 'static, V: 'static>(&self, facet: FacetTag) -> FacetResult<&V> {
        let table = self.inner.table.borrow();
        let vtable = table
            .get(&(facet, TypeId::of::<R>()))
            .ok_or(FacetError::NoSuchFacet { facet: format!("{facet:?}") })?;
        let v = vtable
            .downcast_ref::<V>()
            .ok_or(FacetError::DowncastFailed { facet: format!("{facet:?}") })?;
        // SAFETY: the vtable outlives the registry (it is never removed),
        // and the registry itself is 'static, so this reference is sound to
        // hand back detached from the `Ref` guard.
        Ok(unsafe { std::mem::transmute::<&V, &'static V>(v) })
    }

    /// `variant<F2>()` in the original: given you hold one facet of a
    /// representation, fetch a different facet of the *same* representation
    /// without re-deriving the `TypeId` by hand.
    pub fn variant<R: 'static, V: 'static>(&self, facet: FacetTag) -> FacetResult<&V> {
        self.lookup::<R, V>(facet)
    }

    pub fn is_registered<R: 'static>(&self, facet: FacetTag) -> bool {
        self.inner.table.borrow().contains_key(&(facet, TypeId::of::<R>()))
    }
}
