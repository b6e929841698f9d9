//! Type descriptor table (§4.B) — interns canonical, structurally-keyed
//! descriptions of every value type reachable in a Schematika program.
//!
//! Grounded on the same interning discipline as [`schematika_util::symbol`]:
//! a `TypeDescr` is a small `Copy` handle into a process-wide table, and two
//! handles compare equal iff their keys were structurally identical at
//! intern time. Unlike the symbol pool, the type table also answers
//! structural queries (is this a function type? what's its return type?).

mod error;
pub mod primitive_ops;
mod type_ref;

pub use error::{TypesError, TypesResult};
pub use type_ref::TypeRef;

use std::cell::RefCell;
use std::fmt;

/// The eight primitive value types named in §4.B / §4.G.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Bool,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    Unit,
}

impl Primitive {
    pub const ALL: [Primitive; 8] = [
        Primitive::Bool,
        Primitive::I16,
        Primitive::I32,
        Primitive::I64,
        Primitive::F32,
        Primitive::F64,
        Primitive::String,
        Primitive::Unit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::F32 => "f32",
            Primitive::F64 => "f64",
            Primitive::String => "string",
            Primitive::Unit => "unit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// True for `i16, i32, i64, f32, f64` — the types the widening-conversion
    /// rules in §4.E.1 operate over.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Primitive::I16 | Primitive::I32 | Primitive::I64 | Primitive::F32 | Primitive::F64
        )
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Primitive::I16 | Primitive::I32 | Primitive::I64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Primitive::F32 | Primitive::F64)
    }

    /// Implicit-widening rank: a lower rank may be implicitly widened to a
    /// strictly higher rank of the same numeric kind, per §4.E.1.
    /// Cross-kind widening (e.g. any integer to any float) is allowed too;
    /// `can_widen_to` is the authority, this is just the ordering within
    /// each kind.
    fn int_rank(self) -> Option<u8> {
        match self {
            Primitive::I16 => Some(0),
            Primitive::I32 => Some(1),
            Primitive::I64 => Some(2),
            _ => None,
        }
    }

    fn float_rank(self) -> Option<u8> {
        match self {
            Primitive::F32 => Some(0),
            Primitive::F64 => Some(1),
            _ => None,
        }
    }

    /// Is an implicit `Convert` from `self` to `dest` permitted (§4.E.1)?
    pub fn can_widen_to(self, dest: Primitive) -> bool {
        if self == dest {
            return true;
        }
        match (self.int_rank(), dest.int_rank()) {
            (Some(a), Some(b)) if a < b => return true,
            _ => {}
        }
        match (self.float_rank(), dest.float_rank()) {
            (Some(a), Some(b)) if a < b => return true,
            _ => {}
        }
        // integer -> float is always a widening, regardless of bit width
        if self.is_integer() && dest.is_float() {
            return true;
        }
        false
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Structural identity key for a [`TypeDescr`]. Two descriptors intern to
/// the same handle iff their keys are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum TypeKey {
    Primitive(Primitive),
    Function { ret: TypeDescr, args: Vec<TypeDescr>, nothrow: bool },
}

/// An interned, canonical, immutable description of a runtime type (§3).
///
/// Pointer-cheap: internally an index into the process-wide [`TypeTable`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescr(u32);

impl TypeDescr {
    /// Look up the canonical descriptor for a primitive type, interning it
    /// on first use.
    pub fn require_primitive(prim: Primitive) -> Self {
        TypeTable::with(|t| t.require_primitive(prim))
    }

    /// Look up (or intern) the canonical descriptor for a function
    /// signature — `require_by_fn_info` in §4.B.
    pub fn require_by_fn_info(ret: TypeDescr, args: Vec<TypeDescr>, nothrow: bool) -> Self {
        TypeTable::with(|t| t.require_function(ret, args, nothrow))
    }

    pub fn is_primitive(self, prim: Primitive) -> bool {
        TypeTable::with(|t| matches!(t.key_of(self), TypeKey::Primitive(p) if *p == prim))
    }

    pub fn as_primitive(self) -> Option<Primitive> {
        TypeTable::with(|t| match t.key_of(self) {
            TypeKey::Primitive(p) => Some(*p),
            _ => None,
        })
    }

    pub fn is_function(self) -> bool {
        TypeTable::with(|t| matches!(t.key_of(self), TypeKey::Function { .. }))
    }

    /// The function's return type, if this descriptor is a function type.
    pub fn fn_return(self) -> Option<TypeDescr> {
        TypeTable::with(|t| match t.key_of(self) {
            TypeKey::Function { ret, .. } => Some(*ret),
            _ => None,
        })
    }

    pub fn fn_args(self) -> Option<Vec<TypeDescr>> {
        TypeTable::with(|t| match t.key_of(self) {
            TypeKey::Function { args, .. } => Some(args.clone()),
            _ => None,
        })
    }

    /// Can a value of type `self` be implicitly converted (§4.E.1) to `dest`?
    pub fn can_widen_to(self, dest: TypeDescr) -> bool {
        match (self.as_primitive(), dest.as_primitive()) {
            (Some(a), Some(b)) => a.can_widen_to(b),
            _ => false,
        }
    }

    pub fn name(self) -> String {
        TypeTable::with(|t| t.display_name(self))
    }
}

impl fmt::Debug for TypeDescr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescr({})", self.name())
    }
}

impl fmt::Display for TypeDescr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

thread_local! {
    static TABLE: RefCell<TypeTable> = RefCell::new(TypeTable::new());
}

struct TypeTable {
    keys: Vec<TypeKey>,
    by_key: std::collections::HashMap<TypeKey, u32>,
}

impl TypeTable {
    fn new() -> Self {
        let mut t = Self { keys: Vec::new(), by_key: std::collections::HashMap::new() };
        for p in Primitive::ALL {
            t.require_primitive(p);
        }
        t
    }

    fn with<R>(f: impl FnOnce(&mut TypeTable) -> R) -> R {
        TABLE.with(|t| f(&mut t.borrow_mut()))
    }

    fn intern(&mut self, key: TypeKey) -> TypeDescr {
        if let Some(&idx) = self.by_key.get(&key) {
            return TypeDescr(idx);
        }
        let idx = self.keys.len() as u32;
        self.by_key.insert(key.clone(), idx);
        self.keys.push(key);
        TypeDescr(idx)
    }

    fn require_primitive(&mut self, prim: Primitive) -> TypeDescr {
        self.intern(TypeKey::Primitive(prim))
    }

    fn require_function(&mut self, ret: TypeDescr, args: Vec<TypeDescr>, nothrow: bool) -> TypeDescr {
        self.intern(TypeKey::Function { ret, args, nothrow })
    }

    fn key_of(&self, td: TypeDescr) -> &TypeKey {
        &self.keys[td.0 as usize]
    }

    fn display_name(&self, td: TypeDescr) -> String {
        match &self.keys[td.0 as usize] {
            TypeKey::Primitive(p) => p.name().to_string(),
            TypeKey::Function { ret, args, .. } => {
                let arg_names: Vec<String> = args.iter().map(|a| self.display_name(*a)).collect();
                format!("({}) -> {}", arg_names.join(", "), self.display_name(*ret))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_interning_is_pointer_equal() {
        let a = TypeDescr::require_primitive(Primitive::F64);
        let b = TypeDescr::require_primitive(Primitive::F64);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_primitives_differ() {
        let a = TypeDescr::require_primitive(Primitive::F64);
        let b = TypeDescr::require_primitive(Primitive::I64);
        assert_ne!(a, b);
    }

    #[test]
    fn function_type_interning() {
        let f64_td = TypeDescr::require_primitive(Primitive::F64);
        let a = TypeDescr::require_by_fn_info(f64_td, vec![f64_td, f64_td], false);
        let b = TypeDescr::require_by_fn_info(f64_td, vec![f64_td, f64_td], false);
        assert_eq!(a, b);
        assert!(a.is_function());
        assert_eq!(a.fn_return(), Some(f64_td));
    }

    #[test]
    fn function_types_structurally_distinct() {
        let f64_td = TypeDescr::require_primitive(Primitive::F64);
        let i64_td = TypeDescr::require_primitive(Primitive::I64);
        let a = TypeDescr::require_by_fn_info(f64_td, vec![f64_td], false);
        let b = TypeDescr::require_by_fn_info(i64_td, vec![f64_td], false);
        assert_ne!(a, b);
    }

    #[test]
    fn widening_rules() {
        assert!(Primitive::I16.can_widen_to(Primitive::I32));
        assert!(Primitive::I32.can_widen_to(Primitive::I64));
        assert!(Primitive::I32.can_widen_to(Primitive::F64));
        assert!(!Primitive::F64.can_widen_to(Primitive::I32));
        assert!(!Primitive::Bool.can_widen_to(Primitive::I32));
        assert!(!Primitive::I64.can_widen_to(Primitive::I32));
    }

    #[test]
    fn display_names() {
        let f64_td = TypeDescr::require_primitive(Primitive::F64);
        assert_eq!(f64_td.name(), "f64");
        let fn_td = TypeDescr::require_by_fn_info(f64_td, vec![f64_td], false);
        assert_eq!(fn_td.name(), "(f64) -> f64");
    }

    #[quickcheck_macros::quickcheck]
    fn intern_equality_matches_name_equality(a_name: bool, b_name: bool) -> bool {
        let prim_a = if a_name { Primitive::Bool } else { Primitive::I64 };
        let prim_b = if b_name { Primitive::Bool } else { Primitive::I64 };
        let ta = TypeDescr::require_primitive(prim_a);
        let tb = TypeDescr::require_primitive(prim_b);
        (ta == tb) == (prim_a == prim_b)
    }
}
