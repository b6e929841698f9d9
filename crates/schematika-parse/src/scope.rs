//! Typed lexical scope used while parsing (§4.F).
//!
//! [`schematika_ast::LocalSymtab`] only tracks names and binding slots — it
//! has no notion of a type, since the AST crate keeps that table minimal and
//! reusable by the interpreter too. The original `xo::ast::Variable` fuses a
//! name, its type, and its binding in one object; here that fusion is
//! recovered by pairing each `LocalSymtab` frame with a parallel vector of
//! `TypeDescr`, indexed by the same slot numbers `LocalSymtab::declare`
//! hands out.

use std::cell::RefCell;
use std::rc::Rc;

use schematika_ast::LocalSymtab;
use schematika_ast::Binding;
use schematika_types::TypeDescr;
use schematika_util::Symbol;

pub struct Scope {
    table: Rc<LocalSymtab>,
    types: RefCell<Vec<TypeDescr>>,
    parent: Option<Rc<Scope>>,
}

impl Scope {
    pub fn root() -> Rc<Scope> {
        Rc::new(Scope { table: LocalSymtab::root(), types: RefCell::new(Vec::new()), parent: None })
    }

    pub fn child(parent: &Rc<Scope>) -> Rc<Scope> {
        Rc::new(Scope {
            table: LocalSymtab::child(&parent.table),
            types: RefCell::new(Vec::new()),
            parent: Some(Rc::clone(parent)),
        })
    }

    /// Declare `name : ty` in this frame, returning its depth-0 binding.
    pub fn declare(&self, name: Symbol, ty: TypeDescr) -> Binding {
        let binding = self.table.declare(name);
        self.types.borrow_mut().push(ty);
        binding
    }

    /// Resolve `name` against this frame and its ancestors, returning both
    /// the binding (with the correct `link_depth`) and the type recorded
    /// when it was declared.
    pub fn lookup(self: &Rc<Self>, name: Symbol) -> Option<(Binding, TypeDescr)> {
        let binding = self.table.lookup(name)?;
        let mut frame = Rc::clone(self);
        for _ in 0..binding.link_depth() {
            frame = Rc::clone(frame.parent.as_ref().expect("link_depth within scope chain"));
        }
        let ty = frame.types.borrow()[binding.slot_index() as usize];
        Some((binding, ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schematika_types::Primitive;

    #[test]
    fn declare_then_lookup_same_frame() {
        let root = Scope::root();
        let x = Symbol::intern("x_scope_test");
        let td = TypeDescr::require_primitive(Primitive::I64);
        root.declare(x, td);
        let (binding, found_ty) = root.lookup(x).unwrap();
        assert!(!binding.is_global());
        assert_eq!(found_ty, td);
    }

    #[test]
    fn child_scope_sees_parent_type() {
        let root = Scope::root();
        let x = Symbol::intern("outer_scope_test");
        let td = TypeDescr::require_primitive(Primitive::F64);
        root.declare(x, td);
        let child = Scope::child(&root);
        let (binding, found_ty) = child.lookup(x).unwrap();
        assert_eq!(binding.link_depth(), 1);
        assert_eq!(found_ty, td);
    }
}
