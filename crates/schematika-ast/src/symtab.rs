//! §4.F symbol tables — grounded on `xo-expression2`'s `LocalSymtab` /
//! `DLocalSymtab` (a frame's declaration order gives each name a slot, and
//! lookup walks enclosing frames counting hops) and the legacy toolkit's
//! `GlobalSymtab.cpp` (a single flat table of top-level names).

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use schematika_util::Symbol;

use crate::binding::Binding;
use crate::error::{AstError, AstResult};

/// One lambda frame's worth of local bindings. Frames nest via `parent`;
/// `lookup` counts the hops to the defining frame to produce a `Binding`'s
/// `link_depth` (§4.F).
pub struct LocalSymtab {
    parent: Option<Rc<LocalSymtab>>,
    names: RefCell<Vec<Symbol>>,
}

impl LocalSymtab {
    pub fn root() -> Rc<Self> {
        Rc::new(Self { parent: None, names: RefCell::new(Vec::new()) })
    }

    pub fn child(parent: &Rc<LocalSymtab>) -> Rc<Self> {
        Rc::new(Self { parent: Some(Rc::clone(parent)), names: RefCell::new(Vec::new()) })
    }

    /// Declare `name` in this frame, returning its `Binding` at
    /// `link_depth == 0`. Lambda formals and `let`-bound names go through
    /// this path (§4.E `Lambda`, §4.H `let1_xs`-style desugaring).
    pub fn declare(&self, name: Symbol) -> Binding {
        let mut names = self.names.borrow_mut();
        let slot = names.len() as u32;
        names.push(name);
        Binding::local(0, slot)
    }

    /// Resolve `name` against this frame and its ancestors, most recent
    /// declaration winning within a frame (shadowing).
    pub fn lookup(self: &Rc<Self>, name: Symbol) -> Option<Binding> {
        let mut depth = 0u32;
        let mut frame = Some(Rc::clone(self));
        while let Some(f) = frame {
            if let Some(slot) = f.names.borrow().iter().rposition(|&n| n == name) {
                return Some(Binding::local(depth, slot as u32));
            }
            depth += 1;
            frame = f.parent.clone();
        }
        None
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut frame = self.parent.as_ref();
        while let Some(f) = frame {
            depth += 1;
            frame = f.parent.as_ref();
        }
        depth
    }
}

/// The single top-level environment (§4.F): primitive operations and
/// `def`-introduced names all live here, addressed by `Binding::global`.
#[derive(Default)]
pub struct GlobalSymtab {
    slots: RefCell<FxHashMap<Symbol, u32>>,
    next_slot: RefCell<u32>,
}

impl GlobalSymtab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Introduce a new top-level name (§4.E `Define`). Redefinition is
    /// rejected — Schematika's `def` binds once per name, matching the
    /// original `GlobalSymtab::def` contract.
    pub fn declare(&self, name: Symbol) -> AstResult<Binding> {
        let mut slots = self.slots.borrow_mut();
        if slots.contains_key(&name) {
            return Err(AstError::DuplicateDefinition(name));
        }
        let mut next = self.next_slot.borrow_mut();
        let slot = *next;
        *next += 1;
        slots.insert(name, slot);
        Ok(Binding::global(slot))
    }

    pub fn lookup(&self, name: Symbol) -> Option<Binding> {
        self.slots.borrow().get(&name).map(|&slot| Binding::global(slot))
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_lookup_finds_current_frame() {
        let root = LocalSymtab::root();
        let x = Symbol::intern("x");
        let b = root.declare(x);
        assert_eq!(root.lookup(x), Some(b));
    }

    #[test]
    fn local_lookup_walks_to_parent_with_increasing_depth() {
        let root = LocalSymtab::root();
        let x = Symbol::intern("outer_x");
        root.declare(x);
        let child = LocalSymtab::child(&root);
        let binding = child.lookup(x).unwrap();
        assert_eq!(binding.link_depth(), 1);
    }

    #[test]
    fn shadowing_prefers_innermost_declaration() {
        let root = LocalSymtab::root();
        let x = Symbol::intern("shadowed_x");
        root.declare(x);
        let child = LocalSymtab::child(&root);
        let inner = child.declare(x);
        assert_eq!(child.lookup(x), Some(inner));
        assert_eq!(inner.link_depth(), 0);
    }

    #[test]
    fn unknown_name_is_none() {
        let root = LocalSymtab::root();
        assert_eq!(root.lookup(Symbol::intern("nope_xyz")), None);
    }

    #[test]
    fn global_declare_then_lookup() {
        let g = GlobalSymtab::new();
        let name = Symbol::intern("pi_const");
        let b = g.declare(name).unwrap();
        assert!(b.is_global());
        assert_eq!(g.lookup(name), Some(b));
    }

    #[test]
    fn global_redeclare_is_an_error() {
        let g = GlobalSymtab::new();
        let name = Symbol::intern("dup_const");
        g.declare(name).unwrap();
        assert!(g.declare(name).is_err());
    }
}
