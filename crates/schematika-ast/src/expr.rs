//! The nine expression variants (§3, §4.E): `Constant`, `VariableDef`,
//! `VarRef`, `Apply`, `Lambda`, `IfElse`, `Sequence`, `Define`, `Convert`.
//!
//! Grounded on `xo-expression2`'s facet-based representations
//! (`DConstant`, `DApplyExpr`, `DLambdaExpr`, `DIfElseExpr`,
//! `DSequenceExpr`, `DDefineExpr`, `DVarRef`, `DVariable`) and the legacy
//! `ConvertExpr`. Each original `D*` struct paired with a generated
//! `IExpression_D*` facet implementation so a caller holding any
//! `AExpression` handle could call `typeref`/`valuetype` without knowing the
//! concrete representation; here that collapses into one closed `Expr` enum
//! with a `match`, which is the idiomatic Rust shape for a fixed node set
//! known entirely at compile time (the facet registry in
//! [`schematika_facet`] is reserved for open-ended runtime dispatch, e.g.
//! the evaluator's GC-managed values).

use std::cell::RefCell;
use std::rc::Rc;

use schematika_types::{Primitive, TypeDescr, TypeRef};
use schematika_util::Symbol;

use crate::binding::Binding;
use crate::error::{AstError, AstResult};

/// A literal value carried by a [`Constant`](ExprKind::Constant) node.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    String(String),
    Unit,
}

impl Literal {
    pub fn type_of(&self) -> Primitive {
        match self {
            Literal::Bool(_) => Primitive::Bool,
            Literal::I16(_) => Primitive::I16,
            Literal::I32(_) => Primitive::I32,
            Literal::I64(_) => Primitive::I64,
            Literal::F32(_) => Primitive::F32,
            Literal::F64(_) => Primitive::F64,
            Literal::String(_) => Primitive::String,
            Literal::Unit => Primitive::Unit,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConstantExpr {
    pub value: Literal,
}

#[derive(Clone, Debug)]
pub struct VariableDefExpr {
    pub name: Symbol,
    pub binding: Binding,
    pub init: Expr,
}

#[derive(Clone, Debug)]
pub struct VarRefExpr {
    pub name: Symbol,
    pub binding: Binding,
}

#[derive(Clone, Debug)]
pub struct ApplyExpr {
    pub func: Expr,
    pub args: Vec<Expr>,
}

#[derive(Clone, Debug)]
pub struct LambdaExpr {
    pub params: Vec<(Symbol, Binding)>,
    pub body: Expr,
}

#[derive(Clone, Debug)]
pub struct IfElseExpr {
    pub cond: Expr,
    pub if_true: Expr,
    pub if_false: Expr,
}

#[derive(Clone, Debug)]
pub struct SequenceExpr {
    pub body: Vec<Expr>,
}

#[derive(Clone, Debug)]
pub struct DefineExpr {
    pub name: Symbol,
    pub binding: Binding,
    pub value: Expr,
}

/// Synthesized numeric-widening node (§4.E.1) — never written by hand, only
/// inserted by the parser/type-resolver when a narrower numeric type needs
/// to flow into a wider-typed position.
#[derive(Clone, Debug)]
pub struct ConvertExpr {
    pub arg: Expr,
    pub dest_type: TypeDescr,
}

#[derive(Clone, Debug)]
enum ExprKind {
    Constant(ConstantExpr),
    VariableDef(VariableDefExpr),
    VarRef(VarRefExpr),
    Apply(ApplyExpr),
    Lambda(LambdaExpr),
    IfElse(IfElseExpr),
    Sequence(SequenceExpr),
    Define(DefineExpr),
    Convert(ConvertExpr),
}

/// A Schematika expression node.
///
/// `valuetype` mirrors `AExpression::valuetype` — `None` before a node's
/// type has been resolved, `Some` afterward. Resolution is eager here: a
/// `Constant` is concrete from construction, and composite nodes resolve
/// their own type as soon as their children are built (§4.E "eagerly
/// evaluated" extends naturally to "eagerly typed" for this single-pass
/// design — there is no separate inference phase to defer to).
#[derive(Clone, Debug)]
pub struct Expr(Rc<ExprNode>);

#[derive(Debug)]
struct ExprNode {
    kind: ExprKind,
    type_ref: RefCell<TypeRef>,
}

impl Expr {
    fn new(kind: ExprKind, type_ref: TypeRef) -> Self {
        Expr(Rc::new(ExprNode { kind, type_ref: RefCell::new(type_ref) }))
    }

    pub fn constant(value: Literal) -> Self {
        let td = TypeDescr::require_primitive(value.type_of());
        Self::new(ExprKind::Constant(ConstantExpr { value }), TypeRef::resolved(td))
    }

    pub fn var_ref(name: Symbol, binding: Binding, td: TypeDescr) -> Self {
        Self::new(ExprKind::VarRef(VarRefExpr { name, binding }), TypeRef::resolved(td))
    }

    /// `VariableDef` introduces a `let`-bound local (§4.E); its type is the
    /// initializer's type, after any implicit widening has already been
    /// applied to `init` by the caller.
    pub fn variable_def(name: Symbol, binding: Binding, init: Expr) -> Self {
        let td = init.valuetype();
        let type_ref = match td {
            Some(td) => TypeRef::resolved(td),
            None => TypeRef::dwim("let1", None),
        };
        Self::new(ExprKind::VariableDef(VariableDefExpr { name, binding, init }), type_ref)
    }

    /// `Apply(func, args)`; `ret_type` is supplied by the caller since it
    /// comes from `func`'s function-type descriptor, already resolved by
    /// the time an `Apply` node is built (§4.E: functions are not
    /// polymorphic, so the callee's type fully determines the result type).
    pub fn apply(func: Expr, args: Vec<Expr>, ret_type: TypeDescr) -> Self {
        Self::new(ExprKind::Apply(ApplyExpr { func, args }), TypeRef::resolved(ret_type))
    }

    pub fn lambda(params: Vec<(Symbol, Binding)>, body: Expr, fn_type: TypeDescr) -> Self {
        Self::new(ExprKind::Lambda(LambdaExpr { params, body }), TypeRef::resolved(fn_type))
    }

    /// `IfElse`; §4.E.1 unification of `if_true`/`if_false` branch types
    /// (implicit widening either direction, else `TypeMismatch`) happens in
    /// [`crate::convert::unify_branches`] before this constructor is
    /// called — by the time we get here both branches already share a type.
    pub fn if_else(cond: Expr, if_true: Expr, if_false: Expr) -> AstResult<Self> {
        let (Some(t_ty), Some(f_ty)) = (if_true.valuetype(), if_false.valuetype()) else {
            return Ok(Self::new(
                ExprKind::IfElse(IfElseExpr { cond, if_true, if_false }),
                TypeRef::dwim("if", None),
            ));
        };
        if t_ty != f_ty {
            return Err(AstError::BranchTypeMismatch { then_ty: t_ty.name(), else_ty: f_ty.name() });
        }
        Ok(Self::new(
            ExprKind::IfElse(IfElseExpr { cond, if_true, if_false }),
            TypeRef::resolved(t_ty),
        ))
    }

    /// `Sequence`'s type is its last expression's type, or `unit` if empty
    /// (§4.E).
    pub fn sequence(body: Vec<Expr>) -> Self {
        let type_ref = match body.last().and_then(Expr::valuetype) {
            Some(td) => TypeRef::resolved(td),
            None => TypeRef::resolved(TypeDescr::require_primitive(Primitive::Unit)),
        };
        Self::new(ExprKind::Sequence(SequenceExpr { body }), type_ref)
    }

    /// `Define` always has type `unit` — it is a top-level statement, not a
    /// value-producing expression (matches `def` never appearing inside an
    /// expression position in §4.G's grammar).
    pub fn define(name: Symbol, binding: Binding, value: Expr) -> Self {
        Self::new(
            ExprKind::Define(DefineExpr { name, binding, value }),
            TypeRef::resolved(TypeDescr::require_primitive(Primitive::Unit)),
        )
    }

    pub fn convert(arg: Expr, dest_type: TypeDescr) -> Self {
        Self::new(ExprKind::Convert(ConvertExpr { arg, dest_type }), TypeRef::resolved(dest_type))
    }

    pub fn valuetype(&self) -> Option<TypeDescr> {
        self.0.type_ref.borrow().type_descr()
    }

    pub fn type_ref(&self) -> TypeRef {
        self.0.type_ref.borrow().clone()
    }

    pub fn assign_valuetype(&self, td: TypeDescr) {
        self.0.type_ref.borrow_mut().resolve(td);
    }

    pub fn as_constant(&self) -> Option<&ConstantExpr> {
        match &self.0.kind {
            ExprKind::Constant(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_var_ref(&self) -> Option<&VarRefExpr> {
        match &self.0.kind {
            ExprKind::VarRef(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_variable_def(&self) -> Option<&VariableDefExpr> {
        match &self.0.kind {
            ExprKind::VariableDef(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_apply(&self) -> Option<&ApplyExpr> {
        match &self.0.kind {
            ExprKind::Apply(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_lambda(&self) -> Option<&LambdaExpr> {
        match &self.0.kind {
            ExprKind::Lambda(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_if_else(&self) -> Option<&IfElseExpr> {
        match &self.0.kind {
            ExprKind::IfElse(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&SequenceExpr> {
        match &self.0.kind {
            ExprKind::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_define(&self) -> Option<&DefineExpr> {
        match &self.0.kind {
            ExprKind::Define(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_convert(&self) -> Option<&ConvertExpr> {
        match &self.0.kind {
            ExprKind::Convert(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_type_matches_literal() {
        let e = Expr::constant(Literal::I32(7));
        assert_eq!(e.valuetype(), Some(TypeDescr::require_primitive(Primitive::I32)));
    }

    #[test]
    fn sequence_type_is_last_expr_type() {
        let seq = Expr::sequence(vec![
            Expr::constant(Literal::Unit),
            Expr::constant(Literal::Bool(true)),
        ]);
        assert_eq!(seq.valuetype(), Some(TypeDescr::require_primitive(Primitive::Bool)));
    }

    #[test]
    fn empty_sequence_is_unit() {
        let seq = Expr::sequence(vec![]);
        assert_eq!(seq.valuetype(), Some(TypeDescr::require_primitive(Primitive::Unit)));
    }

    #[test]
    fn define_is_always_unit() {
        let d = Expr::define(
            Symbol::intern("x_def"),
            Binding::global(0),
            Expr::constant(Literal::I64(1)),
        );
        assert_eq!(d.valuetype(), Some(TypeDescr::require_primitive(Primitive::Unit)));
    }

    #[test]
    fn if_else_with_matching_branches_resolves() {
        let e = Expr::if_else(
            Expr::constant(Literal::Bool(true)),
            Expr::constant(Literal::I64(1)),
            Expr::constant(Literal::I64(2)),
        )
        .unwrap();
        assert_eq!(e.valuetype(), Some(TypeDescr::require_primitive(Primitive::I64)));
    }

    #[test]
    fn if_else_with_mismatched_branches_errors() {
        let err = Expr::if_else(
            Expr::constant(Literal::Bool(true)),
            Expr::constant(Literal::I64(1)),
            Expr::constant(Literal::String("no".into())),
        )
        .unwrap_err();
        assert!(matches!(err, AstError::BranchTypeMismatch { .. }));
    }

    #[test]
    fn convert_node_reports_dest_type() {
        let arg = Expr::constant(Literal::I32(3));
        let dest = TypeDescr::require_primitive(Primitive::I64);
        let conv = Expr::convert(arg, dest);
        assert_eq!(conv.valuetype(), Some(dest));
    }
}
