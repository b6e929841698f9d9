//! Implicit numeric widening (§4.E.1) — grounded on
//! `xo-expression/include/xo/expression/ConvertExpr.hpp`'s `ConvertExpr::make`,
//! which wraps an expression in a conversion node only when the source type
//! actually differs from the destination and the widening is legal; an
//! identity conversion is elided rather than emitted as a no-op node.

use schematika_types::TypeDescr;

use crate::error::{AstError, AstResult};
use crate::expr::Expr;

/// Insert an implicit `Convert` node around `expr` if its type differs from
/// `dest` and widens to it; reject with `TypeMismatch` if `dest` is narrower
/// or otherwise unrelated. Returns `expr` unchanged when no conversion is
/// needed (`ConvertExpr::make`'s identity-elision).
pub fn coerce_to(expr: Expr, dest: TypeDescr) -> AstResult<Expr> {
    let Some(src) = expr.valuetype() else {
        return Ok(expr);
    };
    if src == dest {
        return Ok(expr);
    }
    if src.can_widen_to(dest) {
        return Ok(Expr::convert(expr, dest));
    }
    Err(AstError::TypeMismatch { expected: dest.name(), found: src.name() })
}

/// §4.E.1's if/else unification: widen whichever branch is narrower so both
/// sides share a single type, or fail if neither widens to the other.
pub fn unify_branches(if_true: Expr, if_false: Expr) -> AstResult<(Expr, Expr)> {
    let (Some(t_ty), Some(f_ty)) = (if_true.valuetype(), if_false.valuetype()) else {
        return Ok((if_true, if_false));
    };
    if t_ty == f_ty {
        return Ok((if_true, if_false));
    }
    if t_ty.can_widen_to(f_ty) {
        return Ok((coerce_to(if_true, f_ty)?, if_false));
    }
    if f_ty.can_widen_to(t_ty) {
        return Ok((if_true, coerce_to(if_false, t_ty)?));
    }
    Err(AstError::BranchTypeMismatch { then_ty: t_ty.name(), else_ty: f_ty.name() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Literal;
    use schematika_types::Primitive;

    #[test]
    fn coerce_identity_is_a_noop() {
        let e = Expr::constant(Literal::I32(1));
        let td = TypeDescr::require_primitive(Primitive::I32);
        let coerced = coerce_to(e, td).unwrap();
        assert!(coerced.as_convert().is_none());
    }

    #[test]
    fn coerce_widening_inserts_convert() {
        let e = Expr::constant(Literal::I32(1));
        let dest = TypeDescr::require_primitive(Primitive::I64);
        let coerced = coerce_to(e, dest).unwrap();
        assert!(coerced.as_convert().is_some());
        assert_eq!(coerced.valuetype(), Some(dest));
    }

    #[test]
    fn coerce_narrowing_is_an_error() {
        let e = Expr::constant(Literal::I64(1));
        let dest = TypeDescr::require_primitive(Primitive::I32);
        assert!(coerce_to(e, dest).is_err());
    }

    #[test]
    fn unify_branches_widens_narrower_side() {
        let t = Expr::constant(Literal::I32(1));
        let f = Expr::constant(Literal::I64(2));
        let (t2, f2) = unify_branches(t, f).unwrap();
        assert_eq!(t2.valuetype(), f2.valuetype());
        assert_eq!(t2.valuetype(), Some(TypeDescr::require_primitive(Primitive::I64)));
    }

    #[test]
    fn unify_branches_rejects_unrelated_types() {
        let t = Expr::constant(Literal::Bool(true));
        let f = Expr::constant(Literal::I64(2));
        assert!(unify_branches(t, f).is_err());
    }

    fn literal_of(p: Primitive) -> Literal {
        match p {
            Primitive::Bool => Literal::Bool(true),
            Primitive::I16 => Literal::I16(1),
            Primitive::I32 => Literal::I32(1),
            Primitive::I64 => Literal::I64(1),
            Primitive::F32 => Literal::F32(1.0),
            Primitive::F64 => Literal::F64(1.0),
            Primitive::String => Literal::String(String::new()),
            Primitive::Unit => Literal::Unit,
        }
    }

    fn any_primitive() -> impl proptest::strategy::Strategy<Value = Primitive> {
        proptest::prop_oneof![
            proptest::strategy::Just(Primitive::Bool),
            proptest::strategy::Just(Primitive::I16),
            proptest::strategy::Just(Primitive::I32),
            proptest::strategy::Just(Primitive::I64),
            proptest::strategy::Just(Primitive::F32),
            proptest::strategy::Just(Primitive::F64),
        ]
    }

    proptest::proptest! {
        /// `unify_branches` either fails, or returns two branches sharing
        /// one type that each input side could legally widen to.
        #[test]
        fn unify_branches_result_is_a_common_widening(
            a in any_primitive(),
            b in any_primitive(),
        ) {
            let t = Expr::constant(literal_of(a));
            let f = Expr::constant(literal_of(b));
            let t_ty = TypeDescr::require_primitive(a);
            let f_ty = TypeDescr::require_primitive(b);

            match unify_branches(t, f) {
                Ok((t2, f2)) => {
                    let common = t2.valuetype().unwrap();
                    assert_eq!(Some(common), f2.valuetype());
                    assert!(t_ty == common || t_ty.can_widen_to(common));
                    assert!(f_ty == common || f_ty.can_widen_to(common));
                }
                Err(_) => {
                    assert!(!t_ty.can_widen_to(f_ty) && !f_ty.can_widen_to(t_ty));
                }
            }
        }
    }
}
