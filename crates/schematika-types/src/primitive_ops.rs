//! Names for the built-in operator functions every infix/comparison/logical
//! operator desugars to (§4.I), selected by operand type. Shared by the
//! parser, which pre-declares these as ordinary globals, and the
//! interpreter, which must install their implementations into the exact
//! same slots — both sides iterate [`all_primitive_names`] in this order,
//! so neither may reorder it independently.

use crate::Primitive;

/// One operator family, named the way §4.I's primitive-op list names them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpFamily {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
}

impl OpFamily {
    /// Mangled global name, e.g. `add2_i64`, `eq2_f32`, `and2_bool`.
    pub fn mangled_name(self, operand: Primitive) -> String {
        match self {
            OpFamily::Add => format!("add2_{}", operand.name()),
            OpFamily::Sub => format!("sub2_{}", operand.name()),
            OpFamily::Mul => format!("mul2_{}", operand.name()),
            OpFamily::Div => format!("div2_{}", operand.name()),
            OpFamily::Eq => format!("eq2_{}", operand.name()),
            OpFamily::NotEq => format!("neq2_{}", operand.name()),
            OpFamily::Lt => format!("lt2_{}", operand.name()),
            OpFamily::Gt => format!("gt2_{}", operand.name()),
            OpFamily::Le => format!("le2_{}", operand.name()),
            OpFamily::Ge => format!("ge2_{}", operand.name()),
            OpFamily::And => "and2_bool".to_string(),
            OpFamily::Or => "or2_bool".to_string(),
        }
    }

    /// Does this family apply to `operand` at all? Arithmetic and ordering
    /// comparisons are numeric-only; `eq2`/`neq2` also accept `bool` and
    /// `string`; `and2_bool`/`or2_bool` are bool-only.
    pub fn accepts(self, operand: Primitive) -> bool {
        match self {
            OpFamily::Add | OpFamily::Sub | OpFamily::Mul | OpFamily::Div => operand.is_numeric(),
            OpFamily::Lt | OpFamily::Gt | OpFamily::Le | OpFamily::Ge => operand.is_numeric(),
            OpFamily::Eq | OpFamily::NotEq => {
                operand.is_numeric() || matches!(operand, Primitive::Bool | Primitive::String)
            }
            OpFamily::And | OpFamily::Or => matches!(operand, Primitive::Bool),
        }
    }

    /// Is the result type `bool` (comparisons, logical ops) or `operand`
    /// itself (arithmetic)?
    pub fn result_is_bool(self) -> bool {
        !matches!(self, OpFamily::Add | OpFamily::Sub | OpFamily::Mul | OpFamily::Div)
    }
}

/// Every `(family, type)` combination the bootstrap environment provides,
/// plus the five explicit narrowing-conversion names (`to_i16` ..
/// `to_f64`). Order matters: the parser pre-declares globals in this order
/// and the interpreter installs closures into the resulting slots in the
/// same order, so changing it is a breaking change to both.
pub fn all_primitive_names() -> Vec<String> {
    let arith = [OpFamily::Add, OpFamily::Sub, OpFamily::Mul, OpFamily::Div];
    let cmp = [OpFamily::Lt, OpFamily::Gt, OpFamily::Le, OpFamily::Ge];
    let eqne = [OpFamily::Eq, OpFamily::NotEq];

    let mut names = Vec::new();
    for p in Primitive::ALL {
        if p.is_numeric() {
            for f in arith.iter().chain(cmp.iter()).chain(eqne.iter()) {
                names.push(f.mangled_name(p));
            }
        }
    }
    names.push(OpFamily::Eq.mangled_name(Primitive::Bool));
    names.push(OpFamily::NotEq.mangled_name(Primitive::Bool));
    names.push(OpFamily::Eq.mangled_name(Primitive::String));
    names.push(OpFamily::NotEq.mangled_name(Primitive::String));
    names.push("and2_bool".to_string());
    names.push("or2_bool".to_string());
    for p in [Primitive::I16, Primitive::I32, Primitive::I64, Primitive::F32, Primitive::F64] {
        names.push(format!("to_{}", p.name()));
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let names = all_primitive_names();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names.len(), sorted.len());
    }

    #[test]
    fn and_or_ignore_operand() {
        assert_eq!(OpFamily::And.mangled_name(Primitive::I64), "and2_bool");
        assert_eq!(OpFamily::Or.mangled_name(Primitive::F32), "or2_bool");
    }

    #[test]
    fn arithmetic_rejects_bool() {
        assert!(!OpFamily::Add.accepts(Primitive::Bool));
        assert!(OpFamily::Eq.accepts(Primitive::Bool));
    }
}
