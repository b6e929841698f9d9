//! Runtime values (§4.I). A `Value` is whatever a `Constant`, `Lambda`, or
//! primitive operation can produce — the interpreter's counterpart to the
//! parser's `TypeDescr`, but carrying data instead of a type description.

use std::fmt;
use std::rc::Rc;

use schematika_ast::Expr;

use crate::env::Frame;
use crate::error::InterpResult;

#[derive(Clone)]
pub enum Value {
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    String(Rc<str>),
    Unit,
    Closure(Rc<Closure>),
    Primitive(Rc<PrimitiveFn>),
}

/// A `Lambda` expression closed over the frame chain active at the point it
/// was evaluated (§4.E "lexically scoped").
pub struct Closure {
    pub arity: usize,
    pub body: Expr,
    pub captured: Option<Rc<Frame>>,
}

/// One of the built-in operator functions installed by [`crate::primitives`]
/// (§4.I's `add2_i64`, `eq2_bool`, `to_f64`, ...).
pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: usize,
    pub apply: fn(&[Value]) -> InterpResult<Value>,
}

impl Value {
    pub fn arity(&self) -> Option<usize> {
        match self {
            Value::Closure(c) => Some(c.arity),
            Value::Primitive(p) => Some(p.arity),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        matches!(self, Value::Bool(true))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::I16(n) => write!(f, "{n}i16"),
            Value::I32(n) => write!(f, "{n}i32"),
            Value::I64(n) => write!(f, "{n}i64"),
            Value::F32(n) => write!(f, "{n}f32"),
            Value::F64(n) => write!(f, "{n}f64"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Unit => write!(f, "()"),
            Value::Closure(c) => write!(f, "<lambda/{}>", c.arity),
            Value::Primitive(p) => write!(f, "<primitive {}>", p.name),
        }
    }
}
