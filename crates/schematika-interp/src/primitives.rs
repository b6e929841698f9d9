//! Implementations of the built-in operator functions named in
//! [`schematika_types::primitive_ops`] (§4.I).
//!
//! The parser has already type-checked every `Apply` of one of these against
//! its operand types before this code ever runs, so a single family-level
//! function (`add2`, `eq2`, ...) dispatching on the `Value`'s own runtime
//! variant covers every mangled name in that family — `add2_i64` and
//! `add2_f32` both resolve to [`add2`], just bound under different global
//! names. This collapses what would otherwise be forty-odd near-identical
//! `fn` items into twelve family functions plus five narrowing conversions.

use schematika_types::primitive_ops::{all_primitive_names, OpFamily};

use crate::error::{InterpError, InterpResult};
use crate::value::{PrimitiveFn, Value};

macro_rules! numeric_binop {
    ($name:ident, $op:tt, $opname:literal) => {
        fn $name(args: &[Value]) -> InterpResult<Value> {
            Ok(match (&args[0], &args[1]) {
                (Value::I16(a), Value::I16(b)) => Value::I16(a $op b),
                (Value::I32(a), Value::I32(b)) => Value::I32(a $op b),
                (Value::I64(a), Value::I64(b)) => Value::I64(a $op b),
                (Value::F32(a), Value::F32(b)) => Value::F32(a $op b),
                (Value::F64(a), Value::F64(b)) => Value::F64(a $op b),
                _ => return Err(InterpError::UnsupportedOperand($opname)),
            })
        }
    };
}

numeric_binop!(add2, +, "add2");
numeric_binop!(sub2, -, "sub2");
numeric_binop!(mul2, *, "mul2");

fn div2(args: &[Value]) -> InterpResult<Value> {
    Ok(match (&args[0], &args[1]) {
        (Value::I16(_), Value::I16(0)) => return Err(InterpError::DivideByZero),
        (Value::I32(_), Value::I32(0)) => return Err(InterpError::DivideByZero),
        (Value::I64(_), Value::I64(0)) => return Err(InterpError::DivideByZero),
        (Value::I16(a), Value::I16(b)) => Value::I16(a / b),
        (Value::I32(a), Value::I32(b)) => Value::I32(a / b),
        (Value::I64(a), Value::I64(b)) => Value::I64(a / b),
        (Value::F32(a), Value::F32(b)) => Value::F32(a / b),
        (Value::F64(a), Value::F64(b)) => Value::F64(a / b),
        _ => return Err(InterpError::UnsupportedOperand("div2")),
    })
}

macro_rules! ordering_binop {
    ($name:ident, $op:tt, $opname:literal) => {
        fn $name(args: &[Value]) -> InterpResult<Value> {
            Ok(Value::Bool(match (&args[0], &args[1]) {
                (Value::I16(a), Value::I16(b)) => a $op b,
                (Value::I32(a), Value::I32(b)) => a $op b,
                (Value::I64(a), Value::I64(b)) => a $op b,
                (Value::F32(a), Value::F32(b)) => a $op b,
                (Value::F64(a), Value::F64(b)) => a $op b,
                _ => return Err(InterpError::UnsupportedOperand($opname)),
            }))
        }
    };
}

ordering_binop!(lt2, <, "lt2");
ordering_binop!(gt2, >, "gt2");
ordering_binop!(le2, <=, "le2");
ordering_binop!(ge2, >=, "ge2");

fn eq2(args: &[Value]) -> InterpResult<Value> {
    Ok(Value::Bool(match (&args[0], &args[1]) {
        (Value::I16(a), Value::I16(b)) => a == b,
        (Value::I32(a), Value::I32(b)) => a == b,
        (Value::I64(a), Value::I64(b)) => a == b,
        (Value::F32(a), Value::F32(b)) => a == b,
        (Value::F64(a), Value::F64(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        _ => return Err(InterpError::UnsupportedOperand("eq2")),
    }))
}

fn neq2(args: &[Value]) -> InterpResult<Value> {
    match eq2(args)? {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        _ => unreachable!("eq2 always returns a bool"),
    }
}

fn and2(args: &[Value]) -> InterpResult<Value> {
    match (&args[0], &args[1]) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
        _ => Err(InterpError::UnsupportedOperand("and2")),
    }
}

fn or2(args: &[Value]) -> InterpResult<Value> {
    match (&args[0], &args[1]) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),
        _ => Err(InterpError::UnsupportedOperand("or2")),
    }
}

fn numeric_as_i64(v: &Value) -> Option<i64> {
    match v {
        Value::I16(n) => Some(*n as i64),
        Value::I32(n) => Some(*n as i64),
        Value::I64(n) => Some(*n),
        Value::F32(n) => Some(*n as i64),
        Value::F64(n) => Some(*n as i64),
        _ => None,
    }
}

fn numeric_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::I16(n) => Some(*n as f64),
        Value::I32(n) => Some(*n as f64),
        Value::I64(n) => Some(*n as f64),
        Value::F32(n) => Some(*n as f64),
        Value::F64(n) => Some(*n),
        _ => None,
    }
}

fn to_i16(args: &[Value]) -> InterpResult<Value> {
    numeric_as_i64(&args[0]).map(|n| Value::I16(n as i16)).ok_or(InterpError::UnsupportedOperand("to_i16"))
}

fn to_i32(args: &[Value]) -> InterpResult<Value> {
    numeric_as_i64(&args[0]).map(|n| Value::I32(n as i32)).ok_or(InterpError::UnsupportedOperand("to_i32"))
}

fn to_i64(args: &[Value]) -> InterpResult<Value> {
    numeric_as_i64(&args[0]).map(Value::I64).ok_or(InterpError::UnsupportedOperand("to_i64"))
}

fn to_f32(args: &[Value]) -> InterpResult<Value> {
    numeric_as_f64(&args[0]).map(|n| Value::F32(n as f32)).ok_or(InterpError::UnsupportedOperand("to_f32"))
}

fn to_f64(args: &[Value]) -> InterpResult<Value> {
    numeric_as_f64(&args[0]).map(Value::F64).ok_or(InterpError::UnsupportedOperand("to_f64"))
}

fn family_impl(family: OpFamily) -> (fn(&[Value]) -> InterpResult<Value>, usize) {
    let f: fn(&[Value]) -> InterpResult<Value> = match family {
        OpFamily::Add => add2,
        OpFamily::Sub => sub2,
        OpFamily::Mul => mul2,
        OpFamily::Div => div2,
        OpFamily::Eq => eq2,
        OpFamily::NotEq => neq2,
        OpFamily::Lt => lt2,
        OpFamily::Gt => gt2,
        OpFamily::Le => le2,
        OpFamily::Ge => ge2,
        OpFamily::And => and2,
        OpFamily::Or => or2,
    };
    (f, 2)
}

fn conversion_impl(name: &str) -> Option<fn(&[Value]) -> InterpResult<Value>> {
    match name {
        "to_i16" => Some(to_i16),
        "to_i32" => Some(to_i32),
        "to_i64" => Some(to_i64),
        "to_f32" => Some(to_f32),
        "to_f64" => Some(to_f64),
        _ => None,
    }
}

fn family_from_mangled_name(name: &str) -> Option<OpFamily> {
    let prefix = name.split('_').next()?;
    Some(match prefix {
        "add2" => OpFamily::Add,
        "sub2" => OpFamily::Sub,
        "mul2" => OpFamily::Mul,
        "div2" => OpFamily::Div,
        "eq2" => OpFamily::Eq,
        "neq2" => OpFamily::NotEq,
        "lt2" => OpFamily::Lt,
        "gt2" => OpFamily::Gt,
        "le2" => OpFamily::Le,
        "ge2" => OpFamily::Ge,
        "and2" => OpFamily::And,
        "or2" => OpFamily::Or,
        _ => return None,
    })
}

/// Build the bootstrap value list, one entry per name from
/// [`all_primitive_names`], in that exact order — this is what
/// [`crate::interpreter::Interpreter::new`] installs into the global
/// environment before evaluating any user code, matching the slot numbers
/// the parser pre-assigned to the same names.
pub fn bootstrap_values() -> Vec<Value> {
    all_primitive_names()
        .into_iter()
        .map(|name| {
            let (apply, arity) = if let Some(f) = conversion_impl(&name) {
                (f, 1)
            } else {
                let family = family_from_mangled_name(&name)
                    .unwrap_or_else(|| panic!("unrecognized primitive name `{name}`"));
                family_impl(family)
            };
            let static_name: &'static str = Box::leak(name.into_boxed_str());
            Value::Primitive(std::rc::Rc::new(PrimitiveFn { name: static_name, arity, apply }))
        })
        .collect()
}
