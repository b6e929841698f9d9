//! The evaluator (§4.I): strict, left-to-right, inside-out evaluation of an
//! [`Expr`] tree against a [`GlobalEnv`] and an optional chain of lambda
//! [`Frame`]s.
//!
//! Grounded on `DVsmApplyFrame`/`DVsmEvalArgsFrame`: the original splits a
//! function call into two heap-allocated, GC-traced frame types — one that
//! walks the argument list left to right (`i_arg_` counts which argument is
//! next), and one that holds the evaluated argument vector while the callee
//! runs. Here `eval_args_then_apply` plays the first role and `apply_value`
//! the second; Rust's own call stack takes over the job the original gives
//! a heap-resident, garbage-collected control frame, since this evaluator
//! has one mutator thread and no continuation needs to outlive a single
//! `eval` call. `schematika-gc`'s generational heap is not wired into value
//! representation for that reason — see `DESIGN.md`.

use schematika_ast::{Expr, Literal};
use schematika_types::{Primitive, TypeDescr};
use std::rc::Rc;

use crate::env::{Frame, GlobalEnv};
use crate::error::{InterpError, InterpResult};
use crate::primitives;
use crate::value::{Closure, Value};

pub struct Interpreter {
    globals: GlobalEnv,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Installs the primitive operator table (§4.I) into the global
    /// environment before any user code runs, in the same order the parser
    /// pre-declared their names as globals.
    pub fn new() -> Self {
        let globals = GlobalEnv::new();
        for value in primitives::bootstrap_values() {
            globals.push(value);
        }
        Interpreter { globals }
    }

    pub fn globals(&self) -> &GlobalEnv {
        &self.globals
    }

    /// Evaluate a complete program (the `Sequence` of top-level `Define`s
    /// [`schematika_parse::Parser::parse_program`] produces).
    pub fn run(&self, program: &Expr) -> InterpResult<Value> {
        self.eval(program, None)
    }

    pub fn eval(&self, expr: &Expr, frame: Option<&Rc<Frame>>) -> InterpResult<Value> {
        if let Some(c) = expr.as_constant() {
            return Ok(literal_to_value(&c.value));
        }
        if let Some(v) = expr.as_var_ref() {
            return Ok(if v.binding.is_global() {
                self.globals.get(v.binding.slot_index())
            } else {
                frame.expect("local VarRef evaluated outside a frame").lookup(v.binding)
            });
        }
        if let Some(d) = expr.as_variable_def() {
            // The initializer's value *is* this node's value (§4.E); the
            // name/binding pair is for whichever frame-builder introduces
            // the slot, which for this interpreter is always a `Lambda`
            // call (the parser desugars `let`-bound locals into lambda
            // formals rather than emitting `VariableDef` directly).
            return self.eval(&d.init, frame);
        }
        if let Some(a) = expr.as_apply() {
            return self.eval_args_then_apply(a, frame);
        }
        if let Some(l) = expr.as_lambda() {
            let closure = Closure {
                arity: l.params.len(),
                body: l.body.clone(),
                captured: frame.cloned(),
            };
            return Ok(Value::Closure(Rc::new(closure)));
        }
        if let Some(i) = expr.as_if_else() {
            let cond = self.eval(&i.cond, frame)?;
            return if cond.is_truthy() {
                self.eval(&i.if_true, frame)
            } else {
                self.eval(&i.if_false, frame)
            };
        }
        if let Some(s) = expr.as_sequence() {
            let mut last = Value::Unit;
            for item in &s.body {
                last = self.eval(item, frame)?;
            }
            return Ok(last);
        }
        if let Some(d) = expr.as_define() {
            let value = self.eval(&d.value, frame)?;
            debug_assert_eq!(d.binding.slot_index() as usize, self.globals.len());
            self.globals.push(value);
            return Ok(Value::Unit);
        }
        if let Some(c) = expr.as_convert() {
            let value = self.eval(&c.arg, frame)?;
            return Ok(widen(value, c.dest_type));
        }
        unreachable!("Expr has no remaining variant")
    }

    /// `DVsmEvalArgsFrame`'s role: evaluate the callee, then each argument
    /// left to right, before handing the results to `apply_value`
    /// (`DVsmApplyFrame`'s role).
    fn eval_args_then_apply(
        &self,
        apply: &schematika_ast::ApplyExpr,
        frame: Option<&Rc<Frame>>,
    ) -> InterpResult<Value> {
        let func = self.eval(&apply.func, frame)?;
        let mut args = Vec::with_capacity(apply.args.len());
        for arg in &apply.args {
            args.push(self.eval(arg, frame)?);
        }
        self.apply_value(func, args)
    }

    fn apply_value(&self, func: Value, args: Vec<Value>) -> InterpResult<Value> {
        let expected = func.arity().ok_or(InterpError::NotCallable)?;
        if expected != args.len() {
            return Err(InterpError::ArityMismatch { expected, found: args.len() });
        }
        match func {
            Value::Primitive(p) => (p.apply)(&args),
            Value::Closure(c) => {
                let call_frame = Frame::new(args, c.captured.clone());
                self.eval(&c.body, Some(&call_frame))
            }
            _ => Err(InterpError::NotCallable),
        }
    }
}

fn literal_to_value(lit: &Literal) -> Value {
    match lit {
        Literal::Bool(b) => Value::Bool(*b),
        Literal::I16(n) => Value::I16(*n),
        Literal::I32(n) => Value::I32(*n),
        Literal::I64(n) => Value::I64(*n),
        Literal::F32(n) => Value::F32(*n),
        Literal::F64(n) => Value::F64(*n),
        Literal::String(s) => Value::String(Rc::from(s.as_str())),
        Literal::Unit => Value::Unit,
    }
}

/// Runtime counterpart of [`schematika_ast::convert::coerce_to`]'s static
/// widening check — by the time a `Convert` node is evaluated, the parser
/// has already confirmed the widening is legal, so this only has to
/// perform it.
fn widen(value: Value, dest: TypeDescr) -> Value {
    let Some(dest_prim) = dest.as_primitive() else {
        return value;
    };
    let as_f64 = |v: &Value| -> Option<f64> {
        match v {
            Value::I16(n) => Some(*n as f64),
            Value::I32(n) => Some(*n as f64),
            Value::I64(n) => Some(*n as f64),
            Value::F32(n) => Some(*n as f64),
            Value::F64(n) => Some(*n),
            _ => None,
        }
    };
    match (dest_prim, as_f64(&value)) {
        (Primitive::I32, Some(n)) => Value::I32(n as i32),
        (Primitive::I64, Some(n)) => Value::I64(n as i64),
        (Primitive::F32, Some(n)) => Value::F32(n as f32),
        (Primitive::F64, Some(n)) => Value::F64(n),
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schematika_ast::Binding;
    use schematika_util::{Handler, Symbol};

    fn parse(source: &str) -> Expr {
        let mut handler = Handler::new();
        schematika_parse::parse_source(source, &mut handler).expect("parses")
    }

    #[test]
    fn evaluates_a_constant_definition() {
        let program = parse("def x : i64 = 2 + 3;");
        let interp = Interpreter::new();
        interp.run(&program).unwrap();
        let slot = interp.globals().len() - 1;
        assert!(matches!(interp.globals().get(slot as u32), Value::I64(5)));
    }

    #[test]
    fn evaluates_a_recursive_lambda() {
        let program = parse(
            "def fact = lambda(n : i64) if n == 0 then 1 else n * fact(n - 1); \
             def answer = fact(5);",
        );
        let interp = Interpreter::new();
        interp.run(&program).unwrap();
        let slot = interp.globals().len() - 1;
        assert!(matches!(interp.globals().get(slot as u32), Value::I64(120)));
    }

    #[test]
    fn evaluates_nested_let1_locals() {
        let program = parse("def r = { def a = 1; def b = 2; a + b };");
        let interp = Interpreter::new();
        interp.run(&program).unwrap();
        let slot = interp.globals().len() - 1;
        assert!(matches!(interp.globals().get(slot as u32), Value::I64(3)));
    }

    #[test]
    fn variable_def_evaluates_to_its_initializer() {
        let expr = Expr::variable_def(
            Symbol::intern("standalone_x"),
            Binding::local(0, 0),
            Expr::constant(Literal::I64(7)),
        );
        let interp = Interpreter::new();
        assert!(matches!(interp.eval(&expr, None).unwrap(), Value::I64(7)));
    }

    #[test]
    fn calling_a_non_function_is_an_error() {
        let binding = Binding::local(0, 0);
        let expr = Expr::apply(
            Expr::var_ref(Symbol::intern("not_fn"), binding, TypeDescr::require_primitive(Primitive::I64)),
            vec![],
            TypeDescr::require_primitive(Primitive::Unit),
        );
        let frame = Frame::new(vec![Value::I64(1)], None);
        let interp = Interpreter::new();
        let err = interp.eval(&expr, Some(&frame)).unwrap_err();
        assert!(matches!(err, InterpError::NotCallable));
    }
}
