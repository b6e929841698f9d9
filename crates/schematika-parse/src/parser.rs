//! Pushdown expression parser (§4.H). The original is a true state machine
//! (`exprstate` subclasses pushed/popped on an explicit stack); here the
//! equivalent states are recursive-descent functions — `parse_lambda`,
//! `parse_if_else`, `parse_sequence_body`, and so on each correspond to one
//! of the original's named states (`lambdaexpr`, `if-else`, `sequence`),
//! and the call stack plays the role the original gives to `exprstatestack`.
//! Precedence climbing in `parse_binary` plays the role of `progress`.

use std::rc::Rc;

use schematika_ast::convert::{coerce_to, unify_branches};
use schematika_ast::{Expr, GlobalSymtab, Literal};
use schematika_lex::{Lexer, Token};
use schematika_types::primitive_ops::OpFamily;
use schematika_types::{Primitive, TypeDescr};
use schematika_util::{Handler, Symbol};

use crate::error::{ParseError, ParseResult};
use crate::primitives;
use crate::scope::Scope;

/// Parses a complete Schematika translation unit into one `Expr` (§4.H's
/// `exprseq` state): a `Sequence` of top-level `Define`s, batch-mode style —
/// the only top-level production is `def`.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    globals: GlobalSymtab,
    global_types: Vec<TypeDescr>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        let mut lexer = Lexer::new(source, handler);
        let current = lexer.next_token();
        let globals = GlobalSymtab::new();
        let mut global_types = Vec::new();

        for name in primitives::all_primitive_names() {
            let sym = Symbol::intern(&name);
            let binding = globals.declare(sym).expect("primitive names are unique");
            debug_assert_eq!(binding.slot_index() as usize, global_types.len());
            global_types.push(primitive_fn_type(&name));
        }

        Parser { lexer, current, globals, global_types }
    }

    /// Resume a session against a new chunk of source, carrying forward
    /// globals earlier chunks declared (§6's REPL: each line is lexed
    /// independently, but `def`s accumulate across the whole session).
    pub fn resume(
        source: &'a str,
        handler: &'a mut Handler,
        globals: GlobalSymtab,
        global_types: Vec<TypeDescr>,
    ) -> Self {
        let mut lexer = Lexer::new(source, handler);
        let current = lexer.next_token();
        Parser { lexer, current, globals, global_types }
    }

    /// Tear down this parser, handing back the global table and type list
    /// so a later [`Self::resume`] can continue the same session.
    pub fn into_globals(self) -> (GlobalSymtab, Vec<TypeDescr>) {
        (self.globals, self.global_types)
    }

    pub fn parse_program(&mut self) -> ParseResult<Expr> {
        let mut items = Vec::new();
        while let Some(item) = self.parse_one_def()? {
            items.push(item);
        }
        Ok(Expr::sequence(items))
    }

    /// Parse one top-level `def`, or `None` at end of input — the REPL's
    /// per-line counterpart to [`Self::parse_program`]'s loop.
    pub fn parse_one_def(&mut self) -> ParseResult<Option<Expr>> {
        if self.current == Token::Eof {
            return Ok(None);
        }
        self.expect(&Token::Def, "'def'")?;
        self.parse_toplevel_def().map(Some)
    }

    fn advance(&mut self) -> Token {
        std::mem::replace(&mut self.current, self.lexer.next_token())
    }

    fn bump_if(&mut self, tok: &Token) -> bool {
        if &self.current == tok {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, tok: &Token, what: &'static str) -> ParseResult<()> {
        if &self.current == tok {
            self.advance();
            Ok(())
        } else if self.current == Token::Eof {
            Err(ParseError::UnexpectedEof { expected: what })
        } else {
            Err(ParseError::UnexpectedToken { expected: what, found: self.current.describe().to_string() })
        }
    }

    fn expect_ident(&mut self, what: &'static str) -> ParseResult<Symbol> {
        match self.advance() {
            Token::Ident(sym) => Ok(sym),
            other => Err(ParseError::UnexpectedToken { expected: what, found: other.describe().to_string() }),
        }
    }

    // ----- def_1 .. def_6 -----

    fn parse_toplevel_def(&mut self) -> ParseResult<Expr> {
        tracing::trace!("defexpr");
        let name = self.expect_ident("a name after 'def'")?;
        let declared_ty = if self.bump_if(&Token::Colon) { Some(self.parse_type()?) } else { None };
        self.expect(&Token::Eq, "'=' in top-level definition")?;
        let root = Scope::root();
        let mut rhs = self.parse_expr(&root)?;
        if let Some(td) = declared_ty {
            rhs = coerce_to(rhs, td)?;
        }
        self.expect(&Token::Semicolon, "';' after top-level definition")?;

        let binding = self.globals.declare(name)?;
        debug_assert_eq!(binding.slot_index() as usize, self.global_types.len());
        self.global_types.push(rhs.valuetype().unwrap_or_else(unit_type));

        Ok(Expr::define(name, binding, rhs))
    }

    // ----- expect-expr / progress -----

    fn parse_expr(&mut self, scope: &Rc<Scope>) -> ParseResult<Expr> {
        self.parse_binary(scope, 0)
    }

    /// Precedence climbing over §4.H's table: `== != < > <= >= =` bind at 2,
    /// `+ -` at 4, `* /` at 5. All operators are left-associative.
    fn parse_binary(&mut self, scope: &Rc<Scope>, min_prec: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_unary(scope)?;

        loop {
            let Some(prec) = self.current.infix_precedence() else { break };
            if prec < min_prec {
                break;
            }
            let op_tok = self.advance();
            let rhs = self.parse_binary(scope, prec + 1)?;
            lhs = self.reduce_binary(op_tok, lhs, rhs)?;
        }

        Ok(lhs)
    }

    fn reduce_binary(&mut self, op_tok: Token, lhs: Expr, rhs: Expr) -> ParseResult<Expr> {
        let family = op_family(&op_tok).expect("infix_precedence only returns Some for binary ops");

        let (lhs, rhs) = unify_branches(lhs, rhs)?;
        let operand_ty = lhs
            .valuetype()
            .or_else(|| rhs.valuetype())
            .unwrap_or_else(unit_type)
            .as_primitive()
            .unwrap_or(Primitive::Unit);

        let fn_name = primitives::mangled_name_for(family, operand_ty)?;
        let (binding, fn_ty) =
            self.lookup_global(fn_name).ok_or(ParseError::UndefinedVariable(fn_name))?;
        let ret_ty = fn_ty.fn_return().unwrap_or_else(unit_type);
        let func = Expr::var_ref(fn_name, binding, fn_ty);
        Ok(Expr::apply(func, vec![lhs, rhs], ret_ty))
    }

    /// Only prefix operator in §4.G's grammar: unary `-`, desugared to
    /// `0 - x` through the same `sub2_*` primitive binary operators use
    /// (there is no standalone negation primitive in §4.I's list).
    fn parse_unary(&mut self, scope: &Rc<Scope>) -> ParseResult<Expr> {
        if self.bump_if(&Token::Minus) {
            let operand = self.parse_unary(scope)?;
            let prim = operand.valuetype().and_then(TypeDescr::as_primitive).unwrap_or(Primitive::I64);
            let zero = Expr::constant(zero_literal(prim));
            return self.reduce_binary(Token::Minus, zero, operand);
        }
        self.parse_call(scope)
    }

    /// The `apply` state: a primary expression followed by zero or more
    /// `(arg, ...)` argument lists, left-associative (`f(1)(2)` applies the
    /// result of `f(1)`).
    fn parse_call(&mut self, scope: &Rc<Scope>) -> ParseResult<Expr> {
        let mut callee = self.parse_primary(scope)?;
        while self.current == Token::LParen {
            let Some(fn_ty) = callee.valuetype() else {
                break;
            };
            if !fn_ty.is_function() {
                break;
            }
            self.advance();
            let param_types = fn_ty.fn_args().unwrap_or_default();
            let mut args = Vec::new();
            if self.current != Token::RParen {
                loop {
                    args.push(self.parse_expr(scope)?);
                    if !self.bump_if(&Token::Comma) {
                        break;
                    }
                }
            }
            self.expect(&Token::RParen, "')' to close an argument list")?;
            for (arg, expected) in args.iter_mut().zip(param_types.iter()) {
                *arg = coerce_to(arg.clone(), *expected)?;
            }
            let ret_ty = fn_ty.fn_return().unwrap_or_else(unit_type);
            callee = Expr::apply(callee, args, ret_ty);
        }
        Ok(callee)
    }

    fn parse_primary(&mut self, scope: &Rc<Scope>) -> ParseResult<Expr> {
        match self.current.clone() {
            Token::Integer(n) => {
                self.advance();
                Ok(Expr::constant(Literal::I64(n)))
            }
            Token::Float(f) => {
                self.advance();
                Ok(Expr::constant(Literal::F64(f)))
            }
            Token::True => {
                self.advance();
                Ok(Expr::constant(Literal::Bool(true)))
            }
            Token::False => {
                self.advance();
                Ok(Expr::constant(Literal::Bool(false)))
            }
            Token::StringLit(sym) => {
                self.advance();
                Ok(Expr::constant(Literal::String(sym.as_str().to_string())))
            }
            Token::Ident(sym) => {
                self.advance();
                if let Some((binding, ty)) = scope.lookup(sym) {
                    Ok(Expr::var_ref(sym, binding, ty))
                } else if let Some((binding, ty)) = self.lookup_global(sym) {
                    Ok(Expr::var_ref(sym, binding, ty))
                } else {
                    Err(ParseError::UndefinedVariable(sym))
                }
            }
            Token::LParen => self.parse_paren_expr(scope),
            Token::LBrace => self.parse_sequence_expr(scope),
            Token::If => self.parse_if_else(scope),
            Token::Lambda => self.parse_lambda(scope),
            other => Err(ParseError::UnexpectedToken { expected: "an expression", found: other.describe().to_string() }),
        }
    }

    fn parse_paren_expr(&mut self, scope: &Rc<Scope>) -> ParseResult<Expr> {
        self.expect(&Token::LParen, "'('")?;
        let inner = self.parse_expr(scope)?;
        self.expect(&Token::RParen, "')'")?;
        Ok(inner)
    }

    // ----- if_0 .. if_6 -----

    fn parse_if_else(&mut self, scope: &Rc<Scope>) -> ParseResult<Expr> {
        tracing::trace!("if_else");
        self.expect(&Token::If, "'if'")?;
        let cond = self.parse_expr(scope)?;
        self.expect(&Token::Then, "'then'")?;
        let if_true = self.parse_expr(scope)?;
        // The fixed-arity `IfElse` node has no slot for an absent branch, so
        // `else` is mandatory here — a deliberate narrowing of the original
        // grammar, recorded in DESIGN.md.
        self.expect(&Token::Else, "'else'")?;
        let if_false = self.parse_expr(scope)?;
        let (if_true, if_false) = unify_branches(if_true, if_false)?;
        Ok(Expr::if_else(cond, if_true, if_false)?)
    }

    // ----- lm_0 .. lm_5 -----

    fn parse_lambda(&mut self, scope: &Rc<Scope>) -> ParseResult<Expr> {
        tracing::trace!("lm_0");
        self.expect(&Token::Lambda, "'lambda'")?;
        let formals = self.parse_formal_arglist()?;

        let body_scope = Scope::child(scope);
        let mut params = Vec::with_capacity(formals.len());
        let mut param_types = Vec::with_capacity(formals.len());
        for (name, ty) in formals {
            let binding = body_scope.declare(name, ty);
            params.push((name, binding));
            param_types.push(ty);
        }

        let body = self.parse_expr(&body_scope)?;
        let ret_ty = body.valuetype().unwrap_or_else(unit_type);
        let fn_ty = TypeDescr::require_by_fn_info(ret_ty, param_types, true);
        Ok(Expr::lambda(params, body, fn_ty))
    }

    // ----- argl_0, argl_1a, argl_1b / expect-formal -----

    fn parse_formal_arglist(&mut self) -> ParseResult<Vec<(Symbol, TypeDescr)>> {
        self.expect(&Token::LParen, "'(' to start a parameter list")?;
        let mut formals = Vec::new();
        if self.bump_if(&Token::RParen) {
            return Ok(formals);
        }
        loop {
            let name = self.expect_ident("a parameter name")?;
            self.expect(&Token::Colon, "':' after a parameter name")?;
            let ty = self.parse_type()?;
            formals.push((name, ty));
            if !self.bump_if(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::RParen, "')' to close a parameter list")?;
        Ok(formals)
    }

    // ----- expect-type -----

    fn parse_type(&mut self) -> ParseResult<TypeDescr> {
        if self.bump_if(&Token::LParen) {
            let mut args = Vec::new();
            if !self.bump_if(&Token::RParen) {
                loop {
                    args.push(self.parse_type()?);
                    if !self.bump_if(&Token::Comma) {
                        break;
                    }
                }
                self.expect(&Token::RParen, "')' to close a function type's parameter list")?;
            }
            if self.bump_if(&Token::Arrow) {
                let ret = self.parse_type()?;
                return Ok(TypeDescr::require_by_fn_info(ret, args, true));
            }
            if args.is_empty() {
                return Ok(unit_type());
            }
            return Err(ParseError::UnexpectedToken { expected: "'->' in a function type", found: self.current.describe().to_string() });
        }

        let name = self.expect_ident("a type name")?;
        Primitive::from_name(name.as_str())
            .map(TypeDescr::require_primitive)
            .ok_or_else(|| ParseError::UnknownType(name.as_str().to_string()))
    }

    // ----- sequence / let1 (§4.H) -----

    fn parse_sequence_expr(&mut self, scope: &Rc<Scope>) -> ParseResult<Expr> {
        self.expect(&Token::LBrace, "'{'")?;
        let body = self.parse_sequence_body(scope)?;
        self.expect(&Token::RBrace, "'}'")?;
        Ok(body)
    }

    /// `{ def x = rhs; rest... }` rewrites to
    /// `Apply(Lambda(gensym, [x], Sequence(rest...)), [rhs])` per §4.H's
    /// let1 expansion — performed here at sequence-reduction time rather
    /// than as a distinct surface form.
    fn parse_sequence_body(&mut self, scope: &Rc<Scope>) -> ParseResult<Expr> {
        let mut items = Vec::new();
        loop {
            if self.current == Token::RBrace {
                break;
            }
            if self.current == Token::Def {
                self.advance();
                let name = self.expect_ident("a name after 'def'")?;
                let declared_ty = if self.bump_if(&Token::Colon) { Some(self.parse_type()?) } else { None };
                self.expect(&Token::Eq, "'=' in a local definition")?;
                let mut rhs = self.parse_expr(scope)?;
                if let Some(td) = declared_ty {
                    rhs = coerce_to(rhs, td)?;
                }
                self.expect(&Token::Semicolon, "';' after a local definition")?;

                let rhs_ty = rhs.valuetype().unwrap_or_else(unit_type);
                let child = Scope::child(scope);
                let binding = child.declare(name, rhs_ty);
                let rest = self.parse_sequence_body(&child)?;
                let ret_ty = rest.valuetype().unwrap_or_else(unit_type);
                let fn_ty = TypeDescr::require_by_fn_info(ret_ty, vec![rhs_ty], true);
                let lambda = Expr::lambda(vec![(name, binding)], rest, fn_ty);
                items.push(Expr::apply(lambda, vec![rhs], ret_ty));
                // The let1 rewrite swallows everything through the closing
                // brace; nothing more can follow at this level.
                return Ok(Expr::sequence(items));
            }

            let expr = self.parse_expr(scope)?;
            items.push(expr);
            if self.bump_if(&Token::Semicolon) {
                if self.current == Token::RBrace {
                    break;
                }
                continue;
            }
            break;
        }
        Ok(Expr::sequence(items))
    }

    fn lookup_global(&self, name: Symbol) -> Option<(schematika_ast::Binding, TypeDescr)> {
        let binding = self.globals.lookup(name)?;
        let ty = self.global_types[binding.slot_index() as usize];
        Some((binding, ty))
    }
}

fn unit_type() -> TypeDescr {
    TypeDescr::require_primitive(Primitive::Unit)
}

fn zero_literal(prim: Primitive) -> Literal {
    match prim {
        Primitive::I16 => Literal::I16(0),
        Primitive::I32 => Literal::I32(0),
        Primitive::I64 => Literal::I64(0),
        Primitive::F32 => Literal::F32(0.0),
        Primitive::F64 => Literal::F64(0.0),
        _ => Literal::I64(0),
    }
}

fn op_family(tok: &Token) -> Option<OpFamily> {
    Some(match tok {
        Token::Plus => OpFamily::Add,
        Token::Minus => OpFamily::Sub,
        Token::Star => OpFamily::Mul,
        Token::Slash => OpFamily::Div,
        Token::EqEq | Token::Eq => OpFamily::Eq,
        Token::NotEq => OpFamily::NotEq,
        Token::Lt => OpFamily::Lt,
        Token::Gt => OpFamily::Gt,
        Token::LtEq => OpFamily::Le,
        Token::GtEq => OpFamily::Ge,
        Token::AndAnd => OpFamily::And,
        Token::OrOr => OpFamily::Or,
        _ => return None,
    })
}

/// Function-type signature to register for a primitive global at parser
/// construction time, before the interpreter has installed a real closure.
fn primitive_fn_type(name: &str) -> TypeDescr {
    if let Some(suffix) = name.strip_prefix("to_") {
        let prim = Primitive::from_name(suffix).expect("to_* names mirror Primitive::ALL");
        let td = TypeDescr::require_primitive(prim);
        return TypeDescr::require_by_fn_info(td, vec![td], true);
    }
    // `{family}2_{type}` — binary, same operand type both sides.
    let type_name = name.rsplit('_').next().expect("mangled names end in a type suffix");
    let prim = Primitive::from_name(type_name).unwrap_or(Primitive::Bool);
    let operand = TypeDescr::require_primitive(prim);
    let is_bool_result = !(name.starts_with("add2_")
        || name.starts_with("sub2_")
        || name.starts_with("mul2_")
        || name.starts_with("div2_"));
    let ret = if is_bool_result { TypeDescr::require_primitive(Primitive::Bool) } else { operand };
    TypeDescr::require_by_fn_info(ret, vec![operand, operand], true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ParseResult<Expr> {
        let mut handler = Handler::new();
        let mut parser = Parser::new(source, &mut handler);
        parser.parse_program()
    }

    #[test]
    fn parses_a_constant_definition() {
        let e = parse("def pi : f64 = 3.14159265;").unwrap();
        let seq = e.as_sequence().unwrap();
        assert_eq!(seq.body.len(), 1);
        let def = seq.body[0].as_define().unwrap();
        assert_eq!(def.name.as_str(), "pi");
    }

    #[test]
    fn parenthesized_literal_collapses_to_the_literal() {
        let e = parse("def one = (((1)));").unwrap();
        let def = e.as_sequence().unwrap().body[0].as_define().unwrap();
        let c = def.value.as_constant().unwrap();
        assert!(matches!(c.value, Literal::I64(1)));
    }

    #[test]
    fn widening_inserts_convert_for_mixed_arithmetic() {
        let e = parse("def x : f64 = 1 + 2.5;").unwrap();
        let def = e.as_sequence().unwrap().body[0].as_define().unwrap();
        assert_eq!(def.value.valuetype().unwrap().as_primitive(), Some(Primitive::F64));
    }

    #[test]
    fn if_then_else_picks_the_wider_branch_type() {
        let e = parse("def x = if true then 1 else 2.0;").unwrap();
        let def = e.as_sequence().unwrap().body[0].as_define().unwrap();
        assert_eq!(def.value.valuetype().unwrap().as_primitive(), Some(Primitive::F64));
    }

    #[test]
    fn if_without_else_is_a_parse_error() {
        let err = parse("def x = if true then 1;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn lambda_application_type_checks() {
        let e = parse("def inc = lambda(n : i64) n + 1;").unwrap();
        let def = e.as_sequence().unwrap().body[0].as_define().unwrap();
        let lambda = def.value.as_lambda().unwrap();
        assert_eq!(lambda.params.len(), 1);
    }

    #[test]
    fn nested_def_inside_a_sequence_desugars_to_apply_of_lambda() {
        let e = parse("def r = { def a = 1; def b = 2; a + b };").unwrap();
        let def = e.as_sequence().unwrap().body[0].as_define().unwrap();
        let outer_seq = def.value.as_sequence().unwrap();
        let apply = outer_seq.body[0].as_apply().unwrap();
        assert!(apply.func.as_lambda().is_some());
    }

    #[test]
    fn undefined_variable_is_reported() {
        let err = parse("def x = not_a_thing_defined_anywhere;").unwrap_err();
        assert!(matches!(err, ParseError::UndefinedVariable(_)));
    }

    #[test]
    fn function_type_annotation_parses() {
        let e = parse("def apply_twice : (i64) -> i64 = lambda(n : i64) n + 1;").unwrap();
        let def = e.as_sequence().unwrap().body[0].as_define().unwrap();
        assert!(def.value.valuetype().unwrap().is_function());
    }

    #[test]
    fn unary_minus_desugars_through_sub() {
        let e = parse("def x : i64 = -5;").unwrap();
        let def = e.as_sequence().unwrap().body[0].as_define().unwrap();
        assert_eq!(def.value.valuetype().unwrap().as_primitive(), Some(Primitive::I64));
    }

    #[test]
    fn resume_carries_globals_across_chunks() {
        let mut h1 = Handler::new();
        let mut parser = Parser::new("def a = 1;", &mut h1);
        let first = parser.parse_one_def().unwrap().unwrap();
        assert!(parser.parse_one_def().unwrap().is_none());
        let (globals, types) = parser.into_globals();

        let mut h2 = Handler::new();
        let mut parser = Parser::resume("def b = a + 1;", &mut h2, globals, types);
        let second = parser.parse_one_def().unwrap().unwrap();

        let def_a = first.as_define().unwrap();
        let def_b = second.as_define().unwrap();
        assert_eq!(def_b.value.valuetype().unwrap().as_primitive(), Some(Primitive::I64));
        assert!(def_b.binding.slot_index() > def_a.binding.slot_index());
    }
}
