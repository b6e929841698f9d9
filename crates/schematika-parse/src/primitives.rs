//! Thin parser-facing wrapper over [`schematika_types::primitive_ops`]:
//! turns a family/operand pair into the `Symbol` the parser binds `Apply`
//! nodes to, erroring with a `ParseError` when no such overload exists.

use schematika_types::primitive_ops::OpFamily;
use schematika_types::Primitive;
use schematika_util::Symbol;

use crate::error::{ParseError, ParseResult};

pub use schematika_types::primitive_ops::all_primitive_names;

/// Resolve the mangled global name for `family` applied to operands already
/// unified to `operand`, erroring if no such primitive overload exists
/// (e.g. `true && false` through `Add`, or `"a" < "b"`).
pub fn mangled_name_for(family: OpFamily, operand: Primitive) -> ParseResult<Symbol> {
    if !family.accepts(operand) {
        return Err(ParseError::UnknownType(format!(
            "no '{}' overload for type '{}'",
            family.mangled_name(operand),
            operand.name()
        )));
    }
    Ok(Symbol::intern(&family.mangled_name(operand)))
}
