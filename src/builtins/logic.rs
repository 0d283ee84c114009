// ABOUTME: Logic builtins: && || not
//
// The reference catalogue lists `!` for both factorial and logical negation;
// since a symbol can only be bound once, logical negation is bound to `not`
// here and `!` stays factorial's alone (see DESIGN.md).

use std::rc::Rc;

use super::{accumulator, def, function};
use crate::env::Environment;
use crate::error::LError;
use crate::value::Value;

pub fn register(env: &Rc<Environment>) {
    def(env, "&&", accumulator("&&", 0, -1, Some(Value::Int(1)), and_cb));
    def(env, "||", accumulator("||", 0, -1, Some(Value::Int(0)), or_cb));
    def(env, "not", function("not", 1, 1, Vec::new(), not_fn));
}

fn and_cb(_env: &Rc<Environment>, arg: &Value, acc: &mut Value) -> Result<(), LError> {
    *acc = Value::Int((acc.is_truthy() && arg.is_truthy()) as i64);
    Ok(())
}

fn or_cb(_env: &Rc<Environment>, arg: &Value, acc: &mut Value) -> Result<(), LError> {
    *acc = Value::Int((acc.is_truthy() || arg.is_truthy()) as i64);
    Ok(())
}

fn not_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    Ok(Value::Int(!args[0].is_truthy() as i64))
}
