// ABOUTME: Comparison builtins: == != > < >= <=

use std::rc::Rc;

use super::{def, function};
use crate::env::Environment;
use crate::error::LError;
use crate::numeric;
use crate::value::Value;

pub fn register(env: &Rc<Environment>) {
    def(env, "==", function("==", 2, 2, Vec::new(), eq_fn));
    def(env, "!=", function("!=", 2, 2, Vec::new(), neq_fn));
    def(env, ">", function(">", 2, 2, Vec::new(), gt_fn));
    def(env, "<", function("<", 2, 2, Vec::new(), lt_fn));
    def(env, ">=", function(">=", 2, 2, Vec::new(), ge_fn));
    def(env, "<=", function("<=", 2, 2, Vec::new(), le_fn));
}

fn bool_value(b: bool) -> Value {
    Value::Int(if b { 1 } else { 0 })
}

fn eq_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    Ok(bool_value(args[0].equal(&args[1])))
}

fn neq_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    Ok(bool_value(!args[0].equal(&args[1])))
}

fn gt_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    Ok(bool_value(numeric::compare(&args[0], &args[1])?.is_gt()))
}

fn lt_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    Ok(bool_value(numeric::compare(&args[0], &args[1])?.is_lt()))
}

fn ge_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    Ok(bool_value(numeric::compare(&args[0], &args[1])?.is_ge()))
}

fn le_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    Ok(bool_value(numeric::compare(&args[0], &args[1])?.is_le()))
}
