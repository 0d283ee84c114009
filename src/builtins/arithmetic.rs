// ABOUTME: Arithmetic builtins: + - * / % ^ ! min max

use std::rc::Rc;

use super::{accumulator, def, function};
use crate::env::Environment;
use crate::error::LError;
use crate::numeric;
use crate::value::Value;

pub fn register(env: &Rc<Environment>) {
    def(env, "+", accumulator("+", 1, -1, Some(Value::Int(0)), add_cb));
    def(env, "*", accumulator("*", 1, -1, Some(Value::Int(1)), mul_cb));
    def(env, "-", accumulator("-", 1, -1, Some(Value::Int(0)), sub_cb));
    def(env, "/", accumulator("/", 1, -1, Some(Value::Int(1)), div_cb));
    def(env, "%", function("%", 2, 2, Vec::new(), rem_fn));
    def(env, "^", function("^", 2, 2, Vec::new(), pow_fn));
    def(env, "!", function("!", 1, 1, Vec::new(), fact_fn));
    def(env, "min", accumulator("min", 1, -1, None, min_cb));
    def(env, "max", accumulator("max", 1, -1, None, max_cb));
}

fn add_cb(_env: &Rc<Environment>, arg: &Value, acc: &mut Value) -> Result<(), LError> {
    *acc = numeric::add(acc, arg)?;
    Ok(())
}

fn mul_cb(_env: &Rc<Environment>, arg: &Value, acc: &mut Value) -> Result<(), LError> {
    *acc = numeric::mul(acc, arg)?;
    Ok(())
}

fn min_cb(_env: &Rc<Environment>, arg: &Value, acc: &mut Value) -> Result<(), LError> {
    *acc = numeric::min(acc, arg)?;
    Ok(())
}

fn max_cb(_env: &Rc<Environment>, arg: &Value, acc: &mut Value) -> Result<(), LError> {
    *acc = numeric::max(acc, arg)?;
    Ok(())
}

fn sub_cb(_env: &Rc<Environment>, arg: &Value, acc: &mut Value) -> Result<(), LError> {
    *acc = numeric::sub(acc, arg)?;
    Ok(())
}

fn div_cb(_env: &Rc<Environment>, arg: &Value, acc: &mut Value) -> Result<(), LError> {
    *acc = numeric::div(acc, arg)?;
    Ok(())
}

fn rem_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    numeric::rem(&args[0], &args[1])
}

fn pow_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    numeric::pow(&args[0], &args[1])
}

fn fact_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    numeric::factorial(&args[0])
}
