// ABOUTME: Builtin registration: arithmetic, comparison, logic, lists, definitions, control, io

pub mod arithmetic;
pub mod comparison;
pub mod control;
pub mod definitions;
pub mod io;
pub mod lists;
pub mod logic;

use std::rc::Rc;

use crate::env::Environment;
use crate::guard::Guard;
use crate::value::{BuiltinCallback, FuncBody, LFunction, Value};

pub fn register_builtins(env: &Rc<Environment>) {
    arithmetic::register(env);
    comparison::register(env);
    logic::register(env);
    lists::register(env);
    definitions::register(env);
    control::register(env);
    io::register(env);
}

fn accumulator(
    name: &str,
    min_argc: i64,
    max_argc: i64,
    init_neutral: Option<Value>,
    func: fn(&Rc<Environment>, &Value, &mut Value) -> Result<(), crate::error::LError>,
) -> Value {
    Value::Function(Rc::new(LFunction {
        symbol: Some(name.to_string()),
        min_argc,
        max_argc,
        guards: Vec::new(),
        args: Vec::new(),
        body: FuncBody::Builtin {
            accumulator: true,
            init_neutral: init_neutral.map(Box::new),
            func: BuiltinCallback::Accumulator(func),
        },
    }))
}

fn function(
    name: &str,
    min_argc: i64,
    max_argc: i64,
    guards: Vec<Guard>,
    func: fn(&Rc<Environment>, &[Value]) -> Result<Value, crate::error::LError>,
) -> Value {
    Value::Function(Rc::new(LFunction {
        symbol: Some(name.to_string()),
        min_argc,
        max_argc,
        guards,
        args: Vec::new(),
        body: FuncBody::Builtin {
            accumulator: false,
            init_neutral: None,
            func: BuiltinCallback::Function(func),
        },
    }))
}

fn def(env: &Rc<Environment>, name: &str, value: Value) {
    env.define(name, value);
}
