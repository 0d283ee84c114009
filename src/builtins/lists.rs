// ABOUTME: List builtins over Q-expressions: head tail init cons join list eval

use std::rc::Rc;

use super::{def, function};
use crate::dispatch;
use crate::env::Environment;
use crate::error::{LError, LErrorKind};
use crate::eval::eval_qexpr_body;
use crate::guard::{Guard, Selector};
use crate::value::{LFunction, Value};

pub fn register(env: &Rc<Environment>) {
    def(env, "head", function("head", 1, 1, vec![qexpr_guard(1), nonempty_guard(1)], head_fn));
    def(env, "tail", function("tail", 1, 1, vec![qexpr_guard(1), nonempty_guard(1)], tail_fn));
    def(env, "init", function("init", 1, 1, vec![qexpr_guard(1), nonempty_guard(1)], init_fn));
    def(env, "cons", function("cons", 2, 2, vec![qexpr_guard(2)], cons_fn));
    def(env, "join", function("join", 1, -1, vec![qexpr_guard_each()], join_fn));
    def(env, "list", function("list", 0, -1, Vec::new(), list_fn));
    def(env, "len", function("len", 1, 1, vec![qexpr_guard(1)], len_fn));
    def(env, "eval", function("eval", 1, 1, vec![qexpr_guard(1)], eval_fn));
    def(env, "map", function("map", 2, 2, vec![function_guard(1), qexpr_guard(2)], map_fn));
    def(env, "fold", function("fold", 3, 3, vec![function_guard(1), qexpr_guard(3)], fold_fn));
}

fn qexpr_guard(idx: usize) -> Guard {
    Guard::new(Selector::Arg(idx), |_f, v| {
        if v.is_qexpr() {
            Ok(())
        } else {
            Err(LError::with_message(LErrorKind::BadOperand, format!("expected a q-expression, got {}", v.type_name())))
        }
    })
}

fn nonempty_guard(idx: usize) -> Guard {
    Guard::new(Selector::Arg(idx), |_f, v| match v {
        Value::QExpr(items) if items.is_empty() => {
            Err(LError::with_message(LErrorKind::BadOperand, "expected a non-empty q-expression"))
        }
        _ => Ok(()),
    })
}

fn qexpr_guard_each() -> Guard {
    Guard::new(Selector::Each, |_f, v| {
        if v.is_qexpr() {
            Ok(())
        } else {
            Err(LError::with_message(LErrorKind::BadOperand, format!("expected a q-expression, got {}", v.type_name())))
        }
    })
}

fn as_qexpr_items(v: &Value) -> &[Value] {
    match v {
        Value::QExpr(items) => items,
        _ => unreachable!("guarded to be a q-expression"),
    }
}

fn function_guard(idx: usize) -> Guard {
    Guard::new(Selector::Arg(idx), |_f, v| {
        if matches!(v, Value::Function(_)) {
            Ok(())
        } else {
            Err(LError::with_message(LErrorKind::BadOperand, format!("expected a function, got {}", v.type_name())))
        }
    })
}

fn as_function(v: &Value) -> &Rc<LFunction> {
    match v {
        Value::Function(f) => f,
        _ => unreachable!("guarded to be a function"),
    }
}

fn head_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let items = as_qexpr_items(&args[0]);
    Ok(Value::QExpr(vec![items[0].clone()]))
}

fn tail_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let items = as_qexpr_items(&args[0]);
    Ok(Value::QExpr(items[1..].to_vec()))
}

fn init_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let items = as_qexpr_items(&args[0]);
    Ok(Value::QExpr(items[..items.len() - 1].to_vec()))
}

fn cons_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let items = as_qexpr_items(&args[1]);
    let mut out = Vec::with_capacity(items.len() + 1);
    out.push(args[0].clone());
    out.extend_from_slice(items);
    Ok(Value::QExpr(out))
}

fn join_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let mut out = Vec::new();
    for a in args {
        out.extend_from_slice(as_qexpr_items(a));
    }
    Ok(Value::QExpr(out))
}

fn list_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    Ok(Value::QExpr(args.to_vec()))
}

fn len_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    Ok(Value::Int(as_qexpr_items(&args[0]).len() as i64))
}

fn eval_fn(env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    eval_qexpr_body(env, &args[0])
}

/// Applies `f` to each element of the q-expression in turn, collecting the
/// results into a new q-expression: `map (\ {x} {* 2 x}) {1 2 3 4}` is
/// `{2 4 6 8}`.
fn map_fn(env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let f = as_function(&args[0]);
    let items = as_qexpr_items(&args[1]);
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match dispatch::apply(env, f, vec![item.clone()]) {
            Value::Error(e) => return Err(e),
            v => out.push(v),
        }
    }
    Ok(Value::QExpr(out))
}

/// Left-folds `f` over the q-expression starting from `init`:
/// `fold (\ {acc x} {+ acc x}) 0 {1 2 3 4}` is `10`.
fn fold_fn(env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let f = as_function(&args[0]);
    let items = as_qexpr_items(&args[2]);
    let mut acc = args[1].clone();
    for item in items {
        match dispatch::apply(env, f, vec![acc, item.clone()]) {
            Value::Error(e) => return Err(e),
            v => acc = v,
        }
    }
    Ok(acc)
}
