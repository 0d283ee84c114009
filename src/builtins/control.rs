// ABOUTME: Control-flow builtins: if loop

use std::rc::Rc;

use super::{def, function};
use crate::env::Environment;
use crate::error::LError;
use crate::eval::eval_qexpr_body;
use crate::value::Value;

pub fn register(env: &Rc<Environment>) {
    def(env, "if", function("if", 3, 3, Vec::new(), if_fn));
    def(env, "loop", function("loop", 2, 2, Vec::new(), loop_fn));
}

/// `(if cond {then} {else})`: evaluates the chosen q-expr branch as code.
fn if_fn(env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let branch = if args[0].is_truthy() { &args[1] } else { &args[2] };
    eval_qexpr_body(env, branch)
}

/// `(loop {cond} {body})`: re-evaluates `cond` before each pass and keeps
/// running `body` while it stays truthy, returning the last body value (or
/// `Nil` if the loop never ran).
fn loop_fn(env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let mut last = Value::Nil;
    loop {
        let cond = eval_qexpr_body(env, &args[0])?;
        if !cond.is_truthy() {
            break;
        }
        last = eval_qexpr_body(env, &args[1])?;
    }
    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::eval::eval_from_string;

    fn fresh_env() -> Rc<Environment> {
        let env = Environment::new();
        register_builtins(&env);
        env
    }

    #[test]
    fn if_picks_the_then_branch_when_truthy() {
        let env = fresh_env();
        let (v, _) = eval_from_string(&env, "if 1 {+ 1 1} {+ 2 2}");
        assert_eq!(v, Value::Int(2));
    }

    #[test]
    fn if_picks_the_else_branch_when_falsy() {
        let env = fresh_env();
        let (v, _) = eval_from_string(&env, "if 0 {+ 1 1} {+ 2 2}");
        assert_eq!(v, Value::Int(4));
    }

    #[test]
    fn loop_counts_down_to_zero() {
        let env = fresh_env();
        eval_from_string(&env, "def {i} 3");
        let (v, err) = eval_from_string(&env, "loop {> i 0} {def {i} (- i 1)}");
        assert!(err.is_none());
        let (remaining, _) = eval_from_string(&env, "i");
        assert_eq!(remaining, Value::Int(0));
        let _ = v;
    }
}
