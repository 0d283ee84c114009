// ABOUTME: Definition builtins: def = fun lambda (\)

use std::rc::Rc;

use super::{def, function};
use crate::env::Environment;
use crate::error::{LError, LErrorKind};
use crate::value::{FuncBody, LFunction, Value};

pub fn register(env: &Rc<Environment>) {
    def(env, "def", function("def", 2, -1, Vec::new(), def_fn));
    def(env, "=", function("=", 2, -1, Vec::new(), assign_fn));
    def(env, "lambda", function("lambda", 2, 2, Vec::new(), lambda_fn));
    def(env, "\\", function("\\", 2, 2, Vec::new(), lambda_fn));
    def(env, "fun", function("fun", 2, 2, Vec::new(), fun_fn));
}

/// `(def {x y} 1 2)` binds globally, overwriting any existing binding
/// (spec's resolved Open Question: redefinition is a plain overwrite).
fn def_fn(env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    bind_many(env, &args[0], &args[1..], true)
}

/// `(= {x y} 1 2)` binds in the current call scope only.
fn assign_fn(env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    bind_many(env, &args[0], &args[1..], false)
}

fn bind_many(env: &Rc<Environment>, names_q: &Value, values: &[Value], global: bool) -> Result<Value, LError> {
    let Value::QExpr(names) = names_q else {
        return Err(LError::with_message(LErrorKind::BadOperand, "expected a q-expression of names"));
    };
    if names.len() != values.len() {
        return Err(LError::with_message(
            LErrorKind::BadOperand,
            format!("cannot define {} names with {} values", names.len(), values.len()),
        ));
    }
    for (n, v) in names.iter().zip(values.iter()) {
        let Value::Symbol(s) = n else {
            return Err(LError::with_message(LErrorKind::BadOperand, "can only define symbols"));
        };
        if global {
            env.put_global(s.clone(), v.clone());
        } else {
            env.define(s.clone(), v.clone());
        }
    }
    Ok(Value::Nil)
}

/// `(\ {x & xs} {body})` / `(lambda {x & xs} {body})`: builds an anonymous
/// closure over the defining scope. `&` marks the remaining formal as a
/// variadic rest parameter collecting the tail of arguments as a q-expr.
fn lambda_fn(env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    build_lambda(env, &args[0], &args[1], None)
}

/// `(fun {name x y} {body})`: sugar for defining a named function globally.
fn fun_fn(env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let Value::QExpr(header) = &args[0] else {
        return Err(LError::with_message(LErrorKind::BadOperand, "expected a q-expression of name and formals"));
    };
    let (name_item, formal_items) = header
        .split_first()
        .ok_or_else(|| LError::with_message(LErrorKind::BadOperand, "`fun` requires a function name"))?;
    let Value::Symbol(name) = name_item else {
        return Err(LError::with_message(LErrorKind::BadOperand, "function name must be a symbol"));
    };
    let formals = Value::QExpr(formal_items.to_vec());
    let func = build_lambda(env, &formals, &args[1], Some(name.clone()))?;
    env.put_global(name.clone(), func);
    Ok(Value::Nil)
}

fn build_lambda(env: &Rc<Environment>, formals_q: &Value, body_q: &Value, name: Option<String>) -> Result<Value, LError> {
    let Value::QExpr(formal_items) = formals_q else {
        return Err(LError::with_message(LErrorKind::BadOperand, "expected a q-expression of formal parameters"));
    };
    let Value::QExpr(body_items) = body_q else {
        return Err(LError::with_message(LErrorKind::BadOperand, "expected a q-expression body"));
    };

    let mut formals = Vec::new();
    let mut has_rest = false;
    let mut i = 0;
    while i < formal_items.len() {
        match &formal_items[i] {
            Value::Symbol(s) if s == "&" => {
                has_rest = true;
                i += 1;
                match formal_items.get(i) {
                    Some(Value::Symbol(rest_name)) => formals.push(rest_name.clone()),
                    _ => {
                        return Err(LError::with_message(
                            LErrorKind::BadOperand,
                            "`&` must be followed by a single rest parameter name",
                        ))
                    }
                }
            }
            Value::Symbol(s) => formals.push(s.clone()),
            other => {
                return Err(LError::with_message(
                    LErrorKind::BadOperand,
                    format!("formal parameters must be symbols, got {}", other.type_name()),
                ))
            }
        }
        i += 1;
    }

    let min_argc = formals.len() as i64 - if has_rest { 1 } else { 0 };
    let max_argc = if has_rest { -1 } else { formals.len() as i64 };

    Ok(Value::Function(Rc::new(LFunction {
        symbol: name,
        min_argc,
        max_argc,
        guards: Vec::new(),
        args: Vec::new(),
        body: FuncBody::UserDefined {
            formals,
            has_rest,
            body: Rc::new(Value::SExpr(body_items.to_vec())),
            scope: env.clone(),
        },
    })))
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
    fn def_binds_globally_and_survives_a_nested_scope() {
        let env = fresh_env();
        let (_, err) = eval_from_string(&env, "def {x} 10");
        assert!(err.is_none());
        let (v, _) = eval_from_string(&env, "x");
        assert_eq!(v, Value::Int(10));
    }

    #[test]
    fn def_redefinition_overwrites_without_error() {
        let env = fresh_env();
        eval_from_string(&env, "def {x} 1");
        let (_, err) = eval_from_string(&env, "def {x} 2");
        assert!(err.is_none());
        let (v, _) = eval_from_string(&env, "x");
        assert_eq!(v, Value::Int(2));
    }

    #[test]
    fn lambda_supports_partial_application() {
        let env = fresh_env();
        eval_from_string(&env, "def {add} (\\ {a b} {+ a b})");
        let (v, err) = eval_from_string(&env, "((add 1) 2)");
        assert!(err.is_none());
        assert_eq!(v, Value::Int(3));
    }

    #[test]
    fn rest_parameter_collects_remaining_args_as_qexpr() {
        let env = fresh_env();
        eval_from_string(&env, "def {pack} (\\ {x & xs} {xs})");
        let (v, _) = eval_from_string(&env, "pack 1 2 3");
        assert_eq!(v, Value::QExpr(vec![Value::Int(2), Value::Int(3)]));
    }

    #[test]
    fn fun_defines_a_named_global_function() {
        let env = fresh_env();
        eval_from_string(&env, "fun {double x} {* x 2}");
        let (v, err) = eval_from_string(&env, "double 21");
        assert!(err.is_none());
        assert_eq!(v, Value::Int(42));
    }
}
