// ABOUTME: String/IO builtins: print println read error

use std::rc::Rc;

use super::{def, function};
use crate::ast::Ast;
use crate::env::Environment;
use crate::error::{LError, LErrorKind};
use crate::eval::ast_to_value;
use crate::lexer::lex;
use crate::parser::parse;
use crate::value::Value;

pub fn register(env: &Rc<Environment>) {
    def(env, "print", function("print", 0, -1, Vec::new(), print_fn));
    def(env, "println", function("println", 0, -1, Vec::new(), println_fn));
    def(env, "read", function("read", 1, 1, Vec::new(), read_fn));
    def(env, "error", function("error", 1, 1, Vec::new(), error_fn));
}

fn render(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn print_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let text = args.iter().map(render).collect::<Vec<_>>().join(" ");
    print!("{text}");
    Ok(Value::Nil)
}

fn println_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let text = args.iter().map(render).collect::<Vec<_>>().join(" ");
    println!("{text}");
    Ok(Value::Nil)
}

/// `(read "...")`: lexes and parses a string into a q-expression of
/// unevaluated forms, the same data `eval` can later run.
fn read_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let Value::String(s) = &args[0] else {
        return Err(LError::with_message(LErrorKind::BadOperand, "`read` requires a string"));
    };
    let tokens = lex(s);
    let ast = parse(&tokens);
    let Ast::Program(children) = ast else {
        unreachable!("parse() always returns a Program node")
    };
    let values: Vec<Value> = children.iter().map(ast_to_value).collect();
    if let Some(Value::Error(e)) = values.iter().find(|v| v.is_error()) {
        return Err(e.clone());
    }
    Ok(Value::QExpr(values))
}

/// `(error "message")`: constructs an error value carrying a user message.
fn error_fn(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, LError> {
    let Value::String(s) = &args[0] else {
        return Err(LError::with_message(LErrorKind::BadOperand, "`error` requires a string"));
    };
    Ok(Value::Error(LError::with_message(LErrorKind::Eval, s.clone())))
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
    fn error_builtin_produces_an_error_value() {
        let env = fresh_env();
        let (v, err) = eval_from_string(&env, "error \"boom\"");
        assert!(v.is_error());
        assert_eq!(err.unwrap().kind, LErrorKind::Eval);
    }

    #[test]
    fn read_parses_a_string_into_a_qexpr_of_forms() {
        let env = fresh_env();
        let (v, err) = eval_from_string(&env, "read \"+ 1 2\"");
        assert!(err.is_none());
        match v {
            Value::QExpr(items) => assert_eq!(items.len(), 1),
            other => panic!("expected qexpr, got {other:?}"),
        }
    }
}
