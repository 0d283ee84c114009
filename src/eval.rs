// ABOUTME: AST-to-value lowering and the recursive evaluator

use std::rc::Rc;

use num_bigint::BigInt;

use crate::ast::{Ast, ParseErrorKind};
use crate::dispatch;
use crate::env::Environment;
use crate::error::{LError, LErrorKind};
use crate::lexer::lex;
use crate::parser::parse;
use crate::value::Value;

/// Lowers a parsed AST node into an unevaluated `Value`. Numbers/strings
/// become literals, `QExpr`/`SExpr` lower their children recursively, and
/// parser error nodes become `Value::Error` carrying the matching closed
/// error code.
pub fn ast_to_value(ast: &Ast) -> Value {
    match ast {
        Ast::Program(_) => unreachable!("Program is only ever the parser's top-level node"),
        Ast::Num(text, _) => match text.parse::<i64>() {
            Ok(i) => Value::Int(i),
            Err(_) => match text.parse::<BigInt>() {
                Ok(b) => Value::BigInt(b),
                Err(_) => Value::Error(
                    LError::with_message(LErrorKind::BadNum, format!("invalid number literal `{text}`")).at(ast.pos()),
                ),
            },
        },
        Ast::Double(text, _) => match text.parse::<f64>() {
            Ok(d) => Value::Double(d),
            Err(_) => Value::Error(
                LError::with_message(LErrorKind::BadNum, format!("invalid double literal `{text}`")).at(ast.pos()),
            ),
        },
        Ast::Str(s, _) => Value::String(s.clone()),
        Ast::Sym(s, _) => Value::Symbol(s.clone()),
        Ast::SExpr(children, _) => Value::SExpr(children.iter().map(ast_to_value).collect()),
        Ast::QExpr(children, _) => Value::QExpr(children.iter().map(ast_to_value).collect()),
        Ast::Error(kind, message, pos) => {
            let ekind = match kind {
                ParseErrorKind::BadExpr => LErrorKind::ParserBadExpr,
                ParseErrorKind::MissingCPar => LErrorKind::ParserMissingCPar,
                ParseErrorKind::MissingCBrc => LErrorKind::ParserMissingCBrc,
                ParseErrorKind::BadOperand => LErrorKind::ParserBadOperand,
            };
            Value::Error(LError::with_message(ekind, message.clone()).at(*pos))
        }
    }
}

/// Evaluates a lowered value against `env`. `QExpr` is inert (evaluates to
/// itself, children untouched) — this is what lets `{x}`-shaped operands to
/// `def`/`fun`/`if`/`loop` pass through the ordinary evaluation path without
/// any special-form handling in the evaluator itself.
pub fn eval_value(env: &Rc<Environment>, value: Value) -> Value {
    match value {
        Value::Symbol(name) => match env.lookup(&name) {
            Ok(v) => v,
            Err(e) => Value::Error(e),
        },
        Value::SExpr(children) => eval_sexpr(env, children),
        Value::Error(e) => Value::Error(downgrade_nested_parser_error(e)),
        other => other,
    }
}

/// A parser error reached here because it was a nested operand inside an
/// otherwise well-formed application (e.g. the dangling `(` in `- (`), not
/// because the whole input was unparseable — `eval_from_string` catches
/// that latter case directly from `ast_to_value`, before this function ever
/// runs. From the evaluator's point of view a malformed nested operand is
/// just an expression that can't be evaluated, so its typed parser code is
/// downgraded to the generic `Eval` code here.
fn downgrade_nested_parser_error(e: LError) -> LError {
    use LErrorKind::*;
    match e.kind {
        ParserMissingOPar | ParserMissingCPar | ParserMissingCBrc | ParserBadOperand | ParserBadExpr => {
            LError { kind: Eval, ..e }
        }
        _ => e,
    }
}

fn eval_sexpr(env: &Rc<Environment>, children: Vec<Value>) -> Value {
    if children.is_empty() {
        return Value::Nil;
    }
    let mut evaluated = Vec::with_capacity(children.len());
    for child in children {
        let v = eval_value(env, child);
        if v.is_error() {
            return v;
        }
        evaluated.push(v);
    }
    // A single-element s-expression (after evaluation) is returned as-is
    // rather than invoked — this is what lets `eval {+}` hand back the `+`
    // function itself instead of calling it with zero arguments, which in
    // turn is what makes `$`-piped partial lookups like `eval $ head {+ -}`
    // produce a callable value.
    if evaluated.len() == 1 {
        return evaluated.remove(0);
    }

    let head = evaluated.remove(0);
    match head {
        Value::Function(func) => dispatch::apply(env, &func, evaluated),
        Value::Nil => Value::Error(LError::new(LErrorKind::NilFuncCall)),
        other => Value::Error(LError::with_message(
            LErrorKind::Eval,
            format!("{other} is not callable"),
        )),
    }
}

/// Evaluates `value` as code when it is a `QExpr` (the `eval`/`if`/`loop`
/// contract: convert the quoted list into an applied one and run it). Any
/// other value passes through unchanged.
pub fn eval_qexpr_body(env: &Rc<Environment>, value: &Value) -> Result<Value, LError> {
    let items = match value {
        Value::QExpr(items) => items.clone(),
        other => return Ok(other.clone()),
    };
    match eval_value(env, Value::SExpr(items)) {
        Value::Error(e) => Err(e),
        other => Ok(other),
    }
}

/// Parses and evaluates every top-level form in `src` in sequence, stopping
/// at the first error (parse or eval). Returns the last value produced and,
/// if a stop happened early, the error responsible.
pub fn eval_from_string(env: &Rc<Environment>, src: &str) -> (Value, Option<LError>) {
    let tokens = lex(src);
    let ast = parse(&tokens);
    let Ast::Program(children) = ast else {
        unreachable!("parse() always returns a Program node")
    };

    let mut last = Value::Nil;
    for child in children {
        let lowered = ast_to_value(&child);
        if let Value::Error(e) = lowered {
            return (Value::Error(e.clone()), Some(e));
        }
        last = eval_value(env, lowered);
        if let Value::Error(e) = &last {
            return (last.clone(), Some(e.clone()));
        }
    }
    (last, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;

    fn fresh_env() -> Rc<Environment> {
        let env = Environment::new();
        register_builtins(&env);
        env
    }

    #[test]
    fn simple_addition_evaluates() {
        let env = fresh_env();
        let (v, err) = eval_from_string(&env, "+ 1 1");
        assert!(err.is_none());
        assert_eq!(v, Value::Int(2));
    }

    #[test]
    fn consecutive_parenthesised_forms_each_evaluate() {
        let env = fresh_env();
        let (v, err) = eval_from_string(&env, "(+ 1 1)(+ 2 2)");
        assert!(err.is_none());
        assert_eq!(v, Value::Int(4));
    }

    #[test]
    fn unbound_symbol_is_bad_symbol_error() {
        let env = fresh_env();
        let (v, err) = eval_from_string(&env, "undefined_name");
        assert!(matches!(v, Value::Error(_)));
        assert_eq!(err.unwrap().kind, LErrorKind::BadSymbol);
    }

    #[test]
    fn qexpr_is_inert_and_does_not_evaluate_its_members() {
        let env = fresh_env();
        let (v, err) = eval_from_string(&env, "{+ 1 1}");
        assert!(err.is_none());
        assert!(matches!(v, Value::QExpr(_)));
    }

    #[test]
    fn calling_nil_is_a_nil_func_call_error() {
        let env = Environment::new();
        env.define("nothing", Value::Nil);
        let (_, err) = eval_from_string(&env, "(nothing 1)");
        assert_eq!(err.unwrap().kind, LErrorKind::NilFuncCall);
    }
}
